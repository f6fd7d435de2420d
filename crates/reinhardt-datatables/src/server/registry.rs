//! Registry of installed server-side data sources.

use super::ServerDataError;
use super::data::ServerData;
use super::request::{DrawRequest, DrawResponse};
use parking_lot::RwLock;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

#[derive(Debug)]
struct Entry {
	generation: u64,
	data: Arc<ServerData>,
}

/// A pinned adapter together with the generation it was installed as.
///
/// Requests answered through a lease fail with
/// [`ServerDataError::Stale`] once the table was compiled again.
#[derive(Debug, Clone)]
pub struct ServerDataLease {
	table_id: String,
	generation: u64,
	data: Arc<ServerData>,
}

impl ServerDataLease {
	/// Table id.
	pub fn table_id(&self) -> &str {
		&self.table_id
	}

	/// Generation of the pinned adapter.
	pub fn generation(&self) -> u64 {
		self.generation
	}

	/// The pinned adapter.
	pub fn data(&self) -> &Arc<ServerData> {
		&self.data
	}
}

/// At most one live [`ServerData`] per table id.
#[derive(Debug, Default)]
pub struct ServerDataRegistry {
	entries: RwLock<HashMap<String, Entry>>,
	next_generation: AtomicU64,
}

impl ServerDataRegistry {
	/// Creates an empty registry.
	pub fn new() -> Self {
		Self::default()
	}

	/// Installs `data` for `table_id`, returning the adapter it replaced.
	pub fn register(&self, table_id: impl Into<String>, data: ServerData) -> Option<Arc<ServerData>> {
		let table_id = table_id.into();
		let generation = self.next_generation.fetch_add(1, Ordering::Relaxed) + 1;
		let previous = self.entries.write().insert(
			table_id.clone(),
			Entry {
				generation,
				data: Arc::new(data),
			},
		);
		if previous.is_some() {
			tracing::debug!(table_id = %table_id, generation, "replaced server-side data");
		}
		previous.map(|entry| entry.data)
	}

	/// The current adapter of `table_id`.
	pub fn get(&self, table_id: &str) -> Option<Arc<ServerData>> {
		self.entries
			.read()
			.get(table_id)
			.map(|entry| Arc::clone(&entry.data))
	}

	/// Current generation of `table_id`.
	pub fn generation(&self, table_id: &str) -> Option<u64> {
		self.entries.read().get(table_id).map(|entry| entry.generation)
	}

	/// Pins the current adapter of `table_id`.
	pub fn lease(&self, table_id: &str) -> Result<ServerDataLease, ServerDataError> {
		let entries = self.entries.read();
		let entry = entries
			.get(table_id)
			.ok_or_else(|| ServerDataError::NotFound(table_id.to_string()))?;
		Ok(ServerDataLease {
			table_id: table_id.to_string(),
			generation: entry.generation,
			data: Arc::clone(&entry.data),
		})
	}

	/// Answers `request` with the current adapter of `table_id`.
	pub fn answer(&self, table_id: &str, request: &DrawRequest) -> Result<DrawResponse, ServerDataError> {
		let data = self.get(table_id).ok_or_else(|| {
			tracing::error!(table_id = %table_id, "no such server-side table");
			ServerDataError::NotFound(table_id.to_string())
		})?;
		Ok(data.answer(request))
	}

	/// Answers `request` with a pinned adapter.
	///
	/// Fails with [`ServerDataError::Stale`] when the table was registered
	/// again after the lease was taken.
	pub fn answer_lease(
		&self,
		lease: &ServerDataLease,
		request: &DrawRequest,
	) -> Result<DrawResponse, ServerDataError> {
		match self.generation(&lease.table_id) {
			Some(generation) if generation == lease.generation => Ok(lease.data.answer(request)),
			Some(_) => {
				tracing::warn!(table_id = %lease.table_id, generation = lease.generation, "stale server-side request");
				Err(ServerDataError::Stale {
					table_id: lease.table_id.clone(),
					generation: lease.generation,
				})
			}
			None => Err(ServerDataError::NotFound(lease.table_id.clone())),
		}
	}

	/// Answers a posted JSON body naming its table in `object_param`.
	pub fn answer_json(&self, body: &Value, object_param: &str) -> Result<DrawResponse, ServerDataError> {
		let table_id = body
			.get(object_param)
			.and_then(Value::as_str)
			.ok_or_else(|| ServerDataError::MissingObjectParam(object_param.to_string()))?;
		let request: DrawRequest = serde_json::from_value(body.clone())?;
		self.answer(table_id, &request)
	}

	/// Uninstalls the adapter of `table_id`.
	pub fn remove(&self, table_id: &str) -> Option<Arc<ServerData>> {
		self.entries.write().remove(table_id).map(|entry| entry.data)
	}

	/// Number of installed adapters.
	pub fn len(&self) -> usize {
		self.entries.read().len()
	}

	/// Returns whether no adapter is installed.
	pub fn is_empty(&self) -> bool {
		self.entries.read().is_empty()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::column::ColumnDefs;
	use crate::paging::FilterSemantics;
	use crate::table::{HtmlTable, TableColumn, TableRow};
	use rstest::rstest;
	use serde_json::json;

	fn data(rows: usize) -> ServerData {
		let mut table = HtmlTable::new("t").column(TableColumn::new("A"));
		for i in 0..rows {
			table = table.row(TableRow::new([i.to_string()]));
		}
		ServerData::new(&table, &ColumnDefs::new(), FilterSemantics::AnyTermPerRow).unwrap()
	}

	#[rstest]
	fn test_register_replaces() {
		let registry = ServerDataRegistry::new();

		assert!(registry.register("t", data(1)).is_none());
		let replaced = registry.register("t", data(2)).unwrap();

		assert_eq!(replaced.row_count(), 1);
		assert_eq!(registry.get("t").unwrap().row_count(), 2);
		assert_eq!(registry.len(), 1);
	}

	#[rstest]
	fn test_stale_lease() {
		let registry = ServerDataRegistry::new();
		registry.register("t", data(1));
		let lease = registry.lease("t").unwrap();
		let request = DrawRequest::default();

		assert!(registry.answer_lease(&lease, &request).is_ok());

		registry.register("t", data(2));

		assert!(matches!(
			registry.answer_lease(&lease, &request),
			Err(ServerDataError::Stale { .. })
		));
		assert_eq!(registry.answer("t", &request).unwrap().records_total, 2);
	}

	#[rstest]
	fn test_unknown_table() {
		let registry = ServerDataRegistry::new();

		assert!(matches!(
			registry.answer("missing", &DrawRequest::default()),
			Err(ServerDataError::NotFound(id)) if id == "missing"
		));
	}

	#[rstest]
	fn test_answer_json() {
		let registry = ServerDataRegistry::new();
		registry.register("t", data(3));

		let response = registry
			.answer_json(&json!({"draw": 4, "start": 0, "length": 2, "object": "t"}), "object")
			.unwrap();

		assert_eq!(response.draw, 4);
		assert_eq!(response.data.len(), 2);
		assert!(matches!(
			registry.answer_json(&json!({"draw": 1}), "object"),
			Err(ServerDataError::MissingObjectParam(_))
		));
	}
}
