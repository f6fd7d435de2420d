//! Initial multi-column sort order.

use crate::js::JsValue;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

/// Sort direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderDirection {
	/// Ascending.
	#[default]
	Asc,
	/// Descending.
	Desc,
}

impl OrderDirection {
	/// Wire name.
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Asc => "asc",
			Self::Desc => "desc",
		}
	}
}

/// Ordered list of `(column, direction)` pairs.
///
/// An empty order is meaningful: it disables the runtime's implicit sort by
/// the first column.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderSpec {
	columns: Vec<(usize, OrderDirection)>,
}

impl OrderSpec {
	/// Creates an empty order.
	pub fn new() -> Self {
		Self::default()
	}

	/// Appends a sort column.
	pub fn add_column(mut self, column: usize, direction: OrderDirection) -> Self {
		self.columns.push((column, direction));
		self
	}

	/// Sort columns in priority order.
	pub fn columns(&self) -> &[(usize, OrderDirection)] {
		&self.columns
	}

	/// Returns whether no column is ordered.
	pub fn is_empty(&self) -> bool {
		self.columns.is_empty()
	}

	/// Payload form `[[column, "asc"], ...]`.
	pub fn to_js(&self) -> JsValue {
		let pairs = self
			.columns
			.iter()
			.map(|(column, direction)| json!([column, direction.as_str()]))
			.collect();
		JsValue::Json(Value::Array(pairs))
	}
}

impl FromIterator<(usize, OrderDirection)> for OrderSpec {
	fn from_iter<I: IntoIterator<Item = (usize, OrderDirection)>>(iter: I) -> Self {
		Self {
			columns: iter.into_iter().collect(),
		}
	}
}
