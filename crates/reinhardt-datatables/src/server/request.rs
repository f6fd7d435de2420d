//! Draw request and response wire types.

use crate::order::OrderDirection;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A search value with its regex flag.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Search {
	/// Search text; terms are separated by whitespace.
	pub value: String,
	/// Whether each term is a regular expression.
	pub regex: bool,
}

impl Search {
	/// Plain text search.
	pub fn text(value: impl Into<String>) -> Self {
		Self {
			value: value.into(),
			regex: false,
		}
	}

	/// Whitespace-separated terms.
	pub fn terms(&self) -> Vec<&str> {
		self.value.split_whitespace().collect()
	}

	/// Returns whether any term is present.
	pub fn has_terms(&self) -> bool {
		!self.value.trim().is_empty()
	}
}

/// Requested sort column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestOrder {
	/// Column index.
	pub column: usize,
	/// Direction.
	#[serde(default)]
	pub dir: OrderDirection,
}

/// Per-column request state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RequestColumn {
	/// Data source of the column.
	pub data: Value,
	/// Column name.
	pub name: String,
	/// Whether the column is searched.
	pub searchable: bool,
	/// Whether the column may be ordered.
	pub orderable: bool,
	/// Column-specific search.
	pub search: Search,
}

impl Default for RequestColumn {
	fn default() -> Self {
		Self {
			data: Value::Null,
			name: String::new(),
			searchable: true,
			orderable: true,
			search: Search::default(),
		}
	}
}

/// A draw request sent by the runtime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DrawRequest {
	/// Draw sequence token, echoed in the response.
	pub draw: u64,
	/// Offset of the first row.
	pub start: usize,
	/// Page length; `-1` shows all rows.
	pub length: i64,
	/// Global search.
	pub search: Search,
	/// Sort columns in priority order.
	pub order: Vec<RequestOrder>,
	/// Per-column state.
	pub columns: Vec<RequestColumn>,
}

impl Default for DrawRequest {
	fn default() -> Self {
		Self {
			draw: 0,
			start: 0,
			length: crate::length_menu::SHOW_ALL,
			search: Search::default(),
			order: Vec::new(),
			columns: Vec::new(),
		}
	}
}

impl DrawRequest {
	/// Returns whether a global or column-specific search is active.
	pub fn is_search_active(&self) -> bool {
		self.search.has_terms() || self.has_column_search()
	}

	/// Returns whether any searchable column has its own search text.
	pub fn has_column_search(&self) -> bool {
		self.columns
			.iter()
			.any(|column| column.searchable && column.search.has_terms())
	}

	/// Returns whether all rows are requested.
	pub fn shows_all(&self) -> bool {
		self.length < 0
	}
}

/// Response to a [`DrawRequest`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DrawResponse {
	/// Echoed draw token.
	pub draw: u64,
	/// Number of rows before filtering.
	pub records_total: usize,
	/// Number of rows after filtering.
	pub records_filtered: usize,
	/// Row objects with `DT_RowId`, `DT_RowClass` and `"0".."n"` cells.
	pub data: Vec<Map<String, Value>>,
	/// Error message shown by the runtime.
	#[serde(skip_serializing_if = "Option::is_none", default)]
	pub error: Option<String>,
}
