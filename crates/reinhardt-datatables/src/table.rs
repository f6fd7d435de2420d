//! Structural table collaborator.
//!
//! The compiler does not render markup. It reads the structure of a table
//! through [`GridTable`] and asks it to drop pre-rendered rows and hidden
//! columns. [`HtmlTable`] is the in-memory implementation used by
//! Reinhardt views.

use crate::column::DataType;
use crate::order::OrderDirection;

/// Structural view of a table the grid is applied to.
pub trait GridTable {
	/// Unique element id; empty when missing.
	fn id(&self) -> &str;

	/// Column descriptions in display order.
	fn columns(&self) -> &[TableColumn];

	/// Number of columns.
	fn column_count(&self) -> usize {
		self.columns().len()
	}

	/// Returns whether a header row exists.
	fn has_header_row(&self) -> bool;

	/// Creates a header row from the column headers.
	///
	/// Returns whether a header row exists afterwards.
	fn ensure_header_row(&mut self) -> bool;

	/// Pre-rendered body rows.
	fn body_rows(&self) -> &[TableRow];

	/// Drops every pre-rendered body row.
	fn remove_all_body_rows(&mut self);

	/// Drops the column descriptions at the given sorted indices.
	fn remove_columns(&mut self, indices: &[usize]);
}

/// Description of a single column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableColumn {
	/// Header text; `None` for a column without header.
	pub header: Option<String>,
	/// CSS width; `None` is the star width.
	pub width: Option<String>,
	/// Semantic data type.
	pub data_type: Option<DataType>,
	/// Initial sort hint.
	pub initial_sort: Option<OrderDirection>,
	/// Whether the column may be ordered.
	pub orderable: bool,
	/// Whether the column is searched.
	pub searchable: bool,
	/// Whether the column is shown.
	pub visible: bool,
	/// Column name sent with server-side requests.
	pub name: Option<String>,
	/// CSS classes of every cell.
	pub classes: Vec<String>,
}

impl Default for TableColumn {
	fn default() -> Self {
		Self {
			header: None,
			width: None,
			data_type: None,
			initial_sort: None,
			orderable: true,
			searchable: true,
			visible: true,
			name: None,
			classes: Vec::new(),
		}
	}
}

impl TableColumn {
	/// Creates a column with header text.
	pub fn new(header: impl Into<String>) -> Self {
		Self {
			header: Some(header.into()),
			..Self::default()
		}
	}

	/// Sets the CSS width.
	pub fn width(mut self, width: impl Into<String>) -> Self {
		self.width = Some(width.into());
		self
	}

	/// Sets the data type.
	///
	/// Numeric and date-like columns are right aligned.
	pub fn data_type(mut self, data_type: DataType) -> Self {
		self.data_type = Some(data_type);
		if data_type != DataType::Text {
			self = self.class("right");
		}
		self
	}

	/// Sorts the grid by this column initially.
	pub fn initial_sort(mut self, direction: OrderDirection) -> Self {
		self.initial_sort = Some(direction);
		self
	}

	/// Enables or disables ordering.
	pub fn orderable(mut self, orderable: bool) -> Self {
		self.orderable = orderable;
		self
	}

	/// Enables or disables searching.
	pub fn searchable(mut self, searchable: bool) -> Self {
		self.searchable = searchable;
		self
	}

	/// Shows or hides the column.
	pub fn visible(mut self, visible: bool) -> Self {
		self.visible = visible;
		self
	}

	/// Sets the column name.
	pub fn name(mut self, name: impl Into<String>) -> Self {
		self.name = Some(name.into());
		self
	}

	/// Adds a CSS class.
	pub fn class(mut self, class: impl Into<String>) -> Self {
		let class = class.into();
		if !self.classes.contains(&class) {
			self.classes.push(class);
		}
		self
	}
}

/// A pre-rendered body row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableRow {
	/// Element id, sent as `DT_RowId`.
	pub id: Option<String>,
	/// CSS class, sent as `DT_RowClass`.
	pub class: Option<String>,
	/// Cell HTML in column order.
	pub cells: Vec<String>,
}

impl TableRow {
	/// Creates a row from cell HTML.
	pub fn new<I, S>(cells: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		Self {
			id: None,
			class: None,
			cells: cells.into_iter().map(Into::into).collect(),
		}
	}

	/// Sets the row id.
	pub fn id(mut self, id: impl Into<String>) -> Self {
		self.id = Some(id.into());
		self
	}

	/// Sets the row class.
	pub fn class(mut self, class: impl Into<String>) -> Self {
		self.class = Some(class.into());
		self
	}
}

/// In-memory table structure.
///
/// # Example
///
/// ```
/// use reinhardt_datatables::table::{GridTable, HtmlTable, TableColumn, TableRow};
///
/// let table = HtmlTable::new("users")
/// 	.column(TableColumn::new("Name"))
/// 	.column(TableColumn::new("Email"))
/// 	.row(TableRow::new(["Alice", "alice@example.com"]));
///
/// assert_eq!(table.column_count(), 2);
/// assert_eq!(table.body_rows().len(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HtmlTable {
	id: String,
	columns: Vec<TableColumn>,
	header_row: Option<Vec<String>>,
	rows: Vec<TableRow>,
}

impl HtmlTable {
	/// Creates an empty table with the given element id.
	pub fn new(id: impl Into<String>) -> Self {
		Self {
			id: id.into(),
			..Self::default()
		}
	}

	/// Builds a table from records, rendering one cell per column with
	/// `render`.
	pub fn from_records<R, F>(
		id: impl Into<String>,
		columns: Vec<TableColumn>,
		records: &[R],
		render: F,
	) -> Self
	where
		F: Fn(&R) -> Vec<String>,
	{
		let mut table = Self::new(id);
		table.columns = columns;
		table.rows = records.iter().map(|record| TableRow::new(render(record))).collect();
		table
	}

	/// Appends a column.
	pub fn column(mut self, column: TableColumn) -> Self {
		self.columns.push(column);
		self
	}

	/// Sets an explicit header row.
	pub fn header_row<I, S>(mut self, cells: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.header_row = Some(cells.into_iter().map(Into::into).collect());
		self
	}

	/// Appends a body row.
	pub fn row(mut self, row: TableRow) -> Self {
		self.rows.push(row);
		self
	}

	/// Header cells, if a header row exists.
	pub fn header_cells(&self) -> Option<&[String]> {
		self.header_row.as_deref()
	}
}

impl GridTable for HtmlTable {
	fn id(&self) -> &str {
		&self.id
	}

	fn columns(&self) -> &[TableColumn] {
		&self.columns
	}

	fn has_header_row(&self) -> bool {
		self.header_row.is_some()
	}

	fn ensure_header_row(&mut self) -> bool {
		if self.header_row.is_none() && self.columns.iter().any(|c| c.header.is_some()) {
			self.header_row = Some(
				self.columns
					.iter()
					.map(|c| c.header.clone().unwrap_or_default())
					.collect(),
			);
		}
		self.header_row.is_some()
	}

	fn body_rows(&self) -> &[TableRow] {
		&self.rows
	}

	fn remove_all_body_rows(&mut self) {
		self.rows.clear();
	}

	fn remove_columns(&mut self, indices: &[usize]) {
		let mut index = 0;
		self.columns.retain(|_| {
			let keep = !indices.contains(&index);
			index += 1;
			keep
		});
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn test_header_row_from_columns() {
		let mut table = HtmlTable::new("t")
			.column(TableColumn::new("A"))
			.column(TableColumn::default());

		assert!(!table.has_header_row());
		assert!(table.ensure_header_row());
		assert_eq!(table.header_cells().unwrap(), &["A".to_string(), String::new()]);
	}

	#[rstest]
	fn test_no_headers_no_header_row() {
		let mut table = HtmlTable::new("t").column(TableColumn::default());

		assert!(!table.ensure_header_row());
	}

	#[rstest]
	fn test_remove_columns_keeps_order() {
		let mut table = HtmlTable::new("t")
			.column(TableColumn::new("A"))
			.column(TableColumn::new("B"))
			.column(TableColumn::new("C"));

		table.remove_columns(&[1]);

		let headers: Vec<_> = table.columns().iter().map(|c| c.header.clone().unwrap()).collect();
		assert_eq!(headers, vec!["A", "C"]);
	}

	#[rstest]
	fn test_from_records() {
		let records = vec![(1, "Alice"), (2, "Bob")];

		let table = HtmlTable::from_records(
			"users",
			vec![TableColumn::new("ID").data_type(DataType::Int), TableColumn::new("Name")],
			&records,
			|(id, name)| vec![id.to_string(), name.to_string()],
		);

		assert_eq!(table.body_rows()[1].cells, vec!["2", "Bob"]);
		assert_eq!(table.columns()[0].classes, vec!["right"]);
	}
}
