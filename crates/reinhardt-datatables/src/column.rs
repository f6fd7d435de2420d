//! Per-column grid configuration.
//!
//! A [`ColumnDef`] targets one or more 0-based column indices. The
//! [`ColumnDefs`] collection checks target uniqueness on insertion: a
//! collision is reported as a [`Diagnostic`] but the definition is still
//! added.

use crate::diagnostics::Diagnostic;
use crate::error::{DataTablesError, Result};
use crate::js::{JsCode, JsObject, JsValue};
use crate::order::OrderDirection;
use crate::table::TableColumn;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

/// Semantic data type of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataType {
	/// Free text.
	Text,
	/// Integer numbers.
	Int,
	/// Floating point numbers.
	Double,
	/// Calendar dates.
	Date,
	/// Times of day.
	Time,
	/// Date and time.
	DateTime,
}

impl DataType {
	/// Returns whether values of this type need date-aware sorting.
	pub fn is_date_time(self) -> bool {
		matches!(self, Self::Date | Self::Time | Self::DateTime)
	}

	/// Returns whether values of this type compare numerically.
	pub fn is_numeric(self) -> bool {
		matches!(self, Self::Int | Self::Double)
	}

	/// The runtime `type` name. Date kinds are detected by the date sorting
	/// plugin instead.
	pub fn runtime_type(self) -> Option<&'static str> {
		match self {
			Self::Int | Self::Double => Some("num"),
			Self::Text => Some("string"),
			Self::Date | Self::Time | Self::DateTime => None,
		}
	}
}

/// Element created for cells of a column.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CellType {
	/// Data cell.
	#[default]
	Td,
	/// Header cell.
	Th,
}

impl CellType {
	fn as_str(self) -> &'static str {
		match self {
			Self::Td => "td",
			Self::Th => "th",
		}
	}
}

/// Data source of a column.
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnData {
	/// Array index into the row data.
	Index(usize),
	/// Property name in the row object.
	Property(String),
	/// No data; use `defaultContent` or `render`.
	Null,
}

impl ColumnData {
	fn to_json(&self) -> Value {
		match self {
			Self::Index(index) => json!(index),
			Self::Property(name) => json!(name),
			Self::Null => Value::Null,
		}
	}
}

/// Configuration of one or more columns.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnDef {
	targets: Vec<usize>,
	cell_type: CellType,
	classes: Vec<String>,
	content_padding: Option<String>,
	created_cell: Option<JsCode>,
	data: Option<ColumnData>,
	default_content: Option<String>,
	name: Option<String>,
	orderable: bool,
	order_data: Vec<usize>,
	order_data_type: Option<String>,
	order_sequence: Vec<OrderDirection>,
	render: Option<JsCode>,
	searchable: bool,
	title: Option<String>,
	data_type: Option<DataType>,
	visible: bool,
	width: Option<String>,
}

impl ColumnDef {
	/// Creates a definition for a single column.
	pub fn new(target: usize) -> Self {
		Self {
			targets: vec![target],
			cell_type: CellType::Td,
			classes: Vec::new(),
			content_padding: None,
			created_cell: None,
			data: None,
			default_content: None,
			name: None,
			orderable: true,
			order_data: Vec::new(),
			order_data_type: None,
			order_sequence: Vec::new(),
			render: None,
			searchable: true,
			title: None,
			data_type: None,
			visible: true,
			width: None,
		}
	}

	/// Creates a definition shared by several columns.
	pub fn with_targets(targets: impl IntoIterator<Item = usize>) -> Result<Self> {
		let targets: Vec<usize> = targets.into_iter().collect();
		let Some(&first) = targets.first() else {
			return Err(DataTablesError::EmptyTargets);
		};
		let mut def = Self::new(first);
		def.targets = targets;
		Ok(def)
	}

	/// Creates a definition from a structural column at `index`.
	///
	/// Invisible columns always get width `0`; visible columns keep their
	/// width unless it is the star width.
	pub fn from_table_column(index: usize, column: &TableColumn) -> Self {
		let mut def = Self::new(index);
		def.classes = column.classes.clone();
		def.name = column.name.clone();
		def.orderable = column.orderable;
		def.searchable = column.searchable;
		def.visible = column.visible;
		def.data_type = column.data_type;
		def.width = if !column.visible {
			Some("0".to_string())
		} else {
			column.width.clone()
		};
		def
	}

	/// Column indices this definition applies to.
	pub fn targets(&self) -> &[usize] {
		&self.targets
	}

	/// Returns whether the definition applies to `target`.
	pub fn has_target(&self, target: usize) -> bool {
		self.targets.contains(&target)
	}

	/// Sets the cell element type.
	pub fn cell_type(mut self, cell_type: CellType) -> Self {
		self.cell_type = cell_type;
		self
	}

	/// Adds a CSS class to every cell.
	pub fn class(mut self, class: impl Into<String>) -> Self {
		let class = class.into();
		if !self.classes.contains(&class) {
			self.classes.push(class);
		}
		self
	}

	/// Padding used when measuring the optimal width.
	pub fn content_padding(mut self, padding: impl Into<String>) -> Self {
		self.content_padding = Some(padding.into());
		self
	}

	/// Cell created callback.
	pub fn created_cell(mut self, code: impl Into<JsCode>) -> Self {
		self.created_cell = Some(code.into());
		self
	}

	/// Data source.
	pub fn data(mut self, data: ColumnData) -> Self {
		self.data = Some(data);
		self
	}

	/// Static content for empty cells.
	pub fn default_content(mut self, content: impl Into<String>) -> Self {
		self.default_content = Some(content.into());
		self
	}

	/// Descriptive name.
	pub fn name(mut self, name: impl Into<String>) -> Self {
		self.name = Some(name.into());
		self
	}

	/// Enables or disables ordering.
	pub fn orderable(mut self, orderable: bool) -> Self {
		self.orderable = orderable;
		self
	}

	/// Columns used when ordering by this column.
	pub fn order_data(mut self, columns: impl IntoIterator<Item = usize>) -> Self {
		self.order_data = columns.into_iter().collect();
		self
	}

	/// Live DOM ordering type.
	pub fn order_data_type(mut self, data_type: impl Into<String>) -> Self {
		self.order_data_type = Some(data_type.into());
		self
	}

	/// Direction sequence applied on repeated clicks.
	pub fn order_sequence(mut self, sequence: impl IntoIterator<Item = OrderDirection>) -> Self {
		self.order_sequence = sequence.into_iter().collect();
		self
	}

	/// Render function.
	pub fn render(mut self, code: impl Into<JsCode>) -> Self {
		self.render = Some(code.into());
		self
	}

	/// Enables or disables searching.
	pub fn searchable(mut self, searchable: bool) -> Self {
		self.searchable = searchable;
		self
	}

	/// Column title.
	pub fn title(mut self, title: impl Into<String>) -> Self {
		self.title = Some(title.into());
		self
	}

	/// Semantic data type.
	pub fn data_type(mut self, data_type: DataType) -> Self {
		self.data_type = Some(data_type);
		self
	}

	/// Shows or hides the column.
	pub fn visible(mut self, visible: bool) -> Self {
		self.visible = visible;
		self
	}

	/// Column width as a CSS length.
	pub fn width(mut self, width: impl Into<String>) -> Self {
		self.width = Some(width.into());
		self
	}

	/// Returns whether ordering is enabled.
	pub fn is_orderable(&self) -> bool {
		self.orderable
	}

	/// Returns whether searching is enabled.
	pub fn is_searchable(&self) -> bool {
		self.searchable
	}

	/// Returns whether the column is shown.
	pub fn is_visible(&self) -> bool {
		self.visible
	}

	/// Semantic data type, if set.
	pub fn get_data_type(&self) -> Option<DataType> {
		self.data_type
	}

	/// Name, if set.
	pub fn get_name(&self) -> Option<&str> {
		self.name.as_deref()
	}

	pub(crate) fn set_orderable(&mut self, orderable: bool) {
		self.orderable = orderable;
	}

	pub(crate) fn set_searchable(&mut self, searchable: bool) {
		self.searchable = searchable;
	}

	/// Payload form; attributes equal to the runtime defaults are omitted.
	pub fn to_js(&self) -> JsValue {
		let mut object = JsObject::new();
		object.insert("targets", JsValue::Json(json!(self.targets)));
		if self.cell_type != CellType::Td {
			object.insert("cellType", self.cell_type.as_str());
		}
		if !self.classes.is_empty() {
			object.insert("className", self.classes.join(" "));
		}
		if let Some(padding) = self.content_padding.as_deref().filter(|p| !p.is_empty()) {
			object.insert("contentPadding", padding);
		}
		if let Some(code) = &self.created_cell {
			object.insert("createdCell", code.clone());
		}
		if let Some(data) = &self.data {
			object.insert("data", data.to_json());
		}
		if let Some(content) = &self.default_content {
			object.insert("defaultContent", content.as_str());
		}
		if let Some(name) = self.name.as_deref().filter(|n| !n.is_empty()) {
			object.insert("name", name);
		}
		if !self.orderable {
			object.insert("orderable", false);
		}
		if !self.order_data.is_empty() {
			object.insert("orderData", JsValue::Json(json!(self.order_data)));
		}
		if let Some(data_type) = self.order_data_type.as_deref().filter(|t| !t.is_empty()) {
			object.insert("orderDataType", data_type);
		}
		if !self.order_sequence.is_empty() {
			let sequence: Vec<&str> = self.order_sequence.iter().map(|d| d.as_str()).collect();
			object.insert("orderSequence", JsValue::Json(json!(sequence)));
		}
		if let Some(code) = &self.render {
			object.insert("render", code.clone());
		}
		if !self.searchable {
			object.insert("searchable", false);
		}
		if let Some(title) = &self.title {
			object.insert("title", title.as_str());
		}
		if let Some(runtime_type) = self.data_type.and_then(DataType::runtime_type) {
			object.insert("type", runtime_type);
		}
		if !self.visible {
			object.insert("visible", false);
		}
		if let Some(width) = self.width.as_deref().filter(|w| !w.is_empty()) {
			object.insert("width", width);
		}
		JsValue::Object(object)
	}
}

/// Ordered collection of column definitions.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ColumnDefs {
	defs: Vec<ColumnDef>,
	diagnostics: Vec<Diagnostic>,
}

impl ColumnDefs {
	/// Creates an empty collection.
	pub fn new() -> Self {
		Self::default()
	}

	/// Appends a definition.
	///
	/// Every target already claimed by a previous definition is reported;
	/// the definition is added regardless.
	pub fn add(&mut self, def: ColumnDef) -> &mut Self {
		for &target in def.targets() {
			if self.defs.iter().any(|existing| existing.has_target(target)) {
				let diagnostic = Diagnostic::DuplicateColumnTarget { target };
				diagnostic.emit();
				self.diagnostics.push(diagnostic);
			}
		}
		self.defs.push(def);
		self
	}

	/// First definition applying to `target`.
	pub fn find_by_target(&self, target: usize) -> Option<&ColumnDef> {
		self.defs.iter().find(|def| def.has_target(target))
	}

	/// Mutable access to the first definition applying to `target`.
	pub fn find_by_target_mut(&mut self, target: usize) -> Option<&mut ColumnDef> {
		self.defs.iter_mut().find(|def| def.has_target(target))
	}

	/// Overrides ordering on every definition.
	pub fn set_all_orderable(&mut self, orderable: bool) -> &mut Self {
		self.defs.iter_mut().for_each(|def| def.set_orderable(orderable));
		self
	}

	/// Overrides searching on every definition.
	pub fn set_all_searchable(&mut self, searchable: bool) -> &mut Self {
		self.defs.iter_mut().for_each(|def| def.set_searchable(searchable));
		self
	}

	/// Returns whether any definition hides its columns.
	pub fn has_any_invisible_column(&self) -> bool {
		self.defs.iter().any(|def| !def.is_visible())
	}

	/// Number of visible definitions.
	pub fn visible_column_count(&self) -> usize {
		self.defs.iter().filter(|def| def.is_visible()).count()
	}

	/// Sorted, de-duplicated indices of hidden columns.
	pub fn invisible_targets(&self) -> Vec<usize> {
		let mut targets: Vec<usize> = self
			.defs
			.iter()
			.filter(|def| !def.is_visible())
			.flat_map(|def| def.targets().iter().copied())
			.collect();
		targets.sort_unstable();
		targets.dedup();
		targets
	}

	/// Returns whether any definition has a date-like data type.
	pub fn has_date_time_column(&self) -> bool {
		self.defs
			.iter()
			.any(|def| def.get_data_type().is_some_and(DataType::is_date_time))
	}

	/// Definitions in insertion order.
	pub fn iter(&self) -> impl Iterator<Item = &ColumnDef> {
		self.defs.iter()
	}

	/// Number of definitions.
	pub fn len(&self) -> usize {
		self.defs.len()
	}

	/// Returns whether no definition was added.
	pub fn is_empty(&self) -> bool {
		self.defs.is_empty()
	}

	/// Diagnostics raised by [`add`](Self::add).
	pub fn diagnostics(&self) -> &[Diagnostic] {
		&self.diagnostics
	}

	/// Payload form of all definitions.
	pub fn to_js(&self) -> JsValue {
		JsValue::Array(self.defs.iter().map(ColumnDef::to_js).collect())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn test_defaults_are_omitted() {
		assert_eq!(ColumnDef::new(2).to_js().to_json(), json!({"targets": [2]}));
	}

	#[rstest]
	fn test_all_attributes() {
		let def = ColumnDef::with_targets([0, 1])
			.unwrap()
			.cell_type(CellType::Th)
			.class("right")
			.class("bold")
			.name("amount")
			.orderable(false)
			.order_sequence([OrderDirection::Desc, OrderDirection::Asc])
			.searchable(false)
			.data(ColumnData::Null)
			.default_content("-")
			.data_type(DataType::Double)
			.visible(false)
			.width("10%");

		assert_eq!(
			def.to_js().to_json(),
			json!({
				"targets": [0, 1],
				"cellType": "th",
				"className": "right bold",
				"data": null,
				"defaultContent": "-",
				"name": "amount",
				"orderable": false,
				"orderSequence": ["desc", "asc"],
				"searchable": false,
				"type": "num",
				"visible": false,
				"width": "10%",
			})
		);
	}

	#[rstest]
	fn test_empty_targets_rejected() {
		assert!(matches!(
			ColumnDef::with_targets(Vec::new()),
			Err(DataTablesError::EmptyTargets)
		));
	}

	#[rstest]
	fn test_duplicate_target_is_kept_and_reported() {
		let mut defs = ColumnDefs::new();
		defs.add(ColumnDef::new(0))
			.add(ColumnDef::with_targets([1, 0]).unwrap());

		assert_eq!(defs.len(), 2);
		assert_eq!(
			defs.diagnostics(),
			&[Diagnostic::DuplicateColumnTarget { target: 0 }]
		);
		assert_eq!(defs.find_by_target(0).unwrap().targets(), &[0]);
	}

	#[rstest]
	fn test_broadcast_and_visibility() {
		let mut defs = ColumnDefs::new();
		defs.add(ColumnDef::new(0))
			.add(ColumnDef::new(1).visible(false))
			.add(ColumnDef::new(2).data_type(DataType::Date));
		defs.set_all_orderable(false).set_all_searchable(false);

		assert!(defs.iter().all(|def| !def.is_orderable() && !def.is_searchable()));
		assert!(defs.has_any_invisible_column());
		assert_eq!(defs.visible_column_count(), 2);
		assert_eq!(defs.invisible_targets(), vec![1]);
		assert!(defs.has_date_time_column());
	}

	#[rstest]
	fn test_from_hidden_table_column_gets_zero_width() {
		let column = TableColumn::new("Secret").width("40px").visible(false);

		let def = ColumnDef::from_table_column(3, &column);

		assert_eq!(def.to_js().to_json()["width"], "0");
	}
}
