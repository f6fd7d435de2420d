//! In-memory server-side data source.

use super::request::{DrawRequest, DrawResponse, RequestOrder, Search};
use crate::column::{ColumnDefs, DataType};
use crate::error::{DataTablesError, Result};
use crate::order::OrderDirection;
use crate::paging::FilterSemantics;
use crate::table::GridTable;
use once_cell::sync::Lazy;
use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use regex::{Regex, RegexBuilder};
use serde_json::{Map, Value};
use std::cmp::Ordering;

static TAG_REGEX: Lazy<Regex> =
	Lazy::new(|| Regex::new(r"<[^>]*>").expect("TAG_REGEX: invalid regex pattern"));

/// Per-column data needed to answer requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServerColumn {
	/// Data type used for comparisons.
	pub data_type: Option<DataType>,
	/// Whether the column is searched when the request does not say.
	pub searchable: bool,
}

impl Default for ServerColumn {
	fn default() -> Self {
		Self {
			data_type: None,
			searchable: true,
		}
	}
}

#[derive(Debug, Clone)]
struct ServerCell {
	html: String,
	text: String,
}

impl ServerCell {
	fn new(html: &str) -> Self {
		Self {
			html: html.to_string(),
			text: TAG_REGEX.replace_all(html, "").trim().to_string(),
		}
	}
}

#[derive(Debug, Clone)]
struct ServerRow {
	id: Option<String>,
	class: Option<String>,
	cells: Vec<ServerCell>,
}

impl ServerRow {
	fn to_json(&self) -> Map<String, Value> {
		let mut object = Map::new();
		if let Some(id) = &self.id {
			object.insert("DT_RowId".to_string(), Value::String(id.clone()));
		}
		if let Some(class) = &self.class {
			object.insert("DT_RowClass".to_string(), Value::String(class.clone()));
		}
		for (index, cell) in self.cells.iter().enumerate() {
			object.insert(index.to_string(), Value::String(cell.html.clone()));
		}
		object
	}
}

#[derive(Debug)]
struct SortedRows {
	order: Vec<RequestOrder>,
	rows: Vec<ServerRow>,
}

/// Snapshot of a table's rows and column configuration.
///
/// Rows are kept sorted by the last requested order, so requests that only
/// change the search or the page do not sort again.
#[derive(Debug)]
pub struct ServerData {
	table_id: String,
	columns: Vec<ServerColumn>,
	filter: FilterSemantics,
	state: RwLock<SortedRows>,
}

impl ServerData {
	/// Snapshots the rows of `table`.
	///
	/// Every column definition must target an existing column.
	pub fn new<T: GridTable + ?Sized>(
		table: &T,
		defs: &ColumnDefs,
		filter: FilterSemantics,
	) -> Result<Self> {
		let column_count = table.column_count();
		let mut columns: Vec<ServerColumn> = table
			.columns()
			.iter()
			.map(|column| ServerColumn {
				data_type: column.data_type,
				searchable: column.searchable,
			})
			.collect();
		for def in defs.iter() {
			for &target in def.targets() {
				let column = columns
					.get_mut(target)
					.ok_or_else(|| DataTablesError::InvalidColumnTarget {
						target,
						column_count,
						table_id: table.id().to_string(),
					})?;
				column.searchable = def.is_searchable();
				if let Some(data_type) = def.get_data_type() {
					column.data_type = Some(data_type);
				}
			}
		}

		let rows: Vec<ServerRow> = table
			.body_rows()
			.iter()
			.map(|row| ServerRow {
				id: row.id.clone(),
				class: row.class.clone(),
				cells: row.cells.iter().map(|cell| ServerCell::new(cell)).collect(),
			})
			.collect();
		tracing::debug!(
			table_id = %table.id(),
			rows = rows.len(),
			cells = rows.iter().map(|row| row.cells.len()).sum::<usize>(),
			"server-side data snapshot taken"
		);

		Ok(Self {
			table_id: table.id().to_string(),
			columns,
			filter,
			state: RwLock::new(SortedRows {
				order: Vec::new(),
				rows,
			}),
		})
	}

	/// Id of the table the snapshot was taken from.
	pub fn table_id(&self) -> &str {
		&self.table_id
	}

	/// Number of columns.
	pub fn column_count(&self) -> usize {
		self.columns.len()
	}

	/// Number of rows.
	pub fn row_count(&self) -> usize {
		self.state.read().rows.len()
	}

	/// Filter semantics.
	pub fn filter(&self) -> FilterSemantics {
		self.filter
	}

	/// Answers a draw request: sort, then filter, then page.
	pub fn answer(&self, request: &DrawRequest) -> DrawResponse {
		let state = self.sorted(&request.order);
		let total = state.rows.len();
		let filtered: Vec<&ServerRow> = if request.is_search_active() {
			self.filter_rows(&state.rows, request)
		} else {
			state.rows.iter().collect()
		};
		tracing::debug!(
			table_id = %self.table_id,
			filtered = filtered.len(),
			total,
			"server-side rows filtered"
		);

		let length = if request.shows_all() {
			usize::MAX
		} else {
			usize::try_from(request.length).unwrap_or(0).min(total)
		};
		let data = filtered
			.iter()
			.skip(request.start)
			.take(length)
			.map(|row| row.to_json())
			.collect();

		DrawResponse {
			draw: request.draw,
			records_total: total,
			records_filtered: filtered.len(),
			data,
			error: None,
		}
	}

	/// Returns the rows in the requested order, held until the caller is done.
	fn sorted(&self, order: &[RequestOrder]) -> RwLockReadGuard<'_, SortedRows> {
		let order: Vec<RequestOrder> = order
			.iter()
			.filter(|o| {
				let valid = o.column < self.columns.len();
				if !valid {
					tracing::warn!(table_id = %self.table_id, column = o.column, "ignoring order on unknown column");
				}
				valid
			})
			.copied()
			.collect();
		let state = self.state.read();
		if state.order == order {
			return state;
		}
		drop(state);

		let mut state = self.state.write();
		if state.order != order {
			if state.rows.len() > 1 {
				state
					.rows
					.sort_by(|a, b| self.compare_rows(a, b, &order));
			}
			state.order = order;
		}
		RwLockWriteGuard::downgrade(state)
	}

	fn compare_rows(&self, a: &ServerRow, b: &ServerRow, order: &[RequestOrder]) -> Ordering {
		for spec in order {
			let data_type = self.columns[spec.column].data_type;
			let left = a.cells.get(spec.column).map_or("", |c| c.text.as_str());
			let right = b.cells.get(spec.column).map_or("", |c| c.text.as_str());
			let ordering = compare_cells(left, right, data_type);
			let ordering = match spec.dir {
				OrderDirection::Asc => ordering,
				OrderDirection::Desc => ordering.reverse(),
			};
			if ordering != Ordering::Equal {
				return ordering;
			}
		}
		Ordering::Equal
	}

	fn filter_rows<'a>(&self, rows: &'a [ServerRow], request: &DrawRequest) -> Vec<&'a ServerRow> {
		let global = Matcher::new(&request.search);
		if request.has_column_search() {
			if self.filter == FilterSemantics::AllTermsPerRow {
				tracing::error!(
					table_id = %self.table_id,
					"column specific search is not supported with all-terms filtering"
				);
			}
			let matchers: Vec<Option<Matcher>> = request
				.columns
				.iter()
				.map(|column| {
					column
						.search
						.has_terms()
						.then(|| Matcher::new(&column.search))
				})
				.collect();
			rows.iter()
				.filter(|row| {
					row.cells.iter().enumerate().any(|(index, cell)| {
						let Some(column) = request.columns.get(index) else {
							return false;
						};
						if !column.searchable {
							return false;
						}
						let matcher = matchers[index].as_ref().unwrap_or(&global);
						matcher.matched_terms(&cell.text).iter().any(|&m| m)
					})
				})
				.collect()
		} else {
			let term_count = global.len();
			rows.iter()
				.filter(|row| {
					let mut matched = vec![false; term_count];
					for (index, cell) in row.cells.iter().enumerate() {
						if !self.is_searchable(request, index) {
							continue;
						}
						let cell_matches = global.matched_terms(&cell.text);
						match self.filter {
							FilterSemantics::AnyTermPerRow => {
								if cell_matches.iter().any(|&m| m) {
									return true;
								}
							}
							FilterSemantics::AllTermsPerRow => {
								for (slot, hit) in matched.iter_mut().zip(cell_matches) {
									*slot |= hit;
								}
								if matched.iter().all(|&m| m) {
									return true;
								}
							}
						}
					}
					false
				})
				.collect()
		}
	}

	fn is_searchable(&self, request: &DrawRequest, index: usize) -> bool {
		match request.columns.get(index) {
			Some(column) => column.searchable,
			None => self.columns.get(index).is_some_and(|c| c.searchable),
		}
	}
}

fn compare_cells(left: &str, right: &str, data_type: Option<DataType>) -> Ordering {
	if data_type.is_some_and(DataType::is_numeric) {
		let left = parse_number(left);
		let right = parse_number(right);
		return match (left, right) {
			(Some(l), Some(r)) => l.partial_cmp(&r).unwrap_or(Ordering::Equal),
			(None, Some(_)) => Ordering::Less,
			(Some(_), None) => Ordering::Greater,
			(None, None) => Ordering::Equal,
		};
	}
	left.to_lowercase().cmp(&right.to_lowercase())
}

fn parse_number(text: &str) -> Option<f64> {
	let cleaned: String = text.chars().filter(|c| *c != ',' && !c.is_whitespace()).collect();
	cleaned.parse().ok()
}

/// Matches the terms of one search against cell texts.
struct Matcher {
	plain: Vec<String>,
	patterns: Vec<Option<Regex>>,
	regex: bool,
}

impl Matcher {
	fn new(search: &Search) -> Self {
		let terms = search.terms();
		if search.regex {
			let patterns = terms
				.iter()
				.map(|term| match RegexBuilder::new(term).case_insensitive(true).build() {
					Ok(regex) => Some(regex),
					Err(e) => {
						tracing::warn!(pattern = %term, error = %e, "invalid search pattern matches nothing");
						None
					}
				})
				.collect();
			Self {
				plain: Vec::new(),
				patterns,
				regex: true,
			}
		} else {
			Self {
				plain: terms.iter().map(|term| term.to_lowercase()).collect(),
				patterns: Vec::new(),
				regex: false,
			}
		}
	}

	fn len(&self) -> usize {
		if self.regex {
			self.patterns.len()
		} else {
			self.plain.len()
		}
	}

	fn matched_terms(&self, text: &str) -> Vec<bool> {
		if self.regex {
			self.patterns
				.iter()
				.map(|pattern| pattern.as_ref().is_some_and(|p| p.is_match(text)))
				.collect()
		} else {
			let text = text.to_lowercase();
			self.plain.iter().map(|term| text.contains(term.as_str())).collect()
		}
	}
}
