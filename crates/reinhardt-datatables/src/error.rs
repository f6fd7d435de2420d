//! Error types for grid compilation.
//!
//! Only configuration problems are errors. Consistency problems that still
//! allow a usable grid are reported as [`Diagnostic`](crate::diagnostics::Diagnostic)s.

use thiserror::Error;

/// Result type for grid operations.
pub type Result<T> = std::result::Result<T, DataTablesError>;

/// Configuration errors that abort compilation.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum DataTablesError {
	/// A plugin with the same name is already registered.
	#[error("a plugin with the name '{0}' is already contained")]
	DuplicatePlugin(String),

	/// The structural table has no identifier.
	#[error("table must have an ID to work with DataTables")]
	MissingTableId,

	/// A column definition targets an index outside the table.
	#[error("column definition targets illegal column index {target} in table '{table_id}' ({column_count} columns present)")]
	InvalidColumnTarget {
		/// Offending target index.
		target: usize,
		/// Number of columns in the table.
		column_count: usize,
		/// Table identifier.
		table_id: String,
	},

	/// A column definition was created without any target.
	#[error("a column definition needs at least one target")]
	EmptyTargets,

	/// The instantiation handle is not a valid JS identifier.
	#[error("JS variable name is not an identifier: {0}")]
	InvalidHandle(String),

	/// A text loading URL was configured without a locale parameter name.
	#[error("if a text loading URL is present, a locale parameter name must also be present")]
	MissingLocaleParameter,

	/// A footer aggregation was requested without any column.
	#[error("footer aggregation needs at least one column")]
	EmptyFooterAggregation,

	/// A length menu was created without entries.
	#[error("length menu must contain at least one entry")]
	EmptyLengthMenu,

	/// A URL could not be parsed.
	#[error("invalid URL: {0}")]
	InvalidUrl(#[from] url::ParseError),

	/// Settings could not be parsed.
	#[error("settings error: {0}")]
	Settings(#[from] toml::de::Error),

	/// Settings file could not be read.
	#[error("IO error: {0}")]
	Io(#[from] std::io::Error),
}
