//! Process-wide grid defaults.
//!
//! Settings are plain serde values so they can live in a project's TOML
//! configuration:
//!
//! ```toml
//! generate_on_document_ready = false
//! object_param = "table"
//!
//! [assets]
//! scripts = ["/static/js/jquery.dataTables.min.js"]
//!
//! [date_formats]
//! date = "DD.MM.YYYY"
//! ```

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Grid defaults shared by every compilation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataTablesSettings {
	/// Wrap generated scripts into a document-ready handler.
	pub generate_on_document_ready: bool,
	/// Request parameter naming the table in server-side requests.
	pub object_param: String,
	/// Client assets.
	pub assets: AssetSettings,
	/// moment.js patterns used for date and time columns.
	pub date_formats: DateFormats,
}

impl Default for DataTablesSettings {
	fn default() -> Self {
		Self {
			generate_on_document_ready: true,
			object_param: "object".to_string(),
			assets: AssetSettings::default(),
			date_formats: DateFormats::default(),
		}
	}
}

impl DataTablesSettings {
	/// Parses settings from TOML; missing keys keep their defaults.
	pub fn from_toml_str(source: &str) -> Result<Self> {
		Ok(toml::from_str(source)?)
	}

	/// Reads settings from a TOML file.
	pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
		let path = path.as_ref();
		let content = std::fs::read_to_string(path)?;
		tracing::debug!(path = %path.display(), "loading DataTables settings");
		Self::from_toml_str(&content)
	}
}

/// Client asset paths of the core runtime and shipped plugins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetSettings {
	/// Core runtime scripts, in load order.
	pub scripts: Vec<String>,
	/// Core runtime styles.
	pub styles: Vec<String>,
	/// Scripts needed for date sorting.
	pub date_sorting_scripts: Vec<String>,
	/// Scripts of the buttons extension.
	pub buttons_scripts: Vec<String>,
	/// Styles of the buttons extension.
	pub buttons_styles: Vec<String>,
	/// Scripts of the scroller extension.
	pub scroller_scripts: Vec<String>,
	/// Styles of the scroller extension.
	pub scroller_styles: Vec<String>,
}

impl Default for AssetSettings {
	fn default() -> Self {
		Self {
			scripts: vec!["datatables/js/jquery.dataTables.min.js".to_string()],
			styles: vec!["datatables/css/jquery.dataTables.min.css".to_string()],
			date_sorting_scripts: vec![
				"datatables/js/moment.min.js".to_string(),
				"datatables/js/datetime-moment.js".to_string(),
			],
			buttons_scripts: vec!["datatables/js/dataTables.buttons.min.js".to_string()],
			buttons_styles: vec!["datatables/css/buttons.dataTables.min.css".to_string()],
			scroller_scripts: vec!["datatables/js/dataTables.scroller.min.js".to_string()],
			scroller_styles: vec!["datatables/css/scroller.dataTables.min.css".to_string()],
		}
	}
}

/// moment.js parse patterns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DateFormats {
	/// Pattern of date columns.
	pub date: String,
	/// Pattern of time columns.
	pub time: String,
	/// Pattern of date-time columns.
	pub datetime: String,
}

impl Default for DateFormats {
	fn default() -> Self {
		Self {
			date: "YYYY-MM-DD".to_string(),
			time: "HH:mm:ss".to_string(),
			datetime: "YYYY-MM-DD HH:mm:ss".to_string(),
		}
	}
}

impl DateFormats {
	/// All patterns in registration order.
	pub fn patterns(&self) -> [&str; 3] {
		[self.date.as_str(), self.time.as_str(), self.datetime.as_str()]
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn test_defaults() {
		let settings = DataTablesSettings::default();

		assert!(settings.generate_on_document_ready);
		assert_eq!(settings.object_param, "object");
		assert_eq!(settings.date_formats.patterns(), ["YYYY-MM-DD", "HH:mm:ss", "YYYY-MM-DD HH:mm:ss"]);
	}

	#[rstest]
	fn test_partial_toml_keeps_defaults() {
		let settings = DataTablesSettings::from_toml_str(
			r#"
			object_param = "table"

			[date_formats]
			date = "DD.MM.YYYY"
			"#,
		)
		.unwrap();

		assert!(settings.generate_on_document_ready);
		assert_eq!(settings.object_param, "table");
		assert_eq!(settings.date_formats.date, "DD.MM.YYYY");
		assert_eq!(settings.date_formats.time, "HH:mm:ss");
		assert_eq!(settings.assets, AssetSettings::default());
	}

	#[rstest]
	fn test_invalid_toml_is_error() {
		let result = DataTablesSettings::from_toml_str("object_param = [");

		assert!(matches!(result, Err(crate::DataTablesError::Settings(_))));
	}

	#[rstest]
	fn test_missing_file_is_io_error() {
		let result = DataTablesSettings::from_file("/nonexistent/datatables.toml");

		assert!(matches!(result, Err(crate::DataTablesError::Io(_))));
	}
}
