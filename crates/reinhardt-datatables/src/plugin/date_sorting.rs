//! Semantic sorting of date and time columns.

use super::{Plugin, PluginContext};
use crate::assets::AssetRegistry;
use crate::js::quote;
use crate::settings::DataTablesSettings;

/// Teaches the runtime to sort date-like columns by their moment.js
/// patterns instead of lexically.
///
/// Attached automatically to client-side grids with a date, time or
/// date-time column. Server-side grids sort on the server, so the plugin
/// does not apply there.
#[derive(Debug, Clone, Copy, Default)]
pub struct DateSortingPlugin;

impl DateSortingPlugin {
	/// Registry name.
	pub const NAME: &'static str = "dateSorting";

	/// Creates the plugin.
	pub fn new() -> Self {
		Self
	}
}

impl Plugin for DateSortingPlugin {
	fn name(&self) -> &str {
		Self::NAME
	}

	fn is_applicable(&self, ctx: &PluginContext<'_>) -> bool {
		!ctx.server_side
	}

	fn post_init_code(&self, ctx: &PluginContext<'_>, handle: &str) -> Option<String> {
		let mut code = String::new();
		for pattern in ctx.settings.date_formats.patterns() {
			code.push_str(&format!("$.fn.dataTable.moment({});", quote(pattern)));
		}
		// type detection ran before the patterns were known
		code.push_str(&format!("{handle}.api().rows().invalidate().draw(false);"));
		Some(code)
	}

	fn register_assets(&self, assets: &AssetRegistry, settings: &DataTablesSettings) {
		assets.register_scripts(&settings.assets.date_sorting_scripts);
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::options::GridOptions;
	use rstest::rstest;

	#[rstest]
	#[case(false, true)]
	#[case(true, false)]
	fn test_applicable_client_side_only(#[case] server_side: bool, #[case] expected: bool) {
		let options = GridOptions::default();
		let settings = DataTablesSettings::default();
		let ctx = PluginContext {
			table_id: "t",
			options: &options,
			server_side,
			settings: &settings,
		};

		assert_eq!(DateSortingPlugin.is_applicable(&ctx), expected);
	}

	#[rstest]
	fn test_post_init_registers_every_pattern() {
		let options = GridOptions::default();
		let settings = DataTablesSettings::default();
		let ctx = PluginContext {
			table_id: "t",
			options: &options,
			server_side: false,
			settings: &settings,
		};

		let code = DateSortingPlugin.post_init_code(&ctx, "dt1").unwrap();

		assert_eq!(
			code,
			"$.fn.dataTable.moment(\"YYYY-MM-DD\");\
			 $.fn.dataTable.moment(\"HH:mm:ss\");\
			 $.fn.dataTable.moment(\"YYYY-MM-DD HH:mm:ss\");\
			 dt1.api().rows().invalidate().draw(false);"
		);
	}

	#[rstest]
	fn test_assets_are_registered_once() {
		let assets = AssetRegistry::new();
		let settings = DataTablesSettings::default();

		DateSortingPlugin.register_assets(&assets, &settings);
		DateSortingPlugin.register_assets(&assets, &settings);

		assert_eq!(assets.scripts(), settings.assets.date_sorting_scripts);
	}
}
