//! Virtual scrolling for long tables.

use super::{Plugin, PluginContext};
use crate::assets::AssetRegistry;
use crate::js::{JsObject, JsValue};
use crate::options::GridOptions;
use crate::settings::DataTablesSettings;

/// Renders only the rows visible in the scroll viewport.
///
/// Needs a vertical scroll height and paging; rendering is deferred while
/// the plugin is active.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScrollerPlugin {
	loading_indicator: bool,
}

impl ScrollerPlugin {
	/// Registry name.
	pub const NAME: &'static str = "scroller";

	/// Creates the plugin without loading indicator.
	pub fn new() -> Self {
		Self::default()
	}

	/// Shows a loading message while rows are fetched.
	pub fn loading_indicator(mut self, loading_indicator: bool) -> Self {
		self.loading_indicator = loading_indicator;
		self
	}
}

impl Plugin for ScrollerPlugin {
	fn name(&self) -> &str {
		Self::NAME
	}

	fn is_applicable(&self, ctx: &PluginContext<'_>) -> bool {
		let features = ctx.options.features();
		features.scroll_y.is_some() && features.paging
	}

	fn contribute(&self, options: &mut GridOptions) -> Option<JsValue> {
		options.features_mut().defer_render = true;
		Some(JsValue::Object(
			JsObject::new().with("loadingIndicator", self.loading_indicator),
		))
	}

	fn register_assets(&self, assets: &AssetRegistry, settings: &DataTablesSettings) {
		assets.register_scripts(&settings.assets.scroller_scripts);
		assets.register_styles(&settings.assets.scroller_styles);
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use serde_json::json;

	#[rstest]
	#[case(Some("200px"), true, true)]
	#[case(None, true, false)]
	#[case(Some("200px"), false, false)]
	fn test_needs_scroll_height_and_paging(
		#[case] scroll_y: Option<&str>,
		#[case] paging: bool,
		#[case] expected: bool,
	) {
		let mut options = GridOptions::new();
		options.features_mut().scroll_y = scroll_y.map(str::to_string);
		options.features_mut().paging = paging;
		let settings = DataTablesSettings::default();
		let ctx = PluginContext {
			table_id: "t",
			options: &options,
			server_side: false,
			settings: &settings,
		};

		assert_eq!(ScrollerPlugin::new().is_applicable(&ctx), expected);
	}

	#[rstest]
	fn test_contribute_defers_rendering() {
		let mut options = GridOptions::new();

		let block = ScrollerPlugin::new()
			.loading_indicator(true)
			.contribute(&mut options)
			.unwrap();

		assert!(options.features().defer_render);
		assert_eq!(block.to_json(), json!({"loadingIndicator": true}));
	}
}
