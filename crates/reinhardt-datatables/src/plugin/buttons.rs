//! Export and action buttons.

use super::Plugin;
use crate::assets::AssetRegistry;
use crate::js::{JsObject, JsValue};
use crate::options::GridOptions;
use crate::settings::DataTablesSettings;

/// Layout code of the buttons region.
pub const BUTTONS_REGION: &str = "B";

/// Adds a button bar to the grid.
///
/// The `B` region is spliced into the layout at the configured position,
/// or in front of everything else when no position is set.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ButtonsPlugin {
	buttons: Vec<JsValue>,
	position: Option<usize>,
}

impl ButtonsPlugin {
	/// Registry name.
	pub const NAME: &'static str = "buttons";

	/// Creates a plugin without buttons.
	pub fn new() -> Self {
		Self::default()
	}

	/// Adds a built-in button such as `copy`, `csv` or `print`.
	pub fn button(mut self, name: impl Into<String>) -> Self {
		self.buttons.push(JsValue::from(name.into()));
		self
	}

	/// Adds a button described by its full configuration.
	pub fn custom_button(mut self, button: JsObject) -> Self {
		self.buttons.push(JsValue::Object(button));
		self
	}

	/// Inserts the region in front of the layout token at `index`.
	pub fn position(mut self, index: usize) -> Self {
		self.position = Some(index);
		self
	}
}

impl Plugin for ButtonsPlugin {
	fn name(&self) -> &str {
		Self::NAME
	}

	fn contribute(&self, options: &mut GridOptions) -> Option<JsValue> {
		let layout = options.layout_mut();
		let previous = layout.cursor();
		let index = self.position.unwrap_or(0).min(layout.len());
		layout.set_cursor(index).add_literal(BUTTONS_REGION);
		match previous {
			// tokens at or after the splice moved right by one
			Some(cursor) if cursor >= index => layout.set_cursor(cursor + 1),
			Some(cursor) => layout.set_cursor(cursor),
			None => layout.set_cursor_to_end(),
		};
		Some(JsValue::Array(self.buttons.clone()))
	}

	fn register_assets(&self, assets: &AssetRegistry, settings: &DataTablesSettings) {
		assets.register_scripts(&settings.assets.buttons_scripts);
		assets.register_styles(&settings.assets.buttons_styles);
	}
}
