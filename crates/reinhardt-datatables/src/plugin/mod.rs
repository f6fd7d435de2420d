//! Optional grid extensions.
//!
//! A [`Plugin`] is looked up by its unique name in a per-grid
//! [`PluginRegistry`]. During compilation the registry resolves the plugins
//! that apply to the grid, in registration order, and each of them gets four
//! independent chances to take part:
//!
//! - [`Plugin::is_applicable`] decides whether it is used at all,
//! - [`Plugin::contribute`] may adjust the options and return a named block,
//! - [`Plugin::post_init_code`] may add code after the instantiation call,
//! - [`Plugin::register_assets`] adds its client scripts and styles.
//!
//! Every method has a no-op default, so a plugin only implements what it
//! needs.
//!
//! # Example
//!
//! ```
//! use reinhardt_datatables::plugin::{Plugin, PluginContext, PluginRegistry};
//! use std::sync::Arc;
//!
//! struct Highlight;
//!
//! impl Plugin for Highlight {
//! 	fn name(&self) -> &str {
//! 		"highlight"
//! 	}
//!
//! 	fn post_init_code(&self, _ctx: &PluginContext<'_>, handle: &str) -> Option<String> {
//! 		Some(format!("{handle}.addClass(\"highlighted\");"))
//! 	}
//! }
//!
//! let mut registry = PluginRegistry::new();
//! registry.register(Arc::new(Highlight)).unwrap();
//! assert!(registry.register(Arc::new(Highlight)).is_err());
//! ```

pub mod buttons;
pub mod date_sorting;
pub mod scroller;

pub use buttons::ButtonsPlugin;
pub use date_sorting::DateSortingPlugin;
pub use scroller::ScrollerPlugin;

use crate::assets::AssetRegistry;
use crate::diagnostics::{Diagnostic, Diagnostics};
use crate::error::{DataTablesError, Result};
use crate::js::JsValue;
use crate::options::GridOptions;
use crate::settings::DataTablesSettings;
use indexmap::IndexMap;
use std::fmt;
use std::sync::Arc;

/// What a plugin can see of the grid being compiled.
#[derive(Debug, Clone, Copy)]
pub struct PluginContext<'a> {
	/// Table identifier.
	pub table_id: &'a str,
	/// Options of the grid.
	pub options: &'a GridOptions,
	/// Whether pages are fetched from the server.
	pub server_side: bool,
	/// Process settings.
	pub settings: &'a DataTablesSettings,
}

/// An optional extension of a grid.
pub trait Plugin: Send + Sync {
	/// Unique name; also the key of the contributed block.
	fn name(&self) -> &str;

	/// Returns whether the plugin can be used for the grid.
	fn is_applicable(&self, _ctx: &PluginContext<'_>) -> bool {
		true
	}

	/// Adjusts the options and returns the block emitted under
	/// [`name`](Plugin::name).
	fn contribute(&self, _options: &mut GridOptions) -> Option<JsValue> {
		None
	}

	/// Code appended after the instantiation call; `handle` names the grid.
	fn post_init_code(&self, _ctx: &PluginContext<'_>, _handle: &str) -> Option<String> {
		None
	}

	/// Registers client assets.
	fn register_assets(&self, _assets: &AssetRegistry, _settings: &DataTablesSettings) {}
}

/// Registered plugins of a grid, in registration order.
#[derive(Clone, Default)]
pub struct PluginRegistry {
	plugins: IndexMap<String, Arc<dyn Plugin>>,
}

impl PluginRegistry {
	/// Creates an empty registry.
	pub fn new() -> Self {
		Self::default()
	}

	/// Registers a plugin.
	///
	/// # Errors
	///
	/// Returns [`DataTablesError::DuplicatePlugin`] if a plugin with the same
	/// name is already registered.
	pub fn register(&mut self, plugin: Arc<dyn Plugin>) -> Result<()> {
		let name = plugin.name().to_string();
		if self.plugins.contains_key(&name) {
			return Err(DataTablesError::DuplicatePlugin(name));
		}
		tracing::debug!(plugin = %name, "registered grid plugin");
		self.plugins.insert(name, plugin);
		Ok(())
	}

	/// Removes a plugin, keeping the order of the others.
	pub fn unregister(&mut self, name: &str) -> Option<Arc<dyn Plugin>> {
		self.plugins.shift_remove(name)
	}

	/// Looks up a plugin by name.
	pub fn get(&self, name: &str) -> Option<Arc<dyn Plugin>> {
		self.plugins.get(name).cloned()
	}

	/// Returns whether a plugin with `name` is registered.
	pub fn is_registered(&self, name: &str) -> bool {
		self.plugins.contains_key(name)
	}

	/// Names in registration order.
	pub fn names(&self) -> impl Iterator<Item = &str> {
		self.plugins.keys().map(String::as_str)
	}

	/// Number of registered plugins.
	pub fn len(&self) -> usize {
		self.plugins.len()
	}

	/// Returns whether no plugin is registered.
	pub fn is_empty(&self) -> bool {
		self.plugins.is_empty()
	}

	/// Plugins applicable to the grid, in registration order.
	///
	/// Every skipped plugin is recorded as
	/// [`Diagnostic::PluginNotApplicable`].
	pub fn resolve_applicable(
		&self,
		ctx: &PluginContext<'_>,
		diagnostics: &mut Diagnostics,
	) -> Vec<Arc<dyn Plugin>> {
		let mut applicable = Vec::with_capacity(self.plugins.len());
		for (name, plugin) in &self.plugins {
			if plugin.is_applicable(ctx) {
				applicable.push(Arc::clone(plugin));
			} else {
				diagnostics.push(Diagnostic::PluginNotApplicable {
					plugin: name.clone(),
					table_id: ctx.table_id.to_string(),
				});
			}
		}
		applicable
	}
}

impl fmt::Debug for PluginRegistry {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_list().entries(self.plugins.keys()).finish()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	struct Named {
		name: &'static str,
		applicable: bool,
	}

	impl Plugin for Named {
		fn name(&self) -> &str {
			self.name
		}

		fn is_applicable(&self, _ctx: &PluginContext<'_>) -> bool {
			self.applicable
		}
	}

	fn named(name: &'static str, applicable: bool) -> Arc<dyn Plugin> {
		Arc::new(Named { name, applicable })
	}

	#[rstest]
	fn test_duplicate_name_is_rejected() {
		let mut registry = PluginRegistry::new();
		registry.register(named("a", true)).unwrap();

		let err = registry.register(named("a", false)).unwrap_err();

		assert!(matches!(err, DataTablesError::DuplicatePlugin(name) if name == "a"));
		assert_eq!(registry.len(), 1);
	}

	#[rstest]
	fn test_unregister_keeps_order() {
		let mut registry = PluginRegistry::new();
		for name in ["a", "b", "c"] {
			registry.register(named(name, true)).unwrap();
		}

		assert!(registry.unregister("b").is_some());
		assert!(registry.unregister("b").is_none());
		assert_eq!(registry.names().collect::<Vec<_>>(), vec!["a", "c"]);
		assert!(registry.get("c").is_some());
		assert!(!registry.is_registered("b"));
	}

	#[rstest]
	fn test_resolve_skips_inapplicable() {
		let mut registry = PluginRegistry::new();
		registry.register(named("a", true)).unwrap();
		registry.register(named("b", false)).unwrap();
		registry.register(named("c", true)).unwrap();
		let options = GridOptions::default();
		let settings = DataTablesSettings::default();
		let ctx = PluginContext {
			table_id: "t",
			options: &options,
			server_side: false,
			settings: &settings,
		};
		let mut diagnostics = Diagnostics::new();

		let resolved = registry.resolve_applicable(&ctx, &mut diagnostics);

		let names: Vec<_> = resolved.iter().map(|plugin| plugin.name()).collect();
		assert_eq!(names, vec!["a", "c"]);
		assert!(diagnostics.contains(&Diagnostic::PluginNotApplicable {
			plugin: "b".to_string(),
			table_id: "t".to_string(),
		}));
	}
}
