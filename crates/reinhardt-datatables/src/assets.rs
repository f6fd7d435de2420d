//! Client asset registration.
//!
//! Grids and plugins register the scripts and styles they need. The
//! registry is shared between compilations and de-duplicates by path, so
//! registering the same asset repeatedly (or concurrently) is harmless.

use indexmap::IndexSet;
use parking_lot::Mutex;

/// Kind of client asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssetKind {
	/// JavaScript file.
	Script,
	/// Stylesheet.
	Style,
}

/// A client asset.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Asset {
	/// Asset kind.
	pub kind: AssetKind,
	/// Path relative to the static root.
	pub path: String,
}

/// Insertion-ordered, de-duplicating asset registry.
#[derive(Debug, Default)]
pub struct AssetRegistry {
	assets: Mutex<IndexSet<Asset>>,
}

impl AssetRegistry {
	/// Creates an empty registry.
	pub fn new() -> Self {
		Self::default()
	}

	/// Registers an asset; returns `false` if it was already present.
	pub fn register(&self, kind: AssetKind, path: impl Into<String>) -> bool {
		let asset = Asset {
			kind,
			path: path.into(),
		};
		self.assets.lock().insert(asset)
	}

	/// Registers several scripts in order.
	pub fn register_scripts<I, S>(&self, paths: I)
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		for path in paths {
			self.register(AssetKind::Script, path);
		}
	}

	/// Registers several styles in order.
	pub fn register_styles<I, S>(&self, paths: I)
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		for path in paths {
			self.register(AssetKind::Style, path);
		}
	}

	/// Registered script paths in registration order.
	pub fn scripts(&self) -> Vec<String> {
		self.paths(AssetKind::Script)
	}

	/// Registered style paths in registration order.
	pub fn styles(&self) -> Vec<String> {
		self.paths(AssetKind::Style)
	}

	fn paths(&self, kind: AssetKind) -> Vec<String> {
		self.assets
			.lock()
			.iter()
			.filter(|asset| asset.kind == kind)
			.map(|asset| asset.path.clone())
			.collect()
	}

	/// Number of registered assets.
	pub fn len(&self) -> usize {
		self.assets.lock().len()
	}

	/// Returns whether nothing is registered.
	pub fn is_empty(&self) -> bool {
		self.assets.lock().is_empty()
	}

	/// Forgets every asset, e.g. at the start of a new render cycle.
	pub fn clear(&self) {
		self.assets.lock().clear();
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use std::sync::Arc;

	#[rstest]
	fn test_register_is_idempotent() {
		let registry = AssetRegistry::new();

		assert!(registry.register(AssetKind::Script, "a.js"));
		assert!(!registry.register(AssetKind::Script, "a.js"));
		assert!(registry.register(AssetKind::Style, "a.css"));

		assert_eq!(registry.scripts(), vec!["a.js"]);
		assert_eq!(registry.styles(), vec!["a.css"]);
	}

	#[rstest]
	fn test_concurrent_registration() {
		let registry = Arc::new(AssetRegistry::new());
		let handles: Vec<_> = (0..8)
			.map(|_| {
				let registry = Arc::clone(&registry);
				std::thread::spawn(move || {
					registry.register_scripts(["core.js", "plugin.js"]);
				})
			})
			.collect();
		for handle in handles {
			handle.join().unwrap();
		}

		assert_eq!(registry.scripts(), vec!["core.js", "plugin.js"]);
	}
}
