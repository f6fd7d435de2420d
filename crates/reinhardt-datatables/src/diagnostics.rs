//! Soft consistency diagnostics.
//!
//! A malformed but renderable configuration never aborts a page. Each
//! problem is logged through `tracing` when it is recorded and kept as a
//! typed [`Diagnostic`] so callers can inspect what went wrong.

use std::fmt;

/// A consistency problem that did not abort compilation.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Diagnostic {
	/// Two column definitions claim the same target index.
	DuplicateColumnTarget {
		/// The shared target index.
		target: usize,
	},
	/// A layout was serialized while groups were still open (or over-closed).
	LayoutUnbalanced {
		/// Raw open-group counter at serialization time.
		open_groups: i32,
	},
	/// A group was closed without a matching open marker.
	LayoutOverClosed {
		/// Raw open-group counter after the close.
		open_groups: i32,
	},
	/// An empty literal was offered to a layout and ignored.
	EmptyLayoutLiteral,
	/// A registered plugin declined to apply to a grid.
	PluginNotApplicable {
		/// Plugin name.
		plugin: String,
		/// Table identifier.
		table_id: String,
	},
	/// The table has no header row, so the runtime may misrender it.
	MissingHeaderRow {
		/// Table identifier.
		table_id: String,
	},
}

impl Diagnostic {
	/// Whether this diagnostic is logged at error level.
	pub fn is_error(&self) -> bool {
		matches!(
			self,
			Self::LayoutUnbalanced { .. } | Self::LayoutOverClosed { .. }
		)
	}

	/// Logs the diagnostic.
	pub fn emit(&self) {
		if self.is_error() {
			tracing::error!("{}", self);
		} else {
			tracing::warn!("{}", self);
		}
	}
}

impl fmt::Display for Diagnostic {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::DuplicateColumnTarget { target } => {
				write!(f, "another column definition with target {target} is already contained")
			}
			Self::LayoutUnbalanced { open_groups } if *open_groups > 0 => {
				write!(f, "layout groups are not balanced: {open_groups} groups are open")
			}
			Self::LayoutUnbalanced { open_groups } => write!(
				f,
				"layout groups are not balanced: {} groups too many are closed",
				-open_groups
			),
			Self::LayoutOverClosed { open_groups } => {
				write!(f, "too many layout groups are closed: {open_groups}")
			}
			Self::EmptyLayoutLiteral => write!(f, "ignoring empty layout literal"),
			Self::PluginNotApplicable { plugin, table_id } => {
				write!(f, "plugin '{plugin}' cannot be applied to grid {table_id}")
			}
			Self::MissingHeaderRow { table_id } => write!(
				f,
				"table {table_id} does not have a header row so the grid may not be displayed correctly"
			),
		}
	}
}

/// An ordered list of diagnostics.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Diagnostics {
	entries: Vec<Diagnostic>,
}

impl Diagnostics {
	/// Creates an empty list.
	pub fn new() -> Self {
		Self::default()
	}

	/// Logs and records a diagnostic.
	pub fn push(&mut self, diagnostic: Diagnostic) {
		diagnostic.emit();
		self.entries.push(diagnostic);
	}

	/// Records diagnostics that were already logged elsewhere.
	pub fn extend_logged(&mut self, other: impl IntoIterator<Item = Diagnostic>) {
		self.entries.extend(other);
	}

	/// Returns whether nothing was recorded.
	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// Number of recorded diagnostics.
	pub fn len(&self) -> usize {
		self.entries.len()
	}

	/// Iterates the recorded diagnostics in order.
	pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
		self.entries.iter()
	}

	/// Returns whether a matching diagnostic was recorded.
	pub fn contains(&self, diagnostic: &Diagnostic) -> bool {
		self.entries.contains(diagnostic)
	}

	/// Returns the recorded diagnostics as a slice.
	pub fn as_slice(&self) -> &[Diagnostic] {
		&self.entries
	}
}

impl IntoIterator for Diagnostics {
	type Item = Diagnostic;
	type IntoIter = std::vec::IntoIter<Diagnostic>;

	fn into_iter(self) -> Self::IntoIter {
		self.entries.into_iter()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	#[case(Diagnostic::LayoutUnbalanced { open_groups: 2 }, "2 groups are open")]
	#[case(Diagnostic::LayoutUnbalanced { open_groups: -1 }, "1 groups too many are closed")]
	#[case(Diagnostic::DuplicateColumnTarget { target: 3 }, "with target 3")]
	fn test_display(#[case] diagnostic: Diagnostic, #[case] expected: &str) {
		assert!(diagnostic.to_string().contains(expected));
	}

	#[rstest]
	fn test_push_keeps_order() {
		let mut diagnostics = Diagnostics::new();
		diagnostics.push(Diagnostic::EmptyLayoutLiteral);
		diagnostics.push(Diagnostic::DuplicateColumnTarget { target: 0 });

		assert_eq!(diagnostics.len(), 2);
		assert_eq!(diagnostics.as_slice()[0], Diagnostic::EmptyLayoutLiteral);
		assert!(diagnostics.contains(&Diagnostic::DuplicateColumnTarget { target: 0 }));
	}
}
