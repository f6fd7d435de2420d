//! Page size choices.

use crate::error::{DataTablesError, Result};
use crate::js::JsValue;
use crate::language::{TextKey, TextResolver};
use serde_json::{Value, json};
use unic_langid::LanguageIdentifier;

/// Page size meaning "show all rows".
pub const SHOW_ALL: i64 = -1;

/// A single page size choice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LengthMenuItem {
	page_size: i64,
	label: Option<String>,
}

impl LengthMenuItem {
	/// A page size labelled with its number.
	pub fn new(page_size: i64) -> Self {
		Self {
			page_size,
			label: None,
		}
	}

	/// A page size with a custom label.
	pub fn with_label(page_size: i64, label: impl Into<String>) -> Self {
		Self {
			page_size,
			label: Some(label.into()),
		}
	}

	/// The "show all" entry, labelled from the localized texts.
	pub fn all() -> Self {
		Self::new(SHOW_ALL)
	}

	/// Page size, [`SHOW_ALL`] for all rows.
	pub fn page_size(&self) -> i64 {
		self.page_size
	}

	/// Returns whether this is the "show all" entry.
	pub fn is_all(&self) -> bool {
		self.page_size == SHOW_ALL
	}

	fn display_label(&self, resolver: &dyn TextResolver, locale: &LanguageIdentifier) -> String {
		match &self.label {
			Some(label) => label.clone(),
			None if self.is_all() => resolver.text(TextKey::LengthMenuAll, locale),
			None => self.page_size.to_string(),
		}
	}
}

/// Non-empty ordered list of page size choices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LengthMenu {
	items: Vec<LengthMenuItem>,
}

impl LengthMenu {
	/// Creates a menu; fails when `items` is empty.
	pub fn new(items: impl IntoIterator<Item = LengthMenuItem>) -> Result<Self> {
		let items: Vec<_> = items.into_iter().collect();
		if items.is_empty() {
			return Err(DataTablesError::EmptyLengthMenu);
		}
		Ok(Self { items })
	}

	/// Creates a menu from plain page sizes.
	pub fn from_sizes(sizes: impl IntoIterator<Item = i64>) -> Result<Self> {
		Self::new(sizes.into_iter().map(LengthMenuItem::new))
	}

	/// Appends the "show all" entry.
	pub fn with_all(mut self) -> Self {
		self.items.push(LengthMenuItem::all());
		self
	}

	/// Items in display order.
	pub fn items(&self) -> &[LengthMenuItem] {
		&self.items
	}

	/// Number of items.
	pub fn len(&self) -> usize {
		self.items.len()
	}

	/// Always false; kept for API symmetry with collections.
	pub fn is_empty(&self) -> bool {
		self.items.is_empty()
	}

	/// Page size of the first item.
	pub fn first_page_size(&self) -> i64 {
		self.items.first().map_or(SHOW_ALL, LengthMenuItem::page_size)
	}

	/// Payload form `[[sizes...], [labels...]]`.
	pub fn to_js(&self, resolver: &dyn TextResolver, locale: &LanguageIdentifier) -> JsValue {
		let sizes: Vec<Value> = self.items.iter().map(|item| json!(item.page_size)).collect();
		let labels: Vec<Value> = self
			.items
			.iter()
			.map(|item| json!(item.display_label(resolver, locale)))
			.collect();
		JsValue::Json(json!([sizes, labels]))
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::language::DefaultTexts;
	use rstest::rstest;

	#[rstest]
	fn test_empty_is_rejected() {
		assert!(matches!(
			LengthMenu::from_sizes([]),
			Err(DataTablesError::EmptyLengthMenu)
		));
	}

	#[rstest]
	#[case("en", "All")]
	#[case("de", "Alle")]
	fn test_render_localizes_all(#[case] tag: &str, #[case] all: &str) {
		let menu = LengthMenu::from_sizes([25, 50])
			.unwrap()
			.with_all();
		let locale: LanguageIdentifier = tag.parse().unwrap();

		assert_eq!(
			menu.to_js(&DefaultTexts, &locale).to_json(),
			json!([[25, 50, -1], ["25", "50", all]])
		);
		assert_eq!(menu.first_page_size(), 25);
	}

	#[rstest]
	fn test_custom_label() {
		let menu = LengthMenu::new([LengthMenuItem::with_label(5, "five")]).unwrap();
		let locale = LanguageIdentifier::default();

		assert_eq!(menu.to_js(&DefaultTexts, &locale).to_json(), json!([[5], ["five"]]));
	}
}
