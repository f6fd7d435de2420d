//! Localized runtime texts.
//!
//! The runtime either receives its texts inline in the payload or loads
//! them lazily from a URL parameterized with the display language.

use crate::error::{DataTablesError, Result};
use crate::js::JsValue;
use serde_json::{Value, json};
use unic_langid::LanguageIdentifier;
use url::Url;

/// Every text the runtime displays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextKey {
	/// Screen reader hint for ascending sort.
	AriaSortAscending,
	/// Screen reader hint for descending sort.
	AriaSortDescending,
	/// Decimal separator.
	Decimal,
	/// Shown when the table has no data.
	EmptyTable,
	/// Information summary.
	Info,
	/// Information summary without entries.
	InfoEmpty,
	/// Appended to the summary when filtered.
	InfoFiltered,
	/// Appended to every summary.
	InfoPostFix,
	/// Length menu label.
	LengthMenu,
	/// Shown while loading.
	LoadingRecords,
	/// First page button.
	PaginateFirst,
	/// Last page button.
	PaginateLast,
	/// Next page button.
	PaginateNext,
	/// Previous page button.
	PaginatePrevious,
	/// Processing indicator.
	Processing,
	/// Search box label.
	Search,
	/// Search box placeholder.
	SearchPlaceholder,
	/// Thousands separator.
	Thousands,
	/// Shown when filtering matched nothing.
	ZeroRecords,
	/// Label of the "show all" length menu entry.
	LengthMenuAll,
}

impl TextKey {
	fn english(self) -> &'static str {
		match self {
			Self::AriaSortAscending => ": activate to sort column ascending",
			Self::AriaSortDescending => ": activate to sort column descending",
			Self::Decimal => ".",
			Self::EmptyTable => "No data available in table",
			Self::Info => "Showing _START_ to _END_ of _TOTAL_ entries",
			Self::InfoEmpty => "Showing 0 to 0 of 0 entries",
			Self::InfoFiltered => "(filtered from _MAX_ total entries)",
			Self::InfoPostFix => "",
			Self::LengthMenu => "Show _MENU_ entries",
			Self::LoadingRecords => "Loading...",
			Self::PaginateFirst => "First",
			Self::PaginateLast => "Last",
			Self::PaginateNext => "Next",
			Self::PaginatePrevious => "Previous",
			Self::Processing => "Processing...",
			Self::Search => "Search:",
			Self::SearchPlaceholder => "",
			Self::Thousands => ",",
			Self::ZeroRecords => "No matching records found",
			Self::LengthMenuAll => "All",
		}
	}

	fn german(self) -> &'static str {
		match self {
			Self::AriaSortAscending => ": aktivieren, um Spalte aufsteigend zu sortieren",
			Self::AriaSortDescending => ": aktivieren, um Spalte absteigend zu sortieren",
			Self::Decimal => ",",
			Self::EmptyTable => "Keine Daten in der Tabelle vorhanden",
			Self::Info => "_START_ bis _END_ von _TOTAL_ Einträgen",
			Self::InfoEmpty => "Keine Daten vorhanden",
			Self::InfoFiltered => "(gefiltert von _MAX_ Einträgen)",
			Self::InfoPostFix => "",
			Self::LengthMenu => "_MENU_ Einträge anzeigen",
			Self::LoadingRecords => "Wird geladen ...",
			Self::PaginateFirst => "Erste",
			Self::PaginateLast => "Letzte",
			Self::PaginateNext => "Nächste",
			Self::PaginatePrevious => "Zurück",
			Self::Processing => "Bitte warten ...",
			Self::Search => "Suchen",
			Self::SearchPlaceholder => "",
			Self::Thousands => ".",
			Self::ZeroRecords => "Keine Einträge vorhanden.",
			Self::LengthMenuAll => "Alle",
		}
	}
}

/// Resolves runtime texts for a locale.
pub trait TextResolver: Send + Sync {
	/// Returns the text for `key` in `locale`.
	fn text(&self, key: TextKey, locale: &LanguageIdentifier) -> String;
}

/// Built-in English and German texts; other languages fall back to English.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultTexts;

impl TextResolver for DefaultTexts {
	fn text(&self, key: TextKey, locale: &LanguageIdentifier) -> String {
		match locale.language.as_str() {
			"de" => key.german(),
			_ => key.english(),
		}
		.to_string()
	}
}

/// The locale used when none is configured.
pub fn fallback_locale() -> LanguageIdentifier {
	LanguageIdentifier::default()
}

/// Where the runtime gets its texts from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LanguageConfig {
	display_locale: Option<LanguageIdentifier>,
	text_url: Option<(Url, String)>,
}

impl LanguageConfig {
	/// Creates a configuration without display locale; no texts are emitted.
	pub fn new() -> Self {
		Self::default()
	}

	/// Sets the display locale.
	pub fn with_locale(mut self, locale: LanguageIdentifier) -> Self {
		self.display_locale = Some(locale);
		self
	}

	/// Loads texts from `url`, passing the language in `locale_param`.
	pub fn with_text_url(mut self, url: &str, locale_param: &str) -> Result<Self> {
		if locale_param.is_empty() {
			return Err(DataTablesError::MissingLocaleParameter);
		}
		self.text_url = Some((Url::parse(url)?, locale_param.to_string()));
		Ok(self)
	}

	/// The display locale.
	pub fn display_locale(&self) -> Option<&LanguageIdentifier> {
		self.display_locale.as_ref()
	}

	/// The display locale or the fallback locale.
	pub fn effective_locale(&self) -> LanguageIdentifier {
		self.display_locale.clone().unwrap_or_else(fallback_locale)
	}

	/// Builds the `language` block, if a display locale is set.
	pub fn to_js(&self, resolver: &dyn TextResolver) -> Option<JsValue> {
		let locale = self.display_locale.as_ref()?;
		let block = match &self.text_url {
			Some((url, param)) => {
				let mut url = url.clone();
				url.query_pairs_mut()
					.append_pair(param, locale.language.as_str());
				json!({ "url": url.as_str() })
			}
			None => inline_texts(resolver, locale),
		};
		Some(JsValue::Json(block))
	}
}

/// Builds the inline text block for `locale`.
pub fn inline_texts(resolver: &dyn TextResolver, locale: &LanguageIdentifier) -> Value {
	let text = |key| resolver.text(key, locale);
	json!({
		"aria": {
			"sortAscending": text(TextKey::AriaSortAscending),
			"sortDescending": text(TextKey::AriaSortDescending),
		},
		"decimal": text(TextKey::Decimal),
		"emptyTable": text(TextKey::EmptyTable),
		"info": text(TextKey::Info),
		"infoEmpty": text(TextKey::InfoEmpty),
		"infoFiltered": text(TextKey::InfoFiltered),
		"infoPostFix": text(TextKey::InfoPostFix),
		"lengthMenu": text(TextKey::LengthMenu),
		"loadingRecords": text(TextKey::LoadingRecords),
		"paginate": {
			"first": text(TextKey::PaginateFirst),
			"last": text(TextKey::PaginateLast),
			"next": text(TextKey::PaginateNext),
			"previous": text(TextKey::PaginatePrevious),
		},
		"processing": text(TextKey::Processing),
		"search": text(TextKey::Search),
		"searchPlaceholder": text(TextKey::SearchPlaceholder),
		"thousands": text(TextKey::Thousands),
		"url": "",
		"zeroRecords": text(TextKey::ZeroRecords),
	})
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	fn locale(tag: &str) -> LanguageIdentifier {
		tag.parse().unwrap()
	}

	#[rstest]
	#[case("de-AT", "Alle")]
	#[case("en-US", "All")]
	#[case("fr", "All")]
	fn test_default_texts(#[case] tag: &str, #[case] expected: &str) {
		assert_eq!(DefaultTexts.text(TextKey::LengthMenuAll, &locale(tag)), expected);
	}

	#[rstest]
	fn test_no_locale_no_block() {
		assert!(LanguageConfig::new().to_js(&DefaultTexts).is_none());
	}

	#[rstest]
	fn test_inline_block() {
		let block = LanguageConfig::new()
			.with_locale(locale("de"))
			.to_js(&DefaultTexts)
			.unwrap()
			.to_json();

		assert_eq!(block["url"], "");
		assert_eq!(block["paginate"]["next"], "Nächste");
		assert_eq!(block["decimal"], ",");
	}

	#[rstest]
	fn test_url_block() {
		let block = LanguageConfig::new()
			.with_locale(locale("de-DE"))
			.with_text_url("https://example.com/i18n/datatables", "lang")
			.unwrap()
			.to_js(&DefaultTexts)
			.unwrap()
			.to_json();

		assert_eq!(block, json!({ "url": "https://example.com/i18n/datatables?lang=de" }));
	}

	#[rstest]
	fn test_url_requires_locale_param() {
		let result = LanguageConfig::new().with_text_url("https://example.com/texts", "");

		assert!(matches!(result, Err(DataTablesError::MissingLocaleParameter)));
	}
}
