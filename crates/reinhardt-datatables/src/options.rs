//! Feature flags, callbacks and options of a grid.
//!
//! Values equal to the documented runtime defaults are left out of the
//! payload; the runtime falls back to the same defaults. The exceptions are
//! `order`, which is always emitted because an empty order disables the
//! implicit sort by the first column, and `serverSide`, which the compiler
//! always sets.

use crate::diagnostics::Diagnostics;
use crate::js::{JsCode, JsObject, JsValue};
use crate::language::TextResolver;
use crate::layout::LayoutBuilder;
use crate::length_menu::{LengthMenu, SHOW_ALL};
use crate::order::OrderSpec;
use unic_langid::LanguageIdentifier;

/// Page length the runtime uses when none is given.
pub const DEFAULT_PAGE_LENGTH: i64 = 10;

/// Layout the runtime uses when none is given.
pub const DEFAULT_LAYOUT: &str = "lfrtip";

/// Runtime feature switches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Features {
	/// Column width calculation.
	pub auto_width: bool,
	/// Deferred row rendering.
	pub defer_render: bool,
	/// Table information summary.
	pub info: bool,
	/// Page length selector.
	pub length_change: bool,
	/// Column ordering.
	pub ordering: bool,
	/// Pagination.
	pub paging: bool,
	/// Processing indicator.
	pub processing: bool,
	/// Horizontal scrolling; `None` leaves it to the runtime.
	pub scroll_x: Option<bool>,
	/// Vertical scrolling viewport height as a CSS length.
	pub scroll_y: Option<String>,
	/// Search box.
	pub searching: bool,
	/// State saving.
	pub state_save: bool,
}

impl Default for Features {
	fn default() -> Self {
		Self {
			auto_width: true,
			defer_render: false,
			info: true,
			length_change: true,
			ordering: true,
			paging: true,
			processing: false,
			scroll_x: None,
			scroll_y: None,
			searching: true,
			state_save: false,
		}
	}
}

impl Features {
	/// Writes every flag that differs from its default.
	pub(crate) fn write(&self, payload: &mut JsObject) {
		let defaults = Self::default();
		let flags = [
			("autoWidth", self.auto_width, defaults.auto_width),
			("deferRender", self.defer_render, defaults.defer_render),
			("info", self.info, defaults.info),
			("lengthChange", self.length_change, defaults.length_change),
			("ordering", self.ordering, defaults.ordering),
			("paging", self.paging, defaults.paging),
			("processing", self.processing, defaults.processing),
		];
		for (key, value, default) in flags {
			if value != default {
				payload.insert(key, value);
			}
		}
		if let Some(scroll_x) = self.scroll_x {
			payload.insert("scrollX", scroll_x);
		}
		if let Some(scroll_y) = &self.scroll_y {
			payload.insert("scrollY", scroll_y.as_str());
		}
		if self.searching != defaults.searching {
			payload.insert("searching", self.searching);
		}
		if self.state_save != defaults.state_save {
			payload.insert("stateSave", self.state_save);
		}
	}
}

/// Everything of a grid that is neither a column nor a plugin.
#[derive(Debug, Clone, PartialEq)]
pub struct GridOptions {
	features: Features,
	footer_callback: Option<JsCode>,
	header_callback: Option<JsCode>,
	init_complete: Option<JsCode>,
	defer_loading: bool,
	destroy: bool,
	display_start: usize,
	layout: Option<LayoutBuilder>,
	length_menu: Option<LengthMenu>,
	order: Option<OrderSpec>,
	page_length: i64,
	paging_type: Option<String>,
	retrieve: bool,
	scroll_collapse: bool,
}

impl Default for GridOptions {
	fn default() -> Self {
		Self {
			features: Features::default(),
			footer_callback: None,
			header_callback: None,
			init_complete: None,
			defer_loading: false,
			destroy: false,
			display_start: 0,
			layout: None,
			length_menu: None,
			order: None,
			page_length: DEFAULT_PAGE_LENGTH,
			paging_type: None,
			retrieve: false,
			scroll_collapse: false,
		}
	}
}

impl GridOptions {
	/// Creates options with runtime defaults.
	pub fn new() -> Self {
		Self::default()
	}

	/// Feature switches.
	pub fn features(&self) -> &Features {
		&self.features
	}

	/// Mutable feature switches.
	pub fn features_mut(&mut self) -> &mut Features {
		&mut self.features
	}

	/// Sets the callback run when the footer is drawn.
	pub fn set_footer_callback(&mut self, code: impl Into<JsCode>) -> &mut Self {
		self.footer_callback = Some(code.into());
		self
	}

	/// Footer callback.
	pub fn footer_callback(&self) -> Option<&JsCode> {
		self.footer_callback.as_ref()
	}

	/// Sets the callback run when the header is drawn.
	pub fn set_header_callback(&mut self, code: impl Into<JsCode>) -> &mut Self {
		self.header_callback = Some(code.into());
		self
	}

	/// Sets the callback run once initialisation is complete.
	pub fn set_init_complete(&mut self, code: impl Into<JsCode>) -> &mut Self {
		self.init_complete = Some(code.into());
		self
	}

	/// Skips the first server request; the table already shows `records`.
	pub fn set_defer_loading(&mut self, defer_loading: bool) -> &mut Self {
		self.defer_loading = defer_loading;
		self
	}

	/// Destroys an existing grid on the same element.
	pub fn set_destroy(&mut self, destroy: bool) -> &mut Self {
		self.destroy = destroy;
		self
	}

	/// Row offset of the first displayed page.
	pub fn set_display_start(&mut self, display_start: usize) -> &mut Self {
		self.display_start = display_start;
		self
	}

	/// Sets the layout.
	pub fn set_layout(&mut self, layout: LayoutBuilder) -> &mut Self {
		self.layout = Some(layout);
		self
	}

	/// The layout, if one was set.
	pub fn layout(&self) -> Option<&LayoutBuilder> {
		self.layout.as_ref()
	}

	/// The layout, starting from [`DEFAULT_LAYOUT`] when none was set.
	pub fn layout_mut(&mut self) -> &mut LayoutBuilder {
		self.layout
			.get_or_insert_with(|| LayoutBuilder::parse(DEFAULT_LAYOUT))
	}

	/// Attaches a length menu.
	///
	/// The first item becomes the page length. A menu with a choice turns
	/// length change and paging on; a single item turns both off.
	pub fn set_length_menu(&mut self, menu: LengthMenu) -> &mut Self {
		self.page_length = menu.first_page_size();
		let has_choice = menu.len() > 1;
		self.features.length_change = has_choice;
		self.features.paging = has_choice;
		self.length_menu = Some(menu);
		self
	}

	/// The length menu.
	pub fn length_menu(&self) -> Option<&LengthMenu> {
		self.length_menu.as_ref()
	}

	/// Sets the initial order.
	pub fn set_order(&mut self, order: OrderSpec) -> &mut Self {
		self.order = Some(order);
		self
	}

	/// The initial order.
	pub fn order(&self) -> Option<&OrderSpec> {
		self.order.as_ref()
	}

	/// Sets the page length.
	pub fn set_page_length(&mut self, page_length: i64) -> &mut Self {
		self.page_length = page_length;
		self
	}

	/// Shows all rows on one page.
	pub fn set_page_length_all(&mut self) -> &mut Self {
		self.set_page_length(SHOW_ALL)
	}

	/// Active page length; [`SHOW_ALL`] shows every row.
	pub fn page_length(&self) -> i64 {
		self.page_length
	}

	/// Sets the pager style, e.g. `full_numbers`.
	pub fn set_paging_type(&mut self, paging_type: impl Into<String>) -> &mut Self {
		self.paging_type = Some(paging_type.into());
		self
	}

	/// Returns an existing grid instead of failing on re-initialisation.
	pub fn set_retrieve(&mut self, retrieve: bool) -> &mut Self {
		self.retrieve = retrieve;
		self
	}

	/// Shrinks the scroll viewport to the shown rows.
	pub fn set_scroll_collapse(&mut self, scroll_collapse: bool) -> &mut Self {
		self.scroll_collapse = scroll_collapse;
		self
	}

	pub(crate) fn write_callbacks(&self, payload: &mut JsObject) {
		let callbacks = [
			("footerCallback", &self.footer_callback),
			("headerCallback", &self.header_callback),
			("initComplete", &self.init_complete),
		];
		for (key, code) in callbacks {
			if let Some(code) = code {
				payload.insert(key, code.clone());
			}
		}
	}

	pub(crate) fn write_options(
		&self,
		payload: &mut JsObject,
		resolver: &dyn TextResolver,
		locale: &LanguageIdentifier,
		diagnostics: &mut Diagnostics,
	) {
		if self.defer_loading {
			payload.insert("deferLoading", true);
		}
		if self.destroy {
			payload.insert("destroy", true);
		}
		if self.display_start != 0 {
			payload.insert("displayStart", self.display_start);
		}
		if let Some(layout) = &self.layout {
			payload.insert("dom", layout.serialize());
			diagnostics.extend_logged(layout.diagnostics().iter().cloned());
			diagnostics.extend_logged(layout.unbalanced());
		}
		if let Some(menu) = &self.length_menu {
			payload.insert("lengthMenu", menu.to_js(resolver, locale));
		}
		payload.insert(
			"order",
			self.order
				.as_ref()
				.map_or_else(|| JsValue::Array(Vec::new()), OrderSpec::to_js),
		);
		if self.page_length != DEFAULT_PAGE_LENGTH && self.features.length_change {
			payload.insert("pageLength", self.page_length);
		}
		if let Some(paging_type) = &self.paging_type
			&& self.features.paging
		{
			payload.insert("pagingType", paging_type.as_str());
		}
		if self.retrieve {
			payload.insert("retrieve", true);
		}
		if self.scroll_collapse {
			payload.insert("scrollCollapse", true);
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::language::{DefaultTexts, fallback_locale};
	use crate::layout::Region;
	use crate::length_menu::LengthMenuItem;
	use crate::order::OrderDirection;
	use rstest::rstest;
	use serde_json::json;

	fn payload(options: &GridOptions) -> serde_json::Value {
		let mut payload = JsObject::new();
		let mut diagnostics = Diagnostics::new();
		options.features().write(&mut payload);
		options.write_callbacks(&mut payload);
		options.write_options(&mut payload, &DefaultTexts, &fallback_locale(), &mut diagnostics);
		payload.to_json()
	}

	#[rstest]
	fn test_defaults_emit_only_order() {
		assert_eq!(payload(&GridOptions::new()), json!({"order": []}));
	}

	#[rstest]
	fn test_changed_features_are_emitted() {
		let mut options = GridOptions::new();
		options.features_mut().info = false;
		options.features_mut().state_save = true;
		options.features_mut().scroll_y = Some("300px".to_string());

		assert_eq!(
			payload(&options),
			json!({"info": false, "scrollY": "300px", "stateSave": true, "order": []})
		);
	}

	#[rstest]
	#[case(vec![25, 50, 100], true, json!(25))]
	#[case(vec![25], false, serde_json::Value::Null)]
	fn test_length_menu_side_effects(
		#[case] sizes: Vec<i64>,
		#[case] has_choice: bool,
		#[case] page_length: serde_json::Value,
	) {
		let mut options = GridOptions::new();
		options.set_length_menu(LengthMenu::from_sizes(sizes).unwrap());

		assert_eq!(options.page_length(), 25);
		assert_eq!(options.features().length_change, has_choice);
		assert_eq!(options.features().paging, has_choice);
		assert_eq!(
			payload(&options).get("pageLength").cloned().unwrap_or_default(),
			page_length
		);
	}

	#[rstest]
	fn test_show_all_label() {
		let mut options = GridOptions::new();
		options.set_length_menu(
			LengthMenu::new([LengthMenuItem::new(10), LengthMenuItem::all()]).unwrap(),
		);

		assert_eq!(payload(&options)["lengthMenu"], json!([[10, -1], ["10", "All"]]));
	}

	#[rstest]
	fn test_paging_type_needs_paging() {
		let mut options = GridOptions::new();
		options.set_paging_type("full_numbers");
		assert_eq!(payload(&options)["pagingType"], "full_numbers");

		options.features_mut().paging = false;
		assert!(payload(&options).get("pagingType").is_none());
	}

	#[rstest]
	fn test_order_and_layout() {
		let mut options = GridOptions::new();
		options.set_order(OrderSpec::new().add_column(1, OrderDirection::Desc));
		options.layout_mut().set_cursor(0).add_region(Region::Processing);

		let payload = payload(&options);

		assert_eq!(payload["order"], json!([[1, "desc"]]));
		assert_eq!(payload["dom"], "rlfrtip");
	}

	#[rstest]
	fn test_unbalanced_layout_is_reported() {
		let mut layout = LayoutBuilder::new();
		layout.open_group().add_region(Region::Table);
		let mut options = GridOptions::new();
		options.set_layout(layout);
		let mut diagnostics = Diagnostics::new();

		options.write_options(
			&mut JsObject::new(),
			&DefaultTexts,
			&fallback_locale(),
			&mut diagnostics,
		);

		assert_eq!(diagnostics.len(), 1);
		assert!(diagnostics.iter().all(|diagnostic| diagnostic.is_error()));
	}
}
