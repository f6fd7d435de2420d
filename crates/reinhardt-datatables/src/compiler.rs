//! Grid compiler.
//!
//! [`DataTables`] collects the configuration of one grid and compiles it
//! against its structural table into a [`CompiledGrid`]: the wire payload,
//! the post-init code of the plugins and the handle naming the grid in
//! that code.
//!
//! Compilation runs in a fixed order:
//!
//! 1. client-side grids with date-like columns get the date sorting plugin,
//! 2. applicable plugins are resolved and contribute, in registration order,
//! 3. server-side grids install a [`ServerData`] snapshot of the unpruned
//!    table and drop its pre-rendered rows,
//! 4. the payload is assembled,
//! 5. hidden columns are removed from the table,
//! 6. plugin post-init code is collected,
//! 7. core and plugin assets are registered.

use crate::assets::AssetRegistry;
use crate::column::{ColumnDef, ColumnDefs};
use crate::diagnostics::{Diagnostic, Diagnostics};
use crate::error::{DataTablesError, Result};
use crate::footer::FooterAggregation;
use crate::js::{JsObject, JsValue, is_identifier, quote};
use crate::language::{DefaultTexts, LanguageConfig, TextResolver};
use crate::layout::LayoutBuilder;
use crate::length_menu::LengthMenu;
use crate::options::GridOptions;
use crate::order::OrderSpec;
use crate::paging::{PagingMode, ServerSide};
use crate::plugin::{DateSortingPlugin, Plugin, PluginContext, PluginRegistry};
use crate::server::{ServerData, ServerDataRegistry};
use crate::settings::DataTablesSettings;
use crate::table::GridTable;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_HANDLE: AtomicU64 = AtomicU64::new(0);

fn next_handle() -> String {
	format!("dt{}", NEXT_HANDLE.fetch_add(1, Ordering::Relaxed) + 1)
}

/// Collaborators a compilation registers with.
#[derive(Clone, Copy)]
pub struct CompileContext<'a> {
	/// Client assets of the current render cycle.
	pub assets: &'a AssetRegistry,
	/// Installed server-side adapters.
	pub servers: &'a ServerDataRegistry,
	/// Process settings.
	pub settings: &'a DataTablesSettings,
	/// Localized texts; [`DefaultTexts`] when `None`.
	pub texts: Option<&'a dyn TextResolver>,
}

impl<'a> CompileContext<'a> {
	/// Creates a context using the built-in texts.
	pub fn new(
		assets: &'a AssetRegistry,
		servers: &'a ServerDataRegistry,
		settings: &'a DataTablesSettings,
	) -> Self {
		Self {
			assets,
			servers,
			settings,
			texts: None,
		}
	}

	/// Resolves texts through `texts`.
	pub fn with_texts(mut self, texts: &'a dyn TextResolver) -> Self {
		self.texts = Some(texts);
		self
	}
}

/// Configuration of one grid over a structural table.
///
/// # Example
///
/// ```
/// use reinhardt_datatables::prelude::*;
///
/// let table = HtmlTable::new("users")
/// 	.column(TableColumn::new("Name").initial_sort(OrderDirection::Asc))
/// 	.column(TableColumn::new("Age").data_type(DataType::Int))
/// 	.row(TableRow::new(["Alice", "31"]));
///
/// let assets = AssetRegistry::new();
/// let servers = ServerDataRegistry::new();
/// let settings = DataTablesSettings::default();
/// let ctx = CompileContext::new(&assets, &servers, &settings);
///
/// let grid = DataTables::new(table)
/// 	.unwrap()
/// 	.with_handle("users")
/// 	.unwrap()
/// 	.compile(&ctx)
/// 	.unwrap();
///
/// assert_eq!(grid.payload().to_json()["order"], serde_json::json!([[0, "asc"]]));
/// assert!(grid.script().contains("var users = $(\"#users\").dataTable("));
/// ```
#[derive(Debug)]
pub struct DataTables<T: GridTable> {
	table: T,
	table_id: String,
	handle: String,
	columns: ColumnDefs,
	options: GridOptions,
	paging: PagingMode,
	language: LanguageConfig,
	plugins: PluginRegistry,
	diagnostics: Diagnostics,
}

impl<T: GridTable> DataTables<T> {
	/// Captures the structure of `table`.
	///
	/// Every column gets a definition built from its description; the
	/// last column carrying an initial sort hint defines the initial
	/// order. A missing header row is created from the column headers or
	/// reported.
	///
	/// # Errors
	///
	/// Returns [`DataTablesError::MissingTableId`] if the table has no id.
	pub fn new(mut table: T) -> Result<Self> {
		let table_id = table.id().to_string();
		if table_id.is_empty() {
			return Err(DataTablesError::MissingTableId);
		}

		let mut diagnostics = Diagnostics::new();
		if !table.has_header_row() && !table.ensure_header_row() {
			diagnostics.push(Diagnostic::MissingHeaderRow {
				table_id: table_id.clone(),
			});
		}

		let mut columns = ColumnDefs::new();
		let mut options = GridOptions::new();
		for (index, column) in table.columns().iter().enumerate() {
			columns.add(ColumnDef::from_table_column(index, column));
			if let Some(direction) = column.initial_sort {
				options.set_order(OrderSpec::new().add_column(index, direction));
			}
		}

		Ok(Self {
			table,
			table_id,
			handle: next_handle(),
			columns,
			options,
			paging: PagingMode::ClientSide,
			language: LanguageConfig::new(),
			plugins: PluginRegistry::new(),
			diagnostics,
		})
	}

	/// Names the grid in generated code.
	///
	/// # Errors
	///
	/// Returns [`DataTablesError::InvalidHandle`] if `handle` is not a
	/// JavaScript identifier.
	pub fn with_handle(mut self, handle: impl Into<String>) -> Result<Self> {
		let handle = handle.into();
		if !is_identifier(&handle) {
			return Err(DataTablesError::InvalidHandle(handle));
		}
		self.handle = handle;
		Ok(self)
	}

	/// Fetches pages from the server.
	pub fn server_side(mut self, config: ServerSide) -> Self {
		self.paging = PagingMode::ServerSide(config);
		self
	}

	/// Attaches a length menu; see [`GridOptions::set_length_menu`].
	pub fn length_menu(mut self, menu: LengthMenu) -> Self {
		self.options.set_length_menu(menu);
		self
	}

	/// Sets the initial order, replacing the one derived from the columns.
	pub fn order(mut self, order: OrderSpec) -> Self {
		self.options.set_order(order);
		self
	}

	/// Sets the layout.
	pub fn layout(mut self, layout: LayoutBuilder) -> Self {
		self.options.set_layout(layout);
		self
	}

	/// Sets where texts come from.
	pub fn language(mut self, language: LanguageConfig) -> Self {
		self.language = language;
		self
	}

	/// Computes footer sums on every redraw.
	pub fn footer_sums(mut self, aggregation: &FooterAggregation) -> Self {
		self.options.set_footer_callback(aggregation.to_js());
		self
	}

	/// Registers a plugin.
	///
	/// # Errors
	///
	/// Returns [`DataTablesError::DuplicatePlugin`] if a plugin with the same
	/// name is already registered.
	pub fn plugin(mut self, plugin: Arc<dyn Plugin>) -> Result<Self> {
		self.plugins.register(plugin)?;
		Ok(self)
	}

	/// Table id.
	pub fn table_id(&self) -> &str {
		&self.table_id
	}

	/// Handle naming the grid in generated code.
	pub fn handle(&self) -> &str {
		&self.handle
	}

	/// The structural table.
	pub fn table(&self) -> &T {
		&self.table
	}

	/// Column definitions.
	pub fn columns(&self) -> &ColumnDefs {
		&self.columns
	}

	/// Mutable column definitions.
	pub fn columns_mut(&mut self) -> &mut ColumnDefs {
		&mut self.columns
	}

	/// Options.
	pub fn options(&self) -> &GridOptions {
		&self.options
	}

	/// Mutable options.
	pub fn options_mut(&mut self) -> &mut GridOptions {
		&mut self.options
	}

	/// Paging mode.
	pub fn paging(&self) -> &PagingMode {
		&self.paging
	}

	/// Registered plugins.
	pub fn plugins(&self) -> &PluginRegistry {
		&self.plugins
	}

	/// Mutable plugin registry.
	pub fn plugins_mut(&mut self) -> &mut PluginRegistry {
		&mut self.plugins
	}

	/// Diagnostics raised so far.
	pub fn diagnostics(&self) -> &Diagnostics {
		&self.diagnostics
	}

	/// Compiles the grid.
	///
	/// # Errors
	///
	/// Returns [`DataTablesError::InvalidColumnTarget`] if a server-side grid
	/// has a column definition outside the table.
	pub fn compile(self, ctx: &CompileContext<'_>) -> Result<CompiledGrid<T>> {
		let Self {
			mut table,
			table_id,
			handle,
			columns,
			mut options,
			paging,
			language,
			mut plugins,
			mut diagnostics,
		} = self;
		diagnostics.extend_logged(columns.diagnostics().iter().cloned());
		let server_side = paging.is_server_side();

		if !server_side
			&& columns.has_date_time_column()
			&& !plugins.is_registered(DateSortingPlugin::NAME)
		{
			tracing::debug!(table_id = %table_id, "attaching date sorting plugin");
			plugins.register(Arc::new(DateSortingPlugin::new()))?;
		}

		let applicable = plugins.resolve_applicable(
			&PluginContext {
				table_id: &table_id,
				options: &options,
				server_side,
				settings: ctx.settings,
			},
			&mut diagnostics,
		);
		let blocks: Vec<(String, Option<JsValue>)> = applicable
			.iter()
			.map(|plugin| (plugin.name().to_string(), plugin.contribute(&mut options)))
			.collect();

		let mut payload = JsObject::new();
		options.features().write(&mut payload);
		match &paging {
			PagingMode::ServerSide(config) => {
				let data = ServerData::new(&table, &columns, config.filter)?;
				ctx.servers.register(table_id.clone(), data);
				table.remove_all_body_rows();
				payload.insert("serverSide", true);
				payload.insert(
					"ajax",
					config.ajax.to_js(&table_id, &ctx.settings.object_param),
				);
			}
			PagingMode::ClientSide => payload.insert("serverSide", false),
		}
		options.write_callbacks(&mut payload);
		let resolver: &dyn TextResolver = match ctx.texts {
			Some(texts) => texts,
			None => &DefaultTexts,
		};
		let locale = language.effective_locale();
		options.write_options(&mut payload, resolver, &locale, &mut diagnostics);
		if !columns.is_empty() {
			payload.insert("columnDefs", columns.to_js());
		}
		if let Some(block) = language.to_js(resolver) {
			payload.insert("language", block);
		}
		for (name, block) in blocks {
			if let Some(block) = block {
				payload.insert(name, block);
			}
		}

		if columns.has_any_invisible_column() {
			table.remove_columns(&columns.invisible_targets());
		}

		let post_init: Vec<String> = {
			let plugin_ctx = PluginContext {
				table_id: &table_id,
				options: &options,
				server_side,
				settings: ctx.settings,
			};
			applicable
				.iter()
				.filter_map(|plugin| plugin.post_init_code(&plugin_ctx, &handle))
				.collect()
		};

		ctx.assets.register_scripts(&ctx.settings.assets.scripts);
		ctx.assets.register_styles(&ctx.settings.assets.styles);
		for plugin in &applicable {
			plugin.register_assets(ctx.assets, ctx.settings);
		}

		tracing::debug!(
			table_id = %table_id,
			handle = %handle,
			plugins = applicable.len(),
			diagnostics = diagnostics.len(),
			"compiled grid"
		);

		Ok(CompiledGrid {
			table,
			table_id,
			handle,
			payload,
			post_init,
			diagnostics,
			on_document_ready: ctx.settings.generate_on_document_ready,
		})
	}
}

/// Result of [`DataTables::compile`].
#[derive(Debug)]
pub struct CompiledGrid<T> {
	table: T,
	table_id: String,
	handle: String,
	payload: JsObject,
	post_init: Vec<String>,
	diagnostics: Diagnostics,
	on_document_ready: bool,
}

impl<T> CompiledGrid<T> {
	/// Handle naming the grid in generated code.
	pub fn handle(&self) -> &str {
		&self.handle
	}

	/// Table id.
	pub fn table_id(&self) -> &str {
		&self.table_id
	}

	/// The wire payload.
	pub fn payload(&self) -> &JsObject {
		&self.payload
	}

	/// Plugin post-init fragments in registration order.
	pub fn post_init(&self) -> &[String] {
		&self.post_init
	}

	/// Everything reported while building and compiling.
	pub fn diagnostics(&self) -> &Diagnostics {
		&self.diagnostics
	}

	/// The table as it must be rendered.
	pub fn table(&self) -> &T {
		&self.table
	}

	/// Takes the table out.
	pub fn into_table(self) -> T {
		self.table
	}

	fn selector(&self) -> String {
		quote(&format!("#{}", self.table_id))
	}

	/// Instantiation call followed by the post-init code.
	pub fn script(&self) -> String {
		let mut code = format!(
			"var {} = $({}).dataTable({});",
			self.handle,
			self.selector(),
			self.payload.render()
		);
		for fragment in &self.post_init {
			code.push_str(fragment);
		}
		if self.on_document_ready {
			format!("$(document).ready(function(){{{code}}});")
		} else {
			code
		}
	}

	/// Clears the global and every column search and redraws.
	pub fn clear_filter_code(&self) -> String {
		format!(
			"$({}).DataTable().search(\"\").columns().search(\"\").draw();",
			self.selector()
		)
	}
}
