//! DataTables grid configuration for Reinhardt
//!
//! This crate compiles a declarative description of a DataTables grid
//! (columns, ordering, paging, layout, plugins and localized texts) into the
//! initialization payload of the browser-side runtime, together with the
//! post-init code of its plugins and the handle naming the grid.
//!
//! # Features
//!
//! - **Column Definitions**: Per-column visibility, ordering, searching, width and data type
//! - **Layout Builder**: Token builder for the `dom` layout mini-language with group balance tracking
//! - **Plugins**: Named, ordered extensions with applicability checks (buttons, scroller, date sorting)
//! - **Server-Side Paging**: In-memory adapter answering draw requests, registered per table id
//! - **Footer Sums**: Generated footer callbacks with page and grand totals
//! - **Localization**: Inline text bundles or externally loaded texts per locale
//!
//! # Architecture
//!
//! ```mermaid
//! graph TD
//!     A[GridTable] --> B[DataTables]
//!     C[ColumnDefs] --> B
//!     D[GridOptions] --> B
//!     E[PluginRegistry] --> B
//!     F[PagingMode] --> B
//!     B --> G[CompiledGrid]
//!     B --> H[ServerDataRegistry]
//!     B --> I[AssetRegistry]
//!     H --> J[DrawResponse]
//! ```
//!
//! # Example
//!
//! ```rust
//! use reinhardt_datatables::prelude::*;
//!
//! let table = HtmlTable::new("orders")
//! 	.column(TableColumn::new("Customer"))
//! 	.column(TableColumn::new("Internal").visible(false))
//! 	.column(TableColumn::new("Amount").data_type(DataType::Double))
//! 	.row(TableRow::new(["ACME", "x-1", "10.50"]));
//!
//! let assets = AssetRegistry::new();
//! let servers = ServerDataRegistry::new();
//! let settings = DataTablesSettings::default();
//!
//! let grid = DataTables::new(table)
//! 	.unwrap()
//! 	.length_menu(LengthMenu::from_sizes([25, 50]).unwrap().with_all())
//! 	.server_side(ServerSide::new(AjaxSource::new("/datatables")))
//! 	.compile(&CompileContext::new(&assets, &servers, &settings))
//! 	.unwrap();
//!
//! assert_eq!(grid.payload().to_json()["pageLength"], 25);
//! assert!(grid.table().body_rows().is_empty());
//! assert_eq!(grid.table().column_count(), 2);
//! assert_eq!(servers.get("orders").unwrap().column_count(), 3);
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::broken_intra_doc_links)]

pub mod assets;
pub mod column;
pub mod compiler;
pub mod diagnostics;
pub mod error;
pub mod footer;
pub mod js;
pub mod language;
pub mod layout;
pub mod length_menu;
pub mod options;
pub mod order;
pub mod paging;
pub mod plugin;
pub mod server;
pub mod settings;
pub mod table;

// Re-exports for convenience
pub use assets::{Asset, AssetKind, AssetRegistry};
pub use column::{CellType, ColumnData, ColumnDef, ColumnDefs, DataType};
pub use compiler::{CompileContext, CompiledGrid, DataTables};
pub use diagnostics::{Diagnostic, Diagnostics};
pub use error::{DataTablesError, Result};
pub use footer::{FooterAggregation, FooterSum, Normalizer, SumFormat};
pub use js::{JsCode, JsObject, JsValue};
pub use language::{DefaultTexts, LanguageConfig, TextKey, TextResolver};
pub use layout::{LayoutBuilder, LayoutToken, Region};
pub use length_menu::{LengthMenu, LengthMenuItem};
pub use options::{Features, GridOptions};
pub use order::{OrderDirection, OrderSpec};
pub use paging::{AjaxSource, FilterSemantics, PagingMode, ServerSide};
pub use plugin::{Plugin, PluginContext, PluginRegistry};
pub use server::{DrawRequest, DrawResponse, ServerData, ServerDataError, ServerDataRegistry};
pub use settings::DataTablesSettings;
pub use table::{GridTable, HtmlTable, TableColumn, TableRow};

/// Commonly used types.
pub mod prelude {
	pub use crate::assets::AssetRegistry;
	pub use crate::column::{ColumnDef, DataType};
	pub use crate::compiler::{CompileContext, CompiledGrid, DataTables};
	pub use crate::error::{DataTablesError, Result};
	pub use crate::footer::{FooterAggregation, FooterSum, Normalizer, SumFormat};
	pub use crate::language::LanguageConfig;
	pub use crate::layout::{LayoutBuilder, Region};
	pub use crate::length_menu::{LengthMenu, LengthMenuItem};
	pub use crate::order::{OrderDirection, OrderSpec};
	pub use crate::paging::{AjaxSource, FilterSemantics, ServerSide};
	pub use crate::plugin::{ButtonsPlugin, DateSortingPlugin, Plugin, ScrollerPlugin};
	pub use crate::server::{DrawRequest, ServerDataRegistry};
	pub use crate::settings::DataTablesSettings;
	pub use crate::table::{GridTable, HtmlTable, TableColumn, TableRow};
}
