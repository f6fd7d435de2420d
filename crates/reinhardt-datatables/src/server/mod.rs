//! Server-side data protocol.
//!
//! A server-side grid snapshots its table into a [`ServerData`] at compile
//! time and installs it in a [`ServerDataRegistry`] under the table id. The
//! transport layer decodes the runtime's [`DrawRequest`]s and lets the
//! registry answer them with a [`DrawResponse`]:
//!
//! 1. rows are sorted by the requested order (cached until it changes),
//! 2. filtered by the global and column-specific search terms,
//! 3. and paged by `start` / `length`.
//!
//! Compiling the same table again replaces the adapter. Requests issued
//! against a [`ServerDataLease`] of the replaced adapter fail with
//! [`ServerDataError::Stale`].

pub mod data;
pub mod registry;
pub mod request;

pub use data::{ServerColumn, ServerData};
pub use registry::{ServerDataLease, ServerDataRegistry};
pub use request::{DrawRequest, DrawResponse, RequestColumn, RequestOrder, Search};

use thiserror::Error;

/// Errors of the server-side request path.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ServerDataError {
	/// No adapter is installed for the table.
	#[error("no such data tables ID: {0}")]
	NotFound(String),

	/// The adapter was replaced after the request was issued.
	#[error("server-side data of '{table_id}' generation {generation} was replaced")]
	Stale {
		/// Table id.
		table_id: String,
		/// Generation the request was pinned to.
		generation: u64,
	},

	/// The request body names no table.
	#[error("request parameter '{0}' naming the table is missing")]
	MissingObjectParam(String),

	/// The request body could not be decoded.
	#[error("invalid draw request: {0}")]
	InvalidRequest(#[from] serde_json::Error),
}
