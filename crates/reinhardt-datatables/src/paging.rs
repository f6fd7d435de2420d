//! Client-side vs. server-side data retrieval.
//!
//! The paging mode is fixed when a grid is built. In server-side mode the
//! payload carries an ajax function that posts the runtime's request to
//! the configured endpoint, tagged with the table id so the endpoint can
//! find the installed [`ServerData`](crate::server::ServerData).

use crate::js::{JsCode, JsObject, JsValue, quote};

/// How whitespace-separated search terms combine against a row.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum FilterSemantics {
	/// A row matches when any term matches any searchable cell.
	#[default]
	AnyTermPerRow,
	/// A row matches when every term matches some searchable cell.
	AllTermsPerRow,
}

/// Endpoint answering server-side draw requests.
#[derive(Debug, Clone, PartialEq)]
pub struct AjaxSource {
	url: String,
	extra: JsObject,
}

impl AjaxSource {
	/// Creates a source posting to `url`.
	pub fn new(url: impl Into<String>) -> Self {
		Self {
			url: url.into(),
			extra: JsObject::new(),
		}
	}

	/// Adds a parameter sent with every request.
	pub fn param(mut self, name: impl Into<String>, value: impl Into<JsValue>) -> Self {
		self.extra.insert(name, value);
		self
	}

	/// Endpoint URL.
	pub fn url(&self) -> &str {
		&self.url
	}

	/// Builds the runtime `ajax` function.
	///
	/// The request of the runtime is merged with the extra parameters and
	/// `{object_param: table_id}` and posted as JSON; the parsed response is
	/// handed back to the runtime.
	pub fn to_js(&self, table_id: &str, object_param: &str) -> JsCode {
		let mut extra = self.extra.clone();
		extra.insert(object_param, table_id);
		JsCode::new(format!(
			"function(data,callback,settings){{$.ajax({{url:{url},type:\"POST\",contentType:\"application/json\",dataType:\"json\",data:JSON.stringify($.extend(data,{extra})),success:function(response){{callback(response);}}}});}}",
			url = quote(&self.url),
			extra = extra.render(),
		))
	}
}

/// Server-side configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct ServerSide {
	/// Request endpoint.
	pub ajax: AjaxSource,
	/// Term combination used by the installed adapter.
	pub filter: FilterSemantics,
}

impl ServerSide {
	/// Server-side paging against `ajax` with any-term filtering.
	pub fn new(ajax: AjaxSource) -> Self {
		Self {
			ajax,
			filter: FilterSemantics::default(),
		}
	}

	/// Sets the filter semantics.
	pub fn filter(mut self, filter: FilterSemantics) -> Self {
		self.filter = filter;
		self
	}
}

/// Data retrieval mode of a grid.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum PagingMode {
	/// All data is part of the table.
	#[default]
	ClientSide,
	/// Pages are fetched from the server.
	ServerSide(ServerSide),
}

impl PagingMode {
	/// Returns whether pages are fetched from the server.
	pub fn is_server_side(&self) -> bool {
		matches!(self, Self::ServerSide(_))
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn test_ajax_function_tags_table() {
		let code = AjaxSource::new("/ajax/datatables")
			.param("locale", "de")
			.to_js("users", "object");

		let source = code.as_str();
		assert!(source.starts_with("function(data,callback,settings){$.ajax({url:\"/ajax/datatables\""));
		assert!(source.contains("contentType:\"application/json\""));
		assert!(source.contains("$.extend(data,{\"locale\":\"de\",\"object\":\"users\"})"));
		assert!(source.ends_with("callback(response);}});}"));
	}

	#[rstest]
	fn test_default_mode() {
		assert!(!PagingMode::default().is_server_side());
	}
}
