//! JavaScript payload values.
//!
//! The initialization payload mixes plain data with executable code
//! (ajax functions, callbacks, render functions). [`JsValue`] models both
//! so the payload can be rendered as a JavaScript object literal, and can be
//! inspected as JSON with code fragments kept as their source text.

use indexmap::IndexMap;
use serde_json::Value;
use std::fmt;

/// A fragment of JavaScript source emitted verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsCode(String);

impl JsCode {
	/// Wraps a piece of source.
	pub fn new(source: impl Into<String>) -> Self {
		Self(source.into())
	}

	/// Returns the wrapped source.
	pub fn as_str(&self) -> &str {
		&self.0
	}
}

impl fmt::Display for JsCode {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

impl From<&str> for JsCode {
	fn from(source: &str) -> Self {
		Self::new(source)
	}
}

impl From<String> for JsCode {
	fn from(source: String) -> Self {
		Self(source)
	}
}

/// A payload value.
#[derive(Debug, Clone, PartialEq)]
pub enum JsValue {
	/// Plain data.
	Json(Value),
	/// Executable code.
	Code(JsCode),
	/// Nested object which may contain code.
	Object(JsObject),
	/// Array which may contain code.
	Array(Vec<JsValue>),
}

impl JsValue {
	/// Renders the value as JavaScript source.
	pub fn render(&self) -> String {
		let mut out = String::new();
		self.render_into(&mut out);
		out
	}

	fn render_into(&self, out: &mut String) {
		match self {
			Self::Json(value) => out.push_str(&value.to_string()),
			Self::Code(code) => out.push_str(code.as_str()),
			Self::Object(object) => object.render_into(out),
			Self::Array(items) => {
				out.push('[');
				for (i, item) in items.iter().enumerate() {
					if i > 0 {
						out.push(',');
					}
					item.render_into(out);
				}
				out.push(']');
			}
		}
	}

	/// Returns the data view of the value; code becomes its source string.
	pub fn to_json(&self) -> Value {
		match self {
			Self::Json(value) => value.clone(),
			Self::Code(code) => Value::String(code.as_str().to_string()),
			Self::Object(object) => object.to_json(),
			Self::Array(items) => Value::Array(items.iter().map(Self::to_json).collect()),
		}
	}

	/// Returns the nested object, if this is one.
	pub fn as_object(&self) -> Option<&JsObject> {
		match self {
			Self::Object(object) => Some(object),
			_ => None,
		}
	}
}

impl From<Value> for JsValue {
	fn from(value: Value) -> Self {
		Self::Json(value)
	}
}

impl From<JsCode> for JsValue {
	fn from(code: JsCode) -> Self {
		Self::Code(code)
	}
}

impl From<JsObject> for JsValue {
	fn from(object: JsObject) -> Self {
		Self::Object(object)
	}
}

impl From<bool> for JsValue {
	fn from(value: bool) -> Self {
		Self::Json(Value::Bool(value))
	}
}

impl From<i64> for JsValue {
	fn from(value: i64) -> Self {
		Self::Json(Value::from(value))
	}
}

impl From<usize> for JsValue {
	fn from(value: usize) -> Self {
		Self::Json(Value::from(value))
	}
}

impl From<&str> for JsValue {
	fn from(value: &str) -> Self {
		Self::Json(Value::String(value.to_string()))
	}
}

impl From<String> for JsValue {
	fn from(value: String) -> Self {
		Self::Json(Value::String(value))
	}
}

/// An insertion-ordered JavaScript object.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JsObject {
	entries: IndexMap<String, JsValue>,
}

impl JsObject {
	/// Creates an empty object.
	pub fn new() -> Self {
		Self::default()
	}

	/// Sets a property, replacing any previous value in place.
	pub fn insert(&mut self, key: impl Into<String>, value: impl Into<JsValue>) {
		self.entries.insert(key.into(), value.into());
	}

	/// Builder form of [`insert`](Self::insert).
	pub fn with(mut self, key: impl Into<String>, value: impl Into<JsValue>) -> Self {
		self.insert(key, value);
		self
	}

	/// Returns a property.
	pub fn get(&self, key: &str) -> Option<&JsValue> {
		self.entries.get(key)
	}

	/// Returns whether a property is set.
	pub fn contains_key(&self, key: &str) -> bool {
		self.entries.contains_key(key)
	}

	/// Removes a property keeping the order of the others.
	pub fn remove(&mut self, key: &str) -> Option<JsValue> {
		self.entries.shift_remove(key)
	}

	/// Property names in insertion order.
	pub fn keys(&self) -> impl Iterator<Item = &str> {
		self.entries.keys().map(String::as_str)
	}

	/// Number of properties.
	pub fn len(&self) -> usize {
		self.entries.len()
	}

	/// Returns whether no property is set.
	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// Renders the object as a JavaScript object literal.
	pub fn render(&self) -> String {
		let mut out = String::new();
		self.render_into(&mut out);
		out
	}

	fn render_into(&self, out: &mut String) {
		out.push('{');
		for (i, (key, value)) in self.entries.iter().enumerate() {
			if i > 0 {
				out.push(',');
			}
			out.push_str(&Value::String(key.clone()).to_string());
			out.push(':');
			value.render_into(out);
		}
		out.push('}');
	}

	/// Returns the data view of the object.
	pub fn to_json(&self) -> Value {
		let map = self
			.entries
			.iter()
			.map(|(key, value)| (key.clone(), value.to_json()))
			.collect::<serde_json::Map<_, _>>();
		Value::Object(map)
	}
}

/// Returns whether `name` is a valid JavaScript identifier.
pub fn is_identifier(name: &str) -> bool {
	let mut chars = name.chars();
	match chars.next() {
		Some(c) if c.is_alphabetic() || c == '_' || c == '$' => {}
		_ => return false,
	}
	chars.all(|c| c.is_alphanumeric() || c == '_' || c == '$')
}

/// Quotes a string as a JavaScript string literal.
pub fn quote(text: &str) -> String {
	Value::String(text.to_string()).to_string()
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use serde_json::json;

	#[rstest]
	fn test_render_mixes_code_and_data() {
		let object = JsObject::new()
			.with("paging", false)
			.with("ajax", JsCode::new("function(d,cb){cb(d);}"))
			.with("order", JsValue::Json(json!([[0, "asc"]])));

		assert_eq!(
			object.render(),
			r#"{"paging":false,"ajax":function(d,cb){cb(d);},"order":[[0,"asc"]]}"#
		);
	}

	#[rstest]
	fn test_to_json_keeps_code_as_source() {
		let object = JsObject::new().with("render", JsCode::new("f"));

		assert_eq!(object.to_json(), json!({"render": "f"}));
	}

	#[rstest]
	fn test_insert_keeps_position() {
		let mut object = JsObject::new().with("a", 1i64).with("b", 2i64);
		object.insert("a", 3i64);

		assert_eq!(object.keys().collect::<Vec<_>>(), vec!["a", "b"]);
	}

	#[rstest]
	#[case("dt1", true)]
	#[case("_grid$", true)]
	#[case("1dt", false)]
	#[case("my-grid", false)]
	#[case("", false)]
	fn test_is_identifier(#[case] name: &str, #[case] expected: bool) {
		assert_eq!(is_identifier(name), expected);
	}
}
