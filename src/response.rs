//! Generic response containers for endpoints without a stronger-typed model.

// std
use std::ops::Deref;
// crates.io
use serde_json::Value;
// self
use crate::_prelude::*;

/// Semi-structured JSON response.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Wrapper(pub Value);
impl Wrapper {
	/// Looks up a top-level field or, when `key` starts with `/`, a JSON pointer.
	pub fn get(&self, key: &str) -> Option<&Value> {
		lookup(&self.0, key)
	}

	/// Like [`get`](Self::get), rendering strings and numbers as text.
	pub fn text(&self, key: &str) -> Option<String> {
		self.get(key).and_then(scalar_text)
	}

	/// The platform's `status` field.
	pub fn status(&self) -> Option<&str> {
		self.0.get("status").and_then(Value::as_str)
	}

	/// Returns the inner value.
	pub fn into_inner(self) -> Value {
		self.0
	}
}
impl Deref for Wrapper {
	type Target = Value;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}
impl From<Value> for Wrapper {
	fn from(value: Value) -> Self {
		Self(value)
	}
}

/// Minimal acknowledgement returned by write endpoints.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Status {
	/// `ok` on success, `fail` otherwise.
	pub status: String,
	/// Optional human-readable explanation.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub message: Option<String>,
}
impl Status {
	/// Whether the platform reported success.
	pub fn is_ok(&self) -> bool {
		self.status == "ok"
	}
}

/// One page of a cursor-driven sequence.
#[derive(Clone, Debug, PartialEq)]
pub struct Page<T> {
	/// Decoded page content.
	pub value: T,
	/// Cursor for the next page; `None` ends the sequence.
	pub next_cursor: Option<String>,
}
impl<T> Page<T> {
	/// Maps the decoded content, keeping the cursor.
	pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Page<U> {
		Page { value: f(self.value), next_cursor: self.next_cursor }
	}
}

/// Extracts a cursor at `key` (field name or JSON pointer).
///
/// Strings and numbers count as cursors; `null`, empty strings, `false`, and anything else end
/// the sequence.
pub fn cursor_at(value: &Value, key: &str) -> Option<String> {
	lookup(value, key).and_then(scalar_text).filter(|cursor| !cursor.is_empty())
}

fn lookup<'a>(value: &'a Value, key: &str) -> Option<&'a Value> {
	if key.starts_with('/') { value.pointer(key) } else { value.get(key) }
}

fn scalar_text(value: &Value) -> Option<String> {
	match value {
		Value::String(text) => Some(text.clone()),
		Value::Number(number) => Some(number.to_string()),
		_ => None,
	}
}
