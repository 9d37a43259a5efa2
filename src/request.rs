//! Immutable request descriptors and their composition operators.
//!
//! A [`Request`] describes an HTTP call (base URL, path, query, headers, body, method) without
//! performing it. Every operator consumes the descriptor and returns a new one, so partially built
//! descriptors can be cloned and reused freely before any credential exists. Entries supplied as
//! `None` remove the key instead of being serialized, which keeps `null`/empty artifacts out of
//! the wire form.

pub mod header;
pub mod method;

pub use header::*;
pub use method::*;

// self
use crate::{_prelude::*, error::CompositionError};

/// Ordered string map used for query, header, and body fields.
pub type Fields = BTreeMap<String, String>;

/// Immutable description of an HTTP call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Request {
	base: Url,
	path: Vec<String>,
	query: Fields,
	headers: Fields,
	body: Option<Fields>,
	method: Option<Method>,
	signed: bool,
}
impl Request {
	/// Parses `base` and creates an empty descriptor rooted at it.
	pub fn new(base: impl AsRef<str>) -> Result<Self, CompositionError> {
		let raw = base.as_ref();
		let url = Url::parse(raw)
			.map_err(|source| CompositionError::InvalidBase { base: raw.to_owned(), source })?;

		Self::from_url(url)
	}

	/// Creates an empty descriptor rooted at an already parsed URL.
	pub fn from_url(base: Url) -> Result<Self, CompositionError> {
		if base.cannot_be_a_base() {
			return Err(CompositionError::CannotBeABase { base: base.into() });
		}

		Ok(Self {
			base,
			path: Vec::new(),
			query: Fields::new(),
			headers: Fields::new(),
			body: None,
			method: None,
			signed: false,
		})
	}

	/// Base URL the path is appended to.
	pub fn base(&self) -> &Url {
		&self.base
	}

	/// Path segments appended so far. A trailing empty segment encodes a trailing slash.
	pub fn path_segments(&self) -> &[String] {
		&self.path
	}

	/// Query fields.
	pub fn query(&self) -> &Fields {
		&self.query
	}

	/// Header fields.
	pub fn headers(&self) -> &Fields {
		&self.headers
	}

	/// Body fields; `None` means a body-less call.
	pub fn body(&self) -> Option<&Fields> {
		self.body.as_ref()
	}

	/// Whether the body must be signed before it reaches the transport.
	pub fn is_signed(&self) -> bool {
		self.signed
	}

	/// Resolved method: the explicit one, otherwise `POST` when a body exists and `GET` when not.
	pub fn method(&self) -> Method {
		self.method.unwrap_or(if self.body.is_some() { Method::Post } else { Method::Get })
	}

	/// Appends `/`-separated path segments.
	///
	/// Empty segments are skipped; a trailing `/` is preserved so `info/` and `info` stay distinct.
	pub fn append_path(mut self, path: impl AsRef<str>) -> Self {
		let path = path.as_ref();

		if path.is_empty() {
			return self;
		}
		if self.path.last().is_some_and(String::is_empty) {
			self.path.pop();
		}

		self.path.extend(path.split('/').filter(|segment| !segment.is_empty()).map(str::to_owned));

		if path.ends_with('/') {
			self.path.push(String::new());
		}

		self
	}

	/// Merges query fields key-wise; `None` removes the key.
	pub fn merge_query<I, K, V>(mut self, entries: I) -> Self
	where
		I: IntoIterator<Item = (K, Option<V>)>,
		K: Into<String>,
		V: Into<String>,
	{
		merge_fields(&mut self.query, entries);

		self
	}

	/// Replaces every query field with `entries`.
	pub fn replace_query<I, K, V>(mut self, entries: I) -> Self
	where
		I: IntoIterator<Item = (K, Option<V>)>,
		K: Into<String>,
		V: Into<String>,
	{
		self.query.clear();

		self.merge_query(entries)
	}

	/// Sets or removes a single query field.
	pub fn query_value<K, V>(self, key: K, value: Option<V>) -> Self
	where
		K: Into<String>,
		V: Into<String>,
	{
		self.merge_query([(key, value)])
	}

	/// Merges header fields key-wise; `None` removes the key.
	pub fn merge_header<I, K, V>(mut self, entries: I) -> Self
	where
		I: IntoIterator<Item = (K, Option<V>)>,
		K: Into<String>,
		V: Into<String>,
	{
		merge_fields(&mut self.headers, entries);

		self
	}

	/// Replaces every header field with `entries`.
	pub fn replace_header<I, K, V>(mut self, entries: I) -> Self
	where
		I: IntoIterator<Item = (K, Option<V>)>,
		K: Into<String>,
		V: Into<String>,
	{
		self.headers.clear();

		self.merge_header(entries)
	}

	/// Sets or removes a single header field.
	pub fn header_value<K, V>(self, key: K, value: Option<V>) -> Self
	where
		K: Into<String>,
		V: Into<String>,
	{
		self.merge_header([(key, value)])
	}

	/// Merges body fields key-wise; `None` removes the key.
	///
	/// The body is only created when at least one value is inserted, so removals never turn a
	/// body-less call into a form post.
	pub fn merge_body<I, K, V>(mut self, entries: I) -> Self
	where
		I: IntoIterator<Item = (K, Option<V>)>,
		K: Into<String>,
		V: Into<String>,
	{
		let entries = entries
			.into_iter()
			.map(|(key, value)| (key.into(), value.map(Into::into)))
			.collect::<Vec<(String, Option<String>)>>();

		if self.body.is_none() && entries.iter().all(|(_, value)| value.is_none()) {
			return self;
		}

		merge_fields(self.body.get_or_insert_with(Fields::new), entries);

		self
	}

	/// Replaces the body with `entries`.
	pub fn replace_body<I, K, V>(mut self, entries: I) -> Self
	where
		I: IntoIterator<Item = (K, Option<V>)>,
		K: Into<String>,
		V: Into<String>,
	{
		self.body = Some(Fields::new());

		self.merge_body(entries)
	}

	/// Sets or removes a single body field.
	pub fn body_value<K, V>(self, key: K, value: Option<V>) -> Self
	where
		K: Into<String>,
		V: Into<String>,
	{
		self.merge_body([(key, value)])
	}

	/// Drops the body entirely, turning the call back into a body-less one.
	pub fn clear_body(mut self) -> Self {
		self.body = None;
		self.signed = false;

		self
	}

	/// Pins the HTTP method.
	pub fn with_method(mut self, method: Method) -> Self {
		self.method = Some(method);

		self
	}

	/// Marks the call as mutating: merges `entries` into the body and requires the body to be
	/// signed with the caller's secret at execution time.
	pub fn signing<I, K, V>(mut self, entries: I) -> Self
	where
		I: IntoIterator<Item = (K, Option<V>)>,
		K: Into<String>,
		V: Into<String>,
	{
		self.signed = true;

		self.merge_body(entries).with_method(Method::Post)
	}

	/// Composes two descriptors.
	///
	/// The base URL comes from `self`; `other`'s path is appended; query, header, and body fields
	/// are merged key-wise with `other` winning on conflicts. `other`'s explicit method wins and a
	/// signed side keeps the result signed.
	pub fn merge(mut self, other: Request) -> Self {
		if self.path.last().is_some_and(String::is_empty) && !other.path.is_empty() {
			self.path.pop();
		}

		self.path.extend(other.path);
		self.query.extend(other.query);
		self.headers.extend(other.headers);

		if let Some(body) = other.body {
			self.body.get_or_insert_with(Fields::new).extend(body);
		}

		self.method = other.method.or(self.method);
		self.signed |= other.signed;

		self
	}

	/// Renders the full URL, query included.
	pub fn url(&self) -> Url {
		let mut url = self.base.clone();

		if !self.path.is_empty() {
			// `from_url` rejects cannot-be-a-base URLs, so segments are always available.
			if let Ok(mut segments) = url.path_segments_mut() {
				segments.pop_if_empty().extend(&self.path);
			}
		}
		if !self.query.is_empty() {
			url.query_pairs_mut().extend_pairs(&self.query);
		}

		url
	}

	/// Renders the body as `application/x-www-form-urlencoded`, if there is one.
	pub fn encoded_body(&self) -> Option<String> {
		self.body.as_ref().map(|body| {
			url::form_urlencoded::Serializer::new(String::new()).extend_pairs(body).finish()
		})
	}
}

fn merge_fields<I, K, V>(fields: &mut Fields, entries: I)
where
	I: IntoIterator<Item = (K, Option<V>)>,
	K: Into<String>,
	V: Into<String>,
{
	for (key, value) in entries {
		let key = key.into();

		match value {
			Some(value) => {
				fields.insert(key, value.into());
			},
			None => {
				fields.remove(&key);
			},
		}
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	fn base() -> Request {
		Request::new("https://example.api").expect("Base URL fixture should parse.")
	}

	#[test]
	fn rejects_unusable_bases() {
		assert!(matches!(Request::new("not a url"), Err(CompositionError::InvalidBase { .. })));
		assert!(matches!(
			Request::new("mailto:someone@example.com"),
			Err(CompositionError::CannotBeABase { .. })
		));
	}

	#[test]
	fn path_appends_keep_trailing_slash_semantics() {
		let request = base().append_path("users/42/info");

		assert_eq!(request.url().as_str(), "https://example.api/users/42/info");

		let request = base().append_path("/api/v1").append_path("friendships/").append_path("42/");

		assert_eq!(request.url().as_str(), "https://example.api/api/v1/friendships/42/");
		assert_eq!(base().url().as_str(), "https://example.api/");
	}

	#[test]
	fn composition_never_mutates_the_original() {
		let original = base().query_value("a", Some("1"));
		let derived = original.clone().query_value("b", Some("2")).append_path("x");

		assert_eq!(original.query().len(), 1);
		assert!(original.path_segments().is_empty());
		assert_eq!(derived.query().len(), 2);
	}

	#[test]
	fn none_values_remove_keys_from_the_wire_form() {
		let request = base()
			.merge_query([("keep", Some("1")), ("drop", Some("2"))])
			.merge_query([("drop", None::<&str>)])
			.merge_header([("X-Keep", Some("yes")), ("X-Drop", None)])
			.merge_body([("field", Some("value")), ("missing", None)]);

		assert_eq!(request.url().as_str(), "https://example.api/?keep=1");
		assert!(!request.headers().contains_key("X-Drop"));
		assert_eq!(request.encoded_body().as_deref(), Some("field=value"));
	}

	#[test]
	fn removing_body_keys_keeps_body_less_calls_untouched() {
		let original = base().append_path("users/42/info");
		let removed =
			original.clone().body_value("k", None::<&str>).merge_body([("x", None::<&str>)]);

		assert_eq!(removed, original);
		assert_eq!(removed.method(), Method::Get);
		assert!(removed.encoded_body().is_none());

		let emptied = base().body_value("k", Some("v")).body_value("k", None::<&str>);

		assert_eq!(emptied.body().map(|body| body.len()), Some(0));
		assert_eq!(emptied.method(), Method::Post);
	}

	#[test]
	fn merge_of_disjoint_descriptors_is_a_commutative_union() {
		let left = base().merge_query([("a", Some("1"))]).merge_header([("H-A", Some("x"))]);
		let right = base().merge_query([("b", Some("2"))]).merge_body([("c", Some("3"))]);
		let lr = left.clone().merge(right.clone());
		let rl = right.merge(left);

		assert_eq!(lr.query(), rl.query());
		assert_eq!(lr.headers(), rl.headers());
		assert_eq!(lr.body(), rl.body());
		assert_eq!(lr.query().len(), 2);
		assert_eq!(lr.headers().get("H-A").map(String::as_str), Some("x"));
		assert_eq!(lr.body().and_then(|body| body.get("c")).map(String::as_str), Some("3"));
	}

	#[test]
	fn merge_overrides_only_shared_keys() {
		let merged = base()
			.merge_query([("shared", Some("old")), ("left", Some("l"))])
			.merge(base().merge_query([("shared", Some("new"))]));

		assert_eq!(merged.query().get("shared").map(String::as_str), Some("new"));
		assert_eq!(merged.query().get("left").map(String::as_str), Some("l"));
	}

	#[test]
	fn method_follows_body_unless_pinned() {
		assert_eq!(base().method(), Method::Get);
		assert_eq!(base().body_value("k", Some("v")).method(), Method::Post);
		assert_eq!(base().body_value("k", Some("v")).with_method(Method::Get).method(), Method::Get);
		assert_eq!(base().with_method(Method::Post).method(), Method::Post);
	}

	#[test]
	fn signing_marks_mutating_calls() {
		let request = base().signing([("user_id", Some("42"))]);

		assert!(request.is_signed());
		assert_eq!(request.method(), Method::Post);
		assert!(!request.clear_body().is_signed());
	}
}
