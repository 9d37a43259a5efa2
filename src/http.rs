//! Transport boundary for executing finalized requests.
//!
//! The pipeline's only dependency on an HTTP stack is [`HttpTransport`]: it receives a fully
//! formed [`HttpRequest`] (method, URL, headers, body) and resolves to an [`HttpResponse`] or a
//! [`TransportError`]. Implementations must be `Send + Sync + 'static` so a single transport can
//! be shared by every promise minted from a [`Client`](crate::client::Client), and their futures
//! must be `Send` so promises can hop executors. Retries, if any, belong to the transport.

pub mod recording;

pub use recording::*;

// std
#[cfg(feature = "reqwest")] use std::ops::Deref;
// self
use crate::{_prelude::*, error::TransportError, request::Method};

/// Boxed future returned by [`HttpTransport::send`].
pub type TransportFuture<'a> =
	Pin<Box<dyn Future<Output = Result<HttpResponse, TransportError>> + 'a + Send>>;

/// Abstraction over HTTP stacks able to execute a finalized request.
pub trait HttpTransport
where
	Self: 'static + Send + Sync,
{
	/// Sends `request` and resolves to the raw response.
	fn send(&self, request: HttpRequest) -> TransportFuture<'_>;
}

/// Fully formed request handed to the transport.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpRequest {
	/// HTTP method.
	pub method: Method,
	/// Absolute URL including the query.
	pub url: Url,
	/// Header fields in sending order.
	pub headers: Vec<(String, String)>,
	/// Encoded body, when present.
	pub body: Option<Vec<u8>>,
}
impl HttpRequest {
	/// Looks up a header value, ignoring ASCII case.
	pub fn header(&self, name: &str) -> Option<&str> {
		self.headers
			.iter()
			.find(|(key, _)| key.eq_ignore_ascii_case(name))
			.map(|(_, value)| value.as_str())
	}

	/// Decodes a form-urlencoded body back into fields.
	pub fn form(&self) -> Option<BTreeMap<String, String>> {
		self.body
			.as_deref()
			.map(|body| url::form_urlencoded::parse(body).into_owned().collect())
	}
}

/// Raw response returned by the transport.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpResponse {
	/// HTTP status code.
	pub status: u16,
	/// Undecoded body bytes.
	pub body: Vec<u8>,
}
impl HttpResponse {
	/// Creates a response from a status and body.
	pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
		Self { status, body: body.into() }
	}

	/// Whether the status is in `200..300`.
	pub fn is_success(&self) -> bool {
		(200..300).contains(&self.status)
	}
}

/// Thin wrapper around [`ReqwestClient`] so shared HTTP behavior lives in one place.
///
/// The default client enables gzip decoding because the header catalog advertises
/// `Accept-Encoding: gzip`.
#[cfg(feature = "reqwest")]
#[derive(Clone, Debug)]
pub struct ReqwestTransport(pub ReqwestClient);
#[cfg(feature = "reqwest")]
impl ReqwestTransport {
	/// Builds the default reqwest client.
	pub fn new() -> Result<Self, crate::error::ConfigError> {
		Ok(Self(ReqwestClient::builder().gzip(true).build()?))
	}

	/// Wraps an existing reqwest [`ReqwestClient`].
	pub fn with_client(client: ReqwestClient) -> Self {
		Self(client)
	}
}
#[cfg(feature = "reqwest")]
impl AsRef<ReqwestClient> for ReqwestTransport {
	fn as_ref(&self) -> &ReqwestClient {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl Deref for ReqwestTransport {
	type Target = ReqwestClient;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl HttpTransport for ReqwestTransport {
	fn send(&self, request: HttpRequest) -> TransportFuture<'_> {
		Box::pin(async move {
			let mut builder = self.0.request(request.method.into(), request.url);

			for (name, value) in &request.headers {
				builder = builder.header(name.as_str(), value.as_str());
			}
			if let Some(body) = request.body {
				builder = builder.body(body);
			}

			let response = builder.send().await?;
			let status = response.status().as_u16();
			let body = response.bytes().await?.to_vec();

			Ok(HttpResponse { status, body })
		})
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn header_lookup_ignores_case_and_form_decodes() {
		let request = HttpRequest {
			method: Method::Post,
			url: Url::parse("https://example.api/").expect("URL fixture should parse."),
			headers: vec![("Content-Type".into(), "application/x-www-form-urlencoded".into())],
			body: Some(b"a=1&b=two+words".to_vec()),
		};
		let form = request.form().expect("Form body should decode.");

		assert_eq!(request.header("content-type"), Some("application/x-www-form-urlencoded"));
		assert_eq!(form["b"], "two words");
	}

	#[test]
	fn success_range_is_2xx() {
		assert!(HttpResponse::new(204, "").is_success());
		assert!(!HttpResponse::new(302, "").is_success());
		assert!(!HttpResponse::new(429, "").is_success());
	}
}
