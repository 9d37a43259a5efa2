//! Execution context shared by every lock minted from the same configuration.
//!
//! A [`Client`] bundles the transport, the entropy source, the signer, and the base descriptors.
//! Descriptors stay inert until they are finalized against a client; the resulting [`Lock`] owns a
//! cheap clone of the client, so locks and promises can outlive the scope that built them.

mod builder;

pub use builder::*;

// crates.io
use serde_json::Value;
// self
use crate::{
	_prelude::*,
	anchor::Anchor,
	entropy::Entropy,
	error::DecodeError,
	http::{HttpRequest, HttpResponse, HttpTransport},
	lock::Lock,
	obs::{self, CallKind, CallOutcome, CallSpan},
	promise::DelayedPromise,
	request::Request,
	response::{self, Page},
	secret::Secret,
	sign::Signer,
};

/// Host of the private mobile API.
pub const DEFAULT_API_BASE: &str = "https://i.instagram.com";
/// Host of the public web frontend.
pub const DEFAULT_GENERIC_BASE: &str = "https://www.instagram.com";
/// Path prefix of versioned API calls.
pub const VERSION1_PATH: &str = "api/v1";
/// Content type attached to every request carrying a body.
pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded; charset=UTF-8";

/// Shared execution context; cloning is cheap.
#[derive(Clone)]
pub struct Client(Arc<ClientInner>);
impl Client {
	/// Starts a [`ClientBuilder`].
	pub fn builder() -> ClientBuilder {
		ClientBuilder::default()
	}

	/// Builds a client with the default reqwest transport and platform defaults.
	#[cfg(feature = "reqwest")]
	pub fn new() -> Result<Self, crate::error::ConfigError> {
		Self::builder().build()
	}

	/// Base descriptor of the private API host.
	pub fn api(&self) -> Request {
		self.0.api.clone()
	}

	/// Base descriptor of versioned API calls (`<api>/api/v1`).
	pub fn version1(&self) -> Request {
		self.api().append_path(VERSION1_PATH)
	}

	/// Base descriptor of the web frontend.
	pub fn generic(&self) -> Request {
		self.0.generic.clone()
	}

	/// Signer applied to mutating calls.
	pub fn signer(&self) -> &Signer {
		&self.0.signer
	}

	/// Clock and randomness source for volatile fields.
	pub fn entropy(&self) -> &dyn Entropy {
		self.0.entropy.as_ref()
	}

	/// Gates `anchor` behind a secret, decoding responses into `T`.
	pub fn lock<T>(&self, anchor: Anchor) -> Lock<T>
	where
		T: 'static + Send + DeserializeOwned,
	{
		let client = self.clone();
		let anchor = Arc::new(anchor);

		Lock::new(move |secret| client.promise(Arc::clone(&anchor), secret).and_then(decode_as::<T>))
	}

	/// Like [`lock`](Self::lock), also extracting the next cursor found at `cursor_key`.
	pub fn lock_page<T>(&self, anchor: Anchor, cursor_key: &'static str) -> Lock<Page<T>>
	where
		T: 'static + Send + DeserializeOwned,
	{
		let client = self.clone();
		let anchor = Arc::new(anchor);

		Lock::new(move |secret| {
			client.promise(Arc::clone(&anchor), secret).and_then(move |value| {
				let next_cursor = response::cursor_at(&value, cursor_key);

				Ok(Page { value: decode_as(value)?, next_cursor })
			})
		})
	}

	/// Finalizes `anchor` for `secret` into the exact request the transport would receive.
	///
	/// Runs the default header injection, the anchor's transform, and signing. Volatile fields are
	/// drawn from the entropy source on every call.
	pub fn prepare(&self, anchor: &Anchor, secret: &Secret) -> Result<HttpRequest> {
		let request =
			anchor.inject(anchor.request().clone().with_default_headers(self.entropy()), secret);
		let request = if request.is_signed() {
			let signed = self.0.signer.sign(&request.body().cloned().unwrap_or_default(), secret)?;

			request.replace_body(signed.into_iter().map(|(key, value)| (key, Some(value))))
		} else {
			request
		};
		let body = request.encoded_body();
		let mut headers = request
			.headers()
			.iter()
			.map(|(name, value)| (name.to_owned(), value.to_owned()))
			.collect::<Vec<_>>();

		if body.is_some() && !headers.iter().any(|(name, _)| name.eq_ignore_ascii_case("content-type"))
		{
			headers.push(("Content-Type".into(), FORM_CONTENT_TYPE.into()));
		}

		Ok(HttpRequest {
			method: request.method(),
			url: request.url(),
			headers,
			body: body.map(String::into_bytes),
		})
	}

	fn promise(&self, anchor: Arc<Anchor>, secret: Secret) -> DelayedPromise<Value> {
		let client = self.clone();
		let secret = Arc::new(secret);

		DelayedPromise::new(move || {
			let client = client.clone();
			let anchor = Arc::clone(&anchor);
			let secret = Arc::clone(&secret);

			async move { client.execute(&anchor, &secret).await }
		})
	}

	async fn execute(&self, anchor: &Anchor, secret: &Secret) -> Result<Value> {
		let snapshot = anchor.request();
		let kind = CallKind::classify(snapshot.method(), snapshot.is_signed());
		let span = CallSpan::new(kind, snapshot.method(), snapshot.url().path());

		let method = snapshot.method();

		obs::record_call_outcome(kind, method, CallOutcome::Attempt);

		let result = span.instrument(self.send(anchor, secret)).await;

		match &result {
			Ok(_) => obs::record_call_outcome(kind, method, CallOutcome::Success),
			Err(e) => {
				obs::record_call_outcome(kind, method, CallOutcome::Failure);
				obs::record_call_failure(kind, e);
			},
		}

		result
	}

	async fn send(&self, anchor: &Anchor, secret: &Secret) -> Result<Value> {
		let request = self.prepare(anchor, secret)?;
		let response = self.0.transport.send(request).await?;

		decode_value(response)
	}
}
impl Debug for Client {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Client")
			.field("api", self.0.api.base())
			.field("generic", self.0.generic.base())
			.field("signer", &self.0.signer)
			.finish_non_exhaustive()
	}
}

struct ClientInner {
	transport: Arc<dyn HttpTransport>,
	entropy: Arc<dyn Entropy>,
	signer: Signer,
	api: Request,
	generic: Request,
}

fn decode_value(response: HttpResponse) -> Result<Value> {
	let HttpResponse { status, body } = response;

	if body.iter().all(u8::is_ascii_whitespace) {
		return if (200..300).contains(&status) {
			Ok(Value::Null)
		} else {
			Err(Error::Api { status, message: None })
		};
	}

	let value = serde_json::from_slice::<Value>(&body);

	if !(200..300).contains(&status) {
		let message = value.ok().and_then(|value| {
			value.get("message").and_then(Value::as_str).map(str::to_owned)
		});

		return Err(Error::Api { status, message });
	}

	value.map_err(|source| DecodeError::Json { source, status }.into())
}

fn decode_as<T>(value: Value) -> Result<T>
where
	T: DeserializeOwned,
{
	serde_path_to_error::deserialize(value).map_err(|source| DecodeError::Shape { source }.into())
}
