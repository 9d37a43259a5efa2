//! Authentication anchors: descriptors bound to a not-yet-available secret.
//!
//! An [`Anchor`] pairs a [`Request`] with the label of the secret it needs and a pure transform
//! `(request, label, secret) -> request`. The transform only runs when a promise is started, so the
//! anchor itself can be built, cloned, and dropped without a credential.

// self
use crate::{
	_prelude::*,
	client::Client,
	lock::Lock,
	request::Request,
	response::Page,
	secret::Secret,
};

/// Label under which the credential is declared.
pub const SECRET_LABEL: &str = "secret";

/// Deferred, pure transform applied once the secret is available.
pub type Inject = Arc<dyn Fn(Request, &str, &Secret) -> Request + Send + Sync>;

/// A descriptor that requires a named secret before it can run.
#[derive(Clone)]
pub struct Anchor {
	request: Request,
	label: String,
	inject: Inject,
}
impl Anchor {
	/// Wraps `request` with the transform that will receive the resolved secret.
	pub fn new<F>(request: Request, label: impl Into<String>, inject: F) -> Self
	where
		F: 'static + Send + Sync + Fn(Request, &str, &Secret) -> Request,
	{
		Self { request, label: label.into(), inject: Arc::new(inject) }
	}

	/// Descriptor snapshot before injection.
	pub fn request(&self) -> &Request {
		&self.request
	}

	/// Declared secret label.
	pub fn label(&self) -> &str {
		&self.label
	}

	/// Runs the transform against `request` with `secret`.
	pub fn inject(&self, request: Request, secret: &Secret) -> Request {
		(self.inject)(request, &self.label, secret)
	}

	/// Runs the transform against the anchored descriptor.
	pub fn resolve(&self, secret: &Secret) -> Request {
		self.inject(self.request.clone(), secret)
	}

	/// Composes `next` after the current transform.
	pub fn then<F>(self, next: F) -> Self
	where
		F: 'static + Send + Sync + Fn(Request, &str, &Secret) -> Request,
	{
		let previous = self.inject;

		Self {
			request: self.request,
			label: self.label,
			inject: Arc::new(move |request: Request, label: &str, secret: &Secret| {
				next(previous(request, label, secret), label, secret)
			}),
		}
	}

	/// Applies a secret-independent edit to the anchored descriptor.
	pub fn map(mut self, edit: impl FnOnce(Request) -> Request) -> Self {
		self.request = edit(self.request);

		self
	}

	/// Binds the anchor to `client` and returns a secret-gated [`Lock`] decoding into `T`.
	pub fn finalize<T>(self, client: &Client) -> Lock<T>
	where
		T: 'static + Send + DeserializeOwned,
	{
		client.lock(self)
	}

	/// Like [`finalize`](Self::finalize), but also extracts the next cursor from `cursor_key`.
	///
	/// `cursor_key` is either a top-level field name or a JSON pointer (`/inbox/oldest_cursor`).
	pub fn finalize_page<T>(self, client: &Client, cursor_key: &'static str) -> Lock<Page<T>>
	where
		T: 'static + Send + DeserializeOwned,
	{
		client.lock_page(self, cursor_key)
	}
}
impl Debug for Anchor {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Anchor")
			.field("request", &self.request)
			.field("label", &self.label)
			.finish_non_exhaustive()
	}
}

impl Request {
	/// Anchors the descriptor to a secret named `label`.
	pub fn anchor<F>(self, label: impl Into<String>, inject: F) -> Anchor
	where
		F: 'static + Send + Sync + Fn(Request, &str, &Secret) -> Request,
	{
		Anchor::new(self, label, inject)
	}

	/// Anchors with the default secret label; the secret's own headers (cookies, device id) are
	/// merged at execution.
	pub fn authenticate(self) -> Anchor {
		self.anchor(SECRET_LABEL, |request, _, secret| request.merge_header(secret.header()))
	}

	/// Like [`authenticate`](Self::authenticate), running `extra` before the secret's headers are
	/// merged.
	pub fn authenticate_with<F>(self, extra: F) -> Anchor
	where
		F: 'static + Send + Sync + Fn(Request, &str, &Secret) -> Request,
	{
		self.anchor(SECRET_LABEL, move |request, label, secret| {
			extra(request, label, secret).merge_header(secret.header())
		})
	}

	/// Authenticates and finalizes into a [`Lock`] decoding into `T`.
	pub fn finalize<T>(self, client: &Client) -> Lock<T>
	where
		T: 'static + Send + DeserializeOwned,
	{
		self.authenticate().finalize(client)
	}

	/// Authenticates with `extra` and finalizes into a [`Lock`] decoding into `T`.
	pub fn finalize_with<T, F>(self, client: &Client, extra: F) -> Lock<T>
	where
		T: 'static + Send + DeserializeOwned,
		F: 'static + Send + Sync + Fn(Request, &str, &Secret) -> Request,
	{
		self.authenticate_with(extra).finalize(client)
	}

	/// Authenticates and finalizes into a cursor-aware [`Lock`].
	pub fn finalize_page<T>(self, client: &Client, cursor_key: &'static str) -> Lock<Page<T>>
	where
		T: 'static + Send + DeserializeOwned,
	{
		self.authenticate().finalize_page(client, cursor_key)
	}
}
