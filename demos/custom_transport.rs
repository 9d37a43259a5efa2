//! Demonstrates plugging a hand-written transport into the pipeline.
//!
//! 1. Implement [`HttpTransport`] for any type that can turn an [`HttpRequest`] into an
//!    [`HttpResponse`]; here a canned in-process responder.
//! 2. Register it through [`Client::builder`].
//! 3. Finalize endpoints against the client and run them with a [`Secret`].
//! 4. Observe that a signed write with an incomplete secret fails before the transport is called.

// std
use std::sync::{
	Arc,
	atomic::{AtomicUsize, Ordering},
};
// crates.io
use color_eyre::Result;
use serde_json::json;
// self
use gram_request::{
	client::Client,
	endpoint::{friendship, user},
	error::TransportError,
	http::{HttpRequest, HttpResponse, HttpTransport, TransportFuture},
	secret::{Device, Secret},
};

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let transport = CannedTransport::default();
	let client = Client::builder().transport(transport.clone()).build()?;
	let secret = Secret::new(
		"25025320",
		[("sessionid", "demo-session"), ("csrftoken", "demo-csrf")],
		Device::generate(),
	)?;
	let profile = user::summary(&client, "25025320").unlock(&secret).start().await?;

	println!("Profile served by the canned transport: {:?}.", profile.text("/user/username"));

	let status = friendship::follow(&client, "1337").unlock(&secret).start().await?;

	println!("Signed follow acknowledged: {}.", status.is_ok());

	let incomplete = secret.clone().without_cookie("csrftoken");

	match friendship::unfollow(&client, "1337").unlock(&incomplete).start().await {
		Ok(_) => println!("Unsigned write unexpectedly went through."),
		Err(e) => println!("Unfollow rejected before sending: {e}"),
	}

	println!("Requests that reached the transport: {}.", transport.calls.load(Ordering::SeqCst));

	Ok(())
}

#[derive(Clone, Debug, Default)]
struct CannedTransport {
	calls: Arc<AtomicUsize>,
}
impl HttpTransport for CannedTransport {
	fn send(&self, request: HttpRequest) -> TransportFuture<'_> {
		self.calls.fetch_add(1, Ordering::SeqCst);

		Box::pin(async move {
			let body = match request.url.path() {
				path if path.ends_with("/info") =>
					json!({ "status": "ok", "user": { "pk": 25025320, "username": "instagram" } }),
				path if path.starts_with("/api/v1/friendships/") && request.form().is_some() =>
					json!({ "status": "ok", "friendship_status": { "following": true } }),
				_ => return Ok(HttpResponse::new(404, r#"{"status":"fail","message":"not found"}"#)),
			};

			Ok::<_, TransportError>(HttpResponse::new(200, body.to_string()))
		})
	}
}
