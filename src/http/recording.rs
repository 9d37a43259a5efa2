//! In-memory transport that replays scripted responses and records every request it sees.
//!
//! Useful for offline demos and for asserting on the exact wire shape a promise produces without
//! standing up an HTTP server.

// std
use std::collections::VecDeque;
// self
use crate::{
	_prelude::*,
	error::TransportError,
	http::{HttpRequest, HttpResponse, HttpTransport, TransportFuture},
};

/// Network failure produced by a scripted [`RecordingTransport`] step.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
#[error("Scripted network failure: {0}.")]
pub struct ScriptedFailure(pub String);

#[derive(Debug)]
enum Scripted {
	Respond(HttpResponse),
	Fail(String),
}

#[derive(Debug, Default)]
struct RecordingState {
	script: VecDeque<Scripted>,
	requests: Vec<HttpRequest>,
}

/// Transport that answers from a FIFO script and keeps a log of requests.
///
/// Once the script runs dry every call answers `200 {"status":"ok"}`. Clones share the same script
/// and log.
#[derive(Clone, Debug, Default)]
pub struct RecordingTransport(Arc<Mutex<RecordingState>>);
impl RecordingTransport {
	/// Queues a response.
	pub fn respond(&self, status: u16, body: impl Into<Vec<u8>>) -> &Self {
		self.0.lock().script.push_back(Scripted::Respond(HttpResponse::new(status, body)));

		self
	}

	/// Queues a `200` JSON response.
	pub fn respond_json(&self, body: &serde_json::Value) -> &Self {
		self.respond(200, body.to_string())
	}

	/// Queues a network failure.
	pub fn fail(&self, message: impl Into<String>) -> &Self {
		self.0.lock().script.push_back(Scripted::Fail(message.into()));

		self
	}

	/// Requests seen so far, in sending order.
	pub fn requests(&self) -> Vec<HttpRequest> {
		self.0.lock().requests.clone()
	}

	/// Number of requests seen so far.
	pub fn calls(&self) -> usize {
		self.0.lock().requests.len()
	}
}
impl HttpTransport for RecordingTransport {
	fn send(&self, request: HttpRequest) -> TransportFuture<'_> {
		let step = {
			let mut state = self.0.lock();

			state.requests.push(request);

			state.script.pop_front()
		};

		Box::pin(async move {
			match step {
				Some(Scripted::Respond(response)) => Ok(response),
				Some(Scripted::Fail(message)) =>
					Err(TransportError::network(ScriptedFailure(message))),
				None => Ok(HttpResponse::new(200, r#"{"status":"ok"}"#)),
			}
		})
	}
}
