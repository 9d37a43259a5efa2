//! Optional observability hooks around executed calls.
//!
//! # Feature Flags
//!
//! - Enable `tracing` to wrap every started promise in a span named `gram_request.call` carrying
//!   the `method`, `path`, and `kind` fields. Secrets and headers are never recorded.
//! - Enable `metrics` to increment `gram_request_call_total` for every attempt, success, and
//!   failure, labeled by `kind`, `method`, and `outcome`. Failures also increment
//!   `gram_request_call_failure_total`, labeled by `kind`, the failing stage (`class`), and the
//!   HTTP `status` of API errors.

mod metrics;
mod tracing;

pub use metrics::*;
pub use tracing::*;

// self
use crate::{_prelude::*, request::Method};

/// Broad category of an executed call.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CallKind {
	/// Body-less call.
	Read,
	/// Call carrying a plain form body.
	Write,
	/// Mutating call whose body is signed.
	SignedWrite,
}
impl CallKind {
	/// Classifies a call from its resolved method and signing flag.
	pub const fn classify(method: Method, signed: bool) -> Self {
		match (method, signed) {
			(_, true) => CallKind::SignedWrite,
			(Method::Post, false) => CallKind::Write,
			(Method::Get, false) => CallKind::Read,
		}
	}

	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			CallKind::Read => "read",
			CallKind::Write => "write",
			CallKind::SignedWrite => "signed_write",
		}
	}
}
impl Display for CallKind {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Outcome labels recorded for each call.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CallOutcome {
	/// A promise was started.
	Attempt,
	/// The response decoded successfully.
	Success,
	/// An error was returned to the caller.
	Failure,
}
impl CallOutcome {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			CallOutcome::Attempt => "attempt",
			CallOutcome::Success => "success",
			CallOutcome::Failure => "failure",
		}
	}
}
impl Display for CallOutcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn kinds_follow_method_and_signing() {
		assert_eq!(CallKind::classify(Method::Get, false), CallKind::Read);
		assert_eq!(CallKind::classify(Method::Post, false), CallKind::Write);
		assert_eq!(CallKind::classify(Method::Post, true).as_str(), "signed_write");
	}
}
