// self
use crate::{
	_prelude::*,
	obs::{CallKind, CallOutcome},
	request::Method,
};

/// Increments `gram_request_call_total{kind, method, outcome}` (when enabled).
pub fn record_call_outcome(kind: CallKind, method: Method, outcome: CallOutcome) {
	#[cfg(feature = "metrics")]
	{
		metrics::counter!(
			"gram_request_call_total",
			"kind" => kind.as_str(),
			"method" => method.as_str(),
			"outcome" => outcome.as_str()
		)
		.increment(1);
	}

	#[cfg(not(feature = "metrics"))]
	{
		let _ = (kind, method, outcome);
	}
}

/// Increments `gram_request_call_failure_total{kind, class}` for an error returned by a call.
///
/// API failures are additionally labeled with their HTTP status.
pub fn record_call_failure(kind: CallKind, error: &Error) {
	#[cfg(feature = "metrics")]
	{
		let status = match error {
			Error::Api { status, .. } => status.to_string(),
			_ => String::new(),
		};

		metrics::counter!(
			"gram_request_call_failure_total",
			"kind" => kind.as_str(),
			"class" => failure_class(error),
			"status" => status
		)
		.increment(1);
	}

	#[cfg(not(feature = "metrics"))]
	{
		let _ = (kind, error);
	}
}

/// Stable label of the pipeline stage an error comes from.
pub fn failure_class(error: &Error) -> &'static str {
	match error {
		Error::Composition(_) => "composition",
		Error::Signing(_) => "signing",
		Error::Transport(_) => "transport",
		Error::Decode(_) => "decode",
		Error::Config(_) => "config",
		Error::Api { .. } => "api",
	}
}
