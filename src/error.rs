//! Pipeline-level error types shared across descriptors, signing, transport, and decoding.

// self
use crate::_prelude::*;

/// Pipeline-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical error surfaced by [`DelayedPromise::start`](crate::promise::DelayedPromise::start)
/// and every other public entry point.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Descriptor could not be composed.
	#[error(transparent)]
	Composition(#[from] CompositionError),
	/// Mutating call could not be signed; nothing was sent.
	#[error(transparent)]
	Signing(#[from] SigningError),
	/// Transport failure (DNS, TCP, TLS, timeouts).
	#[error(transparent)]
	Transport(#[from] TransportError),
	/// Response bytes did not match the expected shape.
	#[error(transparent)]
	Decode(#[from] DecodeError),
	/// Local configuration problem.
	#[error(transparent)]
	Config(#[from] ConfigError),

	/// Endpoint answered with a non-success HTTP status.
	#[error("Endpoint responded with HTTP {status}: {}.", .message.as_deref().unwrap_or("no message"))]
	Api {
		/// HTTP status code returned by the endpoint.
		status: u16,
		/// Platform-supplied `message` field, when the body carried one.
		message: Option<String>,
	},
}

/// Failures raised while building a request descriptor.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
pub enum CompositionError {
	/// Base URL cannot be parsed.
	#[error("Base URL `{base}` is invalid.")]
	InvalidBase {
		/// Raw base URL supplied by the caller.
		base: String,
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// Base URL parses but cannot carry path segments (e.g. `mailto:`).
	#[error("Base URL `{base}` cannot carry path segments.")]
	CannotBeABase {
		/// Raw base URL supplied by the caller.
		base: String,
	},
}

/// Failures raised while signing the body of a mutating call.
#[derive(Debug, ThisError)]
pub enum SigningError {
	/// The secret lacks a field the signature contract requires.
	#[error("Secret is missing the `{field}` field required for signing.")]
	MissingField {
		/// Cookie name that was absent.
		field: &'static str,
	},
	/// Payload could not be serialized before signing.
	#[error("Signed payload could not be serialized.")]
	Payload(#[from] serde_json::Error),
}

/// Transport-level failures (network, IO).
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while calling the endpoint.")]
	Network {
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
	/// Underlying IO failure surfaced during transport.
	#[error("I/O error occurred while calling the endpoint.")]
	Io(#[from] std::io::Error),
}
impl TransportError {
	/// Wraps a transport-specific network error.
	pub fn network(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Network { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for TransportError {
	fn from(e: ReqwestError) -> Self {
		Self::network(e)
	}
}

/// Response decoding failures.
#[derive(Debug, ThisError)]
pub enum DecodeError {
	/// Body is not valid JSON.
	#[error("Endpoint returned malformed JSON.")]
	Json {
		/// Parser failure.
		#[source]
		source: serde_json::Error,
		/// HTTP status code of the response.
		status: u16,
	},
	/// Body is JSON but does not match the declared output type.
	#[error("Endpoint response does not match the expected shape at `{}`.", .source.path())]
	Shape {
		/// Structured failure naming the offending path.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
	},
}

/// Configuration and validation failures raised while building a [`Client`](crate::client::Client).
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
	/// Configured base URL is unusable.
	#[error("Configured base URL is invalid.")]
	InvalidBase(#[from] CompositionError),
	/// Signing key is empty.
	#[error("Signing key must not be empty.")]
	EmptySigningKey,
	/// Signing key was rejected by the MAC.
	#[error("Signing key is invalid.")]
	InvalidSigningKey,
	/// No transport was configured and the default one is disabled.
	#[error("No HTTP transport configured.")]
	MissingTransport,
}
impl ConfigError {
	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for ConfigError {
	fn from(e: ReqwestError) -> Self {
		Self::http_client_build(e)
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn api_error_renders_platform_message() {
		let err = Error::Api { status: 400, message: Some("login_required".into()) };

		assert_eq!(err.to_string(), "Endpoint responded with HTTP 400: login_required.");

		let err = Error::Api { status: 502, message: None };

		assert_eq!(err.to_string(), "Endpoint responded with HTTP 502: no message.");
	}

	#[test]
	fn signing_errors_name_the_missing_field() {
		let err: Error = SigningError::MissingField { field: "csrftoken" }.into();

		assert!(matches!(err, Error::Signing(SigningError::MissingField { field: "csrftoken" })));
		assert_eq!(err.to_string(), "Secret is missing the `csrftoken` field required for signing.");
	}
}
