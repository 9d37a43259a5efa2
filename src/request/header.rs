//! Protocol-compatibility header catalog merged into every call.
//!
//! The platform expects the literal names and values below from its official mobile client, so
//! they are reproduced verbatim. Three fields are volatile and are drawn from an [`Entropy`]
//! source on every execution: the pigeon session id, the raw client time, and the advertised
//! connection speed.

// self
use crate::{_prelude::*, entropy::Entropy, request::Request};

/// Header carrying the per-call random session token.
pub const PIGEON_SESSION_ID: &str = "X-Pigeon-Session-Id";
/// Header carrying the per-call epoch timestamp.
pub const PIGEON_RAW_CLIENT_TIME: &str = "X-Pigeon-Rawclienttime";
/// Header carrying the per-call advertised connection speed.
pub const CONNECTION_SPEED: &str = "X-IG-Connection-Speed";

/// Static header catalog sent with every call.
pub const DEFAULT_HEADERS: &[(&str, &str)] = &[
	("X-Ads-Opt-Out", "0"),
	("X-CM-Bandwidth-KBPS", "-1.000"),
	("X-CM-Latency", "-1.000"),
	("X-IG-App-Locale", "en_US"),
	("X-IG-Device-Locale", "en_US"),
	("X-IG-Bandwidth-Speed-KBPS", "-1.000"),
	("X-IG-Bandwidth-TotalBytes-B", "0"),
	("X-IG-Bandwidth-TotalTime-MS", "0"),
	("X-IG-Extended-CDN-Thumbnail-Cache-Busting-Value", "1000"),
	("X-Bloks-Version-Id", "7b2216598d8fcf84fbda65652788cb12be5aa024c4ea5e03deeb2b81a383c9e0"),
	("X-IG-WWW-Claim", "0"),
	("X-Bloks-Is-Layout-RTL", "false"),
	("X-IG-Connection-Type", "WIFI"),
	("X-IG-Capabilities", "36r/Fx8="),
	("X-IG-App-ID", "567067343352427"),
	("Accept-Language", "en-US"),
	("X-FB-HTTP-Engine", "Liger"),
	("Host", "i.instagram.com"),
	("Accept-Encoding", "gzip"),
	("Connection", "close"),
];

/// Per-call values that must never be reused across executions.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VolatileHeaders {
	/// Lowercase UUID sent as [`PIGEON_SESSION_ID`].
	pub session_id: String,
	/// `<epoch seconds>.000` sent as [`PIGEON_RAW_CLIENT_TIME`].
	pub raw_client_time: String,
	/// `<speed>kbps` sent as [`CONNECTION_SPEED`].
	pub connection_speed: String,
}
impl VolatileHeaders {
	/// Draws a fresh set of values.
	pub fn draw(entropy: &dyn Entropy) -> Self {
		Self {
			session_id: entropy.session_token(),
			raw_client_time: format!("{}.000", entropy.now().unix_timestamp()),
			connection_speed: format!("{}kbps", entropy.connection_speed()),
		}
	}

	fn into_entries(self) -> [(&'static str, Option<String>); 3] {
		[
			(PIGEON_SESSION_ID, Some(self.session_id)),
			(PIGEON_RAW_CLIENT_TIME, Some(self.raw_client_time)),
			(CONNECTION_SPEED, Some(self.connection_speed)),
		]
	}
}

impl Request {
	/// Merges the static catalog and a fresh draw of volatile headers.
	///
	/// Headers already present on the descriptor win over the catalog, so endpoint-specific values
	/// survive.
	pub fn with_default_headers(self, entropy: &dyn Entropy) -> Self {
		let own = self.headers().clone();
		let catalog = DEFAULT_HEADERS.iter().map(|(name, value)| (*name, Some(*value)));

		self.merge_header(catalog)
			.merge_header(VolatileHeaders::draw(entropy).into_entries())
			.merge_header(own.into_iter().map(|(name, value)| (name, Some(value))))
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use crate::entropy::{SequenceEntropy, SystemEntropy};

	fn base() -> Request {
		Request::new("https://example.api").expect("Base URL fixture should parse.")
	}

	#[test]
	fn catalog_and_volatile_fields_are_merged() {
		let entropy = SequenceEntropy::default();
		let request = base().with_default_headers(&entropy);
		let headers = request.headers();

		for (name, value) in DEFAULT_HEADERS {
			assert_eq!(headers.get(*name).map(String::as_str), Some(*value), "{name} missing");
		}

		assert!(headers.contains_key(PIGEON_SESSION_ID));
		assert!(headers[PIGEON_RAW_CLIENT_TIME].ends_with(".000"));
		assert!(headers[CONNECTION_SPEED].ends_with("kbps"));
	}

	#[test]
	fn endpoint_headers_override_the_catalog() {
		let request = base()
			.header_value("X-Ads-Opt-Out", Some("1"))
			.with_default_headers(&SequenceEntropy::default());

		assert_eq!(request.headers()["X-Ads-Opt-Out"], "1");
	}

	#[test]
	fn volatile_fields_differ_between_draws() {
		let first = VolatileHeaders::draw(&SystemEntropy);
		let second = VolatileHeaders::draw(&SystemEntropy);

		assert_ne!(first.session_id, second.session_id);
		assert_eq!(first.session_id, first.session_id.to_lowercase());
	}
}
