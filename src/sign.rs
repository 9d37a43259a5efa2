//! Body signing for mutating endpoints.
//!
//! Write calls carry a `signed_body` field of the form `<hex hmac>.<json payload>` plus the key
//! version. The payload is the endpoint body enriched with the CSRF token, account label, and
//! device identifiers taken from the [`Secret`]. Signing is a pure function of the body, the
//! secret, and the configured key.

// crates.io
use hmac::{Hmac, Mac};
use sha2::Sha256;
// self
use crate::{
	_prelude::*,
	error::{ConfigError, SigningError},
	request::Fields,
	secret::{CSRF_TOKEN, SESSION_ID, Secret},
};

type HmacSha256 = Hmac<Sha256>;

/// Publicly known signature key shipped with the platform's mobile client.
pub const DEFAULT_SIGNATURE_KEY: &str =
	"4f8732eb9ba7d1c8e8897a75d6474d4eb3f5279137431b2aafb71fafe2abe178";
/// Key version paired with [`DEFAULT_SIGNATURE_KEY`].
pub const DEFAULT_SIGNATURE_VERSION: &str = "4";
/// Body field carrying `<signature>.<payload>`.
pub const SIGNED_BODY: &str = "signed_body";
/// Body field carrying the key version.
pub const SIGNATURE_VERSION: &str = "ig_sig_key_version";

/// HMAC-SHA256 body signer.
///
/// The key belongs to the app, not to an account: every secret is signed with the same key, and
/// the secret only contributes the payload fields. [`Signer::platform`] carries the key shipped
/// with the platform's mobile client; other keys go through [`Signer::new`].
#[derive(Clone)]
pub struct Signer {
	mac: HmacSha256,
	version: String,
}
impl Signer {
	/// Creates a signer from raw key bytes and the matching key version.
	pub fn new(key: impl AsRef<[u8]>, version: impl Into<String>) -> Result<Self, ConfigError> {
		let key = key.as_ref();

		if key.is_empty() {
			return Err(ConfigError::EmptySigningKey);
		}

		let mac = HmacSha256::new_from_slice(key).map_err(|_| ConfigError::InvalidSigningKey)?;

		Ok(Self { mac, version: version.into() })
	}

	/// Signer using [`DEFAULT_SIGNATURE_KEY`] and [`DEFAULT_SIGNATURE_VERSION`].
	pub fn platform() -> Result<Self, ConfigError> {
		Self::new(DEFAULT_SIGNATURE_KEY, DEFAULT_SIGNATURE_VERSION)
	}

	/// Key version emitted next to every signature.
	pub fn version(&self) -> &str {
		&self.version
	}

	/// Signs `body` on behalf of `secret`.
	///
	/// Fails with [`SigningError::MissingField`] when the secret lacks the session or CSRF cookie;
	/// an unsigned body is never returned.
	pub fn sign(&self, body: &Fields, secret: &Secret) -> Result<Fields, SigningError> {
		let csrf_token =
			secret.csrf_token().ok_or(SigningError::MissingField { field: CSRF_TOKEN })?;

		secret.session_id().ok_or(SigningError::MissingField { field: SESSION_ID })?;

		let mut payload = body.clone();
		let device = secret.device();

		payload.insert("_csrftoken".into(), csrf_token.into());
		payload.insert("_uid".into(), secret.label().into());
		payload.insert("_uuid".into(), device.uuid());
		payload.insert("device_id".into(), device.instagram_identifier.clone());

		let json = serde_json::to_string(&payload)?;
		let signature = self.signature(json.as_bytes());
		let mut signed = Fields::new();

		signed.insert(SIGNED_BODY.into(), format!("{signature}.{json}"));
		signed.insert(SIGNATURE_VERSION.into(), self.version.clone());

		Ok(signed)
	}

	/// Lowercase hex HMAC-SHA256 of `message`.
	pub fn signature(&self, message: &[u8]) -> String {
		let mut mac = self.mac.clone();

		mac.update(message);

		format!("{:x}", mac.finalize().into_bytes())
	}
}
impl Debug for Signer {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Signer").field("key", &"<redacted>").field("version", &self.version).finish()
	}
}

#[cfg(test)]
mod tests {
	// crates.io
	use uuid::Uuid;
	// self
	use super::*;
	use crate::secret::Device;

	fn secret() -> Secret {
		Secret::new(
			"42",
			[(SESSION_ID, "s1"), (CSRF_TOKEN, "c1")],
			Device::new(Uuid::nil(), Uuid::nil(), Uuid::nil(), "android-0000000000000000"),
		)
		.expect("Secret fixture should be valid.")
	}

	fn body() -> Fields {
		Fields::from([("user_id".to_owned(), "7".to_owned())])
	}

	#[test]
	fn signature_matches_rfc_4231_vector() {
		let signer = Signer::new("Jefe", "4").expect("Signer fixture should build.");

		assert_eq!(
			signer.signature(b"what do ya want for nothing?"),
			"5bdcc146bf60754e6a042426089575c75a003f089d2739839dec58b964ec3843",
		);
	}

	#[test]
	fn signed_body_wraps_enriched_payload() {
		let signer = Signer::platform().expect("Platform signer should build.");
		let signed = signer.sign(&body(), &secret()).expect("Signing should succeed.");
		let (signature, json) =
			signed[SIGNED_BODY].split_once('.').expect("Signed body should contain a separator.");
		let payload: Fields = serde_json::from_str(json).expect("Payload should be JSON.");

		assert_eq!(signature, signer.signature(json.as_bytes()));
		assert_eq!(signed[SIGNATURE_VERSION], DEFAULT_SIGNATURE_VERSION);
		assert_eq!(payload["user_id"], "7");
		assert_eq!(payload["_csrftoken"], "c1");
		assert_eq!(payload["_uid"], "42");
		assert_eq!(payload["device_id"], "android-0000000000000000");
		assert_eq!(signed.len(), 2);
	}

	#[test]
	fn cloned_signers_share_the_key_without_state() {
		let signer = Signer::new("Jefe", "4").expect("Signer fixture should build.");
		let first = signer.signature(b"what do ya want for nothing?");
		let cloned = signer.clone();

		assert_eq!(cloned.signature(b"what do ya want for nothing?"), first);
		assert_eq!(signer.signature(b"what do ya want for nothing?"), first);
		assert_ne!(signer.signature(b"other"), first);
	}

	#[test]
	fn signing_is_pure() {
		let signer = Signer::platform().expect("Platform signer should build.");

		assert_eq!(
			signer.sign(&body(), &secret()).expect("First signing should succeed."),
			signer.sign(&body(), &secret()).expect("Second signing should succeed."),
		);
	}

	#[test]
	fn missing_cookies_fail_instead_of_signing() {
		let signer = Signer::platform().expect("Platform signer should build.");
		let err = signer
			.sign(&body(), &secret().without_cookie(CSRF_TOKEN))
			.expect_err("Missing CSRF token must fail.");

		assert!(matches!(err, SigningError::MissingField { field: CSRF_TOKEN }));

		let err = signer
			.sign(&body(), &secret().without_cookie(SESSION_ID))
			.expect_err("Missing session id must fail.");

		assert!(matches!(err, SigningError::MissingField { field: SESSION_ID }));
	}

	#[test]
	fn empty_keys_are_rejected_and_debug_redacts() {
		let signer = Signer::platform().expect("Platform signer should build.");

		assert!(matches!(Signer::new("", "4"), Err(ConfigError::EmptySigningKey)));
		assert!(!format!("{signer:?}").contains(DEFAULT_SIGNATURE_KEY));
	}
}
