//! Caller-owned credential bundle: session cookies, device identity, and account label.

// crates.io
use uuid::Uuid;
// self
use crate::_prelude::*;

/// Cookie holding the session identifier.
pub const SESSION_ID: &str = "sessionid";
/// Cookie holding the CSRF token.
pub const CSRF_TOKEN: &str = "csrftoken";

/// Stable identifiers of the device a session was created on.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Device {
	/// Device UUID, sent as `_uuid` and `X-IG-Device-ID`.
	pub identifier: Uuid,
	/// Phone UUID, sent as `phone_id`.
	pub phone_identifier: Uuid,
	/// Advertising UUID, sent as `X-Google-AD-ID`.
	pub ad_identifier: Uuid,
	/// Android-style identifier (`android-<16 hex>`), sent as `device_id`.
	pub instagram_identifier: String,
}
impl Device {
	/// Creates a device from known identifiers.
	pub fn new(
		identifier: Uuid,
		phone_identifier: Uuid,
		ad_identifier: Uuid,
		instagram_identifier: impl Into<String>,
	) -> Self {
		Self {
			identifier,
			phone_identifier,
			ad_identifier,
			instagram_identifier: instagram_identifier.into(),
		}
	}

	/// Generates a brand-new random device identity.
	pub fn generate() -> Self {
		Self::new(
			Uuid::new_v4(),
			Uuid::new_v4(),
			Uuid::new_v4(),
			format!("android-{:016x}", rand::random::<u64>()),
		)
	}

	/// [`identifier`](Self::identifier) in the platform's uppercase hyphenated form.
	pub fn uuid(&self) -> String {
		upper(&self.identifier)
	}

	/// [`phone_identifier`](Self::phone_identifier) in the platform's uppercase hyphenated form.
	pub fn phone_id(&self) -> String {
		upper(&self.phone_identifier)
	}

	/// [`ad_identifier`](Self::ad_identifier) in the platform's uppercase hyphenated form.
	pub fn ad_id(&self) -> String {
		upper(&self.ad_identifier)
	}
}

fn upper(uuid: &Uuid) -> String {
	format!("{:X}", uuid.hyphenated())
}

/// Error returned when a [`Secret`] cannot be assembled.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
pub enum SecretError {
	/// The account label is empty or not purely numeric.
	#[error("Account label `{label}` must be a non-empty numeric identifier.")]
	InvalidLabel {
		/// Rejected label.
		label: String,
	},
}

/// Authentication bundle required to execute any call.
///
/// Cookie values never appear in `Debug` output; only their names are printed.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Secret {
	label: String,
	cookies: BTreeMap<String, String>,
	device: Device,
}
impl Secret {
	/// Creates a secret for the numeric account `label`.
	pub fn new<I, K, V>(
		label: impl Into<String>,
		cookies: I,
		device: Device,
	) -> Result<Self, SecretError>
	where
		I: IntoIterator<Item = (K, V)>,
		K: Into<String>,
		V: Into<String>,
	{
		let label = label.into();

		if label.is_empty() || !label.bytes().all(|byte| byte.is_ascii_digit()) {
			return Err(SecretError::InvalidLabel { label });
		}

		let cookies = cookies.into_iter().map(|(key, value)| (key.into(), value.into())).collect();

		Ok(Self { label, cookies, device })
	}

	/// Numeric account identifier.
	pub fn label(&self) -> &str {
		&self.label
	}

	/// Device identity.
	pub fn device(&self) -> &Device {
		&self.device
	}

	/// All cookies.
	pub fn cookies(&self) -> &BTreeMap<String, String> {
		&self.cookies
	}

	/// Looks up a single cookie.
	pub fn cookie(&self, name: &str) -> Option<&str> {
		self.cookies.get(name).map(String::as_str)
	}

	/// The `sessionid` cookie.
	pub fn session_id(&self) -> Option<&str> {
		self.cookie(SESSION_ID)
	}

	/// The `csrftoken` cookie.
	pub fn csrf_token(&self) -> Option<&str> {
		self.cookie(CSRF_TOKEN)
	}

	/// Returns a copy with `name` set to `value`.
	pub fn with_cookie(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
		self.cookies.insert(name.into(), value.into());

		self
	}

	/// Returns a copy without the `name` cookie.
	pub fn without_cookie(mut self, name: &str) -> Self {
		self.cookies.remove(name);

		self
	}

	/// Authentication headers derived from this secret.
	pub fn header(&self) -> Vec<(&'static str, Option<String>)> {
		let cookie = self
			.cookies
			.iter()
			.map(|(name, value)| format!("{name}={value}"))
			.collect::<Vec<_>>()
			.join("; ");

		vec![
			("Cookie", (!cookie.is_empty()).then_some(cookie)),
			("X-IG-Device-ID", Some(self.device.uuid())),
			("X-IG-Android-ID", Some(self.device.instagram_identifier.clone())),
		]
	}
}
impl Debug for Secret {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Secret")
			.field("label", &self.label)
			.field("cookies", &self.cookies.keys().collect::<Vec<_>>())
			.field("device", &self.device)
			.finish()
	}
}
