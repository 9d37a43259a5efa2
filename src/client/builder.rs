// self
use crate::{
	_prelude::*,
	client::{Client, ClientInner, DEFAULT_API_BASE, DEFAULT_GENERIC_BASE},
	entropy::{Entropy, SystemEntropy},
	error::ConfigError,
	http::HttpTransport,
	request::Request,
	sign::Signer,
};

/// Builder for [`Client`] values.
///
/// Every field is optional: the defaults target the production hosts, sign with the platform's
/// public key, draw volatile fields from [`SystemEntropy`], and send through reqwest.
#[derive(Default)]
pub struct ClientBuilder {
	/// Transport executing finalized requests.
	pub transport: Option<Arc<dyn HttpTransport>>,
	/// Clock and randomness source.
	pub entropy: Option<Arc<dyn Entropy>>,
	/// Signing key and key version.
	pub signing_key: Option<(Vec<u8>, String)>,
	/// Base URL of the private API; defaults to [`DEFAULT_API_BASE`].
	pub api_base: Option<String>,
	/// Base URL of the web frontend; defaults to [`DEFAULT_GENERIC_BASE`].
	pub generic_base: Option<String>,
	/// Preconfigured reqwest client used when no transport is set.
	#[cfg(feature = "reqwest")]
	pub reqwest_client: Option<ReqwestClient>,
}
impl ClientBuilder {
	/// Sets the transport.
	pub fn transport<T>(self, transport: T) -> Self
	where
		T: HttpTransport,
	{
		self.shared_transport(Arc::new(transport))
	}

	/// Sets a transport that is already shared elsewhere.
	pub fn shared_transport(mut self, transport: Arc<dyn HttpTransport>) -> Self {
		self.transport = Some(transport);

		self
	}

	/// Sets the entropy source.
	pub fn entropy<E>(self, entropy: E) -> Self
	where
		E: 'static + Entropy,
	{
		self.shared_entropy(Arc::new(entropy))
	}

	/// Sets an entropy source that is already shared elsewhere.
	pub fn shared_entropy(mut self, entropy: Arc<dyn Entropy>) -> Self {
		self.entropy = Some(entropy);

		self
	}

	/// Overrides the signing key and its version.
	pub fn signing_key(mut self, key: impl Into<Vec<u8>>, version: impl Into<String>) -> Self {
		self.signing_key = Some((key.into(), version.into()));

		self
	}

	/// Overrides the private API base URL.
	pub fn api_base(mut self, base: impl Into<String>) -> Self {
		self.api_base = Some(base.into());

		self
	}

	/// Overrides the web frontend base URL.
	pub fn generic_base(mut self, base: impl Into<String>) -> Self {
		self.generic_base = Some(base.into());

		self
	}

	/// Uses `client` for the default reqwest transport.
	#[cfg(feature = "reqwest")]
	pub fn reqwest_client(mut self, client: ReqwestClient) -> Self {
		self.reqwest_client = Some(client);

		self
	}

	/// Consumes the builder and validates the resulting client.
	pub fn build(mut self) -> Result<Client, ConfigError> {
		let api = Request::new(self.api_base.as_deref().unwrap_or(DEFAULT_API_BASE))?;
		let generic = Request::new(self.generic_base.as_deref().unwrap_or(DEFAULT_GENERIC_BASE))?;
		let signer = match self.signing_key.take() {
			Some((key, version)) => Signer::new(key, version)?,
			None => Signer::platform()?,
		};
		let transport = match self.transport.take() {
			Some(transport) => transport,
			None => self.default_transport()?,
		};
		let entropy = self.entropy.take().unwrap_or_else(|| Arc::new(SystemEntropy));

		Ok(Client(Arc::new(ClientInner { transport, entropy, signer, api, generic })))
	}

	#[cfg(feature = "reqwest")]
	fn default_transport(&mut self) -> Result<Arc<dyn HttpTransport>, ConfigError> {
		let transport = match self.reqwest_client.take() {
			Some(client) => crate::http::ReqwestTransport::with_client(client),
			None => crate::http::ReqwestTransport::new()?,
		};

		Ok(Arc::new(transport))
	}

	#[cfg(not(feature = "reqwest"))]
	fn default_transport(&mut self) -> Result<Arc<dyn HttpTransport>, ConfigError> {
		Err(ConfigError::MissingTransport)
	}
}
impl Debug for ClientBuilder {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("ClientBuilder")
			.field("has_transport", &self.transport.is_some())
			.field("has_entropy", &self.entropy.is_some())
			.field("api_base", &self.api_base)
			.field("generic_base", &self.generic_base)
			.finish_non_exhaustive()
	}
}
