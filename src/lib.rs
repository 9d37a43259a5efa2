//! Declarative, secret-gated request pipeline for a private social-media HTTP API: compose calls
//! before a credential exists, sign writes at execution time, and page through cursors lazily.
//!
//! ```no_run
//! # async fn demo() -> gram_request::error::Result<()> {
//! use gram_request::{
//! 	client::Client,
//! 	endpoint::user,
//! 	secret::{Device, Secret},
//! };
//!
//! let client = Client::new()?;
//! let summary = user::summary(&client, "25025320");
//! let secret = Secret::new(
//! 	"42",
//! 	[("sessionid", "<session>"), ("csrftoken", "<csrf>")],
//! 	Device::generate(),
//! )
//! .expect("Label is numeric.");
//! let profile = summary.unlock(&secret).start().await?;
//!
//! println!("{:?}", profile.get("/user/username"));
//! # Ok(())
//! # }
//! ```

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod anchor;
pub mod client;
pub mod endpoint;
pub mod entropy;
pub mod error;
pub mod http;
pub mod lock;
pub mod obs;
pub mod paginate;
pub mod promise;
pub mod request;
pub mod response;
pub mod secret;
pub mod sign;
#[cfg(any(test, feature = "test"))]
pub mod _preludet {
	//! Convenience re-exports and fixtures for tests; enabled via `cfg(test)` or the `test` crate
	//! feature.

	pub use crate::_prelude::*;

	// crates.io
	use uuid::Uuid;
	// self
	use crate::{
		client::Client,
		entropy::SequenceEntropy,
		http::RecordingTransport,
		secret::{Device, Secret},
	};

	/// Base URL every fixture client points at.
	pub const FIXTURE_BASE: &str = "https://example.api";

	/// Device with nil identifiers, stable across runs.
	pub fn device_fixture() -> Device {
		Device::new(Uuid::nil(), Uuid::nil(), Uuid::nil(), "android-0000000000000000")
	}

	/// Secret for account `42` holding `sessionid=s1` and `csrftoken=c1`.
	pub fn secret_fixture() -> Secret {
		Secret::new("42", [("sessionid", "s1"), ("csrftoken", "c1")], device_fixture())
			.expect("Fixture label must be numeric.")
	}

	/// Client rooted at [`FIXTURE_BASE`] that records requests instead of sending them.
	pub fn recording_client() -> (Client, RecordingTransport) {
		let transport = RecordingTransport::default();
		let client = Client::builder()
			.transport(transport.clone())
			.entropy(SequenceEntropy::default())
			.api_base(FIXTURE_BASE)
			.generic_base(FIXTURE_BASE)
			.build()
			.expect("Fixture client configuration must be valid.");

		(client, transport)
	}
}

mod _prelude {
	pub use std::{
		collections::BTreeMap,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		pin::Pin,
		sync::Arc,
	};

	pub use parking_lot::Mutex;
	#[cfg(feature = "reqwest")]
	pub use reqwest::{Client as ReqwestClient, Error as ReqwestError};
	pub use serde::{Deserialize, Serialize, de::DeserializeOwned};
	pub use thiserror::Error as ThisError;
	pub use time::{Duration, OffsetDateTime};
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

#[cfg(feature = "reqwest")] pub use reqwest;
pub use url;
#[cfg(test)] use {color_eyre as _, httpmock as _};
