//! Fixtures shared by the integration tests.

#![allow(dead_code)]

// crates.io
use httpmock::MockServer;
use uuid::Uuid;
// self
use gram_request::{
	client::Client,
	entropy::SequenceEntropy,
	http::RecordingTransport,
	secret::{Device, Secret},
};

pub const BASE: &str = "https://example.api";

pub fn device() -> Device {
	Device::new(Uuid::nil(), Uuid::nil(), Uuid::nil(), "android-0000000000000000")
}

pub fn secret() -> Secret {
	Secret::new("42", [("sessionid", "s1"), ("csrftoken", "c1")], device())
		.expect("Fixture secret should be valid.")
}

pub fn other_secret() -> Secret {
	Secret::new(
		"7",
		[("sessionid", "s2"), ("csrftoken", "c2")],
		Device::new(
			Uuid::from_u128(1),
			Uuid::from_u128(2),
			Uuid::from_u128(3),
			"android-0000000000000001",
		),
	)
	.expect("Second fixture secret should be valid.")
}

pub fn recording_client() -> (Client, RecordingTransport) {
	let transport = RecordingTransport::default();
	let client = Client::builder()
		.transport(transport.clone())
		.entropy(SequenceEntropy::default())
		.api_base(BASE)
		.build()
		.expect("Recording client should build.");

	(client, transport)
}

pub fn mock_client(server: &MockServer) -> Client {
	Client::builder()
		.api_base(server.base_url())
		.build()
		.expect("Reqwest-backed client should build against the mock server.")
}
