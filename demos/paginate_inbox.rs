//! Demonstrates walking a cursor-driven endpoint with the reqwest transport.
//!
//! A local mock server plays the platform: the first inbox page points to an `oldest_cursor`, the
//! second one does not, so the paginator stops on its own.

// crates.io
use color_eyre::Result;
use futures::StreamExt;
use httpmock::prelude::*;
use serde_json::json;
// self
use gram_request::{
	client::Client,
	endpoint::direct,
	paginate,
	secret::{Device, Secret},
};

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let server = MockServer::start_async().await;
	let older = server
		.mock_async(|when, then| {
			when.method(GET).path("/api/v1/direct_v2/inbox").query_param("cursor", "older-page");
			then.status(200).json_body(json!({
				"status": "ok",
				"inbox": { "threads": [{ "thread_title": "archive" }], "oldest_cursor": null },
			}));
		})
		.await;
	let newest = server
		.mock_async(|when, then| {
			when.method(GET).path("/api/v1/direct_v2/inbox");
			then.status(200).json_body(json!({
				"status": "ok",
				"inbox": { "threads": [{ "thread_title": "today" }], "oldest_cursor": "older-page" },
			}));
		})
		.await;
	let client = Client::builder().api_base(server.base_url()).build()?;
	let secret =
		Secret::new("42", [("sessionid", "demo"), ("csrftoken", "demo")], Device::generate())?;
	let mut pages =
		paginate::paginate(&secret, move |cursor| direct::inbox(&client, cursor)).into_stream().boxed();

	while let Some(page) = pages.next().await {
		let page = page?;

		println!("Fetched threads: {:?}.", page.get("/inbox/threads"));
	}

	newest.assert_calls_async(1).await;
	older.assert_calls_async(1).await;

	Ok(())
}
