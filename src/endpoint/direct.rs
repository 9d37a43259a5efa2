//! `direct_v2/*` endpoints.

// self
use crate::{
	client::Client,
	endpoint::{self, Pages, Results},
	request::Request,
	response::Wrapper,
};

/// Response pointer to the inbox cursor.
pub const INBOX_CURSOR: &str = "/inbox/oldest_cursor";
/// Response pointer to a thread's cursor.
pub const THREAD_CURSOR: &str = "/thread/oldest_cursor";

fn base(client: &Client) -> Request {
	endpoint::versioned(client, "direct_v2")
}

fn inbox_query(request: Request, cursor: Option<&str>) -> Request {
	request.merge_query([
		("visual_message_return_type", Some("unseen")),
		("direction", cursor.map(|_| "older")),
		("cursor", cursor),
		("thread_message_limit", Some("10")),
		("persistent_badging", Some("true")),
		("limit", Some("20")),
	])
}

/// Conversations in the inbox.
pub fn inbox(client: &Client, cursor: Option<&str>) -> Pages<Wrapper> {
	inbox_query(base(client).append_path("inbox"), cursor).finalize_page(client, INBOX_CURSOR)
}

/// Conversations waiting for approval.
pub fn pending_inbox(client: &Client, cursor: Option<&str>) -> Pages<Wrapper> {
	inbox_query(base(client).append_path("pending_inbox"), cursor)
		.finalize_page(client, INBOX_CURSOR)
}

/// Top ranked recipients, optionally narrowed by `query`.
pub fn recipients(client: &Client, query: Option<&str>) -> Results<Wrapper> {
	base(client)
		.append_path("ranked_recipients/")
		.merge_header([
			("mode", Some("raven")),
			("query", Some(query.unwrap_or_default())),
			("show_threads", Some("true")),
		])
		.finalize(client)
}

/// Messages of the thread matching `identifier`.
pub fn conversation(client: &Client, identifier: &str, cursor: Option<&str>) -> Pages<Wrapper> {
	base(client)
		.append_path("threads")
		.append_path(identifier)
		.merge_query([
			("visual_message_return_type", Some("unseen")),
			("direction", Some("older")),
			("cursor", cursor),
			("limit", Some("20")),
		])
		.finalize_page(client, THREAD_CURSOR)
}

/// Presence of the authenticated user's contacts.
pub fn presence(client: &Client) -> Results<Wrapper> {
	base(client).append_path("get_presence/").finalize(client)
}

#[cfg(test)]
mod tests {
	// crates.io
	use serde_json::json;
	// self
	use super::*;
	use crate::{_preludet::*, endpoint::tests::sent, paginate};

	#[tokio::test]
	async fn first_inbox_page_omits_cursor_fields() {
		let (client, transport) = recording_client();
		let request = sent(inbox(&client, None), &transport).await;
		let query = request.url.query().expect("Inbox always carries a query.");

		assert_eq!(request.url.path(), "/api/v1/direct_v2/inbox");
		assert!(!query.contains("direction"));
		assert!(!query.contains("cursor"));
		assert!(query.contains("thread_message_limit=10"));
	}

	#[tokio::test]
	async fn inbox_pages_follow_the_oldest_cursor() {
		let (client, transport) = recording_client();

		transport
			.respond_json(&json!({ "inbox": { "threads": [], "oldest_cursor": "abc" } }))
			.respond_json(&json!({ "inbox": { "threads": [], "oldest_cursor": null } }));

		let mut pages =
			paginate::paginate(&secret_fixture(), move |cursor| inbox(&client, cursor));

		assert!(matches!(pages.next_page().await, Some(Ok(_))));
		assert!(matches!(pages.next_page().await, Some(Ok(_))));
		assert!(pages.next_page().await.is_none());

		let requests = transport.requests();

		assert_eq!(requests.len(), 2);
		assert!(requests[1].url.query().is_some_and(|query| query.contains("cursor=abc")));
		assert!(requests[1].url.query().is_some_and(|query| query.contains("direction=older")));
	}

	#[tokio::test]
	async fn recipients_use_header_fields() {
		let (client, transport) = recording_client();
		let request = sent(recipients(&client, None), &transport).await;

		assert_eq!(request.header("mode"), Some("raven"));
		assert_eq!(request.header("query"), Some(""));
		assert_eq!(request.url.path(), "/api/v1/direct_v2/ranked_recipients/");
	}
}
