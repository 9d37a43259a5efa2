//! `users/*` endpoints.

// self
use crate::{
	client::Client,
	endpoint::{self, NEXT_MAX_ID, Pages, Results},
	request::Request,
	response::Wrapper,
};

fn base(client: &Client) -> Request {
	endpoint::versioned(client, "users")
}

/// Profiles blocked by the authenticated user.
pub fn blocked(client: &Client) -> Results<Wrapper> {
	base(client).append_path("blocked_list").finalize(client)
}

/// Profile of the user matching `identifier`.
pub fn summary(client: &Client, identifier: &str) -> Results<Wrapper> {
	base(client).append_path(identifier).append_path("info").finalize(client)
}

/// Users matching `query`.
pub fn all(client: &Client, query: &str, cursor: Option<&str>) -> Pages<Wrapper> {
	endpoint::paged(base(client).append_path("search").query_value("q", Some(query)), cursor)
		.finalize_page(client, NEXT_MAX_ID)
}

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use crate::{_preludet::*, endpoint::tests::sent};

	#[tokio::test]
	async fn summary_targets_the_info_path() {
		let (client, transport) = recording_client();
		let request = sent(summary(&client, "42"), &transport).await;

		assert_eq!(request.url.as_str(), "https://example.api/api/v1/users/42/info");
		assert!(request.body.is_none());
	}

	#[tokio::test]
	async fn search_carries_query_and_cursor() {
		let (client, transport) = recording_client();
		let request = sent(all(&client, "rust", Some("c2")), &transport).await;

		assert_eq!(request.url.path(), "/api/v1/users/search");
		assert_eq!(request.url.query(), Some("max_id=c2&q=rust"));
	}
}
