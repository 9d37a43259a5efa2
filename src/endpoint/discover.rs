//! `discover/*` endpoints.

// self
use crate::{
	client::Client,
	endpoint::{self, NEXT_MAX_ID, Pages, Results},
	request::Request,
	response::Wrapper,
};

fn base(client: &Client) -> Request {
	endpoint::versioned(client, "discover")
}

/// Users similar to the one matching `identifier`.
pub fn users_like(client: &Client, identifier: &str) -> Results<Wrapper> {
	base(client).append_path("chaining").query_value("target_id", Some(identifier)).finalize(client)
}

/// The explore feed.
pub fn explore(client: &Client, cursor: Option<&str>) -> Pages<Wrapper> {
	endpoint::paged(base(client).append_path("explore"), cursor).finalize_page(client, NEXT_MAX_ID)
}

/// The topical explore feed.
pub fn topics(client: &Client, cursor: Option<&str>) -> Pages<Wrapper> {
	endpoint::paged(base(client).append_path("topical_explore"), cursor)
		.merge_query([
			("is_prefetch", "true"),
			("omit_cover_media", "false"),
			("use_sectional_payload", "true"),
			("timezone_offset", "43200"),
			("include_fixed_destinations", "false"),
		]
		.map(|(key, value)| (key, Some(value))))
		.authenticate_with(|request, _, secret| {
			request.query_value("session_id", secret.session_id())
		})
		.finalize_page(client, NEXT_MAX_ID)
}
