//! Media, feed, and story endpoints.

// crates.io
use serde_json::{Value, json};
// self
use crate::{
	client::Client,
	endpoint::{self, NEXT_MAX_ID, Pages, Results},
	request::{Method, Request},
	response::{Status, Wrapper},
};

/// Camera capabilities advertised when fetching highlights, as `(name, value)` pairs.
pub const SUPPORTED_CAPABILITIES: [(&str, &str); 6] = [
	(
		"SUPPORTED_SDK_VERSIONS",
		"100.0,101.0,102.0,103.0,104.0,105.0,106.0,107.0,108.0,109.0,110.0,111.0,112.0,113.0,114.0,\
		 115.0,116.0,117.0",
	),
	("FACE_TRACKER_VERSION", "14"),
	("segmentation", "segmentation_enabled"),
	("COMPRESSION", "ETC2_COMPRESSION"),
	("world_tracker", "world_tracker_enabled"),
	("gyroscope", "gyroscope_enabled"),
];

/// [`SUPPORTED_CAPABILITIES`] as the JSON list of `{"name", "value"}` objects sent on the wire.
pub fn supported_capabilities() -> String {
	Value::Array(
		SUPPORTED_CAPABILITIES
			.iter()
			.map(|(name, value)| json!({ "name": name, "value": value }))
			.collect(),
	)
	.to_string()
}

fn base(client: &Client) -> Request {
	endpoint::versioned(client, "media")
}

fn feed(client: &Client) -> Request {
	endpoint::versioned(client, "feed")
}

fn post(client: &Client, identifier: &str, action: &str) -> Results<Status> {
	base(client).append_path(identifier).append_path(action).with_method(Method::Post).finalize(client)
}

/// Details of the media matching `identifier`.
pub fn summary(client: &Client, identifier: &str) -> Results<Wrapper> {
	base(client).append_path(identifier).append_path("info").finalize(client)
}

/// Permalink of the media matching `identifier`.
pub fn permalink(client: &Client, identifier: &str) -> Results<Wrapper> {
	base(client).append_path(identifier).append_path("permalink").finalize(client)
}

/// Users liking the post matching `identifier`.
pub fn likers(client: &Client, identifier: &str, cursor: Option<&str>) -> Pages<Wrapper> {
	endpoint::paged(base(client).append_path(identifier).append_path("likers"), cursor)
		.finalize_page(client, NEXT_MAX_ID)
}

/// Comments under the post matching `identifier`.
pub fn comments(client: &Client, identifier: &str, cursor: Option<&str>) -> Pages<Wrapper> {
	endpoint::paged(base(client).append_path(identifier).append_path("comments"), cursor)
		.finalize_page(client, NEXT_MAX_ID)
}

/// Saves the media matching `identifier`.
pub fn save(client: &Client, identifier: &str) -> Results<Status> {
	post(client, identifier, "save/")
}

/// Unsaves the media matching `identifier`.
pub fn unsave(client: &Client, identifier: &str) -> Results<Status> {
	post(client, identifier, "unsave/")
}

/// Likes the comment matching `identifier`.
pub fn like_comment(client: &Client, identifier: &str) -> Results<Status> {
	post(client, identifier, "comment_like/")
}

/// Removes the like from the comment matching `identifier`.
pub fn unlike_comment(client: &Client, identifier: &str) -> Results<Status> {
	post(client, identifier, "comment_unlike/")
}

/// Media liked by the authenticated user.
pub fn liked(client: &Client, cursor: Option<&str>) -> Pages<Wrapper> {
	endpoint::paged(feed(client).append_path("liked"), cursor).finalize_page(client, NEXT_MAX_ID)
}

/// Media saved by the authenticated user.
pub fn saved(client: &Client, cursor: Option<&str>) -> Pages<Wrapper> {
	endpoint::paged(feed(client).append_path("saved"), cursor)
		.header_value("include_igtv_preview", Some("false"))
		.finalize_page(client, NEXT_MAX_ID)
}

/// Media archived by the authenticated user.
pub fn archived(client: &Client, cursor: Option<&str>) -> Pages<Wrapper> {
	endpoint::paged(feed(client).append_path("only_me_feed/"), cursor)
		.finalize_page(client, NEXT_MAX_ID)
}

/// Posts published by the user matching `identifier`.
pub fn owned_by(client: &Client, identifier: &str, cursor: Option<&str>) -> Pages<Wrapper> {
	endpoint::paged(feed(client).append_path("user").append_path(identifier), cursor)
		.finalize_page(client, NEXT_MAX_ID)
}

/// Posts the user matching `identifier` is tagged in.
pub fn including(client: &Client, identifier: &str, cursor: Option<&str>) -> Pages<Wrapper> {
	endpoint::paged(
		endpoint::versioned(client, "usertags").append_path(identifier).append_path("feed"),
		cursor,
	)
	.finalize_page(client, NEXT_MAX_ID)
}

/// Posts matching the hashtag `tag`.
pub fn tagged(client: &Client, tag: &str, cursor: Option<&str>) -> Pages<Wrapper> {
	endpoint::paged(feed(client).append_path("tag").append_path(tag), cursor)
		.finalize_page(client, NEXT_MAX_ID)
}

/// The authenticated user's timeline.
pub fn timeline(client: &Client, cursor: Option<&str>) -> Pages<Wrapper> {
	feed(client)
		.append_path("timeline/")
		.merge_body(
			[
				("is_prefetch", "0"),
				("feed_view_info", ""),
				("seen_posts", ""),
				("is_pull_to_refresh", "0"),
				("battery_level", "72"),
				("timezone_offset", "43200"),
				("is_charging", "0"),
				("is_async_ads_in_headload_enabled", "0"),
				("rti_delivery_backend", "0"),
				("is_async_ads_double_request", "0"),
				("will_sound_on", "0"),
				("is_async_ads_rti", "0"),
			]
			.map(|(key, value)| (key, Some(value))),
		)
		.body_value(endpoint::MAX_ID, cursor)
		.authenticate_with(|request, _, secret| {
			let device = secret.device();

			request
				.merge_header([
					("X-Ads-Opt-Out", Some("0".to_owned())),
					("X-Google-AD-ID", Some(device.ad_id())),
					("X-DEVICE-ID", Some(device.uuid())),
					("X-FB", Some("1".to_owned())),
				])
				.merge_body([
					("phone_id", Some(device.phone_id())),
					("_csrftoken", secret.csrf_token().map(str::to_owned)),
					("client_session_id", secret.session_id().map(str::to_owned)),
					("device_id", Some(device.uuid())),
					("_uuid", Some(device.uuid())),
				])
		})
		.finalize_page(client, NEXT_MAX_ID)
}

/// Story endpoints.
pub mod stories {
	// self
	use super::*;

	/// Stories tray of followed users.
	pub fn followed(client: &Client) -> Results<Wrapper> {
		feed(client).append_path("reels_tray").finalize(client)
	}

	/// Highlights tray of the user matching `identifier`.
	pub fn highlights(client: &Client, identifier: &str) -> Results<Wrapper> {
		endpoint::versioned(client, "highlights")
			.append_path(identifier)
			.append_path("highlights_tray")
			.merge_query(
				[("battery_level", "72"), ("is_charging", "0"), ("will_sound_on", "0")]
					.map(|(key, value)| (key, Some(value.to_owned())))
					.into_iter()
					.chain([("supported_capabilities_new", Some(supported_capabilities()))]),
			)
			.finalize_with(client, |request, _, secret| {
				request.query_value("phone_id", Some(secret.device().phone_id()))
			})
	}

	/// Viewers of the story matching `identifier`.
	pub fn viewers(client: &Client, identifier: &str, cursor: Option<&str>) -> Pages<Wrapper> {
		endpoint::paged(
			base(client).append_path(identifier).append_path("list_reel_media_viewer"),
			cursor,
		)
		.finalize_page(client, NEXT_MAX_ID)
	}

	/// Archived stories of the authenticated user.
	pub fn archived(client: &Client, cursor: Option<&str>) -> Pages<Wrapper> {
		endpoint::paged(endpoint::versioned(client, "archive/reel/day_shells"), cursor)
			.finalize_page(client, NEXT_MAX_ID)
	}

	/// Live stories of the user matching `identifier`.
	pub fn owned_by(client: &Client, identifier: &str) -> Results<Wrapper> {
		feed(client)
			.append_path("user")
			.append_path(identifier)
			.append_path("reel_media")
			.finalize(client)
	}

	/// Live stories of every user in `identifiers`.
	pub fn owned_by_many<I, S>(client: &Client, identifiers: I) -> Results<Wrapper>
	where
		I: IntoIterator<Item = S>,
		S: AsRef<str>,
	{
		let identifiers = identifiers.into_iter().map(|id| id.as_ref().to_owned()).collect::<Vec<_>>();
		// A list of strings always serializes.
		let user_ids = serde_json::to_string(&identifiers).unwrap_or_default();

		feed(client).append_path("reels_media/").body_value("user_ids", Some(user_ids)).finalize(client)
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use crate::{_preludet::*, endpoint::tests::sent};

	#[tokio::test]
	async fn save_posts_without_a_body() {
		let (client, transport) = recording_client();
		let request = sent(save(&client, "17"), &transport).await;

		assert_eq!(request.method, Method::Post);
		assert_eq!(request.url.path(), "/api/v1/media/17/save/");
		assert!(request.body.is_none());
		assert!(request.header("content-type").is_none());
	}

	#[tokio::test]
	async fn timeline_merges_device_fields_and_cursor() {
		let (client, transport) = recording_client();
		let request = sent(timeline(&client, Some("next")), &transport).await;
		let form = request.form().expect("Timeline carries a body.");

		assert_eq!(request.method, Method::Post);
		assert_eq!(request.header("X-FB"), Some("1"));
		assert_eq!(request.header("X-Ads-Opt-Out"), Some("0"));
		assert_eq!(form["max_id"], "next");
		assert_eq!(form["client_session_id"], "s1");
		assert_eq!(form["feed_view_info"], "");
		assert_eq!(form["_uuid"], "00000000-0000-0000-0000-000000000000");
	}

	#[tokio::test]
	async fn likers_page_through_max_id() {
		let (client, transport) = recording_client();

		transport.respond_json(&json!({ "users": [], "next_max_id": "QVFE" }));

		let page = likers(&client, "17", Some("QVFD"))
			.unlock(&secret_fixture())
			.start()
			.await
			.expect("Likers page should decode.");
		let requests = transport.requests();

		assert_eq!(requests[0].url.path(), "/api/v1/media/17/likers");
		assert_eq!(requests[0].url.query(), Some("max_id=QVFD"));
		assert_eq!(page.next_cursor.as_deref(), Some("QVFE"));
	}

	#[tokio::test]
	async fn highlights_advertise_capabilities_and_phone_id() {
		let (client, transport) = recording_client();
		let request = sent(stories::highlights(&client, "42"), &transport).await;
		let query = request.url.query_pairs().into_owned().collect::<BTreeMap<_, _>>();
		let capabilities = serde_json::from_str::<Value>(&query["supported_capabilities_new"])
			.expect("Capabilities are JSON.");

		assert_eq!(request.url.path(), "/api/v1/highlights/42/highlights_tray");
		assert_eq!(query["phone_id"], "00000000-0000-0000-0000-000000000000");
		assert_eq!(query["battery_level"], "72");
		assert_eq!(capabilities.as_array().map(Vec::len), Some(SUPPORTED_CAPABILITIES.len()));
		assert_eq!(capabilities[0]["name"], "SUPPORTED_SDK_VERSIONS");
		assert_eq!(capabilities[1], json!({ "name": "FACE_TRACKER_VERSION", "value": "14" }));
	}

	#[tokio::test]
	async fn reels_media_sends_a_json_list() {
		let (client, transport) = recording_client();
		let request = sent(stories::owned_by_many(&client, ["1", "2"]), &transport).await;
		let form = request.form().expect("reels_media carries a body.");

		assert_eq!(form["user_ids"], r#"["1","2"]"#);
		assert_eq!(request.url.path(), "/api/v1/feed/reels_media/");
	}
}
