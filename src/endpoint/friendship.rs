//! `friendships/*` endpoints, including the signed relationship edits.

// self
use crate::{
	client::Client,
	endpoint::{self, NEXT_MAX_ID, Pages, Results},
	request::Request,
	response::{Status, Wrapper},
};

fn base(client: &Client) -> Request {
	endpoint::versioned(client, "friendships")
}

/// Users followed by the user matching `identifier`.
pub fn followed_by(client: &Client, identifier: &str, cursor: Option<&str>) -> Pages<Wrapper> {
	endpoint::paged(base(client).append_path(identifier).append_path("following"), cursor)
		.finalize_page(client, NEXT_MAX_ID)
}

/// Users following the user matching `identifier`.
pub fn following(client: &Client, identifier: &str, cursor: Option<&str>) -> Pages<Wrapper> {
	endpoint::paged(base(client).append_path(identifier).append_path("followers"), cursor)
		.finalize_page(client, NEXT_MAX_ID)
}

/// Friendship status with the user matching `identifier`.
pub fn summary(client: &Client, identifier: &str) -> Results<Wrapper> {
	base(client).append_path("show").append_path(identifier).finalize(client)
}

/// Friendship statuses with every user in `identifiers`.
pub fn summaries<I, S>(client: &Client, identifiers: I) -> Results<Wrapper>
where
	I: IntoIterator<Item = S>,
	S: AsRef<str>,
{
	let identifiers =
		identifiers.into_iter().map(|id| id.as_ref().to_owned()).collect::<Vec<_>>().join(",");

	base(client).append_path("show_many/").body_value("user_ids", Some(identifiers)).finalize_with(
		client,
		|request, _, secret| {
			request.merge_body([
				("_csrftoken", secret.csrf_token().map(str::to_owned)),
				("_uuid", Some(secret.device().uuid())),
			])
		},
	)
}

/// Follow requests waiting for approval.
pub fn pending(client: &Client, cursor: Option<&str>) -> Pages<Wrapper> {
	endpoint::paged(base(client).append_path("pending"), cursor).finalize_page(client, NEXT_MAX_ID)
}

/// Follows (or requests to follow) the user matching `identifier`.
pub fn follow(client: &Client, identifier: &str) -> Results<Status> {
	edit(client, "create", identifier)
}

/// Unfollows the user matching `identifier`.
pub fn unfollow(client: &Client, identifier: &str) -> Results<Status> {
	edit(client, "destroy", identifier)
}

/// Removes the user matching `identifier` from the authenticated user's followers.
pub fn remove_follower(client: &Client, identifier: &str) -> Results<Status> {
	edit(client, "remove_follower", identifier)
}

/// Accepts a follow request.
pub fn accept(client: &Client, identifier: &str) -> Results<Status> {
	edit(client, "approve", identifier)
}

/// Rejects a follow request.
pub fn reject(client: &Client, identifier: &str) -> Results<Status> {
	edit(client, "reject", identifier)
}

/// Blocks the user matching `identifier`.
pub fn block(client: &Client, identifier: &str) -> Results<Status> {
	edit(client, "block", identifier)
}

/// Unblocks the user matching `identifier`.
pub fn unblock(client: &Client, identifier: &str) -> Results<Status> {
	edit(client, "unblock", identifier)
}

fn edit(client: &Client, action: &str, identifier: &str) -> Results<Status> {
	base(client)
		.append_path(action)
		.append_path(identifier)
		.append_path("/")
		.signing([("user_id", Some(identifier)), ("radio_type", Some("wifi-none"))])
		.finalize(client)
}

#[cfg(test)]
mod tests {
	// crates.io
	use serde_json::Value;
	// self
	use super::*;
	use crate::{_preludet::*, endpoint::tests::sent, error::SigningError, request::Method};

	#[tokio::test]
	async fn follow_signs_the_relationship_edit() {
		let (client, transport) = recording_client();
		let request = sent(follow(&client, "1337"), &transport).await;
		let form = request.form().expect("Signed edits carry a body.");
		let (signature, payload) =
			form["signed_body"].split_once('.').expect("Signed body is `<hex>.<json>`.");
		let payload = serde_json::from_str::<Value>(payload).expect("Payload is JSON.");

		assert_eq!(request.method, Method::Post);
		assert_eq!(request.url.path(), "/api/v1/friendships/create/1337/");
		assert_eq!(signature.len(), 64);
		assert_eq!(payload["user_id"], "1337");
		assert_eq!(payload["radio_type"], "wifi-none");
		assert_eq!(payload["_csrftoken"], "c1");
		assert_eq!(payload["_uid"], "42");
		assert_eq!(payload["device_id"], "android-0000000000000000");
	}

	#[tokio::test]
	async fn follow_without_csrf_token_never_sends() {
		let (client, transport) = recording_client();
		let secret = secret_fixture().without_cookie("csrftoken");
		let err = follow(&client, "1337")
			.unlock(&secret)
			.start()
			.await
			.expect_err("Unsigned writes must not be sent.");

		assert!(matches!(err, Error::Signing(SigningError::MissingField { .. })));
		assert_eq!(transport.calls(), 0);
	}

	#[tokio::test]
	async fn summaries_inject_secret_fields_into_the_body() {
		let (client, transport) = recording_client();
		let request = sent(summaries(&client, ["1", "2"]), &transport).await;
		let form = request.form().expect("show_many carries a body.");

		assert_eq!(request.url.path(), "/api/v1/friendships/show_many/");
		assert_eq!(form["user_ids"], "1,2");
		assert_eq!(form["_csrftoken"], "c1");
		assert_eq!(form["_uuid"], "00000000-0000-0000-0000-000000000000");
	}
}
