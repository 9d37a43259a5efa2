//! Location endpoints.

// self
use crate::{
	client::Client,
	endpoint::{self, Results},
	response::Wrapper,
};

/// Latitude and longitude in decimal degrees.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Coordinates {
	/// Latitude.
	pub latitude: f64,
	/// Longitude.
	pub longitude: f64,
}

/// Locations around `coordinates`, optionally narrowed by `query`.
///
/// Without a query the platform expects a millisecond timestamp, drawn at execution time from the
/// client's entropy source.
pub fn around(client: &Client, coordinates: Coordinates, query: Option<&str>) -> Results<Wrapper> {
	let clock = client.clone();
	let searching = query.is_some();

	client
		.version1()
		.append_path("location_search/")
		.merge_query([
			("rank_token", Some(String::new())),
			("latitude", Some(coordinates.latitude.to_string())),
			("longitude", Some(coordinates.longitude.to_string())),
			("search_query", query.map(str::to_owned)),
		])
		.authenticate_with(move |request, _, secret| {
			let timestamp = (!searching)
				.then(|| (clock.entropy().now().unix_timestamp_nanos() / 1_000_000).to_string());

			request.merge_query([
				("timestamp", timestamp),
				("_csrftoken", secret.csrf_token().map(str::to_owned)),
				("_uid", Some(secret.label().to_owned())),
				("_uuid", Some(secret.device().uuid())),
			])
		})
		.finalize(client)
}

/// Details of the location matching `identifier`.
pub fn summary(client: &Client, identifier: &str) -> Results<Wrapper> {
	endpoint::versioned(client, "locations")
		.append_path(identifier)
		.append_path("info/")
		.finalize(client)
}

/// Stories currently published at the location matching `identifier`.
pub fn stories(client: &Client, identifier: &str) -> Results<Wrapper> {
	endpoint::versioned(client, "locations")
		.append_path(identifier)
		.append_path("story/")
		.finalize(client)
}
