//! Representative endpoint catalog built on the pipeline.
//!
//! Every function here is a mechanical composition: start from one of the [`Client`] base
//! descriptors, append a path, add query/header/body fields, and finalize into a secret-gated
//! [`Lock`]. Paged endpoints take the cursor of the page to fetch (`None` for the first one) and
//! extract the next cursor from a per-endpoint key, so they plug straight into
//! [`paginate`](crate::paginate::paginate).

pub mod direct;
pub mod discover;
pub mod friendship;
pub mod location;
pub mod media;
pub mod user;

// self
use crate::{client::Client, lock::Lock, request::Request, response::Page};

/// Query field carrying the cursor of most feeds.
pub const MAX_ID: &str = "max_id";
/// Response field carrying the next cursor of most feeds.
pub const NEXT_MAX_ID: &str = "next_max_id";

/// Single-response endpoint.
pub type Results<T> = Lock<T>;
/// Paged endpoint.
pub type Pages<T> = Lock<Page<T>>;

/// Adds the `max_id` cursor; `None` leaves the query untouched.
pub fn paged(request: Request, cursor: Option<&str>) -> Request {
	request.query_value(MAX_ID, cursor)
}

/// Base descriptor for `api/v1/<segment>`.
pub(crate) fn versioned(client: &Client, segment: &str) -> Request {
	client.version1().append_path(segment)
}
