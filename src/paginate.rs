//! Lazy, restartable cursor-driven sequences.
//!
//! A [`Paginator`] turns a `cursor -> Lock<Page<T>>` function into a sequence of decoded pages.
//! Pages are fetched one at a time: page N+1 is only requested after page N has produced its
//! cursor, and nothing is fetched until [`Paginator::next_page`] is awaited.
//!
//! ```no_run
//! # async fn demo(client: gram_request::client::Client, secret: gram_request::secret::Secret) {
//! use gram_request::{endpoint::direct, paginate};
//!
//! let mut inbox = paginate::paginate(&secret, move |cursor| direct::inbox(&client, cursor))
//! 	.with_max_pages(3);
//!
//! while let Some(page) = inbox.next_page().await {
//! 	println!("{:?}", page.map(|value| value.status().map(str::to_owned)));
//! }
//! # }
//! ```

// crates.io
use futures::stream::{self, Stream};
// self
use crate::{_prelude::*, lock::Lock, response::Page, secret::Secret};

type MakeLock<T> = Arc<dyn Fn(Option<&str>) -> Lock<Page<T>> + Send + Sync>;

/// Position of a [`Paginator`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PageState {
	/// The next fetch uses this cursor (`None` for the first page).
	HasCursor(Option<String>),
	/// No further page will be fetched until [`Paginator::restart`].
	Exhausted,
}

/// Lazy sequence of pages fetched with a single secret.
pub struct Paginator<T> {
	make_lock: MakeLock<T>,
	secret: Secret,
	state: PageState,
	origin: Option<String>,
	max_pages: Option<usize>,
	fetched: usize,
}
impl<T> Paginator<T>
where
	T: 'static + Send,
{
	/// Creates a paginator positioned before the first page.
	pub fn new<F>(secret: &Secret, make_lock: F) -> Self
	where
		F: 'static + Send + Sync + Fn(Option<&str>) -> Lock<Page<T>>,
	{
		Self {
			make_lock: Arc::new(make_lock),
			secret: secret.clone(),
			state: PageState::HasCursor(None),
			origin: None,
			max_pages: None,
			fetched: 0,
		}
	}

	/// Starts from `cursor` instead of the first page; [`restart`](Self::restart) returns here.
	pub fn starting_at(mut self, cursor: impl Into<String>) -> Self {
		let cursor = cursor.into();

		self.origin = Some(cursor.clone());
		self.state = PageState::HasCursor(Some(cursor));

		self
	}

	/// Stops after `max_pages` pages even if the platform keeps returning cursors.
	pub fn with_max_pages(mut self, max_pages: usize) -> Self {
		self.max_pages = Some(max_pages);

		self
	}

	/// Current position.
	pub fn state(&self) -> &PageState {
		&self.state
	}

	/// Number of pages fetched since construction or the last restart.
	pub fn fetched(&self) -> usize {
		self.fetched
	}

	/// Resets the sequence to its starting cursor.
	pub fn restart(&mut self) {
		self.state = PageState::HasCursor(self.origin.clone());
		self.fetched = 0;
	}

	/// Fetches the next page.
	///
	/// Returns `None` once exhausted. A failed fetch is yielded once and exhausts the sequence;
	/// pages yielded before it stay valid.
	pub async fn next_page(&mut self) -> Option<Result<T>> {
		if self.max_pages.is_some_and(|max| self.fetched >= max) {
			self.state = PageState::Exhausted;
		}

		let PageState::HasCursor(cursor) = &self.state else {
			return None;
		};
		let promise = (self.make_lock)(cursor.as_deref()).unlock(&self.secret);

		self.fetched += 1;

		match promise.start().await {
			Ok(Page { value, next_cursor }) => {
				self.state = match next_cursor {
					Some(cursor) => PageState::HasCursor(Some(cursor)),
					None => PageState::Exhausted,
				};

				Some(Ok(value))
			},
			Err(e) => {
				self.state = PageState::Exhausted;

				Some(Err(e))
			},
		}
	}

	/// Adapts the paginator into a [`Stream`] of pages.
	pub fn into_stream(self) -> impl Stream<Item = Result<T>> + Send {
		stream::unfold(self, |mut paginator| async move {
			paginator.next_page().await.map(|page| (page, paginator))
		})
	}
}
impl<T> Debug for Paginator<T> {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Paginator")
			.field("state", &self.state)
			.field("fetched", &self.fetched)
			.field("max_pages", &self.max_pages)
			.finish_non_exhaustive()
	}
}

/// Builds a [`Paginator`] over `make_lock`, unlocked with `secret` on every page.
pub fn paginate<T, F>(secret: &Secret, make_lock: F) -> Paginator<T>
where
	T: 'static + Send,
	F: 'static + Send + Sync + Fn(Option<&str>) -> Lock<Page<T>>,
{
	Paginator::new(secret, make_lock)
}
