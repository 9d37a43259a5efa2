//! Restartable, zero-argument deferred computations.
//!
//! A [`DelayedPromise`] does nothing until [`start`](DelayedPromise::start) is called. Every start
//! runs the whole computation again (no caching), so volatile fields are recomputed and the
//! caller decides whether repeating a call is safe. Chaining with [`map`](DelayedPromise::map) or
//! [`and_then`](DelayedPromise::and_then) builds a new promise without starting the old one.

// self
use crate::_prelude::*;

/// Boxed future returned by [`DelayedPromise::start`].
pub type PromiseFuture<T> = Pin<Box<dyn Future<Output = Result<T>> + Send>>;

type Run<T> = Arc<dyn Fn() -> PromiseFuture<T> + Send + Sync>;

/// Deferred unit of work producing `Result<T>`.
pub struct DelayedPromise<T> {
	run: Run<T>,
}
impl<T> DelayedPromise<T>
where
	T: 'static + Send,
{
	/// Wraps a future factory. The factory runs once per [`start`](Self::start).
	pub fn new<F, Fut>(factory: F) -> Self
	where
		F: 'static + Send + Sync + Fn() -> Fut,
		Fut: 'static + Send + Future<Output = Result<T>>,
	{
		Self { run: Arc::new(move || Box::pin(factory()) as PromiseFuture<T>) }
	}

	/// Starts a fresh execution.
	pub fn start(&self) -> PromiseFuture<T> {
		(self.run)()
	}

	/// Transforms the output of future executions.
	pub fn map<U, F>(self, f: F) -> DelayedPromise<U>
	where
		U: 'static + Send,
		F: 'static + Send + Sync + Fn(T) -> U,
	{
		self.and_then(move |value| Ok(f(value)))
	}

	/// Transforms the output of future executions with a fallible step.
	pub fn and_then<U, F>(self, f: F) -> DelayedPromise<U>
	where
		U: 'static + Send,
		F: 'static + Send + Sync + Fn(T) -> Result<U>,
	{
		let run = self.run;
		let f = Arc::new(f);

		DelayedPromise::new(move || {
			let pending = run();
			let f = Arc::clone(&f);

			async move { pending.await.and_then(|value| f(value)) }
		})
	}
}
impl<T> Clone for DelayedPromise<T> {
	fn clone(&self) -> Self {
		Self { run: Arc::clone(&self.run) }
	}
}
impl<T> Debug for DelayedPromise<T> {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("DelayedPromise(..)")
	}
}

#[cfg(test)]
mod tests {
	// std
	use std::sync::atomic::{AtomicUsize, Ordering};
	// self
	use super::*;

	fn counting() -> (DelayedPromise<usize>, Arc<AtomicUsize>) {
		let counter = Arc::new(AtomicUsize::new(0));
		let shared = Arc::clone(&counter);
		let promise = DelayedPromise::new(move || {
			let shared = Arc::clone(&shared);

			async move { Ok(shared.fetch_add(1, Ordering::SeqCst) + 1) }
		});

		(promise, counter)
	}

	#[tokio::test]
	async fn construction_and_chaining_are_inert() {
		let (promise, counter) = counting();
		let mapped = promise.map(|value| value * 10);

		assert_eq!(counter.load(Ordering::SeqCst), 0);
		assert_eq!(mapped.start().await.expect("Mapped promise should resolve."), 10);
		assert_eq!(counter.load(Ordering::SeqCst), 1);
	}

	#[tokio::test]
	async fn every_start_runs_again() {
		let (promise, counter) = counting();

		assert_eq!(promise.start().await.expect("First start should resolve."), 1);
		assert_eq!(promise.clone().start().await.expect("Second start should resolve."), 2);
		assert_eq!(counter.load(Ordering::SeqCst), 2);
	}

	#[tokio::test]
	async fn and_then_propagates_failures() {
		let (promise, _) = counting();
		let failing = promise.and_then(|_| -> Result<()> {
			Err(Error::Api { status: 500, message: None })
		});

		assert!(matches!(failing.start().await, Err(Error::Api { status: 500, .. })));
	}

	#[tokio::test]
	async fn dropping_an_unpolled_start_runs_nothing() {
		let (promise, counter) = counting();
		let pending = promise.start();

		drop(pending);

		assert_eq!(counter.load(Ordering::SeqCst), 0);
		assert_eq!(promise.start().await.expect("Fresh start should resolve."), 1);
	}
}
