//! Secret-gated promise factories.

// self
use crate::{_prelude::*, promise::DelayedPromise, secret::Secret};

type Unlock<T> = Arc<dyn Fn(Secret) -> DelayedPromise<T> + Send + Sync>;

/// A call that cannot run until a [`Secret`] is supplied.
///
/// A lock owns no network capability of its own; [`unlock`](Self::unlock) is the only way to reach
/// a runnable [`DelayedPromise`]. Every unlock clones the secret into a brand-new promise, so
/// promises minted from different secrets never share credential material.
pub struct Lock<T> {
	unlock: Unlock<T>,
}
impl<T> Lock<T>
where
	T: 'static + Send,
{
	/// Wraps a secret-to-promise factory.
	pub fn new<F>(unlock: F) -> Self
	where
		F: 'static + Send + Sync + Fn(Secret) -> DelayedPromise<T>,
	{
		Self { unlock: Arc::new(unlock) }
	}

	/// Supplies the secret and returns a ready-to-start promise. No I/O happens here.
	pub fn unlock(&self, secret: &Secret) -> DelayedPromise<T> {
		(self.unlock)(secret.clone())
	}

	/// Transforms the output of every promise this lock mints.
	pub fn map<U, F>(self, f: F) -> Lock<U>
	where
		U: 'static + Send,
		F: 'static + Send + Sync + Fn(T) -> U,
	{
		let unlock = self.unlock;
		let f = Arc::new(f);

		Lock::new(move |secret| {
			let f = Arc::clone(&f);

			unlock(secret).map(move |value| f(value))
		})
	}
}
impl<T> Clone for Lock<T> {
	fn clone(&self) -> Self {
		Self { unlock: Arc::clone(&self.unlock) }
	}
}
impl<T> Debug for Lock<T> {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("Lock(..)")
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use crate::_preludet::secret_fixture;

	fn echo_label() -> Lock<String> {
		Lock::new(|secret: Secret| {
			DelayedPromise::new(move || {
				let label = secret.label().to_owned();

				async move { Ok(label) }
			})
		})
	}

	#[tokio::test]
	async fn unlocks_are_independent() {
		let lock = echo_label();
		let first = secret_fixture();
		let second = Secret::new("7", [("sessionid", "s2")], first.device().clone())
			.expect("Numeric label should be accepted.");
		let first = lock.unlock(&first);
		let second = lock.unlock(&second);

		assert_eq!(second.start().await.expect("Second promise should resolve."), "7");
		assert_eq!(first.start().await.expect("First promise should resolve."), "42");
	}

	#[tokio::test]
	async fn map_applies_to_every_minted_promise() {
		let lock = echo_label().map(|label| label.len());

		let len = lock.unlock(&secret_fixture()).start().await.expect("Mapped promise should resolve.");

		assert_eq!(len, 2);
	}
}
