//! Clock and randomness sources for volatile per-call fields.
//!
//! Executions never read the system clock or RNG directly; they go through an [`Entropy`]
//! implementation so tests can substitute deterministic values.

// crates.io
use rand::Rng;
use uuid::Uuid;
// self
use crate::_prelude::*;

/// Source of timestamps and random tokens.
pub trait Entropy
where
	Self: Send + Sync,
{
	/// Current instant.
	fn now(&self) -> OffsetDateTime;

	/// Fresh lowercase UUID-like token.
	fn session_token(&self) -> String;

	/// Advertised connection speed in kbps.
	fn connection_speed(&self) -> u32;
}

/// Production source backed by the system clock and thread-local RNG.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemEntropy;
impl SystemEntropy {
	const SPEED_KBPS: std::ops::RangeInclusive<u32> = 1_000..=3_700;
}
impl Entropy for SystemEntropy {
	fn now(&self) -> OffsetDateTime {
		OffsetDateTime::now_utc()
	}

	fn session_token(&self) -> String {
		Uuid::new_v4().to_string()
	}

	fn connection_speed(&self) -> u32 {
		rand::rng().random_range(Self::SPEED_KBPS)
	}
}

/// Deterministic source: every draw advances a counter.
///
/// Tokens are UUIDs built from the counter, the clock starts at `origin` and moves one second per
/// [`Entropy::now`] call, and the connection speed cycles through the platform's valid range.
#[derive(Debug)]
pub struct SequenceEntropy {
	origin: OffsetDateTime,
	state: Mutex<SequenceState>,
}
impl SequenceEntropy {
	/// Starts the sequence at `origin`.
	pub fn starting_at(origin: OffsetDateTime) -> Self {
		Self { origin, state: Mutex::new(SequenceState::default()) }
	}

	/// Number of values drawn so far.
	pub fn draws(&self) -> u64 {
		let state = self.state.lock();

		state.ticks + state.tokens + state.speeds
	}
}
impl Default for SequenceEntropy {
	fn default() -> Self {
		Self::starting_at(time::macros::datetime!(2020-03-06 00:00 UTC))
	}
}
impl Entropy for SequenceEntropy {
	fn now(&self) -> OffsetDateTime {
		let mut state = self.state.lock();
		let tick = state.ticks;

		state.ticks += 1;

		self.origin + Duration::seconds(i64::try_from(tick).unwrap_or(i64::MAX))
	}

	fn session_token(&self) -> String {
		let mut state = self.state.lock();

		state.tokens += 1;

		Uuid::from_u128(u128::from(state.tokens)).to_string()
	}

	fn connection_speed(&self) -> u32 {
		let mut state = self.state.lock();
		let span = SystemEntropy::SPEED_KBPS.end() - SystemEntropy::SPEED_KBPS.start() + 1;
		let offset = u32::try_from(state.speeds % u64::from(span)).unwrap_or_default();

		state.speeds += 1;

		SystemEntropy::SPEED_KBPS.start() + offset
	}
}

#[derive(Debug, Default)]
struct SequenceState {
	ticks: u64,
	tokens: u64,
	speeds: u64,
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn system_entropy_stays_within_platform_bounds() {
		let entropy = SystemEntropy;

		for _ in 0..32 {
			assert!(SystemEntropy::SPEED_KBPS.contains(&entropy.connection_speed()));
		}

		assert_ne!(entropy.session_token(), entropy.session_token());
	}

	#[test]
	fn sequence_entropy_is_deterministic_and_advancing() {
		let left = SequenceEntropy::default();
		let right = SequenceEntropy::default();

		assert_eq!(left.session_token(), right.session_token());
		assert_eq!(left.session_token(), "00000000-0000-0000-0000-000000000002");
		assert_eq!(left.now() + Duration::seconds(1), left.now());
		assert_eq!(left.connection_speed(), 1_000);
		assert_eq!(left.connection_speed(), 1_001);
		assert_eq!(left.draws(), 6);
	}
}
