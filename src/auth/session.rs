//! Session-scoped token slot and the clock used to judge token freshness.
//!
//! A [`TokenSession`] belongs to one storefront session. It holds at most one
//! [`AccessToken`] and a refresh guard so callers sharing the session never fetch twice
//! for the same expiry window.

// self
use crate::{_prelude::*, auth::AccessToken};

/// Source of "now" for token expiry checks.
pub trait Clock
where
	Self: Send + Sync,
{
	/// Returns the current instant.
	fn now(&self) -> OffsetDateTime;
}

/// Wall clock backed by [`OffsetDateTime::now_utc`].
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;
impl Clock for SystemClock {
	fn now(&self) -> OffsetDateTime {
		OffsetDateTime::now_utc()
	}
}

/// Manually advanced clock for deterministic hosts and tests.
#[derive(Clone, Debug)]
pub struct ManualClock(Arc<Mutex<OffsetDateTime>>);
impl ManualClock {
	/// Starts the clock at `start`.
	pub fn new(start: OffsetDateTime) -> Self {
		Self(Arc::new(Mutex::new(start)))
	}

	/// Moves the clock forward by `step`.
	pub fn advance(&self, step: Duration) {
		*self.0.lock() += step;
	}

	/// Jumps the clock to `instant`.
	pub fn set(&self, instant: OffsetDateTime) {
		*self.0.lock() = instant;
	}
}
impl Clock for ManualClock {
	fn now(&self) -> OffsetDateTime {
		*self.0.lock()
	}
}

/// Per-session token cache.
#[derive(Clone, Debug, Default)]
pub struct TokenSession {
	slot: Arc<RwLock<Option<AccessToken>>>,
	refresh_guard: Arc<AsyncMutex<()>>,
}
impl TokenSession {
	/// Creates an empty session slot.
	pub fn new() -> Self {
		Self::default()
	}

	/// Returns the cached token when it is still valid at `now`.
	pub fn cached_at(&self, now: OffsetDateTime) -> Option<AccessToken> {
		self.slot.read().as_ref().filter(|token| !token.is_expired_at(now)).cloned()
	}

	/// Returns the cached token regardless of expiry.
	pub fn current(&self) -> Option<AccessToken> {
		self.slot.read().clone()
	}

	/// Replaces the cached token.
	pub fn store(&self, token: AccessToken) {
		*self.slot.write() = Some(token);
	}

	/// Drops the cached token.
	pub fn clear(&self) {
		self.slot.write().take();
	}

	pub(crate) fn refresh_guard(&self) -> Arc<AsyncMutex<()>> {
		self.refresh_guard.clone()
	}
}
