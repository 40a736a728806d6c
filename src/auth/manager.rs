//! Token manager: serves the session's cached bearer token or fetches a fresh one.

// self
use crate::{
	_prelude::*,
	auth::{AccessToken, ClientCredentials, Clock, SystemClock, TokenSession},
	carrier::CarrierApiClient,
	error::ConfigError,
	obs::{self, DebugLog, FlowKind, FlowOutcome, QuoteSpan},
};

/// Issues bearer tokens for one set of client credentials.
///
/// A token cached in the caller's [`TokenSession`] is reused until its margin-adjusted expiry.
/// Refreshes are serialized per session, so concurrent quotes sharing a session trigger at
/// most one token request.
#[derive(Clone)]
pub struct TokenManager {
	carrier: Arc<dyn CarrierApiClient>,
	credentials: ClientCredentials,
	clock: Arc<dyn Clock>,
	log: DebugLog,
}
impl TokenManager {
	/// Creates a manager using the system clock and no debug log.
	pub fn new(carrier: Arc<dyn CarrierApiClient>, credentials: ClientCredentials) -> Self {
		Self { carrier, credentials, clock: Arc::new(SystemClock), log: DebugLog::disabled() }
	}

	/// Overrides the clock used for expiry checks.
	pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
		self.clock = clock;

		self
	}

	/// Routes progress messages to `log`.
	pub fn with_debug_log(mut self, log: DebugLog) -> Self {
		self.log = log;

		self
	}

	/// Credentials this manager authenticates with.
	pub fn credentials(&self) -> &ClientCredentials {
		&self.credentials
	}

	/// Returns a valid token for `session`, requesting one from UPS when needed.
	pub async fn get_token(&self, session: &TokenSession) -> Result<AccessToken> {
		QuoteSpan::new(FlowKind::Token, "get_token").instrument(self.resolve(session)).await
	}

	async fn resolve(&self, session: &TokenSession) -> Result<AccessToken> {
		if let Some(token) = self.reuse(session) {
			return Ok(token);
		}

		let guard = session.refresh_guard();
		let _refresh = guard.lock().await;

		// Another caller may have refreshed while this one waited.
		if let Some(token) = self.reuse(session) {
			return Ok(token);
		}

		obs::record_flow_outcome(FlowKind::Token, FlowOutcome::Attempt);

		match self.fetch(session).await {
			Ok(token) => {
				obs::record_flow_outcome(FlowKind::Token, FlowOutcome::Success);

				Ok(token)
			},
			Err(e) => {
				obs::record_flow_outcome(FlowKind::Token, FlowOutcome::Failure);
				self.log_failure(&e);

				Err(e)
			},
		}
	}

	fn reuse(&self, session: &TokenSession) -> Option<AccessToken> {
		let token = session.cached_at(self.clock.now())?;

		obs::record_flow_outcome(FlowKind::Token, FlowOutcome::Reused);
		self.log.record("Existing OAuth token is present.");

		Some(token)
	}

	async fn fetch(&self, session: &TokenSession) -> Result<AccessToken> {
		if !self.credentials.is_complete() {
			return Err(ConfigError::MissingCredentials.into());
		}

		let grant = self.carrier.request_token(&self.credentials).await?;
		let token = AccessToken::from_grant(grant.access_token, grant.expires_in, self.clock.now())?;

		session.store(token.clone());
		self.log.record(format!(
			"OAuth Token successfully retrieved, expires in {} seconds.",
			grant.expires_in - AccessToken::EXPIRY_MARGIN.whole_seconds()
		));

		Ok(token)
	}

	fn log_failure(&self, e: &Error) {
		match e {
			Error::AuthRejected { reason } => self.log.record_section(format!(
				"UPS error returned when requesting OAuth token:\n{}: {reason}",
				crate::carrier::INVALID_CREDENTIALS_CODE
			)),
			Error::Carrier(inner) => self.log.record_section(format!(
				"UPS error returned when requesting OAuth token:\n{}: {}",
				inner.code, inner.message
			)),
			_ => self.log.record(format!("Transport error requesting Token ({e})")),
		}
	}
}
impl Debug for TokenManager {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("TokenManager")
			.field("client_id", &self.credentials.client_id)
			.field("log", &self.log)
			.finish_non_exhaustive()
	}
}

#[cfg(test)]
mod tests {
	// std
	use std::sync::atomic::{AtomicUsize, Ordering};
	// crates.io
	use time::macros::datetime;
	// self
	use super::*;
	use crate::{
		auth::ManualClock,
		carrier::{CarrierFuture, RateRequest, RateResponse, TokenGrant},
	};

	#[derive(Default)]
	struct CountingCarrier {
		calls: AtomicUsize,
	}
	impl CarrierApiClient for CountingCarrier {
		fn request_token<'a>(
			&'a self,
			_: &'a ClientCredentials,
		) -> CarrierFuture<'a, TokenGrant> {
			Box::pin(async move {
				let n = self.calls.fetch_add(1, Ordering::SeqCst) + 1;

				Ok(TokenGrant { access_token: format!("token-{n}"), expires_in: 60 })
			})
		}

		fn shop_rates<'a>(
			&'a self,
			_: &'a AccessToken,
			_: &'a RateRequest,
		) -> CarrierFuture<'a, RateResponse> {
			Box::pin(async { Ok(RateResponse::default()) })
		}
	}

	#[tokio::test]
	async fn reuses_cached_token_until_expiry() {
		let carrier = Arc::new(CountingCarrier::default());
		let clock = ManualClock::new(datetime!(2025-03-01 09:00 UTC));
		let log = DebugLog::in_memory();
		let manager = TokenManager::new(carrier.clone(), ClientCredentials::new("id", "secret"))
			.with_clock(Arc::new(clock.clone()))
			.with_debug_log(log.clone());
		let session = TokenSession::new();
		let first = manager.get_token(&session).await.expect("First token should be issued.");
		let second = manager.get_token(&session).await.expect("Cached token should be reused.");

		assert_eq!(first.access_token.expose(), "token-1");
		assert_eq!(second.access_token.expose(), "token-1");
		assert_eq!(carrier.calls.load(Ordering::SeqCst), 1);

		clock.advance(Duration::seconds(57));

		let third = manager.get_token(&session).await.expect("Expired token should refresh.");

		assert_eq!(third.access_token.expose(), "token-2");
		assert_eq!(carrier.calls.load(Ordering::SeqCst), 2);
		assert!(log.entries().iter().any(|entry| entry.contains("expires in 57 seconds")));
	}

	#[tokio::test]
	async fn incomplete_credentials_never_reach_carrier() {
		let carrier = Arc::new(CountingCarrier::default());
		let manager = TokenManager::new(carrier.clone(), ClientCredentials::new("id", ""));
		let err = manager
			.get_token(&TokenSession::new())
			.await
			.expect_err("Missing secret should fail locally.");

		assert!(matches!(err, Error::Config(ConfigError::MissingCredentials)));
		assert_eq!(carrier.calls.load(Ordering::SeqCst), 0);
	}

	#[tokio::test]
	async fn concurrent_callers_share_one_refresh() {
		let carrier = Arc::new(CountingCarrier::default());
		let manager = TokenManager::new(carrier.clone(), ClientCredentials::new("id", "secret"));
		let session = TokenSession::new();
		let (a, b) = tokio::join!(manager.get_token(&session), manager.get_token(&session));

		assert_eq!(
			a.expect("First caller should succeed.").access_token,
			b.expect("Second caller should succeed.").access_token
		);
		assert_eq!(carrier.calls.load(Ordering::SeqCst), 1);
	}
}
