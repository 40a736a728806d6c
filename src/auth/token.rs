//! Bearer token issued by the UPS identity endpoint.

// self
use crate::{_prelude::*, auth::Secret, error::ConfigError};

/// Lifecycle status for an [`AccessToken`] at a given instant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TokenStatus {
	/// Token can still be sent to UPS.
	Active,
	/// Token reached its (margin-adjusted) expiry.
	Expired,
}

/// Bearer token plus the instant after which it must not be reused.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AccessToken {
	/// Bearer value; callers must avoid logging it.
	pub access_token: Secret,
	/// Instant the grant was received.
	pub issued_at: OffsetDateTime,
	/// Instant after which the token is considered stale.
	pub expires_at: OffsetDateTime,
}
impl AccessToken {
	/// Safety margin subtracted from the carrier-reported lifetime.
	pub const EXPIRY_MARGIN: Duration = Duration::seconds(3);

	/// Builds a token from a grant received at `now` with the carrier's `expires_in` seconds.
	pub fn from_grant(
		access_token: impl Into<String>,
		expires_in: i64,
		now: OffsetDateTime,
	) -> Result<Self, ConfigError> {
		if expires_in <= 0 {
			return Err(ConfigError::NonPositiveExpiresIn);
		}

		let expires_at = now
			.checked_add(Duration::seconds(expires_in))
			.and_then(|instant| instant.checked_sub(Self::EXPIRY_MARGIN))
			.ok_or(ConfigError::ExpiresInOutOfRange { value: expires_in })?;

		Ok(Self { access_token: Secret::new(access_token), issued_at: now, expires_at })
	}

	/// Computes the lifecycle status at a given instant.
	pub fn status_at(&self, instant: OffsetDateTime) -> TokenStatus {
		if instant >= self.expires_at { TokenStatus::Expired } else { TokenStatus::Active }
	}

	/// Returns true once `instant >= expires_at`.
	pub fn is_expired_at(&self, instant: OffsetDateTime) -> bool {
		matches!(self.status_at(instant), TokenStatus::Expired)
	}

	/// Seconds of validity left at `instant`, clamped at zero.
	pub fn remaining_at(&self, instant: OffsetDateTime) -> Duration {
		let remaining = self.expires_at - instant;

		if remaining.is_negative() { Duration::ZERO } else { remaining }
	}

	/// `Authorization` header value for carrier API calls.
	pub fn bearer(&self) -> String {
		format!("Bearer {}", self.access_token.expose())
	}
}
