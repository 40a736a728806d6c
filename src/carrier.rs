//! UPS carrier API: endpoint layout, the client capability trait, and error classification.
//!
//! [`CarrierApiClient`] is the seam between the module and the network. The default
//! implementation is [`ReqwestCarrierClient`]; hosts and tests can register alternatives in a
//! [`CarrierRegistry`] and select one through the `API_CLASS` setting.

#[cfg(feature = "reqwest")] pub mod client;
pub mod registry;
pub mod wire;

#[cfg(feature = "reqwest")] pub use client::*;
pub use registry::*;
pub use wire::{RateRequest, RateResponse, TokenGrant};

// self
use crate::{
	_prelude::*,
	auth::{AccessToken, ClientCredentials},
	carrier::wire::ErrorDetail,
	config::Mode,
	error::{CarrierError, ConfigError},
};

/// Boxed future returned by [`CarrierApiClient`] calls.
pub type CarrierFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T>> + 'a + Send>>;

/// Error code UPS returns when it does not recognize the client credentials.
pub const INVALID_CREDENTIALS_CODE: &str = "10401";

/// Customer integration environment.
pub const TEST_BASE: &str = "https://wwwcie.ups.com/";
/// Live environment.
pub const PRODUCTION_BASE: &str = "https://onlinetools.ups.com/";
/// OAuth token path.
pub const TOKEN_PATH: &str = "security/v1/oauth/token";
/// Rate-shop path.
pub const RATING_PATH: &str = "api/rating/v1/Shop";

/// Operations the module needs from UPS.
pub trait CarrierApiClient
where
	Self: Send + Sync,
{
	/// Exchanges client credentials for a bearer token.
	fn request_token<'a>(
		&'a self,
		credentials: &'a ClientCredentials,
	) -> CarrierFuture<'a, TokenGrant>;

	/// Requests rates for every service UPS offers for the shipment.
	fn shop_rates<'a>(
		&'a self,
		token: &'a AccessToken,
		request: &'a RateRequest,
	) -> CarrierFuture<'a, RateResponse>;
}

/// Base URL plus the two API paths.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CarrierEndpoints {
	/// Base URL, ending with `/`.
	pub base: Url,
}
impl CarrierEndpoints {
	/// Endpoints for the configured server mode.
	pub fn for_mode(mode: Mode) -> Result<Self, ConfigError> {
		let base = match mode {
			Mode::Test => TEST_BASE,
			Mode::Production => PRODUCTION_BASE,
		};

		Url::parse(base)
			.map(|base| Self { base })
			.map_err(|source| ConfigError::InvalidEndpoint { source })
	}

	/// Endpoints rooted at an arbitrary base, such as a mock server.
	pub fn custom(base: Url) -> Self {
		Self { base }
	}

	/// Absolute token URL.
	pub fn token_url(&self) -> Result<Url, ConfigError> {
		self.base.join(TOKEN_PATH).map_err(|source| ConfigError::InvalidEndpoint { source })
	}

	/// Absolute rate-shop URL.
	pub fn rating_url(&self) -> Result<Url, ConfigError> {
		self.base.join(RATING_PATH).map_err(|source| ConfigError::InvalidEndpoint { source })
	}
}

/// Maps a token-endpoint error block; `10401` means the credentials were rejected.
pub fn classify_token_errors(errors: &[ErrorDetail]) -> Error {
	if let Some(rejected) =
		errors.iter().find(|detail| detail.code.to_string() == INVALID_CREDENTIALS_CODE)
	{
		return Error::AuthRejected { reason: rejected.message.clone() };
	}

	classify_rating_errors(errors)
}

/// Maps a rating-endpoint error block to the first reported carrier error.
pub fn classify_rating_errors(errors: &[ErrorDetail]) -> Error {
	match errors.first() {
		Some(detail) => CarrierError::new(detail.code.to_string(), detail.message.clone()).into(),
		None => CarrierError::new("", "UPS returned an empty error block").into(),
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use crate::carrier::wire::Numeric;

	fn detail(code: &str, message: &str) -> ErrorDetail {
		ErrorDetail { code: Numeric::Text(code.into()), message: message.into() }
	}

	#[test]
	fn endpoints_follow_mode() {
		let test = CarrierEndpoints::for_mode(Mode::Test).expect("Test base should parse.");
		let live =
			CarrierEndpoints::for_mode(Mode::Production).expect("Production base should parse.");

		assert_eq!(
			test.token_url().expect("Token URL should join.").as_str(),
			"https://wwwcie.ups.com/security/v1/oauth/token"
		);
		assert_eq!(
			live.rating_url().expect("Rating URL should join.").as_str(),
			"https://onlinetools.ups.com/api/rating/v1/Shop"
		);
	}

	#[test]
	fn invalid_credentials_code_is_auth_rejection() {
		let err = classify_token_errors(&[
			detail("250002", "Invalid Authentication Information."),
			detail("10401", "ClientId is Invalid"),
		]);

		assert!(matches!(err, Error::AuthRejected { ref reason } if reason == "ClientId is Invalid"));
	}

	#[test]
	fn other_codes_become_carrier_errors() {
		let err = classify_token_errors(&[detail("10400", "Invalid/Missing Authorization Header")]);

		assert!(matches!(err, Error::Carrier(ref inner) if inner.code == "10400"));

		let err = classify_rating_errors(&[detail("111285", "The postal code is invalid")]);

		assert!(matches!(err, Error::Carrier(ref inner) if inner.code == "111285"));
	}
}
