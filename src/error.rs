//! Module-level error types shared by the token manager, rate quoter, and admin helpers.

// self
use crate::_prelude::*;

/// Crate-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Configuration-store failure.
	#[error("{0}")]
	Storage(
		#[from]
		#[source]
		crate::store::StoreError,
	),
	/// Local configuration problem; the module cannot be enabled until it is fixed.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Transport failure reaching UPS (DNS, TCP, TLS, I/O).
	#[error(transparent)]
	Transport(#[from] TransportError),
	/// UPS answered with a body that could not be decoded.
	#[error(transparent)]
	Decode(#[from] DecodeError),

	/// UPS does not recognize the client credentials.
	#[error("UPS rejected the client credentials: {reason}.")]
	AuthRejected {
		/// Carrier-supplied reason string.
		reason: String,
	},
	/// UPS accepted the request but declined to answer it.
	#[error(transparent)]
	Carrier(#[from] CarrierError),
}

/// Error block returned by UPS for a well-formed request it refuses to quote.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
#[error("UPS returned error {code}: {message}.")]
pub struct CarrierError {
	/// Numeric carrier error code, kept as the string UPS sent.
	pub code: String,
	/// Carrier-supplied message.
	pub message: String,
}
impl CarrierError {
	/// Builds a carrier error from its code and message.
	pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
		Self { code: code.into(), message: message.into() }
	}
}

/// Configuration and validation failures.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// Client ID or client secret is empty.
	#[error("Both the client ID and the client secret are required.")]
	MissingCredentials,
	/// Origin postcode is required for the configured origin region.
	#[error("The origin postcode is required for the {origin} origin.")]
	MissingOriginPostcode {
		/// Configured origin label.
		origin: &'static str,
	},
	/// Configured carrier API implementation is not registered.
	#[error("The carrier API class `{name}` is not registered.")]
	MissingApiClass {
		/// Name stored in the configuration.
		name: String,
	},
	/// A required configuration row is absent.
	#[error("Configuration key `{key}` is missing.")]
	MissingSetting {
		/// Configuration key.
		key: &'static str,
	},
	/// A configuration row holds a value that cannot be interpreted.
	#[error("Configuration key `{key}` has an invalid value `{value}`.")]
	InvalidSetting {
		/// Configuration key.
		key: &'static str,
		/// Offending value.
		value: String,
	},
	/// Stored module version cannot be parsed.
	#[error("Module version `{value}` is invalid.")]
	InvalidVersion {
		/// Offending value.
		value: String,
	},
	/// Endpoint URL cannot be built.
	#[error("Carrier endpoint URL is invalid.")]
	InvalidEndpoint {
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// HTTP client could not be constructed or the request could not be built.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
	/// Token endpoint returned a non-positive lifetime.
	#[error("The expires_in value must be positive.")]
	NonPositiveExpiresIn,
	/// Token endpoint returned a lifetime no calendar instant can hold.
	#[error("The expires_in value {value} is out of range.")]
	ExpiresInOutOfRange {
		/// Lifetime in seconds as reported.
		value: i64,
	},
}
impl ConfigError {
	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}

	/// Shorthand for [`ConfigError::InvalidSetting`].
	pub fn invalid(key: &'static str, value: impl Into<String>) -> Self {
		Self::InvalidSetting { key, value: value.into() }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for ConfigError {
	fn from(e: ReqwestError) -> Self {
		Self::http_client_build(e)
	}
}

/// Transport-level failures (network, IO).
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while calling the {endpoint} endpoint.")]
	Network {
		/// Endpoint label (`token` or `rating`).
		endpoint: &'static str,
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
	/// Outbound request body could not be serialized.
	#[error("The {endpoint} request body could not be encoded.")]
	Encode {
		/// Endpoint label (`token` or `rating`).
		endpoint: &'static str,
		/// Serialization failure.
		#[source]
		source: serde_json::Error,
	},
	/// Underlying IO failure surfaced during transport.
	#[error("I/O error occurred while calling UPS.")]
	Io(#[from] std::io::Error),
}
impl TransportError {
	/// Wraps a transport-specific network error.
	pub fn network(
		endpoint: &'static str,
		src: impl 'static + Send + Sync + std::error::Error,
	) -> Self {
		Self::Network { endpoint, source: Box::new(src) }
	}
}

/// Failures decoding UPS response bodies.
#[derive(Debug, ThisError)]
pub enum DecodeError {
	/// Body is not the JSON shape expected for the endpoint.
	#[error("The {endpoint} endpoint returned malformed JSON.")]
	Json {
		/// Endpoint label (`token` or `rating`).
		endpoint: &'static str,
		/// HTTP status code, when available.
		status: Option<u16>,
		/// Structured parsing failure including the JSON path.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
	},
	/// A required field is absent from an otherwise valid body.
	#[error("The {endpoint} endpoint response is missing `{field}`.")]
	MissingField {
		/// Endpoint label (`token` or `rating`).
		endpoint: &'static str,
		/// Field name.
		field: &'static str,
	},
	/// A numeric field could not be interpreted.
	#[error("Field `{field}` holds a non-numeric value `{value}`.")]
	InvalidNumber {
		/// Field name.
		field: &'static str,
		/// Offending value.
		value: String,
	},
}
