//! UPS OAuth client credentials and their HTTP Basic encoding.

// crates.io
use base64::{Engine, engine::general_purpose::STANDARD};
// self
use crate::{_prelude::*, auth::Secret};

/// Client ID/secret pair issued by the UPS developer portal.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientCredentials {
	/// OAuth client identifier; also sent as the `x-merchant-id` header.
	pub client_id: String,
	/// OAuth client secret.
	pub client_secret: Secret,
}
impl ClientCredentials {
	/// Creates a credential pair.
	pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
		Self { client_id: client_id.into(), client_secret: Secret::new(client_secret) }
	}

	/// Returns true when both halves are supplied.
	pub fn is_complete(&self) -> bool {
		!self.client_id.is_empty() && !self.client_secret.is_empty()
	}

	/// Builds the `Authorization` header value for the client-credentials grant.
	pub fn basic_authorization(&self) -> String {
		let raw = format!("{}:{}", self.client_id, self.client_secret.expose());

		format!("Basic {}", STANDARD.encode(raw))
	}
}
