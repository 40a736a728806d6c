//! Reqwest transport shared by the token and rating calls.
//!
//! [`ReqwestHttpClient`] is the only place the crate touches reqwest directly. It sends a
//! prepared request, reads the full body, and hands back an [`HttpReply`] so the carrier
//! layer can decode success and error envelopes from the same bytes.

// std
use std::ops::Deref;
// crates.io
use reqwest::{RequestBuilder, redirect::Policy};
// self
use crate::{
	_prelude::*,
	error::{ConfigError, TransportError},
};

/// Status and body of a completed HTTP exchange.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpReply {
	/// HTTP status code.
	pub status: u16,
	/// Raw response body.
	pub body: Vec<u8>,
}
impl HttpReply {
	/// Whether the status is in the 2xx range.
	pub fn is_success(&self) -> bool {
		(200..300).contains(&self.status)
	}
}

/// Thin wrapper around [`ReqwestClient`] so shared HTTP behavior lives in one place.
///
/// UPS answers both endpoints directly, so the default client never follows redirects.
/// Callers supplying their own [`ReqwestClient`] should configure it the same way.
#[derive(Clone, Debug, Default)]
pub struct ReqwestHttpClient(pub ReqwestClient);
impl ReqwestHttpClient {
	/// Builds a client with redirects disabled.
	pub fn new() -> Result<Self, ConfigError> {
		let client = ReqwestClient::builder().redirect(Policy::none()).build()?;

		Ok(Self(client))
	}

	/// Wraps an existing reqwest [`ReqwestClient`].
	pub fn with_client(client: ReqwestClient) -> Self {
		Self(client)
	}

	/// Sends `request` and collects the reply for the `endpoint` label.
	pub(crate) async fn send(
		&self,
		endpoint: &'static str,
		request: RequestBuilder,
	) -> Result<HttpReply> {
		let request = request.build().map_err(|e| map_reqwest_error(endpoint, e))?;
		let response = self.0.execute(request).await.map_err(|e| map_reqwest_error(endpoint, e))?;
		let status = response.status().as_u16();
		let body = response.bytes().await.map_err(|e| map_reqwest_error(endpoint, e))?.to_vec();

		Ok(HttpReply { status, body })
	}
}
impl AsRef<ReqwestClient> for ReqwestHttpClient {
	fn as_ref(&self) -> &ReqwestClient {
		&self.0
	}
}
impl Deref for ReqwestHttpClient {
	type Target = ReqwestClient;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}

fn map_reqwest_error(endpoint: &'static str, e: ReqwestError) -> Error {
	if e.is_builder() {
		ConfigError::from(e).into()
	} else {
		TransportError::network(endpoint, e).into()
	}
}
