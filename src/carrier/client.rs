//! Default [`CarrierApiClient`] backed by reqwest.

// crates.io
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
// self
use crate::{
	_prelude::*,
	auth::{AccessToken, ClientCredentials},
	carrier::{
		self, CarrierApiClient, CarrierEndpoints, CarrierFuture, RateRequest, RateResponse,
		TokenGrant,
		wire::{self, ErrorBlock, ErrorDetail, ErrorEnvelope, RateBody, TokenBody},
	},
	error::{CarrierError, ConfigError, DecodeError, TransportError},
	http::{HttpReply, ReqwestHttpClient},
};

/// Calls the live (or mocked) UPS endpoints over HTTPS.
#[derive(Clone, Debug)]
pub struct ReqwestCarrierClient {
	http: ReqwestHttpClient,
	endpoints: CarrierEndpoints,
	transaction_source: String,
}
impl ReqwestCarrierClient {
	/// `transactionSrc` header sent unless overridden.
	pub const DEFAULT_TRANSACTION_SOURCE: &'static str = "testing";

	/// Creates a client with a redirect-free reqwest client.
	pub fn new(endpoints: CarrierEndpoints) -> Result<Self, ConfigError> {
		Ok(Self::with_http_client(ReqwestHttpClient::new()?, endpoints))
	}

	/// Creates a client around a caller-supplied HTTP client.
	pub fn with_http_client(http: ReqwestHttpClient, endpoints: CarrierEndpoints) -> Self {
		Self { http, endpoints, transaction_source: Self::DEFAULT_TRANSACTION_SOURCE.into() }
	}

	/// Overrides the `transactionSrc` header.
	pub fn with_transaction_source(mut self, source: impl Into<String>) -> Self {
		self.transaction_source = source.into();

		self
	}

	/// Endpoints this client targets.
	pub fn endpoints(&self) -> &CarrierEndpoints {
		&self.endpoints
	}

	async fn fetch_token(&self, credentials: &ClientCredentials) -> Result<TokenGrant> {
		let request = self
			.http
			.post(self.endpoints.token_url()?)
			.header(CONTENT_TYPE, "application/x-www-form-urlencoded")
			.header("x-merchant-id", credentials.client_id.as_str())
			.header(AUTHORIZATION, credentials.basic_authorization())
			.body("grant_type=client_credentials");
		let reply = self.http.send("token", request).await?;

		if !reply.is_success() {
			return Err(rejected(&reply, carrier::classify_token_errors));
		}

		let body: TokenBody = wire::decode("token", Some(reply.status), &reply.body)?;

		if let Some(errors) = reported_errors(body.response.as_ref()) {
			return Err(carrier::classify_token_errors(errors));
		}

		Ok(body.into_grant()?)
	}

	async fn fetch_rates(&self, token: &AccessToken, request: &RateRequest) -> Result<RateResponse> {
		let payload = serde_json::to_vec(request)
			.map_err(|source| TransportError::Encode { endpoint: "rating", source })?;
		let request = self
			.http
			.post(self.endpoints.rating_url()?)
			.header(AUTHORIZATION, token.bearer())
			.header(CONTENT_TYPE, "application/json")
			.header("transId", transaction_id())
			.header("transactionSrc", self.transaction_source.as_str())
			.body(payload);
		let reply = self.http.send("rating", request).await?;

		if !reply.is_success() {
			return Err(rejected(&reply, carrier::classify_rating_errors));
		}

		let body: RateBody = wire::decode("rating", Some(reply.status), &reply.body)?;

		if let Some(errors) = reported_errors(body.response.as_ref()) {
			return Err(carrier::classify_rating_errors(errors));
		}

		body.rate_response
			.ok_or(DecodeError::MissingField { endpoint: "rating", field: "RateResponse" }.into())
	}
}
impl CarrierApiClient for ReqwestCarrierClient {
	fn request_token<'a>(
		&'a self,
		credentials: &'a ClientCredentials,
	) -> CarrierFuture<'a, TokenGrant> {
		Box::pin(self.fetch_token(credentials))
	}

	fn shop_rates<'a>(
		&'a self,
		token: &'a AccessToken,
		request: &'a RateRequest,
	) -> CarrierFuture<'a, RateResponse> {
		Box::pin(self.fetch_rates(token, request))
	}
}

fn reported_errors(block: Option<&ErrorBlock>) -> Option<&[ErrorDetail]> {
	block.map(|block| block.errors.as_slice()).filter(|errors| !errors.is_empty())
}

// Gateways in front of UPS answer 5xx with HTML, so a non-2xx body is only read for an error block.
fn rejected(reply: &HttpReply, classify: fn(&[ErrorDetail]) -> Error) -> Error {
	let envelope = serde_json::from_slice::<ErrorEnvelope>(&reply.body).ok();

	match envelope.as_ref().and_then(|envelope| reported_errors(envelope.response.as_ref())) {
		Some(errors) => classify(errors),
		None => CarrierError::new(reply.status.to_string(), "Unexpected HTTP status").into(),
	}
}

// UPS caps `transId` at 32 characters.
fn transaction_id() -> String {
	let mut id = format!("{:x}", OffsetDateTime::now_utc().unix_timestamp_nanos());

	id.truncate(32);

	id
}
