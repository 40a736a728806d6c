//! Shared fixtures for the integration tests.

#![allow(dead_code)]

// std
use std::sync::Arc;
// crates.io
use httpmock::prelude::*;
use time::{OffsetDateTime, macros::datetime};
// self
use ups_oauth_rates::{
	auth::ManualClock,
	carrier::{CarrierEndpoints, CarrierRegistry, ReqwestCarrierClient},
	config::{StoreProfile, keys},
	hooks::MemoryMailer,
	module::{MODULE_VERSION, ModuleHost},
	rating::{Destination, Shipment},
	store::MemoryConfigStore,
	url::Url,
};

pub const CLIENT_ID: &str = "ups-client";
pub const CLIENT_SECRET: &str = "ups-secret";
pub const TOKEN_PATH: &str = "/security/v1/oauth/token";
pub const RATING_PATH: &str = "/api/rating/v1/Shop";

pub const START: OffsetDateTime = datetime!(2026-03-02 09:00 UTC);

/// Rows that make an installed module ready to quote.
pub const READY: &[(&str, &str)] = &[
	(keys::STATUS, "True"),
	(keys::CLIENT_ID, CLIENT_ID),
	(keys::CLIENT_SECRET, CLIENT_SECRET),
	(keys::ORIGIN_CITY, "New York"),
	(keys::ORIGIN_STATEPROV, "NY"),
	(keys::ORIGIN_POSTALCODE, "10001"),
];

pub fn carrier_client(server: &MockServer) -> Arc<ReqwestCarrierClient> {
	let base = Url::parse(&server.url("/")).expect("Mock server base URL should parse.");
	let client = ReqwestCarrierClient::new(CarrierEndpoints::custom(base))
		.expect("Carrier client should build against the mock server.");

	Arc::new(client)
}

pub fn profile() -> StoreProfile {
	StoreProfile::new("Demo Store", "owner@example.com", "USD")
}

pub struct Harness {
	pub host: ModuleHost,
	pub clock: ManualClock,
	pub mailer: MemoryMailer,
}

pub fn harness(server: &MockServer) -> Harness {
	let clock = ManualClock::new(START);
	let mailer = MemoryMailer::default();
	let host = ModuleHost::new(CarrierRegistry::new(carrier_client(server)), profile())
		.with_clock(Arc::new(clock.clone()))
		.with_mailer(Arc::new(mailer.clone()));

	Harness { host, clock, mailer }
}

/// Store holding the install defaults with `overrides` applied.
pub fn installed_store(overrides: &[(&str, &str)]) -> MemoryConfigStore {
	let rows = keys::install_rows("USD", MODULE_VERSION).into_iter().map(|mut row| {
		if let Some((_, value)) = overrides.iter().find(|(key, _)| *key == row.key) {
			row.value = (*value).to_owned();
		}

		row
	});

	MemoryConfigStore::with_rows(rows)
}

pub fn ready_store(extra: &[(&str, &str)]) -> MemoryConfigStore {
	let overrides = extra.iter().chain(READY).copied().collect::<Vec<_>>();

	installed_store(&overrides)
}

pub fn destination() -> Destination {
	Destination {
		city: "Austin".into(),
		state_code: "TX".into(),
		state_name: "Texas".into(),
		postcode: "78701".into(),
		country_code: "US".into(),
		country_name: "United States".into(),
	}
}

pub fn shipment() -> Shipment {
	Shipment::new(2, 4.5, 99.5, destination())
}

pub fn token_body(token: &str, expires_in: u32) -> String {
	format!(
		r#"{{"token_type":"Bearer","issued_at":"1700000000000","client_id":"{CLIENT_ID}","access_token":"{token}","expires_in":"{expires_in}","status":"approved"}}"#
	)
}

pub fn basic_authorization() -> String {
	ups_oauth_rates::auth::ClientCredentials::new(CLIENT_ID, CLIENT_SECRET).basic_authorization()
}
