mod common;

// std
use std::sync::Arc;
// crates.io
use httpmock::prelude::*;
// self
use common::*;
use ups_oauth_rates::{
	auth::TokenSession,
	carrier::{CarrierEndpoints, CarrierRegistry, ReqwestCarrierClient},
	config::keys,
	hooks::{MemoryMailer, ModuleObserver},
	messages,
	module::{ModuleHost, ShippingModule, StorefrontContext},
	store::{ConfigStore, MemoryConfigStore},
	url::Url,
};

async fn stored_value(store: &MemoryConfigStore, key: &str) -> String {
	store
		.fetch(key)
		.await
		.expect("Store read should succeed.")
		.expect("Row should exist.")
		.value
}

#[tokio::test]
async fn rejected_credentials_disable_the_module_and_email_the_owner() {
	let server = MockServer::start_async().await;
	let mock = server
		.mock_async(|when, then| {
			when.method(POST).path(TOKEN_PATH);
			then.status(401).header("content-type", "application/json").body(
				r#"{"response":{"errors":[{"code":"10401","message":"ClientId is Invalid"}]}}"#,
			);
		})
		.await;
	let harness = harness(&server);
	let store = Arc::new(ready_store(&[]));
	let module =
		ShippingModule::load(store.clone(), harness.host.clone()).await.expect("Module should load.");
	let enabled = module
		.update_status(&TokenSession::new(), &StorefrontContext::default())
		.await
		.expect("Status update should succeed.");

	mock.assert_calls_async(1).await;

	assert!(!enabled);
	assert!(!module.is_enabled());
	assert_eq!(stored_value(&store, keys::STATUS).await, "False");

	let sent = harness.mailer.sent();

	assert_eq!(sent.len(), 1);
	assert_eq!(sent[0].to_address, "owner@example.com");
	assert_eq!(sent[0].subject, messages::EMAIL_SUBJECT);
	assert_eq!(sent[0].body, messages::INVALID_CREDENTIALS);
}

#[tokio::test]
async fn gateway_error_rules_out_only_the_request() {
	let server = MockServer::start_async().await;
	let mock = server
		.mock_async(|when, then| {
			when.method(POST).path(TOKEN_PATH);
			then.status(502).body("Bad gateway");
		})
		.await;
	let harness = harness(&server);
	let store = Arc::new(ready_store(&[]));
	let module =
		ShippingModule::load(store.clone(), harness.host.clone()).await.expect("Module should load.");
	let session = TokenSession::new();
	let enabled = module
		.update_status(&session, &StorefrontContext::default())
		.await
		.expect("Status update should succeed.");

	mock.assert_calls_async(1).await;

	assert!(!enabled);
	assert!(module.is_enabled());
	assert_eq!(stored_value(&store, keys::STATUS).await, "True");
	assert!(harness.mailer.sent().is_empty());
	assert_eq!(
		module.quote(&session, &shipment(), None).await.expect("Failed quotes should succeed."),
		None
	);
	mock.assert_calls_async(2).await;
	assert!(module.is_enabled());
	assert!(harness.mailer.sent().is_empty());
}

#[tokio::test]
async fn unreachable_carrier_rules_out_only_the_request() {
	let base = Url::parse("http://127.0.0.1:9/").expect("Closed-port URL should parse.");
	let client = ReqwestCarrierClient::new(CarrierEndpoints::custom(base))
		.expect("Carrier client should build.");
	let mailer = MemoryMailer::default();
	let host = ModuleHost::new(CarrierRegistry::new(Arc::new(client)), profile())
		.with_mailer(Arc::new(mailer.clone()));
	let store = Arc::new(ready_store(&[]));
	let module = ShippingModule::load(store.clone(), host).await.expect("Module should load.");
	let session = TokenSession::new();

	assert!(
		!module
			.update_status(&session, &StorefrontContext::default())
			.await
			.expect("Status update should succeed.")
	);
	assert_eq!(
		module.quote(&session, &shipment(), None).await.expect("Failed quotes should succeed."),
		None
	);
	assert!(module.is_enabled());
	assert_eq!(stored_value(&store, keys::STATUS).await, "True");
	assert!(mailer.sent().is_empty());
}

#[tokio::test]
async fn request_conditions_do_not_stick_between_requests() {
	let server = MockServer::start_async().await;
	let mock = server
		.mock_async(|when, then| {
			when.method(POST).path(TOKEN_PATH);
			then.status(200).header("content-type", "application/json").body(token_body("ok", 60));
		})
		.await;
	let harness = harness(&server);
	let module = ShippingModule::load(Arc::new(ready_store(&[])), harness.host.clone())
		.await
		.expect("Module should load.");
	let session = TokenSession::new();
	let spider = StorefrontContext { spider_session: true, ..Default::default() };

	assert!(!module.update_status(&session, &spider).await.expect("Status update should succeed."));
	assert!(module.is_enabled());
	assert!(
		module
			.update_status(&session, &StorefrontContext::default())
			.await
			.expect("Status update should succeed.")
	);
	mock.assert_calls_async(1).await;
}

#[tokio::test]
async fn unregistered_api_class_disables_and_emails() {
	let server = MockServer::start_async().await;
	let mock = server
		.mock_async(|when, then| {
			when.method(POST).path(TOKEN_PATH);
			then.status(200).body(token_body("unused", 60));
		})
		.await;
	let harness = harness(&server);
	let store = Arc::new(ready_store(&[(keys::API_CLASS, "LegacyUpsApi")]));
	let module =
		ShippingModule::load(store.clone(), harness.host.clone()).await.expect("Module should load.");
	let enabled = module
		.update_status(&TokenSession::new(), &StorefrontContext::default())
		.await
		.expect("Status update should succeed.");

	mock.assert_calls_async(0).await;

	assert!(!enabled);
	assert_eq!(stored_value(&store, keys::STATUS).await, "False");
	assert_eq!(harness.mailer.sent()[0].body, messages::missing_api_class("LegacyUpsApi"));
}

#[tokio::test]
async fn storefront_context_can_rule_the_module_out() {
	let server = MockServer::start_async().await;
	let mock = server
		.mock_async(|when, then| {
			when.method(POST).path(TOKEN_PATH);
			then.status(200).body(token_body("unused", 60));
		})
		.await;
	let harness = harness(&server);
	let contexts = [
		StorefrontContext { spider_session: true, ..Default::default() },
		StorefrontContext { shipping_enabled: false, ..Default::default() },
		StorefrontContext { zone_allowed: false, ..Default::default() },
	];

	for context in contexts {
		let store = Arc::new(ready_store(&[(keys::ZONE, "4")]));
		let module =
			ShippingModule::load(store, harness.host.clone()).await.expect("Module should load.");

		assert!(
			!module
				.update_status(&TokenSession::new(), &context)
				.await
				.expect("Status update should succeed.")
		);
	}

	mock.assert_calls_async(0).await;
}

#[tokio::test]
async fn zone_is_ignored_when_unrestricted() {
	let server = MockServer::start_async().await;
	let mock = server
		.mock_async(|when, then| {
			when.method(POST).path(TOKEN_PATH);
			then.status(200).header("content-type", "application/json").body(token_body("ok", 60));
		})
		.await;
	let harness = harness(&server);
	let module = ShippingModule::load(Arc::new(ready_store(&[])), harness.host.clone())
		.await
		.expect("Module should load.");
	let context = StorefrontContext { zone_allowed: false, ..Default::default() };

	assert!(module.update_status(&TokenSession::new(), &context).await.expect("Status update should succeed."));
	mock.assert_calls_async(1).await;
}

struct Veto;
impl ModuleObserver for Veto {
	fn on_update_status(&self, enabled: &mut bool) {
		*enabled = false;
	}
}

#[tokio::test]
async fn observer_veto_skips_the_token_request() {
	let server = MockServer::start_async().await;
	let mock = server
		.mock_async(|when, then| {
			when.method(POST).path(TOKEN_PATH);
			then.status(200).body(token_body("unused", 60));
		})
		.await;
	let harness = harness(&server);
	let host = harness.host.clone().with_observer(Arc::new(Veto));
	let module =
		ShippingModule::load(Arc::new(ready_store(&[])), host).await.expect("Module should load.");

	assert!(
		!module
			.update_status(&TokenSession::new(), &StorefrontContext::default())
			.await
			.expect("Status update should succeed.")
	);
	mock.assert_calls_async(0).await;
}
