mod common;

// std
use std::sync::Arc;
// self
use common::*;
use ups_oauth_rates::{
	admin,
	carrier::CarrierRegistry,
	config::keys,
	hooks::{FixedReleaseFeed, MemoryMailer, ModuleObserver, ReleaseNotice},
	messages,
	module::{MODULE_VERSION, ModuleHost},
	store::{ConfigRow, ConfigStore, MemoryConfigStore},
};

const EXTRA_KEY: &str = "MODULE_SHIPPING_UPSOAUTH_EXTRA_SURCHARGE";

fn host() -> ModuleHost {
	let registry = CarrierRegistry::ups().expect("UPS carrier clients should build.");

	ModuleHost::new(registry, profile())
}

async fn value(store: &MemoryConfigStore, key: &str) -> Option<String> {
	store.fetch(key).await.expect("Store read should succeed.").map(|row| row.value)
}

struct ExtraRows;
impl ModuleObserver for ExtraRows {
	fn after_install(&self) -> Vec<ConfigRow> {
		vec![ConfigRow::new("Extra surcharge", EXTRA_KEY, "0", "Added by an observer.", 30)]
	}

	fn after_remove(&self) -> Vec<String> {
		vec![EXTRA_KEY.into()]
	}
}

#[tokio::test]
async fn install_check_and_remove_round_trip() {
	let store = MemoryConfigStore::default();
	let host = host().with_observer(Arc::new(ExtraRows));

	assert!(!admin::check(&store).await.expect("Check should succeed."));

	let inserted = admin::install(&store, &host).await.expect("Install should succeed.");

	assert_eq!(inserted, admin::keys().len() + 1);
	assert!(admin::check(&store).await.expect("Check should succeed."));
	assert_eq!(value(&store, keys::VERSION).await.as_deref(), Some(MODULE_VERSION));
	assert_eq!(value(&store, keys::CURRENCY_CODE).await.as_deref(), Some("USD"));
	assert_eq!(value(&store, keys::STATUS).await.as_deref(), Some("False"));
	assert_eq!(value(&store, EXTRA_KEY).await.as_deref(), Some("0"));
	assert_eq!(
		admin::install(&store, &host).await.expect("Reinstall should succeed."),
		0,
		"Existing rows must be left alone."
	);

	let removed = admin::remove(&store, &host).await.expect("Remove should succeed.");

	assert_eq!(removed, inserted);
	assert!(store.is_empty());
	assert!(!admin::check(&store).await.expect("Check should succeed."));
}

#[test]
fn keys_follow_admin_order() {
	let listed = admin::keys();

	assert_eq!(listed.len(), keys::ALL.len());
	assert_eq!(listed[0], keys::STATUS);
	assert_eq!(listed[1], keys::VERSION);
	assert!(listed.iter().all(|key| key.starts_with(keys::PREFIX)));
}

#[tokio::test]
async fn checks_skip_disabled_and_uninstalled_modules() {
	let host = host();
	let empty = MemoryConfigStore::default();
	let report = admin::initialization_checks(&empty, &host).await.expect("Checks should succeed.");

	assert_eq!(report.title, format!("United Parcel Service v{MODULE_VERSION}"));
	assert!(report.messages.is_empty() && !report.disabled);

	let disabled = installed_store(&[]);
	let report = admin::initialization_checks(&disabled, &host).await.expect("Checks should succeed.");

	assert!(!report.disabled);
}

#[tokio::test]
async fn missing_credentials_disable_the_module() {
	let store = installed_store(&[(keys::STATUS, "True"), (keys::CLIENT_ID, CLIENT_ID)]);
	let report = admin::initialization_checks(&store, &host()).await.expect("Checks should succeed.");

	assert!(report.disabled);
	assert!(report.title.ends_with(messages::NEED_CREDENTIALS));
	assert_eq!(value(&store, keys::STATUS).await.as_deref(), Some("False"));
}

#[tokio::test]
async fn missing_origin_postcode_disables_only_where_required() {
	let us = ready_store(&[(keys::ORIGIN_POSTALCODE, "")]);
	let report = admin::initialization_checks(&us, &host()).await.expect("Checks should succeed.");

	assert!(report.disabled);
	assert!(report.title.ends_with(messages::NEED_POSTCODE));

	let eu = ready_store(&[(keys::ORIGIN_POSTALCODE, ""), (keys::ORIGIN, "European Union Origin")]);
	let report = admin::initialization_checks(&eu, &host()).await.expect("Checks should succeed.");

	assert!(!report.disabled);
	assert_eq!(value(&eu, keys::STATUS).await.as_deref(), Some("True"));
}

#[tokio::test]
async fn unknown_api_class_disables_and_emails() {
	let mailer = MemoryMailer::default();
	let host = host().with_mailer(Arc::new(mailer.clone()));
	let store = ready_store(&[(keys::API_CLASS, "LegacyUpsApi")]);
	let report = admin::initialization_checks(&store, &host).await.expect("Checks should succeed.");
	let notice = messages::missing_api_class("LegacyUpsApi");

	assert!(report.disabled);
	assert!(report.title.ends_with(&notice));
	assert_eq!(value(&store, keys::STATUS).await.as_deref(), Some("False"));
	assert_eq!(mailer.sent().len(), 1);
	assert_eq!(mailer.sent()[0].body, notice);
}

#[tokio::test]
async fn on_demand_update_check_runs_once() {
	let feed = FixedReleaseFeed::new(ReleaseNotice {
		version: "9.0.0".into(),
		link: "https://www.zen-cart.com/downloads.php?do=file&id=2374".into(),
	});
	let host = host().with_release_feed(Arc::new(feed.clone()));
	let store = ready_store(&[(keys::UPDATE_CHECK, "On Demand")]);
	let report = admin::initialization_checks(&store, &host).await.expect("Checks should succeed.");

	assert!(!report.disabled);
	assert!(report.title.contains("A NEW VERSION OF THIS PLUGIN IS AVAILABLE"));
	assert_eq!(value(&store, keys::UPDATE_CHECK).await.as_deref(), Some("Never"));

	let report = admin::initialization_checks(&store, &host).await.expect("Checks should succeed.");

	assert!(!report.title.contains("NEW VERSION"));
	assert_eq!(feed.checks(), 1);
}

#[tokio::test]
async fn untracked_install_is_migrated_to_the_current_version() {
	let legacy = keys::install_rows("EUR", "1.0.0").into_iter().filter(|row| {
		![keys::VERSION, keys::API_CLASS, keys::HANDLING_APPLIES, keys::SERVICE_HANDLING_FEES]
			.contains(&row.key.as_str())
	});
	let store = MemoryConfigStore::with_rows(legacy);

	store
		.update_value(keys::TYPES, "Ground [03], Express Saver [65]")
		.await
		.expect("Seed update should succeed.");

	let report = admin::initialization_checks(&store, &host()).await.expect("Checks should succeed.");

	assert_eq!(report.messages, vec![messages::updated(MODULE_VERSION)]);
	assert_eq!(value(&store, keys::VERSION).await.as_deref(), Some(MODULE_VERSION));
	assert_eq!(value(&store, keys::API_CLASS).await.as_deref(), Some(keys::DEFAULT_API_CLASS));
	assert_eq!(value(&store, keys::HANDLING_APPLIES).await.as_deref(), Some("Per Order"));
	assert_eq!(value(&store, keys::SERVICE_HANDLING_FEES).await.as_deref(), Some(""));
	assert_eq!(
		value(&store, keys::TYPES).await.as_deref(),
		Some("Ground [03], Worldwide Saver [65]")
	);

	let again = admin::initialization_checks(&store, &host()).await.expect("Checks should succeed.");

	assert!(again.messages.is_empty());
}
