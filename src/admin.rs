//! Admin-side operations: install, remove, status checks, and initialization checks.

pub mod migrate;

pub use migrate::*;

// self
use crate::{
	_prelude::*,
	config::{Settings, UpdateCheck, keys},
	error::ConfigError,
	messages,
	module::{MODULE_VERSION, ModuleHost, PLUGIN_ID},
	store::ConfigStore,
};

/// Outcome of [`initialization_checks`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AdminReport {
	/// Module title with version and inline alerts.
	pub title: String,
	/// Session messages for the admin page.
	pub messages: Vec<String>,
	/// Whether the checks disabled the module.
	pub disabled: bool,
}
impl AdminReport {
	fn alert(&mut self, text: &str) {
		self.title.push_str(" | ");
		self.title.push_str(text);
	}
}

/// Every configuration key, in admin display order.
pub fn keys() -> Vec<String> {
	keys::ALL.iter().map(|key| (*key).to_owned()).collect()
}

/// Whether the module is installed.
pub async fn check(store: &dyn ConfigStore) -> Result<bool> {
	Ok(store.fetch(keys::STATUS).await?.is_some())
}

/// Inserts the default rows plus any rows the observer adds; returns the inserted count.
pub async fn install(store: &dyn ConfigStore, host: &ModuleHost) -> Result<usize> {
	let mut inserted = 0;
	let rows = keys::install_rows(&host.profile.default_currency, MODULE_VERSION)
		.into_iter()
		.chain(host.observer.after_install());

	for row in rows {
		if store.insert(row).await? {
			inserted += 1;
		}
	}

	#[cfg(feature = "tracing")]
	tracing::info!(inserted, version = MODULE_VERSION, "Installed the UPS shipping module.");

	Ok(inserted)
}

/// Deletes every module key plus any keys the observer names; returns the removed count.
pub async fn remove(store: &dyn ConfigStore, host: &ModuleHost) -> Result<usize> {
	let mut doomed = keys();

	doomed.extend(host.observer.after_remove());

	let removed = store.delete(&doomed).await?;

	#[cfg(feature = "tracing")]
	tracing::info!(removed, "Removed the UPS shipping module.");

	Ok(removed)
}

/// Runs when the shipping-modules admin page loads.
///
/// Upgrades stored settings, then for an enabled module verifies the configuration and
/// resolves the carrier client, disabling the module on failure, and finally runs the
/// plugin update check.
pub async fn initialization_checks(store: &dyn ConfigStore, host: &ModuleHost) -> Result<AdminReport> {
	let mut report = AdminReport {
		title: format!("{} v{MODULE_VERSION}", messages::TEXT_TITLE),
		..Default::default()
	};

	if let Some(updated) = migrate(store, &host.profile).await? {
		report.messages.push(updated);
	}
	if !check(store).await? {
		return Ok(report);
	}

	let settings = Settings::load(store).await?;

	if !settings.enabled {
		return Ok(report);
	}
	if let Err(e) = settings.validate_for_admin() {
		let notice = match e {
			ConfigError::MissingCredentials => messages::NEED_CREDENTIALS,
			_ => messages::NEED_POSTCODE,
		};

		store.update_value(keys::STATUS, "False").await?;
		report.alert(notice);
		report.disabled = true;

		return Ok(report);
	}
	if !host.registry.contains(&settings.api_class) {
		let notice = messages::missing_api_class(&settings.api_class);

		store.update_value(keys::STATUS, "False").await?;
		host.notify_owner(notice.clone()).await;
		report.alert(&notice);
		report.disabled = true;

		return Ok(report);
	}
	if settings.update_check.wants_check() {
		if let Some(release) = host.release_feed.newer_release(PLUGIN_ID, MODULE_VERSION).await {
			report.title.push_str(&messages::new_version_available(&release.link));
		}
		if settings.update_check == UpdateCheck::OnDemand {
			store.update_value(keys::UPDATE_CHECK, UpdateCheck::Never.label()).await?;
		}
	}

	Ok(report)
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn keys_match_install_rows() {
		let listed = keys();

		assert_eq!(listed.first().map(String::as_str), Some(keys::STATUS));
		assert_eq!(listed.len(), keys::install_rows("USD", MODULE_VERSION).len());
	}

	#[test]
	fn alerts_append_to_title() {
		let mut report = AdminReport { title: "United Parcel Service v1.3.6".into(), ..Default::default() };

		report.alert("Needs attention.");

		assert_eq!(report.title, "United Parcel Service v1.3.6 | Needs attention.");
	}
}
