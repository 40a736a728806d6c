//! The storefront-facing shipping module.
//!
//! [`ShippingModule`] ties settings, the carrier registry, and the host hooks together. It
//! decides whether UPS is offered for a session, disables itself when UPS rejects the
//! credentials, and wraps priced options in the [`Quote`] envelope the checkout expects.

// std
use std::sync::atomic::{AtomicBool, Ordering};
// self
use crate::{
	_prelude::*,
	auth::{Clock, SystemClock, TokenManager, TokenSession},
	carrier::CarrierRegistry,
	config::{Settings, StoreProfile, keys},
	error::ConfigError,
	hooks::{
		ModuleObserver, NoReleaseFeed, NoopMailer, NoopObserver, OperatorEmail, OperatorMailer,
		ReleaseFeed,
	},
	messages::{self, EntryLabels},
	obs::DebugLog,
	rating::{RateQuoter, Shipment, ShippingMethodOption},
	store::ConfigStore,
};

/// Module code used as the quote id.
pub const MODULE_CODE: &str = "upsoauth";
/// Plugin identifier used for update checks.
pub const PLUGIN_ID: u32 = 2374;
/// Version of this module.
pub const MODULE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Host services the module depends on.
#[derive(Clone)]
pub struct ModuleHost {
	/// Carrier clients selectable by the `API_CLASS` setting.
	pub registry: CarrierRegistry,
	/// Store-wide facts.
	pub profile: StoreProfile,
	/// Hook observer.
	pub observer: Arc<dyn ModuleObserver>,
	/// Operator email facility.
	pub mailer: Arc<dyn OperatorMailer>,
	/// Plugin release source.
	pub release_feed: Arc<dyn ReleaseFeed>,
	/// Clock for token expiry.
	pub clock: Arc<dyn Clock>,
	/// Debug log used when the debug setting is on.
	pub debug_log: DebugLog,
	/// Address-form labels used in customer messages.
	pub labels: EntryLabels,
}
impl ModuleHost {
	/// Creates a host with no-op hooks, the system clock, and no debug log.
	pub fn new(registry: CarrierRegistry, profile: StoreProfile) -> Self {
		Self {
			registry,
			profile,
			observer: Arc::new(NoopObserver),
			mailer: Arc::new(NoopMailer),
			release_feed: Arc::new(NoReleaseFeed),
			clock: Arc::new(SystemClock),
			debug_log: DebugLog::disabled(),
			labels: EntryLabels::default(),
		}
	}

	/// Installs a hook observer.
	pub fn with_observer(mut self, observer: Arc<dyn ModuleObserver>) -> Self {
		self.observer = observer;

		self
	}

	/// Installs the operator email facility.
	pub fn with_mailer(mut self, mailer: Arc<dyn OperatorMailer>) -> Self {
		self.mailer = mailer;

		self
	}

	/// Installs the plugin release source.
	pub fn with_release_feed(mut self, feed: Arc<dyn ReleaseFeed>) -> Self {
		self.release_feed = feed;

		self
	}

	/// Overrides the clock.
	pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
		self.clock = clock;

		self
	}

	/// Sets the debug log used when the debug setting is on.
	///
	/// Give it the store's offset with [`DebugLog::with_utc_offset`] when the host runs more
	/// than one thread, or entries are stamped in UTC.
	pub fn with_debug_log(mut self, log: DebugLog) -> Self {
		self.debug_log = log;

		self
	}

	/// Overrides the address-form labels.
	pub fn with_labels(mut self, labels: EntryLabels) -> Self {
		self.labels = labels;

		self
	}

	/// Emails the store owner that the module disabled itself.
	pub(crate) async fn notify_owner(&self, body: String) {
		let profile = &self.profile;

		self.mailer
			.send(OperatorEmail {
				to_name: profile.name.clone(),
				to_address: profile.owner_email.clone(),
				subject: messages::EMAIL_SUBJECT.into(),
				body,
				from_name: profile.name.clone(),
				from_address: profile.email_from.clone(),
			})
			.await;
	}
}
impl Debug for ModuleHost {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("ModuleHost")
			.field("registry", &self.registry)
			.field("profile", &self.profile)
			.field("debug_log", &self.debug_log)
			.finish_non_exhaustive()
	}
}

/// Per-request storefront facts supplied by the host.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StorefrontContext {
	/// Request comes from a search-engine spider.
	pub spider_session: bool,
	/// The cart needs shipping (it is not free-shipping only).
	pub shipping_enabled: bool,
	/// The destination falls inside the configured zone.
	pub zone_allowed: bool,
}
impl Default for StorefrontContext {
	fn default() -> Self {
		Self { spider_session: false, shipping_enabled: true, zone_allowed: true }
	}
}

/// Quote envelope returned to checkout.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Quote {
	/// Module code.
	pub id: String,
	/// Module title, optionally with the weight summary.
	pub module: String,
	/// Priced options, cheapest first.
	pub methods: Vec<ShippingMethodOption>,
	/// Customer-facing error when UPS declined to quote.
	pub error: Option<String>,
	/// Tax class applied to the shipping fee, when configured.
	pub tax_class: Option<u32>,
}

/// UPS shipping module bound to one configuration snapshot.
pub struct ShippingModule {
	store: Arc<dyn ConfigStore>,
	host: ModuleHost,
	settings: Arc<Settings>,
	log: DebugLog,
	enabled: AtomicBool,
}
impl ShippingModule {
	/// Loads settings from `store`.
	pub async fn load(store: Arc<dyn ConfigStore>, host: ModuleHost) -> Result<Self> {
		let settings = Settings::load(store.as_ref()).await?;
		let log = host.debug_log.clone().enabled_if(settings.debug);
		let enabled = AtomicBool::new(settings.enabled);

		Ok(Self { store, host, settings: Arc::new(settings), log, enabled })
	}

	/// Whether the operator's status setting still offers the module.
	///
	/// Only a credential rejection or an unregistered carrier client turns this off, and both
	/// also write `STATUS = False` to the store. Per-request conditions never change it.
	pub fn is_enabled(&self) -> bool {
		self.enabled.load(Ordering::SeqCst)
	}

	/// Parsed settings.
	pub fn settings(&self) -> &Settings {
		&self.settings
	}

	/// Checkout title.
	pub fn title(&self) -> &'static str {
		messages::TEXT_TITLE
	}

	/// Display order among shipping modules.
	pub fn sort_order(&self) -> i32 {
		self.settings.sort_order
	}

	/// Decides whether UPS is offered for this request and makes sure a token is available.
	///
	/// The answer applies to this request only. Any failure to obtain a token rules the
	/// module out for the request; a credential rejection also disables it in the store and
	/// emails the owner.
	pub async fn update_status(
		&self,
		session: &TokenSession,
		context: &StorefrontContext,
	) -> Result<bool> {
		let mut enabled = self.is_enabled();

		if context.spider_session || !context.shipping_enabled {
			enabled = false;
		}
		if enabled && self.settings.zone > 0 && !context.zone_allowed {
			enabled = false;
		}

		self.host.observer.on_update_status(&mut enabled);

		if enabled {
			enabled = match self.token_manager() {
				Ok(tokens) => match tokens.get_token(session).await {
					Ok(_) => true,
					Err(e) => {
						self.handle_failure(&e).await?;

						false
					},
				},
				Err(e) => {
					self.handle_failure(&e.into()).await?;

					false
				},
			};
		}

		Ok(enabled)
	}

	/// Quotes `shipment`; `None` means this module offers nothing for it.
	pub async fn quote(
		&self,
		session: &TokenSession,
		shipment: &Shipment,
		filter: Option<&str>,
	) -> Result<Option<Quote>> {
		if !self.is_enabled() {
			return Ok(None);
		}

		let quoter = match self.quoter() {
			Ok(quoter) => quoter,
			Err(e) => {
				self.handle_failure(&e.into()).await?;

				return Ok(None);
			},
		};

		// A token failure is never a customer-facing carrier message.
		if let Err(e) = quoter.tokens().get_token(session).await {
			self.handle_failure(&e).await?;

			return Ok(None);
		}

		match quoter.quote(session, shipment, filter).await {
			Ok(methods) if methods.is_empty() => Ok(None),
			Ok(methods) => {
				let quote = self.envelope(shipment, methods, None);

				self.log.record_section(format!("Returning quote:\n{quote:#?}"));

				Ok(Some(quote))
			},
			Err(Error::Carrier(inner)) => {
				let message =
					messages::carrier_error_message(&inner.code, &shipment.destination, &self.host.labels);

				self.log.record(format!("UPS error {}: {}", inner.code, inner.message));

				Ok(Some(self.envelope(shipment, Vec::new(), Some(message))))
			},
			Err(e) => {
				self.handle_failure(&e).await?;

				Ok(None)
			},
		}
	}

	fn token_manager(&self) -> Result<TokenManager, ConfigError> {
		let carrier = self.host.registry.resolve(&self.settings.api_class, self.settings.mode)?;

		Ok(TokenManager::new(carrier, self.settings.credentials.clone())
			.with_clock(self.host.clock.clone())
			.with_debug_log(self.log.clone()))
	}

	fn quoter(&self) -> Result<RateQuoter, ConfigError> {
		let carrier = self.host.registry.resolve(&self.settings.api_class, self.settings.mode)?;

		Ok(RateQuoter::new(
			self.token_manager()?,
			carrier,
			self.settings.clone(),
			Arc::new(self.host.profile.clone()),
		)
		.with_observer(self.host.observer.clone())
		.with_debug_log(self.log.clone()))
	}

	fn envelope(
		&self,
		shipment: &Shipment,
		methods: Vec<ShippingMethodOption>,
		error: Option<String>,
	) -> Quote {
		let mut module = self.title().to_owned();

		if self.settings.display.weight {
			module.push_str(&weight_summary(
				shipment.boxes,
				shipment.box_weight,
				self.settings.weight_unit.code(),
			));
		}

		Quote {
			id: MODULE_CODE.into(),
			module,
			methods,
			error,
			tax_class: Some(self.settings.tax_class).filter(|class| *class > 0),
		}
	}

	async fn handle_failure(&self, e: &Error) -> Result<()> {
		match e {
			Error::AuthRejected { .. } => {
				self.enabled.store(false, Ordering::SeqCst);
				self.store.update_value(keys::STATUS, "False").await?;
				self.host.notify_owner(messages::INVALID_CREDENTIALS.into()).await;
			},
			Error::Config(ConfigError::MissingApiClass { name }) => {
				self.enabled.store(false, Ordering::SeqCst);
				self.store.update_value(keys::STATUS, "False").await?;
				self.host.notify_owner(messages::missing_api_class(name)).await;
			},
			_ => {},
		}

		#[cfg(feature = "tracing")]
		tracing::warn!(error = %e, "UPS shipping is unavailable for this request.");

		self.log.record(format!("UPS shipping disabled for this request: {e}"));

		Ok(())
	}
}
impl Debug for ShippingModule {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("ShippingModule")
			.field("host", &self.host)
			.field("enabled", &self.is_enabled())
			.finish_non_exhaustive()
	}
}

/// ` (N pkg(s) x W.WW lbs total)` suffix for the module title.
pub fn weight_summary(boxes: u32, box_weight: f64, unit: &str) -> String {
	let packages = if boxes > 1 { "pkg(s)" } else { "pkg" };

	format!(" ({boxes} {packages} x {box_weight:.2} {} total)", unit.to_ascii_lowercase())
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn weight_summary_pluralizes_packages() {
		assert_eq!(weight_summary(1, 4.5, "LBS"), " (1 pkg x 4.50 lbs total)");
		assert_eq!(weight_summary(3, 12.5, "KGS"), " (3 pkg(s) x 12.50 kgs total)");
	}

	#[test]
	fn storefront_context_defaults_to_eligible() {
		let context = StorefrontContext::default();

		assert!(!context.spider_session);
		assert!(context.shipping_enabled && context.zone_allowed);
	}
}
