//! Parsed module settings and the host store profile.

// self
use crate::{
	_prelude::*,
	auth::ClientCredentials,
	config::{
		CustomerClassification, DisplayOptions, HandlingBasis, HandlingFee, Mode, OriginRegion,
		PackagingType, PickupMethod, QuoteType, ServiceAllowList, ServiceHandlingFees,
		UpdateCheck, WeightUnit, keys, parse_flag,
	},
	error::ConfigError,
	messages,
	store::ConfigStore,
};

/// Shipper address sent with every rate request.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct OriginAddress {
	/// City name.
	pub city: String,
	/// State or province code.
	pub state_code: String,
	/// Postal code.
	pub postcode: String,
	/// ISO 3166-1 alpha-2 country code.
	pub country_code: String,
}

/// Typed snapshot of every `MODULE_SHIPPING_UPSOAUTH_*` row.
#[derive(Clone, Debug)]
pub struct Settings {
	/// Whether the operator enabled the module.
	pub enabled: bool,
	/// Display order among shipping modules.
	pub sort_order: i32,
	/// Tax class applied to the shipping fee; `0` means untaxed.
	pub tax_class: u32,
	/// Geo zone restricting the module; `0` means everywhere.
	pub zone: u32,
	/// OAuth client credentials.
	pub credentials: ClientCredentials,
	/// UPS environment.
	pub mode: Mode,
	/// Carrier client name resolved through the registry.
	pub api_class: String,
	/// UPS account number; enables negotiated rates when present.
	pub shipper_number: Option<String>,
	/// Origin region selecting the service-name table.
	pub origin_region: OriginRegion,
	/// Shipper address.
	pub origin: OriginAddress,
	/// Pickup method.
	pub pickup_method: PickupMethod,
	/// Packaging used for every box.
	pub packaging_type: PackagingType,
	/// Published rate table.
	pub customer_classification: CustomerClassification,
	/// Extra details shown with quotes.
	pub display: DisplayOptions,
	/// Business days between order and shipment.
	pub shipping_days_delay: f64,
	/// Weight unit.
	pub weight_unit: WeightUnit,
	/// Commercial or residential quoting.
	pub quote_type: QuoteType,
	/// Global handling fee.
	pub handling_fee: HandlingFee,
	/// Whether a fixed fee applies per order or per box.
	pub handling_basis: HandlingBasis,
	/// Per-service fee overrides.
	pub service_handling_fees: ServiceHandlingFees,
	/// Currency for declared values, as configured.
	pub currency_code: String,
	/// Whether declared values are sent.
	pub insure: bool,
	/// Offered service codes.
	pub services: ServiceAllowList,
	/// Plugin update check policy.
	pub update_check: UpdateCheck,
	/// Whether the debug log is written.
	pub debug: bool,
	/// Installed module version, absent on installs that predate version tracking.
	pub version: Option<String>,
}
impl Settings {
	/// Reads and parses every module row from `store`.
	pub async fn load(store: &dyn ConfigStore) -> Result<Self> {
		let values = store.values(keys::PREFIX).await?;

		Ok(Self::from_values(&values)?)
	}

	/// Parses a `key -> value` snapshot; absent rows fall back to their install defaults.
	///
	/// The status row must exist; without it the module is not installed.
	pub fn from_values(values: &BTreeMap<String, String>) -> Result<Self, ConfigError> {
		let status = values.get(keys::STATUS).ok_or(ConfigError::MissingSetting { key: keys::STATUS })?;
		let raw = |key: &'static str| -> String {
			values.get(key).cloned().or_else(|| keys::default_value(key)).unwrap_or_default()
		};
		let trimmed = |key: &'static str| raw(key).trim().to_owned();

		Ok(Self {
			enabled: parse_flag(keys::STATUS, status)?,
			sort_order: parse_number(keys::SORT_ORDER, &raw(keys::SORT_ORDER))?,
			tax_class: parse_number(keys::TAX_CLASS, &raw(keys::TAX_CLASS))?,
			zone: parse_number(keys::ZONE, &raw(keys::ZONE))?,
			credentials: ClientCredentials::new(trimmed(keys::CLIENT_ID), trimmed(keys::CLIENT_SECRET)),
			mode: raw(keys::MODE).parse()?,
			api_class: trimmed(keys::API_CLASS),
			shipper_number: Some(trimmed(keys::SHIPPER_NUMBER)).filter(|number| !number.is_empty()),
			origin_region: raw(keys::ORIGIN).parse()?,
			origin: OriginAddress {
				city: trimmed(keys::ORIGIN_CITY),
				state_code: trimmed(keys::ORIGIN_STATEPROV),
				postcode: trimmed(keys::ORIGIN_POSTALCODE),
				country_code: trimmed(keys::ORIGIN_COUNTRY),
			},
			pickup_method: raw(keys::PICKUP_METHOD).parse()?,
			packaging_type: raw(keys::PACKAGE_TYPE).parse()?,
			customer_classification: raw(keys::CUSTOMER_CLASSIFICATION_CODE).parse()?,
			display: raw(keys::OPTIONS).parse()?,
			shipping_days_delay: parse_delay(&raw(keys::SHIPPING_DAYS_DELAY))?,
			weight_unit: raw(keys::UNIT_WEIGHT).parse()?,
			quote_type: raw(keys::QUOTE_TYPE).parse()?,
			handling_fee: HandlingFee::parse(keys::HANDLING_FEE, &raw(keys::HANDLING_FEE))?,
			handling_basis: raw(keys::HANDLING_APPLIES).parse()?,
			service_handling_fees: raw(keys::SERVICE_HANDLING_FEES).parse()?,
			currency_code: trimmed(keys::CURRENCY_CODE).to_ascii_uppercase(),
			insure: parse_flag(keys::INSURE, &raw(keys::INSURE))?,
			services: raw(keys::TYPES).parse()?,
			update_check: raw(keys::UPDATE_CHECK).parse()?,
			debug: parse_flag(keys::DEBUG, &raw(keys::DEBUG))?,
			version: values.get(keys::VERSION).map(|version| version.trim().to_owned()),
		})
	}

	/// Checks that must pass before the module may stay enabled in the admin.
	pub fn validate_for_admin(&self) -> Result<(), ConfigError> {
		if !self.credentials.is_complete() {
			return Err(ConfigError::MissingCredentials);
		}
		if self.origin.postcode.is_empty() && self.origin_region.requires_postcode() {
			return Err(ConfigError::MissingOriginPostcode { origin: self.origin_region.label() });
		}

		Ok(())
	}

	/// Whole business days added to carrier transit estimates.
	pub fn transit_delay_days(&self) -> i64 {
		self.shipping_days_delay.ceil() as i64
	}
}

/// Store-wide facts the module reads from the host.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StoreProfile {
	/// Store name used as the email sender name.
	pub name: String,
	/// Store owner's address, recipient of operator emails.
	pub owner_email: String,
	/// Sender address for operator emails.
	pub email_from: String,
	/// Store default currency.
	pub default_currency: String,
	/// Currencies enabled in the store.
	pub currencies: BTreeSet<String>,
}
impl StoreProfile {
	/// Creates a profile whose only currency is `default_currency`.
	pub fn new(
		name: impl Into<String>,
		owner_email: impl Into<String>,
		default_currency: impl Into<String>,
	) -> Self {
		let owner_email = owner_email.into();
		let default_currency = default_currency.into();

		Self {
			name: name.into(),
			email_from: owner_email.clone(),
			owner_email,
			currencies: BTreeSet::from([default_currency.clone()]),
			default_currency,
		}
	}

	/// Enables an extra currency.
	pub fn with_currency(mut self, code: impl Into<String>) -> Self {
		self.currencies.insert(code.into());

		self
	}

	/// Overrides the sender address.
	pub fn with_email_from(mut self, from: impl Into<String>) -> Self {
		self.email_from = from.into();

		self
	}

	/// Picks the declared-value currency, falling back to the store default when the
	/// configured code is not enabled.
	pub fn resolve_currency(&self, configured: &str) -> ResolvedCurrency {
		if self.currencies.contains(configured) {
			return ResolvedCurrency { code: configured.to_owned(), warning: None };
		}

		ResolvedCurrency {
			code: self.default_currency.clone(),
			warning: Some(messages::invalid_currency(configured, &self.default_currency)),
		}
	}
}

/// Currency chosen for a request plus the warning raised when a fallback was needed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedCurrency {
	/// ISO 4217 code to send.
	pub code: String,
	/// Set when the configured code was replaced.
	pub warning: Option<String>,
}

fn parse_number<T>(key: &'static str, raw: &str) -> Result<T, ConfigError>
where
	T: FromStr + Default,
{
	let view = raw.trim();

	if view.is_empty() {
		return Ok(T::default());
	}

	view.parse().map_err(|_| ConfigError::invalid(key, view))
}

fn parse_delay(raw: &str) -> Result<f64, ConfigError> {
	let delay = parse_number::<f64>(keys::SHIPPING_DAYS_DELAY, raw)?;

	if delay.is_finite() && delay >= 0. {
		Ok(delay)
	} else {
		Err(ConfigError::invalid(keys::SHIPPING_DAYS_DELAY, raw.trim()))
	}
}
