//! Option types parsed from individual configuration values.

// self
use crate::{_prelude::*, config::keys, error::ConfigError};

macro_rules! def_setting_enum {
	(
		$(#[$meta:meta])*
		$name:ident, $key:path {
			$($(#[$vmeta:meta])* $variant:ident => ($label:literal, $code:literal)),+ $(,)?
		}
	) => {
		$(#[$meta])*
		#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
		pub enum $name {
			$($(#[$vmeta])* $variant),+
		}
		impl $name {
			/// Every variant, in admin order.
			pub const ALL: &'static [Self] = &[$(Self::$variant),+];

			/// Label stored in the configuration row.
			pub const fn label(self) -> &'static str {
				match self {
					$(Self::$variant => $label),+
				}
			}

			/// Code sent to UPS.
			pub const fn code(self) -> &'static str {
				match self {
					$(Self::$variant => $code),+
				}
			}
		}
		impl FromStr for $name {
			type Err = ConfigError;

			fn from_str(s: &str) -> Result<Self, Self::Err> {
				let view = s.trim();

				Self::ALL
					.iter()
					.copied()
					.find(|variant| variant.label().eq_ignore_ascii_case(view))
					.ok_or_else(|| ConfigError::invalid($key, view))
			}
		}
		impl Display for $name {
			fn fmt(&self, f: &mut Formatter) -> FmtResult {
				f.write_str(self.label())
			}
		}
	};
}

def_setting_enum! {
	/// UPS environment the module talks to.
	Mode, keys::MODE {
		/// Customer integration environment.
		Test => ("Test", "Test"),
		/// Live environment.
		Production => ("Production", "Production"),
	}
}

def_setting_enum! {
	/// Shipping origin bucket; selects the service-name table.
	OriginRegion, keys::ORIGIN {
		/// United States.
		UnitedStates => ("US Origin", "US"),
		/// Canada.
		Canada => ("Canada Origin", "CA"),
		/// European Union.
		EuropeanUnion => ("European Union Origin", "EU"),
		/// Puerto Rico.
		PuertoRico => ("Puerto Rico Origin", "PR"),
		/// Mexico.
		Mexico => ("Mexico Origin", "MX"),
		/// Anywhere else.
		Other => ("All other origins", "OTHER"),
	}
}
impl OriginRegion {
	/// Whether UPS needs an origin postcode for this region.
	pub const fn requires_postcode(self) -> bool {
		!matches!(self, Self::EuropeanUnion | Self::Other)
	}
}

def_setting_enum! {
	/// How packages reach UPS.
	PickupMethod, keys::PICKUP_METHOD {
		/// Regular daily pickup.
		DailyPickup => ("Daily Pickup", "01"),
		/// Dropped at a customer counter.
		CustomerCounter => ("Customer Counter", "03"),
		/// Scheduled one-time pickup.
		OneTimePickup => ("One Time Pickup", "06"),
		/// On-call air pickup.
		OnCallAirPickup => ("On Call Air Pickup", "07"),
		/// Letter center drop-off.
		LetterCenter => ("Letter Center", "19"),
		/// Air service center drop-off.
		AirServiceCenter => ("Air Service Center", "20"),
	}
}

def_setting_enum! {
	/// Packaging used for every box.
	PackagingType, keys::PACKAGE_TYPE {
		/// Unknown packaging.
		Unknown => ("Unknown", "00"),
		/// UPS letter envelope.
		UpsLetter => ("UPS Letter", "01"),
		/// Shipper-supplied box.
		CustomerPackage => ("Customer Package", "02"),
		/// UPS tube.
		UpsTube => ("UPS Tube", "03"),
		/// UPS pak.
		UpsPak => ("UPS Pak", "04"),
		/// UPS express box.
		UpsExpressBox => ("UPS Express Box", "21"),
		/// UPS 25kg box.
		Ups25KgBox => ("UPS 25kg Box", "24"),
		/// UPS 10kg box.
		Ups10KgBox => ("UPS 10kg Box", "25"),
	}
}

def_setting_enum! {
	/// Published rate table to quote from.
	CustomerClassification, keys::CUSTOMER_CLASSIFICATION_CODE {
		/// Rates associated with the shipper number.
		ShipperNumberRates => ("00", "00"),
		/// Daily rates.
		DailyRates => ("01", "01"),
		/// Retail rates.
		RetailRates => ("04", "04"),
		/// Regional rates.
		RegionalRates => ("05", "05"),
		/// General list rates.
		GeneralListRates => ("06", "06"),
		/// Standard list rates.
		StandardListRates => ("53", "53"),
	}
}

def_setting_enum! {
	/// Unit package weights are expressed in.
	WeightUnit, keys::UNIT_WEIGHT {
		/// Pounds.
		Pounds => ("LBS", "LBS"),
		/// Kilograms.
		Kilograms => ("KGS", "KGS"),
	}
}

def_setting_enum! {
	/// Destination kind quoted for.
	QuoteType, keys::QUOTE_TYPE {
		/// Business address.
		Commercial => ("Commercial", "Commercial"),
		/// Residential address.
		Residential => ("Residential", "Residential"),
	}
}

def_setting_enum! {
	/// Plugin update check policy.
	UpdateCheck, keys::UPDATE_CHECK {
		/// Check on every admin visit.
		Always => ("Always", "Always"),
		/// Never check.
		Never => ("Never", "Never"),
		/// Check once, then switch to [`UpdateCheck::Never`].
		OnDemand => ("On Demand", "On Demand"),
	}
}
impl UpdateCheck {
	/// Whether this policy asks for a check now.
	pub const fn wants_check(self) -> bool {
		!matches!(self, Self::Never)
	}
}

def_setting_enum! {
	/// Whether a fixed handling fee is charged once per order or once per box.
	HandlingBasis, keys::HANDLING_APPLIES {
		/// Once for the whole order.
		PerOrder => ("Per Order", "Per Order"),
		/// Once for each shipping box.
		PerBox => ("Per Box", "Per Box"),
	}
}

/// Extra details shown alongside quotes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DisplayOptions {
	/// Append box count and total weight to the module title.
	pub weight: bool,
	/// Append the transit estimate to each option title.
	pub transit: bool,
}
impl FromStr for DisplayOptions {
	type Err = ConfigError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let lowered = s.to_ascii_lowercase();

		Ok(Self { weight: lowered.contains("weight"), transit: lowered.contains("transit") })
	}
}

/// Operator markup added to a carrier quote.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum HandlingFee {
	/// Amount added to the quote; multiplied by the box count for [`HandlingBasis::PerBox`].
	Fixed(f64),
	/// Percentage of the quote added once.
	Percent(f64),
}
impl HandlingFee {
	/// Parses `"2.50"`, `"10%"`, or an empty value (no fee).
	pub fn parse(key: &'static str, raw: &str) -> Result<Self, ConfigError> {
		let view = raw.trim();

		if view.is_empty() {
			return Ok(Self::Fixed(0.));
		}

		let (number, percent) = match view.strip_suffix('%') {
			Some(number) => (number.trim(), true),
			None => (view, false),
		};
		let value = number
			.parse::<f64>()
			.ok()
			.filter(|value| value.is_finite())
			.ok_or_else(|| ConfigError::invalid(key, view))?;

		Ok(if percent { Self::Percent(value) } else { Self::Fixed(value) })
	}

	/// Applies the fee to `cost` for a shipment of `boxes` boxes.
	pub fn apply(self, cost: f64, boxes: u32, basis: HandlingBasis) -> f64 {
		match self {
			Self::Fixed(amount) => {
				let times = match basis {
					HandlingBasis::PerOrder => 1.,
					HandlingBasis::PerBox => f64::from(boxes),
				};

				cost + amount * times
			},
			Self::Percent(percent) => cost * (1. + percent / 100.),
		}
	}
}
impl Default for HandlingFee {
	fn default() -> Self {
		Self::Fixed(0.)
	}
}

/// Per-service fee overrides written as `code:fee` pairs, e.g. `03:2.50, 01:10%`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ServiceHandlingFees(BTreeMap<String, HandlingFee>);
impl ServiceHandlingFees {
	/// Fee for `code`, falling back to `global`.
	pub fn fee_for(&self, code: &str, global: HandlingFee) -> HandlingFee {
		self.0.get(code).copied().unwrap_or(global)
	}

	/// Whether no overrides are configured.
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}
}
impl FromStr for ServiceHandlingFees {
	type Err = ConfigError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let mut fees = BTreeMap::new();

		for entry in s.split(',').map(str::trim).filter(|entry| !entry.is_empty()) {
			let (code, fee) = entry
				.split_once(':')
				.ok_or_else(|| ConfigError::invalid(keys::SERVICE_HANDLING_FEES, entry))?;
			let code = code.trim();

			if code.is_empty() || !code.bytes().all(|b| b.is_ascii_digit()) {
				return Err(ConfigError::invalid(keys::SERVICE_HANDLING_FEES, entry));
			}

			fees.insert(code.to_owned(), HandlingFee::parse(keys::SERVICE_HANDLING_FEES, fee)?);
		}

		Ok(Self(fees))
	}
}

/// Service codes the store offers, taken from the `[NN]` tags of the `TYPES` setting.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ServiceAllowList(BTreeSet<String>);
impl ServiceAllowList {
	/// Whether `code` is offered.
	pub fn contains(&self, code: &str) -> bool {
		self.0.contains(code)
	}

	/// Whether no service is offered.
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	/// Offered codes in ascending order.
	pub fn codes(&self) -> impl Iterator<Item = &str> {
		self.0.iter().map(String::as_str)
	}
}
impl FromStr for ServiceAllowList {
	type Err = ConfigError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let mut codes = BTreeSet::new();
		let mut rest = s;

		while let Some(open) = rest.find('[') {
			let after = &rest[open + 1..];
			let Some(close) = after.find(']') else { break };
			let code = after[..close].trim();

			if code.contains('[') {
				rest = after;

				continue;
			}
			if !code.is_empty() && code.bytes().all(|b| b.is_ascii_alphanumeric()) {
				codes.insert(code.to_owned());
			}

			rest = &after[close + 1..];
		}

		Ok(Self(codes))
	}
}

/// Parses a `True`/`False` style flag.
pub fn parse_flag(key: &'static str, raw: &str) -> Result<bool, ConfigError> {
	let view = raw.trim();

	if view.eq_ignore_ascii_case("true") {
		Ok(true)
	} else if view.eq_ignore_ascii_case("false") || view.is_empty() {
		Ok(false)
	} else {
		Err(ConfigError::invalid(key, view))
	}
}
