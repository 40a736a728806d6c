//! Configuration keys and the rows written by a fresh install.

// self
use crate::store::ConfigRow;

/// Prefix shared by every key this module owns.
pub const PREFIX: &str = "MODULE_SHIPPING_UPSOAUTH_";

/// Whether the module is offered at checkout.
pub const STATUS: &str = "MODULE_SHIPPING_UPSOAUTH_STATUS";
/// Display order among shipping modules.
pub const SORT_ORDER: &str = "MODULE_SHIPPING_UPSOAUTH_SORT_ORDER";
/// Tax class applied to the shipping fee.
pub const TAX_CLASS: &str = "MODULE_SHIPPING_UPSOAUTH_TAX_CLASS";
/// Geo zone restricting where the module is offered.
pub const ZONE: &str = "MODULE_SHIPPING_UPSOAUTH_ZONE";
/// OAuth client ID.
pub const CLIENT_ID: &str = "MODULE_SHIPPING_UPSOAUTH_CLIENT_ID";
/// OAuth client secret.
pub const CLIENT_SECRET: &str = "MODULE_SHIPPING_UPSOAUTH_CLIENT_SECRET";
/// `Test` or `Production`.
pub const MODE: &str = "MODULE_SHIPPING_UPSOAUTH_MODE";
/// UPS account number used for negotiated rates.
pub const SHIPPER_NUMBER: &str = "MODULE_SHIPPING_UPSOAUTH_SHIPPER_NUMBER";
/// Origin region selecting the service-name table.
pub const ORIGIN: &str = "MODULE_SHIPPING_UPSOAUTH_ORIGIN";
/// Origin country code.
pub const ORIGIN_COUNTRY: &str = "MODULE_SHIPPING_UPSOAUTH_ORIGIN_COUNTRY";
/// Origin state or province code.
pub const ORIGIN_STATEPROV: &str = "MODULE_SHIPPING_UPSOAUTH_ORIGIN_STATEPROV";
/// Origin city.
pub const ORIGIN_CITY: &str = "MODULE_SHIPPING_UPSOAUTH_ORIGIN_CITY";
/// Origin postal code.
pub const ORIGIN_POSTALCODE: &str = "MODULE_SHIPPING_UPSOAUTH_ORIGIN_POSTALCODE";
/// Pickup method label.
pub const PICKUP_METHOD: &str = "MODULE_SHIPPING_UPSOAUTH_PICKUP_METHOD";
/// Packaging type label.
pub const PACKAGE_TYPE: &str = "MODULE_SHIPPING_UPSOAUTH_PACKAGE_TYPE";
/// Customer classification code.
pub const CUSTOMER_CLASSIFICATION_CODE: &str =
	"MODULE_SHIPPING_UPSOAUTH_CUSTOMER_CLASSIFICATION_CODE";
/// Display options (weight, transit time).
pub const OPTIONS: &str = "MODULE_SHIPPING_UPSOAUTH_OPTIONS";
/// Business days added to carrier transit estimates.
pub const SHIPPING_DAYS_DELAY: &str = "MODULE_SHIPPING_UPSOAUTH_SHIPPING_DAYS_DELAY";
/// `LBS` or `KGS`.
pub const UNIT_WEIGHT: &str = "MODULE_SHIPPING_UPSOAUTH_UNIT_WEIGHT";
/// `Commercial` or `Residential`.
pub const QUOTE_TYPE: &str = "MODULE_SHIPPING_UPSOAUTH_QUOTE_TYPE";
/// Global handling fee, fixed or percentage.
pub const HANDLING_FEE: &str = "MODULE_SHIPPING_UPSOAUTH_HANDLING_FEE";
/// Whether a fixed handling fee applies per order or per box.
pub const HANDLING_APPLIES: &str = "MODULE_SHIPPING_UPSOAUTH_HANDLING_APPLIES";
/// Per-service handling fee overrides.
pub const SERVICE_HANDLING_FEES: &str = "MODULE_SHIPPING_UPSOAUTH_SERVICE_HANDLING_FEES";
/// Currency for declared values.
pub const CURRENCY_CODE: &str = "MODULE_SHIPPING_UPSOAUTH_CURRENCY_CODE";
/// Whether packages carry a declared value.
pub const INSURE: &str = "MODULE_SHIPPING_UPSOAUTH_INSURE";
/// Offered services, each tagged with its `[NN]` code.
pub const TYPES: &str = "MODULE_SHIPPING_UPSOAUTH_TYPES";
/// Plugin update check policy.
pub const UPDATE_CHECK: &str = "MODULE_SHIPPING_UPSOAUTH_UPDATE_CHECK";
/// Debug-log toggle.
pub const DEBUG: &str = "MODULE_SHIPPING_UPSOAUTH_DEBUG";
/// Name of the carrier client to use.
pub const API_CLASS: &str = "MODULE_SHIPPING_UPSOAUTH_API_CLASS";
/// Installed module version.
pub const VERSION: &str = "MODULE_SHIPPING_UPSOAUTH_VERSION";

/// Every key, in admin display order.
pub const ALL: [&str; 30] = [
	STATUS,
	VERSION,
	SORT_ORDER,
	TAX_CLASS,
	ZONE,
	CLIENT_ID,
	CLIENT_SECRET,
	MODE,
	API_CLASS,
	SHIPPER_NUMBER,
	ORIGIN,
	ORIGIN_COUNTRY,
	ORIGIN_STATEPROV,
	ORIGIN_CITY,
	ORIGIN_POSTALCODE,
	PICKUP_METHOD,
	PACKAGE_TYPE,
	CUSTOMER_CLASSIFICATION_CODE,
	OPTIONS,
	SHIPPING_DAYS_DELAY,
	UNIT_WEIGHT,
	QUOTE_TYPE,
	HANDLING_FEE,
	HANDLING_APPLIES,
	SERVICE_HANDLING_FEES,
	CURRENCY_CODE,
	INSURE,
	TYPES,
	UPDATE_CHECK,
	DEBUG,
];

/// Service choices offered by the `TYPES` multi-select.
pub const SERVICE_CHOICES: [&str; 14] = [
	"Next Day Air [01]",
	"2nd Day Air [02]",
	"Ground [03]",
	"Worldwide Express [07]",
	"Worldwide Expedited [08]",
	"Standard [11]",
	"3 Day Select [12]",
	"Next Day Air Saver [13]",
	"Next Day Air Early [14]",
	"Worldwide Express Plus [54]",
	"2nd Day Air A.M. [59]",
	"Worldwide Saver [65]",
	"Access Point Economy [70]",
	"Heavy Goods [75]",
];

/// Services enabled by a fresh install.
pub const DEFAULT_TYPES: &str = "Next Day Air [01], 2nd Day Air [02], Ground [03], Worldwide Express [07], Standard [11], 3 Day Select [12]";

/// Name of the built-in carrier client.
pub const DEFAULT_API_CLASS: &str = "UpsOAuthApi";

/// Rows inserted by a fresh install; `default_currency` seeds the currency row.
pub fn install_rows(default_currency: &str, module_version: &str) -> Vec<ConfigRow> {
	vec![
		ConfigRow::new("Enable UPS Shipping", STATUS, "False", "Do you want to offer UPS shipping?", 0)
			.with_set_function(select(&["True", "False"])),
		ConfigRow::new(
			"Module Version",
			VERSION,
			module_version,
			"The installed version of this shipping module.",
			0,
		)
		.with_set_function("zen_cfg_read_only("),
		ConfigRow::new(
			"Sort order of display.",
			SORT_ORDER,
			"0",
			"Sort order of display. Lowest is displayed first.",
			19,
		),
		ConfigRow::new(
			"Tax Class",
			TAX_CLASS,
			"0",
			"Use the following tax class on the shipping fee.",
			17,
		)
		.with_use_function("zen_get_tax_class_title")
		.with_set_function("zen_cfg_pull_down_tax_classes("),
		ConfigRow::new(
			"Shipping Zone",
			ZONE,
			"0",
			"If a zone is selected, only enable this shipping method for that zone.",
			18,
		)
		.with_use_function("zen_get_zone_class_title")
		.with_set_function("zen_cfg_pull_down_zone_classes("),
		ConfigRow::new(
			"UPS Rates Client ID",
			CLIENT_ID,
			"",
			"Enter the OAuth <code>Client ID</code> assigned to you by UPS.",
			1,
		),
		ConfigRow::new(
			"UPS Rates Client Secret",
			CLIENT_SECRET,
			"",
			"Enter your OAuth <code>Client Secret</code> assigned to you by UPS.",
			2,
		),
		ConfigRow::new(
			"Test or Production Mode",
			MODE,
			"Test",
			"Use this module in Test or Production mode?",
			12,
		)
		.with_set_function(select(&["Test", "Production"])),
		ConfigRow::new(
			"UPS Api Class",
			API_CLASS,
			DEFAULT_API_CLASS,
			"The name of the carrier client used to communicate with UPS. Leave as-is unless you have registered a replacement.",
			12,
		),
		ConfigRow::new(
			"UPS Rates <em>Shipper Number</em>",
			SHIPPER_NUMBER,
			"",
			"Enter your UPS Services <em>Shipper Number</em>, if you want to receive your account's negotiated rates!",
			3,
		),
		ConfigRow::new(
			"Shipping Origin",
			ORIGIN,
			"US Origin",
			"What origin point should be used (this setting affects only what UPS product names are shown to the customer).",
			7,
		)
		.with_set_function(select(&[
			"US Origin",
			"Canada Origin",
			"European Union Origin",
			"Puerto Rico Origin",
			"Mexico Origin",
			"All other origins",
		])),
		ConfigRow::new(
			"Origin Country",
			ORIGIN_COUNTRY,
			"US",
			"Enter the two-letter code for your origin country.",
			10,
		),
		ConfigRow::new(
			"Origin State/Province",
			ORIGIN_STATEPROV,
			"",
			"Enter the two-letter code for your origin state/province.",
			9,
		),
		ConfigRow::new("Origin City", ORIGIN_CITY, "", "Enter the name of the origin city.", 8),
		ConfigRow::new(
			"Origin Zip/Postal Code",
			ORIGIN_POSTALCODE,
			"",
			"Enter your origin zip/postalcode.",
			11,
		),
		ConfigRow::new(
			"Pickup Method",
			PICKUP_METHOD,
			"Daily Pickup",
			"How do you give packages to UPS?",
			4,
		)
		.with_set_function(select(&[
			"Daily Pickup",
			"Customer Counter",
			"One Time Pickup",
			"On Call Air Pickup",
			"Letter Center",
			"Air Service Center",
		])),
		ConfigRow::new(
			"Packaging Type",
			PACKAGE_TYPE,
			"Customer Package",
			"What kind of packaging do you use?",
			5,
		)
		.with_set_function(select(&[
			"Customer Package",
			"UPS Letter",
			"UPS Tube",
			"UPS Pak",
			"UPS Express Box",
			"UPS 25kg Box",
			"UPS 10kg Box",
		])),
		ConfigRow::new(
			"Customer Classification Code",
			CUSTOMER_CLASSIFICATION_CODE,
			"04",
			"<br>Choose the type of rates to be returned:<ul><li><b>00</b>: Rates associated with your <em>Shipper Number</em></li><li><b>01</b>: Daily Rates</li><li><b>04</b>: Retail Rates (default)</li><li><b>05</b>: Regional Rates</li><li><b>06</b>: General List Rates</li><li><b>53</b>: Standard List Rates</li></ul>",
			6,
		)
		.with_set_function(select(&["00", "01", "04", "05", "06", "53"])),
		ConfigRow::new(
			"UPS Display Options",
			OPTIONS,
			"--none--",
			"Select from the following the UPS options.",
			16,
		)
		.with_set_function(multi_select(&["Display weight", "Display transit time"])),
		ConfigRow::new(
			"Shipping Delay",
			SHIPPING_DAYS_DELAY,
			"0",
			"How many business days after an order is placed is the order shipped? This value is added to the number of business days that UPS indicates in its rate quote.",
			7,
		),
		ConfigRow::new("Unit Weight", UNIT_WEIGHT, "LBS", "By what unit are your packages weighed?", 13)
			.with_set_function(select(&["LBS", "KGS"])),
		ConfigRow::new(
			"Quote Type",
			QUOTE_TYPE,
			"Commercial",
			"Quote for Residential or Commercial Delivery",
			15,
		)
		.with_set_function(select(&["Commercial", "Residential"])),
		ConfigRow::new(
			"Handling Fee",
			HANDLING_FEE,
			"0",
			"Handling fee for this shipping method.  The value you enter is either a fixed value for all shipping quotes or a percentage, e.g. 10%, of each UPS quote's value.",
			16,
		),
		ConfigRow::new(
			"Handling Fee Applies",
			HANDLING_APPLIES,
			"Per Order",
			"Is a fixed handling fee charged once per order or once for each shipping box?",
			16,
		)
		.with_set_function(select(&["Per Order", "Per Box"])),
		ConfigRow::new(
			"Service Handling Fees",
			SERVICE_HANDLING_FEES,
			"",
			"Optional per-service handling fees that replace the global fee, e.g. <code>03:2.50, 01:10%</code>.",
			16,
		),
		ConfigRow::new(
			"UPS Currency Code",
			CURRENCY_CODE,
			default_currency,
			"Enter the 3 letter currency code for your country of origin. United States (USD)",
			2,
		),
		ConfigRow::new("Enable Insurance", INSURE, "True", "Do you want to insure packages shipped by UPS?", 0)
			.with_set_function(select(&["True", "False"])),
		ConfigRow::new(
			"Shipping Methods",
			TYPES,
			DEFAULT_TYPES,
			"Select the UPS services to be offered.",
			20,
		)
		.with_set_function(multi_select(&SERVICE_CHOICES)),
		ConfigRow::new(
			"Check for Updates?",
			UPDATE_CHECK,
			"Always",
			"Do you want this shipping module to check for Zen Cart plugin updates?  Choose 'Always' to check each time you visit the <em>Modules :: Shipping</em> page (the default), 'Never' to never check or 'On Demand' to check one time when you update this setting.  If you choose 'On Demand', the setting will be reset the 'Never' after the check is complete.",
			0,
		)
		.with_set_function(select(&["Always", "Never", "On Demand"])),
		ConfigRow::new(
			"Enable debug?",
			DEBUG,
			"false",
			"Enable the shipping-module's debug and a debug-log will be created each time a UPS rate is requested",
			16,
		)
		.with_set_function(select(&["true", "false"])),
	]
}

/// Install default for `key`, if the key belongs to this module.
pub fn default_value(key: &str) -> Option<String> {
	install_rows("USD", env!("CARGO_PKG_VERSION"))
		.into_iter()
		.find(|row| row.key == key)
		.map(|row| row.value)
}

fn select(choices: &[&str]) -> String {
	format!("zen_cfg_select_option([{}], ", quoted(choices))
}

fn multi_select(choices: &[&str]) -> String {
	format!("zen_cfg_select_multioption([{}], ", quoted(choices))
}

fn quoted(choices: &[&str]) -> String {
	choices.iter().map(|choice| format!("'{choice}'")).collect::<Vec<_>>().join(", ")
}

#[cfg(test)]
mod tests {
	// std
	use std::collections::BTreeSet;
	// self
	use super::*;

	#[test]
	fn install_rows_cover_every_key_once() {
		let rows = install_rows("USD", "1.3.6");
		let keys = rows.iter().map(|row| row.key.as_str()).collect::<BTreeSet<_>>();

		assert_eq!(rows.len(), ALL.len());
		assert_eq!(keys, ALL.into_iter().collect::<BTreeSet<_>>());
		assert!(ALL.iter().all(|key| key.starts_with(PREFIX)));
	}

	#[test]
	fn install_rows_seed_currency_and_version() {
		let rows = install_rows("CAD", "1.3.6");
		let value =
			|key: &str| rows.iter().find(|row| row.key == key).map(|row| row.value.clone());

		assert_eq!(value(CURRENCY_CODE).as_deref(), Some("CAD"));
		assert_eq!(value(VERSION).as_deref(), Some("1.3.6"));
		assert_eq!(value(STATUS).as_deref(), Some("False"));
	}

	#[test]
	fn select_functions_match_host_syntax() {
		assert_eq!(select(&["LBS", "KGS"]), "zen_cfg_select_option(['LBS', 'KGS'], ");
		assert_eq!(default_value(TYPES).as_deref(), Some(DEFAULT_TYPES));
		assert_eq!(default_value("SOMETHING_ELSE"), None);
	}
}
