//! English storefront, admin, and email text.

// self
use crate::rating::Destination;

/// Module title shown at checkout and in the admin.
pub const TEXT_TITLE: &str = "United Parcel Service";
/// Module description shown in the admin.
pub const TEXT_DESCRIPTION: &str = "United Parcel Service";

/// Admin notice when either credential is missing.
pub const NEED_CREDENTIALS: &str =
	"This module cannot be enabled until you supply both the Client ID and Client Secret.";
/// Admin notice when the origin postcode is missing for a region that requires it.
pub const NEED_POSTCODE: &str = "The Origin Zip/Postcode is required when your shipping \"Origin\" is US, Canada, Mexico or Puerto Rico; this module has been disabled.";

/// Subject of every operator email.
pub const EMAIL_SUBJECT: &str = "The 'upsoauth' shipping method has been automatically disabled";
/// Operator email body when UPS rejects the credentials.
pub const INVALID_CREDENTIALS: &str = "The 'Client ID' and 'Client Secret' you supplied are not recognized by UPS; the 'upsoauth' shipping module has been automatically disabled.";

/// Admin notice after an automatic upgrade.
pub fn updated(version: &str) -> String {
	format!("The UPS RESTful/OAuth shipping module was automatically updated to v{version}.")
}

/// Operator email body when the configured carrier client is not registered.
pub fn missing_api_class(name: &str) -> String {
	format!(
		"The 'UPS Api Class' you supplied ({name}) does not exist; the 'upsoauth' shipping module has been automatically disabled."
	)
}

/// Admin notice when a newer plugin release exists.
pub fn new_version_available(link: &str) -> String {
	format!(" - NOTE: A NEW VERSION OF THIS PLUGIN IS AVAILABLE. [Details]({link})")
}

/// Suffix appended to an option title when transit time is displayed.
pub fn eta(days: u32) -> String {
	format!(", ETA: {days} Business Days")
}

/// Warning raised when the configured currency is not enabled in the store.
pub fn invalid_currency(code: &str, default: &str) -> String {
	format!("Unknown currency code specified ({code}), using store default ({default}).")
}

/// Address-form field labels the host storefront uses.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EntryLabels {
	/// Postcode field label.
	pub post_code: String,
	/// State field label.
	pub state: String,
	/// Country field label.
	pub country: String,
}
impl Default for EntryLabels {
	fn default() -> Self {
		Self {
			post_code: "Post/Zip Code".into(),
			state: "State/Province".into(),
			country: "Country".into(),
		}
	}
}

/// Carrier error codes with a dedicated customer-facing message.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CarrierErrorKind {
	/// UPS does not serve the destination country.
	InvalidCountry,
	/// No service reaches the destination.
	ServiceUnavailable,
	/// Postcode missing or invalid.
	Postcode,
	/// State missing or invalid.
	State,
}

/// Known carrier codes.
pub const CARRIER_ERRORS: &[(&str, CarrierErrorKind)] = &[
	("111210", CarrierErrorKind::ServiceUnavailable),
	("111217", CarrierErrorKind::InvalidCountry),
	("111285", CarrierErrorKind::Postcode),
	("111286", CarrierErrorKind::State),
];

/// Looks up the message kind for a carrier error code.
pub fn carrier_error_kind(code: &str) -> Option<CarrierErrorKind> {
	CARRIER_ERRORS.iter().find(|(known, _)| *known == code).map(|(_, kind)| *kind)
}

/// Customer-facing text for a carrier error on a shipment to `destination`.
pub fn carrier_error_message(code: &str, destination: &Destination, labels: &EntryLabels) -> String {
	let place = [destination.state_name.as_str(), destination.country_name.as_str()]
		.into_iter()
		.filter(|part| !part.is_empty())
		.collect::<Vec<_>>()
		.join(" ");

	match carrier_error_kind(code) {
		Some(CarrierErrorKind::InvalidCountry) => format!(
			"UPS does not ship to {}, please select a different {}.",
			destination.country_name, labels.country
		),
		Some(CarrierErrorKind::ServiceUnavailable) => format!("No shipping is available to {place}."),
		Some(CarrierErrorKind::Postcode) if destination.postcode.trim().is_empty() =>
			format!("A {} is required for {place}, please re-enter.", labels.post_code),
		Some(CarrierErrorKind::Postcode) => format!(
			"The {} ({}) is invalid for {place}, please re-enter.",
			labels.post_code, destination.postcode
		),
		Some(CarrierErrorKind::State) if destination.state_name.trim().is_empty() =>
			format!("A {} is required for some countries.", labels.state),
		Some(CarrierErrorKind::State) => format!(
			"{} is not a valid state abbreviation for {}, please re-enter.",
			destination.state_name, destination.country_name
		),
		None => format!("UPS is currently unable to provide shipping quotes, error code [{code}]."),
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	fn destination(postcode: &str, state_name: &str) -> Destination {
		Destination {
			city: String::new(),
			state_code: String::new(),
			state_name: state_name.into(),
			postcode: postcode.into(),
			country_code: "US".into(),
			country_name: "United States".into(),
		}
	}

	#[test]
	fn postcode_error_depends_on_whether_one_was_given() {
		let labels = EntryLabels::default();

		assert_eq!(
			carrier_error_message("111285", &destination("", "Florida"), &labels),
			"A Post/Zip Code is required for Florida United States, please re-enter."
		);
		assert_eq!(
			carrier_error_message("111285", &destination("9999", "Florida"), &labels),
			"The Post/Zip Code (9999) is invalid for Florida United States, please re-enter."
		);
	}

	#[test]
	fn state_and_country_errors_use_labels() {
		let labels = EntryLabels::default();

		assert_eq!(
			carrier_error_message("111286", &destination("33101", ""), &labels),
			"A State/Province is required for some countries."
		);
		assert_eq!(
			carrier_error_message("111286", &destination("33101", "Zz"), &labels),
			"Zz is not a valid state abbreviation for United States, please re-enter."
		);
		assert_eq!(
			carrier_error_message("111217", &destination("33101", "Florida"), &labels),
			"UPS does not ship to United States, please select a different Country."
		);
		assert_eq!(
			carrier_error_message("111210", &destination("", ""), &labels),
			"No shipping is available to United States."
		);
	}

	#[test]
	fn unknown_codes_get_generic_text() {
		assert_eq!(
			carrier_error_message("250003", &destination("", ""), &EntryLabels::default()),
			"UPS is currently unable to provide shipping quotes, error code [250003]."
		);
		assert_eq!(eta(3), ", ETA: 3 Business Days");
		assert_eq!(updated("1.3.6"), "The UPS RESTful/OAuth shipping module was automatically updated to v1.3.6.");
	}
}
