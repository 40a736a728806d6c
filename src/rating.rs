//! Rate quoting: shipment input, the outbound request, and priced shipping options.

pub mod quoter;
pub mod request;

pub use quoter::*;
pub use request::*;

// self
use crate::_prelude::*;

/// Where the order is going.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Destination {
	/// City; empty for estimator requests.
	pub city: String,
	/// State or province code sent to UPS.
	pub state_code: String,
	/// State or province name used in customer messages.
	pub state_name: String,
	/// Postal code; may be empty for estimator requests.
	pub postcode: String,
	/// ISO 3166-1 alpha-2 country code.
	pub country_code: String,
	/// Country name used in customer messages.
	pub country_name: String,
}

/// Cart facts needed for one quote.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Shipment {
	/// Number of boxes the order ships in.
	pub boxes: u32,
	/// Weight of each box in the configured unit.
	pub box_weight: f64,
	/// Order value used for the declared value.
	pub order_value: f64,
	/// Destination address.
	pub destination: Destination,
}
impl Shipment {
	/// Creates a shipment; a box count of zero is treated as one box.
	pub fn new(boxes: u32, box_weight: f64, order_value: f64, destination: Destination) -> Self {
		Self { boxes: boxes.max(1), box_weight, order_value, destination }
	}
}

/// One carrier offer kept after allow-list filtering.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RateQuote {
	/// UPS service code.
	pub service_code: String,
	/// Carrier cost, negotiated when available.
	pub cost: f64,
	/// Transit estimate including the configured shipping delay.
	pub business_days_in_transit: Option<u32>,
}

/// Shipping option presented at checkout.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ShippingMethodOption {
	/// Service display name; also the selection key.
	pub id: String,
	/// Display title, optionally with the transit estimate.
	pub title: String,
	/// Final cost including handling.
	pub cost: f64,
}
