//! Builds the rate-shop request for a shipment.

// self
use crate::{
	carrier::wire::{
		CodeField, DeliveryTimeInformation, MonetaryAmount, Package, PackageServiceOptions,
		PackageWeight, PartyAddress, RateRequest, RateRequestBody, RateShipment, RequestHeader,
		ShipTo, Shipper, ShipmentRatingOptions, TransactionReference,
	},
	config::{QuoteType, Settings},
	rating::Shipment,
};

/// Declared value for each box: the order value rounded up, split evenly, rounded up again.
///
/// Uninsured shipments declare nothing.
pub fn declared_value_per_box(order_value: f64, boxes: u32, insure: bool) -> u64 {
	if !insure || !order_value.is_finite() || order_value <= 0. {
		return 0;
	}

	(order_value.ceil() / f64::from(boxes.max(1))).ceil() as u64
}

/// Builds the request for `shipment`, declaring values in `currency_code`.
pub fn build_rate_request(settings: &Settings, shipment: &Shipment, currency_code: &str) -> RateRequest {
	let destination = &shipment.destination;
	let packaging = settings.packaging_type.code();
	let package = Package {
		packaging_type: CodeField::new(packaging),
		package_weight: PackageWeight {
			unit_of_measurement: CodeField::new(settings.weight_unit.code()),
			weight: format!("{:.1}", shipment.box_weight),
		},
		package_service_options: PackageServiceOptions {
			declared_value: MonetaryAmount {
				currency_code: currency_code.to_owned(),
				monetary_value: declared_value_per_box(
					shipment.order_value,
					shipment.boxes,
					settings.insure,
				)
				.to_string(),
			},
		},
	};
	let residential = matches!(settings.quote_type, QuoteType::Residential);

	RateRequest {
		rate_request: RateRequestBody {
			request: RequestHeader { transaction_reference: TransactionReference::default() },
			pickup_type: CodeField::new(settings.pickup_method.code()),
			customer_classification: CodeField::new(settings.customer_classification.code()),
			shipment: RateShipment {
				shipper: Shipper {
					address: PartyAddress {
						city: settings.origin.city.clone(),
						state_province_code: settings.origin.state_code.clone(),
						postal_code: settings.origin.postcode.clone(),
						country_code: settings.origin.country_code.clone(),
						residential_address_indicator: None,
					},
					shipper_number: settings.shipper_number.clone(),
				},
				ship_to: ShipTo {
					address: PartyAddress {
						city: destination.city.clone(),
						state_province_code: destination.state_code.clone(),
						postal_code: destination.postcode.clone(),
						country_code: destination.country_code.clone(),
						residential_address_indicator: residential.then(String::new),
					},
				},
				delivery_time_information: DeliveryTimeInformation {
					package_bill_type: packaging.to_owned(),
				},
				shipment_rating_options: settings.shipper_number.as_ref().map(|_| {
					ShipmentRatingOptions { negotiated_rates_indicator: "Y".into() }
				}),
				package: vec![package; shipment.boxes.max(1) as usize],
			},
		},
	}
}

#[cfg(test)]
mod tests {
	// std
	use std::collections::BTreeMap;
	// self
	use super::*;
	use crate::{config::keys, rating::Destination};

	fn settings(overrides: &[(&str, &str)]) -> Settings {
		let mut values = keys::install_rows("USD", "1.3.6")
			.into_iter()
			.map(|row| (row.key, row.value))
			.collect::<BTreeMap<_, _>>();

		for (key, value) in overrides {
			values.insert((*key).into(), (*value).into());
		}

		Settings::from_values(&values).expect("Settings fixture should parse.")
	}

	fn shipment() -> Shipment {
		Shipment::new(
			3,
			12.34,
			100.2,
			Destination {
				city: "Miami".into(),
				state_code: "FL".into(),
				state_name: "Florida".into(),
				postcode: "33101".into(),
				country_code: "US".into(),
				country_name: "United States".into(),
			},
		)
	}

	#[test]
	fn declared_value_rounds_up_twice() {
		assert_eq!(declared_value_per_box(100.2, 3, true), 34);
		assert_eq!(declared_value_per_box(99.0, 3, true), 33);
		assert_eq!(declared_value_per_box(100.2, 3, false), 0);
		assert_eq!(declared_value_per_box(10.0, 0, true), 10);
	}

	#[test]
	fn request_has_one_package_per_box() {
		let settings = settings(&[(keys::ORIGIN_POSTALCODE, "10001")]);
		let request = build_rate_request(&settings, &shipment(), "USD");
		let body = &request.rate_request;

		assert_eq!(body.pickup_type.code, "01");
		assert_eq!(body.customer_classification.code, "04");
		assert_eq!(body.shipment.package.len(), 3);
		assert_eq!(body.shipment.package[0].package_weight.weight, "12.3");
		assert_eq!(body.shipment.package[0].package_service_options.declared_value.monetary_value, "34");
		assert_eq!(body.shipment.delivery_time_information.package_bill_type, "02");
		assert_eq!(body.shipment.shipper.address.postal_code, "10001");
		assert!(body.shipment.shipment_rating_options.is_none());
		assert!(body.shipment.ship_to.address.residential_address_indicator.is_none());
	}

	#[test]
	fn shipper_number_requests_negotiated_rates() {
		let settings = settings(&[
			(keys::SHIPPER_NUMBER, "A1B2C3"),
			(keys::QUOTE_TYPE, "Residential"),
			(keys::INSURE, "False"),
		]);
		let request = build_rate_request(&settings, &shipment(), "USD");
		let json = serde_json::to_value(&request).expect("Request should serialize.");
		let shipment = &json["RateRequest"]["Shipment"];

		assert_eq!(shipment["Shipper"]["ShipperNumber"], "A1B2C3");
		assert_eq!(shipment["ShipmentRatingOptions"]["NegotiatedRatesIndicator"], "Y");
		assert_eq!(shipment["ShipTo"]["Address"]["ResidentialAddressIndicator"], "");
		assert_eq!(
			shipment["Package"][0]["PackageServiceOptions"]["DeclaredValue"]["MonetaryValue"],
			"0"
		);
	}
}
