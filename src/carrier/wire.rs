//! JSON shapes exchanged with the UPS token and rating endpoints.
//!
//! UPS is loose about scalar types: lifetimes, charges, and transit days arrive as either
//! JSON numbers or numeric strings, and `RatedShipment` collapses to a bare object when
//! only one service is offered. The types here absorb both forms.

// crates.io
use serde::{Deserializer, de::DeserializeOwned};
// self
use crate::{_prelude::*, error::DecodeError};

/// Scalar that UPS may send as a JSON number or a numeric string.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Numeric {
	/// JSON number.
	Number(serde_json::Number),
	/// JSON string.
	Text(String),
}
impl Numeric {
	/// Interprets the value as a float.
	pub fn as_f64(&self, field: &'static str) -> Result<f64, DecodeError> {
		let parsed = match self {
			Self::Number(number) => number.as_f64(),
			Self::Text(text) => text.trim().parse::<f64>().ok(),
		};

		parsed
			.filter(|value| value.is_finite())
			.ok_or_else(|| DecodeError::InvalidNumber { field, value: self.to_string() })
	}

	/// Interprets the value as a whole number.
	pub fn as_i64(&self, field: &'static str) -> Result<i64, DecodeError> {
		let parsed = match self {
			Self::Number(number) => number.as_i64(),
			Self::Text(text) => text.trim().parse::<i64>().ok(),
		};

		parsed.ok_or_else(|| DecodeError::InvalidNumber { field, value: self.to_string() })
	}
}
impl Display for Numeric {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		match self {
			Self::Number(number) => write!(f, "{number}"),
			Self::Text(text) => f.write_str(text),
		}
	}
}

/// `{ "Code": "..." }` wrapper used throughout the rating API.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CodeField {
	/// Carrier code value.
	pub code: String,
}
impl CodeField {
	/// Wraps a code.
	pub fn new(code: impl Into<String>) -> Self {
		Self { code: code.into() }
	}
}

/// `{"response": {"errors": [...]}}` block shared by both endpoints.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct ErrorBlock {
	/// Reported errors, in carrier order.
	#[serde(default)]
	pub errors: Vec<ErrorDetail>,
}

/// Any non-2xx body that carries an error block.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct ErrorEnvelope {
	/// Error block, when the body has one.
	#[serde(default)]
	pub response: Option<ErrorBlock>,
}

/// One carrier-reported error.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct ErrorDetail {
	/// Numeric error code.
	pub code: Numeric,
	/// Carrier-supplied message.
	#[serde(default)]
	pub message: String,
}

/// Body returned by the token endpoint, success or failure.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct TokenBody {
	/// Bearer token on success.
	#[serde(default)]
	pub access_token: Option<String>,
	/// Lifetime in seconds on success.
	#[serde(default)]
	pub expires_in: Option<Numeric>,
	/// Error block on failure.
	#[serde(default)]
	pub response: Option<ErrorBlock>,
}

/// Successful client-credentials grant.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TokenGrant {
	/// Bearer token.
	pub access_token: String,
	/// Lifetime in seconds as reported by UPS.
	pub expires_in: i64,
}
impl TokenBody {
	/// Extracts the grant, assuming no error block was present.
	pub fn into_grant(self) -> Result<TokenGrant, DecodeError> {
		let access_token = self
			.access_token
			.ok_or(DecodeError::MissingField { endpoint: "token", field: "access_token" })?;
		let expires_in = self
			.expires_in
			.ok_or(DecodeError::MissingField { endpoint: "token", field: "expires_in" })?
			.as_i64("expires_in")?;

		Ok(TokenGrant { access_token, expires_in })
	}
}

/// Outbound rate-shop request: `{"RateRequest": {...}}`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RateRequest {
	/// Request payload.
	pub rate_request: RateRequestBody,
}

/// Contents of `RateRequest`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RateRequestBody {
	/// Transaction reference header.
	pub request: RequestHeader,
	/// How packages reach UPS.
	pub pickup_type: CodeField,
	/// Which published rate table to quote from.
	pub customer_classification: CodeField,
	/// Shipment being rated.
	pub shipment: RateShipment,
}

/// `Request` header of a rate request.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RequestHeader {
	/// Echoed transaction reference.
	pub transaction_reference: TransactionReference,
}

/// Echoed transaction reference.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TransactionReference {
	/// Free-form customer context.
	pub customer_context: String,
	/// Free-form transaction identifier.
	pub transaction_identifier: String,
}
impl Default for TransactionReference {
	fn default() -> Self {
		Self {
			customer_context: "CustomerContext".into(),
			transaction_identifier: "TransactionIdentifier".into(),
		}
	}
}

/// `Shipment` block of a rate request.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RateShipment {
	/// Origin party.
	pub shipper: Shipper,
	/// Destination party.
	pub ship_to: ShipTo,
	/// Transit-time request options.
	pub delivery_time_information: DeliveryTimeInformation,
	/// Present when negotiated rates are requested.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub shipment_rating_options: Option<ShipmentRatingOptions>,
	/// One entry per shipping box.
	pub package: Vec<Package>,
}

/// Origin party.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Shipper {
	/// Origin address.
	pub address: PartyAddress,
	/// UPS account number, required for negotiated rates.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub shipper_number: Option<String>,
}

/// Destination party.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ShipTo {
	/// Destination address.
	pub address: PartyAddress,
}

/// Postal address as the rating API expects it.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PartyAddress {
	/// City name; may be empty for estimator requests.
	pub city: String,
	/// State or province abbreviation.
	pub state_province_code: String,
	/// Postal code; may be empty for estimator requests.
	pub postal_code: String,
	/// ISO 3166-1 alpha-2 country code.
	pub country_code: String,
	/// Present (empty) for residential destinations.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub residential_address_indicator: Option<String>,
}

/// `DeliveryTimeInformation` block.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DeliveryTimeInformation {
	/// Packaging-type code reused as the bill type.
	pub package_bill_type: String,
}

/// `ShipmentRatingOptions` block.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ShipmentRatingOptions {
	/// `"Y"` asks UPS to include negotiated rates.
	pub negotiated_rates_indicator: String,
}

/// One shipping box.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Package {
	/// Packaging-type code.
	pub packaging_type: CodeField,
	/// Box weight.
	pub package_weight: PackageWeight,
	/// Insurance options.
	pub package_service_options: PackageServiceOptions,
}

/// Box weight and its unit.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PackageWeight {
	/// `LBS` or `KGS`.
	pub unit_of_measurement: CodeField,
	/// Weight formatted with one decimal.
	pub weight: String,
}

/// Insurance options for one box.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PackageServiceOptions {
	/// Declared value of the box.
	pub declared_value: MonetaryAmount,
}

/// Amount plus ISO currency.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct MonetaryAmount {
	/// ISO 4217 code.
	pub currency_code: String,
	/// Whole-unit amount as a string.
	pub monetary_value: String,
}

/// Body returned by the rating endpoint, success or failure.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct RateBody {
	/// Quotes on success.
	#[serde(default, rename = "RateResponse")]
	pub rate_response: Option<RateResponse>,
	/// Error block on failure.
	#[serde(default)]
	pub response: Option<ErrorBlock>,
}

/// `RateResponse` payload.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RateResponse {
	/// Every service UPS offers for the shipment.
	#[serde(default, deserialize_with = "one_or_many")]
	pub rated_shipment: Vec<RatedShipment>,
}

/// One offered service.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RatedShipment {
	/// Service code.
	pub service: CodeField,
	/// Published charges.
	#[serde(default)]
	pub total_charges: Option<Charge>,
	/// Account-specific charges, when negotiated rates were requested.
	#[serde(default)]
	pub negotiated_rate_charges: Option<NegotiatedRateCharges>,
	/// Guaranteed transit information.
	#[serde(default)]
	pub guaranteed_delivery: Option<GuaranteedDelivery>,
}

/// Amount charged for a service.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Charge {
	/// ISO 4217 code.
	#[serde(default)]
	pub currency_code: Option<String>,
	/// Amount.
	pub monetary_value: Numeric,
}

/// Negotiated charges block.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct NegotiatedRateCharges {
	/// Negotiated total.
	#[serde(default)]
	pub total_charge: Option<Charge>,
}

/// Guaranteed delivery block.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GuaranteedDelivery {
	/// Business days in transit.
	#[serde(default)]
	pub business_days_in_transit: Option<Numeric>,
}

/// Decodes a response body, keeping the JSON path of any failure.
pub(crate) fn decode<T>(
	endpoint: &'static str,
	status: Option<u16>,
	body: &[u8],
) -> Result<T, DecodeError>
where
	T: DeserializeOwned,
{
	let mut de = serde_json::Deserializer::from_slice(body);

	serde_path_to_error::deserialize(&mut de).map_err(|source| DecodeError::Json {
		endpoint,
		status,
		source,
	})
}

fn one_or_many<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
	D: Deserializer<'de>,
	T: Deserialize<'de>,
{
	#[derive(Deserialize)]
	#[serde(untagged)]
	enum OneOrMany<T> {
		One(T),
		Many(Vec<T>),
	}

	Ok(match OneOrMany::deserialize(deserializer)? {
		OneOrMany::One(value) => vec![value],
		OneOrMany::Many(values) => values,
	})
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn token_body_accepts_string_lifetimes() {
		let body: TokenBody = decode(
			"token",
			Some(200),
			br#"{"token_type":"Bearer","access_token":"abc","expires_in":"14399","status":"approved"}"#,
		)
		.expect("Token body should decode.");
		let grant = body.into_grant().expect("Grant should be extracted.");

		assert_eq!(grant, TokenGrant { access_token: "abc".into(), expires_in: 14_399 });
	}

	#[test]
	fn token_body_reports_missing_fields() {
		let body: TokenBody =
			decode("token", Some(200), br#"{"expires_in":60}"#).expect("Body should decode.");

		assert!(matches!(
			body.into_grant(),
			Err(DecodeError::MissingField { field: "access_token", .. })
		));
	}

	#[test]
	fn rated_shipment_accepts_single_object() {
		let body: RateBody = decode(
			"rating",
			Some(200),
			br#"{"RateResponse":{"RatedShipment":{"Service":{"Code":"03"},"TotalCharges":{"CurrencyCode":"USD","MonetaryValue":"12.50"}}}}"#,
		)
		.expect("Single rated shipment should decode.");
		let shipments = body.rate_response.expect("RateResponse should be present.").rated_shipment;

		assert_eq!(shipments.len(), 1);
		assert_eq!(shipments[0].service.code, "03");
	}

	#[test]
	fn decode_failures_report_json_path() {
		let err = decode::<RateBody>(
			"rating",
			Some(200),
			br#"{"RateResponse":{"RatedShipment":[{"Service":{"Code":3}}]}}"#,
		)
		.expect_err("Numeric service codes should be rejected.");

		assert!(matches!(&err, DecodeError::Json { endpoint: "rating", .. }));

		if let DecodeError::Json { source, .. } = err {
			assert!(source.path().to_string().contains("RatedShipment"));
		}
	}

	#[test]
	fn rate_request_serializes_pascal_case_and_skips_empty_options() {
		let request = RateRequest {
			rate_request: RateRequestBody {
				request: RequestHeader { transaction_reference: TransactionReference::default() },
				pickup_type: CodeField::new("01"),
				customer_classification: CodeField::new("04"),
				shipment: RateShipment {
					shipper: Shipper { address: PartyAddress::default(), shipper_number: None },
					ship_to: ShipTo { address: PartyAddress::default() },
					delivery_time_information: DeliveryTimeInformation {
						package_bill_type: "02".into(),
					},
					shipment_rating_options: None,
					package: Vec::new(),
				},
			},
		};
		let json = serde_json::to_value(&request).expect("Rate request should serialize.");

		assert_eq!(json["RateRequest"]["PickupType"]["Code"], "01");
		assert!(json["RateRequest"]["Shipment"].get("ShipmentRatingOptions").is_none());
		assert!(json["RateRequest"]["Shipment"]["Shipper"].get("ShipperNumber").is_none());
	}
}
