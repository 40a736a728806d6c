//! UPS service-code display names per origin region.
//!
//! UPS reports services by numeric code only, and the same code means different products
//! depending on where the shipment starts (`65` is "Worldwide Saver" from the US but
//! "Express Saver" from Canada). Names follow the UPS Rating RESTful developer guide.

// self
use crate::config::OriginRegion;

const US: &[(&str, &str)] = &[
	("01", "UPS Next Day Air"),
	("02", "UPS 2nd Day Air"),
	("03", "UPS Ground"),
	("07", "UPS Worldwide Express"),
	("08", "UPS Worldwide Expedited"),
	("11", "UPS Standard"),
	("12", "UPS 3 Day Select"),
	("13", "UPS Next Day Air Saver"),
	("14", "UPS Next Day Air Early"),
	("54", "UPS Worldwide Express Plus"),
	("59", "UPS 2nd Day Air A.M."),
	("65", "UPS Worldwide Saver"),
	("75", "UPS Heavy Goods"),
];
const CANADA: &[(&str, &str)] = &[
	("01", "UPS Express"),
	("02", "UPS Expedited"),
	("07", "UPS Worldwide Express"),
	("08", "UPS Worldwide Expedited"),
	("11", "UPS Standard"),
	("12", "UPS 3 Day Select"),
	("13", "UPS Express Saver"),
	("14", "UPS Express Early"),
	("54", "UPS Worldwide Express Plus"),
	("65", "UPS Express Saver"),
	("70", "UPS Access Point Economy"),
];
const EUROPEAN_UNION: &[(&str, &str)] = &[
	("07", "UPS Express"),
	("08", "UPS Expedited"),
	("11", "UPS Standard"),
	("54", "UPS Worldwide Express Plus"),
	("65", "UPS Worldwide Saver"),
	("70", "UPS Access Point Economy"),
];
const PUERTO_RICO: &[(&str, &str)] = &[
	("01", "UPS Next Day Air"),
	("02", "UPS 2nd Day Air"),
	("03", "UPS Ground"),
	("07", "UPS Worldwide Express"),
	("08", "UPS Worldwide Expedited"),
	("14", "UPS Next Day Air Early"),
	("54", "UPS Worldwide Express Plus"),
	("65", "UPS Worldwide Saver"),
];
const MEXICO: &[(&str, &str)] = &[
	("07", "UPS Express"),
	("08", "UPS Expedited"),
	("11", "UPS Standard"),
	("54", "UPS Worldwide Express Plus"),
	("65", "UPS Worldwide Saver"),
];
const OTHER: &[(&str, &str)] = &[
	("07", "UPS Worldwide Express"),
	("08", "UPS Worldwide Expedited"),
	("11", "UPS Standard"),
	("54", "UPS Worldwide Express Plus"),
	("65", "UPS Worldwide Saver"),
];

/// `(code, name)` pairs known for `region`, in code order.
pub fn table(region: OriginRegion) -> &'static [(&'static str, &'static str)] {
	match region {
		OriginRegion::UnitedStates => US,
		OriginRegion::Canada => CANADA,
		OriginRegion::EuropeanUnion => EUROPEAN_UNION,
		OriginRegion::PuertoRico => PUERTO_RICO,
		OriginRegion::Mexico => MEXICO,
		OriginRegion::Other => OTHER,
	}
}

/// Display name of `code` for shipments leaving `region`.
pub fn service_name(region: OriginRegion, code: &str) -> Option<&'static str> {
	table(region).iter().find(|(known, _)| *known == code).map(|(_, name)| *name)
}

/// Display name of `code`, or a generic label for codes missing from the table.
pub fn display_name(region: OriginRegion, code: &str) -> String {
	service_name(region, code).map_or_else(|| format!("UPS Service {code}"), str::to_owned)
}
