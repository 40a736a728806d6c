//! Turns a shipment into sorted, priced shipping options.

// self
use crate::{
	_prelude::*,
	auth::{TokenManager, TokenSession},
	carrier::{
		CarrierApiClient, RateRequest, RateResponse,
		wire::{Charge, RatedShipment},
	},
	config::{Settings, StoreProfile},
	error::DecodeError,
	hooks::{ModuleObserver, NoopObserver},
	messages,
	obs::{self, DebugLog, FlowKind, FlowOutcome, QuoteSpan},
	rating::{RateQuote, Shipment, ShippingMethodOption, build_rate_request},
	services,
};

/// Quotes shipments for one store configuration.
#[derive(Clone)]
pub struct RateQuoter {
	tokens: TokenManager,
	carrier: Arc<dyn CarrierApiClient>,
	settings: Arc<Settings>,
	profile: Arc<StoreProfile>,
	observer: Arc<dyn ModuleObserver>,
	log: DebugLog,
}
impl RateQuoter {
	/// Creates a quoter that authenticates through `tokens` and rates through `carrier`.
	pub fn new(
		tokens: TokenManager,
		carrier: Arc<dyn CarrierApiClient>,
		settings: Arc<Settings>,
		profile: Arc<StoreProfile>,
	) -> Self {
		Self {
			tokens,
			carrier,
			settings,
			profile,
			observer: Arc::new(NoopObserver),
			log: DebugLog::disabled(),
		}
	}

	/// Installs an observer for the outbound request hook.
	pub fn with_observer(mut self, observer: Arc<dyn ModuleObserver>) -> Self {
		self.observer = observer;

		self
	}

	/// Routes request and response dumps to `log`.
	pub fn with_debug_log(mut self, log: DebugLog) -> Self {
		self.log = log;

		self
	}

	/// Settings this quoter prices with.
	pub fn settings(&self) -> &Settings {
		&self.settings
	}

	/// Token manager this quoter authenticates with.
	pub fn tokens(&self) -> &TokenManager {
		&self.tokens
	}

	/// Quotes `shipment`, keeping only the option named `filter` when given.
	///
	/// An empty list means no offered service matched; it is not an error.
	pub async fn quote(
		&self,
		session: &TokenSession,
		shipment: &Shipment,
		filter: Option<&str>,
	) -> Result<Vec<ShippingMethodOption>> {
		let token = self.tokens.get_token(session).await?;
		let request = self.prepare(shipment);
		let response = QuoteSpan::new(FlowKind::Rating, "shop_rates")
			.instrument(self.shop(&token, &request))
			.await?;
		let quotes = collect_quotes(&response, &self.settings)?;

		self.log.record(format!("Configured UPS quotes: {quotes:?}"));

		let options = price_quotes(&quotes, &self.settings, shipment.boxes, filter);

		if options.is_empty() {
			self.log.record(format!(
				"No available methods matching required '{}'; no UPS quotes available.",
				filter.unwrap_or_default()
			));
		}

		Ok(options)
	}

	fn prepare(&self, shipment: &Shipment) -> RateRequest {
		let currency = self.profile.resolve_currency(&self.settings.currency_code);

		if let Some(warning) = &currency.warning {
			#[cfg(feature = "tracing")]
			tracing::warn!("{warning}");

			self.log.record(warning);
		}

		let mut request = build_rate_request(&self.settings, shipment, &currency.code);

		self.observer.before_rate_request(shipment, &mut request);

		if self.log.is_enabled() {
			let dump = serde_json::to_string_pretty(&request).unwrap_or_default();

			self.log.record_section(format!("RAW Rate Request\n{dump}"));
		}

		request
	}

	async fn shop(
		&self,
		token: &crate::auth::AccessToken,
		request: &RateRequest,
	) -> Result<RateResponse> {
		obs::record_flow_outcome(FlowKind::Rating, FlowOutcome::Attempt);

		match self.carrier.shop_rates(token, request).await {
			Ok(response) => {
				obs::record_flow_outcome(FlowKind::Rating, FlowOutcome::Success);
				self.log.record_section(format!("Rate Response\n{response:#?}"));

				Ok(response)
			},
			Err(e) => {
				obs::record_flow_outcome(FlowKind::Rating, FlowOutcome::Failure);
				self.log.record_section(format!("Error requesting Rates ({e})"));

				Err(e)
			},
		}
	}
}
impl Debug for RateQuoter {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("RateQuoter")
			.field("tokens", &self.tokens)
			.field("origin_region", &self.settings.origin_region)
			.finish_non_exhaustive()
	}
}

/// Keeps offered services, preferring negotiated charges and folding in the shipping delay.
///
/// A repeated service code replaces the earlier entry in place.
pub fn collect_quotes(response: &RateResponse, settings: &Settings) -> Result<Vec<RateQuote>, DecodeError> {
	let delay = settings.transit_delay_days();
	let mut quotes = Vec::<RateQuote>::new();

	for shipment in &response.rated_shipment {
		let code = shipment.service.code.trim();

		if !settings.services.contains(code) {
			continue;
		}

		let Some(charge) = preferred_charge(shipment) else { continue };
		let cost = charge.monetary_value.as_f64("MonetaryValue")?;
		let business_days_in_transit = shipment
			.guaranteed_delivery
			.as_ref()
			.and_then(|delivery| delivery.business_days_in_transit.as_ref())
			.map(|days| days.as_i64("BusinessDaysInTransit"))
			.transpose()?
			.map(|days| u32::try_from((days + delay).max(0)).unwrap_or(u32::MAX));
		let quote = RateQuote { service_code: code.to_owned(), cost, business_days_in_transit };

		match quotes.iter_mut().find(|existing| existing.service_code == code) {
			Some(existing) => *existing = quote,
			None => quotes.push(quote),
		}
	}

	Ok(quotes)
}

/// Names, filters, and prices quotes, returning them sorted by ascending cost.
pub fn price_quotes(
	quotes: &[RateQuote],
	settings: &Settings,
	boxes: u32,
	filter: Option<&str>,
) -> Vec<ShippingMethodOption> {
	let mut options = quotes
		.iter()
		.filter_map(|quote| {
			let id = services::display_name(settings.origin_region, &quote.service_code);

			if filter.is_some_and(|wanted| wanted != id) {
				return None;
			}

			let title = match quote.business_days_in_transit {
				Some(days) if settings.display.transit => format!("{id}{}", messages::eta(days)),
				_ => id.clone(),
			};
			let fee = settings
				.service_handling_fees
				.fee_for(&quote.service_code, settings.handling_fee);
			let cost = fee.apply(quote.cost, boxes, settings.handling_basis);

			Some(ShippingMethodOption { id, title, cost })
		})
		.collect::<Vec<_>>();

	sort_options(&mut options);

	options
}

/// Stable ascending sort by cost.
pub fn sort_options(options: &mut [ShippingMethodOption]) {
	options.sort_by(|a, b| a.cost.total_cmp(&b.cost));
}

fn preferred_charge(shipment: &RatedShipment) -> Option<&Charge> {
	shipment
		.negotiated_rate_charges
		.as_ref()
		.and_then(|negotiated| negotiated.total_charge.as_ref())
		.or(shipment.total_charges.as_ref())
}
