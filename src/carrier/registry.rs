//! Named carrier clients selectable through the `API_CLASS` setting.

// self
use crate::{_prelude::*, carrier::CarrierApiClient, config::Mode, error::ConfigError};

#[derive(Clone)]
enum Entry {
	Fixed(Arc<dyn CarrierApiClient>),
	ByMode { test: Arc<dyn CarrierApiClient>, production: Arc<dyn CarrierApiClient> },
}
impl Entry {
	fn pick(&self, mode: Mode) -> Arc<dyn CarrierApiClient> {
		match (self, mode) {
			(Self::Fixed(client), _) => client.clone(),
			(Self::ByMode { test, .. }, Mode::Test) => test.clone(),
			(Self::ByMode { production, .. }, Mode::Production) => production.clone(),
		}
	}
}

/// Default client plus named overrides.
///
/// The stored `API_CLASS` value picks an entry by name and the `MODE` setting picks the
/// UPS environment within it. The default entry answers to [`CarrierRegistry::DEFAULT_NAME`]
/// and to an empty setting.
#[derive(Clone)]
pub struct CarrierRegistry {
	default: Entry,
	named: HashMap<String, Entry>,
}
impl CarrierRegistry {
	/// Name the default client is registered under.
	pub const DEFAULT_NAME: &'static str = "UpsOAuthApi";

	/// Creates a registry whose default client serves every mode.
	pub fn new(default: Arc<dyn CarrierApiClient>) -> Self {
		Self { default: Entry::Fixed(default), named: HashMap::new() }
	}

	/// Creates a registry whose default entry has one client per UPS environment.
	pub fn by_mode(test: Arc<dyn CarrierApiClient>, production: Arc<dyn CarrierApiClient>) -> Self {
		Self { default: Entry::ByMode { test, production }, named: HashMap::new() }
	}

	/// Registry backed by the reqwest client against the public UPS hosts.
	#[cfg(feature = "reqwest")]
	pub fn ups() -> Result<Self, ConfigError> {
		// self
		use crate::{
			carrier::{CarrierEndpoints, ReqwestCarrierClient},
			http::ReqwestHttpClient,
		};

		let http = ReqwestHttpClient::new()?;
		let client = |mode| -> Result<Arc<dyn CarrierApiClient>, ConfigError> {
			Ok(Arc::new(ReqwestCarrierClient::with_http_client(
				http.clone(),
				CarrierEndpoints::for_mode(mode)?,
			)))
		};

		Ok(Self::by_mode(client(Mode::Test)?, client(Mode::Production)?))
	}

	/// Registers an alternative client under `name`.
	pub fn with_client(mut self, name: impl Into<String>, client: Arc<dyn CarrierApiClient>) -> Self {
		self.named.insert(name.into(), Entry::Fixed(client));

		self
	}

	/// Whether `name` resolves to a client.
	pub fn contains(&self, name: &str) -> bool {
		let name = name.trim();

		name.is_empty() || name == Self::DEFAULT_NAME || self.named.contains_key(name)
	}

	/// Resolves the client configured under `name` for `mode`.
	pub fn resolve(&self, name: &str, mode: Mode) -> Result<Arc<dyn CarrierApiClient>, ConfigError> {
		let name = name.trim();

		if let Some(entry) = self.named.get(name) {
			return Ok(entry.pick(mode));
		}
		if name.is_empty() || name == Self::DEFAULT_NAME {
			return Ok(self.default.pick(mode));
		}

		Err(ConfigError::MissingApiClass { name: name.into() })
	}
}
impl Debug for CarrierRegistry {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		let mut names = self.named.keys().collect::<Vec<_>>();

		names.sort();

		f.debug_struct("CarrierRegistry").field("named", &names).finish_non_exhaustive()
	}
}
