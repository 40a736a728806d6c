//! Upgrades stored configuration rows written by earlier module versions.

// self
use crate::{
	_prelude::*,
	config::{StoreProfile, keys},
	error::ConfigError,
	messages,
	module::MODULE_VERSION,
	store::{ConfigRow, ConfigStore},
};

/// `major.minor.patch` module version.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ModuleVersion {
	/// Major component.
	pub major: u32,
	/// Minor component.
	pub minor: u32,
	/// Patch component.
	pub patch: u32,
}
impl ModuleVersion {
	/// Version assumed for installs that predate the version row.
	pub const UNTRACKED: Self = Self::new(1, 0, 0);

	/// Creates a version.
	pub const fn new(major: u32, minor: u32, patch: u32) -> Self {
		Self { major, minor, patch }
	}

	/// Parses `1.3.6` or `v1.3.6`; a missing patch component reads as zero.
	pub fn parse(raw: &str) -> Result<Self, ConfigError> {
		let invalid = || ConfigError::InvalidVersion { value: raw.to_owned() };
		let view = raw.trim();
		let view = view.strip_prefix(['v', 'V']).unwrap_or(view);
		let mut parts = view.split('.').map(|part| part.parse::<u32>().map_err(|_| invalid()));
		let major = parts.next().ok_or_else(invalid)??;
		let minor = parts.next().ok_or_else(invalid)??;
		let patch = parts.next().transpose()?.unwrap_or(0);

		if parts.next().is_some() {
			return Err(invalid());
		}

		Ok(Self::new(major, minor, patch))
	}
}
impl FromStr for ModuleVersion {
	type Err = ConfigError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Self::parse(s)
	}
}
impl Display for ModuleVersion {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
	}
}

/// One change to stored rows.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MigrationStep {
	/// Insert a row unless its key exists.
	Insert(ConfigRow),
	/// Rename a row, keeping its value.
	Rename {
		/// Old key.
		from: String,
		/// New key.
		to: String,
	},
	/// Replace a substring inside a row's value.
	RewriteValue {
		/// Row key.
		key: String,
		/// Text to replace.
		from: String,
		/// Replacement.
		to: String,
	},
}

/// Steps introduced by each release, oldest first.
pub fn release_steps(profile: &StoreProfile) -> Vec<(ModuleVersion, Vec<MigrationStep>)> {
	let rows = keys::install_rows(&profile.default_currency, MODULE_VERSION);
	let insert = |key: &str| {
		rows.iter().find(|row| row.key == key).cloned().map(MigrationStep::Insert)
	};

	vec![
		(ModuleVersion::new(1, 1, 0), insert(keys::API_CLASS).into_iter().collect()),
		(
			ModuleVersion::new(1, 2, 0),
			[keys::HANDLING_APPLIES, keys::SERVICE_HANDLING_FEES].into_iter().filter_map(insert).collect(),
		),
		(
			ModuleVersion::new(1, 3, 0),
			vec![MigrationStep::RewriteValue {
				key: keys::TYPES.into(),
				from: "Express Saver [65]".into(),
				to: "Worldwide Saver [65]".into(),
			}],
		),
	]
}

/// Applies `steps` in order; returns how many changed a row.
pub async fn apply_steps(store: &dyn ConfigStore, steps: &[MigrationStep]) -> Result<usize> {
	let mut changed = 0;

	for step in steps {
		let applied = match step {
			MigrationStep::Insert(row) => store.insert(row.clone()).await?,
			MigrationStep::Rename { from, to } => store.rename(from, to).await?,
			MigrationStep::RewriteValue { key, from, to } => match store.fetch(key).await? {
				Some(row) if row.value.contains(from.as_str()) => {
					let value = row.value.replace(from.as_str(), to);

					store.update_value(key, &value).await?
				},
				_ => false,
			},
		};

		if applied {
			changed += 1;
		}
	}

	Ok(changed)
}

/// Brings an installed module's rows up to [`MODULE_VERSION`].
///
/// Returns the admin notice when an upgrade ran, `None` when nothing was needed.
pub async fn migrate(store: &dyn ConfigStore, profile: &StoreProfile) -> Result<Option<String>> {
	if store.fetch(keys::STATUS).await?.is_none() {
		return Ok(None);
	}

	let current = ModuleVersion::parse(MODULE_VERSION)?;
	let stored = match store.fetch(keys::VERSION).await? {
		Some(row) => ModuleVersion::parse(&row.value)?,
		None => ModuleVersion::UNTRACKED,
	};

	if stored >= current {
		return Ok(None);
	}

	for (release, steps) in release_steps(profile) {
		if release > stored {
			apply_steps(store, &steps).await?;
		}
	}

	let version_row = keys::install_rows(&profile.default_currency, MODULE_VERSION)
		.into_iter()
		.find(|row| row.key == keys::VERSION);

	let inserted = match version_row {
		Some(row) => store.insert(row).await?,
		None => false,
	};

	if !inserted {
		store.update_value(keys::VERSION, MODULE_VERSION).await?;
	}

	#[cfg(feature = "tracing")]
	tracing::info!(from = %stored, to = %current, "Upgraded the UPS shipping module settings.");

	Ok(Some(messages::updated(MODULE_VERSION)))
}

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use crate::store::MemoryConfigStore;

	#[test]
	fn versions_parse_and_order() {
		assert_eq!(ModuleVersion::parse("v1.3.6").expect("Prefixed version should parse."), ModuleVersion::new(1, 3, 6));
		assert_eq!(ModuleVersion::parse("1.2").expect("Short version should parse."), ModuleVersion::new(1, 2, 0));
		assert!(ModuleVersion::new(1, 10, 0) > ModuleVersion::new(1, 9, 9));
		assert!(ModuleVersion::parse("1.x").is_err());
		assert!(ModuleVersion::parse("1.2.3.4").is_err());
		assert!(ModuleVersion::parse("").is_err());
	}

	#[tokio::test]
	async fn steps_insert_rename_and_rewrite() {
		let store = MemoryConfigStore::default();

		store
			.insert(ConfigRow::new("Old", "MODULE_SHIPPING_UPSOAUTH_OLD", "kept", "", 0))
			.await
			.expect("Seed row should insert.");
		store
			.insert(ConfigRow::new("Types", keys::TYPES, "Ground [03], Express Saver [65]", "", 0))
			.await
			.expect("Seed row should insert.");

		let changed = apply_steps(
			&store,
			&[
				MigrationStep::Insert(ConfigRow::new("New", "MODULE_SHIPPING_UPSOAUTH_NEW", "1", "", 0)),
				MigrationStep::Rename {
					from: "MODULE_SHIPPING_UPSOAUTH_OLD".into(),
					to: "MODULE_SHIPPING_UPSOAUTH_RENAMED".into(),
				},
				MigrationStep::RewriteValue {
					key: keys::TYPES.into(),
					from: "Express Saver [65]".into(),
					to: "Worldwide Saver [65]".into(),
				},
				MigrationStep::RewriteValue {
					key: keys::TYPES.into(),
					from: "Not There".into(),
					to: "Ignored".into(),
				},
			],
		)
		.await
		.expect("Steps should apply.");

		assert_eq!(changed, 3);

		let renamed = store
			.fetch("MODULE_SHIPPING_UPSOAUTH_RENAMED")
			.await
			.expect("Fetch should succeed.")
			.expect("Renamed row should exist.");

		assert_eq!(renamed.value, "kept");

		let types = store.fetch(keys::TYPES).await.expect("Fetch should succeed.").expect("Row should exist.");

		assert_eq!(types.value, "Ground [03], Worldwide Saver [65]");
	}
}
