//! Configuration-store contract and the built-in in-memory backend.
//!
//! The host platform owns the real configuration table; this crate only needs row-level
//! fetch, insert, update, rename, and delete operations against it.

pub mod memory;

pub use memory::MemoryConfigStore;

// self
use crate::_prelude::*;

/// Boxed future returned by [`ConfigStore`] operations.
pub type StoreFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, StoreError>> + 'a + Send>>;

/// Key/value configuration table used by the module.
pub trait ConfigStore
where
	Self: Send + Sync,
{
	/// Fetches a single row by key.
	fn fetch<'a>(&'a self, key: &'a str) -> StoreFuture<'a, Option<ConfigRow>>;

	/// Returns `key -> value` for every row whose key starts with `prefix`.
	fn values<'a>(&'a self, prefix: &'a str) -> StoreFuture<'a, BTreeMap<String, String>>;

	/// Inserts a row unless the key already exists; returns whether it was inserted.
	fn insert(&self, row: ConfigRow) -> StoreFuture<'_, bool>;

	/// Overwrites the value of an existing row; returns whether a row matched.
	fn update_value<'a>(&'a self, key: &'a str, value: &'a str) -> StoreFuture<'a, bool>;

	/// Renames a row, keeping its value; returns whether a row matched.
	///
	/// Nothing happens when the target key already exists.
	fn rename<'a>(&'a self, from: &'a str, to: &'a str) -> StoreFuture<'a, bool>;

	/// Deletes every listed key and returns the number of removed rows.
	fn delete<'a>(&'a self, keys: &'a [String]) -> StoreFuture<'a, usize>;
}

/// One configuration row as stored by the host.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigRow {
	/// Admin-facing title.
	pub title: String,
	/// Unique configuration key.
	pub key: String,
	/// Current value.
	pub value: String,
	/// Admin-facing description.
	pub description: String,
	/// Configuration group identifier (shipping modules use 6).
	pub group_id: u32,
	/// Admin display order.
	pub sort_order: i32,
	/// Host function used to render the value, if any.
	pub use_function: Option<String>,
	/// Host function used to edit the value, if any.
	pub set_function: Option<String>,
}
impl ConfigRow {
	/// Configuration group that holds shipping-module settings.
	pub const SHIPPING_GROUP: u32 = 6;

	/// Creates a row in the shipping group with no render/edit functions.
	pub fn new(
		title: impl Into<String>,
		key: impl Into<String>,
		value: impl Into<String>,
		description: impl Into<String>,
		sort_order: i32,
	) -> Self {
		Self {
			title: title.into(),
			key: key.into(),
			value: value.into(),
			description: description.into(),
			group_id: Self::SHIPPING_GROUP,
			sort_order,
			use_function: None,
			set_function: None,
		}
	}

	/// Attaches the host render function.
	pub fn with_use_function(mut self, function: impl Into<String>) -> Self {
		self.use_function = Some(function.into());

		self
	}

	/// Attaches the host edit function.
	pub fn with_set_function(mut self, function: impl Into<String>) -> Self {
		self.set_function = Some(function.into());

		self
	}
}

/// Error type produced by [`ConfigStore`] implementations.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ThisError)]
pub enum StoreError {
	/// Backend-level failure for the storage engine.
	#[error("Backend failure: {message}.")]
	Backend {
		/// Human-readable error payload.
		message: String,
	},
}
