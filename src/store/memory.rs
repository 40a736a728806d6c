//! Thread-safe in-memory [`ConfigStore`] implementation for local development and tests.

// self
use crate::{
	_prelude::*,
	store::{ConfigRow, ConfigStore, StoreError, StoreFuture},
};

type RowMap = Arc<RwLock<BTreeMap<String, ConfigRow>>>;

/// Storage backend that keeps configuration rows in-process.
#[derive(Clone, Debug, Default)]
pub struct MemoryConfigStore(RowMap);
impl MemoryConfigStore {
	/// Builds a store pre-populated with the provided rows.
	pub fn with_rows(rows: impl IntoIterator<Item = ConfigRow>) -> Self {
		let map = rows.into_iter().map(|row| (row.key.clone(), row)).collect();

		Self(Arc::new(RwLock::new(map)))
	}

	/// Returns the number of stored rows.
	pub fn len(&self) -> usize {
		self.0.read().len()
	}

	/// Returns true when no rows are stored.
	pub fn is_empty(&self) -> bool {
		self.0.read().is_empty()
	}

	fn values_now(map: RowMap, prefix: &str) -> BTreeMap<String, String> {
		map.read()
			.iter()
			.filter(|(key, _)| key.starts_with(prefix))
			.map(|(key, row)| (key.clone(), row.value.clone()))
			.collect()
	}

	fn insert_now(map: RowMap, row: ConfigRow) -> bool {
		let mut guard = map.write();

		if guard.contains_key(&row.key) {
			return false;
		}

		guard.insert(row.key.clone(), row);

		true
	}

	fn update_now(map: RowMap, key: &str, value: &str) -> bool {
		match map.write().get_mut(key) {
			Some(row) => {
				row.value = value.to_owned();

				true
			},
			None => false,
		}
	}

	fn rename_now(map: RowMap, from: &str, to: &str) -> bool {
		let mut guard = map.write();

		if guard.contains_key(to) {
			return false;
		}

		match guard.remove(from) {
			Some(mut row) => {
				row.key = to.to_owned();
				guard.insert(to.to_owned(), row);

				true
			},
			None => false,
		}
	}
}
impl ConfigStore for MemoryConfigStore {
	fn fetch<'a>(&'a self, key: &'a str) -> StoreFuture<'a, Option<ConfigRow>> {
		let map = self.0.clone();

		Box::pin(async move { Ok(map.read().get(key).cloned()) })
	}

	fn values<'a>(&'a self, prefix: &'a str) -> StoreFuture<'a, BTreeMap<String, String>> {
		let map = self.0.clone();

		Box::pin(async move { Ok(Self::values_now(map, prefix)) })
	}

	fn insert(&self, row: ConfigRow) -> StoreFuture<'_, bool> {
		let map = self.0.clone();

		Box::pin(async move { Ok(Self::insert_now(map, row)) })
	}

	fn update_value<'a>(&'a self, key: &'a str, value: &'a str) -> StoreFuture<'a, bool> {
		let map = self.0.clone();

		Box::pin(async move { Ok(Self::update_now(map, key, value)) })
	}

	fn rename<'a>(&'a self, from: &'a str, to: &'a str) -> StoreFuture<'a, bool> {
		let map = self.0.clone();

		Box::pin(async move { Ok(Self::rename_now(map, from, to)) })
	}

	fn delete<'a>(&'a self, keys: &'a [String]) -> StoreFuture<'a, usize> {
		let map = self.0.clone();

		Box::pin(async move {
			let mut guard = map.write();
			let removed = keys.iter().filter(|key| guard.remove(key.as_str()).is_some()).count();

			Ok::<_, StoreError>(removed)
		})
	}
}
