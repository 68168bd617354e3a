use std::fmt;
use std::hash::Hash;
use std::sync::Arc;

use ahash::RandomState;
use indexmap::IndexMap;
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::builder::CacheBuilder;
use crate::clock::{Clock, SystemClock};
use crate::entry::Entry;
use crate::error::{CacheError, Result};
use crate::stats::CacheStats;
use crate::store::Store;

/// A dict-like, capacity-bounded cache with approximate LFU eviction.
///
/// Every entry carries a visit counter and a minute-resolution recency
/// timestamp; the difference between the two is its weight, and the
/// lowest-weight entry is the preferred eviction victim. Small stores
/// are scanned exactly; once the store holds 256 entries or more the
/// victim is chosen by stratified random sampling, keeping eviction
/// cost flat no matter how large the cache grows.
///
/// The cache is a single-threaded structure: all operations take
/// `&self` or `&mut self` and run to completion on the caller's thread.
/// Wrap it in a mutex if it must be shared.
///
/// Reads hand out `Arc<V>` clones, so values stay alive for as long as
/// any caller holds a handle, independently of eviction.
pub struct LfuCache<K, V> {
	store: Store<K, V>,
}

impl<K, V> LfuCache<K, V>
where
	K: Hash + Eq + Clone,
{
	/// Create a cache holding at most `capacity` entries.
	///
	/// Fails with [`CacheError::ZeroCapacity`] when `capacity` is zero.
	pub fn new(capacity: usize) -> Result<Self> {
		Self::with_parts(capacity, Arc::new(SystemClock), StdRng::from_os_rng())
	}

	/// Start building a cache with a custom RNG seed or clock.
	pub fn builder(capacity: usize) -> CacheBuilder {
		CacheBuilder::new(capacity)
	}

	pub(crate) fn with_parts(
		capacity: usize,
		clock: Arc<dyn Clock>,
		rng: StdRng,
	) -> Result<Self> {
		Ok(Self {
			store: Store::new(capacity, clock, rng)?,
		})
	}

	/// Look up `key`, counting a hit or miss and refreshing the entry's
	/// recency on a hit.
	pub fn get(&mut self, key: &K) -> Option<Arc<V>> {
		self.store.get(key)
	}

	/// Subscript-style read: like [`get`](Self::get) but a miss is a
	/// [`CacheError::NotFound`] error.
	pub fn fetch(&mut self, key: &K) -> Result<Arc<V>> {
		self.store.get(key).ok_or(CacheError::NotFound)
	}

	/// Look up `key` without touching the entry or the hit/miss
	/// counters. This is the view the eviction machinery itself gets;
	/// use it to observe weights without perturbing them.
	pub fn peek(&self, key: &K) -> Option<Arc<V>> {
		self.store.peek(key).map(Entry::peek)
	}

	/// Insert or overwrite, returning the previous value handle if the
	/// key was already present.
	///
	/// Overwriting replaces the value in place and leaves the entry's
	/// visit counter and recency untouched. Inserting a new key into a
	/// full cache first evicts exactly one victim, so `len()` never
	/// exceeds `capacity()`.
	pub fn insert(&mut self, key: K, value: V) -> Option<Arc<V>> {
		self.store.set(key, value)
	}

	/// Subscript-style delete: remove `key` and return its value, or
	/// [`CacheError::NotFound`] if absent.
	pub fn remove(&mut self, key: &K) -> Result<Arc<V>> {
		self.store.remove(key).ok_or(CacheError::NotFound)
	}

	/// Remove `key` and return its value if present. Absence is not an
	/// error; compose with `unwrap_or` for a default.
	pub fn pop(&mut self, key: &K) -> Option<Arc<V>> {
		self.store.remove(key)
	}

	/// Return the existing value for `key` (a touching read), or insert
	/// `default` and return that.
	pub fn get_or_insert(&mut self, key: K, default: V) -> Arc<V> {
		if let Some(value) = self.store.touch_get(&key) {
			return value;
		}
		self.store.set(key.clone(), default);
		self.peek(&key)
			.expect("entry vanished immediately after insertion")
	}

	/// Return the existing value for `key` (a touching read), or invoke
	/// `factory` to produce one, insert it, and return it. The factory
	/// runs only on absence.
	pub fn get_or_insert_with<F>(&mut self, key: K, factory: F) -> Arc<V>
	where
		F: FnOnce() -> V,
	{
		if let Some(value) = self.store.touch_get(&key) {
			return value;
		}
		self.store.set(key.clone(), factory());
		self.peek(&key)
			.expect("entry vanished immediately after insertion")
	}

	/// Apply [`insert`](Self::insert) for every pair, in the iterator's
	/// order. Later pairs can evict earlier ones once the cache fills.
	pub fn extend<I>(&mut self, pairs: I)
	where
		I: IntoIterator<Item = (K, V)>,
	{
		for (key, value) in pairs {
			self.store.set(key, value);
		}
	}

	/// Membership test. No counters, no touch.
	pub fn contains_key(&self, key: &K) -> bool {
		self.store.contains(key)
	}

	/// Manually evict one selector-chosen entry, returning its key.
	/// A no-op returning `None` on an empty cache.
	pub fn evict(&mut self) -> Option<K> {
		self.store.evict()
	}

	/// The key the selector would evict right now, without removing it.
	/// `None` only when the cache is empty.
	pub fn victim(&mut self) -> Option<K> {
		self.store.victim()
	}

	/// Change the capacity. Shrinking below the current size evicts
	/// selector-chosen victims one at a time until the survivors fit;
	/// growing never drops anything.
	pub fn set_capacity(&mut self, capacity: usize) -> Result<()> {
		self.store.set_capacity(capacity)
	}

	/// Drop every entry and zero the hit/miss counters. Capacity is
	/// preserved.
	pub fn clear(&mut self) {
		self.store.clear();
	}

	/// Snapshot of the keys. Not a live view; mutating the cache while
	/// holding it is fine.
	pub fn keys(&self) -> Vec<K> {
		self.store.keys()
	}

	/// Snapshot of the values. Each value read counts as a touch, the
	/// same as a subscript read, but does not affect hit/miss counters.
	pub fn values(&mut self) -> Vec<Arc<V>> {
		self.store.values()
	}

	/// Snapshot of the key-value pairs; values are touching reads.
	pub fn items(&mut self) -> Vec<(K, Arc<V>)> {
		self.store.items()
	}

	/// Current number of entries.
	pub fn len(&self) -> usize {
		self.store.len()
	}

	pub fn is_empty(&self) -> bool {
		self.store.len() == 0
	}

	/// Maximum number of entries.
	pub fn capacity(&self) -> usize {
		self.store.capacity()
	}

	/// Capacity and hit/miss counters since construction or the last
	/// [`clear`](Self::clear).
	pub fn stats(&self) -> CacheStats {
		CacheStats {
			capacity: self.store.capacity(),
			hits: self.store.hits(),
			misses: self.store.misses(),
		}
	}

	/// Non-touching view of a key's entry, exposing its decay state.
	pub fn peek_entry(&self, key: &K) -> Option<&Entry<V>> {
		self.store.peek(key)
	}

	/// Read-only view of the backing map, for inspection and debugging.
	/// Not part of the stable contract.
	pub fn raw_entries(&self) -> &IndexMap<K, Entry<V>, RandomState> {
		self.store.entries()
	}
}

impl<K, V> Extend<(K, V)> for LfuCache<K, V>
where
	K: Hash + Eq + Clone,
{
	fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, pairs: I) {
		LfuCache::extend(self, pairs);
	}
}

/// Iterating a cache reference yields a snapshot of its keys, so the
/// cache itself may be mutated while iterating.
impl<K, V> IntoIterator for &LfuCache<K, V>
where
	K: Hash + Eq + Clone,
{
	type Item = K;
	type IntoIter = std::vec::IntoIter<K>;

	fn into_iter(self) -> Self::IntoIter {
		self.keys().into_iter()
	}
}

impl<K, V> fmt::Debug for LfuCache<K, V>
where
	K: Hash + Eq + Clone,
{
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("LfuCache")
			.field("capacity", &self.store.capacity())
			.field("len", &self.store.len())
			.field("hits", &self.store.hits())
			.field("misses", &self.store.misses())
			.finish()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_insert_and_get() {
		let mut cache = LfuCache::new(4).unwrap();
		cache.insert("a", 1);

		assert_eq!(cache.get(&"a").as_deref(), Some(&1));
		assert_eq!(cache.get(&"b"), None);
	}

	#[test]
	fn test_zero_capacity_is_invalid() {
		let result: Result<LfuCache<u64, u64>> = LfuCache::new(0);
		assert_eq!(result.err(), Some(CacheError::ZeroCapacity));
	}

	#[test]
	fn test_fetch_and_remove_signal_not_found() {
		let mut cache: LfuCache<&str, u32> = LfuCache::new(4).unwrap();
		assert_eq!(cache.fetch(&"missing").err(), Some(CacheError::NotFound));
		assert_eq!(cache.remove(&"missing").err(), Some(CacheError::NotFound));
	}

	#[test]
	fn test_pop_is_quiet_on_absence() {
		let mut cache: LfuCache<&str, u32> = LfuCache::new(4).unwrap();
		cache.insert("a", 1);

		assert_eq!(cache.pop(&"a").as_deref(), Some(&1));
		assert_eq!(cache.pop(&"a"), None);
		// pop never counts toward hits or misses.
		assert_eq!(cache.stats().total_accesses(), 0);
	}

	#[test]
	fn test_get_or_insert_variants() {
		let mut cache: LfuCache<&str, u32> = LfuCache::new(4).unwrap();

		assert_eq!(*cache.get_or_insert("a", 1), 1);
		assert_eq!(*cache.get_or_insert("a", 2), 1);

		let mut calls = 0;
		let value = cache.get_or_insert_with("b", || {
			calls += 1;
			10
		});
		assert_eq!(*value, 10);

		let value = cache.get_or_insert_with("b", || {
			calls += 1;
			20
		});
		assert_eq!(*value, 10);
		assert_eq!(calls, 1, "factory must only run on absence");
	}

	#[test]
	fn test_extend_applies_in_order() {
		let mut cache: LfuCache<u32, u32> = LfuCache::new(8).unwrap();
		cache.extend([(1, 10), (2, 20), (1, 11)]);

		assert_eq!(cache.len(), 2);
		assert_eq!(cache.peek(&1).as_deref(), Some(&11));
	}

	#[test]
	fn test_key_snapshot_iteration() {
		let mut cache: LfuCache<u32, u32> = LfuCache::new(8).unwrap();
		for i in 0..4 {
			cache.insert(i, i * 10);
		}

		let mut seen: Vec<u32> = (&cache).into_iter().collect();
		seen.sort_unstable();
		assert_eq!(seen, vec![0, 1, 2, 3]);
	}

	#[test]
	fn test_debug_output_mentions_counters() {
		let mut cache: LfuCache<u32, u32> = LfuCache::new(8).unwrap();
		cache.insert(1, 1);
		cache.get(&1);

		let rendered = format!("{:?}", cache);
		assert!(rendered.contains("capacity: 8"));
		assert!(rendered.contains("hits: 1"));
	}
}
