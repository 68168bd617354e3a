use std::hash::Hash;
use std::sync::Arc;

use ahash::RandomState;
use indexmap::IndexMap;
use rand::rngs::StdRng;
use tracing::{debug, trace};

use crate::clock::Clock;
use crate::entry::Entry;
use crate::error::{CacheError, Result};
use crate::selector;

/// Owner of all entries plus the accounting the facade reports on.
///
/// Not public: `LfuCache` is the supported surface. The store enforces
/// the two structural invariants — capacity is always positive, and the
/// entry count never exceeds it once a mutating call returns.
pub(crate) struct Store<K, V> {
	entries: IndexMap<K, Entry<V>, RandomState>,
	capacity: usize,
	hits: u64,
	misses: u64,
	clock: Arc<dyn Clock>,
	rng: StdRng,
}

impl<K, V> Store<K, V>
where
	K: Hash + Eq + Clone,
{
	pub fn new(capacity: usize, clock: Arc<dyn Clock>, rng: StdRng) -> Result<Self> {
		if capacity == 0 {
			return Err(CacheError::ZeroCapacity);
		}
		Ok(Self {
			entries: IndexMap::with_hasher(RandomState::new()),
			capacity,
			hits: 0,
			misses: 0,
			clock,
			rng,
		})
	}

	/// Counting, touching read.
	pub fn get(&mut self, key: &K) -> Option<Arc<V>> {
		let now = self.clock.now();
		match self.entries.get_mut(key) {
			Some(entry) => {
				self.hits += 1;
				Some(entry.touch_and_get(now))
			}
			None => {
				self.misses += 1;
				None
			}
		}
	}

	/// Touching read that bypasses the hit/miss counters. Backs the
	/// default-insertion helpers, which report presence through their
	/// return value rather than through the statistics.
	pub fn touch_get(&mut self, key: &K) -> Option<Arc<V>> {
		let now = self.clock.now();
		self.entries.get_mut(key).map(|e| e.touch_and_get(now))
	}

	pub fn peek(&self, key: &K) -> Option<&Entry<V>> {
		self.entries.get(key)
	}

	pub fn contains(&self, key: &K) -> bool {
		self.entries.contains_key(key)
	}

	/// Insert or overwrite. Returns the previous handle when the key
	/// already existed.
	///
	/// An overwrite only swaps the value; the entry's decay state stays
	/// put. A genuinely new key evicts exactly one victim first when the
	/// store is full, so the capacity invariant never wobbles mid-call.
	pub fn set(&mut self, key: K, value: V) -> Option<Arc<V>> {
		if let Some(entry) = self.entries.get_mut(&key) {
			return Some(entry.replace(value));
		}
		if self.entries.len() >= self.capacity {
			self.evict()
				.expect("no eviction victim despite a full store");
		}
		let now = self.clock.now();
		self.entries.insert(key, Entry::new(value, now));
		None
	}

	/// Remove a key, handing back its value handle. No touch, no
	/// counters.
	pub fn remove(&mut self, key: &K) -> Option<Arc<V>> {
		self.entries.swap_remove(key).map(|entry| entry.peek())
	}

	/// The key the selector would evict right now, without removing it.
	pub fn victim(&mut self) -> Option<K> {
		let now = self.clock.now();
		selector::select_victim(&self.entries, now, &mut self.rng)
			.and_then(|index| self.entries.get_index(index))
			.map(|(key, _)| key.clone())
	}

	/// Remove one entry chosen by the selector. Benign no-op on an
	/// empty store.
	pub fn evict(&mut self) -> Option<K> {
		let now = self.clock.now();
		let index = selector::select_victim(&self.entries, now, &mut self.rng)?;
		let (key, _) = self
			.entries
			.swap_remove_index(index)
			.expect("selector returned an index outside the store");
		trace!(remaining = self.entries.len(), "evicted one entry");
		Some(key)
	}

	/// Change capacity, evicting one victim at a time until the survivor
	/// set fits. Each round re-ranks the shrinking set against the
	/// current clock rather than batching the weight computation.
	pub fn set_capacity(&mut self, capacity: usize) -> Result<()> {
		if capacity == 0 {
			return Err(CacheError::ZeroCapacity);
		}
		while self.entries.len() > capacity {
			self.evict();
		}
		debug!(old = self.capacity, new = capacity, "capacity changed");
		self.capacity = capacity;
		Ok(())
	}

	/// Drop every entry and reset the counters. Capacity survives.
	pub fn clear(&mut self) {
		self.entries.clear();
		self.hits = 0;
		self.misses = 0;
	}

	/// Snapshot of the keys, in backing-map order.
	pub fn keys(&self) -> Vec<K> {
		self.entries.keys().cloned().collect()
	}

	/// Touching snapshot of the values.
	pub fn values(&mut self) -> Vec<Arc<V>> {
		let now = self.clock.now();
		self.entries
			.values_mut()
			.map(|entry| entry.touch_and_get(now))
			.collect()
	}

	/// Touching snapshot of the pairs.
	pub fn items(&mut self) -> Vec<(K, Arc<V>)> {
		let now = self.clock.now();
		self.entries
			.iter_mut()
			.map(|(key, entry)| (key.clone(), entry.touch_and_get(now)))
			.collect()
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn capacity(&self) -> usize {
		self.capacity
	}

	pub fn hits(&self) -> u64 {
		self.hits
	}

	pub fn misses(&self) -> u64 {
		self.misses
	}

	pub fn entries(&self) -> &IndexMap<K, Entry<V>, RandomState> {
		&self.entries
	}
}
