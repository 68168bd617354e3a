//! Cache hit/miss statistics.

/// Snapshot of the cache's accounting counters.
///
/// Hits and misses accumulate since construction or the last `clear()`.
///
/// # Example
///
/// ```
/// use sampled_lfu::LfuCache;
///
/// let mut cache: LfuCache<&str, u32> = LfuCache::new(16).unwrap();
/// cache.insert("a", 1);
/// cache.get(&"a");
/// cache.get(&"b");
///
/// let stats = cache.stats();
/// assert_eq!((stats.hits, stats.misses), (1, 1));
/// println!("hit rate: {:.2}%", stats.hit_rate() * 100.0);
/// ```
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheStats {
	/// Maximum number of entries the cache will hold.
	pub capacity: usize,
	/// Counting reads that found their key.
	pub hits: u64,
	/// Counting reads that did not.
	pub misses: u64,
}

impl CacheStats {
	/// Hit rate as a ratio between 0.0 and 1.0.
	///
	/// Returns 0.0 if there have been no counting reads at all.
	pub fn hit_rate(&self) -> f64 {
		let total = self.hits + self.misses;
		if total == 0 {
			0.0
		} else {
			self.hits as f64 / total as f64
		}
	}

	/// Total number of counting reads (hits + misses).
	pub fn total_accesses(&self) -> u64 {
		self.hits + self.misses
	}
}
