use std::hash::Hash;
use std::sync::Arc;

use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::cache::LfuCache;
use crate::clock::{Clock, SystemClock};
use crate::error::Result;

/// Builder for configuring an [`LfuCache`].
///
/// The plain [`LfuCache::new`] constructor seeds the sampling RNG from
/// the OS and reads the wall clock; the builder exists for the cases
/// where eviction must be deterministic — tests, replay, simulation.
///
/// # Example
///
/// ```
/// use sampled_lfu::{CacheBuilder, LfuCache};
///
/// let cache: LfuCache<u64, String> = CacheBuilder::new(1024)
///     .seed(42)
///     .build()
///     .unwrap();
/// ```
pub struct CacheBuilder {
	capacity: usize,
	seed: Option<u64>,
	clock: Option<Arc<dyn Clock>>,
}

impl CacheBuilder {
	/// Start a builder for a cache holding at most `capacity` entries.
	pub fn new(capacity: usize) -> Self {
		Self {
			capacity,
			seed: None,
			clock: None,
		}
	}

	/// Seed the RNG behind the sampling eviction path, making victim
	/// selection reproducible.
	pub fn seed(mut self, seed: u64) -> Self {
		self.seed = Some(seed);
		self
	}

	/// Supply the time source driving weight decay.
	///
	/// Defaults to [`SystemClock`]. Pass a shared
	/// [`ManualClock`](crate::ManualClock) handle to control decay from
	/// the outside.
	pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
		self.clock = Some(clock);
		self
	}

	/// Build the cache.
	///
	/// Fails with [`CacheError::ZeroCapacity`](crate::CacheError) when
	/// the configured capacity is zero.
	pub fn build<K, V>(self) -> Result<LfuCache<K, V>>
	where
		K: Hash + Eq + Clone,
	{
		let clock = self.clock.unwrap_or_else(|| Arc::new(SystemClock));
		let rng = match self.seed {
			Some(seed) => StdRng::seed_from_u64(seed),
			None => StdRng::from_os_rng(),
		};
		LfuCache::with_parts(self.capacity, clock, rng)
	}
}
