use std::sync::Arc;

use proptest::prelude::*;
use sampled_lfu::{CacheBuilder, Clock, LfuCache, ManualClock};

fn seeded(capacity: usize, seed: u64) -> (LfuCache<u64, u64>, Arc<ManualClock>) {
	let clock = Arc::new(ManualClock::new(0));
	let cache = CacheBuilder::new(capacity)
		.seed(seed)
		.clock(clock.clone())
		.build()
		.unwrap();
	(cache, clock)
}

proptest! {
	#[test]
	fn test_len_never_exceeds_capacity(
		capacity in 1usize..32,
		seed in 0u64..1000,
		ops in prop::collection::vec((0u8..5, 0u64..64, 0u64..1000), 1..200),
	) {
		let (mut cache, clock) = seeded(capacity, seed);

		for (op, key, value) in ops {
			match op {
				0 => { cache.insert(key, value); }
				1 => { cache.get(&key); }
				2 => { cache.pop(&key); }
				3 => { cache.evict(); }
				_ => { clock.advance(1); }
			}
			prop_assert!(cache.len() <= cache.capacity());
		}
	}

	#[test]
	fn test_inserted_keys_resolve_while_under_capacity(
		keys in prop::collection::vec(0u64..100, 1..50),
	) {
		// Capacity above the key universe: nothing can be evicted, so
		// every inserted key must resolve to its latest value.
		let (mut cache, _clock) = seeded(128, 1);

		for key in &keys {
			cache.insert(*key, key * 2);
		}
		for key in &keys {
			let got = cache.get(key);
			prop_assert_eq!(got.as_deref(), Some(&(key * 2)));
		}
	}

	#[test]
	fn test_victim_is_present_whenever_nonempty(
		capacity in 1usize..16,
		seed in 0u64..100,
		keys in prop::collection::vec(0u64..64, 1..64),
	) {
		let (mut cache, _clock) = seeded(capacity, seed);

		for key in keys {
			cache.insert(key, key);
			let victim = cache.victim();
			prop_assert!(victim.is_some());
			prop_assert!(cache.contains_key(&victim.unwrap()));
		}
	}

	#[test]
	fn test_weight_never_increases_without_a_touch(
		advances in prop::collection::vec(1u32..100, 1..20),
	) {
		let (mut cache, clock) = seeded(4, 1);
		cache.insert(1, 1);

		let mut prev = cache.peek_entry(&1).unwrap().weight(clock.now());
		for step in advances {
			clock.advance(step);
			let now = clock.now();
			let weight = cache.peek_entry(&1).unwrap().weight(now);
			prop_assert!(weight <= prev);
			prev = weight;
		}
	}

	#[test]
	fn test_clear_always_empties_and_resets(
		ops in prop::collection::vec((0u64..32, 0u64..1000), 1..64),
	) {
		let (mut cache, _clock) = seeded(8, 1);

		for (key, value) in ops {
			cache.insert(key, value);
			cache.get(&key);
			cache.get(&(key + 1000)); // guaranteed miss
		}

		cache.clear();
		let stats = cache.stats();
		prop_assert_eq!(cache.len(), 0);
		prop_assert_eq!((stats.hits, stats.misses), (0, 0));
		prop_assert_eq!(stats.capacity, 8);
	}

	#[test]
	fn test_stats_account_for_every_counting_read(
		hits in 0u64..32,
		misses in 0u64..32,
	) {
		let (mut cache, _clock) = seeded(8, 1);
		cache.insert(1, 1);

		for _ in 0..hits {
			cache.get(&1);
		}
		for _ in 0..misses {
			cache.get(&999);
		}

		let stats = cache.stats();
		prop_assert_eq!((stats.hits, stats.misses), (hits, misses));
	}

	#[test]
	fn test_overwrite_never_changes_entry_count(
		key in 0u64..8,
		values in prop::collection::vec(0u64..1000, 2..20),
	) {
		let (mut cache, _clock) = seeded(8, 1);

		for value in values {
			cache.insert(key, value);
			prop_assert_eq!(cache.len(), 1);
		}
	}
}

#[test]
fn test_no_panics_on_an_empty_cache() {
	let (mut cache, _clock) = seeded(4, 1);

	assert!(cache.get(&1).is_none());
	assert!(cache.pop(&1).is_none());
	assert!(cache.victim().is_none());
	assert!(cache.evict().is_none());
	assert!(!cache.contains_key(&1));
	assert!(cache.keys().is_empty());
	assert!(cache.values().is_empty());
	assert!(cache.items().is_empty());
	cache.clear();
	assert_eq!(cache.len(), 0);
}
