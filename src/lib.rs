//! # Sampled LFU
//!
//! A dict-like, capacity-bounded, in-memory cache with:
//! - **Approximate LFU eviction** driven by time-decayed visit counts
//! - **O(1)-ish victim selection** on large stores via stratified
//!   random sampling (exhaustive scan below 256 entries)
//! - **Dictionary ergonomics**: get/insert/remove, default-insertion
//!   helpers, bulk extend, key/value/item snapshots, hit/miss stats
//! - **Deterministic replay** through an injectable clock and a
//!   seedable RNG
//!
//! ## Quick Start
//!
//! ```rust
//! use sampled_lfu::LfuCache;
//!
//! // A cache that holds at most two entries.
//! let mut cache = LfuCache::new(2).unwrap();
//!
//! cache.insert("a", 1);
//! cache.insert("b", 2);
//!
//! // Reads refresh recency and bump the visit counter.
//! assert_eq!(cache.get(&"a").as_deref(), Some(&1));
//!
//! // Inserting a third key evicts the lowest-weight entry first.
//! cache.insert("c", 3);
//! assert_eq!(cache.len(), 2);
//!
//! let stats = cache.stats();
//! assert_eq!((stats.capacity, stats.hits, stats.misses), (2, 1, 0));
//! ```
//!
//! ## The weight model
//!
//! Every entry starts with a visit count of 255 and loses one point of
//! weight per minute since its last touching read:
//!
//! `weight(now) = visit_count - minutes_since_last_touch` (floored at 0)
//!
//! Frequently read entries accumulate weight; idle entries decay toward
//! zero and become eviction victims. Overwriting a value on purpose
//! does **not** refresh its weight, so write churn cannot keep a cold
//! key alive.
//!
//! ## Deterministic tests
//!
//! ```rust
//! use std::sync::Arc;
//! use sampled_lfu::{CacheBuilder, Clock, LfuCache, ManualClock};
//!
//! let clock = Arc::new(ManualClock::new(0));
//! let mut cache: LfuCache<u64, u64> = CacheBuilder::new(64)
//!     .seed(42)
//!     .clock(clock.clone())
//!     .build()
//!     .unwrap();
//!
//! cache.insert(1, 10);
//! clock.advance(30); // thirty minutes pass
//! assert_eq!(cache.peek_entry(&1).unwrap().weight(clock.now()), 225);
//! ```
//!
//! ## Threading
//!
//! The cache is deliberately single-threaded: no locks, no atomics in
//! the data path. Share it behind a mutex if multiple threads need it.

mod builder;
mod cache;
mod clock;
mod entry;
mod error;
mod selector;
mod stats;
mod store;

pub use builder::CacheBuilder;
pub use cache::LfuCache;
pub use clock::{Clock, ManualClock, SystemClock};
pub use entry::Entry;
pub use error::{CacheError, Result};
pub use stats::CacheStats;
