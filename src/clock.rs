use std::sync::atomic::{AtomicU32, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

/// Source of the coarse timestamps driving weight decay.
///
/// Time is measured in whole minutes since the Unix epoch, truncated to
/// `u32`. Minute resolution is deliberate: one visit buys an entry one
/// minute of decay headroom, so the visit counter and the elapsed time
/// live on the same scale.
pub trait Clock: Send + Sync {
	/// Current time in whole minutes since the Unix epoch.
	fn now(&self) -> u32;
}

/// Wall-clock time, truncated to minutes.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
	fn now(&self) -> u32 {
		let secs = SystemTime::now()
			.duration_since(UNIX_EPOCH)
			.unwrap_or_default()
			.as_secs();
		(secs / 60) as u32
	}
}

/// A clock that only moves when told to.
///
/// Hand a shared handle to `CacheBuilder::clock` and keep a clone to
/// advance time from the outside. Intended for tests and deterministic
/// replay; the atomic exists so a shared handle can be advanced through
/// `&self`, not for cross-thread use.
#[derive(Debug, Default)]
pub struct ManualClock {
	minutes: AtomicU32,
}

impl ManualClock {
	pub fn new(minutes: u32) -> Self {
		Self {
			minutes: AtomicU32::new(minutes),
		}
	}

	/// Jump to an absolute minute.
	pub fn set(&self, minutes: u32) {
		self.minutes.store(minutes, Ordering::Relaxed);
	}

	/// Move forward by `minutes`.
	pub fn advance(&self, minutes: u32) {
		self.minutes.fetch_add(minutes, Ordering::Relaxed);
	}
}

impl Clock for ManualClock {
	fn now(&self) -> u32 {
		self.minutes.load(Ordering::Relaxed)
	}
}
