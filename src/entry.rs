use std::sync::Arc;

/// Visit count assigned to a freshly inserted entry.
///
/// New entries start with a generous allowance so they are not evicted
/// before they have had a chance to prove themselves: 255 minutes must
/// pass without a single access before a fresh entry decays to zero.
pub(crate) const INITIAL_VISITS: u32 = 255;

/// A cached value together with its decay state.
///
/// The entry knows nothing about the store; it only does weight
/// arithmetic. Its weight is never stored anywhere — it is recomputed
/// from `(visit_count, last_touch, now)` whenever eviction needs it.
#[derive(Debug, Clone)]
pub struct Entry<V> {
	value: Arc<V>,
	last_touch: u32,
	visit_count: u32,
}

impl<V> Entry<V> {
	pub(crate) fn new(value: V, now: u32) -> Self {
		Self {
			value: Arc::new(value),
			last_touch: now,
			visit_count: INITIAL_VISITS,
		}
	}

	/// Record a read access: bump the visit counter and refresh recency.
	pub(crate) fn touch(&mut self, now: u32) {
		self.visit_count = self.visit_count.saturating_add(1);
		self.last_touch = now;
	}

	/// Decayed frequency score at `now`. Lower weight = better victim.
	///
	/// Side-effect free, so the selector can rank entries without
	/// perturbing their recency. Elapsed time uses wrapping subtraction;
	/// a clock that moved backwards reads as a huge elapsed span and the
	/// weight floors at zero.
	pub fn weight(&self, now: u32) -> u32 {
		let elapsed = now.wrapping_sub(self.last_touch);
		if elapsed > self.visit_count {
			0
		} else {
			self.visit_count - elapsed
		}
	}

	/// Handle to the stored value, without touching the entry.
	pub fn peek(&self) -> Arc<V> {
		Arc::clone(&self.value)
	}

	/// Handle to the stored value, recording the access first.
	pub(crate) fn touch_and_get(&mut self, now: u32) -> Arc<V> {
		self.touch(now);
		Arc::clone(&self.value)
	}

	/// Swap the value handle in place, returning the old one.
	///
	/// Decay state is deliberately left alone: overwriting a key must not
	/// reset its eviction priority, otherwise write churn on a cold key
	/// would keep it alive forever.
	pub(crate) fn replace(&mut self, value: V) -> Arc<V> {
		std::mem::replace(&mut self.value, Arc::new(value))
	}

	/// Raw visit counter, for weight introspection.
	pub fn visit_count(&self) -> u32 {
		self.visit_count
	}

	/// Minute timestamp of the last touching read (or creation).
	pub fn last_touch(&self) -> u32 {
		self.last_touch
	}
}
