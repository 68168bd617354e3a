use indexmap::IndexMap;
use rand::Rng;

use crate::entry::Entry;

/// Store sizes below this threshold get an exhaustive weight scan; at or
/// above it the selector switches to stratified sampling.
pub(crate) const SAMPLE_THRESHOLD: usize = 256;

/// Number of strata the key sequence is partitioned into on the
/// sampling path.
const BUCKETS: usize = 8;

/// Pick the eviction victim from `entries` at minute `now`.
///
/// Returns the positional index of the chosen key, or `None` when the
/// map is empty. Small stores are scanned exhaustively, which is exact
/// within the decay model; large stores are sampled, which bounds the
/// cost to a handful of probes regardless of size at the price of an
/// approximate answer.
///
/// The minimum tracker is an `Option` rather than a zero sentinel, so a
/// genuine zero-weight candidate cannot be confused with "nothing
/// recorded yet": the first candidate to reach the running minimum wins
/// and later ties do not displace it.
pub(crate) fn select_victim<K, V, S, R>(
	entries: &IndexMap<K, Entry<V>, S>,
	now: u32,
	rng: &mut R,
) -> Option<usize>
where
	R: Rng,
{
	if entries.is_empty() {
		None
	} else if entries.len() < SAMPLE_THRESHOLD {
		scan(entries, now)
	} else {
		sample(entries, now, rng)
	}
}

/// Exhaustive scan: weigh every entry, keep the first strict minimum.
fn scan<K, V, S>(entries: &IndexMap<K, Entry<V>, S>, now: u32) -> Option<usize> {
	let mut best: Option<(usize, u32)> = None;
	for (index, entry) in entries.values().enumerate() {
		consider(index, entry.weight(now), &mut best);
	}
	best.map(|(index, _)| index)
}

/// Stratified sampling: partition the materialized key order into
/// `BUCKETS` contiguous strata of `len / BUCKETS` keys and weigh one
/// uniform draw from each of the first `BUCKETS - 1` of them. Keys left
/// over past the last full stratum are represented by their midpoint
/// element; the eighth full stratum goes unprobed.
fn sample<K, V, S, R>(
	entries: &IndexMap<K, Entry<V>, S>,
	now: u32,
	rng: &mut R,
) -> Option<usize>
where
	R: Rng,
{
	let len = entries.len();
	let stride = len / BUCKETS;
	let mut best: Option<(usize, u32)> = None;

	for bucket in 0..BUCKETS - 1 {
		let index = bucket * stride + rng.random_range(0..stride);
		weigh_at(entries, index, now, &mut best);
	}

	let remainder = len - BUCKETS * stride;
	if remainder > 0 {
		let index = BUCKETS * stride + remainder / 2;
		weigh_at(entries, index, now, &mut best);
	}

	best.map(|(index, _)| index)
}

fn weigh_at<K, V, S>(
	entries: &IndexMap<K, Entry<V>, S>,
	index: usize,
	now: u32,
	best: &mut Option<(usize, u32)>,
) {
	if let Some((_, entry)) = entries.get_index(index) {
		consider(index, entry.weight(now), best);
	}
}

/// Record `index` as the running answer iff its weight is a strict
/// improvement on the minimum seen so far.
fn consider(index: usize, weight: u32, best: &mut Option<(usize, u32)>) {
	match *best {
		Some((_, min)) if weight >= min => {}
		_ => *best = Some((index, weight)),
	}
}
