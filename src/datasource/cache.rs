//! Memoization of computed rates.

use std::collections::HashMap;

use crate::datasource::{Ledger, RateMode, compute_rate};
use crate::skill::Skill;
use crate::units::Tick;

/// Composite key identifying one rate query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RateKey {
    /// Queried skill.
    pub skill: Skill,
    /// Query time.
    pub time: Tick,
    /// Sliding window length in ticks.
    pub window: Tick,
    /// Aggregation mode.
    pub mode: RateMode,
}

impl RateKey {
    /// Create a key.
    pub fn new(skill: Skill, time: Tick, window: Tick, mode: RateMode) -> Self {
        Self {
            skill,
            time,
            window,
            mode,
        }
    }
}

/// Read-only view of cache counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Number of stored entries.
    pub size: usize,
    /// Lookups answered from the cache.
    pub hits: u64,
    /// Lookups that had to compute.
    pub misses: u64,
}

/// Rate cache keyed by [`RateKey`].
///
/// Entries stay valid as long as the ledger only grows with events newer
/// than the cached query time, so the cache is only ever cleared wholesale.
#[derive(Debug, Clone, Default)]
pub struct RateCache {
    entries: HashMap<RateKey, i64>,
    hits: u64,
    misses: u64,
}

impl RateCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a rate, computing and storing it on a miss.
    ///
    /// A stored rate stays valid only while every later event is newer than
    /// `key.time`; callers keep queries strictly behind the ledger's clock.
    pub fn get(&mut self, ledger: &Ledger, key: RateKey) -> i64 {
        if let Some(rate) = self.entries.get(&key) {
            self.hits += 1;
            return *rate;
        }
        let rate = compute_rate(ledger.entity(key.skill), key.time, key.window, key.mode);
        self.entries.insert(key, rate);
        self.misses += 1;
        rate
    }

    /// Compute a rate without consulting or filling the cache.
    ///
    /// Counted as a miss so diagnostics reflect the work done.
    pub fn bypass(&mut self, ledger: &Ledger, key: RateKey) -> i64 {
        self.misses += 1;
        compute_rate(ledger.entity(key.skill), key.time, key.window, key.mode)
    }

    /// Drop every entry.
    pub fn invalidate_all(&mut self) {
        if !self.entries.is_empty() {
            tracing::debug!(entries = self.entries.len(), "rate cache invalidated");
        }
        self.entries.clear();
    }

    /// Reset hit and miss counters.
    pub fn reset_counters(&mut self) {
        self.hits = 0;
        self.misses = 0;
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Snapshot of the counters.
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            size: self.entries.len(),
            hits: self.hits,
            misses: self.misses,
        }
    }
}
