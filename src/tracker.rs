//! Tracker session: ledger, clock, markers and rate cache in one context.

use std::collections::BTreeSet;
use std::sync::{Arc, PoisonError, RwLock};

use crate::aggregate::{self, Aggregate};
use crate::config::SamplingConfig;
use crate::datasource::{AppendError, CacheStats, Ledger, ProgressEvent, RateCache, RateKey, RateMode};
use crate::skill::Skill;
use crate::snapshot::{ImportError, Snapshot};
use crate::units::Tick;

/// Session state for one meter.
///
/// All mutation goes through `&mut self`; wrap it in a [`SharedTracker`]
/// when rendering happens on another thread.
#[derive(Debug, Clone, Default)]
pub struct Tracker {
    ledger: Ledger,
    cache: RateCache,
    current_time: Tick,
    paused: bool,
    pause_times: BTreeSet<Tick>,
    logout_times: BTreeSet<Tick>,
    cache_params: Option<(Tick, RateMode)>,
}

impl Tracker {
    /// Create an empty session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a cumulative value observed at the current tick.
    ///
    /// Returns the emitted event, or `None` for a first observation or
    /// while paused.
    pub fn record(
        &mut self,
        skill: Skill,
        cumulative: i64,
    ) -> Result<Option<ProgressEvent>, AppendError> {
        if self.paused {
            return Ok(None);
        }
        self.ledger.record(skill, cumulative, self.current_time)
    }

    /// Advance the clock by one tick. Ignored while paused.
    pub fn advance(&mut self) {
        if !self.paused {
            self.current_time = self.current_time.saturating_add(1);
        }
    }

    /// Pause tracking and mark the current tick.
    pub fn pause(&mut self) {
        if self.paused {
            return;
        }
        self.paused = true;
        self.pause_times.insert(self.current_time);
        tracing::debug!(tick = self.current_time, "tracking paused");
    }

    /// Resume tracking.
    pub fn unpause(&mut self) {
        if !self.paused {
            return;
        }
        self.paused = false;
        tracing::debug!(tick = self.current_time, "tracking resumed");
    }

    /// Mark a logout at the current tick, if anything is being tracked.
    pub fn track_logout(&mut self) {
        if self.ledger.is_tracking() {
            self.logout_times.insert(self.current_time);
        }
    }

    /// Drop all events, markers and cached rates and rewind the clock.
    ///
    /// Baselines and the paused flag survive.
    pub fn reset(&mut self) {
        self.ledger.clear_events();
        self.pause_times.clear();
        self.logout_times.clear();
        self.cache.invalidate_all();
        self.cache.reset_counters();
        self.cache_params = None;
        self.current_time = 0;
        tracing::debug!("tracker reset");
    }

    /// Drop every cached rate.
    pub fn clear_cache(&mut self) {
        self.cache.invalidate_all();
    }

    /// Sample every enabled skill over the configured span.
    pub fn aggregate(&mut self, config: &SamplingConfig) -> Aggregate {
        self.sync_cache(config);
        aggregate::aggregate(&self.ledger, &mut self.cache, self.current_time, config)
    }

    /// Rate of one skill at `time`, using the cache when enabled.
    ///
    /// Only ticks before the current one are cached. Later observations
    /// land on the current tick or after it, so those rates can still move.
    pub fn rate_at(&mut self, skill: Skill, time: Tick, config: &SamplingConfig) -> i64 {
        self.sync_cache(config);
        let key = RateKey::new(skill, time, config.window, config.mode);
        if config.use_cache && time < self.current_time {
            self.cache.get(&self.ledger, key)
        } else {
            self.cache.bypass(&self.ledger, key)
        }
    }

    /// Whether the chart should refresh on this tick.
    pub fn is_refresh_tick(&self, config: &SamplingConfig) -> bool {
        self.current_time % config.stride.max(1) == 0
    }

    /// Capture the session as a snapshot.
    pub fn export(&self) -> Snapshot {
        Snapshot::from_ledger(
            &self.ledger,
            self.current_time,
            self.paused,
            &self.pause_times,
            &self.logout_times,
        )
    }

    /// Replace the session with a snapshot document.
    ///
    /// The session is untouched when the document is rejected.
    pub fn restore(&mut self, json: &str) -> Result<(), ImportError> {
        let snapshot = Snapshot::from_json(json)
            .inspect_err(|err| tracing::warn!(%err, "snapshot rejected"))?;
        self.restore_snapshot(snapshot)
    }

    /// Replace the session with an already parsed snapshot.
    pub fn restore_snapshot(&mut self, snapshot: Snapshot) -> Result<(), ImportError> {
        let staged = snapshot
            .into_staged()
            .inspect_err(|err| tracing::warn!(%err, "snapshot rejected"))?;
        self.ledger = staged.ledger;
        self.current_time = staged.current_time;
        self.paused = staged.paused;
        self.pause_times = staged.pause_times;
        self.logout_times = staged.logout_times;
        self.cache.invalidate_all();
        self.cache.reset_counters();
        self.cache_params = None;
        tracing::debug!(tick = self.current_time, "snapshot restored");
        Ok(())
    }

    /// Current session tick.
    pub fn current_time(&self) -> Tick {
        self.current_time
    }

    /// Whether tracking is paused.
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Ticks where tracking was paused.
    pub fn pause_times(&self) -> &BTreeSet<Tick> {
        &self.pause_times
    }

    /// Ticks where the player logged out.
    pub fn logout_times(&self) -> &BTreeSet<Tick> {
        &self.logout_times
    }

    /// Access the event ledger.
    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    /// Cache counters since the last pass.
    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    fn sync_cache(&mut self, config: &SamplingConfig) {
        let params = (config.window, config.mode);
        if self.cache_params.is_some_and(|previous| previous != params) {
            tracing::debug!(window = config.window, mode = config.mode.label(), "rate parameters changed");
            self.cache.invalidate_all();
        }
        self.cache_params = Some(params);
    }
}

/// Cloneable handle to a tracker behind a reader/writer lock.
#[derive(Debug, Clone, Default)]
pub struct SharedTracker {
    inner: Arc<RwLock<Tracker>>,
}

impl SharedTracker {
    /// Wrap a tracker.
    pub fn new(tracker: Tracker) -> Self {
        Self {
            inner: Arc::new(RwLock::new(tracker)),
        }
    }

    /// Run `f` with shared access.
    pub fn read<R>(&self, f: impl FnOnce(&Tracker) -> R) -> R {
        let guard = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        f(&guard)
    }

    /// Run `f` with exclusive access.
    pub fn write<R>(&self, f: impl FnOnce(&mut Tracker) -> R) -> R {
        let mut guard = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        f(&mut guard)
    }
}
