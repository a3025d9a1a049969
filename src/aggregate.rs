//! History sampling across the visible span.

use std::collections::BTreeMap;
use std::time::{Duration, Instant};

use crate::config::SamplingConfig;
use crate::datasource::{CacheStats, Ledger, RateCache, RateKey};
use crate::skill::Skill;
use crate::transform::ChartScale;
use crate::units::Tick;

/// One sampled point of a skill's rate history.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HistorySample {
    /// Sample tick.
    pub time: Tick,
    /// Hourly rate at that tick.
    pub rate: i64,
}

/// Cost of one aggregation pass, for the diagnostic overlay.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Performance {
    /// Wall-clock time spent sampling.
    pub compute_time: Duration,
    /// Cache entries after the pass.
    pub cache_size: usize,
    /// Cache hits during the pass.
    pub cache_hits: u64,
    /// Cache misses during the pass.
    pub cache_misses: u64,
}

impl Performance {
    fn new(compute_time: Duration, stats: CacheStats) -> Self {
        Self {
            compute_time,
            cache_size: stats.size,
            cache_hits: stats.hits,
            cache_misses: stats.misses,
        }
    }
}

/// Output of one aggregation pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Aggregate {
    /// Sampled history per skill.
    pub histories: BTreeMap<Skill, Vec<HistorySample>>,
    /// Largest sampled rate across all skills.
    pub max_rate: i64,
    /// Skills ordered by ascending latest rate.
    pub ranking: Vec<Skill>,
    /// First sampled tick.
    pub span_start: Tick,
    /// Tick the pass ran at.
    pub current_time: Tick,
    /// Cost of the pass.
    pub performance: Performance,
}

impl Aggregate {
    /// Sampled history for a skill; empty when the skill is not plotted.
    pub fn history(&self, skill: Skill) -> &[HistorySample] {
        self.histories.get(&skill).map_or(&[], Vec::as_slice)
    }

    /// Latest sampled rate for a skill.
    pub fn latest_rate(&self, skill: Skill) -> i64 {
        self.history(skill).last().map_or(0, |sample| sample.rate)
    }

    /// Chart scale implied by this pass.
    pub fn scale(&self) -> ChartScale {
        ChartScale::new(self.max_rate, self.span_start, self.current_time)
    }

    /// Whether there is anything worth plotting.
    pub fn has_data(&self) -> bool {
        self.current_time > 0 && self.max_rate > 0
    }
}

/// First tick of the visible span.
pub fn span_start(current_time: Tick, span: Tick) -> Tick {
    current_time.saturating_sub(span)
}

/// Sample one skill's rate every `config.stride` ticks over
/// `[span_start, current_time)`.
pub fn sample_history(
    ledger: &Ledger,
    cache: &mut RateCache,
    skill: Skill,
    current_time: Tick,
    config: &SamplingConfig,
) -> Vec<HistorySample> {
    let start = span_start(current_time, config.span);
    let stride = config.stride.max(1);
    let mut history = Vec::with_capacity(((current_time - start) / stride + 1) as usize);
    let mut time = start;
    while time < current_time {
        let key = RateKey::new(skill, time, config.window, config.mode);
        let rate = if config.use_cache {
            cache.get(ledger, key)
        } else {
            cache.bypass(ledger, key)
        };
        history.push(HistorySample { time, rate });
        let Some(next) = time.checked_add(stride) else {
            break;
        };
        time = next;
    }
    history
}

/// Sample every enabled tracked skill, find the peak rate and rank skills.
pub fn aggregate(
    ledger: &Ledger,
    cache: &mut RateCache,
    current_time: Tick,
    config: &SamplingConfig,
) -> Aggregate {
    cache.reset_counters();
    let started = Instant::now();

    let mut histories = BTreeMap::new();
    let mut max_rate = 0;
    let mut latest = Vec::new();
    for skill in ledger.tracked_entities() {
        if !config.is_enabled(skill) {
            continue;
        }
        let history = sample_history(ledger, cache, skill, current_time, config);
        max_rate = history
            .iter()
            .map(|sample| sample.rate)
            .fold(max_rate, i64::max);
        latest.push((skill, history.last().map_or(0, |sample| sample.rate)));
        histories.insert(skill, history);
    }
    // stable sort keeps skill order among equal rates
    latest.sort_by_key(|(_, rate)| *rate);
    let ranking = latest.into_iter().map(|(skill, _)| skill).collect();

    let performance = Performance::new(started.elapsed(), cache.stats());
    tracing::trace!(
        skills = histories.len(),
        max_rate,
        compute_us = performance.compute_time.as_micros() as u64,
        cache_size = performance.cache_size,
        hits = performance.cache_hits,
        misses = performance.cache_misses,
        "aggregation pass"
    );

    Aggregate {
        histories,
        max_rate,
        ranking,
        span_start: span_start(current_time, config.span),
        current_time,
        performance,
    }
}
