//! Progress ledgers, rate computation and rate memoization.
//!
//! The data layer is append-only: every observation of a skill's cumulative
//! value becomes a delta event stamped with the tick it was seen on. Rates are
//! derived from those events on demand and memoized by [`RateCache`].

mod cache;
mod rate;

pub use cache::{CacheStats, RateCache, RateKey};
pub use rate::{RateMode, compute_rate};

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::skill::Skill;
use crate::units::{TICKS_PER_HOUR, Tick};

/// Largest delta a single event may carry.
///
/// One event at this size still yields an hourly rate that fits in `i64`.
pub const MAX_EVENT_DELTA: i64 = i64::MAX / TICKS_PER_HOUR as i64;

/// A single progress delta.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressEvent {
    /// Tick the delta was observed on.
    pub time: Tick,
    /// Progress gained since the previous observation.
    pub delta: i64,
}

/// Errors that can occur when appending events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum AppendError {
    /// The event is older than the last recorded event.
    #[error("event at tick {time} precedes last event at tick {last}")]
    NonMonotonicTime {
        /// Rejected event time.
        time: Tick,
        /// Time of the last recorded event.
        last: Tick,
    },
}

/// Ordered event log for one skill.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EntityLedger {
    events: Vec<ProgressEvent>,
    last_observed: i64,
    first_event_time: Option<Tick>,
}

impl EntityLedger {
    /// Create a ledger holding only a baseline observation.
    pub fn with_baseline(value: i64) -> Self {
        Self {
            events: Vec::new(),
            last_observed: value,
            first_event_time: None,
        }
    }

    pub(crate) fn from_parts(
        events: Vec<ProgressEvent>,
        last_observed: i64,
        first_event_time: Option<Tick>,
    ) -> Self {
        Self {
            events,
            last_observed,
            first_event_time,
        }
    }

    /// Append an event, keeping times non-decreasing.
    pub fn push(&mut self, event: ProgressEvent) -> Result<(), AppendError> {
        if let Some(last) = self.events.last()
            && event.time < last.time
        {
            return Err(AppendError::NonMonotonicTime {
                time: event.time,
                last: last.time,
            });
        }
        if self.first_event_time.is_none() {
            self.first_event_time = Some(event.time);
        }
        self.events.push(event);
        Ok(())
    }

    /// All recorded events in time order.
    pub fn events(&self) -> &[ProgressEvent] {
        &self.events
    }

    /// Last raw cumulative value seen.
    pub fn last_observed(&self) -> i64 {
        self.last_observed
    }

    /// Time of the first recorded event, if any.
    pub fn first_event_time(&self) -> Option<Tick> {
        self.first_event_time
    }

    /// Whether at least one event has been recorded.
    pub fn has_events(&self) -> bool {
        self.first_event_time.is_some()
    }

    fn clear_events(&mut self) {
        self.events.clear();
        self.first_event_time = None;
    }
}

/// Event ledgers for every observed skill.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Ledger {
    entities: BTreeMap<Skill, EntityLedger>,
}

impl Ledger {
    /// Create an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn from_entities(entities: BTreeMap<Skill, EntityLedger>) -> Self {
        Self { entities }
    }

    /// Record a cumulative value observed at `time`.
    ///
    /// The first observation of a skill only stores the baseline. Later
    /// observations append the difference to the previous value; a value
    /// below the baseline is recorded as a zero delta and rebaselines.
    /// Deltas are capped at [`MAX_EVENT_DELTA`].
    pub fn record(
        &mut self,
        skill: Skill,
        cumulative: i64,
        time: Tick,
    ) -> Result<Option<ProgressEvent>, AppendError> {
        let Some(entity) = self.entities.get_mut(&skill) else {
            self.entities
                .insert(skill, EntityLedger::with_baseline(cumulative));
            return Ok(None);
        };
        let delta = cumulative
            .saturating_sub(entity.last_observed)
            .clamp(0, MAX_EVENT_DELTA);
        let event = ProgressEvent { time, delta };
        entity.push(event)?;
        entity.last_observed = cumulative;
        Ok(Some(event))
    }

    /// Whether any skill has been observed at least once.
    pub fn is_tracking(&self) -> bool {
        !self.entities.is_empty()
    }

    /// Skills that have emitted at least one event, in skill order.
    pub fn tracked_entities(&self) -> impl Iterator<Item = Skill> + '_ {
        self.entities
            .iter()
            .filter(|(_, entity)| entity.has_events())
            .map(|(skill, _)| *skill)
    }

    /// Access one skill's ledger.
    pub fn entity(&self, skill: Skill) -> Option<&EntityLedger> {
        self.entities.get(&skill)
    }

    /// Iterate over every observed skill, including baseline-only ones.
    pub fn entities(&self) -> impl Iterator<Item = (Skill, &EntityLedger)> + '_ {
        self.entities.iter().map(|(skill, entity)| (*skill, entity))
    }

    /// Drop every event while keeping the observed baselines.
    pub fn clear_events(&mut self) {
        for entity in self.entities.values_mut() {
            entity.clear_events();
        }
    }
}
