//! Versioned export/import of tracker state.
//!
//! Import never touches live state directly: a document is parsed, checked
//! and converted into a staged [`Ledger`] first, and the tracker only swaps
//! it in once everything succeeded.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::datasource::{EntityLedger, Ledger, MAX_EVENT_DELTA, ProgressEvent};
use crate::skill::Skill;
use crate::units::Tick;

/// Snapshot schema version written by [`Snapshot::to_json`].
pub const SNAPSHOT_VERSION: u32 = 1;

/// Reasons a snapshot can be rejected.
#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    /// The document is not valid snapshot JSON.
    #[error("malformed snapshot: {0}")]
    Json(#[from] serde_json::Error),
    /// The document was written by an unknown schema version.
    #[error("unsupported snapshot version {0}")]
    UnsupportedVersion(u32),
    /// A skill has events but no last observed value.
    #[error("{0} has events but no last observed value")]
    MissingLastObserved(Skill),
    /// A skill has events but no first event time, or the reverse.
    #[error("{0} has inconsistent first event time")]
    FirstEventTimeMismatch(Skill),
    /// The first event time is later than the earliest event.
    #[error("{skill} first event time {first} is after its first event at {earliest}")]
    FirstEventTimeAfterEvents {
        /// Offending skill.
        skill: Skill,
        /// Recorded first event time.
        first: Tick,
        /// Time of the earliest event.
        earliest: Tick,
    },
    /// Event times go backwards.
    #[error("{skill} event at tick {time} precedes tick {last}")]
    NonMonotonicEvents {
        /// Offending skill.
        skill: Skill,
        /// Out-of-order event time.
        time: Tick,
        /// Time of the preceding event.
        last: Tick,
    },
    /// An event carries a negative delta.
    #[error("{skill} event at tick {time} has negative delta")]
    NegativeDelta {
        /// Offending skill.
        skill: Skill,
        /// Event time.
        time: Tick,
    },
    /// An event carries a delta above [`MAX_EVENT_DELTA`].
    #[error("{skill} event at tick {time} has delta {delta} above the maximum")]
    DeltaTooLarge {
        /// Offending skill.
        skill: Skill,
        /// Event time.
        time: Tick,
        /// Rejected delta.
        delta: i64,
    },
    /// An event is newer than the snapshot's current time.
    #[error("{skill} event at tick {time} is after current time {current}")]
    EventAfterCurrentTime {
        /// Offending skill.
        skill: Skill,
        /// Event time.
        time: Tick,
        /// Snapshot current time.
        current: Tick,
    },
}

/// Serialized tracker state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Schema version.
    pub version: u32,
    /// Event lists per skill.
    pub events: BTreeMap<Skill, Vec<ProgressEvent>>,
    /// Last raw cumulative value per skill.
    pub last_observed: BTreeMap<Skill, i64>,
    /// First event tick per skill.
    pub first_event_times: BTreeMap<Skill, Tick>,
    /// Session clock.
    pub current_time: Tick,
    /// Whether the session was paused.
    pub paused: bool,
    /// Pause marker ticks.
    pub pause_times: BTreeSet<Tick>,
    /// Logout marker ticks.
    pub logout_times: BTreeSet<Tick>,
}

/// Validated state ready to be swapped into a tracker.
#[derive(Debug)]
pub(crate) struct StagedState {
    pub(crate) ledger: Ledger,
    pub(crate) current_time: Tick,
    pub(crate) paused: bool,
    pub(crate) pause_times: BTreeSet<Tick>,
    pub(crate) logout_times: BTreeSet<Tick>,
}

impl Snapshot {
    /// Parse a snapshot document. The content is not validated yet.
    pub fn from_json(json: &str) -> Result<Self, ImportError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize the snapshot.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub(crate) fn from_ledger(
        ledger: &Ledger,
        current_time: Tick,
        paused: bool,
        pause_times: &BTreeSet<Tick>,
        logout_times: &BTreeSet<Tick>,
    ) -> Self {
        let mut events = BTreeMap::new();
        let mut last_observed = BTreeMap::new();
        let mut first_event_times = BTreeMap::new();
        for (skill, entity) in ledger.entities() {
            last_observed.insert(skill, entity.last_observed());
            if let Some(first) = entity.first_event_time() {
                first_event_times.insert(skill, first);
                events.insert(skill, entity.events().to_vec());
            }
        }
        Self {
            version: SNAPSHOT_VERSION,
            events,
            last_observed,
            first_event_times,
            current_time,
            paused,
            pause_times: pause_times.clone(),
            logout_times: logout_times.clone(),
        }
    }

    /// Check every structural rule without building anything.
    pub fn validate(&self) -> Result<(), ImportError> {
        if self.version != SNAPSHOT_VERSION {
            return Err(ImportError::UnsupportedVersion(self.version));
        }
        for (&skill, events) in &self.events {
            self.validate_events(skill, events)?;
        }
        for &skill in self.first_event_times.keys() {
            if self.events.get(&skill).is_none_or(Vec::is_empty) {
                return Err(ImportError::FirstEventTimeMismatch(skill));
            }
        }
        Ok(())
    }

    fn validate_events(&self, skill: Skill, events: &[ProgressEvent]) -> Result<(), ImportError> {
        let Some(earliest) = events.first() else {
            return Ok(());
        };
        if !self.last_observed.contains_key(&skill) {
            return Err(ImportError::MissingLastObserved(skill));
        }
        let Some(&first) = self.first_event_times.get(&skill) else {
            return Err(ImportError::FirstEventTimeMismatch(skill));
        };
        if first > earliest.time {
            return Err(ImportError::FirstEventTimeAfterEvents {
                skill,
                first,
                earliest: earliest.time,
            });
        }
        let mut last = earliest.time;
        for event in events {
            if event.time < last {
                return Err(ImportError::NonMonotonicEvents {
                    skill,
                    time: event.time,
                    last,
                });
            }
            if event.delta < 0 {
                return Err(ImportError::NegativeDelta {
                    skill,
                    time: event.time,
                });
            }
            if event.delta > MAX_EVENT_DELTA {
                return Err(ImportError::DeltaTooLarge {
                    skill,
                    time: event.time,
                    delta: event.delta,
                });
            }
            if event.time > self.current_time {
                return Err(ImportError::EventAfterCurrentTime {
                    skill,
                    time: event.time,
                    current: self.current_time,
                });
            }
            last = event.time;
        }
        Ok(())
    }

    /// Validate and convert into state for a tracker swap.
    pub(crate) fn into_staged(mut self) -> Result<StagedState, ImportError> {
        self.validate()?;
        let mut entities = BTreeMap::new();
        for (skill, last_observed) in self.last_observed {
            let events = self.events.remove(&skill).unwrap_or_default();
            let first = self.first_event_times.get(&skill).copied();
            entities.insert(skill, EntityLedger::from_parts(events, last_observed, first));
        }
        Ok(StagedState {
            ledger: Ledger::from_entities(entities),
            current_time: self.current_time,
            paused: self.paused,
            pause_times: self.pause_times,
            logout_times: self.logout_times,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Snapshot {
        Snapshot {
            version: SNAPSHOT_VERSION,
            events: BTreeMap::from([(
                Skill::Mining,
                vec![
                    ProgressEvent { time: 100, delta: 500 },
                    ProgressEvent { time: 200, delta: 500 },
                ],
            )]),
            last_observed: BTreeMap::from([(Skill::Mining, 1_000), (Skill::Cooking, 77)]),
            first_event_times: BTreeMap::from([(Skill::Mining, 100)]),
            current_time: 250,
            paused: false,
            pause_times: BTreeSet::from([40]),
            logout_times: BTreeSet::new(),
        }
    }

    #[test]
    fn json_uses_skill_names_as_keys() {
        let json = sample().to_json().unwrap();
        assert!(json.contains("\"MINING\""));
        assert!(json.contains("\"version\":1"));
        assert_eq!(Snapshot::from_json(&json).unwrap(), sample());
    }

    #[test]
    fn missing_fields_are_rejected() {
        let err = Snapshot::from_json(r#"{"version":1,"events":{}}"#).unwrap_err();
        assert!(matches!(err, ImportError::Json(_)));
    }

    #[test]
    fn staged_state_keeps_baseline_only_skills() {
        let staged = sample().into_staged().unwrap();
        let cooking = staged.ledger.entity(Skill::Cooking).unwrap();
        assert!(!cooking.has_events());
        assert_eq!(cooking.last_observed(), 77);
        let mining = staged.ledger.entity(Skill::Mining).unwrap();
        assert_eq!(mining.events().len(), 2);
        assert_eq!(mining.first_event_time(), Some(100));
        assert_eq!(staged.current_time, 250);
    }

    #[test]
    fn rejects_unknown_version() {
        let mut snapshot = sample();
        snapshot.version = 7;
        assert!(matches!(
            snapshot.validate(),
            Err(ImportError::UnsupportedVersion(7))
        ));
    }

    #[test]
    fn rejects_out_of_order_events() {
        let mut snapshot = sample();
        snapshot
            .events
            .get_mut(&Skill::Mining)
            .unwrap()
            .push(ProgressEvent { time: 150, delta: 1 });
        assert!(matches!(
            snapshot.validate(),
            Err(ImportError::NonMonotonicEvents { time: 150, last: 200, .. })
        ));
    }

    #[test]
    fn rejects_late_first_event_time() {
        let mut snapshot = sample();
        snapshot.first_event_times.insert(Skill::Mining, 150);
        assert!(matches!(
            snapshot.validate(),
            Err(ImportError::FirstEventTimeAfterEvents { first: 150, earliest: 100, .. })
        ));
    }

    #[test]
    fn rejects_events_from_the_future() {
        let mut snapshot = sample();
        snapshot.current_time = 150;
        assert!(matches!(
            snapshot.validate(),
            Err(ImportError::EventAfterCurrentTime { time: 200, current: 150, .. })
        ));
    }

    #[test]
    fn rejects_dangling_ledgers() {
        let mut snapshot = sample();
        snapshot.last_observed.remove(&Skill::Mining);
        assert!(matches!(
            snapshot.validate(),
            Err(ImportError::MissingLastObserved(Skill::Mining))
        ));

        let mut snapshot = sample();
        snapshot.first_event_times.insert(Skill::Cooking, 10);
        assert!(matches!(
            snapshot.validate(),
            Err(ImportError::FirstEventTimeMismatch(Skill::Cooking))
        ));
    }

    #[test]
    fn rejects_negative_deltas() {
        let mut snapshot = sample();
        snapshot.events.get_mut(&Skill::Mining).unwrap()[0].delta = -5;
        assert!(matches!(
            snapshot.validate(),
            Err(ImportError::NegativeDelta { time: 100, .. })
        ));
    }

    #[test]
    fn rejects_oversized_deltas() {
        let mut snapshot = sample();
        let oversized = MAX_EVENT_DELTA + 1;
        snapshot.events.get_mut(&Skill::Mining).unwrap()[1].delta = oversized;
        assert!(matches!(
            snapshot.validate(),
            Err(ImportError::DeltaTooLarge { time: 200, delta, .. }) if delta == oversized
        ));
        snapshot.events.get_mut(&Skill::Mining).unwrap()[1].delta = MAX_EVENT_DELTA;
        assert!(snapshot.validate().is_ok());
    }
}
