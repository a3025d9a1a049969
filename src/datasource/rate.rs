//! Hourly rate computation over an entity ledger.

use serde::{Deserialize, Serialize};

use crate::datasource::EntityLedger;
use crate::units::{MIN_ELAPSED_TICKS, TICKS_PER_HOUR, Tick};

/// Aggregation semantics for hourly rates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RateMode {
    /// All progress since the first event over the total elapsed time.
    #[default]
    Cumulative,
    /// Progress inside a trailing window over the window length.
    SlidingWindow,
}

impl RateMode {
    /// Display label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Cumulative => "Cumulative",
            Self::SlidingWindow => "Sliding window",
        }
    }
}

/// Compute the hourly rate of `ledger` at `time`.
///
/// `window` is in ticks and only used by [`RateMode::SlidingWindow`]; it is
/// floored at one tick. A missing ledger yields zero. Sums are widened so
/// large deltas saturate at `i64::MAX` instead of overflowing.
pub fn compute_rate(
    ledger: Option<&EntityLedger>,
    time: Tick,
    window: Tick,
    mode: RateMode,
) -> i64 {
    let Some(ledger) = ledger else {
        return 0;
    };
    match mode {
        RateMode::Cumulative => {
            let gained = gained_where(ledger, |event_time| event_time <= time);
            let start = ledger.first_event_time().unwrap_or(0);
            let elapsed = time.saturating_sub(start).max(MIN_ELAPSED_TICKS);
            hourly(gained, elapsed)
        }
        RateMode::SlidingWindow => {
            let window = window.max(1);
            let gained = gained_where(ledger, |event_time| {
                event_time <= time && time - event_time < window
            });
            hourly(gained, window)
        }
    }
}

fn gained_where(ledger: &EntityLedger, keep: impl Fn(Tick) -> bool) -> i128 {
    ledger
        .events()
        .iter()
        .filter(|event| keep(event.time))
        .map(|event| i128::from(event.delta))
        .sum()
}

fn hourly(gained: i128, ticks: Tick) -> i64 {
    let rate = gained * i128::from(TICKS_PER_HOUR) / i128::from(ticks.max(1));
    i64::try_from(rate).unwrap_or(if rate < 0 { i64::MIN } else { i64::MAX })
}
