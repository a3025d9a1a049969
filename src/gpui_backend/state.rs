use crate::aggregate::Aggregate;
use crate::config::SamplingConfig;
use crate::geom::{ScreenPoint, ScreenRect};
use crate::tracker::Tracker;

/// Per-view UI state, shared between event handlers and the canvas.
#[derive(Debug, Clone, Default)]
pub(crate) struct MeterUiState {
    pub(crate) hover: Option<ScreenPoint>,
    pub(crate) plot_rect: Option<ScreenRect>,
    aggregate: Option<Aggregate>,
    sampling: Option<SamplingConfig>,
}

impl MeterUiState {
    /// Latest aggregation, recomputed on refresh ticks or when the sampling
    /// parameters change.
    pub(crate) fn refresh(&mut self, tracker: &mut Tracker, sampling: &SamplingConfig) -> &Aggregate {
        let stale = match (&self.aggregate, &self.sampling) {
            (Some(aggregate), Some(previous)) => {
                previous != sampling
                    || (aggregate.current_time != tracker.current_time()
                        && tracker.is_refresh_tick(sampling))
            }
            _ => true,
        };
        if stale {
            self.sampling = Some(sampling.clone());
            self.aggregate = None;
        }
        self.aggregate
            .get_or_insert_with(|| tracker.aggregate(sampling))
    }
}
