//! Hover resolution: from a cursor position to the nearest samples.

use crate::aggregate::{Aggregate, HistorySample};
use crate::geom::ScreenPoint;
use crate::skill::Skill;
use crate::transform::Transform;

/// Nearest sample of one skill under the cursor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HoverTarget {
    /// Hovered skill.
    pub skill: Skill,
    /// Sample nearest to the cursor time.
    pub sample: HistorySample,
    /// Sample position in screen space.
    pub screen: ScreenPoint,
}

/// Result of resolving a cursor position.
#[derive(Debug, Clone, PartialEq)]
pub struct HoverResult {
    /// Cursor time in (fractional) ticks.
    pub time: f64,
    /// One target per plotted skill, in ranking order.
    pub targets: Vec<HoverTarget>,
    /// Skill whose sample sits closest to the cursor vertically.
    pub primary: Skill,
}

impl HoverResult {
    /// Target of the primary skill.
    pub fn primary_target(&self) -> Option<&HoverTarget> {
        self.targets.iter().find(|target| target.skill == self.primary)
    }

    /// Whether `skill` should be drawn dimmed while this hover is active.
    pub fn is_dimmed(&self, skill: Skill) -> bool {
        skill != self.primary
    }
}

/// Sample with the time nearest to `time`; ties keep the earlier sample.
pub fn nearest_sample(history: &[HistorySample], time: f64) -> Option<HistorySample> {
    let mut best: Option<(HistorySample, f64)> = None;
    for sample in history {
        let distance = (sample.time as f64 - time).abs();
        if best.is_none_or(|(_, best_distance)| distance < best_distance) {
            best = Some((*sample, distance));
        }
    }
    best.map(|(sample, _)| sample)
}

/// Resolve the cursor against every plotted history.
///
/// Returns `None` when the cursor is outside the chart or nothing is
/// plotted.
pub fn resolve(aggregate: &Aggregate, transform: &Transform, cursor: ScreenPoint) -> Option<HoverResult> {
    if !transform.screen().contains(cursor) {
        return None;
    }
    let time = transform.unmap_time(cursor.x);

    let mut targets = Vec::with_capacity(aggregate.ranking.len());
    let mut primary: Option<(Skill, f32)> = None;
    for &skill in &aggregate.ranking {
        let Some(sample) = nearest_sample(aggregate.history(skill), time) else {
            continue;
        };
        let screen = transform.map_point(sample.time, sample.rate);
        let distance = (screen.y - cursor.y).abs();
        if primary.is_none_or(|(_, best)| distance < best) {
            primary = Some((skill, distance));
        }
        targets.push(HoverTarget {
            skill,
            sample,
            screen,
        });
    }

    let (primary, _) = primary?;
    Some(HoverResult {
        time,
        targets,
        primary,
    })
}
