//! Axis interval generation and label placement.
//!
//! Interval generation is a pure function of the current scale. Label
//! placement is greedy: candidates are visited in priority order and dropped
//! when their text box would overlap a label that was already placed.

use crate::geom::{ScreenPoint, ScreenRect, rect_intersects_any};
use crate::transform::Transform;
use crate::units::{Tick, format_short, seconds_to_ticks, ticks_to_seconds, ticks_to_time};

/// Gap between a rate label and the chart's left edge.
pub const RATE_LABEL_RIGHT_PAD: f32 = 2.0;
/// Gap between the chart's bottom edge and time labels.
pub const TIME_LABEL_TOP_PAD: f32 = 2.0;
/// Minimum horizontal gap between two time labels.
pub const TIME_LABEL_SPACING: f32 = 4.0;

/// Text measurement provider, implemented by render backends.
pub trait TextMeasurer {
    /// Measure the width and line height of `text` at font `size`.
    fn measure(&self, text: &str, size: f32) -> (f32, f32);
}

/// Rate-axis step sizes keyed by the exclusive upper bound of the maximum.
const RATE_STEPS: [(i64, i64); 6] = [
    (10_000, 5_000),
    (25_000, 10_000),
    (100_000, 25_000),
    (200_000, 50_000),
    (500_000, 100_000),
    (1_000_000, 250_000),
];
const RATE_STEP_FALLBACK: i64 = 500_000;
/// Largest `max / step` ratio before the fallback rate step grows.
pub const MAX_RATE_MARKERS: i64 = 20;

/// Time-axis step sizes in seconds, keyed by span length in seconds.
const TIME_STEPS: [(u64, u64); 6] = [
    (120, 15),
    (240, 30),
    (480, 60),
    (1_800, 300),
    (3_600, 900),
    (7_200, 1_800),
];
const TIME_STEP_FALLBACK: u64 = 3_600;

/// Step size used for a rate axis topping out at `max`.
///
/// Past the table the step grows tenfold until `max / step` is at most
/// [`MAX_RATE_MARKERS`].
pub fn rate_step(max: i64) -> i64 {
    if let Some((_, step)) = RATE_STEPS.iter().find(|(bound, _)| max < *bound) {
        return *step;
    }
    let mut step = RATE_STEP_FALLBACK;
    while max / step > MAX_RATE_MARKERS {
        step = step.saturating_mul(10);
    }
    step
}

/// Rate-axis marker values: multiples of the step in `[0, max)`.
pub fn rate_intervals(max: i64) -> Vec<i64> {
    let step = rate_step(max);
    let mut out = Vec::new();
    let mut value = 0;
    while value < max {
        out.push(value);
        let Some(next) = value.checked_add(step) else {
            break;
        };
        value = next;
    }
    out
}

/// Step size in ticks used for a time axis covering `span` ticks.
pub fn time_step(span: Tick) -> Tick {
    let seconds = ticks_to_seconds(span);
    let step = TIME_STEPS
        .iter()
        .find(|(bound, _)| seconds < *bound)
        .map_or(TIME_STEP_FALLBACK, |(_, step)| *step);
    seconds_to_ticks(step).max(1)
}

/// Time-axis marker ticks for the visible range `[start, end]`.
///
/// The result starts with `start`, ends with `end`, and holds the step
/// multiples strictly between them. Each tick appears once.
pub fn time_intervals(start: Tick, end: Tick) -> Vec<Tick> {
    let step = time_step(end.saturating_sub(start));
    let mut out = vec![start];
    let mut tick = (start / step).saturating_add(1).saturating_mul(step);
    while tick < end {
        out.push(tick);
        let Some(next) = tick.checked_add(step) else {
            break;
        };
        tick = next;
    }
    if end != start {
        out.push(end);
    }
    out
}

/// A placed axis label.
#[derive(Debug, Clone, PartialEq)]
pub struct AxisLabel<V> {
    /// Data value the label annotates.
    pub value: V,
    /// Rendered text.
    pub text: String,
    /// Text bounding box in screen space.
    pub rect: ScreenRect,
}

/// Marker values and placed labels for both axes of one frame.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AxisLayout {
    /// Rate marker values, ascending.
    pub rate_markers: Vec<i64>,
    /// Time marker ticks, ascending, anchors included.
    pub time_markers: Vec<Tick>,
    /// Rate labels that survived overlap checks, topmost first.
    pub rate_labels: Vec<AxisLabel<i64>>,
    /// Time labels that survived overlap checks; the span start comes first,
    /// then the rest rightmost first.
    pub time_labels: Vec<AxisLabel<Tick>>,
}

impl AxisLayout {
    /// Generate markers and place labels for `transform`'s scale.
    pub fn build(transform: &Transform, measurer: &dyn TextMeasurer, font_size: f32) -> Self {
        let scale = transform.scale();
        let rate_markers = rate_intervals(scale.height_scale);
        let time_markers = time_intervals(scale.width_min, scale.width_max);
        let rate_labels = place_rate_labels(&rate_markers, transform, measurer, font_size);
        let time_labels = place_time_labels(&time_markers, transform, measurer, font_size);
        Self {
            rate_markers,
            time_markers,
            rate_labels,
            time_labels,
        }
    }
}

/// Place rate labels left of the chart, topmost first.
///
/// Zero is never labelled.
pub fn place_rate_labels(
    values: &[i64],
    transform: &Transform,
    measurer: &dyn TextMeasurer,
    font_size: f32,
) -> Vec<AxisLabel<i64>> {
    let right = transform.screen().min.x - RATE_LABEL_RIGHT_PAD;
    let mut placed: Vec<AxisLabel<i64>> = Vec::new();
    let mut occupied: Vec<ScreenRect> = Vec::new();
    for &value in values.iter().rev() {
        if value == 0 {
            continue;
        }
        let text = format_short(value);
        let (width, height) = measurer.measure(&text, font_size);
        let center = transform.map_rate(value as f64, true);
        let rect = ScreenRect::from_origin_size(
            ScreenPoint::new(right - width, center - height * 0.5),
            (width, height),
        );
        if rect_intersects_any(&rect, &occupied) {
            continue;
        }
        occupied.push(rect);
        placed.push(AxisLabel { value, text, rect });
    }
    placed
}

/// Place time labels under the chart.
///
/// The first tick is the span-start anchor and is always placed; its box
/// plus spacing is reserved. The remaining ticks are tried rightmost first.
pub fn place_time_labels(
    ticks: &[Tick],
    transform: &Transform,
    measurer: &dyn TextMeasurer,
    font_size: f32,
) -> Vec<AxisLabel<Tick>> {
    let Some((&origin, rest)) = ticks.split_first() else {
        return Vec::new();
    };
    let top = transform.screen().max.y + TIME_LABEL_TOP_PAD;
    let label_at = |tick: Tick| {
        let text = ticks_to_time(tick);
        let (width, height) = measurer.measure(&text, font_size);
        let left = transform.map_time(tick as f64) - width * 0.5;
        let rect = ScreenRect::from_origin_size(ScreenPoint::new(left, top), (width, height));
        AxisLabel {
            value: tick,
            text,
            rect,
        }
    };

    let origin_label = label_at(origin);
    let mut reserved = vec![origin_label.rect.expand_x(TIME_LABEL_SPACING)];
    let mut placed = vec![origin_label];
    for &tick in rest.iter().rev() {
        let label = label_at(tick);
        if rect_intersects_any(&label.rect, &reserved) {
            continue;
        }
        reserved.push(label.rect.expand_x(TIME_LABEL_SPACING));
        placed.push(label);
    }
    placed
}
