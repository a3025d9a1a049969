//! Backend-agnostic chart frame builder.
//!
//! [`build_chart`] turns one aggregation pass into a [`RenderList`]. Layout
//! works outside-in: margins are sized from the labels and rate boxes that
//! will sit around the chart, then everything inside is mapped through a
//! [`Transform`] over the remaining rectangle.

use std::collections::BTreeSet;

use crate::aggregate::{Aggregate, HistorySample};
use crate::axis::{AxisLayout, RATE_LABEL_RIGHT_PAD, TIME_LABEL_TOP_PAD, TextMeasurer, rate_intervals};
use crate::config::MeterConfig;
use crate::geom::{ScreenPoint, ScreenRect, clamp_point};
use crate::hover::{self, HoverResult, HoverTarget};
use crate::render::{
    Color, LineSegment, LineStyle, RectStyle, RenderCommand, RenderList, TextStyle,
};
use crate::skill::Skill;
use crate::style::Theme;
use crate::transform::Transform;
use crate::units::{TICKS_PER_HOUR, Tick, format_long, format_short, ticks_to_time};

/// Font size used for every label.
pub const FONT_SIZE: f32 = 12.0;
/// Gap between the chart's right edge and current rate boxes.
pub const CURRENT_RATE_LEFT_PAD: f32 = 4.0;
/// Narrowest chart area the builder will lay out.
pub const MIN_CHART_WIDTH: f32 = 60.0;
/// Text shown instead of the chart while there is nothing to plot.
pub const INACTIVE_MESSAGE: &str = "Meter inactive";

const BOX_PAD: f32 = 1.0;
const TOOLTIP_PAD: f32 = 2.0;
const TOOLTIP_OFFSET: f32 = 8.0;
const DIM_FACTOR: f32 = 0.5;

/// Everything one frame is drawn from.
#[derive(Debug, Clone, Copy)]
pub struct ChartInput<'a> {
    /// Output of the latest aggregation pass.
    pub aggregate: &'a Aggregate,
    /// Pause marker ticks.
    pub pause_times: &'a BTreeSet<Tick>,
    /// Logout marker ticks.
    pub logout_times: &'a BTreeSet<Tick>,
    /// Display configuration.
    pub config: &'a MeterConfig,
    /// Cursor position, if the pointer is over the widget.
    pub cursor: Option<ScreenPoint>,
}

/// A built frame plus the layout it was built with.
#[derive(Debug, Clone, Default)]
pub struct ChartFrame {
    /// Commands to replay on a surface.
    pub render: RenderList,
    /// Chart area inside the margins; `None` for inactive frames.
    pub plot_rect: Option<ScreenRect>,
    /// Resolved hover, when the cursor is over the chart.
    pub hover: Option<HoverResult>,
}

/// Build a full frame into `bounds`.
pub fn build_chart(
    input: &ChartInput<'_>,
    bounds: ScreenRect,
    measurer: &dyn TextMeasurer,
) -> ChartFrame {
    let mut frame = ChartFrame::default();
    if !bounds.is_valid() {
        return frame;
    }
    let config = input.config;
    let aggregate = input.aggregate;
    let theme = Theme::preset(config.theme);

    if let Some(fill) = theme.overlay_background {
        frame.render.push(RenderCommand::Rect {
            rect: bounds,
            style: RectStyle::filled(fill),
        });
    }

    if !aggregate.has_data() {
        build_inactive(&mut frame.render, &theme, bounds, measurer);
        return frame;
    }

    let line_height = measurer.measure("0", FONT_SIZE).1;
    let plot_rect = layout_plot_rect(input, bounds, measurer, line_height);
    if plot_rect.width() < MIN_CHART_WIDTH.min(bounds.width()) || !plot_rect.is_valid() {
        return frame;
    }
    let Some(transform) = Transform::new(aggregate.scale(), plot_rect, line_height * 0.5) else {
        return frame;
    };

    frame.render.push(RenderCommand::Rect {
        rect: plot_rect,
        style: RectStyle::boxed(theme.chart_background, theme.chart_border),
    });

    let axes = AxisLayout::build(&transform, measurer, FONT_SIZE);
    build_markers(&mut frame.render, config, &theme, &axes, &transform);
    build_session_markers(&mut frame.render, input, &theme, &transform);
    build_axis_labels(&mut frame.render, config, &theme, &axes);

    let hover = if config.show_hover_tooltips {
        input
            .cursor
            .and_then(|cursor| hover::resolve(aggregate, &transform, cursor))
    } else {
        None
    };

    build_lines(&mut frame.render, input, &theme, &transform, hover.as_ref());
    if let Some(hover) = &hover {
        build_hover_guide(&mut frame.render, &theme, &transform, hover);
    }
    if config.show_current_rates {
        build_current_rates(&mut frame.render, input, &theme, &transform, measurer);
    }
    if let Some(hover) = &hover {
        build_tooltips(&mut frame.render, config, &theme, bounds, hover, measurer);
    }
    if config.show_performance {
        build_performance(&mut frame.render, aggregate, &theme, plot_rect, line_height);
    }

    frame.plot_rect = Some(plot_rect);
    frame.hover = hover;
    frame
}

/// Format a rate the way labels and boxes show it.
pub fn format_rate(rate: i64, long: bool) -> String {
    if long {
        format_long(rate)
    } else {
        format_short(rate)
    }
}

fn build_inactive(
    render: &mut RenderList,
    theme: &Theme,
    bounds: ScreenRect,
    measurer: &dyn TextMeasurer,
) {
    let (width, height) = measurer.measure(INACTIVE_MESSAGE, FONT_SIZE);
    let position = ScreenPoint::new(
        bounds.min.x + (bounds.width() - width) * 0.5,
        bounds.min.y + (bounds.height() - height) * 0.5,
    );
    render.text(
        position,
        INACTIVE_MESSAGE,
        TextStyle {
            color: theme.axis_label,
            size: FONT_SIZE,
        },
        theme.axis_label_shadow,
    );
}

fn layout_plot_rect(
    input: &ChartInput<'_>,
    bounds: ScreenRect,
    measurer: &dyn TextMeasurer,
    line_height: f32,
) -> ScreenRect {
    let config = input.config;
    let aggregate = input.aggregate;
    let width_of = |text: &str| measurer.measure(text, FONT_SIZE).0;

    let rate_label_width = if config.show_rate_labels {
        rate_intervals(aggregate.max_rate)
            .into_iter()
            .map(|rate| width_of(&format_short(rate)) + RATE_LABEL_RIGHT_PAD)
            .fold(0.0, f32::max)
    } else {
        0.0
    };
    // a fixed-width origin keeps the chart from jiggling as time passes
    let origin_half = if config.show_time_labels {
        let origin = if aggregate.current_time > TICKS_PER_HOUR { TICKS_PER_HOUR } else { 0 };
        width_of(&ticks_to_time(origin)) * 0.5
    } else {
        0.0
    };
    let left = rate_label_width.max(origin_half);

    let rate_box_width = if config.show_current_rates {
        aggregate
            .ranking
            .iter()
            .map(|&skill| aggregate.latest_rate(skill))
            .filter(|&rate| rate != 0)
            .map(|rate| {
                width_of(&format_rate(rate, config.long_format_numbers))
                    + CURRENT_RATE_LEFT_PAD
                    + BOX_PAD * 2.0
            })
            .fold(0.0, f32::max)
    } else {
        0.0
    };
    let current_half = if config.show_time_labels {
        width_of(&ticks_to_time(aggregate.current_time)) * 0.5
    } else {
        0.0
    };
    let right = rate_box_width.max(current_half);

    let bottom = if config.show_time_labels {
        line_height + TIME_LABEL_TOP_PAD
    } else {
        0.0
    };

    ScreenRect::new(
        bounds.min.offset(left, 0.0),
        bounds.max.offset(-right, -bottom),
    )
}

fn build_markers(
    render: &mut RenderList,
    config: &MeterConfig,
    theme: &Theme,
    axes: &AxisLayout,
    transform: &Transform,
) {
    let rect = transform.screen();
    if config.show_rate_markers && !axes.rate_markers.is_empty() {
        let segments = axes
            .rate_markers
            .iter()
            .map(|&rate| {
                let y = transform.map_rate(rate as f64, true);
                LineSegment::new(ScreenPoint::new(rect.min.x, y), ScreenPoint::new(rect.max.x, y))
            })
            .collect();
        render.push(RenderCommand::LineSegments {
            segments,
            style: LineStyle::thin(theme.horizontal_marker),
        });
    }
    // the span-start anchor sits on the left edge and gets no marker
    if config.show_time_markers && axes.time_markers.len() > 1 {
        let segments = axes.time_markers[1..]
            .iter()
            .map(|&tick| vertical(transform, tick as f64))
            .collect();
        render.push(RenderCommand::LineSegments {
            segments,
            style: LineStyle::thin(theme.vertical_marker),
        });
    }
}

fn build_session_markers(
    render: &mut RenderList,
    input: &ChartInput<'_>,
    theme: &Theme,
    transform: &Transform,
) {
    let scale = transform.scale();
    let visible = scale.width_min..=scale.width_max;
    for (ticks, color) in [
        (input.pause_times, theme.pause_marker),
        (input.logout_times, theme.logout_marker),
    ] {
        let segments: Vec<LineSegment> = ticks
            .range(visible.clone())
            .map(|&tick| vertical(transform, tick as f64))
            .collect();
        if !segments.is_empty() {
            render.push(RenderCommand::LineSegments {
                segments,
                style: LineStyle::thin(color),
            });
        }
    }
}

fn build_axis_labels(
    render: &mut RenderList,
    config: &MeterConfig,
    theme: &Theme,
    axes: &AxisLayout,
) {
    let style = TextStyle {
        color: theme.axis_label,
        size: FONT_SIZE,
    };
    if config.show_rate_labels {
        for label in &axes.rate_labels {
            render.text(label.rect.min, &label.text, style.clone(), theme.axis_label_shadow);
        }
    }
    if config.show_time_labels {
        for label in &axes.time_labels {
            render.text(label.rect.min, &label.text, style.clone(), theme.axis_label_shadow);
        }
    }
}

fn build_lines(
    render: &mut RenderList,
    input: &ChartInput<'_>,
    theme: &Theme,
    transform: &Transform,
    hover: Option<&HoverResult>,
) {
    let dim = input.config.dim_non_hovered;
    render.push(RenderCommand::ClipRect(transform.screen().expand_x(1.0)));
    for &skill in &input.aggregate.ranking {
        let segments = line_segments(input.aggregate.history(skill), transform);
        if segments.is_empty() {
            continue;
        }
        let mut color = skill.color();
        if dim && hover.is_some_and(|hover| hover.is_dimmed(skill)) {
            color = color.scale_alpha(DIM_FACTOR);
        }
        if theme.plot_shadow {
            render.push(RenderCommand::LineSegments {
                segments: segments.iter().map(|segment| segment.shadow()).collect(),
                style: LineStyle::thin(Color::BLACK.scale_alpha(color.a)),
            });
        }
        render.push(RenderCommand::LineSegments {
            segments,
            style: LineStyle::thin(color),
        });
    }
    render.push(RenderCommand::ClipEnd);
}

/// Polyline segments for one history.
///
/// A segment whose ends both sit on zero is skipped. The last sample is
/// extended to the right edge unless the line ends flat on zero.
pub(crate) fn line_segments(history: &[HistorySample], transform: &Transform) -> Vec<LineSegment> {
    let mut segments = Vec::with_capacity(history.len());
    let mut previous: Option<(ScreenPoint, i64)> = None;
    let mut flatlining = false;
    for sample in history {
        let point = transform.map_point(sample.time, sample.rate);
        if let Some((start, rate)) = previous {
            flatlining = rate == 0 && sample.rate == 0;
            if !flatlining {
                segments.push(LineSegment::new(start, point));
            }
        }
        previous = Some((point, sample.rate));
    }
    if let Some((last, _)) = previous
        && !flatlining
    {
        let edge = ScreenPoint::new(transform.screen().max.x, last.y);
        if edge.x > last.x {
            segments.push(LineSegment::new(last, edge));
        }
    }
    segments
}

fn build_hover_guide(
    render: &mut RenderList,
    theme: &Theme,
    transform: &Transform,
    hover: &HoverResult,
) {
    let time = hover
        .primary_target()
        .map_or(hover.time, |target| target.sample.time as f64);
    render.push(RenderCommand::LineSegments {
        segments: vec![vertical(transform, time)],
        style: LineStyle::thin(theme.vertical_marker.scale_alpha(2.0)),
    });
}

fn build_current_rates(
    render: &mut RenderList,
    input: &ChartInput<'_>,
    theme: &Theme,
    transform: &Transform,
    measurer: &dyn TextMeasurer,
) {
    let config = input.config;
    let aggregate = input.aggregate;
    let x = transform.screen().max.x + CURRENT_RATE_LEFT_PAD;

    // fastest first so its box keeps its natural position
    let mut boxes: Vec<(Skill, String, ScreenRect)> = Vec::new();
    for &skill in aggregate.ranking.iter().rev() {
        let rate = aggregate.latest_rate(skill);
        if rate == 0 {
            continue;
        }
        let text = format_rate(rate, config.long_format_numbers);
        let (width, height) = measurer.measure(&text, FONT_SIZE);
        let center = transform.map_rate(rate as f64, true);
        let rect = ScreenRect::from_origin_size(
            ScreenPoint::new(x - BOX_PAD, center - height * 0.5 - BOX_PAD),
            (width + BOX_PAD * 2.0, height + BOX_PAD * 2.0),
        );
        boxes.push((skill, text, rect));
    }
    if config.stack_current_rates {
        let mut rects: Vec<ScreenRect> = boxes.iter().map(|(_, _, rect)| *rect).collect();
        stack_rects(&mut rects);
        for ((_, _, rect), stacked) in boxes.iter_mut().zip(rects) {
            *rect = stacked;
        }
    }

    for (skill, text, rect) in boxes.iter().rev() {
        render.push(RenderCommand::Rect {
            rect: *rect,
            style: RectStyle::boxed(theme.rate_background, theme.rate_border),
        });
        let color = theme.rate_text.unwrap_or(skill.color());
        render.text(
            rect.min.offset(BOX_PAD, BOX_PAD),
            text,
            TextStyle {
                color,
                size: FONT_SIZE,
            },
            true,
        );
    }
}

/// Push each rectangle down until it clears every rectangle before it.
pub(crate) fn stack_rects(rects: &mut [ScreenRect]) {
    for index in 1..rects.len() {
        let (placed, rest) = rects.split_at_mut(index);
        let rect = &mut rest[0];
        while let Some(hit) = placed.iter().find(|other| other.intersects(rect)) {
            let shift = hit.max.y - rect.min.y;
            *rect = ScreenRect::new(rect.min.offset(0.0, shift), rect.max.offset(0.0, shift));
        }
    }
}

fn build_tooltips(
    render: &mut RenderList,
    config: &MeterConfig,
    theme: &Theme,
    bounds: ScreenRect,
    hover: &HoverResult,
    measurer: &dyn TextMeasurer,
) {
    let targets: Vec<&HoverTarget> = if config.show_all_hovers {
        hover.targets.iter().collect()
    } else {
        hover.primary_target().into_iter().collect()
    };

    let mut occupied: Vec<ScreenRect> = Vec::new();
    for target in targets {
        let text = tooltip_text(target, config.long_format_numbers);
        let (width, height) = measurer.measure(&text, FONT_SIZE);
        let size = (width + TOOLTIP_PAD * 2.0, height + TOOLTIP_PAD * 2.0);
        let mut origin = target.screen.offset(TOOLTIP_OFFSET, -size.1 - TOOLTIP_OFFSET);
        if origin.x + size.0 > bounds.max.x {
            origin.x = target.screen.x - size.0 - TOOLTIP_OFFSET;
        }
        origin = clamp_point(origin, bounds, size);
        occupied.push(ScreenRect::from_origin_size(origin, size));
        stack_rects(&mut occupied);
        let Some(&rect) = occupied.last() else {
            continue;
        };

        render.push(RenderCommand::Rect {
            rect,
            style: RectStyle::boxed(theme.tooltip_background, theme.tooltip_border),
        });
        render.text(
            rect.min.offset(TOOLTIP_PAD, TOOLTIP_PAD),
            &text,
            TextStyle {
                color: theme.tooltip_text.unwrap_or(target.skill.color()),
                size: FONT_SIZE,
            },
            theme.tooltip_text_shadow,
        );
    }
}

/// Tooltip text for a hovered sample: `"<skill> <rate>/h"`.
pub fn tooltip_text(target: &HoverTarget, long: bool) -> String {
    format!("{} {}/h", target.skill, format_rate(target.sample.rate, long))
}

fn build_performance(
    render: &mut RenderList,
    aggregate: &Aggregate,
    theme: &Theme,
    plot_rect: ScreenRect,
    line_height: f32,
) {
    let performance = aggregate.performance;
    let lines = [
        format!(
            "compute: {:.2}ms",
            performance.compute_time.as_secs_f64() * 1_000.0
        ),
        format!(
            "cache: {} ({} hits, {} misses)",
            performance.cache_size, performance.cache_hits, performance.cache_misses
        ),
    ];
    let style = TextStyle {
        color: theme.axis_label,
        size: FONT_SIZE,
    };
    for (index, line) in lines.iter().enumerate() {
        let position = plot_rect.min.offset(2.0, 2.0 + index as f32 * line_height);
        render.text(position, line, style.clone(), true);
    }
}

fn vertical(transform: &Transform, time: f64) -> LineSegment {
    let rect = transform.screen();
    let x = transform.map_time(time);
    LineSegment::new(ScreenPoint::new(x, rect.min.y), ScreenPoint::new(x, rect.max.y))
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use crate::transform::ChartScale;

    struct FixedWidth;

    impl TextMeasurer for FixedWidth {
        fn measure(&self, text: &str, size: f32) -> (f32, f32) {
            (text.len() as f32 * size * 0.5, size)
        }
    }

    fn samples(points: &[(u64, i64)]) -> Vec<HistorySample> {
        points
            .iter()
            .map(|&(time, rate)| HistorySample { time, rate })
            .collect()
    }

    fn aggregate() -> Aggregate {
        Aggregate {
            histories: BTreeMap::from([
                (Skill::Mining, samples(&[(0, 0), (100, 20_000), (200, 30_000)])),
                (Skill::Fishing, samples(&[(0, 0), (100, 0), (200, 0)])),
                (Skill::Cooking, samples(&[(0, 10_000), (100, 28_000), (200, 29_000)])),
            ]),
            max_rate: 30_000,
            ranking: vec![Skill::Fishing, Skill::Cooking, Skill::Mining],
            span_start: 0,
            current_time: 250,
            ..Aggregate::default()
        }
    }

    fn bounds() -> ScreenRect {
        ScreenRect::new(ScreenPoint::new(0.0, 0.0), ScreenPoint::new(300.0, 120.0))
    }

    fn build(aggregate: &Aggregate, config: &MeterConfig, cursor: Option<ScreenPoint>) -> ChartFrame {
        let markers = BTreeSet::new();
        let input = ChartInput {
            aggregate,
            pause_times: &markers,
            logout_times: &markers,
            config,
            cursor,
        };
        build_chart(&input, bounds(), &FixedWidth)
    }

    fn texts(render: &RenderList) -> Vec<String> {
        render
            .commands()
            .iter()
            .filter_map(|command| match command {
                RenderCommand::Text { text, .. } => Some(text.clone()),
                _ => None,
            })
            .collect()
    }

    fn line_colors(render: &RenderList) -> Vec<Color> {
        render
            .commands()
            .iter()
            .filter_map(|command| match command {
                RenderCommand::LineSegments { style, .. } => Some(style.color),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn inactive_without_data() {
        let frame = build(&Aggregate::default(), &MeterConfig::default(), None);
        assert!(frame.plot_rect.is_none());
        assert_eq!(texts(&frame.render), vec![INACTIVE_MESSAGE.to_string()]);
    }

    #[test]
    fn flat_zero_lines_are_suppressed() {
        let screen = ScreenRect::new(ScreenPoint::new(0.0, 0.0), ScreenPoint::new(100.0, 100.0));
        let transform = Transform::new(ChartScale::new(100, 0, 100), screen, 0.0).unwrap();
        assert!(line_segments(&samples(&[(0, 0), (50, 0)]), &transform).is_empty());

        let rising = line_segments(&samples(&[(0, 0), (25, 0), (50, 40)]), &transform);
        assert_eq!(rising.len(), 2);
        assert_eq!(rising[1].end, ScreenPoint::new(100.0, 60.0));

        let falling = line_segments(&samples(&[(0, 40), (25, 0), (50, 0)]), &transform);
        assert_eq!(falling.len(), 1);
    }

    #[test]
    fn lines_follow_ranking_with_margins_applied() {
        let config = MeterConfig::default();
        let frame = build(&aggregate(), &config, None);
        let plot_rect = frame.plot_rect.unwrap();
        assert!(plot_rect.min.x > 0.0);
        assert!(plot_rect.max.x < 300.0);
        assert!(plot_rect.max.y < 120.0);

        let colors = line_colors(&frame.render);
        let cooking = colors.iter().rposition(|c| *c == Skill::Cooking.color()).unwrap();
        let mining = colors.iter().rposition(|c| *c == Skill::Mining.color()).unwrap();
        assert!(cooking < mining);
        assert!(!colors.contains(&Skill::Fishing.color()));
    }

    #[test]
    fn current_rate_boxes_skip_zero_rates() {
        let frame = build(&aggregate(), &MeterConfig::default(), None);
        let texts = texts(&frame.render);
        assert!(texts.contains(&"30K".to_string()));
        assert!(texts.contains(&"29K".to_string()));
        assert!(!texts.iter().any(|text| text == "0"));
    }

    #[test]
    fn stacked_boxes_do_not_overlap() {
        let mut rects = vec![
            ScreenRect::from_origin_size(ScreenPoint::new(0.0, 10.0), (20.0, 14.0)),
            ScreenRect::from_origin_size(ScreenPoint::new(0.0, 12.0), (20.0, 14.0)),
            ScreenRect::from_origin_size(ScreenPoint::new(0.0, 20.0), (20.0, 14.0)),
        ];
        stack_rects(&mut rects);
        assert_eq!(rects[0].min.y, 10.0);
        assert_eq!(rects[1].min.y, 24.0);
        assert_eq!(rects[2].min.y, 38.0);
    }

    #[test]
    fn hover_shows_primary_tooltip_and_dims_others() {
        let config = MeterConfig::default();
        let base = build(&aggregate(), &config, None);
        let plot_rect = base.plot_rect.unwrap();
        let cursor = ScreenPoint::new(plot_rect.max.x - 1.0, plot_rect.min.y + 2.0);
        let frame = build(&aggregate(), &config, Some(cursor));

        let hover = frame.hover.as_ref().unwrap();
        assert_eq!(hover.primary, Skill::Mining);
        let texts = texts(&frame.render);
        assert!(texts.contains(&"Mining 30K/h".to_string()));
        assert!(!texts.iter().any(|text| text.starts_with("Cooking ")));

        let dimmed = Skill::Cooking.color().scale_alpha(0.5);
        assert!(line_colors(&frame.render).contains(&dimmed));
    }

    #[test]
    fn show_all_hovers_labels_every_line() {
        let config = MeterConfig {
            show_all_hovers: true,
            dim_non_hovered: false,
            ..MeterConfig::default()
        };
        let base = build(&aggregate(), &config, None);
        let plot_rect = base.plot_rect.unwrap();
        let cursor = ScreenPoint::new(plot_rect.max.x - 1.0, plot_rect.min.y + 2.0);
        let frame = build(&aggregate(), &config, Some(cursor));
        let texts = texts(&frame.render);
        assert!(texts.contains(&"Mining 30K/h".to_string()));
        assert!(texts.contains(&"Cooking 29K/h".to_string()));
        assert!(texts.contains(&"Fishing 0/h".to_string()));
        assert!(!line_colors(&frame.render).contains(&Skill::Cooking.color().scale_alpha(0.5)));
    }

    #[test]
    fn performance_overlay_is_optional() {
        let frame = build(&aggregate(), &MeterConfig::default(), None);
        assert!(!texts(&frame.render).iter().any(|text| text.starts_with("cache:")));
        let config = MeterConfig {
            show_performance: true,
            ..MeterConfig::default()
        };
        let frame = build(&aggregate(), &config, None);
        assert!(texts(&frame.render).iter().any(|text| text.starts_with("cache:")));
    }

    #[test]
    fn pause_markers_inside_span_are_drawn() {
        let aggregate = aggregate();
        let config = MeterConfig::default();
        let pauses = BTreeSet::from([120, 900]);
        let none = BTreeSet::new();
        let input = ChartInput {
            aggregate: &aggregate,
            pause_times: &pauses,
            logout_times: &none,
            config: &config,
            cursor: None,
        };
        let frame = build_chart(&input, bounds(), &FixedWidth);
        let theme = Theme::preset(config.theme);
        let pause_segments = frame
            .render
            .commands()
            .iter()
            .find_map(|command| match command {
                RenderCommand::LineSegments { segments, style } if style.color == theme.pause_marker => {
                    Some(segments.len())
                }
                _ => None,
            });
        assert_eq!(pause_segments, Some(1));
    }
}
