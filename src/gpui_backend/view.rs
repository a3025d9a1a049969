use std::sync::{Arc, PoisonError, RwLock};

use gpui::prelude::*;
use gpui::{Bounds, MouseMoveEvent, Pixels, Point, ScrollWheelEvent, Window, canvas, div, px};

use crate::chart::{ChartInput, build_chart};
use crate::config::MeterConfig;
use crate::geom::{ScreenPoint, ScreenRect};
use crate::render::RenderList;
use crate::tracker::SharedTracker;

use super::paint::paint_frame;
use super::state::MeterUiState;
use super::text::GpuiTextMeasurer;

const SCROLL_LINE_HEIGHT: f32 = 16.0;

/// A GPUI view that charts a [`SharedTracker`].
///
/// The tracker is aggregated during prepaint, only on refresh ticks, and the
/// resulting chart is painted on a canvas. Hovering shows rate tooltips and
/// Shift+scroll changes the visible span when scroll zoom is enabled.
#[derive(Clone)]
pub struct GpuiMeterView {
    tracker: SharedTracker,
    state: Arc<RwLock<MeterUiState>>,
    config: MeterConfig,
}

impl GpuiMeterView {
    /// Create a view over `tracker` with the default [`MeterConfig`].
    pub fn new(tracker: SharedTracker) -> Self {
        Self::with_config(tracker, MeterConfig::default())
    }

    /// Create a view with a custom configuration.
    pub fn with_config(tracker: SharedTracker, config: MeterConfig) -> Self {
        Self {
            tracker,
            state: Arc::new(RwLock::new(MeterUiState::default())),
            config,
        }
    }

    /// Handle for feeding observations from host callbacks.
    pub fn tracker(&self) -> SharedTracker {
        self.tracker.clone()
    }

    /// Current configuration, including any span changed by scroll zoom.
    pub fn config(&self) -> &MeterConfig {
        &self.config
    }

    /// Replace the configuration and repaint.
    pub fn set_config(&mut self, config: MeterConfig, cx: &mut Context<Self>) {
        self.config = config;
        cx.notify();
    }

    fn on_mouse_move(&mut self, ev: &MouseMoveEvent, cx: &mut Context<Self>) {
        let pos = screen_point(ev.position);
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        let hover = state
            .plot_rect
            .filter(|rect| rect.contains(pos))
            .map(|_| pos);
        if hover != state.hover {
            state.hover = hover;
            cx.notify();
        }
    }

    fn on_scroll(&mut self, ev: &ScrollWheelEvent, cx: &mut Context<Self>) {
        if !self.config.scroll_zoom || !ev.modifiers.shift {
            return;
        }
        let delta = ev.delta.pixel_delta(px(SCROLL_LINE_HEIGHT));
        let dy = f32::from(delta.y);
        if dy.abs() < 0.01 {
            return;
        }
        // scrolling down widens the span
        let steps = if dy < 0.0 { 1 } else { -1 };
        self.config.zoom(steps);
        tracing::debug!(span_seconds = self.config.span_seconds, "span zoomed");
        cx.notify();
    }
}

impl Render for GpuiMeterView {
    fn render(&mut self, _window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        let tracker = self.tracker.clone();
        let state = Arc::clone(&self.state);
        let config = self.config.clone();
        let min_height = px(config.chart_height as f32);

        div()
            .size_full()
            .min_h(min_height)
            .child(
                canvas(
                    move |bounds, window, _| {
                        let mut state = state.write().unwrap_or_else(PoisonError::into_inner);
                        build_frame(&tracker, &mut state, &config, bounds, window)
                    },
                    move |_, render, window, cx| {
                        paint_frame(&render, window, cx);
                    },
                )
                .size_full(),
            )
            .on_mouse_move(cx.listener(|this, ev, _, cx| {
                this.on_mouse_move(ev, cx);
            }))
            .on_scroll_wheel(cx.listener(|this, ev, _, cx| {
                this.on_scroll(ev, cx);
            }))
    }
}

fn build_frame(
    tracker: &SharedTracker,
    state: &mut MeterUiState,
    config: &MeterConfig,
    bounds: Bounds<Pixels>,
    window: &Window,
) -> RenderList {
    let sampling = config.sampling();
    let (aggregate, pause_times, logout_times) = tracker.write(|tracker| {
        let aggregate = state.refresh(tracker, &sampling).clone();
        (
            aggregate,
            tracker.pause_times().clone(),
            tracker.logout_times().clone(),
        )
    });

    let input = ChartInput {
        aggregate: &aggregate,
        pause_times: &pause_times,
        logout_times: &logout_times,
        config,
        cursor: state.hover,
    };
    let measurer = GpuiTextMeasurer::new(window);
    let frame = build_chart(&input, screen_rect(bounds), &measurer);
    state.plot_rect = frame.plot_rect;
    frame.render
}

fn screen_point(point: Point<Pixels>) -> ScreenPoint {
    ScreenPoint::new(f32::from(point.x), f32::from(point.y))
}

fn screen_rect(bounds: Bounds<Pixels>) -> ScreenRect {
    let origin = screen_point(bounds.origin);
    ScreenRect::from_origin_size(
        origin,
        (f32::from(bounds.size.width), f32::from(bounds.size.height)),
    )
}
