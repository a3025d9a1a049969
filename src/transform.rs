//! Coordinate transforms between data and screen space.

use crate::geom::{ScreenPoint, ScreenRect};
use crate::units::Tick;

/// Data-space extent of the chart for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ChartScale {
    /// Largest sampled rate; the top of the value axis.
    pub height_scale: i64,
    /// First visible tick.
    pub width_min: Tick,
    /// Last visible tick.
    pub width_max: Tick,
}

impl ChartScale {
    /// Create a scale.
    pub fn new(height_scale: i64, width_min: Tick, width_max: Tick) -> Self {
        Self {
            height_scale,
            width_min,
            width_max,
        }
    }

    /// Visible tick span.
    pub fn span(&self) -> Tick {
        self.width_max.saturating_sub(self.width_min)
    }
}

/// Linear mapping between ticks/rates and pixels inside a chart rectangle.
///
/// The value axis is flipped so larger rates sit higher. With top headroom
/// enabled the value axis loses `headroom` pixels at the top so the peak
/// value's label is not clipped.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    scale: ChartScale,
    screen: ScreenRect,
    headroom: f32,
}

impl Transform {
    /// Create a transform for `scale` drawn into `screen`.
    ///
    /// `headroom` is usually half the text line height.
    pub fn new(scale: ChartScale, screen: ScreenRect, headroom: f32) -> Option<Self> {
        if !screen.is_valid() {
            return None;
        }
        Some(Self {
            scale,
            screen,
            headroom: headroom.clamp(0.0, screen.height()),
        })
    }

    /// Access the data scale.
    pub fn scale(&self) -> ChartScale {
        self.scale
    }

    /// Access the screen rectangle.
    pub fn screen(&self) -> ScreenRect {
        self.screen
    }

    /// Map a tick to a screen X coordinate.
    pub fn map_time(&self, time: f64) -> f32 {
        let span = self.scale.span();
        if span == 0 {
            return self.screen.min.x;
        }
        let offset = (time - self.scale.width_min as f64) * self.screen.width() as f64 / span as f64;
        self.screen.min.x + offset as f32
    }

    /// Map a screen X coordinate back to a (fractional) tick.
    pub fn unmap_time(&self, x: f32) -> f64 {
        let span = self.scale.span();
        let width = self.screen.width() as f64;
        self.scale.width_min as f64 + (x - self.screen.min.x) as f64 * span as f64 / width
    }

    /// Map a rate to a screen Y coordinate.
    pub fn map_rate(&self, rate: f64, reserve_top: bool) -> f32 {
        let (height, top) = self.value_extent(reserve_top);
        let scale = self.scale.height_scale.max(1) as f64;
        let offset = height as f64 - rate * height as f64 / scale;
        top + offset as f32
    }

    /// Map a screen Y coordinate back to a rate.
    pub fn unmap_rate(&self, y: f32, reserve_top: bool) -> f64 {
        let (height, top) = self.value_extent(reserve_top);
        let scale = self.scale.height_scale.max(1) as f64;
        (height as f64 - (y - top) as f64) * scale / height.max(f32::EPSILON) as f64
    }

    /// Map a sample to a screen point, reserving top headroom.
    pub fn map_point(&self, time: Tick, rate: i64) -> ScreenPoint {
        ScreenPoint::new(self.map_time(time as f64), self.map_rate(rate as f64, true))
    }

    fn value_extent(&self, reserve_top: bool) -> (f32, f32) {
        if reserve_top {
            (self.screen.height() - self.headroom, self.screen.min.y + self.headroom)
        } else {
            (self.screen.height(), self.screen.min.y)
        }
    }
}
