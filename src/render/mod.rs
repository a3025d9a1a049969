//! Rendering primitives.
//!
//! These types are backend-agnostic. The chart builder emits a [`RenderList`]
//! and render backends (such as the GPUI backend, or any [`DrawSurface`])
//! replay it.

use crate::geom::{ScreenPoint, ScreenRect};

/// RGBA color in linear space.
///
/// All components are expected to be in the 0.0..=1.0 range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    /// Red channel.
    pub r: f32,
    /// Green channel.
    pub g: f32,
    /// Blue channel.
    pub b: f32,
    /// Alpha channel.
    pub a: f32,
}

impl Color {
    /// Create a new color.
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Create an opaque color from 8-bit channels.
    pub const fn rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::rgba8(r, g, b, 255)
    }

    /// Create a color from 8-bit channels.
    pub const fn rgba8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self::new(
            r as f32 / 255.0,
            g as f32 / 255.0,
            b as f32 / 255.0,
            a as f32 / 255.0,
        )
    }

    /// Same color with a scaled alpha channel.
    pub fn scale_alpha(self, factor: f32) -> Self {
        Self {
            a: (self.a * factor).clamp(0.0, 1.0),
            ..self
        }
    }

    /// Opaque black.
    pub const BLACK: Self = Self::new(0.0, 0.0, 0.0, 1.0);
    /// Opaque white.
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0, 1.0);
    /// Fully transparent.
    pub const TRANSPARENT: Self = Self::new(0.0, 0.0, 0.0, 0.0);
}

/// Line stroke styling.
///
/// The width is expressed in logical pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineStyle {
    /// Stroke color.
    pub color: Color,
    /// Stroke width in pixels.
    pub width: f32,
}

impl LineStyle {
    /// One pixel wide stroke.
    pub fn thin(color: Color) -> Self {
        Self { color, width: 1.0 }
    }
}

impl Default for LineStyle {
    fn default() -> Self {
        Self::thin(Color::BLACK)
    }
}

/// Rectangle styling.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RectStyle {
    /// Fill color.
    pub fill: Color,
    /// Stroke color.
    pub stroke: Color,
    /// Stroke width; zero disables the outline.
    pub stroke_width: f32,
}

impl RectStyle {
    /// Fill without outline.
    pub fn filled(fill: Color) -> Self {
        Self {
            fill,
            stroke: Color::TRANSPARENT,
            stroke_width: 0.0,
        }
    }

    /// Fill with an optional one pixel outline.
    pub fn boxed(fill: Color, border: Option<Color>) -> Self {
        match border {
            Some(stroke) => Self {
                fill,
                stroke,
                stroke_width: 1.0,
            },
            None => Self::filled(fill),
        }
    }
}

/// Text styling.
#[derive(Debug, Clone, PartialEq)]
pub struct TextStyle {
    /// Text color.
    pub color: Color,
    /// Font size in pixels.
    pub size: f32,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            color: Color::BLACK,
            size: 12.0,
        }
    }
}

/// A line segment in screen space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineSegment {
    /// Segment start.
    pub start: ScreenPoint,
    /// Segment end.
    pub end: ScreenPoint,
}

impl LineSegment {
    /// Create a new line segment.
    pub fn new(start: ScreenPoint, end: ScreenPoint) -> Self {
        Self { start, end }
    }

    /// Same segment shifted by one pixel down and right.
    pub fn shadow(self) -> Self {
        Self::new(self.start.offset(1.0, 1.0), self.end.offset(1.0, 1.0))
    }
}

/// Render command list.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderCommand {
    /// Start clipping to a rectangle.
    ClipRect(ScreenRect),
    /// End clipping.
    ClipEnd,
    /// Draw line segments.
    LineSegments {
        /// Segments to draw.
        segments: Vec<LineSegment>,
        /// Styling for the segments.
        style: LineStyle,
    },
    /// Draw a rectangle.
    Rect {
        /// Rectangle bounds.
        rect: ScreenRect,
        /// Rectangle styling.
        style: RectStyle,
    },
    /// Draw text with its top-left corner at `position`.
    Text {
        /// Text position.
        position: ScreenPoint,
        /// Text content.
        text: String,
        /// Text styling.
        style: TextStyle,
    },
}

/// A minimal immediate-mode drawing target.
pub trait DrawSurface {
    /// Stroke a straight line.
    fn draw_line(&mut self, start: ScreenPoint, end: ScreenPoint, style: LineStyle);
    /// Draw text with its top-left corner at `position`.
    fn draw_text(&mut self, position: ScreenPoint, text: &str, style: &TextStyle);
    /// Fill a rectangle.
    fn fill_rect(&mut self, rect: ScreenRect, color: Color);
    /// Restrict drawing to `rect` until the matching [`DrawSurface::pop_clip`].
    fn push_clip(&mut self, _rect: ScreenRect) {}
    /// Remove the innermost clip.
    fn pop_clip(&mut self) {}
}

/// Aggregated render commands.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct RenderList {
    commands: Vec<RenderCommand>,
}

impl RenderList {
    /// Create an empty render list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Push a render command.
    pub fn push(&mut self, command: RenderCommand) {
        self.commands.push(command);
    }

    /// Push a text command, preceded by a one pixel black shadow if requested.
    pub fn text(&mut self, position: ScreenPoint, text: &str, style: TextStyle, shadow: bool) {
        if shadow {
            self.push(RenderCommand::Text {
                position: position.offset(1.0, 1.0),
                text: text.to_string(),
                style: TextStyle {
                    color: Color::BLACK.scale_alpha(style.color.a),
                    size: style.size,
                },
            });
        }
        self.push(RenderCommand::Text {
            position,
            text: text.to_string(),
            style,
        });
    }

    /// Access all render commands.
    pub fn commands(&self) -> &[RenderCommand] {
        &self.commands
    }

    /// Check whether no commands were recorded.
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Draw every command onto `surface`, in order.
    pub fn replay(&self, surface: &mut dyn DrawSurface) {
        for command in &self.commands {
            match command {
                RenderCommand::ClipRect(rect) => surface.push_clip(*rect),
                RenderCommand::ClipEnd => surface.pop_clip(),
                RenderCommand::LineSegments { segments, style } => {
                    for segment in segments {
                        surface.draw_line(segment.start, segment.end, *style);
                    }
                }
                RenderCommand::Rect { rect, style } => {
                    surface.fill_rect(*rect, style.fill);
                    if style.stroke_width > 0.0 {
                        let stroke = LineStyle {
                            color: style.stroke,
                            width: style.stroke_width,
                        };
                        let top_right = ScreenPoint::new(rect.max.x, rect.min.y);
                        let bottom_left = ScreenPoint::new(rect.min.x, rect.max.y);
                        surface.draw_line(rect.min, top_right, stroke);
                        surface.draw_line(top_right, rect.max, stroke);
                        surface.draw_line(rect.max, bottom_left, stroke);
                        surface.draw_line(bottom_left, rect.min, stroke);
                    }
                }
                RenderCommand::Text {
                    position,
                    text,
                    style,
                } => surface.draw_text(*position, text, style),
            }
        }
    }
}
