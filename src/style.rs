//! Color presets for the chart.

use serde::{Deserialize, Serialize};

use crate::render::Color;

/// Named color preset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThemePreset {
    /// Translucent dark overlay.
    #[default]
    RuneLite,
    /// Like [`ThemePreset::RuneLite`] without an overlay background.
    Transparent,
    /// Opaque parchment look with bordered boxes.
    OldSchool,
}

/// Visual theme for the chart.
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    /// Chart area fill.
    pub chart_background: Color,
    /// Chart area outline, if any.
    pub chart_border: Option<Color>,
    /// Fill behind the whole widget, if the theme overrides the host's.
    pub overlay_background: Option<Color>,
    /// Axis label color.
    pub axis_label: Color,
    /// Draw a drop shadow under axis labels.
    pub axis_label_shadow: bool,
    /// Vertical (time) marker color.
    pub vertical_marker: Color,
    /// Horizontal (rate) marker color.
    pub horizontal_marker: Color,
    /// Draw a drop shadow under plotted lines.
    pub plot_shadow: bool,
    /// Pause marker color.
    pub pause_marker: Color,
    /// Logout marker color.
    pub logout_marker: Color,
    /// Tooltip outline, if any.
    pub tooltip_border: Option<Color>,
    /// Tooltip fill.
    pub tooltip_background: Color,
    /// Tooltip text color; `None` uses the skill color.
    pub tooltip_text: Option<Color>,
    /// Draw a drop shadow under tooltip text.
    pub tooltip_text_shadow: bool,
    /// Current rate box outline, if any.
    pub rate_border: Option<Color>,
    /// Current rate box fill.
    pub rate_background: Color,
    /// Current rate text color; `None` uses the skill color.
    pub rate_text: Option<Color>,
}

impl Theme {
    /// Build the theme for a preset.
    pub fn preset(preset: ThemePreset) -> Self {
        match preset {
            ThemePreset::RuneLite => Self::runelite(),
            ThemePreset::Transparent => Self {
                overlay_background: Some(Color::rgba8(0, 0, 0, 0)),
                ..Self::runelite()
            },
            ThemePreset::OldSchool => Self {
                chart_background: Color::rgba8(192, 176, 141, 255),
                chart_border: Some(Color::rgba8(45, 42, 35, 255)),
                overlay_background: Some(Color::rgba8(72, 63, 53, 255)),
                axis_label: Color::rgba8(253, 151, 32, 255),
                axis_label_shadow: true,
                vertical_marker: Color::rgba8(0, 0, 0, 64),
                horizontal_marker: Color::rgba8(0, 0, 0, 32),
                plot_shadow: false,
                pause_marker: Color::rgba8(45, 42, 35, 160),
                logout_marker: Color::rgba8(140, 30, 20, 160),
                tooltip_border: Some(Color::BLACK),
                tooltip_background: Color::rgba8(253, 253, 160, 255),
                tooltip_text: Some(Color::BLACK),
                tooltip_text_shadow: false,
                rate_border: Some(Color::rgba8(92, 87, 72, 255)),
                rate_background: Color::rgba8(40, 37, 31, 255),
                rate_text: Some(Color::rgba8(255, 255, 0, 255)),
            },
        }
    }

    fn runelite() -> Self {
        Self {
            chart_background: Color::rgba8(0, 0, 0, 32),
            chart_border: None,
            overlay_background: None,
            axis_label: Color::rgba8(255, 255, 255, 128),
            axis_label_shadow: false,
            vertical_marker: Color::rgba8(255, 255, 255, 32),
            horizontal_marker: Color::rgba8(0, 0, 0, 32),
            plot_shadow: true,
            pause_marker: Color::rgba8(255, 255, 0, 64),
            logout_marker: Color::rgba8(255, 0, 0, 64),
            tooltip_border: None,
            tooltip_background: Color::rgba8(0, 0, 0, 64),
            tooltip_text: None,
            tooltip_text_shadow: true,
            rate_border: None,
            rate_background: Color::rgba8(0, 0, 0, 64),
            rate_text: None,
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::preset(ThemePreset::default())
    }
}
