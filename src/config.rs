//! Meter configuration and per-pass sampling snapshots.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::datasource::RateMode;
use crate::skill::Skill;
use crate::style::ThemePreset;
use crate::units::{Tick, seconds_to_ticks};

/// Shortest span reachable through scroll zoom, in seconds.
pub const MIN_ZOOM_SPAN_SECONDS: u64 = 10;
/// Longest window, resolution or span accepted, in seconds (one week).
pub const MAX_INTERVAL_SECONDS: u64 = 7 * 24 * 60 * 60;

const ZOOM_STEP: f64 = 1.2;

/// Errors raised while loading a configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The document is not valid configuration JSON.
    #[error("invalid configuration: {0}")]
    Parse(#[from] serde_json::Error),
    /// A duration field is larger than [`MAX_INTERVAL_SECONDS`].
    #[error("{field} of {value}s exceeds the maximum of {max}s", max = MAX_INTERVAL_SECONDS)]
    OutOfRange {
        /// Offending field name.
        field: &'static str,
        /// Rejected value in seconds.
        value: u64,
    },
}

/// Host-facing configuration for the meter.
///
/// Every field has a default, so partial documents load cleanly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MeterConfig {
    /// Rate aggregation mode.
    pub tracking_mode: RateMode,
    /// Sliding window length in seconds.
    pub window_seconds: u64,
    /// Spacing between sampled points in seconds.
    pub resolution_seconds: u64,
    /// Visible span in seconds.
    pub span_seconds: u64,
    /// Memoize computed rates.
    pub use_cache: bool,
    /// Skills to plot; `None` plots every tracked skill.
    pub enabled_skills: Option<BTreeSet<Skill>>,
    /// Minimum chart height in pixels.
    pub chart_height: u32,
    /// Show time labels under the chart.
    pub show_time_labels: bool,
    /// Show vertical time markers.
    pub show_time_markers: bool,
    /// Show rate labels left of the chart.
    pub show_rate_labels: bool,
    /// Show horizontal rate markers.
    pub show_rate_markers: bool,
    /// Show the latest rate at the end of each line.
    pub show_current_rates: bool,
    /// Stack current rate boxes so they never overlap.
    pub stack_current_rates: bool,
    /// Use the long number format for rates.
    pub long_format_numbers: bool,
    /// Show compute time and cache counters.
    pub show_performance: bool,
    /// Show rate tooltips while hovering.
    pub show_hover_tooltips: bool,
    /// Dim lines other than the hovered one.
    pub dim_non_hovered: bool,
    /// Show a tooltip for every skill instead of only the closest.
    pub show_all_hovers: bool,
    /// Allow Shift+scroll to change the span.
    pub scroll_zoom: bool,
    /// Color preset.
    pub theme: ThemePreset,
}

impl Default for MeterConfig {
    fn default() -> Self {
        Self {
            tracking_mode: RateMode::Cumulative,
            window_seconds: 300,
            resolution_seconds: 3,
            span_seconds: 180,
            use_cache: true,
            enabled_skills: None,
            chart_height: 60,
            show_time_labels: true,
            show_time_markers: true,
            show_rate_labels: true,
            show_rate_markers: true,
            show_current_rates: true,
            stack_current_rates: true,
            long_format_numbers: false,
            show_performance: false,
            show_hover_tooltips: true,
            dim_non_hovered: true,
            show_all_hovers: false,
            scroll_zoom: true,
            theme: ThemePreset::default(),
        }
    }
}

impl MeterConfig {
    /// Parse a persisted configuration document.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that every duration stays within [`MAX_INTERVAL_SECONDS`].
    pub fn validate(&self) -> Result<(), ConfigError> {
        let durations = [
            ("window_seconds", self.window_seconds),
            ("resolution_seconds", self.resolution_seconds),
            ("span_seconds", self.span_seconds),
        ];
        for (field, value) in durations {
            if value > MAX_INTERVAL_SECONDS {
                return Err(ConfigError::OutOfRange { field, value });
            }
        }
        Ok(())
    }

    /// Serialize the configuration for persistence.
    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Snapshot the values that drive an aggregation pass.
    pub fn sampling(&self) -> SamplingConfig {
        SamplingConfig {
            span: seconds_to_ticks(self.span_seconds),
            stride: seconds_to_ticks(self.resolution_seconds).max(1),
            window: seconds_to_ticks(self.window_seconds).max(1),
            mode: self.tracking_mode,
            use_cache: self.use_cache,
            enabled_skills: self.enabled_skills.clone(),
        }
    }

    /// Apply `steps` scroll increments to the span.
    pub fn zoom(&mut self, steps: i32) {
        self.span_seconds = zoom_span(self.span_seconds, steps);
    }
}

/// Scale a span by 1.2 per scroll step, kept within the accepted span range.
pub fn zoom_span(span_seconds: u64, steps: i32) -> u64 {
    let scaled = (span_seconds as f64 * ZOOM_STEP.powi(steps)) as u64;
    scaled.clamp(MIN_ZOOM_SPAN_SECONDS, MAX_INTERVAL_SECONDS)
}

/// Immutable tracking configuration for one aggregation pass, in ticks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SamplingConfig {
    /// Visible span.
    pub span: Tick,
    /// Sampling stride, at least one tick.
    pub stride: Tick,
    /// Sliding window length, at least one tick.
    pub window: Tick,
    /// Aggregation mode.
    pub mode: RateMode,
    /// Whether to memoize rates.
    pub use_cache: bool,
    /// Skills to sample; `None` samples all.
    pub enabled_skills: Option<BTreeSet<Skill>>,
}

impl SamplingConfig {
    /// Whether `skill` should be sampled.
    pub fn is_enabled(&self, skill: Skill) -> bool {
        self.enabled_skills
            .as_ref()
            .is_none_or(|enabled| enabled.contains(&skill))
    }
}

impl Default for SamplingConfig {
    fn default() -> Self {
        MeterConfig::default().sampling()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_documents_use_defaults() {
        let config =
            MeterConfig::from_json(r#"{"tracking_mode":"sliding_window","span_seconds":60}"#)
                .unwrap();
        assert_eq!(config.tracking_mode, RateMode::SlidingWindow);
        assert_eq!(config.span_seconds, 60);
        assert_eq!(config.window_seconds, 300);
        assert!(config.use_cache);
    }

    #[test]
    fn defaults_favor_cumulative_tracking() {
        let config = MeterConfig::default();
        assert_eq!(config.tracking_mode, RateMode::Cumulative);
        assert_eq!(
            (config.window_seconds, config.resolution_seconds, config.span_seconds),
            (300, 3, 180)
        );
        assert!(config.dim_non_hovered && config.scroll_zoom);
        assert!(!config.show_all_hovers);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn malformed_documents_fail() {
        assert!(MeterConfig::from_json("{\"span_seconds\": \"wide\"}").is_err());
    }

    #[test]
    fn oversized_durations_are_rejected() {
        let json = format!(r#"{{"window_seconds":{}}}"#, u64::MAX);
        assert!(matches!(
            MeterConfig::from_json(&json),
            Err(ConfigError::OutOfRange { field: "window_seconds", .. })
        ));
        let json = format!(r#"{{"span_seconds":{}}}"#, MAX_INTERVAL_SECONDS + 1);
        assert!(MeterConfig::from_json(&json).is_err());
        let json = format!(r#"{{"resolution_seconds":{MAX_INTERVAL_SECONDS}}}"#);
        assert!(MeterConfig::from_json(&json).is_ok());
        assert_eq!(zoom_span(MAX_INTERVAL_SECONDS, 3), MAX_INTERVAL_SECONDS);
    }

    #[test]
    fn sampling_converts_to_ticks() {
        let config = MeterConfig {
            span_seconds: 60,
            resolution_seconds: 0,
            window_seconds: 60,
            ..MeterConfig::default()
        };
        let sampling = config.sampling();
        assert_eq!(sampling.span, 100);
        assert_eq!(sampling.stride, 1);
        assert_eq!(sampling.window, 100);
    }

    #[test]
    fn enabled_filter() {
        let mut config = MeterConfig::default();
        assert!(config.sampling().is_enabled(Skill::Hunter));
        config.enabled_skills = Some([Skill::Mining].into_iter().collect());
        let sampling = config.sampling();
        assert!(sampling.is_enabled(Skill::Mining));
        assert!(!sampling.is_enabled(Skill::Hunter));
    }

    #[test]
    fn zoom_scales_and_clamps() {
        assert_eq!(zoom_span(100, 1), 120);
        assert_eq!(zoom_span(120, -1), 100);
        assert_eq!(zoom_span(11, -3), MIN_ZOOM_SPAN_SECONDS);
        let mut config = MeterConfig::default();
        config.zoom(2);
        assert_eq!(config.span_seconds, 259);
    }
}
