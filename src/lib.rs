//! ratemeter tracks per-skill progress and charts hourly rates live.
//! The crate turns a sparse stream of cumulative values into sampled rate
//! histories and lays them out as a scrolling, auto-scaling line chart.

#![forbid(unsafe_code)]

pub mod aggregate;
pub mod axis;
pub mod chart;
pub mod config;
pub mod datasource;
pub mod geom;
pub mod hover;
pub mod render;
pub mod skill;
pub mod snapshot;
pub mod style;
pub mod tracker;
pub mod transform;
pub mod units;

#[cfg(feature = "gpui")]
pub mod gpui_backend;

pub use aggregate::{Aggregate, HistorySample, Performance};
pub use axis::{AxisLabel, AxisLayout, TextMeasurer};
pub use chart::{ChartFrame, ChartInput, build_chart};
pub use config::{ConfigError, MeterConfig, SamplingConfig};
pub use datasource::{
    AppendError, CacheStats, EntityLedger, Ledger, ProgressEvent, RateCache, RateKey, RateMode,
    compute_rate,
};
pub use geom::{ScreenPoint, ScreenRect};
pub use hover::{HoverResult, HoverTarget};
pub use render::{
    Color, DrawSurface, LineSegment, LineStyle, RectStyle, RenderCommand, RenderList, TextStyle,
};
pub use skill::Skill;
pub use snapshot::{ImportError, Snapshot};
pub use style::{Theme, ThemePreset};
pub use tracker::{SharedTracker, Tracker};
pub use transform::{ChartScale, Transform};
pub use units::Tick;
