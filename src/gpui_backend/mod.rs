//! GPUI integration for ratemeter.
//!
//! This module provides a GPUI view that aggregates a shared
//! [`Tracker`](crate::tracker::Tracker), paints the resulting chart and
//! handles hover inspection and scroll zoom.

mod paint;
mod state;
mod text;
mod view;

pub use view::GpuiMeterView;
