//! streamplot-rs: scrolling time-series buffers and windowed-view computation
//! for live plotting front-ends.
//!
//! The crate owns the part of a live plotter that has real invariants:
//! bounded per-channel ring buffers, visible-window selection (time-driven or
//! driven by another channel's values), autoscale bounds on two independent
//! y axes, and frozen pause snapshots. Rendering, input handling, and the
//! transport producing samples are the host's problem.

pub mod api;
pub mod core;
pub mod error;
pub mod sink;
pub mod telemetry;

pub use api::{ChannelRegistry, DataSource, PlotSession, SessionConfig, TickContext};
pub use error::{PlotError, PlotResult};
