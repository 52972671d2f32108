pub mod autoscale;
pub mod buffer;
pub mod snapshot;
pub mod types;
pub mod window;

pub use autoscale::{SlottedSeries, axis_bounds};
pub use buffer::ScrollingBuffer;
pub use snapshot::PauseSnapshot;
pub use types::{AxisBounds, AxisSlot, ChannelId, Sample, ViewWindow};
pub use window::{AxisMode, external_axis_window, time_window};
