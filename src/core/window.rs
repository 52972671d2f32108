use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

use crate::core::{ChannelId, ViewWindow};

/// How the x axis of a plot is driven.
///
/// The two modes are mutually exclusive by construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum AxisMode {
    /// Scrolling time window ending at the current tick time.
    #[default]
    TimeWindow,
    /// Another channel's sample values drive the x axis.
    ///
    /// With `realtime` set, the window trails the most recent value; without
    /// it the window is either autoscaled to the full value range or left
    /// where the user panned it.
    ExternalAxis { channel: ChannelId, realtime: bool },
}

impl AxisMode {
    #[must_use]
    pub fn external_channel(self) -> Option<ChannelId> {
        match self {
            Self::TimeWindow => None,
            Self::ExternalAxis { channel, .. } => Some(channel),
        }
    }
}

/// Window for a plain time axis: the trailing `time_frame` seconds ending at
/// `now`. No mask; inclusion is decided per channel against each sample's own
/// x value.
#[must_use]
pub fn time_window(now: f64, time_frame: f64) -> ViewWindow {
    ViewWindow::new(now - time_frame, now)
}

/// Window and visibility mask for a plot whose x axis is another channel.
///
/// `axis_values` is the external channel's value column in append order.
/// Range selection:
/// - `realtime`: trailing `time_frame` units anchored at the largest value
///   (0.0 anchor when the buffer is empty);
/// - otherwise, with `autoscale`: the full min/max of the values
///   ([0, 1] when empty);
/// - otherwise: `previous` is kept as-is so manual pan/zoom persists.
///
/// The mask has one entry per value, true iff the value lies inside the
/// inclusive range. An empty mask therefore means nothing is visible.
#[must_use]
pub fn external_axis_window(
    axis_values: &[f64],
    realtime: bool,
    autoscale: bool,
    time_frame: f64,
    previous: (f64, f64),
) -> ViewWindow {
    let (x_min, x_max) = if realtime {
        let anchor = max_value(axis_values).unwrap_or(0.0);
        (anchor - time_frame, anchor)
    } else if autoscale {
        match (min_value(axis_values), max_value(axis_values)) {
            (Some(min), Some(max)) => (min, max),
            _ => (0.0, 1.0),
        }
    } else {
        previous
    };

    let mask = axis_values
        .iter()
        .map(|value| *value >= x_min && *value <= x_max)
        .collect();

    ViewWindow {
        x_min,
        x_max,
        mask: Some(mask),
    }
}

fn min_value(values: &[f64]) -> Option<f64> {
    values
        .iter()
        .copied()
        .map(OrderedFloat)
        .min()
        .map(OrderedFloat::into_inner)
}

fn max_value(values: &[f64]) -> Option<f64> {
    values
        .iter()
        .copied()
        .map(OrderedFloat)
        .max()
        .map(OrderedFloat::into_inner)
}
