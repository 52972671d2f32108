use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifier for one data series (channel) known to the registry.
///
/// Channels are small opaque keys assigned by the ingestion side; the core
/// never interprets the numeric value.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct ChannelId(pub u16);

impl fmt::Display for ChannelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ch{}", self.0)
    }
}

/// One of the two independent y axes a channel can be assigned to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum AxisSlot {
    #[default]
    Primary,
    Secondary,
}

impl AxisSlot {
    pub const COUNT: usize = 2;

    #[must_use]
    pub fn index(self) -> usize {
        match self {
            Self::Primary => 0,
            Self::Secondary => 1,
        }
    }

    #[must_use]
    pub fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Self::Primary),
            1 => Some(Self::Secondary),
            _ => None,
        }
    }
}

/// A single (x, y) sample. Immutable once appended.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub x: f64,
    pub y: f64,
}

impl Sample {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Builds a sample whose x coordinate is unix seconds derived from `time`.
    #[must_use]
    pub fn from_datetime(time: DateTime<Utc>, y: f64) -> Self {
        let x = time.timestamp() as f64 + f64::from(time.timestamp_subsec_nanos()) * 1e-9;
        Self { x, y }
    }
}

/// Computed x range for one tick plus the external-axis visibility mask.
///
/// `mask` is only populated when an external channel drives the x axis; one
/// entry per external-buffer sample in append order. An absent mask means the
/// plot runs on its own time axis and inclusion is decided per channel by
/// comparing each sample's own x against the range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewWindow {
    pub x_min: f64,
    pub x_max: f64,
    pub mask: Option<Vec<bool>>,
}

impl ViewWindow {
    #[must_use]
    pub fn new(x_min: f64, x_max: f64) -> Self {
        Self {
            x_min,
            x_max,
            mask: None,
        }
    }

    /// Inclusive range test used for own-axis visibility.
    #[must_use]
    pub fn contains(&self, x: f64) -> bool {
        x >= self.x_min && x <= self.x_max
    }

    #[must_use]
    pub fn span(&self) -> f64 {
        self.x_max - self.x_min
    }

    #[must_use]
    pub fn bounds(&self) -> (f64, f64) {
        (self.x_min, self.x_max)
    }
}

/// Y bounds for one axis slot.
///
/// `populated == false` means no visible sample contributed this tick and the
/// caller must not apply a limit for the slot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisBounds {
    pub min: f64,
    pub max: f64,
    pub populated: bool,
}

impl Default for AxisBounds {
    fn default() -> Self {
        Self {
            min: 0.0,
            max: 1.0,
            populated: false,
        }
    }
}

impl AxisBounds {
    /// Folds one visible y value into the running bounds.
    ///
    /// The first value seeds both ends, so a slot with exactly one visible
    /// sample reports min == max == that value.
    pub fn include(&mut self, y: f64) {
        if !self.populated {
            self.min = y;
            self.max = y;
            self.populated = true;
        } else if y < self.min {
            self.min = y;
        } else if y > self.max {
            self.max = y;
        }
    }

    /// Returns `(min, max)` when at least one sample contributed.
    #[must_use]
    pub fn as_range(self) -> Option<(f64, f64)> {
        self.populated.then_some((self.min, self.max))
    }
}
