use indexmap::IndexMap;
use tracing::{debug, warn};

use crate::core::{
    AxisBounds, AxisMode, AxisSlot, ChannelId, PauseSnapshot, SlottedSeries, ViewWindow,
    axis_bounds, external_axis_window, time_window,
};
use crate::error::{PlotError, PlotResult};

use super::registry::DataSource;

/// Trailing time window applied to new sessions, in x units (seconds for
/// time-driven plots).
pub const DEFAULT_TIME_FRAME: f64 = 10.0;

/// Inputs the host supplies for one compute tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickContext {
    /// Current reference time on the session's x scale.
    pub now: f64,
}

impl TickContext {
    #[must_use]
    pub fn new(now: f64) -> Self {
        Self { now }
    }
}

/// One plot's channel assignments, axis mode, and pause state.
///
/// The session is the per-tick entry point for hosts: ingestion fills a
/// [`super::ChannelRegistry`] from its own thread, and each render tick calls
/// [`PlotSession::compute_view`] to get the visible x window and per-slot y
/// bounds. All state that used to be ambient in serial-plotter front-ends
/// (pause flag, axis mode, slot mapping) lives here explicitly.
#[derive(Debug, Clone)]
pub struct PlotSession {
    name: String,
    channels: IndexMap<ChannelId, AxisSlot>,
    axis_mode: AxisMode,
    time_frame: f64,
    autoscale: bool,
    last_window: (f64, f64),
    snapshot: Option<PauseSnapshot>,
}

impl PlotSession {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            channels: IndexMap::new(),
            axis_mode: AxisMode::TimeWindow,
            time_frame: DEFAULT_TIME_FRAME,
            autoscale: true,
            last_window: (0.0, 1.0),
            snapshot: None,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Assigns `channel` to the given y-axis slot.
    ///
    /// Idempotent: re-adding a member channel only updates its slot and keeps
    /// its position in the assignment order.
    pub fn add_channel(&mut self, channel: ChannelId, slot: AxisSlot) {
        let previous = self.channels.insert(channel, slot);
        debug!(plot = %self.name, %channel, ?slot, updated = previous.is_some(), "channel assigned");
    }

    /// Removes `channel` from membership and the slot mapping together.
    ///
    /// Returns whether the channel was a member.
    pub fn remove_channel(&mut self, channel: ChannelId) -> bool {
        let removed = self.channels.shift_remove(&channel).is_some();
        if removed {
            debug!(plot = %self.name, %channel, "channel removed");
        }
        removed
    }

    #[must_use]
    pub fn has_channel(&self, channel: ChannelId) -> bool {
        self.channels.contains_key(&channel)
    }

    #[must_use]
    pub fn channel_slot(&self, channel: ChannelId) -> Option<AxisSlot> {
        self.channels.get(&channel).copied()
    }

    /// Member channels with their slots, in assignment order.
    pub fn channels(&self) -> impl Iterator<Item = (ChannelId, AxisSlot)> + '_ {
        self.channels.iter().map(|(channel, slot)| (*channel, *slot))
    }

    #[must_use]
    pub fn channel_count(&self) -> usize {
        self.channels.len()
    }

    #[must_use]
    pub fn axis_mode(&self) -> AxisMode {
        self.axis_mode
    }

    /// Drives the x axis from `channel`'s values, replacing any previous
    /// external axis.
    pub fn set_external_axis(&mut self, channel: ChannelId, realtime: bool) {
        self.axis_mode = AxisMode::ExternalAxis { channel, realtime };
        debug!(plot = %self.name, %channel, realtime, "external x axis set");
    }

    /// Returns the x axis to the scrolling time window.
    pub fn clear_external_axis(&mut self) {
        self.axis_mode = AxisMode::TimeWindow;
        debug!(plot = %self.name, "external x axis cleared");
    }

    /// Toggles realtime tracking of an external axis. No effect on a time
    /// window.
    pub fn set_axis_realtime(&mut self, realtime: bool) {
        if let AxisMode::ExternalAxis { channel, .. } = self.axis_mode {
            self.axis_mode = AxisMode::ExternalAxis { channel, realtime };
        }
    }

    #[must_use]
    pub fn autoscale(&self) -> bool {
        self.autoscale
    }

    pub fn set_autoscale(&mut self, autoscale: bool) {
        self.autoscale = autoscale;
    }

    #[must_use]
    pub fn time_frame(&self) -> f64 {
        self.time_frame
    }

    pub fn set_time_frame(&mut self, time_frame: f64) -> PlotResult<()> {
        if !time_frame.is_finite() || time_frame <= 0.0 {
            return Err(PlotError::InvalidData(
                "time frame must be finite and > 0".to_owned(),
            ));
        }
        self.time_frame = time_frame;
        Ok(())
    }

    /// Applies a mouse-wheel delta to the x window.
    ///
    /// On a non-realtime external axis the retained window shifts by
    /// `delta / 20` x units; otherwise the time frame scales by
    /// `1 + delta / 100`.
    pub fn apply_wheel(&mut self, delta: f64) {
        match self.axis_mode {
            AxisMode::ExternalAxis {
                realtime: false, ..
            } => {
                let shift = delta / 20.0;
                self.last_window.0 += shift;
                self.last_window.1 += shift;
            }
            _ => {
                self.time_frame *= 1.0 + delta / 100.0;
            }
        }
    }

    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.snapshot.is_some()
    }

    #[must_use]
    pub fn snapshot(&self) -> Option<&PauseSnapshot> {
        self.snapshot.as_ref()
    }

    /// Freezes the current buffer contents for inspection.
    ///
    /// Until [`PlotSession::resume`], every tick reads the captured copies;
    /// samples arriving in the live buffers do not move the plot.
    pub fn pause(&mut self, source: &dyn DataSource) {
        self.snapshot = Some(self.capture_snapshot(source));
        debug!(plot = %self.name, "paused");
    }

    /// Discards the snapshot and returns to the live buffers.
    pub fn resume(&mut self) {
        if self.snapshot.take().is_some() {
            debug!(plot = %self.name, "resumed");
        }
    }

    /// Re-captures the snapshot while staying paused, e.g. after an
    /// assignment change. No effect on a live session.
    pub fn refresh_snapshot(&mut self, source: &dyn DataSource) {
        if self.is_paused() {
            self.snapshot = Some(self.capture_snapshot(source));
            debug!(plot = %self.name, "snapshot refreshed");
        }
    }

    /// Computes the visible x window and per-slot y bounds for one tick.
    ///
    /// Channels without a resolvable data source are skipped. Y bounds are
    /// only populated while autoscale is on; a slot nobody contributed to
    /// stays unpopulated and the caller must not apply a limit for it.
    pub fn compute_view(
        &mut self,
        source: &dyn DataSource,
        tick: TickContext,
    ) -> PlotResult<(ViewWindow, [AxisBounds; 2])> {
        let mut columns: Vec<(ChannelId, Vec<f64>, Vec<f64>, AxisSlot)> =
            Vec::with_capacity(self.channels.len());
        for (channel, slot) in &self.channels {
            match self.channel_columns(source, *channel) {
                Some((xs, ys)) => columns.push((*channel, xs, ys, *slot)),
                None => {
                    debug!(plot = %self.name, %channel, "channel has no data; skipping")
                }
            }
        }

        let window = match self.axis_mode {
            AxisMode::TimeWindow => {
                let window = time_window(tick.now, self.time_frame);
                self.last_window = window.bounds();
                window
            }
            AxisMode::ExternalAxis { channel, realtime } => {
                let axis_values = self.external_axis_values(source, channel);
                let window = external_axis_window(
                    &axis_values,
                    realtime,
                    self.autoscale,
                    self.time_frame,
                    self.last_window,
                );
                if realtime || self.autoscale {
                    self.last_window = window.bounds();
                }
                window
            }
        };

        if !self.autoscale {
            return Ok((window, [AxisBounds::default(); AxisSlot::COUNT]));
        }

        let series: Vec<SlottedSeries<'_>> = columns
            .iter()
            .map(|(channel, xs, ys, slot)| SlottedSeries {
                channel: *channel,
                xs: xs.as_slice(),
                ys: ys.as_slice(),
                slot: *slot,
            })
            .collect();
        let bounds = axis_bounds(&series, &window)?;

        if !bounds[AxisSlot::Primary.index()].populated && !self.channels.is_empty() {
            warn!(plot = %self.name, "y-axis slot 0 has no visible samples");
        }

        Ok((window, bounds))
    }

    fn channel_columns(
        &self,
        source: &dyn DataSource,
        channel: ChannelId,
    ) -> Option<(Vec<f64>, Vec<f64>)> {
        if let Some(snapshot) = &self.snapshot {
            return snapshot
                .channel(channel)
                .map(|buffer| (buffer.xs(), buffer.ys()));
        }
        source.resolve(channel).map(|handle| {
            let buffer = handle.read();
            (buffer.xs(), buffer.ys())
        })
    }

    /// The external channel's value column, which doubles as the shared x
    /// coordinates of every plotted channel.
    fn external_axis_values(&self, source: &dyn DataSource, channel: ChannelId) -> Vec<f64> {
        if let Some(snapshot) = &self.snapshot {
            return snapshot
                .external_axis()
                .filter(|(frozen, _)| *frozen == channel)
                .map(|(_, buffer)| buffer.ys())
                .unwrap_or_default();
        }
        source
            .resolve(channel)
            .map(|handle| handle.read().ys())
            .unwrap_or_default()
    }

    fn capture_snapshot(&self, source: &dyn DataSource) -> PauseSnapshot {
        let mut channels = IndexMap::with_capacity(self.channels.len());
        for channel in self.channels.keys() {
            if let Some(handle) = source.resolve(*channel) {
                channels.insert(*channel, handle.read().clone());
            }
        }
        let external_axis = self.axis_mode.external_channel().and_then(|channel| {
            source
                .resolve(channel)
                .map(|handle| (channel, handle.read().clone()))
        });
        PauseSnapshot::new(channels, external_axis)
    }
}
