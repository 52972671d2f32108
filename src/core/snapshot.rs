use indexmap::IndexMap;

use crate::core::{ChannelId, ScrollingBuffer};

/// Frozen copy of the buffers backing a paused plot.
///
/// Captured on the live→paused transition and replaced on refresh; live
/// appends never reach it. While a session is paused, window and autoscale
/// computation read these copies instead of the live registry.
#[derive(Debug, Clone, Default)]
pub struct PauseSnapshot {
    channels: IndexMap<ChannelId, ScrollingBuffer>,
    external_axis: Option<(ChannelId, ScrollingBuffer)>,
}

impl PauseSnapshot {
    #[must_use]
    pub(crate) fn new(
        channels: IndexMap<ChannelId, ScrollingBuffer>,
        external_axis: Option<(ChannelId, ScrollingBuffer)>,
    ) -> Self {
        Self {
            channels,
            external_axis,
        }
    }

    #[must_use]
    pub fn channel(&self, channel: ChannelId) -> Option<&ScrollingBuffer> {
        self.channels.get(&channel)
    }

    /// The frozen external-axis buffer, when one was configured at capture.
    #[must_use]
    pub fn external_axis(&self) -> Option<(ChannelId, &ScrollingBuffer)> {
        self.external_axis
            .as_ref()
            .map(|(channel, buffer)| (*channel, buffer))
    }

    #[must_use]
    pub fn channel_count(&self) -> usize {
        self.channels.len()
    }
}
