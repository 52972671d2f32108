use std::sync::Arc;

use indexmap::IndexMap;
use parking_lot::RwLock;
use tracing::{debug, trace};

use crate::core::{ChannelId, Sample, ScrollingBuffer};
use crate::error::{PlotError, PlotResult};

/// Shared handle to one channel's live buffer.
///
/// The ingestion side appends through the write lock while the render tick
/// takes short read locks to copy out the columns it needs, so a tick always
/// sees a self-consistent buffer state.
pub type BufferHandle = Arc<RwLock<ScrollingBuffer>>;

/// Resolves channel identifiers to live buffers.
///
/// Sessions consume this seam instead of a concrete registry so paused and
/// test data sources can stand in for live ingestion.
pub trait DataSource {
    fn resolve(&self, channel: ChannelId) -> Option<BufferHandle>;
}

/// Registry of every channel observed by ingestion.
///
/// Buffers are created when a channel is first registered and live until the
/// registry drops. Unknown channels resolve to `None`; sessions skip them
/// silently since assignments and data sources have independent lifecycles.
#[derive(Debug, Default)]
pub struct ChannelRegistry {
    buffers: RwLock<IndexMap<ChannelId, BufferHandle>>,
}

impl ChannelRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `channel` with a fresh buffer of the given capacity.
    ///
    /// Idempotent: re-registering returns the existing handle and leaves its
    /// contents and capacity untouched.
    pub fn register(&self, channel: ChannelId, capacity: usize) -> PlotResult<BufferHandle> {
        let mut buffers = self.buffers.write();
        if let Some(existing) = buffers.get(&channel) {
            debug!(%channel, "channel already registered");
            return Ok(Arc::clone(existing));
        }

        let handle = Arc::new(RwLock::new(ScrollingBuffer::new(capacity)?));
        buffers.insert(channel, Arc::clone(&handle));
        debug!(%channel, capacity, "registered channel");
        Ok(handle)
    }

    /// Appends one sample to `channel`.
    pub fn append(&self, channel: ChannelId, sample: Sample) -> PlotResult<()> {
        let handle = self
            .resolve(channel)
            .ok_or(PlotError::ChannelNotFound { channel })?;
        handle.write().append(sample);
        trace!(%channel, x = sample.x, y = sample.y, "appended sample");
        Ok(())
    }

    /// Appends a chunk of samples to `channel` under a single write lock.
    pub fn append_many(&self, channel: ChannelId, samples: &[Sample]) -> PlotResult<()> {
        let handle = self
            .resolve(channel)
            .ok_or(PlotError::ChannelNotFound { channel })?;
        handle.write().append_many(samples.iter().copied());
        trace!(%channel, count = samples.len(), "appended sample chunk");
        Ok(())
    }

    /// Clears all samples of `channel`, keeping the registration.
    pub fn clear(&self, channel: ChannelId) -> PlotResult<()> {
        let handle = self
            .resolve(channel)
            .ok_or(PlotError::ChannelNotFound { channel })?;
        handle.write().clear();
        debug!(%channel, "cleared channel");
        Ok(())
    }

    #[must_use]
    pub fn channel_count(&self) -> usize {
        self.buffers.read().len()
    }

    /// Registered channels in registration order.
    #[must_use]
    pub fn channels(&self) -> Vec<ChannelId> {
        self.buffers.read().keys().copied().collect()
    }
}

impl DataSource for ChannelRegistry {
    fn resolve(&self, channel: ChannelId) -> Option<BufferHandle> {
        self.buffers.read().get(&channel).map(Arc::clone)
    }
}
