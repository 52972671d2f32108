//! Ingestion-side command channel for feeding samples into a registry.
//!
//! The parser/ingestion thread holds a cloneable [`SampleSink`] and sends
//! commands; the render side drains them into its [`ChannelRegistry`] between
//! ticks. Send failures (receiver dropped) are ignored on the sink side so an
//! ingestion thread can outlive the UI without special handling.

use std::sync::mpsc::{Receiver, Sender, TryRecvError, channel};

use tracing::warn;

use crate::api::ChannelRegistry;
use crate::core::{ChannelId, Sample};

/// Commands the ingestion side sends toward the plotting core.
#[derive(Debug, Clone)]
pub enum IngestCommand {
    /// Register a channel with a fresh buffer of the given capacity.
    Register { channel: ChannelId, capacity: usize },
    /// Append a single sample to the given channel.
    Point { channel: ChannelId, sample: Sample },
    /// Append a chunk of samples to the given channel.
    Points {
        channel: ChannelId,
        samples: Vec<Sample>,
    },
    /// Drop all samples for the given channel, keeping its registration.
    Clear { channel: ChannelId },
}

/// Cloneable sender handed to ingestion threads.
#[derive(Debug, Clone)]
pub struct SampleSink {
    tx: Sender<IngestCommand>,
}

impl SampleSink {
    pub fn register(&self, channel: ChannelId, capacity: usize) {
        let _ = self.tx.send(IngestCommand::Register { channel, capacity });
    }

    pub fn point(&self, channel: ChannelId, x: f64, y: f64) {
        let _ = self.tx.send(IngestCommand::Point {
            channel,
            sample: Sample::new(x, y),
        });
    }

    pub fn points(&self, channel: ChannelId, samples: Vec<Sample>) {
        let _ = self.tx.send(IngestCommand::Points { channel, samples });
    }

    pub fn clear(&self, channel: ChannelId) {
        let _ = self.tx.send(IngestCommand::Clear { channel });
    }
}

/// Receiving half of the ingestion channel.
#[derive(Debug)]
pub struct SampleDrain {
    rx: Receiver<IngestCommand>,
}

/// Creates a connected sink/drain pair.
#[must_use]
pub fn ingest_channel() -> (SampleSink, SampleDrain) {
    let (tx, rx) = channel();
    (SampleSink { tx }, SampleDrain { rx })
}

impl SampleDrain {
    /// Applies every pending command to `registry` and returns how many were
    /// applied.
    ///
    /// Commands against unknown channels are logged and skipped; one bad
    /// command never stalls the rest of the queue.
    pub fn drain_into(&self, registry: &ChannelRegistry) -> usize {
        let mut applied = 0;
        loop {
            let command = match self.rx.try_recv() {
                Ok(command) => command,
                Err(TryRecvError::Empty | TryRecvError::Disconnected) => break,
            };

            let result = match command {
                IngestCommand::Register { channel, capacity } => {
                    registry.register(channel, capacity).map(|_| ())
                }
                IngestCommand::Point { channel, sample } => registry.append(channel, sample),
                IngestCommand::Points { channel, samples } => {
                    registry.append_many(channel, &samples)
                }
                IngestCommand::Clear { channel } => registry.clear(channel),
            };

            match result {
                Ok(()) => applied += 1,
                Err(err) => warn!(error = %err, "skipping ingest command"),
            }
        }
        applied
    }
}
