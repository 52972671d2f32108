use thiserror::Error;

use crate::core::ChannelId;

pub type PlotResult<T> = Result<T, PlotError>;

#[derive(Debug, Error)]
pub enum PlotError {
    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("channel {channel} not found in data registry")]
    ChannelNotFound { channel: ChannelId },

    #[error(
        "channel {channel} holds {channel_len} samples but the external axis holds {axis_len}"
    )]
    AxisMisaligned {
        channel: ChannelId,
        channel_len: usize,
        axis_len: usize,
    },
}
