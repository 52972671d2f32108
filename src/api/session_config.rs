use serde::{Deserialize, Serialize};

use crate::core::{AxisMode, AxisSlot, ChannelId};
use crate::error::{PlotError, PlotResult};

use super::session::PlotSession;

pub const SESSION_CONFIG_JSON_SCHEMA_V1: u32 = 1;

/// One channel→slot assignment, in assignment order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelAssignment {
    pub channel: ChannelId,
    pub slot: AxisSlot,
}

/// Persistable session configuration.
///
/// Covers everything a host needs to restore a plot's layout: name, window
/// tuning, axis mode, and channel assignments. Sample data is deliberately
/// not part of this contract.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionConfig {
    pub name: String,
    pub time_frame: f64,
    pub autoscale: bool,
    pub axis_mode: AxisMode,
    pub channels: Vec<ChannelAssignment>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct SessionConfigJsonContractV1 {
    schema_version: u32,
    config: SessionConfig,
}

impl SessionConfig {
    pub fn to_json_contract_v1_pretty(&self) -> PlotResult<String> {
        let payload = SessionConfigJsonContractV1 {
            schema_version: SESSION_CONFIG_JSON_SCHEMA_V1,
            config: self.clone(),
        };
        serde_json::to_string_pretty(&payload).map_err(|e| {
            PlotError::InvalidData(format!("failed to serialize session config contract v1: {e}"))
        })
    }

    /// Parses either a bare config or a versioned contract payload.
    pub fn from_json_compat_str(input: &str) -> PlotResult<Self> {
        if let Ok(config) = serde_json::from_str::<SessionConfig>(input) {
            return Ok(config);
        }
        let payload: SessionConfigJsonContractV1 = serde_json::from_str(input).map_err(|e| {
            PlotError::InvalidData(format!("failed to parse session config payload: {e}"))
        })?;
        if payload.schema_version != SESSION_CONFIG_JSON_SCHEMA_V1 {
            return Err(PlotError::InvalidData(format!(
                "unsupported session config schema version: {}",
                payload.schema_version
            )));
        }
        Ok(payload.config)
    }
}

impl PlotSession {
    /// Captures the restorable part of this session's state.
    #[must_use]
    pub fn config(&self) -> SessionConfig {
        SessionConfig {
            name: self.name().to_owned(),
            time_frame: self.time_frame(),
            autoscale: self.autoscale(),
            axis_mode: self.axis_mode(),
            channels: self
                .channels()
                .map(|(channel, slot)| ChannelAssignment { channel, slot })
                .collect(),
        }
    }

    /// Rebuilds a live (unpaused) session from a stored configuration.
    pub fn from_config(config: SessionConfig) -> PlotResult<Self> {
        let mut session = Self::new(config.name);
        session.set_time_frame(config.time_frame)?;
        session.set_autoscale(config.autoscale);
        if let AxisMode::ExternalAxis { channel, realtime } = config.axis_mode {
            session.set_external_axis(channel, realtime);
        }
        for assignment in config.channels {
            session.add_channel(assignment.channel, assignment.slot);
        }
        Ok(session)
    }
}
