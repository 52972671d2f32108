pub mod registry;
pub mod session;
pub mod session_config;

pub use registry::{BufferHandle, ChannelRegistry, DataSource};
pub use session::{DEFAULT_TIME_FRAME, PlotSession, TickContext};
pub use session_config::{
    ChannelAssignment, SESSION_CONFIG_JSON_SCHEMA_V1, SessionConfig,
};
