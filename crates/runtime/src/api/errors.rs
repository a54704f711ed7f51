//! Unified error types surfaced by the runtime API.
//!
//! Wraps builder misconfiguration, catalog failures and worker coordination
//! so clients can bubble them up with consistent context.

use thiserror::Error;
use tokio::sync::oneshot;

use agent_core::{BehaviorError, CatalogError, EntityId, ErrorSeverity};

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("runtime requires a world to be configured before building")]
    MissingWorld,

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error("agent {0} is not on the roster")]
    UnknownAgent(EntityId),

    #[error("simulation worker command channel closed")]
    CommandChannelClosed,

    #[error("simulation worker reply channel closed")]
    ReplyChannelClosed(#[source] oneshot::error::RecvError),
}

impl BehaviorError for RuntimeError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::MissingWorld => ErrorSeverity::Validation,
            Self::Catalog(error) => error.severity(),
            Self::UnknownAgent(_) => ErrorSeverity::Recoverable,
            Self::CommandChannelClosed | Self::ReplyChannelClosed(_) => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::MissingWorld => "RUNTIME_MISSING_WORLD",
            Self::Catalog(error) => error.error_code(),
            Self::UnknownAgent(_) => "RUNTIME_UNKNOWN_AGENT",
            Self::CommandChannelClosed => "RUNTIME_COMMAND_CHANNEL_CLOSED",
            Self::ReplyChannelClosed(_) => "RUNTIME_REPLY_CHANNEL_CLOSED",
        }
    }
}
