use crate::error::{BehaviorError, ErrorSeverity};
use crate::state::{Path, Position};

/// Failure to connect two points.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum PathError {
    #[error("no route from {from} to {to}")]
    Unreachable { from: Position, to: Position },

    #[error("destination {to} lies outside the navigable area")]
    OutOfBounds { to: Position },
}

impl BehaviorError for PathError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Recoverable
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Unreachable { .. } => "PATH_UNREACHABLE",
            Self::OutOfBounds { .. } => "PATH_OUT_OF_BOUNDS",
        }
    }
}

/// Builds waypoint routes across the navigation graph.
pub trait PathService {
    fn create_path(&self, from: Position, to: Position) -> Result<Path, PathError>;
}
