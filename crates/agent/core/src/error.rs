//! Common error infrastructure for agent-core.
//!
//! Concrete error enums live next to the code that raises them
//! ([`crate::CatalogError`], [`crate::PathError`]) and implement
//! [`BehaviorError`] so callers can classify them uniformly.
//!
//! Nothing on the per-tick path is fatal: stale references and missing
//! candidates degrade to "agent stays idle and retries". Errors surface only
//! where a caller can act on them, such as catalog construction.

/// Severity level of an error, used for categorization and recovery strategies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Temporary condition; retrying later may succeed.
    ///
    /// Examples: path service cannot connect two points right now.
    Recoverable,

    /// Invalid input or configuration; retrying without changes will fail again.
    ///
    /// Examples: catalog references a solution with no registered handlers.
    Validation,

    /// Unexpected inconsistency that indicates a bug.
    Internal,

    /// Unrecoverable; the process cannot continue.
    Fatal,
}

impl ErrorSeverity {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
            Self::Fatal => "fatal",
        }
    }

    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }

    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal | Self::Fatal)
    }
}

/// Common trait for all agent-core errors.
pub trait BehaviorError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static identifier for this error variant.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_classification() {
        assert!(ErrorSeverity::Recoverable.is_recoverable());
        assert!(!ErrorSeverity::Validation.is_recoverable());
        assert!(ErrorSeverity::Fatal.is_internal());
        assert_eq!(ErrorSeverity::Validation.as_str(), "validation");
    }
}
