//! Configuration error types for specdrive
//!
//! These are programmer errors raised synchronously while a suite is being
//! registered or expanded. They abort construction of the offending suite.
//! Execution-time faults are never represented here; those are caught at
//! phase boundaries and recorded in the suite's result instead.
//! We use `thiserror` for automatic `Display` and `Error` trait
//! implementations.

use crate::outcome::HookKind;
use thiserror::Error;

/// Result type alias for specdrive registration operations
pub type Result<T> = std::result::Result<T, SpecError>;

/// Errors raised while registering or expanding a suite
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SpecError {
    /// A bound or declared count that must be positive was not
    #[error("invalid bound: expected a positive value, got {0}")]
    InvalidBound(i64),

    /// Parallel column sequences supplied for one expansion disagree in length
    #[error("column length mismatch: {left} values vs {right} values")]
    ColumnLengthMismatch {
        /// Length of the leftmost disagreeing column
        left: usize,
        /// Length of the column that disagrees with it
        right: usize,
    },

    /// A second initialize or complete hook was registered on one suite
    #[error("duplicate {0} hook: at most one may be registered per suite")]
    DuplicateHook(HookKind),
}
