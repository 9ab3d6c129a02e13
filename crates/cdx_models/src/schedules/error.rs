//! Schedule generation errors.

use thiserror::Error;

/// Errors raised during schedule and tenor construction.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScheduleError {
    /// Date arithmetic overflowed the supported range.
    #[error("Date overflow: {reason}")]
    DateOverflow {
        /// Description of the failed operation.
        reason: String,
    },

    /// A tenor string could not be parsed.
    #[error("Invalid tenor: {input}")]
    InvalidTenor {
        /// The offending input.
        input: String,
    },
}
