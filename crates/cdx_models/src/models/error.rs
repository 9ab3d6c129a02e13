//! Curve model errors.

use thiserror::Error;

/// Errors raised during curve model construction.
///
/// Parameter validation happens once, at model construction; simulation
/// over a date list can then only fail on table-shape grounds, which
/// surface as `cdx_core::table::CurveError`.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ModelError {
    /// A model parameter violates its admissible range.
    #[error("Invalid model parameter {name}: {value}")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Rejected value.
        value: f64,
    },

    /// The simulation configuration is unusable.
    #[error("Invalid simulation setup: {reason}")]
    InvalidSimulation {
        /// Description of the problem.
        reason: String,
    },
}
