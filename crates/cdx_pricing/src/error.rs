//! Valuation errors.

use thiserror::Error;

use cdx_core::table::CurveError;
use cdx_models::models::ModelError;
use cdx_models::schedules::ScheduleError;

use crate::engine::TermsError;

/// Errors surfaced by the valuation engine.
///
/// All failures are immediate: the computations are deterministic given
/// their inputs, so nothing here is retried.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PricingError {
    /// Curve coverage or shape failure.
    #[error("Curve error: {0}")]
    Curve(#[from] CurveError),

    /// Schedule construction failure.
    #[error("Schedule error: {0}")]
    Schedule(#[from] ScheduleError),

    /// Curve model failure.
    #[error("Model error: {0}")]
    Model(#[from] ModelError),

    /// Contract terms construction failure.
    #[error("Terms error: {0}")]
    Terms(#[from] TermsError),

    /// Premium leg too close to zero for a fair spread to exist.
    #[error("Premium leg magnitude {premium} below {epsilon}; fair spread is undefined")]
    DegenerateSpread {
        /// The offending premium-leg value.
        premium: f64,
        /// The detection threshold.
        epsilon: f64,
    },
}
