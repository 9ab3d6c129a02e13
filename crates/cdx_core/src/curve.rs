//! Provider traits for externally simulated curves.
//!
//! The valuation core treats curve construction as an external concern: a
//! discount provider turns a date list into a table of simulated discount
//! factors (one column per Monte Carlo trajectory), and a survival provider
//! turns a date list and a rating into a table of survival probabilities
//! (one column per tenor bucket). Implementations live in `cdx_models`;
//! tests inject fixed tables instead.

use crate::table::{CurveError, CurveTable};
use crate::types::{Date, Rating};

/// Source of simulated risk-free discount factors.
///
/// # Contract
///
/// - The returned table is indexed over exactly the requested dates, one
///   column per trajectory.
/// - Values represent the present value of one unit of currency at that
///   date relative to the first requested date, so the first row is 1 in
///   every column.
/// - All values are positive.
pub trait DiscountCurveProvider {
    /// Model parameter set accepted by [`resimulate`](Self::resimulate).
    type Params;

    /// Returns the simulated discount table over `dates`.
    fn discount_curve(&self, dates: &[Date]) -> Result<CurveTable, CurveError>;

    /// Re-runs the simulation with a new parameter set.
    ///
    /// Single-shot: callers that want calibration drive this themselves.
    fn resimulate(&self, params: &Self::Params, dates: &[Date]) -> Result<CurveTable, CurveError>;
}

/// Source of survival probabilities for a rated issuer.
///
/// # Contract
///
/// - The returned table is indexed over exactly the requested dates, one
///   column per tenor bucket, labelled with the bucket code ("1M", "3M", …).
/// - Values lie in [0, 1] and are non-increasing down each column.
/// - Any recovery assumption used during bootstrapping is fixed at provider
///   construction; it is a distinct knob from a contract's recovery rate.
pub trait SurvivalCurveProvider {
    /// Returns the survival table over `dates` for `rating`.
    fn survival_curve(&self, dates: &[Date], rating: Rating) -> Result<CurveTable, CurveError>;
}
