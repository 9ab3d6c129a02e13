//! Exposure aggregation.
//!
//! Turns a per-period cash-flow specification plus a discount table into a
//! present-value vector (one PV per trajectory) and its cross-trajectory
//! average. Both CDS legs reduce to this: each leg supplies a reweighted
//! discount table and reuses the same cash-flow construction.
//!
//! Cash-flow construction over an n-date schedule:
//! - period accrual `coupon × dt_i` under ACT/365F, zero accrual in the
//!   first period;
//! - unit principal added to the final period (to the lone period when
//!   n = 1);
//! - the first period overwritten with `−fee` when the schedule opens on or
//!   before the contract start (entering the contract costs the fee, it
//!   does not accrue coupon).
//!
//! An empty schedule is the documented degenerate case: a (1, m) zero PV
//! matrix, not an error.

use rayon::prelude::*;

use cdx_core::table::{CurveError, CurveTable};
use cdx_core::types::{Date, DayCount};

use crate::error::PricingError;

/// Per-period cash-flow specification for one contract.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CashFlowSpec {
    /// Annual coupon rate accrued each period.
    pub coupon: f64,
    /// Upfront fee fraction charged in the first period.
    pub fee: f64,
    /// Notional principal scaling cash flows and PVs.
    pub notional: f64,
    /// Contract start date governing the fee overwrite.
    pub start_date: Date,
}

/// Aggregated exposure: cash flows and their discounted values.
#[derive(Debug, Clone, PartialEq)]
pub struct Exposure {
    /// Signed cash flows, dates × trajectories, before discounting.
    pub cash_flows: CurveTable,
    /// Cross-trajectory mean cash flow per date, scaled by notional.
    pub cash_flows_avg: Vec<f64>,
    /// Present value per trajectory, scaled by notional.
    pub pv: Vec<f64>,
    /// Arithmetic mean of the PV vector.
    pub pv_avg: f64,
}

/// Computes the exposure of a cash-flow schedule against a discount table.
///
/// The discount table must cover every schedule date; a missing date is a
/// fatal [`CurveError::MissingDate`]. The per-trajectory PV reduction is a
/// commutative, associative sum and runs in parallel across trajectories.
///
/// # Examples
///
/// ```
/// use cdx_pricing::exposure::{compute_exposure, CashFlowSpec};
/// use cdx_core::table::CurveTable;
/// use cdx_core::types::Date;
///
/// let dates = vec![
///     Date::from_ymd(2005, 3, 10).unwrap(),
///     Date::from_ymd(2005, 6, 10).unwrap(),
/// ];
/// let discount = CurveTable::constant(dates.clone(), 2, 1.0).unwrap();
/// let spec = CashFlowSpec {
///     coupon: 0.05,
///     fee: 0.0,
///     notional: 1.0,
///     start_date: dates[0],
/// };
///
/// let exposure = compute_exposure(&dates, dates[0], &discount, &spec).unwrap();
/// assert_eq!(exposure.pv.len(), 2);
/// ```
pub fn compute_exposure(
    schedule: &[Date],
    reference_date: Date,
    discount: &CurveTable,
    spec: &CashFlowSpec,
) -> Result<Exposure, PricingError> {
    if schedule.is_empty() {
        let m = discount.num_columns().max(1);
        let zeros = CurveTable::new(vec![reference_date], vec![vec![0.0; m]])?;
        return Ok(Exposure {
            cash_flows: zeros,
            cash_flows_avg: vec![0.0],
            pv: vec![0.0; m],
            pv_avg: 0.0,
        });
    }

    let aligned = discount.reindex(schedule)?;
    let m = aligned.num_columns();
    if m == 0 {
        return Err(CurveError::DimensionMismatch { expected: 1, got: 0 }.into());
    }

    let n = schedule.len();
    let mut rows = vec![vec![0.0; m]; n];
    for i in 1..n {
        let dt = DayCount::Act365F.year_fraction(schedule[i - 1], schedule[i]);
        rows[i].fill(spec.coupon * dt);
    }

    let principal_row = if n > 1 { n - 1 } else { 0 };
    for value in &mut rows[principal_row] {
        *value += 1.0;
    }
    if schedule[0] <= spec.start_date {
        rows[0].fill(-spec.fee);
    }

    let cash_flows_avg: Vec<f64> = rows
        .iter()
        .map(|row| row.iter().sum::<f64>() / m as f64 * spec.notional)
        .collect();

    let pv: Vec<f64> = (0..m)
        .into_par_iter()
        .map(|c| {
            rows.iter()
                .enumerate()
                .map(|(i, row)| row[c] * aligned.row_at(i)[c])
                .sum::<f64>()
                * spec.notional
        })
        .collect();
    let pv_avg = pv.iter().sum::<f64>() / m as f64;

    Ok(Exposure {
        cash_flows: CurveTable::with_labels(schedule.to_vec(), aligned.labels().to_vec(), rows)?,
        cash_flows_avg,
        pv,
        pv_avg,
    })
}
