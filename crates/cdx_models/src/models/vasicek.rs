//! Vasicek one-factor short-rate model and its Monte Carlo discount
//! simulator.
//!
//! The Vasicek model is a short-rate model described by:
//! ```text
//! dr(t) = kappa * (theta - r(t)) * dt + sigma * dW(t)
//! ```
//! where:
//! - r(t) = short rate at time t
//! - kappa = mean reversion speed (must be positive)
//! - theta = long-term mean rate
//! - sigma = volatility (must be positive)
//! - dW(t) = Wiener process increment
//!
//! The simulator evolves the short rate on a daily grid with an
//! Euler-Maruyama step, accumulates the integral of r, and reports
//! discount factors `Z(t) = exp(-∫ r ds)` at the requested dates, one
//! column per trajectory. `Z` at the first requested date is 1 in every
//! column.
//!
//! ## Usage
//!
//! ```
//! use cdx_models::models::{VasicekModel, VasicekParams};
//! use cdx_core::curve::DiscountCurveProvider;
//! use cdx_core::types::Date;
//!
//! let params = VasicekParams::new(3.0, 0.05, 0.01, 0.03).unwrap();
//! let model = VasicekModel::new(params, 20, 1.0 / 365.0, 7).unwrap();
//!
//! let dates = vec![
//!     Date::from_ymd(2005, 3, 10).unwrap(),
//!     Date::from_ymd(2005, 9, 10).unwrap(),
//!     Date::from_ymd(2006, 3, 10).unwrap(),
//! ];
//! let table = model.discount_curve(&dates).unwrap();
//!
//! assert_eq!(table.num_columns(), 20);
//! assert!(table.row_at(0).iter().all(|&z| z == 1.0));
//! ```

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::StandardNormal;
use tracing::debug;

use cdx_core::curve::DiscountCurveProvider;
use cdx_core::table::{CurveError, CurveTable};
use cdx_core::types::Date;

use super::error::ModelError;

/// Vasicek model parameters.
///
/// # Fields
///
/// * `mean_reversion` - Mean reversion speed (kappa > 0)
/// * `long_term_mean` - Long-term mean rate (theta)
/// * `volatility` - Short rate volatility (sigma > 0)
/// * `initial_rate` - Initial short rate r(0)
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VasicekParams {
    /// Mean reversion speed (kappa > 0).
    pub mean_reversion: f64,
    /// Long-term mean rate (theta).
    pub long_term_mean: f64,
    /// Volatility of the short rate (sigma > 0).
    pub volatility: f64,
    /// Initial short rate r(0).
    pub initial_rate: f64,
}

impl VasicekParams {
    /// Creates validated Vasicek parameters.
    ///
    /// # Errors
    ///
    /// `InvalidParameter` when `mean_reversion` or `volatility` is not
    /// strictly positive, or any field is non-finite.
    ///
    /// # Example
    ///
    /// ```
    /// use cdx_models::models::VasicekParams;
    ///
    /// assert!(VasicekParams::new(3.0, 0.05, 0.01, 0.03).is_ok());
    /// assert!(VasicekParams::new(-3.0, 0.05, 0.01, 0.03).is_err());
    /// ```
    pub fn new(
        mean_reversion: f64,
        long_term_mean: f64,
        volatility: f64,
        initial_rate: f64,
    ) -> Result<Self, ModelError> {
        if !mean_reversion.is_finite() || mean_reversion <= 0.0 {
            return Err(ModelError::InvalidParameter {
                name: "mean_reversion",
                value: mean_reversion,
            });
        }
        if !volatility.is_finite() || volatility <= 0.0 {
            return Err(ModelError::InvalidParameter {
                name: "volatility",
                value: volatility,
            });
        }
        if !long_term_mean.is_finite() {
            return Err(ModelError::InvalidParameter {
                name: "long_term_mean",
                value: long_term_mean,
            });
        }
        if !initial_rate.is_finite() {
            return Err(ModelError::InvalidParameter {
                name: "initial_rate",
                value: initial_rate,
            });
        }
        Ok(Self {
            mean_reversion,
            long_term_mean,
            volatility,
            initial_rate,
        })
    }
}

/// Monte Carlo discount-factor simulator driven by the Vasicek model.
///
/// Owns the trajectory count, time step, and RNG seed so that repeated
/// simulations over the same date list are reproducible.
#[derive(Clone, Debug)]
pub struct VasicekModel {
    params: VasicekParams,
    trajectories: usize,
    t_step: f64,
    seed: u64,
}

impl VasicekModel {
    /// Creates a simulator.
    ///
    /// # Arguments
    ///
    /// * `params` - Validated Vasicek parameters
    /// * `trajectories` - Number of Monte Carlo paths (>= 1)
    /// * `t_step` - Simulation time step in years (> 0)
    /// * `seed` - RNG seed
    pub fn new(
        params: VasicekParams,
        trajectories: usize,
        t_step: f64,
        seed: u64,
    ) -> Result<Self, ModelError> {
        if trajectories == 0 {
            return Err(ModelError::InvalidSimulation {
                reason: "trajectory count must be at least 1".to_string(),
            });
        }
        if !t_step.is_finite() || t_step <= 0.0 {
            return Err(ModelError::InvalidSimulation {
                reason: format!("time step must be positive, got {t_step}"),
            });
        }
        Ok(Self {
            params,
            trajectories,
            t_step,
            seed,
        })
    }

    /// Returns the model parameters.
    pub fn params(&self) -> VasicekParams {
        self.params
    }

    /// Returns the trajectory count.
    pub fn trajectories(&self) -> usize {
        self.trajectories
    }

    /// Simulates discount factors over `dates` with the given parameters.
    ///
    /// The first date anchors the simulation: Z there is exactly 1. Each
    /// trajectory evolves the short rate day by day to the last date and
    /// records `exp(-∫ r ds)` at every requested date.
    fn simulate(&self, params: &VasicekParams, dates: &[Date]) -> Result<CurveTable, CurveError> {
        if dates.is_empty() {
            return CurveTable::new(Vec::new(), Vec::new());
        }
        if let Some(position) = dates.windows(2).position(|w| w[0] >= w[1]) {
            return Err(CurveError::UnsortedDates { position: position + 1 });
        }

        let anchor = dates[0];
        let offsets: Vec<i64> = dates.iter().map(|&d| d - anchor).collect();
        let horizon = *offsets.last().unwrap_or(&0);

        // Steps per calendar day; t_step = 1/365 gives exactly one.
        let day_fraction = 1.0 / 365.0;
        let steps_per_day = (day_fraction / self.t_step).round().max(1.0) as usize;
        let dt = day_fraction / steps_per_day as f64;

        let kappa = params.mean_reversion;
        let theta = params.long_term_mean;
        let sigma = params.volatility;
        let sqrt_dt = dt.sqrt();

        let mut rng = StdRng::seed_from_u64(self.seed);
        let mut columns: Vec<Vec<f64>> = Vec::with_capacity(self.trajectories);

        for _ in 0..self.trajectories {
            let mut r = params.initial_rate;
            let mut integral: f64 = 0.0;
            let mut samples = Vec::with_capacity(offsets.len());
            let mut next = 0;

            for day in 0..=horizon {
                while next < offsets.len() && offsets[next] == day {
                    samples.push((-integral).exp());
                    next += 1;
                }
                for _ in 0..steps_per_day {
                    let dw: f64 = rng.sample(StandardNormal);
                    integral += r * dt;
                    r += kappa * (theta - r) * dt + sigma * sqrt_dt * dw;
                }
            }
            debug_assert_eq!(samples.len(), offsets.len());
            columns.push(samples);
        }

        debug!(
            trajectories = self.trajectories,
            dates = dates.len(),
            horizon_days = horizon,
            "simulated Vasicek discount table"
        );

        let values = (0..offsets.len())
            .map(|row| columns.iter().map(|col| col[row]).collect())
            .collect();
        CurveTable::new(dates.to_vec(), values)
    }
}

impl DiscountCurveProvider for VasicekModel {
    type Params = VasicekParams;

    fn discount_curve(&self, dates: &[Date]) -> Result<CurveTable, CurveError> {
        self.simulate(&self.params, dates)
    }

    fn resimulate(&self, params: &Self::Params, dates: &[Date]) -> Result<CurveTable, CurveError> {
        self.simulate(params, dates)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn d(s: &str) -> Date {
        Date::parse(s).unwrap()
    }

    fn sample_dates() -> Vec<Date> {
        vec![d("2005-03-10"), d("2005-06-10"), d("2005-09-10"), d("2006-03-10")]
    }

    fn model() -> VasicekModel {
        let params = VasicekParams::new(3.0, 0.05, 0.01, 0.03).unwrap();
        VasicekModel::new(params, 10, 1.0 / 365.0, 99).unwrap()
    }

    #[test]
    fn test_params_validation() {
        assert!(VasicekParams::new(0.0, 0.05, 0.01, 0.03).is_err());
        assert!(VasicekParams::new(3.0, 0.05, 0.0, 0.03).is_err());
        assert!(VasicekParams::new(3.0, f64::NAN, 0.01, 0.03).is_err());
    }

    #[test]
    fn test_model_validation() {
        let params = VasicekParams::new(3.0, 0.05, 0.01, 0.03).unwrap();
        assert!(VasicekModel::new(params, 0, 1.0 / 365.0, 0).is_err());
        assert!(VasicekModel::new(params, 10, 0.0, 0).is_err());
    }

    #[test]
    fn test_table_shape() {
        let table = model().discount_curve(&sample_dates()).unwrap();
        assert_eq!(table.len(), 4);
        assert_eq!(table.num_columns(), 10);
    }

    #[test]
    fn test_anchor_discount_is_one() {
        let table = model().discount_curve(&sample_dates()).unwrap();
        for &z in table.row_at(0) {
            assert_relative_eq!(z, 1.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_discount_factors_positive() {
        let table = model().discount_curve(&sample_dates()).unwrap();
        for i in 0..table.len() {
            assert!(table.row_at(i).iter().all(|&z| z > 0.0));
        }
    }

    #[test]
    fn test_seeded_simulation_is_reproducible() {
        let a = model().discount_curve(&sample_dates()).unwrap();
        let b = model().discount_curve(&sample_dates()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_resimulate_changes_output() {
        let m = model();
        let base = m.discount_curve(&sample_dates()).unwrap();
        let bumped = VasicekParams::new(3.0, 0.10, 0.01, 0.08).unwrap();
        let moved = m.resimulate(&bumped, &sample_dates()).unwrap();

        // Same shape, different levels beyond the anchor row.
        assert_eq!(base.len(), moved.len());
        assert!(base.row_at(3)[0] != moved.row_at(3)[0]);
    }

    #[test]
    fn test_mean_discount_tracks_rate_level() {
        // With tight mean reversion and low vol the average discount factor
        // should sit near exp(-r * t).
        let params = VasicekParams::new(5.0, 0.05, 0.001, 0.05).unwrap();
        let m = VasicekModel::new(params, 50, 1.0 / 365.0, 11).unwrap();
        let dates = vec![d("2005-03-10"), d("2006-03-10")];
        let table = m.discount_curve(&dates).unwrap();

        let t = 365.0 / 365.0;
        let mean = table.row_mean()[1];
        assert_relative_eq!(mean, (-0.05f64 * t).exp(), max_relative = 0.02);
    }

    #[test]
    fn test_empty_and_unsorted_dates() {
        let m = model();
        assert!(m.discount_curve(&[]).unwrap().is_empty());

        let unsorted = vec![d("2005-06-10"), d("2005-03-10")];
        assert!(matches!(
            m.discount_curve(&unsorted),
            Err(CurveError::UnsortedDates { .. })
        ));
    }
}
