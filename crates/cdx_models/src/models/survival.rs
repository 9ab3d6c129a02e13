//! Rating-keyed corporate survival-curve model.
//!
//! Produces survival probability tables `Q(t)` for a rated issuer from
//! piecewise-flat hazard rates: each rating carries a par credit spread
//! level, converted to a hazard rate through the bootstrap recovery
//! assumption (`λ ≈ s / (1 - R)`), with a mild term adjustment per tenor
//! bucket. The resulting table has one column per tenor bucket, labelled
//! with the bucket code, and `Q` at the first requested date is 1.
//!
//! The bootstrap recovery here is the assumption baked into curve
//! construction; it is deliberately a separate knob from any contract's
//! own recovery rate.
//!
//! ## Usage
//!
//! ```
//! use cdx_models::models::CorporateCurveModel;
//! use cdx_core::curve::SurvivalCurveProvider;
//! use cdx_core::types::{Date, Rating};
//!
//! let model = CorporateCurveModel::new(0.4).unwrap();
//! let dates = vec![
//!     Date::from_ymd(2005, 3, 10).unwrap(),
//!     Date::from_ymd(2007, 3, 10).unwrap(),
//! ];
//! let table = model.survival_curve(&dates, Rating::CCC).unwrap();
//!
//! let q = table.column("3M").unwrap();
//! assert_eq!(q[0], 1.0);
//! assert!(q[1] < 1.0);
//! ```

use tracing::debug;

use cdx_core::curve::SurvivalCurveProvider;
use cdx_core::table::{CurveError, CurveTable};
use cdx_core::types::{Date, DayCount, Rating};

use crate::schedules::Frequency;

use super::error::ModelError;

/// Survival-curve model keyed by rating and tenor bucket.
#[derive(Clone, Debug)]
pub struct CorporateCurveModel {
    bootstrap_recovery: f64,
    buckets: Vec<Frequency>,
}

impl CorporateCurveModel {
    /// Creates a model with the given bootstrap recovery assumption and the
    /// full set of tenor buckets (1M, 3M, 6M, 1Y).
    ///
    /// # Errors
    ///
    /// `InvalidParameter` when the recovery assumption is outside [0, 1).
    pub fn new(bootstrap_recovery: f64) -> Result<Self, ModelError> {
        Self::with_buckets(bootstrap_recovery, Frequency::ALL.to_vec())
    }

    /// Creates a model restricted to the given tenor buckets.
    pub fn with_buckets(
        bootstrap_recovery: f64,
        buckets: Vec<Frequency>,
    ) -> Result<Self, ModelError> {
        if !bootstrap_recovery.is_finite() || !(0.0..1.0).contains(&bootstrap_recovery) {
            return Err(ModelError::InvalidParameter {
                name: "bootstrap_recovery",
                value: bootstrap_recovery,
            });
        }
        if buckets.is_empty() {
            return Err(ModelError::InvalidSimulation {
                reason: "survival model needs at least one tenor bucket".to_string(),
            });
        }
        Ok(Self {
            bootstrap_recovery,
            buckets,
        })
    }

    /// Returns the bootstrap recovery assumption.
    pub fn bootstrap_recovery(&self) -> f64 {
        self.bootstrap_recovery
    }

    /// Par credit spread level for a rating, annualised.
    fn base_spread(rating: Rating) -> f64 {
        match rating {
            Rating::AAA => 0.0015,
            Rating::AA => 0.0025,
            Rating::A => 0.0040,
            Rating::BBB => 0.0080,
            Rating::BB => 0.0200,
            Rating::B => 0.0400,
            Rating::CCC => 0.1000,
            _ => unreachable!("Rating is non_exhaustive but all known variants are covered"),
        }
    }

    /// Term adjustment per tenor bucket: shorter buckets price slightly
    /// below the par level, longer ones slightly above.
    fn bucket_multiplier(bucket: Frequency) -> f64 {
        match bucket {
            Frequency::Monthly => 0.90,
            Frequency::Quarterly => 1.00,
            Frequency::SemiAnnual => 1.05,
            Frequency::Annual => 1.15,
        }
    }

    /// Hazard rate for a rating in a tenor bucket.
    fn hazard(&self, rating: Rating, bucket: Frequency) -> f64 {
        Self::base_spread(rating) * Self::bucket_multiplier(bucket) / (1.0 - self.bootstrap_recovery)
    }
}

impl SurvivalCurveProvider for CorporateCurveModel {
    fn survival_curve(&self, dates: &[Date], rating: Rating) -> Result<CurveTable, CurveError> {
        if dates.is_empty() {
            return CurveTable::new(Vec::new(), Vec::new());
        }
        if let Some(position) = dates.windows(2).position(|w| w[0] >= w[1]) {
            return Err(CurveError::UnsortedDates { position: position + 1 });
        }

        let anchor = dates[0];
        let labels: Vec<String> = self.buckets.iter().map(|b| b.code().to_string()).collect();
        let hazards: Vec<f64> = self.buckets.iter().map(|&b| self.hazard(rating, b)).collect();

        let values = dates
            .iter()
            .map(|&date| {
                let t = DayCount::Act365F.year_fraction(anchor, date);
                hazards.iter().map(|&h| (-h * t).exp()).collect()
            })
            .collect();

        debug!(
            rating = %rating,
            buckets = labels.len(),
            dates = dates.len(),
            "built corporate survival table"
        );

        CurveTable::with_labels(dates.to_vec(), labels, values)
    }
}
