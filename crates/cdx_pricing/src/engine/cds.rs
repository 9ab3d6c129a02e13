//! The CDS valuation engine.
//!
//! Orchestrates schedule reconciliation, lazy curve access, leg
//! construction, and the premium/protection algebra that yields
//! mark-to-market value and fair spread.
//!
//! Both legs reduce to "integrate a signed, survival-weighted discount
//! factor against the exposure aggregator": the leg builds per-date weights
//! from the survival column for the contract's frequency bucket, rescales
//! the discount table row-by-row, and hands the result to
//! [`compute_exposure`] over the native schedule. The premium leg pairs
//! survival as `Q(t_{i-1}) + Q(t_i)`, the protection leg as
//! `Q(t_{i-1}) - Q(t_i)`, both times the ACT/365F fraction of the
//! portfolio-schedule period; the i = 0 weight is `Q(t_0)` for either leg.
//!
//! Mark-to-market from the buyer's side:
//! ```text
//! V = (spread / 2) × PremiumLeg − (1 − R) × ProtectionLeg
//! ```
//! The seller's view is the exact negation.

use std::fmt;

use tracing::debug;

use cdx_core::curve::{DiscountCurveProvider, SurvivalCurveProvider};
use cdx_core::table::{CurveError, CurveTable};
use cdx_core::types::{Date, DayCount};
use cdx_models::schedules::DateScheduler;

use super::cache::Cached;
use super::terms::CdsTerms;
use crate::error::PricingError;
use crate::exposure::{compute_exposure, CashFlowSpec};
use crate::schedule::PortfolioSchedule;

/// Premium-leg magnitude below which the fair spread is undefined.
pub const SPREAD_EPSILON: f64 = 1e-12;

/// Which side of the protection trade is being valued.
///
/// # Examples
///
/// ```
/// use cdx_pricing::engine::Side;
///
/// assert_eq!(Side::Buyer.sign(), 1.0);
/// assert_eq!(Side::Seller.sign(), -1.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    /// Long protection: pays the premium, receives on default.
    Buyer,
    /// Short protection: receives the premium, pays on default.
    Seller,
}

impl Side {
    /// Returns the mark-to-market sign for this side.
    #[inline]
    pub fn sign(&self) -> f64 {
        match self {
            Side::Buyer => 1.0,
            Side::Seller => -1.0,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Buyer => write!(f, "Buyer"),
            Side::Seller => write!(f, "Seller"),
        }
    }
}

/// A leg's present value: one entry per trajectory plus the average.
#[derive(Debug, Clone, PartialEq)]
pub struct LegPv {
    /// PV per discount-curve trajectory.
    pub per_trajectory: Vec<f64>,
    /// Arithmetic mean across trajectories.
    pub average: f64,
}

impl LegPv {
    /// Returns the number of trajectories.
    #[inline]
    pub fn len(&self) -> usize {
        self.per_trajectory.len()
    }

    /// Returns whether the PV vector is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.per_trajectory.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum LegKind {
    Premium,
    Protection,
}

/// A single-name CDS bound to its curve providers.
///
/// The portfolio schedule is derived once at construction and immutable
/// thereafter. Discount (Z) and survival (Q) tables are lazily computed on
/// first use and cached for the life of the instance; explicit overrides
/// replace the cache unconditionally. Each instance owns its caches
/// exclusively, so curve computation always completes before leg
/// computation reads it.
///
/// # Examples
///
/// ```
/// use cdx_pricing::engine::{Cds, CdsTermsBuilder};
/// use cdx_core::types::{Date, Rating};
/// use cdx_models::models::{CorporateCurveModel, VasicekModel, VasicekParams};
/// use cdx_models::schedules::Frequency;
///
/// let terms = CdsTermsBuilder::new()
///     .start(Date::from_ymd(2005, 3, 10).unwrap())
///     .end(Date::from_ymd(2010, 12, 31).unwrap())
///     .frequency(Frequency::Quarterly)
///     .coupon(0.01)
///     .reference_date(Date::from_ymd(2005, 3, 10).unwrap())
///     .rating(Rating::CCC)
///     .recovery(0.4)
///     .build()
///     .unwrap();
///
/// let params = VasicekParams::new(3.0, 0.05, 0.01, 0.03).unwrap();
/// let discount = VasicekModel::new(params, 20, 1.0 / 365.0, 1).unwrap();
/// let survival = CorporateCurveModel::new(0.4).unwrap();
///
/// let mut cds = Cds::new(terms, discount, survival).unwrap();
/// let spread = cds.par_spread().unwrap();
/// assert_eq!(spread.len(), 20);
/// ```
#[derive(Debug, Clone)]
pub struct Cds<D, S> {
    terms: CdsTerms,
    schedule: PortfolioSchedule,
    discount: D,
    survival: S,
    z: Cached<CurveTable>,
    q: Cached<CurveTable>,
}

impl<D, S> Cds<D, S>
where
    D: DiscountCurveProvider,
    S: SurvivalCurveProvider,
{
    /// Creates an engine for `terms`, reconciling its schedule.
    pub fn new(terms: CdsTerms, discount: D, survival: S) -> Result<Self, PricingError> {
        let schedule = PortfolioSchedule::reconcile(&DateScheduler::new(), &terms)?;
        Ok(Self {
            terms,
            schedule,
            discount,
            survival,
            z: Cached::Unset,
            q: Cached::Unset,
        })
    }

    /// Returns the contract terms.
    #[inline]
    pub fn terms(&self) -> &CdsTerms {
        &self.terms
    }

    /// Returns the reconciled schedule.
    #[inline]
    pub fn schedule(&self) -> &PortfolioSchedule {
        &self.schedule
    }

    /// Returns the cached discount table, if computed.
    #[inline]
    pub fn discount_curve(&self) -> Option<&CurveTable> {
        self.z.get()
    }

    /// Returns the cached survival table, if computed.
    #[inline]
    pub fn survival_curve(&self) -> Option<&CurveTable> {
        self.q.get()
    }

    /// Replaces the discount table unconditionally.
    ///
    /// Dependency-injection hook: bypasses the lazy provider path. No
    /// derived state is cached, so an override cannot leave stale
    /// intermediates behind.
    pub fn set_discount_curve(&mut self, table: CurveTable) {
        self.z.set(table);
    }

    /// Replaces the survival table unconditionally.
    pub fn set_survival_curve(&mut self, table: CurveTable) {
        self.q.set(table);
    }

    /// Computes the premium leg PV.
    pub fn premium_leg(&mut self) -> Result<LegPv, PricingError> {
        self.leg(LegKind::Premium)
    }

    /// Computes the protection leg PV, scaled by the contract's loss given
    /// default.
    pub fn protection_leg(&mut self) -> Result<LegPv, PricingError> {
        self.leg(LegKind::Protection)
    }

    /// Mark-to-market value per trajectory.
    ///
    /// `recovery` is the valuation override, distinct from the contract
    /// recovery already applied inside the protection leg. Hard invariant:
    /// `value(s, r, Buyer) == -value(s, r, Seller)` elementwise.
    pub fn value(
        &mut self,
        spread: f64,
        recovery: f64,
        side: Side,
    ) -> Result<Vec<f64>, PricingError> {
        let premium = self.premium_leg()?;
        let protection = self.protection_leg()?;
        let sign = side.sign();

        Ok(premium
            .per_trajectory
            .iter()
            .zip(&protection.per_trajectory)
            .map(|(&prem, &prot)| sign * (spread / 2.0 * prem - (1.0 - recovery) * prot))
            .collect())
    }

    /// Fair spread per trajectory: protection leg over premium leg.
    ///
    /// # Errors
    ///
    /// `DegenerateSpread` when any premium-leg entry is within
    /// [`SPREAD_EPSILON`] of zero; a non-finite ratio is never returned
    /// silently.
    pub fn par_spread(&mut self) -> Result<Vec<f64>, PricingError> {
        let premium = self.premium_leg()?;
        let protection = self.protection_leg()?;

        premium
            .per_trajectory
            .iter()
            .zip(&protection.per_trajectory)
            .map(|(&prem, &prot)| {
                if prem.abs() < SPREAD_EPSILON {
                    Err(PricingError::DegenerateSpread {
                        premium: prem,
                        epsilon: SPREAD_EPSILON,
                    })
                } else {
                    Ok(prot / prem)
                }
            })
            .collect()
    }

    /// Re-simulates with a new parameter guess and returns the recomputed
    /// spread.
    ///
    /// Single-shot re-evaluation: the first column of the re-simulated
    /// table is installed as the survival bucket for the contract's
    /// frequency, and the spread recomputed against it. Callers wanting a
    /// calibrated parameter drive the iteration themselves.
    pub fn recalibrate_spread(&mut self, params: &D::Params) -> Result<Vec<f64>, PricingError> {
        let resimulated = self.discount.resimulate(params, self.schedule.dates())?;
        let first = resimulated
            .labels()
            .first()
            .cloned()
            .ok_or(CurveError::DimensionMismatch { expected: 1, got: 0 })?;
        let column = resimulated.column(&first)?;
        let bucket = self.terms.frequency().code();

        let survival = CurveTable::with_labels(
            resimulated.dates().to_vec(),
            vec![bucket.to_string()],
            column.into_iter().map(|v| vec![v]).collect(),
        )?;
        debug!(bucket, "installed re-simulated survival curve");
        self.q.set(survival);

        self.par_spread()
    }

    fn leg(&mut self, kind: LegKind) -> Result<LegPv, PricingError> {
        let Self {
            terms,
            schedule,
            discount,
            survival,
            z,
            q,
        } = self;

        let zt = z.get_or_try_insert_with(|| {
            debug!(dates = schedule.len(), "computing discount curve");
            discount.discount_curve(schedule.dates())
        })?;
        let qt = q.get_or_try_insert_with(|| {
            debug!(rating = %terms.rating(), "computing survival curve");
            survival.survival_curve(schedule.dates(), terms.rating())
        })?;

        let dates = schedule.dates();
        let zp = zt.reindex(dates)?;
        let qp = qt.reindex(dates)?;
        let q1m = qp.column(terms.frequency().code())?;

        // The Z-normalised series only supplies the shape here: every entry
        // is overwritten with weight * Z.
        let weights = leg_weights(&q1m, dates, kind);
        let zbar = zp.scale_rows(&weights)?;

        let spec = CashFlowSpec {
            coupon: terms.coupon(),
            fee: terms.fee(),
            notional: terms.notional(),
            start_date: terms.start_date(),
        };
        let exposure = compute_exposure(schedule.native(), terms.reference_date(), &zbar, &spec)?;

        let (mut pv, mut average) = (exposure.pv, exposure.pv_avg);
        if kind == LegKind::Protection {
            let lgd = terms.loss_given_default();
            for value in &mut pv {
                *value *= lgd;
            }
            average *= lgd;
        }

        Ok(LegPv {
            per_trajectory: pv,
            average,
        })
    }
}

/// Survival pairing weights over the portfolio schedule.
fn leg_weights(q1m: &[f64], dates: &[Date], kind: LegKind) -> Vec<f64> {
    let mut weights = Vec::with_capacity(q1m.len());
    if let Some(&q0) = q1m.first() {
        weights.push(q0);
    }
    for i in 1..q1m.len() {
        let dt = DayCount::Act365F.year_fraction(dates[i - 1], dates[i]);
        let paired = match kind {
            LegKind::Premium => q1m[i - 1] + q1m[i],
            LegKind::Protection => q1m[i - 1] - q1m[i],
        };
        weights.push(paired * dt);
    }
    weights
}
