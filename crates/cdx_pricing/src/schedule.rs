//! Schedule reconciliation.
//!
//! A contract's cash flows, curve lookups, and leg weights all run over one
//! reconciled date axis: the portfolio schedule, the sorted union of the
//! contract's native payment schedule, the reference-date-rooted schedule,
//! and the four anchor dates (reference, start, maturity, observation).
//! Every date used downstream must be a member of this sequence; curves not
//! covering it are a data error surfaced at lookup time.

use std::collections::BTreeSet;

use cdx_core::types::Date;
use cdx_models::schedules::{DateScheduler, Frequency, ScheduleError};

use crate::engine::CdsTerms;

/// The reconciled date axis of a contract.
///
/// Holds both the native payment schedule (start to maturity at the
/// contract frequency) and the full portfolio schedule. Both are strictly
/// increasing and duplicate-free; reconciliation is idempotent.
///
/// # Examples
///
/// ```
/// use cdx_pricing::engine::CdsTermsBuilder;
/// use cdx_pricing::schedule::PortfolioSchedule;
/// use cdx_core::types::{Date, Rating};
/// use cdx_models::schedules::{DateScheduler, Frequency};
///
/// let terms = CdsTermsBuilder::new()
///     .start(Date::from_ymd(2005, 3, 10).unwrap())
///     .end(Date::from_ymd(2010, 12, 31).unwrap())
///     .frequency(Frequency::Quarterly)
///     .coupon(0.01)
///     .reference_date(Date::from_ymd(2005, 3, 10).unwrap())
///     .rating(Rating::CCC)
///     .recovery(0.0)
///     .build()
///     .unwrap();
///
/// let schedule = PortfolioSchedule::reconcile(&DateScheduler::new(), &terms).unwrap();
/// assert!(schedule.dates().contains(&terms.maturity()));
/// assert!(schedule.dates().windows(2).all(|w| w[0] < w[1]));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortfolioSchedule {
    native: Vec<Date>,
    dates: Vec<Date>,
}

impl PortfolioSchedule {
    /// Reconciles the schedule for a contract.
    pub fn reconcile(
        scheduler: &DateScheduler,
        terms: &CdsTerms,
    ) -> Result<Self, ScheduleError> {
        Self::from_parts(
            scheduler,
            terms.start_date(),
            terms.maturity(),
            terms.end_date(),
            terms.frequency(),
            terms.reference_date(),
            terms.observation_date(),
        )
    }

    /// Reconciles a schedule from raw anchor dates.
    ///
    /// The native schedule runs from `start` to `maturity`; the reference
    /// schedule from `reference_date` to `end`. An empty native schedule
    /// (maturity before start) is allowed: the portfolio schedule then
    /// still carries the four anchors.
    pub fn from_parts(
        scheduler: &DateScheduler,
        start: Date,
        maturity: Date,
        end: Date,
        frequency: Frequency,
        reference_date: Date,
        observation_date: Date,
    ) -> Result<Self, ScheduleError> {
        let native = scheduler.date_list(start, maturity, frequency, reference_date)?;
        let reference_list = scheduler.date_list(reference_date, end, frequency, reference_date)?;

        let mut merged: BTreeSet<Date> = native.iter().copied().collect();
        merged.extend(reference_list);
        merged.extend([reference_date, start, maturity, observation_date]);

        Ok(Self {
            native,
            dates: merged.into_iter().collect(),
        })
    }

    /// Returns the contract's native payment schedule.
    #[inline]
    pub fn native(&self) -> &[Date] {
        &self.native
    }

    /// Returns the full portfolio schedule.
    #[inline]
    pub fn dates(&self) -> &[Date] {
        &self.dates
    }

    /// Returns the number of portfolio-schedule dates.
    #[inline]
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    /// Returns whether the portfolio schedule is empty.
    ///
    /// Never true after reconciliation: the anchors are always present.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// Returns whether `date` belongs to the portfolio schedule.
    pub fn contains(&self, date: Date) -> bool {
        self.dates.binary_search(&date).is_ok()
    }
}
