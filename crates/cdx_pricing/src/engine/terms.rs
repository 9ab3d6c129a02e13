//! Immutable CDS contract terms.

use thiserror::Error;

use cdx_core::types::{Date, Rating};
use cdx_models::schedules::{Frequency, ScheduleError, Tenor};

use crate::config::PricingConfig;

/// Errors raised while building contract terms.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TermsError {
    /// A required builder field was not set.
    #[error("Missing required field: {field}")]
    MissingField {
        /// The missing field's name.
        field: &'static str,
    },

    /// Recovery rate outside [0, 1].
    #[error("Invalid recovery rate: {value}")]
    InvalidRecovery {
        /// Rejected value.
        value: f64,
    },

    /// Contract would start after its maturity.
    #[error("Contract starts after maturity: {start} > {maturity}")]
    InvalidRange {
        /// Contract start date.
        start: Date,
        /// Derived maturity date.
        maturity: Date,
    },

    /// Date arithmetic failed while deriving the maturity.
    #[error("Schedule error: {0}")]
    Schedule(#[from] ScheduleError),
}

/// Immutable economic terms of a single-name CDS.
///
/// Constructed once through [`CdsTermsBuilder`]; the maturity is derived
/// from the start date and the protection tenor at build time. The
/// `recovery` here scales the protection leg; it is a separate knob from
/// the recovery assumption baked into the survival-curve bootstrap and from
/// any valuation-time recovery override.
///
/// # Examples
///
/// ```
/// use cdx_pricing::engine::CdsTermsBuilder;
/// use cdx_core::types::{Date, Rating};
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
/// assert_eq!(terms.maturity(), Date::from_ymd(2007, 3, 10).unwrap());
/// assert_eq!(terms.notional(), 1.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct CdsTerms {
    start_date: Date,
    end_date: Date,
    maturity: Date,
    frequency: Frequency,
    coupon: f64,
    fee: f64,
    notional: f64,
    recovery: f64,
    rating: Rating,
    reference_date: Date,
    observation_date: Date,
}

impl CdsTerms {
    /// Returns the contract start date.
    #[inline]
    pub fn start_date(&self) -> Date {
        self.start_date
    }

    /// Returns the portfolio end date.
    #[inline]
    pub fn end_date(&self) -> Date {
        self.end_date
    }

    /// Returns the protection maturity (start date + protection tenor).
    #[inline]
    pub fn maturity(&self) -> Date {
        self.maturity
    }

    /// Returns the premium payment frequency.
    #[inline]
    pub fn frequency(&self) -> Frequency {
        self.frequency
    }

    /// Returns the annual coupon rate.
    #[inline]
    pub fn coupon(&self) -> f64 {
        self.coupon
    }

    /// Returns the upfront fee fraction.
    #[inline]
    pub fn fee(&self) -> f64 {
        self.fee
    }

    /// Returns the notional principal amount.
    #[inline]
    pub fn notional(&self) -> f64 {
        self.notional
    }

    /// Returns the contract recovery rate.
    #[inline]
    pub fn recovery(&self) -> f64 {
        self.recovery
    }

    /// Returns the loss given default (1 - recovery).
    #[inline]
    pub fn loss_given_default(&self) -> f64 {
        1.0 - self.recovery
    }

    /// Returns the reference entity's rating.
    #[inline]
    pub fn rating(&self) -> Rating {
        self.rating
    }

    /// Returns the valuation anchor date.
    #[inline]
    pub fn reference_date(&self) -> Date {
        self.reference_date
    }

    /// Returns the observation date (defaults to the reference date).
    #[inline]
    pub fn observation_date(&self) -> Date {
        self.observation_date
    }
}

/// Builder for [`CdsTerms`].
///
/// Required fields: start, end, frequency, coupon, reference date, rating,
/// recovery. Notional defaults to 1; the fee and the protection tenor
/// default to the shared [`PricingConfig`] values when attached via
/// [`config`](Self::config), otherwise to 0 and "2Y".
#[derive(Debug, Clone, Default)]
pub struct CdsTermsBuilder {
    start_date: Option<Date>,
    end_date: Option<Date>,
    frequency: Option<Frequency>,
    coupon: Option<f64>,
    reference_date: Option<Date>,
    rating: Option<Rating>,
    recovery: Option<f64>,
    notional: Option<f64>,
    fee: Option<f64>,
    observation_date: Option<Date>,
    protection_tenor: Option<Tenor>,
}

impl CdsTermsBuilder {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the contract start date.
    pub fn start(mut self, date: Date) -> Self {
        self.start_date = Some(date);
        self
    }

    /// Sets the portfolio end date.
    pub fn end(mut self, date: Date) -> Self {
        self.end_date = Some(date);
        self
    }

    /// Sets the premium payment frequency.
    pub fn frequency(mut self, frequency: Frequency) -> Self {
        self.frequency = Some(frequency);
        self
    }

    /// Sets the annual coupon rate.
    pub fn coupon(mut self, coupon: f64) -> Self {
        self.coupon = Some(coupon);
        self
    }

    /// Sets the valuation anchor date.
    pub fn reference_date(mut self, date: Date) -> Self {
        self.reference_date = Some(date);
        self
    }

    /// Sets the reference entity's rating.
    pub fn rating(mut self, rating: Rating) -> Self {
        self.rating = Some(rating);
        self
    }

    /// Sets the contract recovery rate.
    pub fn recovery(mut self, recovery: f64) -> Self {
        self.recovery = Some(recovery);
        self
    }

    /// Sets the notional principal amount (default 1).
    pub fn notional(mut self, notional: f64) -> Self {
        self.notional = Some(notional);
        self
    }

    /// Sets the upfront fee fraction.
    pub fn fee(mut self, fee: f64) -> Self {
        self.fee = Some(fee);
        self
    }

    /// Sets the observation date (default: reference date).
    pub fn observation_date(mut self, date: Date) -> Self {
        self.observation_date = Some(date);
        self
    }

    /// Sets the protection tenor applied to the start date.
    pub fn protection_tenor(mut self, tenor: Tenor) -> Self {
        self.protection_tenor = Some(tenor);
        self
    }

    /// Applies fee and protection tenor from the shared configuration.
    ///
    /// Explicit `fee`/`protection_tenor` calls take precedence regardless
    /// of ordering.
    pub fn config(mut self, config: &PricingConfig) -> Self {
        self.fee.get_or_insert(config.fee);
        self.protection_tenor.get_or_insert(config.protection_tenor);
        self
    }

    /// Builds the terms.
    ///
    /// # Errors
    ///
    /// `MissingField` for any unset required field, `InvalidRecovery` for a
    /// recovery outside [0, 1], `Schedule` if the maturity derivation
    /// overflows.
    pub fn build(self) -> Result<CdsTerms, TermsError> {
        let start_date = self
            .start_date
            .ok_or(TermsError::MissingField { field: "start" })?;
        let end_date = self.end_date.ok_or(TermsError::MissingField { field: "end" })?;
        let frequency = self
            .frequency
            .ok_or(TermsError::MissingField { field: "frequency" })?;
        let coupon = self.coupon.ok_or(TermsError::MissingField { field: "coupon" })?;
        let reference_date = self
            .reference_date
            .ok_or(TermsError::MissingField { field: "reference_date" })?;
        let rating = self.rating.ok_or(TermsError::MissingField { field: "rating" })?;
        let recovery = self
            .recovery
            .ok_or(TermsError::MissingField { field: "recovery" })?;

        if !recovery.is_finite() || !(0.0..=1.0).contains(&recovery) {
            return Err(TermsError::InvalidRecovery { value: recovery });
        }

        let tenor = self.protection_tenor.unwrap_or_else(|| Tenor::from_years(2));
        let maturity = tenor.add_to(start_date)?;
        if start_date > maturity {
            return Err(TermsError::InvalidRange {
                start: start_date,
                maturity,
            });
        }

        Ok(CdsTerms {
            start_date,
            end_date,
            maturity,
            frequency,
            coupon,
            fee: self.fee.unwrap_or(0.0),
            notional: self.notional.unwrap_or(1.0),
            recovery,
            rating,
            reference_date,
            observation_date: self.observation_date.unwrap_or(reference_date),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> Date {
        Date::parse(s).unwrap()
    }

    fn builder() -> CdsTermsBuilder {
        CdsTermsBuilder::new()
            .start(d("2005-03-10"))
            .end(d("2010-12-31"))
            .frequency(Frequency::Quarterly)
            .coupon(0.01)
            .reference_date(d("2005-03-10"))
            .rating(Rating::CCC)
            .recovery(0.4)
    }

    #[test]
    fn test_build_defaults() {
        let terms = builder().build().unwrap();
        assert_eq!(terms.maturity(), d("2007-03-10"));
        assert_eq!(terms.notional(), 1.0);
        assert_eq!(terms.fee(), 0.0);
        assert_eq!(terms.observation_date(), terms.reference_date());
        assert!((terms.loss_given_default() - 0.6).abs() < 1e-12);
    }

    #[test]
    fn test_missing_field() {
        let result = CdsTermsBuilder::new().build();
        assert_eq!(result.unwrap_err(), TermsError::MissingField { field: "start" });

        let result = CdsTermsBuilder::new().start(d("2005-03-10")).build();
        assert_eq!(result.unwrap_err(), TermsError::MissingField { field: "end" });
    }

    #[test]
    fn test_invalid_recovery() {
        let result = builder().recovery(1.5).build();
        assert_eq!(result.unwrap_err(), TermsError::InvalidRecovery { value: 1.5 });
    }

    #[test]
    fn test_config_defaults_without_override() {
        let mut config = PricingConfig::default();
        config.fee = 0.002;
        config.protection_tenor = Tenor::from_years(5);

        let terms = builder().config(&config).build().unwrap();
        assert_eq!(terms.fee(), 0.002);
        assert_eq!(terms.maturity(), d("2010-03-10"));
    }

    #[test]
    fn test_explicit_values_beat_config() {
        let mut config = PricingConfig::default();
        config.fee = 0.002;

        let terms = builder().fee(0.01).config(&config).build().unwrap();
        assert_eq!(terms.fee(), 0.01);

        let terms = builder().config(&config).fee(0.01).build().unwrap();
        assert_eq!(terms.fee(), 0.01);
    }

    #[test]
    fn test_custom_tenor() {
        let terms = builder()
            .protection_tenor(Tenor::from_months(6))
            .build()
            .unwrap();
        assert_eq!(terms.maturity(), d("2005-09-10"));
    }

    #[test]
    fn test_start_le_maturity_invariant() {
        let terms = builder()
            .protection_tenor(Tenor::from_months(0))
            .build()
            .unwrap();
        assert_eq!(terms.maturity(), terms.start_date());
    }
}
