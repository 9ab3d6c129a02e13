//! # cdx_pricing: CDS Valuation Engine
//!
//! Top layer of the cdx workspace. Prices a single-name Credit Default
//! Swap off simulated curves:
//! - Schedule reconciliation across the contract, reference-date, and
//!   anchor date sets (`schedule`)
//! - Trajectory-aware exposure aggregation (`exposure`)
//! - Premium/protection leg construction and the spread/value algebra
//!   (`engine`)
//! - Explicit pricing configuration (`config`)
//!
//! Curves arrive through the `cdx_core` provider traits, lazily computed
//! and cached per contract; tests and calibration loops inject fixed
//! tables through the override hooks instead.
//!
//! ## Usage
//!
//! ```rust
//! use cdx_pricing::config::PricingConfig;
//! use cdx_pricing::engine::{Cds, CdsTermsBuilder, Side};
//! use cdx_core::types::{Date, Rating};
//! use cdx_models::models::{CorporateCurveModel, VasicekModel, VasicekParams};
//! use cdx_models::schedules::Frequency;
//!
//! let config = PricingConfig::default();
//! let terms = CdsTermsBuilder::new()
//!     .start(Date::from_ymd(2005, 3, 10).unwrap())
//!     .end(Date::from_ymd(2010, 12, 31).unwrap())
//!     .frequency(Frequency::Quarterly)
//!     .coupon(0.01)
//!     .reference_date(Date::from_ymd(2005, 3, 10).unwrap())
//!     .rating(Rating::CCC)
//!     .recovery(0.4)
//!     .config(&config)
//!     .build()
//!     .unwrap();
//!
//! let params = VasicekParams::new(3.0, 0.05, 0.01, 0.03).unwrap();
//! let discount = VasicekModel::new(params, config.trajectories, config.t_step, config.seed).unwrap();
//! let survival = CorporateCurveModel::new(0.4).unwrap();
//!
//! let mut cds = Cds::new(terms, discount, survival).unwrap();
//! let value = cds.value(0.02, 0.4, Side::Buyer).unwrap();
//! assert_eq!(value.len(), config.trajectories);
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod config;
pub mod engine;
pub mod error;
pub mod exposure;
pub mod schedule;

pub use config::PricingConfig;
pub use engine::{Cds, CdsTerms, CdsTermsBuilder, LegPv, Side};
pub use error::PricingError;
pub use exposure::{compute_exposure, CashFlowSpec, Exposure};
pub use schedule::PortfolioSchedule;
