//! # cdx_models: Schedules and Simulated Curve Providers
//!
//! Middle layer of the cdx workspace, providing:
//! - Schedule generation: payment frequencies, calendar tenors, and
//!   frequency-stepped date lists (`schedules`)
//! - The default curve providers behind the `cdx_core` provider traits:
//!   a Vasicek short-rate Monte Carlo discount simulator and a rating-keyed
//!   survival-curve model (`models`)
//!
//! The valuation core in `cdx_pricing` consumes these only through the
//! `DiscountCurveProvider` / `SurvivalCurveProvider` traits, so tests can
//! substitute fixed tables.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod models;
pub mod schedules;

pub use models::{CorporateCurveModel, VasicekModel, VasicekParams};
pub use schedules::{DateScheduler, Frequency, Tenor};
