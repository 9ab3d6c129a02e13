//! # cdx_core: Foundation for the cdx CDS Valuation Workspace
//!
//! Bottom layer of the workspace, providing:
//! - Time types: `Date`, `DayCount` (`types::time`)
//! - Credit ratings: `Rating` (`types::rating`)
//! - The date-indexed trajectory table that curves travel in: `CurveTable`
//!   (`table`)
//! - Provider traits for externally simulated curves (`curve`)
//! - Error types: `DateError`, `CurveError` (`types::error`, `table`)
//!
//! This crate has no dependencies on other cdx_* crates and a minimal
//! external footprint:
//! - chrono: date arithmetic
//! - thiserror: structured errors
//! - serde: serialisation support (optional)
//!
//! ## Usage
//!
//! ```rust
//! use cdx_core::types::{Date, DayCount};
//!
//! let start = Date::from_ymd(2005, 3, 10).unwrap();
//! let end = Date::from_ymd(2005, 6, 10).unwrap();
//! let dt = DayCount::Act365F.year_fraction(start, end);
//! assert!((dt - 92.0 / 365.0).abs() < 1e-12);
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod curve;
pub mod table;
pub mod types;

pub use curve::{DiscountCurveProvider, SurvivalCurveProvider};
pub use table::{CurveError, CurveTable};
pub use types::{Date, DayCount, Rating};
