//! The valuation engine: contract terms, lazy curve cache, legs, and
//! spread/value algebra.

mod cache;
mod cds;
mod terms;

pub use cache::Cached;
pub use cds::{Cds, LegPv, Side, SPREAD_EPSILON};
pub use terms::{CdsTerms, CdsTermsBuilder, TermsError};
