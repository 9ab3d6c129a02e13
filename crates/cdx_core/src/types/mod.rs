//! Core value types: dates, day counts, ratings, and their errors.

pub mod error;
pub mod rating;
pub mod time;

pub use error::DateError;
pub use rating::Rating;
pub use time::{Date, DayCount};
