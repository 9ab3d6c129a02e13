//! Error types for date and rating construction.

use thiserror::Error;

/// Date-related errors.
///
/// # Variants
/// - `InvalidDate`: invalid date components (e.g. February 30th)
/// - `ParseError`: failed to parse a date string
///
/// # Examples
/// ```
/// use cdx_core::types::error::DateError;
///
/// let err = DateError::InvalidDate { year: 2024, month: 2, day: 30 };
/// assert_eq!(format!("{}", err), "Invalid date: 2024-2-30");
/// ```
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DateError {
    /// Invalid date components (e.g. February 30th).
    #[error("Invalid date: {year}-{month}-{day}")]
    InvalidDate {
        /// Year component
        year: i32,
        /// Month component (1-12)
        month: u32,
        /// Day component (1-31)
        day: u32,
    },

    /// Failed to parse a date string.
    #[error("Date parse error: {0}")]
    ParseError(String),
}

/// Rating-related errors.
///
/// # Examples
/// ```
/// use cdx_core::types::error::RatingError;
///
/// let err = RatingError::UnknownRating("ZZZ".to_string());
/// assert!(format!("{}", err).contains("ZZZ"));
/// ```
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RatingError {
    /// Unknown rating code.
    #[error("Unknown rating: {0}")]
    UnknownRating(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_date_display() {
        let err = DateError::InvalidDate {
            year: 2023,
            month: 2,
            day: 29,
        };
        assert_eq!(format!("{}", err), "Invalid date: 2023-2-29");
    }

    #[test]
    fn test_parse_error_display() {
        let err = DateError::ParseError("bad input".to_string());
        assert_eq!(format!("{}", err), "Date parse error: bad input");
    }

    #[test]
    fn test_error_trait_implementation() {
        let err = DateError::ParseError("x".to_string());
        let _: &dyn std::error::Error = &err;
        let err = RatingError::UnknownRating("x".to_string());
        let _: &dyn std::error::Error = &err;
    }
}
