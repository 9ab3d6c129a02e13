//! Issuer credit ratings.
//!
//! Ratings key the survival-curve model: each rating maps to a hazard-rate
//! level during curve construction.
//!
//! # Examples
//!
//! ```
//! use cdx_core::types::rating::Rating;
//!
//! let ccc = Rating::CCC;
//! assert_eq!(ccc.code(), "CCC");
//!
//! let parsed: Rating = "bbb".parse().unwrap();
//! assert_eq!(parsed, Rating::BBB);
//! ```

use std::fmt;
use std::str::FromStr;

use super::error::RatingError;

/// Issuer credit rating on the long-term letter scale.
///
/// Ordered from strongest (`AAA`) to weakest (`CCC`); `Ord` follows
/// declaration order, so a *greater* rating is *riskier*.
///
/// # Examples
///
/// ```
/// use cdx_core::types::rating::Rating;
///
/// assert!(Rating::CCC > Rating::AAA);
/// assert_eq!(Rating::AA.code(), "AA");
/// ```
#[non_exhaustive]
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Rating {
    /// Prime grade.
    AAA,
    /// High grade.
    AA,
    /// Upper medium grade.
    A,
    /// Lower medium grade.
    BBB,
    /// Speculative grade.
    BB,
    /// Highly speculative grade.
    B,
    /// Substantial-risk grade.
    CCC,
}

impl Rating {
    /// All ratings, strongest first.
    pub const ALL: [Rating; 7] = [
        Rating::AAA,
        Rating::AA,
        Rating::A,
        Rating::BBB,
        Rating::BB,
        Rating::B,
        Rating::CCC,
    ];

    /// Returns the letter code for this rating.
    pub fn code(&self) -> &'static str {
        match self {
            Rating::AAA => "AAA",
            Rating::AA => "AA",
            Rating::A => "A",
            Rating::BBB => "BBB",
            Rating::BB => "BB",
            Rating::B => "B",
            Rating::CCC => "CCC",
        }
    }

    /// Returns true for ratings below investment grade (BB and weaker).
    pub fn is_speculative(&self) -> bool {
        *self >= Rating::BB
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for Rating {
    type Err = RatingError;

    /// Parses a rating from its letter code (case-insensitive).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "AAA" => Ok(Rating::AAA),
            "AA" => Ok(Rating::AA),
            "A" => Ok(Rating::A),
            "BBB" => Ok(Rating::BBB),
            "BB" => Ok(Rating::BB),
            "B" => Ok(Rating::B),
            "CCC" => Ok(Rating::CCC),
            _ => Err(RatingError::UnknownRating(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_roundtrip() {
        for rating in Rating::ALL {
            assert_eq!(rating.code().parse::<Rating>().unwrap(), rating);
        }
    }

    #[test]
    fn test_ordering_is_riskiness() {
        assert!(Rating::AAA < Rating::BBB);
        assert!(Rating::BBB < Rating::CCC);
    }

    #[test]
    fn test_speculative_boundary() {
        assert!(!Rating::BBB.is_speculative());
        assert!(Rating::BB.is_speculative());
        assert!(Rating::CCC.is_speculative());
    }

    #[test]
    fn test_from_str_case_insensitive() {
        assert_eq!("ccc".parse::<Rating>().unwrap(), Rating::CCC);
        assert_eq!("Aa".parse::<Rating>().unwrap(), Rating::AA);
    }

    #[test]
    fn test_from_str_unknown() {
        assert!("D".parse::<Rating>().is_err());
        assert!("".parse::<Rating>().is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Rating::BBB), "BBB");
    }
}
