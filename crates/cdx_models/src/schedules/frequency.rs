//! Payment frequency and calendar tenor types.

use std::fmt;
use std::str::FromStr;

use super::error::ScheduleError;

/// Payment frequency for scheduled instruments.
///
/// Survival tables label their tenor-bucket columns with the frequency
/// code, so `code()` doubles as the column key.
///
/// # Examples
///
/// ```
/// use cdx_models::schedules::Frequency;
///
/// let freq = Frequency::Quarterly;
/// assert_eq!(freq.months(), 3);
/// assert_eq!(freq.code(), "3M");
///
/// let parsed: Frequency = "3M".parse().unwrap();
/// assert_eq!(parsed, Frequency::Quarterly);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Frequency {
    /// Monthly payments.
    Monthly,
    /// Quarterly payments.
    Quarterly,
    /// Semi-annual payments.
    SemiAnnual,
    /// Annual payments.
    Annual,
}

impl Frequency {
    /// All frequencies, shortest period first.
    pub const ALL: [Frequency; 4] = [
        Frequency::Monthly,
        Frequency::Quarterly,
        Frequency::SemiAnnual,
        Frequency::Annual,
    ];

    /// Returns the number of months between payment dates.
    #[inline]
    pub fn months(&self) -> u32 {
        match self {
            Frequency::Monthly => 1,
            Frequency::Quarterly => 3,
            Frequency::SemiAnnual => 6,
            Frequency::Annual => 12,
        }
    }

    /// Returns the number of payment periods per year.
    #[inline]
    pub fn periods_per_year(&self) -> u32 {
        12 / self.months()
    }

    /// Returns the tenor code used as a curve column label.
    #[inline]
    pub fn code(&self) -> &'static str {
        match self {
            Frequency::Monthly => "1M",
            Frequency::Quarterly => "3M",
            Frequency::SemiAnnual => "6M",
            Frequency::Annual => "1Y",
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for Frequency {
    type Err = ScheduleError;

    /// Parses a frequency from a tenor code or name (case-insensitive).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().replace(['-', '_', ' '], "").as_str() {
            "1M" | "MONTHLY" => Ok(Frequency::Monthly),
            "3M" | "QUARTERLY" => Ok(Frequency::Quarterly),
            "6M" | "SEMIANNUAL" => Ok(Frequency::SemiAnnual),
            "1Y" | "12M" | "ANNUAL" | "YEARLY" => Ok(Frequency::Annual),
            _ => Err(ScheduleError::InvalidTenor {
                input: s.to_string(),
            }),
        }
    }
}

/// A calendar delay expressed in whole months.
///
/// Realizes delay extraction from tenor strings: "6M" is six months,
/// "2Y" is twenty-four.
///
/// # Examples
///
/// ```
/// use cdx_models::schedules::Tenor;
/// use cdx_core::types::Date;
///
/// let two_years: Tenor = "2Y".parse().unwrap();
/// assert_eq!(two_years.months(), 24);
///
/// let start = Date::from_ymd(2005, 3, 10).unwrap();
/// let maturity = two_years.add_to(start).unwrap();
/// assert_eq!(maturity, Date::from_ymd(2007, 3, 10).unwrap());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tenor {
    months: u32,
}

impl Tenor {
    /// Creates a tenor of the given number of months.
    #[inline]
    pub fn from_months(months: u32) -> Self {
        Self { months }
    }

    /// Creates a tenor of the given number of years.
    #[inline]
    pub fn from_years(years: u32) -> Self {
        Self { months: years * 12 }
    }

    /// Returns the tenor length in months.
    #[inline]
    pub fn months(&self) -> u32 {
        self.months
    }

    /// Returns `date` shifted forward by this tenor.
    pub fn add_to(&self, date: cdx_core::types::Date) -> Result<cdx_core::types::Date, ScheduleError> {
        date.add_months(self.months)
            .map_err(|e| ScheduleError::DateOverflow {
                reason: e.to_string(),
            })
    }
}

impl fmt::Display for Tenor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.months % 12 == 0 && self.months > 0 {
            write!(f, "{}Y", self.months / 12)
        } else {
            write!(f, "{}M", self.months)
        }
    }
}

impl FromStr for Tenor {
    type Err = ScheduleError;

    /// Parses a tenor string such as "6M", "2Y", or "18M".
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim().to_uppercase();
        let err = || ScheduleError::InvalidTenor {
            input: s.to_string(),
        };
        if let Some(count) = trimmed.strip_suffix('M') {
            let count: u32 = count.parse().map_err(|_| err())?;
            Ok(Tenor::from_months(count))
        } else if let Some(count) = trimmed.strip_suffix('Y') {
            let count: u32 = count.parse().map_err(|_| err())?;
            Ok(Tenor::from_years(count))
        } else {
            Err(err())
        }
    }
}

#[cfg(feature = "serde")]
mod serde_impl {
    use super::Tenor;
    use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
    use std::str::FromStr;

    impl Serialize for Tenor {
        fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            serializer.serialize_str(&self.to_string())
        }
    }

    impl<'de> Deserialize<'de> for Tenor {
        fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
        where
            D: Deserializer<'de>,
        {
            let s = String::deserialize(deserializer)?;
            Tenor::from_str(&s).map_err(de::Error::custom)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cdx_core::types::Date;

    #[test]
    fn test_frequency_months() {
        assert_eq!(Frequency::Monthly.months(), 1);
        assert_eq!(Frequency::Quarterly.months(), 3);
        assert_eq!(Frequency::SemiAnnual.months(), 6);
        assert_eq!(Frequency::Annual.months(), 12);
    }

    #[test]
    fn test_frequency_periods_per_year() {
        assert_eq!(Frequency::Monthly.periods_per_year(), 12);
        assert_eq!(Frequency::Quarterly.periods_per_year(), 4);
        assert_eq!(Frequency::Annual.periods_per_year(), 1);
    }

    #[test]
    fn test_frequency_code_parse_roundtrip() {
        for freq in Frequency::ALL {
            assert_eq!(freq.code().parse::<Frequency>().unwrap(), freq);
        }
    }

    #[test]
    fn test_frequency_from_name() {
        assert_eq!("quarterly".parse::<Frequency>().unwrap(), Frequency::Quarterly);
        assert_eq!("Semi-Annual".parse::<Frequency>().unwrap(), Frequency::SemiAnnual);
        assert!("biweekly".parse::<Frequency>().is_err());
    }

    #[test]
    fn test_tenor_parse() {
        assert_eq!("6M".parse::<Tenor>().unwrap().months(), 6);
        assert_eq!("2Y".parse::<Tenor>().unwrap().months(), 24);
        assert_eq!("18m".parse::<Tenor>().unwrap().months(), 18);
    }

    #[test]
    fn test_tenor_parse_invalid() {
        assert!("".parse::<Tenor>().is_err());
        assert!("6Q".parse::<Tenor>().is_err());
        assert!("Y2".parse::<Tenor>().is_err());
    }

    #[test]
    fn test_tenor_display() {
        assert_eq!(Tenor::from_months(6).to_string(), "6M");
        assert_eq!(Tenor::from_years(2).to_string(), "2Y");
        assert_eq!(Tenor::from_months(18).to_string(), "18M");
    }

    #[test]
    fn test_tenor_add_to() {
        let start = Date::from_ymd(2005, 3, 10).unwrap();
        let shifted = Tenor::from_years(2).add_to(start).unwrap();
        assert_eq!(shifted, Date::from_ymd(2007, 3, 10).unwrap());
    }
}
