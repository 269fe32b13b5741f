//! Calendar month as a closed enum.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The twelve calendar months.
///
/// Parsed case-insensitively from full English names; persisted in the
/// canonical capitalized form. Numeric forms are rejected to keep the
/// period key unambiguous.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Month {
    /// January.
    January = 1,
    /// February.
    February = 2,
    /// March.
    March = 3,
    /// April.
    April = 4,
    /// May.
    May = 5,
    /// June.
    June = 6,
    /// July.
    July = 7,
    /// August.
    August = 8,
    /// September.
    September = 9,
    /// October.
    October = 10,
    /// November.
    November = 11,
    /// December.
    December = 12,
}

impl Month {
    /// Parse a month from its full English name, case-insensitively.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "january" => Some(Self::January),
            "february" => Some(Self::February),
            "march" => Some(Self::March),
            "april" => Some(Self::April),
            "may" => Some(Self::May),
            "june" => Some(Self::June),
            "july" => Some(Self::July),
            "august" => Some(Self::August),
            "september" => Some(Self::September),
            "october" => Some(Self::October),
            "november" => Some(Self::November),
            "december" => Some(Self::December),
            _ => None,
        }
    }

    /// Returns the canonical capitalized name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::January => "January",
            Self::February => "February",
            Self::March => "March",
            Self::April => "April",
            Self::May => "May",
            Self::June => "June",
            Self::July => "July",
            Self::August => "August",
            Self::September => "September",
            Self::October => "October",
            Self::November => "November",
            Self::December => "December",
        }
    }

    /// Returns the month number, 1-12.
    #[must_use]
    pub const fn number(&self) -> u8 {
        *self as u8
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_canonical_names() {
        assert_eq!(Month::parse("January"), Some(Month::January));
        assert_eq!(Month::parse("December"), Some(Month::December));
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!(Month::parse("march"), Some(Month::March));
        assert_eq!(Month::parse("MARCH"), Some(Month::March));
        assert_eq!(Month::parse("mArCh"), Some(Month::March));
    }

    #[test]
    fn test_numeric_forms_rejected() {
        assert_eq!(Month::parse("1"), None);
        assert_eq!(Month::parse("03"), None);
        assert_eq!(Month::parse("12"), None);
    }

    #[test]
    fn test_abbreviations_rejected() {
        assert_eq!(Month::parse("Jan"), None);
        assert_eq!(Month::parse("Sept"), None);
    }

    #[test]
    fn test_canonical_round_trip() {
        for m in [
            Month::January,
            Month::February,
            Month::March,
            Month::April,
            Month::May,
            Month::June,
            Month::July,
            Month::August,
            Month::September,
            Month::October,
            Month::November,
            Month::December,
        ] {
            assert_eq!(Month::parse(m.as_str()), Some(m));
        }
    }

    #[test]
    fn test_month_numbers() {
        assert_eq!(Month::January.number(), 1);
        assert_eq!(Month::June.number(), 6);
        assert_eq!(Month::December.number(), 12);
    }

    #[test]
    fn test_month_ordering() {
        assert!(Month::January < Month::February);
        assert!(Month::November < Month::December);
    }
}
