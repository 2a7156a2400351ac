//! Financial-year calendar used across the pipeline.
//!
//! The financial year runs April 1 to March 31 and is labeled by its starting
//! calendar year, e.g. "2024-25". Quarters follow the same April start:
//! Q1 = Apr-Jun, Q2 = Jul-Sep, Q3 = Oct-Dec, Q4 = Jan-Mar.

use chrono::{Datelike, NaiveDate};
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::errors::{Error, Result, ValidationError};

lazy_static! {
    static ref FY_LABEL_RE: Regex = Regex::new(r"^(\d{4})-(\d{2})$").unwrap();
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Quarter {
    Q1,
    Q2,
    Q3,
    Q4,
}

impl Quarter {
    /// Carry-forward walks quarters strictly in this order.
    pub const ORDERED: [Quarter; 4] = [Quarter::Q1, Quarter::Q2, Quarter::Q3, Quarter::Q4];

    pub fn from_month(month: u32) -> Self {
        match month {
            4..=6 => Quarter::Q1,
            7..=9 => Quarter::Q2,
            10..=12 => Quarter::Q3,
            _ => Quarter::Q4,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Quarter::Q1 => "Q1",
            Quarter::Q2 => "Q2",
            Quarter::Q3 => "Q3",
            Quarter::Q4 => "Q4",
        }
    }

    pub fn parse(value: &str) -> Result<Self> {
        match value {
            "Q1" => Ok(Quarter::Q1),
            "Q2" => Ok(Quarter::Q2),
            "Q3" => Ok(Quarter::Q3),
            "Q4" => Ok(Quarter::Q4),
            other => Err(Error::Validation(ValidationError::InvalidInput(format!(
                "Unknown quarter '{}', expected Q1..Q4",
                other
            )))),
        }
    }
}

impl std::fmt::Display for Quarter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Either one quarter or the whole financial year.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuarterSelection {
    All,
    One(Quarter),
}

impl QuarterSelection {
    /// Parses the API/UI value: the sentinel "all" (case-insensitive) or a
    /// quarter label.
    pub fn parse(value: &str) -> Result<Self> {
        if value.eq_ignore_ascii_case("all") {
            return Ok(QuarterSelection::All);
        }
        Quarter::parse(value).map(QuarterSelection::One)
    }
}

/// A financial year, stored as its starting calendar year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FinancialYear {
    start_year: i32,
}

impl FinancialYear {
    pub fn new(start_year: i32) -> Self {
        FinancialYear { start_year }
    }

    /// The financial year a date belongs to: month >= April starts the year.
    pub fn from_date(date: NaiveDate) -> Self {
        let start_year = if date.month() >= 4 {
            date.year()
        } else {
            date.year() - 1
        };
        FinancialYear { start_year }
    }

    /// Parses a "YYYY-YY" label, rejecting labels whose suffix does not match
    /// the following year.
    pub fn parse(label: &str) -> Result<Self> {
        let caps = FY_LABEL_RE.captures(label).ok_or_else(|| {
            Error::Validation(ValidationError::InvalidInput(format!(
                "Financial year '{}' is not in YYYY-YY form",
                label
            )))
        })?;
        let start_year: i32 = caps[1]
            .parse()
            .map_err(|_| Error::Validation(ValidationError::InvalidInput(label.to_string())))?;
        let suffix: i32 = caps[2]
            .parse()
            .map_err(|_| Error::Validation(ValidationError::InvalidInput(label.to_string())))?;
        if suffix != (start_year + 1) % 100 {
            return Err(Error::Validation(ValidationError::InvalidInput(format!(
                "Financial year '{}' has a mismatched suffix",
                label
            ))));
        }
        Ok(FinancialYear { start_year })
    }

    pub fn start_year(&self) -> i32 {
        self.start_year
    }

    pub fn label(&self) -> String {
        format!("{}-{:02}", self.start_year, (self.start_year + 1) % 100)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        FinancialYear::from_date(date) == *self
    }

    /// The quarter a date falls in, or None when the date is outside this
    /// financial year.
    pub fn quarter_of(&self, date: NaiveDate) -> Option<Quarter> {
        if self.contains(date) {
            Some(Quarter::from_month(date.month()))
        } else {
            None
        }
    }
}

impl std::fmt::Display for FinancialYear {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.label())
    }
}

impl Serialize for FinancialYear {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.label())
    }
}

impl<'de> Deserialize<'de> for FinancialYear {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let label = String::deserialize(deserializer)?;
        FinancialYear::parse(&label).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quarter_mapping_starts_in_april() {
        assert_eq!(Quarter::from_month(4), Quarter::Q1);
        assert_eq!(Quarter::from_month(6), Quarter::Q1);
        assert_eq!(Quarter::from_month(7), Quarter::Q2);
        assert_eq!(Quarter::from_month(12), Quarter::Q3);
        assert_eq!(Quarter::from_month(1), Quarter::Q4);
        assert_eq!(Quarter::from_month(3), Quarter::Q4);
    }

    #[test]
    fn year_boundary_is_april_first() {
        let march = NaiveDate::from_ymd_opt(2024, 3, 31).unwrap();
        let april = NaiveDate::from_ymd_opt(2024, 4, 1).unwrap();
        assert_eq!(FinancialYear::from_date(march).label(), "2023-24");
        assert_eq!(FinancialYear::from_date(april).label(), "2024-25");
    }

    #[test]
    fn label_suffix_must_match() {
        assert!(FinancialYear::parse("2024-25").is_ok());
        assert!(FinancialYear::parse("2024-26").is_err());
        assert!(FinancialYear::parse("24-25").is_err());
        assert!(FinancialYear::parse("garbage").is_err());
    }

    #[test]
    fn century_rollover_label() {
        assert_eq!(FinancialYear::new(2099).label(), "2099-00");
    }
}
