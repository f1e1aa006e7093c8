//! Typed intervals for the date-window operators
//!
//! The date-window operators embed their interval in the SQL text instead
//! of binding it. Only strings of the form `<digits> <unit>` are ever
//! rendered, so arbitrary text cannot reach the statement.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid interval: '{0}'")]
pub struct ParseIntervalError(pub String);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IntervalUnit {
    Day,
    Week,
    Month,
    Year,
}

impl IntervalUnit {
    pub fn as_str(&self) -> &'static str {
        match self {
            IntervalUnit::Day => "day",
            IntervalUnit::Week => "week",
            IntervalUnit::Month => "month",
            IntervalUnit::Year => "year",
        }
    }
}

/// A whole number of days, weeks, months or years
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateInterval {
    amount: u32,
    unit: IntervalUnit,
}

impl DateInterval {
    pub fn new(amount: u32, unit: IntervalUnit) -> Self {
        Self { amount, unit }
    }

    pub fn days(amount: u32) -> Self {
        Self::new(amount, IntervalUnit::Day)
    }

    pub fn weeks(amount: u32) -> Self {
        Self::new(amount, IntervalUnit::Week)
    }

    pub fn months(amount: u32) -> Self {
        Self::new(amount, IntervalUnit::Month)
    }

    pub fn years(amount: u32) -> Self {
        Self::new(amount, IntervalUnit::Year)
    }

    pub fn amount(&self) -> u32 {
        self.amount
    }

    pub fn unit(&self) -> IntervalUnit {
        self.unit
    }
}

impl fmt::Display for DateInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let plural = if self.amount == 1 { "" } else { "s" };
        write!(f, "{} {}{}", self.amount, self.unit.as_str(), plural)
    }
}

impl FromStr for DateInterval {
    type Err = ParseIntervalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseIntervalError(s.to_string());
        let mut parts = s.split_whitespace();
        let (Some(amount), Some(unit), None) = (parts.next(), parts.next(), parts.next()) else {
            return Err(err());
        };

        if amount.is_empty() || !amount.chars().all(|c| c.is_ascii_digit()) {
            return Err(err());
        }
        let amount: u32 = amount.parse().map_err(|_| err())?;

        let unit = unit.to_ascii_lowercase();
        let unit = match unit.strip_suffix('s').unwrap_or(&unit) {
            "day" => IntervalUnit::Day,
            "week" => IntervalUnit::Week,
            "month" => IntervalUnit::Month,
            "year" => IntervalUnit::Year,
            _ => return Err(err()),
        };

        Ok(Self { amount, unit })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(DateInterval::days(1).to_string(), "1 day");
        assert_eq!(DateInterval::days(30).to_string(), "30 days");
        assert_eq!(DateInterval::years(2).to_string(), "2 years");
    }

    #[test]
    fn test_parse_accepts_plain_forms() {
        assert_eq!("3 days".parse::<DateInterval>().unwrap(), DateInterval::days(3));
        assert_eq!("1 MONTH".parse::<DateInterval>().unwrap(), DateInterval::months(1));
        assert_eq!("  2   weeks ".parse::<DateInterval>().unwrap(), DateInterval::weeks(2));
    }

    #[test]
    fn test_parse_rejects_injection_attempts() {
        let inputs = [
            "1 day' OR '1'='1",
            "1 day; DROP TABLE users",
            "-1 day",
            "+1 day",
            "day",
            "1",
            "1 fortnight",
            "1 day 2 hours",
            "",
        ];

        for input in inputs {
            assert!(
                input.parse::<DateInterval>().is_err(),
                "Should reject interval: {}",
                input
            );
        }
    }
}
