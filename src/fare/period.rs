//! Schedule periods and their pricing factors

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// How long a scheduled ride repeats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SchedulePeriod {
    #[default]
    #[serde(rename = "once")]
    Once,
    #[serde(rename = "15days")]
    FifteenDays,
    #[serde(rename = "1month")]
    OneMonth,
    #[serde(rename = "3months")]
    ThreeMonths,
    #[serde(rename = "6months")]
    SixMonths,
    #[serde(rename = "1year")]
    OneYear,
}

impl SchedulePeriod {
    pub const ALL: [SchedulePeriod; 6] = [
        SchedulePeriod::Once,
        SchedulePeriod::FifteenDays,
        SchedulePeriod::OneMonth,
        SchedulePeriod::ThreeMonths,
        SchedulePeriod::SixMonths,
        SchedulePeriod::OneYear,
    ];

    /// Number of rides billed
    pub fn multiplier(self) -> f64 {
        match self {
            SchedulePeriod::Once => 1.0,
            SchedulePeriod::FifteenDays => 14.0,
            SchedulePeriod::OneMonth => 30.0,
            SchedulePeriod::ThreeMonths => 90.0,
            SchedulePeriod::SixMonths => 180.0,
            SchedulePeriod::OneYear => 365.0,
        }
    }

    /// Fractional discount on the total
    pub fn discount(self) -> f64 {
        match self {
            SchedulePeriod::Once => 0.0,
            SchedulePeriod::FifteenDays => 0.10,
            SchedulePeriod::OneMonth => 0.15,
            SchedulePeriod::ThreeMonths => 0.20,
            SchedulePeriod::SixMonths => 0.25,
            SchedulePeriod::OneYear => 0.30,
        }
    }

    /// Total for the period given a single-ride base fare, rounded to whole units
    pub fn apply(self, base: f64) -> u64 {
        let total = base * self.multiplier() * (1.0 - self.discount());
        if total.is_finite() && total > 0.0 {
            total.round() as u64
        } else {
            0
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SchedulePeriod::Once => "once",
            SchedulePeriod::FifteenDays => "15days",
            SchedulePeriod::OneMonth => "1month",
            SchedulePeriod::ThreeMonths => "3months",
            SchedulePeriod::SixMonths => "6months",
            SchedulePeriod::OneYear => "1year",
        }
    }
}

impl fmt::Display for SchedulePeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SchedulePeriod {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SchedulePeriod::ALL
            .into_iter()
            .find(|p| p.as_str() == s.trim())
            .ok_or_else(|| Error::InvalidPeriod(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_once_is_base_fare() {
        assert_eq!(SchedulePeriod::Once.apply(120.0), 120);
        assert_eq!(SchedulePeriod::Once.apply(99.5), 100);
    }

    #[test]
    fn test_period_totals() {
        // 100 * 14 * 0.9
        assert_eq!(SchedulePeriod::FifteenDays.apply(100.0), 1260);
        // 100 * 30 * 0.85
        assert_eq!(SchedulePeriod::OneMonth.apply(100.0), 2550);
        // 100 * 365 * 0.7
        assert_eq!(SchedulePeriod::OneYear.apply(100.0), 25550);
    }

    #[test]
    fn test_negative_or_nan_base_is_zero() {
        assert_eq!(SchedulePeriod::OneMonth.apply(-5.0), 0);
        assert_eq!(SchedulePeriod::Once.apply(f64::NAN), 0);
    }

    #[test]
    fn test_parse_period() {
        assert_eq!("3months".parse::<SchedulePeriod>().unwrap(), SchedulePeriod::ThreeMonths);
        assert!("weekly".parse::<SchedulePeriod>().is_err());
    }
}
