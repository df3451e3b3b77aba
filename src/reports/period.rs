//! Report periods
//!
//! A period is a window ending today: the last week, month or year.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Duration, Months, NaiveDate};

/// Short Indonesian month names used in chart labels
const MONTH_SHORT: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "Mei", "Jun", "Jul", "Agu", "Sep", "Okt", "Nov", "Des",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportPeriod {
    Week,
    #[default]
    Month,
    Year,
}

/// Bucket size of a trend series
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Granularity {
    Daily,
    Monthly,
}

impl ReportPeriod {
    /// First date included in the period
    ///
    /// Calendar arithmetic clamps to the end of shorter months, so a month
    /// back from 31 March is 29 February in a leap year.
    pub fn start_date(&self, today: NaiveDate) -> NaiveDate {
        let start = match self {
            Self::Week => today.checked_sub_signed(Duration::days(7)),
            Self::Month => today.checked_sub_months(Months::new(1)),
            Self::Year => today.checked_sub_months(Months::new(12)),
        };
        start.unwrap_or(NaiveDate::MIN)
    }

    /// The start date is included
    pub fn contains(&self, date: NaiveDate, today: NaiveDate) -> bool {
        date >= self.start_date(today)
    }

    pub fn granularity(&self) -> Granularity {
        match self {
            Self::Week | Self::Month => Granularity::Daily,
            Self::Year => Granularity::Monthly,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Week => "week",
            Self::Month => "month",
            Self::Year => "year",
        }
    }
}

impl fmt::Display for ReportPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReportPeriod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "week" | "w" => Ok(Self::Week),
            "month" | "m" => Ok(Self::Month),
            "year" | "y" => Ok(Self::Year),
            other => Err(format!(
                "Unknown period '{}'. Use week, month or year",
                other
            )),
        }
    }
}

/// "15 Mar"
pub fn day_label(date: NaiveDate) -> String {
    format!("{} {}", date.day(), month_short(date.month()))
}

/// "Mar 2024"
pub fn month_label(year: i32, month: u32) -> String {
    format!("{} {}", month_short(month), year)
}

fn month_short(month: u32) -> &'static str {
    MONTH_SHORT[(month.clamp(1, 12) - 1) as usize]
}
