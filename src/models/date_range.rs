//! Date range selection
//!
//! The dashboard filters transactions by a relative window ending on a
//! reference day ("today"). `AllTime` starts at the earliest transaction.

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A relative date window selectable from the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum DateRange {
    AllTime,
    LastWeek,
    #[default]
    LastMonth,
    Last60Days,
    Last90Days,
    Last6Months,
    LastYear,
}

impl DateRange {
    /// All selections, in menu order
    pub const ALL: [DateRange; 7] = [
        Self::AllTime,
        Self::LastWeek,
        Self::LastMonth,
        Self::Last60Days,
        Self::Last90Days,
        Self::Last6Months,
        Self::LastYear,
    ];

    /// Window length in days; `None` for `AllTime`
    pub fn days(&self) -> Option<i64> {
        match self {
            Self::AllTime => None,
            Self::LastWeek => Some(7),
            Self::LastMonth => Some(30),
            Self::Last60Days => Some(60),
            Self::Last90Days => Some(90),
            Self::Last6Months => Some(180),
            Self::LastYear => Some(365),
        }
    }

    /// Human-readable label, as shown in the range selector
    pub fn label(&self) -> &'static str {
        match self {
            Self::AllTime => "All Time",
            Self::LastWeek => "Last Week",
            Self::LastMonth => "Last Month",
            Self::Last60Days => "Last 60 Days",
            Self::Last90Days => "Last 90 Days",
            Self::Last6Months => "Last 6 Months",
            Self::LastYear => "Last Year",
        }
    }

    /// Resolve the selection to inclusive `[start, end]` bounds.
    ///
    /// `earliest` is the minimum date in the loaded data and is only used by
    /// `AllTime`; with no data the window collapses to `[today, today]`.
    pub fn resolve(&self, earliest: Option<NaiveDate>, today: NaiveDate) -> ResolvedRange {
        let start = match self.days() {
            Some(days) => today
                .checked_sub_signed(Duration::days(days))
                .unwrap_or(NaiveDate::MIN),
            None => earliest.unwrap_or(today),
        };

        ResolvedRange {
            selection: *self,
            start,
            end: today,
        }
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for DateRange {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .to_lowercase()
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '-' && *c != '_')
            .collect();

        match normalized.as_str() {
            "all" | "alltime" => Ok(Self::AllTime),
            "week" | "lastweek" | "7d" => Ok(Self::LastWeek),
            "month" | "lastmonth" | "30d" => Ok(Self::LastMonth),
            "60d" | "last60days" => Ok(Self::Last60Days),
            "90d" | "last90days" => Ok(Self::Last90Days),
            "6m" | "last6months" | "180d" => Ok(Self::Last6Months),
            "year" | "lastyear" | "365d" => Ok(Self::LastYear),
            _ => Err(format!(
                "Unknown date range '{}'. Use one of: all, week, month, 60d, 90d, 6m, year",
                s.trim()
            )),
        }
    }
}

/// A date range resolved against a reference day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedRange {
    pub selection: DateRange,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl ResolvedRange {
    /// Check if a date falls within the range (inclusive on both ends)
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }
}

impl fmt::Display for ResolvedRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} to {})", self.selection, self.start, self.end)
    }
}
