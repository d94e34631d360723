//! Time-range tokens for insight queries.

use chrono::NaiveDate;
use std::fmt;
use tracing::warn;

/// Analysis window. Presets mirror the platform's date presets; `Custom`
/// holds an explicit inclusive date span parsed from a
/// `YYYY-MM-DD_YYYY-MM-DD` literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeRange {
    Today,
    Yesterday,
    Last7d,
    Last14d,
    Last30d,
    ThisMonth,
    LastMonth,
    Lifetime,
    Custom { since: NaiveDate, until: NaiveDate },
}

impl TimeRange {
    /// Parse a time-range token. Unknown tokens fall back to `last_30d`,
    /// matching the upstream platform default.
    pub fn parse(token: &str) -> Self {
        match token {
            "today" => TimeRange::Today,
            "yesterday" => TimeRange::Yesterday,
            "last_7d" => TimeRange::Last7d,
            "last_14d" => TimeRange::Last14d,
            "last_30d" => TimeRange::Last30d,
            "this_month" => TimeRange::ThisMonth,
            "last_month" => TimeRange::LastMonth,
            // The platform calls the lifetime preset "maximum".
            "lifetime" | "maximum" => TimeRange::Lifetime,
            other => {
                if let Some(range) = Self::parse_custom(other) {
                    return range;
                }
                warn!(token = other, "Unknown time range token, falling back to last_30d");
                TimeRange::Last30d
            }
        }
    }

    fn parse_custom(token: &str) -> Option<Self> {
        let (since, until) = token.split_once('_')?;
        let since = NaiveDate::parse_from_str(since, "%Y-%m-%d").ok()?;
        let until = NaiveDate::parse_from_str(until, "%Y-%m-%d").ok()?;
        (since <= until).then_some(TimeRange::Custom { since, until })
    }

    /// Upper bound, in days, of the window this range can cover. Used to
    /// cap `days_running`. `Lifetime` is unbounded.
    pub fn window_days(&self) -> Option<u32> {
        match self {
            TimeRange::Today | TimeRange::Yesterday => Some(1),
            TimeRange::Last7d => Some(7),
            TimeRange::Last14d => Some(14),
            TimeRange::Last30d => Some(30),
            TimeRange::ThisMonth | TimeRange::LastMonth => Some(31),
            TimeRange::Lifetime => None,
            TimeRange::Custom { since, until } => {
                Some((*until - *since).num_days() as u32 + 1)
            }
        }
    }

    /// True when the given date falls inside an explicit custom span.
    /// Preset windows accept every date (the store is already scoped to
    /// the requested window by whoever seeded it).
    pub fn contains(&self, date: NaiveDate) -> bool {
        match self {
            TimeRange::Custom { since, until } => *since <= date && date <= *until,
            _ => true,
        }
    }
}

impl Default for TimeRange {
    fn default() -> Self {
        TimeRange::Last30d
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimeRange::Today => write!(f, "today"),
            TimeRange::Yesterday => write!(f, "yesterday"),
            TimeRange::Last7d => write!(f, "last_7d"),
            TimeRange::Last14d => write!(f, "last_14d"),
            TimeRange::Last30d => write!(f, "last_30d"),
            TimeRange::ThisMonth => write!(f, "this_month"),
            TimeRange::LastMonth => write!(f, "last_month"),
            TimeRange::Lifetime => write!(f, "lifetime"),
            TimeRange::Custom { since, until } => write!(f, "{since}_{until}"),
        }
    }
}
