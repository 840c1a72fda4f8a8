use chrono::{DateTime, Datelike, Duration, TimeZone, Utc};
use std::fmt;
use std::str::FromStr;

use super::types::{Message, MessageStatus};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Only(MessageStatus),
}

impl StatusFilter {
    /// all -> unread -> read -> replied -> all
    pub fn cycle(self) -> Self {
        match self {
            Self::All => Self::Only(MessageStatus::Unread),
            Self::Only(MessageStatus::Unread) => Self::Only(MessageStatus::Read),
            Self::Only(MessageStatus::Read) => Self::Only(MessageStatus::Replied),
            Self::Only(MessageStatus::Replied) => Self::All,
        }
    }

    pub fn matches(self, status: MessageStatus) -> bool {
        match self {
            Self::All => true,
            Self::Only(s) => s == status,
        }
    }
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("all"),
            Self::Only(s) => write!(f, "{}", s),
        }
    }
}

impl FromStr for StatusFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(Self::All);
        }
        s.parse().map(Self::Only)
    }
}

/// Recency bucket for the date filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DateBucket {
    #[default]
    All,
    Today,
    Week,
    Month,
}

impl DateBucket {
    pub fn cycle(self) -> Self {
        match self {
            Self::All => Self::Today,
            Self::Today => Self::Week,
            Self::Week => Self::Month,
            Self::Month => Self::All,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Today => "today",
            Self::Week => "week",
            Self::Month => "month",
        }
    }

    pub fn contains<Tz: TimeZone>(self, created: &DateTime<Utc>, now: &DateTime<Tz>) -> bool {
        match self {
            Self::All => true,
            Self::Today => is_today(created, now),
            Self::Week => is_this_week(created, now),
            Self::Month => is_this_month(created, now),
        }
    }
}

impl fmt::Display for DateBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DateBucket {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "all" => Ok(Self::All),
            "today" => Ok(Self::Today),
            "week" | "this-week" => Ok(Self::Week),
            "month" | "this-month" => Ok(Self::Month),
            other => Err(format!("unknown date filter: {}", other)),
        }
    }
}

/// Same calendar day as `now`, in `now`'s timezone
pub fn is_today<Tz: TimeZone>(created: &DateTime<Utc>, now: &DateTime<Tz>) -> bool {
    created.with_timezone(&now.timezone()).date_naive() == now.date_naive()
}

/// On or after the most recent Sunday (weeks start on Sunday)
pub fn is_this_week<Tz: TimeZone>(created: &DateTime<Utc>, now: &DateTime<Tz>) -> bool {
    let today = now.date_naive();
    let week_start = today - Duration::days(now.weekday().num_days_from_sunday() as i64);
    created.with_timezone(&now.timezone()).date_naive() >= week_start
}

pub fn is_this_month<Tz: TimeZone>(created: &DateTime<Utc>, now: &DateTime<Tz>) -> bool {
    let local = created.with_timezone(&now.timezone());
    local.year() == now.year() && local.month() == now.month()
}

/// Elapsed time since creation is at most 24 hours. Future timestamps count.
pub fn is_within_24_hours<Tz: TimeZone>(created: &DateTime<Utc>, now: &DateTime<Tz>) -> bool {
    now.with_timezone(&Utc) - *created <= Duration::hours(24)
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    /// Matched case-insensitively
    pub search: String,
    pub status: StatusFilter,
    pub date: DateBucket,
}

impl FilterCriteria {
    pub fn is_empty(&self) -> bool {
        self.search.is_empty() && self.status == StatusFilter::All && self.date == DateBucket::All
    }

    pub fn matches<Tz: TimeZone>(&self, message: &Message, now: &DateTime<Tz>) -> bool {
        let term = self.search.to_lowercase();
        if !term.is_empty() && !message.searchable_text().contains(&term) {
            return false;
        }
        self.status.matches(message.status) && self.date.contains(&message.created_at, now)
    }
}

/// Messages satisfying every active criterion, in input order
pub fn filter<'a, Tz: TimeZone>(
    messages: &'a [Message],
    criteria: &FilterCriteria,
    now: &DateTime<Tz>,
) -> Vec<&'a Message> {
    messages
        .iter()
        .filter(|m| criteria.matches(m, now))
        .collect()
}

/// Same as [`filter`] but returns positions into `messages`
pub fn filter_indices<Tz: TimeZone>(
    messages: &[Message],
    criteria: &FilterCriteria,
    now: &DateTime<Tz>,
) -> Vec<usize> {
    messages
        .iter()
        .enumerate()
        .filter(|(_, m)| criteria.matches(m, now))
        .map(|(i, _)| i)
        .collect()
}
