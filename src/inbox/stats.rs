use chrono::{DateTime, TimeZone};

use super::filter::{is_today, is_within_24_hours};
use super::types::{Message, Stats};

/// Counts for the stats header. `today` and `recent` are computed
/// independently: a message from late yesterday can be recent without being
/// from today.
pub fn compute<Tz: TimeZone>(messages: &[Message], now: &DateTime<Tz>) -> Stats {
    Stats {
        total: messages.len(),
        today: messages
            .iter()
            .filter(|m| is_today(&m.created_at, now))
            .count(),
        recent: messages
            .iter()
            .filter(|m| is_within_24_hours(&m.created_at, now))
            .count(),
        unread: messages.iter().filter(|m| m.is_unread()).count(),
    }
}
