//! HTML fragments for the message list and detail panel.
//!
//! All user-supplied text goes through [`escape_html`]; status strings come
//! from a closed enum and are emitted as-is.

use chrono::{DateTime, Local, TimeZone, Utc};

use super::types::Message;

/// Characters of message body shown in list previews
pub const PREVIEW_CHARS: usize = 150;

pub fn escape_html(text: &str) -> String {
    html_escape::encode_text(text).into_owned()
}

/// "Oct 15, 2026, 02:05 PM" in the given timezone
pub fn format_date_in<Tz: TimeZone>(date: &DateTime<Utc>, tz: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    date.with_timezone(tz)
        .format("%b %-d, %Y, %I:%M %p")
        .to_string()
}

pub fn format_date(date: &DateTime<Utc>) -> String {
    format_date_in(date, &Local)
}

/// First [`PREVIEW_CHARS`] characters of the body, with "..." if cut
pub fn preview(body: &str) -> String {
    if body.chars().count() > PREVIEW_CHARS {
        let cut: String = body.chars().take(PREVIEW_CHARS).collect();
        format!("{}...", cut)
    } else {
        body.to_string()
    }
}

pub fn render_message_item(message: &Message) -> String {
    render_message_item_in(message, &Local)
}

pub fn render_message_item_in<Tz: TimeZone>(message: &Message, tz: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    format!(
        r#"<div class="message-item {status}" data-id="{id}" tabindex="0">
    <div class="message-header">
        <div class="message-info">
            <h3 class="message-name">{name}</h3>
            <p class="message-email">{email}</p>
        </div>
        <div class="message-meta">
            <span class="message-date">{date}</span>
            <span class="message-status {status}">{status}</span>
        </div>
    </div>
    <div class="message-preview">
        {preview}
    </div>
</div>"#,
        status = message.status,
        id = html_escape::encode_double_quoted_attribute(&message.id),
        name = escape_html(&message.name),
        email = escape_html(&message.email),
        date = format_date_in(&message.created_at, tz),
        preview = escape_html(&preview(&message.message)),
    )
}

pub fn render_message_list(messages: &[&Message]) -> String {
    messages
        .iter()
        .map(|m| render_message_item(m))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn render_message_detail(message: &Message) -> String {
    render_message_detail_in(message, &Local)
}

pub fn render_message_detail_in<Tz: TimeZone>(message: &Message, tz: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    format!(
        r#"<div class="message-detail">
    <div class="detail-field">
        <label class="detail-label">Name</label>
        <div class="detail-value">{name}</div>
    </div>
    <div class="detail-field">
        <label class="detail-label">Email</label>
        <div class="detail-value email">{email}</div>
    </div>
    <div class="detail-field">
        <label class="detail-label">Date</label>
        <div class="detail-value">{date}</div>
    </div>
    <div class="detail-field">
        <label class="detail-label">Status</label>
        <div class="detail-value">
            <span class="message-status {status}">{status}</span>
        </div>
    </div>
    <div class="detail-field">
        <label class="detail-label">Message</label>
        <div class="detail-value">{body}</div>
    </div>
</div>"#,
        name = escape_html(&message.name),
        email = escape_html(&message.email),
        date = format_date_in(&message.created_at, tz),
        status = message.status,
        body = escape_html(&message.message).replace('\n', "<br>"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inbox::MessageStatus;

    fn message(name: &str, body: &str) -> Message {
        Message {
            id: "m1".to_string(),
            name: name.to_string(),
            email: "x@example.com".to_string(),
            message: body.to_string(),
            status: MessageStatus::Unread,
            created_at: DateTime::parse_from_rfc3339("2026-10-15T14:05:00Z")
                .unwrap()
                .with_timezone(&Utc),
        }
    }

    #[test]
    fn user_text_is_escaped() {
        let html = render_message_item_in(&message("<script>alert(1)</script>", "a & b"), &Utc);
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
        assert!(html.contains("a &amp; b"));
    }

    #[test]
    fn list_item_carries_status_and_date() {
        let html = render_message_item_in(&message("Ann", "hello"), &Utc);
        assert!(html.contains(r#"class="message-item unread""#));
        assert!(html.contains(r#"data-id="m1""#));
        assert!(html.contains("Oct 15, 2026, 02:05 PM"));
    }

    #[test]
    fn long_bodies_are_cut_in_previews() {
        let body = "x".repeat(200);
        let p = preview(&body);
        assert_eq!(p.chars().count(), PREVIEW_CHARS + 3);
        assert!(p.ends_with("..."));
        assert_eq!(preview("short"), "short");
    }

    #[test]
    fn detail_keeps_line_breaks() {
        let html = render_message_detail_in(&message("Ann", "line one\n<b>two</b>"), &Utc);
        assert!(html.contains("line one<br>&lt;b&gt;two&lt;/b&gt;"));
        assert!(html.contains(r#"<span class="message-status unread">unread</span>"#));
    }

    #[test]
    fn detail_uses_local_time_by_default() {
        let m = message("Ann", "hello");
        assert_eq!(render_message_detail(&m), render_message_detail_in(&m, &Local));
    }
}
