use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageStatus {
    #[default]
    Unread,
    Read,
    Replied,
}

impl MessageStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Unread => "unread",
            Self::Read => "read",
            Self::Replied => "replied",
        }
    }
}

impl fmt::Display for MessageStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MessageStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "unread" => Ok(Self::Unread),
            "read" => Ok(Self::Read),
            "replied" => Ok(Self::Replied),
            other => Err(format!("unknown status: {}", other)),
        }
    }
}

/// A contact-form submission as stored locally or returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    #[serde(alias = "_id")]
    pub id: String,
    pub name: String,
    pub email: String,
    pub message: String,
    #[serde(default)]
    pub status: MessageStatus,
    #[serde(alias = "created_at")]
    pub created_at: DateTime<Utc>,
}

impl Message {
    pub fn is_unread(&self) -> bool {
        self.status == MessageStatus::Unread
    }

    /// Text the search box matches against
    pub fn searchable_text(&self) -> String {
        format!("{} {} {}", self.name, self.email, self.message).to_lowercase()
    }
}

/// Fields a visitor fills in before a message exists.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
pub struct MessageDraft {
    pub name: String,
    pub email: String,
    pub message: String,
}

impl MessageDraft {
    pub fn new(name: &str, email: &str, message: &str) -> Self {
        Self {
            name: name.to_string(),
            email: email.to_string(),
            message: message.to_string(),
        }
    }
}

/// Partial update merged into a stored message. `id` and `created_at` are fixed.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct MessagePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<MessageStatus>,
}

impl MessagePatch {
    pub fn status(status: MessageStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    pub fn apply(&self, msg: &mut Message) {
        if let Some(ref name) = self.name {
            msg.name = name.clone();
        }
        if let Some(ref email) = self.email {
            msg.email = email.clone();
        }
        if let Some(ref message) = self.message {
            msg.message = message.clone();
        }
        if let Some(status) = self.status {
            msg.status = status;
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
pub struct Stats {
    pub total: usize,
    pub today: usize,
    pub recent: usize,
    #[serde(default)]
    pub unread: usize,
}

/// Where a service result actually came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    Remote,
    Local,
}

/// A service result tagged with its source, so degraded mode is visible.
#[derive(Debug, Clone, PartialEq)]
pub struct Sourced<T> {
    pub value: T,
    pub source: Source,
}

impl<T> Sourced<T> {
    pub fn remote(value: T) -> Self {
        Self {
            value,
            source: Source::Remote,
        }
    }

    pub fn local(value: T) -> Self {
        Self {
            value,
            source: Source::Local,
        }
    }

    pub fn is_fallback(&self) -> bool {
        self.source == Source::Local
    }

    pub fn into_inner(self) -> T {
        self.value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_uses_camel_case_and_accepts_server_id() {
        let json = r#"{
            "_id": "abc",
            "name": "Ann",
            "email": "ann@example.com",
            "message": "hi",
            "status": "replied",
            "createdAt": "2026-10-15T09:30:00Z"
        }"#;
        let msg: Message = serde_json::from_str(json).unwrap();
        assert_eq!(msg.id, "abc");
        assert_eq!(msg.status, MessageStatus::Replied);

        let out = serde_json::to_value(&msg).unwrap();
        assert_eq!(out["createdAt"], "2026-10-15T09:30:00Z");
        assert_eq!(out["status"], "replied");
    }

    #[test]
    fn missing_status_defaults_to_unread() {
        let json = r#"{"id":"1","name":"a","email":"a@b.co","message":"m","createdAt":"2026-01-01T00:00:00Z"}"#;
        let msg: Message = serde_json::from_str(json).unwrap();
        assert!(msg.is_unread());
    }

    #[test]
    fn patch_leaves_unset_fields_alone() {
        let mut msg: Message = serde_json::from_str(
            r#"{"id":"1","name":"a","email":"a@b.co","message":"m","createdAt":"2026-01-01T00:00:00Z"}"#,
        )
        .unwrap();
        MessagePatch::status(MessageStatus::Read).apply(&mut msg);
        assert_eq!(msg.status, MessageStatus::Read);
        assert_eq!(msg.name, "a");
    }

    #[test]
    fn status_parses_case_insensitively() {
        assert_eq!("READ".parse::<MessageStatus>(), Ok(MessageStatus::Read));
        assert!("archived".parse::<MessageStatus>().is_err());
    }
}
