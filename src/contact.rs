//! Contact form: field editing, validation and delayed submission.

use regex::Regex;
use std::sync::OnceLock;
use std::time::{Duration, Instant};

use crate::config::FormConfig;
use crate::error::ValidationError;
use crate::events::{InboxEvent, Notifier};
use crate::inbox::{MessageDraft, MessageService};

fn email_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap())
}

/// `local@domain.tld`, nothing stricter
pub fn is_valid_email(email: &str) -> bool {
    email_re().is_match(email)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Field {
    #[default]
    Name,
    Email,
    Message,
}

impl Field {
    pub fn next(self) -> Self {
        match self {
            Self::Name => Self::Email,
            Self::Email => Self::Message,
            Self::Message => Self::Name,
        }
    }

    pub fn previous(self) -> Self {
        match self {
            Self::Name => Self::Message,
            Self::Email => Self::Name,
            Self::Message => Self::Email,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Name => "Name",
            Self::Email => "Email",
            Self::Message => "Message",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BannerKind {
    Info,
    Success,
    Error,
}

/// Transient notice under the form
#[derive(Debug, Clone)]
pub struct Banner {
    pub kind: BannerKind,
    pub text: String,
    shown_at: Instant,
}

/// What a [`ContactForm::tick`] did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    Sent,
    Failed,
}

#[derive(Debug)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub message: String,
    pub focus: Field,
    // draft and the instant it becomes due
    pending: Option<(MessageDraft, Instant)>,
    banner: Option<Banner>,
    submit_delay: Duration,
    banner_ttl: Duration,
}

impl ContactForm {
    pub fn new(config: &FormConfig) -> Self {
        Self {
            name: String::new(),
            email: String::new(),
            message: String::new(),
            focus: Field::Name,
            pending: None,
            banner: None,
            submit_delay: Duration::from_millis(config.submit_delay_ms),
            banner_ttl: Duration::from_secs(config.banner_secs),
        }
    }

    pub fn field_mut(&mut self, field: Field) -> &mut String {
        match field {
            Field::Name => &mut self.name,
            Field::Email => &mut self.email,
            Field::Message => &mut self.message,
        }
    }

    pub fn field(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Email => &self.email,
            Field::Message => &self.message,
        }
    }

    pub fn focus_next(&mut self) {
        self.focus = self.focus.next();
    }

    pub fn focus_previous(&mut self) {
        self.focus = self.focus.previous();
    }

    pub fn insert_char(&mut self, c: char) {
        let focus = self.focus;
        self.field_mut(focus).push(c);
    }

    /// Line break, only meaningful in the message body
    pub fn insert_newline(&mut self) {
        if self.focus == Field::Message {
            self.message.push('\n');
        }
    }

    pub fn backspace(&mut self) {
        let focus = self.focus;
        self.field_mut(focus).pop();
    }

    pub fn reset(&mut self) {
        self.name.clear();
        self.email.clear();
        self.message.clear();
        self.focus = Field::Name;
    }

    pub fn validate(&self) -> Result<MessageDraft, ValidationError> {
        if self.name.trim().is_empty()
            || self.email.trim().is_empty()
            || self.message.trim().is_empty()
        {
            return Err(ValidationError::MissingFields);
        }
        if !is_valid_email(&self.email) {
            return Err(ValidationError::InvalidEmail);
        }
        Ok(MessageDraft::new(&self.name, &self.email, &self.message))
    }

    pub fn is_submitting(&self) -> bool {
        self.pending.is_some()
    }

    /// Validate and schedule the submission after the configured delay.
    /// A failed validation leaves the fields untouched and shows why.
    pub fn submit(&mut self, now: Instant) -> Result<(), ValidationError> {
        if self.is_submitting() {
            return Ok(());
        }
        match self.validate() {
            Ok(draft) => {
                self.pending = Some((draft, now + self.submit_delay));
                self.show(BannerKind::Info, "Sending message...", now);
                Ok(())
            }
            Err(e) => {
                self.show(BannerKind::Error, &e.to_string(), now);
                Err(e)
            }
        }
    }

    /// Advance timers: send a due submission and expire old banners.
    pub fn tick(
        &mut self,
        now: Instant,
        service: &MessageService,
        notifier: &Notifier,
    ) -> Option<SubmitOutcome> {
        if let Some(banner) = &self.banner {
            if now.duration_since(banner.shown_at) >= self.banner_ttl {
                self.banner = None;
            }
        }

        let due = matches!(self.pending, Some((_, at)) if now >= at);
        if !due {
            return None;
        }
        let (draft, _) = self.pending.take()?;

        let created = service.create(&draft);
        match created.value {
            Some(message) => {
                log::info!(
                    "Contact message {} from {} stored ({:?})",
                    message.id,
                    message.email,
                    created.source
                );
                notifier.notify(InboxEvent::MessageCreated(message));
                self.reset();
                self.show(BannerKind::Success, "Message sent successfully!", now);
                Some(SubmitOutcome::Sent)
            }
            None => {
                log::error!("Contact message from {} could not be stored", draft.email);
                self.show(
                    BannerKind::Error,
                    "Error sending message. Please try again.",
                    now,
                );
                Some(SubmitOutcome::Failed)
            }
        }
    }

    pub fn banner(&self) -> Option<&Banner> {
        self.banner.as_ref()
    }

    fn show(&mut self, kind: BannerKind, text: &str, now: Instant) {
        self.banner = Some(Banner {
            kind,
            text: text.to_string(),
            shown_at: now,
        });
    }
}

/// Open `$EDITOR` on `body` and return the edited text, or `None` if the
/// editor exited unsuccessfully. The caller owns terminal mode switching.
pub fn edit_in_editor(body: &str) -> anyhow::Result<Option<String>> {
    use std::io::Write;

    let mut temp_file = tempfile::NamedTempFile::new()?;
    write!(temp_file, "{}", body)?;
    temp_file.flush()?;

    let editor = std::env::var("EDITOR").unwrap_or_else(|_| "nvim".to_string());
    let status = std::process::Command::new(&editor)
        .arg(temp_file.path())
        .status()?;
    if !status.success() {
        return Ok(None);
    }

    let content = std::fs::read_to_string(temp_file.path())?;
    Ok(Some(content.trim_end_matches('\n').to_string()))
}
