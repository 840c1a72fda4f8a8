use chrono::Local;
use ratatui::widgets::ListState;
use std::sync::Arc;
use std::sync::mpsc::Sender;

use crate::config::Config;
use crate::contact::ContactForm;
use crate::events::{InboxEvent, Notifier};
use crate::inbox::{
    FilterCriteria, Message, MessageService, MessageStatus, Source, Sourced, Stats, filter_indices,
    stats,
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum View {
    Dashboard,
    Search,
    Detail,
    Contact,
}

/// What the message area shows
#[derive(Debug, Clone, PartialEq)]
pub enum DashboardState {
    Loading,
    Empty { notice: String },
    ShowingList,
}

pub const EMPTY_NOTICE: &str = "No messages found";
pub const NO_DATA_NOTICE: &str = "No data";

pub struct App {
    pub config: Arc<Config>,
    pub view: View,
    pub state: DashboardState,
    pub messages: Vec<Message>,
    pub filtered_indices: Vec<usize>,
    pub list_state: ListState,
    pub criteria: FilterCriteria,
    pub stats: Stats,
    // Source of the most recently applied load
    pub source: Option<Source>,
    pub detail: Option<Message>,
    pub contact: ContactForm,
    pub notifier: Notifier,
    pub should_quit: bool,
    pub status_message: Option<String>,
}

impl App {
    pub fn new(config: Arc<Config>, notifier: Notifier) -> Self {
        let contact = ContactForm::new(&config.form);
        Self {
            config,
            view: View::Dashboard,
            state: DashboardState::Loading,
            messages: Vec::new(),
            filtered_indices: Vec::new(),
            list_state: ListState::default(),
            criteria: FilterCriteria::default(),
            stats: Stats::default(),
            source: None,
            detail: None,
            contact,
            notifier,
            should_quit: false,
            status_message: None,
        }
    }

    pub fn set_status(&mut self, msg: &str) {
        self.status_message = Some(msg.to_string());
    }

    pub fn clear_status(&mut self) {
        self.status_message = None;
    }

    pub fn begin_load(&mut self) {
        self.state = DashboardState::Loading;
    }

    /// Replace the in-memory list with a completed load
    pub fn apply_loaded(&mut self, listed: Sourced<Vec<Message>>) {
        log::debug!(
            "Loaded {} messages ({:?})",
            listed.value.len(),
            listed.source
        );
        self.source = Some(listed.source);
        self.messages = listed.value;
        self.stats = stats::compute(&self.messages, &Local::now());
        self.apply_filters();
    }

    /// A load that produced nothing is shown as an empty inbox
    pub fn load_failed(&mut self) {
        self.messages.clear();
        self.filtered_indices.clear();
        self.list_state.select(None);
        self.stats = Stats::default();
        self.state = DashboardState::Empty {
            notice: NO_DATA_NOTICE.to_string(),
        };
    }

    pub fn load_messages(&mut self, service: &MessageService) {
        self.begin_load();
        let listed = service.list();
        self.apply_loaded(listed);
    }

    /// Recompute the visible rows from the current criteria
    pub fn apply_filters(&mut self) {
        self.filtered_indices = filter_indices(&self.messages, &self.criteria, &Local::now());

        // Preserve selection if possible, otherwise reset
        if let Some(selected) = self.list_state.selected() {
            if selected >= self.filtered_indices.len() {
                if !self.filtered_indices.is_empty() {
                    self.list_state.select(Some(0));
                } else {
                    self.list_state.select(None);
                }
            }
        } else if !self.filtered_indices.is_empty() {
            self.list_state.select(Some(0));
        }

        self.state = if self.filtered_indices.is_empty() {
            DashboardState::Empty {
                notice: EMPTY_NOTICE.to_string(),
            }
        } else {
            DashboardState::ShowingList
        };
    }

    pub fn set_search(&mut self, term: &str) {
        self.criteria.search = term.to_string();
        self.apply_filters();
    }

    pub fn push_search_char(&mut self, c: char) {
        self.criteria.search.push(c);
        self.apply_filters();
    }

    pub fn pop_search_char(&mut self) {
        self.criteria.search.pop();
        self.apply_filters();
    }

    pub fn start_search(&mut self) {
        self.view = View::Search;
    }

    pub fn cancel_search(&mut self) {
        self.criteria.search.clear();
        self.apply_filters();
        self.view = View::Dashboard;
    }

    pub fn cycle_status_filter(&mut self) {
        self.criteria.status = self.criteria.status.cycle();
        self.apply_filters();
    }

    pub fn cycle_date_filter(&mut self) {
        self.criteria.date = self.criteria.date.cycle();
        self.apply_filters();
    }

    pub fn visible_messages(&self) -> Vec<&Message> {
        self.filtered_indices
            .iter()
            .filter_map(|&i| self.messages.get(i))
            .collect()
    }

    pub fn selected_message(&self) -> Option<&Message> {
        self.list_state
            .selected()
            .and_then(|i| self.filtered_indices.get(i))
            .and_then(|&idx| self.messages.get(idx))
    }

    pub fn next(&mut self) {
        if self.filtered_indices.is_empty() {
            return;
        }
        let max = self.filtered_indices.len() - 1;
        let i = match self.list_state.selected() {
            Some(i) => (i + 1).min(max),
            None => 0,
        };
        self.list_state.select(Some(i));
    }

    pub fn previous(&mut self) {
        if self.filtered_indices.is_empty() {
            return;
        }
        let i = match self.list_state.selected() {
            Some(i) => i.saturating_sub(1),
            None => 0,
        };
        self.list_state.select(Some(i));
    }

    /// Show a message in the detail overlay, marking it read if it was unread
    pub fn open_detail(&mut self, id: &str, service: &MessageService) {
        let Some(message) = self.messages.iter().find(|m| m.id == id).cloned() else {
            return;
        };
        self.detail = Some(message.clone());
        self.view = View::Detail;

        if message.is_unread() {
            let updated = service.update_status(id, MessageStatus::Read);
            if updated.value.is_some() {
                self.set_local_status(id, MessageStatus::Read);
            } else {
                log::warn!("Could not mark {} as read", id);
            }
        }
    }

    pub fn open_selected(&mut self, service: &MessageService) {
        if let Some(id) = self.selected_message().map(|m| m.id.clone()) {
            self.open_detail(&id, service);
        }
    }

    pub fn close_detail(&mut self) {
        self.detail = None;
        self.view = View::Dashboard;
    }

    /// Explicit "mark as read" from the detail overlay
    pub fn mark_detail_read(&mut self, service: &MessageService) -> bool {
        let Some(id) = self
            .detail
            .as_ref()
            .filter(|m| m.is_unread())
            .map(|m| m.id.clone())
        else {
            return false;
        };
        if service.update_status(&id, MessageStatus::Read).value.is_none() {
            return false;
        }
        self.set_local_status(&id, MessageStatus::Read);
        self.notifier.notify(InboxEvent::MessageUpdated);
        true
    }

    /// Build the reply `mailto:` link for the open message and mark it replied
    pub fn reply_to_detail(&mut self, service: &MessageService) -> Option<String> {
        let message = self.detail.clone()?;
        let link = mailto_link(&message, &self.config.reply.signature);
        if service
            .update_status(&message.id, MessageStatus::Replied)
            .value
            .is_some()
        {
            self.set_local_status(&message.id, MessageStatus::Replied);
            self.notifier.notify(InboxEvent::MessageUpdated);
        }
        Some(link)
    }

    pub fn delete_selected(&mut self, service: &MessageService) -> bool {
        let Some(id) = self.selected_message().map(|m| m.id.clone()) else {
            return false;
        };
        let deleted = service.delete(&id);
        if deleted.value {
            log::info!("Deleted message {} ({:?})", id, deleted.source);
            self.set_status("Message deleted");
            self.notifier.notify(InboxEvent::MessageUpdated);
        } else {
            self.set_status("Delete failed");
        }
        deleted.value
    }

    /// One status update per unread message, in order, then a reload
    pub fn mark_all_read(&mut self, service: &MessageService) -> usize {
        let unread: Vec<String> = self
            .messages
            .iter()
            .filter(|m| m.is_unread())
            .map(|m| m.id.clone())
            .collect();

        let marked = unread
            .iter()
            .filter(|id| service.update_status(id, MessageStatus::Read).value.is_some())
            .count();

        self.load_messages(service);
        marked
    }

    fn set_local_status(&mut self, id: &str, status: MessageStatus) {
        if let Some(m) = self.messages.iter_mut().find(|m| m.id == id) {
            m.status = status;
        }
        if let Some(d) = self.detail.as_mut().filter(|d| d.id == id) {
            d.status = status;
        }
        self.stats = stats::compute(&self.messages, &Local::now());
    }

    pub fn open_contact(&mut self) {
        self.view = View::Contact;
    }

    pub fn close_contact(&mut self) {
        self.view = View::Dashboard;
    }
}

pub fn mailto_link(message: &Message, signature: &str) -> String {
    let subject = format!("Re: Contact from {}", message.name);
    let body = format!(
        "Hello {},\n\nThank you for your message.\n\n{}",
        message.name, signature
    );
    format!(
        "mailto:{}?subject={}&body={}",
        message.email,
        urlencoding::encode(&subject),
        urlencoding::encode(&body)
    )
}

/// Fetch the list on a worker thread; the result arrives on `tx`.
/// Loads are not cancelled, so whichever finishes last wins.
pub fn spawn_load(
    service: Arc<MessageService>,
    tx: Sender<Sourced<Vec<Message>>>,
) -> std::io::Result<()> {
    std::thread::Builder::new()
        .name("inbox-load".to_string())
        .spawn(move || {
            let listed = service.list();
            let _ = tx.send(listed);
        })?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events;
    use crate::inbox::client::testing::ScriptedTransport;
    use crate::inbox::{DateBucket, LocalStore, MessageDraft, StatusFilter};
    use chrono::{Duration, Utc};
    use std::sync::mpsc::Receiver;

    struct Fixture {
        _dir: tempfile::TempDir,
        service: MessageService,
        app: App,
        rx: Receiver<InboxEvent>,
    }

    fn fixture(names: &[&str]) -> Fixture {
        let dir = tempfile::tempdir().unwrap();
        let service = MessageService::new(
            Box::new(ScriptedTransport::offline()),
            LocalStore::in_dir(dir.path()),
        );
        for name in names {
            let email = format!("{}@example.com", name.to_lowercase());
            service
                .store()
                .add(&MessageDraft::new(name, &email, "Hello"))
                .unwrap();
        }
        let (notifier, rx) = events::channel();
        let mut app = App::new(Arc::new(Config::default()), notifier);
        app.load_messages(&service);
        Fixture {
            _dir: dir,
            service,
            app,
            rx,
        }
    }

    #[test]
    fn starts_loading_then_shows_list() {
        let (notifier, _rx) = events::channel();
        let app = App::new(Arc::new(Config::default()), notifier);
        assert_eq!(app.state, DashboardState::Loading);

        let f = fixture(&["Ann", "Bob"]);
        assert_eq!(f.app.state, DashboardState::ShowingList);
        assert_eq!(f.app.source, Some(Source::Local));
        assert_eq!(f.app.stats.total, 2);
        assert_eq!(f.app.stats.unread, 2);
        assert_eq!(f.app.selected_message().unwrap().name, "Bob");
    }

    #[test]
    fn empty_store_and_failed_load_both_show_empty() {
        let mut f = fixture(&[]);
        assert_eq!(
            f.app.state,
            DashboardState::Empty {
                notice: EMPTY_NOTICE.to_string()
            }
        );
        f.app.load_failed();
        assert_eq!(
            f.app.state,
            DashboardState::Empty {
                notice: NO_DATA_NOTICE.to_string()
            }
        );
    }

    #[test]
    fn filters_narrow_and_restore_the_list() {
        let mut f = fixture(&["Ann", "Bob"]);
        f.app.set_search("ann");
        assert_eq!(f.app.visible_messages().len(), 1);
        assert_eq!(f.app.selected_message().unwrap().name, "Ann");

        f.app.set_search("zzz");
        assert!(matches!(f.app.state, DashboardState::Empty { .. }));
        assert_eq!(f.app.selected_message(), None);

        f.app.cancel_search();
        assert_eq!(f.app.visible_messages().len(), 2);
        assert_eq!(f.app.state, DashboardState::ShowingList);

        f.app.cycle_status_filter();
        assert_eq!(f.app.criteria.status, StatusFilter::Only(MessageStatus::Unread));
        assert_eq!(f.app.visible_messages().len(), 2);
        f.app.cycle_status_filter();
        assert!(f.app.visible_messages().is_empty());

        f.app.criteria.status = StatusFilter::All;
        f.app.cycle_date_filter();
        assert_eq!(f.app.criteria.date, DateBucket::Today);
    }

    #[test]
    fn opening_unread_message_marks_it_read() {
        let mut f = fixture(&["Ann"]);
        let id = f.app.messages[0].id.clone();

        f.app.open_detail(&id, &f.service);
        assert_eq!(f.app.view, View::Detail);
        assert_eq!(f.app.detail.as_ref().unwrap().status, MessageStatus::Read);
        assert_eq!(f.app.messages[0].status, MessageStatus::Read);
        assert_eq!(f.app.stats.unread, 0);
        assert_eq!(f.service.store().get_all()[0].status, MessageStatus::Read);

        // already read: the explicit action has nothing to do
        assert!(!f.app.mark_detail_read(&f.service));
        f.app.close_detail();
        assert_eq!(f.app.view, View::Dashboard);
        assert!(f.app.detail.is_none());
    }

    #[test]
    fn reply_builds_mailto_and_marks_replied() {
        let mut f = fixture(&["Ann"]);
        let id = f.app.messages[0].id.clone();
        f.app.open_detail(&id, &f.service);

        let link = f.app.reply_to_detail(&f.service).unwrap();
        assert!(link.starts_with("mailto:ann@example.com?subject=Re%3A%20Contact%20from%20Ann"));
        assert!(link.contains("Thank%20you%20for%20your%20message."));
        assert_eq!(f.service.store().get_all()[0].status, MessageStatus::Replied);
        assert_eq!(f.rx.try_recv().unwrap(), InboxEvent::MessageUpdated);
    }

    #[test]
    fn mark_all_read_updates_each_unread_then_reloads() {
        let mut f = fixture(&["Ann", "Bob", "Cy"]);
        let bob = f.app.messages[1].id.clone();
        f.service.update_status(&bob, MessageStatus::Replied);
        f.app.load_messages(&f.service);

        assert_eq!(f.app.mark_all_read(&f.service), 2);
        assert_eq!(f.app.stats.unread, 0);
        let statuses: Vec<_> = f.app.messages.iter().map(|m| m.status).collect();
        assert_eq!(
            statuses,
            [MessageStatus::Read, MessageStatus::Replied, MessageStatus::Read]
        );
    }

    #[test]
    fn delete_removes_selected_and_signals() {
        let mut f = fixture(&["Ann", "Bob"]);
        let selected = f.app.selected_message().unwrap().id.clone();

        assert!(f.app.delete_selected(&f.service));
        assert_eq!(f.rx.try_recv().unwrap(), InboxEvent::MessageUpdated);
        // the in-memory copy is stale until reloaded
        assert_eq!(f.app.messages.len(), 2);
        f.app.load_messages(&f.service);
        assert_eq!(f.app.messages.len(), 1);
        assert!(f.app.messages.iter().all(|m| m.id != selected));
    }

    #[test]
    fn navigation_stays_in_bounds() {
        let mut f = fixture(&["Ann", "Bob"]);
        f.app.previous();
        assert_eq!(f.app.list_state.selected(), Some(0));
        f.app.next();
        f.app.next();
        assert_eq!(f.app.list_state.selected(), Some(1));
    }

    #[test]
    fn background_load_reports_on_channel() {
        let f = fixture(&["Ann"]);
        let service = Arc::new(f.service);
        let (tx, rx) = std::sync::mpsc::channel();
        spawn_load(service, tx).unwrap();
        let listed = rx.recv().unwrap();
        assert_eq!(listed.value.len(), 1);
        assert!(listed.is_fallback());
    }

    #[test]
    fn stats_count_recent_messages() {
        let mut f = fixture(&[]);
        let now = Utc::now();
        let old = Message {
            id: "old".to_string(),
            name: "Old".to_string(),
            email: "old@example.com".to_string(),
            message: "m".to_string(),
            status: MessageStatus::Read,
            created_at: now - Duration::days(3),
        };
        f.app.apply_loaded(Sourced::remote(vec![old]));
        assert_eq!(f.app.stats.total, 1);
        assert_eq!(f.app.stats.recent, 0);
        assert_eq!(f.app.source, Some(Source::Remote));
    }
}
