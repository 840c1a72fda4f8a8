use chrono::{Duration, TimeZone, Utc};
use reqwest::Method;
use std::sync::Arc;
use std::time::Duration as StdDuration;

use folio_inbox::app::{App, DashboardState, View};
use folio_inbox::config::Config;
use folio_inbox::error::ServiceError;
use folio_inbox::events::{self, InboxEvent};
use folio_inbox::inbox::{
    DateBucket, FilterCriteria, HttpTransport, LocalStore, MessageDraft, MessageService,
    MessageStatus, Source, StatusFilter, StoreWatcher, Transport, stats,
};

/// Every request fails like an unreachable backend
struct Unreachable;

impl Transport for Unreachable {
    fn send(
        &self,
        _method: Method,
        _path: &str,
        _body: Option<serde_json::Value>,
    ) -> Result<String, ServiceError> {
        Err(ServiceError::Http { status: 503 })
    }
}

fn offline_service(dir: &tempfile::TempDir) -> MessageService {
    MessageService::new(Box::new(Unreachable), LocalStore::in_dir(dir.path()))
}

#[test]
fn offline_create_then_list_round_trips() {
    let dir = tempfile::tempdir().unwrap();
    let service = offline_service(&dir);

    let created = service.create(&MessageDraft::new("Ann", "ann@example.com", "Hello"));
    assert_eq!(created.source, Source::Local);
    let created = created.value.unwrap();
    assert_eq!(created.status, MessageStatus::Unread);

    let listed = service.list();
    assert!(listed.is_fallback());
    assert_eq!(listed.value, vec![created]);
}

#[test]
fn newest_messages_come_first() {
    let dir = tempfile::tempdir().unwrap();
    let service = offline_service(&dir);
    let store = service.store();
    let base = Utc.with_ymd_and_hms(2026, 10, 1, 9, 0, 0).unwrap();
    store
        .add_at(&MessageDraft::new("Old", "old@example.com", "a"), base)
        .unwrap();
    store
        .add_at(
            &MessageDraft::new("New", "new@example.com", "b"),
            base + Duration::hours(1),
        )
        .unwrap();

    let names: Vec<_> = service.list().value.into_iter().map(|m| m.name).collect();
    assert_eq!(names, ["New", "Old"]);
}

#[test]
fn deleting_twice_only_succeeds_once() {
    let dir = tempfile::tempdir().unwrap();
    let service = offline_service(&dir);
    let id = service
        .create(&MessageDraft::new("Ann", "ann@example.com", "Hello"))
        .value
        .unwrap()
        .id;

    assert!(service.delete(&id).value);
    assert!(!service.delete(&id).value);
    assert!(service.list().value.is_empty());
}

#[test]
fn unknown_id_update_reports_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let service = offline_service(&dir);
    let updated = service.update_status("missing", MessageStatus::Read);
    assert_eq!(updated.value, None);
    assert_eq!(updated.source, Source::Local);
}

#[test]
fn local_stats_match_filters() {
    let dir = tempfile::tempdir().unwrap();
    let service = offline_service(&dir);
    let now = Utc.with_ymd_and_hms(2026, 10, 15, 14, 0, 0).unwrap();
    let store = service.store();
    for (name, age) in [("Ann", 1), ("Bob", 30), ("Cy", 24 * 20)] {
        let email = format!("{}@example.com", name.to_lowercase());
        store
            .add_at(
                &MessageDraft::new(name, &email, "Hi"),
                now - Duration::hours(age),
            )
            .unwrap();
    }

    let fallback = service.stats(&now);
    assert!(fallback.is_fallback());
    assert_eq!(fallback.value, stats::compute(&store.get_all(), &now));
    assert_eq!(fallback.value.total, 3);
    assert_eq!(fallback.value.today, 1);
    assert_eq!(fallback.value.recent, 1);
    assert_eq!(fallback.value.unread, 3);

    let all = store.get_all();
    let today = FilterCriteria {
        date: DateBucket::Today,
        ..Default::default()
    };
    assert_eq!(
        folio_inbox::inbox::filter(&all, &today, &now).len(),
        fallback.value.today
    );

    let read = FilterCriteria {
        status: StatusFilter::Only(MessageStatus::Read),
        ..Default::default()
    };
    assert!(folio_inbox::inbox::filter(&all, &read, &now).is_empty());
}

#[test]
fn unreachable_http_backend_falls_back() {
    let dir = tempfile::tempdir().unwrap();
    let transport =
        HttpTransport::new("http://127.0.0.1:9/api/", StdDuration::from_secs(2)).unwrap();
    assert_eq!(transport.base_url(), "http://127.0.0.1:9/api");
    let service = MessageService::new(Box::new(transport), LocalStore::in_dir(dir.path()));

    let created = service.create(&MessageDraft::new("Ann", "ann@example.com", "Hello"));
    assert_eq!(created.source, Source::Local);
    assert_eq!(service.list().value.len(), 1);
}

#[test]
fn outside_write_is_noticed_and_reloaded() {
    let dir = tempfile::tempdir().unwrap();
    let service = offline_service(&dir);
    let mut watcher = StoreWatcher::new(service.store());
    let (notifier, rx) = events::channel();
    let mut app = App::new(Arc::new(Config::default()), notifier.clone());
    app.load_messages(&service);
    assert!(matches!(app.state, DashboardState::Empty { .. }));

    // another process writes the same file
    std::thread::sleep(StdDuration::from_millis(20));
    LocalStore::in_dir(dir.path())
        .add(&MessageDraft::new("Ann", "ann@example.com", "Hello"))
        .unwrap();

    assert!(watcher.poll(service.store()));
    notifier.notify(InboxEvent::StorageChanged);
    assert_eq!(events::drain(&rx), vec![InboxEvent::StorageChanged]);

    app.load_messages(&service);
    assert_eq!(app.state, DashboardState::ShowingList);
    assert_eq!(app.stats.unread, 1);

    let id = app.messages[0].id.clone();
    app.open_detail(&id, &service);
    assert_eq!(app.view, View::Detail);
    assert_eq!(service.store().get_all()[0].status, MessageStatus::Read);
}
