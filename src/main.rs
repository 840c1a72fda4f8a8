use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::prelude::*;
use std::io;
use std::process::{Command, Stdio};
use std::sync::Arc;
use std::sync::mpsc::{self, Sender};
use std::time::{Duration, Instant};

use folio_inbox::app::{self, App, DashboardState, View};
use folio_inbox::config::Config;
use folio_inbox::contact::{self, Field};
use folio_inbox::events::{self, InboxEvent};
use folio_inbox::inbox::{
    HttpTransport, LocalStore, Message, MessageService, Sourced, StoreWatcher, demo,
};
use folio_inbox::logging;
use folio_inbox::ui::{
    render_contact, render_detail, render_empty, render_header, render_help, render_loading,
    render_messages,
};

type Term = Terminal<CrosstermBackend<io::Stdout>>;

fn main() -> Result<()> {
    logging::init_file();

    // Load config
    let config = Arc::new(Config::load());

    let store = LocalStore::in_dir(config.storage.data_dir());
    if config.dashboard.seed_demo_data {
        demo::seed_if_empty(&store);
    }

    let transport = HttpTransport::from_config(&config.api)?;
    log::info!(
        "Using contacts API at {}, local store {}",
        transport.base_url(),
        store.path().display()
    );
    let service = Arc::new(MessageService::new(Box::new(transport), store.clone()));

    let (notifier, events_rx) = events::channel();
    let (load_tx, load_rx) = mpsc::channel();
    let mut watcher = StoreWatcher::new(&store);
    let mut app = App::new(config.clone(), notifier.clone());

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    request_load(&mut app, &service, &load_tx);

    let poll_every = Duration::from_millis(config.dashboard.refresh_poll_ms);
    let mut last_poll = Instant::now();

    // Main loop
    loop {
        terminal.draw(|f| render(&mut app, f))?;

        // Completed loads, in arrival order
        for listed in load_rx.try_iter() {
            app.apply_loaded(listed);
        }

        app.contact.tick(Instant::now(), &service, &notifier);

        if last_poll.elapsed() >= poll_every {
            last_poll = Instant::now();
            if watcher.poll(&store) {
                notifier.notify(InboxEvent::StorageChanged);
            }
        }

        let pending = events::drain(&events_rx);
        if !pending.is_empty() {
            log::debug!("Reloading after {:?}", pending);
            watcher.sync(&store);
            request_load(&mut app, &service, &load_tx);
        }

        // Poll with timeout so timers and loads progress without input
        if !event::poll(Duration::from_millis(100))? {
            continue;
        }

        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press {
                app.clear_status();
                handle_key(&mut app, key, &service, &load_tx, &mut terminal)?;
            }
        }

        if app.should_quit {
            break;
        }
    }

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    Ok(())
}

fn request_load(app: &mut App, service: &Arc<MessageService>, tx: &Sender<Sourced<Vec<Message>>>) {
    app.begin_load();
    if let Err(e) = app::spawn_load(service.clone(), tx.clone()) {
        log::error!("Error loading messages: {}", e);
        app.load_failed();
    }
}

fn handle_key(
    app: &mut App,
    key: KeyEvent,
    service: &Arc<MessageService>,
    load_tx: &Sender<Sourced<Vec<Message>>>,
    terminal: &mut Term,
) -> Result<()> {
    match app.view {
        View::Dashboard => match key.code {
            KeyCode::Char('q') => app.should_quit = true,
            KeyCode::Char('j') | KeyCode::Down => app.next(),
            KeyCode::Char('k') | KeyCode::Up => app.previous(),
            KeyCode::Enter => app.open_selected(service),
            KeyCode::Char('/') => app.start_search(),
            KeyCode::Char('s') => app.cycle_status_filter(),
            KeyCode::Char('d') => app.cycle_date_filter(),
            KeyCode::Char('R') => {
                request_load(app, service, load_tx);
                app.set_status("Refreshed");
            }
            KeyCode::Char('A') => {
                let marked = app.mark_all_read(service);
                app.set_status(&format!("Marked {} read", marked));
            }
            KeyCode::Char('x') => {
                app.delete_selected(service);
            }
            KeyCode::Char('c') => app.open_contact(),
            _ => {}
        },
        View::Search => match key.code {
            KeyCode::Esc => app.cancel_search(),
            KeyCode::Enter => app.view = View::Dashboard,
            KeyCode::Backspace => app.pop_search_char(),
            KeyCode::Down | KeyCode::Tab => app.next(),
            KeyCode::Up => app.previous(),
            KeyCode::Char(c) => app.push_search_char(c),
            _ => {}
        },
        View::Detail => match key.code {
            KeyCode::Char('q') | KeyCode::Esc => app.close_detail(),
            KeyCode::Char('m') => {
                if app.mark_detail_read(service) {
                    app.set_status("Marked read");
                }
            }
            KeyCode::Char('r') => {
                if let Some(link) = app.reply_to_detail(service) {
                    open_link(&link);
                    app.set_status("Opened reply");
                }
            }
            _ => {}
        },
        View::Contact => {
            let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
            match key.code {
                KeyCode::Esc => app.close_contact(),
                KeyCode::Char('s') if ctrl => {
                    // Validation errors surface through the form banner
                    let _ = app.contact.submit(Instant::now());
                }
                KeyCode::Char('e') if ctrl => {
                    if let Some(body) = edit_body(&app.contact.message, terminal)? {
                        app.contact.message = body;
                    }
                }
                KeyCode::Tab => app.contact.focus_next(),
                KeyCode::BackTab => app.contact.focus_previous(),
                KeyCode::Enter => {
                    if app.contact.focus == Field::Message {
                        app.contact.insert_newline();
                    } else {
                        app.contact.focus_next();
                    }
                }
                KeyCode::Backspace => app.contact.backspace(),
                KeyCode::Char(c) if !ctrl => app.contact.insert_char(c),
                _ => {}
            }
        }
    }
    Ok(())
}

/// Hand the terminal to `$EDITOR` for the message body
fn edit_body(body: &str, terminal: &mut Term) -> Result<Option<String>> {
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen)?;

    let edited = contact::edit_in_editor(body);

    enable_raw_mode()?;
    execute!(io::stdout(), EnterAlternateScreen)?;
    terminal.clear()?;

    edited
}

fn open_link(link: &str) {
    let _ = Command::new("xdg-open")
        .arg(link)
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn();
}

fn render(app: &mut App, f: &mut Frame) {
    let area = f.area();
    let config = app.config.clone();
    let theme = &config.theme;

    // Header, main area and help bar
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .split(area);

    render_header(
        f,
        chunks[0],
        &app.stats,
        &app.criteria,
        app.source,
        theme,
    );

    if app.view == View::Contact {
        render_contact(f, chunks[1], &app.contact, theme);
    } else {
        match app.state.clone() {
            DashboardState::Loading => render_loading(f, chunks[1], theme),
            DashboardState::Empty { notice } => render_empty(f, chunks[1], &notice, theme),
            DashboardState::ShowingList => {
                // Clone visible messages to avoid borrow conflict with list_state
                let visible: Vec<Message> = app.visible_messages().into_iter().cloned().collect();
                let refs: Vec<&Message> = visible.iter().collect();
                let title = if app.criteria.is_empty() {
                    format!(" Inbox ({}) ", app.messages.len())
                } else {
                    format!(" Inbox ({} of {}) ", visible.len(), app.messages.len())
                };
                render_messages(
                    f,
                    chunks[1],
                    &refs,
                    &mut app.list_state,
                    &title,
                    theme,
                    config.layout.date_width,
                    config.layout.name_width,
                );
            }
        }

        if app.view == View::Detail {
            if let Some(message) = &app.detail {
                render_detail(f, chunks[1], message, theme, &config.layout);
            }
        }
    }

    render_help(
        f,
        chunks[2],
        app.view,
        app.status_message.as_deref(),
        &app.criteria.search,
        theme,
    );
}
