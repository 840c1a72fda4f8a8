use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem, ListState},
};

use super::Pane;
use crate::config::ThemeConfig;
use crate::inbox::Message;
use crate::inbox::render::format_date;

#[allow(clippy::too_many_arguments)]
pub fn render_messages(
    f: &mut Frame,
    area: Rect,
    messages: &[&Message],
    state: &mut ListState,
    title: &str,
    theme: &ThemeConfig,
    date_width: usize,
    name_width: usize,
) {
    // Available width: area minus borders (2) minus highlight symbol (2)
    let avail_width = area.width.saturating_sub(4) as usize;
    let name_width = name_width.min(avail_width.saturating_sub(date_width + 4) / 3);
    let status_width = 8;
    let preview_width =
        avail_width.saturating_sub(2 + date_width + 1 + name_width + 1 + status_width + 1);

    let items: Vec<ListItem> = messages
        .iter()
        .map(|m| {
            let marker = if m.is_unread() { "● " } else { "  " };
            let first_line = m.message.lines().next().unwrap_or("");
            let name_style = if m.is_unread() {
                Style::default()
                    .fg(theme.fg())
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(theme.fg_subtle())
            };
            ListItem::new(Line::from(vec![
                Span::styled(marker, Style::default().fg(theme.unread())),
                Span::styled(
                    format!("{} ", truncate(&format_date(&m.created_at), date_width)),
                    Style::default().fg(theme.fg_muted()),
                ),
                Span::styled(format!("{} ", truncate(&m.name, name_width)), name_style),
                Span::styled(
                    format!("{} ", truncate(m.status.as_str(), status_width)),
                    Style::default().fg(theme.status(m.status)),
                ),
                Span::styled(
                    truncate(first_line, preview_width),
                    Style::default().fg(theme.fg_subtle()),
                ),
            ]))
        })
        .collect();

    let pane = Pane::new(title, true, theme);
    let list = List::new(items)
        .block(pane.block())
        .highlight_style(
            Style::default()
                .bg(theme.selected_bg())
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");

    f.render_stateful_widget(list, area, state);
}

/// Pad or cut to exactly `max` characters, marking cuts with "..."
pub fn truncate(s: &str, max: usize) -> String {
    if max < 4 {
        return s.chars().take(max).collect();
    }
    let char_count = s.chars().count();
    if char_count <= max {
        format!("{:width$}", s, width = max)
    } else {
        let truncated: String = s.chars().take(max - 3).collect();
        format!("{}...", truncated)
    }
}
