use ratatui::{Frame, layout::Rect, style::Style, text::{Line, Span}, widgets::Paragraph};

use crate::app::View;
use crate::config::ThemeConfig;

pub fn render_help(
    f: &mut Frame,
    area: Rect,
    view: View,
    status: Option<&str>,
    search_query: &str,
    theme: &ThemeConfig,
) {
    let key_style = Style::default().fg(theme.primary());
    let text_style = Style::default().fg(theme.fg_subtle());
    let search_style = Style::default().fg(theme.fg());

    let keys: &[(&str, &str)] = match view {
        View::Dashboard => &[
            ("j/k", "nav"),
            ("Enter", "open"),
            ("/", "search"),
            ("s", "status"),
            ("d", "date"),
            ("A", "read all"),
            ("x", "delete"),
            ("c", "contact"),
            ("R", "refresh"),
            ("q", "quit"),
        ],
        View::Search => &[("Enter", "confirm"), ("Esc", "clear")],
        View::Detail => &[("m", "mark read"), ("r", "reply"), ("Esc", "close")],
        View::Contact => &[
            ("Tab", "next field"),
            ("Ctrl-s", "send"),
            ("Ctrl-e", "editor"),
            ("Esc", "back"),
        ],
    };

    let mut spans = Vec::new();
    if view == View::Search {
        spans.push(Span::styled("/", key_style));
        spans.push(Span::raw(" "));
        spans.push(Span::styled(search_query.to_string(), search_style));
        spans.push(Span::styled("_", key_style));
        spans.push(Span::styled("  ", text_style));
    }
    for (key, label) in keys {
        spans.push(Span::styled(*key, key_style));
        spans.push(Span::styled(format!(" {}  ", label), text_style));
    }

    let mut line = Line::from(spans);

    // Add status message if present
    if let Some(msg) = status {
        line.spans
            .push(Span::styled("  │  ", Style::default().fg(theme.border())));
        line.spans
            .push(Span::styled(msg.to_string(), Style::default().fg(theme.success())));
    }

    let paragraph = Paragraph::new(line).style(Style::default().bg(theme.bg_panel()));

    f.render_widget(paragraph, area);
}
