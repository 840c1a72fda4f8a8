use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::config::ThemeConfig;
use crate::inbox::{FilterCriteria, Source, Stats};

/// Stats counters and the active filters, two lines
pub fn render_header(
    f: &mut Frame,
    area: Rect,
    stats: &Stats,
    criteria: &FilterCriteria,
    source: Option<Source>,
    theme: &ThemeConfig,
) {
    let key = Style::default().fg(theme.fg_muted());
    let num = Style::default()
        .fg(theme.primary())
        .add_modifier(Modifier::BOLD);
    let text = Style::default().fg(theme.fg_subtle());

    let mut counters = vec![
        Span::styled(" Total ", key),
        Span::styled(stats.total.to_string(), num),
        Span::styled("   Today ", key),
        Span::styled(stats.today.to_string(), num),
        Span::styled("   Last 24h ", key),
        Span::styled(stats.recent.to_string(), num),
        Span::styled("   Unread ", key),
        Span::styled(stats.unread.to_string(), num),
    ];
    if source == Some(Source::Local) {
        counters.push(Span::styled(
            "   (offline: local copy)",
            Style::default().fg(theme.warning()),
        ));
    }

    let search = if criteria.search.is_empty() {
        "-".to_string()
    } else {
        criteria.search.clone()
    };
    let filters = vec![
        Span::styled(" Status ", key),
        Span::styled(criteria.status.to_string(), text),
        Span::styled("   Date ", key),
        Span::styled(criteria.date.to_string(), text),
        Span::styled("   Search ", key),
        Span::styled(search, text),
    ];

    let paragraph = Paragraph::new(vec![Line::from(counters), Line::from(filters)])
        .style(Style::default().bg(theme.bg_panel()));
    f.render_widget(paragraph, area);
}
