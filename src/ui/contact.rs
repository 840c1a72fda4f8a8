use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
};

use super::Pane;
use crate::config::ThemeConfig;
use crate::contact::{BannerKind, ContactForm, Field};

pub fn render_contact(f: &mut Frame, area: Rect, form: &ContactForm, theme: &ThemeConfig) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Name
            Constraint::Length(3), // Email
            Constraint::Min(5),    // Message
            Constraint::Length(1), // Banner
        ])
        .split(area);

    for (field, chunk) in [Field::Name, Field::Email, Field::Message]
        .into_iter()
        .zip(chunks.iter())
    {
        let focused = form.focus == field;
        let title = format!(" {} ", field.label());
        let pane = Pane::new(&title, focused, theme);
        let mut content = form.field(field).to_string();
        if focused && !form.is_submitting() {
            content.push('_');
        }
        let paragraph = Paragraph::new(content)
            .style(Style::default().fg(theme.fg()))
            .block(pane.block())
            .wrap(Wrap { trim: false });
        f.render_widget(paragraph, *chunk);
    }

    if let Some(banner) = form.banner() {
        let color = match banner.kind {
            BannerKind::Info => theme.info(),
            BannerKind::Success => theme.success(),
            BannerKind::Error => theme.error(),
        };
        let line = Line::from(Span::styled(
            format!(" {}", banner.text),
            Style::default().fg(color),
        ));
        f.render_widget(Paragraph::new(line), chunks[3]);
    }
}
