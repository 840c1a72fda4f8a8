use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Clear, Paragraph, Wrap},
};

use super::Modal;
use crate::config::{LayoutConfig, ThemeConfig};
use crate::inbox::Message;
use crate::inbox::render::format_date;

/// Lines of the detail overlay: labelled fields, then the full body
pub fn detail_lines<'a>(message: &'a Message, theme: &ThemeConfig) -> Vec<Line<'a>> {
    let label = Style::default()
        .fg(theme.fg_muted())
        .add_modifier(Modifier::BOLD);
    let value = Style::default().fg(theme.fg());

    let mut lines = vec![
        Line::from(vec![
            Span::styled("Name    ", label),
            Span::styled(message.name.as_str(), value),
        ]),
        Line::from(vec![
            Span::styled("Email   ", label),
            Span::styled(message.email.as_str(), Style::default().fg(theme.secondary())),
        ]),
        Line::from(vec![
            Span::styled("Date    ", label),
            Span::styled(format_date(&message.created_at), value),
        ]),
        Line::from(vec![
            Span::styled("Status  ", label),
            Span::styled(
                message.status.as_str(),
                Style::default().fg(theme.status(message.status)),
            ),
        ]),
        Line::from(""),
        Line::from(Span::styled("Message", label)),
    ];
    lines.extend(
        message
            .message
            .lines()
            .map(|l| Line::from(Span::styled(l, value))),
    );
    lines
}

pub fn render_detail(
    f: &mut Frame,
    area: Rect,
    message: &Message,
    theme: &ThemeConfig,
    layout: &LayoutConfig,
) {
    let modal = Modal::new(" Message ", theme);
    let modal_area = modal.centered_pct(layout.detail_width, layout.detail_height, area);
    f.render_widget(Clear, modal_area);

    let paragraph = Paragraph::new(detail_lines(message, theme))
        .block(modal.block())
        .wrap(Wrap { trim: false });
    f.render_widget(paragraph, modal_area);
}
