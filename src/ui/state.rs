use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Clear, Paragraph},
};

use super::{Modal, Pane};
use crate::config::ThemeConfig;

/// Placeholder shown while a load is in flight
pub fn render_loading(f: &mut Frame, area: Rect, theme: &ThemeConfig) {
    let pane = Pane::new(" Messages ", true, theme);
    f.render_widget(pane.block(), area);

    let modal = Modal::new(" Loading ", theme);
    let modal_area = modal.centered_rect(40, 5, area);
    f.render_widget(Clear, modal_area);

    let block = modal.block();
    let inner = block.inner(modal_area);
    f.render_widget(block, modal_area);

    let msg = Paragraph::new(Line::from(Span::styled(
        "Loading messages...",
        Style::default().fg(theme.fg()),
    )))
    .alignment(Alignment::Center);
    f.render_widget(msg, inner);
}

/// Shown when the filtered list is empty or the load produced nothing
pub fn render_empty(f: &mut Frame, area: Rect, notice: &str, theme: &ThemeConfig) {
    let pane = Pane::new(" Messages ", true, theme);
    let block = pane.block();
    let inner = block.inner(area);
    f.render_widget(block, area);

    let text = vec![
        Line::from(""),
        Line::from(Span::styled(notice, Style::default().fg(theme.fg_subtle()))),
        Line::from(Span::styled(
            "Press c to write a message or R to refresh",
            Style::default().fg(theme.fg_muted()),
        )),
    ];
    f.render_widget(Paragraph::new(text).alignment(Alignment::Center), inner);
}
