//! Diagnostics pane rendering

use crate::diagnostics::Diagnostics;
use crate::ui::panes::{pane_block, visible_range};
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::Style,
    widgets::{List, ListItem, Padding, Paragraph},
    Frame,
};

/// Render the diagnostics recorded for the current input
pub fn render_diagnostics_pane(
    frame: &mut Frame,
    area: Rect,
    diagnostics: &Diagnostics,
    is_focused: bool,
    scroll_offset: &mut usize,
) {
    let block = pane_block(" Diagnostics ", is_focused);

    if diagnostics.is_empty() {
        let paragraph = Paragraph::new("(no errors)")
            .block(block)
            .style(Style::default().fg(DEFAULT_THEME.success));
        frame.render_widget(paragraph, area);
        return;
    }

    let block = block.padding(Padding::new(1, 0, 0, 0));
    let (skip, take) = visible_range(diagnostics.len(), area, scroll_offset);

    let items: Vec<ListItem> = diagnostics
        .iter()
        .skip(skip)
        .take(take)
        .map(|d| ListItem::new(d.to_string()).style(Style::default().fg(DEFAULT_THEME.error)))
        .collect();

    frame.render_widget(List::new(items).block(block), area);
}
