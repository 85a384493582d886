//! Input line rendering

use crate::ui::panes::pane_block;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::{Position, Rect},
    style::Style,
    widgets::Paragraph,
    Frame,
};

/// Render the input line and place the terminal cursor at `cursor` (a char index)
pub fn render_input_pane(frame: &mut Frame, area: Rect, input: &str, cursor: usize) {
    let block = pane_block(" Expression ", true);
    let inner_width = area.width.saturating_sub(2) as usize;

    // Scroll horizontally so the cursor stays visible
    let skip = cursor.saturating_sub(inner_width.saturating_sub(1));
    let visible: String = input.chars().skip(skip).take(inner_width).collect();

    let paragraph = if input.is_empty() {
        Paragraph::new("type an expression, e.g. (1 + 2) * 3")
            .style(Style::default().fg(DEFAULT_THEME.comment))
    } else {
        Paragraph::new(visible).style(Style::default().fg(DEFAULT_THEME.fg))
    };

    frame.render_widget(paragraph.block(block), area);

    let column = (cursor - skip) as u16;
    frame.set_cursor_position(Position::new(area.x + 1 + column, area.y + 1));
}
