//! TUI pane rendering modules
//!
//! # Pane Modules
//!
//! - [`input`]: The editable source line with cursor
//! - [`tokens`]: Token stream produced by the lexer
//! - [`tree`]: Outline of the parsed tree and its printed form
//! - [`diagnostics`]: Errors recorded for the current input
//! - [`status`]: Status bar with keybindings and parse state
//!
//! Each pane module exports a `render_*` function taking the frame, its area
//! and the data to draw. Scrollable panes share [`visible_range`].

pub mod diagnostics;
pub mod input;
pub mod status;
pub mod tokens;
pub mod tree;

pub use diagnostics::render_diagnostics_pane;
pub use input::render_input_pane;
pub use status::render_status_bar;
pub use tokens::render_tokens_pane;
pub use tree::{render_printed_pane, render_tree_pane};

use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    widgets::{Block, Borders},
};

/// Bordered block with the focus-dependent border style
pub(crate) fn pane_block(title: &str, is_focused: bool) -> Block<'_> {
    let border_style = if is_focused {
        Style::default()
            .fg(DEFAULT_THEME.border_focused)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DEFAULT_THEME.border_normal)
    };

    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(border_style)
}

/// Clamp `scroll_offset` to the content and return the `(skip, take)` window
/// of items that fit inside `area` (borders excluded).
pub(crate) fn visible_range(total_items: usize, area: Rect, scroll_offset: &mut usize) -> (usize, usize) {
    let visible_height = area.height.saturating_sub(2).max(1) as usize;

    if total_items > visible_height {
        let max_scroll = total_items - visible_height;
        *scroll_offset = (*scroll_offset).min(max_scroll);
    } else {
        *scroll_offset = 0;
    }

    (*scroll_offset, visible_height)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_visible_range_clamps() {
        let area = Rect::new(0, 0, 20, 7); // 5 rows inside the borders

        let mut scroll = 100;
        assert_eq!(visible_range(12, area, &mut scroll), (7, 5));
        assert_eq!(scroll, 7);

        let mut scroll = 3;
        assert_eq!(visible_range(4, area, &mut scroll), (0, 5));
        assert_eq!(scroll, 0);
    }
}
