//! Tree outline and printed-form rendering

use crate::parser::ast::Expr;
use crate::parser::printer::{outline, print};
use crate::ui::panes::{pane_block, visible_range};
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{List, ListItem, Paragraph},
    Frame,
};

/// Render the tree as an indented outline
pub fn render_tree_pane(
    frame: &mut Frame,
    area: Rect,
    tree: Option<&Expr>,
    is_focused: bool,
    scroll_offset: &mut usize,
) {
    let block = pane_block(" Tree ", is_focused);

    let Some(expr) = tree else {
        *scroll_offset = 0;
        let paragraph = Paragraph::new("(no tree)")
            .block(block)
            .style(Style::default().fg(DEFAULT_THEME.comment));
        frame.render_widget(paragraph, area);
        return;
    };

    let lines = outline(expr);
    let (skip, take) = visible_range(lines.len(), area, scroll_offset);

    let items: Vec<ListItem> = lines
        .into_iter()
        .skip(skip)
        .take(take)
        .map(|line| {
            // Split "<indent><Node> <detail>" so the node name can be colored
            let trimmed = line.trim_start();
            let indent = &line[..line.len() - trimmed.len()];
            let (node, detail) = trimmed.split_once(' ').unwrap_or((trimmed, ""));
            ListItem::new(Line::from(vec![
                Span::raw(indent.to_string()),
                Span::styled(node.to_string(), Style::default().fg(DEFAULT_THEME.primary)),
                Span::raw(" "),
                Span::styled(detail.to_string(), Style::default().fg(DEFAULT_THEME.fg)),
            ]))
        })
        .collect();

    frame.render_widget(List::new(items).block(block), area);
}

/// Render the parenthesized form of the tree on one line
pub fn render_printed_pane(frame: &mut Frame, area: Rect, tree: Option<&Expr>) {
    let block = pane_block(" Printed ", false);
    let paragraph = match tree {
        Some(expr) => Paragraph::new(print(expr)).style(Style::default().fg(DEFAULT_THEME.secondary)),
        None => Paragraph::new("(no tree)").style(Style::default().fg(DEFAULT_THEME.comment)),
    };
    frame.render_widget(paragraph.block(block), area);
}
