//! Token stream pane rendering

use crate::parser::lexer::{Token, TokenKind};
use crate::ui::panes::{pane_block, visible_range};
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{List, ListItem},
    Frame,
};

/// Color for a token kind
fn kind_color(kind: TokenKind) -> Color {
    match kind {
        TokenKind::Number => DEFAULT_THEME.number,
        TokenKind::String => DEFAULT_THEME.string,
        TokenKind::Identifier => DEFAULT_THEME.identifier,
        TokenKind::Eof => DEFAULT_THEME.comment,
        TokenKind::And
        | TokenKind::Class
        | TokenKind::Else
        | TokenKind::False
        | TokenKind::For
        | TokenKind::Fun
        | TokenKind::If
        | TokenKind::Nil
        | TokenKind::Or
        | TokenKind::Print
        | TokenKind::Return
        | TokenKind::Super
        | TokenKind::This
        | TokenKind::True
        | TokenKind::Var
        | TokenKind::While => DEFAULT_THEME.keyword,
        _ => DEFAULT_THEME.operator,
    }
}

/// Render the token stream, one token per row
pub fn render_tokens_pane(
    frame: &mut Frame,
    area: Rect,
    tokens: &[Token],
    is_focused: bool,
    scroll_offset: &mut usize,
) {
    let title = format!(" Tokens ({}) ", tokens.len());
    let block = pane_block(&title, is_focused);

    let (skip, take) = visible_range(tokens.len(), area, scroll_offset);

    let items: Vec<ListItem> = tokens
        .iter()
        .skip(skip)
        .take(take)
        .map(|token| {
            let mut spans = vec![
                Span::styled(
                    format!("{:>3} ", token.line),
                    Style::default().fg(DEFAULT_THEME.comment),
                ),
                Span::styled(
                    format!("{:<13}", token.kind.to_string()),
                    Style::default().fg(kind_color(token.kind)),
                ),
                Span::styled(token.lexeme.clone(), Style::default().fg(DEFAULT_THEME.fg)),
            ];
            if let Some(literal) = &token.literal {
                spans.push(Span::styled(
                    format!("  = {}", literal),
                    Style::default().fg(DEFAULT_THEME.comment),
                ));
            }
            ListItem::new(Line::from(spans))
        })
        .collect();

    frame.render_widget(List::new(items).block(block), area);
}
