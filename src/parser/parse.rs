//! Main parser coordinator
//!
//! This module provides the [`Parser`] struct and core parsing infrastructure,
//! including the error type, token-consumption helpers, and the main parse
//! entry point.
//!
//! # Parser Architecture
//!
//! The Parser uses a recursive descent approach with the following organization:
//! - This module: Parser struct, helper methods, error recovery
//! - `expressions`: one method per precedence level of the expression grammar
//!
//! # Implementation
//!
//! Grammar methods live in a separate `impl Parser` block in `expressions`,
//! sharing the parser state defined here. A syntax error is reported to the
//! [`Diagnostics`] sink where it is detected and then propagated as a
//! [`ParseError`] through every level, so no partial tree escapes.

use crate::diagnostics::{Diagnostic, Diagnostics};
use crate::parser::ast::Expr;
use crate::parser::lexer::{Token, TokenKind};
use std::fmt;

/// Parser error type
#[derive(Debug, Clone, PartialEq)]
pub struct ParseError {
    pub message: String,
    pub token: Token,
}

impl ParseError {
    /// The diagnostic this error was reported as
    pub fn diagnostic(&self) -> Diagnostic {
        Diagnostic::at_token(&self.token, self.message.as_str())
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.diagnostic())
    }
}

impl std::error::Error for ParseError {}

/// Deepest nesting of groups and prefix operators accepted before the parse
/// is abandoned with a diagnostic
pub const MAX_NESTING_DEPTH: usize = 255;

/// Recursive descent parser for Lox expressions
pub struct Parser<'d> {
    pub(crate) tokens: Vec<Token>,
    pub(crate) position: usize,
    pub(crate) depth: usize,
    pub(crate) diagnostics: &'d mut Diagnostics,
}

impl<'d> Parser<'d> {
    /// Create a parser over `tokens`.
    ///
    /// The stream is expected to end in `Eof`, as produced by the lexer; one is
    /// appended otherwise so that `peek` is always in bounds.
    pub fn new(mut tokens: Vec<Token>, diagnostics: &'d mut Diagnostics) -> Self {
        if !tokens.last().is_some_and(Token::is_eof) {
            let line = tokens.last().map_or(1, |t| t.line);
            tokens.push(Token::new(TokenKind::Eof, "", None, line));
        }
        Self {
            tokens,
            position: 0,
            depth: 0,
            diagnostics,
        }
    }

    /// Parse a single expression.
    ///
    /// Tokens after a complete expression are left unconsumed.
    pub fn parse(&mut self) -> Result<Expr, ParseError> {
        self.parse_expression()
    }

    /// Discard tokens until the start of the next statement.
    ///
    /// Stops after a `;` or before a statement keyword. Unused until statements
    /// are parsed.
    #[allow(dead_code)]
    pub(crate) fn synchronize(&mut self) {
        self.advance();

        while !self.is_at_end() {
            if self.previous().kind == TokenKind::Semicolon {
                return;
            }

            match self.peek().kind {
                TokenKind::Class
                | TokenKind::Fun
                | TokenKind::Var
                | TokenKind::For
                | TokenKind::If
                | TokenKind::While
                | TokenKind::Print
                | TokenKind::Return => return,
                _ => {}
            }

            self.advance();
        }
    }

    // ===== Helper methods =====

    /// Consume the current token if its kind is one of `kinds`
    pub(crate) fn match_kinds(&mut self, kinds: &[TokenKind]) -> bool {
        if kinds.iter().any(|&kind| self.check(kind)) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Peek without consuming; always false at end of input
    pub(crate) fn check(&self, kind: TokenKind) -> bool {
        !self.is_at_end() && self.peek().kind == kind
    }

    pub(crate) fn advance(&mut self) -> &Token {
        if !self.is_at_end() {
            self.position += 1;
        }
        self.previous()
    }

    pub(crate) fn is_at_end(&self) -> bool {
        self.peek().is_eof()
    }

    pub(crate) fn peek(&self) -> &Token {
        &self.tokens[self.position]
    }

    /// The most recently consumed token. Only called after a successful
    /// `advance`.
    pub(crate) fn previous(&self) -> &Token {
        &self.tokens[self.position.saturating_sub(1)]
    }

    /// Consume a token of `kind`, or fail with `message` at the current token
    pub(crate) fn consume(
        &mut self,
        kind: TokenKind,
        message: &str,
    ) -> Result<&Token, ParseError> {
        if self.check(kind) {
            Ok(self.advance())
        } else {
            Err(self.error_at_current(message))
        }
    }

    /// Report `message` at the current token and build the error to propagate
    pub(crate) fn error_at_current(&mut self, message: &str) -> ParseError {
        let token = self.peek().clone();
        self.diagnostics.error_at_token(&token, message);
        ParseError {
            message: message.to_string(),
            token,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::lexer::tokenize;

    fn parser_for<'d>(source: &str, diagnostics: &'d mut Diagnostics) -> Parser<'d> {
        let mut lex_diagnostics = Diagnostics::new();
        let tokens = tokenize(source, &mut lex_diagnostics);
        Parser::new(tokens, diagnostics)
    }

    #[test]
    fn test_check_is_false_at_end() {
        let mut diagnostics = Diagnostics::new();
        let parser = parser_for("", &mut diagnostics);

        assert!(parser.is_at_end());
        assert!(!parser.check(TokenKind::Eof));
    }

    #[test]
    fn test_advance_stops_at_eof() {
        let mut diagnostics = Diagnostics::new();
        let mut parser = parser_for("1", &mut diagnostics);

        assert_eq!(parser.advance().kind, TokenKind::Number);
        assert!(parser.is_at_end());
        parser.advance();
        assert!(parser.is_at_end());
        assert_eq!(parser.peek().kind, TokenKind::Eof);
    }

    #[test]
    fn test_match_kinds_consumes_only_on_hit() {
        let mut diagnostics = Diagnostics::new();
        let mut parser = parser_for("+ -", &mut diagnostics);

        assert!(!parser.match_kinds(&[TokenKind::Star, TokenKind::Slash]));
        assert_eq!(parser.peek().kind, TokenKind::Plus);
        assert!(parser.match_kinds(&[TokenKind::Minus, TokenKind::Plus]));
        assert_eq!(parser.previous().kind, TokenKind::Plus);
        assert_eq!(parser.peek().kind, TokenKind::Minus);
    }

    #[test]
    fn test_consume_reports_once() {
        let mut diagnostics = Diagnostics::new();
        {
            let mut parser = parser_for("1", &mut diagnostics);
            let err = parser
                .consume(TokenKind::RightParen, "Expect ')' after expression.")
                .unwrap_err();
            assert_eq!(err.token.kind, TokenKind::Number);
            assert_eq!(
                err.to_string(),
                "[line 1] Error at '1': Expect ')' after expression."
            );
        }
        assert_eq!(diagnostics.len(), 1);
    }

    #[test]
    fn test_new_appends_missing_eof() {
        let mut diagnostics = Diagnostics::new();
        let parser = Parser::new(Vec::new(), &mut diagnostics);

        assert_eq!(parser.tokens.len(), 1);
        assert!(parser.is_at_end());
    }

    #[test]
    fn test_synchronize_stops_after_semicolon() {
        let mut diagnostics = Diagnostics::new();
        let mut parser = parser_for("1 + ; 2", &mut diagnostics);

        parser.synchronize();
        assert_eq!(parser.previous().kind, TokenKind::Semicolon);
        assert_eq!(parser.peek().lexeme, "2");
    }

    #[test]
    fn test_synchronize_stops_before_statement_keyword() {
        let mut diagnostics = Diagnostics::new();
        let mut parser = parser_for("1 2 3 var x", &mut diagnostics);

        parser.synchronize();
        assert_eq!(parser.peek().kind, TokenKind::Var);
    }

    #[test]
    fn test_synchronize_runs_to_end() {
        let mut diagnostics = Diagnostics::new();
        let mut parser = parser_for("1 2 3", &mut diagnostics);

        parser.synchronize();
        assert!(parser.is_at_end());
    }
}
