//! Diagnostic sink shared by the lexer and the parser
//!
//! [`Diagnostics`] is an accumulator owned by the caller. The lexer and the
//! parser each borrow it for one source unit and append a [`Diagnostic`] for
//! every error they find; the caller inspects [`Diagnostics::had_error`] right
//! after the parse and calls [`Diagnostics::clear`] before the next input.

use crate::parser::lexer::Token;
use std::fmt;

/// Where on its line a diagnostic points
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Context {
    /// Lexer-level report, line number only
    Line,
    /// The offending token is the end of input
    AtEnd,
    /// The offending token's lexeme
    AtLexeme(String),
}

impl fmt::Display for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Context::Line => Ok(()),
            Context::AtEnd => write!(f, " at end"),
            Context::AtLexeme(lexeme) => write!(f, " at '{}'", lexeme),
        }
    }
}

/// A single reported error
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub line: usize,
    pub context: Context,
    pub message: String,
}

impl Diagnostic {
    pub fn at_line(line: usize, message: impl Into<String>) -> Self {
        Self {
            line,
            context: Context::Line,
            message: message.into(),
        }
    }

    pub fn at_token(token: &Token, message: impl Into<String>) -> Self {
        let context = if token.is_eof() {
            Context::AtEnd
        } else {
            Context::AtLexeme(token.lexeme.clone())
        };
        Self {
            line: token.line,
            context,
            message: message.into(),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[line {}] Error{}: {}",
            self.line, self.context, self.message
        )
    }
}

/// Error accumulator for one lex/parse cycle
#[derive(Debug, Clone, Default)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a diagnostic
    pub fn report(&mut self, diagnostic: Diagnostic) {
        self.entries.push(diagnostic);
    }

    /// Record a lexer-level error on `line`
    pub fn error_at_line(&mut self, line: usize, message: impl Into<String>) {
        self.report(Diagnostic::at_line(line, message));
    }

    /// Record a parser-level error pointing at `token`
    pub fn error_at_token(&mut self, token: &Token, message: impl Into<String>) {
        self.report(Diagnostic::at_token(token, message));
    }

    pub fn had_error(&self) -> bool {
        !self.entries.is_empty()
    }

    /// Forget everything recorded so far
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.entries.iter()
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a Diagnostic;
    type IntoIter = std::slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::lexer::TokenKind;

    #[test]
    fn test_line_only_format() {
        let diagnostic = Diagnostic::at_line(3, "Unexpected character: $");
        assert_eq!(
            diagnostic.to_string(),
            "[line 3] Error: Unexpected character: $"
        );
    }

    #[test]
    fn test_token_context_format() {
        let plus = Token::new(TokenKind::Plus, "+", None, 2);
        let eof = Token::new(TokenKind::Eof, "", None, 4);

        assert_eq!(
            Diagnostic::at_token(&plus, "Expect expression.").to_string(),
            "[line 2] Error at '+': Expect expression."
        );
        assert_eq!(
            Diagnostic::at_token(&eof, "Expect expression.").to_string(),
            "[line 4] Error at end: Expect expression."
        );
    }

    #[test]
    fn test_had_error_and_clear() {
        let mut diagnostics = Diagnostics::new();
        assert!(!diagnostics.had_error());

        diagnostics.error_at_line(1, "first");
        diagnostics.error_at_line(2, "second");
        assert!(diagnostics.had_error());
        assert_eq!(diagnostics.len(), 2);

        let lines: Vec<usize> = (&diagnostics).into_iter().map(|d| d.line).collect();
        assert_eq!(lines, vec![1, 2]);

        diagnostics.clear();
        assert!(!diagnostics.had_error());
        assert!(diagnostics.is_empty());
    }
}
