//! Lexer (tokenizer) for Lox source code
//!
//! Converts raw source text into a flat [`Token`] stream consumed by the parser.
//! Lexical errors are recorded in the [`Diagnostics`] sink and skipped, so the
//! caller always receives a complete token stream terminated by
//! [`TokenKind::Eof`].

use crate::diagnostics::Diagnostics;
use rustc_hash::FxHashMap;
use std::fmt;
use std::sync::OnceLock;

/// All token kinds produced by the lexer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // Single-character punctuation
    LeftParen,  // (
    RightParen, // )
    LeftBrace,  // {
    RightBrace, // }
    Comma,      // ,
    Dot,        // .
    Minus,      // -
    Plus,       // +
    Semicolon,  // ;
    Slash,      // /
    Star,       // *

    // One or two character operators
    Bang,         // !
    BangEqual,    // !=
    Equal,        // =
    EqualEqual,   // ==
    Greater,      // >
    GreaterEqual, // >=
    Less,         // <
    LessEqual,    // <=

    // Literals
    Identifier,
    String,
    Number,

    // Keywords
    And,
    Class,
    Else,
    False,
    For,
    Fun,
    If,
    Nil,
    Or,
    Print,
    Return,
    Super,
    This,
    True,
    Var,
    While,

    // End of file
    Eof,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Literal payload of a `Number` or `String` token
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Number(f64),
    String(String),
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Number(n) => write!(f, "{}", format_number(*n)),
            Literal::String(s) => write!(f, "{}", s),
        }
    }
}

/// Render a number in shortest form, switching to exponent notation
/// (`1e+21`, `1e-05`) when the decimal exponent is below -4 or at least 21.
pub fn format_number(value: f64) -> String {
    if value == 0.0 || !value.is_finite() {
        return value.to_string();
    }

    let scientific = format!("{:e}", value);
    let Some((mantissa, exponent)) = scientific.split_once('e') else {
        return value.to_string();
    };
    match exponent.parse::<i32>() {
        Ok(exp) if !(-4..21).contains(&exp) => {
            let sign = if exp < 0 { '-' } else { '+' };
            format!("{}e{}{:02}", mantissa, sign, exp.abs())
        }
        _ => value.to_string(),
    }
}

/// A single lexeme with its kind, optional literal value and source line.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: String,
    pub literal: Option<Literal>,
    pub line: usize,
}

impl Token {
    pub fn new(
        kind: TokenKind,
        lexeme: impl Into<String>,
        literal: Option<Literal>,
        line: usize,
    ) -> Self {
        Self {
            kind,
            lexeme: lexeme.into(),
            literal,
            line,
        }
    }

    pub fn is_eof(&self) -> bool {
        self.kind == TokenKind::Eof
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.literal {
            Some(literal) => write!(f, "{} {} {}", self.kind, self.lexeme, literal),
            None => write!(f, "{} {} nil", self.kind, self.lexeme),
        }
    }
}

/// Reserved words, matched exactly and case-sensitively.
fn keywords() -> &'static FxHashMap<&'static str, TokenKind> {
    static KEYWORDS: OnceLock<FxHashMap<&'static str, TokenKind>> = OnceLock::new();
    KEYWORDS.get_or_init(|| {
        [
            ("and", TokenKind::And),
            ("class", TokenKind::Class),
            ("else", TokenKind::Else),
            ("false", TokenKind::False),
            ("for", TokenKind::For),
            ("fun", TokenKind::Fun),
            ("if", TokenKind::If),
            ("nil", TokenKind::Nil),
            ("or", TokenKind::Or),
            ("print", TokenKind::Print),
            ("return", TokenKind::Return),
            ("super", TokenKind::Super),
            ("this", TokenKind::This),
            ("true", TokenKind::True),
            ("var", TokenKind::Var),
            ("while", TokenKind::While),
        ]
        .into_iter()
        .collect()
    })
}

/// Decimal digits only; other numeric characters such as `²` are not part of a numeral
fn is_digit(ch: char) -> bool {
    ch.is_ascii_digit()
}

fn is_alpha(ch: char) -> bool {
    ch.is_alphabetic() || ch == '_'
}

fn is_alphanumeric(ch: char) -> bool {
    is_alpha(ch) || is_digit(ch)
}

/// Lexer for Lox source code
pub struct Lexer<'d> {
    input: Vec<char>,
    tokens: Vec<Token>,
    start: usize,
    current: usize,
    line: usize,
    diagnostics: &'d mut Diagnostics,
}

impl<'d> Lexer<'d> {
    /// Create a new lexer for the given source string.
    pub fn new(input: &str, diagnostics: &'d mut Diagnostics) -> Self {
        Self {
            input: input.chars().collect(),
            tokens: Vec::new(),
            start: 0,
            current: 0,
            line: 1,
            diagnostics,
        }
    }

    /// Tokenize the entire input.
    ///
    /// Never fails: malformed lexemes are reported and dropped, and the
    /// returned stream always ends with exactly one `Eof` token.
    pub fn tokenize(mut self) -> Vec<Token> {
        while !self.is_at_end() {
            self.start = self.current;
            self.scan_token();
        }

        self.tokens
            .push(Token::new(TokenKind::Eof, "", None, self.line));
        self.tokens
    }

    fn scan_token(&mut self) {
        let ch = self.advance();

        match ch {
            '(' => self.add_token(TokenKind::LeftParen),
            ')' => self.add_token(TokenKind::RightParen),
            '{' => self.add_token(TokenKind::LeftBrace),
            '}' => self.add_token(TokenKind::RightBrace),
            ',' => self.add_token(TokenKind::Comma),
            '.' => self.add_token(TokenKind::Dot),
            '-' => self.add_token(TokenKind::Minus),
            '+' => self.add_token(TokenKind::Plus),
            ';' => self.add_token(TokenKind::Semicolon),
            '*' => self.add_token(TokenKind::Star),

            '!' => {
                let kind = if self.match_char('=') {
                    TokenKind::BangEqual
                } else {
                    TokenKind::Bang
                };
                self.add_token(kind);
            }
            '=' => {
                let kind = if self.match_char('=') {
                    TokenKind::EqualEqual
                } else {
                    TokenKind::Equal
                };
                self.add_token(kind);
            }
            '<' => {
                let kind = if self.match_char('=') {
                    TokenKind::LessEqual
                } else {
                    TokenKind::Less
                };
                self.add_token(kind);
            }
            '>' => {
                let kind = if self.match_char('=') {
                    TokenKind::GreaterEqual
                } else {
                    TokenKind::Greater
                };
                self.add_token(kind);
            }

            '/' => {
                if self.match_char('/') {
                    // Line comment runs to the newline, which is left for the line counter
                    while self.peek().is_some_and(|c| c != '\n') {
                        self.advance();
                    }
                } else {
                    self.add_token(TokenKind::Slash);
                }
            }

            ' ' | '\r' | '\t' => {}
            '\n' => self.line += 1,

            '"' => self.string_literal(),

            c if is_digit(c) => self.number_literal(),
            c if is_alpha(c) => self.identifier_or_keyword(),

            c => self
                .diagnostics
                .error_at_line(self.line, format!("Unexpected character: {}", c)),
        }
    }

    /// Parse string literal (raw content, no escape sequences)
    fn string_literal(&mut self) {
        while let Some(ch) = self.peek() {
            if ch == '"' {
                break;
            }
            if ch == '\n' {
                self.line += 1;
            }
            self.advance();
        }

        if self.is_at_end() {
            self.diagnostics
                .error_at_line(self.line, "Unterminated string.");
            return;
        }

        self.advance(); // consume closing quote

        let value: String = self.input[self.start + 1..self.current - 1].iter().collect();
        self.add_literal_token(TokenKind::String, Some(Literal::String(value)));
    }

    /// Parse numeric literal: digits, optionally `.` followed by digits
    fn number_literal(&mut self) {
        while self.peek().is_some_and(is_digit) {
            self.advance();
        }

        // A trailing '.' without a digit after it belongs to the next token
        if self.peek() == Some('.') && self.peek_next().is_some_and(is_digit) {
            self.advance(); // consume '.'
            while self.peek().is_some_and(is_digit) {
                self.advance();
            }
        }

        // Numerals too large for an f64 are rejected rather than rounded to infinity
        let text = self.lexeme();
        match text.parse::<f64>() {
            Ok(value) if value.is_finite() => {
                self.add_literal_token(TokenKind::Number, Some(Literal::Number(value)))
            }
            _ => self
                .diagnostics
                .error_at_line(self.line, format!("Invalid number literal '{}'.", text)),
        }
    }

    /// Parse identifier or keyword
    fn identifier_or_keyword(&mut self) {
        while self.peek().is_some_and(is_alphanumeric) {
            self.advance();
        }

        let text = self.lexeme();
        let kind = keywords()
            .get(text.as_str())
            .copied()
            .unwrap_or(TokenKind::Identifier);
        self.add_token(kind);
    }

    fn add_token(&mut self, kind: TokenKind) {
        self.add_literal_token(kind, None);
    }

    fn add_literal_token(&mut self, kind: TokenKind, literal: Option<Literal>) {
        let lexeme = self.lexeme();
        self.tokens.push(Token::new(kind, lexeme, literal, self.line));
    }

    /// Text of the lexeme between `start` and `current`
    fn lexeme(&self) -> String {
        self.input[self.start..self.current].iter().collect()
    }

    /// Consume the current character if it equals `expected`
    fn match_char(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.current += 1;
            true
        } else {
            false
        }
    }

    /// Peek at current character without consuming
    fn peek(&self) -> Option<char> {
        self.input.get(self.current).copied()
    }

    /// Peek one character past the current one
    fn peek_next(&self) -> Option<char> {
        self.input.get(self.current + 1).copied()
    }

    /// Advance to next character. Callers check `is_at_end` first.
    fn advance(&mut self) -> char {
        let ch = self.input[self.current];
        self.current += 1;
        ch
    }

    fn is_at_end(&self) -> bool {
        self.current >= self.input.len()
    }
}

/// Tokenize `source`, recording lexical errors in `diagnostics`.
pub fn tokenize(source: &str, diagnostics: &mut Diagnostics) -> Vec<Token> {
    Lexer::new(source, diagnostics).tokenize()
}
