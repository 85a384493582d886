//! Lox expression front end
//!
//! This module transforms source text into an expression tree:
//! - [`lexer`]: Tokenization (source text → tokens)
//! - [`parse`]: Parser state, helpers and error type (tokens → AST)
//! - [`ast`]: AST node definitions
//! - [`printer`]: Parenthesized and outline renderings of a tree
//!
//! # Supported Grammar
//!
//! A single expression built from number, string, `true`, `false` and `nil`
//! literals, parentheses, prefix `!` and `-`, and the binary operators
//! `* /`, `+ -`, `> >= < <=`, `== !=` (tightest first, all left-associative).
//! The lexer recognizes the full Lox token set, including keywords the grammar
//! does not use yet.
//!
//! # Parser Implementation
//!
//! Hand-written recursive descent parser with one method per precedence level.
//! No external parser generator dependencies.

pub mod ast;
mod expressions;
pub mod lexer;
pub mod parse;
pub mod printer;

use crate::diagnostics::Diagnostics;
use ast::Expr;
use parse::{ParseError, Parser};

/// Lex and parse `source` as one expression.
///
/// Lexical errors do not stop parsing; callers check
/// [`Diagnostics::had_error`] before trusting an `Ok` tree.
pub fn parse_expression(source: &str, diagnostics: &mut Diagnostics) -> Result<Expr, ParseError> {
    let tokens = lexer::tokenize(source, diagnostics);
    Parser::new(tokens, diagnostics).parse()
}
