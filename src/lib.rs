//! # Introduction
//!
//! loxparse turns the text of a Lox expression into a syntax tree, reporting
//! precise diagnostics for malformed input. Trees can be printed in a
//! parenthesized prefix form or explored interactively through a terminal UI
//! built with [ratatui](https://docs.rs/ratatui).
//!
//! ## Pipeline
//!
//! ```text
//! Source → Lexer → Tokens → Parser → Expr → Printer / Explorer
//!                 ↘        ↘
//!                   Diagnostics
//! ```
//!
//! 1. [`parser`] — tokenises the source and builds the expression tree.
//! 2. [`diagnostics`] — the error sink both stages report into; owned by the
//!    caller and cleared between inputs.
//! 3. [`session`] — runs a script or an interactive prompt and maps the
//!    outcome to an exit status.
//! 4. [`ui`] — ratatui-based explorer; not part of the stable library API.
//!
//! ## Example
//!
//! ```
//! use loxparse::diagnostics::Diagnostics;
//! use loxparse::parser::parse_expression;
//!
//! let mut diagnostics = Diagnostics::new();
//! let expr = parse_expression("1 + 2 * 3", &mut diagnostics).unwrap();
//! assert!(!diagnostics.had_error());
//! assert_eq!(expr.to_string(), "(+ 1 (* 2 3))");
//! ```

pub mod diagnostics;
pub mod parser;
pub mod session;
pub mod ui;
