//! Tree printers
//!
//! [`print`] renders the canonical fully parenthesized prefix form used in
//! tests and by the command line; [`outline`] renders one node per line for
//! the explorer. Both match exhaustively over [`Expr`], so a new node kind does
//! not compile until each printer handles it.

use crate::parser::ast::Expr;

/// Render `expr` as a parenthesized prefix string, e.g. `(* (- 123) (group 45.67))`
pub fn print(expr: &Expr) -> String {
    match expr {
        Expr::Binary {
            left,
            operator,
            right,
        } => parenthesize(&operator.lexeme, &[left.as_ref(), right.as_ref()]),
        Expr::Grouping(inner) => parenthesize("group", &[inner.as_ref()]),
        Expr::Unary { operator, operand } => parenthesize(&operator.lexeme, &[operand.as_ref()]),
        Expr::Literal(value) => value.to_string(),
    }
}

fn parenthesize(name: &str, exprs: &[&Expr]) -> String {
    let mut out = String::from("(");
    out.push_str(name);
    for expr in exprs {
        out.push(' ');
        out.push_str(&print(expr));
    }
    out.push(')');
    out
}

/// Render `expr` as an indented outline, one node per line
pub fn outline(expr: &Expr) -> Vec<String> {
    let mut lines = Vec::new();
    outline_into(expr, 0, &mut lines);
    lines
}

fn outline_into(expr: &Expr, depth: usize, lines: &mut Vec<String>) {
    let indent = "  ".repeat(depth);
    match expr {
        Expr::Binary {
            left,
            operator,
            right,
        } => {
            lines.push(format!("{}Binary {}", indent, operator.lexeme));
            outline_into(left, depth + 1, lines);
            outline_into(right, depth + 1, lines);
        }
        Expr::Grouping(inner) => {
            lines.push(format!("{}Grouping", indent));
            outline_into(inner, depth + 1, lines);
        }
        Expr::Unary { operator, operand } => {
            lines.push(format!("{}Unary {}", indent, operator.lexeme));
            outline_into(operand, depth + 1, lines);
        }
        Expr::Literal(value) => {
            lines.push(format!("{}Literal {}", indent, value));
        }
    }
}
