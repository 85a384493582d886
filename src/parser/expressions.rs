//! Expression parsing implementation
//!
//! One method per precedence level, lowest first:
//!
//! ```text
//! expression → equality
//! equality   → comparison ( ( "!=" | "==" ) comparison )*
//! comparison → term ( ( ">" | ">=" | "<" | "<=" ) term )*
//! term       → factor ( ( "-" | "+" ) factor )*
//! factor     → unary ( ( "/" | "*" ) unary )*
//! unary      → ( "!" | "-" ) unary | primary
//! primary    → NUMBER | STRING | "true" | "false" | "nil" | "(" expression ")"
//! ```
//!
//! Binary levels fold left, so `a - b - c` parses as `(a - b) - c`. Prefix
//! operators recurse to the right.

use crate::parser::ast::{Expr, LiteralValue};
use crate::parser::lexer::{Literal, TokenKind};
use crate::parser::parse::{ParseError, Parser, MAX_NESTING_DEPTH};

const EQUALITY_OPS: &[TokenKind] = &[TokenKind::BangEqual, TokenKind::EqualEqual];
const COMPARISON_OPS: &[TokenKind] = &[
    TokenKind::Greater,
    TokenKind::GreaterEqual,
    TokenKind::Less,
    TokenKind::LessEqual,
];
const TERM_OPS: &[TokenKind] = &[TokenKind::Minus, TokenKind::Plus];
const FACTOR_OPS: &[TokenKind] = &[TokenKind::Slash, TokenKind::Star];
const UNARY_OPS: &[TokenKind] = &[TokenKind::Bang, TokenKind::Minus];

impl Parser<'_> {
    /// Parse expression (top-level entry point)
    pub(crate) fn parse_expression(&mut self) -> Result<Expr, ParseError> {
        self.parse_equality()
    }

    /// Parse equality (== !=)
    fn parse_equality(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_comparison()?;

        while self.match_kinds(EQUALITY_OPS) {
            let operator = self.previous().clone();
            let right = self.parse_comparison()?;
            left = Expr::binary(left, operator, right);
        }

        Ok(left)
    }

    /// Parse comparison (> >= < <=)
    fn parse_comparison(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_term()?;

        while self.match_kinds(COMPARISON_OPS) {
            let operator = self.previous().clone();
            let right = self.parse_term()?;
            left = Expr::binary(left, operator, right);
        }

        Ok(left)
    }

    /// Parse additive (- +)
    fn parse_term(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_factor()?;

        while self.match_kinds(TERM_OPS) {
            let operator = self.previous().clone();
            let right = self.parse_factor()?;
            left = Expr::binary(left, operator, right);
        }

        Ok(left)
    }

    /// Parse multiplicative (/ *)
    fn parse_factor(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_unary()?;

        while self.match_kinds(FACTOR_OPS) {
            let operator = self.previous().clone();
            let right = self.parse_unary()?;
            left = Expr::binary(left, operator, right);
        }

        Ok(left)
    }

    /// Parse prefix unary (! -), right-recursive
    ///
    /// Every nested group and prefix operator passes through here, so the
    /// nesting depth is bounded at this level.
    fn parse_unary(&mut self) -> Result<Expr, ParseError> {
        if self.depth >= MAX_NESTING_DEPTH {
            return Err(self.error_at_current("Expression nests too deeply."));
        }

        self.depth += 1;
        let result = if self.match_kinds(UNARY_OPS) {
            let operator = self.previous().clone();
            self.parse_unary()
                .map(|operand| Expr::unary(operator, operand))
        } else {
            self.parse_primary()
        };
        self.depth -= 1;

        result
    }

    /// Parse primary: literals and parenthesized groups
    fn parse_primary(&mut self) -> Result<Expr, ParseError> {
        if self.match_kinds(&[TokenKind::False]) {
            return Ok(Expr::literal(LiteralValue::Bool(false)));
        }
        if self.match_kinds(&[TokenKind::True]) {
            return Ok(Expr::literal(LiteralValue::Bool(true)));
        }
        if self.match_kinds(&[TokenKind::Nil]) {
            return Ok(Expr::literal(LiteralValue::Nil));
        }

        if self.match_kinds(&[TokenKind::Number, TokenKind::String]) {
            let value = match self.previous().literal.clone() {
                Some(Literal::Number(n)) => LiteralValue::Number(n),
                Some(Literal::String(s)) => LiteralValue::String(s),
                // Tokens built by hand may lack a payload
                None => return Err(self.error_at_previous("Expect literal value.")),
            };
            return Ok(Expr::literal(value));
        }

        if self.match_kinds(&[TokenKind::LeftParen]) {
            let inner = self.parse_expression()?;
            self.consume(TokenKind::RightParen, "Expect ')' after expression.")?;
            return Ok(Expr::grouping(inner));
        }

        Err(self.error_at_current("Expect expression."))
    }

    fn error_at_previous(&mut self, message: &str) -> ParseError {
        let token = self.previous().clone();
        self.diagnostics.error_at_token(&token, message);
        ParseError {
            message: message.to_string(),
            token,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::diagnostics::Diagnostics;
    use crate::parser::ast::{Expr, LiteralValue};
    use crate::parser::lexer::{tokenize, Token, TokenKind};
    use crate::parser::parse::{Parser, MAX_NESTING_DEPTH};
    use crate::parser::printer::print;
    use rstest::rstest;

    fn parse_to_string(source: &str) -> Result<String, Vec<String>> {
        let mut diagnostics = Diagnostics::new();
        let tokens = tokenize(source, &mut diagnostics);
        let result = Parser::new(tokens, &mut diagnostics).parse();
        match result {
            Ok(expr) if !diagnostics.had_error() => Ok(print(&expr)),
            _ => Err(diagnostics.iter().map(|d| d.to_string()).collect()),
        }
    }

    #[rstest]
    #[case("1 - 2 - 3", "(- (- 1 2) 3)")]
    #[case("8 / 4 / 2", "(/ (/ 8 4) 2)")]
    #[case("1 == 2 != 3", "(!= (== 1 2) 3)")]
    #[case("1 < 2 <= 3", "(<= (< 1 2) 3)")]
    #[case("- - 1", "(- (- 1))")]
    #[case("!!true", "(! (! true))")]
    #[case("1 + 2 * 3", "(+ 1 (* 2 3))")]
    #[case("1 * 2 + 3", "(+ (* 1 2) 3)")]
    #[case("-1 * 2", "(* (- 1) 2)")]
    #[case("1 + 2 > 3 == false", "(== (> (+ 1 2) 3) false)")]
    #[case("(1 + 2) * 3", "(* (group (+ 1 2)) 3)")]
    #[case("((nil))", "(group (group nil))")]
    #[case("\"a\" + \"b\"", "(+ a b)")]
    #[case("2.5 >= -0.5", "(>= 2.5 (- 0.5))")]
    fn test_precedence_and_associativity(#[case] source: &str, #[case] expected: &str) {
        assert_eq!(parse_to_string(source), Ok(expected.to_string()));
    }

    #[test]
    fn test_missing_close_paren() {
        let errors = parse_to_string("(1 + 2").unwrap_err();
        assert_eq!(
            errors,
            vec!["[line 1] Error at end: Expect ')' after expression."]
        );
    }

    #[test]
    fn test_missing_operand() {
        let errors = parse_to_string("1 +").unwrap_err();
        assert_eq!(errors, vec!["[line 1] Error at end: Expect expression."]);
    }

    #[test]
    fn test_unexpected_token_reports_lexeme() {
        let errors = parse_to_string("1 * )").unwrap_err();
        assert_eq!(errors, vec!["[line 1] Error at ')': Expect expression."]);
    }

    #[test]
    fn test_identifiers_are_not_expressions_yet() {
        let errors = parse_to_string("x + 1").unwrap_err();
        assert_eq!(errors, vec!["[line 1] Error at 'x': Expect expression."]);
    }

    #[test]
    fn test_error_reported_once_for_nested_failure() {
        let mut diagnostics = Diagnostics::new();
        let tokens = tokenize("(((1 +", &mut diagnostics);
        let result = Parser::new(tokens, &mut diagnostics).parse();

        assert!(result.is_err());
        assert_eq!(diagnostics.len(), 1);
    }

    #[test]
    fn test_nesting_up_to_limit_parses() {
        let depth = MAX_NESTING_DEPTH - 1;
        let source = format!("{}1{}", "(".repeat(depth), ")".repeat(depth));

        let printed = parse_to_string(&source).unwrap();
        assert!(printed.starts_with("(group (group "));
        assert_eq!(printed.matches("group").count(), depth);
    }

    #[rstest]
    #[case("(", "Error at '('")]
    #[case("-", "Error at '-'")]
    #[case("!", "Error at '!'")]
    fn test_nesting_past_limit_is_reported(#[case] opener: &str, #[case] at: &str) {
        let depth = MAX_NESTING_DEPTH + 45;
        let closer = if opener == "(" { ")" } else { "" };
        let source = format!("{}1{}", opener.repeat(depth), closer.repeat(depth));

        let errors = parse_to_string(&source).unwrap_err();
        assert_eq!(
            errors,
            vec![format!("[line 1] {}: Expression nests too deeply.", at)]
        );
    }

    #[test]
    fn test_depth_resets_between_siblings() {
        let half = MAX_NESTING_DEPTH / 2 + 10;
        let nested = format!("{}1{}", "(".repeat(half), ")".repeat(half));
        let source = format!("{} + {}", nested, nested);

        assert!(parse_to_string(&source).is_ok());
    }

    #[test]
    fn test_trailing_tokens_are_ignored() {
        assert_eq!(parse_to_string("1 2"), Ok("1".to_string()));
    }

    #[test]
    fn test_tree_shape() {
        let mut diagnostics = Diagnostics::new();
        let tokens = tokenize("-3 * (4)", &mut diagnostics);
        let expr = Parser::new(tokens, &mut diagnostics).parse().unwrap();

        match expr {
            Expr::Binary {
                left,
                operator,
                right,
            } => {
                assert_eq!(operator.kind, TokenKind::Star);
                assert!(matches!(*left, Expr::Unary { ref operator, .. } if operator.kind == TokenKind::Minus));
                assert_eq!(
                    *right,
                    Expr::grouping(Expr::literal(LiteralValue::Number(4.0)))
                );
            }
            other => panic!("Expected binary expression, got {:?}", other),
        }
    }

    #[test]
    fn test_literal_token_without_payload() {
        let mut diagnostics = Diagnostics::new();
        let tokens = vec![Token::new(TokenKind::Number, "1", None, 1)];
        let result = Parser::new(tokens, &mut diagnostics).parse();

        assert!(result.is_err());
        assert_eq!(
            diagnostics.iter().next().map(|d| d.to_string()),
            Some("[line 1] Error at '1': Expect literal value.".to_string())
        );
    }
}
