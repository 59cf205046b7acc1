//! Recursive-descent expression parser
//!
//! Grammar, lowest precedence first:
//!
//! ```text
//! expr           := additive
//! additive       := multiplicative (("+" | "-") multiplicative)*
//! multiplicative := unary (("*" | "/" | "@") unary)*
//! unary          := ("-" | "+") unary | primary
//! primary        := number | name "(" args ")" | register | "(" expr ")"
//! ```
//!
//! A register is a single uppercase letter not followed by `(`. Any other
//! bare name is rejected, so only registers and whitelisted calls reach
//! the evaluator.

use crate::ast::{BinOp, Expr, UnaryOp};
use crate::lexer::{tokenize, Token, TokenKind};
use matx_core::MatxError;

pub fn parse_expr(input: &str) -> Result<Expr, MatxError> {
    let tokens = tokenize(input)?;
    if tokens.is_empty() {
        return Err(MatxError::parse_error("Empty expression"));
    }

    let mut parser = Parser {
        input,
        tokens,
        pos: 0,
    };
    let expr = parser.parse_additive()?;
    match parser.peek() {
        None => Ok(expr),
        Some(token) => Err(parser.unexpected(token)),
    }
}

struct Parser<'a> {
    input: &'a str,
    tokens: Vec<Token>,
    pos: usize,
}

impl<'a> Parser<'a> {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn peek_kind(&self) -> Option<&TokenKind> {
        self.peek().map(|t| &t.kind)
    }

    fn advance(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).cloned();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn unexpected(&self, token: &Token) -> MatxError {
        MatxError::parse_error(format!("unexpected {}", token.kind.describe()))
            .with_input(self.input)
            .at_column(token.column)
    }

    fn end_of_input(&self, expected: &str) -> MatxError {
        MatxError::parse_error(format!("expected {}, found end of input", expected))
            .with_input(self.input)
            .at_column(self.input.chars().count())
    }

    fn expect(&mut self, kind: TokenKind, expected: &str) -> Result<(), MatxError> {
        match self.advance() {
            Some(token) if token.kind == kind => Ok(()),
            Some(token) => Err(self.unexpected(&token)),
            None => Err(self.end_of_input(expected)),
        }
    }

    fn parse_additive(&mut self) -> Result<Expr, MatxError> {
        let mut left = self.parse_multiplicative()?;
        loop {
            let op = match self.peek_kind() {
                Some(TokenKind::Plus) => BinOp::Add,
                Some(TokenKind::Minus) => BinOp::Sub,
                _ => return Ok(left),
            };
            self.pos += 1;
            let right = self.parse_multiplicative()?;
            left = Expr::BinaryOp(Box::new(left), op, Box::new(right));
        }
    }

    fn parse_multiplicative(&mut self) -> Result<Expr, MatxError> {
        let mut left = self.parse_unary()?;
        loop {
            let op = match self.peek_kind() {
                Some(TokenKind::Star) => BinOp::Mul,
                Some(TokenKind::Slash) => BinOp::Div,
                Some(TokenKind::At) => BinOp::MatMul,
                _ => return Ok(left),
            };
            self.pos += 1;
            let right = self.parse_unary()?;
            left = Expr::BinaryOp(Box::new(left), op, Box::new(right));
        }
    }

    fn parse_unary(&mut self) -> Result<Expr, MatxError> {
        let op = match self.peek_kind() {
            Some(TokenKind::Minus) => UnaryOp::Neg,
            Some(TokenKind::Plus) => UnaryOp::Pos,
            _ => return self.parse_primary(),
        };
        self.pos += 1;
        let operand = self.parse_unary()?;
        Ok(Expr::UnaryOp(op, Box::new(operand)))
    }

    fn parse_primary(&mut self) -> Result<Expr, MatxError> {
        let token = match self.advance() {
            Some(t) => t,
            None => return Err(self.end_of_input("an operand")),
        };

        match token.kind {
            TokenKind::Number(n) => Ok(Expr::Number(n)),

            TokenKind::LParen => {
                let inner = self.parse_additive()?;
                self.expect(TokenKind::RParen, "')'")?;
                Ok(inner)
            }

            TokenKind::Ident(name) => {
                if self.peek_kind() == Some(&TokenKind::LParen) {
                    self.pos += 1;
                    let args = self.parse_args()?;
                    return Ok(Expr::FunctionCall(name, args));
                }
                match register_name(&name) {
                    Some(register) => Ok(Expr::Register(register)),
                    None => Err(MatxError::parse_error(format!("unknown name '{}'", name))
                        .with_input(self.input)
                        .at_column(token.column)
                        .with_suggestion("Registers are single uppercase letters; functions need parentheses")),
                }
            }

            _ => Err(self.unexpected(&token)),
        }
    }

    /// Arguments after an opening parenthesis, through the closing one.
    fn parse_args(&mut self) -> Result<Vec<Expr>, MatxError> {
        let mut args = Vec::new();
        if self.peek_kind() == Some(&TokenKind::RParen) {
            self.pos += 1;
            return Ok(args);
        }

        loop {
            args.push(self.parse_additive()?);
            match self.advance() {
                Some(Token { kind: TokenKind::Comma, .. }) => continue,
                Some(Token { kind: TokenKind::RParen, .. }) => return Ok(args),
                Some(token) => return Err(self.unexpected(&token)),
                None => return Err(self.end_of_input("',' or ')'")),
            }
        }
    }
}

fn register_name(name: &str) -> Option<char> {
    let mut chars = name.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c.is_ascii_uppercase() => Some(c),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use matx_core::codes;

    fn bin(l: Expr, op: BinOp, r: Expr) -> Expr {
        Expr::BinaryOp(Box::new(l), op, Box::new(r))
    }

    fn reg(c: char) -> Expr {
        Expr::Register(c)
    }

    #[test]
    fn test_register_sum() {
        assert_eq!(parse_expr("A+A").unwrap(), bin(reg('A'), BinOp::Add, reg('A')));
    }

    #[test]
    fn test_precedence() {
        // A + B @ C parses as A + (B @ C)
        let expr = parse_expr("A + B @ C").unwrap();
        assert_eq!(expr, bin(reg('A'), BinOp::Add, bin(reg('B'), BinOp::MatMul, reg('C'))));
    }

    #[test]
    fn test_left_associative() {
        let expr = parse_expr("A - B - C").unwrap();
        assert_eq!(expr, bin(bin(reg('A'), BinOp::Sub, reg('B')), BinOp::Sub, reg('C')));
    }

    #[test]
    fn test_unary_binds_tighter() {
        let expr = parse_expr("-A @ B").unwrap();
        assert_eq!(
            expr,
            bin(Expr::UnaryOp(UnaryOp::Neg, Box::new(reg('A'))), BinOp::MatMul, reg('B'))
        );
    }

    #[test]
    fn test_parentheses() {
        let expr = parse_expr("(A + B) * 2").unwrap();
        assert_eq!(
            expr,
            bin(bin(reg('A'), BinOp::Add, reg('B')), BinOp::Mul, Expr::Number(2.0))
        );
    }

    #[test]
    fn test_function_calls() {
        assert_eq!(
            parse_expr("solve(A, B)").unwrap(),
            Expr::FunctionCall("solve".into(), vec![reg('A'), reg('B')])
        );
        assert_eq!(
            parse_expr("det(A @ B)").unwrap(),
            Expr::FunctionCall("det".into(), vec![bin(reg('A'), BinOp::MatMul, reg('B'))])
        );
    }

    #[test]
    fn test_register_letters_inside_names_are_not_registers() {
        // C inside CROSS stays part of the identifier
        let expr = parse_expr("CROSS(A, B)").unwrap();
        assert_eq!(expr, Expr::FunctionCall("CROSS".into(), vec![reg('A'), reg('B')]));
    }

    #[test]
    fn test_rejects_bare_names() {
        let err = parse_expr("foo + A").unwrap_err();
        assert!(err.is(codes::PARSE_ERROR));
        assert_eq!(err.context.unwrap().column, Some(0));
        assert!(parse_expr("AB").is_err());
        assert!(parse_expr("a").is_err());
    }

    #[test]
    fn test_syntax_errors() {
        assert!(parse_expr("").is_err());
        assert!(parse_expr("   ").is_err());
        assert!(parse_expr("A +").is_err());
        assert!(parse_expr("(A + B").is_err());
        assert!(parse_expr("A B").is_err());
        assert!(parse_expr("det(A,)").is_err());
        assert!(parse_expr("A)").is_err());
    }

    #[test]
    fn test_empty_argument_list() {
        assert_eq!(
            parse_expr("det()").unwrap(),
            Expr::FunctionCall("det".into(), vec![])
        );
    }
}
