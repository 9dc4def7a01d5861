//! Expression parser for C--.
//! Precedence climbing from assignment down to primary expressions.

use super::{AssignExpr, BinaryOp, CallExpr, DotAccess, Expr, Parser, Span, UnaryOp};
use crate::lexer::TokenKind;

/// Trait extension for expression parsing
pub trait ExpressionParser {
    fn expression(&mut self) -> Option<Expr>;
}

impl<'a> ExpressionParser for Parser<'a> {
    fn expression(&mut self) -> Option<Expr> {
        self.parse_assignment()
    }
}

impl<'a> Parser<'a> {
    /// Parse assignment (lowest precedence, right-associative).
    /// Only a location may appear on the left-hand side.
    pub(crate) fn parse_assignment(&mut self) -> Option<Expr> {
        let expr = self.parse_or()?;

        if self.check(TokenKind::Equal) {
            if !matches!(expr, Expr::Id(_) | Expr::Dot(_)) {
                self.error_at_current("invalid assignment target");
                return None;
            }
            self.advance();
            let rhs = self.parse_assignment()?;
            return Some(Expr::Assign(Box::new(AssignExpr { lhs: expr, rhs })));
        }

        Some(expr)
    }

    /// Parse logical OR: a || b
    fn parse_or(&mut self) -> Option<Expr> {
        let mut expr = self.parse_and()?;

        while self.match_token(TokenKind::PipePipe) {
            let right = self.parse_and()?;
            expr = Expr::Binary {
                op: BinaryOp::Or,
                lhs: Box::new(expr),
                rhs: Box::new(right),
            };
        }

        Some(expr)
    }

    /// Parse logical AND: a && b
    fn parse_and(&mut self) -> Option<Expr> {
        let mut expr = self.parse_equality()?;

        while self.match_token(TokenKind::AmpersandAmpersand) {
            let right = self.parse_equality()?;
            expr = Expr::Binary {
                op: BinaryOp::And,
                lhs: Box::new(expr),
                rhs: Box::new(right),
            };
        }

        Some(expr)
    }

    /// Parse equality: a == b, a != b
    fn parse_equality(&mut self) -> Option<Expr> {
        let mut expr = self.parse_relational()?;

        loop {
            let op = match self.peek_op() {
                TokenKind::EqualEqual => BinaryOp::Eq,
                TokenKind::BangEqual => BinaryOp::NotEq,
                _ => break,
            };
            self.advance();
            let right = self.parse_relational()?;
            expr = Expr::Binary {
                op,
                lhs: Box::new(expr),
                rhs: Box::new(right),
            };
        }

        Some(expr)
    }

    /// Parse relational: a < b, a <= b, a > b, a >= b
    fn parse_relational(&mut self) -> Option<Expr> {
        let mut expr = self.parse_additive()?;

        loop {
            let op = match self.peek_op() {
                TokenKind::Less => BinaryOp::Less,
                TokenKind::LessEqual => BinaryOp::LessEq,
                TokenKind::Greater => BinaryOp::Greater,
                TokenKind::GreaterEqual => BinaryOp::GreaterEq,
                _ => break,
            };
            self.advance();
            let right = self.parse_additive()?;
            expr = Expr::Binary {
                op,
                lhs: Box::new(expr),
                rhs: Box::new(right),
            };
        }

        Some(expr)
    }

    /// Parse additive: a + b, a - b
    fn parse_additive(&mut self) -> Option<Expr> {
        let mut expr = self.parse_multiplicative()?;

        loop {
            let op = match self.peek_op() {
                TokenKind::Plus => BinaryOp::Plus,
                TokenKind::Minus => BinaryOp::Minus,
                _ => break,
            };
            self.advance();
            let right = self.parse_multiplicative()?;
            expr = Expr::Binary {
                op,
                lhs: Box::new(expr),
                rhs: Box::new(right),
            };
        }

        Some(expr)
    }

    /// Parse multiplicative: a * b, a / b
    fn parse_multiplicative(&mut self) -> Option<Expr> {
        let mut expr = self.parse_unary()?;

        loop {
            let op = match self.peek_op() {
                TokenKind::Star => BinaryOp::Times,
                TokenKind::Slash => BinaryOp::Divide,
                _ => break,
            };
            self.advance();
            let right = self.parse_unary()?;
            expr = Expr::Binary {
                op,
                lhs: Box::new(expr),
                rhs: Box::new(right),
            };
        }

        Some(expr)
    }

    /// Parse unary: -a, !a
    fn parse_unary(&mut self) -> Option<Expr> {
        let op = match self.peek_op() {
            TokenKind::Minus => Some(UnaryOp::Neg),
            TokenKind::Bang => Some(UnaryOp::Not),
            _ => None,
        };

        if let Some(op) = op {
            self.advance();
            let operand = self.parse_unary()?;
            return Some(Expr::Unary {
                op,
                operand: Box::new(operand),
            });
        }

        self.parse_primary()
    }

    /// Parse primary expressions: literals, locations, calls, parenthesized
    fn parse_primary(&mut self) -> Option<Expr> {
        let token = self.peek().clone();
        let span = Span::new(token.line, token.column);

        match token.kind {
            TokenKind::IntLiteral => {
                self.advance();
                let value = match token.lexeme.parse::<i32>() {
                    Ok(v) => v,
                    Err(_) => {
                        self.reporter
                            .warn(span, "integer literal too large; using max value");
                        i32::MAX
                    }
                };
                Some(Expr::IntLit { value, span })
            }

            TokenKind::StringLiteral => {
                self.advance();
                Some(Expr::StrLit {
                    value: token.lexeme.clone(),
                    span,
                })
            }

            TokenKind::True => {
                self.advance();
                Some(Expr::True(span))
            }

            TokenKind::False => {
                self.advance();
                Some(Expr::False(span))
            }

            TokenKind::Identifier => {
                self.advance();
                let id = super::Id::new(token.lexeme.clone(), span);

                // f(args)
                if self.check(TokenKind::LeftParen) {
                    self.advance();
                    let args = self.parse_call_args()?;
                    return Some(Expr::Call(CallExpr { callee: id, args }));
                }

                // loc.field chains
                let mut expr = Expr::Id(id);
                while self.match_token(TokenKind::Dot) {
                    let field = self.expect_identifier("expected field name after '.'")?;
                    expr = Expr::Dot(Box::new(DotAccess::new(expr, field)));
                }
                Some(expr)
            }

            TokenKind::LeftParen => {
                self.advance();
                let expr = self.expression()?;
                self.expect(TokenKind::RightParen, "expected ')' after expression")?;
                Some(expr)
            }

            _ => {
                self.error_at_current(&format!("expected expression, found '{}'", token.lexeme));
                None
            }
        }
    }

    /// Parse a location: an identifier or a dot-access chain
    pub(crate) fn parse_loc(&mut self) -> Option<Expr> {
        let id = self.expect_identifier("expected identifier")?;
        let mut expr = Expr::Id(id);

        while self.match_token(TokenKind::Dot) {
            let field = self.expect_identifier("expected field name after '.'")?;
            expr = Expr::Dot(Box::new(DotAccess::new(expr, field)));
        }

        Some(expr)
    }

    /// Parse the arguments of a call; the '(' has been consumed
    pub(crate) fn parse_call_args(&mut self) -> Option<Vec<Expr>> {
        let mut args = Vec::new();

        if !self.check(TokenKind::RightParen) {
            loop {
                args.push(self.expression()?);
                if !self.match_token(TokenKind::Comma) {
                    break;
                }
            }
        }

        self.expect(TokenKind::RightParen, "expected ')' after arguments")?;
        Some(args)
    }

    fn peek_op(&self) -> TokenKind {
        self.tokens[self.current].kind
    }
}
