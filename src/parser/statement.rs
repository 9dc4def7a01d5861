//! Statement parser for C--.

use super::expression::ExpressionParser;
use super::{AssignExpr, CallExpr, DotAccess, Expr, Parser, Stmt};
use crate::lexer::TokenKind;

/// Trait extension for statement parsing
pub trait StatementParser {
    fn statement(&mut self) -> Option<Stmt>;
}

impl<'a> StatementParser for Parser<'a> {
    fn statement(&mut self) -> Option<Stmt> {
        self.parse_statement()
    }
}

impl<'a> Parser<'a> {
    pub(crate) fn parse_statement(&mut self) -> Option<Stmt> {
        match self.peek_kind() {
            TokenKind::Cin => self.read_statement(),
            TokenKind::Cout => self.write_statement(),
            TokenKind::If => self.if_statement(),
            TokenKind::While => self.while_statement(),
            TokenKind::Repeat => self.repeat_statement(),
            TokenKind::Return => self.return_statement(),
            TokenKind::Identifier => self.loc_statement(),
            _ => {
                let lexeme = self.peek_lexeme();
                self.error_at_current(&format!("expected statement, found '{}'", lexeme));
                None
            }
        }
    }

    /// cin >> loc;
    fn read_statement(&mut self) -> Option<Stmt> {
        self.advance(); // consume 'cin'
        self.expect(TokenKind::GreaterGreater, "expected '>>' after 'cin'")?;
        let target = self.parse_loc()?;
        self.expect(TokenKind::Semicolon, "expected ';' after read statement")?;
        Some(Stmt::Read(target))
    }

    /// cout << exp;
    fn write_statement(&mut self) -> Option<Stmt> {
        self.advance(); // consume 'cout'
        self.expect(TokenKind::LessLess, "expected '<<' after 'cout'")?;
        let value = self.expression()?;
        self.expect(TokenKind::Semicolon, "expected ';' after write statement")?;
        Some(Stmt::Write(value))
    }

    fn if_statement(&mut self) -> Option<Stmt> {
        self.advance(); // consume 'if'
        self.expect(TokenKind::LeftParen, "expected '(' after 'if'")?;
        let cond = self.expression()?;
        self.expect(TokenKind::RightParen, "expected ')' after condition")?;
        let body = self.block()?;

        if self.match_token(TokenKind::Else) {
            let else_body = self.block()?;
            Some(Stmt::IfElse {
                cond,
                then_body: body,
                else_body,
            })
        } else {
            Some(Stmt::If { cond, body })
        }
    }

    fn while_statement(&mut self) -> Option<Stmt> {
        self.advance(); // consume 'while'
        self.expect(TokenKind::LeftParen, "expected '(' after 'while'")?;
        let cond = self.expression()?;
        self.expect(TokenKind::RightParen, "expected ')' after condition")?;
        let body = self.block()?;
        Some(Stmt::While { cond, body })
    }

    fn repeat_statement(&mut self) -> Option<Stmt> {
        self.advance(); // consume 'repeat'
        self.expect(TokenKind::LeftParen, "expected '(' after 'repeat'")?;
        let count = self.expression()?;
        self.expect(TokenKind::RightParen, "expected ')' after repeat clause")?;
        let body = self.block()?;
        Some(Stmt::Repeat { count, body })
    }

    fn return_statement(&mut self) -> Option<Stmt> {
        self.advance(); // consume 'return'

        let value = if self.check(TokenKind::Semicolon) {
            None
        } else {
            Some(self.expression()?)
        };

        self.expect(TokenKind::Semicolon, "expected ';' after return statement")?;
        Some(Stmt::Return(value))
    }

    /// A statement starting with an identifier: assignment, increment,
    /// decrement, or call.
    fn loc_statement(&mut self) -> Option<Stmt> {
        let id = self.expect_identifier("expected identifier")?;

        // f(args);
        if self.check(TokenKind::LeftParen) {
            self.advance();
            let args = self.parse_call_args()?;
            self.expect(TokenKind::Semicolon, "expected ';' after call statement")?;
            return Some(Stmt::Call(CallExpr { callee: id, args }));
        }

        let mut target = Expr::Id(id);
        while self.match_token(TokenKind::Dot) {
            let field = self.expect_identifier("expected field name after '.'")?;
            target = Expr::Dot(Box::new(DotAccess::new(target, field)));
        }

        match self.peek_kind() {
            TokenKind::PlusPlus => {
                self.advance();
                self.expect(TokenKind::Semicolon, "expected ';' after '++'")?;
                Some(Stmt::PostInc(target))
            }
            TokenKind::MinusMinus => {
                self.advance();
                self.expect(TokenKind::Semicolon, "expected ';' after '--'")?;
                Some(Stmt::PostDec(target))
            }
            TokenKind::Equal => {
                self.advance();
                let rhs = self.expression()?;
                self.expect(TokenKind::Semicolon, "expected ';' after assignment")?;
                Some(Stmt::Assign(AssignExpr { lhs: target, rhs }))
            }
            _ => {
                self.error_at_current("expected '=', '++', '--', or '(' after location");
                None
            }
        }
    }

    fn peek_kind(&self) -> TokenKind {
        self.tokens[self.current].kind
    }

    fn peek_lexeme(&self) -> String {
        self.tokens[self.current].lexeme.clone()
    }
}
