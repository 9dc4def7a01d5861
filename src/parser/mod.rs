//! Parser module for building the C-- AST from tokens.

mod ast;
mod expression;
mod statement;

pub use ast::*;
pub use expression::ExpressionParser;
pub use statement::StatementParser;

use crate::diagnostics::DiagnosticReporter;
use crate::lexer::{Token, TokenKind};

/// Recursive descent parser for C--
pub struct Parser<'a> {
    tokens: Vec<Token>,
    current: usize,
    reporter: &'a mut DiagnosticReporter,
    panic_mode: bool,
}

impl<'a> Parser<'a> {
    pub fn new(tokens: Vec<Token>, reporter: &'a mut DiagnosticReporter) -> Self {
        Self {
            tokens,
            current: 0,
            reporter,
            panic_mode: false,
        }
    }

    /// Parse the entire program
    pub fn parse(&mut self) -> Program {
        let mut decls = Vec::new();

        while !self.is_at_end() {
            match self.declaration() {
                Some(decl) => decls.push(decl),
                None => self.recover(),
            }
        }

        Program { decls }
    }

    /// Parse a top-level declaration
    fn declaration(&mut self) -> Option<Decl> {
        // 'struct Name {' begins a struct definition; 'struct Name name'
        // is a variable of struct type
        if self.check(TokenKind::Struct)
            && self.peek_at(1).map(|t| t.kind) == Some(TokenKind::Identifier)
            && self.peek_at(2).map(|t| t.kind) == Some(TokenKind::LeftBrace)
        {
            return self.struct_declaration();
        }

        let ty = self.parse_type()?;
        let id = self.expect_identifier("expected identifier after type")?;

        if self.check(TokenKind::LeftParen) {
            return self.function_declaration(ty, id);
        }

        self.expect(TokenKind::Semicolon, "expected ';' after variable declaration")?;
        Some(Decl::Var(VarDecl { ty, id, size: None }))
    }

    /// Parse a struct definition: struct Name { fields };
    fn struct_declaration(&mut self) -> Option<Decl> {
        self.advance(); // consume 'struct'
        let id = self.expect_identifier("expected struct name")?;
        self.expect(TokenKind::LeftBrace, "expected '{' for struct body")?;

        let mut fields = Vec::new();
        while !self.check(TokenKind::RightBrace) && !self.is_at_end() {
            let field_ty = self.parse_type()?;
            let field_id = self.expect_identifier("expected field name")?;
            self.expect(TokenKind::Semicolon, "expected ';' after field")?;
            fields.push(VarDecl {
                ty: field_ty,
                id: field_id,
                size: None,
            });
        }

        self.expect(TokenKind::RightBrace, "expected '}' after struct fields")?;
        self.expect(TokenKind::Semicolon, "expected ';' after struct definition")?;

        Some(Decl::Struct(StructDecl { id, fields }))
    }

    /// Parse a function declaration: the name has been consumed, the
    /// current token is '('
    fn function_declaration(&mut self, ret: TypeNode, id: Id) -> Option<Decl> {
        self.expect(TokenKind::LeftParen, "expected '(' after function name")?;

        let mut formals = Vec::new();
        if !self.check(TokenKind::RightParen) {
            loop {
                let ty = self.parse_type()?;
                let formal_id = self.expect_identifier("expected parameter name")?;
                formals.push(FormalDecl { ty, id: formal_id });

                if !self.match_token(TokenKind::Comma) {
                    break;
                }
            }
        }

        self.expect(TokenKind::RightParen, "expected ')' after parameters")?;
        let body = self.block()?;

        Some(Decl::Fn(FnDecl {
            ret,
            id,
            formals,
            body,
        }))
    }

    /// Parse a type reference
    fn parse_type(&mut self) -> Option<TypeNode> {
        let token = self.peek().clone();
        match token.kind {
            TokenKind::Int => {
                self.advance();
                Some(TypeNode::Int)
            }
            TokenKind::Bool => {
                self.advance();
                Some(TypeNode::Bool)
            }
            TokenKind::Void => {
                self.advance();
                Some(TypeNode::Void)
            }
            TokenKind::Struct => {
                self.advance();
                let id = self.expect_identifier("expected struct name")?;
                Some(TypeNode::Struct(id))
            }
            _ => {
                self.error_at_current(&format!("expected type, found '{}'", token.lexeme));
                None
            }
        }
    }

    /// Parse a block: '{' local declarations, then statements, '}'
    fn block(&mut self) -> Option<Block> {
        self.expect(TokenKind::LeftBrace, "expected '{'")?;

        let mut decls = Vec::new();
        while self.peek().kind.is_type_keyword() {
            match self.local_var_decl() {
                Some(decl) => decls.push(decl),
                None => self.recover(),
            }
        }

        let mut stmts = Vec::new();
        while !self.check(TokenKind::RightBrace) && !self.is_at_end() {
            match self.statement() {
                Some(stmt) => stmts.push(stmt),
                None => self.recover(),
            }
        }

        self.expect(TokenKind::RightBrace, "expected '}'")?;
        Some(Block { decls, stmts })
    }

    /// Parse a local variable declaration inside a block
    fn local_var_decl(&mut self) -> Option<VarDecl> {
        let ty = self.parse_type()?;
        let id = self.expect_identifier("expected identifier after type")?;
        self.expect(TokenKind::Semicolon, "expected ';' after variable declaration")?;
        Some(VarDecl { ty, id, size: None })
    }

    // === Helper methods ===

    fn peek(&self) -> &Token {
        &self.tokens[self.current]
    }

    fn peek_at(&self, offset: usize) -> Option<&Token> {
        self.tokens.get(self.current + offset)
    }

    fn previous(&self) -> &Token {
        &self.tokens[self.current - 1]
    }

    fn is_at_end(&self) -> bool {
        self.peek().kind == TokenKind::Eof
    }

    pub(crate) fn advance(&mut self) -> &Token {
        if !self.is_at_end() {
            self.current += 1;
        }
        self.previous()
    }

    pub(crate) fn check(&self, kind: TokenKind) -> bool {
        self.peek().kind == kind
    }

    pub(crate) fn match_token(&mut self, kind: TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    pub(crate) fn expect(&mut self, kind: TokenKind, message: &str) -> Option<&Token> {
        if self.check(kind) {
            Some(self.advance())
        } else {
            self.error_at_current(message);
            None
        }
    }

    pub(crate) fn expect_identifier(&mut self, message: &str) -> Option<Id> {
        if self.check(TokenKind::Identifier) {
            let token = self.advance();
            Some(Id::new(
                token.lexeme.clone(),
                Span::new(token.line, token.column),
            ))
        } else {
            self.error_at_current(message);
            None
        }
    }

    pub(crate) fn error_at_current(&mut self, message: &str) {
        if self.panic_mode {
            return;
        }
        self.panic_mode = true;

        let token = self.peek();
        let span = Span::new(token.line, token.column);
        self.reporter.fatal(span, message);
    }

    /// Error recovery: synchronize, consuming at least one token so the
    /// enclosing parse loop always makes progress
    fn recover(&mut self) {
        let before = self.current;
        self.synchronize();
        if self.current == before && !self.is_at_end() {
            self.advance();
        }
    }

    /// Skip tokens until we find a synchronization point
    fn synchronize(&mut self) {
        self.panic_mode = false;

        while !self.is_at_end() {
            if self.current > 0 && self.previous().kind == TokenKind::Semicolon {
                return;
            }

            match self.peek().kind {
                TokenKind::Int
                | TokenKind::Bool
                | TokenKind::Void
                | TokenKind::Struct
                | TokenKind::If
                | TokenKind::While
                | TokenKind::Repeat
                | TokenKind::Return
                | TokenKind::Cin
                | TokenKind::Cout
                | TokenKind::RightBrace => {
                    return;
                }
                _ => {}
            }

            self.advance();
        }
    }
}
