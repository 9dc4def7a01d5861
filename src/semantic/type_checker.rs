//! Type checker for the C-- static semantics.
//!
//! Runs after name analysis on a fully linked AST. Expressions evaluate
//! to a [`Type`]; the absorbing `Error` type flows through operators
//! without producing further diagnostics. Statements report success as a
//! bool, and list results are conjoined.

use super::symbol_table::{SymbolId, SymbolKind, Symbols};
use super::types::Type;
use crate::diagnostics::{messages, DiagnosticReporter};
use crate::parser::{
    AssignExpr, BinaryOp, Block, CallExpr, Decl, Expr, FnDecl, Id, Program, Span, Stmt, UnaryOp,
};

/// The type-check walk over a program
pub struct TypeChecker<'a> {
    syms: &'a Symbols,
    reporter: &'a mut DiagnosticReporter,
    /// Return type of the function being checked
    current_ret: Option<Type>,
}

impl<'a> TypeChecker<'a> {
    pub fn new(syms: &'a Symbols, reporter: &'a mut DiagnosticReporter) -> Self {
        Self {
            syms,
            reporter,
            current_ret: None,
        }
    }

    /// Type-check the whole program. Variable and struct declarations
    /// produce no type-phase diagnostics; only function bodies are
    /// checked. The result is the conjunction over all functions.
    pub fn check(&mut self, program: &Program) -> bool {
        let mut ok = true;
        for decl in &program.decls {
            if let Decl::Fn(f) = decl {
                ok &= self.fn_decl(f);
            }
        }
        ok
    }

    fn fn_decl(&mut self, decl: &FnDecl) -> bool {
        self.current_ret = Some(decl.ret.to_type());
        let ok = self.stmts(&decl.body.stmts);
        self.current_ret = None;
        ok
    }

    fn block(&mut self, block: &Block) -> bool {
        self.stmts(&block.stmts)
    }

    fn stmts(&mut self, stmts: &[Stmt]) -> bool {
        let mut ok = true;
        for stmt in stmts {
            ok &= self.stmt(stmt);
        }
        ok
    }

    fn stmt(&mut self, stmt: &Stmt) -> bool {
        match stmt {
            Stmt::Assign(assign) => !self.assign(assign).is_error(),

            Stmt::PostInc(e) | Stmt::PostDec(e) => {
                let ty = self.expr(e);
                if ty.is_error() {
                    false
                } else if !ty.is_int() {
                    self.reporter.fatal(e.span(), messages::ARITH_NON_NUMERIC);
                    false
                } else {
                    true
                }
            }

            Stmt::Read(e) => self.read(e),
            Stmt::Write(e) => self.write(e),

            Stmt::If { cond, body } => {
                let cond_ok = self.condition(cond, messages::NON_BOOL_IF);
                let body_ok = self.block(body);
                cond_ok && body_ok
            }

            Stmt::IfElse {
                cond,
                then_body,
                else_body,
            } => {
                let cond_ok = self.condition(cond, messages::NON_BOOL_IF);
                let then_ok = self.block(then_body);
                let else_ok = self.block(else_body);
                cond_ok && then_ok && else_ok
            }

            Stmt::While { cond, body } => {
                let cond_ok = self.condition(cond, messages::NON_BOOL_WHILE);
                let body_ok = self.block(body);
                cond_ok && body_ok
            }

            Stmt::Repeat { count, body } => {
                let ty = self.expr(count);
                let count_ok = if ty.is_error() {
                    false
                } else if !ty.is_int() {
                    self.reporter.fatal(count.span(), messages::NON_INT_REPEAT);
                    false
                } else {
                    true
                };
                let body_ok = self.block(body);
                count_ok && body_ok
            }

            Stmt::Call(call) => !self.call(call).is_error(),

            Stmt::Return(value) => self.return_stmt(value.as_ref()),
        }
    }

    fn condition(&mut self, cond: &Expr, message: &str) -> bool {
        let ty = self.expr(cond);
        if ty.is_error() {
            false
        } else if !ty.is_bool() {
            self.reporter.fatal(cond.span(), message);
            false
        } else {
            true
        }
    }

    fn read(&mut self, e: &Expr) -> bool {
        let ty = self.expr(e);
        let span = e.span();
        match ty {
            Type::Fn { .. } => {
                self.reporter.fatal(span, messages::READ_FUNCTION);
                false
            }
            Type::StructDef(_) => {
                self.reporter.fatal(span, messages::READ_STRUCT_NAME);
                false
            }
            Type::Struct(_) => {
                self.reporter.fatal(span, messages::READ_STRUCT_VAR);
                false
            }
            Type::Error => false,
            _ => true,
        }
    }

    fn write(&mut self, e: &Expr) -> bool {
        let ty = self.expr(e);
        let span = e.span();
        match ty {
            Type::Fn { .. } => {
                self.reporter.fatal(span, messages::WRITE_FUNCTION);
                false
            }
            Type::StructDef(_) => {
                self.reporter.fatal(span, messages::WRITE_STRUCT_NAME);
                false
            }
            Type::Struct(_) => {
                self.reporter.fatal(span, messages::WRITE_STRUCT_VAR);
                false
            }
            Type::Void => {
                self.reporter.fatal(span, messages::WRITE_VOID);
                false
            }
            Type::Error => false,
            // int, bool, and string literals are all writable
            _ => true,
        }
    }

    fn return_stmt(&mut self, value: Option<&Expr>) -> bool {
        let Some(ret) = self.current_ret.clone() else {
            unreachable!("return statement outside a function");
        };

        match value {
            None => {
                if ret.is_void() {
                    true
                } else {
                    // reported at (0,0), as the return carries no position
                    self.reporter
                        .fatal(Span::new(0, 0), messages::MISSING_RETURN_VALUE);
                    false
                }
            }
            Some(e) => {
                let ty = self.expr(e);
                if ret.is_void() {
                    self.reporter.fatal(e.span(), messages::RETURN_VALUE_IN_VOID);
                    false
                } else if ty.is_error() {
                    false
                } else if ty != ret {
                    self.reporter.fatal(e.span(), messages::BAD_RETURN_VALUE);
                    false
                } else {
                    true
                }
            }
        }
    }

    fn expr(&mut self, expr: &Expr) -> Type {
        match expr {
            Expr::IntLit { .. } => Type::Int,
            Expr::StrLit { .. } => Type::Str,
            Expr::True(_) | Expr::False(_) => Type::Bool,
            Expr::Id(id) => self.id_type(id),
            // a dot-access has the type of its resolved field
            Expr::Dot(dot) => self.id_type(&dot.field),
            Expr::Assign(assign) => self.assign(assign),
            Expr::Call(call) => self.call(call),
            Expr::Unary { op, operand } => match op {
                UnaryOp::Neg => self.unary_minus(operand),
                UnaryOp::Not => self.unary_not(operand),
            },
            Expr::Binary { op, lhs, rhs } => match op {
                BinaryOp::Plus | BinaryOp::Minus | BinaryOp::Times | BinaryOp::Divide => {
                    self.arithmetic(lhs, rhs)
                }
                BinaryOp::And | BinaryOp::Or => self.logical(lhs, rhs),
                BinaryOp::Eq | BinaryOp::NotEq => self.equality(lhs, rhs),
                BinaryOp::Less | BinaryOp::Greater | BinaryOp::LessEq | BinaryOp::GreaterEq => {
                    self.relational(lhs, rhs)
                }
            },
        }
    }

    /// An identifier reaching the type checker unlinked means name
    /// analysis left a gap; that is an analyzer bug, not a user error.
    fn symbol_of(&self, id: &Id) -> SymbolId {
        match id.sym {
            Some(sym) => sym,
            None => panic!(
                "identifier '{}' at {}:{} has no symbol after name analysis",
                id.name, id.span.line, id.span.column
            ),
        }
    }

    fn id_type(&self, id: &Id) -> Type {
        self.syms.type_of(self.symbol_of(id))
    }

    /// `+ - * /`: both operands must be int; result int
    fn arithmetic(&mut self, lhs: &Expr, rhs: &Expr) -> Type {
        let lt = self.expr(lhs);
        let rt = self.expr(rhs);
        let mut ok = true;

        if lt.is_error() {
            ok = false;
        } else if !lt.is_int() {
            self.reporter.fatal(lhs.span(), messages::ARITH_NON_NUMERIC);
            ok = false;
        }

        if rt.is_error() {
            ok = false;
        } else if !rt.is_int() {
            self.reporter.fatal(rhs.span(), messages::ARITH_NON_NUMERIC);
            ok = false;
        }

        if ok {
            Type::Int
        } else {
            Type::Error
        }
    }

    /// `< > <= >=`: both operands must be int; result bool
    fn relational(&mut self, lhs: &Expr, rhs: &Expr) -> Type {
        let lt = self.expr(lhs);
        let rt = self.expr(rhs);
        let mut ok = true;

        if lt.is_error() {
            ok = false;
        } else if !lt.is_int() {
            self.reporter
                .fatal(lhs.span(), messages::RELATIONAL_NON_NUMERIC);
            ok = false;
        }

        if rt.is_error() {
            ok = false;
        } else if !rt.is_int() {
            self.reporter
                .fatal(rhs.span(), messages::RELATIONAL_NON_NUMERIC);
            ok = false;
        }

        if ok {
            Type::Bool
        } else {
            Type::Error
        }
    }

    /// `&& ||`: both operands must be bool; result bool
    fn logical(&mut self, lhs: &Expr, rhs: &Expr) -> Type {
        let lt = self.expr(lhs);
        let rt = self.expr(rhs);
        let mut ok = true;

        if lt.is_error() {
            ok = false;
        } else if !lt.is_bool() {
            self.reporter.fatal(lhs.span(), messages::LOGICAL_NON_BOOL);
            ok = false;
        }

        if rt.is_error() {
            ok = false;
        } else if !rt.is_bool() {
            self.reporter.fatal(rhs.span(), messages::LOGICAL_NON_BOOL);
            ok = false;
        }

        if ok {
            Type::Bool
        } else {
            Type::Error
        }
    }

    /// `== !=`: checked in a fixed priority, one diagnostic at the
    /// left operand's position
    fn equality(&mut self, lhs: &Expr, rhs: &Expr) -> Type {
        let lt = self.expr(lhs);
        let rt = self.expr(rhs);
        let span = lhs.span();

        if lt.is_void() && rt.is_void() {
            self.reporter.fatal(span, messages::EQUALITY_ON_VOID);
            Type::Error
        } else if lt.is_fn() && rt.is_fn() {
            self.reporter.fatal(span, messages::EQUALITY_ON_FUNCTIONS);
            Type::Error
        } else if lt.is_struct_def() && rt.is_struct_def() {
            self.reporter.fatal(span, messages::EQUALITY_ON_STRUCT_NAMES);
            Type::Error
        } else if lt.is_struct() && rt.is_struct() {
            self.reporter.fatal(span, messages::EQUALITY_ON_STRUCT_VARS);
            Type::Error
        } else if lt.is_error() || rt.is_error() {
            Type::Error
        } else if lt != rt {
            self.reporter.fatal(span, messages::TYPE_MISMATCH);
            Type::Error
        } else {
            Type::Bool
        }
    }

    /// Assignment: sides must be equal value types; functions, struct
    /// names, and whole struct variables cannot be assigned
    fn assign(&mut self, assign: &AssignExpr) -> Type {
        let lt = self.expr(&assign.lhs);
        let rt = self.expr(&assign.rhs);
        let span = assign.lhs.span();

        if lt.is_fn() && rt.is_fn() {
            self.reporter.fatal(span, messages::FUNCTION_ASSIGNMENT);
            Type::Error
        } else if lt.is_struct_def() && rt.is_struct_def() {
            self.reporter.fatal(span, messages::STRUCT_NAME_ASSIGNMENT);
            Type::Error
        } else if lt.is_struct() && rt.is_struct() {
            self.reporter.fatal(span, messages::STRUCT_VAR_ASSIGNMENT);
            Type::Error
        } else if lt.is_error() || rt.is_error() {
            Type::Error
        } else if lt != rt {
            self.reporter.fatal(span, messages::TYPE_MISMATCH);
            Type::Error
        } else {
            lt
        }
    }

    fn unary_minus(&mut self, operand: &Expr) -> Type {
        let ty = self.expr(operand);
        if ty.is_error() {
            Type::Error
        } else if !ty.is_int() {
            self.reporter
                .fatal(operand.span(), messages::ARITH_NON_NUMERIC);
            Type::Error
        } else {
            Type::Int
        }
    }

    fn unary_not(&mut self, operand: &Expr) -> Type {
        let ty = self.expr(operand);
        if ty.is_error() {
            Type::Error
        } else if !ty.is_bool() {
            self.reporter
                .fatal(operand.span(), messages::LOGICAL_NON_BOOL);
            Type::Error
        } else {
            Type::Bool
        }
    }

    /// A call: the callee must be a function, the argument count must
    /// match, and each actual must have its formal's type
    fn call(&mut self, call: &CallExpr) -> Type {
        let sym = self.symbol_of(&call.callee);
        let (formals, ret) = match &self.syms.get(sym).kind {
            SymbolKind::Fn { formals, ret } => (formals.clone(), ret.clone()),
            _ => {
                self.reporter
                    .fatal(call.callee.span, messages::CALL_NON_FUNCTION);
                return Type::Error;
            }
        };

        if call.args.len() != formals.len() {
            self.reporter
                .fatal(call.callee.span, messages::WRONG_ARG_COUNT);
            return Type::Error;
        }

        let mut ok = true;
        for (arg, formal) in call.args.iter().zip(&formals) {
            let ty = self.expr(arg);
            if ty.is_error() {
                // the argument already failed; stay silent
                ok = false;
            } else if ty != *formal {
                self.reporter
                    .fatal(arg.span(), messages::ACTUAL_FORMAL_MISMATCH);
                ok = false;
            }
        }

        if ok {
            ret
        } else {
            Type::Error
        }
    }
}
