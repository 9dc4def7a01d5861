//! Unparser that reconstructs C-- source from the AST.
//!
//! After analysis, each linked identifier can optionally be annotated
//! with its resolved type as `name(type)`; the plain output re-parses to
//! the same program.

use crate::parser::{
    AssignExpr, Block, CallExpr, Decl, Expr, FnDecl, Id, Program, Stmt, StructDecl, TypeNode,
    VarDecl,
};
use crate::semantic::Symbols;

const INDENT: usize = 4;

/// Emits C-- source from the analyzed AST
pub struct Unparser<'a> {
    syms: &'a Symbols,
    output: String,
    indent: usize,
    annotate: bool,
}

impl<'a> Unparser<'a> {
    pub fn new(syms: &'a Symbols) -> Self {
        Self {
            syms,
            output: String::new(),
            indent: 0,
            annotate: false,
        }
    }

    /// Like [`Unparser::new`], but identifiers print their resolved types
    pub fn annotated(syms: &'a Symbols) -> Self {
        Self {
            annotate: true,
            ..Self::new(syms)
        }
    }

    /// Render the whole program
    pub fn unparse(mut self, program: &Program) -> String {
        for decl in &program.decls {
            self.decl(decl);
        }
        self.output
    }

    fn decl(&mut self, decl: &Decl) {
        match decl {
            Decl::Var(d) => self.var_decl(d),
            Decl::Fn(d) => self.fn_decl(d),
            Decl::Struct(d) => self.struct_decl(d),
        }
    }

    fn var_decl(&mut self, decl: &VarDecl) {
        self.line(format!(
            "{} {};",
            self.type_node(&decl.ty),
            self.id(&decl.id)
        ));
    }

    fn fn_decl(&mut self, decl: &FnDecl) {
        let formals: Vec<String> = decl
            .formals
            .iter()
            .map(|f| format!("{} {}", self.type_node(&f.ty), self.id(&f.id)))
            .collect();

        self.line(format!(
            "{} {}({}) {{",
            self.type_node(&decl.ret),
            self.id(&decl.id),
            formals.join(", ")
        ));
        self.indent += INDENT;
        self.block_body(&decl.body);
        self.indent -= INDENT;
        self.line("}".to_string());
        self.output.push('\n');
    }

    fn struct_decl(&mut self, decl: &StructDecl) {
        self.line(format!("struct {} {{", self.id(&decl.id)));
        self.indent += INDENT;
        for field in &decl.fields {
            self.var_decl(field);
        }
        self.indent -= INDENT;
        self.line("};".to_string());
        self.output.push('\n');
    }

    fn block_body(&mut self, block: &Block) {
        for decl in &block.decls {
            self.var_decl(decl);
        }
        for stmt in &block.stmts {
            self.stmt(stmt);
        }
    }

    fn nested_block(&mut self, block: &Block) {
        self.indent += INDENT;
        self.block_body(block);
        self.indent -= INDENT;
    }

    fn stmt(&mut self, stmt: &Stmt) {
        match stmt {
            Stmt::Assign(assign) => {
                // no parentheses at statement level
                self.line(format!(
                    "{} = {};",
                    self.expr(&assign.lhs),
                    self.expr(&assign.rhs)
                ));
            }
            Stmt::PostInc(e) => self.line(format!("{}++;", self.expr(e))),
            Stmt::PostDec(e) => self.line(format!("{}--;", self.expr(e))),
            Stmt::Read(e) => self.line(format!("cin >> {};", self.expr(e))),
            Stmt::Write(e) => self.line(format!("cout << {};", self.expr(e))),
            Stmt::If { cond, body } => {
                self.line(format!("if ({}) {{", self.expr(cond)));
                self.nested_block(body);
                self.line("}".to_string());
            }
            Stmt::IfElse {
                cond,
                then_body,
                else_body,
            } => {
                self.line(format!("if ({}) {{", self.expr(cond)));
                self.nested_block(then_body);
                self.line("}".to_string());
                self.line("else {".to_string());
                self.nested_block(else_body);
                self.line("}".to_string());
            }
            Stmt::While { cond, body } => {
                self.line(format!("while ({}) {{", self.expr(cond)));
                self.nested_block(body);
                self.line("}".to_string());
            }
            Stmt::Repeat { count, body } => {
                self.line(format!("repeat ({}) {{", self.expr(count)));
                self.nested_block(body);
                self.line("}".to_string());
            }
            Stmt::Call(call) => {
                let rendered = self.call(call);
                self.line(format!("{};", rendered));
            }
            Stmt::Return(None) => self.line("return;".to_string()),
            Stmt::Return(Some(e)) => self.line(format!("return {};", self.expr(e))),
        }
    }

    fn expr(&self, expr: &Expr) -> String {
        match expr {
            Expr::IntLit { value, .. } => value.to_string(),
            Expr::StrLit { value, .. } => value.clone(),
            Expr::True(_) => "true".to_string(),
            Expr::False(_) => "false".to_string(),
            Expr::Id(id) => self.id(id),
            Expr::Dot(dot) => format!("{}.{}", self.expr(&dot.loc), self.id(&dot.field)),
            Expr::Assign(assign) => self.assign(assign),
            Expr::Call(call) => self.call(call),
            Expr::Unary { op, operand } => {
                format!("({}{})", op.symbol(), self.expr(operand))
            }
            Expr::Binary { op, lhs, rhs } => {
                format!("({} {} {})", self.expr(lhs), op.symbol(), self.expr(rhs))
            }
        }
    }

    fn assign(&self, assign: &AssignExpr) -> String {
        format!("({} = {})", self.expr(&assign.lhs), self.expr(&assign.rhs))
    }

    fn call(&self, call: &CallExpr) -> String {
        let args: Vec<String> = call.args.iter().map(|a| self.expr(a)).collect();
        format!("{}({})", self.id(&call.callee), args.join(", "))
    }

    fn id(&self, id: &Id) -> String {
        match id.sym {
            Some(sym) if self.annotate => {
                format!("{}({})", id.name, self.syms.type_of(sym))
            }
            _ => id.name.clone(),
        }
    }

    fn type_node(&self, ty: &TypeNode) -> String {
        match ty {
            TypeNode::Int => "int".to_string(),
            TypeNode::Bool => "bool".to_string(),
            TypeNode::Void => "void".to_string(),
            TypeNode::Struct(id) => format!("struct {}", id.name),
        }
    }

    fn line(&mut self, text: String) {
        for _ in 0..self.indent {
            self.output.push(' ');
        }
        self.output.push_str(&text);
        self.output.push('\n');
    }
}
