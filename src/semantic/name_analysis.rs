//! Name analysis: resolves every identifier occurrence to a declaration,
//! enforcing scope rules and struct-field access.
//!
//! The walk mutates the AST, linking each well-formed identifier to its
//! symbol in the arena. An undeclared identifier is reported once and
//! left unlinked; later uses of it must not cascade further diagnostics.

use super::symbol_table::{SymbolId, SymbolKind, SymbolTable, Symbols};
use super::types::Type;
use crate::diagnostics::{messages, DiagnosticReporter};
use crate::parser::{
    Block, CallExpr, Decl, DotAccess, Expr, FnDecl, FormalDecl, Id, Program, Stmt, StructDecl,
    TypeNode, VarDecl,
};

/// The name-analysis walk over a program
pub struct NameAnalyzer<'a> {
    syms: &'a mut Symbols,
    reporter: &'a mut DiagnosticReporter,
}

impl<'a> NameAnalyzer<'a> {
    pub fn new(syms: &'a mut Symbols, reporter: &'a mut DiagnosticReporter) -> Self {
        Self { syms, reporter }
    }

    /// Analyze the program in a fresh outermost scope and return the
    /// populated global symbol table for later phases.
    pub fn analyze(&mut self, program: &mut Program) -> SymbolTable {
        let mut table = SymbolTable::new();
        for decl in &mut program.decls {
            self.decl(&mut table, decl);
        }
        table
    }

    fn decl(&mut self, table: &mut SymbolTable, decl: &mut Decl) {
        match decl {
            Decl::Var(d) => self.var_decl(table, d),
            Decl::Fn(d) => self.fn_decl(table, d),
            Decl::Struct(d) => self.struct_decl(table, d),
        }
    }

    /// Check a variable declaration's type and pick its binding kind.
    /// Struct type names resolve through `global`, which is the program
    /// table even when the variable itself is a struct field.
    fn var_decl_kind(&mut self, global: &SymbolTable, decl: &mut VarDecl) -> Option<SymbolKind> {
        match &mut decl.ty {
            TypeNode::Void => {
                self.reporter
                    .fatal(decl.id.span, messages::NON_FUNCTION_DECLARED_VOID);
                None
            }
            TypeNode::Struct(struct_id) => {
                let found = lookup_global(global, &struct_id.name);
                match found {
                    Some(sym)
                        if matches!(self.syms.get(sym).kind, SymbolKind::StructDef { .. }) =>
                    {
                        struct_id.sym = Some(sym);
                        Some(SymbolKind::StructVar { struct_def: sym })
                    }
                    _ => {
                        self.reporter
                            .fatal(struct_id.span, messages::INVALID_STRUCT_TYPE_NAME);
                        None
                    }
                }
            }
            ty => Some(SymbolKind::Var { ty: ty.to_type() }),
        }
    }

    /// Report a duplicate if needed, then bind the variable in `target`.
    fn bind_var(
        &mut self,
        target: &mut SymbolTable,
        decl: &mut VarDecl,
        kind: Option<SymbolKind>,
        duplicate: bool,
    ) {
        if duplicate {
            self.reporter.fatal(decl.id.span, messages::MULTIPLY_DECLARED);
        }
        if let (Some(kind), false) = (kind, duplicate) {
            let sym = self.syms.alloc(decl.id.name.clone(), kind);
            insert(target, &decl.id.name, sym);
            decl.id.sym = Some(sym);
        }
    }

    fn var_decl(&mut self, table: &mut SymbolTable, decl: &mut VarDecl) {
        let kind = self.var_decl_kind(table, decl);
        let duplicate = table.lookup_local(&decl.id.name).is_some();
        self.bind_var(table, decl, kind, duplicate);
    }

    /// A struct field declaration: the binding goes into the struct's own
    /// field scope while struct type names still resolve globally.
    fn field_decl(&mut self, global: &SymbolTable, fields: &mut SymbolTable, decl: &mut VarDecl) {
        let kind = self.var_decl_kind(global, decl);
        let duplicate = fields.lookup_local(&decl.id.name).is_some();
        self.bind_var(fields, decl, kind, duplicate);
    }

    fn fn_decl(&mut self, table: &mut SymbolTable, decl: &mut FnDecl) {
        let mut fn_sym = None;

        if table.lookup_local(&decl.id.name).is_some() {
            self.reporter.fatal(decl.id.span, messages::MULTIPLY_DECLARED);
        } else {
            let sym = self.syms.alloc(
                decl.id.name.clone(),
                SymbolKind::Fn {
                    formals: Vec::new(),
                    ret: decl.ret.to_type(),
                },
            );
            insert(table, &decl.id.name, sym);
            decl.id.sym = Some(sym);
            fn_sym = Some(sym);
        }

        // formals and locals share one scope
        table.add_scope();

        let mut formal_types = Vec::new();
        for formal in &mut decl.formals {
            if let Some(ty) = self.formal_decl(table, formal) {
                formal_types.push(ty);
            }
        }
        if let Some(sym) = fn_sym {
            self.syms.set_formals(sym, formal_types);
        }

        for d in &mut decl.body.decls {
            self.var_decl(table, d);
        }
        for s in &mut decl.body.stmts {
            self.stmt(table, s);
        }

        remove_scope(table);
    }

    fn formal_decl(&mut self, table: &mut SymbolTable, decl: &mut FormalDecl) -> Option<Type> {
        let mut bad_decl = false;

        if matches!(decl.ty, TypeNode::Void) {
            self.reporter
                .fatal(decl.id.span, messages::NON_FUNCTION_DECLARED_VOID);
            bad_decl = true;
        }

        if table.lookup_local(&decl.id.name).is_some() {
            self.reporter.fatal(decl.id.span, messages::MULTIPLY_DECLARED);
            bad_decl = true;
        }

        if bad_decl {
            return None;
        }

        let ty = decl.ty.to_type();
        let sym = self
            .syms
            .alloc(decl.id.name.clone(), SymbolKind::Var { ty: ty.clone() });
        insert(table, &decl.id.name, sym);
        decl.id.sym = Some(sym);
        Some(ty)
    }

    fn struct_decl(&mut self, table: &mut SymbolTable, decl: &mut StructDecl) {
        let duplicate = table.lookup_local(&decl.id.name).is_some();
        if duplicate {
            self.reporter.fatal(decl.id.span, messages::MULTIPLY_DECLARED);
        }

        // the field scope outlives the walk: it is owned by the struct's
        // symbol and queried by every dot-access on the struct
        let mut fields = SymbolTable::new();
        for field in &mut decl.fields {
            self.field_decl(table, &mut fields, field);
        }

        if !duplicate {
            let sym = self
                .syms
                .alloc(decl.id.name.clone(), SymbolKind::StructDef { fields });
            insert(table, &decl.id.name, sym);
            decl.id.sym = Some(sym);
        }
    }

    fn block(&mut self, table: &mut SymbolTable, block: &mut Block) {
        table.add_scope();
        for d in &mut block.decls {
            self.var_decl(table, d);
        }
        for s in &mut block.stmts {
            self.stmt(table, s);
        }
        remove_scope(table);
    }

    fn stmt(&mut self, table: &mut SymbolTable, stmt: &mut Stmt) {
        match stmt {
            Stmt::Assign(assign) => {
                self.expr(table, &mut assign.lhs);
                self.expr(table, &mut assign.rhs);
            }
            Stmt::PostInc(e) | Stmt::PostDec(e) | Stmt::Read(e) | Stmt::Write(e) => {
                self.expr(table, e);
            }
            Stmt::If { cond, body } => {
                self.expr(table, cond);
                self.block(table, body);
            }
            Stmt::IfElse {
                cond,
                then_body,
                else_body,
            } => {
                self.expr(table, cond);
                self.block(table, then_body);
                self.block(table, else_body);
            }
            Stmt::While { cond, body } => {
                self.expr(table, cond);
                self.block(table, body);
            }
            Stmt::Repeat { count, body } => {
                self.expr(table, count);
                self.block(table, body);
            }
            Stmt::Call(call) => self.call(table, call),
            Stmt::Return(Some(e)) => self.expr(table, e),
            Stmt::Return(None) => {}
        }
    }

    fn expr(&mut self, table: &SymbolTable, expr: &mut Expr) {
        match expr {
            Expr::IntLit { .. } | Expr::StrLit { .. } | Expr::True(_) | Expr::False(_) => {}
            Expr::Id(id) => self.id(table, id),
            Expr::Dot(dot) => self.dot_access(table, dot),
            Expr::Assign(assign) => {
                self.expr(table, &mut assign.lhs);
                self.expr(table, &mut assign.rhs);
            }
            Expr::Call(call) => self.call(table, call),
            Expr::Unary { operand, .. } => self.expr(table, operand),
            Expr::Binary { lhs, rhs, .. } => {
                self.expr(table, lhs);
                self.expr(table, rhs);
            }
        }
    }

    fn id(&mut self, table: &SymbolTable, id: &mut Id) {
        match lookup_global(table, &id.name) {
            Some(sym) => id.sym = Some(sym),
            None => self.reporter.fatal(id.span, messages::UNDECLARED),
        }
    }

    fn call(&mut self, table: &SymbolTable, call: &mut CallExpr) {
        self.id(table, &mut call.callee);
        for arg in &mut call.args {
            self.expr(table, arg);
        }
    }

    /// Resolve `loc.field`. The left-hand side determines a struct
    /// definition whose field scope the right-hand id resolves in; any
    /// failure marks the node bad so enclosing accesses stay silent.
    fn dot_access(&mut self, table: &SymbolTable, dot: &mut DotAccess) {
        self.expr(table, &mut dot.loc);

        let mut struct_def: Option<SymbolId> = None;

        match &dot.loc {
            Expr::Id(id) => match id.sym {
                // undeclared LHS was already reported
                None => dot.bad_access = true,
                Some(sym) => match &self.syms.get(sym).kind {
                    SymbolKind::StructVar { struct_def: def } => struct_def = Some(*def),
                    _ => {
                        self.reporter
                            .fatal(id.span, messages::DOT_ACCESS_OF_NON_STRUCT);
                        dot.bad_access = true;
                    }
                },
            },
            Expr::Dot(inner) => {
                if inner.bad_access {
                    dot.bad_access = true;
                } else {
                    match inner.struct_sym {
                        // the inner access resolved to a non-struct field
                        None => {
                            self.reporter
                                .fatal(inner.field.span, messages::DOT_ACCESS_OF_NON_STRUCT);
                            dot.bad_access = true;
                        }
                        Some(def) => struct_def = Some(def),
                    }
                }
            }
            _ => unreachable!("left-hand side of dot-access is not a location"),
        }

        let Some(def) = struct_def else {
            return;
        };

        let fields = match &self.syms.get(def).kind {
            SymbolKind::StructDef { fields } => fields,
            _ => unreachable!("struct variable does not reference a struct definition"),
        };
        let field_sym = match fields.lookup_global(&dot.field.name) {
            Ok(sym) => sym,
            Err(err) => unreachable!("field scope of a struct is gone: {err}"),
        };

        match field_sym {
            None => {
                self.reporter
                    .fatal(dot.field.span, messages::INVALID_STRUCT_FIELD);
                dot.bad_access = true;
            }
            Some(sym) => {
                dot.field.sym = Some(sym);
                // a struct-typed field lets this node serve as the LHS of
                // a further dot-access
                if let SymbolKind::StructVar { struct_def } = &self.syms.get(sym).kind {
                    dot.struct_sym = Some(*struct_def);
                }
            }
        }
    }
}

/// Global lookup in a table that is known to have at least one scope.
fn lookup_global(table: &SymbolTable, name: &str) -> Option<SymbolId> {
    match table.lookup_global(name) {
        Ok(sym) => sym,
        Err(err) => unreachable!("lookup outside any scope: {err}"),
    }
}

/// Insert a binding whose name was already checked against the scope.
fn insert(table: &mut SymbolTable, name: &str, sym: SymbolId) {
    if let Err(err) = table.add_decl(name, sym) {
        unreachable!("symbol table rejected a checked declaration: {err}");
    }
}

/// Pop a scope the walk itself pushed.
fn remove_scope(table: &mut SymbolTable) {
    if let Err(err) = table.remove_scope() {
        unreachable!("scope stack underflow: {err}");
    }
}
