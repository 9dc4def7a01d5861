//! Abstract Syntax Tree definitions for C--.

use crate::semantic::{SymbolId, Type};

/// Source position (1-based line and column) for error messages
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Span {
    pub line: usize,
    pub column: usize,
}

impl Span {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

/// The root of the AST - a complete program
#[derive(Debug, Clone)]
pub struct Program {
    pub decls: Vec<Decl>,
}

/// Top-level declarations
#[derive(Debug, Clone)]
pub enum Decl {
    Var(VarDecl),
    Fn(FnDecl),
    Struct(StructDecl),
}

/// An identifier occurrence. Name analysis links each well-formed
/// occurrence to its symbol; an undeclared identifier stays unlinked.
#[derive(Debug, Clone)]
pub struct Id {
    pub name: String,
    pub span: Span,
    pub sym: Option<SymbolId>,
}

impl Id {
    pub fn new(name: impl Into<String>, span: Span) -> Self {
        Self {
            name: name.into(),
            span,
            sym: None,
        }
    }
}

/// Variable declaration (global, local, or struct field)
#[derive(Debug, Clone)]
pub struct VarDecl {
    pub ty: TypeNode,
    pub id: Id,
    /// Size of a struct-typed variable, filled in by later phases.
    pub size: Option<usize>,
}

/// Function declaration
#[derive(Debug, Clone)]
pub struct FnDecl {
    pub ret: TypeNode,
    pub id: Id,
    pub formals: Vec<FormalDecl>,
    pub body: Block,
}

/// Function formal parameter
#[derive(Debug, Clone)]
pub struct FormalDecl {
    pub ty: TypeNode,
    pub id: Id,
}

/// Struct definition
#[derive(Debug, Clone)]
pub struct StructDecl {
    pub id: Id,
    pub fields: Vec<VarDecl>,
}

/// Type reference as written in the source
#[derive(Debug, Clone)]
pub enum TypeNode {
    Int,
    Bool,
    Void,
    Struct(Id),
}

impl TypeNode {
    /// The static type this reference denotes
    pub fn to_type(&self) -> Type {
        match self {
            TypeNode::Int => Type::Int,
            TypeNode::Bool => Type::Bool,
            TypeNode::Void => Type::Void,
            TypeNode::Struct(id) => Type::Struct(id.name.clone()),
        }
    }
}

/// A lexical block: local declarations followed by statements
#[derive(Debug, Clone, Default)]
pub struct Block {
    pub decls: Vec<VarDecl>,
    pub stmts: Vec<Stmt>,
}

/// Statements
#[derive(Debug, Clone)]
pub enum Stmt {
    /// loc = exp;
    Assign(AssignExpr),
    /// loc++;
    PostInc(Expr),
    /// loc--;
    PostDec(Expr),
    /// cin >> loc;
    Read(Expr),
    /// cout << exp;
    Write(Expr),
    If {
        cond: Expr,
        body: Block,
    },
    IfElse {
        cond: Expr,
        then_body: Block,
        else_body: Block,
    },
    While {
        cond: Expr,
        body: Block,
    },
    Repeat {
        count: Expr,
        body: Block,
    },
    /// f(args);
    Call(CallExpr),
    Return(Option<Expr>),
}

/// Expressions
#[derive(Debug, Clone)]
pub enum Expr {
    IntLit { value: i32, span: Span },
    /// The value keeps its surrounding quotes, exactly as written.
    StrLit { value: String, span: Span },
    True(Span),
    False(Span),
    Id(Id),
    Dot(Box<DotAccess>),
    Assign(Box<AssignExpr>),
    Call(CallExpr),
    Unary {
        op: UnaryOp,
        operand: Box<Expr>,
    },
    Binary {
        op: BinaryOp,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
}

impl Expr {
    /// The position a diagnostic about this expression attaches to: the
    /// expression itself for leaves, the field for dot-access, and the
    /// leftmost operand otherwise.
    pub fn span(&self) -> Span {
        match self {
            Expr::IntLit { span, .. } | Expr::StrLit { span, .. } => *span,
            Expr::True(span) | Expr::False(span) => *span,
            Expr::Id(id) => id.span,
            Expr::Dot(dot) => dot.field.span,
            Expr::Assign(assign) => assign.lhs.span(),
            Expr::Call(call) => call.callee.span,
            Expr::Unary { operand, .. } => operand.span(),
            Expr::Binary { lhs, .. } => lhs.span(),
        }
    }
}

/// Field access `loc.field`. The left-hand side is always an identifier
/// or another dot-access; the parser accepts nothing else there.
#[derive(Debug, Clone)]
pub struct DotAccess {
    pub loc: Expr,
    pub field: Id,
    /// Struct definition symbol of the field, set during name analysis
    /// when the field is itself struct-typed, so this node can serve as
    /// the left-hand side of a further dot-access.
    pub struct_sym: Option<SymbolId>,
    /// Suppresses cascading diagnostics once a root error was reported.
    pub bad_access: bool,
}

impl DotAccess {
    pub fn new(loc: Expr, field: Id) -> Self {
        Self {
            loc,
            field,
            struct_sym: None,
            bad_access: false,
        }
    }
}

/// Assignment `lhs = rhs`
#[derive(Debug, Clone)]
pub struct AssignExpr {
    pub lhs: Expr,
    pub rhs: Expr,
}

/// Function call `callee(args)`
#[derive(Debug, Clone)]
pub struct CallExpr {
    pub callee: Id,
    pub args: Vec<Expr>,
}

/// Unary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    Neg, // -
    Not, // !
}

/// Binary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Plus,
    Minus,
    Times,
    Divide,
    And,
    Or,
    Eq,
    NotEq,
    Less,
    Greater,
    LessEq,
    GreaterEq,
}

impl BinaryOp {
    pub fn symbol(&self) -> &'static str {
        match self {
            BinaryOp::Plus => "+",
            BinaryOp::Minus => "-",
            BinaryOp::Times => "*",
            BinaryOp::Divide => "/",
            BinaryOp::And => "&&",
            BinaryOp::Or => "||",
            BinaryOp::Eq => "==",
            BinaryOp::NotEq => "!=",
            BinaryOp::Less => "<",
            BinaryOp::Greater => ">",
            BinaryOp::LessEq => "<=",
            BinaryOp::GreaterEq => ">=",
        }
    }
}

impl UnaryOp {
    pub fn symbol(&self) -> &'static str {
        match self {
            UnaryOp::Neg => "-",
            UnaryOp::Not => "!",
        }
    }
}
