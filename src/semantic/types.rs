//! The static types of C--.

use std::fmt;

/// The closed set of C-- static types.
///
/// `Error` is absorbing: an operation consuming an `Error` operand yields
/// `Error` without reporting anything new.
#[derive(Debug, Clone, PartialEq)]
pub enum Type {
    Int,
    Bool,
    Void,
    /// The type of string literals; not declarable as a variable type.
    Str,
    /// A function's type: formal parameter types and return type.
    Fn {
        formals: Vec<Type>,
        ret: Box<Type>,
    },
    /// A variable of the named struct type.
    Struct(String),
    /// The name of a struct definition itself.
    StructDef(String),
    Error,
}

impl Type {
    pub fn is_int(&self) -> bool {
        matches!(self, Type::Int)
    }

    pub fn is_bool(&self) -> bool {
        matches!(self, Type::Bool)
    }

    pub fn is_void(&self) -> bool {
        matches!(self, Type::Void)
    }

    pub fn is_fn(&self) -> bool {
        matches!(self, Type::Fn { .. })
    }

    pub fn is_struct(&self) -> bool {
        matches!(self, Type::Struct(_))
    }

    pub fn is_struct_def(&self) -> bool {
        matches!(self, Type::StructDef(_))
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Type::Error)
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::Int => write!(f, "int"),
            Type::Bool => write!(f, "bool"),
            Type::Void => write!(f, "void"),
            Type::Str => write!(f, "string"),
            Type::Fn { formals, ret } => {
                let formals: Vec<String> = formals.iter().map(|t| t.to_string()).collect();
                write!(f, "{}->{}", formals.join(","), ret)
            }
            Type::Struct(name) => write!(f, "struct {}", name),
            Type::StructDef(name) => write!(f, "{}", name),
            Type::Error => write!(f, "error"),
        }
    }
}
