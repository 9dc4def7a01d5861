//! Diagnostic reporting for compilation errors and warnings.

mod reporter;

pub use reporter::DiagnosticReporter;

use crate::parser::Span;
use colored::Colorize;
use std::fmt;

/// Severity level of a diagnostic
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticLevel {
    Error,
    Warning,
}

impl fmt::Display for DiagnosticLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticLevel::Error => write!(f, "{}", "***ERROR***".red().bold()),
            DiagnosticLevel::Warning => write!(f, "{}", "***WARNING***".yellow().bold()),
        }
    }
}

/// A single compiler diagnostic with source coordinates
#[derive(Debug, Clone)]
pub struct Diagnostic {
    pub level: DiagnosticLevel,
    pub line: usize,
    pub column: usize,
    pub message: String,
}

impl Diagnostic {
    pub fn error(span: Span, message: impl Into<String>) -> Self {
        Self {
            level: DiagnosticLevel::Error,
            line: span.line,
            column: span.column,
            message: message.into(),
        }
    }

    pub fn warning(span: Span, message: impl Into<String>) -> Self {
        Self {
            level: DiagnosticLevel::Warning,
            line: span.line,
            column: span.column,
            message: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self.level, DiagnosticLevel::Error)
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{} {} {}",
            self.line, self.column, self.level, self.message
        )
    }
}

/// The fixed diagnostic messages of the C-- static semantics.
pub mod messages {
    // Name analysis
    pub const NON_FUNCTION_DECLARED_VOID: &str = "Non-function declared void";
    pub const INVALID_STRUCT_TYPE_NAME: &str = "Invalid name of struct type";
    pub const MULTIPLY_DECLARED: &str = "Multiply declared identifier";
    pub const UNDECLARED: &str = "Undeclared identifier";
    pub const DOT_ACCESS_OF_NON_STRUCT: &str = "Dot-access of non-struct type";
    pub const INVALID_STRUCT_FIELD: &str = "Invalid struct field name";

    // Type checking: operators
    pub const ARITH_NON_NUMERIC: &str = "Arithmetic operator applied to non-numeric operand";
    pub const RELATIONAL_NON_NUMERIC: &str = "Relational operator applied to non-numeric operand";
    pub const LOGICAL_NON_BOOL: &str = "Logical operator applied to non-bool operand";
    pub const EQUALITY_ON_VOID: &str = "Equality operator applied to void functions";
    pub const EQUALITY_ON_FUNCTIONS: &str = "Equality operator applied to functions";
    pub const EQUALITY_ON_STRUCT_NAMES: &str = "Equality operator applied to struct names";
    pub const EQUALITY_ON_STRUCT_VARS: &str = "Equality operator applied to struct variables";
    pub const TYPE_MISMATCH: &str = "Type mismatch";

    // Type checking: assignment
    pub const FUNCTION_ASSIGNMENT: &str = "Function assignment";
    pub const STRUCT_NAME_ASSIGNMENT: &str = "Struct name assignment";
    pub const STRUCT_VAR_ASSIGNMENT: &str = "Struct variable assignment";

    // Type checking: calls
    pub const CALL_NON_FUNCTION: &str = "Attempt to call a non-function";
    pub const WRONG_ARG_COUNT: &str = "Function call with wrong number of args";
    pub const ACTUAL_FORMAL_MISMATCH: &str = "Type of actual does not match type of formal";

    // Type checking: statements
    pub const READ_FUNCTION: &str = "Attempt to read a function";
    pub const READ_STRUCT_NAME: &str = "Attempt to read a struct name";
    pub const READ_STRUCT_VAR: &str = "Attempt to read a struct variable";
    pub const WRITE_FUNCTION: &str = "Attempt to write a function";
    pub const WRITE_STRUCT_NAME: &str = "Attempt to write a struct name";
    pub const WRITE_STRUCT_VAR: &str = "Attempt to write a struct variable";
    pub const WRITE_VOID: &str = "Attempt to write void";
    pub const NON_BOOL_IF: &str = "Non-bool expression used as an if condition";
    pub const NON_BOOL_WHILE: &str = "Non-bool expression used as a while condition";
    pub const NON_INT_REPEAT: &str = "Non-integer expression used as a repeat clause";
    pub const MISSING_RETURN_VALUE: &str = "Missing return value";
    pub const RETURN_VALUE_IN_VOID: &str = "Return with a value in a void function";
    pub const BAD_RETURN_VALUE: &str = "Bad return value";
}
