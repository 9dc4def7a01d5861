//! Semantic analysis: name analysis and type checking over the C-- AST.

mod name_analysis;
mod symbol_table;
mod type_checker;
mod types;

pub use name_analysis::NameAnalyzer;
pub use symbol_table::{Scope, Symbol, SymbolId, SymbolKind, SymbolTable, SymbolTableError, Symbols};
pub use type_checker::TypeChecker;
pub use types::Type;
