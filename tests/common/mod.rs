//! Shared pipeline helper for the integration tests.
#![allow(dead_code)]

use cmmc::diagnostics::{Diagnostic, DiagnosticReporter};
use cmmc::lexer::Scanner;
use cmmc::parser::{Parser, Program};
use cmmc::semantic::{NameAnalyzer, SymbolTable, Symbols, TypeChecker};

/// The result of running the full analysis pipeline on a source string.
pub struct Analysis {
    pub program: Program,
    pub syms: Symbols,
    pub globals: SymbolTable,
    pub diagnostics: Vec<Diagnostic>,
    /// Result of the type-check walk; true when it did not run because
    /// name analysis already failed.
    pub type_check_ok: bool,
}

impl Analysis {
    /// The diagnostic messages, in emission order.
    pub fn messages(&self) -> Vec<&str> {
        self.diagnostics.iter().map(|d| d.message.as_str()).collect()
    }

    /// (line, column, message) triples, in emission order.
    pub fn located(&self) -> Vec<(usize, usize, &str)> {
        self.diagnostics
            .iter()
            .map(|d| (d.line, d.column, d.message.as_str()))
            .collect()
    }

    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty() && self.type_check_ok
    }
}

/// Scan, parse, and analyze a well-formed source string. Panics on scan
/// or parse errors so the semantic tests only ever see valid syntax; the
/// type-check walk runs only when name analysis reported nothing, as in
/// the driver.
pub fn analyze(source: &str) -> Analysis {
    let mut reporter = DiagnosticReporter::new();

    let tokens = Scanner::new(source, &mut reporter).scan_tokens();
    assert!(
        !reporter.has_errors(),
        "scan errors: {:?}",
        reporter.diagnostics()
    );

    let mut parser = Parser::new(tokens, &mut reporter);
    let mut program = parser.parse();
    assert!(
        !reporter.has_errors(),
        "parse errors: {:?}",
        reporter.diagnostics()
    );

    let mut syms = Symbols::new();
    let mut analyzer = NameAnalyzer::new(&mut syms, &mut reporter);
    let globals = analyzer.analyze(&mut program);

    let mut type_check_ok = true;
    if !reporter.has_errors() {
        let mut checker = TypeChecker::new(&syms, &mut reporter);
        type_check_ok = checker.check(&program);
    }

    Analysis {
        program,
        syms,
        globals,
        diagnostics: reporter.take_diagnostics(),
        type_check_ok,
    }
}
