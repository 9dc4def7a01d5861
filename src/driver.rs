//! Driver that orchestrates the compilation pipeline.

use crate::diagnostics::{Diagnostic, DiagnosticReporter};
use crate::lexer::Scanner;
use crate::parser::Parser;
use crate::semantic::{NameAnalyzer, Symbols, TypeChecker};
use crate::unparse::Unparser;

/// The compilation driver
pub struct Driver {
    source: String,
    dump_tokens: bool,
    dump_ast: bool,
    dump_symbols: bool,
    annotate: bool,
}

impl Driver {
    pub fn new(source: String) -> Self {
        Self {
            source,
            dump_tokens: false,
            dump_ast: false,
            dump_symbols: false,
            annotate: false,
        }
    }

    pub fn set_dump_tokens(&mut self, enabled: bool) {
        self.dump_tokens = enabled;
    }

    pub fn set_dump_ast(&mut self, enabled: bool) {
        self.dump_ast = enabled;
    }

    pub fn set_dump_symbols(&mut self, enabled: bool) {
        self.dump_symbols = enabled;
    }

    /// Annotate each resolved identifier with its type in the output
    pub fn set_annotate(&mut self, enabled: bool) {
        self.annotate = enabled;
    }

    /// Run the pipeline: scan, parse, name analysis, type check, unparse.
    /// Each stage only runs if the previous ones reported no errors.
    pub fn compile(&mut self) -> Result<String, Vec<Diagnostic>> {
        let mut reporter = DiagnosticReporter::new();

        // === Lexical Analysis ===
        let scanner = Scanner::new(&self.source, &mut reporter);
        let tokens = scanner.scan_tokens();

        if self.dump_tokens {
            eprintln!("=== Tokens ===");
            for token in &tokens {
                eprintln!("  {}", token);
            }
            eprintln!();
        }

        if reporter.has_errors() {
            return Err(reporter.take_diagnostics());
        }

        // === Parsing ===
        let mut parser = Parser::new(tokens, &mut reporter);
        let mut program = parser.parse();

        if reporter.has_errors() {
            return Err(reporter.take_diagnostics());
        }

        // === Name Analysis ===
        let mut syms = Symbols::new();
        let mut analyzer = NameAnalyzer::new(&mut syms, &mut reporter);
        let globals = analyzer.analyze(&mut program);

        if self.dump_ast {
            eprintln!("=== AST ===");
            eprintln!("{:#?}", program);
            eprintln!();
        }

        if self.dump_symbols {
            eprintln!("=== Symbols ===");
            eprintln!("{:#?}", globals);
            eprintln!();
        }

        if reporter.has_errors() {
            return Err(reporter.take_diagnostics());
        }

        // === Type Checking ===
        let mut checker = TypeChecker::new(&syms, &mut reporter);
        let ok = checker.check(&program);

        if !ok || reporter.has_errors() {
            return Err(reporter.take_diagnostics());
        }

        // warnings are allowed through; print them here
        for diag in reporter.diagnostics() {
            eprintln!("{}", diag);
        }

        // === Unparse ===
        let unparser = if self.annotate {
            Unparser::annotated(&syms)
        } else {
            Unparser::new(&syms)
        };
        Ok(unparser.unparse(&program))
    }
}
