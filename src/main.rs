//! C-- Compiler CLI
//!
//! Usage: cmmc <input.cmm> [-o output.cmm]

use clap::Parser;
use cmmc::Driver;
use colored::Colorize;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(name = "cmmc")]
#[command(version = "0.1.0")]
#[command(about = "C-- compiler front-end: name analysis and type checking", long_about = None)]
struct Args {
    /// Input C-- file (.cmm)
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Where to write the unparsed program (defaults to stdout)
    #[arg(short, long, value_name = "OUTPUT")]
    output: Option<PathBuf>,

    /// Annotate each resolved identifier with its type
    #[arg(long, default_value_t = false)]
    annotate: bool,

    /// Print tokens for debugging
    #[arg(long, default_value_t = false)]
    dump_tokens: bool,

    /// Print the AST for debugging
    #[arg(long, default_value_t = false)]
    dump_ast: bool,

    /// Print the global symbol table for debugging
    #[arg(long, default_value_t = false)]
    dump_symbols: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();

    if args.input.extension().map_or(true, |ext| ext != "cmm") {
        eprintln!(
            "{}: input file must have .cmm extension: {}",
            "error".red().bold(),
            args.input.display()
        );
        return ExitCode::FAILURE;
    }

    let source = match std::fs::read_to_string(&args.input) {
        Ok(s) => s,
        Err(e) => {
            eprintln!(
                "{}: could not read file '{}': {}",
                "error".red().bold(),
                args.input.display(),
                e
            );
            return ExitCode::FAILURE;
        }
    };

    let mut driver = Driver::new(source);
    driver.set_annotate(args.annotate);
    driver.set_dump_tokens(args.dump_tokens);
    driver.set_dump_ast(args.dump_ast);
    driver.set_dump_symbols(args.dump_symbols);

    match driver.compile() {
        Ok(unparsed) => {
            match args.output {
                Some(path) => {
                    if let Err(e) = std::fs::write(&path, &unparsed) {
                        eprintln!(
                            "{}: could not write file '{}': {}",
                            "error".red().bold(),
                            path.display(),
                            e
                        );
                        return ExitCode::FAILURE;
                    }
                }
                None => print!("{}", unparsed),
            }
            ExitCode::SUCCESS
        }
        Err(diagnostics) => {
            for diag in &diagnostics {
                eprintln!("{}", diag);
            }

            let error_count = diagnostics.iter().filter(|d| d.is_error()).count();
            eprintln!(
                "\n{}",
                format!(
                    "{} error{} generated",
                    error_count,
                    if error_count == 1 { "" } else { "s" }
                )
                .red()
                .bold()
            );

            ExitCode::FAILURE
        }
    }
}
