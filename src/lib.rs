pub mod ast;
pub mod diagnostics;
pub mod evaluator;
pub mod lexer;
pub mod parser;
pub mod repl;

use std::fmt;

use evaluator::{Environment, Evaluator, Value};
use lexer::Lexer;
use parser::Parser;

/// Outcome of running one chunk of source (a file or a single REPL line).
#[derive(Debug)]
pub enum RunOutcome {
    /// Parsing and evaluation both succeeded; carries the result value.
    Value(Value),
    /// The parser collected one or more diagnostics; the program was never
    /// evaluated (SPEC_FULL §4.2 — a program with parse errors is never
    /// executed).
    ParseErrors(Vec<String>),
}

impl fmt::Display for RunOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunOutcome::Value(value) => write!(f, "{}", value.render()),
            RunOutcome::ParseErrors(errors) => {
                for error in errors {
                    write!(f, "{error}")?;
                }
                Ok(())
            }
        }
    }
}

/// Lexes, parses, and evaluates `source` against `env` — the same pipeline
/// the CLI's file mode and the REPL both drive (SPEC_FULL §4.5).
pub fn run(filename: &str, source: &str, env: &Environment) -> RunOutcome {
    let lexer = Lexer::new(filename, source);
    let diagnostic_lexer = lexer.clone();

    let mut parser = Parser::new(lexer);
    let program = parser.parse();
    if !parser.errors().is_empty() {
        return RunOutcome::ParseErrors(parser.errors().to_vec());
    }

    let evaluator = Evaluator::new(diagnostic_lexer);
    RunOutcome::Value(evaluator.eval_program(&program, env))
}
