//! # Eta
//!
//! This binary is the interpreter for eta. It lexes, parses, and evaluates a
//! source file directly, or drops into an interactive REPL when run with no
//! file argument.
mod cli;

use std::process::ExitCode;

use log::error;

use cli::Cli;
use eta::evaluator::Environment;
use eta::RunOutcome;

fn main() -> ExitCode {
    let args = Cli::init();
    simple_logger::init_with_level(log::Level::from(&args.verbosity)).unwrap();

    let Some(path) = args.file else {
        eta::repl::run();
        return ExitCode::SUCCESS;
    };

    let source = match std::fs::read_to_string(&path) {
        Ok(source) => source,
        Err(err) => {
            error!("failed to open file {}: {err}", path.display());
            eprintln!("failed to open file {}: {err}", path.display());
            return ExitCode::FAILURE;
        }
    };

    let filename = path.to_string_lossy().into_owned();
    let env = Environment::new();
    match eta::run(&filename, &source, &env) {
        RunOutcome::ParseErrors(errors) => {
            for err in &errors {
                eprint!("{err}");
            }
            ExitCode::FAILURE
        }
        RunOutcome::Value(value) if value.is_error() => {
            eprint!("{}", value.render());
            ExitCode::FAILURE
        }
        RunOutcome::Value(_) => ExitCode::SUCCESS,
    }
}
