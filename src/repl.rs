//! Interactive prompt. Lexes/parses/evaluates each line against a single
//! environment shared across the whole session, so `let` bindings and
//! function definitions persist between prompts (SPEC_FULL §4.5).

use std::io::{self, Write};

use crate::evaluator::Environment;
use crate::RunOutcome;

const PROMPT: &str = ">> ";
const HELPER: &str = "eta repl --- type '.help' for help";
const VERSION: &str = "alpha 0.1v";

enum DotCommand {
    Help,
    Clear,
    Version,
    Exit,
}

fn dot_command(line: &str) -> Option<DotCommand> {
    match line {
        ".help" => Some(DotCommand::Help),
        ".clear" => Some(DotCommand::Clear),
        ".ver" => Some(DotCommand::Version),
        ".exit" => Some(DotCommand::Exit),
        _ => None,
    }
}

pub fn run() {
    println!("{HELPER}");
    println!("{VERSION}");

    let env = Environment::new();
    let mut line = String::new();

    loop {
        print!("{PROMPT}");
        if io::stdout().flush().is_err() {
            return;
        }

        line.clear();
        let bytes_read = match io::stdin().read_line(&mut line) {
            Ok(n) => n,
            Err(_) => return,
        };
        if bytes_read == 0 {
            return;
        }
        let trimmed = line.trim_end_matches(['\n', '\r']);

        if let Some(cmd) = dot_command(trimmed) {
            match cmd {
                DotCommand::Help => {
                    println!(".help  --- help");
                    println!(".clear --- clear the terminal");
                    println!(".ver   --- shows the eta version");
                    println!(".exit  --- exits the repl");
                }
                DotCommand::Clear => println!("\u{1b}c"),
                DotCommand::Version => println!("{VERSION}"),
                DotCommand::Exit => return,
            }
            continue;
        }

        log::trace!("repl: evaluating line {trimmed:?}");
        match crate::run("repl", trimmed, &env) {
            RunOutcome::ParseErrors(errors) => {
                for error in errors {
                    print!("{error}");
                }
            }
            RunOutcome::Value(value) => println!("{}", value.render()),
        }
    }
}
