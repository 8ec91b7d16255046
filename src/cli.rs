//! # Cli
//!
//! This module contains everything needed for parsing the CLI arguments for eta.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

/// A tree-walking interpreter for the eta scripting language.
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Source file to run. Omit to start the interactive REPL.
    pub file: Option<PathBuf>,

    /// Specify the log level of the interpreter.
    #[arg(value_enum, short, long, default_value_t = LogLevel::default())]
    pub verbosity: LogLevel,
}

impl Cli {
    pub fn init() -> Self {
        Cli::parse()
    }
}

/// Enum for specifying the log level of eta.
#[derive(ValueEnum, Clone, Default, Debug)]
pub enum LogLevel {
    /// The default log level. Only critical errors will be logged.
    #[default]
    #[value(alias("0"))]
    Error,

    /// Also log warnings, e.g. about a reserved keyword appearing where an
    /// expression was expected.
    #[value(alias("1"))]
    Warn,

    /// Also log general progress of the lex/parse/eval pipeline.
    #[value(alias("2"))]
    Info,

    /// Log everything the lexer, parser, and evaluator do internally.
    #[value(alias("3"))]
    Debug,

    /// Log extra, very verbose detail (per-token, per-node tracing).
    #[value(alias("4"))]
    Trace,
}

impl From<&LogLevel> for log::Level {
    fn from(value: &LogLevel) -> Self {
        match value {
            LogLevel::Error => log::Level::Error,
            LogLevel::Warn => log::Level::Warn,
            LogLevel::Info => log::Level::Info,
            LogLevel::Debug => log::Level::Debug,
            LogLevel::Trace => log::Level::Trace,
        }
    }
}
