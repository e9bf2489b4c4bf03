//! CLI module for the OpenFHE PKE emitter
//!
//! ## Commands
//!
//! - `emit <file>` - Translate a JSON circuit module to C++
//! - `check <file>` - Load, verify and dry-run translation without writing output
//! - `schemes` - List the supported schemes
//!
//! ## Design
//!
//! The CLI uses clap for argument parsing with derive macros.
//! Command functions return `CliResult<T>` instead of calling `process::exit`.
//! Only the top-level `run()` function handles errors and exits.

// Enforce explicit error handling - no panicking in production code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub mod commands;

use std::fmt;
use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use pke_core::Scheme;

use crate::config::DEFAULT_OPENFHE_INCLUDE;

// ============================================================================
// CLI Error handling
// ============================================================================

/// Exit code for CLI operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitCode(pub i32);

impl ExitCode {
    pub const SUCCESS: ExitCode = ExitCode(0);
    pub const FAILURE: ExitCode = ExitCode(1);
}

/// Error type for CLI operations.
///
/// Contains a user-facing message and an exit code. The CLI entry point
/// catches these errors, prints the message, and exits with the code.
#[derive(Debug)]
pub struct CliError {
    /// User-facing error message (already formatted for display)
    pub message: String,
    /// Exit code to return to the shell
    pub exit_code: ExitCode,
}

impl CliError {
    pub fn new(message: impl Into<String>, exit_code: ExitCode) -> Self {
        Self {
            message: message.into(),
            exit_code,
        }
    }

    /// Create a failure error (exit code 1).
    pub fn failure(message: impl Into<String>) -> Self {
        Self::new(message, ExitCode::FAILURE)
    }

    /// Render a diagnostic with the fancy reporter.
    pub fn diagnostic(diagnostic: impl miette::Diagnostic + Send + Sync + 'static) -> Self {
        Self::failure(format!("{:?}", miette::Report::new(diagnostic)))
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

const VERSION: &str = env!("CARGO_PKG_VERSION");

// ============================================================================
// Clap CLI definition
// ============================================================================

/// Translate FHE circuit modules into OpenFHE C++
#[derive(Parser, Debug)]
#[command(name = "pke-emit")]
#[command(version = VERSION)]
#[command(about = "Translate FHE circuit modules into OpenFHE C++", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Translate a module to C++
    Emit {
        /// JSON module to translate
        #[arg(value_name = "FILE")]
        file: PathBuf,
        /// Target scheme
        #[arg(short, long, default_value = "bgv")]
        scheme: Scheme,
        /// Write the C++ here instead of stdout
        #[arg(short, long, value_name = "OUT")]
        output: Option<PathBuf>,
        /// Spaces per indentation level
        #[arg(long, value_name = "N", default_value_t = 2)]
        indent: usize,
        /// Header path for the OpenFHE include
        #[arg(long, value_name = "PATH", default_value = DEFAULT_OPENFHE_INCLUDE)]
        include: String,
        /// Omit the include and handle aliases
        #[arg(long)]
        no_prelude: bool,
    },

    /// Verify a module and dry-run its translation
    Check {
        /// JSON module to check
        #[arg(value_name = "FILE")]
        file: PathBuf,
        /// Target scheme
        #[arg(short, long, default_value = "bgv")]
        scheme: Scheme,
    },

    /// List supported schemes
    Schemes,
}

// ============================================================================
// CLI entry point
// ============================================================================

/// Main CLI entry point.
///
/// This is the only place where `process::exit` is called. All command
/// implementations return `CliResult` and errors are handled here.
pub fn run() {
    let cli = Cli::parse();

    match execute(cli) {
        Ok(exit_code) => {
            if exit_code.0 != 0 {
                process::exit(exit_code.0);
            }
        }
        Err(e) => {
            if !e.message.is_empty() {
                eprintln!("{}", e.message);
            }
            process::exit(e.exit_code.0);
        }
    }
}

/// Execute the CLI command and return result.
pub fn execute(cli: Cli) -> CliResult<ExitCode> {
    match cli.command {
        Command::Emit {
            file,
            scheme,
            output,
            indent,
            include,
            no_prelude,
        } => {
            let config = crate::config::EmitConfig::new()
                .with_indent_width(indent)
                .with_openfhe_include(include)
                .with_prelude(!no_prelude);
            commands::emit_file(&file, scheme, &config, output.as_deref())
        }
        Command::Check { file, scheme } => commands::check_file(&file, scheme),
        Command::Schemes => commands::list_schemes(),
    }
}

// ============================================================================
// Tests
// ============================================================================
