//! CLI tool to quote bare array subscripts in PHP files.
//!
//! Directory walking is left to the shell:
//!
//! ```text
//! find . -type f -iname '*.php' -exec aif {} +
//! ```

use std::fs;
use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use php_aif::{LexError, Options, StateMachine};
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[allow(clippy::struct_excessive_bools)]
#[command(
    name = "aif",
    version,
    about = "Quote bare array subscripts in PHP files ($a[b] -> $a['b'])"
)]
struct Cli {
    /// PHP files to rewrite in place
    #[arg(value_name = "FILES", required = true)]
    files: Vec<PathBuf>,

    /// Print the rewritten source to stdout instead of writing it back
    #[arg(long, conflicts_with = "check")]
    stdout: bool,

    /// Write nothing; exit with 1 if any file would change
    #[arg(long)]
    check: bool,

    /// Also rewrite inside heredoc and backtick strings (not idempotent)
    #[arg(long)]
    loose_literals: bool,

    /// Only quote a word that is the whole subscript
    #[arg(long)]
    whole_subscript_only: bool,

    /// Log more (-v per file, -vv per subscript word)
    #[arg(short, long, action = clap::ArgAction::Count, conflicts_with = "quiet")]
    verbose: u8,

    /// Only log failed files
    #[arg(short, long)]
    quiet: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Output {
    InPlace,
    Stdout,
    Check,
}

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("{}: {source}", path.display())]
    Lex { path: PathBuf, source: LexError },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(&cli);

    let options = Options::new()
        .trace(cli.verbose >= 2)
        .strict_literals(!cli.loose_literals)
        .whole_subscript_only(cli.whole_subscript_only);
    let output = if cli.stdout {
        Output::Stdout
    } else if cli.check {
        Output::Check
    } else {
        Output::InPlace
    };

    let mut had_error = false;
    let mut would_change = false;

    for path in &cli.files {
        match fix_file(path, options, output) {
            Ok(0) => debug!(path = %path.display(), "nothing to quote"),
            Ok(count) => {
                would_change = true;
                if output == Output::Check {
                    eprintln!("{}: {count} bare subscript(s)", path.display());
                } else {
                    info!(path = %path.display(), count, "quoted subscripts");
                }
            }
            Err(e) => {
                error!(path = %path.display(), error = %e, "file skipped");
                had_error = true;
            }
        }
    }

    if had_error || (output == Output::Check && would_change) {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

/// Rewrite one file and return how many subscripts were quoted.
fn fix_file(path: &Path, options: Options, output: Output) -> Result<usize, CliError> {
    let source = fs::read_to_string(path).map_err(|source| CliError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let mut machine = StateMachine::new(options);
    machine
        .tokenize(&source)
        .map_err(|source| CliError::Lex {
            path: path.to_path_buf(),
            source,
        })?;
    let fixed = machine.parse();
    let count = machine.rewrites().len();

    match output {
        Output::Stdout => print!("{fixed}"),
        Output::Check => {}
        Output::InPlace if fixed != source => {
            fs::write(path, &fixed).map_err(|source| CliError::Io {
                path: path.to_path_buf(),
                source,
            })?;
        }
        Output::InPlace => {}
    }

    Ok(count)
}

/// Logs go to stderr so `--stdout` output stays clean. `RUST_LOG`
/// overrides the level picked from the flags.
fn init_logging(cli: &Cli) {
    let level = if cli.quiet {
        "error"
    } else {
        match cli.verbose {
            0 => "warn",
            1 => "info",
            _ => "debug",
        }
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(false)
        .init();
}
