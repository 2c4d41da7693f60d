//! CLI definition and parsing.
//! Defines Args and provides try_parse() for command-line handling.
//!
//! Notes:
//! - Exactly two positionals are accepted; anything else is a parse error (exit status 1).
//! - --debug is a shorthand for --log-level debug.

use clap::{Parser, ValueHint};
use std::ffi::OsString;
use std::path::PathBuf;

use crate::config::types::{CopyOptions, CopyRequest, LogLevel};

/// Copy a file to a file, a file into a directory, or (with -r) a directory tree.
#[derive(Parser, Debug, Clone)]
#[command(
    author,
    version,
    about = "Copy files and directory trees, tolerating unreadable source blocks"
)]
pub struct Args {
    /// Copy directories recursively.
    #[arg(short = 'r', short_alias = 'R', long)]
    pub recursive: bool,

    /// Print `source -> destination` for each file copied.
    #[arg(short = 'v', long)]
    pub verbose: bool,

    /// Path to copy from.
    #[arg(value_name = "SOURCE", value_hint = ValueHint::AnyPath)]
    pub source: PathBuf,

    /// Path to copy to.
    #[arg(value_name = "DESTINATION", value_hint = ValueHint::AnyPath)]
    pub destination: PathBuf,

    /// Enable debug logging (equivalent to `--log-level debug`).
    #[arg(
        short = 'd',
        long,
        help = "Enable debug logging (shorthand for --log-level debug)"
    )]
    pub debug: bool,

    /// Set log level. One of: quiet, normal, info, debug.
    #[arg(long, help = "Set log level: quiet, normal, info, debug")]
    pub log_level: Option<String>,

    /// Also append log events to this file.
    #[arg(long, value_hint = ValueHint::FilePath, help = "Append log events to a file")]
    pub log_file: Option<PathBuf>,

    /// Emit logs in structured JSON (includes timestamp, level, and structured fields).
    #[arg(long, help = "Emit logs in structured JSON")]
    pub json: bool,
}

impl Args {
    /// Behavioral flags for the copy engine.
    pub fn options(&self) -> CopyOptions {
        CopyOptions {
            recursive: self.recursive,
            verbose: self.verbose,
        }
    }

    /// The immutable request this invocation describes.
    pub fn to_request(&self) -> CopyRequest {
        CopyRequest::new(&self.source, &self.destination, self.options())
    }

    /// Effective log level derived from flags.
    /// Precedence: --debug > --log-level value > None (use default).
    pub fn effective_log_level(&self) -> Option<LogLevel> {
        if self.debug {
            return Some(LogLevel::Debug);
        }
        self.log_level.as_deref().and_then(LogLevel::parse)
    }
}

pub fn try_parse() -> Result<Args, clap::Error> {
    Args::try_parse()
}

pub fn try_parse_from<I, T>(itr: I) -> Result<Args, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    Args::try_parse_from(itr)
}
