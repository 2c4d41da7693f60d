//! Core configuration types.
//! - CopyOptions holds the behavioral flags passed into every copy component.
//! - CopyRequest is the immutable description of one invocation.
//! - LogLevel represents diagnostic-log verbosity with simple parsing helpers.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Program-defined log verbosity exposed on the command line.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LogLevel {
    /// No log events (user diagnostics are still printed)
    #[default]
    Quiet,
    /// Completed transfers and summaries
    Normal,
    /// Per-entry decisions
    Info,
    /// Per-block detail
    Debug,
}

impl LogLevel {
    /// Parse common string names into our LogLevel (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "quiet" | "off" | "none" => Some(LogLevel::Quiet),
            "normal" => Some(LogLevel::Normal),
            "info" | "verbose" | "detailed" => Some(LogLevel::Info),
            "debug" | "trace" => Some(LogLevel::Debug),
            _ => None,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            LogLevel::Quiet => "quiet",
            LogLevel::Normal => "normal",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
        };
        f.write_str(s)
    }
}

impl FromStr for LogLevel {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("invalid log level: '{s}'"))
    }
}

/// Behavioral flags for a copy run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CopyOptions {
    /// Permit directory sources
    pub recursive: bool,
    /// Print `source -> destination` for each file transfer
    pub verbose: bool,
}

/// One copy invocation. Built once from arguments and never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopyRequest {
    source: PathBuf,
    destination: PathBuf,
    options: CopyOptions,
}

impl CopyRequest {
    pub fn new(
        source: impl Into<PathBuf>,
        destination: impl Into<PathBuf>,
        options: CopyOptions,
    ) -> Self {
        Self {
            source: source.into(),
            destination: destination.into(),
            options,
        }
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn destination(&self) -> &Path {
        &self.destination
    }

    pub fn options(&self) -> CopyOptions {
        self.options
    }
}
