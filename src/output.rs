//! User-facing output.
//!
//! Copy components never print directly: they hand diagnostics and transfer notices to a
//! [`Reporter`]. The binary uses [`ConsoleReporter`]; tests use [`MemoryReporter`] to capture
//! what would have been printed.

use owo_colors::OwoColorize;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::errors::CopyError;

/// Sink for diagnostics and verbose transfer notices.
pub trait Reporter {
    /// Report a failure attributed to `err.path()`.
    fn error(&mut self, err: &CopyError);

    /// Announce a file transfer (only called in verbose mode).
    fn transfer(&mut self, source: &Path, destination: &Path);
}

/// Print a warning about the run itself (not about a copied path) to stderr.
pub fn print_warn(msg: &str) {
    if atty::is(atty::Stream::Stderr) {
        eprintln!("{} {}", "warn:".yellow().bold(), msg);
    } else {
        eprintln!("warn: {}", msg);
    }
}

/// Render a diagnostic as `<program> <path>: <message>`.
pub fn format_diagnostic(program: &str, err: &CopyError) -> String {
    format!("{} {}: {}", program, err.path().display(), err)
}

/// Render a verbose notice as `<source> -> <destination>`.
pub fn format_transfer(source: &Path, destination: &Path) -> String {
    format!("{} -> {}", source.display(), destination.display())
}

/// Writes diagnostics to stderr and transfer notices to stdout.
/// The program prefix is colored only when stderr is a TTY.
pub struct ConsoleReporter {
    program: String,
    color: bool,
}

impl ConsoleReporter {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            color: atty::is(atty::Stream::Stderr),
        }
    }

    /// Name the reporter after argv[0], as the diagnostics of classic tools do.
    pub fn from_env() -> Self {
        let program = std::env::args_os()
            .next()
            .map(|a| a.to_string_lossy().into_owned())
            .unwrap_or_else(|| env!("CARGO_PKG_NAME").to_string());
        Self::new(program)
    }

    pub fn program(&self) -> &str {
        &self.program
    }
}

impl Reporter for ConsoleReporter {
    fn error(&mut self, err: &CopyError) {
        let line = if self.color {
            format_diagnostic(&self.program.red().bold().to_string(), err)
        } else {
            format_diagnostic(&self.program, err)
        };
        let _ = writeln!(io::stderr().lock(), "{line}");
    }

    fn transfer(&mut self, source: &Path, destination: &Path) {
        let _ = writeln!(io::stdout().lock(), "{}", format_transfer(source, destination));
    }
}

/// Captures reports in memory.
#[derive(Debug, Default)]
pub struct MemoryReporter {
    /// Rendered diagnostics, in report order
    pub errors: Vec<String>,
    /// Error codes, parallel to `errors`
    pub codes: Vec<&'static str>,
    /// Announced transfers, in report order
    pub transfers: Vec<(PathBuf, PathBuf)>,
}

impl MemoryReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// True if any captured diagnostic contains `needle`.
    pub fn has_error_containing(&self, needle: &str) -> bool {
        self.errors.iter().any(|e| e.contains(needle))
    }
}

impl Reporter for MemoryReporter {
    fn error(&mut self, err: &CopyError) {
        self.errors.push(format_diagnostic("blockcp", err));
        self.codes.push(err.code());
    }

    fn transfer(&mut self, source: &Path, destination: &Path) {
        self.transfers
            .push((source.to_path_buf(), destination.to_path_buf()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn diagnostic_has_program_path_and_message() {
        let err = CopyError::NotADirectory(PathBuf::from("/tmp/out"));
        assert_eq!(
            format_diagnostic("blockcp", &err),
            "blockcp /tmp/out: Not a directory"
        );
    }

    #[test]
    fn transfer_line_uses_arrow() {
        assert_eq!(
            format_transfer(Path::new("a/b.txt"), Path::new("c/b.txt")),
            "a/b.txt -> c/b.txt"
        );
    }

    #[test]
    fn memory_reporter_captures_in_order() {
        let mut r = MemoryReporter::new();
        r.transfer(Path::new("x"), Path::new("y"));
        r.error(&CopyError::DirectoryNotCopied(PathBuf::from("d")));
        assert_eq!(r.transfers, vec![(PathBuf::from("x"), PathBuf::from("y"))]);
        assert_eq!(r.codes, vec!["directory_not_copied"]);
        assert!(r.has_error_containing("d: is a directory (not copied)."));
    }
}
