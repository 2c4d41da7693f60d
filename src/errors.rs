//! Typed error definitions for blockcp.
//! Every variant carries the offending path; `Display` renders only the message half of the
//! `<program> <path>: <message>` diagnostic so reporters can prefix it consistently.

use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CopyError {
    #[error("{source}")]
    SourceUnreadable { path: PathBuf, source: io::Error },

    #[error("is a directory (not copied).")]
    DirectoryNotCopied(PathBuf),

    #[error("Not a directory")]
    NotADirectory(PathBuf),

    #[error("cannot overwrite directory {} with non-directory {}", .path.display(), .source_path.display())]
    CannotOverwriteDirectory { path: PathBuf, source_path: PathBuf },

    #[error("cannot copy a directory into itself, {}", .destination.display())]
    CopyIntoItself { path: PathBuf, destination: PathBuf },

    #[error("Write Error: {source}")]
    Write { path: PathBuf, source: io::Error },

    #[error("{source}")]
    Io { path: PathBuf, source: io::Error },
}

impl CopyError {
    /// Wrap an I/O failure on `path`.
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        CopyError::Io {
            path: path.into(),
            source,
        }
    }

    /// The path the diagnostic is attributed to.
    pub fn path(&self) -> &Path {
        match self {
            CopyError::SourceUnreadable { path, .. }
            | CopyError::CannotOverwriteDirectory { path, .. }
            | CopyError::CopyIntoItself { path, .. }
            | CopyError::Write { path, .. }
            | CopyError::Io { path, .. } => path,
            CopyError::DirectoryNotCopied(path) | CopyError::NotADirectory(path) => path,
        }
    }

    /// Stable short identifier, used as a structured field in logs.
    pub fn code(&self) -> &'static str {
        match self {
            CopyError::SourceUnreadable { .. } => "source_unreadable",
            CopyError::DirectoryNotCopied(_) => "directory_not_copied",
            CopyError::NotADirectory(_) => "not_a_directory",
            CopyError::CannotOverwriteDirectory { .. } => "cannot_overwrite_directory",
            CopyError::CopyIntoItself { .. } => "copy_into_itself",
            CopyError::Write { .. } => "write_error",
            CopyError::Io { .. } => "io_error",
        }
    }

    /// Underlying OS error kind, when there is one.
    pub fn io_kind(&self) -> Option<io::ErrorKind> {
        match self {
            CopyError::SourceUnreadable { source, .. }
            | CopyError::Write { source, .. }
            | CopyError::Io { source, .. } => Some(source.kind()),
            _ => None,
        }
    }
}
