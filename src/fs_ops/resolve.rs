//! Path classification.
//! - `PathState::query` inspects one path (following symlinks, like stat(2)).
//! - `classify` is the pure decision table over (source, destination, recursive).
//! - `resolve` applies the table to the real filesystem: it opens the source, prepares the
//!   destination (creating or truncating it) and returns a ready-to-run [`Plan`].
//!
//! Notes:
//! - States are never cached; every decision point queries the filesystem again.
//! - A directory source without `recursive` is rejected before the destination is touched.
//! - A regular-file destination is left untouched when the source is a directory.
//! - Copying a directory into itself is refused before a missing destination is created.

use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::config::types::CopyRequest;
use crate::errors::CopyError;
use crate::platform;

/// Filesystem state of a path at the moment it is queried.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathState {
    Missing,
    RegularFile,
    Directory,
    /// Exists but is neither a regular file nor a directory (fifo, socket, device).
    Other,
}

impl PathState {
    /// Stat `path`. Only "not found" maps to `Missing`; other failures are returned.
    pub fn query(path: &Path) -> io::Result<PathState> {
        match fs::metadata(path) {
            Ok(meta) => Ok(Self::from_metadata(&meta)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(PathState::Missing),
            Err(e) => Err(e),
        }
    }

    pub fn from_metadata(meta: &fs::Metadata) -> PathState {
        let ft = meta.file_type();
        if ft.is_dir() {
            PathState::Directory
        } else if ft.is_file() {
            PathState::RegularFile
        } else {
            PathState::Other
        }
    }

    pub fn is_dir(self) -> bool {
        matches!(self, PathState::Directory)
    }

    pub fn exists(self) -> bool {
        !matches!(self, PathState::Missing)
    }
}

/// What kind of copy a request turns into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OperationMode {
    FileToFile,
    FileToDirectory,
    DirectoryToDirectory,
    Invalid(&'static str),
}

pub const REASON_SOURCE_MISSING: &str = "No such file or directory";
pub const REASON_DIRECTORY_NOT_COPIED: &str = "is a directory (not copied).";
pub const REASON_NOT_A_DIRECTORY: &str = "Not a directory";

/// Decision table. A `Missing` destination is classified as whatever the copy will create
/// for it: a directory for a directory source, a file otherwise.
pub fn classify(source: PathState, destination: PathState, recursive: bool) -> OperationMode {
    if !source.exists() {
        return OperationMode::Invalid(REASON_SOURCE_MISSING);
    }
    if source.is_dir() && !recursive {
        return OperationMode::Invalid(REASON_DIRECTORY_NOT_COPIED);
    }
    match (source.is_dir(), destination) {
        (true, PathState::Directory | PathState::Missing) => OperationMode::DirectoryToDirectory,
        (true, _) => OperationMode::Invalid(REASON_NOT_A_DIRECTORY),
        (false, PathState::Directory) => OperationMode::FileToDirectory,
        (false, _) => OperationMode::FileToFile,
    }
}

/// A classified request with its handles opened and destination prepared.
#[derive(Debug)]
pub enum Plan {
    FileToFile {
        source: PathBuf,
        source_file: File,
        destination: PathBuf,
        destination_file: File,
    },
    FileToDirectory {
        source: PathBuf,
        source_file: File,
        destination_dir: PathBuf,
    },
    DirectoryToDirectory {
        source: PathBuf,
        destination: PathBuf,
    },
}

impl Plan {
    pub fn mode(&self) -> OperationMode {
        match self {
            Plan::FileToFile { .. } => OperationMode::FileToFile,
            Plan::FileToDirectory { .. } => OperationMode::FileToDirectory,
            Plan::DirectoryToDirectory { .. } => OperationMode::DirectoryToDirectory,
        }
    }
}

/// Open the source, prepare the destination and classify. Every error returned here is
/// fatal at the top level.
pub fn resolve(request: &CopyRequest) -> Result<Plan, CopyError> {
    let src = request.source();
    let dst = request.destination();
    let recursive = request.options().recursive;

    let unreadable = |e: io::Error| CopyError::SourceUnreadable {
        path: src.to_path_buf(),
        source: e,
    };

    // 1) Source must exist and be openable.
    let src_meta = fs::metadata(src).map_err(unreadable)?;
    let src_state = PathState::from_metadata(&src_meta);
    let source_file = if src_state.is_dir() {
        // 2) Directories need the recursive flag; checked before anything is created.
        if !recursive {
            return Err(CopyError::DirectoryNotCopied(src.to_path_buf()));
        }
        fs::read_dir(src).map_err(unreadable)?;
        None
    } else {
        Some(File::open(src).map_err(unreadable)?)
    };

    // 3) Prepare the destination. Nesting is refused before anything is created.
    let dst_state = PathState::query(dst).map_err(|e| CopyError::io(dst, e))?;
    if src_state.is_dir() && matches!(dst_state, PathState::Missing | PathState::Directory) {
        ensure_not_nested(src, dst)?;
    }
    let mut destination_file = None;
    match dst_state {
        PathState::Missing if src_state.is_dir() => {
            platform::create_dir(dst).map_err(|e| CopyError::io(dst, e))?;
            debug!(path = %dst.display(), "created destination directory");
        }
        PathState::Missing => {
            destination_file =
                Some(platform::create_new_file(dst).map_err(|e| CopyError::io(dst, e))?);
            debug!(path = %dst.display(), "created destination file");
        }
        PathState::Directory => {}
        PathState::RegularFile | PathState::Other if !src_state.is_dir() => {
            destination_file =
                Some(platform::open_truncate(dst).map_err(|e| CopyError::io(dst, e))?);
        }
        PathState::RegularFile | PathState::Other => {}
    }

    // 4) Classify the combination.
    let mode = classify(src_state, dst_state, recursive);
    debug!(
        source = %src.display(),
        dest = %dst.display(),
        ?src_state,
        ?dst_state,
        ?mode,
        "classified copy request"
    );

    match (mode, source_file, destination_file) {
        (OperationMode::DirectoryToDirectory, _, _) => Ok(Plan::DirectoryToDirectory {
            source: src.to_path_buf(),
            destination: dst.to_path_buf(),
        }),
        (OperationMode::FileToDirectory, Some(source_file), _) => Ok(Plan::FileToDirectory {
            source: src.to_path_buf(),
            source_file,
            destination_dir: dst.to_path_buf(),
        }),
        (OperationMode::FileToFile, Some(source_file), Some(destination_file)) => {
            Ok(Plan::FileToFile {
                source: src.to_path_buf(),
                source_file,
                destination: dst.to_path_buf(),
                destination_file,
            })
        }
        (OperationMode::Invalid(REASON_DIRECTORY_NOT_COPIED), _, _) => {
            Err(CopyError::DirectoryNotCopied(src.to_path_buf()))
        }
        (OperationMode::Invalid(REASON_SOURCE_MISSING), _, _) => Err(unreadable(
            io::Error::new(io::ErrorKind::NotFound, REASON_SOURCE_MISSING),
        )),
        _ => Err(CopyError::NotADirectory(dst.to_path_buf())),
    }
}

/// Refuse to walk a source into a destination that lives inside it.
/// `dst` may not exist yet.
fn ensure_not_nested(src: &Path, dst: &Path) -> Result<(), CopyError> {
    let src_real = fs::canonicalize(src).unwrap_or_else(|_| src.to_path_buf());
    let dst_real = canonical_target(dst);
    if dst_real.starts_with(&src_real) {
        return Err(CopyError::CopyIntoItself {
            path: src.to_path_buf(),
            destination: dst.to_path_buf(),
        });
    }
    Ok(())
}

/// Canonical form of `path`, or of its parent joined with its name when `path` is missing.
fn canonical_target(path: &Path) -> PathBuf {
    if let Ok(real) = fs::canonicalize(path) {
        return real;
    }
    match (path.parent(), path.file_name()) {
        (Some(parent), Some(name)) => {
            let parent = if parent.as_os_str().is_empty() {
                Path::new(".")
            } else {
                parent
            };
            fs::canonicalize(parent)
                .map(|p| p.join(name))
                .unwrap_or_else(|_| path.to_path_buf())
        }
        _ => path.to_path_buf(),
    }
}
