//! Recursive directory copy.
//! Walks the source depth-first and mirrors every entry under the destination root.
//!
//! Each visited entry produces a [`Step`]: the per-entry [`CopyOutcome`] plus a
//! [`WalkControl`] telling the driver whether to keep descending. Failures are isolated:
//! a bad file is reported and skipped, a directory that cannot be created on the
//! destination side is reported once and its whole source subtree is left out.

use std::fs::File;
use std::io;
use std::path::Path;
use tracing::{debug, info};
use walkdir::{DirEntry, WalkDir};

use crate::config::types::CopyOptions;
use crate::errors::CopyError;
use crate::output::Reporter;
use crate::platform;

use super::file_copy::{copy_file_contents, open_destination_file};
use super::resolve::PathState;

/// Result of visiting one entry.
#[derive(Debug)]
pub enum CopyOutcome {
    Copied,
    Skipped(String),
    Failed(CopyError),
}

/// Whether the walk should descend below the visited entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WalkControl {
    Continue,
    SkipSubtree,
}

#[derive(Debug)]
pub struct Step {
    pub outcome: CopyOutcome,
    pub control: WalkControl,
}

impl Step {
    fn copied() -> Self {
        Step {
            outcome: CopyOutcome::Copied,
            control: WalkControl::Continue,
        }
    }

    fn failed(err: CopyError) -> Self {
        Step {
            outcome: CopyOutcome::Failed(err),
            control: WalkControl::Continue,
        }
    }

    fn skip_subtree(err: CopyError) -> Self {
        Step {
            outcome: CopyOutcome::Failed(err),
            control: WalkControl::SkipSubtree,
        }
    }
}

/// Aggregate counts for one tree copy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TreeSummary {
    /// Files transferred plus directories created or merged.
    pub copied: usize,
    pub skipped: usize,
    pub failed: usize,
    pub subtrees_skipped: usize,
}

/// Mirror the contents of `src_dir` under `dst_dir` (which must already exist).
/// Never fails as a whole; every problem is reported through `reporter` and counted.
pub fn copy_tree(
    options: CopyOptions,
    src_dir: &Path,
    dst_dir: &Path,
    reporter: &mut dyn Reporter,
) -> TreeSummary {
    let mut summary = TreeSummary::default();
    let mut walker = WalkDir::new(src_dir).sort_by_file_name().into_iter();

    while let Some(next) = walker.next() {
        let entry = match next {
            Ok(entry) => entry,
            Err(err) => {
                let path = err
                    .path()
                    .map(Path::to_path_buf)
                    .unwrap_or_else(|| src_dir.to_path_buf());
                let source = err
                    .into_io_error()
                    .unwrap_or_else(|| io::Error::other("filesystem loop detected"));
                reporter.error(&CopyError::io(path, source));
                summary.failed += 1;
                continue;
            }
        };

        let step = visit(options, src_dir, dst_dir, &entry, reporter);
        match step.outcome {
            CopyOutcome::Copied => summary.copied += 1,
            CopyOutcome::Skipped(reason) => {
                debug!(path = %entry.path().display(), %reason, "skipped entry");
                summary.skipped += 1;
            }
            CopyOutcome::Failed(err) => {
                debug!(code = err.code(), path = %err.path().display(), "entry failed");
                reporter.error(&err);
                summary.failed += 1;
            }
        }
        if step.control == WalkControl::SkipSubtree {
            walker.skip_current_dir();
            summary.subtrees_skipped += 1;
        }
    }

    info!(
        src = %src_dir.display(),
        dest = %dst_dir.display(),
        copied = summary.copied,
        skipped = summary.skipped,
        failed = summary.failed,
        subtrees_skipped = summary.subtrees_skipped,
        "tree copy finished"
    );
    summary
}

/// Decide and perform the copy for one walked entry.
pub fn visit(
    options: CopyOptions,
    src_dir: &Path,
    dst_dir: &Path,
    entry: &DirEntry,
    reporter: &mut dyn Reporter,
) -> Step {
    let src_path = entry.path();
    let rel = src_path.strip_prefix(src_dir).unwrap_or(Path::new(""));
    let dst_path = if rel.as_os_str().is_empty() {
        dst_dir.to_path_buf()
    } else {
        dst_dir.join(rel)
    };

    let ft = entry.file_type();
    if ft.is_dir() {
        visit_dir(&dst_path)
    } else if ft.is_file() {
        visit_file(options, src_path, &dst_path, reporter)
    } else {
        Step {
            outcome: CopyOutcome::Skipped("not a regular file".to_string()),
            control: WalkControl::Continue,
        }
    }
}

fn visit_dir(dst_path: &Path) -> Step {
    match PathState::query(dst_path) {
        Err(e) => Step::skip_subtree(CopyError::io(dst_path, e)),
        Ok(PathState::Missing) => match platform::create_dir(dst_path) {
            Ok(()) => {
                debug!(path = %dst_path.display(), "created directory");
                Step::copied()
            }
            Err(e) => Step::skip_subtree(CopyError::io(dst_path, e)),
        },
        Ok(PathState::Directory) => Step::copied(),
        Ok(PathState::RegularFile | PathState::Other) => {
            Step::skip_subtree(CopyError::NotADirectory(dst_path.to_path_buf()))
        }
    }
}

fn visit_file(
    options: CopyOptions,
    src_path: &Path,
    dst_path: &Path,
    reporter: &mut dyn Reporter,
) -> Step {
    let src_file = match File::open(src_path) {
        Ok(f) => f,
        Err(e) => return Step::failed(CopyError::io(src_path, e)),
    };
    let dst_file = match open_destination_file(dst_path, src_path) {
        Ok(f) => f,
        Err(e) => return Step::failed(e),
    };
    match copy_file_contents(options, src_path, &src_file, dst_path, &dst_file, reporter) {
        Ok(_) => Step::copied(),
        Err(e) => Step::failed(e),
    }
}
