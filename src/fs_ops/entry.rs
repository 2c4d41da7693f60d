//! Top-level dispatcher.
//! Resolves the request into a plan and runs it. Errors returned from here are fatal;
//! per-entry problems inside a tree copy are reported and folded into the summary instead.

use std::path::PathBuf;
use tracing::debug;

use crate::config::types::CopyRequest;
use crate::errors::CopyError;
use crate::output::Reporter;

use super::dir_copy::{copy_tree, TreeSummary};
use super::file_copy::{copy_file_contents, copy_file_to_dir};
use super::io_copy::BlockStats;
use super::resolve::{resolve, Plan};

/// What a completed top-level copy did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CopyReport {
    File {
        destination: PathBuf,
        stats: BlockStats,
    },
    Tree {
        destination: PathBuf,
        summary: TreeSummary,
    },
}

/// Run one copy request end to end.
pub fn copy_entry(
    request: &CopyRequest,
    reporter: &mut dyn Reporter,
) -> Result<CopyReport, CopyError> {
    let options = request.options();
    let plan = resolve(request)?;
    debug!(mode = ?plan.mode(), "dispatch copy_entry");

    match plan {
        Plan::FileToFile {
            source,
            source_file,
            destination,
            destination_file,
        } => {
            let stats = copy_file_contents(
                options,
                &source,
                &source_file,
                &destination,
                &destination_file,
                reporter,
            )?;
            Ok(CopyReport::File { destination, stats })
        }
        Plan::FileToDirectory {
            source,
            source_file,
            destination_dir,
        } => {
            let (destination, stats) =
                copy_file_to_dir(options, &source, &source_file, &destination_dir, reporter)?;
            Ok(CopyReport::File { destination, stats })
        }
        Plan::DirectoryToDirectory {
            source,
            destination,
        } => {
            let summary = copy_tree(options, &source, &destination, reporter);
            Ok(CopyReport::Tree {
                destination,
                summary,
            })
        }
    }
}
