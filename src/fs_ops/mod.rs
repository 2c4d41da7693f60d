//! Filesystem operations: path classification, single-file copy, tree copy and the
//! offset-addressed block copier they share.

mod dir_copy;
mod entry;
mod file_copy;
mod io_copy;
mod resolve;

pub use dir_copy::{copy_tree, visit, CopyOutcome, Step, TreeSummary, WalkControl};
pub use entry::{copy_entry, CopyReport};
pub use file_copy::{copy_file_contents, copy_file_to_dir, open_destination_file};
pub use io_copy::{block_size_for, copy_blocks, BlockSink, BlockSource, BlockStats};
pub use resolve::{
    classify, resolve, OperationMode, PathState, Plan, REASON_DIRECTORY_NOT_COPIED,
    REASON_NOT_A_DIRECTORY, REASON_SOURCE_MISSING,
};
