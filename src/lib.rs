//! Core library for `blockcp`.
//!
//! Contains the copy policy engine: path classification, single-file and directory-tree
//! copies, and the offset-addressed block copier. The binary is a thin wrapper that parses
//! arguments, sets up logging and maps fatal errors to exit status 1.

pub mod cli;
pub mod config;
pub mod errors;
pub mod fs_ops;
pub mod output;
pub mod platform;

pub use config::{path_has_symlink_ancestor, CopyOptions, CopyRequest, LogLevel};
pub use errors::CopyError;
pub use fs_ops::{
    classify, copy_entry, copy_tree, CopyOutcome, CopyReport, OperationMode, PathState,
    TreeSummary,
};
pub use output::{ConsoleReporter, MemoryReporter, Reporter};
