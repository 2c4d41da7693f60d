//! Config module.
//! Provides the runtime option/request types and the path helpers used by logging setup.
//! Everything here is built from command-line flags; there is no config file.

pub mod paths;
pub mod types;

pub use paths::path_has_symlink_ancestor;
pub use types::{CopyOptions, CopyRequest, LogLevel};

/// Transfer chunk used when the filesystem does not report a preferred block size.
pub const DEFAULT_BLOCK_SIZE: usize = 4096;

/// Mode for directories created by a copy (before umask).
pub const DIR_CREATE_MODE: u32 = 0o770;

/// Mode for files created by a copy (before umask).
pub const FILE_CREATE_MODE: u32 = 0o660;
