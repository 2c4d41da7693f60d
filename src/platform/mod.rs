//! Platform-specific helpers.
//! This module hides OS differences (Unix/Windows) behind a uniform API so
//! the copy engine can remain platform-agnostic.

#[cfg(unix)]
mod unix;
#[cfg(not(unix))]
mod windows;

#[cfg(unix)]
pub use unix::{
    create_dir, create_new_file, open_log_file_secure_append, open_truncate,
    preferred_block_size, read_exact_at, write_all_at,
};

#[cfg(not(unix))]
pub use windows::{
    create_dir, create_new_file, open_log_file_secure_append, open_truncate,
    preferred_block_size, read_exact_at, write_all_at,
};
