//! Offset-addressed block copy.
//!
//! Features:
//! - Transfers `size` bytes chunk by chunk at absolute offsets (no shared cursor state).
//! - Chunk size follows the source filesystem's preferred block size (4 KiB fallback).
//! - An unreadable chunk is skipped silently, leaving a zero-filled hole in the destination.
//! - A failed write is reported with the destination path; the remaining chunks still run.
//!
//! A regular-file destination is sized to `size` before the first chunk so holes anywhere in
//! the file, including the tail, read back as zeros and the final length matches the source.
//! Device destinations are written as-is.

use std::fs::File;
use std::io;
use std::path::Path;
use tracing::{debug, trace};

use crate::config::DEFAULT_BLOCK_SIZE;
use crate::errors::CopyError;
use crate::output::Reporter;
use crate::platform;

/// Readable by absolute offset.
pub trait BlockSource {
    /// Fill `buf` completely from `offset`; anything short of that is an error.
    fn read_block_at(&self, buf: &mut [u8], offset: u64) -> io::Result<()>;
}

/// Writable by absolute offset.
pub trait BlockSink {
    fn write_block_at(&self, buf: &[u8], offset: u64) -> io::Result<()>;
    fn set_len(&self, size: u64) -> io::Result<()>;
}

impl BlockSource for File {
    fn read_block_at(&self, buf: &mut [u8], offset: u64) -> io::Result<()> {
        platform::read_exact_at(self, buf, offset)
    }
}

impl BlockSink for File {
    fn write_block_at(&self, buf: &[u8], offset: u64) -> io::Result<()> {
        platform::write_all_at(self, buf, offset)
    }

    /// Only regular files are resized; devices and fifos reject ftruncate.
    fn set_len(&self, size: u64) -> io::Result<()> {
        if self.metadata()?.is_file() {
            File::set_len(self, size)
        } else {
            Ok(())
        }
    }
}

/// Counters for one block copy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BlockStats {
    /// Bytes successfully written to the destination.
    pub bytes_written: u64,
    /// Chunks attempted.
    pub chunks: u64,
    /// Chunks whose read failed and were left as holes.
    pub holes: u64,
    /// Chunks whose write failed (each one reported).
    pub write_errors: u64,
    /// Chunk size used.
    pub block_size: usize,
}

/// Preferred transfer size for a file at `src`, falling back to [`DEFAULT_BLOCK_SIZE`].
pub fn block_size_for(src: &Path) -> usize {
    match platform::preferred_block_size(src) {
        Ok(n) if n > 0 => n,
        Ok(_) => DEFAULT_BLOCK_SIZE,
        Err(e) => {
            debug!(path = %src.display(), error = %e, "block size unavailable; using default");
            DEFAULT_BLOCK_SIZE
        }
    }
}

/// Copy `size` bytes from `src` to `dst` in `block_size` chunks.
/// Never fails as a whole: read errors become holes, write errors are reported against
/// `dst_path` through `reporter`.
pub fn copy_blocks<S, D>(
    src: &S,
    dst: &D,
    size: u64,
    block_size: usize,
    dst_path: &Path,
    reporter: &mut dyn Reporter,
) -> BlockStats
where
    S: BlockSource + ?Sized,
    D: BlockSink + ?Sized,
{
    let block_size = if block_size == 0 {
        DEFAULT_BLOCK_SIZE
    } else {
        block_size
    };
    let mut stats = BlockStats {
        block_size,
        ..BlockStats::default()
    };
    if size == 0 {
        return stats;
    }

    if let Err(e) = dst.set_len(size) {
        reporter.error(&CopyError::Write {
            path: dst_path.to_path_buf(),
            source: e,
        });
    }

    let mut buf = vec![0u8; size.min(block_size as u64) as usize];
    let mut offset: u64 = 0;
    while offset < size {
        let len = (size - offset).min(block_size as u64) as usize;
        let chunk = &mut buf[..len];
        stats.chunks += 1;

        match src.read_block_at(chunk, offset) {
            Err(e) => {
                // Unreadable region: leave the hole, keep going.
                trace!(offset, len, error = %e, "read failed; leaving hole");
                stats.holes += 1;
            }
            Ok(()) => match dst.write_block_at(chunk, offset) {
                Ok(()) => stats.bytes_written += len as u64,
                Err(e) => {
                    stats.write_errors += 1;
                    reporter.error(&CopyError::Write {
                        path: dst_path.to_path_buf(),
                        source: e,
                    });
                }
            },
        }
        offset += len as u64;
    }

    debug!(
        dest = %dst_path.display(),
        size,
        block_size,
        chunks = stats.chunks,
        holes = stats.holes,
        write_errors = stats.write_errors,
        "block copy finished"
    );
    stats
}
