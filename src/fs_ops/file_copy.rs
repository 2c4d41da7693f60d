//! Single-file copy.
//! Opens (or creates) one destination file and hands both handles to the block copier.
//! Handles are owned by the caller or by the function that opened them, so they are closed
//! on every exit path.

use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::config::types::CopyOptions;
use crate::errors::CopyError;
use crate::output::Reporter;
use crate::platform;

use super::io_copy::{block_size_for, copy_blocks, BlockStats};
use super::resolve::PathState;

/// Copy the contents of an open source into an open destination.
/// Fails only if the source cannot be stat'ed; block-level problems are handled by the
/// block copier.
pub fn copy_file_contents(
    options: CopyOptions,
    src_path: &Path,
    src_file: &File,
    dst_path: &Path,
    dst_file: &File,
    reporter: &mut dyn Reporter,
) -> Result<BlockStats, CopyError> {
    if options.verbose {
        reporter.transfer(src_path, dst_path);
    }
    let size = src_file
        .metadata()
        .map_err(|e| CopyError::io(src_path, e))?
        .len();
    let block_size = block_size_for(src_path);
    let stats = copy_blocks(src_file, dst_file, size, block_size, dst_path, reporter);
    info!(
        src = %src_path.display(),
        dest = %dst_path.display(),
        bytes = stats.bytes_written,
        holes = stats.holes,
        "copied file"
    );
    Ok(stats)
}

/// Open the destination for one incoming regular file.
/// - missing: created exclusively (a racing creator yields `AlreadyExists`)
/// - directory: refused, a directory is never overwritten by a file
/// - anything else: opened with truncation
pub fn open_destination_file(dst_path: &Path, src_path: &Path) -> Result<File, CopyError> {
    match PathState::query(dst_path).map_err(|e| CopyError::io(dst_path, e))? {
        PathState::Missing => {
            platform::create_new_file(dst_path).map_err(|e| CopyError::io(dst_path, e))
        }
        PathState::Directory => Err(CopyError::CannotOverwriteDirectory {
            path: dst_path.to_path_buf(),
            source_path: src_path.to_path_buf(),
        }),
        PathState::RegularFile | PathState::Other => {
            platform::open_truncate(dst_path).map_err(|e| CopyError::io(dst_path, e))
        }
    }
}

/// Copy an open source file into `dst_dir/<basename(src_path)>`.
/// Returns the path written.
pub fn copy_file_to_dir(
    options: CopyOptions,
    src_path: &Path,
    src_file: &File,
    dst_dir: &Path,
    reporter: &mut dyn Reporter,
) -> Result<(PathBuf, BlockStats), CopyError> {
    let name = src_path.file_name().ok_or_else(|| {
        CopyError::io(
            src_path,
            io::Error::new(io::ErrorKind::InvalidInput, "source has no file name"),
        )
    })?;
    let dst_path = dst_dir.join(name);
    let dst_file = open_destination_file(&dst_path, src_path)?;
    let stats = copy_file_contents(options, src_path, src_file, &dst_path, &dst_file, reporter)?;
    Ok((dst_path, stats))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::MemoryReporter;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn copy_into_dir_uses_basename_and_overwrites() {
        let td = tempdir().unwrap();
        let src = td.path().join("note.txt");
        let dir = td.path().join("box");
        fs::create_dir(&dir).unwrap();
        fs::write(&src, b"first version, longer").unwrap();

        let mut rep = MemoryReporter::new();
        let opts = CopyOptions::default();
        let f = File::open(&src).unwrap();
        let (out, _) = copy_file_to_dir(opts, &src, &f, &dir, &mut rep).unwrap();
        assert_eq!(out, dir.join("note.txt"));

        fs::write(&src, b"second").unwrap();
        let f = File::open(&src).unwrap();
        copy_file_to_dir(opts, &src, &f, &dir, &mut rep).unwrap();
        assert_eq!(fs::read(dir.join("note.txt")).unwrap(), b"second");
        assert!(rep.errors.is_empty());
    }

    #[test]
    fn directory_in_the_way_is_refused() {
        let td = tempdir().unwrap();
        let src = td.path().join("a");
        fs::write(&src, b"x").unwrap();
        let dir = td.path().join("d");
        fs::create_dir_all(dir.join("a")).unwrap();

        let err = open_destination_file(&dir.join("a"), &src).unwrap_err();
        assert_eq!(err.code(), "cannot_overwrite_directory");
    }

    #[test]
    fn verbose_announces_transfer_before_copy() {
        let td = tempdir().unwrap();
        let src = td.path().join("s");
        let dst = td.path().join("t");
        fs::write(&src, b"abc").unwrap();
        let sf = File::open(&src).unwrap();
        let df = open_destination_file(&dst, &src).unwrap();
        let mut rep = MemoryReporter::new();
        let opts = CopyOptions {
            verbose: true,
            ..CopyOptions::default()
        };
        copy_file_contents(opts, &src, &sf, &dst, &df, &mut rep).unwrap();
        assert_eq!(rep.transfers, vec![(src.clone(), dst.clone())]);
        assert_eq!(fs::read(&dst).unwrap(), b"abc");
    }
}
