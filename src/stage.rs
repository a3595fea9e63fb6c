//! Asset staging: full replacement copy of the site tree.
//!
//! `build` owns the output directory completely. If it exists it is removed
//! first, then the source tree is copied over in one recursive pass — no
//! merge, no diffing, so files left over from a previous build never survive.
//! After a successful run the output is byte-for-byte the source tree as it
//! stood at invocation time.
//!
//! A failure mid-copy (permissions, disk full) aborts immediately and may
//! leave a partially copied output tree; the next successful run replaces it.
//!
//! The `minify` flag is a declared extension point for post-processing copied
//! assets. No transform passes are configured, so it must never change the
//! copied bytes — the summary only records that it was requested.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Site source directory not found: {0}")]
    SourceMissing(PathBuf),
}

/// What a staging run did, for the output layer.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct StageSummary {
    /// Files copied into the output tree.
    pub files: usize,
    /// Directories created under the output root.
    pub dirs: usize,
    /// Whether minification was requested (currently never alters output).
    pub minify: bool,
}

/// Replace `output` with a recursive copy of `source`.
///
/// Errors if `source` does not exist or is not a directory. An existing
/// `output` is removed entirely before copying begins.
pub fn stage(source: &Path, output: &Path, minify: bool) -> Result<StageSummary, StageError> {
    if !source.is_dir() {
        return Err(StageError::SourceMissing(source.to_path_buf()));
    }

    if output.exists() {
        fs::remove_dir_all(output)?;
    }
    fs::create_dir_all(output)?;

    let mut summary = StageSummary {
        minify,
        ..Default::default()
    };
    copy_tree(source, output, &mut summary)?;

    Ok(summary)
}

fn copy_tree(src: &Path, dst: &Path, summary: &mut StageSummary) -> io::Result<()> {
    for entry in fs::read_dir(src)? {
        let entry = entry?;
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());

        if src_path.is_dir() {
            fs::create_dir_all(&dst_path)?;
            summary.dirs += 1;
            copy_tree(&src_path, &dst_path, summary)?;
        } else {
            fs::copy(&src_path, &dst_path)?;
            summary.files += 1;
        }
    }
    Ok(())
}
