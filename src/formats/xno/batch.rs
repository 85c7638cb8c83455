//! Batch XNO decoding
//!
//! Discovery and parallel decoding of whole directories of `.xno` files.
//! Each file decodes independently (a decode owns its cursor and its
//! partially built model exclusively), so files are processed with rayon and
//! a failing file is reported and skipped rather than aborting the batch.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use rayon::prelude::*;
use walkdir::WalkDir;

use super::types::XnoFile;

/// Result of a batch decode operation
#[derive(Debug, Clone)]
pub struct BatchDecodeResult {
    /// Number of files decoded successfully
    pub success_count: usize,
    /// Number of files that failed to decode
    pub fail_count: usize,
    /// Messages for each file processed
    pub results: Vec<String>,
}

/// Find all .xno files under a directory
///
/// # Arguments
/// * `dir` - Directory to search
/// * `recursive` - Descend into subdirectories instead of stopping at the top level
///
/// # Returns
/// A sorted list of paths to .xno files.
pub fn find_xno_files<P: AsRef<Path>>(dir: P, recursive: bool) -> Vec<PathBuf> {
    let mut walker = WalkDir::new(dir).follow_links(true);
    if !recursive {
        walker = walker.max_depth(1);
    }

    let mut files: Vec<_> = walker
        .into_iter()
        .filter_map(std::result::Result::ok)
        .filter(|e| {
            e.path().is_file()
                && e.path()
                    .extension()
                    .is_some_and(|ext| ext.eq_ignore_ascii_case("xno"))
        })
        .map(|e| e.path().to_path_buf())
        .collect();

    files.sort();
    files
}

/// Decode XNO files in parallel with per-file skip-and-continue
///
/// # Arguments
/// * `files` - List of XNO files to decode
/// * `progress` - Callback receiving `(current, total, file)` updates
///
/// # Returns
/// Summary of the batch operation; every file gets one result line.
pub fn batch_decode<F>(files: &[PathBuf], progress: F) -> BatchDecodeResult
where
    F: Fn(usize, usize, &str) + Send + Sync,
{
    let success_counter = AtomicUsize::new(0);
    let fail_counter = AtomicUsize::new(0);
    let processed = AtomicUsize::new(0);
    let total = files.len();

    let results: Vec<String> = files
        .par_iter()
        .map(|path| {
            let display_path = path.to_string_lossy();

            let current = processed.fetch_add(1, Ordering::SeqCst) + 1;
            progress(current, total, &display_path);

            match XnoFile::read(path) {
                Ok(file) => {
                    success_counter.fetch_add(1, Ordering::SeqCst);
                    let triangles: usize =
                        file.objects().iter().map(super::XnoObject::triangle_count).sum();
                    format!(
                        "Decoded {display_path}: {} objects, {} textures, {triangles} triangles",
                        file.objects().len(),
                        file.textures().count()
                    )
                }
                Err(e) => {
                    fail_counter.fetch_add(1, Ordering::SeqCst);
                    format!("Failed {display_path}: {e}")
                }
            }
        })
        .collect();

    BatchDecodeResult {
        success_count: success_counter.load(Ordering::SeqCst),
        fail_count: fail_counter.load(Ordering::SeqCst),
        results,
    }
}
