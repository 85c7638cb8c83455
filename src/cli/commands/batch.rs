//! XNO batch command
//!
//! Decodes every .xno file under a directory in parallel, reporting failures
//! per file instead of aborting the run.

use std::path::Path;
use std::time::Instant;

use crate::cli::progress::{print_done, print_step, simple_bar, CUBE, LOOKING_GLASS};
use crate::formats::xno::{batch_decode, find_xno_files};

/// Batch decode a directory of XNO files.
pub fn execute(source: &Path, recursive: bool, quiet: bool) -> anyhow::Result<()> {
    let started = Instant::now();

    print_step(1, 2, LOOKING_GLASS, "Scanning for XNO files...");
    let files = find_xno_files(source, recursive);

    if files.is_empty() {
        println!("No .xno files found in {}", source.display());
        return Ok(());
    }

    print_step(2, 2, CUBE, &format!("Decoding {} file(s)...", files.len()));

    let result = if quiet {
        batch_decode(&files, |_, _, _| {})
    } else {
        let pb = simple_bar(files.len() as u64, "Decoding");
        let result = batch_decode(&files, |_, _, file| {
            pb.set_message(file.to_string());
            pb.inc(1);
        });
        pb.finish_and_clear();
        result
    };

    for line in &result.results {
        println!("  {line}");
    }

    println!();
    println!(
        "Decoded {} of {} file(s), {} failed",
        result.success_count,
        files.len(),
        result.fail_count
    );
    print_done(started.elapsed());

    Ok(())
}
