//! XNO extract command
//!
//! Decodes a file and serializes the full model to JSON.

use std::path::Path;

use crate::formats::xno::XnoFile;

/// Extract the decoded model to JSON.
pub fn execute(path: &Path, output: &Path) -> anyhow::Result<()> {
    println!("Extracting XNO model to JSON: {}", path.display());

    let file = XnoFile::read(path)?;
    let json = serde_json::to_string_pretty(&file)?;
    std::fs::write(output, json)?;

    println!("Written to: {}", output.display());
    Ok(())
}
