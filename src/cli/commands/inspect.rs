//! XNO inspect command
//!
//! Displays the section layout and decoded contents of a single file.

use std::path::Path;

use crate::formats::xno::XnoFile;

/// Inspect an XNO file and display its structure.
pub fn execute(path: &Path) -> anyhow::Result<()> {
    println!("Inspecting XNO file: {}", path.display());
    println!();

    let file = XnoFile::read(path)?;

    println!("XNO File Information");
    println!("====================");
    println!("Root address: 0x{:08x}", file.info().root_address);
    println!("Sections:     {} (+ info and 3 trailers)", file.info().section_count);
    println!();

    println!("Sections:");
    println!("---------");
    for frame in file.frames() {
        println!(
            "  {} | start 0x{:08x} | {:>8} bytes",
            frame.tag, frame.start, frame.stored_size
        );
    }

    if !file.skipped().is_empty() {
        println!();
        println!("Skipped {} unrecognized section(s):", file.skipped().len());
        for section in file.skipped() {
            println!("  - {} at 0x{:08x}", section.frame.tag, section.frame.start);
        }
    }

    let textures: Vec<_> = file.textures().collect();
    println!();
    println!("Textures ({}):", textures.len());
    for texture in textures {
        println!("  - {} ({} bytes)", texture.name, texture.size_in_bytes);
    }

    println!();
    println!("Objects ({}):", file.objects().len());
    for object in file.objects() {
        println!(
            "  - center ({:.3}, {:.3}, {:.3}) radius {:.3}",
            object.center.x, object.center.y, object.center.z, object.radius
        );
        println!(
            "    {} strip set(s), {} triangles, {} texture(s)",
            object.index_data.len(),
            object.triangle_count(),
            object.texture_count
        );
        for data in &object.index_data {
            println!(
                "      strips: {:>3} | indices: {:>6} | flags: 0x{:08x}",
                data.strip_sizes.len(),
                data.indices.len(),
                data.flags
            );
        }
    }

    Ok(())
}
