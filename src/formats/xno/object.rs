//! `NXOB` object section decoding.
//!
//! An object section stores one relative address to its body plus a flag
//! word. The body holds the bounding sphere, five `(count, address)` pairs
//! locating the material/vertex/index/bone/mesh sub-tables, and a trailing
//! texture count. Of the sub-tables, only the index parts are decoded into
//! strip-organized index buffers; the others are retained as locations.

use crate::error::{Error, Result};
use super::cursor::Cursor;
use super::types::{IndexData, InfoHeader, PartTable, SectionFrame, XnoObject};

/// Decode an object section. The cursor sits just past the section header;
/// the dispatcher restores it to the frame end afterwards.
pub(super) fn decode_object(
    cursor: &mut Cursor<'_>,
    info: &InfoHeader,
    frame: SectionFrame,
) -> Result<XnoObject> {
    let body_address = cursor.read_address(info)?;
    let flags = cursor.read_u32()?;

    cursor.seek(u64::from(body_address))?;

    let center = cursor.read_vector3()?;
    let radius = cursor.read_f32()?;

    let material_parts = read_part_table(cursor, info)?;
    let vertex_parts = read_part_table(cursor, info)?;
    let index_parts = read_part_table(cursor, info)?;
    let bone_parts = read_part_table(cursor, info)?;
    let mesh = read_part_table(cursor, info)?;

    let texture_count = cursor.read_u32()?;

    let index_data = decode_index_parts(cursor, info, index_parts)?;

    Ok(XnoObject {
        frame,
        flags,
        center,
        radius,
        material_parts,
        vertex_parts,
        index_parts,
        bone_parts,
        mesh,
        texture_count,
        index_data,
    })
}

fn read_part_table(cursor: &mut Cursor<'_>, info: &InfoHeader) -> Result<PartTable> {
    let count = cursor.read_u32()?;
    let address = cursor.read_address(info)?;
    Ok(PartTable { count, address })
}

/// Entry of the index-part table: a leading word kept as the strip set's
/// flags, and the address of the entry's index header.
struct IndexEntry {
    flags: u32,
    address: u32,
}

fn decode_index_parts(
    cursor: &mut Cursor<'_>,
    info: &InfoHeader,
    table: PartTable,
) -> Result<Vec<IndexData>> {
    cursor.seek(u64::from(table.address))?;
    cursor.ensure_remaining(u64::from(table.count) * 8)?;

    let mut entries = Vec::with_capacity(table.count as usize);
    for _ in 0..table.count {
        let flags = cursor.read_u32()?;
        let address = cursor.read_address(info)?;
        entries.push(IndexEntry { flags, address });
    }

    entries
        .into_iter()
        .map(|entry| decode_index_entry(cursor, info, &entry))
        .collect()
}

fn decode_index_entry(
    cursor: &mut Cursor<'_>,
    info: &InfoHeader,
    entry: &IndexEntry,
) -> Result<IndexData> {
    cursor.seek(u64::from(entry.address))?;

    let index_count = cursor.read_u32()?;
    let morph_count = cursor.read_u32()?;
    let morph_address = cursor.read_address(info)?;
    let index_address = cursor.read_address(info)?;

    cursor.seek(u64::from(morph_address))?;
    cursor.ensure_remaining(u64::from(morph_count) * 2)?;

    let mut strip_sizes = Vec::with_capacity(morph_count as usize);
    for _ in 0..morph_count {
        strip_sizes.push(cursor.read_u16()?);
    }

    // The strip sizes must account for the whole declared buffer, otherwise
    // partitioning below would silently drop or over-read indices.
    let summed: u64 = strip_sizes.iter().map(|&size| u64::from(size)).sum();
    if summed != u64::from(index_count) {
        return Err(Error::StripSizeMismatch {
            declared_index_count: index_count,
            summed_strip_sizes: summed,
        });
    }

    cursor.seek(u64::from(index_address))?;
    cursor.ensure_remaining(u64::from(index_count) * 2)?;

    let mut indices = Vec::with_capacity(index_count as usize);
    for _ in 0..index_count {
        indices.push(cursor.read_u16()?);
    }

    Ok(IndexData {
        flags: entry.flags,
        strip_sizes,
        indices,
    })
}
