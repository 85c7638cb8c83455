//! XNO container reading: section dispatch and the top-level decode driver.
//!
//! Decoding is one synchronous pass: the info header is read first and fixes
//! the root address, then `section_count` tagged sections are dispatched by
//! tag, then the mandatory Offset/Footer/End trailers are checked in order.
//! The first violated invariant aborts the whole decode; no partially built
//! file is ever returned.

use std::path::Path;

use crate::error::{Error, Result};
use super::cursor::Cursor;
use super::object::decode_object;
use super::types::{
    InfoHeader, MarkerSection, SectionFrame, SectionTag, SkippedSection, TextureEntry,
    TextureSection, XnoFile, TEXTURE_ENTRY_STRIDE,
};

impl XnoFile {
    /// Decode an XNO container from a file on disk.
    ///
    /// The file handle is released as soon as the bytes are in memory; the
    /// decode itself runs on the owned buffer.
    pub fn read<P: AsRef<Path>>(path: P) -> Result<Self> {
        let data = std::fs::read(path)?;
        Self::parse(&data)
    }

    /// Decode an XNO container from an in-memory byte source.
    pub fn parse(data: &[u8]) -> Result<Self> {
        let mut cursor = Cursor::new(data);

        let info_frame = expect_frame(&mut cursor, SectionTag::INFO)?;
        let info = InfoHeader {
            section_count: cursor.read_u32()?,
            root_address: cursor.read_u32()?,
        };
        tracing::debug!(
            sections = info.section_count,
            root_address = info.root_address,
            "read info header"
        );
        cursor.seek(info_frame.end_position())?;

        let mut frames = vec![info_frame];
        let mut texture_sections = Vec::new();
        let mut objects = Vec::new();
        let mut effects = Vec::new();
        let mut bones = Vec::new();
        let mut motions = Vec::new();
        let mut skipped = Vec::new();

        for _ in 0..info.section_count {
            let frame = read_frame(&mut cursor)?;
            frames.push(frame);
            tracing::debug!(tag = %frame.tag, start = frame.start, size = frame.stored_size, "section");

            match frame.tag {
                SectionTag::TEXTURE => {
                    texture_sections.push(decode_texture(&mut cursor, &info, frame)?);
                }
                SectionTag::OBJECT => objects.push(decode_object(&mut cursor, &info, frame)?),
                SectionTag::EFFECT => effects.push(MarkerSection { frame }),
                SectionTag::BONES => bones.push(MarkerSection { frame }),
                SectionTag::MOTION => motions.push(MarkerSection { frame }),
                tag => {
                    // Unknown tags are not errors: the frame alone tells us
                    // where the section ends, so the loop stays in sync.
                    tracing::warn!(%tag, start = frame.start, "skipping unrecognized section");
                    skipped.push(SkippedSection { frame });
                }
            }

            // Decoders may under- or over-read their section; only the frame
            // decides where it ends.
            cursor.seek(frame.end_position())?;
        }

        let offset_table = expect_marker(&mut cursor, SectionTag::OFFSET, &mut frames)?;
        let footer = expect_marker(&mut cursor, SectionTag::FOOTER, &mut frames)?;
        let end = expect_marker(&mut cursor, SectionTag::END, &mut frames)?;

        Ok(XnoFile {
            info,
            frames,
            texture_sections,
            objects,
            effects,
            bones,
            motions,
            skipped,
            offset_table,
            footer,
            end,
        })
    }
}

/// Read the generic section header: tag plus stored size.
fn read_frame(cursor: &mut Cursor<'_>) -> Result<SectionFrame> {
    let start = cursor.position();
    let tag = cursor.read_tag()?;
    let stored_size = cursor.read_u32()?;
    Ok(SectionFrame {
        tag,
        start,
        stored_size,
    })
}

/// Read a section header whose tag is mandated by the container layout.
fn expect_frame(cursor: &mut Cursor<'_>, expected: SectionTag) -> Result<SectionFrame> {
    let position = cursor.position();
    let frame = read_frame(cursor)?;
    if frame.tag != expected {
        return Err(Error::UnexpectedTag {
            expected,
            found: frame.tag,
            position,
        });
    }
    Ok(frame)
}

fn expect_marker(
    cursor: &mut Cursor<'_>,
    expected: SectionTag,
    frames: &mut Vec<SectionFrame>,
) -> Result<MarkerSection> {
    let frame = expect_frame(cursor, expected)?;
    frames.push(frame);
    cursor.seek(frame.end_position())?;
    Ok(MarkerSection { frame })
}

/// Decode a `NXTL` texture name table.
///
/// The section body is a relative locator to an entry-list header
/// `{count, list_address}`. Entries sit in a fixed-stride table; the first
/// four bytes of each slot are not interpreted.
fn decode_texture(
    cursor: &mut Cursor<'_>,
    info: &InfoHeader,
    frame: SectionFrame,
) -> Result<TextureSection> {
    let locator = cursor.read_address(info)?;
    cursor.seek(u64::from(locator))?;

    let count = cursor.read_u32()?;
    let list_address = cursor.read_address(info)?;

    cursor.seek(u64::from(list_address))?;
    cursor.ensure_remaining(u64::from(count) * TEXTURE_ENTRY_STRIDE)?;

    let mut entries = Vec::with_capacity(count as usize);
    for index in 0..u64::from(count) {
        cursor.seek(u64::from(list_address) + index * TEXTURE_ENTRY_STRIDE + 4)?;

        let name_address = cursor.read_address(info)?;
        let size_in_bytes = cursor.read_u32()?;

        cursor.seek(u64::from(name_address))?;
        let name = cursor.read_null_terminated_string()?;

        entries.push(TextureEntry {
            name,
            size_in_bytes,
        });
    }

    Ok(TextureSection { frame, entries })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_frame_records_the_tag_position() {
        let mut data = Vec::from(*b"NXEF");
        data.extend_from_slice(&12u32.to_le_bytes());
        let mut cursor = Cursor::new(&data);

        let frame = read_frame(&mut cursor).unwrap();
        assert_eq!(frame.tag, SectionTag::EFFECT);
        assert_eq!(frame.start, 0);
        assert_eq!(frame.stored_size, 12);
        assert_eq!(frame.end_position(), 20);
    }

    #[test]
    fn expect_frame_reports_both_tags_and_position() {
        let mut data = Vec::from(*b"NXMO");
        data.extend_from_slice(&0u32.to_le_bytes());
        let mut cursor = Cursor::new(&data);

        let err = expect_frame(&mut cursor, SectionTag::OFFSET).unwrap_err();
        match err {
            Error::UnexpectedTag {
                expected,
                found,
                position,
            } => {
                assert_eq!(expected, SectionTag::OFFSET);
                assert_eq!(found, SectionTag::MOTION);
                assert_eq!(position, 0);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
