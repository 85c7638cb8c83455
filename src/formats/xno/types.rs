//! Decoded structures for the XNO container.

use std::fmt;

use glam::Vec3;
use serde::{Serialize, Serializer};

use crate::error::{Error, Result};

/// Width of a section's tag plus its stored-size field.
pub const SECTION_HEADER_SIZE: u64 = 8;

/// Byte stride of one texture entry slot in the entry-list table.
pub const TEXTURE_ENTRY_STRIDE: u64 = 20;

/// 4-byte ASCII code identifying a section's type.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct SectionTag(pub [u8; 4]);

impl SectionTag {
    /// File info header, mandatory first section.
    pub const INFO: SectionTag = SectionTag(*b"NXIF");
    /// Texture name table.
    pub const TEXTURE: SectionTag = SectionTag(*b"NXTL");
    /// Effect section.
    pub const EFFECT: SectionTag = SectionTag(*b"NXEF");
    /// Object (mesh geometry) section.
    pub const OBJECT: SectionTag = SectionTag(*b"NXOB");
    /// Bone hierarchy section.
    pub const BONES: SectionTag = SectionTag(*b"NXNN");
    /// Motion (animation) section.
    pub const MOTION: SectionTag = SectionTag(*b"NXMO");
    /// Offset table, mandatory trailer.
    pub const OFFSET: SectionTag = SectionTag(*b"NOF0");
    /// Footer, mandatory trailer.
    pub const FOOTER: SectionTag = SectionTag(*b"NFN0");
    /// End marker, mandatory last section.
    pub const END: SectionTag = SectionTag(*b"NEND");

    pub fn as_bytes(&self) -> &[u8; 4] {
        &self.0
    }
}

impl fmt::Display for SectionTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.escape_ascii())
    }
}

impl fmt::Debug for SectionTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SectionTag(\"{}\")", self.0.escape_ascii())
    }
}

impl Serialize for SectionTag {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// The header fields shared by every section.
///
/// `start` is the stream position of the tag itself. A section always ends at
/// [`SectionFrame::end_position`] no matter how many bytes its decoder
/// consumed; the dispatcher seeks there after every section, which is what
/// makes partially understood sections safe to skip.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct SectionFrame {
    pub tag: SectionTag,
    pub start: u64,
    pub stored_size: u32,
}

impl SectionFrame {
    /// Absolute position one past the section's last byte.
    pub fn end_position(&self) -> u64 {
        self.start + u64::from(self.stored_size) + SECTION_HEADER_SIZE
    }
}

/// Contents of the mandatory `NXIF` section.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct InfoHeader {
    /// Number of tagged sections between the info header and the trailers.
    pub section_count: u32,
    /// Anchor added to every stored relative offset in the rest of the file.
    /// Fixed for the lifetime of one decode.
    pub root_address: u32,
}

impl InfoHeader {
    /// Resolve a stored relative offset into an absolute stream position.
    pub fn resolve(&self, offset: u32) -> Result<u32> {
        offset
            .checked_add(self.root_address)
            .ok_or(Error::AddressOverflow {
                base: self.root_address,
                offset,
            })
    }
}

/// One entry of a texture name table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TextureEntry {
    /// File name of the texture.
    pub name: String,
    /// Size of the texture file.
    pub size_in_bytes: u32,
}

/// A decoded `NXTL` section.
#[derive(Debug, Clone, Serialize)]
pub struct TextureSection {
    pub frame: SectionFrame,
    /// Entries in table order.
    pub entries: Vec<TextureEntry>,
}

/// A `(count, absolute address)` pair locating one of an object's sub-tables.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct PartTable {
    pub count: u32,
    pub address: u32,
}

/// One strip-organized index buffer belonging to an object.
#[derive(Debug, Clone, Serialize)]
pub struct IndexData {
    /// Leading word of the index-part entry, carried uninterpreted.
    pub flags: u32,
    /// Length of each triangle strip, in indices, in buffer order.
    pub strip_sizes: Vec<u16>,
    /// The index buffer; strips are laid out back to back and partitioned by
    /// `strip_sizes`. The sizes always sum to `indices.len()`.
    pub indices: Vec<u16>,
}

impl IndexData {
    /// Iterate over the index buffer one triangle strip at a time.
    pub fn strips(&self) -> impl Iterator<Item = &[u16]> {
        self.strip_sizes.iter().scan(0usize, |offset, &size| {
            let start = *offset;
            *offset += size as usize;
            Some(&self.indices[start..*offset])
        })
    }

    /// Number of triangles across all strips.
    ///
    /// A strip of n indices holds n - 2 triangles; degenerate strips count
    /// zero.
    pub fn triangle_count(&self) -> usize {
        self.strip_sizes
            .iter()
            .map(|&size| (size as usize).saturating_sub(2))
            .sum()
    }
}

/// A decoded `NXOB` section.
#[derive(Debug, Clone, Serialize)]
pub struct XnoObject {
    pub frame: SectionFrame,
    pub flags: u32,
    /// Center of the object's bounding sphere.
    pub center: Vec3,
    /// Radius of the object's bounding sphere.
    pub radius: f32,
    pub material_parts: PartTable,
    pub vertex_parts: PartTable,
    pub index_parts: PartTable,
    pub bone_parts: PartTable,
    pub mesh: PartTable,
    pub texture_count: u32,
    /// One entry per index part, in table order.
    pub index_data: Vec<IndexData>,
}

impl XnoObject {
    /// Total triangle count across all of the object's index buffers.
    pub fn triangle_count(&self) -> usize {
        self.index_data.iter().map(IndexData::triangle_count).sum()
    }
}

/// A section the decoder recognizes but carries no decoded payload for.
///
/// Only the frame is walked; the stored size and tag are retained for
/// inspection.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct MarkerSection {
    pub frame: SectionFrame,
}

/// A well-formed section whose tag the decoder does not recognize.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct SkippedSection {
    pub frame: SectionFrame,
}

/// A fully decoded XNO container.
///
/// Owns every decoded record; holds no reference back into the byte source,
/// so the source can be dropped as soon as decoding returns.
#[derive(Debug, Clone, Serialize)]
pub struct XnoFile {
    pub(crate) info: InfoHeader,
    pub(crate) frames: Vec<SectionFrame>,
    pub(crate) texture_sections: Vec<TextureSection>,
    pub(crate) objects: Vec<XnoObject>,
    pub(crate) effects: Vec<MarkerSection>,
    pub(crate) bones: Vec<MarkerSection>,
    pub(crate) motions: Vec<MarkerSection>,
    pub(crate) skipped: Vec<SkippedSection>,
    pub(crate) offset_table: MarkerSection,
    pub(crate) footer: MarkerSection,
    pub(crate) end: MarkerSection,
}

impl XnoFile {
    pub fn info(&self) -> &InfoHeader {
        &self.info
    }

    /// Every section frame in file order, trailers included.
    pub fn frames(&self) -> &[SectionFrame] {
        &self.frames
    }

    pub fn texture_sections(&self) -> &[TextureSection] {
        &self.texture_sections
    }

    /// All texture entries across all texture sections, in file order.
    pub fn textures(&self) -> impl Iterator<Item = &TextureEntry> {
        self.texture_sections
            .iter()
            .flat_map(|section| section.entries.iter())
    }

    pub fn objects(&self) -> &[XnoObject] {
        &self.objects
    }

    pub fn effects(&self) -> &[MarkerSection] {
        &self.effects
    }

    pub fn bones(&self) -> &[MarkerSection] {
        &self.bones
    }

    pub fn motions(&self) -> &[MarkerSection] {
        &self.motions
    }

    /// Sections skipped through the generic frame-end path.
    pub fn skipped(&self) -> &[SkippedSection] {
        &self.skipped
    }

    pub fn offset_table(&self) -> &MarkerSection {
        &self.offset_table
    }

    pub fn footer(&self) -> &MarkerSection {
        &self.footer
    }

    pub fn end(&self) -> &MarkerSection {
        &self.end
    }
}
