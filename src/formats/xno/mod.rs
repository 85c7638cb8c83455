//! Sega NN `.xno` model container decoding.
//!
//! An XNO file is a sequence of tagged sections, little-endian throughout:
//!
//! ```text
//! [4 bytes]  tag (ASCII: NXIF, NXTL, NXEF, NXOB, NXNN, NXMO, NOF0, NFN0, NEND)
//! [4 bytes]  stored size — the section ends at tag_position + stored_size + 8
//! [...]      section payload
//! ```
//!
//! The mandatory first section `NXIF` carries the section count and the root
//! address: the single anchor added to every relative offset stored later in
//! the file. `NOF0`, `NFN0` and `NEND` close the file in that fixed order.
//! All decoded records copy their data out of the source buffer.

pub mod batch;
pub mod cursor;
pub mod reader;
pub mod types;

mod object;

// Public API exports
pub use batch::{batch_decode, find_xno_files, BatchDecodeResult};
pub use cursor::Cursor;
pub use types::{
    IndexData, InfoHeader, MarkerSection, PartTable, SectionFrame, SectionTag, SkippedSection,
    TextureEntry, TextureSection, XnoFile, XnoObject,
};
