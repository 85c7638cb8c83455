//! Error types for `segann`

use thiserror::Error;

use crate::formats::xno::SectionTag;

/// The error type for `segann` operations.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum Error {
    // ==================== IO Errors ====================
    /// IO error from file operations.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // ==================== Container Structure Errors ====================
    /// A mandatory section did not carry the expected tag.
    #[error("unexpected section tag at offset 0x{position:08x}: expected {expected}, found {found}")]
    UnexpectedTag {
        /// The tag required at this position.
        expected: SectionTag,
        /// The tag actually present in the stream.
        found: SectionTag,
        /// Stream position of the tag.
        position: u64,
    },

    /// A read ran past the end of the byte source.
    #[error("truncated stream: needed {needed} bytes, {available} available")]
    TruncatedStream {
        /// Bytes the read required.
        needed: usize,
        /// Bytes remaining in the source.
        available: usize,
    },

    /// A seek target or resolved address lies outside the byte source.
    #[error("offset 0x{offset:08x} lies outside source of {source_length} bytes")]
    InvalidOffset {
        /// The out-of-range absolute offset.
        offset: u64,
        /// Total length of the byte source.
        source_length: u64,
    },

    /// A null-terminated string ran to the end of the source without a terminator.
    #[error("unterminated string starting at offset 0x{position:08x}")]
    UnterminatedString {
        /// Stream position where the string started.
        position: u64,
    },

    /// Adding a stored relative offset to the root address overflowed.
    #[error("relative address overflow: root 0x{base:08x} + offset 0x{offset:08x}")]
    AddressOverflow {
        /// The root address anchor.
        base: u32,
        /// The stored relative offset.
        offset: u32,
    },

    // ==================== Geometry Errors ====================
    /// The strip-size array does not account for the declared index count.
    #[error("strip sizes sum to {summed_strip_sizes}, expected {declared_index_count} indices")]
    StripSizeMismatch {
        /// Index count declared by the index entry.
        declared_index_count: u32,
        /// Sum of the entry's strip sizes.
        summed_strip_sizes: u64,
    },
}

/// A specialized Result type for `segann` operations.
pub type Result<T> = std::result::Result<T, Error>;
