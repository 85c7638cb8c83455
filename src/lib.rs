//! # segann
//!
//! A pure-Rust library for decoding Sega NN `.xno` model containers as used
//! by Sonic '06 era asset pipelines.
//!
//! ## Supported content
//!
//! - **Texture tables** - ordered texture names and file sizes
//! - **Objects** - bounding spheres, sub-table locations, and triangle-strip
//!   index buffers
//! - **Bones / Motions / Effects** - section frames, retained for inspection
//!
//! Decoding is read-only and all-or-nothing: a malformed file yields a typed
//! [`Error`] identifying the violated invariant and the byte position, never
//! a partially built model. Writing XNO files is not supported.
//!
//! ## Quick Start
//!
//! ```no_run
//! use segann::formats::xno::XnoFile;
//!
//! let file = XnoFile::read("sonic.xno")?;
//! println!("root address: 0x{:08x}", file.info().root_address);
//!
//! for texture in file.textures() {
//!     println!("{} ({} bytes)", texture.name, texture.size_in_bytes);
//! }
//!
//! for object in file.objects() {
//!     println!("{} triangles in {} strip sets",
//!         object.triangle_count(), object.index_data.len());
//! }
//! # Ok::<(), segann::Error>(())
//! ```
//!
//! ## Feature Flags
//!
//! - `cli` - Enables the `segann` command-line binary

pub mod error;
pub mod formats;

// Re-exports for convenience
pub use error::{Error, Result};

/// Prelude module for common imports
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::formats::xno::{
        batch_decode, find_xno_files, BatchDecodeResult, IndexData, SectionTag, TextureEntry,
        XnoFile, XnoObject,
    };
}

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// CLI module (feature-gated)
#[cfg(feature = "cli")]
pub mod cli;
