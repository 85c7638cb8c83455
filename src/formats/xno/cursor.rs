//! Bounds-checked little-endian cursor over an in-memory byte source.
//!
//! Every section decoder threads one [`Cursor`] through its reads, so stream
//! position changes are visible effects of cursor calls rather than hidden
//! state. Reads that would run past the end of the source fail with
//! [`Error::TruncatedStream`] instead of panicking.

use byteorder::{ByteOrder, LittleEndian};
use glam::Vec3;

use crate::error::{Error, Result};
use super::types::{InfoHeader, SectionTag};

/// Sequential reader over a finite byte slice.
pub struct Cursor<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Total length of the underlying source.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Current absolute position.
    pub fn position(&self) -> u64 {
        self.pos as u64
    }

    /// Bytes left between the current position and the end of the source.
    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    /// Move to an absolute position. The end of the source is a valid target.
    pub fn seek(&mut self, position: u64) -> Result<()> {
        if position > self.data.len() as u64 {
            return Err(Error::InvalidOffset {
                offset: position,
                source_length: self.data.len() as u64,
            });
        }
        self.pos = position as usize;
        Ok(())
    }

    /// Check that `needed` bytes remain, for validating a counted bulk read
    /// before its buffer is allocated.
    pub(crate) fn ensure_remaining(&self, needed: u64) -> Result<()> {
        if (self.remaining() as u64) < needed {
            return Err(Error::TruncatedStream {
                needed: needed as usize,
                available: self.remaining(),
            });
        }
        Ok(())
    }

    /// Consume `count` bytes and return them as a slice.
    fn take(&mut self, count: usize) -> Result<&'a [u8]> {
        if self.remaining() < count {
            return Err(Error::TruncatedStream {
                needed: count,
                available: self.remaining(),
            });
        }
        let bytes = &self.data[self.pos..self.pos + count];
        self.pos += count;
        Ok(bytes)
    }

    pub fn read_u16(&mut self) -> Result<u16> {
        Ok(LittleEndian::read_u16(self.take(2)?))
    }

    pub fn read_u32(&mut self) -> Result<u32> {
        Ok(LittleEndian::read_u32(self.take(4)?))
    }

    pub fn read_f32(&mut self) -> Result<f32> {
        Ok(LittleEndian::read_f32(self.take(4)?))
    }

    /// Read three consecutive f32 components.
    pub fn read_vector3(&mut self) -> Result<Vec3> {
        let x = self.read_f32()?;
        let y = self.read_f32()?;
        let z = self.read_f32()?;
        Ok(Vec3::new(x, y, z))
    }

    /// Read a 4-byte section tag.
    pub fn read_tag(&mut self) -> Result<SectionTag> {
        let bytes = self.take(4)?;
        Ok(SectionTag([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    /// Read a stored relative offset and resolve it against the root address.
    ///
    /// Resolution happens exactly here; everything downstream works with the
    /// absolute address.
    pub fn read_address(&mut self, info: &InfoHeader) -> Result<u32> {
        let offset = self.read_u32()?;
        info.resolve(offset)
    }

    /// Read bytes up to (and consuming) a null terminator.
    ///
    /// Running off the end of the source without finding a terminator is an
    /// [`Error::UnterminatedString`], not a silent truncation.
    pub fn read_null_terminated_string(&mut self) -> Result<String> {
        let start = self.pos;
        let tail = &self.data[start..];
        let Some(nul) = tail.iter().position(|&b| b == 0) else {
            return Err(Error::UnterminatedString {
                position: start as u64,
            });
        };
        self.pos = start + nul + 1;
        Ok(String::from_utf8_lossy(&tail[..nul]).into_owned())
    }
}
