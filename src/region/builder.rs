//! The two-phase sizing/filling capability
//!
//! A [`RegionBuilder`] maps from some high-level structure, such as a list of
//! descriptions of files, onto some physical structure, like a filesystem.
//! Reporting the required length separately from writing the bytes lets a
//! content source be sized before anything is written, and lets builders
//! nest; FAT32's own structural sizes are interdependent, so this decoupling
//! is load-bearing rather than cosmetic.

use super::Region;
use crate::error::Result;
use alloc::vec::Vec;

/// A content source that can be sized, then asked to fill a region.
pub trait RegionBuilder {
    /// How many bytes the built content occupies. Pure; no side effects.
    fn required_length(&self) -> usize;

    /// Fill `region`, whose length the caller guarantees to equal
    /// [`RegionBuilder::required_length`].
    fn build(&self, region: &mut Region<'_>) -> Result<()>;
}

/// A builder whose content is a byte buffer held in memory.
///
/// The simplest body source for a file entry.
#[derive(Debug, Clone, Default)]
pub struct BufferRegionBuilder {
    /// The bytes to emit
    pub buffer: Vec<u8>,
}

impl BufferRegionBuilder {
    /// Create a builder over a copy of `bytes`
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self {
            buffer: bytes.to_vec(),
        }
    }
}

impl RegionBuilder for BufferRegionBuilder {
    fn required_length(&self) -> usize {
        self.buffer.len()
    }

    fn build(&self, region: &mut Region<'_>) -> Result<()> {
        region.write_bytes(0, &self.buffer);
        Ok(())
    }
}
