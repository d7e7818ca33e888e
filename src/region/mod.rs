//! Addressable storage over fragmented backing buffers
//!
//! A [`Region`] projects a flat, contiguous address space onto arbitrary
//! segments of one or more underlying buffers. The most straightforward
//! region is a single flat buffer, but a region can consist of any number of
//! separate buffers that need not be contiguous in memory; the buffers, of
//! arbitrary and differing sizes, represent sequential areas of logical
//! memory.
//!
//! The arbitrary sizing comes at the cost of a linear scan to locate a
//! particular byte, so it works best to keep the total number of buffers
//! small. When working with a very fragmented region it pays to slice a
//! smaller part before doing a number of related operations, since those
//! operations then scan only the relevant sub-slices.

pub mod builder;
mod codec;

pub use builder::{BufferRegionBuilder, RegionBuilder};

use crate::error::{Fat32Error, Result};
use alloc::vec::Vec;

/// A logical contiguous byte range backed by one or more buffer segments.
///
/// A region never owns the memory it views; it is a projection. Sub-regions
/// produced by [`Region::slice`] reborrow the same segments, so writes
/// through a sub-region are writes through its parent.
pub struct Region<'a> {
    segs: Vec<&'a mut [u8]>,
}

impl<'a> Region<'a> {
    /// Create a region over a single contiguous buffer
    pub fn new(buf: &'a mut [u8]) -> Self {
        let mut segs = Vec::with_capacity(1);
        segs.push(buf);
        Self { segs }
    }

    /// Create a region over an ordered sequence of buffer segments
    pub fn from_segments(segs: Vec<&'a mut [u8]>) -> Self {
        Self { segs }
    }

    /// Total logical length: the sum of all segment lengths
    pub fn len(&self) -> usize {
        self.segs.iter().map(|seg| seg.len()).sum()
    }

    /// Whether the region covers zero bytes
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Select the logical range `[offset, offset + length)` as a sub-region.
    ///
    /// Never fails: if fewer than `length` bytes remain past `offset` the
    /// result is shorter than requested, and if `offset` is beyond all data
    /// the result is empty. The sub-region borrows this region's segments,
    /// so writes through it land in the same backing memory.
    pub fn slice(&mut self, offset: usize, length: usize) -> Region<'_> {
        let mut segs: Vec<&mut [u8]> = Vec::new();
        let mut start = 0;
        let mut remaining = length;

        for seg in self.segs.iter_mut() {
            let end = start + seg.len();
            if remaining == 0 {
                break;
            }
            if offset < end {
                // Trim the front of the first selected segment, the tail of
                // the last.
                let from = offset.saturating_sub(start);
                let take = remaining.min(seg.len() - from);
                if take > 0 {
                    segs.push(&mut seg[from..from + take]);
                    remaining -= take;
                }
            }
            start = end;
        }

        Region { segs }
    }

    /// Copy every segment into one contiguous buffer.
    ///
    /// This always creates a copy of all of the data in the region.
    pub fn flatten(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.len());
        for seg in &self.segs {
            out.extend_from_slice(seg);
        }
        out
    }

    /// Build a region of equal-sized blocks placed and ordered per `mapping`.
    ///
    /// For each index in `mapping` the source block
    /// `[i * block_size, (i + 1) * block_size)` is appended to the result.
    /// This can represent a user file stored with its contents split over
    /// different parts of a disk. Indices past the end of the source
    /// contribute nothing; naming the same block twice is [`Fat32Error::BlockReused`],
    /// since that would alias two mutable views of one range.
    pub fn blocks(self, block_size: usize, mapping: &[usize]) -> Result<Region<'a>> {
        // Carve the source into consecutive block_size pieces. A block may
        // span several segments, so each pool entry is itself a segment list.
        let mut pool: Vec<Vec<&'a mut [u8]>> = Vec::new();
        let mut current: Vec<&'a mut [u8]> = Vec::new();
        let mut fill = 0;

        for mut seg in self.segs {
            while !seg.is_empty() {
                let want = block_size - fill;
                if seg.len() <= want {
                    fill += seg.len();
                    current.push(seg);
                    if fill == block_size {
                        pool.push(core::mem::take(&mut current));
                        fill = 0;
                    }
                    break;
                }
                let (head, tail) = seg.split_at_mut(want);
                current.push(head);
                pool.push(core::mem::take(&mut current));
                fill = 0;
                seg = tail;
            }
        }
        if !current.is_empty() {
            pool.push(current);
        }

        let mut pool: Vec<Option<Vec<&'a mut [u8]>>> = pool.into_iter().map(Some).collect();
        let mut segs = Vec::new();
        for &block in mapping {
            match pool.get_mut(block) {
                Some(slot) => match slot.take() {
                    Some(pieces) => segs.extend(pieces),
                    None => return Err(Fat32Error::BlockReused),
                },
                // Past the end of the source: contributes nothing, matching
                // the short-slice behavior of `slice`.
                None => {}
            }
        }

        Ok(Region { segs })
    }

    /// Write one byte at a logical address
    pub fn write_u8(&mut self, addr: usize, val: u8) -> Result<()> {
        let mut loc = self.slice(addr, 1);
        match loc.segs.first_mut() {
            Some(seg) => {
                seg[0] = val;
                Ok(())
            }
            None => Err(Fat32Error::OutOfRange),
        }
    }

    /// Read one byte at a logical address
    pub fn read_u8(&self, addr: usize) -> Result<u8> {
        let mut start = 0;
        for seg in &self.segs {
            let end = start + seg.len();
            if addr < end {
                return Ok(seg[addr - start]);
            }
            start = end;
        }
        Err(Fat32Error::OutOfRange)
    }

    /// Scatter-copy `src` into the region starting at `offset`.
    ///
    /// Copies across as many underlying segments as the target range spans,
    /// and only as many bytes as the target range can hold.
    pub fn write_bytes(&mut self, offset: usize, src: &[u8]) {
        let mut sub = self.slice(offset, src.len());
        let mut ofs = 0;
        for seg in sub.segs.iter_mut() {
            let n = seg.len();
            seg.copy_from_slice(&src[ofs..ofs + n]);
            ofs += n;
        }
    }

    /// Size `builder`, slice that many bytes at `offset`, and have the
    /// builder fill the sub-region.
    ///
    /// This is the mechanism by which directories, files, and whole
    /// filesystems compose without knowing about fragmentation.
    pub fn write_nested(&mut self, offset: usize, builder: &dyn RegionBuilder) -> Result<()> {
        let length = builder.required_length();
        let mut sub = self.slice(offset, length);
        if sub.len() != length {
            return Err(Fat32Error::OutOfRange);
        }
        builder.build(&mut sub)
    }
}
