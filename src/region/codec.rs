//! Fixed-width integer codecs over a region
//!
//! Reads and writes compose byte at a time so values may straddle segment
//! boundaries. A range not fully covered by available data is
//! [`Fat32Error::OutOfRange`]; nothing is silently truncated or wrapped.

use super::Region;
use crate::error::{Fat32Error, Result};

impl<'a> Region<'a> {
    /// Write a little-endian value of `width` bytes (1-8) at `addr`
    pub fn write_le(&mut self, addr: usize, width: usize, val: u64) -> Result<()> {
        let mut loc = self.slice(addr, width);
        if loc.len() < width {
            return Err(Fat32Error::OutOfRange);
        }
        let mut val = val;
        for ofs in 0..width {
            loc.write_u8(ofs, val as u8)?;
            val >>= 8;
        }
        Ok(())
    }

    /// Read a little-endian value of `width` bytes (1-8) at `addr`
    pub fn read_le(&self, addr: usize, width: usize) -> Result<u64> {
        if addr + width > self.len() {
            return Err(Fat32Error::OutOfRange);
        }
        let mut val = 0u64;
        for ofs in (0..width).rev() {
            val = (val << 8) | u64::from(self.read_u8(addr + ofs)?);
        }
        Ok(val)
    }

    /// Write a big-endian value of `width` bytes (1-8) at `addr`
    pub fn write_be(&mut self, addr: usize, width: usize, val: u64) -> Result<()> {
        let mut loc = self.slice(addr, width);
        if loc.len() < width {
            return Err(Fat32Error::OutOfRange);
        }
        let mut val = val;
        for ofs in (0..width).rev() {
            loc.write_u8(ofs, val as u8)?;
            val >>= 8;
        }
        Ok(())
    }

    /// Read a big-endian value of `width` bytes (1-8) at `addr`
    pub fn read_be(&self, addr: usize, width: usize) -> Result<u64> {
        if addr + width > self.len() {
            return Err(Fat32Error::OutOfRange);
        }
        let mut val = 0u64;
        for ofs in 0..width {
            val = (val << 8) | u64::from(self.read_u8(addr + ofs)?);
        }
        Ok(val)
    }

    /// Write a `u16` little-endian
    pub fn write_u16_le(&mut self, addr: usize, val: u16) -> Result<()> {
        self.write_le(addr, 2, u64::from(val))
    }

    /// Read a `u16` little-endian
    pub fn read_u16_le(&self, addr: usize) -> Result<u16> {
        Ok(self.read_le(addr, 2)? as u16)
    }

    /// Write a `u32` little-endian
    pub fn write_u32_le(&mut self, addr: usize, val: u32) -> Result<()> {
        self.write_le(addr, 4, u64::from(val))
    }

    /// Read a `u32` little-endian
    pub fn read_u32_le(&self, addr: usize) -> Result<u32> {
        Ok(self.read_le(addr, 4)? as u32)
    }

    /// Write a `u64` little-endian
    pub fn write_u64_le(&mut self, addr: usize, val: u64) -> Result<()> {
        self.write_le(addr, 8, val)
    }

    /// Read a `u64` little-endian
    pub fn read_u64_le(&self, addr: usize) -> Result<u64> {
        self.read_le(addr, 8)
    }

    /// Write a `u16` big-endian
    pub fn write_u16_be(&mut self, addr: usize, val: u16) -> Result<()> {
        self.write_be(addr, 2, u64::from(val))
    }

    /// Read a `u16` big-endian
    pub fn read_u16_be(&self, addr: usize) -> Result<u16> {
        Ok(self.read_be(addr, 2)? as u16)
    }

    /// Write a `u32` big-endian
    pub fn write_u32_be(&mut self, addr: usize, val: u32) -> Result<()> {
        self.write_be(addr, 4, u64::from(val))
    }

    /// Read a `u32` big-endian
    pub fn read_u32_be(&self, addr: usize) -> Result<u32> {
        Ok(self.read_be(addr, 4)? as u32)
    }

    /// Write a `u64` big-endian
    pub fn write_u64_be(&mut self, addr: usize, val: u64) -> Result<()> {
        self.write_be(addr, 8, val)
    }

    /// Read a `u64` big-endian
    pub fn read_u64_be(&self, addr: usize) -> Result<u64> {
        self.read_be(addr, 8)
    }
}
