//! Generic storage drivers
//!
//! Acquiring backing storage is outside the encoder proper: the volume only
//! needs an addressable byte range of exactly its reported length. These
//! drivers supply the two common arrangements: an allocated in-memory
//! buffer, and a block device reached through [`gpt_disk_io::BlockIo`].

use crate::error::{Fat32Error, Result};
use crate::region::{Region, RegionBuilder};
use crate::types::SECTOR_SIZE;
use alloc::vec;
use alloc::vec::Vec;
use gpt_disk_io::BlockIo;
use gpt_disk_types::Lba;

/// Allocate a buffer of exactly the builder's required length and fill it.
///
/// # Arguments
/// * `builder` - Any content source; typically a [`crate::Filesystem`]
///
/// # Returns
/// The finished image bytes
pub fn build_image(builder: &dyn RegionBuilder) -> Result<Vec<u8>> {
    let mut buf = vec![0u8; builder.required_length()];
    let mut region = Region::new(&mut buf);
    builder.build(&mut region)?;
    Ok(buf)
}

/// Write a finished image to a block device, sector by sector.
///
/// The device must use 512-byte blocks. A trailing partial sector is zero
/// padded, though images built by this crate are always whole clusters.
pub fn write_image<B: BlockIo>(block_io: &mut B, start_lba: u64, image: &[u8]) -> Result<()> {
    if block_io.block_size().to_u32() != SECTOR_SIZE as u32 {
        return Err(Fat32Error::InvalidBlockSize);
    }

    for (i, sector) in image.chunks(SECTOR_SIZE).enumerate() {
        let lba = Lba(start_lba + i as u64);
        if sector.len() == SECTOR_SIZE {
            block_io
                .write_blocks(lba, sector)
                .map_err(|_| Fat32Error::IoError)?;
        } else {
            let mut last = [0u8; SECTOR_SIZE];
            last[..sector.len()].copy_from_slice(sector);
            block_io
                .write_blocks(lba, &last)
                .map_err(|_| Fat32Error::IoError)?;
        }
    }

    block_io.flush().map_err(|_| Fat32Error::IoError)?;
    Ok(())
}

/// Build an image and write it straight out to a block device.
pub fn build_to_blocks<B: BlockIo>(
    block_io: &mut B,
    start_lba: u64,
    builder: &dyn RegionBuilder,
) -> Result<()> {
    let image = build_image(builder)?;
    write_image(block_io, start_lba, &image)
}
