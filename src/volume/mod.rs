//! Filesystem description and volume encoding
//!
//! A [`Filesystem`] is a root directory plus volume metadata. It implements
//! [`RegionBuilder`], so a generic driver can size backing storage from
//! [`RegionBuilder::required_length`] and hand the volume a region to fill.
//!
//! Emission order: boot sector, FSInfo sector, FAT sentinels, then the
//! directory tables recursively from the root, and finally the boot sector's
//! root-cluster field, which is only known once the root table has been
//! placed.

pub mod layout;

pub use layout::Layout;

use crate::directory::table::{write_directory, ClusterAllocator};
use crate::directory::Directory;
use crate::error::{Fat32Error, Result};
use crate::region::{Region, RegionBuilder};
use crate::types::{
    BOOTABLE_SIGNATURE, BOOT_SIGNATURE, END_OF_CHAIN, EXT_SIGNATURE, FAT_ENTRY_SIZE, FAT_ID,
    FSINFO_SIGNATURE_1, FSINFO_SIGNATURE_2, FSINFO_SIGNATURE_3, FS_TYPE_SIGNATURE,
    RESERVED_SECTORS, SECTORS_PER_CLUSTER, SECTOR_SIZE,
};

/// A complete filesystem description: the root tree plus volume metadata.
pub struct Filesystem {
    /// Volume serial number, written verbatim into the boot sector
    pub volume_id: u32,

    /// 11-byte volume label; see [`Filesystem::label_from_str`]
    pub label: [u8; 11],

    /// Slack clusters appended beyond the tree's footprint for future growth
    pub extra_cluster_count: usize,

    /// The root directory
    pub root: Directory,
}

impl Filesystem {
    /// Encode a label string as the fixed 11-byte field, space-padded.
    ///
    /// Fails with [`Fat32Error::InvalidLabel`] if `label` does not fit.
    pub fn label_from_str(label: &str) -> Result<[u8; 11]> {
        let bytes = label.as_bytes();
        if bytes.len() > 11 {
            return Err(Fat32Error::InvalidLabel);
        }
        let mut out = [b' '; 11];
        out[..bytes.len()].copy_from_slice(bytes);
        Ok(out)
    }

    /// Derive the volume's physical layout
    pub fn layout(&self) -> Layout {
        Layout::compute(&self.root, self.extra_cluster_count)
    }
}

impl RegionBuilder for Filesystem {
    fn required_length(&self) -> usize {
        self.layout().image_len()
    }

    fn build(&self, region: &mut Region<'_>) -> Result<()> {
        // Bad names abort the build before a single byte lands.
        self.root.validate()?;

        let layout = self.layout();
        let fat_offset = RESERVED_SECTORS * SECTOR_SIZE;

        {
            let mut boot = region.slice(0, SECTOR_SIZE);

            // Main signatures
            boot.write_bytes(0x000, &BOOT_SIGNATURE);
            boot.write_u16_le(0x1fe, BOOTABLE_SIGNATURE)?;

            // BIOS parameter block
            boot.write_u16_le(0x00b, SECTOR_SIZE as u16)?;
            boot.write_u8(0x00d, SECTORS_PER_CLUSTER as u8)?;
            boot.write_u16_le(0x00e, RESERVED_SECTORS as u16)?;
            boot.write_u8(0x010, 1)?; // Number of FATs
            boot.write_u16_le(0x011, 0)?; // Root entry count not used on FAT32
            boot.write_u8(0x015, 0xf8)?; // Media descriptor (fixed disk)
            boot.write_u16_le(0x018, 1)?; // Sectors per track not used
            boot.write_u16_le(0x01a, 64)?; // Head count not used
            boot.write_u32_le(0x020, layout.total_sectors())?;
            boot.write_u32_le(0x024, layout.sectors_per_fat())?;
            boot.write_u16_le(0x02a, 0)?; // Version number
            boot.write_u16_le(0x030, 1)?; // Sector of FSInfo
            boot.write_u8(0x042, EXT_SIGNATURE)?;
            boot.write_u32_le(0x043, self.volume_id)?;
            boot.write_bytes(0x047, &self.label);
            boot.write_bytes(0x052, &FS_TYPE_SIGNATURE);
        }

        {
            let mut fsinfo = region.slice(SECTOR_SIZE, SECTOR_SIZE);
            fsinfo.write_bytes(0x000, &FSINFO_SIGNATURE_1);
            fsinfo.write_bytes(0x1e4, &FSINFO_SIGNATURE_2);
            fsinfo.write_u32_le(0x1e8, 0xffff_ffff)?; // Free cluster count not known
            fsinfo.write_u32_le(0x1ec, 0xffff_ffff)?; // No most recent cluster
            fsinfo.write_bytes(0x1fc, &FSINFO_SIGNATURE_3);
        }

        region.write_u32_le(fat_offset, FAT_ID)?;
        region.write_u32_le(fat_offset + FAT_ENTRY_SIZE, END_OF_CHAIN)?;

        let mut alloc = ClusterAllocator::new(layout.first_data_cluster());
        let root_cluster =
            write_directory(region, &mut alloc, fat_offset, &self.root, Some(&self.label))?;

        // Back-patch now that the root table has been placed.
        region.write_u32_le(0x02c, root_cluster as u32)?;

        Ok(())
    }
}
