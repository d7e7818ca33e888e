//! Common constants for the FAT32 on-disk format

/// Sector size in bytes (always 512)
pub const SECTOR_SIZE: usize = 512;

/// Cluster size in bytes (8 sectors per cluster)
pub const CLUSTER_SIZE: usize = 4096;

/// Sectors per cluster
pub const SECTORS_PER_CLUSTER: usize = CLUSTER_SIZE / SECTOR_SIZE;

/// Reserved sectors at the front of the volume: boot sector and FSInfo
pub const RESERVED_SECTORS: usize = 2;

/// Width of one File Allocation Table entry in bytes
pub const FAT_ENTRY_SIZE: usize = 4;

/// Size of one directory table entry in bytes
pub const DIR_ENTRY_SIZE: usize = 32;

/// FAT entry 0: FAT identifier sentinel
pub const FAT_ID: u32 = 0x0fff_fff8;

/// Sentinel terminating a cluster chain
pub const END_OF_CHAIN: u32 = 0x0fff_ffff;

/// Jump instruction plus OEM name at the top of the boot sector
pub const BOOT_SIGNATURE: [u8; 11] = [
    0xeb, 0x58, 0x90, b'M', b'S', b'W', b'I', b'N', b'4', b'.', b'1',
];

/// Extended boot signature (0x29)
pub const EXT_SIGNATURE: u8 = 0x29;

/// Bootable marker word at offset 0x1fe of the boot sector
pub const BOOTABLE_SIGNATURE: u16 = 0xaa55;

/// Filesystem type string in the BIOS parameter block
pub const FS_TYPE_SIGNATURE: [u8; 8] = *b"FAT32   ";

/// FSInfo lead signature (offset 0x000)
pub const FSINFO_SIGNATURE_1: [u8; 4] = [0x52, 0x52, 0x61, 0x41];

/// FSInfo structure signature (offset 0x1e4)
pub const FSINFO_SIGNATURE_2: [u8; 4] = [0x72, 0x72, 0x41, 0x61];

/// FSInfo trailing signature (offset 0x1fc)
pub const FSINFO_SIGNATURE_3: [u8; 4] = [0x00, 0x00, 0x55, 0xaa];

/// Read-only attribute bit
pub const ATTR_READ_ONLY: u8 = 0x01;
/// Hidden attribute bit
pub const ATTR_HIDDEN: u8 = 0x02;
/// System attribute bit
pub const ATTR_SYSTEM: u8 = 0x04;
/// Volume-label attribute bit
pub const ATTR_VOLUME_ID: u8 = 0x08;
/// Directory attribute bit
pub const ATTR_DIRECTORY: u8 = 0x10;
/// Archive attribute bit
pub const ATTR_ARCHIVE: u8 = 0x20;
/// Marker combination identifying a long-filename record
pub const ATTR_LFN: u8 = ATTR_READ_ONLY | ATTR_HIDDEN | ATTR_SYSTEM | ATTR_VOLUME_ID;

/// UTF-16 units carried by one long-filename record
pub const LFN_UNITS_PER_ENTRY: usize = 13;

/// Maximum long-filename length in UTF-16 units
pub const MAX_LFN_UNITS: usize = 255;
