//! Error types for FAT32 image building

use core::fmt;

/// Result type for FAT32 image building operations
pub type Result<T> = core::result::Result<T, Fat32Error>;

/// Errors that can occur while building a FAT32 image
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fat32Error {
    /// A read or write addressed bytes beyond a region's logical extent
    OutOfRange,

    /// A block mapping named the same source block more than once
    BlockReused,

    /// A file or directory name exceeds the 255 UTF-16 unit limit
    NameTooLong,

    /// A volume label does not fit in 11 bytes
    InvalidLabel,

    /// The block device's block size does not match the FAT32 sector size
    InvalidBlockSize,

    /// I/O error writing to the block device
    IoError,
}

impl fmt::Display for Fat32Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfRange => write!(f, "Address is outside the region's logical extent"),
            Self::BlockReused => write!(f, "Block mapping names the same source block twice"),
            Self::NameTooLong => write!(f, "Name exceeds 255 UTF-16 units"),
            Self::InvalidLabel => write!(f, "Volume label does not fit in 11 bytes"),
            Self::InvalidBlockSize => write!(f, "Block device block size is not 512 bytes"),
            Self::IoError => write!(f, "I/O error writing block device"),
        }
    }
}
