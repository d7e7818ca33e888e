//! Directory-tree model and on-disk footprint
//!
//! Files and subdirectories with common metadata. Each directory exclusively
//! owns its children, so lifetimes are purely hierarchical: the tree is
//! built once by the caller and handed to the encoder read-only.

pub mod lfn;
pub mod table;

use crate::error::{Fat32Error, Result};
use crate::region::RegionBuilder;
use crate::types::{CLUSTER_SIZE, DIR_ENTRY_SIZE, LFN_UNITS_PER_ENTRY, MAX_LFN_UNITS};
use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;

/// An on-disk FAT timestamp, already encoded as the date and time words the
/// directory entry stores.
///
/// Values are written verbatim, so identical trees always produce identical
/// images. The default (zero) leaves the fields blank.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FatTimestamp {
    /// Encoded date word (bits: 15-9 year since 1980, 8-5 month, 4-0 day)
    pub date: u16,
    /// Encoded time word (bits: 15-11 hours, 10-5 minutes, 4-0 seconds/2)
    pub time: u16,
}

/// Metadata shared by directory and file entries
#[derive(Debug, Clone, Default)]
pub struct DirEntryCommon {
    /// Entry name; stored on disk as a long-filename record run
    pub name: String,

    /// Attribute bitmask ([`crate::types::ATTR_ARCHIVE`] and friends)
    pub attributes: u8,

    /// Creation timestamp
    pub created: FatTimestamp,

    /// Last-access timestamp (date word only is stored on disk)
    pub accessed: FatTimestamp,

    /// Last-modification timestamp
    pub modified: FatTimestamp,
}

impl DirEntryCommon {
    /// Common fields for `name` with zero attributes and timestamps
    pub fn named(name: &str) -> Self {
        Self {
            name: String::from(name),
            ..Self::default()
        }
    }

    /// Number of additional 32-byte records needed for this entry's long
    /// filename.
    ///
    /// Each record carries 13 UTF-16 units, and one unit is reserved for the
    /// null terminator, so a name of `n` units needs `ceil((n + 1) / 13)`
    /// records.
    pub fn lfn_entry_count(&self) -> usize {
        let units = self.name.encode_utf16().count();
        (units + 1).div_ceil(LFN_UNITS_PER_ENTRY)
    }

    fn validate(&self) -> Result<()> {
        if self.name.encode_utf16().count() > MAX_LFN_UNITS {
            return Err(Fat32Error::NameTooLong);
        }
        Ok(())
    }
}

/// A subdirectory entry: common metadata plus the owned child tree
pub struct DirEntryDir {
    /// Shared entry metadata
    pub common: DirEntryCommon,

    /// The child directory this entry names
    pub directory: Directory,
}

/// A file entry: common metadata plus an externally supplied body source
pub struct DirEntryFile {
    /// Shared entry metadata
    pub common: DirEntryCommon,

    /// Produces the file's body bytes; sized before anything is written
    pub body: Box<dyn RegionBuilder>,
}

/// An ordered set of subdirectory entries and file entries
#[derive(Default)]
pub struct Directory {
    /// Subdirectory entries, emitted before files
    pub dirs: Vec<DirEntryDir>,

    /// File entries
    pub files: Vec<DirEntryFile>,
}

impl Directory {
    /// An empty directory
    pub fn new() -> Self {
        Self::default()
    }

    /// Bytes this directory's own table occupies: 32 per record, counting
    /// each entry's long-filename run plus its short entry, and one reserved
    /// slot for the volume-label pseudo-entry if this is the root.
    pub fn table_bytes(&self, is_root: bool) -> usize {
        let mut bytes = 0;
        for entry in &self.dirs {
            bytes += DIR_ENTRY_SIZE * (entry.common.lfn_entry_count() + 1);
        }
        for entry in &self.files {
            bytes += DIR_ENTRY_SIZE * (entry.common.lfn_entry_count() + 1);
        }
        if is_root {
            bytes += DIR_ENTRY_SIZE;
        }
        bytes
    }

    /// Clusters this directory's own table occupies, never less than one so
    /// every directory has a start cluster.
    pub fn table_clusters(&self, is_root: bool) -> usize {
        self.table_bytes(is_root).div_ceil(CLUSTER_SIZE).max(1)
    }

    /// Total clusters needed by this directory and all of its descendants.
    ///
    /// File sizes round up to whole clusters, and every file occupies at
    /// least one cluster, empty files included.
    pub fn total_clusters(&self, is_root: bool) -> usize {
        let mut clusters = self.table_clusters(is_root);
        for entry in &self.dirs {
            clusters += entry.directory.total_clusters(false);
        }
        for entry in &self.files {
            clusters += file_clusters(entry.body.required_length());
        }
        clusters
    }

    pub(crate) fn validate(&self) -> Result<()> {
        for entry in &self.dirs {
            entry.common.validate()?;
            entry.directory.validate()?;
        }
        for entry in &self.files {
            entry.common.validate()?;
        }
        Ok(())
    }
}

/// Clusters a file body of `len` bytes occupies
pub(crate) fn file_clusters(len: usize) -> usize {
    len.div_ceil(CLUSTER_SIZE).max(1)
}
