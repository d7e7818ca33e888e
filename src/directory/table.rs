//! Cluster allocation and directory-table emission
//!
//! The allocator is a monotonically increasing cursor: this is a one-shot
//! encoder with no reclamation, so bump allocation is enough, and it
//! guarantees that clusters requested in one burst are index-contiguous.
//! A directory therefore allocates its whole table before recursing, which
//! lets the table be addressed as one flat byte range, and keeps directory
//! tables clustered near the front of the volume for traversal locality.

use super::lfn::{short_name_checksum, synthesize_short_name, write_lfn_entries};
use super::{file_clusters, DirEntryCommon, Directory};
use crate::error::Result;
use crate::region::Region;
use crate::types::{
    ATTR_DIRECTORY, ATTR_VOLUME_ID, CLUSTER_SIZE, DIR_ENTRY_SIZE, END_OF_CHAIN, FAT_ENTRY_SIZE,
};

/// Bump cluster allocator
pub(crate) struct ClusterAllocator {
    next: usize,
}

impl ClusterAllocator {
    /// Start allocating at `first`, but never below cluster 2: the FAT
    /// entries for clusters 0 and 1 hold sentinels, so data cannot live
    /// there.
    pub(crate) fn new(first: usize) -> Self {
        Self { next: first.max(2) }
    }

    /// Take the next free cluster
    pub(crate) fn allocate(&mut self) -> usize {
        let cluster = self.next;
        self.next += 1;
        cluster
    }
}

/// Forward-link `count` clusters starting at `start` in the FAT, terminating
/// the chain with the end-of-chain sentinel.
fn write_chain(
    region: &mut Region<'_>,
    fat_offset: usize,
    start: usize,
    count: usize,
) -> Result<()> {
    for i in 0..count {
        let cluster = start + i;
        let entry = if i + 1 == count {
            END_OF_CHAIN
        } else {
            (cluster + 1) as u32
        };
        region.write_u32_le(fat_offset + cluster * FAT_ENTRY_SIZE, entry)?;
    }
    Ok(())
}

/// Emit one table entry: the long-filename run followed by the 32-byte short
/// entry. Returns the number of table bytes consumed.
fn write_entry(
    region: &mut Region<'_>,
    offset: usize,
    common: &DirEntryCommon,
    attributes: u8,
    start_cluster: u32,
    size: u32,
) -> Result<usize> {
    let short = synthesize_short_name(start_cluster);
    let checksum = short_name_checksum(&short);
    let lfn_bytes = write_lfn_entries(region, offset, &common.name, checksum)?;

    let base = offset + lfn_bytes;
    region.write_bytes(base, &short);
    region.write_u8(base + 0x0b, attributes)?;
    region.write_u16_le(base + 0x0e, common.created.time)?;
    region.write_u16_le(base + 0x10, common.created.date)?;
    region.write_u16_le(base + 0x12, common.accessed.date)?;
    region.write_u16_le(base + 0x14, (start_cluster >> 16) as u16)?;
    region.write_u16_le(base + 0x16, common.modified.time)?;
    region.write_u16_le(base + 0x18, common.modified.date)?;
    region.write_u16_le(base + 0x1a, (start_cluster & 0xffff) as u16)?;
    region.write_u32_le(base + 0x1c, size)?;

    Ok(lfn_bytes + DIR_ENTRY_SIZE)
}

/// Recursively emit `dir`'s table and everything below it.
///
/// `region` spans the whole volume and `fat_offset` is the byte offset of
/// the FAT within it. `label` is the volume label for the root directory,
/// `None` below the root. Returns the directory's start cluster.
pub(crate) fn write_directory(
    region: &mut Region<'_>,
    alloc: &mut ClusterAllocator,
    fat_offset: usize,
    dir: &Directory,
    label: Option<&[u8; 11]>,
) -> Result<usize> {
    let is_root = label.is_some();

    // The whole table is allocated in one burst before any descendant runs,
    // so its clusters are index-contiguous and flat-addressable.
    let table_clusters = dir.table_clusters(is_root);
    let start = alloc.allocate();
    for _ in 1..table_clusters {
        alloc.allocate();
    }
    write_chain(region, fat_offset, start, table_clusters)?;

    // Subdirectories first, then file bodies; the table entries themselves
    // are written last, once every start cluster is known.
    let mut dir_starts = alloc::vec::Vec::with_capacity(dir.dirs.len());
    for entry in &dir.dirs {
        dir_starts.push(write_directory(region, alloc, fat_offset, &entry.directory, None)?);
    }

    let mut file_runs = alloc::vec::Vec::with_capacity(dir.files.len());
    for entry in &dir.files {
        let body_len = entry.body.required_length();
        let clusters = file_clusters(body_len);
        let first = alloc.allocate();
        for _ in 1..clusters {
            alloc.allocate();
        }
        write_chain(region, fat_offset, first, clusters)?;
        region.write_nested(first * CLUSTER_SIZE, entry.body.as_ref())?;
        file_runs.push((first, body_len));
    }

    let mut pos = start * CLUSTER_SIZE;
    if let Some(label) = label {
        region.write_bytes(pos, label);
        region.write_u8(pos + 0x0b, ATTR_VOLUME_ID)?;
        pos += DIR_ENTRY_SIZE;
    }
    for (entry, &child_start) in dir.dirs.iter().zip(&dir_starts) {
        pos += write_entry(
            region,
            pos,
            &entry.common,
            entry.common.attributes | ATTR_DIRECTORY,
            child_start as u32,
            0,
        )?;
    }
    for (entry, &(first, body_len)) in dir.files.iter().zip(&file_runs) {
        pos += write_entry(
            region,
            pos,
            &entry.common,
            entry.common.attributes,
            first as u32,
            body_len as u32,
        )?;
    }

    Ok(start)
}
