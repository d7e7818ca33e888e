//! Volume layout derivation
//!
//! The FAT's size depends on the volume's total cluster count, which in turn
//! depends on the FAT's size. The mutual dependency is resolved as a fixed
//! point: the overhead area starts at its two-cluster minimum and grows until
//! the FAT, sized for every cluster in the volume, fits inside it.

use crate::directory::Directory;
use crate::types::{CLUSTER_SIZE, FAT_ENTRY_SIZE, RESERVED_SECTORS, SECTOR_SIZE};

/// Physical layout of a volume, derived from a filesystem description.
///
/// Never stored independently; always recomputable from the description.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    /// Clusters needed by the root directory and all of its descendants
    pub data_clusters: usize,

    /// Authoritative FAT size in bytes: one entry per cluster in the volume
    pub fat_size: usize,

    /// Bytes of the reserved sectors plus the FAT
    pub overhead_size: usize,

    /// Clusters the overhead area occupies, never fewer than two: the FAT
    /// entries for clusters 0 and 1 hold sentinels, so both clusters must
    /// exist inside the overhead area
    pub overhead_clusters: usize,

    /// Every cluster in the volume: overhead, data, and requested slack
    pub total_clusters: usize,
}

impl Layout {
    /// Derive the layout for `root` plus `extra_cluster_count` slack
    /// clusters for future growth.
    pub fn compute(root: &Directory, extra_cluster_count: usize) -> Self {
        let reserved_size = RESERVED_SECTORS * SECTOR_SIZE;
        let data_clusters = root.total_clusters(true);

        // The carved FAT covers every cluster in the volume, overhead
        // clusters included, so the overhead area is sized against that
        // full FAT. Growing the area by a cluster grows the FAT by only
        // four bytes, so the loop settles within a round or two.
        let mut overhead_clusters = 2;
        loop {
            let total_clusters = overhead_clusters + data_clusters + extra_cluster_count;
            let fat_size = total_clusters * FAT_ENTRY_SIZE;
            let overhead_size = (reserved_size + fat_size).max(2 * CLUSTER_SIZE);
            let needed = overhead_size.div_ceil(CLUSTER_SIZE);
            if needed <= overhead_clusters {
                return Self {
                    data_clusters,
                    fat_size,
                    overhead_size,
                    overhead_clusters,
                    total_clusters,
                };
            }
            overhead_clusters = needed;
        }
    }

    /// Image length in bytes
    pub fn image_len(&self) -> usize {
        self.total_clusters * CLUSTER_SIZE
    }

    /// First cluster available to data
    pub fn first_data_cluster(&self) -> usize {
        self.overhead_clusters.max(2)
    }

    /// FAT size in whole sectors, for the BIOS parameter block
    pub fn sectors_per_fat(&self) -> u32 {
        self.fat_size.div_ceil(SECTOR_SIZE) as u32
    }

    /// Volume size in sectors, for the BIOS parameter block
    pub fn total_sectors(&self) -> u32 {
        (self.total_clusters * (CLUSTER_SIZE / SECTOR_SIZE)) as u32
    }
}
