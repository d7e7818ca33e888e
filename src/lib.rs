//! FAT32 Filesystem Image Builder
//!
//! A `no_std` library that encodes an in-memory directory tree into a
//! complete FAT32 filesystem image, byte for byte.
//!
//! # Overview
//!
//! This crate is a write-only image encoder, not a live filesystem: there is
//! no mount path, no read path over a populated volume, and no reclamation.
//! One build produces one finished image. It provides:
//! - A fragmentation-tolerant addressable-storage abstraction ([`Region`])
//! - A two-phase sizing/filling capability ([`RegionBuilder`])
//! - A directory-tree model with recursive footprint computation
//! - The FAT32 layout and encoding engine: boot sector, FSInfo sector,
//!   File Allocation Table, cluster-chained directory tables, and long
//!   filename (LFN) records
//!
//! # Architecture
//!
//! The implementation is layered, data flowing one way:
//! 1. **Region layer** - Composes and slices byte ranges over possibly
//!    discontiguous backing buffers
//! 2. **Directory layer** - Models the tree and derives its on-disk footprint
//! 3. **Volume layer** - Resolves the layout fixed point and emits the bytes
//! 4. **Storage layer** - Generic drivers for filling a buffer or writing a
//!    finished image out through a block device
//!
//! # Usage
//!
//! ```ignore
//! use fat32::{build_image, BufferRegionBuilder, Directory, DirEntryCommon,
//!             DirEntryFile, Filesystem};
//!
//! let mut root = Directory::new();
//! root.files.push(DirEntryFile {
//!     common: DirEntryCommon::named("hello.txt"),
//!     body: Box::new(BufferRegionBuilder::from_bytes(b"Hello, world!")),
//! });
//!
//! let fs = Filesystem {
//!     volume_id: 0xdead_beef,
//!     label: Filesystem::label_from_str("TEST")?,
//!     extra_cluster_count: 0,
//!     root,
//! };
//!
//! // The whole filesystem is itself a RegionBuilder.
//! let image = build_image(&fs)?;
//! ```

#![no_std]
#![warn(missing_docs)]

extern crate alloc;

pub mod error;
pub mod types;
pub mod region;
pub mod directory;
pub mod volume;
pub mod storage;

pub use error::{Fat32Error, Result};
pub use region::{BufferRegionBuilder, Region, RegionBuilder};
pub use directory::{DirEntryCommon, DirEntryDir, DirEntryFile, Directory, FatTimestamp};
pub use volume::{Filesystem, Layout};

// High-level driver exports
pub use storage::{build_image, build_to_blocks, write_image};
