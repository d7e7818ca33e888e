//! End-to-end image building tests: whole-volume byte layout

mod common;

use common::{u16_at, u32_at, MemoryBlockDevice};
use fat32::directory::lfn::short_name_checksum;
use fat32::types::{
    ATTR_ARCHIVE, ATTR_DIRECTORY, ATTR_LFN, ATTR_VOLUME_ID, CLUSTER_SIZE, END_OF_CHAIN, FAT_ID,
};
use fat32::{
    build_image, build_to_blocks, write_image, BufferRegionBuilder, DirEntryCommon, DirEntryDir,
    DirEntryFile, Directory, Fat32Error, FatTimestamp, Filesystem,
};

fn text_file(name: &str, content: &[u8]) -> DirEntryFile {
    DirEntryFile {
        common: DirEntryCommon {
            attributes: ATTR_ARCHIVE,
            ..DirEntryCommon::named(name)
        },
        body: Box::new(BufferRegionBuilder::from_bytes(content)),
    }
}

fn filesystem(root: Directory) -> Filesystem {
    Filesystem {
        volume_id: 0xdead_beef,
        label: Filesystem::label_from_str("TEST").unwrap(),
        extra_cluster_count: 0,
        root,
    }
}

const FAT_OFFSET: usize = 1024;

#[test]
fn test_empty_root_boot_sector() {
    let image = build_image(&filesystem(Directory::new())).unwrap();

    // 2 overhead clusters + 1 root table cluster
    assert_eq!(image.len(), 12288);

    assert_eq!(
        &image[0..11],
        &[0xeb, 0x58, 0x90, b'M', b'S', b'W', b'I', b'N', b'4', b'.', b'1']
    );
    assert_eq!(u16_at(&image, 0x00b), 512); // bytes per sector
    assert_eq!(image[0x00d], 8); // sectors per cluster
    assert_eq!(u16_at(&image, 0x00e), 2); // reserved sectors
    assert_eq!(image[0x010], 1); // FAT count
    assert_eq!(u16_at(&image, 0x011), 0); // root entry count
    assert_eq!(image[0x015], 0xf8); // media descriptor
    assert_eq!(u32_at(&image, 0x020), 24); // total sectors
    assert_eq!(u32_at(&image, 0x024), 1); // sectors per FAT
    assert_eq!(u16_at(&image, 0x02a), 0); // version
    assert_eq!(u32_at(&image, 0x02c), 2); // root dir start cluster
    assert_eq!(u16_at(&image, 0x030), 1); // FSInfo sector
    assert_eq!(image[0x042], 0x29); // extended signature
    assert_eq!(u32_at(&image, 0x043), 0xdead_beef); // volume id
    assert_eq!(&image[0x047..0x052], b"TEST       ");
    assert_eq!(&image[0x052..0x05a], b"FAT32   ");
    assert_eq!(u16_at(&image, 0x1fe), 0xaa55); // bootable marker
}

#[test]
fn test_empty_root_fsinfo_sector() {
    let image = build_image(&filesystem(Directory::new())).unwrap();

    assert_eq!(&image[512..516], &[0x52, 0x52, 0x61, 0x41]);
    assert_eq!(&image[512 + 0x1e4..512 + 0x1e8], &[0x72, 0x72, 0x41, 0x61]);
    assert_eq!(u32_at(&image, 512 + 0x1e8), 0xffff_ffff);
    assert_eq!(u32_at(&image, 512 + 0x1ec), 0xffff_ffff);
    assert_eq!(&image[512 + 0x1fc..512 + 0x200], &[0x00, 0x00, 0x55, 0xaa]);
}

#[test]
fn test_empty_root_fat_and_label() {
    let image = build_image(&filesystem(Directory::new())).unwrap();

    assert_eq!(u32_at(&image, FAT_OFFSET), FAT_ID);
    assert_eq!(u32_at(&image, FAT_OFFSET + 4), END_OF_CHAIN);
    // Root table is a single cluster at cluster 2
    assert_eq!(u32_at(&image, FAT_OFFSET + 8), END_OF_CHAIN);

    let table = 2 * CLUSTER_SIZE;
    assert_eq!(&image[table..table + 11], b"TEST       ");
    assert_eq!(image[table + 0x0b], ATTR_VOLUME_ID);
}

#[test]
fn test_build_is_deterministic() {
    let make = || {
        let mut root = Directory::new();
        root.files.push(text_file("hello.txt", b"Hello, world!"));
        let mut sub = Directory::new();
        sub.files.push(text_file("inner.dat", &[7u8; 5000]));
        root.dirs.push(DirEntryDir {
            common: DirEntryCommon::named("sub"),
            directory: sub,
        });
        filesystem(root)
    };

    assert_eq!(build_image(&make()).unwrap(), build_image(&make()).unwrap());
}

#[test]
fn test_single_file_entry_and_body() {
    let mut root = Directory::new();
    root.files.push(text_file("hello.txt", b"Hello, world!"));
    let image = build_image(&filesystem(root)).unwrap();

    // root table cluster + file cluster on top of the overhead
    assert_eq!(image.len(), 4 * CLUSTER_SIZE);
    assert_eq!(u32_at(&image, 0x02c), 2);

    // Chains: root at 2, file at 3, both single-cluster
    assert_eq!(u32_at(&image, FAT_OFFSET + 8), END_OF_CHAIN);
    assert_eq!(u32_at(&image, FAT_OFFSET + 12), END_OF_CHAIN);

    // Table: label slot, one LFN record, then the short entry
    let lfn = 2 * CLUSTER_SIZE + 32;
    assert_eq!(image[lfn], 1); // sequence number
    assert_eq!(image[lfn + 0x0b], ATTR_LFN);
    assert_eq!(image[lfn + 0x0d], short_name_checksum(b"00000003   "));
    // "hello" in the first five units
    assert_eq!(&image[lfn + 0x01..lfn + 0x0b], b"h\0e\0l\0l\0o\0");
    // ".txt" then terminator then fill in the middle six units
    assert_eq!(
        &image[lfn + 0x0e..lfn + 0x1a],
        b".\0t\0x\0t\0\0\0\xff\xff"
    );
    assert_eq!(&image[lfn + 0x1c..lfn + 0x20], b"\xff\xff\xff\xff");

    let short = lfn + 32;
    assert_eq!(&image[short..short + 11], b"00000003   ");
    assert_eq!(image[short + 0x0b], ATTR_ARCHIVE);
    assert_eq!(u16_at(&image, short + 0x14), 0); // start cluster high
    assert_eq!(u16_at(&image, short + 0x1a), 3); // start cluster low
    assert_eq!(u32_at(&image, short + 0x1c), 13); // file size

    // Body lands at the start of cluster 3
    let body = 3 * CLUSTER_SIZE;
    assert_eq!(&image[body..body + 13], b"Hello, world!");
}

#[test]
fn test_multi_cluster_file_chains_forward() {
    let content: Vec<u8> = (0..5000).map(|i| (i % 251) as u8).collect();
    let mut root = Directory::new();
    root.files.push(text_file("data.bin", &content));
    let image = build_image(&filesystem(root)).unwrap();

    assert_eq!(image.len(), 5 * CLUSTER_SIZE);

    // ceil(5000 / 4096) = 2 clusters: 3 -> 4 -> EOC
    assert_eq!(u32_at(&image, FAT_OFFSET + 3 * 4), 4);
    assert_eq!(u32_at(&image, FAT_OFFSET + 4 * 4), END_OF_CHAIN);

    let body = 3 * CLUSTER_SIZE;
    assert_eq!(&image[body..body + 5000], &content[..]);

    let short = 2 * CLUSTER_SIZE + 64;
    assert_eq!(u32_at(&image, short + 0x1c), 5000);
}

#[test]
fn test_fat_and_root_table_stay_disjoint_at_overhead_boundary() {
    // 1791 file clusters + 1 root table cluster put the reserved area plus
    // the per-data-cluster FAT entries exactly at the two-cluster overhead
    // boundary. The FAT's entries for the overhead clusters themselves push
    // past it, so the overhead area takes a third cluster; the root table
    // moves to cluster 3 and the chain's final entry must not collide with
    // the label pseudo-entry.
    let content = vec![0xa5u8; 1791 * CLUSTER_SIZE];
    let mut root = Directory::new();
    root.files.push(text_file("big.bin", &content));
    let image = build_image(&filesystem(root)).unwrap();

    assert_eq!(image.len(), (3 + 1792) * CLUSTER_SIZE);
    assert_eq!(u32_at(&image, 0x02c), 3);

    // Root table chain at 3, file at 4..=1794
    assert_eq!(u32_at(&image, FAT_OFFSET + 3 * 4), END_OF_CHAIN);
    assert_eq!(u32_at(&image, FAT_OFFSET + 4 * 4), 5);
    assert_eq!(u32_at(&image, FAT_OFFSET + 1794 * 4), END_OF_CHAIN);

    // The label pseudo-entry is intact past the end of the FAT
    let table = 3 * CLUSTER_SIZE;
    assert_eq!(&image[table..table + 11], b"TEST       ");
    assert_eq!(image[table + 0x0b], ATTR_VOLUME_ID);

    let body = 4 * CLUSTER_SIZE;
    assert_eq!(image[body], 0xa5);
    assert_eq!(image[body + 1791 * CLUSTER_SIZE - 1], 0xa5);
}

#[test]
fn test_empty_file_takes_one_cluster() {
    let mut root = Directory::new();
    root.files.push(text_file("empty", b""));
    let image = build_image(&filesystem(root)).unwrap();

    assert_eq!(image.len(), 4 * CLUSTER_SIZE);
    assert_eq!(u32_at(&image, FAT_OFFSET + 12), END_OF_CHAIN);

    let short = 2 * CLUSTER_SIZE + 64;
    assert_eq!(u16_at(&image, short + 0x1a), 3);
    assert_eq!(u32_at(&image, short + 0x1c), 0);
}

#[test]
fn test_subdirectories_come_before_files() {
    let mut root = Directory::new();
    root.files.push(text_file("hello.txt", b"Hello, world!"));
    root.dirs.push(DirEntryDir {
        common: DirEntryCommon::named("foobaz"),
        directory: Directory::new(),
    });
    let image = build_image(&filesystem(root)).unwrap();

    // root table, foobaz table, file cluster
    assert_eq!(image.len(), 5 * CLUSTER_SIZE);

    let table = 2 * CLUSTER_SIZE;
    // label, then the subdirectory's LFN run and short entry
    let lfn = table + 32;
    assert_eq!(&image[lfn + 0x01..lfn + 0x05], b"f\0o\0");
    let dir_short = lfn + 32;
    assert_eq!(image[dir_short + 0x0b], ATTR_DIRECTORY);
    assert_eq!(u16_at(&image, dir_short + 0x1a), 3);
    assert_eq!(u32_at(&image, dir_short + 0x1c), 0); // directories have size 0

    // The file follows, in cluster 4
    let file_short = dir_short + 32 + 32;
    assert_eq!(image[file_short + 0x0b], ATTR_ARCHIVE);
    assert_eq!(u16_at(&image, file_short + 0x1a), 4);

    // Subdirectory's own chain and (empty) table
    assert_eq!(u32_at(&image, FAT_OFFSET + 12), END_OF_CHAIN);
    let sub_table = 3 * CLUSTER_SIZE;
    assert!(image[sub_table..sub_table + 64].iter().all(|&b| b == 0));

    let body = 4 * CLUSTER_SIZE;
    assert_eq!(&image[body..body + 13], b"Hello, world!");
}

#[test]
fn test_long_name_spans_two_records() {
    let mut root = Directory::new();
    root.files.push(text_file("a-rather-long-name.txt", b"x"));
    let image = build_image(&filesystem(root)).unwrap();

    let lfn1 = 2 * CLUSTER_SIZE + 32;
    let lfn2 = lfn1 + 32;
    let short = lfn2 + 32;

    assert_eq!(image[lfn1], 1);
    assert_eq!(image[lfn2], 2);
    assert_eq!(image[lfn1 + 0x0b], ATTR_LFN);
    assert_eq!(image[lfn2 + 0x0b], ATTR_LFN);
    assert_eq!(image[lfn1 + 0x0d], image[lfn2 + 0x0d]);

    // Unit 13 of the name, '-', opens the second record
    assert_eq!(&image[lfn2 + 0x01..lfn2 + 0x03], b"-\0");

    assert_eq!(&image[short..short + 11], b"00000003   ");
    assert_eq!(u16_at(&image, short + 0x1a), 3);
}

#[test]
fn test_timestamps_written_verbatim() {
    let mut root = Directory::new();
    root.files.push(DirEntryFile {
        common: DirEntryCommon {
            created: FatTimestamp {
                date: 0x5821,
                time: 0x7d30,
            },
            accessed: FatTimestamp {
                date: 0x5822,
                time: 0,
            },
            modified: FatTimestamp {
                date: 0x5823,
                time: 0x0101,
            },
            ..DirEntryCommon::named("stamped")
        },
        body: Box::new(BufferRegionBuilder::from_bytes(b"s")),
    });
    let image = build_image(&filesystem(root)).unwrap();

    let short = 2 * CLUSTER_SIZE + 64;
    assert_eq!(u16_at(&image, short + 0x0e), 0x7d30); // create time
    assert_eq!(u16_at(&image, short + 0x10), 0x5821); // create date
    assert_eq!(u16_at(&image, short + 0x12), 0x5822); // access date
    assert_eq!(u16_at(&image, short + 0x16), 0x0101); // modify time
    assert_eq!(u16_at(&image, short + 0x18), 0x5823); // modify date
}

#[test]
fn test_overlong_name_aborts_the_build() {
    let mut root = Directory::new();
    root.files.push(text_file(&"a".repeat(256), b"x"));
    assert_eq!(
        build_image(&filesystem(root)).err(),
        Some(Fat32Error::NameTooLong)
    );
}

#[test]
fn test_extra_clusters_extend_the_image_only() {
    let plain = build_image(&filesystem(Directory::new())).unwrap();

    let mut fs = filesystem(Directory::new());
    fs.extra_cluster_count = 20;
    let padded = build_image(&fs).unwrap();

    assert_eq!(padded.len(), plain.len() + 20 * CLUSTER_SIZE);
    // Slack clusters stay zeroed and unchained
    assert!(padded[padded.len() - CLUSTER_SIZE..].iter().all(|&b| b == 0));
}

#[test]
fn test_write_image_round_trips() {
    let image = build_image(&filesystem(Directory::new())).unwrap();
    let mut device = MemoryBlockDevice::zeroed(image.len() / 512);

    write_image(&mut device, 0, &image).unwrap();
    assert_eq!(device.data, image);
}

#[test]
fn test_write_image_rejects_wrong_block_size() {
    let image = build_image(&filesystem(Directory::new())).unwrap();
    let mut device = MemoryBlockDevice::zeroed(64);
    device.block_size = 2048;

    assert_eq!(
        write_image(&mut device, 0, &image),
        Err(Fat32Error::InvalidBlockSize)
    );
}

#[test]
fn test_write_image_rejects_short_device() {
    let image = build_image(&filesystem(Directory::new())).unwrap();
    let mut device = MemoryBlockDevice::zeroed(10);

    assert_eq!(write_image(&mut device, 0, &image), Err(Fat32Error::IoError));
}

#[test]
fn test_build_to_blocks_matches_build_image() {
    let mut root = Directory::new();
    root.files.push(text_file("hello.txt", b"Hello, world!"));
    let fs = filesystem(root);

    let image = build_image(&fs).unwrap();
    let mut device = MemoryBlockDevice::zeroed(image.len() / 512);
    build_to_blocks(&mut device, 0, &fs).unwrap();

    assert_eq!(device.data, image);
}
