//! Long-filename records and short-name synthesis
//!
//! Long filenames are stored as a run of 32-byte continuation records ahead
//! of the legacy 8.3 short entry. Each record carries 13 UTF-16 units split
//! across three fixed byte ranges, a sequence number, the LFN marker
//! attribute (so name-unaware readers skip the records), and a checksum of
//! the accompanying short name that lets a reader detect an orphaned run.

use crate::error::Result;
use crate::region::Region;
use crate::types::{ATTR_LFN, DIR_ENTRY_SIZE, LFN_UNITS_PER_ENTRY};
use alloc::vec::Vec;

/// Rotate-and-sum checksum over the 11 bytes of a short name
pub fn short_name_checksum(short: &[u8; 11]) -> u8 {
    let mut sum: u8 = 0;
    for &byte in short {
        sum = ((sum & 1) << 7)
            .wrapping_add(sum >> 1)
            .wrapping_add(byte);
    }
    sum
}

/// Synthesize an opaque 8.3 short name from an entry's start cluster.
///
/// Short names are not semantically meaningful to modern consumers, so the
/// cluster number as eight uppercase hex digits with a blank extension is
/// enough; the bump allocator never hands out the same cluster twice, so the
/// result is unique within the volume.
pub fn synthesize_short_name(start_cluster: u32) -> [u8; 11] {
    const HEX: &[u8; 16] = b"0123456789ABCDEF";
    let mut name = [b' '; 11];
    for (i, slot) in name.iter_mut().take(8).enumerate() {
        *slot = HEX[((start_cluster >> ((7 - i) * 4)) & 0xf) as usize];
    }
    name
}

/// Emit the long-filename record run for `name` at `offset`.
///
/// Records are emitted in ascending sequence order starting at 1. The unit
/// immediately after the name's last character is the 0x0000 terminator;
/// any units remaining after that are filled with 0xFFFF.
///
/// Returns the number of bytes written.
pub fn write_lfn_entries(
    region: &mut Region<'_>,
    offset: usize,
    name: &str,
    checksum: u8,
) -> Result<usize> {
    let units: Vec<u16> = name.encode_utf16().collect();
    let records = (units.len() + 1).div_ceil(LFN_UNITS_PER_ENTRY);

    for seq in 0..records {
        let base = offset + seq * DIR_ENTRY_SIZE;
        region.write_u8(base, (seq + 1) as u8)?;
        region.write_u8(base + 0x0b, ATTR_LFN)?;
        region.write_u8(base + 0x0d, checksum)?;

        for unit_ofs in 0..LFN_UNITS_PER_ENTRY {
            let index = seq * LFN_UNITS_PER_ENTRY + unit_ofs;
            let unit = match index.cmp(&units.len()) {
                core::cmp::Ordering::Less => units[index],
                core::cmp::Ordering::Equal => 0x0000,
                core::cmp::Ordering::Greater => 0xffff,
            };
            // The 13 units live at 0x01 (5 units), 0x0e (6) and 0x1c (2).
            let addr = match unit_ofs {
                0..=4 => base + 0x01 + unit_ofs * 2,
                5..=10 => base + 0x0e + (unit_ofs - 5) * 2,
                _ => base + 0x1c + (unit_ofs - 11) * 2,
            };
            region.write_u16_le(addr, unit)?;
        }
    }

    Ok(records * DIR_ENTRY_SIZE)
}
