//! Masked CRC32-C checksums and the reader's verification mode.

use crate::error::{Error, Result};

const MASK_DELTA: u32 = 0xa282_ead8;

/// Masks a raw CRC32-C value for storage in a frame header.
#[inline]
pub fn mask(crc: u32) -> u32 {
    crc.rotate_right(15).wrapping_add(MASK_DELTA)
}

/// Exact inverse of [`mask`].
#[inline]
pub fn unmask(masked: u32) -> u32 {
    masked.wrapping_sub(MASK_DELTA).rotate_left(15)
}

/// CRC32-C (Castagnoli) of `data`, masked for the wire.
#[inline]
pub fn masked_crc32c(data: &[u8]) -> u32 {
    mask(crc32c::crc32c(data))
}

/// Whether a `FrameReader` checks block checksums.
///
/// When to use `Skip`: trusted inputs where decode throughput matters more than
/// integrity checking. The checksum field is still read, only the comparison is skipped.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum ChecksumMode {
    /// Recompute the CRC32-C of every decoded block and compare it.
    #[default]
    Verify,
    /// Read checksums but never compare them.
    Skip,
}

impl ChecksumMode {
    /// Verifies a masked wire checksum against decoded bytes. Returns `Ok(())` if it matches
    /// or if verification is disabled.
    pub fn verify(self, masked: u32, decoded: &[u8]) -> Result<()> {
        match self {
            ChecksumMode::Skip => Ok(()),
            ChecksumMode::Verify => {
                let expected = unmask(masked);
                let calculated = crc32c::crc32c(decoded);
                if calculated == expected {
                    Ok(())
                } else {
                    Err(Error::checksum_mismatch(expected, calculated))
                }
            }
        }
    }
}

impl From<bool> for ChecksumMode {
    fn from(verify: bool) -> Self {
        if verify {
            ChecksumMode::Verify
        } else {
            ChecksumMode::Skip
        }
    }
}
