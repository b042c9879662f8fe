//! Wire-format constants and frame headers for the Snappy framing format.
//!
//! Every frame is `[1-byte chunk type | 3-byte little-endian length | data]`.
//! Data frames (compressed and uncompressed) start their data section with a
//! 4-byte masked CRC32-C of the decoded block.

use crate::error::{mid_frame, Error, Result};
use std::io::{self, Read};

/// Maximum number of decoded bytes carried by one data frame.
pub const MAX_BLOCK_SIZE: usize = 65536;

/// Size of the masked checksum that prefixes every data frame's block.
pub const CHECKSUM_SIZE: usize = 4;

/// Largest input slice the writer places in a single frame.
pub const MAX_BLOCK_INPUT_SIZE: usize = MAX_BLOCK_SIZE - CHECKSUM_SIZE;

/// Worst-case Snappy encoding of a `MAX_BLOCK_SIZE` block.
pub const MAX_COMPRESSED_BLOCK_SIZE: usize = 32 + MAX_BLOCK_SIZE + MAX_BLOCK_SIZE / 6;

/// Largest data section a reader accepts for a data frame (checksum included).
pub const MAX_FRAME_DATA_LEN: usize = MAX_COMPRESSED_BLOCK_SIZE + CHECKSUM_SIZE;

/// Largest value representable by the 3-byte length field.
pub const MAX_FRAME_LEN_FIELD: usize = (1 << 24) - 1;

/// Chunk type byte plus 3-byte length.
pub const HEADER_SIZE: usize = 4;

/// Header plus checksum, as emitted in front of every data block.
pub const DATA_HEADER_SIZE: usize = HEADER_SIZE + CHECKSUM_SIZE;

/// Payload of the stream identifier frame.
pub const STREAM_IDENTIFIER_BODY: [u8; 6] = *b"sNaPpY";

/// The complete stream identifier frame, header included.
pub const STREAM_IDENTIFIER: [u8; 10] = [0xff, 0x06, 0x00, 0x00, b's', b'N', b'a', b'P', b'p', b'Y'];

/// The type tag of a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChunkType {
    /// 0x00: Snappy-compressed block.
    Compressed,
    /// 0x01: raw block.
    Uncompressed,
    /// 0x02..=0x7f: reserved, must not be skipped.
    Unskippable(u8),
    /// 0x80..=0xfd: reserved, skipped without inspection.
    Skippable(u8),
    /// 0xfe: padding, skipped without inspection.
    Padding,
    /// 0xff: stream identifier.
    StreamIdentifier,
}

impl ChunkType {
    /// Wire tag for this chunk type.
    pub fn to_byte(self) -> u8 {
        match self {
            ChunkType::Compressed => 0x00,
            ChunkType::Uncompressed => 0x01,
            ChunkType::Unskippable(b) | ChunkType::Skippable(b) => b,
            ChunkType::Padding => 0xfe,
            ChunkType::StreamIdentifier => 0xff,
        }
    }
}

impl From<u8> for ChunkType {
    fn from(b: u8) -> Self {
        match b {
            0x00 => ChunkType::Compressed,
            0x01 => ChunkType::Uncompressed,
            0x02..=0x7f => ChunkType::Unskippable(b),
            0x80..=0xfd => ChunkType::Skippable(b),
            0xfe => ChunkType::Padding,
            0xff => ChunkType::StreamIdentifier,
        }
    }
}

impl From<ChunkType> for u8 {
    fn from(t: ChunkType) -> u8 {
        t.to_byte()
    }
}

/// A decoded 4-byte frame header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameHeader {
    pub chunk_type: ChunkType,
    /// Length of the data section that follows the header.
    pub len: usize,
}

impl FrameHeader {
    pub fn new(chunk_type: ChunkType, len: usize) -> Self {
        Self { chunk_type, len }
    }

    pub fn parse(bytes: [u8; HEADER_SIZE]) -> Self {
        let len = u32::from_le_bytes([bytes[1], bytes[2], bytes[3], 0]) as usize;
        Self {
            chunk_type: ChunkType::from(bytes[0]),
            len,
        }
    }

    /// Encodes the header, rejecting lengths the 3-byte field cannot hold.
    pub fn to_bytes(&self) -> Result<[u8; HEADER_SIZE]> {
        if self.len > MAX_FRAME_LEN_FIELD {
            return Err(Error::block_too_large(self.len, MAX_FRAME_LEN_FIELD));
        }
        let len = (self.len as u32).to_le_bytes();
        Ok([self.chunk_type.to_byte(), len[0], len[1], len[2]])
    }

    /// Reads the next header.
    ///
    /// Returns Ok(None) on clean EOF (no header byte available). A header cut
    /// short after its first byte is `Error::UnexpectedEof`.
    pub fn read_from<R: Read>(reader: &mut R) -> Result<Option<Self>> {
        let mut bytes = [0u8; HEADER_SIZE];
        let mut filled = 0;
        while filled < HEADER_SIZE {
            match reader.read(&mut bytes[filled..]) {
                Ok(0) if filled == 0 => return Ok(None),
                Ok(0) => return Err(Error::UnexpectedEof),
                Ok(n) => filled += n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }
        Ok(Some(Self::parse(bytes)))
    }
}

/// Builds the `[type | length | masked checksum]` prefix of a data frame.
pub fn data_frame_header(
    chunk_type: ChunkType,
    masked_checksum: u32,
    block_len: usize,
) -> Result<[u8; DATA_HEADER_SIZE]> {
    let header = FrameHeader::new(chunk_type, block_len + CHECKSUM_SIZE).to_bytes()?;
    let mut out = [0u8; DATA_HEADER_SIZE];
    out[..HEADER_SIZE].copy_from_slice(&header);
    out[HEADER_SIZE..].copy_from_slice(&masked_checksum.to_le_bytes());
    Ok(out)
}

/// Reads and drops exactly `len` bytes without buffering them.
pub fn discard<R: Read>(reader: &mut R, len: usize) -> Result<()> {
    let skipped = io::copy(&mut reader.take(len as u64), &mut io::sink()).map_err(mid_frame)?;
    if skipped != len as u64 {
        return Err(Error::UnexpectedEof);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_chunk_type_ranges() {
        assert_eq!(ChunkType::from(0x00), ChunkType::Compressed);
        assert_eq!(ChunkType::from(0x01), ChunkType::Uncompressed);
        assert_eq!(ChunkType::from(0x02), ChunkType::Unskippable(0x02));
        assert_eq!(ChunkType::from(0x7f), ChunkType::Unskippable(0x7f));
        assert_eq!(ChunkType::from(0x80), ChunkType::Skippable(0x80));
        assert_eq!(ChunkType::from(0xfd), ChunkType::Skippable(0xfd));
        assert_eq!(ChunkType::from(0xfe), ChunkType::Padding);
        assert_eq!(ChunkType::from(0xff), ChunkType::StreamIdentifier);
    }

    #[test]
    fn test_chunk_type_byte_is_preserved() {
        for b in 0..=u8::MAX {
            assert_eq!(ChunkType::from(b).to_byte(), b);
        }
    }

    #[test]
    fn test_header_layout() {
        let bytes = FrameHeader::new(ChunkType::Padding, 0x012345).to_bytes().unwrap();
        assert_eq!(bytes, [0xfe, 0x45, 0x23, 0x01]);
        assert_eq!(
            FrameHeader::parse(bytes),
            FrameHeader::new(ChunkType::Padding, 0x012345)
        );
    }

    #[test]
    fn test_header_rejects_oversized_length() {
        let result = FrameHeader::new(ChunkType::Compressed, 1 << 24).to_bytes();
        assert!(matches!(result, Err(Error::BlockTooLarge { .. })));
    }

    #[test]
    fn test_stream_identifier_is_a_valid_frame() {
        let header = FrameHeader::parse([
            STREAM_IDENTIFIER[0],
            STREAM_IDENTIFIER[1],
            STREAM_IDENTIFIER[2],
            STREAM_IDENTIFIER[3],
        ]);
        assert_eq!(header.chunk_type, ChunkType::StreamIdentifier);
        assert_eq!(header.len, STREAM_IDENTIFIER_BODY.len());
        assert_eq!(&STREAM_IDENTIFIER[HEADER_SIZE..], &STREAM_IDENTIFIER_BODY);
    }

    #[test]
    fn test_data_frame_header() {
        let out = data_frame_header(ChunkType::Compressed, 0xdead_beef, 6).unwrap();
        assert_eq!(out, [0x00, 10, 0, 0, 0xef, 0xbe, 0xad, 0xde]);
    }

    #[test]
    fn test_read_header_clean_eof() {
        let mut cur = Cursor::new(Vec::<u8>::new());
        assert!(FrameHeader::read_from(&mut cur).unwrap().is_none());
    }

    #[test]
    fn test_read_header_truncated() {
        let mut cur = Cursor::new(vec![0xff, 0x06]);
        assert!(matches!(
            FrameHeader::read_from(&mut cur),
            Err(Error::UnexpectedEof)
        ));
    }

    #[test]
    fn test_discard() {
        let mut cur = Cursor::new(vec![1u8, 2, 3, 4, 5]);
        discard(&mut cur, 3).unwrap();
        assert_eq!(cur.position(), 3);
        assert!(matches!(discard(&mut cur, 3), Err(Error::UnexpectedEof)));
    }

    #[test]
    fn test_limits_are_consistent() {
        assert_eq!(MAX_COMPRESSED_BLOCK_SIZE, snap::raw::max_compress_len(MAX_BLOCK_SIZE));
        assert!(MAX_FRAME_DATA_LEN <= MAX_FRAME_LEN_FIELD);
        assert!(snap::raw::max_compress_len(MAX_BLOCK_INPUT_SIZE) + CHECKSUM_SIZE <= MAX_FRAME_DATA_LEN);
    }
}
