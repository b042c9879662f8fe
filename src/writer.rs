//! A framing, compressing writer for `snapstream`.

use crate::buffer::ScratchBuffer;
use crate::checksum::masked_crc32c;
use crate::codec::Snappy;
use crate::error::{Error, Result};
use crate::framing::{
    data_frame_header, ChunkType, CHECKSUM_SIZE, MAX_BLOCK_INPUT_SIZE, MAX_COMPRESSED_BLOCK_SIZE,
    MAX_FRAME_DATA_LEN, STREAM_IDENTIFIER,
};
use crate::traits::BlockCodec;
use std::io::{self, Write};
use tracing::{debug, trace};

/// A writer that frames and compresses everything written to it.
///
/// Input of any length is split into blocks of at most
/// [`MAX_BLOCK_INPUT_SIZE`] bytes. Each block becomes one compressed frame
/// carrying the masked CRC32-C of the uncompressed bytes. The stream
/// identifier is written once, in front of the first frame.
///
/// The writer keeps no buffered data between calls, so dropping it never
/// loses bytes; `flush` only flushes the wrapped writer.
///
/// ```rust
/// use snapstream::{FrameReader, FrameWriter};
/// use std::io::{Read, Write};
///
/// let mut writer = FrameWriter::new(Vec::new());
/// writer.write_all(b"hello, framed world")?;
/// let framed = writer.into_inner();
///
/// let mut out = String::new();
/// FrameReader::new(&framed[..]).read_to_string(&mut out)?;
/// assert_eq!(out, "hello, framed world");
/// # Ok::<(), std::io::Error>(())
/// ```
pub struct FrameWriter<W: Write, C: BlockCodec = Snappy> {
    writer: W,
    codec: C,
    compressed: ScratchBuffer,
    wrote_stream_identifier: bool,
    blocks_written: u64,
}

impl<W: Write> FrameWriter<W, Snappy> {
    /// Creates a new `FrameWriter` compressing with Snappy.
    pub fn new(writer: W) -> Self {
        Self::with_codec(writer, Snappy::new())
    }
}

impl<W: Write, C: BlockCodec> FrameWriter<W, C> {
    /// Creates a new `FrameWriter` with an explicit block codec.
    pub fn with_codec(writer: W, codec: C) -> Self {
        Self {
            writer,
            codec,
            compressed: ScratchBuffer::with_limit(MAX_COMPRESSED_BLOCK_SIZE),
            wrote_stream_identifier: false,
            blocks_written: 0,
        }
    }

    /// Frames and writes all of `data`, returning `data.len()`.
    ///
    /// Any failure aborts the whole call; frames for earlier blocks of the
    /// same call may already have reached the underlying writer.
    pub fn frame_and_write(&mut self, data: &[u8]) -> Result<usize> {
        for block in data.chunks(MAX_BLOCK_INPUT_SIZE) {
            self.write_block(block)?;
        }
        Ok(data.len())
    }

    fn write_block(&mut self, block: &[u8]) -> Result<()> {
        if block.len() > MAX_BLOCK_INPUT_SIZE {
            return Err(Error::block_too_large(block.len(), MAX_BLOCK_INPUT_SIZE));
        }

        let bound = self.codec.max_compressed_len(block.len());
        let dst = self.compressed.get_mut(bound)?;
        let compressed_len = self.codec.compress(block, dst)?;
        if compressed_len + CHECKSUM_SIZE > MAX_FRAME_DATA_LEN {
            return Err(Error::block_too_large(
                compressed_len + CHECKSUM_SIZE,
                MAX_FRAME_DATA_LEN,
            ));
        }

        if !self.wrote_stream_identifier {
            self.writer.write_all(&STREAM_IDENTIFIER)?;
            self.wrote_stream_identifier = true;
            debug!("wrote stream identifier");
        }

        let header = data_frame_header(
            ChunkType::Compressed,
            masked_crc32c(block),
            compressed_len,
        )?;
        self.writer.write_all(&header)?;
        self.writer
            .write_all(self.compressed.as_slice(compressed_len))?;
        self.blocks_written += 1;

        trace!(
            input_len = block.len(),
            compressed_len,
            "wrote compressed frame"
        );
        Ok(())
    }

    /// Number of data frames emitted so far.
    pub fn blocks_written(&self) -> u64 {
        self.blocks_written
    }

    /// Gets a reference to the underlying writer.
    pub fn get_ref(&self) -> &W {
        &self.writer
    }

    /// Gets a mutable reference to the underlying writer.
    ///
    /// Writing to it directly corrupts the framed stream.
    pub fn get_mut(&mut self) -> &mut W {
        &mut self.writer
    }

    /// Consumes the writer, returning the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write, C: BlockCodec> Write for FrameWriter<W, C> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        Ok(self.frame_and_write(buf)?)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}
