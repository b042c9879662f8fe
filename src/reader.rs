//! A validating, decompressing reader for `snapstream`.

use crate::buffer::{PendingBuffer, ScratchBuffer};
use crate::checksum::ChecksumMode;
use crate::codec::Snappy;
use crate::error::{mid_frame, Error, Result};
use crate::framing::{
    discard, ChunkType, FrameHeader, CHECKSUM_SIZE, MAX_BLOCK_SIZE, MAX_FRAME_DATA_LEN,
    STREAM_IDENTIFIER_BODY,
};
use crate::traits::BlockCodec;
use std::io::{self, BufRead, Read};
use tracing::{debug, trace, warn};

/// A reader that decodes a framed stream back into the original bytes.
///
/// Frames are pulled from the underlying reader one at a time. Decoded blocks
/// land in an internal pending buffer that serves `read` calls of any size,
/// so a caller asking for a few bytes at a time never forces more than one
/// frame to be decoded per call.
///
/// The reader provides two APIs:
///
/// 1. **`std::io::Read` / `BufRead`**: a flat byte stream for any consumer.
/// 2. **Processor API** (`process_all()`): closure-based access to decoded
///    blocks borrowed from the internal buffer.
///
/// Clean end of stream is only reported at a frame boundary. A stream that
/// stops inside a frame yields `Error::UnexpectedEof` (surfaced through
/// `Read` as `io::ErrorKind::UnexpectedEof`). After any error the reader is
/// poisoned and every later call fails.
///
/// ```rust
/// use snapstream::{ChecksumMode, FrameReader, FrameWriter};
/// use std::io::Write;
///
/// let mut writer = FrameWriter::new(Vec::new());
/// writer.write_all(b"first block")?;
/// let framed = writer.into_inner();
///
/// let mut reader = FrameReader::with_checksum_mode(&framed[..], ChecksumMode::Verify);
/// let mut total = 0;
/// reader.process_all(|block| {
///     total += block.len();
///     Ok(())
/// })?;
/// assert_eq!(total, 11);
/// # Ok::<(), snapstream::Error>(())
/// ```
pub struct FrameReader<R: Read, C: BlockCodec = Snappy> {
    reader: R,
    codec: C,
    checksum_mode: ChecksumMode,
    pending: PendingBuffer,
    // Raw data section of the current frame, checksum included.
    frame: ScratchBuffer,
    decoded: ScratchBuffer,
    seen_stream_identifier: bool,
    poisoned: bool,
}

impl<R: Read> FrameReader<R, Snappy> {
    /// Creates a new `FrameReader` that verifies every checksum.
    pub fn new(reader: R) -> Self {
        Self::with_checksum_mode(reader, ChecksumMode::Verify)
    }

    /// Creates a new `FrameReader` with the given checksum handling.
    pub fn with_checksum_mode(reader: R, checksum_mode: ChecksumMode) -> Self {
        Self::with_codec(reader, Snappy::new(), checksum_mode)
    }
}

impl<R: Read, C: BlockCodec> FrameReader<R, C> {
    /// Creates a new `FrameReader` with an explicit block codec.
    pub fn with_codec(reader: R, codec: C, checksum_mode: ChecksumMode) -> Self {
        Self {
            reader,
            codec,
            checksum_mode,
            pending: PendingBuffer::new(),
            frame: ScratchBuffer::with_limit(MAX_FRAME_DATA_LEN),
            decoded: ScratchBuffer::with_limit(MAX_BLOCK_SIZE),
            seen_stream_identifier: false,
            poisoned: false,
        }
    }

    pub fn checksum_mode(&self) -> ChecksumMode {
        self.checksum_mode
    }

    /// Decoded bytes buffered but not yet returned to the caller.
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Processes the rest of the stream using a closure.
    ///
    /// The closure receives already-buffered bytes first, then one slice per
    /// non-empty data frame, borrowed from the internal buffer. Returning an
    /// error from the closure stops processing and is passed through.
    ///
    /// # Returns
    /// * `Ok(())` - The stream ended cleanly at a frame boundary
    /// * `Err(e)` - A frame was invalid, I/O failed, or the closure failed
    pub fn process_all<F>(&mut self, mut processor: F) -> Result<()>
    where
        F: FnMut(&[u8]) -> Result<()>,
    {
        loop {
            if self.pending.is_empty() && !self.fill_pending()? {
                return Ok(());
            }
            processor(self.pending.readable())?;
            self.pending.clear();
        }
    }

    /// Decodes frames until the pending buffer is non-empty.
    /// Returns Ok(false) on clean EOF.
    fn fill_pending(&mut self) -> Result<bool> {
        loop {
            if !self.next_frame()? {
                return Ok(false);
            }
            if !self.pending.is_empty() {
                return Ok(true);
            }
        }
    }

    /// Decodes up to and including the next data frame.
    /// Returns Ok(true) when a data frame was decoded, Ok(false) on clean EOF.
    fn next_frame(&mut self) -> Result<bool> {
        if self.poisoned {
            return Err(Error::Poisoned);
        }
        let result = self.decode_frame();
        if result.is_err() {
            self.poisoned = true;
        }
        result
    }

    fn decode_frame(&mut self) -> Result<bool> {
        loop {
            let header = match FrameHeader::read_from(&mut self.reader)? {
                Some(header) => header,
                None => return Ok(false),
            };

            if !self.seen_stream_identifier && header.chunk_type != ChunkType::StreamIdentifier {
                let chunk_type = header.chunk_type.to_byte();
                warn!(chunk_type, "frame before stream identifier");
                return Err(Error::MissingStreamIdentifier { chunk_type });
            }

            match header.chunk_type {
                ChunkType::StreamIdentifier => self.read_stream_identifier(header.len)?,
                ChunkType::Compressed | ChunkType::Uncompressed => {
                    self.read_data_frame(header)?;
                    return Ok(true);
                }
                ChunkType::Padding | ChunkType::Skippable(_) => {
                    discard(&mut self.reader, header.len)?;
                    debug!(
                        chunk_type = header.chunk_type.to_byte(),
                        len = header.len,
                        "skipped frame"
                    );
                }
                ChunkType::Unskippable(chunk_type) => {
                    discard(&mut self.reader, header.len)?;
                    warn!(chunk_type, len = header.len, "unskippable frame");
                    return Err(Error::UnskippableChunk { chunk_type });
                }
            }
        }
    }

    fn read_stream_identifier(&mut self, len: usize) -> Result<()> {
        if len != STREAM_IDENTIFIER_BODY.len() {
            return Err(Error::InvalidStreamIdentifier);
        }
        let mut body = [0u8; STREAM_IDENTIFIER_BODY.len()];
        self.reader.read_exact(&mut body).map_err(mid_frame)?;
        if body != STREAM_IDENTIFIER_BODY {
            return Err(Error::InvalidStreamIdentifier);
        }
        if !self.seen_stream_identifier {
            debug!("accepted stream identifier");
        }
        self.seen_stream_identifier = true;
        Ok(())
    }

    fn read_data_frame(&mut self, header: FrameHeader) -> Result<()> {
        // Checked before allocating or reading anything. Compressed blocks may
        // expand past MAX_BLOCK_SIZE; raw blocks may not.
        let max_len = match header.chunk_type {
            ChunkType::Uncompressed => MAX_BLOCK_SIZE + CHECKSUM_SIZE,
            _ => MAX_FRAME_DATA_LEN,
        };
        if header.len > max_len {
            return Err(Error::block_too_large(header.len, max_len));
        }
        if header.len < CHECKSUM_SIZE {
            return Err(Error::invalid_frame(format!(
                "data frame of {} bytes cannot hold its checksum",
                header.len
            )));
        }

        let frame = self.frame.get_mut(header.len)?;
        self.reader.read_exact(frame).map_err(mid_frame)?;
        let (checksum, block) = frame.split_at(CHECKSUM_SIZE);
        let masked = u32::from_le_bytes([checksum[0], checksum[1], checksum[2], checksum[3]]);

        let decoded: &[u8] = if header.chunk_type == ChunkType::Compressed {
            let decoded_len = self.codec.decompressed_len(block)?;
            if decoded_len > MAX_BLOCK_SIZE {
                return Err(Error::block_too_large(decoded_len, MAX_BLOCK_SIZE));
            }
            let dst = self.decoded.get_mut(decoded_len)?;
            let written = self.codec.decompress(block, dst)?;
            &dst[..written]
        } else {
            block
        };

        if let Err(e) = self.checksum_mode.verify(masked, decoded) {
            warn!(error = %e, "rejecting corrupt block");
            return Err(e);
        }
        self.pending.extend(decoded);

        trace!(
            chunk_type = header.chunk_type.to_byte(),
            len = header.len,
            decoded_len = decoded.len(),
            "decoded frame"
        );
        Ok(())
    }

    /// Gets a reference to the underlying reader.
    pub fn get_ref(&self) -> &R {
        &self.reader
    }

    /// Gets a mutable reference to the underlying reader.
    ///
    /// Reading from it directly desynchronizes the frame stream.
    pub fn get_mut(&mut self) -> &mut R {
        &mut self.reader
    }

    /// Consumes the reader, returning the underlying reader. Pending decoded
    /// bytes are dropped.
    pub fn into_inner(self) -> R {
        self.reader
    }
}

impl<R: Read, C: BlockCodec> Read for FrameReader<R, C> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if self.pending.len() < buf.len() {
            self.fill_pending()?;
        }
        Ok(self.pending.read(buf))
    }
}

impl<R: Read, C: BlockCodec> BufRead for FrameReader<R, C> {
    fn fill_buf(&mut self) -> io::Result<&[u8]> {
        if self.pending.is_empty() {
            self.fill_pending()?;
        }
        Ok(self.pending.readable())
    }

    fn consume(&mut self, amt: usize) {
        self.pending.consume(amt);
    }
}
