//! Core traits for the snapstream library.

use crate::error::Result;

/// A raw block compressor/decompressor used to encode the body of data frames.
///
/// The framing layer never inspects compressed bytes itself; it sizes its
/// scratch buffers from `max_compressed_len` and `decompressed_len` and hands
/// whole blocks to the codec. [`Snappy`](crate::codec::Snappy) is the codec the
/// format is defined for, but any codec producing self-describing blocks fits.
pub trait BlockCodec {
    /// Upper bound on the encoded size of an `input_len`-byte block.
    fn max_compressed_len(&self, input_len: usize) -> usize;

    /// Compresses `input` into `output`, returning the number of bytes written.
    ///
    /// `output` is at least `max_compressed_len(input.len())` bytes long.
    fn compress(&mut self, input: &[u8], output: &mut [u8]) -> Result<usize>;

    /// Reads the decoded length of a compressed block without decoding it.
    fn decompressed_len(&self, input: &[u8]) -> Result<usize>;

    /// Decompresses `input` into `output`, returning the number of bytes written.
    ///
    /// `output` is at least `decompressed_len(input)` bytes long.
    fn decompress(&mut self, input: &[u8], output: &mut [u8]) -> Result<usize>;
}

impl<C: BlockCodec + ?Sized> BlockCodec for &mut C {
    fn max_compressed_len(&self, input_len: usize) -> usize {
        (**self).max_compressed_len(input_len)
    }

    fn compress(&mut self, input: &[u8], output: &mut [u8]) -> Result<usize> {
        (**self).compress(input, output)
    }

    fn decompressed_len(&self, input: &[u8]) -> Result<usize> {
        (**self).decompressed_len(input)
    }

    fn decompress(&mut self, input: &[u8], output: &mut [u8]) -> Result<usize> {
        (**self).decompress(input, output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checksum::ChecksumMode;
    use crate::codec::Snappy;
    use crate::reader::FrameReader;
    use crate::writer::FrameWriter;
    use std::io::{Read, Write};

    #[test]
    fn test_borrowed_codec_serves_both_directions() {
        let mut codec = Snappy::new();

        let mut writer = FrameWriter::with_codec(Vec::new(), &mut codec);
        writer.write_all(b"one codec, many streams").unwrap();
        let framed = writer.into_inner();
        assert_eq!(framed, {
            let mut owned = FrameWriter::new(Vec::new());
            owned.write_all(b"one codec, many streams").unwrap();
            owned.into_inner()
        });

        let mut reader = FrameReader::with_codec(&framed[..], &mut codec, ChecksumMode::Verify);
        let mut out = Vec::new();
        reader.read_to_end(&mut out).unwrap();
        assert_eq!(out, b"one codec, many streams");

        // Still usable once the borrows end.
        assert!(codec.max_compressed_len(1) > 1);
    }
}
