//! The Snappy block codec behind the framing layer.

use crate::error::Result;
use crate::traits::BlockCodec;
use snap::raw::{Decoder, Encoder};

/// Raw Snappy blocks via the `snap` crate.
///
/// Holds the encoder and decoder so their internal tables are reused across
/// blocks.
pub struct Snappy {
    encoder: Encoder,
    decoder: Decoder,
}

impl Snappy {
    pub fn new() -> Self {
        Self {
            encoder: Encoder::new(),
            decoder: Decoder::new(),
        }
    }
}

impl Default for Snappy {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Snappy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Snappy")
    }
}

impl BlockCodec for Snappy {
    #[inline]
    fn max_compressed_len(&self, input_len: usize) -> usize {
        snap::raw::max_compress_len(input_len)
    }

    fn compress(&mut self, input: &[u8], output: &mut [u8]) -> Result<usize> {
        Ok(self.encoder.compress(input, output)?)
    }

    fn decompressed_len(&self, input: &[u8]) -> Result<usize> {
        Ok(snap::raw::decompress_len(input)?)
    }

    fn decompress(&mut self, input: &[u8], output: &mut [u8]) -> Result<usize> {
        Ok(self.decoder.decompress(input, output)?)
    }
}
