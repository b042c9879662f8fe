use std::io;
use thiserror::Error;

/// Custom error types for the snapstream library.
#[derive(Error, Debug)]
pub enum Error {
    /// Underlying I/O errors from std::io operations.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The stream ended part way through a frame.
    #[error("Unexpected end of file while reading stream")]
    UnexpectedEof,

    /// A frame other than the stream identifier arrived before the identifier.
    #[error("Missing stream identifier: first frame has type {chunk_type:#04x}")]
    MissingStreamIdentifier { chunk_type: u8 },

    /// The stream identifier frame has the wrong length or content.
    #[error("Invalid stream identifier")]
    InvalidStreamIdentifier,

    /// A declared or decoded block size exceeds the protocol limit.
    #[error("Block too large: {len} bytes exceeds limit of {max}")]
    BlockTooLarge { len: usize, max: usize },

    /// Invalid frame error for malformed frames.
    #[error("Invalid frame: {message}")]
    InvalidFrame { message: String },

    /// Checksum mismatch error when calculated checksum doesn't match stored checksum.
    #[error("Checksum mismatch: expected {expected:#010x}, got {calculated:#010x}")]
    ChecksumMismatch { expected: u32, calculated: u32 },

    /// A reserved chunk type that readers are not allowed to skip.
    #[error("Unskippable chunk of type {chunk_type:#04x}")]
    UnskippableChunk { chunk_type: u8 },

    /// Errors reported by the Snappy block codec.
    #[error("Compression error: {0}")]
    Compression(#[from] snap::Error),

    /// The reader already failed and will not make further progress.
    #[error("Reader is unusable after a previous error")]
    Poisoned,
}

impl Error {
    /// Create a new `InvalidFrame` error with a descriptive message.
    pub fn invalid_frame(message: impl Into<String>) -> Self {
        Self::InvalidFrame {
            message: message.into(),
        }
    }

    /// Create a new `ChecksumMismatch` error with expected and calculated values.
    pub fn checksum_mismatch(expected: u32, calculated: u32) -> Self {
        Self::ChecksumMismatch {
            expected,
            calculated,
        }
    }

    pub fn block_too_large(len: usize, max: usize) -> Self {
        Self::BlockTooLarge { len, max }
    }
}

impl From<Error> for io::Error {
    fn from(err: Error) -> Self {
        match err {
            Error::Io(e) => e,
            Error::UnexpectedEof => io::Error::new(io::ErrorKind::UnexpectedEof, Error::UnexpectedEof),
            other => io::Error::new(io::ErrorKind::InvalidData, other),
        }
    }
}

/// Maps a short `read_exact` inside a frame to `Error::UnexpectedEof`.
pub(crate) fn mid_frame(e: io::Error) -> Error {
    match e.kind() {
        io::ErrorKind::UnexpectedEof => Error::UnexpectedEof,
        _ => e.into(),
    }
}

/// Result type alias for the library operations.
pub type Result<T> = std::result::Result<T, Error>;
