//! # snapstream (v0.1.0)
//!
//! Streaming reader and writer for the Snappy framing format.
//!
//! ## Overview
//!
//! `snapstream` wraps any `std::io::Write` or `std::io::Read` in an adapter
//! that speaks the framed Snappy stream format: a `sNaPpY` stream identifier,
//! then a sequence of typed, length-prefixed frames whose blocks are
//! compressed and protected by a masked CRC32-C.
//!
//! ## Key Features
//!
//! * **Drop-in I/O**: `FrameWriter` implements `Write`, `FrameReader` implements `Read` and `BufRead`
//! * **Bounded Memory**: scratch buffers are reused and never exceed the 64 KiB block ceiling
//! * **Integrity Checks**: CRC32-C verification, switchable with `ChecksumMode`
//! * **Strict Parsing**: oversized lengths, unknown unskippable frames and truncated
//!   frames are errors, never silent end-of-stream
//!
//! ## Quick Start
//!
//! ```rust
//! use snapstream::{FrameReader, FrameWriter};
//! use std::io::{Read, Write};
//!
//! fn main() -> std::io::Result<()> {
//!     let mut writer = FrameWriter::new(Vec::new());
//!     writer.write_all(b"compress me, then read me back")?;
//!     writer.flush()?;
//!     let framed = writer.into_inner();
//!
//!     let mut reader = FrameReader::new(&framed[..]);
//!     let mut text = String::new();
//!     reader.read_to_string(&mut text)?;
//!     assert_eq!(text, "compress me, then read me back");
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! * **`framing`**: wire constants, `ChunkType` and `FrameHeader`
//! * **`checksum`**: the CRC32-C mask and `ChecksumMode`
//! * **`BlockCodec`**: the seam to the raw block compressor (`Snappy` by default)
//! * **`FrameWriter` / `FrameReader`**: the two stream adapters

mod buffer;
pub mod checksum;
pub mod codec;
pub mod error;
pub mod framing;
pub mod reader;
pub mod traits;
pub mod writer;

// Re-export the main public API for user convenience.
pub use checksum::ChecksumMode;
pub use codec::Snappy;
pub use error::{Error, Result};
pub use framing::{ChunkType, FrameHeader, MAX_BLOCK_SIZE, STREAM_IDENTIFIER};
pub use reader::FrameReader;
pub use traits::BlockCodec;
pub use writer::FrameWriter;
