#![no_main]
use libfuzzer_sys::fuzz_target;
use snapstream::{ChecksumMode, FrameReader, STREAM_IDENTIFIER};
use std::io::Cursor;

fuzz_target!(|data: &[u8]| {
    let mut reader = FrameReader::new(Cursor::new(data));
    let _ = reader.process_all(|_| Ok(()));

    // Skip the identifier check so mutations reach the data frames.
    let mut stream = STREAM_IDENTIFIER.to_vec();
    stream.extend_from_slice(data);
    let mut reader = FrameReader::with_checksum_mode(Cursor::new(stream), ChecksumMode::Skip);
    let _ = reader.process_all(|_| Ok(()));
});
