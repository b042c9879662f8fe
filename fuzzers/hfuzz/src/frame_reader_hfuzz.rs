use honggfuzz::fuzz;
use snapstream::{ChecksumMode, FrameReader, STREAM_IDENTIFIER};
use std::io::{Cursor, Read};

fn main() {
    loop {
        fuzz!(|data: &[u8]| {
            let mut stream = STREAM_IDENTIFIER.to_vec();
            stream.extend_from_slice(data);
            for mode in [ChecksumMode::Verify, ChecksumMode::Skip] {
                let mut out = Vec::new();
                let _ = FrameReader::with_checksum_mode(Cursor::new(&stream), mode)
                    .read_to_end(&mut out);
            }
        });
    }
}
