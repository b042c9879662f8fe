use std::io::{Read, Result};

#[allow(dead_code)]
pub struct FaultyReader<R: Read> {
    inner: R,
    mode: FaultMode,
    counter: usize,
    delivered: usize,
}

#[allow(dead_code)]
pub enum FaultMode {
    OneByteChunks,
    InterruptedEvery(usize),
    /// Clean EOF from the n-th read call on.
    PrematureEofAt(usize),
    /// Never hands out more than n bytes per call, so headers arrive split.
    ShortReads(usize),
    /// Clean EOF once n bytes in total have been delivered, wherever that lands.
    EofAfterBytes(usize),
}

#[allow(dead_code)]
impl<R: Read> FaultyReader<R> {
    pub fn new(inner: R, mode: FaultMode) -> Self {
        Self {
            inner,
            mode,
            counter: 0,
            delivered: 0,
        }
    }
}

impl<R: Read> Read for FaultyReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize> {
        self.counter += 1;
        match self.mode {
            FaultMode::OneByteChunks => {
                if buf.is_empty() {
                    return Ok(0);
                }
                let mut tmp = [0u8; 1];
                match self.inner.read(&mut tmp) {
                    Ok(0) => Ok(0),
                    Ok(1) => {
                        buf[0] = tmp[0];
                        Ok(1)
                    }
                    Ok(_) => unreachable!(),
                    Err(e) => Err(e),
                }
            }
            FaultMode::InterruptedEvery(n) if n != 0 && self.counter % n == 0 => {
                Err(std::io::Error::from(std::io::ErrorKind::Interrupted))
            }
            FaultMode::PrematureEofAt(n) if self.counter >= n => Ok(0),
            FaultMode::ShortReads(n) => {
                let len = buf.len().min(n);
                self.inner.read(&mut buf[..len])
            }
            FaultMode::EofAfterBytes(n) => {
                let len = buf.len().min(n.saturating_sub(self.delivered));
                if len == 0 {
                    return Ok(0);
                }
                let read = self.inner.read(&mut buf[..len])?;
                self.delivered += read;
                Ok(read)
            }
            _ => self.inner.read(buf),
        }
    }
}

/// Counts the bytes pulled from the inner reader.
#[allow(dead_code)]
pub struct CountingReader<R: Read> {
    inner: R,
    pub bytes_read: usize,
}

#[allow(dead_code)]
impl<R: Read> CountingReader<R> {
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            bytes_read: 0,
        }
    }
}

impl<R: Read> Read for CountingReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize> {
        let n = self.inner.read(buf)?;
        self.bytes_read += n;
        Ok(n)
    }
}
