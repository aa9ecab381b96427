//! Output sinks: where formatted bytes go.

use std::io::Write;

use crate::error::FmtError;

/// Receives formatted output as a sequence of byte runs.
pub trait Sink {
    fn write_bytes(&mut self, bytes: &[u8]) -> Result<(), FmtError>;

    /// Write `count` copies of `byte`.
    fn write_repeated(&mut self, byte: u8, count: usize) -> Result<(), FmtError> {
        const CHUNK: usize = 32;
        let chunk = [byte; CHUNK];
        let mut left = count;
        while left > 0 {
            let take = left.min(CHUNK);
            self.write_bytes(&chunk[..take])?;
            left -= take;
        }
        Ok(())
    }
}

impl Sink for Vec<u8> {
    fn write_bytes(&mut self, bytes: &[u8]) -> Result<(), FmtError> {
        self.extend_from_slice(bytes);
        Ok(())
    }
}

impl<S: Sink + ?Sized> Sink for &mut S {
    fn write_bytes(&mut self, bytes: &[u8]) -> Result<(), FmtError> {
        (**self).write_bytes(bytes)
    }
}

/// Adapter from any [`std::io::Write`].
#[derive(Debug)]
pub struct IoSink<W: Write> {
    inner: W,
}

impl<W: Write> IoSink<W> {
    pub fn new(inner: W) -> Self {
        Self { inner }
    }

    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: Write> Sink for IoSink<W> {
    fn write_bytes(&mut self, bytes: &[u8]) -> Result<(), FmtError> {
        self.inner.write_all(bytes)?;
        Ok(())
    }
}

/// Sink over the process's standard output.
#[must_use]
pub fn stdout_sink() -> IoSink<std::io::Stdout> {
    IoSink::new(std::io::stdout())
}
