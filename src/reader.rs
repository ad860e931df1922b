use std::io::{self, Cursor, ErrorKind, Read};

use binrw::BinReaderExt;

use crate::QtError;

/// Byte range an atom (or the whole stream) must be read within.
/// Expressed as an absolute end offset, since the underlying
/// stream is never seeked and only moves forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Span {
    /// Absolute end offset (exclusive).
    /// `None` for "until end of stream".
    pub(crate) end: Option<u64>,
}

impl Span {
    pub(crate) const UNBOUNDED: Span = Span { end: None };

    pub(crate) fn until(end: u64) -> Self {
        Self { end: Some(end) }
    }

    /// Narrows `self` to `end`, never extending past
    /// the current bound.
    pub(crate) fn narrow(&self, end: u64) -> Self {
        match self.end {
            Some(current) => Self::until(current.min(end)),
            None => Self::until(end),
        }
    }
}

/// Position tracking reader over a sequential byte source.
/// All reads are bounded by a `Span`, so that an atom
/// can never read into the bytes of its next sibling.
#[derive(Debug)]
pub(crate) struct AtomReader<R> {
    inner: R,
    /// Number of bytes consumed so far.
    pos: u64,
}

impl<R: Read> AtomReader<R> {
    pub(crate) fn new(inner: R) -> Self {
        Self { inner, pos: 0 }
    }

    pub(crate) fn pos(&self) -> u64 {
        self.pos
    }

    pub(crate) fn into_inner(self) -> R {
        self.inner
    }

    /// Bytes left in `span`. `None` if unbounded.
    pub(crate) fn remaining(&self, span: Span) -> Option<u64> {
        span.end.map(|end| end.saturating_sub(self.pos))
    }

    /// Reads as many bytes as possible into `buf`,
    /// stopping at end of stream or end of `span`.
    /// Returns number of bytes read.
    pub(crate) fn fill(&mut self, span: Span, buf: &mut [u8]) -> Result<usize, QtError> {
        let len = match self.remaining(span) {
            Some(rem) => (rem.min(buf.len() as u64)) as usize,
            None => buf.len(),
        };
        let mut read = 0;
        while read < len {
            match self.inner.read(&mut buf[read..len]) {
                Ok(0) => break,
                Ok(n) => read += n,
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) => return Err(err.into()),
            }
        }
        self.pos += read as u64;
        Ok(read)
    }

    /// Fills `buf` completely or fails with `Truncated`.
    pub(crate) fn read_exact(&mut self, span: Span, buf: &mut [u8]) -> Result<(), QtError> {
        let offset = self.pos;
        let read = self.fill(span, buf)?;
        if read < buf.len() {
            return Err(QtError::Truncated {
                offset,
                needed: buf.len() as u64,
                available: read as u64,
            });
        }
        Ok(())
    }

    /// Reads exactly `N` bytes.
    pub(crate) fn read_array<const N: usize>(&mut self, span: Span) -> Result<[u8; N], QtError> {
        let mut buf = [0_u8; N];
        self.read_exact(span, &mut buf)?;
        Ok(buf)
    }

    /// Reads a Big Endian `u32`.
    pub(crate) fn read_u32(&mut self, span: Span) -> Result<u32, QtError> {
        let buf = self.read_array::<4>(span)?;
        Ok(Cursor::new(buf).read_be::<u32>()?)
    }

    /// Reads a Big Endian `u64`.
    pub(crate) fn read_u64(&mut self, span: Span) -> Result<u64, QtError> {
        let buf = self.read_array::<8>(span)?;
        Ok(Cursor::new(buf).read_be::<u64>()?)
    }

    /// Reads the remainder of `span` into memory.
    /// For unbounded spans this reads until end of stream.
    pub(crate) fn read_to_end(&mut self, span: Span) -> Result<Vec<u8>, QtError> {
        let offset = self.pos;
        let mut buf = Vec::new();
        let read = match self.remaining(span) {
            Some(rem) => {
                let read = (&mut self.inner).take(rem).read_to_end(&mut buf)?;
                if (read as u64) < rem {
                    self.pos += read as u64;
                    return Err(QtError::Truncated {
                        offset,
                        needed: rem,
                        available: read as u64,
                    });
                }
                read
            }
            None => self.inner.read_to_end(&mut buf)?,
        };
        self.pos += read as u64;
        Ok(buf)
    }

    /// Reads and drops whatever is left of `span`.
    /// Returns number of bytes discarded.
    pub(crate) fn discard(&mut self, span: Span) -> Result<u64, QtError> {
        let offset = self.pos;
        match self.remaining(span) {
            Some(0) => Ok(0),
            Some(rem) => {
                let copied = io::copy(&mut (&mut self.inner).take(rem), &mut io::sink())?;
                self.pos += copied;
                if copied < rem {
                    return Err(QtError::Truncated {
                        offset,
                        needed: rem,
                        available: copied,
                    });
                }
                Ok(copied)
            }
            None => {
                let copied = io::copy(&mut self.inner, &mut io::sink())?;
                self.pos += copied;
                Ok(copied)
            }
        }
    }
}
