use std::io::{self, BufRead, Read};

use bytes::Bytes;

use super::error::DecodeError;

/// Upper bound on the up-front allocation for a string read from a stream.
/// Larger strings grow the buffer as bytes actually arrive.
const READ_CHUNK: usize = 64 * 1024;

/// A byte source with one byte of lookahead.
///
/// The grammar only ever needs to look at the next byte before committing to
/// a production, so this is all the parser requires from its input.
pub(crate) trait Source {
    /// Absolute offset of the next unread byte.
    fn position(&self) -> usize;

    /// Returns the next byte without consuming it, or `None` at end of input.
    fn peek(&mut self) -> Result<Option<u8>, DecodeError>;

    /// Consumes the byte last returned by [`Source::peek`].
    fn bump(&mut self);

    fn next_byte(&mut self) -> Result<Option<u8>, DecodeError> {
        let byte = self.peek()?;
        if byte.is_some() {
            self.bump();
        }
        Ok(byte)
    }

    /// Reads exactly `len` raw bytes.
    fn take(&mut self, len: usize) -> Result<Bytes, DecodeError>;
}

impl<S: Source + ?Sized> Source for &mut S {
    fn position(&self) -> usize {
        (**self).position()
    }

    fn peek(&mut self) -> Result<Option<u8>, DecodeError> {
        (**self).peek()
    }

    fn bump(&mut self) {
        (**self).bump()
    }

    fn take(&mut self, len: usize) -> Result<Bytes, DecodeError> {
        (**self).take(len)
    }
}

pub(crate) struct SliceSource<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> SliceSource<'a> {
    pub(crate) fn new(data: &'a [u8], pos: usize) -> Self {
        Self { data, pos }
    }
}

impl Source for SliceSource<'_> {
    fn position(&self) -> usize {
        self.pos
    }

    fn peek(&mut self) -> Result<Option<u8>, DecodeError> {
        Ok(self.data.get(self.pos).copied())
    }

    fn bump(&mut self) {
        self.pos += 1;
    }

    fn take(&mut self, len: usize) -> Result<Bytes, DecodeError> {
        // Checked before allocating: the declared length is untrusted.
        let remaining = self.data.len().saturating_sub(self.pos);
        if len > remaining {
            return Err(DecodeError::TruncatedInput {
                needed: len - remaining,
                offset: self.data.len(),
            });
        }

        let bytes = Bytes::copy_from_slice(&self.data[self.pos..self.pos + len]);
        self.pos += len;
        Ok(bytes)
    }
}

/// Lookahead over a streaming reader, using the reader's own buffer.
pub(crate) struct ReaderSource<R> {
    inner: R,
    pos: usize,
    limit: Option<usize>,
}

impl<R: BufRead> ReaderSource<R> {
    pub(crate) fn new(inner: R, limit: Option<usize>) -> Self {
        Self {
            inner,
            pos: 0,
            limit,
        }
    }

    pub(crate) fn into_inner(self) -> R {
        self.inner
    }

    fn check_limit(&self, additional: usize) -> Result<(), DecodeError> {
        let wanted = self.pos.saturating_add(additional);
        match self.limit {
            Some(limit) if wanted > limit => Err(DecodeError::InputTooLarge { len: wanted, limit }),
            _ => Ok(()),
        }
    }
}

impl<R: BufRead> Source for ReaderSource<R> {
    fn position(&self) -> usize {
        self.pos
    }

    fn peek(&mut self) -> Result<Option<u8>, DecodeError> {
        let byte = loop {
            match self.inner.fill_buf() {
                Ok(buf) => break buf.first().copied(),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(source) => {
                    return Err(DecodeError::Io {
                        source,
                        offset: self.pos,
                    });
                }
            }
        };

        if byte.is_some() {
            self.check_limit(1)?;
        }
        Ok(byte)
    }

    fn bump(&mut self) {
        self.inner.consume(1);
        self.pos += 1;
    }

    fn take(&mut self, len: usize) -> Result<Bytes, DecodeError> {
        self.check_limit(len)?;

        let mut buf = Vec::with_capacity(len.min(READ_CHUNK));
        let read = Read::take(&mut self.inner, len as u64)
            .read_to_end(&mut buf)
            .map_err(|source| DecodeError::Io {
                source,
                offset: self.pos,
            })?;
        self.pos += read;

        if read < len {
            return Err(DecodeError::TruncatedInput {
                needed: len - read,
                offset: self.pos,
            });
        }
        Ok(Bytes::from(buf))
    }
}
