//! Readable byte streams
//!
//! A stream is a cursor over an immutable byte sequence. Reads are
//! bounds-checked and never consume partially: a read that cannot be
//! satisfied leaves the position where it was.
//!
//! Two backings are provided:
//! - `ByteStream<&[u8]>` borrows a buffer (or any sub-slice of one)
//! - `ByteStream<Bytes>` shares a ref-counted `bytes::Bytes`
//!
//! Anything else (files, sockets) can take part by implementing [`ByteRead`].

use ::bytes::Bytes;

use crate::error::{BinaryError, Result};

/// Sequential and random-access reading over a byte sequence
pub trait ByteRead {
    /// Total length of the underlying sequence
    fn len(&self) -> usize;

    /// Index of the next byte to read, in `0..=len()`
    fn position(&self) -> usize;

    /// Read one byte and advance by 1
    fn read_u8(&mut self) -> Result<u8>;

    /// Fill `dst` from the stream and advance by `dst.len()`
    ///
    /// Fails with `InsufficientData` without moving when fewer bytes remain.
    fn read_exact(&mut self, dst: &mut [u8]) -> Result<()>;

    /// Byte at `position() + offset` without advancing
    fn peek(&self, offset: usize) -> Result<u8>;

    /// Move to an absolute position in `0..=len()`
    fn seek_to(&mut self, position: usize) -> Result<()>;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Remaining unread bytes
    fn available(&self) -> usize {
        self.len() - self.position()
    }

    /// Read exactly `n` bytes into a new buffer
    fn read_n(&mut self, n: usize) -> Result<Vec<u8>> {
        let available = self.available();
        if available < n {
            return Err(BinaryError::insufficient_data(n, available));
        }
        let mut buf = vec![0u8; n];
        self.read_exact(&mut buf)?;
        Ok(buf)
    }

    /// Move relative to the current position
    fn seek_by(&mut self, delta: isize) -> Result<()> {
        let target = self.position() as i64 + delta as i64;
        if target < 0 || target > self.len() as i64 {
            return Err(BinaryError::out_of_range(target, self.len()));
        }
        self.seek_to(target as usize)
    }
}

/// Cursor over any contiguous byte buffer
///
/// Positions are relative to the start of the buffer handed in, so a stream
/// over `&data[4..12]` starts at position 0 and has length 8.
#[derive(Debug, Clone)]
pub struct ByteStream<B> {
    data: B,
    pos: usize,
}

/// Stream sharing a ref-counted buffer
pub type SharedByteStream = ByteStream<Bytes>;

impl<B: AsRef<[u8]>> ByteStream<B> {
    pub fn new(data: B) -> Self {
        Self { data, pos: 0 }
    }

    /// Unread part of the buffer
    pub fn remaining(&self) -> &[u8] {
        &self.data.as_ref()[self.pos..]
    }

    pub fn into_inner(self) -> B {
        self.data
    }

    fn check_available(&self, n: usize) -> Result<()> {
        let available = self.available();
        if available < n {
            Err(BinaryError::insufficient_data(n, available))
        } else {
            Ok(())
        }
    }
}

impl SharedByteStream {
    /// Read `n` bytes as a zero-copy slice of the shared buffer
    pub fn read_bytes(&mut self, n: usize) -> Result<Bytes> {
        self.check_available(n)?;
        let out = self.data.slice(self.pos..self.pos + n);
        self.pos += n;
        Ok(out)
    }
}

impl<B: AsRef<[u8]>> ByteRead for ByteStream<B> {
    fn len(&self) -> usize {
        self.data.as_ref().len()
    }

    fn position(&self) -> usize {
        self.pos
    }

    fn read_u8(&mut self) -> Result<u8> {
        self.check_available(1)?;
        let value = self.data.as_ref()[self.pos];
        self.pos += 1;
        Ok(value)
    }

    fn read_exact(&mut self, dst: &mut [u8]) -> Result<()> {
        self.check_available(dst.len())?;
        let end = self.pos + dst.len();
        dst.copy_from_slice(&self.data.as_ref()[self.pos..end]);
        self.pos = end;
        Ok(())
    }

    fn read_n(&mut self, n: usize) -> Result<Vec<u8>> {
        self.check_available(n)?;
        let end = self.pos + n;
        let out = self.data.as_ref()[self.pos..end].to_vec();
        self.pos = end;
        Ok(out)
    }

    fn peek(&self, offset: usize) -> Result<u8> {
        let data = self.data.as_ref();
        self.pos
            .checked_add(offset)
            .and_then(|index| data.get(index).copied())
            .ok_or_else(|| {
                let position = i64::try_from(self.pos.saturating_add(offset)).unwrap_or(i64::MAX);
                BinaryError::out_of_range(position, data.len())
            })
    }

    fn seek_to(&mut self, position: usize) -> Result<()> {
        if position > self.len() {
            return Err(BinaryError::out_of_range(position as i64, self.len()));
        }
        self.pos = position;
        Ok(())
    }
}

/// Anything a conversion entry point can read from
///
/// Raw buffers and sub-slices are wrapped in a fresh stream; an existing
/// stream is borrowed so the caller keeps its position afterwards.
pub enum Source<'a> {
    Borrowed(ByteStream<&'a [u8]>),
    Shared(SharedByteStream),
    Stream(&'a mut dyn ByteRead),
}

impl<'a> Source<'a> {
    /// Borrow a caller-supplied stream implementation
    pub fn from_stream(stream: &'a mut dyn ByteRead) -> Self {
        Source::Stream(stream)
    }

    fn inner(&self) -> &dyn ByteRead {
        match self {
            Source::Borrowed(s) => s,
            Source::Shared(s) => s,
            Source::Stream(s) => &**s,
        }
    }

    fn inner_mut(&mut self) -> &mut dyn ByteRead {
        match self {
            Source::Borrowed(s) => s,
            Source::Shared(s) => s,
            Source::Stream(s) => &mut **s,
        }
    }
}

impl ByteRead for Source<'_> {
    fn len(&self) -> usize {
        self.inner().len()
    }

    fn position(&self) -> usize {
        self.inner().position()
    }

    fn read_u8(&mut self) -> Result<u8> {
        self.inner_mut().read_u8()
    }

    fn read_exact(&mut self, dst: &mut [u8]) -> Result<()> {
        self.inner_mut().read_exact(dst)
    }

    fn read_n(&mut self, n: usize) -> Result<Vec<u8>> {
        self.inner_mut().read_n(n)
    }

    fn peek(&self, offset: usize) -> Result<u8> {
        self.inner().peek(offset)
    }

    fn seek_to(&mut self, position: usize) -> Result<()> {
        self.inner_mut().seek_to(position)
    }

    fn seek_by(&mut self, delta: isize) -> Result<()> {
        self.inner_mut().seek_by(delta)
    }
}

impl<'a> From<&'a [u8]> for Source<'a> {
    fn from(data: &'a [u8]) -> Self {
        Source::Borrowed(ByteStream::new(data))
    }
}

impl<'a, const N: usize> From<&'a [u8; N]> for Source<'a> {
    fn from(data: &'a [u8; N]) -> Self {
        Source::Borrowed(ByteStream::new(data.as_slice()))
    }
}

impl<'a> From<&'a Vec<u8>> for Source<'a> {
    fn from(data: &'a Vec<u8>) -> Self {
        Source::Borrowed(ByteStream::new(data.as_slice()))
    }
}

impl From<Bytes> for Source<'static> {
    fn from(data: Bytes) -> Self {
        Source::Shared(ByteStream::new(data))
    }
}

impl From<Vec<u8>> for Source<'static> {
    fn from(data: Vec<u8>) -> Self {
        Source::Shared(ByteStream::new(Bytes::from(data)))
    }
}

impl<'a, B: AsRef<[u8]> + 'a> From<&'a mut ByteStream<B>> for Source<'a> {
    fn from(stream: &'a mut ByteStream<B>) -> Self {
        Source::Stream(stream)
    }
}
