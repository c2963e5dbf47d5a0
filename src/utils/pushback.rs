//! pushback defines reader which is able to return up to two already consumed bytes back to the stream.
//! It's what lookahead in quoted printable decoding needs: at most two bytes are ever read ahead.

use std::io::{self, Cursor, ErrorKind, Read};

/// PUSHBACK_CAPACITY is maximum count of bytes which may be pushed back at once.
pub const PUSHBACK_CAPACITY: usize = 2;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Display)]
pub enum PushbackError {
    /// Overflow is returned when more bytes were pushed back than there is free space for.
    #[display(fmt = "Can't push back {} bytes. Pushback buffer holds at most {} bytes", requested, capacity)]
    Overflow {
        capacity: usize,
        requested: usize,
    },
}

impl std::error::Error for PushbackError {}

impl From<PushbackError> for io::Error {
    fn from(e: PushbackError) -> Self {
        io::Error::new(ErrorKind::Other, e)
    }
}

/// Available is implemented by sources which are able to estimate how many bytes can be read
/// without blocking.
///
/// # Note
/// It's an estimate. Zero does not mean that stream is done.
pub trait Available {
    fn available(&self) -> usize;
}

impl Available for &[u8] {
    #[inline]
    fn available(&self) -> usize {
        self.len()
    }
}

impl<T> Available for Cursor<T>
    where T: AsRef<[u8]>
{
    fn available(&self) -> usize {
        let len = self.get_ref().as_ref().len() as u64;
        len.saturating_sub(self.position()) as usize
    }
}

impl<A> Available for &mut A
    where A: Available + ?Sized
{
    #[inline]
    fn available(&self) -> usize {
        (**self).available()
    }
}

/// PushbackReader wraps any reader and allows unreading up to `PUSHBACK_CAPACITY` bytes.
pub struct PushbackReader<R> {
    reader: R,

    // bytes are stored in reverse order, so the last one is returned first
    buf: [u8; PUSHBACK_CAPACITY],
    buf_sz: u8,
}

impl<R> PushbackReader<R> {
    #[inline]
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            buf: [0u8; PUSHBACK_CAPACITY],
            buf_sz: 0,
        }
    }

    /// unread pushes given bytes back, so they are returned by next reads in the same order
    /// as they are in `data`.
    ///
    /// Pushing back empty slice is no-op.
    pub fn unread(&mut self, data: &[u8]) -> Result<(), PushbackError> {
        let free = PUSHBACK_CAPACITY - self.buf_sz as usize;
        if data.len() > free {
            return Err(PushbackError::Overflow {
                capacity: PUSHBACK_CAPACITY,
                requested: self.buf_sz as usize + data.len(),
            });
        }
        for b in data.iter().rev().copied() {
            self.buf[self.buf_sz as usize] = b;
            self.buf_sz += 1;
        }
        Ok(())
    }

    /// pushed_back returns count of bytes waiting in pushback buffer.
    #[inline]
    pub fn pushed_back(&self) -> usize {
        self.buf_sz as usize
    }

    #[inline]
    pub fn get_ref(&self) -> &R {
        &self.reader
    }

    #[inline]
    pub fn get_mut(&mut self) -> &mut R {
        &mut self.reader
    }

    /// into_inner returns wrapped reader.
    ///
    /// # Note
    /// Bytes which were pushed back and not read again are lost.
    #[inline]
    pub fn into_inner(self) -> R {
        self.reader
    }

    #[inline]
    fn pop(&mut self) -> Option<u8> {
        if self.buf_sz == 0 {
            None
        } else {
            self.buf_sz -= 1;
            Some(self.buf[self.buf_sz as usize])
        }
    }
}

impl<R> PushbackReader<R>
    where R: Read
{
    /// read_byte reads single byte. `None` is returned once underlying reader is done.
    pub fn read_byte(&mut self) -> Result<Option<u8>, io::Error> {
        if let Some(b) = self.pop() {
            return Ok(Some(b));
        }
        let mut arr = [0u8; 1];
        loop {
            match self.reader.read(&mut arr) {
                Ok(0) => return Ok(None),
                Ok(_) => return Ok(Some(arr[0])),
                Err(e) => match e.kind() {
                    ErrorKind::Interrupted => {}
                    _ => return Err(e),
                }
            }
        }
    }
}

impl<R> Read for PushbackReader<R>
    where R: Read
{
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, io::Error> {
        if buf.is_empty() {
            return Ok(0);
        }
        let mut offset = 0;
        while offset < buf.len() {
            match self.pop() {
                Some(b) => {
                    buf[offset] = b;
                    offset += 1;
                }
                None => break,
            }
        }
        if offset > 0 {
            // do not block on inner reader once there is something to return
            return Ok(offset);
        }
        self.reader.read(buf)
    }
}

impl<R> Available for PushbackReader<R>
    where R: Available
{
    fn available(&self) -> usize {
        self.pushed_back() + self.reader.available()
    }
}
