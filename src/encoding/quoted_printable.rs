use std::io::{self, Read};
use std::string::FromUtf8Error;

use log::trace;

use crate::encoding::Decoder;
use crate::utils::hex::decode_hex_pair;
use crate::utils::pushback::{Available, PushbackReader};

#[derive(Debug, From)]
pub enum QuotedPrintableDecodingError {
    /// Decoded bytes are not valid utf8 string. Quoted printable itself never fails to decode.
    Utf8(FromUtf8Error),
}

/// DecoderState describes whatever or not `QuotedPrintableReader` holds cached spaces
/// which will be returned before any other input is consumed.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub enum DecoderState {
    Idle,
    DrainingSpaces(usize),
}

impl Default for DecoderState {
    fn default() -> Self {
        DecoderState::Idle
    }
}

/// ReadOutcome is result of `QuotedPrintableReader::read_into`.
/// Unlike `Read::read` it does not use zero as end of stream marker.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub enum ReadOutcome {
    /// Read contains count of bytes written to buffer.
    Read(usize),

    /// Eof is returned when at least one byte was requested but stream is done.
    Eof,
}

/// QuotedPrintableReader decodes quoted printable data in stream manner.
///
/// It's permissive: malformed escape sequences are passed through unmodified, escape truncated by
/// end of stream ends the stream and whitespace before line break is thrown away.
/// The only error it returns is error of underlying reader.
///
/// # Note
/// Reads are done byte by byte so it should be used on buffered streams.
pub struct QuotedPrintableReader<R> {
    reader: PushbackReader<R>,
    pending_spaces: usize,
}

impl<R> QuotedPrintableReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader: PushbackReader::new(reader),
            pending_spaces: 0,
        }
    }

    #[inline]
    pub fn state(&self) -> DecoderState {
        if self.pending_spaces > 0 {
            DecoderState::DrainingSpaces(self.pending_spaces)
        } else {
            DecoderState::Idle
        }
    }

    /// pending_spaces returns count of cached spaces which are going to be returned by next reads.
    #[inline]
    pub fn pending_spaces(&self) -> usize {
        self.pending_spaces
    }

    /// is_mark_supported always returns false. Decoded length can't be known without decoding so
    /// there is no way to seek in decoded stream.
    #[inline]
    pub fn is_mark_supported(&self) -> bool {
        false
    }

    #[inline]
    pub fn get_ref(&self) -> &R {
        self.reader.get_ref()
    }

    #[inline]
    pub fn get_mut(&mut self) -> &mut R {
        self.reader.get_mut()
    }

    /// into_inner returns underlying reader. Bytes read ahead by decoder are lost.
    #[inline]
    pub fn into_inner(self) -> R {
        self.reader.into_inner()
    }
}

impl<R> QuotedPrintableReader<R>
    where R: Read
{
    /// read_byte returns next decoded byte or `None` once stream is done.
    pub fn read_byte(&mut self) -> Result<Option<u8>, io::Error> {
        if self.pending_spaces > 0 {
            self.pending_spaces -= 1;
            return Ok(Some(b' '));
        }

        // loop runs again only after soft line break
        loop {
            let c = match self.reader.read_byte()? {
                Some(c) => c,
                None => return Ok(None),
            };
            match c {
                b' ' => return self.read_space_run(),
                b'=' => match self.reader.read_byte()? {
                    Some(b'\n') => continue,
                    Some(b'\r') => {
                        match self.reader.read_byte()? {
                            Some(b'\n') | None => {}
                            Some(b) => {
                                trace!("Soft line break with bare CR");
                                self.reader.unread(&[b])?;
                            }
                        }
                        continue;
                    }
                    Some(a) => {
                        let b = match self.reader.read_byte()? {
                            Some(b) => b,
                            None => {
                                trace!("Escape sequence truncated by end of stream");
                                return Ok(None);
                            }
                        };
                        if let Some(v) = decode_hex_pair([a, b]) {
                            return Ok(Some(v));
                        }
                        trace!("Invalid escape sequence {:?}, passing it through", [a, b]);
                        self.reader.unread(&[a, b])?;
                        return Ok(Some(c));
                    }
                    None => {
                        trace!("Escape char at end of stream");
                        return Ok(None);
                    }
                },
                c => return Ok(Some(c)),
            }
        }
    }

    // first space has been consumed already
    fn read_space_run(&mut self) -> Result<Option<u8>, io::Error> {
        let mut extra_spaces = 0;
        loop {
            match self.reader.read_byte()? {
                Some(b' ') => {
                    extra_spaces += 1;
                }
                Some(c @ b'\r') | Some(c @ b'\n') => {
                    trace!("Dropping {} trailing spaces", extra_spaces + 1);
                    self.pending_spaces = 0;
                    return Ok(Some(c));
                }
                None => {
                    trace!("Dropping {} spaces at end of stream", extra_spaces + 1);
                    self.pending_spaces = 0;
                    return Ok(None);
                }
                Some(c) => {
                    self.reader.unread(&[c])?;
                    self.pending_spaces = extra_spaces;
                    return Ok(Some(b' '));
                }
            }
        }
    }

    /// read_into fills buffer with decoded bytes until it's full or stream is done.
    ///
    /// `ReadOutcome::Eof` is returned when stream was done before any byte was written.
    /// Empty buffer always gives `ReadOutcome::Read(0)`.
    pub fn read_into(&mut self, buf: &mut [u8]) -> Result<ReadOutcome, io::Error> {
        if buf.is_empty() {
            return Ok(ReadOutcome::Read(0));
        }
        let mut offset = 0;
        while offset < buf.len() {
            match self.read_byte()? {
                Some(b) => {
                    buf[offset] = b;
                    offset += 1;
                }
                None => break,
            }
        }
        if offset == 0 {
            Ok(ReadOutcome::Eof)
        } else {
            Ok(ReadOutcome::Read(offset))
        }
    }

    /// skip discards up to `n` decoded bytes and returns how many were actually skipped.
    pub fn skip(&mut self, n: u64) -> Result<u64, io::Error> {
        let mut skipped = 0;
        while skipped < n {
            if self.read_byte()?.is_none() {
                break;
            }
            skipped += 1;
        }
        Ok(skipped)
    }
}

/// available returns estimate of underlying reader.
///
/// # Note
/// It's bogus, since it's count of encoded bytes, not the decoded ones.
impl<R> Available for QuotedPrintableReader<R>
    where R: Available
{
    #[inline]
    fn available(&self) -> usize {
        self.reader.available()
    }
}

impl<R> Read for QuotedPrintableReader<R>
    where R: Read
{
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, io::Error> {
        match self.read_into(buf)? {
            ReadOutcome::Read(sz) => Ok(sz),
            ReadOutcome::Eof => Ok(0),
        }
    }
}

/// decode_quoted_printable decodes whole in-memory quoted printable text.
pub fn decode_quoted_printable<S: AsRef<[u8]>>(qp: S) -> Vec<u8> {
    let qp = qp.as_ref();
    let mut res = Vec::with_capacity(qp.len());
    let mut r = QuotedPrintableReader::new(qp);
    // reading slice never fails
    while let Ok(Some(b)) = r.read_byte() {
        res.push(b);
    }
    res
}

pub struct QuotedPrintableDecoder {}

impl Decoder for QuotedPrintableDecoder {
    type Error = QuotedPrintableDecodingError;

    fn decode_to_string(input: &[u8], res: &mut String) -> Result<usize, Self::Error> {
        let decoded = String::from_utf8(decode_quoted_printable(input))?;
        let sz = decoded.len();
        if res.is_empty() {
            *res = decoded;
        } else {
            res.push_str(&decoded);
        }
        Ok(sz)
    }
}
