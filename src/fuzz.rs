use std::io::{self, Cursor, Read};

use crate::encoding::quoted_printable::{decode_quoted_printable, QuotedPrintableReader, ReadOutcome};

fn drain_reader(r: &mut impl io::Read) -> Result<Vec<u8>, io::Error> {
    let mut res = Vec::new();
    loop {
        let mut buf = [0u8; 32];
        let sz = r.read(&mut buf)?;
        if sz == 0 {
            break;
        }
        res.extend_from_slice(&buf[..sz]);
    }
    Ok(res)
}

/// Decoder must never fail on in-memory input: malformed data is passed through
/// and pushback never overflows.
pub fn fuzz_quoted_printable_decoder(data: &[u8]) {
    let mut reader = Cursor::new(data);
    let mut d = QuotedPrintableReader::new(&mut reader);
    let res = drain_reader(&mut d);
    assert!(res.is_ok(), "Decoding failed: {:?}", res);
}

/// Byte by byte, buffered and whole slice decoding must give the same result.
pub fn fuzz_quoted_printable_read_paths_agree(data: &[u8]) {
    let expected = decode_quoted_printable(data);

    let mut by_byte = Vec::new();
    {
        let mut d = QuotedPrintableReader::new(data);
        while let Some(b) = d.read_byte().unwrap() {
            by_byte.push(b);
        }
    }
    assert_eq!(expected, by_byte);

    for chunk_sz in 1..=4 {
        let mut chunked = Vec::new();
        let mut d = QuotedPrintableReader::new(data);
        let mut buf = vec![0u8; chunk_sz];
        loop {
            match d.read_into(&mut buf).unwrap() {
                ReadOutcome::Read(sz) => {
                    assert!(sz > 0 && sz <= chunk_sz);
                    chunked.extend_from_slice(&buf[..sz]);
                }
                ReadOutcome::Eof => break,
            }
        }
        assert_eq!(expected, chunked);
    }
}

/// Skipping `n` bytes and reading the rest must give suffix of decoded data.
pub fn fuzz_quoted_printable_skip(data: &[u8], n: u64) {
    let expected = decode_quoted_printable(data);
    let mut d = QuotedPrintableReader::new(data);
    let skipped = d.skip(n).unwrap();
    assert_eq!(skipped, n.min(expected.len() as u64));

    let mut rest = Vec::new();
    d.read_to_end(&mut rest).unwrap();
    assert_eq!(&expected[skipped as usize..], &rest[..]);
}
