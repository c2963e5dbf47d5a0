use std::fmt::Debug;

pub mod quoted_printable;

pub trait Decoder {
    type Error: Debug;

    fn decode(input: &[u8]) -> Result<String, Self::Error> {
        let mut s = String::new();
        Self::decode_to_string(input, &mut s)?;
        Ok(s)
    }

    /// decode_to_string appends decoded input to `res` and returns count of appended bytes.
    fn decode_to_string(input: &[u8], res: &mut String) -> Result<usize, Self::Error>;
}
