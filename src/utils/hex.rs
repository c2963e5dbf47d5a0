/// decode_hex_digit returns value of single ascii hex digit.
/// Both uppercase and lowercase digits are accepted, since senders do not care about the uppercase rule.
#[inline]
pub(crate) fn decode_hex_digit(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'A'..=b'F' => Some(b - b'A' + 10),
        b'a'..=b'f' => Some(b - b'a' + 10),
        _ => None,
    }
}

/// decode_hex_pair decodes two hex digits, most significant one first.
#[inline]
pub(crate) fn decode_hex_pair(pair: [u8; 2]) -> Option<u8> {
    let high = decode_hex_digit(pair[0])?;
    let low = decode_hex_digit(pair[1])?;
    Some(high * 16 + low)
}

#[cfg(test)]
mod test {
    use crate::utils::hex::{decode_hex_digit, decode_hex_pair};

    #[test]
    fn test_can_decode_any_byte() {
        for i in 0..=255u8 {
            let upper = format!("{:02X}", i);
            let lower = format!("{:02x}", i);
            let upper = upper.as_bytes();
            let lower = lower.as_bytes();
            assert_eq!(decode_hex_pair([upper[0], upper[1]]), Some(i));
            assert_eq!(decode_hex_pair([lower[0], lower[1]]), Some(i));
        }
    }

    #[test]
    fn test_rejects_non_hex_digits() {
        for b in [b'G', b'g', b' ', b'+', b'-', b'\r', b'\n', b'=', 0xFF].iter().copied() {
            assert_eq!(decode_hex_digit(b), None);
        }
        assert_eq!(decode_hex_pair([b'-', b'1']), None);
        assert_eq!(decode_hex_pair([b'A', b'x']), None);
        assert_eq!(decode_hex_pair([b'x', b'A']), None);
    }
}
