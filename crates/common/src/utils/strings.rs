use std::fmt::Write;

use crate::Error;

/// Decodes a hex string into a vector of bytes. An optional `0x` prefix and surrounding
/// whitespace are ignored; odd-length input and non-hex digits are rejected.
///
/// ```
/// use evmi_common::utils::strings::decode_hex;
///
/// let hex = "48656c6c6f20576f726c64"; // "Hello World" in hex
/// let result = decode_hex(hex).expect("should decode hex");
/// assert_eq!(result, vec![72, 101, 108, 108, 111, 32, 87, 111, 114, 108, 100]);
///
/// assert!(decode_hex("0x6").is_err());
/// ```
pub fn decode_hex(s: &str) -> Result<Vec<u8>, Error> {
    // normalize
    let s = s.trim();
    let s = s.strip_prefix("0x").unwrap_or(s);

    if s.len() % 2 != 0 {
        return Err(Error::ParseError(format!("odd-length hex string ({} digits)", s.len())));
    }
    if let Some(c) = s.chars().find(|c| !c.is_ascii_hexdigit()) {
        return Err(Error::ParseError(format!("invalid hex character {c:?}")));
    }

    (0..s.len())
        .step_by(2)
        .map(|i| u8::from_str_radix(&s[i..i + 2], 16))
        .collect::<Result<Vec<u8>, _>>()
        .map_err(|e| Error::ParseError(format!("invalid hex string: {e}")))
}

/// Encodes a slice of bytes into a lowercase hex string
///
/// ```
/// use evmi_common::utils::strings::encode_hex;
///
/// let bytes = vec![72, 101, 108, 108, 111, 32, 87, 111, 114, 108, 100];
/// let result = encode_hex(&bytes);
/// assert_eq!(result, "48656c6c6f20576f726c64");
/// ```
pub fn encode_hex(s: &[u8]) -> String {
    s.iter().fold(String::with_capacity(s.len() * 2), |mut acc, b| {
        let _ = write!(acc, "{b:02x}");
        acc
    })
}

#[cfg(test)]
mod tests {
    use crate::utils::strings::*;

    #[test]
    fn test_decode_hex() {
        let hex = "48656c6c6f20776f726c64"; // "Hello world"
        let result = decode_hex(hex).expect("should decode hex");
        assert_eq!(result, vec![72, 101, 108, 108, 111, 32, 119, 111, 114, 108, 100]);

        let hex = "0xABcdef";
        let result = decode_hex(hex).expect("should decode hex");
        assert_eq!(result, vec![171, 205, 239]);

        let result = decode_hex("").expect("should decode hex");
        assert!(result.is_empty());
    }

    #[test]
    fn test_decode_hex_rejects_malformed_input() {
        assert!(matches!(decode_hex("600"), Err(Error::ParseError(_))));
        assert!(matches!(decode_hex("60zz"), Err(Error::ParseError(_))));
        assert!(matches!(decode_hex("+1"), Err(Error::ParseError(_))));
        assert!(matches!(decode_hex("ü0"), Err(Error::ParseError(_))));
    }

    #[test]
    fn test_encode_hex() {
        let bytes = vec![171, 205, 239];
        assert_eq!(encode_hex(&bytes), "abcdef");
        assert_eq!(encode_hex(&[0x00, 0x0a]), "000a");
        assert_eq!(encode_hex(&[]), "");
    }
}
