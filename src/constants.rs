/// Largest buffer the decoder accepts. Token offsets are bounded by it.
pub const MAX_BUFFER_LEN: usize = (1 << 29) - 1;

/// Upper bound of a token's `next_item` skip.
pub const MAX_NEXT_ITEM: usize = (1 << 29) - 1;

/// Longest digit run accepted inside `i…e`, excluding the sign.
pub const MAX_INTEGER_DIGITS: usize = 20;

pub const DEFAULT_DEPTH_LIMIT: usize = 100;

pub const DEFAULT_TOKEN_LIMIT: usize = 1_000_000;

/// Containers whose one-line rendering would exceed this many columns are
/// broken over several lines by the debug renderer.
pub const RENDER_LINE_WIDTH: usize = 200;

#[inline]
pub fn is_digit(byte: u8) -> bool {
    byte.is_ascii_digit()
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::{decode, decode_with_options, DecodeOptions, ErrorKind};

    #[rstest::rstest]
    fn test_is_digit() {
        assert!(is_digit(b'0'));
        assert!(is_digit(b'9'));
        assert!(!is_digit(b'e'));
        assert!(!is_digit(b'-'));
        assert!(!is_digit(b':'));
    }

    #[rstest::rstest]
    fn test_depth_limit_boundary() {
        let depth = DEFAULT_DEPTH_LIMIT;
        let mut input = "l".repeat(depth);
        input.push_str(&"e".repeat(depth));
        assert!(decode(input.as_bytes()).is_ok());

        let depth = depth + 1;
        let mut input = "l".repeat(depth);
        input.push_str(&"e".repeat(depth));
        let err = decode(input.as_bytes()).unwrap_err();
        assert_eq!(err.kind, ErrorKind::DepthExceeded);
    }

    #[rstest::rstest]
    fn test_integer_digit_cap() {
        let twenty = format!("i{}e", "0".repeat(MAX_INTEGER_DIGITS));
        assert!(decode(twenty.as_bytes()).is_ok());

        let twenty_one = format!("i{}e", "1".repeat(MAX_INTEGER_DIGITS + 1));
        let err = decode(twenty_one.as_bytes()).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Overflow);
    }

    #[rstest::rstest]
    fn test_token_limit_counts_every_token() {
        let options = DecodeOptions::new().with_token_limit(4);
        assert!(decode_with_options(b"li1ei2ee", &options).is_ok());

        let err = decode_with_options(b"li1ei2ei3ee", &options).unwrap_err();
        assert_eq!(err.kind, ErrorKind::LimitExceeded);
    }
}
