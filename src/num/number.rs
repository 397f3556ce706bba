use crate::constants::is_digit;
use crate::ErrorKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseIntError {
    pub kind: ErrorKind,
    /// Index into the scanned slice where scanning stopped.
    pub position: usize,
}

/// Parses the decimal digits of `bytes` up to `delimiter`.
///
/// Returns the value and the number of digits consumed; the delimiter itself
/// is not consumed. The accumulator is checked against `i64::MAX` before
/// every digit is applied.
pub fn parse_uint(bytes: &[u8], delimiter: u8) -> Result<(i64, usize), ParseIntError> {
    let mut value: i64 = 0;
    let mut pos = 0;
    while pos < bytes.len() && bytes[pos] != delimiter {
        let byte = bytes[pos];
        if !is_digit(byte) {
            return Err(ParseIntError {
                kind: ErrorKind::ExpectedDigit,
                position: pos,
            });
        }
        let digit = i64::from(byte - b'0');
        value = match value.checked_mul(10).and_then(|v| v.checked_add(digit)) {
            Some(value) => value,
            None => {
                return Err(ParseIntError {
                    kind: ErrorKind::Overflow,
                    position: pos,
                })
            }
        };
        pos += 1;
    }
    if pos == bytes.len() {
        let kind = if delimiter == b':' {
            ErrorKind::ExpectedColon
        } else {
            ErrorKind::UnexpectedEof
        };
        return Err(ParseIntError {
            kind,
            position: pos,
        });
    }
    Ok((value, pos))
}

/// Parses an optionally negative integer body terminated by `e`.
pub fn parse_int(bytes: &[u8]) -> Result<i64, ParseIntError> {
    let negative = bytes.first() == Some(&b'-');
    let start = usize::from(negative);
    let (value, _) = parse_uint(&bytes[start..], b'e').map_err(|err| ParseIntError {
        position: err.position + start,
        ..err
    })?;
    Ok(if negative { -value } else { value })
}

/// Writes `value` in decimal without allocating intermediate strings.
pub fn push_int(out: &mut String, value: i64) {
    let mut buffer = itoa::Buffer::new();
    out.push_str(buffer.format(value));
}

/// Number of characters needed to print `value`.
pub fn int_width(value: i64) -> usize {
    let mut buffer = itoa::Buffer::new();
    buffer.format(value).len()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[rstest::rstest]
    #[case(b"0:", 0, 1)]
    #[case(b"42:", 42, 2)]
    #[case(b"9223372036854775807:", i64::MAX, 19)]
    #[case(b"12e", 12, 2)]
    fn test_parse_uint(#[case] input: &[u8], #[case] value: i64, #[case] consumed: usize) {
        let delimiter = input[input.len() - 1];
        assert_eq!(parse_uint(input, delimiter), Ok((value, consumed)));
    }

    #[rstest::rstest]
    #[case(b"9223372036854775808:", ErrorKind::Overflow, 18)]
    #[case(b"12a:", ErrorKind::ExpectedDigit, 2)]
    #[case(b"-1:", ErrorKind::ExpectedDigit, 0)]
    #[case(b"123", ErrorKind::ExpectedColon, 3)]
    #[case(b"", ErrorKind::ExpectedColon, 0)]
    fn test_parse_uint_errors(#[case] input: &[u8], #[case] kind: ErrorKind, #[case] position: usize) {
        assert_eq!(parse_uint(input, b':'), Err(ParseIntError { kind, position }));
    }

    #[rstest::rstest]
    fn test_missing_terminator_is_eof() {
        let err = parse_uint(b"123", b'e').unwrap_err();
        assert_eq!(err.kind, ErrorKind::UnexpectedEof);
    }

    #[rstest::rstest]
    #[case(b"0e", 0)]
    #[case(b"-42e", -42)]
    #[case(b"9223372036854775807e", i64::MAX)]
    #[case(b"-9223372036854775807e", -i64::MAX)]
    fn test_parse_int(#[case] input: &[u8], #[case] value: i64) {
        assert_eq!(parse_int(input), Ok(value));
    }

    #[rstest::rstest]
    fn test_parse_int_overflow() {
        let err = parse_int(b"-9223372036854775808e").unwrap_err();
        assert_eq!(err.kind, ErrorKind::Overflow);
        assert_eq!(err.position, 19);
    }

    #[rstest::rstest]
    fn test_push_int_and_width() {
        let mut out = String::from("n=");
        push_int(&mut out, -1234);
        assert_eq!(out, "n=-1234");
        assert_eq!(int_width(-1234), 5);
        assert_eq!(int_width(0), 1);
    }
}
