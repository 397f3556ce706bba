use std::cmp::Ordering;

use crate::{SoftError, SoftErrorKind};

/// Keeps the first soft error seen during a scan.
#[derive(Debug, Default)]
pub struct SoftErrors {
    first: Option<SoftError>,
}

impl SoftErrors {
    pub fn record(&mut self, kind: SoftErrorKind, offset: usize) {
        if self.first.is_some() {
            return;
        }
        tracing::trace!(kind = %kind, offset, "bdecode soft error");
        self.first = Some(SoftError::new(kind, offset));
    }

    pub fn into_first(self) -> Option<SoftError> {
        self.first
    }
}

/// `digits` excludes the sign.
pub fn check_integer_digits(negative: bool, digits: &[u8]) -> Option<SoftErrorKind> {
    match digits {
        [b'0'] if negative => Some(SoftErrorKind::NegativeZero),
        [b'0', _, ..] => Some(SoftErrorKind::IntegerLeadingZero),
        _ => None,
    }
}

pub fn check_length_prefix(digits: &[u8]) -> Option<SoftErrorKind> {
    match digits {
        [b'0', _, ..] => Some(SoftErrorKind::StringLengthLeadingZero),
        _ => None,
    }
}

/// Keys of one dict must be strictly increasing in raw byte order.
pub fn check_key_order(previous: &[u8], key: &[u8]) -> Option<SoftErrorKind> {
    match key.cmp(previous) {
        Ordering::Greater => None,
        Ordering::Equal => Some(SoftErrorKind::DuplicateKey),
        Ordering::Less => Some(SoftErrorKind::UnsortedKey),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[rstest::rstest]
    #[case(false, b"0", None)]
    #[case(false, b"10", None)]
    #[case(true, b"7", None)]
    #[case(true, b"0", Some(SoftErrorKind::NegativeZero))]
    #[case(false, b"03", Some(SoftErrorKind::IntegerLeadingZero))]
    #[case(true, b"007", Some(SoftErrorKind::IntegerLeadingZero))]
    fn test_check_integer_digits(
        #[case] negative: bool,
        #[case] digits: &[u8],
        #[case] expected: Option<SoftErrorKind>,
    ) {
        assert_eq!(check_integer_digits(negative, digits), expected);
    }

    #[rstest::rstest]
    fn test_check_length_prefix() {
        assert_eq!(check_length_prefix(b"0"), None);
        assert_eq!(check_length_prefix(b"12"), None);
        assert_eq!(
            check_length_prefix(b"04"),
            Some(SoftErrorKind::StringLengthLeadingZero)
        );
    }

    #[rstest::rstest]
    #[case(b"a", b"b", None)]
    #[case(b"a", b"ab", None)]
    #[case(b"b", b"a", Some(SoftErrorKind::UnsortedKey))]
    #[case(b"ab", b"a", Some(SoftErrorKind::UnsortedKey))]
    #[case(b"a", b"a", Some(SoftErrorKind::DuplicateKey))]
    fn test_check_key_order(
        #[case] previous: &[u8],
        #[case] key: &[u8],
        #[case] expected: Option<SoftErrorKind>,
    ) {
        assert_eq!(check_key_order(previous, key), expected);
    }

    #[rstest::rstest]
    fn test_first_soft_error_wins() {
        let mut soft = SoftErrors::default();
        soft.record(SoftErrorKind::UnsortedKey, 4);
        soft.record(SoftErrorKind::DuplicateKey, 9);
        assert_eq!(
            soft.into_first(),
            Some(SoftError::new(SoftErrorKind::UnsortedKey, 4))
        );
    }
}
