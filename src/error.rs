use thiserror::Error;

use crate::node::NodeKind;

/// Why a decode call stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum ErrorKind {
    #[error("expected digit in bencoded string")]
    ExpectedDigit,
    #[error("expected colon in bencoded string")]
    ExpectedColon,
    #[error("unexpected end of file in bencoded string")]
    UnexpectedEof,
    #[error("expected value (list, dict, int or string) in bencoded string")]
    ExpectedValue,
    #[error("bencoded nesting depth exceeded")]
    DepthExceeded,
    #[error("bencoded item count limit exceeded")]
    LimitExceeded,
    #[error("integer overflow")]
    Overflow,
}

/// A hard decode failure and the byte offset of the character that caused it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("{kind} at offset {offset}")]
pub struct DecodeError {
    pub kind: ErrorKind,
    pub offset: usize,
}

impl DecodeError {
    pub fn new(kind: ErrorKind, offset: usize) -> Self {
        Self { kind, offset }
    }
}

/// Structural irregularities that do not stop decoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum SoftErrorKind {
    #[error("leading zero in integer")]
    IntegerLeadingZero,
    #[error("negative zero integer")]
    NegativeZero,
    #[error("leading zero in string length")]
    StringLengthLeadingZero,
    #[error("unsorted dictionary key")]
    UnsortedKey,
    #[error("duplicate dictionary key")]
    DuplicateKey,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("{kind} at offset {offset}")]
pub struct SoftError {
    pub kind: SoftErrorKind,
    pub offset: usize,
}

impl SoftError {
    pub fn new(kind: SoftErrorKind, offset: usize) -> Self {
        Self { kind, offset }
    }

    pub fn message(&self) -> String {
        self.kind.to_string()
    }
}

/// Misuse of the node query API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum NodeError {
    #[error("expected {expected} node, found {found}")]
    WrongKind { expected: NodeKind, found: NodeKind },
    #[error("index {index} out of range for {len} items")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("replacement buffer holds {actual} bytes, tree needs {required}")]
    BufferTooShort { required: usize, actual: usize },
}

impl NodeError {
    pub fn wrong_kind(expected: NodeKind, found: NodeKind) -> Self {
        NodeError::WrongKind { expected, found }
    }
}
