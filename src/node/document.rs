use std::fmt;

use crate::arena::{Arena, Token};
use crate::decode::{check_buffer_len, scanner};
use crate::node::{Node, NodeKind};
use crate::{DecodeOptions, NodeError, Result, SoftError};

/// The owner of a decoded tree: the token array plus the buffer it indexes.
///
/// Cloning a document copies its tokens; the buffer is shared.
#[derive(Debug, Clone, Default)]
pub struct Document<'a> {
    arena: Arena,
    buffer: &'a [u8],
    soft_error: Option<SoftError>,
}

impl<'a> Document<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty document with room for `tokens` tokens.
    pub fn with_capacity(tokens: usize) -> Self {
        Self {
            arena: Arena::with_capacity(tokens),
            ..Self::default()
        }
    }

    /// Decodes `buffer` into this document, reusing its token storage.
    ///
    /// On failure the document keeps the partial tree parsed so far.
    pub fn decode_into(&mut self, buffer: &'a [u8], options: &DecodeOptions) -> Result<()> {
        self.clear();
        check_buffer_len(buffer).inspect_err(|err| {
            tracing::debug!(len = buffer.len(), "bdecode rejected oversized buffer: {err}");
        })?;
        self.buffer = buffer;
        if buffer.is_empty() {
            return Ok(());
        }

        let outcome = scanner::scan(buffer, &mut self.arena, options);
        self.soft_error = outcome.soft_error;
        match outcome.error {
            Some(err) => {
                tracing::debug!(
                    kind = ?err.kind,
                    offset = err.offset,
                    tokens = self.arena.len(),
                    "bdecode failed"
                );
                Err(err)
            }
            None => Ok(()),
        }
    }

    /// A view of the root item. Views are always non-owning.
    pub fn root(&self) -> Node<'_> {
        Node::new(self.arena.tokens(), self.buffer, 0)
    }

    pub fn non_owning(&self) -> Node<'_> {
        self.root()
    }

    pub fn kind(&self) -> NodeKind {
        self.root().kind()
    }

    pub fn data_section(&self) -> &[u8] {
        self.root().data_section()
    }

    pub fn buffer(&self) -> &'a [u8] {
        self.buffer
    }

    /// The first non-fatal irregularity found while decoding.
    pub fn soft_error(&self) -> Option<SoftError> {
        self.soft_error
    }

    pub fn tokens(&self) -> &[Token] {
        self.arena.tokens()
    }

    pub fn token_count(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    /// Forgets the decoded tree. Token storage is kept for the next decode.
    pub fn clear(&mut self) {
        self.arena.clear();
        self.buffer = &[];
        self.soft_error = None;
    }

    /// Pre-sizes token storage for the next decode.
    pub fn reserve(&mut self, tokens: usize) {
        self.arena.reserve(tokens);
    }

    pub fn swap(&mut self, other: &mut Document<'a>) {
        std::mem::swap(self, other);
    }

    /// Rebinds the tree to `buffer`, which must start with the same bytes as
    /// the buffer it was decoded from.
    pub fn switch_underlying_buffer<'b>(
        self,
        buffer: &'b [u8],
    ) -> Result<Document<'b>, NodeError> {
        let required = self.consumed_len();
        if buffer.len() < required {
            return Err(NodeError::BufferTooShort {
                required,
                actual: buffer.len(),
            });
        }
        debug_assert_eq!(&buffer[..required], &self.buffer[..required]);
        Ok(Document {
            arena: self.arena,
            buffer,
            soft_error: self.soft_error,
        })
    }

    pub fn render_debug(&self) -> String {
        crate::render::render_debug(&self.root())
    }

    /// Bytes covered by the tree; the terminal token sits at its end.
    fn consumed_len(&self) -> usize {
        self.arena
            .tokens()
            .last()
            .map_or(0, |token| token.offset())
    }
}

impl fmt::Display for Document<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.root(), f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{decode, ErrorKind};

    #[rstest::rstest]
    fn test_clone_shares_buffer() {
        let input = b"d1:ai1ee".to_vec();
        let document = decode(&input).unwrap();
        let copy = document.clone();
        drop(document);
        assert_eq!(copy.root().dict_find_int_value(b"a", 0), Ok(1));
        assert_eq!(copy.buffer().as_ptr(), input.as_ptr());
    }

    #[rstest::rstest]
    fn test_clear_then_decode_again() {
        let first = b"li1ei2ee".to_vec();
        let second = b"d3:key5:valuee".to_vec();
        let mut document = Document::new();
        document.decode_into(&first, &DecodeOptions::default()).unwrap();
        assert_eq!(document.kind(), NodeKind::List);

        document.clear();
        assert_eq!(document.kind(), NodeKind::None);
        assert_eq!(document.token_count(), 0);

        document.decode_into(&second, &DecodeOptions::default()).unwrap();
        assert_eq!(document.kind(), NodeKind::Dict);
        assert_eq!(
            document.root().dict_find_string_value(b"key", b""),
            Ok(&b"value"[..])
        );
        assert_eq!(document.data_section(), &second[..]);
    }

    #[rstest::rstest]
    fn test_failed_decode_resets_soft_error() {
        let mut document = Document::new();
        document
            .decode_into(b"d1:bi1e1:ai1ee", &DecodeOptions::default())
            .unwrap();
        assert!(document.soft_error().is_some());

        let err = document
            .decode_into(b"l", &DecodeOptions::default())
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::UnexpectedEof);
        assert!(document.soft_error().is_none());
        assert_eq!(document.kind(), NodeKind::List);
    }

    #[rstest::rstest]
    fn test_reserve_keeps_behavior() {
        let mut document = Document::with_capacity(2);
        document.reserve(128);
        document
            .decode_into(b"li1ee", &DecodeOptions::default())
            .unwrap();
        assert_eq!(document.root().list_size(), Ok(1));
    }

    #[rstest::rstest]
    fn test_switch_underlying_buffer() {
        let original = b"d4:name3:bobe".to_vec();
        let before = decode(&original).unwrap().render_debug();
        let copy = original.clone();
        let switched = decode(&original)
            .unwrap()
            .switch_underlying_buffer(&copy)
            .unwrap();
        drop(original);
        assert_eq!(switched.render_debug(), before);
        assert_eq!(switched.buffer().as_ptr(), copy.as_ptr());
    }

    #[rstest::rstest]
    fn test_switch_to_short_buffer_fails() {
        let document = decode(b"i12345e").unwrap();
        let err = document.switch_underlying_buffer(b"i1").unwrap_err();
        assert_eq!(
            err,
            NodeError::BufferTooShort {
                required: 7,
                actual: 2
            }
        );
    }

    #[rstest::rstest]
    fn test_swap_documents() {
        let mut a = decode(b"i1e").unwrap();
        let mut b = decode(b"3:abc").unwrap();
        a.swap(&mut b);
        assert_eq!(a.root().string_value(), Ok(&b"abc"[..]));
        assert_eq!(b.root().int_value(), Ok(1));
    }
}
