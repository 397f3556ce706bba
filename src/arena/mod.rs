//! Flat token storage backing a decoded tree.

use crate::constants::{MAX_BUFFER_LEN, MAX_NEXT_ITEM};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Dict,
    List,
    String,
    Integer,
    /// Closes a container, or terminates the whole token array.
    End,
}

/// One item of the pre-order walk.
///
/// `next_item` is a relative skip: to the next sibling for scalars and dict
/// keys, and past the matching `End` for containers. The terminal `End` of a
/// token array has a skip of zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    offset: u32,
    next_item: u32,
    header_len: u32,
    kind: TokenKind,
}

impl Token {
    pub fn new(offset: usize, kind: TokenKind, next_item: usize, header_len: usize) -> Self {
        debug_assert!(offset <= MAX_BUFFER_LEN);
        debug_assert!(next_item <= MAX_NEXT_ITEM);
        debug_assert!(header_len <= MAX_BUFFER_LEN);
        Self {
            offset: offset as u32,
            next_item: next_item as u32,
            header_len: header_len as u32,
            kind,
        }
    }

    pub fn container(offset: usize, kind: TokenKind) -> Self {
        // the skip is patched once the matching end is seen
        Self::new(offset, kind, 1, 0)
    }

    pub fn string(offset: usize, header_len: usize) -> Self {
        Self::new(offset, TokenKind::String, 1, header_len)
    }

    pub fn integer(offset: usize) -> Self {
        Self::new(offset, TokenKind::Integer, 1, 1)
    }

    pub fn end(offset: usize) -> Self {
        Self::new(offset, TokenKind::End, 1, 0)
    }

    pub fn terminator(offset: usize) -> Self {
        Self::new(offset, TokenKind::End, 0, 0)
    }

    #[inline]
    pub fn offset(&self) -> usize {
        self.offset as usize
    }

    #[inline]
    pub fn next_item(&self) -> usize {
        self.next_item as usize
    }

    #[inline]
    pub fn header_len(&self) -> usize {
        self.header_len as usize
    }

    #[inline]
    pub fn kind(&self) -> TokenKind {
        self.kind
    }

    /// Byte position right after the string length prefix or integer tag.
    #[inline]
    pub fn payload_start(&self) -> usize {
        self.offset() + self.header_len()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Arena {
    tokens: Vec<Token>,
}

impl Arena {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            tokens: Vec::with_capacity(capacity),
        }
    }

    /// Appends a token and returns its index.
    pub fn push(&mut self, token: Token) -> usize {
        self.tokens.push(token);
        self.tokens.len() - 1
    }

    /// Points the container opened at `index` just past the last pushed token.
    pub fn close(&mut self, index: usize) {
        let next_item = self.tokens.len() - index;
        debug_assert!(next_item <= MAX_NEXT_ITEM);
        debug_assert!(matches!(
            self.tokens[index].kind,
            TokenKind::Dict | TokenKind::List
        ));
        self.tokens[index].next_item = next_item as u32;
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn clear(&mut self) {
        self.tokens.clear();
    }

    pub fn reserve(&mut self, additional: usize) {
        self.tokens.reserve(additional);
    }

    pub fn capacity(&self) -> usize {
        self.tokens.capacity()
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }
}
