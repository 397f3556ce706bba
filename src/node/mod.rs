//! Typed, zero-copy views over a decoded token array.

mod document;

use std::cell::Cell;
use std::fmt;

use crate::arena::{Token, TokenKind};
use crate::num::parse_int;
use crate::NodeError;

pub use document::Document;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum NodeKind {
    #[default]
    None,
    Dict,
    List,
    String,
    Integer,
}

impl NodeKind {
    pub fn as_str(self) -> &'static str {
        match self {
            NodeKind::None => "none",
            NodeKind::Dict => "dict",
            NodeKind::List => "list",
            NodeKind::String => "string",
            NodeKind::Integer => "integer",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A non-owning view of one item in a decoded tree.
///
/// Views borrow the token array of their [`Document`], so they cannot
/// outlive it or observe it being cleared. A view remembers the size of its
/// list or dict and the last item it looked up, which makes forward scans
/// with [`Node::list_at`] and [`Node::dict_at`] amortized O(1) per step.
#[derive(Clone, Default)]
pub struct Node<'a> {
    tokens: &'a [Token],
    buffer: &'a [u8],
    index: usize,
    size: Cell<Option<usize>>,
    cursor: Cell<Option<(usize, usize)>>,
}

impl<'a> Node<'a> {
    pub(crate) fn new(tokens: &'a [Token], buffer: &'a [u8], index: usize) -> Self {
        Self {
            tokens,
            buffer,
            index,
            size: Cell::new(None),
            cursor: Cell::new(None),
        }
    }

    pub fn kind(&self) -> NodeKind {
        match self.tokens.get(self.index).map(Token::kind) {
            Some(TokenKind::Dict) => NodeKind::Dict,
            Some(TokenKind::List) => NodeKind::List,
            Some(TokenKind::String) => NodeKind::String,
            Some(TokenKind::Integer) => NodeKind::Integer,
            Some(TokenKind::End) | None => NodeKind::None,
        }
    }

    pub fn is_none(&self) -> bool {
        self.kind() == NodeKind::None
    }

    /// Index of this item's token in the document's token array.
    pub fn token_index(&self) -> usize {
        self.index
    }

    /// The raw bytes of this item, from its tag or length prefix up to the
    /// start of whatever follows it.
    pub fn data_section(&self) -> &'a [u8] {
        match self.tokens.get(self.index) {
            Some(token) if token.kind() != TokenKind::End => {
                &self.buffer[token.offset()..self.end_offset(token)]
            }
            _ => &[],
        }
    }

    /// The value of an integer item, or 0 when it does not fit in an `i64`.
    pub fn int_value(&self) -> Result<i64, NodeError> {
        let token = self.expect(NodeKind::Integer)?;
        let body = &self.buffer[token.payload_start()..self.end_offset(token)];
        Ok(parse_int(body).unwrap_or(0))
    }

    pub fn string_value(&self) -> Result<&'a [u8], NodeError> {
        let token = self.expect(NodeKind::String)?;
        Ok(&self.buffer[token.payload_start()..self.end_offset(token)])
    }

    pub fn string_length(&self) -> Result<usize, NodeError> {
        self.string_value().map(<[u8]>::len)
    }

    /// Byte position of the string payload within the decoded buffer.
    pub fn string_offset(&self) -> Result<usize, NodeError> {
        let token = self.expect(NodeKind::String)?;
        Ok(token.payload_start())
    }

    pub fn list_at(&self, index: usize) -> Result<Node<'a>, NodeError> {
        self.expect(NodeKind::List)?;
        match self.item_token(index, 1) {
            Some(token) => Ok(self.child(token)),
            None => Err(NodeError::IndexOutOfRange {
                index,
                len: self.item_count(1),
            }),
        }
    }

    pub fn list_size(&self) -> Result<usize, NodeError> {
        self.expect(NodeKind::List)?;
        Ok(self.item_count(1))
    }

    /// Returns `default` when the item is missing or not a string.
    pub fn list_string_value_at(
        &self,
        index: usize,
        default: &'a [u8],
    ) -> Result<&'a [u8], NodeError> {
        self.expect(NodeKind::List)?;
        let item = self.item_token(index, 1).map(|token| self.child(token));
        Ok(item
            .and_then(|node| node.string_value().ok())
            .unwrap_or(default))
    }

    /// Returns `default` when the item is missing or not an integer.
    pub fn list_int_value_at(&self, index: usize, default: i64) -> Result<i64, NodeError> {
        self.expect(NodeKind::List)?;
        let item = self.item_token(index, 1).map(|token| self.child(token));
        Ok(item.and_then(|node| node.int_value().ok()).unwrap_or(default))
    }

    pub fn list_items(&self) -> Result<Items<'a>, NodeError> {
        self.expect(NodeKind::List)?;
        Ok(Items::new(self.tokens, self.buffer, self.index + 1))
    }

    pub fn dict_at(&self, index: usize) -> Result<(&'a [u8], Node<'a>), NodeError> {
        let (key, value) = self.dict_at_node(index)?;
        Ok((key.string_value()?, value))
    }

    pub fn dict_at_node(&self, index: usize) -> Result<(Node<'a>, Node<'a>), NodeError> {
        self.expect(NodeKind::Dict)?;
        let Some(key) = self.item_token(index, 2) else {
            return Err(NodeError::IndexOutOfRange {
                index,
                len: self.item_count(2),
            });
        };
        let value = key + self.tokens[key].next_item();
        Ok((self.child(key), self.child(value)))
    }

    pub fn dict_size(&self) -> Result<usize, NodeError> {
        self.expect(NodeKind::Dict)?;
        Ok(self.item_count(2))
    }

    pub fn dict_entries(&self) -> Result<Entries<'a>, NodeError> {
        self.expect(NodeKind::Dict)?;
        Ok(Entries {
            items: Items::new(self.tokens, self.buffer, self.index + 1),
        })
    }

    /// Looks `key` up by comparing raw bytes, without relying on key order.
    pub fn dict_find(&self, key: &[u8]) -> Result<Option<Node<'a>>, NodeError> {
        Ok(self.dict_entries()?.find(|(name, _)| *name == key).map(|(_, value)| value))
    }

    pub fn dict_find_dict(&self, key: &[u8]) -> Result<Option<Node<'a>>, NodeError> {
        self.dict_find_kind(key, NodeKind::Dict)
    }

    pub fn dict_find_list(&self, key: &[u8]) -> Result<Option<Node<'a>>, NodeError> {
        self.dict_find_kind(key, NodeKind::List)
    }

    pub fn dict_find_string(&self, key: &[u8]) -> Result<Option<Node<'a>>, NodeError> {
        self.dict_find_kind(key, NodeKind::String)
    }

    pub fn dict_find_int(&self, key: &[u8]) -> Result<Option<Node<'a>>, NodeError> {
        self.dict_find_kind(key, NodeKind::Integer)
    }

    pub fn dict_find_string_value(
        &self,
        key: &[u8],
        default: &'a [u8],
    ) -> Result<&'a [u8], NodeError> {
        Ok(self
            .dict_find_string(key)?
            .and_then(|node| node.string_value().ok())
            .unwrap_or(default))
    }

    pub fn dict_find_int_value(&self, key: &[u8], default: i64) -> Result<i64, NodeError> {
        Ok(self
            .dict_find_int(key)?
            .and_then(|node| node.int_value().ok())
            .unwrap_or(default))
    }

    pub fn render_debug(&self) -> String {
        crate::render::render_debug(self)
    }

    /// Exchanges the identity of two views, including their caches.
    pub fn swap(&mut self, other: &mut Node<'a>) {
        std::mem::swap(self, other);
    }

    fn dict_find_kind(&self, key: &[u8], kind: NodeKind) -> Result<Option<Node<'a>>, NodeError> {
        Ok(self.dict_find(key)?.filter(|node| node.kind() == kind))
    }

    fn expect(&self, expected: NodeKind) -> Result<&'a Token, NodeError> {
        let found = self.kind();
        if found != expected {
            return Err(NodeError::wrong_kind(expected, found));
        }
        Ok(&self.tokens[self.index])
    }

    fn child(&self, index: usize) -> Node<'a> {
        Node::new(self.tokens, self.buffer, index)
    }

    /// Offset of the token right after `token`'s subtree.
    fn end_offset(&self, token: &Token) -> usize {
        self.tokens
            .get(self.index + token.next_item())
            .map_or(self.buffer.len(), Token::offset)
    }

    /// Token index of item `item`, where each item spans `stride` siblings.
    fn item_token(&self, item: usize, stride: usize) -> Option<usize> {
        let (mut current, mut token) = match self.cursor.get() {
            Some((last_item, last_token)) if last_item <= item => (last_item, last_token),
            _ => (0, self.index + 1),
        };
        while current < item {
            for _ in 0..stride {
                token = self.next_sibling(token)?;
            }
            current += 1;
        }
        if self.tokens.get(token)?.kind() == TokenKind::End {
            return None;
        }
        self.cursor.set(Some((item, token)));
        Some(token)
    }

    fn item_count(&self, stride: usize) -> usize {
        if let Some(size) = self.size.get() {
            return size;
        }
        let (items, mut token) = self.cursor.get().unwrap_or((0, self.index + 1));
        let mut steps = items * stride;
        while let Some(next) = self.next_sibling(token) {
            token = next;
            steps += 1;
        }
        let size = steps / stride;
        self.size.set(Some(size));
        size
    }

    fn next_sibling(&self, token: usize) -> Option<usize> {
        let current = self.tokens.get(token)?;
        if current.kind() == TokenKind::End {
            return None;
        }
        Some(token + current.next_item())
    }
}

impl fmt::Debug for Node<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("kind", &self.kind())
            .field("index", &self.index)
            .field("data", &crate::render::render_debug(self))
            .finish()
    }
}

impl fmt::Display for Node<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let options = crate::RenderOptions::new().with_single_line(true);
        f.write_str(&crate::render::render_debug_with(self, &options))
    }
}

/// Iterator over the children of a list, or the raw key/value sequence of a
/// dict.
#[derive(Debug, Clone)]
pub struct Items<'a> {
    tokens: &'a [Token],
    buffer: &'a [u8],
    token: usize,
}

impl<'a> Items<'a> {
    fn new(tokens: &'a [Token], buffer: &'a [u8], token: usize) -> Self {
        Self {
            tokens,
            buffer,
            token,
        }
    }
}

impl<'a> Iterator for Items<'a> {
    type Item = Node<'a>;

    fn next(&mut self) -> Option<Node<'a>> {
        let current = self.tokens.get(self.token)?;
        if current.kind() == TokenKind::End {
            return None;
        }
        let node = Node::new(self.tokens, self.buffer, self.token);
        self.token += current.next_item();
        Some(node)
    }
}

#[derive(Debug, Clone)]
pub struct Entries<'a> {
    items: Items<'a>,
}

impl<'a> Iterator for Entries<'a> {
    type Item = (&'a [u8], Node<'a>);

    fn next(&mut self) -> Option<Self::Item> {
        let key = self.items.next()?;
        let value = self.items.next()?;
        Some((key.string_value().unwrap_or_default(), value))
    }
}
