//! Zero-copy bencode decoding into a flat token tree.
//!
//! A decode call scans the buffer once and produces a [`Document`]: one
//! `Vec` of tokens describing a pre-order walk of the value, plus a borrow
//! of the input bytes. Strings and integers are never copied out of the
//! buffer; [`Node`] views read them in place.
//!
//! ```
//! let document = bdecode::decode(b"d4:name5:alice3:agei37ee").unwrap();
//! let root = document.root();
//! assert_eq!(root.dict_find_string_value(b"name", b"").unwrap(), b"alice");
//! assert_eq!(root.dict_find_int_value(b"age", 0).unwrap(), 37);
//! ```
//!
//! Nesting depth and the number of tokens are bounded by [`DecodeOptions`],
//! so adversarial input cannot exhaust the stack or memory.

pub mod arena;
pub mod constants;
pub mod decode;
pub mod error;
pub mod node;
pub mod num;
pub mod options;
pub mod parallel;
pub mod render;
#[cfg(feature = "serde")]
mod serialize;

pub use crate::arena::{Token, TokenKind};
pub use crate::decode::{decode, decode_partial, decode_with_options};
pub use crate::error::{DecodeError, ErrorKind, NodeError, SoftError, SoftErrorKind};
pub use crate::node::{Document, Entries, Items, Node, NodeKind};
pub use crate::options::{DecodeOptions, RenderOptions};
pub use crate::parallel::decode_many;
pub use crate::render::{render_debug, render_debug_with};

pub type Result<T, E = DecodeError> = std::result::Result<T, E>;
