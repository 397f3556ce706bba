use ::serde::ser::{Error as _, SerializeMap, SerializeSeq};
use ::serde::{Serialize, Serializer};

use crate::node::{Document, Node, NodeKind};

/// Strings that are valid UTF-8 serialize as strings, anything else as
/// bytes. Dict keys are always serialized as (lossy) strings.
impl Serialize for Node<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.kind() {
            NodeKind::None => serializer.serialize_unit(),
            NodeKind::Integer => serializer.serialize_i64(self.int_value().map_err(S::Error::custom)?),
            NodeKind::String => {
                let bytes = self.string_value().map_err(S::Error::custom)?;
                match std::str::from_utf8(bytes) {
                    Ok(text) => serializer.serialize_str(text),
                    Err(_) => serializer.serialize_bytes(bytes),
                }
            }
            NodeKind::List => {
                let len = self.list_size().map_err(S::Error::custom)?;
                let mut seq = serializer.serialize_seq(Some(len))?;
                for item in self.list_items().map_err(S::Error::custom)? {
                    seq.serialize_element(&item)?;
                }
                seq.end()
            }
            NodeKind::Dict => {
                let len = self.dict_size().map_err(S::Error::custom)?;
                let mut map = serializer.serialize_map(Some(len))?;
                for (key, value) in self.dict_entries().map_err(S::Error::custom)? {
                    map.serialize_entry(&String::from_utf8_lossy(key), &value)?;
                }
                map.end()
            }
        }
    }
}

impl Serialize for Document<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.root().serialize(serializer)
    }
}
