//! TLV node model

use bytes::Bytes;
use serde::de::{self, IgnoredAny};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::ConstructionError;
use crate::input::TlvInput;
use crate::tag::{Tag, TlvClass, TlvType};

/// Payload of a node: a value for primitive tags, nested nodes for constructed ones
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TlvPayload {
    Primitive(Bytes),
    Constructed(Vec<TlvNode>),
}

impl TlvPayload {
    pub fn node_type(&self) -> TlvType {
        match self {
            TlvPayload::Primitive(_) => TlvType::Primitive,
            TlvPayload::Constructed(_) => TlvType::Constructed,
        }
    }
}

/// A decoded or hand-built BER-TLV item
///
/// The payload kind always agrees with the constructed bit of the tag: the
/// constructors refuse a primitive tag with children or a constructed tag
/// with a value. Nodes are immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TlvNode {
    tag: Tag,
    node_class: TlvClass,
    payload: TlvPayload,
}

impl TlvNode {
    /// Build a node, checking the payload kind against the tag
    ///
    /// # Errors
    /// Returns [`ConstructionError::TagTypeMismatch`] if the tag's constructed
    /// bit does not match the payload.
    pub fn new(tag: Tag, payload: TlvPayload) -> Result<Self, ConstructionError> {
        let from_tag = tag.node_type();
        let requested = payload.node_type();
        if from_tag != requested {
            return Err(ConstructionError::TagTypeMismatch {
                tag: tag.to_hex(),
                expected: requested,
                actual: from_tag,
            });
        }
        Ok(Self {
            node_class: tag.node_class(),
            tag,
            payload,
        })
    }

    /// Build a node without checking the payload kind against the tag
    ///
    /// For callers that already chose the payload from `tag.node_type()`,
    /// like the decoder. No type checking is done in release builds.
    #[doc(hidden)]
    pub fn new_unchecked(tag: Tag, payload: TlvPayload) -> Self {
        debug_assert_eq!(tag.node_type(), payload.node_type());
        Self {
            node_class: tag.node_class(),
            tag,
            payload,
        }
    }

    /// Build a primitive node
    pub fn primitive(tag: Tag, value: impl Into<Bytes>) -> Result<Self, ConstructionError> {
        Self::new(tag, TlvPayload::Primitive(value.into()))
    }

    /// Build a constructed node
    pub fn constructed(tag: Tag, children: Vec<TlvNode>) -> Result<Self, ConstructionError> {
        Self::new(tag, TlvPayload::Constructed(children))
    }

    pub fn tag(&self) -> &Tag {
        &self.tag
    }

    /// Uppercase hex form of the tag
    pub fn tag_hex(&self) -> String {
        self.tag.to_hex()
    }

    pub fn node_type(&self) -> TlvType {
        self.payload.node_type()
    }

    pub fn node_class(&self) -> TlvClass {
        self.node_class
    }

    pub fn payload(&self) -> &TlvPayload {
        &self.payload
    }

    /// Value bytes; `None` for constructed nodes
    pub fn value(&self) -> Option<&[u8]> {
        match &self.payload {
            TlvPayload::Primitive(value) => Some(value.as_ref()),
            TlvPayload::Constructed(_) => None,
        }
    }

    /// Child nodes; `None` for primitive nodes
    pub fn children(&self) -> Option<&[TlvNode]> {
        match &self.payload {
            TlvPayload::Primitive(_) => None,
            TlvPayload::Constructed(children) => Some(children.as_slice()),
        }
    }

    /// Depth-first search for a tag, starting with this node
    pub fn find(&self, tag: impl AsRef<[u8]>) -> Option<&TlvNode> {
        let tag = tag.as_ref();
        self.iter().find(|node| node.tag.as_bytes() == tag)
    }

    /// Find a direct child by tag (non-recursive)
    pub fn find_child(&self, tag: impl AsRef<[u8]>) -> Option<&TlvNode> {
        let tag = tag.as_ref();
        self.children()?
            .iter()
            .find(|child| child.tag.as_bytes() == tag)
    }

    /// Pre-order traversal over this node and all descendants
    pub fn iter(&self) -> Iter<'_> {
        Iter { stack: vec![self] }
    }
}

/// Pre-order iterator, see [`TlvNode::iter`]
pub struct Iter<'a> {
    stack: Vec<&'a TlvNode>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a TlvNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        if let Some(children) = node.children() {
            self.stack.extend(children.iter().rev());
        }
        Some(node)
    }
}

// Interchange form: {"tag": "E0", "children": [{"tag": "5A", "value": "0102"}]}

#[derive(Serialize)]
struct NodeOut<'a> {
    tag: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    children: Option<&'a [TlvNode]>,
}

impl Serialize for TlvNode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        NodeOut {
            tag: self.tag_hex(),
            value: self.value().map(hex::encode_upper),
            children: self.children(),
        }
        .serialize(serializer)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawField {
    Hex(String),
    Bytes(Vec<u8>),
    Other(IgnoredAny),
}

impl From<RawField> for TlvInput {
    fn from(field: RawField) -> Self {
        match field {
            RawField::Hex(text) => TlvInput::Hex(text),
            RawField::Bytes(bytes) => TlvInput::Bytes(bytes),
            RawField::Other(_) => TlvInput::Unsupported("non hex, non byte sequence"),
        }
    }
}

#[derive(Deserialize)]
struct NodeIn {
    tag: Option<RawField>,
    #[serde(default)]
    value: Option<RawField>,
    #[serde(default)]
    children: Option<Vec<TlvNode>>,
}

impl TryFrom<NodeIn> for TlvNode {
    type Error = ConstructionError;

    fn try_from(raw: NodeIn) -> Result<Self, Self::Error> {
        let tag = TlvInput::from(raw.tag).into_required_bytes("tag")?;
        let tag = Tag::new(tag)?;
        match (raw.value, raw.children) {
            (Some(_), Some(_)) => Err(ConstructionError::UnsupportedFormat {
                parameter: "value".to_string(),
            }),
            (None, Some(children)) => TlvNode::constructed(tag, children),
            (None, None) if tag.node_type() == TlvType::Constructed => {
                TlvNode::constructed(tag, Vec::new())
            }
            (value, None) => {
                let value = TlvInput::from(value).into_bytes("value")?;
                TlvNode::primitive(tag, value)
            }
        }
    }
}

impl<'de> Deserialize<'de> for TlvNode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = NodeIn::deserialize(deserializer)?;
        TlvNode::try_from(raw).map_err(de::Error::custom)
    }
}
