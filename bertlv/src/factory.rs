//! Construction and validation entry point
//!
//! [`TlvFactory`] accepts hex text or raw bytes, validates them, and hands
//! plain bytes to the codec.
//!
//! # Usage Example
//!
//! ```rust
//! use bertlv::TlvFactory;
//!
//! let amount = TlvFactory::primitive_tlv("9f02", "000000001000")?;
//! let template = TlvFactory::constructed_tlv("E0", amount)?;
//! let bytes = TlvFactory::serialize(&template)?;
//! assert_eq!(TlvFactory::parse(bytes).unwrap(), vec![template]);
//! # Ok::<(), bertlv::TlvError>(())
//! ```

use std::borrow::Cow;

use bertlv_codec::{ParserConfig, TlvDecoder, serialize_items};
use bertlv_core::{ParseOutcome, Tag, TlvError, TlvInput, TlvNode, TlvResult};

use crate::error::PartialParseError;

/// Children handed to [`TlvFactory::constructed_tlv`]: one node, several, or none
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TlvChildren(Vec<TlvNode>);

impl TlvChildren {
    pub fn into_vec(self) -> Vec<TlvNode> {
        self.0
    }
}

impl From<TlvNode> for TlvChildren {
    fn from(node: TlvNode) -> Self {
        TlvChildren(vec![node])
    }
}

impl From<&TlvNode> for TlvChildren {
    fn from(node: &TlvNode) -> Self {
        TlvChildren(vec![node.clone()])
    }
}

impl From<Vec<TlvNode>> for TlvChildren {
    fn from(nodes: Vec<TlvNode>) -> Self {
        TlvChildren(nodes)
    }
}

impl From<&[TlvNode]> for TlvChildren {
    fn from(nodes: &[TlvNode]) -> Self {
        TlvChildren(nodes.to_vec())
    }
}

impl<T: Into<TlvChildren>> From<Option<T>> for TlvChildren {
    fn from(children: Option<T>) -> Self {
        children.map_or_else(TlvChildren::default, Into::into)
    }
}

impl From<()> for TlvChildren {
    fn from(_: ()) -> Self {
        TlvChildren::default()
    }
}

/// Nodes handed to [`TlvFactory::serialize`]: a single node or a sequence
#[derive(Debug, Clone)]
pub struct SerializeInput<'a>(Cow<'a, [TlvNode]>);

impl<'a> From<&'a TlvNode> for SerializeInput<'a> {
    fn from(node: &'a TlvNode) -> Self {
        SerializeInput(Cow::Borrowed(std::slice::from_ref(node)))
    }
}

impl From<TlvNode> for SerializeInput<'_> {
    fn from(node: TlvNode) -> Self {
        SerializeInput(Cow::Owned(vec![node]))
    }
}

impl<'a> From<&'a [TlvNode]> for SerializeInput<'a> {
    fn from(nodes: &'a [TlvNode]) -> Self {
        SerializeInput(Cow::Borrowed(nodes))
    }
}

impl<'a> From<&'a Vec<TlvNode>> for SerializeInput<'a> {
    fn from(nodes: &'a Vec<TlvNode>) -> Self {
        SerializeInput(Cow::Borrowed(nodes.as_slice()))
    }
}

impl From<Vec<TlvNode>> for SerializeInput<'_> {
    fn from(nodes: Vec<TlvNode>) -> Self {
        SerializeInput(Cow::Owned(nodes))
    }
}

/// Public entry point for building, parsing and serializing TLV trees
pub struct TlvFactory;

impl TlvFactory {
    /// Build a primitive node
    ///
    /// `value` may be absent (`()` or `None`), which gives an empty value.
    ///
    /// # Errors
    /// - construction errors for an empty tag or malformed hex text
    /// - [`bertlv_core::ConstructionError::TagTypeMismatch`] if the tag has
    ///   the constructed bit set
    pub fn primitive_tlv(tag: impl Into<TlvInput>, value: impl Into<TlvInput>) -> TlvResult<TlvNode> {
        let tag = verify_tag(tag.into())?;
        let value = value.into().into_bytes("value")?;
        Ok(TlvNode::primitive(tag, value)?)
    }

    /// Build a constructed node from one child, a sequence, or nothing
    ///
    /// # Errors
    /// - construction errors for an empty tag or malformed hex text
    /// - [`bertlv_core::ConstructionError::TagTypeMismatch`] if the tag has
    ///   the constructed bit clear
    pub fn constructed_tlv(tag: impl Into<TlvInput>, children: impl Into<TlvChildren>) -> TlvResult<TlvNode> {
        let tag = verify_tag(tag.into())?;
        Ok(TlvNode::constructed(tag, children.into().into_vec())?)
    }

    /// Decode bytes or hex text
    ///
    /// # Errors
    /// On any failure the error still carries the items decoded so far.
    pub fn parse(input: impl Into<TlvInput>) -> Result<Vec<TlvNode>, PartialParseError> {
        Self::parse_with(&ParserConfig::default(), input)
    }

    /// Decode bytes or hex text with an explicit parser configuration
    pub fn parse_with(config: &ParserConfig, input: impl Into<TlvInput>) -> Result<Vec<TlvNode>, PartialParseError> {
        decode(config, input.into()).into_result(|error, partial| PartialParseError { error, partial })
    }

    /// Decode bytes or hex text, returning the items and the error side by side
    pub fn parse_outcome(input: impl Into<TlvInput>) -> ParseOutcome<Vec<TlvNode>, TlvError> {
        decode(&ParserConfig::default(), input.into())
    }

    /// Encode a node or a sequence of nodes
    ///
    /// # Errors
    /// [`bertlv_core::SerializeError::PayloadTooLarge`] if any payload exceeds
    /// `0xFFFFFFFF` bytes. No partial output is returned.
    pub fn serialize<'a>(input: impl Into<SerializeInput<'a>>) -> TlvResult<Vec<u8>> {
        let SerializeInput(items) = input.into();
        Ok(serialize_items(&items)?)
    }
}

fn verify_tag(tag: TlvInput) -> TlvResult<Tag> {
    let bytes = tag.into_required_bytes("tag")?;
    Ok(Tag::new(bytes)?)
}

fn decode(config: &ParserConfig, input: TlvInput) -> ParseOutcome<Vec<TlvNode>, TlvError> {
    let bytes = match input.into_bytes("buffer") {
        Ok(bytes) => bytes,
        Err(e) => return ParseOutcome::failed(e.into()),
    };

    let outcome = TlvDecoder::new(*config).parse_items(bytes);
    if let Some(error) = &outcome.error {
        log::debug!(
            "parse stopped after {} item(s): {}: {}",
            outcome.result.len(),
            error.name(),
            error
        );
    }
    outcome.map_err(TlvError::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use bertlv_core::{ConstructionError, ParseError, TlvClass, TlvType};

    fn hex_of(bytes: &[u8]) -> String {
        hex::encode_upper(bytes)
    }

    #[test]
    fn test_primitive_from_text_and_bytes() {
        let expected = "5A0290DF";
        let cases = [
            TlvFactory::primitive_tlv("5A", "90DF").unwrap(),
            TlvFactory::primitive_tlv("5a", "90df").unwrap(),
            TlvFactory::primitive_tlv(vec![0x5A], vec![0x90, 0xDF]).unwrap(),
            TlvFactory::primitive_tlv(&[0x5Au8], "90df").unwrap(),
            TlvFactory::primitive_tlv("5a", [0x90u8, 0xDF]).unwrap(),
        ];
        for tlv in cases {
            assert_eq!(tlv.tag_hex(), "5A");
            assert_eq!(hex_of(&TlvFactory::serialize(&tlv).unwrap()), expected);
        }
    }

    #[test]
    fn test_primitive_without_value() {
        let tlv = TlvFactory::primitive_tlv("5A", ()).unwrap();
        assert_eq!(tlv.value(), Some(&[][..]));
        assert_eq!(hex_of(&TlvFactory::serialize(tlv).unwrap()), "5A00");

        let tlv = TlvFactory::primitive_tlv("5A", None::<&str>).unwrap();
        assert_eq!(hex_of(&TlvFactory::serialize(tlv).unwrap()), "5A00");
    }

    #[test]
    fn test_primitive_rejects_constructed_tag() {
        let err = TlvFactory::primitive_tlv("E0", ()).unwrap_err();
        assert_eq!(
            err,
            TlvError::Construction(ConstructionError::TagTypeMismatch {
                tag: "E0".to_string(),
                expected: TlvType::Primitive,
                actual: TlvType::Constructed,
            })
        );
    }

    #[test]
    fn test_rejects_bad_input() {
        assert!(matches!(
            TlvFactory::primitive_tlv("", "01"),
            Err(TlvError::Construction(ConstructionError::Empty { .. }))
        ));
        assert!(matches!(
            TlvFactory::primitive_tlv(TlvInput::Absent, "01"),
            Err(TlvError::Construction(ConstructionError::Empty { .. }))
        ));
        assert!(matches!(
            TlvFactory::primitive_tlv("5A", "123"),
            Err(TlvError::Construction(ConstructionError::UnevenHexDigits { .. }))
        ));
        assert!(matches!(
            TlvFactory::primitive_tlv("5G", "12"),
            Err(TlvError::Construction(ConstructionError::NonHexCharacters { .. }))
        ));
        assert!(matches!(
            TlvFactory::primitive_tlv(TlvInput::Unsupported("number"), ""),
            Err(TlvError::Construction(ConstructionError::UnsupportedFormat { .. }))
        ));
        assert!(matches!(
            TlvFactory::primitive_tlv("5A", TlvInput::Unsupported("number")),
            Err(TlvError::Construction(ConstructionError::UnsupportedFormat { .. }))
        ));
    }

    #[test]
    fn test_constructed_variants() {
        let payload = TlvFactory::parse("5A00").unwrap();
        let single = TlvFactory::primitive_tlv("5A", ()).unwrap();

        let cases = [
            TlvFactory::constructed_tlv("E0", payload.clone()).unwrap(),
            TlvFactory::constructed_tlv("e0", payload.as_slice()).unwrap(),
            TlvFactory::constructed_tlv(vec![0xE0], payload).unwrap(),
            TlvFactory::constructed_tlv("E0", single).unwrap(),
        ];
        for tlv in cases {
            assert_eq!(tlv.node_type(), TlvType::Constructed);
            assert_eq!(tlv.node_class(), TlvClass::Private);
            assert_eq!(hex_of(&TlvFactory::serialize(&tlv).unwrap()), "E0025A00");
        }

        let empty = TlvFactory::constructed_tlv([0xE0u8], ()).unwrap();
        assert_eq!(hex_of(&TlvFactory::serialize(empty).unwrap()), "E000");
    }

    #[test]
    fn test_constructed_rejects_primitive_tag() {
        let err = TlvFactory::constructed_tlv("5A", ()).unwrap_err();
        assert!(matches!(
            err,
            TlvError::Construction(ConstructionError::TagTypeMismatch { .. })
        ));
    }

    #[test]
    fn test_parse_partial_error() {
        let err = TlvFactory::parse("5A0101DF").unwrap_err();
        assert_eq!(err.partial.len(), 1);
        assert_eq!(err.partial[0].tag_hex(), "5A");
        assert_eq!(err.error.category(), "parse");
        assert!(matches!(
            err.error,
            TlvError::Parse(ParseError::InsufficientTagData { .. })
        ));
    }

    #[test]
    fn test_parse_lone_tag_fails() {
        let err = TlvFactory::parse(vec![0xDF]).unwrap_err();
        assert!(err.partial.is_empty());
    }

    #[test]
    fn test_parse_bad_hex() {
        let err = TlvFactory::parse("5A0").unwrap_err();
        assert!(err.partial.is_empty());
        assert_eq!(err.error.category(), "construction");
    }

    #[test]
    fn test_parse_outcome_pair() {
        let outcome = TlvFactory::parse_outcome("5A04AABB");
        assert_eq!(outcome.result.len(), 1);
        assert_eq!(outcome.result[0].value(), Some(&[0xAA, 0xBB][..]));
        assert!(matches!(
            outcome.error,
            Some(TlvError::Parse(ParseError::InsufficientValueData { missing: 2, .. }))
        ));

        let complete = TlvFactory::parse_outcome(TlvInput::Absent);
        assert!(complete.is_complete());
        assert!(complete.result.is_empty());
    }

    #[test]
    fn test_parse_with_depth_limit() {
        let config = ParserConfig::new().max_depth(0);
        let err = TlvFactory::parse_with(&config, "E0025A00").unwrap_err();
        assert_eq!(err.partial[0].children(), Some(&[][..]));
        assert!(matches!(
            err.error,
            TlvError::Parse(ParseError::NestingTooDeep { limit: 0, .. })
        ));
    }

    #[test]
    fn test_serialize_sequences() {
        let items = TlvFactory::parse("5A020100570101").unwrap();
        assert_eq!(hex_of(&TlvFactory::serialize(&items).unwrap()), "5A020100570101");
        assert_eq!(hex_of(&TlvFactory::serialize(items.as_slice()).unwrap()), "5A020100570101");
        assert_eq!(hex_of(&TlvFactory::serialize(items).unwrap()), "5A020100570101");
        assert!(TlvFactory::serialize(Vec::<TlvNode>::new()).unwrap().is_empty());
    }
}
