//! BER-TLV decoder
//!
//! Decoding is best-effort: a truncated or malformed buffer still yields every
//! item decoded before the problem, paired with the error that stopped it.
//!
//! # Usage Example
//!
//! ```rust
//! use bertlv_codec::parse_items;
//!
//! let outcome = parse_items(vec![0xE0, 0x03, 0x57, 0x01, 0x01]);
//! assert!(outcome.is_complete());
//! assert_eq!(outcome.result[0].tag_hex(), "E0");
//! ```

use bertlv_core::{ParseError, ParseOutcome, TlvNode, TlvPayload, TlvType};
use bytes::Bytes;

use super::cursor::OctetCursor;
use super::types::{read_length, read_tag};
use crate::config::ParserConfig;

/// Filler between items, never a valid tag
pub const PADDING_BYTE: u8 = 0x00;

/// BER-TLV decoder
///
/// Decodes a buffer into a sequence of [`TlvNode`] trees, recursing into
/// constructed items. Recursion depth equals the nesting depth of the input
/// unless [`ParserConfig::max_depth`] bounds it.
#[derive(Debug, Clone, Default)]
pub struct TlvDecoder {
    config: ParserConfig,
}

impl TlvDecoder {
    pub fn new(config: ParserConfig) -> Self {
        Self { config }
    }

    /// Decode all items in `data`
    ///
    /// Stops at the first failing item and returns everything decoded up to
    /// and including it. Empty input decodes to an empty sequence.
    pub fn parse_items(&self, data: impl Into<Bytes>) -> ParseOutcome<Vec<TlvNode>> {
        let mut cursor = OctetCursor::new(data);
        self.decode_items(&mut cursor, 0)
    }

    /// Decode one item at the cursor position
    ///
    /// Tag and length failures yield no node. Value failures yield the node
    /// with whatever payload could be read.
    pub fn parse_item(&self, cursor: &mut OctetCursor) -> ParseOutcome<Option<TlvNode>> {
        self.decode_item(cursor, 0)
    }

    fn decode_items(&self, cursor: &mut OctetCursor, depth: usize) -> ParseOutcome<Vec<TlvNode>> {
        let mut items = Vec::new();

        while cursor.has_remaining() {
            skip_padding(cursor);
            if !cursor.has_remaining() {
                break;
            }

            let outcome = self.decode_item(cursor, depth);
            if let Some(item) = outcome.result {
                items.push(item);
            }
            if let Some(error) = outcome.error {
                log::debug!(
                    "{}: {} (kept {} item(s) at depth {})",
                    error.name(),
                    error,
                    items.len(),
                    depth
                );
                return ParseOutcome::partial(items, error);
            }
        }

        ParseOutcome::ok(items)
    }

    fn decode_item(&self, cursor: &mut OctetCursor, depth: usize) -> ParseOutcome<Option<TlvNode>> {
        let tag = match read_tag(cursor) {
            Ok(tag) => tag,
            Err(e) => return ParseOutcome::failed(e),
        };
        let length = match read_length(cursor, &tag) {
            Ok(length) => length,
            Err(e) => return ParseOutcome::failed(e),
        };
        log::trace!("item {} at depth {}, length {}", tag, depth, length);

        let (body, shortage) = match cursor.read_bytes(length) {
            Some(body) => (body, None),
            None => {
                let missing = length - cursor.remaining();
                let error = ParseError::InsufficientValueData {
                    tag: tag.to_hex(),
                    missing,
                };
                (cursor.read_remaining(), Some(error))
            }
        };

        match tag.node_type() {
            TlvType::Primitive => {
                let node = TlvNode::new_unchecked(tag, TlvPayload::Primitive(body));
                ParseOutcome {
                    result: Some(node),
                    error: shortage,
                }
            }
            TlvType::Constructed => {
                if let Some(limit) = self.config.depth_limit() {
                    if depth >= limit && !body.is_empty() {
                        let too_deep = ParseError::NestingTooDeep {
                            tag: tag.to_hex(),
                            limit,
                        };
                        let node = TlvNode::new_unchecked(tag, TlvPayload::Constructed(Vec::new()));
                        return ParseOutcome {
                            result: Some(node),
                            error: shortage.or(Some(too_deep)),
                        };
                    }
                }

                let mut sub_cursor = OctetCursor::new(body);
                let children = self.decode_items(&mut sub_cursor, depth + 1);
                let node = TlvNode::new_unchecked(tag, TlvPayload::Constructed(children.result));
                ParseOutcome {
                    result: Some(node),
                    error: shortage.or(children.error),
                }
            }
        }
    }
}

/// Skip a run of padding bytes
fn skip_padding(cursor: &mut OctetCursor) {
    let mut skipped = 0usize;
    while cursor.peek() == Some(PADDING_BYTE) {
        cursor.read_u8();
        skipped += 1;
    }
    if skipped > 0 {
        log::trace!("skipped {} padding byte(s)", skipped);
    }
}

/// Decode all items in `data` with the default configuration
pub fn parse_items(data: impl Into<Bytes>) -> ParseOutcome<Vec<TlvNode>> {
    TlvDecoder::default().parse_items(data)
}

/// Decode one item at the cursor position with the default configuration
pub fn parse_item(cursor: &mut OctetCursor) -> ParseOutcome<Option<TlvNode>> {
    TlvDecoder::default().parse_item(cursor)
}

#[cfg(test)]
mod tests {
    use super::*;
    use bertlv_core::TlvClass;

    fn parse_hex(data: &str) -> ParseOutcome<Vec<TlvNode>> {
        parse_items(hex::decode(data).unwrap())
    }

    #[test]
    fn test_single_primitive() {
        let outcome = parse_hex("5A022020");
        assert!(outcome.is_complete());
        assert_eq!(outcome.result.len(), 1);
        let item = &outcome.result[0];
        assert_eq!(item.tag_hex(), "5A");
        assert_eq!(item.node_type(), TlvType::Primitive);
        assert_eq!(item.node_class(), TlvClass::Application);
        assert_eq!(item.value(), Some(&[0x20, 0x20][..]));
    }

    #[test]
    fn test_multi_byte_tags() {
        for (data, tag) in [("5A022020", "5A"), ("9F02022020", "9F02"), ("DFAE03022020", "DFAE03")] {
            let outcome = parse_hex(data);
            assert!(outcome.is_complete());
            assert_eq!(outcome.result[0].tag_hex(), tag);
            assert_eq!(outcome.result[0].node_type(), TlvType::Primitive);
        }
    }

    #[test]
    fn test_long_form_lengths() {
        for length in ["8102", "820002", "83000002", "8400000002"] {
            let outcome = parse_hex(&format!("DFAE03{}2020", length));
            assert!(outcome.is_complete(), "length {}", length);
            assert_eq!(outcome.result[0].value().map(<[u8]>::len), Some(2));
        }
    }

    #[test]
    fn test_zero_length_item() {
        let outcome = parse_hex("1200");
        assert!(outcome.is_complete());
        assert_eq!(outcome.result[0].value(), Some(&[][..]));
    }

    #[test]
    fn test_skips_padding() {
        let outcome = parse_hex("00005A0101005702020200");
        assert!(outcome.is_complete());
        let tags: Vec<String> = outcome.result.iter().map(TlvNode::tag_hex).collect();
        assert_eq!(tags, vec!["5A", "57"]);
    }

    #[test]
    fn test_empty_input() {
        let outcome = parse_items(Vec::new());
        assert!(outcome.is_complete());
        assert!(outcome.result.is_empty());

        let padding_only = parse_hex("000000");
        assert!(padding_only.is_complete());
        assert!(padding_only.result.is_empty());
    }

    #[test]
    fn test_nested_constructed() {
        let outcome = parse_hex("E005E003570101");
        assert!(outcome.is_complete());
        assert_eq!(outcome.result.len(), 1);

        let outer = &outcome.result[0];
        assert_eq!(outer.tag_hex(), "E0");
        assert_eq!(outer.node_type(), TlvType::Constructed);
        let inner = &outer.children().unwrap()[0];
        assert_eq!(inner.tag_hex(), "E0");
        assert_eq!(inner.node_type(), TlvType::Constructed);
        let leaf = &inner.children().unwrap()[0];
        assert_eq!(leaf.tag_hex(), "57");
        assert_eq!(leaf.value(), Some(&[0x01][..]));
    }

    #[test]
    fn test_truncated_tag_keeps_previous_items() {
        let outcome = parse_hex("5A0101DF");
        assert_eq!(outcome.result.len(), 1);
        assert_eq!(outcome.result[0].tag_hex(), "5A");
        assert_eq!(
            outcome.error,
            Some(ParseError::InsufficientTagData {
                partial_tag: "DF".to_string()
            })
        );
    }

    #[test]
    fn test_lone_multi_byte_tag_start() {
        let outcome = parse_hex("DF");
        assert!(outcome.result.is_empty());
        assert!(matches!(outcome.error, Some(ParseError::InsufficientTagData { .. })));
    }

    #[test]
    fn test_missing_length() {
        let outcome = parse_hex("5A0101 57".replace(' ', "").as_str());
        assert_eq!(outcome.result.len(), 1);
        assert_eq!(
            outcome.error,
            Some(ParseError::InsufficientLengthData {
                tag: "57".to_string(),
                missing: 1
            })
        );
    }

    #[test]
    fn test_length_too_big() {
        let outcome = parse_hex("5A850000000001");
        assert!(outcome.result.is_empty());
        assert_eq!(
            outcome.error,
            Some(ParseError::LengthTooBig {
                tag: "5A".to_string(),
                given: 5
            })
        );
    }

    #[test]
    fn test_truncated_primitive_value() {
        let outcome = parse_hex("5A04AABB");
        assert_eq!(outcome.result.len(), 1);
        assert_eq!(outcome.result[0].value(), Some(&[0xAA, 0xBB][..]));
        assert_eq!(
            outcome.error,
            Some(ParseError::InsufficientValueData {
                tag: "5A".to_string(),
                missing: 2
            })
        );
    }

    #[test]
    fn test_truncated_constructed_keeps_children() {
        // E0 declares 10 bytes but only 5 follow
        let outcome = parse_hex("E00A5A01015701");
        assert_eq!(outcome.result.len(), 1);
        let outer = &outcome.result[0];
        let children = outer.children().unwrap();
        assert_eq!(children.len(), 2);
        assert_eq!(children[0].tag_hex(), "5A");
        assert_eq!(children[1].tag_hex(), "57");
        assert_eq!(children[1].value(), Some(&[][..]));
        assert_eq!(
            outcome.error,
            Some(ParseError::InsufficientValueData {
                tag: "E0".to_string(),
                missing: 5
            })
        );
    }

    #[test]
    fn test_child_error_propagates() {
        // Inner 5A declares 3 bytes, only 1 available inside E0
        let outcome = parse_hex("E003 5A0301 570100".replace(' ', "").as_str());
        assert_eq!(outcome.result.len(), 1);
        let children = outcome.result[0].children().unwrap();
        assert_eq!(children.len(), 1);
        assert_eq!(children[0].value(), Some(&[0x01][..]));
        assert_eq!(
            outcome.error,
            Some(ParseError::InsufficientValueData {
                tag: "5A".to_string(),
                missing: 2
            })
        );
    }

    #[test]
    fn test_depth_limit() {
        let data = hex::decode("E005E003570101").unwrap();

        let limited = TlvDecoder::new(ParserConfig::new().max_depth(1)).parse_items(data.clone());
        assert_eq!(
            limited.error,
            Some(ParseError::NestingTooDeep {
                tag: "E0".to_string(),
                limit: 1
            })
        );
        let outer = &limited.result[0];
        let inner = &outer.children().unwrap()[0];
        assert_eq!(inner.children(), Some(&[][..]));

        let enough = TlvDecoder::new(ParserConfig::new().max_depth(2)).parse_items(data);
        assert!(enough.is_complete());
    }

    #[test]
    fn test_depth_limit_reports_truncation_first() {
        let decoder = TlvDecoder::new(ParserConfig::new().max_depth(0));
        let outcome = decoder.parse_items(hex::decode("E00A5A").unwrap());
        assert_eq!(outcome.result.len(), 1);
        assert_eq!(outcome.result[0].children(), Some(&[][..]));
        assert_eq!(
            outcome.error,
            Some(ParseError::InsufficientValueData {
                tag: "E0".to_string(),
                missing: 9
            })
        );
    }

    #[test]
    fn test_depth_limit_allows_empty_constructed() {
        let decoder = TlvDecoder::new(ParserConfig::new().max_depth(0));
        let outcome = decoder.parse_items(hex::decode("E000").unwrap());
        assert!(outcome.is_complete());
        assert_eq!(outcome.result[0].node_type(), TlvType::Constructed);
        assert_eq!(outcome.result[0].children(), Some(&[][..]));
    }

    #[test]
    fn test_long_form_without_length_bytes() {
        let outcome = parse_hex("5A80");
        assert!(outcome.is_complete());
        assert_eq!(outcome.result.len(), 1);
        assert_eq!(outcome.result[0].tag_hex(), "5A");
        assert_eq!(outcome.result[0].node_type(), TlvType::Primitive);
        assert_eq!(outcome.result[0].value(), Some(&[][..]));
    }

    #[test]
    fn test_parse_item_advances_cursor() {
        let mut cursor = OctetCursor::new(hex::decode("5A01019F0100").unwrap());
        let first = parse_item(&mut cursor);
        assert_eq!(first.result.unwrap().tag_hex(), "5A");
        let second = parse_item(&mut cursor);
        assert_eq!(second.result.unwrap().tag_hex(), "9F01");
        assert!(!cursor.has_remaining());
    }
}
