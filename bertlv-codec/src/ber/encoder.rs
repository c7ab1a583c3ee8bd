//! BER-TLV encoder
//!
//! Tag bytes are written as stored in the node. The length field is always
//! recomputed from the real payload, in its minimal form.
//!
//! # Usage Example
//!
//! ```rust
//! use bertlv_codec::{parse_items, serialize_items};
//!
//! let data = vec![0xE0, 0x03, 0x57, 0x01, 0x01];
//! let items = parse_items(data.clone()).result;
//! assert_eq!(serialize_items(&items).unwrap(), data);
//! ```

use bertlv_core::{SerializeError, TlvNode, TlvPayload};

use super::types::encode_length;

/// BER-TLV encoder
///
/// Accumulates encoded items in a `Vec<u8>`.
#[derive(Debug, Default)]
pub struct TlvEncoder {
    buffer: Vec<u8>,
}

impl TlvEncoder {
    pub fn new() -> Self {
        Self { buffer: Vec::new() }
    }

    /// Create a new encoder with initial capacity
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buffer: Vec::with_capacity(capacity),
        }
    }

    /// Append one item, children first for constructed items
    pub fn encode_item(&mut self, item: &TlvNode) -> Result<(), SerializeError> {
        match item.payload() {
            TlvPayload::Primitive(value) => self.encode_tlv(item, value),
            TlvPayload::Constructed(children) => {
                let mut nested = TlvEncoder::new();
                nested.encode_items(children)?;
                self.encode_tlv(item, nested.as_bytes())
            }
        }
    }

    /// Append items in order
    pub fn encode_items(&mut self, items: &[TlvNode]) -> Result<(), SerializeError> {
        for item in items {
            self.encode_item(item)?;
        }
        Ok(())
    }

    fn encode_tlv(&mut self, item: &TlvNode, payload: &[u8]) -> Result<(), SerializeError> {
        let length = encode_length(item.tag(), payload.len() as u64)?;
        log::trace!("encoding item {} with {} payload byte(s)", item.tag(), payload.len());

        self.buffer.extend_from_slice(item.tag().as_bytes());
        self.buffer.extend_from_slice(&length);
        self.buffer.extend_from_slice(payload);
        Ok(())
    }

    /// Get the encoded bytes
    pub fn into_bytes(self) -> Vec<u8> {
        self.buffer
    }

    /// Get a reference to the encoded bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.buffer
    }

    /// Clear the encoder buffer
    pub fn clear(&mut self) {
        self.buffer.clear();
    }
}

/// Encode a sequence of items
pub fn serialize_items(items: &[TlvNode]) -> Result<Vec<u8>, SerializeError> {
    let mut encoder = TlvEncoder::new();
    encoder.encode_items(items)?;
    Ok(encoder.into_bytes())
}

/// Encode a single item
pub fn serialize_item(item: &TlvNode) -> Result<Vec<u8>, SerializeError> {
    let mut encoder = TlvEncoder::new();
    encoder.encode_item(item)?;
    Ok(encoder.into_bytes())
}
