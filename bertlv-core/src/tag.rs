//! Tag classification
//!
//! Only the first tag byte carries type and class information:
//!
//! ```text
//! Bits: 8 7 6 5 4 3 2 1
//!       C C P T T T T T
//! ```
//! Where:
//! - CC = Class (00=Universal, 01=Application, 10=Context, 11=Private)
//! - P = Primitive (0) or Constructed (1)
//! - TTTTT = Tag number, or 11111 when further tag bytes follow

use std::fmt;

use bytes::Bytes;

use crate::error::ConstructionError;

pub const TAG_CONSTRUCTED_FLAG: u8 = 0x20;
pub const TAG_CLASS_MASK: u8 = 0xC0;
pub const TAG_CLASS_UNIVERSAL: u8 = 0x00;
pub const TAG_CLASS_APPLICATION: u8 = 0x40;
pub const TAG_CLASS_CONTEXT_SPECIFIC: u8 = 0x80;

/// Whether a node carries a value or nested nodes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TlvType {
    Primitive,
    Constructed,
}

impl fmt::Display for TlvType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TlvType::Primitive => write!(f, "PRIMITIVE"),
            TlvType::Constructed => write!(f, "CONSTRUCTED"),
        }
    }
}

/// Tag class, bits 8-7 of the first tag byte
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TlvClass {
    /// Universal class (00)
    Universal,
    /// Application class (01)
    Application,
    /// Context-specific class (10)
    ContextSpecific,
    /// Private class (11)
    Private,
}

impl fmt::Display for TlvClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TlvClass::Universal => write!(f, "UNIVERSAL"),
            TlvClass::Application => write!(f, "APPLICATION"),
            TlvClass::ContextSpecific => write!(f, "CONTEXT_SPECIFIC"),
            TlvClass::Private => write!(f, "PRIVATE"),
        }
    }
}

/// Type from the first tag byte
pub fn type_from_tag(first_byte: u8) -> TlvType {
    if first_byte & TAG_CONSTRUCTED_FLAG == TAG_CONSTRUCTED_FLAG {
        TlvType::Constructed
    } else {
        TlvType::Primitive
    }
}

/// Class from the first tag byte
pub fn class_from_tag(first_byte: u8) -> TlvClass {
    match first_byte & TAG_CLASS_MASK {
        TAG_CLASS_UNIVERSAL => TlvClass::Universal,
        TAG_CLASS_APPLICATION => TlvClass::Application,
        TAG_CLASS_CONTEXT_SPECIFIC => TlvClass::ContextSpecific,
        _ => TlvClass::Private,
    }
}

/// Raw tag bytes of a TLV item
///
/// A tag is never empty. Its canonical text form is uppercase hex, so the
/// three byte tag `DF AE 03` displays as `DFAE03`.
///
/// The bytes are taken as given: continuation bits are checked by the parser
/// when decoding, not here.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Tag {
    bytes: Bytes,
}

impl Tag {
    /// Create a tag from raw bytes
    ///
    /// # Errors
    /// Returns [`ConstructionError::Empty`] if `bytes` is empty.
    pub fn new(bytes: impl Into<Bytes>) -> Result<Self, ConstructionError> {
        let bytes = bytes.into();
        if bytes.is_empty() {
            return Err(ConstructionError::Empty {
                parameter: "tag".to_string(),
            });
        }
        Ok(Self { bytes })
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn first_byte(&self) -> u8 {
        self.bytes[0]
    }

    pub fn node_type(&self) -> TlvType {
        type_from_tag(self.first_byte())
    }

    pub fn node_class(&self) -> TlvClass {
        class_from_tag(self.first_byte())
    }

    /// Uppercase hex form, e.g. `9F02`
    pub fn to_hex(&self) -> String {
        hex::encode_upper(&self.bytes)
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl PartialEq<[u8]> for Tag {
    fn eq(&self, other: &[u8]) -> bool {
        self.as_bytes() == other
    }
}

impl PartialEq<&str> for Tag {
    fn eq(&self, other: &&str) -> bool {
        self.to_hex().eq_ignore_ascii_case(other)
    }
}
