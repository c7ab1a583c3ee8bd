//! BER-TLV codec
//!
//! Decodes BER-TLV encoded data, the nested tag/length/value format used by
//! smart cards and EMV payment protocols, into a tree of typed nodes, and
//! encodes trees back into canonical bytes.
//!
//! # Architecture
//!
//! This library is organized as a workspace with multiple crates:
//!
//! - `bertlv-core`: node model, tag classification, errors, input normalization
//! - `bertlv-codec`: parser and serializer
//! - `bertlv`: validating factory, the public entry point
//!
//! # Usage
//!
//! ```rust
//! use bertlv::{TlvFactory, TlvType};
//!
//! let items = TlvFactory::parse("E005E003570101").unwrap();
//! assert_eq!(items[0].node_type(), TlvType::Constructed);
//! assert_eq!(TlvFactory::serialize(&items).unwrap(), hex_bytes());
//! # fn hex_bytes() -> Vec<u8> { vec![0xE0, 0x05, 0xE0, 0x03, 0x57, 0x01, 0x01] }
//! ```

pub mod error;
pub mod factory;

pub use error::PartialParseError;
pub use factory::{SerializeInput, TlvChildren, TlvFactory};

// Re-export core types
pub use bertlv_core::{
    ConstructionError, ParseError, ParseOutcome, SerializeError, Tag, TlvClass, TlvError, TlvInput,
    TlvNode, TlvPayload, TlvResult, TlvType,
};

// Re-export codec API
pub mod codec {
    pub use bertlv_codec::*;
}
pub use bertlv_codec::ParserConfig;
