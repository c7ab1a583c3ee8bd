//! BER-TLV parser and serializer
//!
//! Structural work only: this crate turns bytes into [`TlvNode`] trees and
//! back. Input normalization lives in the `bertlv` facade crate.

pub mod ber;
pub mod config;

pub use ber::{
    OctetCursor, TlvDecoder, TlvEncoder, encode_length, parse_item, parse_items, read_length,
    read_tag, serialize_item, serialize_items,
};
pub use bertlv_core::{ParseError, ParseOutcome, SerializeError, TlvNode};
pub use config::ParserConfig;
