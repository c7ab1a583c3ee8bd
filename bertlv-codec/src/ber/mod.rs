//! BER-TLV decoder and encoder
//!
//! Each item is a Tag-Length-Value triplet:
//!
//! ```text
//! [Tag] [Length] [Value]
//! ```
//!
//! Primitive items carry opaque value bytes. Constructed items carry a
//! concatenation of further items, decoded recursively.
//!
//! # Implementation Notes
//!
//! 1. **Tags**: any number of continuation bytes is accepted; the raw bytes
//!    are kept as-is.
//! 2. **Lengths**: short form and long form with 1 to 4 length bytes.
//!    Indefinite length is not supported.
//! 3. **Padding**: `0x00` bytes between items are skipped.
//! 4. **Errors**: decoding returns a [`bertlv_core::ParseOutcome`] so that
//!    partial trees survive truncated input.

pub mod cursor;
pub mod decoder;
pub mod encoder;
pub mod types;

pub use cursor::OctetCursor;
pub use decoder::{TlvDecoder, parse_item, parse_items};
pub use encoder::{TlvEncoder, serialize_item, serialize_items};
pub use types::{encode_length, read_length, read_tag};
