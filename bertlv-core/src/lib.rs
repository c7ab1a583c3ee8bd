//! Core types for BER-TLV encoded data
//!
//! This crate provides the node model, tag classification, error types and
//! input normalization shared by the codec and the factory layer.

pub mod error;
pub mod input;
pub mod node;
pub mod outcome;
pub mod tag;

pub use error::{ConstructionError, ParseError, SerializeError, TlvError, TlvResult};
pub use input::TlvInput;
pub use node::{TlvNode, TlvPayload};
pub use outcome::ParseOutcome;
pub use tag::{Tag, TlvClass, TlvType, class_from_tag, type_from_tag};
