use thiserror::Error;

use crate::tag::TlvType;

/// Errors raised while building a TLV node from caller input
///
/// These are terminal for the call: no partial node is produced.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConstructionError {
    #[error("\"{parameter}\" must not be <null> or \"\"")]
    Empty { parameter: String },

    #[error("\"{parameter}\" must be an even number, given \"{given}\"")]
    UnevenHexDigits { parameter: String, given: String },

    #[error("\"{parameter}\" must only contain hex characters, given \"{given}\"")]
    NonHexCharacters { parameter: String, given: String },

    #[error("\"{parameter}\" is an unsupported format")]
    UnsupportedFormat { parameter: String },

    #[error("tag \"{tag}\" is {actual}, expected {expected}")]
    TagTypeMismatch {
        tag: String,
        expected: TlvType,
        actual: TlvType,
    },
}

impl ConstructionError {
    pub fn name(&self) -> String {
        "Error creating tlv item".to_string()
    }
}

/// Errors raised while decoding a byte buffer
///
/// The parser pairs every one of these with the partial result decoded so far,
/// see [`crate::ParseOutcome`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("Need at least 1 additional byte to complete tag")]
    InsufficientTagData { partial_tag: String },

    #[error("Need at least {missing} additional bytes to read length information")]
    InsufficientLengthData { tag: String, missing: usize },

    #[error("Maximum number of concatenated length bytes supported is 4, present {given}")]
    LengthTooBig { tag: String, given: usize },

    #[error("Need at least {missing} additional bytes for reading complete value")]
    InsufficientValueData { tag: String, missing: usize },

    #[error("Nesting depth exceeds the configured limit of {limit}")]
    NestingTooDeep { tag: String, limit: usize },
}

impl ParseError {
    /// Short context line naming the stage and item that failed
    pub fn name(&self) -> String {
        match self {
            ParseError::InsufficientTagData { partial_tag } => {
                format!("Error while reading tag for item starting with \"{}\"", partial_tag)
            }
            ParseError::InsufficientLengthData { tag, .. } | ParseError::LengthTooBig { tag, .. } => {
                format!("Error while reading length for item \"{}\"", tag)
            }
            ParseError::InsufficientValueData { tag, .. } => {
                format!("Error while reading value for item \"{}\"", tag)
            }
            ParseError::NestingTooDeep { tag, .. } => {
                format!("Error while descending into item \"{}\"", tag)
            }
        }
    }
}

/// Errors raised while encoding a node tree
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SerializeError {
    #[error("Provided length is {requested}, maximum supported {maximum}")]
    PayloadTooLarge {
        tag: String,
        requested: u64,
        maximum: u64,
    },
}

impl SerializeError {
    pub fn name(&self) -> String {
        match self {
            SerializeError::PayloadTooLarge { tag, .. } => {
                format!("Error while serializing item \"{}\"", tag)
            }
        }
    }
}

/// Main error type for BER-TLV operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TlvError {
    #[error("{}: {}", .0.name(), .0)]
    Construction(#[from] ConstructionError),

    #[error("{}: {}", .0.name(), .0)]
    Parse(#[from] ParseError),

    #[error("{}: {}", .0.name(), .0)]
    Serialize(#[from] SerializeError),
}

impl TlvError {
    /// Which layer raised the error
    pub fn category(&self) -> &'static str {
        match self {
            TlvError::Construction(_) => "construction",
            TlvError::Parse(_) => "parse",
            TlvError::Serialize(_) => "serialize",
        }
    }

    /// Context line of the wrapped error
    pub fn name(&self) -> String {
        match self {
            TlvError::Construction(e) => e.name(),
            TlvError::Parse(e) => e.name(),
            TlvError::Serialize(e) => e.name(),
        }
    }
}

/// Result type alias for BER-TLV operations
pub type TlvResult<T> = Result<T, TlvError>;
