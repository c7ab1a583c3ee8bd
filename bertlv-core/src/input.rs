//! Normalization of loosely-typed caller input
//!
//! Callers may hand over raw bytes or hexadecimal text. Everything is turned
//! into plain bytes here, once, before any structural code runs.

use bytes::Bytes;

use crate::error::ConstructionError;

/// Raw bytes or hex text supplied by a caller
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TlvInput {
    /// Raw bytes, passed through unchanged
    Bytes(Vec<u8>),
    /// Hexadecimal text, two digits per byte, either case
    Hex(String),
    /// No input given
    #[default]
    Absent,
    /// Some other shape, named by the string (only produced when deserializing)
    Unsupported(&'static str),
}

impl TlvInput {
    /// Normalize to bytes, treating absent input as empty
    pub fn into_bytes(self, parameter: &str) -> Result<Vec<u8>, ConstructionError> {
        match self {
            TlvInput::Bytes(bytes) => Ok(bytes),
            TlvInput::Hex(text) => decode_hex(parameter, &text),
            TlvInput::Absent => Ok(Vec::new()),
            TlvInput::Unsupported(_) => Err(ConstructionError::UnsupportedFormat {
                parameter: parameter.to_string(),
            }),
        }
    }

    /// Normalize to bytes, rejecting absent or zero-length input
    pub fn into_required_bytes(self, parameter: &str) -> Result<Vec<u8>, ConstructionError> {
        if matches!(self, TlvInput::Absent) {
            return Err(empty(parameter));
        }
        let bytes = self.into_bytes(parameter)?;
        if bytes.is_empty() {
            return Err(empty(parameter));
        }
        Ok(bytes)
    }
}

fn empty(parameter: &str) -> ConstructionError {
    ConstructionError::Empty {
        parameter: parameter.to_string(),
    }
}

/// Decode hex text
///
/// # Errors
/// - [`ConstructionError::UnevenHexDigits`] if the text has odd length
/// - [`ConstructionError::NonHexCharacters`] if any character is not a hex digit
pub fn decode_hex(parameter: &str, text: &str) -> Result<Vec<u8>, ConstructionError> {
    if text.chars().count() % 2 != 0 {
        return Err(ConstructionError::UnevenHexDigits {
            parameter: parameter.to_string(),
            given: text.to_string(),
        });
    }
    hex::decode(text).map_err(|_| ConstructionError::NonHexCharacters {
        parameter: parameter.to_string(),
        given: text.to_string(),
    })
}

impl From<Vec<u8>> for TlvInput {
    fn from(bytes: Vec<u8>) -> Self {
        TlvInput::Bytes(bytes)
    }
}

impl From<&[u8]> for TlvInput {
    fn from(bytes: &[u8]) -> Self {
        TlvInput::Bytes(bytes.to_vec())
    }
}

impl<const N: usize> From<[u8; N]> for TlvInput {
    fn from(bytes: [u8; N]) -> Self {
        TlvInput::Bytes(bytes.to_vec())
    }
}

impl<const N: usize> From<&[u8; N]> for TlvInput {
    fn from(bytes: &[u8; N]) -> Self {
        TlvInput::Bytes(bytes.to_vec())
    }
}

impl From<Bytes> for TlvInput {
    fn from(bytes: Bytes) -> Self {
        TlvInput::Bytes(bytes.to_vec())
    }
}

impl From<&str> for TlvInput {
    fn from(text: &str) -> Self {
        TlvInput::Hex(text.to_string())
    }
}

impl From<String> for TlvInput {
    fn from(text: String) -> Self {
        TlvInput::Hex(text)
    }
}

impl<T: Into<TlvInput>> From<Option<T>> for TlvInput {
    fn from(input: Option<T>) -> Self {
        input.map_or(TlvInput::Absent, Into::into)
    }
}

impl From<()> for TlvInput {
    fn from(_: ()) -> Self {
        TlvInput::Absent
    }
}
