//! BER tag and length fields
//!
//! # Tag
//!
//! If the low five bits of the first byte are all set, further tag bytes
//! follow. Every following byte with bit 8 set announces yet another byte:
//! ```text
//! First byte:      C C P 1 1 1 1 1
//! Following bytes: 1 T T T T T T T  (last byte has bit 8 = 0)
//! ```
//!
//! # Length
//!
//! Short form (0-127):
//! ```text
//! Byte: 0 L L L L L L L
//! ```
//! Long form, 1 to 4 big-endian length bytes:
//! ```text
//! First byte:  1 N N N N N N N  (N = number of length bytes)
//! ```

use bertlv_core::{ParseError, SerializeError, Tag};

use super::cursor::OctetCursor;

pub const TAG_NUMBER_MASK: u8 = 0x1F;
pub const TAG_HAS_NEXT_BYTE_FLAG: u8 = 0x80;
pub const LENGTH_LONG_FORM_FLAG: u8 = 0x80;
pub const LENGTH_ADDITIONAL_BYTES_MASK: u8 = 0x7F;
pub const MAX_LENGTH_BYTES: usize = 4;
pub const MAX_LENGTH: u64 = 0xFFFF_FFFF;

/// Read a tag, following multi-byte continuation
///
/// # Errors
/// [`ParseError::InsufficientTagData`] if the buffer ends before the last tag
/// byte, carrying the tag bytes read so far.
pub fn read_tag(cursor: &mut OctetCursor) -> Result<Tag, ParseError> {
    let Some(first) = cursor.read_u8() else {
        return Err(ParseError::InsufficientTagData {
            partial_tag: String::new(),
        });
    };
    let mut bytes = vec![first];

    if first & TAG_NUMBER_MASK == TAG_NUMBER_MASK {
        loop {
            let Some(next) = cursor.read_u8() else {
                return Err(ParseError::InsufficientTagData {
                    partial_tag: hex::encode_upper(&bytes),
                });
            };
            bytes.push(next);
            if next & TAG_HAS_NEXT_BYTE_FLAG == 0 {
                break;
            }
        }
    }

    Tag::new(bytes).map_err(|_| ParseError::InsufficientTagData {
        partial_tag: String::new(),
    })
}

/// Read a definite length field
///
/// The marker `0x80` (zero additional bytes) is read as length 0; indefinite
/// length is not supported.
///
/// # Errors
/// - [`ParseError::InsufficientLengthData`] with the number of missing bytes
/// - [`ParseError::LengthTooBig`] if more than 4 length bytes are announced
pub fn read_length(cursor: &mut OctetCursor, tag: &Tag) -> Result<usize, ParseError> {
    let Some(first) = cursor.read_u8() else {
        return Err(ParseError::InsufficientLengthData {
            tag: tag.to_hex(),
            missing: 1,
        });
    };

    if first & LENGTH_LONG_FORM_FLAG == 0 {
        return Ok(usize::from(first));
    }

    let count = usize::from(first & LENGTH_ADDITIONAL_BYTES_MASK);
    if count > MAX_LENGTH_BYTES {
        return Err(ParseError::LengthTooBig {
            tag: tag.to_hex(),
            given: count,
        });
    }
    if count == 0 {
        return Ok(0);
    }
    if cursor.remaining() < count {
        return Err(ParseError::InsufficientLengthData {
            tag: tag.to_hex(),
            missing: count - cursor.remaining(),
        });
    }

    let length = cursor
        .read_uint(count)
        .ok_or_else(|| ParseError::InsufficientLengthData {
            tag: tag.to_hex(),
            missing: count,
        })?;
    Ok(length as usize)
}

/// Canonical (minimal) length field for a payload of `length` bytes
///
/// # Errors
/// [`SerializeError::PayloadTooLarge`] above `0xFFFFFFFF`.
pub fn encode_length(tag: &Tag, length: u64) -> Result<Vec<u8>, SerializeError> {
    if length < u64::from(LENGTH_LONG_FORM_FLAG) {
        return Ok(vec![length as u8]);
    }
    if length > MAX_LENGTH {
        return Err(SerializeError::PayloadTooLarge {
            tag: tag.to_hex(),
            requested: length,
            maximum: MAX_LENGTH,
        });
    }

    let width = if length <= 0xFF {
        1
    } else if length <= 0xFFFF {
        2
    } else if length <= 0xFF_FFFF {
        3
    } else {
        4
    };

    let mut result = Vec::with_capacity(1 + width);
    result.push(LENGTH_LONG_FORM_FLAG | width as u8);
    result.extend_from_slice(&(length as u32).to_be_bytes()[4 - width..]);
    Ok(result)
}
