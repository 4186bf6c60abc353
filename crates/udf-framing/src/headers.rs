//! Embedded header frame parse/encode.
//!
//! Format: `[0xFF magic][1 byte: header count]` then per header
//! `[1 byte: key length][key][4 bytes: u32 BE value length][value]`.
//! Values are UTF-8 text holding JSON (producers JSON-encode even scalar
//! values, so a plain string arrives wrapped in quotes). A first byte
//! other than `0xFF` means no headers are embedded; that byte is still
//! consumed and the record body starts immediately after it.

use serde_json::{Map, Value};

use crate::cursor::ByteCursor;
use crate::error::FramingError;

/// Sentinel byte marking an embedded header block.
pub const HEADER_MAGIC: u8 = 0xFF;

/// Ordered headers parsed from the front of a record payload.
///
/// Entries keep insertion order; a duplicate key overwrites the value
/// (last write wins) without moving the key.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HeaderBlock {
    /// Whether the magic byte was found and a header block was parsed.
    pub present: bool,
    pub entries: Map<String, Value>,
}

impl HeaderBlock {
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Parse the header block from the front of `cursor`.
///
/// Consumes exactly the header-block bytes on success. On every path,
/// including the absent-magic case, the cursor is left at the first byte
/// of the record body.
///
/// # Errors
/// `TruncatedFrame` if a length prefix points past the end of the
/// buffer; `InvalidHeaderEncoding` if a key or value is not UTF-8 or a
/// value fails to parse as JSON.
pub fn parse_headers(cursor: &mut ByteCursor) -> Result<HeaderBlock, FramingError> {
    let magic = cursor.read_u8()?;
    if magic != HEADER_MAGIC {
        return Ok(HeaderBlock {
            present: false,
            entries: Map::new(),
        });
    }

    let header_count = cursor.read_u8()?;
    let mut entries = Map::new();
    for _ in 0..header_count {
        let key_len = cursor.read_u8()? as usize;
        let key = utf8(cursor.read_slice(key_len)?, "header key")?;
        let value_len = cursor.read_u32_be()? as usize;
        let value_text = utf8(cursor.read_slice(value_len)?, "header value")?;
        let value: Value = serde_json::from_str(&value_text).map_err(|e| {
            FramingError::InvalidHeaderEncoding(format!(
                "header {key:?} value is not valid JSON: {e}"
            ))
        })?;
        entries.insert(key, value);
    }

    Ok(HeaderBlock {
        present: true,
        entries,
    })
}

/// Encode a header block in the wire format parsed by [`parse_headers`].
///
/// # Errors
/// `InvalidHeaderEncoding` if there are more than 255 headers or a key
/// exceeds 255 bytes (the count and key-length fields are one byte).
pub fn encode_headers(entries: &Map<String, Value>) -> Result<Vec<u8>, FramingError> {
    if entries.len() > u8::MAX as usize {
        return Err(FramingError::InvalidHeaderEncoding(format!(
            "too many headers: {} (max 255)",
            entries.len()
        )));
    }

    let mut out = vec![HEADER_MAGIC, entries.len() as u8];
    for (key, value) in entries {
        if key.len() > u8::MAX as usize {
            return Err(FramingError::InvalidHeaderEncoding(format!(
                "header key {key:?} is {} bytes (max 255)",
                key.len()
            )));
        }
        let value_text = value.to_string();
        out.push(key.len() as u8);
        out.extend_from_slice(key.as_bytes());
        out.extend_from_slice(&(value_text.len() as u32).to_be_bytes());
        out.extend_from_slice(value_text.as_bytes());
    }
    Ok(out)
}

fn utf8(bytes: &[u8], what: &str) -> Result<String, FramingError> {
    std::str::from_utf8(bytes)
        .map(str::to_string)
        .map_err(|e| FramingError::InvalidHeaderEncoding(format!("{what} is not UTF-8: {e}")))
}
