//! Schema-keyed Avro decoding to JSON values.
//!
//! Decoding itself is delegated to the Avro library; this module pins
//! down the two entry points the pipeline needs (single datum against a
//! resolved schema, and self-describing container files) and converts
//! the decoded values to JSON trees. Nothing here mutates shared state,
//! so a failed decode leaves no partial effects.

use std::io::Read;

use apache_avro::{from_avro_datum, Reader, Schema};
use serde_json::Value as JsonValue;

use crate::error::PipelineError;

/// Decode one schema-typed Avro datum from `reader`.
pub fn decode_datum<R: Read>(schema: &Schema, reader: &mut R) -> Result<JsonValue, PipelineError> {
    let value = from_avro_datum(schema, reader, None)?;
    Ok(JsonValue::try_from(value)?)
}

/// Decode an Avro Object Container File, which embeds its own schema.
///
/// Returns every contained datum, in file order.
pub fn decode_container_file(payload: &[u8]) -> Result<Vec<JsonValue>, PipelineError> {
    let reader = Reader::new(payload)?;
    let mut datums = Vec::new();
    for value in reader {
        datums.push(JsonValue::try_from(value?)?);
    }
    Ok(datums)
}
