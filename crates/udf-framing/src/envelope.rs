//! Aggregation envelope decode.
//!
//! The producer-side batching client (KPL) multiplexes many records into
//! one wire payload: a protobuf `AggregatedRecord` message with a
//! repeated sub-record field. The message shape is a fixed, versioned
//! external format; it is declared here directly rather than generated.

use bytes::Bytes;
use prost::Message;

use crate::error::FramingError;

/// The aggregation envelope: string tables plus the multiplexed records.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct AggregatedRecord {
    #[prost(string, repeated, tag = "1")]
    pub partition_key_table: Vec<String>,
    #[prost(string, repeated, tag = "2")]
    pub explicit_hash_key_table: Vec<String>,
    #[prost(message, repeated, tag = "3")]
    pub records: Vec<SubRecord>,
}

/// One multiplexed record inside an [`AggregatedRecord`].
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct SubRecord {
    #[prost(uint64, tag = "1")]
    pub partition_key_index: u64,
    #[prost(uint64, optional, tag = "2")]
    pub explicit_hash_key_index: Option<u64>,
    /// The record payload. Decoded as a view into the envelope buffer,
    /// not a copy.
    #[prost(bytes = "bytes", tag = "3")]
    pub data: Bytes,
    #[prost(message, repeated, tag = "4")]
    pub tags: Vec<Tag>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Tag {
    #[prost(string, tag = "1")]
    pub key: String,
    #[prost(string, optional, tag = "2")]
    pub value: Option<String>,
}

/// Unpack an aggregation envelope into its sub-record payloads, in order.
///
/// The returned `Bytes` share the envelope's backing buffer. A payload
/// that is not a valid envelope is an `EnvelopeDecode` error — never
/// silently treated as "not aggregated"; callers choose the pipeline
/// mode up front.
pub fn deaggregate(payload: Bytes) -> Result<Vec<Bytes>, FramingError> {
    let envelope = AggregatedRecord::decode(payload)
        .map_err(|e| FramingError::EnvelopeDecode(e.to_string()))?;
    Ok(envelope.records.into_iter().map(|r| r.data).collect())
}
