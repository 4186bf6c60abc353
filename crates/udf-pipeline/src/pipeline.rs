//! The per-record decode pipeline.
//!
//! A pipeline is built for exactly one input shape; the mode is a
//! deployment choice, not a per-record runtime decision, and no format
//! auto-detection happens across modes.

use std::sync::Arc;

use apache_avro::Schema;
use bytes::Bytes;
use serde_json::Value as JsonValue;
use tracing::debug;

use udf_framing::{deaggregate, parse_headers, ByteCursor};
use udf_registry::SchemaRegistryClient;

use crate::datum::{decode_container_file, decode_datum};
use crate::error::PipelineError;

/// Where the single-schema mode finds its schema.
pub enum SchemaSource {
    /// Schema fixed at deployment time.
    Fixed(Schema),
    /// Schema resolved through the registry from the record's routing
    /// key (e.g. a stream name).
    RoutingKey,
}

/// The three fixed decode strategies.
pub enum PipelineMode {
    /// The whole payload is a self-describing container file embedding
    /// its own schema; no registry lookup.
    FileEmbedded,
    /// The whole payload is one datum against a single schema.
    SingleSchema(SchemaSource),
    /// The payload is an aggregation envelope of header-framed
    /// sub-records, each carrying its schema identifier in the
    /// configured header.
    AggregatedMultiplexed {
        /// Header key holding the schema identifier. Producer
        /// conventions differ (`contentType` vs `schema_id`), so the
        /// key is configuration, never guessed.
        schema_id_header: String,
    },
}

/// Decodes one raw record payload into zero or more JSON values.
pub struct RecordPipeline {
    registry: Arc<SchemaRegistryClient>,
    mode: PipelineMode,
}

impl RecordPipeline {
    pub fn new(registry: Arc<SchemaRegistryClient>, mode: PipelineMode) -> Self {
        Self { registry, mode }
    }

    /// Decode one raw record.
    ///
    /// `routing_key` is the optional producer-supplied key accompanying
    /// the record; only `SingleSchema(RoutingKey)` pipelines consult it.
    /// An aggregation envelope may expand to any number of values,
    /// including zero.
    pub fn process(
        &self,
        payload: Bytes,
        routing_key: Option<&str>,
    ) -> Result<Vec<JsonValue>, PipelineError> {
        match &self.mode {
            PipelineMode::FileEmbedded => decode_container_file(&payload),
            PipelineMode::SingleSchema(source) => {
                let resolved;
                let schema = match source {
                    SchemaSource::Fixed(schema) => schema,
                    SchemaSource::RoutingKey => {
                        let key = routing_key.ok_or(PipelineError::MissingRoutingKey)?;
                        resolved = self.registry.resolve(key)?;
                        &resolved
                    }
                };
                let datum = decode_datum(schema, &mut payload.as_ref())?;
                Ok(vec![datum])
            }
            PipelineMode::AggregatedMultiplexed { schema_id_header } => {
                let sub_payloads = deaggregate(payload)?;
                debug!(sub_records = sub_payloads.len(), "deaggregated envelope");
                let mut datums = Vec::with_capacity(sub_payloads.len());
                for sub in &sub_payloads {
                    datums.push(self.decode_sub_record(sub, schema_id_header)?);
                }
                Ok(datums)
            }
        }
    }

    /// Header-framed sub-record: parse headers, resolve the schema the
    /// headers name, decode the remaining body.
    fn decode_sub_record(
        &self,
        sub: &[u8],
        schema_id_header: &str,
    ) -> Result<JsonValue, PipelineError> {
        let mut cursor = ByteCursor::new(sub);
        let headers = parse_headers(&mut cursor)?;
        let schema_id = headers
            .get(schema_id_header)
            .ok_or_else(|| PipelineError::MissingSchemaHeader {
                header: schema_id_header.to_string(),
            })?
            .as_str()
            .ok_or_else(|| PipelineError::SchemaHeaderNotText {
                header: schema_id_header.to_string(),
            })?;
        let schema = self.registry.resolve(schema_id)?;
        decode_datum(&schema, &mut cursor.rest())
    }
}
