//! UDF invocation envelope and batch orchestration.
//!
//! The warehouse calls the function with a batch of hex-encoded
//! arguments and expects a single JSON envelope back. The batch is
//! all-or-nothing: the first record error aborts the remaining records
//! and becomes the batch's one reported failure. Per-record isolation
//! is deliberately not provided.

use bytes::Bytes;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::PipelineError;
use crate::pipeline::RecordPipeline;

/// One UDF invocation as received from the warehouse.
///
/// Each inner `arguments` row holds the hex-encoded record payload
/// first, optionally followed by a routing key (e.g. a stream name).
#[derive(Debug, Clone, Deserialize)]
pub struct UdfEvent {
    pub arguments: Vec<Vec<Option<String>>>,
    pub num_records: usize,
}

/// The envelope returned to the warehouse.
///
/// Serializes as `{"success": true, "num_records": N, "results": [..]}`
/// or `{"success": false, "error_msg": ".."}`. Each result is the JSON
/// text of the record's full decoded-value sequence — a JSON array,
/// since one record may expand to zero or more values.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum BatchResult {
    Success {
        success: bool,
        num_records: usize,
        results: Vec<String>,
    },
    Failure {
        success: bool,
        error_msg: String,
    },
}

impl BatchResult {
    pub fn is_success(&self) -> bool {
        matches!(self, BatchResult::Success { .. })
    }
}

/// Run every record of `event` through `pipeline`, in order.
pub fn run_batch(event: &UdfEvent, pipeline: &RecordPipeline) -> BatchResult {
    debug!(records = event.arguments.len(), "processing batch");
    match run_records(event, pipeline) {
        Ok(results) => BatchResult::Success {
            success: true,
            num_records: event.num_records,
            results,
        },
        Err(e) => BatchResult::Failure {
            success: false,
            error_msg: format!("Error processing record batch. Error: {e}"),
        },
    }
}

fn run_records(
    event: &UdfEvent,
    pipeline: &RecordPipeline,
) -> Result<Vec<String>, PipelineError> {
    let mut results = Vec::with_capacity(event.arguments.len());
    for (index, argument) in event.arguments.iter().enumerate() {
        let data_hex = argument
            .first()
            .and_then(Option::as_deref)
            .ok_or(PipelineError::MissingPayload { index })?;
        let routing_key = argument.get(1).and_then(Option::as_deref);

        let payload = Bytes::from(hex::decode(data_hex)?);
        let datums = pipeline.process(payload, routing_key)?;
        results.push(serde_json::to_string(&datums).expect("JSON values serialize"));
    }
    Ok(results)
}
