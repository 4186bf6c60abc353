//! Batch decode pipeline for warehouse UDF invocations.
//!
//! Flow: UDF event → hex decode → [deaggregate → parse headers →
//! resolve schema] → Avro decode → JSON results envelope. The bracketed
//! stages depend on the pipeline mode fixed at construction; see
//! [`pipeline::PipelineMode`].

pub mod batch;
pub mod config;
pub mod datum;
pub mod error;
pub mod pipeline;

pub use batch::{run_batch, BatchResult, UdfEvent};
pub use config::{ConfigError, ConfiguredMode, PipelineConfig};
pub use datum::{decode_container_file, decode_datum};
pub use error::PipelineError;
pub use pipeline::{PipelineMode, RecordPipeline, SchemaSource};
