use thiserror::Error;
use udf_framing::FramingError;
use udf_registry::RegistryError;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Framing(#[from] FramingError),

    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error("avro datum decode failed: {0}")]
    DatumDecode(#[from] apache_avro::Error),

    #[error("sub-record is missing the {header:?} schema header")]
    MissingSchemaHeader { header: String },

    #[error("schema header {header:?} is not a JSON string")]
    SchemaHeaderNotText { header: String },

    #[error("record has no routing key, but this pipeline resolves schemas by routing key")]
    MissingRoutingKey,

    #[error("invalid hex payload: {0}")]
    InvalidHex(#[from] hex::FromHexError),

    #[error("argument {index} has no payload")]
    MissingPayload { index: usize },
}
