use thiserror::Error;

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("schema {schema_id:?} not found in registry")]
    SchemaNotFound { schema_id: String },

    #[error("invalid schema id {id:?}: {reason}")]
    InvalidSchemaId { id: String, reason: &'static str },

    #[error("schema definition parse failed: {0}")]
    SchemaParse(String),

    #[error("schema registry unavailable: {0}")]
    Unavailable(String),
}
