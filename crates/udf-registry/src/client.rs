//! Memoizing schema resolution.

use std::sync::Arc;

use apache_avro::Schema;
use tracing::debug;

use crate::cache::SchemaCache;
use crate::coords::SchemaCoords;
use crate::error::RegistryError;
use crate::transport::RegistryTransport;

/// Resolves schema identifiers to parsed Avro schemas.
///
/// The first resolution of an identifier derives coordinates, performs
/// one transport lookup, parses the definition, and caches the schema
/// under the *original* identifier for the life of the process. Later
/// resolutions of the same identifier never touch the transport.
///
/// Concurrent first resolutions of one identifier may each fetch; the
/// cache write is idempotent (all fetch the same backing definition),
/// so no single-flight coordination is needed. No retries here — retry
/// policy belongs to the caller.
pub struct SchemaRegistryClient {
    transport: Arc<dyn RegistryTransport>,
    cache: Arc<SchemaCache>,
}

impl SchemaRegistryClient {
    pub fn new(transport: Arc<dyn RegistryTransport>) -> Self {
        Self::with_cache(transport, Arc::new(SchemaCache::new()))
    }

    /// Construct with an explicit cache, so several clients (or several
    /// pipeline instances) can share one process-lifetime cache.
    pub fn with_cache(transport: Arc<dyn RegistryTransport>, cache: Arc<SchemaCache>) -> Self {
        Self { transport, cache }
    }

    /// Resolve a schema identifier to its parsed schema.
    pub fn resolve(&self, schema_id: &str) -> Result<Schema, RegistryError> {
        if let Some(schema) = self.cache.get(schema_id) {
            debug!(schema_id, "schema cache hit");
            return Ok(schema);
        }

        let coords = SchemaCoords::parse(schema_id)?;
        debug!(schema_id, path = %coords.lookup_path(), "schema cache miss, fetching");
        let body = self.transport.fetch(&coords).map_err(|e| match e {
            // Report the identifier the caller asked for, not the
            // derived coordinates.
            RegistryError::SchemaNotFound { .. } => RegistryError::SchemaNotFound {
                schema_id: schema_id.to_string(),
            },
            other => other,
        })?;

        let definition = extract_definition(&body)?;
        let schema = Schema::parse_str(&definition)
            .map_err(|e| RegistryError::SchemaParse(e.to_string()))?;

        self.cache.insert(schema_id, schema.clone());
        Ok(schema)
    }

    pub fn cache(&self) -> &SchemaCache {
        &self.cache
    }
}

/// Pull the schema text out of a registry response body.
///
/// Registries wrap the schema in a JSON document under `definition`
/// (Spring-style) or `SchemaDefinition` (Glue-style); a body without
/// either wrapper is taken to be the schema document itself.
fn extract_definition(body: &str) -> Result<String, RegistryError> {
    let parsed: serde_json::Value = serde_json::from_str(body)
        .map_err(|e| RegistryError::SchemaParse(format!("response body is not JSON: {e}")))?;

    let Some(object) = parsed.as_object() else {
        return Ok(body.to_string());
    };

    for field in ["definition", "SchemaDefinition"] {
        if let Some(definition) = object.get(field) {
            return match definition {
                serde_json::Value::String(text) => Ok(text.clone()),
                // Some registries inline the schema document instead of
                // escaping it into a string.
                other => Ok(other.to_string()),
            };
        }
    }

    Ok(body.to_string())
}
