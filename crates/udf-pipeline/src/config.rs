//! Deployment-time configuration.
//!
//! The pipeline mode, registry endpoint, and schema-id header key are
//! fixed per deployment through environment variables; none of them are
//! per-record decisions.

use std::sync::Arc;

use thiserror::Error;

use udf_registry::{HttpRegistryTransport, SchemaRegistryClient};

use crate::pipeline::{PipelineMode, RecordPipeline, SchemaSource};

pub const REGISTRY_URL_VAR: &str = "SCHEMA_REGISTRY_URL";
pub const SCHEMA_ID_HEADER_VAR: &str = "SCHEMA_ID_HEADER";
pub const PIPELINE_MODE_VAR: &str = "PIPELINE_MODE";

/// Header key producers use for the schema identifier unless configured
/// otherwise.
pub const DEFAULT_SCHEMA_ID_HEADER: &str = "contentType";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    MissingVar(&'static str),

    #[error("unknown pipeline mode {0:?} (expected file-embedded, single-schema, or aggregated)")]
    UnknownMode(String),
}

/// Which [`PipelineMode`] a deployment runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfiguredMode {
    FileEmbedded,
    SingleSchema,
    Aggregated,
}

#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub registry_url: String,
    pub schema_id_header: String,
    pub mode: ConfiguredMode,
}

impl PipelineConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Build from any variable-lookup function. Tests pass a map; the
    /// process entry point passes `std::env::var`.
    pub fn from_lookup(
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let registry_url =
            lookup(REGISTRY_URL_VAR).ok_or(ConfigError::MissingVar(REGISTRY_URL_VAR))?;
        let schema_id_header = lookup(SCHEMA_ID_HEADER_VAR)
            .unwrap_or_else(|| DEFAULT_SCHEMA_ID_HEADER.to_string());
        let mode = match lookup(PIPELINE_MODE_VAR).as_deref() {
            None | Some("aggregated") => ConfiguredMode::Aggregated,
            Some("file-embedded") => ConfiguredMode::FileEmbedded,
            Some("single-schema") => ConfiguredMode::SingleSchema,
            Some(other) => return Err(ConfigError::UnknownMode(other.to_string())),
        };

        Ok(Self {
            registry_url,
            schema_id_header,
            mode,
        })
    }

    /// Construct the pipeline this configuration describes, backed by
    /// the HTTP registry transport.
    ///
    /// The registry client is constructed for every mode; file-embedded
    /// deployments simply never call it.
    pub fn build_pipeline(&self) -> RecordPipeline {
        let transport = Arc::new(HttpRegistryTransport::new(self.registry_url.clone()));
        let registry = Arc::new(SchemaRegistryClient::new(transport));
        let mode = match self.mode {
            ConfiguredMode::FileEmbedded => PipelineMode::FileEmbedded,
            ConfiguredMode::SingleSchema => PipelineMode::SingleSchema(SchemaSource::RoutingKey),
            ConfiguredMode::Aggregated => PipelineMode::AggregatedMultiplexed {
                schema_id_header: self.schema_id_header.clone(),
            },
        };
        RecordPipeline::new(registry, mode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_in<'a>(vars: &'a HashMap<&'a str, &'a str>) -> impl Fn(&str) -> Option<String> + 'a {
        move |var| vars.get(var).map(|v| v.to_string())
    }

    #[test]
    fn defaults_to_aggregated_content_type() {
        let vars = HashMap::from([(REGISTRY_URL_VAR, "http://registry.internal:8990")]);
        let config = PipelineConfig::from_lookup(lookup_in(&vars)).unwrap();
        assert_eq!(config.mode, ConfiguredMode::Aggregated);
        assert_eq!(config.schema_id_header, "contentType");
        assert_eq!(config.registry_url, "http://registry.internal:8990");
    }

    #[test]
    fn reads_explicit_mode_and_header() {
        let vars = HashMap::from([
            (REGISTRY_URL_VAR, "http://registry.internal:8990"),
            (SCHEMA_ID_HEADER_VAR, "schema_id"),
            (PIPELINE_MODE_VAR, "single-schema"),
        ]);
        let config = PipelineConfig::from_lookup(lookup_in(&vars)).unwrap();
        assert_eq!(config.mode, ConfiguredMode::SingleSchema);
        assert_eq!(config.schema_id_header, "schema_id");
    }

    #[test]
    fn file_embedded_mode() {
        let vars = HashMap::from([
            (REGISTRY_URL_VAR, "http://registry.internal:8990"),
            (PIPELINE_MODE_VAR, "file-embedded"),
        ]);
        let config = PipelineConfig::from_lookup(lookup_in(&vars)).unwrap();
        assert_eq!(config.mode, ConfiguredMode::FileEmbedded);
    }

    #[test]
    fn missing_registry_url_is_an_error() {
        let err = PipelineConfig::from_lookup(|_| None).unwrap_err();
        assert!(matches!(err, ConfigError::MissingVar(REGISTRY_URL_VAR)));
    }

    #[test]
    fn unknown_mode_is_an_error() {
        let vars = HashMap::from([
            (REGISTRY_URL_VAR, "http://registry.internal:8990"),
            (PIPELINE_MODE_VAR, "auto-detect"),
        ]);
        let err = PipelineConfig::from_lookup(lookup_in(&vars)).unwrap_err();
        assert!(matches!(err, ConfigError::UnknownMode(_)));
    }

    #[test]
    fn builds_a_pipeline_for_each_mode() {
        for mode in ["aggregated", "single-schema", "file-embedded"] {
            let vars = HashMap::from([
                (REGISTRY_URL_VAR, "http://registry.internal:8990"),
                (PIPELINE_MODE_VAR, mode),
            ]);
            let config = PipelineConfig::from_lookup(lookup_in(&vars)).unwrap();
            let _pipeline = config.build_pipeline();
        }
    }
}
