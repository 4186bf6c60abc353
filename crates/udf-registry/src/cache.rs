//! Process-lifetime schema cache.
//!
//! Keyed by the original schema identifier, never evicted: the key space
//! is bounded by distinct producers and schema versions, not by record
//! volume. Redundant concurrent inserts for the same key are tolerated —
//! all writers fetched the same backing definition, so last write wins
//! with an equivalent value.

use std::collections::HashMap;

use apache_avro::Schema;
use parking_lot::RwLock;

/// Shared schema-id → parsed-schema map.
#[derive(Debug, Default)]
pub struct SchemaCache {
    inner: RwLock<HashMap<String, Schema>>,
}

impl SchemaCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, schema_id: &str) -> Option<Schema> {
        self.inner.read().get(schema_id).cloned()
    }

    pub fn insert(&self, schema_id: &str, schema: Schema) {
        self.inner.write().insert(schema_id.to_string(), schema);
    }

    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn schema() -> Schema {
        Schema::parse_str(r#"{"type": "record", "name": "T", "fields": [{"name": "x", "type": "long"}]}"#)
            .unwrap()
    }

    #[test]
    fn miss_then_hit() {
        let cache = SchemaCache::new();
        assert!(cache.get("user.v1").is_none());
        cache.insert("user.v1", schema());
        assert!(cache.get("user.v1").is_some());
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn redundant_insert_is_idempotent() {
        let cache = SchemaCache::new();
        cache.insert("user.v1", schema());
        cache.insert("user.v1", schema());
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn keys_are_independent() {
        let cache = SchemaCache::new();
        cache.insert("user.v1", schema());
        assert!(cache.get("user.v2").is_none());
    }
}
