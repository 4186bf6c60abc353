//! Schema registry client for the UDF decode pipeline.
//!
//! A schema identifier extracted from a record (or a routing key) is
//! parsed into registry coordinates, fetched over an injectable
//! transport, parsed as an Avro schema, and memoized for the life of
//! the process. HTTP is one transport implementation; tests supply
//! their own.

pub mod cache;
pub mod client;
pub mod coords;
pub mod error;
pub mod transport;

pub use cache::SchemaCache;
pub use client::SchemaRegistryClient;
pub use coords::{SchemaCoords, DEFAULT_FORMAT};
pub use error::RegistryError;
pub use transport::{HttpRegistryTransport, RegistryTransport};
