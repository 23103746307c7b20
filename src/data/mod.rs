//! Data module - dataset loading, schema projection and the shared store

pub mod ingest;
pub mod loader;
pub mod schema;
pub mod store;
pub mod views;

pub use loader::DataSourceError;
pub use store::{DataStore, StoreError};
pub use views::{KpiRecord, KpiValue, QuestionRecord, SchemaError, Snapshot};
