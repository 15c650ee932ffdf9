use serde_json::Value as JsonValue;
use std::sync::Arc;
use thiserror::Error;

/// Key-value store operation error.
///
/// These are **infrastructure errors** (storage, serialization) as opposed
/// to domain errors (validation, invariants).
#[derive(Debug, Error)]
pub enum KvError {
    #[error("storage failure: {0}")]
    Storage(String),

    #[error("record serialization failed: {0}")]
    Serialize(String),

    #[error("record deserialization failed: {0}")]
    Deserialize(String),
}

/// The persistence substrate: a flat key-value store over JSON values.
///
/// Records live under string-prefixed keys (one prefix per record type) and
/// are only ever accessed through three shapes of operation:
///
/// - point reads/writes/deletes by full key
/// - prefix scans returning every value under a namespace
///
/// There are no transactions and no watch/notify semantics; every handler
/// performs single get/set/scan calls. Implementations must return prefix
/// scans in ascending key order so that time-ordered ids yield records in
/// creation order.
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`, if any.
    fn get(&self, key: &str) -> Result<Option<JsonValue>, KvError>;

    /// Store `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: JsonValue) -> Result<(), KvError>;

    /// Remove the value stored under `key` (absent keys are a no-op).
    fn delete(&self, key: &str) -> Result<(), KvError>;

    /// All values whose key starts with `prefix`, in ascending key order.
    fn get_by_prefix(&self, prefix: &str) -> Result<Vec<JsonValue>, KvError>;
}

impl<S> KeyValueStore for Arc<S>
where
    S: KeyValueStore + ?Sized,
{
    fn get(&self, key: &str) -> Result<Option<JsonValue>, KvError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: JsonValue) -> Result<(), KvError> {
        (**self).set(key, value)
    }

    fn delete(&self, key: &str) -> Result<(), KvError> {
        (**self).delete(key)
    }

    fn get_by_prefix(&self, prefix: &str) -> Result<Vec<JsonValue>, KvError> {
        (**self).get_by_prefix(prefix)
    }
}
