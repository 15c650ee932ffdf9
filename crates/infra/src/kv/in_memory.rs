use std::collections::BTreeMap;
use std::sync::RwLock;

use serde_json::Value as JsonValue;

use super::store::{KeyValueStore, KvError};

/// In-memory key-value store.
///
/// Backed by an ordered map so prefix scans come back in key order.
/// Intended for tests/dev and single-process deployments; not optimized
/// for large keyspaces.
#[derive(Debug, Default)]
pub struct InMemoryKvStore {
    entries: RwLock<BTreeMap<String, JsonValue>>,
}

impl InMemoryKvStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Upper bound of the key range covered by `prefix`.
    ///
    /// Bumps the last byte so `range(prefix..end)` captures exactly the keys
    /// that start with the prefix. Prefixes here are ASCII (`"pedido:"`), so
    /// the byte bump is always a valid boundary.
    fn prefix_end(prefix: &str) -> Option<String> {
        let mut bytes = prefix.as_bytes().to_vec();
        while let Some(last) = bytes.last_mut() {
            if *last < u8::MAX {
                *last += 1;
                return Some(String::from_utf8(bytes).ok()?);
            }
            bytes.pop();
        }
        None
    }
}

impl KeyValueStore for InMemoryKvStore {
    fn get(&self, key: &str) -> Result<Option<JsonValue>, KvError> {
        let entries = self
            .entries
            .read()
            .map_err(|_| KvError::Storage("lock poisoned".to_string()))?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: JsonValue) -> Result<(), KvError> {
        let mut entries = self
            .entries
            .write()
            .map_err(|_| KvError::Storage("lock poisoned".to_string()))?;
        entries.insert(key.to_string(), value);
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<(), KvError> {
        let mut entries = self
            .entries
            .write()
            .map_err(|_| KvError::Storage("lock poisoned".to_string()))?;
        entries.remove(key);
        Ok(())
    }

    fn get_by_prefix(&self, prefix: &str) -> Result<Vec<JsonValue>, KvError> {
        let entries = self
            .entries
            .read()
            .map_err(|_| KvError::Storage("lock poisoned".to_string()))?;

        let values = match Self::prefix_end(prefix) {
            Some(end) => entries
                .range(prefix.to_string()..end)
                .map(|(_, v)| v.clone())
                .collect(),
            None => entries
                .range(prefix.to_string()..)
                .map(|(_, v)| v.clone())
                .collect(),
        };

        Ok(values)
    }
}
