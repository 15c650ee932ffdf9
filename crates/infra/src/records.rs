//! Typed record access over a key prefix.

use std::marker::PhantomData;
use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::keys;
use crate::kv::{KeyValueStore, KvError};

/// Typed `get`/`put`/`list`/`delete` over one record type's prefix.
///
/// The store itself holds untyped JSON; this adapter owns the serde codec
/// for one record type so handlers never touch raw values. A value under
/// the prefix that fails to deserialize is a storage-level fault and
/// surfaces as [`KvError::Deserialize`] rather than being silently skipped.
pub struct RecordStore<T> {
    store: Arc<dyn KeyValueStore>,
    prefix: &'static str,
    _record: PhantomData<fn() -> T>,
}

impl<T> Clone for RecordStore<T> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            prefix: self.prefix,
            _record: PhantomData,
        }
    }
}

impl<T> RecordStore<T>
where
    T: Serialize + DeserializeOwned,
{
    pub fn new(store: Arc<dyn KeyValueStore>, prefix: &'static str) -> Self {
        Self {
            store,
            prefix,
            _record: PhantomData,
        }
    }

    pub fn prefix(&self) -> &'static str {
        self.prefix
    }

    fn key(&self, id: &str) -> String {
        keys::key_for(self.prefix, id)
    }

    /// Read one record by id.
    pub fn get(&self, id: &str) -> Result<Option<T>, KvError> {
        let Some(value) = self.store.get(&self.key(id))? else {
            return Ok(None);
        };
        let record = serde_json::from_value(value)
            .map_err(|e| KvError::Deserialize(format!("{}{id}: {e}", self.prefix)))?;
        Ok(Some(record))
    }

    /// Write one record under its id, replacing any previous version.
    pub fn put(&self, id: &str, record: &T) -> Result<(), KvError> {
        let value = serde_json::to_value(record)
            .map_err(|e| KvError::Serialize(format!("{}{id}: {e}", self.prefix)))?;
        self.store.set(&self.key(id), value)
    }

    /// All records under the prefix, in creation order (key order).
    pub fn list(&self) -> Result<Vec<T>, KvError> {
        let values = self.store.get_by_prefix(self.prefix)?;
        values
            .into_iter()
            .map(|v| {
                serde_json::from_value(v)
                    .map_err(|e| KvError::Deserialize(format!("{}: {e}", self.prefix)))
            })
            .collect()
    }

    /// Remove one record by id.
    pub fn delete(&self, id: &str) -> Result<(), KvError> {
        self.store.delete(&self.key(id))
    }
}
