//! `forno-infra` — persistence substrate.
//!
//! The back office stores every record as a JSON value under a
//! string-prefixed key (`pedido:<id>`, `produto:<id>`, ...). This crate
//! provides the key-value store abstraction, its in-memory implementation,
//! the key namespace, and a typed adapter that gives each record type a
//! `get`/`put`/`list`/`delete` surface over its prefix.

pub mod keys;
pub mod kv;
pub mod records;

pub use kv::{InMemoryKvStore, KeyValueStore, KvError};
pub use records::RecordStore;
