// src/store/mod.rs
//! Salt collection access, split by capability
//!
//! Consumers only ever receive a [`SaltReader`]. [`SaltWriter`] is handed to
//! the rotation job and nothing else; the underlying store has no such notion,
//! so the split lives here at the type level.

pub mod client;
pub mod memory;
pub mod sqlite;

pub use client::{client, with_client};
pub use memory::MemorySaltStore;
pub use sqlite::{SqliteSaltReader, SqliteSaltStore};

use crate::error::Result;
use crate::record::SaltRecord;

/// Read capability
pub trait SaltReader {
    fn get(&self, id: &str) -> Result<Option<SaltRecord>>;

    /// Every document key, ascending
    fn list_ids(&self) -> Result<Vec<String>>;

    /// Full scan, ascending by key
    fn list(&self) -> Result<Vec<SaltRecord>>;
}

/// Write capability: one atomic batch at a time
pub trait SaltWriter: SaltReader {
    /// Apply every op in `batch` or none of them
    fn commit(&mut self, batch: SaltBatch) -> Result<()>;
}

#[derive(Debug)]
pub enum BatchOp {
    Delete(String),
    Upsert(SaltRecord),
}

/// Ordered set of mutations committed as one unit
#[derive(Debug, Default)]
pub struct SaltBatch {
    ops: Vec<BatchOp>,
}

impl SaltBatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn delete(&mut self, id: impl Into<String>) -> &mut Self {
        self.ops.push(BatchOp::Delete(id.into()));
        self
    }

    pub fn upsert(&mut self, record: SaltRecord) -> &mut Self {
        self.ops.push(BatchOp::Upsert(record));
        self
    }

    pub fn ops(&self) -> &[BatchOp] {
        &self.ops
    }

    pub fn len(&self) -> usize {
        self.ops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }
}

impl<R: SaltReader + ?Sized> SaltReader for &R {
    fn get(&self, id: &str) -> Result<Option<SaltRecord>> {
        (**self).get(id)
    }

    fn list_ids(&self) -> Result<Vec<String>> {
        (**self).list_ids()
    }

    fn list(&self) -> Result<Vec<SaltRecord>> {
        (**self).list()
    }
}

impl<R: SaltReader + ?Sized> SaltReader for &mut R {
    fn get(&self, id: &str) -> Result<Option<SaltRecord>> {
        (**self).get(id)
    }

    fn list_ids(&self) -> Result<Vec<String>> {
        (**self).list_ids()
    }

    fn list(&self) -> Result<Vec<SaltRecord>> {
        (**self).list()
    }
}

impl<W: SaltWriter + ?Sized> SaltWriter for &mut W {
    fn commit(&mut self, batch: SaltBatch) -> Result<()> {
        (**self).commit(batch)
    }
}
