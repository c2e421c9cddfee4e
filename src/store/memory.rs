// src/store/memory.rs
//! In-process salt collection with deterministic failure injection

use std::collections::BTreeMap;

use super::{BatchOp, SaltBatch, SaltReader, SaltWriter};
use crate::error::{Result, SaltError};
use crate::record::SaltRecord;

/// Documents are kept as JSON bodies, same as on disk
#[derive(Debug, Clone, Default)]
pub struct MemorySaltStore {
    docs: BTreeMap<String, String>,
    fail_reads: bool,
    fail_commits: bool,
    commits: usize,
}

impl MemorySaltStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a record outside of any batch (fixtures)
    #[cfg(test)]
    pub(crate) fn seed(&mut self, record: &SaltRecord) -> Result<()> {
        self.docs.insert(record.id.clone(), record.to_document()?);
        Ok(())
    }

    /// Insert an arbitrary body, malformed ones included
    #[cfg(test)]
    pub(crate) fn seed_raw(&mut self, id: impl Into<String>, body: impl Into<String>) {
        self.docs.insert(id.into(), body.into());
    }

    pub fn fail_reads(&mut self, fail: bool) {
        self.fail_reads = fail;
    }

    pub fn fail_commits(&mut self, fail: bool) {
        self.fail_commits = fail;
    }

    /// Successful commits so far
    pub fn commit_count(&self) -> usize {
        self.commits
    }

    pub fn len(&self) -> usize {
        self.docs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }

    /// Raw stored body for `id`
    pub fn body(&self, id: &str) -> Option<&str> {
        self.docs.get(id).map(String::as_str)
    }

    fn check_reads(&self) -> Result<()> {
        if self.fail_reads {
            return Err(SaltError::Store("injected read failure".into()));
        }
        Ok(())
    }
}

impl SaltReader for MemorySaltStore {
    fn get(&self, id: &str) -> Result<Option<SaltRecord>> {
        self.check_reads()?;
        self.docs
            .get(id)
            .map(|body| SaltRecord::from_document(id, body))
            .transpose()
    }

    fn list_ids(&self) -> Result<Vec<String>> {
        self.check_reads()?;
        Ok(self.docs.keys().cloned().collect())
    }

    fn list(&self) -> Result<Vec<SaltRecord>> {
        self.check_reads()?;
        self.docs
            .iter()
            .map(|(id, body)| SaltRecord::from_document(id.as_str(), body))
            .collect()
    }
}

impl SaltWriter for MemorySaltStore {
    fn commit(&mut self, batch: SaltBatch) -> Result<()> {
        if self.fail_commits {
            return Err(SaltError::Store("injected commit failure".into()));
        }

        // Stage on a copy; swap only once every op succeeded
        let mut staged = self.docs.clone();
        for op in batch.ops() {
            match op {
                BatchOp::Delete(id) => {
                    staged.remove(id);
                }
                BatchOp::Upsert(record) => {
                    staged.insert(record.id.clone(), record.to_document()?);
                }
            }
        }
        self.docs = staged;
        self.commits += 1;
        Ok(())
    }
}
