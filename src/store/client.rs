// src/store/client.rs
//! Process-wide salt store handle
//!
//! Opened on first use and kept for the life of the process.

use std::sync::{Mutex, OnceLock};

use tracing::info;

use super::sqlite::SqliteSaltStore;
use crate::config::Config;
use crate::error::{Result, SaltError};

static CLIENT: OnceLock<Mutex<SqliteSaltStore>> = OnceLock::new();

/// Shared writer handle, created if not already created
pub fn client(config: &Config) -> Result<&'static Mutex<SqliteSaltStore>> {
    if let Some(existing) = CLIENT.get() {
        return Ok(existing);
    }
    let store = SqliteSaltStore::from_config(config)?;
    info!(path = %config.db_path().display(), "Salt store client initialized");
    // A concurrent initializer may win; its handle is kept and ours dropped
    Ok(CLIENT.get_or_init(|| Mutex::new(store)))
}

/// Run `f` with exclusive access to the shared handle
pub fn with_client<T>(config: &Config, f: impl FnOnce(&mut SqliteSaltStore) -> T) -> Result<T> {
    let mut guard = client(config)?
        .lock()
        .map_err(|_| SaltError::Store("salt store lock poisoned".into()))?;
    Ok(f(&mut guard))
}

pub fn is_initialized() -> bool {
    CLIENT.get().is_some()
}
