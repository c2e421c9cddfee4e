// tests/common.rs
//! Shared test utilities: logging setup and throwaway salt stores

#![allow(dead_code)] // Not every test binary uses every helper

use chrono::{DateTime, TimeZone, Utc};
use daily_salt::consts::DB_KDF_ITERATIONS;
use daily_salt::store::SaltBatch;
use daily_salt::{DbKey, FixedClock, SaltRecord, SaltValue, SaltWriter, SqliteSaltStore};
use rusqlite::Connection;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

#[cfg(feature = "logging")]
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize test-friendly logging
/// Call once at the start of any test that needs logs
pub fn setup() {
    #[cfg(feature = "logging")]
    tracing_subscriber::registry()
        .with(fmt::layer().with_test_writer())
        .with(EnvFilter::from_default_env()) // respects RUST_LOG=
        .try_init()
        .ok(); // idempotent: safe to call multiple times

    #[cfg(not(feature = "logging"))]
    { /* no-op */ }
}

pub const TEST_KEY: &str = "test-salt-db-secret-2025";

pub fn test_key() -> DbKey {
    DbKey::new(TEST_KEY.to_string())
}

pub fn utc(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, h, min, s).unwrap()
}

pub fn clock_at(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> FixedClock {
    FixedClock(utc(y, m, d, h, min, s))
}

/// Encrypted store in its own temp directory, removed on drop
pub struct TestStore {
    pub store: SqliteSaltStore,
    dir: TempDir,
}

impl TestStore {
    pub fn new() -> Self {
        setup();
        let dir = tempfile::tempdir().expect("create temp dir");
        let store = SqliteSaltStore::open(dir.path().join("salts.db"), &test_key())
            .expect("open salt store");
        Self { store, dir }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn db_path(&self) -> PathBuf {
        self.dir.path().join("salts.db")
    }

    /// Second keyed connection to the same file, for fixtures the store API
    /// cannot express (corrupt bodies, failing triggers)
    pub fn raw_connection(&self) -> Connection {
        let conn = Connection::open(self.db_path()).expect("open raw connection");
        conn.execute_batch(&format!(
            r#"
            PRAGMA key = '{TEST_KEY}';
            PRAGMA cipher_page_size = 4096;
            PRAGMA kdf_iter = {DB_KDF_ITERATIONS};
            PRAGMA cipher_hmac_algorithm = HMAC_SHA512;
            PRAGMA cipher_kdf_algorithm = PBKDF2_HMAC_SHA512;
            PRAGMA cipher_plaintext_header_size = 0;
            "#
        ))
        .expect("key raw connection");
        conn
    }

    /// Write records through a batch, bypassing rotation
    pub fn seed(&mut self, dates: &[&str]) {
        let mut batch = SaltBatch::new();
        for date in dates {
            batch.upsert(SaltRecord::new(
                *date,
                SaltValue::new(format!("seed-{date}")),
                utc(2025, 1, 1, 0, 0, 0),
            ));
        }
        self.store.commit(batch).expect("seed salts");
    }
}

impl Default for TestStore {
    fn default() -> Self {
        Self::new()
    }
}
