// src/store/sqlite.rs
//! SQLCipher-backed salt collection
//!
//! Documents live in one table as `(id, body)` pairs, `body` being the JSON
//! document. A batch commits inside a single transaction; dropping the
//! transaction on any error rolls the whole batch back.

use std::fs;
use std::path::Path;

use rusqlite::{params, Connection, OpenFlags, OptionalExtension};
use tracing::debug;

use super::{BatchOp, SaltBatch, SaltReader, SaltWriter};
use crate::aliases::DbKey;
use crate::config::Config;
use crate::consts::{DB_KDF_ITERATIONS, SALT_TABLE};
use crate::error::Result;
use crate::record::SaltRecord;

/// Writer handle; also readable
pub struct SqliteSaltStore {
    conn: Connection,
}

/// Read-only handle for salt consumers
pub struct SqliteSaltReader {
    conn: Connection,
}

fn apply_key(conn: &Connection, key: &DbKey) -> Result<()> {
    let escaped = key.expose_secret().replace('\'', "''");
    conn.execute_batch(&format!("PRAGMA key = '{escaped}';"))?;
    conn.execute_batch(&format!(
        r#"
        PRAGMA cipher_page_size = 4096;
        PRAGMA kdf_iter = {DB_KDF_ITERATIONS};
        PRAGMA cipher_hmac_algorithm = HMAC_SHA512;
        PRAGMA cipher_kdf_algorithm = PBKDF2_HMAC_SHA512;
        PRAGMA cipher_plaintext_header_size = 0;
        "#
    ))?;
    Ok(())
}

fn table_exists(conn: &Connection) -> Result<bool> {
    let count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?1",
        [SALT_TABLE],
        |row| row.get(0),
    )?;
    Ok(count > 0)
}

fn get_record(conn: &Connection, id: &str) -> Result<Option<SaltRecord>> {
    if !table_exists(conn)? {
        return Ok(None);
    }
    let body: Option<String> = conn
        .query_row(
            &format!("SELECT body FROM {SALT_TABLE} WHERE id = ?1"),
            [id],
            |row| row.get(0),
        )
        .optional()?;
    body.map(|body| SaltRecord::from_document(id, &body))
        .transpose()
}

fn list_ids(conn: &Connection) -> Result<Vec<String>> {
    if !table_exists(conn)? {
        return Ok(Vec::new());
    }
    let mut stmt = conn.prepare(&format!("SELECT id FROM {SALT_TABLE} ORDER BY id"))?;
    let ids = stmt
        .query_map([], |row| row.get(0))?
        .collect::<rusqlite::Result<Vec<String>>>()?;
    Ok(ids)
}

fn list_records(conn: &Connection) -> Result<Vec<SaltRecord>> {
    if !table_exists(conn)? {
        return Ok(Vec::new());
    }
    let mut stmt = conn.prepare(&format!("SELECT id, body FROM {SALT_TABLE} ORDER BY id"))?;
    let rows = stmt
        .query_map([], |row| Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?)))?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    rows.into_iter()
        .map(|(id, body)| SaltRecord::from_document(id, &body))
        .collect()
}

impl SqliteSaltStore {
    pub fn open(path: impl AsRef<Path>, key: &DbKey) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(path)?;
        apply_key(&conn, key)?;
        conn.execute_batch(&format!(
            r#"
            CREATE TABLE IF NOT EXISTS {SALT_TABLE} (
                id   TEXT PRIMARY KEY,
                body TEXT NOT NULL
            );
            "#
        ))?;

        debug!(path = %path.display(), "Opened salt store");
        Ok(Self { conn })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::open(config.db_path(), &config.db_key()?)
    }

    #[cfg(test)]
    pub(crate) fn connection(&self) -> &Connection {
        &self.conn
    }
}

impl SaltReader for SqliteSaltStore {
    fn get(&self, id: &str) -> Result<Option<SaltRecord>> {
        get_record(&self.conn, id)
    }

    fn list_ids(&self) -> Result<Vec<String>> {
        list_ids(&self.conn)
    }

    fn list(&self) -> Result<Vec<SaltRecord>> {
        list_records(&self.conn)
    }
}

impl SaltWriter for SqliteSaltStore {
    fn commit(&mut self, batch: SaltBatch) -> Result<()> {
        let tx = self.conn.transaction()?;
        for op in batch.ops() {
            match op {
                BatchOp::Delete(id) => {
                    tx.execute(&format!("DELETE FROM {SALT_TABLE} WHERE id = ?1"), [id])?;
                }
                BatchOp::Upsert(record) => {
                    tx.execute(
                        &format!(
                            "INSERT INTO {SALT_TABLE} (id, body) VALUES (?1, ?2)
                             ON CONFLICT(id) DO UPDATE SET body = excluded.body"
                        ),
                        params![record.id, record.to_document()?],
                    )?;
                }
            }
        }
        tx.commit()?;
        Ok(())
    }
}

impl SqliteSaltReader {
    pub fn open(path: impl AsRef<Path>, key: &DbKey) -> Result<Self> {
        let conn = Connection::open_with_flags(path.as_ref(), OpenFlags::SQLITE_OPEN_READ_ONLY)?;
        apply_key(&conn, key)?;
        Ok(Self { conn })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::open(config.db_path(), &config.db_key()?)
    }
}

impl SaltReader for SqliteSaltReader {
    fn get(&self, id: &str) -> Result<Option<SaltRecord>> {
        get_record(&self.conn, id)
    }

    fn list_ids(&self) -> Result<Vec<String>> {
        list_ids(&self.conn)
    }

    fn list(&self) -> Result<Vec<SaltRecord>> {
        list_records(&self.conn)
    }
}
