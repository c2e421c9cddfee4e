// src/consts.rs
//! Shared constants: storage parameters and defaults

/// KDF iterations for the SQLCipher salt database
// ~0.1–0.2s on modern hardware
pub const DB_KDF_ITERATIONS: u32 = 256_000;

/// Collection (table) holding the salt documents
pub const SALT_TABLE: &str = "daily_salts";

/// Random bytes drawn per salt (rendered as a 36-char UUID v4)
pub const SALT_BYTES: usize = 16;

/// Hex characters of the BLAKE3 fingerprint shown in logs
pub const FINGERPRINT_HEX_LEN: usize = 16;

/// `chrono` format of the UTC calendar date key
pub const DATE_KEY_FORMAT: &str = "%Y-%m-%d";

/// Daily at 00:00 UTC
pub const DEFAULT_CRON: &str = "0 0 * * *";

/// Config file used when `DAILY_SALT_CONFIG` is not set
pub const DEFAULT_CONFIG_FILE: &str = "daily-salt.toml";
