// src/aliases.rs
//! Re-exports secure-gate's secret wrappers
//!
//! Salt values and the database key never leave these types except through
//! an explicit `expose_secret()`.

pub use secure_gate::dynamic_alias;

dynamic_alias!(SaltValue, String); // Daily salt token (UUID v4 text)
dynamic_alias!(DbKey, String); // SQLCipher passphrase
