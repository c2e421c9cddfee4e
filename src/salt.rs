// src/salt.rs
//! Salt generation and log-safe fingerprints

use rand::rngs::OsRng;
use rand::TryRngCore;
use uuid::Builder;

use crate::aliases::SaltValue;
use crate::consts::{FINGERPRINT_HEX_LEN, SALT_BYTES};
use crate::error::{Result, SaltError};

/// Draw a fresh salt from the OS CSPRNG, rendered as a UUID v4
pub fn generate_salt() -> Result<SaltValue> {
    let mut bytes = [0u8; SALT_BYTES];
    OsRng
        .try_fill_bytes(&mut bytes)
        .map_err(|e| SaltError::Generation(e.to_string()))?;
    let token = Builder::from_random_bytes(bytes).into_uuid().to_string();
    Ok(SaltValue::new(token))
}

/// Short BLAKE3 prefix identifying a salt without revealing it
pub fn fingerprint(salt: &SaltValue) -> String {
    let hash = blake3::hash(salt.expose_secret().as_bytes());
    hash.to_hex()[..FINGERPRINT_HEX_LEN].to_string()
}
