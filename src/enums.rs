// src/enums.rs
//! Public enum types used throughout the crate

use serde::{Deserialize, Serialize};

/// What a rotation does when today's salt already exists
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
#[non_exhaustive]
pub enum RotationPolicy {
    /// Replace every record, today's included, with a fresh salt
    #[default]
    Regenerate,
    /// Keep an existing record for today; only other dates are removed
    KeepToday,
}

/// Freshness of the salt a reader found
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SaltStatus {
    Current,
    Stale,
    Missing,
}
