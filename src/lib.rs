// src/lib.rs
//! daily-salt: keeps exactly one salt, keyed by today's UTC date
//!
//! Features:
//! - Atomic delete-all + upsert-today rotation
//! - SQLCipher document store with reader/writer capability split
//! - Daily UTC schedule for the built-in daemon
//! - secure-gate wrappers so salts zeroize on drop

pub mod aliases;
pub mod clock;
pub mod config;
pub mod consts;
pub mod enums;
pub mod error;
pub mod lookup;
pub mod record;
pub mod rotation;
pub mod salt;
pub mod schedule;
pub mod store;

// Re-export everything users need at the crate root
pub use aliases::{DbKey, SaltValue};
pub use clock::{date_key, Clock, FixedClock, SystemClock};
pub use config::load as load_config;
pub use enums::{RotationPolicy, SaltStatus};
pub use error::{Result, SaltError};
pub use lookup::{current_salt, salt_status};
pub use record::SaltRecord;
pub use rotation::{
    manage_daily_salts, run_scheduled, RotationOutcome, RotationReport, SaltRotator, SaltSource,
};
pub use schedule::DailySchedule;
pub use store::{MemorySaltStore, SaltReader, SaltWriter, SqliteSaltReader, SqliteSaltStore};
