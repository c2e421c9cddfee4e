// src/lookup.rs
//! Read side for salt consumers
//!
//! A missing record and a record for another date both mean "no valid salt
//! right now"; what to do then is the caller's decision.

use tracing::warn;

use crate::clock::{date_key, Clock};
use crate::enums::SaltStatus;
use crate::error::{Result, SaltError};
use crate::record::SaltRecord;
use crate::store::SaltReader;

/// Today's salt record, if one is present
pub fn current_salt<R, C>(reader: &R, clock: &C) -> Result<Option<SaltRecord>>
where
    R: SaltReader + ?Sized,
    C: Clock,
{
    let today = date_key(clock.now());
    Ok(reader.get(&today)?.filter(|record| record.is_for(&today)))
}

/// Whether the collection holds today's salt, an older one, or nothing
pub fn salt_status<R, C>(reader: &R, clock: &C) -> Result<SaltStatus>
where
    R: SaltReader + ?Sized,
    C: Clock,
{
    let current = match current_salt(reader, clock) {
        Ok(found) => found,
        Err(err @ (SaltError::Serialization(_) | SaltError::InvalidDate(_))) => {
            warn!(error = %err, "Today's salt is unreadable");
            None
        }
        Err(err) => return Err(err),
    };
    if current.is_some() {
        return Ok(SaltStatus::Current);
    }
    if reader.list_ids()?.is_empty() {
        Ok(SaltStatus::Missing)
    } else {
        Ok(SaltStatus::Stale)
    }
}
