// src/clock.rs
//! Time source and UTC date keys
//!
//! The date key is always derived from the UTC calendar day, never from the
//! host's local timezone.

use chrono::{DateTime, NaiveDate, Utc};

use crate::consts::DATE_KEY_FORMAT;
use crate::error::{Result, SaltError};

pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock pinned to one instant
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> DateTime<Utc> {
        (**self).now()
    }
}

/// `YYYY-MM-DD` of the UTC day containing `instant`
pub fn date_key(instant: DateTime<Utc>) -> String {
    instant.format(DATE_KEY_FORMAT).to_string()
}

/// Validate a `YYYY-MM-DD` key
pub fn parse_date_key(key: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(key, DATE_KEY_FORMAT)
        .map_err(|e| SaltError::InvalidDate(format!("{key}: {e}")))
}
