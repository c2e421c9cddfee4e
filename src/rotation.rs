// src/rotation.rs
//! Daily salt rotation
//!
//! One run reads every key in the salt collection, draws a fresh salt, and
//! commits a single batch that deletes everything read and upserts the record
//! for today's UTC date. If any step fails nothing is written, so the previous
//! salt stays in place until a later run succeeds.
//!
//! [`manage_daily_salts`] is the scheduler-facing entry point: it never
//! panics or returns an error, only a [`RotationOutcome`].

use std::panic::{catch_unwind, AssertUnwindSafe};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};

use crate::clock::{date_key, Clock, SystemClock};
use crate::config::Config;
use crate::enums::RotationPolicy;
use crate::error::{Result, SaltError};
use crate::aliases::SaltValue;
use crate::record::SaltRecord;
use crate::salt::{fingerprint, generate_salt};
use crate::store::{with_client, SaltBatch, SaltWriter};

/// Structured result reported to the host: `{"success":bool,"error"?:string}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RotationOutcome {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl RotationOutcome {
    pub fn succeeded() -> Self {
        Self {
            success: true,
            error: None,
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(message.into()),
        }
    }
}

/// What a successful run did
#[derive(Debug, Clone, Serialize)]
pub struct RotationReport {
    pub date: String,
    pub deleted: Vec<String>,
    pub fingerprint: String,
    pub created_at: DateTime<Utc>,
    /// Today's existing salt was kept (`KeepToday` only)
    pub kept_existing: bool,
}

/// Where fresh salts come from; [`generate_salt`] unless overridden
pub type SaltSource = fn() -> Result<SaltValue>;

pub struct SaltRotator<W, C> {
    writer: W,
    clock: C,
    policy: RotationPolicy,
    salt_source: SaltSource,
}

impl<W: SaltWriter, C: Clock> SaltRotator<W, C> {
    pub fn new(writer: W, clock: C) -> Self {
        Self {
            writer,
            clock,
            policy: RotationPolicy::default(),
            salt_source: generate_salt,
        }
    }

    pub fn with_policy(mut self, policy: RotationPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_salt_source(mut self, source: SaltSource) -> Self {
        self.salt_source = source;
        self
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    pub fn rotate(&mut self) -> Result<RotationReport> {
        let now = self.clock.now();
        let today = date_key(now);
        let existing = self.writer.list_ids()?;
        debug!(date = %today, existing = ?existing, "Salt collection scanned");

        if self.policy == RotationPolicy::KeepToday && existing.contains(&today) {
            match self.current_for(&today)? {
                Some(current) if current.is_for(&today) => {
                    return self.prune_others(existing, current);
                }
                Some(current) => {
                    warn!(
                        date = %today,
                        body_date = %current.date,
                        "Today's salt carries another date, regenerating"
                    );
                }
                None => {}
            }
        }

        let salt = (self.salt_source)()?;
        let fp = fingerprint(&salt);
        let record = SaltRecord::new(today.clone(), salt, now);

        let mut batch = SaltBatch::new();
        for id in &existing {
            batch.delete(id.as_str());
        }
        batch.upsert(record);
        self.writer.commit(batch)?;

        info!(
            date = %today,
            deleted = existing.len(),
            fingerprint = %fp,
            "Daily salt rotated"
        );
        Ok(RotationReport {
            date: today,
            deleted: existing,
            fingerprint: fp,
            created_at: now,
            kept_existing: false,
        })
    }

    /// Today's record, or `None` if it is unreadable and must be replaced
    fn current_for(&self, today: &str) -> Result<Option<SaltRecord>> {
        match self.writer.get(today) {
            Ok(found) => Ok(found),
            Err(err @ (SaltError::Serialization(_) | SaltError::InvalidDate(_))) => {
                warn!(date = %today, error = %err, "Today's salt is malformed, regenerating");
                Ok(None)
            }
            Err(err) => Err(err),
        }
    }

    /// Rotate once and fold every failure, panics included, into the outcome
    pub fn outcome(&mut self) -> RotationOutcome {
        match catch_unwind(AssertUnwindSafe(|| self.rotate())) {
            Ok(Ok(_)) => RotationOutcome::succeeded(),
            Ok(Err(err)) => {
                error!(error = %err, "Daily salt rotation failed");
                RotationOutcome::failed(err.to_string())
            }
            Err(_) => {
                error!("Daily salt rotation panicked");
                RotationOutcome::failed("rotation panicked")
            }
        }
    }

    fn prune_others(
        &mut self,
        existing: Vec<String>,
        current: SaltRecord,
    ) -> Result<RotationReport> {
        let stale: Vec<String> = existing.into_iter().filter(|id| *id != current.id).collect();
        if !stale.is_empty() {
            let mut batch = SaltBatch::new();
            for id in &stale {
                batch.delete(id.as_str());
            }
            self.writer.commit(batch)?;
        }

        let fp = fingerprint(&current.salt);
        info!(
            date = %current.date,
            deleted = stale.len(),
            fingerprint = %fp,
            "Today's salt already present, kept"
        );
        Ok(RotationReport {
            date: current.date,
            deleted: stale,
            fingerprint: fp,
            created_at: current.created_at,
            kept_existing: true,
        })
    }
}

/// Rotate once and fold every failure into the outcome
pub fn manage_daily_salts<W: SaltWriter, C: Clock>(
    writer: W,
    clock: C,
    policy: RotationPolicy,
) -> RotationOutcome {
    SaltRotator::new(writer, clock)
        .with_policy(policy)
        .outcome()
}

/// Scheduled entry point against the process-wide store
pub fn run_scheduled(config: &Config) -> RotationOutcome {
    with_client(config, |store| {
        manage_daily_salts(store, SystemClock, config.rotation.policy)
    })
    .unwrap_or_else(|err| {
        error!(error = %err, "Salt store unavailable");
        RotationOutcome::failed(err.to_string())
    })
}
