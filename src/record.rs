// src/record.rs
//! The salt document and its JSON body
//!
//! Each document is keyed by its UTC date and stores
//! `{ "salt": .., "date": .., "createdAt": .. }` as the body.

use std::fmt;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::aliases::SaltValue;
use crate::error::{Result, SaltError};
use crate::salt::fingerprint;

#[derive(Clone)]
pub struct SaltRecord {
    pub id: String,
    pub salt: SaltValue,
    pub date: String,
    pub created_at: DateTime<Utc>,
}

/// Wire shape of the stored body
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SaltDocument {
    salt: String,
    date: String,
    created_at: String,
}

impl SaltRecord {
    pub fn new(date: impl Into<String>, salt: SaltValue, created_at: DateTime<Utc>) -> Self {
        let date = date.into();
        Self {
            id: date.clone(),
            salt,
            date,
            created_at,
        }
    }

    /// True when this record governs the given date key
    pub fn is_for(&self, date: &str) -> bool {
        self.date == date
    }

    /// `createdAt` as stored: RFC 3339, millisecond precision, `Z` suffix
    pub fn created_at_text(&self) -> String {
        self.created_at.to_rfc3339_opts(SecondsFormat::Millis, true)
    }

    pub fn to_document(&self) -> Result<String> {
        let doc = SaltDocument {
            salt: self.salt.expose_secret().clone(),
            date: self.date.clone(),
            created_at: self.created_at_text(),
        };
        Ok(serde_json::to_string(&doc)?)
    }

    pub fn from_document(id: impl Into<String>, body: &str) -> Result<Self> {
        let doc: SaltDocument = serde_json::from_str(body)?;
        let created_at = DateTime::parse_from_rfc3339(&doc.created_at)
            .map_err(|e| SaltError::InvalidDate(format!("createdAt {}: {e}", doc.created_at)))?
            .with_timezone(&Utc);
        Ok(Self {
            id: id.into(),
            salt: SaltValue::new(doc.salt),
            date: doc.date,
            created_at,
        })
    }
}

impl fmt::Debug for SaltRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SaltRecord")
            .field("id", &self.id)
            .field("salt", &format_args!("<fingerprint {}>", fingerprint(&self.salt)))
            .field("date", &self.date)
            .field("created_at", &self.created_at)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample() -> SaltRecord {
        let created = Utc.with_ymd_and_hms(2025, 3, 1, 0, 0, 3).unwrap();
        SaltRecord::new(
            "2025-03-01",
            SaltValue::new("4f1c2a8e-3b7d-4e59-a1c6-9d2e0f5b7a34".to_string()),
            created,
        )
    }

    #[test]
    fn document_uses_camel_case_and_millis() {
        let body = sample().to_document().unwrap();
        let value: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(value["date"], "2025-03-01");
        assert_eq!(value["createdAt"], "2025-03-01T00:00:03.000Z");
        assert_eq!(value["salt"], "4f1c2a8e-3b7d-4e59-a1c6-9d2e0f5b7a34");
        assert!(value.get("created_at").is_none());
    }

    #[test]
    fn document_decodes_back() {
        let record = sample();
        let body = record.to_document().unwrap();
        let decoded = SaltRecord::from_document("2025-03-01", &body).unwrap();
        assert_eq!(decoded.id, "2025-03-01");
        assert_eq!(decoded.created_at, record.created_at);
        assert_eq!(decoded.salt.expose_secret(), record.salt.expose_secret());
    }

    #[test]
    fn malformed_body_is_rejected() {
        assert!(matches!(
            SaltRecord::from_document("2025-03-01", "{\"salt\":1}"),
            Err(SaltError::Serialization(_))
        ));
        let bad_time = r#"{"salt":"x","date":"2025-03-01","createdAt":"yesterday"}"#;
        assert!(matches!(
            SaltRecord::from_document("2025-03-01", bad_time),
            Err(SaltError::InvalidDate(_))
        ));
    }

    #[test]
    fn debug_never_prints_salt() {
        let rendered = format!("{:?}", sample());
        assert!(!rendered.contains("4f1c2a8e-3b7d"));
        assert!(rendered.contains("fingerprint"));
    }
}
