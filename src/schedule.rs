// src/schedule.rs
//! Daily firing schedule
//!
//! Only the daily cron shape `M H * * *` is accepted, evaluated in UTC.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use chrono::{DateTime, NaiveTime, Utc};

use crate::error::{Result, SaltError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DailySchedule {
    pub hour: u32,
    pub minute: u32,
    time: NaiveTime,
}

impl DailySchedule {
    pub fn new(hour: u32, minute: u32) -> Result<Self> {
        let time = NaiveTime::from_hms_opt(hour, minute, 0)
            .ok_or_else(|| SaltError::Schedule(format!("{hour:02}:{minute:02} out of range")))?;
        Ok(Self { hour, minute, time })
    }

    /// Next firing instant strictly after `now`
    pub fn next_after(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        let candidate = now.date_naive().and_time(self.time).and_utc();
        if candidate > now {
            candidate
        } else {
            candidate + chrono::Duration::days(1)
        }
    }

    pub fn until_next(&self, now: DateTime<Utc>) -> Duration {
        (self.next_after(now) - now).to_std().unwrap_or(Duration::ZERO)
    }
}

impl Default for DailySchedule {
    fn default() -> Self {
        Self {
            hour: 0,
            minute: 0,
            time: NaiveTime::MIN,
        }
    }
}

impl FromStr for DailySchedule {
    type Err = SaltError;

    fn from_str(expr: &str) -> Result<Self> {
        let fields: Vec<&str> = expr.split_whitespace().collect();
        let [minute, hour, dom, month, dow] = fields.as_slice() else {
            return Err(SaltError::Schedule(format!(
                "expected 5 cron fields, got {}: {expr:?}",
                fields.len()
            )));
        };
        if [dom, month, dow].iter().any(|f| **f != "*") {
            return Err(SaltError::Schedule(format!(
                "only daily expressions (M H * * *) are supported: {expr:?}"
            )));
        }
        let parse = |field: &str, name: &str| {
            field
                .parse::<u32>()
                .map_err(|_| SaltError::Schedule(format!("invalid {name} field {field:?}")))
        };
        Self::new(parse(*hour, "hour")?, parse(*minute, "minute")?)
    }
}

impl fmt::Display for DailySchedule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} * * *", self.minute, self.hour)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn default_expression_is_midnight_utc() {
        let schedule: DailySchedule = "0 0 * * *".parse().unwrap();
        assert_eq!(schedule, DailySchedule::default());
        assert_eq!(schedule.to_string(), "0 0 * * *");
    }

    #[test]
    fn next_after_rolls_to_following_day() {
        let schedule = DailySchedule::default();
        let now = Utc.with_ymd_and_hms(2025, 3, 1, 23, 59, 59).unwrap();
        assert_eq!(
            schedule.next_after(now),
            Utc.with_ymd_and_hms(2025, 3, 2, 0, 0, 0).unwrap()
        );
        assert_eq!(schedule.until_next(now), Duration::from_secs(1));
    }

    #[test]
    fn firing_instant_itself_schedules_next_day() {
        let schedule = DailySchedule::default();
        let now = Utc.with_ymd_and_hms(2025, 3, 2, 0, 0, 0).unwrap();
        assert_eq!(
            schedule.next_after(now),
            Utc.with_ymd_and_hms(2025, 3, 3, 0, 0, 0).unwrap()
        );
    }

    #[test]
    fn later_same_day_slot() {
        let schedule: DailySchedule = "30 6 * * *".parse().unwrap();
        let now = Utc.with_ymd_and_hms(2025, 12, 31, 6, 0, 0).unwrap();
        assert_eq!(
            schedule.next_after(now),
            Utc.with_ymd_and_hms(2025, 12, 31, 6, 30, 0).unwrap()
        );
    }

    #[test]
    fn rejects_non_daily_expressions() {
        assert!("0 0 1 * *".parse::<DailySchedule>().is_err());
        assert!("0 0 * *".parse::<DailySchedule>().is_err());
        assert!("0 24 * * *".parse::<DailySchedule>().is_err());
        assert!("*/5 0 * * *".parse::<DailySchedule>().is_err());
    }
}
