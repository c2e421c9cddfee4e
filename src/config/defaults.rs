// src/config/defaults.rs
use std::path::PathBuf;

use crate::config::app::{Features, Keys, Paths, Rotation, Schedule};
use crate::consts::DEFAULT_CRON;
use crate::enums::RotationPolicy;

pub const DEFAULT_DB_KEY: &str = "dev-salt-db-password-2025";

pub fn default_db_path() -> PathBuf {
    dirs::data_local_dir()
        .map(|dir| dir.join("daily-salt").join("salts.db"))
        .unwrap_or_else(|| PathBuf::from("data/salts.db"))
}

pub fn default_keys() -> Keys {
    Keys {
        db_key: DEFAULT_DB_KEY.into(),
    }
}

pub fn default_paths() -> Paths {
    Paths {
        salt_db: default_db_path(),
    }
}

pub fn default_schedule() -> Schedule {
    Schedule {
        cron: DEFAULT_CRON.into(),
    }
}

pub fn default_rotation() -> Rotation {
    Rotation {
        policy: RotationPolicy::default(),
    }
}

pub fn default_features() -> Features {
    Features { use_dev_keys: true }
}
