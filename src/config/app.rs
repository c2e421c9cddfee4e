// src/config/app.rs
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use std::{env, fmt, fs};

use serde::Deserialize;
use tracing::{info, warn};

use super::defaults::*;
use crate::aliases::DbKey;
use crate::consts::DEFAULT_CONFIG_FILE;
use crate::enums::RotationPolicy;
use crate::error::{Result, SaltError};
use crate::schedule::DailySchedule;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default = "default_paths")]
    pub paths: Paths,
    #[serde(default = "default_keys")]
    pub keys: Keys,
    #[serde(default = "default_schedule")]
    pub schedule: Schedule,
    #[serde(default = "default_rotation")]
    pub rotation: Rotation,
    #[serde(default = "default_features")]
    pub features: Features,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Paths {
    pub salt_db: PathBuf,
}

#[derive(Clone, Deserialize)]
pub struct Keys {
    pub db_key: String,
}

impl fmt::Debug for Keys {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Keys").field("db_key", &"<redacted>").finish()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Schedule {
    pub cron: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Rotation {
    #[serde(default)]
    pub policy: RotationPolicy,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Features {
    pub use_dev_keys: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            paths: default_paths(),
            keys: default_keys(),
            schedule: default_schedule(),
            rotation: default_rotation(),
            features: default_features(),
        }
    }
}

impl Config {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&content)
    }

    /// Database location; `DAILY_SALT_DB` wins over the file setting
    pub fn db_path(&self) -> PathBuf {
        env::var("DAILY_SALT_DB")
            .map(PathBuf::from)
            .unwrap_or_else(|_| self.paths.salt_db.clone())
    }

    /// SQLCipher key: the configured dev key, or `DAILY_SALT_DB_KEY` otherwise
    pub fn db_key(&self) -> Result<DbKey> {
        if self.features.use_dev_keys {
            warn!("Using development database key");
            return Ok(DbKey::new(self.keys.db_key.clone()));
        }
        env::var("DAILY_SALT_DB_KEY")
            .map(DbKey::new)
            .map_err(|_| SaltError::Config("DAILY_SALT_DB_KEY required".into()))
    }

    pub fn daily_schedule(&self) -> Result<DailySchedule> {
        self.schedule.cron.parse()
    }
}

static CONFIG: OnceLock<Config> = OnceLock::new();

/// Load config once per process; falls back to defaults if the file is missing
pub fn load() -> Result<&'static Config> {
    if let Some(conf) = CONFIG.get() {
        return Ok(conf);
    }
    let conf = read_config()?;
    Ok(CONFIG.get_or_init(|| conf))
}

fn read_config() -> Result<Config> {
    let config_path =
        env::var("DAILY_SALT_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_FILE.to_string());

    let mut conf = if Path::new(&config_path).exists() {
        info!(path = %config_path, "Loading config");
        Config::from_file(&config_path)?
    } else {
        warn!(path = %config_path, "Config file not found, using built-in defaults");
        Config::default()
    };

    // Test mode override
    if env::var("DAILY_SALT_TEST_MODE").is_ok() {
        conf.features.use_dev_keys = false;
    }

    Ok(conf)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_yields_defaults() {
        let conf = Config::from_toml_str("").unwrap();
        assert_eq!(conf.schedule.cron, "0 0 * * *");
        assert_eq!(conf.rotation.policy, RotationPolicy::Regenerate);
        assert!(conf.features.use_dev_keys);
    }

    #[test]
    fn sections_override_defaults() {
        let conf = Config::from_toml_str(
            r#"
            [paths]
            salt_db = "/var/lib/salts.db"

            [schedule]
            cron = "30 2 * * *"

            [rotation]
            policy = "keep-today"

            [features]
            use_dev_keys = false
            "#,
        )
        .unwrap();
        assert_eq!(conf.paths.salt_db, PathBuf::from("/var/lib/salts.db"));
        assert_eq!(conf.rotation.policy, RotationPolicy::KeepToday);
        let schedule = conf.daily_schedule().unwrap();
        assert_eq!((schedule.hour, schedule.minute), (2, 30));
        assert!(!conf.features.use_dev_keys);
    }

    #[test]
    fn unknown_policy_is_a_parse_error() {
        let err = Config::from_toml_str("[rotation]\npolicy = \"sometimes\"").unwrap_err();
        assert!(matches!(err, SaltError::ConfigParse(_)));
    }

    #[test]
    fn keys_are_redacted_in_debug() {
        let rendered = format!("{:?}", Config::default());
        assert!(!rendered.contains(DEFAULT_DB_KEY));
    }
}
