// src/config/mod.rs
//! Configuration system for daily-salt
//!
//! Central, lazy-loaded global config with TOML + env overrides.

pub use app::{load, Config, Features, Keys, Paths, Rotation, Schedule};

mod app;
mod defaults;
