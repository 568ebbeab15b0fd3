//! Layered configuration for the router connection.
//!
//! Sources, lowest precedence first:
//!
//! 1. Built-in defaults (the router's factory settings)
//! 2. An optional config file given with `--config`
//! 3. Environment variables prefixed with `ROUTER_CHECK_`
//! 4. Command-line flags (applied by the binary)
//!
//! ```toml
//! [router]
//! host = "192.168.1.1"
//! username = "admin"
//! password = "1234"
//! timeout = "10s"
//! ```
//!
//! Nested keys use a double underscore in the environment, e.g.
//! `ROUTER_CHECK_ROUTER__PASSWORD=secret`.

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::Deserialize;

use crate::duration::deserialize_duration;

/// Prefix for environment overrides.
pub const ENV_PREFIX: &str = "ROUTER_CHECK";

/// Top-level settings.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub router: RouterSettings,
}

/// Where the router is and how to log in.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct RouterSettings {
    /// Router address, with or without scheme and port.
    pub host: String,
    pub username: String,
    pub password: String,
    pub login_path: String,
    pub status_path: String,
    pub login_form_id: String,
    pub username_field: String,
    pub password_field: String,
    /// Id of the element holding the status text.
    pub status_element_id: String,
    #[serde(deserialize_with = "deserialize_duration")]
    pub timeout: Duration,
}

impl Default for RouterSettings {
    fn default() -> Self {
        Self {
            host: "192.168.1.1".to_string(),
            username: "admin".to_string(),
            password: "1234".to_string(),
            login_path: "/login/login.html".to_string(),
            status_path: "/pages/systemMonitoring/xdslStatistics/xdslStatistics.html".to_string(),
            login_form_id: "login".to_string(),
            username_field: "AuthName".to_string(),
            password_field: "AuthPassword".to_string(),
            status_element_id: "VdslInfoDisplay".to_string(),
            timeout: Duration::from_secs(10),
        }
    }
}

impl Settings {
    /// Load settings from an optional file plus the environment.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(File::from(path));
        }

        let config = builder
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()
            .with_context(|| match path {
                Some(path) => format!("Failed to load config from {}", path.display()),
                None => "Failed to read config from environment".to_string(),
            })?;

        config.try_deserialize().context("Invalid configuration")
    }
}
