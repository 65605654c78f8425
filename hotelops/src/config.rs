//! Application configuration management.
//!
//! Configuration is loaded from a YAML file with environment variable overrides. The configuration
//! file path defaults to `config.yaml` but can be specified via `-f` flag or `HOTELOPS_CONFIG`
//! environment variable. A missing file is not an error: every field has a default, so an empty
//! configuration runs against the embedded fixtures.
//!
//! ## Loading Priority
//!
//! 1. **YAML config file** - Base configuration (default: `config.yaml`)
//! 2. **Environment variables** - Variables prefixed with `HOTELOPS_` override YAML values
//!
//! For nested config values, use double underscores in environment variables. For example,
//! `HOTELOPS_BACKEND__TYPE=remote` sets the `backend.type` field.
//!
//! ## Example
//!
//! ```yaml
//! completion_policy: clear_on_regression
//! report_days: 30
//! backend:
//!   type: remote
//!   url: https://records.example.com/api/
//!   api_key: secret
//!   request_timeout: 5s
//! ```
//!
//! ```bash
//! HOTELOPS_REPORT_DAYS=7
//! HOTELOPS_BACKEND__LATENCY__LIST=50ms
//! ```

use clap::Parser;
use figment::{
    Figment,
    providers::{Env, Format, Yaml},
};
use serde::{Deserialize, Serialize};
use std::{path::PathBuf, time::Duration};
use thiserror::Error;
use url::Url;

use crate::db::{
    handlers::{MemorySettings, RemoteSettings},
    latency::Latency,
    models::housekeeping::CompletionPolicy,
};
use crate::reports::MAX_REPORT_DAYS;

/// Global CLI args, shared by every subcommand
#[derive(Parser, Debug, Clone)]
pub struct Args {
    /// Path to configuration file
    #[arg(short = 'f', long, env = "HOTELOPS_CONFIG", default_value = "config.yaml", global = true)]
    pub config: String,

    /// Validate configuration and exit without touching the backing store.
    #[arg(long, global = true)]
    pub validate: bool,
}

#[derive(Debug, Error)]
#[error("Config validation: {0}")]
pub struct ConfigError(String);

/// Main application configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Where the three collections live
    pub backend: BackendConfig,
    /// How task updates treat `completedAt` when status changes
    pub completion_policy: CompletionPolicy,
    /// Length of the trailing window used by `report`
    pub report_days: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            backend: BackendConfig::default(),
            completion_policy: CompletionPolicy::default(),
            report_days: 7,
        }
    }
}

/// Backing store selection.
///
/// The remote record service is used when configured; otherwise the in-memory store seeded from
/// fixtures.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum BackendConfig {
    Memory {
        /// Directory holding `rooms.json`, `reservations.json` and `housekeeping.json`.
        /// The fixtures compiled into the binary are used when unset.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        fixtures_dir: Option<PathBuf>,
        /// Simulated per-operation latency
        #[serde(default)]
        latency: Latency,
    },
    Remote {
        /// Base URL of the record service
        url: Url,
        /// Bearer token sent with every request
        #[serde(default, skip_serializing_if = "Option::is_none")]
        api_key: Option<String>,
        #[serde(default = "default_request_timeout", with = "humantime_serde")]
        request_timeout: Duration,
    },
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self::Memory {
            fixtures_dir: None,
            latency: Latency::default(),
        }
    }
}

fn default_request_timeout() -> Duration {
    RemoteSettings::DEFAULT_REQUEST_TIMEOUT
}

impl Config {
    #[allow(clippy::result_large_err)]
    pub fn load(args: &Args) -> Result<Self, figment::Error> {
        let config: Self = Self::figment(args).extract()?;
        config.validate().map_err(|e| figment::Error::from(e.to_string()))?;
        Ok(config)
    }

    /// Validate the configuration for consistency
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.report_days == 0 || self.report_days > MAX_REPORT_DAYS {
            return Err(ConfigError(format!(
                "report_days must be between 1 and {MAX_REPORT_DAYS}, got {}",
                self.report_days
            )));
        }
        if let BackendConfig::Remote { request_timeout, .. } = &self.backend
            && request_timeout.is_zero()
        {
            return Err(ConfigError("backend.request_timeout must be greater than zero".to_string()));
        }
        Ok(())
    }

    pub fn figment(args: &Args) -> Figment {
        Figment::new()
            .merge(Yaml::file(&args.config))
            .merge(Env::prefixed("HOTELOPS_").split("__").ignore(&["CONFIG"]))
    }

    /// Settings for the in-memory store, if that is the configured backend
    pub fn memory_settings(&self) -> Option<MemorySettings> {
        match &self.backend {
            BackendConfig::Memory { latency, .. } => Some(MemorySettings {
                latency: *latency,
                completion_policy: self.completion_policy,
            }),
            BackendConfig::Remote { .. } => None,
        }
    }

    /// Settings for the remote record service, if that is the configured backend
    pub fn remote_settings(&self) -> Option<RemoteSettings> {
        match &self.backend {
            BackendConfig::Remote {
                url,
                api_key,
                request_timeout,
            } => Some(RemoteSettings {
                base_url: url.clone(),
                api_key: api_key.clone(),
                request_timeout: *request_timeout,
                completion_policy: self.completion_policy,
            }),
            BackendConfig::Memory { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;

    fn args(config: &str) -> Args {
        Args {
            config: config.to_string(),
            validate: false,
        }
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        Jail::expect_with(|_jail| {
            let config = Config::load(&args("does-not-exist.yaml"))?;

            assert_eq!(config.report_days, 7);
            assert_eq!(config.completion_policy, CompletionPolicy::Preserve);
            let settings = config.memory_settings().expect("memory backend by default");
            assert_eq!(settings.latency, Latency::default());
            assert!(config.remote_settings().is_none());
            Ok(())
        });
    }

    #[test]
    fn test_remote_backend_config() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "test.yaml",
                r#"
completion_policy: clear_on_regression
backend:
  type: remote
  url: http://records.local:8080/api/
  api_key: sk-test
  request_timeout: 3s
"#,
            )?;

            let config = Config::load(&args("test.yaml"))?;
            let settings = config.remote_settings().expect("remote backend");
            assert_eq!(settings.base_url.as_str(), "http://records.local:8080/api/");
            assert_eq!(settings.api_key.as_deref(), Some("sk-test"));
            assert_eq!(settings.request_timeout, Duration::from_secs(3));
            assert_eq!(settings.completion_policy, CompletionPolicy::ClearOnRegression);
            assert!(config.memory_settings().is_none());
            Ok(())
        });
    }

    #[test]
    fn test_remote_timeout_defaults() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "test.yaml",
                r#"
backend:
  type: remote
  url: http://records.local/
"#,
            )?;

            let config = Config::load(&args("test.yaml"))?;
            let settings = config.remote_settings().expect("remote backend");
            assert_eq!(settings.request_timeout, RemoteSettings::DEFAULT_REQUEST_TIMEOUT);
            assert_eq!(settings.api_key, None);
            Ok(())
        });
    }

    #[test]
    fn test_memory_backend_config() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "test.yaml",
                r#"
backend:
  type: memory
  fixtures_dir: ./seed
  latency:
    list: 10ms
    create: 1s
"#,
            )?;

            let config = Config::load(&args("test.yaml"))?;
            let BackendConfig::Memory { fixtures_dir, latency } = &config.backend else {
                panic!("expected memory backend");
            };
            assert_eq!(fixtures_dir.as_deref(), Some(std::path::Path::new("./seed")));
            assert_eq!(latency.list, Duration::from_millis(10));
            assert_eq!(latency.create, Duration::from_secs(1));
            // Unspecified operations keep their defaults
            assert_eq!(latency.get, Latency::default().get);
            Ok(())
        });
    }

    #[test]
    fn test_env_override() {
        Jail::expect_with(|jail| {
            jail.create_file("test.yaml", "report_days: 30\n")?;
            jail.set_env("HOTELOPS_REPORT_DAYS", "14");
            jail.set_env("HOTELOPS_COMPLETION_POLICY", "clear_on_regression");
            jail.set_env("HOTELOPS_BACKEND__TYPE", "remote");
            jail.set_env("HOTELOPS_BACKEND__URL", "http://env.local/");

            let config = Config::load(&args("test.yaml"))?;
            assert_eq!(config.report_days, 14);
            assert_eq!(config.completion_policy, CompletionPolicy::ClearOnRegression);
            let settings = config.remote_settings().expect("remote backend from env");
            assert_eq!(settings.base_url.as_str(), "http://env.local/");
            Ok(())
        });
    }

    #[test]
    fn test_validation_rejects_zero_values() {
        Jail::expect_with(|jail| {
            jail.create_file("days.yaml", "report_days: 0\n")?;
            let err = Config::load(&args("days.yaml")).unwrap_err();
            assert!(err.to_string().contains("report_days"));

            jail.create_file("long.yaml", "report_days: 367\n")?;
            let err = Config::load(&args("long.yaml")).unwrap_err();
            assert!(err.to_string().contains("report_days"));
            jail.create_file("year.yaml", "report_days: 366\n")?;
            assert_eq!(Config::load(&args("year.yaml"))?.report_days, MAX_REPORT_DAYS);

            jail.create_file(
                "timeout.yaml",
                r#"
backend:
  type: remote
  url: http://records.local/
  request_timeout: 0s
"#,
            )?;
            let err = Config::load(&args("timeout.yaml")).unwrap_err();
            assert!(err.to_string().contains("request_timeout"));
            Ok(())
        });
    }

    #[test]
    fn test_unknown_fields_rejected() {
        Jail::expect_with(|jail| {
            jail.create_file("test.yaml", "report_dayz: 3\n")?;
            assert!(Config::load(&args("test.yaml")).is_err());
            Ok(())
        });
    }
}
