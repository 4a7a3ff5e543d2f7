//! Facade configuration (strict YAML parsing + environment defaults).

use std::fs;

use serde::Deserialize;

use crate::error::{MetricsError, Result};

/// Primary namespace variable.
pub const ENV_METRICS_PREFIX: &str = "METRICS_PREFIX";
/// Namespace fallback when `METRICS_PREFIX` is unset.
pub const ENV_SOURCE_PROGRAM: &str = "SOURCE_PROGRAM";
/// Statsd agent address.
pub const ENV_STATSD_HOST: &str = "STATSD_HOST";

pub const DEFAULT_PREFIX: &str = "unknown";
pub const DEFAULT_ADDR: &str = "localhost:8125";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MetricsConfig {
    pub prefix: String,

    #[serde(default = "default_addr")]
    pub addr: String,

    #[serde(default)]
    pub tags: Vec<String>,
}

impl MetricsConfig {
    pub fn validate(&self) -> Result<()> {
        if self.prefix.is_empty() {
            return Err(MetricsError::EmptyPrefix);
        }
        if self.addr.is_empty() {
            return Err(MetricsError::EmptyAddress);
        }
        Ok(())
    }

    /// Defaults from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults from an arbitrary lookup. Empty values count as unset.
    ///
    /// prefix: `METRICS_PREFIX`, then `SOURCE_PROGRAM`, then `"unknown"`.
    /// addr: `STATSD_HOST`, then `"localhost:8125"`.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.is_empty());

        let prefix = get(ENV_METRICS_PREFIX)
            .or_else(|| get(ENV_SOURCE_PROGRAM))
            .unwrap_or_else(|| DEFAULT_PREFIX.to_string());
        let addr = get(ENV_STATSD_HOST).unwrap_or_else(default_addr);

        Self {
            prefix,
            addr,
            tags: Vec::new(),
        }
    }
}

fn default_addr() -> String {
    DEFAULT_ADDR.into()
}

pub fn load_from_file(path: &str) -> Result<MetricsConfig> {
    let s = fs::read_to_string(path)
        .map_err(|e| MetricsError::InvalidConfig(format!("read config failed: {e}")))?;
    load_from_str(&s)
}

pub fn load_from_str(s: &str) -> Result<MetricsConfig> {
    let cfg: MetricsConfig = serde_yaml::from_str(s)
        .map_err(|e| MetricsError::InvalidConfig(format!("invalid yaml: {e}")))?;
    cfg.validate()?;
    Ok(cfg)
}
