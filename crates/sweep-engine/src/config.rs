//! sweep.toml configuration.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Seconds to wait between consecutive destructive calls.
pub const DEFAULT_COOLDOWN_SECS: u64 = 30;

/// Environment variable the review-tracker bearer token is read from
/// when the config does not name one.
pub const DEFAULT_TOKEN_ENV: &str = "SWEEP_REVIEW_TOKEN";

/// Default review-tracker API base.
pub const DEFAULT_REVIEW_API: &str = "https://api.github.com";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SweepConfig {
    pub stack: StackConfig,
    pub store: StoreConfig,
    /// Omit the whole table to skip all alias cleanup.
    pub dns: Option<DnsConfig>,
    /// Required only for pull-request sweeps.
    pub review: Option<ReviewConfig>,
    pub environment: EnvironmentConfig,
    pub sweep: Option<SweepTuning>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StackConfig {
    /// Stack name prefix all deployments of this service share.
    pub base_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    pub base_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DnsConfig {
    pub base_url: String,
    pub zone_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewConfig {
    /// `owner/name` of the repository the preview stacks were cut from.
    pub repository: String,
    pub api_base: Option<String>,
    /// Name of the environment variable holding the bearer token.
    /// The token itself never lives in the file.
    pub token_env: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnvironmentConfig {
    pub domain: String,
    pub api_base_path: String,
    /// Present only for environments that have a sandbox traffic path.
    pub sandbox_domain: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SweepTuning {
    pub cooldown_secs: Option<u64>,
}

/// Which domains the active-version oracle is queried against.
#[derive(Debug, Clone)]
pub struct EnvironmentProfile {
    pub domain: String,
    pub api_base_path: String,
    pub sandbox_domain: Option<String>,
}

/// Everything a single reclamation run needs to know.
#[derive(Debug, Clone)]
pub struct SweepOptions {
    pub base_name: String,
    pub zone_name: Option<String>,
    pub environment: EnvironmentProfile,
    pub cooldown: Duration,
    /// Decide and log, but delete nothing.
    pub dry_run: bool,
}

impl SweepConfig {
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: SweepConfig = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn to_toml_string(&self) -> anyhow::Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Assemble the per-run options.
    pub fn options(&self, dry_run: bool) -> SweepOptions {
        SweepOptions {
            base_name: self.stack.base_name.clone(),
            zone_name: self.dns.as_ref().map(|dns| dns.zone_name.clone()),
            environment: EnvironmentProfile {
                domain: self.environment.domain.clone(),
                api_base_path: self.environment.api_base_path.clone(),
                sandbox_domain: self.environment.sandbox_domain.clone(),
            },
            cooldown: Duration::from_secs(
                self.sweep
                    .as_ref()
                    .and_then(|sweep| sweep.cooldown_secs)
                    .unwrap_or(DEFAULT_COOLDOWN_SECS),
            ),
            dry_run,
        }
    }

    /// Scaffold a starter sweep.toml for the given base name.
    pub fn scaffold(base_name: &str) -> Self {
        SweepConfig {
            stack: StackConfig {
                base_name: base_name.to_string(),
            },
            store: StoreConfig {
                base_url: "https://control.example.dev".to_string(),
            },
            dns: Some(DnsConfig {
                base_url: "https://control.example.dev".to_string(),
                zone_name: "example.dev.".to_string(),
            }),
            review: Some(ReviewConfig {
                repository: format!("acme/{base_name}"),
                api_base: None,
                token_env: None,
            }),
            environment: EnvironmentConfig {
                domain: format!("{base_name}.example.dev"),
                api_base_path: "v1".to_string(),
                sandbox_domain: None,
            },
            sweep: Some(SweepTuning {
                cooldown_secs: Some(DEFAULT_COOLDOWN_SECS),
            }),
        }
    }
}
