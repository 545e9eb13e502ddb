//! Active-version oracle.
//!
//! Each environment exposes a `_status` endpoint whose healthcheck outcome
//! carries the version number currently serving live traffic.

use async_trait::async_trait;
use serde::Deserialize;

use crate::error::{ProviderError, ProviderResult};

/// Reports which version is live on an environment domain.
#[async_trait]
pub trait VersionOracle: Send + Sync {
    async fn active_version(&self, domain: &str, api_base_path: &str) -> ProviderResult<String>;
}

/// Oracle backed by the environment's own status endpoint.
pub struct HttpVersionOracle {
    client: reqwest::Client,
}

#[derive(Debug, Deserialize)]
struct StatusBody {
    checks: StatusChecks,
}

#[derive(Debug, Deserialize)]
struct StatusChecks {
    healthcheck: StatusHealthcheck,
}

#[derive(Debug, Deserialize)]
struct StatusHealthcheck {
    outcome: StatusOutcome,
}

#[derive(Debug, Deserialize)]
struct StatusOutcome {
    #[serde(rename = "versionNumber")]
    version_number: String,
}

impl HttpVersionOracle {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }

    fn status_url(domain: &str, api_base_path: &str) -> String {
        let path = api_base_path.trim_matches('/');
        if path.is_empty() {
            format!("https://{domain}/_status")
        } else {
            format!("https://{domain}/{path}/_status")
        }
    }
}

#[async_trait]
impl VersionOracle for HttpVersionOracle {
    async fn active_version(&self, domain: &str, api_base_path: &str) -> ProviderResult<String> {
        let url = Self::status_url(domain, api_base_path);
        let response = self.client.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(ProviderError::UnexpectedStatus {
                status: response.status().as_u16(),
                url,
            });
        }
        let body: StatusBody = response.json().await?;
        Ok(body.checks.healthcheck.outcome.version_number)
    }
}
