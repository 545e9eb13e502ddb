//! Deployment store contract and HTTP client.

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use sweep_core::types::{StackStatus, StackSummary};

use crate::error::{ProviderError, ProviderResult};

/// One page of stacks from the deployment store.
#[derive(Debug, Clone)]
pub struct StackPage {
    pub stacks: Vec<StackSummary>,
    /// Continuation token for the next page, absent on the last page.
    pub next_token: Option<String>,
}

/// Read/delete access to deployed stacks.
#[async_trait]
pub trait DeploymentStore: Send + Sync {
    /// Fetch one page of stacks, continuing from `page_token` if given.
    async fn list_page(&self, page_token: Option<&str>) -> ProviderResult<StackPage>;

    /// Delete a stack by name.
    ///
    /// Idempotent: deleting a stack the store no longer has is success,
    /// not an error.
    async fn delete_stack(&self, name: &str) -> ProviderResult<()>;
}

/// JSON REST client for a deployment control-plane API.
pub struct HttpDeploymentStore {
    client: reqwest::Client,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct StackDto {
    name: String,
    status: String,
    created_at: u64,
}

#[derive(Debug, Deserialize)]
struct StackPageDto {
    stacks: Vec<StackDto>,
    next_token: Option<String>,
}

impl HttpDeploymentStore {
    pub fn new(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn stacks_url(&self) -> String {
        format!("{}/api/v1/stacks", self.base_url)
    }
}

/// Whether a DELETE response means the stack is gone.
///
/// 404 counts: a stack that no longer exists is exactly the outcome a
/// delete is after.
fn delete_succeeded(status: reqwest::StatusCode) -> bool {
    status.is_success() || status == reqwest::StatusCode::NOT_FOUND
}

#[async_trait]
impl DeploymentStore for HttpDeploymentStore {
    async fn list_page(&self, page_token: Option<&str>) -> ProviderResult<StackPage> {
        let url = self.stacks_url();
        let mut request = self.client.get(&url);
        if let Some(token) = page_token {
            request = request.query(&[("page_token", token)]);
        }
        let response = request.send().await?;
        if !response.status().is_success() {
            return Err(ProviderError::UnexpectedStatus {
                status: response.status().as_u16(),
                url,
            });
        }
        let page: StackPageDto = response.json().await?;
        debug!(count = page.stacks.len(), "fetched stack page");
        Ok(StackPage {
            stacks: page
                .stacks
                .into_iter()
                .map(|dto| StackSummary {
                    name: dto.name,
                    status: StackStatus::from_provider(&dto.status),
                    created_at: dto.created_at,
                })
                .collect(),
            next_token: page.next_token,
        })
    }

    async fn delete_stack(&self, name: &str) -> ProviderResult<()> {
        let url = format!("{}/{}", self.stacks_url(), name);
        let response = self.client.delete(&url).send().await?;
        if delete_succeeded(response.status()) {
            Ok(())
        } else {
            Err(ProviderError::UnexpectedStatus {
                status: response.status().as_u16(),
                url,
            })
        }
    }
}
