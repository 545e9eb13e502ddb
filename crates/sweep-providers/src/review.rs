//! Review tracker client.

use async_trait::async_trait;
use serde::Deserialize;

use sweep_core::types::PullRequestState;

use crate::error::{ProviderError, ProviderResult};

/// Reports the lifecycle state of a pull request.
#[async_trait]
pub trait ReviewTracker: Send + Sync {
    /// `repository` is the `owner/name` pair the stacks were cut from.
    async fn pull_request_state(
        &self,
        repository: &str,
        number: u64,
    ) -> ProviderResult<PullRequestState>;
}

/// GitHub-backed review tracker.
pub struct GithubReviewTracker {
    client: reqwest::Client,
    api_base: String,
    token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PullRequestDto {
    state: String,
}

/// Map the tracker's state string onto the tri-state the policy needs.
/// Anything that is not exactly `closed` keeps the stack.
fn map_state(state: &str) -> PullRequestState {
    match state {
        "open" => PullRequestState::Open,
        "closed" => PullRequestState::Closed,
        _ => PullRequestState::Unknown,
    }
}

impl GithubReviewTracker {
    pub fn new(
        client: reqwest::Client,
        api_base: impl Into<String>,
        token: Option<String>,
    ) -> Self {
        let api_base = api_base.into();
        Self {
            client,
            api_base: api_base.trim_end_matches('/').to_string(),
            token,
        }
    }

    fn pull_url(&self, repository: &str, number: u64) -> String {
        format!("{}/repos/{}/pulls/{}", self.api_base, repository, number)
    }
}

#[async_trait]
impl ReviewTracker for GithubReviewTracker {
    async fn pull_request_state(
        &self,
        repository: &str,
        number: u64,
    ) -> ProviderResult<PullRequestState> {
        let url = self.pull_url(repository, number);
        let mut request = self
            .client
            .get(&url)
            .header("accept", "application/vnd.github+json");
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }
        let response = request.send().await?;
        if !response.status().is_success() {
            return Err(ProviderError::UnexpectedStatus {
                status: response.status().as_u16(),
                url,
            });
        }
        let body: PullRequestDto = response.json().await?;
        Ok(map_state(&body.state))
    }
}
