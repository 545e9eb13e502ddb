//! Pull-request review state gate.

use std::sync::Arc;

use tracing::{debug, warn};

use sweep_core::types::PullRequestState;
use sweep_providers::ReviewTracker;

/// Resolves pull-request state for one repository, folding every failure
/// into "do not delete".
pub struct ReviewStateChecker {
    tracker: Arc<dyn ReviewTracker>,
    repository: String,
}

impl ReviewStateChecker {
    pub fn new(tracker: Arc<dyn ReviewTracker>, repository: impl Into<String>) -> Self {
        Self {
            tracker,
            repository: repository.into(),
        }
    }

    /// The pull request's state, with fetch failures resolved to
    /// [`PullRequestState::Unknown`] and logged, never raised. A transient
    /// tracker outage must not read as permission to delete.
    pub async fn state(&self, number: u64) -> PullRequestState {
        match self.tracker.pull_request_state(&self.repository, number).await {
            Ok(state) => {
                debug!(pr = number, state = ?state, "resolved pull request state");
                state
            }
            Err(error) => {
                warn!(pr = number, error = %error, "pull request state fetch failed");
                PullRequestState::Unknown
            }
        }
    }

    /// Whether the pull request is verifiably closed.
    pub async fn is_closed(&self, number: u64) -> bool {
        self.state(number).await == PullRequestState::Closed
    }
}
