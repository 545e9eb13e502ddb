//! Deployment store enumeration.

use tracing::debug;

use sweep_core::types::{StackStatus, StackSummary};
use sweep_providers::DeploymentStore;

use crate::error::EngineResult;

/// List every live stack in the deployment store.
///
/// Follows the continuation token until exhausted and filters out
/// terminated stacks. Any page failure aborts the run: an incomplete
/// listing must never be treated as the full set.
pub async fn list_all_stacks(store: &dyn DeploymentStore) -> EngineResult<Vec<StackSummary>> {
    let mut stacks = Vec::new();
    let mut token: Option<String> = None;
    loop {
        let page = store.list_page(token.as_deref()).await?;
        stacks.extend(
            page.stacks
                .into_iter()
                .filter(|stack| stack.status != StackStatus::Terminated),
        );
        match page.next_token {
            Some(next) => token = Some(next),
            None => break,
        }
    }
    debug!(count = stacks.len(), "enumerated stacks");
    Ok(stacks)
}
