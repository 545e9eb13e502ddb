//! Engine error types.

use thiserror::Error;

use sweep_providers::ProviderError;

/// Fatal errors for a reclamation run.
///
/// Only enumeration-class failures land here: an incomplete view of the
/// world must never be treated as the full set. Oracle, tracker, and
/// per-stack deletion failures degrade to safe defaults instead.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("provider error: {0}")]
    Provider(#[from] ProviderError),

    #[error("no review tracker configured, cannot run a pull-request sweep")]
    ReviewNotConfigured,
}

pub type EngineResult<T> = Result<T, EngineError>;
