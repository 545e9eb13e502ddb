//! Provider error types.

use thiserror::Error;

/// Errors raised by the collaborator clients.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },
}

pub type ProviderResult<T> = Result<T, ProviderError>;
