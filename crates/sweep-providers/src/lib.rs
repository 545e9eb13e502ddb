//! sweep-providers: contracts for the external systems reclamation
//! consults, plus their HTTP client implementations.
//!
//! Four collaborators, each behind a trait so the engine can be driven by
//! fakes in tests:
//!
//! - [`DeploymentStore`]: list and delete deployed stacks
//! - [`DnsDirectory`]: resolve zones, list and delete alias records
//! - [`VersionOracle`]: which version is live on an environment domain
//! - [`ReviewTracker`]: whether a pull request is open or closed
//!
//! The clients raise [`ProviderError`] and leave safety semantics (what a
//! failure means for a reclamation decision) entirely to the engine.

pub mod dns;
pub mod error;
pub mod oracle;
pub mod review;
pub mod store;

pub use dns::{DnsDirectory, HttpDnsDirectory, RecordPage};
pub use error::{ProviderError, ProviderResult};
pub use oracle::{HttpVersionOracle, VersionOracle};
pub use review::{GithubReviewTracker, ReviewTracker};
pub use store::{DeploymentStore, HttpDeploymentStore, StackPage};
