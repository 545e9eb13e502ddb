//! Domain types for stack reclamation.
//!
//! `StackSummary` is what the deployment store reports; everything else is
//! derived per run and never persisted.

use serde::{Deserialize, Serialize};

// ── Stacks ────────────────────────────────────────────────────────

/// One deployed stack as observed in the deployment store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StackSummary {
    pub name: String,
    pub status: StackStatus,
    /// Unix timestamp (seconds) when the stack was created.
    pub created_at: u64,
}

/// Coarse lifecycle bucket for a stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StackStatus {
    Active,
    /// Fully torn down. Terminated stacks never reach the policy.
    Terminated,
    Other,
}

impl StackStatus {
    /// Map a provider status string onto the lifecycle bucket.
    ///
    /// Unknown statuses land in `Other`: they are still enumerated, since
    /// an in-progress update is not a reason to skip a stack.
    pub fn from_provider(status: &str) -> Self {
        match status {
            "active" => Self::Active,
            "terminated" => Self::Terminated,
            _ => Self::Other,
        }
    }
}

// ── Identity ──────────────────────────────────────────────────────

/// Structured identity parsed from a stack name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StackIdentity {
    pub base_name: String,
    pub is_sandbox: bool,
    pub kind: StackKind,
}

/// What a stack name says the stack is.
///
/// The payload lives in the variant, so a versioned identity can never
/// also carry a pull-request number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StackKind {
    /// A pinned-version deployment, e.g. `api-v1-2-3`.
    Versioned { version: String },
    /// A pull-request preview deployment, e.g. `api-pr-123`.
    PullRequest { number: u64 },
    /// Anything else. Never a deletion candidate.
    Unrecognized,
}

// ── Active versions ───────────────────────────────────────────────

/// Point-in-time snapshot of what is live, fetched fresh once per run.
///
/// `None` means the lookup failed or the environment has no sandbox;
/// either way the policy treats it as "unknown" and keeps the stack.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActiveVersions {
    pub base: Option<String>,
    pub sandbox: Option<String>,
}

// ── DNS ───────────────────────────────────────────────────────────

/// A DNS record set entry in the alias zone.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AliasRecord {
    pub name: String,
    #[serde(rename = "type")]
    pub record_type: String,
}

// ── Pull requests ─────────────────────────────────────────────────

/// Lifecycle state of a pull request as reported by the review tracker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PullRequestState {
    Open,
    Closed,
    /// Fetch failed or the tracker reported something unexpected.
    /// Treated as "do not delete".
    Unknown,
}

// ── Decisions ─────────────────────────────────────────────────────

/// Verdict for a single stack.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    Keep(KeepReason),
    Delete(DeleteReason),
}

/// Why a stack was kept. Logged so operators can audit every run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeepReason {
    /// The name did not parse; never touch what we cannot classify.
    Unrecognized,
    /// Created less than the embargo window ago.
    Embargoed,
    /// This is the version currently serving traffic.
    LiveVersion,
    /// The relevant active version could not be determined.
    ActiveVersionUnknown,
    /// The active version has not settled past its own embargo yet,
    /// so superseded stacks stay as a rollback path.
    ActiveVersionUnsettled,
    /// Pull-request stacks are reclaimed by the review sweep, not the
    /// version sweep.
    ReviewSweepOnly,
    /// The pull request is still open.
    PullRequestOpen,
    /// The pull-request state could not be verified.
    PullRequestStateUnknown,
}

/// Why a stack was deleted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteReason {
    /// A different version is live and has settled.
    Superseded { active: String },
    /// The pull request behind this stack has closed.
    PullRequestClosed { number: u64 },
}
