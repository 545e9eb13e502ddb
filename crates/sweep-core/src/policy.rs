//! Retention policy.
//!
//! Decides KEEP or DELETE for a single stack from its parsed identity, its
//! age, and the active-version snapshot. The orchestrator applies one more
//! batch-level rule on top: `active_version_settled`, which holds back all
//! superseded-version deletions until the live version has existed past
//! its own embargo, preserving an instant rollback path.

use crate::name;
use crate::types::{
    ActiveVersions, Decision, DeleteReason, KeepReason, StackIdentity, StackKind, StackSummary,
};

/// How long after creation a stack is never reclaimed, in seconds.
pub const EMBARGO_SECS: u64 = 24 * 60 * 60;

/// Normalize a version for comparison: deploy tooling writes `.` as `-`
/// in stack names, so both sides are compared in the hyphenated form.
pub fn normalize_version(version: &str) -> String {
    version.replace('.', "-")
}

/// Decide whether a single stack should be kept or deleted.
///
/// Pull-request stacks are never decided here; they are gated by the
/// review sweep on a verified "closed" signal instead.
pub fn decide(
    identity: &StackIdentity,
    created_at: u64,
    now: u64,
    active: &ActiveVersions,
) -> Decision {
    match &identity.kind {
        StackKind::Unrecognized => Decision::Keep(KeepReason::Unrecognized),
        _ if now.saturating_sub(created_at) < EMBARGO_SECS => {
            Decision::Keep(KeepReason::Embargoed)
        }
        StackKind::PullRequest { .. } => Decision::Keep(KeepReason::ReviewSweepOnly),
        StackKind::Versioned { version } => {
            let relevant = if identity.is_sandbox {
                active.sandbox.as_deref()
            } else {
                active.base.as_deref()
            };
            match relevant {
                None => Decision::Keep(KeepReason::ActiveVersionUnknown),
                Some(active_version) => {
                    let active_version = normalize_version(active_version);
                    if normalize_version(version) == active_version {
                        Decision::Keep(KeepReason::LiveVersion)
                    } else {
                        Decision::Delete(DeleteReason::Superseded {
                            active: active_version,
                        })
                    }
                }
            }
        }
    }
}

/// Whether the active base-environment version has settled past its own
/// embargo window.
///
/// Looks for a non-sandbox stack whose parsed version equals the
/// normalized active version and checks its age. Not found, or still
/// inside the embargo, means not settled. Sandbox stacks are deliberately
/// not consulted: sandbox promotions settle independently.
pub fn active_version_settled(
    stacks: &[StackSummary],
    base_name: &str,
    active_base: &str,
    now: u64,
) -> bool {
    let active_base = normalize_version(active_base);
    stacks.iter().any(|stack| {
        let identity = name::parse(&stack.name, base_name);
        if identity.is_sandbox {
            return false;
        }
        match identity.kind {
            StackKind::Versioned { version } => {
                normalize_version(&version) == active_base
                    && now.saturating_sub(stack.created_at) >= EMBARGO_SECS
            }
            _ => false,
        }
    })
}
