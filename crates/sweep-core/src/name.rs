//! Stack name parsing.
//!
//! Stack names are `{base}` plus a suffix that encodes what was deployed:
//! a pinned version (`api-v1-2-3`, `api-sandbox-v1-2-3`) or a pull-request
//! preview (`api-pr-123`, `api-pr-123-sandbox`). Anything that does not
//! match exactly is `Unrecognized` and is never reclaimed.

use std::sync::LazyLock;

use regex::Regex;

use crate::types::{StackIdentity, StackKind};

static PR_SUFFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^pr-([0-9]+)(-sandbox)?$").expect("pull-request suffix pattern"));

static VERSION_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z0-9][a-z0-9-]*$").expect("version token pattern"));

/// Parse a stack name into a structured identity.
///
/// Matching is case-sensitive and `base_name` is a literal prefix. The
/// pull-request shapes are checked before the versioned shapes, and a
/// version token that itself starts with `pr-` is rejected, so a PR-shaped
/// suffix can never classify as a version.
pub fn parse(name: &str, base_name: &str) -> StackIdentity {
    let unrecognized = StackIdentity {
        base_name: base_name.to_string(),
        is_sandbox: false,
        kind: StackKind::Unrecognized,
    };

    let Some(rest) = name.strip_prefix(base_name) else {
        return unrecognized;
    };
    // A bare `{base}` with no suffix is not a candidate either.
    let Some(suffix) = rest.strip_prefix('-') else {
        return unrecognized;
    };

    if let Some(caps) = PR_SUFFIX.captures(suffix) {
        let Ok(number) = caps[1].parse::<u64>() else {
            return unrecognized;
        };
        return StackIdentity {
            base_name: base_name.to_string(),
            is_sandbox: caps.get(2).is_some(),
            kind: StackKind::PullRequest { number },
        };
    }

    let (version, is_sandbox) = match suffix.strip_prefix("sandbox-") {
        Some(version) => (version, true),
        None => (suffix, false),
    };

    if version.starts_with("pr-") || !VERSION_TOKEN.is_match(version) {
        return unrecognized;
    }

    StackIdentity {
        base_name: base_name.to_string(),
        is_sandbox,
        kind: StackKind::Versioned {
            version: version.to_string(),
        },
    }
}
