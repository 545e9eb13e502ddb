//! Run report.

use std::fmt;

use sweep_core::types::Decision;

/// One audited decision from a sweep, in evaluation order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecisionEntry {
    pub stack: String,
    pub decision: Decision,
}

/// Outcome of a single reclamation run.
#[derive(Debug, Default)]
pub struct SweepReport {
    /// Stacks observed in the deployment store (terminated excluded).
    pub examined: usize,
    /// Every keep/delete decision taken this run.
    pub decisions: Vec<DecisionEntry>,
    /// Stacks deleted this run.
    pub deleted: Vec<String>,
    /// Stacks whose deletion failed; left for the next run.
    pub failed: Vec<String>,
    /// Alias records removed during cleanup.
    pub aliases_removed: usize,
    /// The run was cancelled before reaching every doomed stack.
    pub cancelled: bool,
}

impl fmt::Display for SweepReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "examined {} stacks, deleted {} ({} failed), removed {} alias records",
            self.examined,
            self.deleted.len(),
            self.failed.len(),
            self.aliases_removed
        )?;
        if self.cancelled {
            write!(f, " [cancelled]")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_summary() {
        let report = SweepReport {
            examined: 5,
            deleted: vec!["api-v1-2-2".to_string()],
            aliases_removed: 2,
            ..Default::default()
        };
        assert_eq!(
            report.to_string(),
            "examined 5 stacks, deleted 1 (0 failed), removed 2 alias records"
        );
    }

    #[test]
    fn display_marks_cancelled_runs() {
        let report = SweepReport {
            cancelled: true,
            ..Default::default()
        };
        assert!(report.to_string().ends_with("[cancelled]"));
    }
}
