//! Reclamation control loop.
//!
//! Two entry points share one machine: [`Reclaimer::sweep_versions`]
//! reclaims superseded-version stacks, [`Reclaimer::sweep_pull_requests`]
//! reclaims stacks whose pull request has closed. Every run re-derives
//! truth from the external systems; nothing is cached between runs.
//!
//! The entry points may run on independent schedules, but operators must
//! guarantee at most one concurrent sweep per base name. Two overlapping
//! sweeps can both decide to delete the same stack (benign, the second
//! delete is a no-op) but can race on conflicting alias record edits.
//!
//! Deletions are fully sequential, each followed by a fixed cooldown: the
//! provider rate-limits destructive calls per account, and serializing
//! them is cheaper than retrying throttled bursts.

use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use tokio::sync::watch;
use tracing::{debug, info, warn};

use sweep_core::name;
use sweep_core::policy;
use sweep_core::types::{
    ActiveVersions, Decision, DeleteReason, KeepReason, PullRequestState, StackKind,
};
use sweep_providers::{DeploymentStore, DnsDirectory, VersionOracle};

use crate::aliases::AliasIndex;
use crate::config::SweepOptions;
use crate::enumerate::list_all_stacks;
use crate::error::{EngineError, EngineResult};
use crate::report::{DecisionEntry, SweepReport};
use crate::review::ReviewStateChecker;

/// The reclamation orchestrator.
pub struct Reclaimer {
    store: Arc<dyn DeploymentStore>,
    dns: Option<Arc<dyn DnsDirectory>>,
    oracle: Arc<dyn VersionOracle>,
    review: Option<ReviewStateChecker>,
    opts: SweepOptions,
    cancel: Option<watch::Receiver<bool>>,
}

impl Reclaimer {
    pub fn new(
        store: Arc<dyn DeploymentStore>,
        dns: Option<Arc<dyn DnsDirectory>>,
        oracle: Arc<dyn VersionOracle>,
        review: Option<ReviewStateChecker>,
        opts: SweepOptions,
    ) -> Self {
        Self {
            store,
            dns,
            oracle,
            review,
            opts,
            cancel: None,
        }
    }

    /// Attach a cancellation signal, checked between deletions. A
    /// cancelled run leaves stacks it has not reached untouched; the
    /// partial work already done stands.
    pub fn with_cancellation(mut self, cancel: watch::Receiver<bool>) -> Self {
        self.cancel = Some(cancel);
        self
    }

    /// Reclaim superseded-version stacks.
    ///
    /// Fetches the active-version snapshot, enumerates the store, decides
    /// every stack through the retention policy, and deletes what is
    /// verifiably superseded. A freshly-promoted active version holds the
    /// whole batch back until it has settled past its own embargo.
    pub async fn sweep_versions(&self) -> EngineResult<SweepReport> {
        let now = unix_now();
        let active = self.fetch_active_versions().await;
        let stacks = list_all_stacks(self.store.as_ref()).await?;

        let mut report = SweepReport {
            examined: stacks.len(),
            ..Default::default()
        };

        let settled = match active.base.as_deref() {
            Some(base) => policy::active_version_settled(&stacks, &self.opts.base_name, base, now),
            None => false,
        };
        if !settled {
            info!(
                base = %self.opts.base_name,
                "active version unknown or not yet settled, holding back version reclamation"
            );
        }

        let mut doomed = Vec::new();
        for stack in &stacks {
            let identity = name::parse(&stack.name, &self.opts.base_name);
            let mut decision = policy::decide(&identity, stack.created_at, now, &active);
            if !settled && matches!(decision, Decision::Delete(_)) {
                decision = Decision::Keep(KeepReason::ActiveVersionUnsettled);
            }
            log_decision(&stack.name, &decision);
            if let Decision::Delete(_) = decision {
                doomed.push(stack.name.clone());
            }
            report.decisions.push(DecisionEntry {
                stack: stack.name.clone(),
                decision,
            });
        }

        self.delete_phase(doomed, &mut report).await?;
        info!(summary = %report, "version sweep complete");
        Ok(report)
    }

    /// Reclaim stacks whose pull request has closed.
    ///
    /// Only pull-request identities are considered; each is gated by a
    /// verified "closed" signal from the review tracker. Closed-PR stacks
    /// are reclaimed regardless of age: the embargo protects rollback of
    /// version promotions, and a closed PR has nothing to roll back to.
    pub async fn sweep_pull_requests(&self) -> EngineResult<SweepReport> {
        let review = self.review.as_ref().ok_or(EngineError::ReviewNotConfigured)?;
        let stacks = list_all_stacks(self.store.as_ref()).await?;

        let mut report = SweepReport {
            examined: stacks.len(),
            ..Default::default()
        };

        let mut doomed = Vec::new();
        for stack in &stacks {
            let identity = name::parse(&stack.name, &self.opts.base_name);
            let StackKind::PullRequest { number } = identity.kind else {
                debug!(stack = %stack.name, "not a pull-request stack, skipping");
                continue;
            };
            let decision = match review.state(number).await {
                PullRequestState::Closed => {
                    Decision::Delete(DeleteReason::PullRequestClosed { number })
                }
                PullRequestState::Open => Decision::Keep(KeepReason::PullRequestOpen),
                PullRequestState::Unknown => {
                    Decision::Keep(KeepReason::PullRequestStateUnknown)
                }
            };
            log_decision(&stack.name, &decision);
            if let Decision::Delete(_) = decision {
                doomed.push(stack.name.clone());
            }
            report.decisions.push(DecisionEntry {
                stack: stack.name.clone(),
                decision,
            });
        }

        self.delete_phase(doomed, &mut report).await?;
        info!(summary = %report, "pull-request sweep complete");
        Ok(report)
    }

    /// Fetch the active-version snapshot, once per run.
    ///
    /// The sandbox call only happens for environments that have a sandbox
    /// traffic path, and either call failing degrades to `None` rather
    /// than aborting: an unknown version means every comparison against
    /// it keeps the stack.
    async fn fetch_active_versions(&self) -> ActiveVersions {
        let env = &self.opts.environment;
        let base = match self
            .oracle
            .active_version(&env.domain, &env.api_base_path)
            .await
        {
            Ok(version) => {
                info!(version = %version, domain = %env.domain, "resolved active version");
                Some(version)
            }
            Err(error) => {
                warn!(domain = %env.domain, error = %error, "active version fetch failed");
                None
            }
        };
        let sandbox = match &env.sandbox_domain {
            Some(domain) => match self.oracle.active_version(domain, &env.api_base_path).await {
                Ok(version) => {
                    info!(version = %version, domain = %domain, "resolved sandbox active version");
                    Some(version)
                }
                Err(error) => {
                    warn!(domain = %domain, error = %error, "sandbox active version fetch failed");
                    None
                }
            },
            None => None,
        };
        ActiveVersions { base, sandbox }
    }

    /// Delete the doomed stacks, serially, each followed by the cooldown
    /// and then alias cleanup. Per-stack failures are logged and the loop
    /// continues; a failed stack keeps its aliases for the next run.
    async fn delete_phase(
        &self,
        doomed: Vec<String>,
        report: &mut SweepReport,
    ) -> EngineResult<()> {
        if doomed.is_empty() {
            info!("nothing to reclaim");
            return Ok(());
        }
        if self.opts.dry_run {
            info!(count = doomed.len(), "dry run, leaving stacks in place");
            return Ok(());
        }

        let aliases =
            AliasIndex::build(self.dns.clone(), self.opts.zone_name.as_deref()).await?;

        for stack_name in doomed {
            if self.cancelled() {
                warn!("cancellation requested, stopping between deletions");
                report.cancelled = true;
                break;
            }

            let deleted = match self.store.delete_stack(&stack_name).await {
                Ok(()) => {
                    info!(stack = %stack_name, "deleted stack");
                    report.deleted.push(stack_name.clone());
                    true
                }
                Err(error) => {
                    warn!(stack = %stack_name, error = %error, "stack deletion failed");
                    report.failed.push(stack_name.clone());
                    false
                }
            };

            // Cooldown applies after every delete attempt: the provider
            // counts throttled calls too.
            tokio::time::sleep(self.opts.cooldown).await;

            if deleted {
                report.aliases_removed += aliases.delete_matching(&stack_name).await;
            }
        }
        Ok(())
    }

    fn cancelled(&self) -> bool {
        self.cancel.as_ref().is_some_and(|rx| *rx.borrow())
    }
}

// Both outcomes log at info: operators audit why a stack was or was not
// reclaimed from this trail alone.
fn log_decision(stack: &str, decision: &Decision) {
    match decision {
        Decision::Keep(reason) => info!(stack = %stack, reason = ?reason, "keeping stack"),
        Decision::Delete(reason) => info!(stack = %stack, reason = ?reason, "reclaiming stack"),
    }
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::collections::{HashMap, HashSet};
    use std::sync::Mutex;
    use std::time::Duration;

    use async_trait::async_trait;

    use sweep_core::types::{AliasRecord, StackStatus, StackSummary};
    use sweep_providers::{
        ProviderError, ProviderResult, RecordPage, ReviewTracker, StackPage,
    };

    use crate::config::EnvironmentProfile;

    const TWO_DAYS: u64 = 2 * 24 * 60 * 60;

    // ── Fakes ─────────────────────────────────────────────────────

    struct FakeStore {
        stacks: Vec<StackSummary>,
        page_size: usize,
        fail_listing: bool,
        fail_deletes: HashSet<String>,
        deleted: Mutex<Vec<String>>,
    }

    impl FakeStore {
        fn new(stacks: Vec<StackSummary>) -> Self {
            Self {
                stacks,
                page_size: 100,
                fail_listing: false,
                fail_deletes: HashSet::new(),
                deleted: Mutex::new(Vec::new()),
            }
        }

        fn deleted(&self) -> Vec<String> {
            self.deleted.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl DeploymentStore for FakeStore {
        async fn list_page(&self, page_token: Option<&str>) -> ProviderResult<StackPage> {
            if self.fail_listing {
                return Err(ProviderError::UnexpectedStatus {
                    status: 503,
                    url: "test".to_string(),
                });
            }
            let offset = page_token.map(|t| t.parse::<usize>().unwrap()).unwrap_or(0);
            let end = (offset + self.page_size).min(self.stacks.len());
            Ok(StackPage {
                stacks: self.stacks[offset..end].to_vec(),
                next_token: (end < self.stacks.len()).then(|| end.to_string()),
            })
        }

        async fn delete_stack(&self, name: &str) -> ProviderResult<()> {
            if self.fail_deletes.contains(name) {
                return Err(ProviderError::UnexpectedStatus {
                    status: 429,
                    url: "test".to_string(),
                });
            }
            // Idempotent: a name the store no longer has still succeeds.
            self.deleted.lock().unwrap().push(name.to_string());
            Ok(())
        }
    }

    struct FakeDns {
        records: Vec<AliasRecord>,
        deleted: Mutex<Vec<AliasRecord>>,
    }

    impl FakeDns {
        fn new(records: Vec<AliasRecord>) -> Self {
            Self {
                records,
                deleted: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl DnsDirectory for FakeDns {
        async fn find_zone(&self, zone_name: &str) -> ProviderResult<Option<String>> {
            Ok((zone_name == "example.dev.").then(|| "z-1".to_string()))
        }

        async fn list_records(
            &self,
            _zone_id: &str,
            _page_token: Option<&str>,
        ) -> ProviderResult<RecordPage> {
            Ok(RecordPage {
                records: self.records.clone(),
                next_token: None,
            })
        }

        async fn delete_records(
            &self,
            _zone_id: &str,
            records: &[AliasRecord],
        ) -> ProviderResult<()> {
            self.deleted.lock().unwrap().extend_from_slice(records);
            Ok(())
        }
    }

    struct FakeOracle {
        /// domain -> live version; a missing domain fails the fetch.
        versions: HashMap<String, String>,
    }

    #[async_trait]
    impl VersionOracle for FakeOracle {
        async fn active_version(
            &self,
            domain: &str,
            _api_base_path: &str,
        ) -> ProviderResult<String> {
            self.versions
                .get(domain)
                .cloned()
                .ok_or(ProviderError::UnexpectedStatus {
                    status: 500,
                    url: domain.to_string(),
                })
        }
    }

    struct FakeTracker {
        states: HashMap<u64, PullRequestState>,
        fail: bool,
    }

    #[async_trait]
    impl ReviewTracker for FakeTracker {
        async fn pull_request_state(
            &self,
            _repository: &str,
            number: u64,
        ) -> ProviderResult<PullRequestState> {
            if self.fail {
                return Err(ProviderError::UnexpectedStatus {
                    status: 502,
                    url: "test".to_string(),
                });
            }
            Ok(self
                .states
                .get(&number)
                .copied()
                .unwrap_or(PullRequestState::Unknown))
        }
    }

    // ── Helpers ───────────────────────────────────────────────────

    fn stack(name: &str, age_secs: u64) -> StackSummary {
        StackSummary {
            name: name.to_string(),
            status: StackStatus::Active,
            created_at: unix_now() - age_secs,
        }
    }

    fn cname(name: &str) -> AliasRecord {
        AliasRecord {
            name: name.to_string(),
            record_type: "CNAME".to_string(),
        }
    }

    fn options(zone: bool, sandbox: bool) -> SweepOptions {
        SweepOptions {
            base_name: "api".to_string(),
            zone_name: zone.then(|| "example.dev.".to_string()),
            environment: EnvironmentProfile {
                domain: "api.example.dev".to_string(),
                api_base_path: "v1".to_string(),
                sandbox_domain: sandbox.then(|| "api.sandbox.example.dev".to_string()),
            },
            cooldown: Duration::ZERO,
            dry_run: false,
        }
    }

    fn oracle(base: Option<&str>, sandbox: Option<&str>) -> Arc<FakeOracle> {
        let mut versions = HashMap::new();
        if let Some(version) = base {
            versions.insert("api.example.dev".to_string(), version.to_string());
        }
        if let Some(version) = sandbox {
            versions.insert(
                "api.sandbox.example.dev".to_string(),
                version.to_string(),
            );
        }
        Arc::new(FakeOracle { versions })
    }

    fn tracker(states: &[(u64, PullRequestState)]) -> ReviewStateChecker {
        ReviewStateChecker::new(
            Arc::new(FakeTracker {
                states: states.iter().copied().collect(),
                fail: false,
            }),
            "acme/api",
        )
    }

    // ── Version sweeps ────────────────────────────────────────────

    #[tokio::test]
    async fn superseded_version_is_reclaimed_live_version_stays() {
        let store = Arc::new(FakeStore::new(vec![
            stack("api-v1-2-3", TWO_DAYS),
            stack("api-v1-2-2", TWO_DAYS),
        ]));
        let reclaimer = Reclaimer::new(
            store.clone(),
            None,
            oracle(Some("v1.2.3"), None),
            None,
            options(false, false),
        );

        let report = reclaimer.sweep_versions().await.unwrap();
        assert_eq!(store.deleted(), vec!["api-v1-2-2".to_string()]);
        assert_eq!(report.deleted, vec!["api-v1-2-2".to_string()]);
        assert_eq!(report.examined, 2);
        assert!(report.failed.is_empty());
    }

    #[tokio::test]
    async fn fresh_active_version_holds_the_whole_batch() {
        let store = Arc::new(FakeStore::new(vec![
            stack("api-v1-2-3", 3600),
            stack("api-v1-2-2", TWO_DAYS),
        ]));
        let reclaimer = Reclaimer::new(
            store.clone(),
            None,
            oracle(Some("v1.2.3"), None),
            None,
            options(false, false),
        );

        let report = reclaimer.sweep_versions().await.unwrap();
        assert!(store.deleted().is_empty());
        assert!(report.decisions.iter().any(|entry| {
            entry.stack == "api-v1-2-2"
                && entry.decision == Decision::Keep(KeepReason::ActiveVersionUnsettled)
        }));
    }

    #[tokio::test]
    async fn sandbox_oracle_failure_keeps_sandbox_stacks_only() {
        let store = Arc::new(FakeStore::new(vec![
            stack("api-v1-2-3", TWO_DAYS),
            stack("api-v1-2-2", TWO_DAYS),
            stack("api-sandbox-v1-2-2", TWO_DAYS),
        ]));
        // Sandbox domain configured but its status fetch fails.
        let reclaimer = Reclaimer::new(
            store.clone(),
            None,
            oracle(Some("v1.2.3"), None),
            None,
            options(false, true),
        );

        let report = reclaimer.sweep_versions().await.unwrap();
        assert_eq!(store.deleted(), vec!["api-v1-2-2".to_string()]);
        assert!(report.decisions.iter().any(|entry| {
            entry.stack == "api-sandbox-v1-2-2"
                && entry.decision == Decision::Keep(KeepReason::ActiveVersionUnknown)
        }));
    }

    #[tokio::test]
    async fn base_oracle_failure_reclaims_nothing() {
        let store = Arc::new(FakeStore::new(vec![
            stack("api-v1-2-3", TWO_DAYS),
            stack("api-v1-2-2", TWO_DAYS),
        ]));
        let reclaimer = Reclaimer::new(
            store.clone(),
            None,
            oracle(None, None),
            None,
            options(false, false),
        );

        let report = reclaimer.sweep_versions().await.unwrap();
        assert!(store.deleted().is_empty());
        assert!(report.deleted.is_empty());
    }

    #[tokio::test]
    async fn embargoed_stack_is_kept_even_when_superseded() {
        let store = Arc::new(FakeStore::new(vec![
            stack("api-v1-2-3", TWO_DAYS),
            stack("api-v1-2-2", 3600),
        ]));
        let reclaimer = Reclaimer::new(
            store.clone(),
            None,
            oracle(Some("v1.2.3"), None),
            None,
            options(false, false),
        );

        let report = reclaimer.sweep_versions().await.unwrap();
        assert!(store.deleted().is_empty());
        assert!(report.decisions.iter().any(|entry| {
            entry.stack == "api-v1-2-2"
                && entry.decision == Decision::Keep(KeepReason::Embargoed)
        }));
    }

    #[tokio::test]
    async fn enumeration_failure_aborts_before_any_deletion() {
        let mut store = FakeStore::new(vec![stack("api-v1-2-2", TWO_DAYS)]);
        store.fail_listing = true;
        let store = Arc::new(store);
        let reclaimer = Reclaimer::new(
            store.clone(),
            None,
            oracle(Some("v1.2.3"), None),
            None,
            options(false, false),
        );

        assert!(reclaimer.sweep_versions().await.is_err());
        assert!(store.deleted().is_empty());
    }

    #[tokio::test]
    async fn delete_failure_does_not_stop_the_batch() {
        let mut store = FakeStore::new(vec![
            stack("api-v1-2-3", TWO_DAYS),
            stack("api-v1-2-1", TWO_DAYS),
            stack("api-v1-2-2", TWO_DAYS),
        ]);
        store.fail_deletes.insert("api-v1-2-1".to_string());
        let store = Arc::new(store);
        let reclaimer = Reclaimer::new(
            store.clone(),
            None,
            oracle(Some("v1.2.3"), None),
            None,
            options(false, false),
        );

        let report = reclaimer.sweep_versions().await.unwrap();
        assert_eq!(store.deleted(), vec!["api-v1-2-2".to_string()]);
        assert_eq!(report.failed, vec!["api-v1-2-1".to_string()]);
    }

    #[tokio::test]
    async fn dry_run_deletes_nothing() {
        let store = Arc::new(FakeStore::new(vec![
            stack("api-v1-2-3", TWO_DAYS),
            stack("api-v1-2-2", TWO_DAYS),
        ]));
        let mut opts = options(false, false);
        opts.dry_run = true;
        let reclaimer = Reclaimer::new(
            store.clone(),
            None,
            oracle(Some("v1.2.3"), None),
            None,
            opts,
        );

        let report = reclaimer.sweep_versions().await.unwrap();
        assert!(store.deleted().is_empty());
        // The decision trail still shows what would have gone.
        assert!(report.decisions.iter().any(|entry| {
            entry.stack == "api-v1-2-2" && matches!(entry.decision, Decision::Delete(_))
        }));
    }

    #[tokio::test]
    async fn pagination_is_followed_to_the_end() {
        let mut store = FakeStore::new(vec![
            stack("api-v1-2-3", TWO_DAYS),
            stack("api-v1-2-2", TWO_DAYS),
            stack("api-v1-2-1", TWO_DAYS),
        ]);
        store.page_size = 1;
        let store = Arc::new(store);
        let reclaimer = Reclaimer::new(
            store.clone(),
            None,
            oracle(Some("v1.2.3"), None),
            None,
            options(false, false),
        );

        let report = reclaimer.sweep_versions().await.unwrap();
        assert_eq!(report.examined, 3);
        assert_eq!(
            store.deleted(),
            vec!["api-v1-2-2".to_string(), "api-v1-2-1".to_string()]
        );
    }

    #[tokio::test]
    async fn cancelled_run_stops_before_deleting() {
        let store = Arc::new(FakeStore::new(vec![
            stack("api-v1-2-3", TWO_DAYS),
            stack("api-v1-2-2", TWO_DAYS),
        ]));
        let (tx, rx) = watch::channel(false);
        tx.send(true).unwrap();
        let reclaimer = Reclaimer::new(
            store.clone(),
            None,
            oracle(Some("v1.2.3"), None),
            None,
            options(false, false),
        )
        .with_cancellation(rx);

        let report = reclaimer.sweep_versions().await.unwrap();
        assert!(store.deleted().is_empty());
        assert!(report.cancelled);
    }

    // ── Pull-request sweeps ───────────────────────────────────────

    #[tokio::test]
    async fn closed_pr_stack_is_reclaimed_with_its_alias() {
        let store = Arc::new(FakeStore::new(vec![
            stack("api-pr-123", TWO_DAYS),
            stack("api-v1-2-3", TWO_DAYS),
        ]));
        let dns = Arc::new(FakeDns::new(vec![
            cname("api-pr-123.example.dev."),
            cname("api-pr-456.example.dev."),
        ]));
        let reclaimer = Reclaimer::new(
            store.clone(),
            Some(dns.clone()),
            oracle(None, None),
            Some(tracker(&[(123, PullRequestState::Closed)])),
            options(true, false),
        );

        let report = reclaimer.sweep_pull_requests().await.unwrap();
        assert_eq!(store.deleted(), vec!["api-pr-123".to_string()]);
        assert_eq!(report.aliases_removed, 1);
        let removed = dns.deleted.lock().unwrap();
        assert_eq!(removed.len(), 1);
        assert_eq!(removed[0].name, "api-pr-123.example.dev.");
    }

    #[tokio::test]
    async fn open_pr_stack_is_kept() {
        let store = Arc::new(FakeStore::new(vec![stack("api-pr-456", TWO_DAYS)]));
        let dns = Arc::new(FakeDns::new(vec![cname("api-pr-456.example.dev.")]));
        let reclaimer = Reclaimer::new(
            store.clone(),
            Some(dns.clone()),
            oracle(None, None),
            Some(tracker(&[(456, PullRequestState::Open)])),
            options(true, false),
        );

        let report = reclaimer.sweep_pull_requests().await.unwrap();
        assert!(store.deleted().is_empty());
        assert_eq!(report.aliases_removed, 0);
        assert!(dns.deleted.lock().unwrap().is_empty());
        assert!(report.decisions.iter().any(|entry| {
            entry.stack == "api-pr-456"
                && entry.decision == Decision::Keep(KeepReason::PullRequestOpen)
        }));
    }

    #[tokio::test]
    async fn tracker_failure_keeps_the_stack() {
        let store = Arc::new(FakeStore::new(vec![stack("api-pr-789", TWO_DAYS)]));
        let review = ReviewStateChecker::new(
            Arc::new(FakeTracker {
                states: HashMap::new(),
                fail: true,
            }),
            "acme/api",
        );
        let reclaimer = Reclaimer::new(
            store.clone(),
            None,
            oracle(None, None),
            Some(review),
            options(false, false),
        );

        let report = reclaimer.sweep_pull_requests().await.unwrap();
        assert!(store.deleted().is_empty());
        assert!(report.decisions.iter().any(|entry| {
            entry.stack == "api-pr-789"
                && entry.decision == Decision::Keep(KeepReason::PullRequestStateUnknown)
        }));
    }

    #[tokio::test]
    async fn missing_zone_still_reclaims_stacks() {
        let store = Arc::new(FakeStore::new(vec![stack("api-pr-123", TWO_DAYS)]));
        let dns = Arc::new(FakeDns::new(vec![cname("api-pr-123.example.dev.")]));
        let mut opts = options(true, false);
        opts.zone_name = Some("missing.dev.".to_string());
        let reclaimer = Reclaimer::new(
            store.clone(),
            Some(dns.clone()),
            oracle(None, None),
            Some(tracker(&[(123, PullRequestState::Closed)])),
            opts,
        );

        let report = reclaimer.sweep_pull_requests().await.unwrap();
        assert_eq!(store.deleted(), vec!["api-pr-123".to_string()]);
        assert_eq!(report.aliases_removed, 0);
        assert!(dns.deleted.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn pr_sweep_without_review_config_is_an_error() {
        let store = Arc::new(FakeStore::new(vec![]));
        let reclaimer = Reclaimer::new(
            store,
            None,
            oracle(None, None),
            None,
            options(false, false),
        );
        assert!(matches!(
            reclaimer.sweep_pull_requests().await,
            Err(EngineError::ReviewNotConfigured)
        ));
    }

    #[tokio::test]
    async fn version_sweep_never_touches_pr_stacks() {
        let store = Arc::new(FakeStore::new(vec![
            stack("api-v1-2-3", TWO_DAYS),
            stack("api-pr-123", TWO_DAYS),
        ]));
        let reclaimer = Reclaimer::new(
            store.clone(),
            None,
            oracle(Some("v1.2.3"), None),
            None,
            options(false, false),
        );

        let report = reclaimer.sweep_versions().await.unwrap();
        assert!(store.deleted().is_empty());
        assert!(report.decisions.iter().any(|entry| {
            entry.stack == "api-pr-123"
                && entry.decision == Decision::Keep(KeepReason::ReviewSweepOnly)
        }));
    }
}
