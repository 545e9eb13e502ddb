//! Sweep command wiring.

use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use tracing::warn;

use sweep_engine::config::{DEFAULT_REVIEW_API, DEFAULT_TOKEN_ENV};
use sweep_engine::{Reclaimer, ReviewStateChecker, SweepConfig};
use sweep_providers::{
    DnsDirectory, GithubReviewTracker, HttpDeploymentStore, HttpDnsDirectory, HttpVersionOracle,
};

const USER_AGENT: &str = concat!("stacksweep/", env!("CARGO_PKG_VERSION"));

pub async fn versions(config_path: &str, dry_run: bool) -> anyhow::Result<()> {
    let reclaimer = build(config_path, dry_run)?;
    let report = reclaimer.sweep_versions().await?;
    println!("{report}");
    Ok(())
}

pub async fn prs(config_path: &str, dry_run: bool) -> anyhow::Result<()> {
    let reclaimer = build(config_path, dry_run)?;
    let report = reclaimer.sweep_pull_requests().await?;
    println!("{report}");
    Ok(())
}

fn build(config_path: &str, dry_run: bool) -> anyhow::Result<Reclaimer> {
    let config = SweepConfig::from_file(Path::new(config_path))
        .with_context(|| format!("failed to load {config_path}"))?;
    let client = reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .build()
        .context("failed to build http client")?;

    let store = Arc::new(HttpDeploymentStore::new(
        client.clone(),
        config.store.base_url.as_str(),
    ));
    let dns: Option<Arc<dyn DnsDirectory>> = match &config.dns {
        Some(dns) => Some(Arc::new(HttpDnsDirectory::new(
            client.clone(),
            dns.base_url.as_str(),
        ))),
        None => None,
    };
    let oracle = Arc::new(HttpVersionOracle::new(client.clone()));

    let review = config.review.as_ref().map(|review| {
        let token_env = review.token_env.as_deref().unwrap_or(DEFAULT_TOKEN_ENV);
        let token = std::env::var(token_env).ok();
        if token.is_none() {
            warn!(
                var = token_env,
                "review token not set, tracker calls will be unauthenticated"
            );
        }
        let api_base = review.api_base.as_deref().unwrap_or(DEFAULT_REVIEW_API);
        let tracker = Arc::new(GithubReviewTracker::new(client.clone(), api_base, token));
        ReviewStateChecker::new(tracker, &review.repository)
    });

    let options = config.options(dry_run);
    Ok(Reclaimer::new(store, dns, oracle, review, options))
}
