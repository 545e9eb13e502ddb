//! DNS alias index and cleanup.
//!
//! Built once per run, before the first deletion, and reused for every
//! stack reclaimed in that run.

use std::sync::Arc;

use tracing::{debug, info, warn};

use sweep_core::types::AliasRecord;
use sweep_providers::DnsDirectory;

use crate::error::EngineResult;

/// In-memory index of a zone's CNAME records, queryable by stack name.
pub struct AliasIndex {
    dns: Option<Arc<dyn DnsDirectory>>,
    zone_id: Option<String>,
    records: Vec<AliasRecord>,
}

impl AliasIndex {
    /// An index that matches nothing and deletes nothing.
    pub fn empty() -> Self {
        Self {
            dns: None,
            zone_id: None,
            records: Vec::new(),
        }
    }

    /// Resolve the zone and index its CNAME records.
    ///
    /// No directory, no zone name, or an unknown zone yields the empty
    /// index: stack deletions proceed without alias cleanup. A record
    /// listing failure is fatal, like any other incomplete enumeration.
    pub async fn build(
        dns: Option<Arc<dyn DnsDirectory>>,
        zone_name: Option<&str>,
    ) -> EngineResult<Self> {
        let (Some(dns), Some(zone_name)) = (dns, zone_name) else {
            debug!("no dns zone configured, alias cleanup disabled");
            return Ok(Self::empty());
        };
        let Some(zone_id) = dns.find_zone(zone_name).await? else {
            warn!(zone = zone_name, "dns zone not found, alias cleanup disabled");
            return Ok(Self::empty());
        };

        let mut records = Vec::new();
        let mut token: Option<String> = None;
        loop {
            let page = dns.list_records(&zone_id, token.as_deref()).await?;
            records.extend(
                page.records
                    .into_iter()
                    .filter(|record| record.record_type == "CNAME"),
            );
            match page.next_token {
                Some(next) => token = Some(next),
                None => break,
            }
        }
        debug!(zone = zone_name, count = records.len(), "indexed alias records");
        Ok(Self {
            dns: Some(dns),
            zone_id: Some(zone_id),
            records,
        })
    }

    /// Records whose name contains the stack name.
    pub fn matching(&self, stack_name: &str) -> Vec<AliasRecord> {
        self.records
            .iter()
            .filter(|record| record.name.contains(stack_name))
            .cloned()
            .collect()
    }

    /// Delete every alias record pointing at the stack, in one batched
    /// change. Returns the number of records removed.
    ///
    /// An empty index or an empty match set is a silent no-op. A failed
    /// batch is logged and left for the next run; the stack itself is
    /// already gone.
    pub async fn delete_matching(&self, stack_name: &str) -> usize {
        let (Some(dns), Some(zone_id)) = (&self.dns, &self.zone_id) else {
            return 0;
        };
        let matches = self.matching(stack_name);
        if matches.is_empty() {
            return 0;
        }
        match dns.delete_records(zone_id, &matches).await {
            Ok(()) => {
                info!(
                    stack = stack_name,
                    count = matches.len(),
                    "removed alias records"
                );
                matches.len()
            }
            Err(error) => {
                warn!(stack = stack_name, error = %error, "alias record deletion failed");
                0
            }
        }
    }
}
