//! DNS directory contract and HTTP client.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use sweep_core::types::AliasRecord;

use crate::error::{ProviderError, ProviderResult};

/// One page of record sets from a zone.
#[derive(Debug, Clone)]
pub struct RecordPage {
    pub records: Vec<AliasRecord>,
    pub next_token: Option<String>,
}

/// Read/delete access to DNS zones and their record sets.
#[async_trait]
pub trait DnsDirectory: Send + Sync {
    /// Resolve a zone id by exact zone name. `None` when no such zone.
    async fn find_zone(&self, zone_name: &str) -> ProviderResult<Option<String>>;

    /// Fetch one page of record sets from a zone.
    async fn list_records(
        &self,
        zone_id: &str,
        page_token: Option<&str>,
    ) -> ProviderResult<RecordPage>;

    /// Delete the given record sets in a single batched change.
    async fn delete_records(&self, zone_id: &str, records: &[AliasRecord]) -> ProviderResult<()>;
}

/// JSON REST client for a DNS control-plane API.
pub struct HttpDnsDirectory {
    client: reqwest::Client,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct ZoneDto {
    id: String,
    name: String,
}

#[derive(Debug, Deserialize)]
struct ZoneListDto {
    zones: Vec<ZoneDto>,
}

#[derive(Debug, Deserialize)]
struct RecordPageDto {
    records: Vec<AliasRecord>,
    next_token: Option<String>,
}

#[derive(Debug, Serialize)]
struct DeleteRecordsDto<'a> {
    records: &'a [AliasRecord],
}

impl HttpDnsDirectory {
    pub fn new(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn zones_url(&self) -> String {
        format!("{}/api/v1/zones", self.base_url)
    }

    fn records_url(&self, zone_id: &str) -> String {
        format!("{}/api/v1/zones/{}/records", self.base_url, zone_id)
    }
}

#[async_trait]
impl DnsDirectory for HttpDnsDirectory {
    async fn find_zone(&self, zone_name: &str) -> ProviderResult<Option<String>> {
        let url = self.zones_url();
        let response = self
            .client
            .get(&url)
            .query(&[("name", zone_name)])
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(ProviderError::UnexpectedStatus {
                status: response.status().as_u16(),
                url,
            });
        }
        let list: ZoneListDto = response.json().await?;
        // The name filter is a prefix match server-side; require exact.
        Ok(list
            .zones
            .into_iter()
            .find(|zone| zone.name == zone_name)
            .map(|zone| zone.id))
    }

    async fn list_records(
        &self,
        zone_id: &str,
        page_token: Option<&str>,
    ) -> ProviderResult<RecordPage> {
        let url = self.records_url(zone_id);
        let mut request = self.client.get(&url);
        if let Some(token) = page_token {
            request = request.query(&[("page_token", token)]);
        }
        let response = request.send().await?;
        if !response.status().is_success() {
            return Err(ProviderError::UnexpectedStatus {
                status: response.status().as_u16(),
                url,
            });
        }
        let page: RecordPageDto = response.json().await?;
        debug!(zone = zone_id, count = page.records.len(), "fetched record page");
        Ok(RecordPage {
            records: page.records,
            next_token: page.next_token,
        })
    }

    async fn delete_records(&self, zone_id: &str, records: &[AliasRecord]) -> ProviderResult<()> {
        if records.is_empty() {
            return Ok(());
        }
        let url = format!("{}/delete", self.records_url(zone_id));
        let response = self
            .client
            .post(&url)
            .json(&DeleteRecordsDto { records })
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(ProviderError::UnexpectedStatus {
                status: response.status().as_u16(),
                url,
            });
        }
        Ok(())
    }
}
