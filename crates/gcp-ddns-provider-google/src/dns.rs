//! Google Cloud DNS provider
//!
//! ## API Reference
//!
//! - List zones: GET `/dns/v1/projects/:project/managedZones`
//! - List record sets: GET `/dns/v1/projects/:project/managedZones/:zone/rrsets`
//! - Get record set: GET `.../rrsets?name=host.example.com.&type=A`
//! - Create/delete: POST `.../changes` with `additions` or `deletions`
//!
//! Cloud DNS has no in-place update through `changes` without knowing the
//! exact existing record set, and offers no upsert. Deletions must echo the
//! existing record set exactly (name, type, ttl, rrdatas).

use crate::client::ApiClient;
use crate::models::{Change, ManagedZoneList, ResourceRecordSet, RrsetList, fully_qualified};
use async_trait::async_trait;
use gcp_ddns_core::traits::{DnsProvider, Record, RecordData, RecordType, Zone};
use gcp_ddns_core::{Credentials, Error, Result};

/// Cloud DNS API base URL
pub const DNS_API_BASE: &str = "https://dns.googleapis.com";

/// Cloud DNS provider bound to one project
#[derive(Debug)]
pub struct CloudDnsProvider {
    client: ApiClient,
    project: String,
}

impl CloudDnsProvider {
    /// Create a new Cloud DNS provider
    ///
    /// # Parameters
    ///
    /// - `credentials`: Credential pair; the key is used as bearer token
    /// - `project`: Project owning the managed zones
    pub fn new(credentials: Credentials, project: impl Into<String>) -> Result<Self> {
        let project = project.into();
        if project.is_empty() {
            return Err(Error::config("Cloud DNS provider needs a project"));
        }

        Ok(Self {
            client: ApiClient::new("clouddns", DNS_API_BASE, credentials)?,
            project,
        })
    }

    /// Point the provider at another API endpoint (emulators, tests)
    pub fn with_endpoint(mut self, base_url: &str) -> Self {
        self.client.set_base_url(base_url);
        self
    }

    fn zones_path(&self) -> String {
        format!("/dns/v1/projects/{}/managedZones", self.project)
    }

    fn zone_path(&self, zone: &Zone, suffix: &str) -> String {
        format!("{}/{}/{}", self.zones_path(), zone.name, suffix)
    }

    async fn submit(&self, zone: &Zone, change: &Change, context: &str) -> Result<Change> {
        let submitted: Change = self
            .client
            .post_json(&self.zone_path(zone, "changes"), change, context)
            .await?;

        tracing::debug!(
            "Change {} submitted to zone {} (status: {})",
            submitted.id.as_deref().unwrap_or("?"),
            zone.name,
            submitted.status.as_deref().unwrap_or("unknown")
        );
        Ok(submitted)
    }
}

/// Split a record identifier (`"<TYPE>:<name>"`) into its parts
fn parse_record_id(record_id: &str) -> Result<(RecordType, &str)> {
    let (kind, name) = record_id
        .split_once(':')
        .ok_or_else(|| Error::invalid_input(format!("Malformed record id: {}", record_id)))?;
    let record_type = RecordType::parse(kind).ok_or_else(|| {
        Error::invalid_input(format!("Unsupported record type in id: {}", record_id))
    })?;
    Ok((record_type, name))
}

#[async_trait]
impl DnsProvider for CloudDnsProvider {
    async fn list_zones(&self) -> Result<Vec<Zone>> {
        tracing::debug!(
            "Listing managed zones in {} as {}",
            self.project,
            self.client.user_id()
        );

        let zones = self
            .client
            .get_all_pages(
                &self.zones_path(),
                &[],
                "list zones",
                |page: ManagedZoneList| (page.managed_zones, page.next_page_token),
            )
            .await?;

        Ok(zones.into_iter().map(Zone::from).collect())
    }

    async fn list_records(&self, zone: &Zone) -> Result<Vec<Record>> {
        let rrsets = self
            .client
            .get_all_pages(
                &self.zone_path(zone, "rrsets"),
                &[],
                "list records",
                |page: RrsetList| (page.rrsets, page.next_page_token),
            )
            .await?;

        Ok(rrsets
            .into_iter()
            .filter_map(ResourceRecordSet::into_record)
            .collect())
    }

    async fn get_record(&self, zone: &Zone, record_id: &str) -> Result<Record> {
        let (record_type, name) = parse_record_id(record_id)?;
        let fqdn = fully_qualified(name);

        let page: RrsetList = self
            .client
            .get_json(
                &self.zone_path(zone, "rrsets"),
                &[("name", fqdn.as_str()), ("type", record_type.as_str())],
                "get record",
            )
            .await?;

        page.rrsets
            .into_iter()
            .filter_map(ResourceRecordSet::into_record)
            .find(|record| record.id == record_id)
            .ok_or_else(|| Error::not_found(format!("DNS record not found: {}", record_id)))
    }

    async fn create_record(
        &self,
        zone: &Zone,
        name: &str,
        record_type: RecordType,
        data: &RecordData,
    ) -> Result<Record> {
        let record = Record::new(name, record_type, data.ttl, data.rrdatas.clone());
        tracing::info!(
            "Creating {} record {} -> {:?} (ttl {})",
            record_type,
            record.name,
            record.rrdatas,
            record.ttl
        );

        let change = Change {
            additions: vec![ResourceRecordSet::from(&record)],
            ..Change::default()
        };
        self.submit(zone, &change, "create record").await?;

        Ok(record)
    }

    async fn delete_record(&self, zone: &Zone, record: &Record) -> Result<()> {
        tracing::info!("Deleting {} record {}", record.record_type, record.name);

        let change = Change {
            deletions: vec![ResourceRecordSet::from(record)],
            ..Change::default()
        };
        self.submit(zone, &change, "delete record").await?;

        Ok(())
    }

    fn provider_name(&self) -> &'static str {
        "clouddns"
    }
}
