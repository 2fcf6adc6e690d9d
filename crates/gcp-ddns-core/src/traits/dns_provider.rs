// # DNS Provider Trait
//
// Defines the interface for reading and mutating address records in a
// managed DNS zone.
//
// ## Implementations
//
// - Google Cloud DNS: `gcp-ddns-provider-google` crate
//
// ## Usage
//
// ```rust,ignore
// use gcp_ddns_core::traits::{DnsProvider, RecordData, RecordType};
//
// #[tokio::main]
// async fn main() -> anyhow::Result<()> {
//     let provider = /* DnsProvider implementation */;
//
//     let zones = provider.list_zones().await?;
//     let zone = &zones[0];
//
//     provider.create_record(
//         zone,
//         &zone.qualify("host"),
//         RecordType::A,
//         &RecordData::single(3600, "1.2.3.4".parse()?),
//     ).await?;
//
//     Ok(())
// }
// ```

use async_trait::async_trait;
use std::fmt;
use std::net::IpAddr;

/// Strip the root label (trailing dot) from a domain name
pub fn trim_root(domain: &str) -> &str {
    domain.strip_suffix('.').unwrap_or(domain)
}

/// A managed DNS zone
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Zone {
    /// Provider-assigned zone identifier
    pub id: String,
    /// Zone handle used in API paths (e.g. "example-com")
    pub name: String,
    /// DNS domain served by the zone, without trailing dot
    pub domain: String,
}

impl Zone {
    /// Create a zone, normalizing the domain
    pub fn new(id: impl Into<String>, name: impl Into<String>, domain: &str) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            domain: trim_root(domain).to_string(),
        }
    }

    /// Whether this zone serves `domain` (trailing dots are ignored)
    pub fn serves(&self, domain: &str) -> bool {
        self.domain == trim_root(domain)
    }

    /// Build the fully-qualified record name for a label in this zone
    pub fn qualify(&self, record_name: &str) -> String {
        format!("{}.{}", record_name, self.domain)
    }
}

/// Address record types handled by the updater
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordType {
    /// IPv4 address record
    A,
    /// IPv6 address record
    Aaaa,
}

impl RecordType {
    /// Pick the record type matching an address family
    pub fn for_address(ip: &IpAddr) -> Self {
        match ip {
            IpAddr::V4(_) => RecordType::A,
            IpAddr::V6(_) => RecordType::Aaaa,
        }
    }

    /// Wire representation ("A" or "AAAA")
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordType::A => "A",
            RecordType::Aaaa => "AAAA",
        }
    }

    /// Parse a wire record type; non-address types yield `None`
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "A" => Some(RecordType::A),
            "AAAA" => Some(RecordType::Aaaa),
            _ => None,
        }
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An address record as held by the provider
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    /// Record identifier, `"<TYPE>:<name>"`
    pub id: String,
    /// Fully-qualified record name, without trailing dot
    pub name: String,
    /// Record type
    pub record_type: RecordType,
    /// Time-to-live in seconds
    pub ttl: u32,
    /// Record values (addresses rendered as text)
    pub rrdatas: Vec<String>,
}

impl Record {
    /// Create a record, deriving its identifier from type and name
    pub fn new(name: &str, record_type: RecordType, ttl: u32, rrdatas: Vec<String>) -> Self {
        let name = trim_root(name).to_string();
        Self {
            id: Self::make_id(record_type, &name),
            name,
            record_type,
            ttl,
            rrdatas,
        }
    }

    /// Identifier for a record set of the given type and name
    pub fn make_id(record_type: RecordType, name: &str) -> String {
        format!("{}:{}", record_type, trim_root(name))
    }
}

/// Payload for creating a record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordData {
    /// Time-to-live in seconds
    pub ttl: u32,
    /// Record values
    pub rrdatas: Vec<String>,
}

impl RecordData {
    /// Payload holding a single address
    pub fn single(ttl: u32, address: IpAddr) -> Self {
        Self {
            ttl,
            rrdatas: vec![address.to_string()],
        }
    }
}

/// Trait for DNS provider implementations
///
/// Implementations wrap one provider's zone/record CRUD API.
///
/// # Trust Level: Untrusted
///
/// Providers are thin API wrappers:
/// - One remote call (plus pagination) per method invocation
/// - No retry logic or backoff (a failed call is returned as an error)
/// - No caching between calls
/// - No background tasks
///
/// The provider offers no atomic replace. Callers that need an upsert
/// must delete and then create, which is what `RecordUpdater` does.
#[async_trait]
pub trait DnsProvider: Send + Sync {
    /// List all zones visible to the configured credentials and project
    async fn list_zones(&self) -> Result<Vec<Zone>, crate::Error>;

    /// List all record sets in a zone
    ///
    /// Non-address records are skipped by implementations.
    async fn list_records(&self, zone: &Zone) -> Result<Vec<Record>, crate::Error>;

    /// Fetch a single record by identifier
    ///
    /// # Returns
    ///
    /// - `Ok(Record)`: The record's current state
    /// - `Err(Error::NotFound)`: If the record doesn't exist
    async fn get_record(&self, zone: &Zone, record_id: &str) -> Result<Record, crate::Error>;

    /// Create a record set
    ///
    /// # Parameters
    ///
    /// - `zone`: The zone to create the record in
    /// - `name`: Fully-qualified record name
    /// - `record_type`: Address record type
    /// - `data`: TTL and values
    async fn create_record(
        &self,
        zone: &Zone,
        name: &str,
        record_type: RecordType,
        data: &RecordData,
    ) -> Result<Record, crate::Error>;

    /// Delete an existing record set
    ///
    /// The record must be passed exactly as the provider returned it.
    async fn delete_record(&self, zone: &Zone, record: &Record) -> Result<(), crate::Error>;

    /// Get the provider name (for logging/debugging)
    fn provider_name(&self) -> &'static str;
}
