//! Wire models for the Compute Engine v1 and Cloud DNS v1 APIs
//!
//! Only the fields the updater reads or writes are modelled. Unknown
//! fields are ignored by serde.

use gcp_ddns_core::traits::{Instance, Record, RecordType, Zone, trim_root};
use serde::{Deserialize, Serialize};
use std::net::IpAddr;

// ─── Cloud DNS ─────────────────────────────────────────────

/// `managedZones.list` response page
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ManagedZoneList {
    #[serde(default)]
    pub managed_zones: Vec<ManagedZone>,
    pub next_page_token: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ManagedZone {
    pub name: String,
    pub dns_name: String,
    #[serde(default)]
    pub id: Option<String>,
}

impl From<ManagedZone> for Zone {
    fn from(zone: ManagedZone) -> Self {
        let id = zone.id.unwrap_or_else(|| zone.name.clone());
        Zone::new(id, zone.name, &zone.dns_name)
    }
}

/// `resourceRecordSets.list` response page
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RrsetList {
    #[serde(default)]
    pub rrsets: Vec<ResourceRecordSet>,
    pub next_page_token: Option<String>,
}

/// A resource record set as sent and received on the wire
///
/// Names carry the trailing root dot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct ResourceRecordSet {
    pub name: String,
    #[serde(rename = "type")]
    pub record_type: String,
    #[serde(default)]
    pub ttl: u32,
    #[serde(default)]
    pub rrdatas: Vec<String>,
}

impl ResourceRecordSet {
    /// Convert to a domain record; non-address types yield `None`
    pub fn into_record(self) -> Option<Record> {
        let record_type = RecordType::parse(&self.record_type)?;
        Some(Record::new(&self.name, record_type, self.ttl, self.rrdatas))
    }
}

impl From<&Record> for ResourceRecordSet {
    fn from(record: &Record) -> Self {
        Self {
            name: fully_qualified(&record.name),
            record_type: record.record_type.as_str().to_string(),
            ttl: record.ttl,
            rrdatas: record.rrdatas.clone(),
        }
    }
}

/// A change request (`changes.create` body and response)
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Change {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub additions: Vec<ResourceRecordSet>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub deletions: Vec<ResourceRecordSet>,
    #[serde(default, skip_serializing)]
    pub id: Option<String>,
    #[serde(default, skip_serializing)]
    pub status: Option<String>,
}

/// Append the root dot expected by Cloud DNS
pub(crate) fn fully_qualified(name: &str) -> String {
    format!("{}.", trim_root(name))
}

// ─── Compute Engine ────────────────────────────────────────

/// `instances.list` response page
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct InstanceList {
    #[serde(default)]
    pub items: Vec<ComputeInstance>,
    pub next_page_token: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ComputeInstance {
    pub name: String,
    #[serde(default)]
    pub network_interfaces: Vec<NetworkInterface>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct NetworkInterface {
    #[serde(default)]
    pub access_configs: Vec<AccessConfig>,
    #[serde(default)]
    pub ipv6_access_configs: Vec<AccessConfig>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AccessConfig {
    #[serde(rename = "natIP")]
    pub nat_ip: Option<String>,
    pub external_ipv6: Option<String>,
}

impl From<ComputeInstance> for Instance {
    fn from(instance: ComputeInstance) -> Self {
        let interfaces = &instance.network_interfaces;
        let v4 = interfaces
            .iter()
            .flat_map(|nic| nic.access_configs.iter())
            .filter_map(|ac| ac.nat_ip.as_deref());
        let v6 = interfaces
            .iter()
            .flat_map(|nic| nic.ipv6_access_configs.iter())
            .filter_map(|ac| ac.external_ipv6.as_deref());

        let public_ips = v4
            .chain(v6)
            .filter_map(|raw| match raw.parse::<IpAddr>() {
                Ok(ip) => Some(ip),
                Err(e) => {
                    tracing::warn!(
                        "Skipping unparsable address '{}' on instance {}: {}",
                        raw,
                        instance.name,
                        e
                    );
                    None
                }
            })
            .collect();

        Instance::new(instance.name, public_ips)
    }
}
