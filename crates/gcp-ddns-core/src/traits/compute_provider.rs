// # Compute Provider Trait
//
// Defines the interface for listing compute instances and their external
// addresses.
//
// ## Implementations
//
// - Google Compute Engine: `gcp-ddns-provider-google` crate
//
// ## Usage
//
// ```rust,ignore
// use gcp_ddns_core::traits::ComputeProvider;
//
// #[tokio::main]
// async fn main() -> anyhow::Result<()> {
//     let provider = /* ComputeProvider implementation */;
//
//     for instance in provider.list_instances().await? {
//         println!("{}: {:?}", instance.name, instance.public_ips);
//     }
//
//     Ok(())
// }
// ```

use async_trait::async_trait;
use std::net::IpAddr;

/// A compute instance as seen by the provider
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instance {
    /// Instance name
    pub name: String,
    /// External addresses, IPv4 first
    pub public_ips: Vec<IpAddr>,
}

impl Instance {
    /// Create a new instance description
    pub fn new(name: impl Into<String>, public_ips: Vec<IpAddr>) -> Self {
        Self {
            name: name.into(),
            public_ips,
        }
    }
}

/// Trait for compute provider implementations
///
/// A provider is bound to one project and one datacenter/region at
/// construction time.
///
/// # Trust Level: Untrusted
///
/// Same rules as `DnsProvider`: single-shot calls, no retries, no
/// caching, no background tasks. Pagination is exhausted inside
/// `list_instances`.
#[async_trait]
pub trait ComputeProvider: Send + Sync {
    /// List every instance visible to the configured credentials
    async fn list_instances(&self) -> Result<Vec<Instance>, crate::Error>;

    /// Get the provider name (for logging/debugging)
    fn provider_name(&self) -> &'static str;
}
