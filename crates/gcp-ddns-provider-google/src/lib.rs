// # Google Cloud Providers
//
// This crate provides the Google implementations of the core provider
// traits:
//
// - `ComputeEngineProvider` (`ComputeProvider`): lists instances and their
//   external addresses through the Compute Engine v1 REST API
// - `CloudDnsProvider` (`DnsProvider`): zone/record CRUD through the Cloud
//   DNS v1 REST API
//
// ## Behavior
//
// - ✅ One API call per trait method (plus pagination)
// - ✅ Full error propagation (HTTP status codes mapped to core errors)
// - ✅ HTTP timeout configured (30 seconds)
// - ✅ Both A and AAAA records
// - ❌ NO retry logic, NO backoff, NO caching, NO background tasks
//
// ## Security Requirements
//
// - The credential key NEVER appears in logs or `Debug` output
// - Construction fails fast if the key is empty
//
// ## Authentication
//
// The credential key is sent as an OAuth2 bearer token. Minting that
// token (service-account JWT exchange, metadata server) happens outside
// this crate.

mod client;
pub mod compute;
pub mod dns;
mod models;

pub use compute::{COMPUTE_API_BASE, ComputeEngineProvider};
pub use dns::{CloudDnsProvider, DNS_API_BASE};

use gcp_ddns_core::{Config, Result};

/// Build both providers for one project from process configuration
///
/// Endpoint overrides in `config` are applied when present.
pub fn build_providers(
    config: &Config,
    project: &str,
    datacenter: &str,
) -> Result<(ComputeEngineProvider, CloudDnsProvider)> {
    let mut compute =
        ComputeEngineProvider::new(config.credentials.clone(), project, datacenter)?;
    if let Some(ref endpoint) = config.endpoints.compute {
        compute = compute.with_endpoint(endpoint);
    }

    let mut dns = CloudDnsProvider::new(config.credentials.clone(), project)?;
    if let Some(ref endpoint) = config.endpoints.dns {
        dns = dns.with_endpoint(endpoint);
    }

    Ok((compute, dns))
}
