//! Instance Locator
//!
//! Resolves a compute instance name to its current public address.
//!
//! The locator lists every instance the compute provider can see and
//! filters by exact name. Cardinality is checked explicitly:
//!
//! - no match → [`Error::InstanceNotFound`]
//! - several matches → [`Error::AmbiguousInstance`]
//! - one match without external address → [`Error::NoPublicAddress`]
//!
//! Provider errors (transport, authentication) propagate unchanged.

use crate::error::{Error, Result};
use crate::traits::ComputeProvider;
use std::net::IpAddr;
use tracing::{debug, info};

/// Resolves instance names to public addresses
pub struct InstanceLocator {
    provider: Box<dyn ComputeProvider>,
}

impl InstanceLocator {
    /// Create a locator backed by a compute provider
    pub fn new(provider: Box<dyn ComputeProvider>) -> Self {
        Self { provider }
    }

    /// Look up the public address of `instance_name`
    ///
    /// When the instance has several external addresses the first one is
    /// returned (IPv4 before IPv6).
    pub async fn locate_public_address(&self, instance_name: &str) -> Result<IpAddr> {
        let instances = self.provider.list_instances().await?;
        debug!(
            "{} listed {} instance(s)",
            self.provider.provider_name(),
            instances.len()
        );

        let mut matches = instances
            .into_iter()
            .filter(|instance| instance.name == instance_name);

        let instance = matches
            .next()
            .ok_or_else(|| Error::InstanceNotFound(instance_name.to_string()))?;

        let extra = matches.count();
        if extra > 0 {
            return Err(Error::AmbiguousInstance {
                name: instance_name.to_string(),
                count: extra + 1,
            });
        }

        let address = instance
            .public_ips
            .first()
            .copied()
            .ok_or_else(|| Error::NoPublicAddress(instance_name.to_string()))?;

        if instance.public_ips.len() > 1 {
            debug!(
                "Instance {} has {} public addresses, using {}",
                instance_name,
                instance.public_ips.len(),
                address
            );
        }

        info!("Instance {} has public address {}", instance_name, address);
        Ok(address)
    }
}
