//! Google Compute Engine provider
//!
//! Lists the instances of one project/zone through the Compute Engine v1
//! REST API.
//!
//! ```http
//! GET /compute/v1/projects/:project/zones/:zone/instances[?pageToken=...]
//! Authorization: Bearer <key>
//! ```

use crate::client::ApiClient;
use crate::models::InstanceList;
use async_trait::async_trait;
use gcp_ddns_core::traits::{ComputeProvider, Instance};
use gcp_ddns_core::{Credentials, Error, Result};

/// Compute Engine API base URL
pub const COMPUTE_API_BASE: &str = "https://compute.googleapis.com";

/// Compute Engine provider bound to one project and datacenter
#[derive(Debug)]
pub struct ComputeEngineProvider {
    client: ApiClient,
    project: String,
    datacenter: String,
}

impl ComputeEngineProvider {
    /// Create a new Compute Engine provider
    ///
    /// # Parameters
    ///
    /// - `credentials`: Credential pair; the key is used as bearer token
    /// - `project`: Project identifier
    /// - `datacenter`: Compute zone (e.g. "us-central1-a")
    pub fn new(
        credentials: Credentials,
        project: impl Into<String>,
        datacenter: impl Into<String>,
    ) -> Result<Self> {
        let project = project.into();
        let datacenter = datacenter.into();
        if project.is_empty() || datacenter.is_empty() {
            return Err(Error::config(
                "Compute Engine provider needs a project and a datacenter",
            ));
        }

        Ok(Self {
            client: ApiClient::new("gce", COMPUTE_API_BASE, credentials)?,
            project,
            datacenter,
        })
    }

    /// Point the provider at another API endpoint (emulators, tests)
    pub fn with_endpoint(mut self, base_url: &str) -> Self {
        self.client.set_base_url(base_url);
        self
    }

    fn instances_path(&self) -> String {
        format!(
            "/compute/v1/projects/{}/zones/{}/instances",
            self.project, self.datacenter
        )
    }
}

#[async_trait]
impl ComputeProvider for ComputeEngineProvider {
    async fn list_instances(&self) -> Result<Vec<Instance>> {
        tracing::debug!(
            "Listing instances in {}/{} as {} via {}",
            self.project,
            self.datacenter,
            self.client.user_id(),
            self.client.base_url()
        );

        let instances = self
            .client
            .get_all_pages(
                &self.instances_path(),
                &[],
                "list instances",
                |page: InstanceList| (page.items, page.next_page_token),
            )
            .await?;

        Ok(instances.into_iter().map(Instance::from).collect())
    }

    fn provider_name(&self) -> &'static str {
        "gce"
    }
}
