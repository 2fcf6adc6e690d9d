//! Configuration types for the DDNS updater
//!
//! Configuration is loaded once at process start and passed explicitly
//! into provider constructors. Nothing here is global or mutable.
//!
//! ## Environment
//!
//! - `GCP_DDNS_CREDENTIALS_FILE`: JSON file `{"user_id": "...", "key": "..."}`
//! - `GCP_DDNS_USER_ID` / `GCP_DDNS_KEY`: used when no credentials file is set
//! - `GCP_DDNS_COMPUTE_ENDPOINT`: optional Compute Engine API base URL
//! - `GCP_DDNS_DNS_ENDPOINT`: optional Cloud DNS API base URL

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// Environment variable naming a JSON credentials file
pub const ENV_CREDENTIALS_FILE: &str = "GCP_DDNS_CREDENTIALS_FILE";
/// Environment variable holding the credential identity
pub const ENV_USER_ID: &str = "GCP_DDNS_USER_ID";
/// Environment variable holding the credential key
pub const ENV_KEY: &str = "GCP_DDNS_KEY";
/// Environment variable overriding the Compute Engine endpoint
pub const ENV_COMPUTE_ENDPOINT: &str = "GCP_DDNS_COMPUTE_ENDPOINT";
/// Environment variable overriding the Cloud DNS endpoint
pub const ENV_DNS_ENDPOINT: &str = "GCP_DDNS_DNS_ENDPOINT";

/// Credential pair used against both providers
///
/// `user_id` identifies the service account and is safe to log.
/// `key` is sent as a bearer token and is never logged.
#[derive(Clone, Serialize, Deserialize)]
pub struct Credentials {
    /// Service-account identity
    pub user_id: String,
    /// Secret key (OAuth2 access token)
    pub key: String,
}

// Custom Debug implementation that hides the key
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("user_id", &self.user_id)
            .field("key", &"<REDACTED>")
            .finish()
    }
}

impl Credentials {
    /// Create a new credential pair
    pub fn new(user_id: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            key: key.into(),
        }
    }

    /// Load credentials from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, crate::Error> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| {
            crate::Error::config(format!(
                "Failed to read credentials file {}: {}",
                path.display(),
                e
            ))
        })?;
        let credentials: Credentials = serde_json::from_str(&raw)?;
        credentials.validate()?;
        Ok(credentials)
    }

    /// Validate the credential pair
    pub fn validate(&self) -> Result<(), crate::Error> {
        if self.user_id.trim().is_empty() {
            return Err(crate::Error::config("Credential user id cannot be empty"));
        }

        if self.key.trim().is_empty() {
            return Err(crate::Error::config("Credential key cannot be empty"));
        }

        // Check for obvious placeholder keys (common mistake)
        let key_lower = self.key.to_lowercase();
        if key_lower.contains("your_key") || key_lower.contains("replace_me") || key_lower == "changeme"
        {
            return Err(crate::Error::config(
                "Credential key appears to be a placeholder. Use an actual access token.",
            ));
        }

        Ok(())
    }
}

/// Optional API endpoint overrides (emulators, tests)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Endpoints {
    /// Compute Engine API base URL
    pub compute: Option<String>,
    /// Cloud DNS API base URL
    pub dns: Option<String>,
}

impl Endpoints {
    /// Validate endpoint URL schemes
    pub fn validate(&self) -> Result<(), crate::Error> {
        for (var, url) in [(ENV_COMPUTE_ENDPOINT, &self.compute), (ENV_DNS_ENDPOINT, &self.dns)] {
            if let Some(url) = url
                && !url.starts_with("https://")
                && !url.starts_with("http://")
            {
                return Err(crate::Error::config(format!(
                    "{} must use HTTP or HTTPS scheme. Got: {}",
                    var, url
                )));
            }
        }
        Ok(())
    }
}

/// Process-wide configuration, loaded once
#[derive(Debug, Clone)]
pub struct Config {
    /// Credential pair
    pub credentials: Credentials,
    /// Endpoint overrides
    pub endpoints: Endpoints,
}

impl Config {
    /// Load configuration from the process environment
    pub fn from_env() -> Result<Self, crate::Error> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    ///
    /// A credentials file takes precedence over the individual variables.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, crate::Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let credentials = match non_empty(ENV_CREDENTIALS_FILE) {
            Some(path) => Credentials::from_file(path)?,
            None => {
                let user_id = non_empty(ENV_USER_ID).ok_or_else(|| {
                    crate::Error::config(format!(
                        "{} or {} is required",
                        ENV_CREDENTIALS_FILE, ENV_USER_ID
                    ))
                })?;
                let key = non_empty(ENV_KEY).ok_or_else(|| {
                    crate::Error::config(format!(
                        "{} or {} is required",
                        ENV_CREDENTIALS_FILE, ENV_KEY
                    ))
                })?;
                let credentials = Credentials::new(user_id, key);
                credentials.validate()?;
                credentials
            }
        };

        let endpoints = Endpoints {
            compute: non_empty(ENV_COMPUTE_ENDPOINT),
            dns: non_empty(ENV_DNS_ENDPOINT),
        };
        endpoints.validate()?;

        Ok(Self {
            credentials,
            endpoints,
        })
    }
}

/// Parameters of a single update run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    /// Compute/DNS project identifier
    pub project: String,
    /// Record time-to-live, seconds
    pub ttl: u32,
    /// Unqualified record name
    pub record: String,
    /// DNS zone domain name
    pub zone: String,
    /// Compute instance name
    pub instance: String,
    /// Compute datacenter/region
    pub datacenter: String,
}

impl Invocation {
    /// Validate that every parameter is present
    ///
    /// Only presence is checked, not format.
    pub fn validate(&self) -> Result<(), crate::Error> {
        let fields = [
            ("project", &self.project),
            ("record", &self.record),
            ("zone", &self.zone),
            ("instance", &self.instance),
            ("datacenter", &self.datacenter),
        ];
        for (name, value) in fields {
            if value.trim().is_empty() {
                return Err(crate::Error::invalid_input(format!(
                    "--{} cannot be empty",
                    name
                )));
            }
        }
        Ok(())
    }
}
