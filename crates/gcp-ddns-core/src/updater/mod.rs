//! Record Updater
//!
//! The RecordUpdater is responsible for:
//! - Locating the managed zone that serves a domain
//! - Locating an existing address record for the target name
//! - Replacing it (delete, then create) or creating it fresh
//!
//! ## Flow
//!
//! ```text
//!   list_zones ──► zone match? ──no──► ZoneNotFound
//!                      │
//!                     yes
//!                      ▼
//!   list_records + get_record ──► RecordLookup
//!                      │
//!        ┌─────────────┼──────────────────┐
//!      Found         Absent            Failed (logged)
//!        │             │                  │
//!     delete ──err──► DeleteFailed        │
//!        │             │                  │
//!        ▼             ▼                  ▼
//!     create        create ◄──────────────┘
//!        │             │
//!   Replaced /      Created /
//!   DeletedNotRecreated   CreateFailed
//! ```
//!
//! The provider offers no atomic upsert, so a replace is two separate
//! mutations. A failed create after a successful delete leaves the zone
//! without the record; that state is reported as
//! [`UpsertOutcome::DeletedNotRecreated`].

use crate::error::{Error, Result};
use crate::traits::{DnsProvider, Record, RecordData, RecordType, Zone, trim_root};
use std::fmt;
use std::net::IpAddr;
use tracing::{debug, error, info, warn};

/// Result of looking for an existing record
#[derive(Debug)]
pub enum RecordLookup {
    /// A matching record exists
    Found(Record),
    /// No record with the name exists
    Absent,
    /// The lookup itself failed; the record state is unknown
    Failed(Error),
}

/// Outcome of an upsert
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpsertOutcome {
    /// Record did not exist and was created
    Created {
        /// The created record
        record: Record,
    },

    /// Record existed and was replaced
    Replaced {
        /// The deleted record
        previous: Record,
        /// The created record
        record: Record,
    },

    /// No managed zone serves the requested domain
    ZoneNotFound {
        /// Requested zone domain
        zone: String,
    },

    /// Creating the record failed (no delete was performed)
    CreateFailed {
        /// Fully-qualified record name
        name: String,
        /// Provider error message
        reason: String,
    },

    /// Deleting the existing record failed; create was not attempted
    DeleteFailed {
        /// The record that could not be deleted
        previous: Record,
        /// Provider error message
        reason: String,
    },

    /// The old record was deleted but the new one could not be created
    DeletedNotRecreated {
        /// The deleted record
        previous: Record,
        /// Provider error message
        reason: String,
    },
}

impl UpsertOutcome {
    /// Whether the zone now holds the requested record
    pub fn is_success(&self) -> bool {
        matches!(
            self,
            UpsertOutcome::Created { .. } | UpsertOutcome::Replaced { .. }
        )
    }
}

impl fmt::Display for UpsertOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UpsertOutcome::Created { record } => {
                write!(f, "created {} {} -> {:?}", record.record_type, record.name, record.rrdatas)
            }
            UpsertOutcome::Replaced { previous, record } => write!(
                f,
                "replaced {} {}: {:?} -> {:?}",
                record.record_type, record.name, previous.rrdatas, record.rrdatas
            ),
            UpsertOutcome::ZoneNotFound { zone } => write!(f, "no managed zone for {}", zone),
            UpsertOutcome::CreateFailed { name, reason } => {
                write!(f, "failed to create {}: {}", name, reason)
            }
            UpsertOutcome::DeleteFailed { previous, reason } => {
                write!(f, "failed to delete {}: {}", previous.name, reason)
            }
            UpsertOutcome::DeletedNotRecreated { previous, reason } => write!(
                f,
                "deleted {} but failed to recreate it, zone has no record for it: {}",
                previous.name, reason
            ),
        }
    }
}

/// Creates or replaces address records through a DNS provider
pub struct RecordUpdater {
    provider: Box<dyn DnsProvider>,
}

impl RecordUpdater {
    /// Create an updater backed by a DNS provider
    pub fn new(provider: Box<dyn DnsProvider>) -> Self {
        Self { provider }
    }

    /// Point `record_name.zone_name` at `address`
    ///
    /// # Parameters
    ///
    /// - `zone_name`: Domain of the managed zone (e.g. "example.com")
    /// - `record_name`: Unqualified record label (e.g. "host")
    /// - `address`: New address
    /// - `ttl`: Time-to-live in seconds
    ///
    /// # Returns
    ///
    /// - `Ok(UpsertOutcome)`: What happened; see [`UpsertOutcome::is_success`]
    /// - `Err(Error)`: Listing zones failed (authentication, transport)
    pub async fn upsert_address_record(
        &self,
        zone_name: &str,
        record_name: &str,
        address: IpAddr,
        ttl: u32,
    ) -> Result<UpsertOutcome> {
        let Some(zone) = self.find_zone(zone_name).await? else {
            warn!("No managed zone found for {}", zone_name);
            return Ok(UpsertOutcome::ZoneNotFound {
                zone: zone_name.to_string(),
            });
        };

        let record_type = RecordType::for_address(&address);
        let fqdn = zone.qualify(record_name);
        let data = RecordData::single(ttl, address);

        info!(
            "Setting {} record: {} to point: {}",
            record_type, fqdn, address
        );

        let outcome = match self.lookup_record(&zone, &fqdn, record_type).await {
            RecordLookup::Found(existing) => {
                self.replace(&zone, existing, &fqdn, record_type, &data)
                    .await
            }
            RecordLookup::Absent => self.create(&zone, &fqdn, record_type, &data).await,
            RecordLookup::Failed(e) => {
                warn!(
                    "Error locating record {}: {}. Creating without replacing.",
                    fqdn, e
                );
                self.create(&zone, &fqdn, record_type, &data).await
            }
        };

        match &outcome {
            UpsertOutcome::DeletedNotRecreated { .. } => error!("Upsert incomplete: {}", outcome),
            o if o.is_success() => info!("Upsert complete: {}", outcome),
            _ => warn!("Upsert failed: {}", outcome),
        }

        Ok(outcome)
    }

    /// Find the managed zone serving `zone_name`
    ///
    /// The first zone whose domain matches wins. Trailing dots are ignored.
    pub async fn find_zone(&self, zone_name: &str) -> Result<Option<Zone>> {
        let zones = self.provider.list_zones().await?;
        let zone = zones.into_iter().find(|zone| zone.serves(zone_name));

        if let Some(ref zone) = zone {
            debug!("Matched zone {} ({})", zone.name, zone.domain);
        }

        Ok(zone)
    }

    /// Look for an existing record with the given name and type
    ///
    /// Provider errors are captured as [`RecordLookup::Failed`] rather than
    /// returned, so that a failed lookup does not block the update.
    pub async fn lookup_record(
        &self,
        zone: &Zone,
        fqdn: &str,
        record_type: RecordType,
    ) -> RecordLookup {
        let records = match self.provider.list_records(zone).await {
            Ok(records) => records,
            Err(e) => return RecordLookup::Failed(e),
        };

        let wanted = trim_root(fqdn);
        let Some(candidate) = records
            .into_iter()
            .find(|r| r.record_type == record_type && trim_root(&r.name) == wanted)
        else {
            debug!("No existing {} record for {}", record_type, fqdn);
            return RecordLookup::Absent;
        };

        match self.provider.get_record(zone, &candidate.id).await {
            Ok(record) => {
                debug!("Found existing record {} -> {:?}", record.id, record.rrdatas);
                RecordLookup::Found(record)
            }
            Err(e) => RecordLookup::Failed(e),
        }
    }

    async fn create(
        &self,
        zone: &Zone,
        fqdn: &str,
        record_type: RecordType,
        data: &RecordData,
    ) -> UpsertOutcome {
        match self
            .provider
            .create_record(zone, fqdn, record_type, data)
            .await
        {
            Ok(record) => UpsertOutcome::Created { record },
            Err(e) => UpsertOutcome::CreateFailed {
                name: fqdn.to_string(),
                reason: e.to_string(),
            },
        }
    }

    async fn replace(
        &self,
        zone: &Zone,
        existing: Record,
        fqdn: &str,
        record_type: RecordType,
        data: &RecordData,
    ) -> UpsertOutcome {
        if let Err(e) = self.provider.delete_record(zone, &existing).await {
            return UpsertOutcome::DeleteFailed {
                previous: existing,
                reason: e.to_string(),
            };
        }
        debug!("Deleted {}", existing.id);

        match self.create(zone, fqdn, record_type, data).await {
            UpsertOutcome::Created { record } => UpsertOutcome::Replaced {
                previous: existing,
                record,
            },
            UpsertOutcome::CreateFailed { reason, .. } => UpsertOutcome::DeletedNotRecreated {
                previous: existing,
                reason,
            },
            other => other,
        }
    }
}
