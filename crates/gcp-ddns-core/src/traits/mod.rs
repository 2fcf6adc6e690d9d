//! Core traits for the DDNS updater
//!
//! This module defines the abstract interfaces that provider crates implement.
//!
//! - [`ComputeProvider`]: List compute instances and their public addresses
//! - [`DnsProvider`]: Read and mutate address records in managed zones

pub mod compute_provider;
pub mod dns_provider;

pub use compute_provider::{ComputeProvider, Instance};
pub use dns_provider::{DnsProvider, Record, RecordData, RecordType, Zone, trim_root};
