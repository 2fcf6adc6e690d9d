// # gcp-ddns-core
//
// Core library for the single-instance DDNS updater.
//
// ## Architecture Overview
//
// This library provides the core functionality for one DDNS update run:
// - **ComputeProvider**: Trait for listing compute instances and their addresses
// - **DnsProvider**: Trait for zone/record CRUD against a managed DNS service
// - **InstanceLocator**: Resolves an instance name to its public address
// - **RecordUpdater**: Creates or replaces the address record for a name
//
// ## Design Principles
//
// 1. **Separation of Concerns**: Core logic is separate from provider implementations
// 2. **Explicit Configuration**: Credentials and endpoints are passed into constructors
// 3. **Explicit Outcomes**: Lookup failures and partial upserts are distinct values
// 4. **Library-First**: The binary is a thin wrapper around this crate

pub mod config;
pub mod error;
pub mod locator;
pub mod traits;
pub mod updater;

// Re-export core types for convenience
pub use config::{Config, Credentials, Endpoints, Invocation};
pub use error::{Error, Result};
pub use locator::InstanceLocator;
pub use traits::{ComputeProvider, DnsProvider};
pub use updater::{RecordLookup, RecordUpdater, UpsertOutcome};
