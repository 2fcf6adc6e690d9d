//! Test doubles and common utilities for updater contract tests
//!
//! The mock DNS provider keeps a small in-memory zone so that repeated
//! upserts observe the effects of earlier ones.

#![allow(dead_code)]

use gcp_ddns_core::error::{Error, Result};
use gcp_ddns_core::traits::{
    ComputeProvider, DnsProvider, Instance, Record, RecordData, RecordType, Zone,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Failure injection switches for [`MockDnsProvider`]
#[derive(Debug, Default, Clone, Copy)]
pub struct Failures {
    pub list_records: bool,
    pub get_record: bool,
    pub create: bool,
    pub delete: bool,
}

/// A recorded create call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateCall {
    pub zone: String,
    pub name: String,
    pub record_type: RecordType,
    pub ttl: u32,
    pub rrdatas: Vec<String>,
}

/// A mock DnsProvider that tracks calls and keeps zone state
pub struct MockDnsProvider {
    zones: Vec<Zone>,
    records: Arc<Mutex<Vec<Record>>>,
    failures: Failures,
    list_zones_call_count: Arc<AtomicUsize>,
    create_calls: Arc<Mutex<Vec<CreateCall>>>,
    delete_calls: Arc<Mutex<Vec<Record>>>,
    /// Ordered log of mutating calls ("delete:<id>", "create:<id>")
    call_log: Arc<Mutex<Vec<String>>>,
}

impl MockDnsProvider {
    /// Provider with the given zones and no records
    pub fn new(zones: Vec<Zone>) -> Self {
        Self {
            zones,
            records: Arc::new(Mutex::new(Vec::new())),
            failures: Failures::default(),
            list_zones_call_count: Arc::new(AtomicUsize::new(0)),
            create_calls: Arc::new(Mutex::new(Vec::new())),
            delete_calls: Arc::new(Mutex::new(Vec::new())),
            call_log: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Seed an existing record
    pub fn with_record(self, record: Record) -> Self {
        self.records.lock().unwrap().push(record);
        self
    }

    /// Inject failures
    pub fn with_failures(mut self, failures: Failures) -> Self {
        self.failures = failures;
        self
    }

    /// Create a new MockDnsProvider that shares state with an existing one
    pub fn sharing_state_with(other: &Self) -> Self {
        Self {
            zones: other.zones.clone(),
            records: Arc::clone(&other.records),
            failures: other.failures,
            list_zones_call_count: Arc::clone(&other.list_zones_call_count),
            create_calls: Arc::clone(&other.create_calls),
            delete_calls: Arc::clone(&other.delete_calls),
            call_log: Arc::clone(&other.call_log),
        }
    }

    pub fn list_zones_call_count(&self) -> usize {
        self.list_zones_call_count.load(Ordering::SeqCst)
    }

    pub fn create_calls(&self) -> Vec<CreateCall> {
        self.create_calls.lock().unwrap().clone()
    }

    pub fn delete_calls(&self) -> Vec<Record> {
        self.delete_calls.lock().unwrap().clone()
    }

    pub fn call_log(&self) -> Vec<String> {
        self.call_log.lock().unwrap().clone()
    }

    /// Current records held by the mock zone state
    pub fn records(&self) -> Vec<Record> {
        self.records.lock().unwrap().clone()
    }

    /// Records of the given name currently held
    pub fn records_named(&self, name: &str) -> Vec<Record> {
        self.records()
            .into_iter()
            .filter(|r| r.name == name)
            .collect()
    }
}

#[async_trait::async_trait]
impl DnsProvider for MockDnsProvider {
    async fn list_zones(&self) -> Result<Vec<Zone>> {
        self.list_zones_call_count.fetch_add(1, Ordering::SeqCst);
        Ok(self.zones.clone())
    }

    async fn list_records(&self, _zone: &Zone) -> Result<Vec<Record>> {
        if self.failures.list_records {
            return Err(Error::provider("mock", "list_records unavailable"));
        }
        Ok(self.records())
    }

    async fn get_record(&self, _zone: &Zone, record_id: &str) -> Result<Record> {
        if self.failures.get_record {
            return Err(Error::provider("mock", "get_record unavailable"));
        }
        self.records()
            .into_iter()
            .find(|r| r.id == record_id)
            .ok_or_else(|| Error::not_found(record_id.to_string()))
    }

    async fn create_record(
        &self,
        zone: &Zone,
        name: &str,
        record_type: RecordType,
        data: &RecordData,
    ) -> Result<Record> {
        self.create_calls.lock().unwrap().push(CreateCall {
            zone: zone.domain.clone(),
            name: name.to_string(),
            record_type,
            ttl: data.ttl,
            rrdatas: data.rrdatas.clone(),
        });

        let record = Record::new(name, record_type, data.ttl, data.rrdatas.clone());
        self.call_log
            .lock()
            .unwrap()
            .push(format!("create:{}", record.id));

        if self.failures.create {
            return Err(Error::provider("mock", "create rejected"));
        }

        let mut records = self.records.lock().unwrap();
        if records.iter().any(|r| r.id == record.id) {
            return Err(Error::provider("mock", "record set already exists"));
        }
        records.push(record.clone());
        Ok(record)
    }

    async fn delete_record(&self, _zone: &Zone, record: &Record) -> Result<()> {
        self.delete_calls.lock().unwrap().push(record.clone());
        self.call_log
            .lock()
            .unwrap()
            .push(format!("delete:{}", record.id));

        if self.failures.delete {
            return Err(Error::provider("mock", "delete rejected"));
        }

        self.records.lock().unwrap().retain(|r| r.id != record.id);
        Ok(())
    }

    fn provider_name(&self) -> &'static str {
        "mock"
    }
}

/// A compute provider returning a fixed instance list
pub struct StaticComputeProvider {
    instances: Vec<Instance>,
    list_call_count: Arc<AtomicUsize>,
}

impl StaticComputeProvider {
    pub fn new(instances: Vec<Instance>) -> Self {
        Self {
            instances,
            list_call_count: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn list_call_count(&self) -> usize {
        self.list_call_count.load(Ordering::SeqCst)
    }

    pub fn sharing_counters_with(other: &Self) -> Self {
        Self {
            instances: other.instances.clone(),
            list_call_count: Arc::clone(&other.list_call_count),
        }
    }
}

#[async_trait::async_trait]
impl ComputeProvider for StaticComputeProvider {
    async fn list_instances(&self) -> Result<Vec<Instance>> {
        self.list_call_count.fetch_add(1, Ordering::SeqCst);
        Ok(self.instances.clone())
    }

    fn provider_name(&self) -> &'static str {
        "static"
    }
}

/// A compute provider whose credentials are rejected
pub struct UnauthorizedComputeProvider;

#[async_trait::async_trait]
impl ComputeProvider for UnauthorizedComputeProvider {
    async fn list_instances(&self) -> Result<Vec<Instance>> {
        Err(Error::auth("invalid credentials"))
    }

    fn provider_name(&self) -> &'static str {
        "unauthorized"
    }
}

/// The `example.com` zone used throughout the tests
pub fn example_zone() -> Zone {
    Zone::new("1001", "example-com", "example.com.")
}

/// An existing A record for `host.example.com`
pub fn existing_host_record(address: &str) -> Record {
    Record::new(
        "host.example.com",
        RecordType::A,
        300,
        vec![address.to_string()],
    )
}
