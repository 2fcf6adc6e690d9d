//! Contract Test: Record Upsert
//!
//! Verifies the delete-then-create upsert performed by `RecordUpdater`.
//!
//! Constraints verified:
//! - An unknown zone produces no mutation at all
//! - A fresh name is created exactly once and never deleted
//! - An existing name is deleted exactly once, then recreated with the new data
//! - A failed delete short-circuits the create
//! - A failed create after a successful delete is reported distinctly
//! - A failed lookup falls through to a plain create

mod common;

use common::*;
use gcp_ddns_core::traits::RecordType;
use gcp_ddns_core::{RecordLookup, RecordUpdater, UpsertOutcome};
use std::net::IpAddr;
use tokio_test::assert_ok;

fn updater_for(provider: &MockDnsProvider) -> RecordUpdater {
    RecordUpdater::new(Box::new(MockDnsProvider::sharing_state_with(provider)))
}

fn ip(s: &str) -> IpAddr {
    s.parse().expect("valid test address")
}

#[tokio::test]
async fn unknown_zone_performs_no_mutation() {
    let provider = MockDnsProvider::new(vec![example_zone()]);
    let updater = updater_for(&provider);

    let outcome = assert_ok!(
        updater
            .upsert_address_record("example.org", "host", ip("1.2.3.4"), 3600)
            .await
    );

    assert_eq!(
        outcome,
        UpsertOutcome::ZoneNotFound {
            zone: "example.org".to_string()
        }
    );
    assert!(!outcome.is_success());
    assert!(provider.create_calls().is_empty());
    assert!(provider.delete_calls().is_empty());
}

#[tokio::test]
async fn new_record_is_created_once_and_never_deleted() {
    let provider = MockDnsProvider::new(vec![example_zone()]);
    let updater = updater_for(&provider);

    let outcome = updater
        .upsert_address_record("example.com", "host", ip("1.2.3.4"), 3600)
        .await
        .unwrap();

    assert!(outcome.is_success());
    assert!(matches!(outcome, UpsertOutcome::Created { .. }));
    assert!(provider.delete_calls().is_empty());
    assert_eq!(
        provider.create_calls(),
        vec![CreateCall {
            zone: "example.com".to_string(),
            name: "host.example.com".to_string(),
            record_type: RecordType::A,
            ttl: 3600,
            rrdatas: vec!["1.2.3.4".to_string()],
        }]
    );
}

#[tokio::test]
async fn zone_name_with_trailing_dot_matches() {
    let provider = MockDnsProvider::new(vec![example_zone()]);
    let updater = updater_for(&provider);

    let outcome = updater
        .upsert_address_record("example.com.", "host", ip("1.2.3.4"), 60)
        .await
        .unwrap();

    assert!(outcome.is_success());
    assert_eq!(provider.create_calls()[0].name, "host.example.com");
}

#[tokio::test]
async fn existing_record_is_deleted_then_recreated() {
    let previous = existing_host_record("5.6.7.8");
    let provider = MockDnsProvider::new(vec![example_zone()]).with_record(previous.clone());
    let updater = updater_for(&provider);

    let outcome = updater
        .upsert_address_record("example.com", "host", ip("1.2.3.4"), 3600)
        .await
        .unwrap();

    assert!(outcome.is_success());
    match outcome {
        UpsertOutcome::Replaced {
            previous: deleted,
            record,
        } => {
            assert_eq!(deleted, previous);
            assert_eq!(record.rrdatas, vec!["1.2.3.4".to_string()]);
            assert_eq!(record.ttl, 3600);
        }
        other => panic!("expected Replaced, got {:?}", other),
    }

    assert_eq!(provider.delete_calls(), vec![previous]);
    assert_eq!(provider.create_calls().len(), 1);
    assert_eq!(
        provider.call_log(),
        vec![
            "delete:A:host.example.com".to_string(),
            "create:A:host.example.com".to_string(),
        ]
    );

    let remaining = provider.records_named("host.example.com");
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].rrdatas, vec!["1.2.3.4".to_string()]);
}

#[tokio::test]
async fn failed_delete_skips_create() {
    let previous = existing_host_record("5.6.7.8");
    let provider = MockDnsProvider::new(vec![example_zone()])
        .with_record(previous.clone())
        .with_failures(Failures {
            delete: true,
            ..Failures::default()
        });
    let updater = updater_for(&provider);

    let outcome = updater
        .upsert_address_record("example.com", "host", ip("1.2.3.4"), 3600)
        .await
        .unwrap();

    assert!(!outcome.is_success());
    assert!(matches!(outcome, UpsertOutcome::DeleteFailed { .. }));
    assert_eq!(provider.delete_calls().len(), 1);
    assert!(provider.create_calls().is_empty());
    assert_eq!(provider.records_named("host.example.com"), vec![previous]);
}

#[tokio::test]
async fn failed_create_after_delete_reports_partial_state() {
    let previous = existing_host_record("5.6.7.8");
    let provider = MockDnsProvider::new(vec![example_zone()])
        .with_record(previous.clone())
        .with_failures(Failures {
            create: true,
            ..Failures::default()
        });
    let updater = updater_for(&provider);

    let outcome = updater
        .upsert_address_record("example.com", "host", ip("1.2.3.4"), 3600)
        .await
        .unwrap();

    assert!(!outcome.is_success());
    match outcome {
        UpsertOutcome::DeletedNotRecreated { previous: p, .. } => assert_eq!(p, previous),
        other => panic!("expected DeletedNotRecreated, got {:?}", other),
    }
    assert!(provider.records_named("host.example.com").is_empty());
}

#[tokio::test]
async fn failed_create_without_existing_record() {
    let provider = MockDnsProvider::new(vec![example_zone()]).with_failures(Failures {
        create: true,
        ..Failures::default()
    });
    let updater = updater_for(&provider);

    let outcome = updater
        .upsert_address_record("example.com", "host", ip("1.2.3.4"), 3600)
        .await
        .unwrap();

    assert!(matches!(
        outcome,
        UpsertOutcome::CreateFailed { ref name, .. } if name == "host.example.com"
    ));
    assert!(provider.delete_calls().is_empty());
}

#[tokio::test]
async fn lookup_failure_falls_through_to_create() {
    let provider = MockDnsProvider::new(vec![example_zone()]).with_failures(Failures {
        list_records: true,
        ..Failures::default()
    });
    let updater = updater_for(&provider);

    let zone = example_zone();
    let lookup = updater
        .lookup_record(&zone, "host.example.com", RecordType::A)
        .await;
    assert!(matches!(lookup, RecordLookup::Failed(_)));

    let outcome = updater
        .upsert_address_record("example.com", "host", ip("1.2.3.4"), 3600)
        .await
        .unwrap();

    assert!(outcome.is_success());
    assert!(provider.delete_calls().is_empty());
    assert_eq!(provider.create_calls().len(), 1);
}

#[tokio::test]
async fn get_record_failure_is_not_conflated_with_absent() {
    let provider = MockDnsProvider::new(vec![example_zone()])
        .with_record(existing_host_record("5.6.7.8"))
        .with_failures(Failures {
            get_record: true,
            ..Failures::default()
        });
    let updater = updater_for(&provider);

    let zone = example_zone();
    let lookup = updater
        .lookup_record(&zone, "host.example.com", RecordType::A)
        .await;
    assert!(matches!(lookup, RecordLookup::Failed(_)));

    let absent = updater
        .lookup_record(&zone, "other.example.com", RecordType::A)
        .await;
    assert!(matches!(absent, RecordLookup::Absent));
}

#[tokio::test]
async fn record_of_other_type_is_ignored() {
    // An AAAA record with the same name must not be replaced by an A update
    let aaaa = gcp_ddns_core::traits::Record::new(
        "host.example.com",
        RecordType::Aaaa,
        300,
        vec!["2001:db8::1".to_string()],
    );
    let provider = MockDnsProvider::new(vec![example_zone()]).with_record(aaaa.clone());
    let updater = updater_for(&provider);

    let outcome = updater
        .upsert_address_record("example.com", "host", ip("1.2.3.4"), 3600)
        .await
        .unwrap();

    assert!(matches!(outcome, UpsertOutcome::Created { .. }));
    assert!(provider.delete_calls().is_empty());
    assert!(provider.records().contains(&aaaa));
}

#[tokio::test]
async fn ipv6_address_uses_aaaa_record() {
    let provider = MockDnsProvider::new(vec![example_zone()]);
    let updater = updater_for(&provider);

    let outcome = updater
        .upsert_address_record("example.com", "host", ip("2001:db8::42"), 300)
        .await
        .unwrap();

    assert!(outcome.is_success());
    let calls = provider.create_calls();
    assert_eq!(calls[0].record_type, RecordType::Aaaa);
    assert_eq!(calls[0].rrdatas, vec!["2001:db8::42".to_string()]);
}
