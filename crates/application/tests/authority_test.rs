use addd_application::services::AuthoritySynthesizer;
use addd_domain::{DomainError, RData, Zone};
use std::sync::Arc;

mod helpers;
use helpers::MockAddressProvider;

fn synthesizer(provider: MockAddressProvider) -> AuthoritySynthesizer {
    let zone = Arc::new(Zone::with_serial("example.com", 77).unwrap());
    AuthoritySynthesizer::new(zone, Arc::new(provider))
}

#[tokio::test]
async fn test_soa_and_ns_come_from_zone() {
    let authority = synthesizer(MockAddressProvider::with_addresses(&["192.0.2.1"]));

    assert_eq!(authority.soa().name, "example.com.");
    assert_eq!(
        authority.ns().data,
        RData::NS("ns.example.com.".to_string())
    );
}

#[tokio::test]
async fn test_empty_address_set_is_an_error() {
    let authority = synthesizer(MockAddressProvider::with_addresses(&[]));

    let result = authority.nameserver_records().await;

    assert!(matches!(result, Err(DomainError::NoAdvertisableAddress)));
}

#[tokio::test]
async fn test_ipv4_records_filter_v6() {
    let authority = synthesizer(MockAddressProvider::with_addresses(&[
        "2001:db8::1",
        "192.0.2.1",
    ]));

    let records = authority.nameserver_ipv4_records().await;

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].name, "ns.example.com.");
}

#[tokio::test]
async fn test_ipv4_records_degrade_on_failure() {
    let authority = synthesizer(MockAddressProvider::failing());

    assert!(authority.nameserver_ipv4_records().await.is_empty());
}
