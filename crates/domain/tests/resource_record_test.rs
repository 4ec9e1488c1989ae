use addd_domain::{DnsClass, DomainError, RData, ResourceRecord, SoaData};
use std::net::Ipv6Addr;

#[test]
fn test_parse_aaaa_line() {
    let rr = ResourceRecord::parse("Host.Example.com. 60 IN AAAA 2001:db8::1").unwrap();

    assert_eq!(rr.name, "host.example.com.");
    assert_eq!(rr.ttl, 60);
    assert_eq!(rr.class, DnsClass::IN);
    assert_eq!(rr.data, RData::AAAA("2001:db8::1".parse::<Ipv6Addr>().unwrap()));
}

#[test]
fn test_parse_soa_line() {
    let rr = ResourceRecord::parse(
        "example.com. 3600 IN SOA ns.example.com. admin.example.com. 9 3600 1800 604800 604800",
    )
    .unwrap();

    assert_eq!(
        rr.data,
        RData::SOA(SoaData {
            mname: "ns.example.com.".to_string(),
            rname: "admin.example.com.".to_string(),
            serial: 9,
            refresh: 3600,
            retry: 1800,
            expire: 604800,
            minimum: 604800,
        })
    );
}

#[test]
fn test_display_matches_parse_input() {
    let line = "ns.example.com. 604800 IN A 192.0.2.1";
    let rr = ResourceRecord::parse(line).unwrap();

    assert_eq!(rr.to_string(), line);
}

#[test]
fn test_parse_failures_are_serialization_errors() {
    let bad_lines = [
        "host.example.com. 60 IN A",
        "host.example.com 60 IN A 10.0.0.1",
        "host.example.com. sixty IN A 10.0.0.1",
        "host.example.com. 60 CH A 10.0.0.1",
        "host.example.com. 60 IN A 2001:db8::1",
        "host.example.com. 60 IN TXT hello",
        "example.com. 60 IN SOA ns.example.com. admin.example.com. 1 2 3",
    ];

    for line in bad_lines {
        assert!(
            matches!(
                ResourceRecord::parse(line),
                Err(DomainError::SerializationError(_))
            ),
            "{} should fail",
            line
        );
    }
}
