use resilient_dns_domain::{DnsRequest, RecordType};
use std::net::{IpAddr, Ipv4Addr};

#[test]
fn test_record_type_codes() {
    assert_eq!(RecordType::from_u16(1), RecordType::A);
    assert_eq!(RecordType::from_u16(15), RecordType::MX);
    assert_eq!(RecordType::from_u16(28), RecordType::AAAA);
    assert_eq!(RecordType::from_u16(16), RecordType::Other(16));
    assert_eq!(RecordType::Other(16).to_u16(), 16);
}

#[test]
fn test_only_aaaa_is_suppressed() {
    assert!(RecordType::AAAA.is_suppressed());
    assert!(!RecordType::A.is_suppressed());
    assert!(!RecordType::MX.is_suppressed());
    assert!(!RecordType::Other(16).is_suppressed());
}

#[test]
fn test_record_type_display() {
    assert_eq!(RecordType::MX.to_string(), "MX");
    assert_eq!(RecordType::Other(99).to_string(), "TYPE99");
}

#[test]
fn test_request_strips_trailing_dot() {
    let request = DnsRequest::new(
        "Example.com.",
        RecordType::A,
        IpAddr::V4(Ipv4Addr::LOCALHOST),
    );
    assert_eq!(request.domain.as_ref(), "Example.com");
}
