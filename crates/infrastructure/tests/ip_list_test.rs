use rule_switcher_application::ports::IpMatcherBuilder;
use rule_switcher_domain::{DnsResponse, DomainError, RecordType};
use rule_switcher_infrastructure::matchers::{IpList, IpListBuilder};
use std::net::IpAddr;

mod helpers;
use helpers::{query, query_with_answer};

fn ip(s: &str) -> IpAddr {
    s.parse().unwrap()
}

#[test]
fn test_cidr_and_bare_addresses() {
    let list = IpList::parse("10.0.0.0/8\n192.0.2.7\n2001:db8::/32").unwrap();

    assert_eq!(list.len(), 3);
    assert!(list.contains(ip("10.20.30.40")));
    assert!(list.contains(ip("192.0.2.7")));
    assert!(!list.contains(ip("192.0.2.8")));
    assert!(list.contains(ip("2001:db8::1")));
}

#[test]
fn test_invalid_entry_rejected() {
    let err = IpList::parse("10.0.0.0/8 not-an-ip").err().unwrap();
    assert!(matches!(err, DomainError::InvalidIpRange(_)));

    let err = IpList::parse("10.0.0.0/40").err().unwrap();
    assert!(matches!(err, DomainError::InvalidIpRange(_)));
}

#[test]
fn test_empty_list_rejected() {
    assert!(IpList::parse("  \n# only a comment\n").is_err());
}

#[tokio::test]
async fn test_matches_any_response_address() {
    let matcher = IpListBuilder.build("10.0.0.0/8").unwrap();

    let ctx = query_with_answer("example.com", &["203.0.113.1", "10.1.1.1"]);
    assert!(matcher.matches(&ctx).await.unwrap());

    let ctx = query_with_answer("example.com", &["203.0.113.1"]);
    assert!(!matcher.matches(&ctx).await.unwrap());
}

#[tokio::test]
async fn test_no_response_never_matches() {
    let matcher = IpListBuilder.build("0.0.0.0/0").unwrap();

    let ctx = query("example.com", RecordType::A);
    assert!(!matcher.matches(&ctx).await.unwrap());

    let ctx = query("example.com", RecordType::A).with_response(DnsResponse::nxdomain());
    assert!(!matcher.matches(&ctx).await.unwrap());
}
