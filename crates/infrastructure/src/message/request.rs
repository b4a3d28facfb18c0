use super::record_type_map::RecordTypeMapper;
use hickory_proto::op::{Message, MessageType, OpCode, Query};
use hickory_proto::rr::{DNSClass, Name};
use rule_switcher_domain::{DnsQuery, DomainError, QueryContext, RecordType};
use std::net::IpAddr;
use std::str::FromStr;

/// Build a recursive query message with a single question.
pub fn build_query(id: u16, domain: &str, record_type: RecordType) -> Result<Message, DomainError> {
    let name = Name::from_str(domain).map_err(|e| {
        DomainError::InvalidDomainName(format!("Invalid domain '{}': {}", domain, e))
    })?;

    let mut query = Query::new();
    query.set_name(name);
    query.set_query_type(RecordTypeMapper::to_hickory(record_type));
    query.set_query_class(DNSClass::IN);

    let mut message = Message::new(id, MessageType::Query, OpCode::Query);
    message.set_recursion_desired(true);
    message.add_query(query);
    Ok(message)
}

/// Build the context the rule engine evaluates from an inbound request.
///
/// Only the first question is routed.
pub fn context_from_request(
    request: &Message,
    client_ip: IpAddr,
) -> Result<QueryContext, DomainError> {
    let query = request
        .queries()
        .first()
        .ok_or_else(|| DomainError::InvalidDnsMessage("request has no question".to_string()))?;

    let record_type = RecordTypeMapper::from_hickory(query.query_type()).ok_or_else(|| {
        DomainError::InvalidDnsMessage(format!(
            "unsupported query type {:?}",
            query.query_type()
        ))
    })?;

    let domain = query.name().to_utf8();
    Ok(QueryContext::new(DnsQuery::new(domain, record_type), client_ip).with_id(request.id()))
}
