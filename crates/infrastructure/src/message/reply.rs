use hickory_proto::op::{Message, MessageType, ResponseCode};
use hickory_proto::rr::rdata::{A, AAAA};
use hickory_proto::rr::{Name, RData, Record};
use rule_switcher_domain::{DnsResponse, QueryContext, ResponseStatus};
use std::net::IpAddr;
use tracing::debug;

fn status_from_code(code: ResponseCode) -> ResponseStatus {
    match code {
        ResponseCode::NoError => ResponseStatus::NoError,
        ResponseCode::NXDomain => ResponseStatus::NxDomain,
        ResponseCode::Refused => ResponseStatus::Refused,
        _ => ResponseStatus::ServFail,
    }
}

fn code_from_status(status: ResponseStatus) -> ResponseCode {
    match status {
        ResponseStatus::NoError => ResponseCode::NoError,
        ResponseStatus::NxDomain => ResponseCode::NXDomain,
        ResponseStatus::ServFail => ResponseCode::ServFail,
        ResponseStatus::Refused => ResponseCode::Refused,
    }
}

/// Extract what the response-IP matchers look at from an upstream reply.
pub fn response_from_upstream(upstream: &Message) -> DnsResponse {
    let mut addresses = Vec::new();
    let mut min_ttl: Option<u32> = None;

    for record in upstream.answers() {
        let ip = match record.data() {
            RData::A(a) => IpAddr::V4(a.0),
            RData::AAAA(aaaa) => IpAddr::V6(aaaa.0),
            _ => continue,
        };
        addresses.push(ip);
        min_ttl = Some(min_ttl.map_or(record.ttl(), |current| current.min(record.ttl())));
    }

    DnsResponse {
        status: status_from_code(upstream.response_code()),
        addresses,
        ttl: min_ttl.unwrap_or(0),
    }
}

/// Render the context's response as a reply to `request`.
///
/// A context nobody answered becomes SERVFAIL.
pub fn build_reply(request: &Message, ctx: &QueryContext) -> Message {
    let mut reply = Message::new(request.id(), MessageType::Response, request.op_code());
    reply.set_recursion_desired(request.recursion_desired());
    reply.set_recursion_available(true);
    for query in request.queries() {
        reply.add_query(query.clone());
    }

    let Some(response) = ctx.response() else {
        debug!(qname = %ctx.qname(), "No response set; replying SERVFAIL");
        reply.set_response_code(ResponseCode::ServFail);
        return reply;
    };

    reply.set_response_code(code_from_status(response.status));

    if response.status == ResponseStatus::NoError {
        let owner = request
            .queries()
            .first()
            .map(|q| q.name().clone())
            .unwrap_or_else(Name::root);

        for ip in &response.addresses {
            let rdata = match ip {
                IpAddr::V4(v4) => RData::A(A(*v4)),
                IpAddr::V6(v6) => RData::AAAA(AAAA(*v6)),
            };
            reply.add_answer(Record::from_rdata(owner.clone(), response.ttl, rdata));
        }
    }

    reply
}
