use super::RecordType;
use std::net::IpAddr;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

#[derive(Debug, Clone)]
pub struct DnsQuery {
    pub domain: Arc<str>,
    pub record_type: RecordType,
}

impl DnsQuery {
    /// Names are stored lowercase without the trailing root dot.
    pub fn new(domain: impl AsRef<str>, record_type: RecordType) -> Self {
        let normalized = domain.as_ref().trim_end_matches('.').to_ascii_lowercase();
        Self {
            domain: Arc::from(normalized.as_str()),
            record_type,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseStatus {
    NoError,
    NxDomain,
    ServFail,
    Refused,
}

impl ResponseStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NoError => "NOERROR",
            Self::NxDomain => "NXDOMAIN",
            Self::ServFail => "SERVFAIL",
            Self::Refused => "REFUSED",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DnsResponse {
    pub status: ResponseStatus,
    pub addresses: Vec<IpAddr>,
    pub ttl: u32,
}

impl DnsResponse {
    pub fn answer(addresses: Vec<IpAddr>, ttl: u32) -> Self {
        Self {
            status: ResponseStatus::NoError,
            addresses,
            ttl,
        }
    }

    pub fn nxdomain() -> Self {
        Self {
            status: ResponseStatus::NxDomain,
            addresses: vec![],
            ttl: 0,
        }
    }

    pub fn is_nxdomain(&self) -> bool {
        self.status == ResponseStatus::NxDomain
    }
}

/// Per-request state handed to every matcher and action.
///
/// The cancellation token travels with the context so collaborators that do
/// I/O can give up when the owning pipeline abandons the query.
#[derive(Debug, Clone)]
pub struct QueryContext {
    id: u16,
    query: DnsQuery,
    client_ip: IpAddr,
    response: Option<DnsResponse>,
    cancellation: CancellationToken,
}

impl QueryContext {
    pub fn new(query: DnsQuery, client_ip: IpAddr) -> Self {
        Self {
            id: 0,
            query,
            client_ip,
            response: None,
            cancellation: CancellationToken::new(),
        }
    }

    pub fn with_id(mut self, id: u16) -> Self {
        self.id = id;
        self
    }

    pub fn with_response(mut self, response: DnsResponse) -> Self {
        self.response = Some(response);
        self
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = token;
        self
    }

    pub fn id(&self) -> u16 {
        self.id
    }

    pub fn query(&self) -> &DnsQuery {
        &self.query
    }

    pub fn qname(&self) -> &str {
        &self.query.domain
    }

    pub fn client_ip(&self) -> IpAddr {
        self.client_ip
    }

    pub fn response(&self) -> Option<&DnsResponse> {
        self.response.as_ref()
    }

    pub fn set_response(&mut self, response: DnsResponse) {
        self.response = Some(response);
    }

    /// Addresses in the current response, empty when there is none.
    pub fn response_addresses(&self) -> &[IpAddr] {
        self.response
            .as_ref()
            .map(|r| r.addresses.as_slice())
            .unwrap_or(&[])
    }

    pub fn cancellation(&self) -> &CancellationToken {
        &self.cancellation
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancellation.is_cancelled()
    }
}
