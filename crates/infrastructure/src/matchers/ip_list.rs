use super::list_entries;
use async_trait::async_trait;
use ipnetwork::IpNetwork;
use rule_switcher_application::ports::{IpMatcherBuilder, Matcher};
use rule_switcher_domain::{DomainError, QueryContext};
use std::net::IpAddr;
use std::sync::Arc;
use tracing::debug;

/// A list of CIDR ranges. Bare addresses are stored as host routes.
#[derive(Debug, Clone)]
pub struct IpList {
    networks: Vec<IpNetwork>,
}

impl IpList {
    pub fn parse(text: &str) -> Result<Self, DomainError> {
        let mut networks = Vec::new();

        for entry in list_entries(text) {
            let network = if entry.contains('/') {
                entry
                    .parse::<IpNetwork>()
                    .map_err(|e| DomainError::InvalidIpRange(format!("{}: {}", entry, e)))?
            } else {
                let ip: IpAddr = entry
                    .parse()
                    .map_err(|e| DomainError::InvalidIpRange(format!("{}: {}", entry, e)))?;
                IpNetwork::from(ip)
            };
            networks.push(network);
        }

        if networks.is_empty() {
            return Err(DomainError::InvalidIpRange("IP list is empty".to_string()));
        }

        debug!(networks = networks.len(), "IP list compiled");
        Ok(Self { networks })
    }

    pub fn contains(&self, ip: IpAddr) -> bool {
        self.networks.iter().any(|network| network.contains(ip))
    }

    pub fn len(&self) -> usize {
        self.networks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.networks.is_empty()
    }
}

/// Matches when any address in the current response falls in the list.
/// A context without a response never matches.
pub struct ResponseIpMatcher {
    list: Arc<IpList>,
}

impl ResponseIpMatcher {
    pub fn new(list: Arc<IpList>) -> Self {
        Self { list }
    }
}

#[async_trait]
impl Matcher for ResponseIpMatcher {
    async fn matches(&self, ctx: &QueryContext) -> Result<bool, DomainError> {
        Ok(ctx
            .response_addresses()
            .iter()
            .any(|ip| self.list.contains(*ip)))
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct IpListBuilder;

impl IpMatcherBuilder for IpListBuilder {
    fn build(&self, args: &str) -> Result<Arc<dyn Matcher>, DomainError> {
        let list = IpList::parse(args)?;
        Ok(Arc::new(ResponseIpMatcher::new(Arc::new(list))))
    }
}
