#![allow(dead_code)]

use async_trait::async_trait;
use rule_switcher_application::ports::{Action, Continuation};
use rule_switcher_domain::{DnsQuery, DnsResponse, DomainError, QueryContext, RecordType};
use std::net::{IpAddr, Ipv4Addr};
use std::sync::{Arc, Mutex};

pub const CLIENT_IP: IpAddr = IpAddr::V4(Ipv4Addr::new(192, 168, 1, 100));

pub fn query(domain: &str, record_type: RecordType) -> QueryContext {
    QueryContext::new(DnsQuery::new(domain, record_type), CLIENT_IP)
}

pub fn query_with_answer(domain: &str, ips: &[&str]) -> QueryContext {
    let addresses = ips.iter().map(|ip| ip.parse().unwrap()).collect();
    query(domain, RecordType::A).with_response(DnsResponse::answer(addresses, 60))
}

/// Ordered list of step names that ran.
#[derive(Clone, Default)]
pub struct Trail(Arc<Mutex<Vec<String>>>);

impl Trail {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, entry: impl Into<String>) {
        self.0.lock().unwrap().push(entry.into());
    }

    pub fn entries(&self) -> Vec<String> {
        self.0.lock().unwrap().clone()
    }
}

/// Records its name, then continues unless built with `stop`.
pub struct TraceAction {
    name: &'static str,
    stop: bool,
    trail: Trail,
}

impl TraceAction {
    pub fn pass(name: &'static str, trail: &Trail) -> Arc<Self> {
        Arc::new(Self {
            name,
            stop: false,
            trail: trail.clone(),
        })
    }

    pub fn stop(name: &'static str, trail: &Trail) -> Arc<Self> {
        Arc::new(Self {
            name,
            stop: true,
            trail: trail.clone(),
        })
    }
}

#[async_trait]
impl Action for TraceAction {
    async fn execute(
        &self,
        ctx: &mut QueryContext,
        next: &dyn Continuation,
    ) -> Result<(), DomainError> {
        self.trail.push(self.name);
        if self.stop {
            return Ok(());
        }
        next.proceed(ctx).await
    }
}

/// Outer continuation that records `next`.
pub struct TraceContinuation {
    trail: Trail,
}

impl TraceContinuation {
    pub fn new(trail: &Trail) -> Self {
        Self {
            trail: trail.clone(),
        }
    }
}

#[async_trait]
impl Continuation for TraceContinuation {
    async fn proceed(&self, _ctx: &mut QueryContext) -> Result<(), DomainError> {
        self.trail.push("next");
        Ok(())
    }
}
