#![allow(dead_code)]

use async_trait::async_trait;
use rule_switcher_application::ports::{
    Action, ActionParser, Continuation, DomainMatcherBuilder, IpMatcherBuilder, Matcher,
};
use rule_switcher_application::DiagnosticSink;
use rule_switcher_domain::{
    DnsQuery, DnsResponse, DomainError, ExecConfig, QueryContext, RecordType,
};
use std::collections::HashMap;
use std::net::{IpAddr, Ipv4Addr};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

pub const CLIENT_IP: IpAddr = IpAddr::V4(Ipv4Addr::new(192, 168, 1, 100));

pub fn query(domain: &str) -> QueryContext {
    QueryContext::new(DnsQuery::new(domain, RecordType::A), CLIENT_IP)
}

pub fn query_with_answer(domain: &str, ip: &str) -> QueryContext {
    query(domain).with_response(DnsResponse::answer(vec![ip.parse().unwrap()], 60))
}

/// Shared, ordered record of what ran during a test.
#[derive(Clone, Default)]
pub struct Journal(Arc<Mutex<Vec<String>>>);

impl Journal {
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

// ── Matchers ────────────────────────────────────────────────────────────────

pub struct RecordingMatcher {
    verdict: Result<bool, DomainError>,
    calls: AtomicUsize,
}

impl RecordingMatcher {
    pub fn new(verdict: bool) -> Arc<Self> {
        Arc::new(Self {
            verdict: Ok(verdict),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn failing(error: DomainError) -> Arc<Self> {
        Arc::new(Self {
            verdict: Err(error),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Matcher for RecordingMatcher {
    async fn matches(&self, _ctx: &QueryContext) -> Result<bool, DomainError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.verdict.clone()
    }
}

/// Matches query names listed verbatim in the rule args.
pub struct ExactNameMatcher {
    names: Vec<String>,
}

#[async_trait]
impl Matcher for ExactNameMatcher {
    async fn matches(&self, ctx: &QueryContext) -> Result<bool, DomainError> {
        Ok(self.names.iter().any(|n| n == ctx.qname()))
    }
}

/// IPv4-only CIDR list, enough for exercising the compiler.
pub struct Ipv4PrefixMatcher {
    prefixes: Vec<(u32, u32)>,
}

#[async_trait]
impl Matcher for Ipv4PrefixMatcher {
    async fn matches(&self, ctx: &QueryContext) -> Result<bool, DomainError> {
        Ok(ctx.response_addresses().iter().any(|ip| match ip {
            IpAddr::V4(v4) => {
                let bits = u32::from(*v4);
                self.prefixes.iter().any(|(net, mask)| bits & mask == *net)
            }
            IpAddr::V6(_) => false,
        }))
    }
}

// ── Builders ────────────────────────────────────────────────────────────────

#[derive(Default)]
pub struct StubDomainBuilder {
    pub built: AtomicUsize,
}

impl DomainMatcherBuilder for StubDomainBuilder {
    fn build(&self, args: &str) -> Result<Arc<dyn Matcher>, DomainError> {
        let names: Vec<String> = args.split_whitespace().map(str::to_string).collect();
        if names.is_empty() {
            return Err(DomainError::InvalidDomainPattern("empty pattern list".into()));
        }
        self.built.fetch_add(1, Ordering::SeqCst);
        Ok(Arc::new(ExactNameMatcher { names }))
    }
}

#[derive(Default)]
pub struct StubIpBuilder;

impl IpMatcherBuilder for StubIpBuilder {
    fn build(&self, args: &str) -> Result<Arc<dyn Matcher>, DomainError> {
        let mut prefixes = Vec::new();
        for entry in args.split_whitespace() {
            let (addr, len) = entry
                .split_once('/')
                .ok_or_else(|| DomainError::InvalidIpRange(entry.to_string()))?;
            let addr: Ipv4Addr = addr
                .parse()
                .map_err(|_| DomainError::InvalidIpRange(entry.to_string()))?;
            let len: u32 = len
                .parse()
                .ok()
                .filter(|l| *l <= 32)
                .ok_or_else(|| DomainError::InvalidIpRange(entry.to_string()))?;
            let mask = if len == 0 { 0 } else { u32::MAX << (32 - len) };
            prefixes.push((u32::from(addr) & mask, mask));
        }
        if prefixes.is_empty() {
            return Err(DomainError::InvalidIpRange("empty list".into()));
        }
        Ok(Arc::new(Ipv4PrefixMatcher { prefixes }))
    }
}

/// Resolves a string `exec` against a fixed table of actions.
#[derive(Default)]
pub struct StubActionParser {
    actions: HashMap<String, Arc<dyn Action>>,
    pub parsed: AtomicUsize,
}

impl StubActionParser {
    pub fn with(mut self, tag: &str, action: Arc<dyn Action>) -> Self {
        self.actions.insert(tag.to_string(), action);
        self
    }
}

impl ActionParser for StubActionParser {
    fn parse(
        &self,
        exec: &ExecConfig,
        _sink: &DiagnosticSink,
    ) -> Result<Arc<dyn Action>, DomainError> {
        let tag = exec
            .as_str()
            .ok_or_else(|| DomainError::InvalidExecSequence(format!("{}", exec)))?;
        self.parsed.fetch_add(1, Ordering::SeqCst);
        self.actions
            .get(tag)
            .cloned()
            .ok_or_else(|| DomainError::UnknownAction(tag.to_string()))
    }
}

// ── Actions & continuations ─────────────────────────────────────────────────

pub struct RecordingAction {
    name: String,
    journal: Journal,
    call_next: bool,
    failure: Option<DomainError>,
}

impl RecordingAction {
    /// Records itself and stops the chain.
    pub fn terminal(name: &str, journal: &Journal) -> Arc<Self> {
        Arc::new(Self {
            name: name.to_string(),
            journal: journal.clone(),
            call_next: false,
            failure: None,
        })
    }

    /// Records itself, then runs the continuation.
    pub fn passing(name: &str, journal: &Journal) -> Arc<Self> {
        Arc::new(Self {
            name: name.to_string(),
            journal: journal.clone(),
            call_next: true,
            failure: None,
        })
    }

    pub fn failing(name: &str, journal: &Journal, error: DomainError) -> Arc<Self> {
        Arc::new(Self {
            name: name.to_string(),
            journal: journal.clone(),
            call_next: false,
            failure: Some(error),
        })
    }
}

#[async_trait]
impl Action for RecordingAction {
    async fn execute(
        &self,
        ctx: &mut QueryContext,
        next: &dyn Continuation,
    ) -> Result<(), DomainError> {
        self.journal.push(format!("{}:{}", self.name, ctx.qname()));
        if let Some(err) = &self.failure {
            return Err(err.clone());
        }
        if self.call_next {
            return next.proceed(ctx).await;
        }
        Ok(())
    }
}

pub struct RecordingContinuation {
    journal: Journal,
    result: Result<(), DomainError>,
}

impl RecordingContinuation {
    pub fn new(journal: &Journal) -> Self {
        Self {
            journal: journal.clone(),
            result: Ok(()),
        }
    }

    pub fn failing(journal: &Journal, error: DomainError) -> Self {
        Self {
            journal: journal.clone(),
            result: Err(error),
        }
    }
}

#[async_trait]
impl Continuation for RecordingContinuation {
    async fn proceed(&self, ctx: &mut QueryContext) -> Result<(), DomainError> {
        self.journal.push(format!("next:{}", ctx.qname()));
        self.result.clone()
    }
}
