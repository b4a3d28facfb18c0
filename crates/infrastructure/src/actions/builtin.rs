use async_trait::async_trait;
use rule_switcher_application::ports::{Action, Continuation};
use rule_switcher_application::DiagnosticSink;
use rule_switcher_domain::{DnsResponse, DomainError, QueryContext, RecordType};
use std::net::IpAddr;
use tracing::{debug, info};

fn ensure_live(ctx: &QueryContext) -> Result<(), DomainError> {
    if ctx.is_cancelled() {
        return Err(DomainError::Cancelled);
    }
    Ok(())
}

/// Answers NXDOMAIN. Ends the chain.
#[derive(Debug, Clone, Default)]
pub struct BlockAction {
    sink: DiagnosticSink,
}

impl BlockAction {
    pub fn new(sink: DiagnosticSink) -> Self {
        Self { sink }
    }
}

#[async_trait]
impl Action for BlockAction {
    async fn execute(
        &self,
        ctx: &mut QueryContext,
        _next: &dyn Continuation,
    ) -> Result<(), DomainError> {
        ensure_live(ctx)?;
        ctx.set_response(DnsResponse::nxdomain());
        self.sink
            .emit(|| debug!(qname = %ctx.qname(), id = ctx.id(), "Query blocked"));
        Ok(())
    }
}

/// Answers with fixed addresses. Ends the chain.
///
/// Only addresses of the queried family are returned; an A query against an
/// IPv6-only list gets an empty NOERROR answer.
#[derive(Debug, Clone)]
pub struct RespondAction {
    addresses: Vec<IpAddr>,
    ttl: u32,
}

impl RespondAction {
    pub fn new(addresses: Vec<IpAddr>, ttl: u32) -> Self {
        Self { addresses, ttl }
    }

    fn answers_for(&self, record_type: RecordType) -> Vec<IpAddr> {
        self.addresses
            .iter()
            .copied()
            .filter(|ip| match record_type {
                RecordType::A => ip.is_ipv4(),
                RecordType::AAAA => ip.is_ipv6(),
                _ => false,
            })
            .collect()
    }
}

#[async_trait]
impl Action for RespondAction {
    async fn execute(
        &self,
        ctx: &mut QueryContext,
        _next: &dyn Continuation,
    ) -> Result<(), DomainError> {
        ensure_live(ctx)?;
        let answers = self.answers_for(ctx.query().record_type);
        ctx.set_response(DnsResponse::answer(answers, self.ttl));
        Ok(())
    }
}

/// Logs the query, then hands over to the continuation.
#[derive(Debug, Clone)]
pub struct LogAction {
    tag: String,
    message: Option<String>,
    sink: DiagnosticSink,
}

impl LogAction {
    pub fn new(tag: impl Into<String>, message: Option<String>, sink: DiagnosticSink) -> Self {
        Self {
            tag: tag.into(),
            message,
            sink,
        }
    }
}

#[async_trait]
impl Action for LogAction {
    async fn execute(
        &self,
        ctx: &mut QueryContext,
        next: &dyn Continuation,
    ) -> Result<(), DomainError> {
        ensure_live(ctx)?;
        let message = self.message.as_deref().unwrap_or("Query passed");
        self.sink.emit(|| {
            info!(
                tag = %self.tag,
                qname = %ctx.qname(),
                qtype = %ctx.query().record_type,
                client = %ctx.client_ip(),
                id = ctx.id(),
                "{}",
                message
            )
        });
        next.proceed(ctx).await
    }
}
