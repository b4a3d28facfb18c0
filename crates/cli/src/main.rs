use async_trait::async_trait;
use clap::Parser;
use rule_switcher_application::ports::Continuation;
use rule_switcher_domain::{CliOverrides, DnsResponse, DomainError, QueryContext, RecordType};
use rule_switcher_infrastructure::message::{
    build_query, build_reply, context_from_request, decode, encode,
};
use std::net::IpAddr;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{error, info};

mod bootstrap;
mod di;

#[derive(Parser)]
#[command(name = "rule-switcher")]
#[command(version)]
#[command(about = "Route a DNS query through an ordered list of match rules")]
struct Cli {
    /// Configuration file path
    #[arg(short = 'c', long, value_name = "FILE")]
    config: Option<String>,

    /// Query name
    #[arg(short = 'q', long)]
    qname: String,

    /// Query type (A, AAAA, CNAME, MX, TXT, PTR, HTTPS)
    #[arg(short = 't', long, default_value = "A")]
    qtype: RecordType,

    /// Address the query came from
    #[arg(long, default_value = "127.0.0.1")]
    client_ip: IpAddr,

    /// Pretend an upstream already answered with this address (repeatable)
    #[arg(short = 'r', long = "response-ip", value_name = "IP")]
    response_ips: Vec<IpAddr>,

    /// TTL of the pretend upstream answer
    #[arg(long, default_value_t = 60)]
    response_ttl: u32,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,
}

/// Outer continuation for a query no rule claimed.
#[derive(Default)]
struct FallThrough {
    reached: AtomicBool,
}

#[async_trait]
impl Continuation for FallThrough {
    async fn proceed(&self, _ctx: &mut QueryContext) -> Result<(), DomainError> {
        self.reached.store(true, Ordering::SeqCst);
        Ok(())
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let cli_overrides = CliOverrides {
        log_level: cli.log_level.clone(),
    };
    let config = bootstrap::load_config(cli.config.as_deref(), cli_overrides)?;

    bootstrap::init_logging(&config);

    info!("Starting Rule Switcher v{}", env!("CARGO_PKG_VERSION"));

    let switcher = di::build_switcher(&config).map_err(|e| {
        error!(error = %e, "Failed to compile rules");
        e
    })?;

    let request = decode(&encode(&build_query(0, &cli.qname, cli.qtype)?)?)?;
    let mut ctx = context_from_request(&request, cli.client_ip)?;
    if !cli.response_ips.is_empty() {
        ctx.set_response(DnsResponse::answer(
            cli.response_ips.clone(),
            cli.response_ttl,
        ));
    }

    let fall_through = FallThrough::default();
    switcher.evaluate(&mut ctx, &fall_through).await.map_err(|e| {
        error!(error = %e, qname = %ctx.qname(), "Rule evaluation failed");
        e
    })?;

    let reply = build_reply(&request, &ctx);

    println!("qname:    {}", ctx.qname());
    println!("qtype:    {}", ctx.query().record_type);
    println!(
        "outcome:  {}",
        if fall_through.reached.load(Ordering::SeqCst) {
            "passed through"
        } else {
            "handled by rule"
        }
    );
    println!("rcode:    {}", reply.response_code());
    for answer in reply.answers() {
        println!("answer:   {} {} {}", answer.name(), answer.ttl(), answer.data());
    }

    Ok(())
}
