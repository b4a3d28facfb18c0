use serde::{Deserialize, Serialize};
use std::net::IpAddr;

/// A named action declared under `[actions.<tag>]`.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ActionConfig {
    /// Answer NXDOMAIN and stop the chain.
    Block,

    /// Answer with fixed addresses and stop the chain.
    Respond {
        addresses: Vec<IpAddr>,

        #[serde(default = "default_respond_ttl")]
        ttl: u32,
    },

    /// Log the query and continue.
    Log {
        #[serde(default)]
        message: Option<String>,
    },
}

fn default_respond_ttl() -> u32 {
    300
}
