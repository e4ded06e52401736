// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use crate::errors::NodeError;
use crate::fetcher::DEFAULT_FETCH_WORKERS;
use opr_kernel::config::OPR_CHAIN;
use opr_kernel::{ActivationTable, ChainId, Height};
use std::net::SocketAddr;
use std::time::Duration;

pub const DEFAULT_FACTOMD_URL: &str = "https://api.factomd.net/v2";

/// Previous-winner seed for grading mainnet height 237975.
pub const DEFAULT_PREVIOUS_WINNERS: [&str; 25] = [
    "3dd854aeb2d49f85",
    "86e971804fde3e6f",
    "101713d912fa651d",
    "fbb11bcaffd56d20",
    "dd3b35fb3927fb00",
    "47d2c8fde11934eb",
    "400e113adf147342",
    "22aedf7364080bd7",
    "c0f278a121482c22",
    "d41559e08eb0cbe1",
    "77686695b5c1bdbf",
    "20309006f2001e13",
    "a10a51a606d32f36",
    "69f4723d26c8f71c",
    "f6a2f3e56ae56ccd",
    "9fee4dbc582125a6",
    "c51017ad4fe1f0ca",
    "f9a2d8ac26f9e406",
    "d4bc08670fb00662",
    "8b4f33c7942976aa",
    "1186d3a3585b730c",
    "ffc797560715352f",
    "402e7cd2b4c068ef",
    "6ede211447bd442a",
    "1ca4e140457e0b7d",
];

#[derive(Debug, Clone)]
pub struct NodeConfig {
    pub factomd_url: String,
    pub bind_addr: SocketAddr,
    pub opr_chain: ChainId,
    pub fetch_workers: usize,
    pub request_timeout_secs: u64,
    pub activations: ActivationTable,
    pub previous_winners: Vec<String>,
    pub auth_token: Option<String>,
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            factomd_url: DEFAULT_FACTOMD_URL.to_string(),
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            opr_chain: ChainId::new(OPR_CHAIN),
            fetch_workers: DEFAULT_FETCH_WORKERS,
            request_timeout_secs: 30,
            activations: ActivationTable::mainnet(),
            previous_winners: DEFAULT_PREVIOUS_WINNERS.iter().map(|s| s.to_string()).collect(),
            auth_token: None,
        }
    }
}

impl NodeConfig {
    /// Defaults overridden by `OPR_*` environment variables.
    pub fn from_env() -> Result<Self, NodeError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overridden by whatever `lookup` returns for each `OPR_*` key.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, NodeError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = Self::default();

        if let Some(url) = lookup("OPR_FACTOMD_URL") {
            cfg.factomd_url = url;
        }
        if let Some(addr) = lookup("OPR_BIND_ADDR") {
            cfg.bind_addr = addr
                .parse()
                .map_err(|e| NodeError::Config(format!("OPR_BIND_ADDR: {}", e)))?;
        }
        if let Some(chain) = lookup("OPR_CHAIN_ID") {
            cfg.opr_chain = chain
                .parse()
                .map_err(|e| NodeError::Config(format!("OPR_CHAIN_ID: {}", e)))?;
        }
        if let Some(workers) = lookup("OPR_FETCH_WORKERS") {
            cfg.fetch_workers = workers
                .parse()
                .map_err(|e| NodeError::Config(format!("OPR_FETCH_WORKERS: {}", e)))?;
        }
        if let Some(secs) = lookup("OPR_REQUEST_TIMEOUT_SECS") {
            cfg.request_timeout_secs = secs
                .parse()
                .map_err(|e| NodeError::Config(format!("OPR_REQUEST_TIMEOUT_SECS: {}", e)))?;
        }
        if let Some(table) = lookup("OPR_ACTIVATIONS") {
            cfg.activations = parse_activations(&table)?;
        }
        if let Some(winners) = lookup("OPR_PREVIOUS_WINNERS") {
            cfg.previous_winners = winners
                .split(',')
                .map(str::trim)
                .map(str::to_string)
                .collect();
        }
        cfg.auth_token = lookup("OPR_AUTH_TOKEN").filter(|t| !t.is_empty());

        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), NodeError> {
        if self.fetch_workers == 0 {
            return Err(NodeError::Config("fetch_workers must be at least 1".into()));
        }
        if self.request_timeout_secs == 0 {
            return Err(NodeError::Config("request_timeout_secs must be at least 1".into()));
        }
        for winner in &self.previous_winners {
            if winner.len() != 16 || hex::decode(winner).is_err() {
                return Err(NodeError::Config(format!("previous winner {:?} is not an 8 byte hex short hash", winner)));
            }
        }
        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// Parses `height:version` pairs separated by commas, e.g. `210330:2,222270:3`.
fn parse_activations(raw: &str) -> Result<ActivationTable, NodeError> {
    let bad = |item: &str| NodeError::Config(format!("OPR_ACTIVATIONS: {:?} is not height:version", item));
    let mut pairs = Vec::new();
    for item in raw.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        let (height, version) = item.split_once(':').ok_or_else(|| bad(item))?;
        let height = height.trim().parse::<Height>().map_err(|_| bad(item))?;
        let version = version.trim().parse::<u8>().map_err(|_| bad(item))?;
        pairs.push((height, version));
    }
    ActivationTable::from_pairs(&pairs).map_err(|e| NodeError::Config(format!("OPR_ACTIVATIONS: {}", e)))
}
