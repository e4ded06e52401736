// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use opr_kernel::{ActivationTable, Height};
use opr_node::config::NodeConfig;

pub fn render(height: Height, table: &ActivationTable) -> String {
    format!("height {} grades under {}", height, table.select(height))
}

pub fn run(height: Height) -> anyhow::Result<()> {
    let cfg = NodeConfig::from_env()?;
    println!("{}", render(height, &cfg.activations));
    Ok(())
}
