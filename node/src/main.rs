// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use opr_kernel::grader::DifficultyGrader;
use opr_node::config::{NodeConfig, DEFAULT_FACTOMD_URL};
use opr_node::errors::NodeError;
use opr_node::network::FactomClient;
use opr_node::pipeline::GradingPipeline;
use opr_node::server::build_router;
use opr_node::telemetry::init_telemetry;
use std::sync::Arc;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), NodeError> {
    init_telemetry();

    let cfg = NodeConfig::from_env()?;
    tracing::info!(
        factomd = %cfg.factomd_url,
        chain = %cfg.opr_chain,
        workers = cfg.fetch_workers,
        "Initializing OPR node"
    );

    if cfg.factomd_url == DEFAULT_FACTOMD_URL {
        tracing::warn!("grading mainnet with the difficulty grader, which accepts JSON OPR records only");
    }

    let client = FactomClient::new(cfg.factomd_url.clone(), cfg.request_timeout())
        .map_err(|e| NodeError::Config(e.to_string()))?;
    let pipeline = Arc::new(GradingPipeline::new(Arc::new(client), DifficultyGrader, &cfg));

    let app = build_router(pipeline, cfg.auth_token.clone());

    let addr = cfg.bind_addr;
    tracing::info!("Listening on {}", addr);
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
