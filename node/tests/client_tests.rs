// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use opr_kernel::fixtures::{directory_for, opr_block, unhydrated};
use opr_kernel::grader::DifficultyGrader;
use opr_kernel::{ChainId, DirectoryBlock, EntryBlock, EntryHash, Height, KeyMr, ProtocolVersion};
use opr_node::config::NodeConfig;
use opr_node::network::FactomClient;
use opr_node::pipeline::GradingPipeline;
use opr_node::store::{RemoteStore, StoreError};
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;

const HEIGHT: Height = 237_975;

/// Just enough of the factomd v2 API to serve one directory block.
struct FakeFactomd {
    dblock: DirectoryBlock,
    blocks: Vec<EntryBlock>,
}

impl FakeFactomd {
    fn dispatch(&self, method: &str, params: &Value) -> Result<Value, (i64, &'static str)> {
        match method {
            "dblock-by-height" => {
                if params["height"].as_u64() != Some(self.dblock.height as u64) {
                    return Err((-32008, "Block not found"));
                }
                let entries: Vec<Value> = self
                    .dblock
                    .entries
                    .iter()
                    .map(|e| json!({ "chainid": e.chain.to_string(), "keymr": e.key_mr.to_string() }))
                    .collect();
                Ok(json!({
                    "dblock": {
                        "header": { "dbheight": self.dblock.height, "version": 0 },
                        "dbentries": entries,
                        "keymr": "00"
                    },
                    "rawdata": ""
                }))
            }
            "entry-block" => {
                let keymr = params["keymr"].as_str().unwrap_or_default();
                let block = self
                    .blocks
                    .iter()
                    .find(|b| b.key_mr.to_string() == keymr)
                    .ok_or((-32008, "Block not found"))?;
                let list: Vec<Value> = block
                    .entries
                    .iter()
                    .map(|e| json!({ "entryhash": e.hash.to_string(), "timestamp": e.timestamp }))
                    .collect();
                Ok(json!({
                    "header": {
                        "blocksequencenumber": 1,
                        "chainid": block.chain.to_string(),
                        "dbheight": block.height,
                        "timestamp": 0
                    },
                    "entrylist": list
                }))
            }
            "entry" => {
                let hash = params["hash"].as_str().unwrap_or_default();
                let entry = self
                    .blocks
                    .iter()
                    .flat_map(|b| b.entries.iter())
                    .find(|e| e.hash.to_string() == hash)
                    .ok_or((-32008, "Entry not found"))?;
                let extids: Vec<String> = entry.ext_ids().iter().map(hex::encode).collect();
                Ok(json!({
                    "chainid": "",
                    "content": hex::encode(entry.content()),
                    "extids": extids
                }))
            }
            _ => Err((-32601, "Method not found")),
        }
    }
}

async fn rpc(State(node): State<Arc<FakeFactomd>>, Json(req): Json<Value>) -> Json<Value> {
    let id = req["id"].clone();
    let method = req["method"].as_str().unwrap_or_default().to_string();
    match node.dispatch(&method, &req["params"]) {
        Ok(result) => Json(json!({ "jsonrpc": "2.0", "id": id, "result": result })),
        Err((code, message)) => Json(json!({
            "jsonrpc": "2.0",
            "id": id,
            "error": { "code": code, "message": message }
        })),
    }
}

async fn serve(node: FakeFactomd) -> String {
    let app = Router::new()
        .route("/v2", post(rpc))
        .route("/broken", post(|| async { StatusCode::INTERNAL_SERVER_ERROR }))
        .with_state(Arc::new(node));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

fn fixture(count: usize) -> (NodeConfig, EntryBlock, FakeFactomd) {
    let cfg = NodeConfig::default();
    let eblock = opr_block(cfg.opr_chain, HEIGHT, ProtocolVersion(4), &cfg.previous_winners, count);
    let other = opr_block(ChainId::new([2; 32]), HEIGHT, ProtocolVersion(4), &[], 1);
    let node = FakeFactomd {
        dblock: directory_for(HEIGHT, &[&other, &eblock]),
        blocks: vec![other, eblock.clone()],
    };
    (cfg, eblock, node)
}

fn client(url: String) -> FactomClient {
    FactomClient::new(url, Duration::from_secs(5)).unwrap()
}

#[tokio::test]
async fn test_fetches_and_decodes_blocks() {
    let (cfg, eblock, node) = fixture(3);
    let expected_dblock = node.dblock.clone();
    let url = serve(node).await;
    let client = client(format!("{}/v2/", url));

    let dblock = client.directory_block(HEIGHT).await.unwrap();
    assert_eq!(dblock, expected_dblock);
    assert_eq!(dblock.entry_block(&cfg.opr_chain), Some(eblock.key_mr));

    let fetched = client.entry_block(&eblock.key_mr).await.unwrap();
    assert_eq!(fetched, unhydrated(&eblock));

    let payload = client.entry(&eblock.entries[1].hash).await.unwrap();
    assert_eq!(Some(payload), eblock.entries[1].payload);
}

#[tokio::test]
async fn test_maps_not_found_and_transport_errors() {
    let (_, _, node) = fixture(1);
    let url = serve(node).await;
    let client_v2 = client(format!("{}/v2", url));

    assert!(matches!(client_v2.directory_block(HEIGHT + 1).await, Err(StoreError::NotFound(_))));
    assert!(matches!(client_v2.entry_block(&KeyMr::new([0; 32])).await, Err(StoreError::NotFound(_))));
    assert!(matches!(client_v2.entry(&EntryHash::new([0; 32])).await, Err(StoreError::NotFound(_))));

    let broken = client(format!("{}/broken", url));
    assert!(matches!(broken.directory_block(HEIGHT).await, Err(StoreError::Transport(_))));
}

#[tokio::test]
async fn test_grades_over_json_rpc() {
    let _ = tracing_subscriber::fmt().with_env_filter("debug").try_init();
    let (cfg, eblock, node) = fixture(25);
    let url = serve(node).await;
    let store = Arc::new(client(format!("{}/v2", url)));
    let pipeline = GradingPipeline::new(store, DifficultyGrader, &cfg);

    let outcome = pipeline.grade_height(HEIGHT).await.unwrap();
    let report = outcome.report().unwrap();
    assert_eq!(report.valid, 25);
    assert_eq!(report.winners.len(), 25);
    let top = report.top_winner().unwrap();
    assert!(eblock.entries.iter().any(|e| e.hash == top.hash));
}
