// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! JSON-RPC client for a factomd node.

use crate::store::{RemoteStore, StoreError};
use async_trait::async_trait;
use opr_kernel::types::block::DirectoryEntry;
use opr_kernel::{Bytes32, ChainId, DirectoryBlock, EntryBlock, EntryHash, EntryPayload, EntryRef, Height, KeyMr};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

/// factomd error codes meaning the requested object does not exist.
const NOT_FOUND_CODES: [i64; 2] = [-32008, -32009];

#[derive(Serialize)]
struct RpcRequest<'a> {
    jsonrpc: &'static str,
    id: u64,
    method: &'a str,
    params: serde_json::Value,
}

#[derive(Deserialize)]
struct RpcResponse<T> {
    result: Option<T>,
    error: Option<RpcError>,
}

#[derive(Deserialize)]
struct RpcError {
    code: i64,
    message: String,
}

#[derive(Deserialize)]
struct DBlockResult {
    dblock: DBlockBody,
}

#[derive(Deserialize)]
struct DBlockBody {
    header: DBlockHeader,
    dbentries: Vec<DBlockEntry>,
}

#[derive(Deserialize)]
struct DBlockHeader {
    dbheight: Height,
}

#[derive(Deserialize)]
struct DBlockEntry {
    chainid: Bytes32,
    keymr: Bytes32,
}

#[derive(Deserialize)]
struct EBlockResult {
    header: EBlockHeader,
    entrylist: Vec<EBlockEntry>,
}

#[derive(Deserialize)]
struct EBlockHeader {
    chainid: Bytes32,
    dbheight: Height,
}

#[derive(Deserialize)]
struct EBlockEntry {
    entryhash: Bytes32,
    timestamp: u64,
}

#[derive(Deserialize)]
struct EntryResult {
    #[serde(default)]
    extids: Vec<String>,
    content: String,
}

#[derive(Debug)]
pub struct FactomClient {
    base_url: String,
    client: Client,
    next_id: AtomicU64,
}

impl FactomClient {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, StoreError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| StoreError::Transport(e.to_string()))?;
        Ok(Self {
            base_url: url.into().trim_end_matches('/').to_string(),
            client,
            next_id: AtomicU64::new(1),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn call<T: DeserializeOwned>(&self, method: &str, params: serde_json::Value) -> Result<T, StoreError> {
        let request = RpcRequest {
            jsonrpc: "2.0",
            id: self.next_id.fetch_add(1, Ordering::Relaxed),
            method,
            params,
        };
        let resp = self
            .client
            .post(&self.base_url)
            .json(&request)
            .send()
            .await
            .map_err(|e| StoreError::Transport(e.to_string()))?;

        if !resp.status().is_success() {
            return Err(StoreError::Transport(format!("{} request failed: {}", method, resp.status())));
        }

        let body: RpcResponse<T> = resp.json().await.map_err(|e| StoreError::Decode(e.to_string()))?;
        match (body.result, body.error) {
            (_, Some(err)) if NOT_FOUND_CODES.contains(&err.code) => Err(StoreError::NotFound(err.message)),
            (_, Some(err)) => Err(StoreError::Rpc { code: err.code, message: err.message }),
            (Some(result), None) => Ok(result),
            (None, None) => Err(StoreError::Decode(format!("{} returned neither result nor error", method))),
        }
    }
}

fn decode_hex(field: &str, value: &str) -> Result<Vec<u8>, StoreError> {
    hex::decode(value).map_err(|e| StoreError::Decode(format!("{}: {}", field, e)))
}

#[async_trait]
impl RemoteStore for FactomClient {
    async fn directory_block(&self, height: Height) -> Result<DirectoryBlock, StoreError> {
        let result: DBlockResult = self.call("dblock-by-height", json!({ "height": height })).await?;
        Ok(DirectoryBlock {
            height: result.dblock.header.dbheight,
            entries: result
                .dblock
                .dbentries
                .into_iter()
                .map(|e| DirectoryEntry { chain: ChainId(e.chainid), key_mr: KeyMr(e.keymr) })
                .collect(),
        })
    }

    async fn entry_block(&self, key_mr: &KeyMr) -> Result<EntryBlock, StoreError> {
        let result: EBlockResult = self.call("entry-block", json!({ "keymr": key_mr.to_string() })).await?;
        Ok(EntryBlock {
            key_mr: *key_mr,
            chain: ChainId(result.header.chainid),
            height: result.header.dbheight,
            entries: result
                .entrylist
                .into_iter()
                .map(|e| EntryRef::new(EntryHash(e.entryhash), e.timestamp))
                .collect(),
        })
    }

    async fn entry(&self, hash: &EntryHash) -> Result<EntryPayload, StoreError> {
        let result: EntryResult = self.call("entry", json!({ "hash": hash.to_string() })).await?;
        let ext_ids = result
            .extids
            .iter()
            .map(|id| decode_hex("extids", id))
            .collect::<Result<Vec<_>, _>>()?;
        let content = decode_hex("content", &result.content)?;
        Ok(EntryPayload { ext_ids, content })
    }
}
