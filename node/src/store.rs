// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Access to a ledger node.

use async_trait::async_trait;
use opr_kernel::{DirectoryBlock, EntryBlock, EntryHash, EntryPayload, Height, KeyMr};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("not found: {0}")]
    NotFound(String),
    #[error("transport error: {0}")]
    Transport(String),
    #[error("rpc error {code}: {message}")]
    Rpc { code: i64, message: String },
    #[error("decode error: {0}")]
    Decode(String),
}

/// Read access to directory blocks, entry blocks and entries.
///
/// Implementations own their retry and timeout policy.
#[async_trait]
pub trait RemoteStore: Send + Sync {
    async fn directory_block(&self, height: Height) -> Result<DirectoryBlock, StoreError>;

    /// Entry block by key merkle root. Entries come back unhydrated.
    async fn entry_block(&self, key_mr: &KeyMr) -> Result<EntryBlock, StoreError>;

    async fn entry(&self, hash: &EntryHash) -> Result<EntryPayload, StoreError>;
}

/// Store held entirely in memory.
#[derive(Default)]
pub struct MemoryStore {
    directory: HashMap<Height, DirectoryBlock>,
    blocks: HashMap<KeyMr, EntryBlock>,
    entries: HashMap<EntryHash, EntryPayload>,
    entry_fetches: AtomicUsize,
    block_fetches: AtomicUsize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_directory(&mut self, block: DirectoryBlock) {
        self.directory.insert(block.height, block);
    }

    /// Registers an entry block. Payloads of hydrated entries become
    /// fetchable and the stored block keeps only the references.
    pub fn insert_entry_block(&mut self, block: EntryBlock) {
        let mut stored = block;
        for entry in &mut stored.entries {
            if let Some(payload) = entry.payload.take() {
                self.entries.insert(entry.hash, payload);
            }
        }
        self.blocks.insert(stored.key_mr, stored);
    }

    pub fn remove_entry(&mut self, hash: &EntryHash) -> Option<EntryPayload> {
        self.entries.remove(hash)
    }

    /// Number of entry fetches served so far, successful or not.
    pub fn entry_fetches(&self) -> usize {
        self.entry_fetches.load(Ordering::SeqCst)
    }

    pub fn block_fetches(&self) -> usize {
        self.block_fetches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RemoteStore for MemoryStore {
    async fn directory_block(&self, height: Height) -> Result<DirectoryBlock, StoreError> {
        self.directory
            .get(&height)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(format!("directory block {}", height)))
    }

    async fn entry_block(&self, key_mr: &KeyMr) -> Result<EntryBlock, StoreError> {
        self.block_fetches.fetch_add(1, Ordering::SeqCst);
        self.blocks
            .get(key_mr)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(format!("entry block {}", key_mr)))
    }

    async fn entry(&self, hash: &EntryHash) -> Result<EntryPayload, StoreError> {
        self.entry_fetches.fetch_add(1, Ordering::SeqCst);
        self.entries
            .get(hash)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(format!("entry {}", hash)))
    }
}
