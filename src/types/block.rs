// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Directory blocks, entry blocks and entries.

use crate::types::id::{ChainId, EntryHash, KeyMr};
use serde::{Deserialize, Serialize};

/// Position of a directory block in the ledger.
pub type Height = u32;

/// One chain's slot in a directory block.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectoryEntry {
    pub chain: ChainId,
    pub key_mr: KeyMr,
}

/// Index of every chain that received entries at one height.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectoryBlock {
    pub height: Height,
    pub entries: Vec<DirectoryEntry>,
}

impl DirectoryBlock {
    /// Key merkle root of the entry block posted to `chain`, if any.
    pub fn entry_block(&self, chain: &ChainId) -> Option<KeyMr> {
        self.entries
            .iter()
            .find(|e| &e.chain == chain)
            .map(|e| e.key_mr)
    }
}

/// Decoded content of an entry.
#[derive(Clone, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EntryPayload {
    pub ext_ids: Vec<Vec<u8>>,
    pub content: Vec<u8>,
}

/// Reference to an entry inside an entry block.
///
/// Carries only its hash until hydrated with the payload fetched from the
/// ledger.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryRef {
    pub hash: EntryHash,
    pub timestamp: u64,
    pub payload: Option<EntryPayload>,
}

impl EntryRef {
    pub fn new(hash: EntryHash, timestamp: u64) -> Self {
        Self { hash, timestamp, payload: None }
    }

    /// Stores fetched content. Hydrating twice overwrites with the new payload.
    pub fn hydrate(&mut self, payload: EntryPayload) {
        self.payload = Some(payload);
    }

    pub fn is_hydrated(&self) -> bool {
        self.payload.is_some()
    }

    pub fn ext_ids(&self) -> &[Vec<u8>] {
        self.payload.as_ref().map(|p| p.ext_ids.as_slice()).unwrap_or(&[])
    }

    pub fn content(&self) -> &[u8] {
        self.payload.as_ref().map(|p| p.content.as_slice()).unwrap_or(&[])
    }
}

/// Entries posted to one chain within one directory block, in ledger order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryBlock {
    pub key_mr: KeyMr,
    pub chain: ChainId,
    pub height: Height,
    pub entries: Vec<EntryRef>,
}

impl EntryBlock {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn is_hydrated(&self) -> bool {
        self.entries.iter().all(EntryRef::is_hydrated)
    }
}
