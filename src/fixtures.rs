// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Builders for well formed and malformed OPR entries, shared by the test
//! suites of every crate in the workspace.

use crate::grader::difficulty::{compute_difficulty, OprRecord};
use crate::grader::AssetRate;
use crate::types::block::{DirectoryBlock, DirectoryEntry, EntryBlock, EntryPayload, EntryRef, Height};
use crate::types::id::{ChainId, EntryHash, KeyMr};
use crate::version::ProtocolVersion;

/// Hash an entry the way fixtures address them: blake3 over every external id
/// followed by the content.
pub fn entry_hash_of(ext_ids: &[Vec<u8>], content: &[u8]) -> EntryHash {
    let mut hasher = blake3::Hasher::new();
    for id in ext_ids {
        hasher.update(id);
    }
    hasher.update(content);
    EntryHash::new(*hasher.finalize().as_bytes())
}

/// Distinct short hashes usable as a previous-winner seed.
pub fn seed_winners(n: usize) -> Vec<String> {
    (0..n as u64)
        .map(|i| hex::encode(&blake3::hash(&i.to_be_bytes()).as_bytes()[..8]))
        .collect()
}

/// Rates every fixture record quotes. `USD` moves with the nonce so winners
/// can be told apart by their rates.
pub fn opr_assets(nonce: &[u8]) -> Vec<AssetRate> {
    let bump = nonce.iter().fold(0u64, |acc, b| acc.wrapping_mul(31).wrapping_add(*b as u64));
    [("PEG", 0), ("USD", 100_000_000 + bump), ("EUR", 91_000_000), ("XAU", 190_500_000_000)]
        .into_iter()
        .map(|(name, rate)| AssetRate { name: name.to_string(), rate })
        .collect()
}

/// A hydrated entry that [`crate::grader::DifficultyGrader`] accepts.
pub fn opr_entry(version: ProtocolVersion, height: Height, winners: &[String], nonce: &[u8]) -> EntryRef {
    let record = OprRecord {
        height,
        address: format!("FA{}", hex::encode(nonce)),
        winners: winners.to_vec(),
        assets: opr_assets(nonce),
    };
    let content = serde_json::to_vec(&record).expect("record serializes");
    let difficulty = compute_difficulty(&content, nonce);
    let ext_ids = vec![nonce.to_vec(), difficulty.to_be_bytes().to_vec(), vec![version.0]];
    build(ext_ids, content)
}

/// A hydrated entry with arbitrary external ids and content.
pub fn raw_entry(ext_ids: Vec<Vec<u8>>, content: Vec<u8>) -> EntryRef {
    build(ext_ids, content)
}

fn build(ext_ids: Vec<Vec<u8>>, content: Vec<u8>) -> EntryRef {
    let hash = entry_hash_of(&ext_ids, &content);
    let mut entry = EntryRef::new(hash, 0);
    entry.hydrate(EntryPayload { ext_ids, content });
    entry
}

/// An entry block of `count` valid, hydrated OPR entries.
pub fn opr_block(chain: ChainId, height: Height, version: ProtocolVersion, winners: &[String], count: usize) -> EntryBlock {
    let entries = (0..count as u64)
        .map(|i| opr_entry(version, height, winners, &i.to_be_bytes()))
        .collect();
    let mut hasher = blake3::Hasher::new();
    hasher.update(chain.as_bytes());
    hasher.update(&height.to_be_bytes());
    EntryBlock {
        key_mr: KeyMr::new(*hasher.finalize().as_bytes()),
        chain,
        height,
        entries,
    }
}

/// Copy of `block` with every payload stripped, as the ledger lists it.
pub fn unhydrated(block: &EntryBlock) -> EntryBlock {
    let mut stripped = block.clone();
    for entry in &mut stripped.entries {
        entry.payload = None;
    }
    stripped
}

/// Directory block listing each given entry block.
pub fn directory_for(height: Height, blocks: &[&EntryBlock]) -> DirectoryBlock {
    DirectoryBlock {
        height,
        entries: blocks
            .iter()
            .map(|b| DirectoryEntry { chain: b.chain, key_mr: b.key_mr })
            .collect(),
    }
}
