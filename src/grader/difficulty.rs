// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Proof-of-work grader.
//!
//! Entries are ranked by the difficulty of their nonce. Price validation is
//! not performed here.

use crate::config::{MAX_PROTOCOL_VERSION, OPR_EXT_ID_COUNT, V1_WINNER_COUNT, WINNER_COUNT};
use crate::error::{GradeError, RejectCause, Result};
use crate::grader::{AssetRate, GradedBlock, Grader, GradingBlock, Winner};
use crate::types::block::Height;
use crate::types::id::EntryHash;
use crate::version::ProtocolVersion;
use byteorder::{BigEndian, ByteOrder};
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

/// Body of an OPR entry as far as grading is concerned.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OprRecord {
    pub height: Height,
    pub address: String,
    pub winners: Vec<String>,
    /// Quoted rates, ordered. Names are unique.
    pub assets: Vec<AssetRate>,
}

/// Difficulty of `nonce` over `content`: the leading eight bytes, big endian,
/// of `blake3(blake3(content) || nonce)`.
pub fn compute_difficulty(content: &[u8], nonce: &[u8]) -> u64 {
    let content_hash = blake3::hash(content);
    let mut hasher = blake3::Hasher::new();
    hasher.update(content_hash.as_bytes());
    hasher.update(nonce);
    BigEndian::read_u64(&hasher.finalize().as_bytes()[..8])
}

fn duplicate_asset(assets: &[AssetRate]) -> Option<&str> {
    let mut names = FxHashSet::default();
    assets.iter().map(|a| a.name.as_str()).find(|name| !names.insert(*name))
}

#[derive(Clone, Copy, Debug, Default)]
pub struct DifficultyGrader;

impl Grader for DifficultyGrader {
    type Block = DifficultyBlock;

    fn supports(&self, version: ProtocolVersion) -> bool {
        (ProtocolVersion::BASELINE.0..=MAX_PROTOCOL_VERSION).contains(&version.0)
    }

    fn new_block(
        &self,
        version: ProtocolVersion,
        height: Height,
        previous_winners: &[String],
    ) -> Result<Self::Block> {
        if !self.supports(version) {
            return Err(GradeError::InvalidVersion(version.0));
        }
        // Genesis never carries records; heights travel as i32 in records.
        if height == 0 || height > i32::MAX as u32 {
            return Err(GradeError::InvalidHeight(height));
        }
        Ok(DifficultyBlock {
            version,
            height,
            previous_winners: previous_winners.to_vec(),
            seen_hashes: FxHashSet::default(),
            seen_nonces: FxHashSet::default(),
            valid: Vec::new(),
        })
    }
}

pub struct DifficultyBlock {
    version: ProtocolVersion,
    height: Height,
    previous_winners: Vec<String>,
    seen_hashes: FxHashSet<EntryHash>,
    seen_nonces: FxHashSet<Vec<u8>>,
    valid: Vec<Winner>,
}

impl DifficultyBlock {
    fn winner_count(&self) -> usize {
        if self.version == ProtocolVersion::BASELINE {
            V1_WINNER_COUNT
        } else {
            WINNER_COUNT
        }
    }
}

impl GradingBlock for DifficultyBlock {
    fn add_opr(
        &mut self,
        hash: &EntryHash,
        ext_ids: &[Vec<u8>],
        content: &[u8],
    ) -> core::result::Result<(), RejectCause> {
        if content.is_empty() {
            return Err(RejectCause::EmptyContent);
        }
        if ext_ids.len() != OPR_EXT_ID_COUNT {
            return Err(RejectCause::ExtIdCount { expected: OPR_EXT_ID_COUNT, found: ext_ids.len() });
        }

        // 1. Nonce
        let nonce = &ext_ids[0];
        if nonce.is_empty() {
            return Err(RejectCause::MalformedExtId { index: 0, reason: "empty nonce".into() });
        }

        // 2. Self reported difficulty
        if ext_ids[1].len() != 8 {
            return Err(RejectCause::MalformedExtId {
                index: 1,
                reason: format!("difficulty is {} bytes", ext_ids[1].len()),
            });
        }
        let reported = BigEndian::read_u64(&ext_ids[1]);

        // 3. Record version
        match ext_ids[2].as_slice() {
            [v] if *v == self.version.0 => {}
            [v] => return Err(RejectCause::VersionMismatch { expected: self.version.0, found: *v }),
            other => {
                return Err(RejectCause::MalformedExtId {
                    index: 2,
                    reason: format!("version is {} bytes", other.len()),
                })
            }
        }

        // 4. Body
        let record: OprRecord = serde_json::from_slice(content)
            .map_err(|e| RejectCause::MalformedContent { reason: e.to_string() })?;
        if record.height != self.height {
            return Err(RejectCause::WrongHeight { expected: self.height, found: record.height });
        }
        if record.winners != self.previous_winners {
            return Err(RejectCause::WinnersMismatch);
        }
        if record.assets.is_empty() {
            return Err(RejectCause::MalformedContent { reason: "no asset rates".into() });
        }
        if let Some(name) = duplicate_asset(&record.assets) {
            return Err(RejectCause::MalformedContent { reason: format!("asset {} quoted twice", name) });
        }

        // 5. Proof of work
        let computed = compute_difficulty(content, nonce);
        if computed != reported {
            return Err(RejectCause::DifficultyMismatch { reported, computed });
        }

        if self.seen_hashes.contains(hash) || self.seen_nonces.contains(nonce) {
            return Err(RejectCause::Duplicate);
        }
        self.seen_hashes.insert(*hash);
        self.seen_nonces.insert(nonce.clone());
        self.valid.push(Winner {
            hash: *hash,
            short_hash: hash.short(),
            difficulty: computed,
            assets: record.assets,
        });
        Ok(())
    }

    fn grade(self) -> GradedBlock {
        let count = self.winner_count();
        let valid = self.valid.len();
        let mut ranked = self.valid;
        ranked.sort_by(|a, b| b.difficulty.cmp(&a.difficulty).then_with(|| a.hash.cmp(&b.hash)));
        ranked.truncate(count);
        GradedBlock {
            version: self.version,
            height: self.height,
            valid,
            winners: ranked,
        }
    }
}
