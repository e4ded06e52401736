// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! The grading seam.
//!
//! A [`Grader`] opens one [`GradingBlock`] per height. The block accepts raw
//! entries one at a time and produces a ranked [`GradedBlock`] when graded.
//! How entries are scored is entirely up to the implementation.

pub mod difficulty;

pub use difficulty::DifficultyGrader;

use crate::error::{RejectCause, Result};
use crate::types::block::Height;
use crate::types::id::EntryHash;
use crate::version::ProtocolVersion;
use serde::{Deserialize, Serialize};

/// One quoted asset price, in the order the record lists it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetRate {
    pub name: String,
    pub rate: u64,
}

/// A ranked entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Winner {
    pub hash: EntryHash,
    pub short_hash: String,
    pub difficulty: u64,
    /// Rates quoted by the entry. Empty when the grader does not read them.
    #[serde(default)]
    pub assets: Vec<AssetRate>,
}

/// Result of grading one block: winners best first.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GradedBlock {
    pub version: ProtocolVersion,
    pub height: Height,
    /// Entries that passed validation.
    pub valid: usize,
    pub winners: Vec<Winner>,
}

impl GradedBlock {
    pub fn winners(&self) -> &[Winner] {
        &self.winners
    }

    /// Short hashes of the winners, the seed for the next height.
    pub fn winner_short_hashes(&self) -> Vec<String> {
        self.winners.iter().map(|w| w.short_hash.clone()).collect()
    }

    /// Rates quoted by the top winner, the prices this block settles on.
    pub fn winning_rates(&self) -> Option<&[AssetRate]> {
        self.winners.first().map(|w| w.assets.as_slice())
    }
}

/// Factory for grading blocks.
pub trait Grader {
    type Block: GradingBlock;

    fn supports(&self, version: ProtocolVersion) -> bool;

    /// Opens a block for `height` graded under `version`, seeded with the
    /// winners of the previous graded height.
    fn new_block(
        &self,
        version: ProtocolVersion,
        height: Height,
        previous_winners: &[String],
    ) -> Result<Self::Block>;
}

/// Accumulates entries for one height.
pub trait GradingBlock {
    fn add_opr(
        &mut self,
        hash: &EntryHash,
        ext_ids: &[Vec<u8>],
        content: &[u8],
    ) -> core::result::Result<(), RejectCause>;

    fn grade(self) -> GradedBlock;
}
