// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Terminal outcomes of grading a height.

use crate::grader::{GradedBlock, Winner};
use crate::session::EntryRejected;
use crate::types::block::Height;
use crate::types::id::ChainId;
use crate::version::ProtocolVersion;
use serde::Serialize;

/// A graded OPR block.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct GradedReport {
    pub height: Height,
    pub version: ProtocolVersion,
    pub chain: ChainId,
    /// Entries in the entry block.
    pub entries: usize,
    /// Entries the grader accepted.
    pub valid: usize,
    pub winners: Vec<Winner>,
    pub rejected: Vec<EntryRejected>,
}

impl GradedReport {
    pub fn new(chain: ChainId, entries: usize, graded: GradedBlock, rejected: Vec<EntryRejected>) -> Self {
        Self {
            height: graded.height,
            version: graded.version,
            chain,
            entries,
            valid: graded.valid,
            winners: graded.winners,
            rejected,
        }
    }

    pub fn has_winners(&self) -> bool {
        !self.winners.is_empty()
    }

    pub fn top_winner(&self) -> Option<&Winner> {
        self.winners.first()
    }
}

/// What grading a height produced.
///
/// `UngradedNoBlock` means the chain had no entry block at the height. It is
/// not the same as a graded block without winners.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum GradeOutcome {
    Graded(GradedReport),
    UngradedNoBlock { height: Height },
}

impl GradeOutcome {
    pub fn report(&self) -> Option<&GradedReport> {
        match self {
            GradeOutcome::Graded(report) => Some(report),
            GradeOutcome::UngradedNoBlock { .. } => None,
        }
    }

    pub fn is_graded(&self) -> bool {
        matches!(self, GradeOutcome::Graded(_))
    }
}
