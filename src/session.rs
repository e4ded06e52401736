// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Grading sessions.
//!
//! A [`GradingSession`] wraps one [`GradingBlock`] for a fixed height and
//! protocol version. Entries are fed sequentially and in block order; a
//! rejected entry is recorded and the session carries on. The session is
//! finalized exactly once.

use crate::error::{GradeError, RejectCause, Result};
use crate::grader::{GradedBlock, Grader, GradingBlock};
use crate::types::block::{EntryRef, Height};
use crate::types::id::EntryHash;
use crate::version::ProtocolVersion;
use core::fmt;
use serde::Serialize;

/// An entry the grading block refused.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct EntryRejected {
    pub hash: EntryHash,
    pub cause: RejectCause,
}

impl fmt::Display for EntryRejected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "entry {} rejected: {}", self.hash, self.cause)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EntryOutcome {
    Accepted,
    Rejected(EntryRejected),
}

impl EntryOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, EntryOutcome::Accepted)
    }
}

pub struct GradingSession<B: GradingBlock> {
    version: ProtocolVersion,
    height: Height,
    previous_winners: Vec<String>,
    block: Option<B>,
    accepted: usize,
    rejected: Vec<EntryRejected>,
}

impl<B: GradingBlock> GradingSession<B> {
    /// Opens a session graded under `version` at `height`.
    ///
    /// `previous_winners` is handed to the grader untouched.
    pub fn open<G>(grader: &G, version: ProtocolVersion, height: Height, previous_winners: Vec<String>) -> Result<Self>
    where
        G: Grader<Block = B>,
    {
        if !grader.supports(version) {
            return Err(GradeError::InvalidVersion(version.0));
        }
        let block = grader.new_block(version, height, &previous_winners)?;
        Ok(Self {
            version,
            height,
            previous_winners,
            block: Some(block),
            accepted: 0,
            rejected: Vec::new(),
        })
    }

    pub fn version(&self) -> ProtocolVersion {
        self.version
    }

    pub fn height(&self) -> Height {
        self.height
    }

    pub fn previous_winners(&self) -> &[String] {
        &self.previous_winners
    }

    pub fn accepted(&self) -> usize {
        self.accepted
    }

    pub fn rejected(&self) -> &[EntryRejected] {
        &self.rejected
    }

    pub fn is_finalized(&self) -> bool {
        self.block.is_none()
    }

    /// Offers one entry to the grading block.
    ///
    /// A rejection is returned as [`EntryOutcome::Rejected`] and also kept in
    /// [`GradingSession::rejected`]. Only a finalized session is an error.
    pub fn add_entry(&mut self, hash: &EntryHash, ext_ids: &[Vec<u8>], content: &[u8]) -> Result<EntryOutcome> {
        let block = self.block.as_mut().ok_or(GradeError::AlreadyFinalized)?;
        match block.add_opr(hash, ext_ids, content) {
            Ok(()) => {
                self.accepted += 1;
                Ok(EntryOutcome::Accepted)
            }
            Err(cause) => {
                let rejected = EntryRejected { hash: *hash, cause };
                self.rejected.push(rejected.clone());
                Ok(EntryOutcome::Rejected(rejected))
            }
        }
    }

    pub fn add_entry_ref(&mut self, entry: &EntryRef) -> Result<EntryOutcome> {
        self.add_entry(&entry.hash, entry.ext_ids(), entry.content())
    }

    /// Feeds `entries` in iteration order and returns how many were accepted.
    pub fn feed<'a, I>(&mut self, entries: I) -> Result<usize>
    where
        I: IntoIterator<Item = &'a EntryRef>,
    {
        let before = self.accepted;
        for entry in entries {
            self.add_entry_ref(entry)?;
        }
        Ok(self.accepted - before)
    }

    /// Grades the block. A second call fails with [`GradeError::AlreadyFinalized`].
    pub fn finalize(&mut self) -> Result<GradedBlock> {
        let block = self.block.take().ok_or(GradeError::AlreadyFinalized)?;
        Ok(block.grade())
    }

    /// Rejections collected so far, leaving the list empty.
    pub fn take_rejected(&mut self) -> Vec<EntryRejected> {
        core::mem::take(&mut self.rejected)
    }
}
