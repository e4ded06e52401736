// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! opr-kernel: block model, protocol version selection and grading sessions
//! for oracle price record (OPR) chains.
//!
//! Everything in this crate is synchronous and free of I/O. Fetching blocks
//! from a ledger node lives in `opr-node`.

pub mod config;
pub mod error;
pub mod types;
pub mod version;
pub mod grader;
pub mod session;
pub mod outcome;
pub mod fixtures;

pub use error::{GradeError, IdError, RejectCause, Result};
pub use grader::{AssetRate, GradedBlock, Grader, GradingBlock, Winner};
pub use outcome::{GradeOutcome, GradedReport};
pub use session::{EntryOutcome, EntryRejected, GradingSession};
pub use types::block::{DirectoryBlock, EntryBlock, EntryPayload, EntryRef, Height};
pub use types::id::{Bytes32, ChainId, EntryHash, KeyMr};
pub use version::{ActivationTable, ProtocolVersion};

#[cfg(test)]
mod tests;
