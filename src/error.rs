// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Error types.

use thiserror::Error;

/// Contract errors raised while opening or closing a grading session.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GradeError {
    #[error("protocol version {0} is not supported by the grader")]
    InvalidVersion(u8),
    #[error("height {0} cannot be graded")]
    InvalidHeight(u32),
    #[error("grading session already finalized")]
    AlreadyFinalized,
    #[error("invalid activation table: {0}")]
    InvalidActivationTable(String),
}

/// Why a single entry was refused by a grading block.
///
/// A rejection never aborts the session; it is reported back to the caller
/// alongside the entry hash.
#[derive(Error, Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RejectCause {
    #[error("entry has no content")]
    EmptyContent,
    #[error("expected {expected} external ids, found {found}")]
    ExtIdCount { expected: usize, found: usize },
    #[error("external id {index} is malformed: {reason}")]
    MalformedExtId { index: usize, reason: String },
    #[error("record version {found} does not match block version {expected}")]
    VersionMismatch { expected: u8, found: u8 },
    #[error("content could not be decoded: {reason}")]
    MalformedContent { reason: String },
    #[error("record is for height {found}, block is {expected}")]
    WrongHeight { expected: u32, found: u32 },
    #[error("record does not carry the previous winners")]
    WinnersMismatch,
    #[error("self reported difficulty {reported} differs from computed {computed}")]
    DifficultyMismatch { reported: u64, computed: u64 },
    #[error("duplicate entry")]
    Duplicate,
}

/// Failure to parse a hex encoded identifier.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum IdError {
    #[error("invalid hex: {0}")]
    Hex(#[from] hex::FromHexError),
    #[error("expected {expected} bytes, found {found}")]
    Length { expected: usize, found: usize },
}

pub type Result<T> = std::result::Result<T, GradeError>;
