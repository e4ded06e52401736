// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use crate::fetcher::FetchError;
use crate::store::StoreError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use opr_kernel::{ChainId, GradeError, Height, KeyMr};
use serde_json::json;
use thiserror::Error;

/// Fatal failures of grading a height, one variant per phase.
#[derive(Error, Debug)]
pub enum NodeError {
    #[error("directory block {height}: {source}")]
    DirectoryBlock { height: Height, source: StoreError },
    #[error("entry block {key_mr}: {source}")]
    EntryBlock { key_mr: KeyMr, source: StoreError },
    #[error("entry fetch: {0}")]
    Fetch(#[from] FetchError),
    #[error("entry block belongs to chain {found}, expected {expected}")]
    WrongChain { expected: ChainId, found: ChainId },
    #[error("grading: {0}")]
    Grading(#[from] GradeError),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("configuration: {0}")]
    Config(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl NodeError {
    fn status(&self) -> StatusCode {
        match self {
            NodeError::DirectoryBlock { source: StoreError::NotFound(_), .. } => StatusCode::NOT_FOUND,
            NodeError::EntryBlock { source: StoreError::NotFound(_), .. } => StatusCode::NOT_FOUND,
            NodeError::DirectoryBlock { .. } | NodeError::EntryBlock { .. } | NodeError::Fetch(_) => {
                StatusCode::BAD_GATEWAY
            }
            NodeError::Grading(GradeError::InvalidHeight(_)) | NodeError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            NodeError::WrongChain { .. }
            | NodeError::Grading(_)
            | NodeError::Config(_)
            | NodeError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for NodeError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = Json(json!({
            "error": self.to_string()
        }));

        (status, body).into_response()
    }
}
