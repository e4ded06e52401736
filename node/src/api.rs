// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use opr_kernel::{Height, ProtocolVersion};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct VersionResponse {
    pub height: Height,
    pub version: ProtocolVersion,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HealthResponse {
    pub status: String,
    pub chain: String,
}
