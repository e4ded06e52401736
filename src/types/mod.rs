// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Ledger identifiers and the block model.

pub mod id;
pub mod block;
