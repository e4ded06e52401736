// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
pub mod config;
pub mod errors;
pub mod store;
pub mod network;
pub mod fetcher;
pub mod pipeline;
pub mod api;
pub mod server;
pub mod telemetry;
