// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Bounded concurrent hydration of entry blocks.
//!
//! Entry indices are queued up front and drained by a fixed pool of workers.
//! Each worker fetches one entry at a time and reports `(index, result)` back
//! to the caller, which owns the block and writes the payloads in.
//!
//! The first failed fetch ends the batch. The caller then cancels the shared
//! token and joins every worker before returning. Workers check the token
//! before taking work, while fetching and before reporting, so no worker
//! outlives the call or reports into a channel nobody reads.

use crate::store::{RemoteStore, StoreError};
use opr_kernel::{EntryBlock, EntryHash, EntryPayload};
use std::sync::Arc;
use std::time::Instant;
use thiserror::Error;
use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;

/// Worker count used when none is configured.
pub const DEFAULT_FETCH_WORKERS: usize = 8;

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("entry {hash}: {source}")]
    Entry { hash: EntryHash, source: StoreError },
    #[error("fetch workers exited after hydrating {hydrated} of {total} entries")]
    WorkerLost { hydrated: usize, total: usize },
}

type Report = (usize, Result<EntryPayload, StoreError>);

#[derive(Debug, Clone, Copy)]
pub struct BoundedFetcher {
    workers: usize,
}

impl Default for BoundedFetcher {
    fn default() -> Self {
        Self::new(DEFAULT_FETCH_WORKERS)
    }
}

impl BoundedFetcher {
    /// A fetcher running at most `workers` fetches at once. Zero is treated as one.
    pub fn new(workers: usize) -> Self {
        Self { workers: workers.max(1) }
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Hydrates every entry of `block`.
    ///
    /// Returns `Ok` only once every entry holds its payload. On the first
    /// failure the remaining work is cancelled and the error returned; entries
    /// hydrated before that keep their payloads.
    pub async fn hydrate<S>(&self, store: Arc<S>, block: &mut EntryBlock) -> Result<(), FetchError>
    where
        S: RemoteStore + ?Sized + 'static,
    {
        let total = block.entries.len();
        if total == 0 {
            return Ok(());
        }

        // 1. Queue every index, then close the queue.
        let (work_tx, work_rx) = mpsc::channel::<usize>(total);
        for index in 0..total {
            if work_tx.send(index).await.is_err() {
                break;
            }
        }
        drop(work_tx);

        // 2. Spawn the pool.
        let queue = Arc::new(Mutex::new(work_rx));
        let hashes: Arc<Vec<EntryHash>> = Arc::new(block.entries.iter().map(|e| e.hash).collect());
        let (report_tx, mut report_rx) = mpsc::channel::<Report>(self.workers);
        let cancel = CancellationToken::new();

        let pool = self.workers.min(total);
        let mut workers = JoinSet::new();
        for id in 0..pool {
            workers.spawn(fetch_worker(
                id,
                store.clone(),
                hashes.clone(),
                queue.clone(),
                report_tx.clone(),
                cancel.clone(),
            ));
        }
        drop(report_tx);
        tracing::debug!(entries = total, workers = pool, "hydrating entry block {}", block.key_mr);

        // 3. Collect until complete or first failure.
        let outcome = collect(total, &mut report_rx, block).await;

        // 4. Stop and join the pool before handing control back.
        cancel.cancel();
        while let Some(joined) = workers.join_next().await {
            if let Err(e) = joined {
                tracing::warn!("fetch worker did not exit cleanly: {}", e);
            }
        }
        drop(report_rx);

        if outcome.is_err() {
            metrics::counter!("opr_fetch_failures_total", 1);
        }
        outcome
    }
}

async fn collect(total: usize, reports: &mut mpsc::Receiver<Report>, block: &mut EntryBlock) -> Result<(), FetchError> {
    let mut hydrated = 0;
    while hydrated < total {
        match reports.recv().await {
            Some((index, Ok(payload))) => {
                block.entries[index].hydrate(payload);
                hydrated += 1;
                metrics::counter!("opr_entries_fetched_total", 1);
            }
            Some((index, Err(source))) => {
                let hash = block.entries[index].hash;
                tracing::warn!(%hash, "entry fetch failed: {}", source);
                return Err(FetchError::Entry { hash, source });
            }
            // Every sender is gone with work outstanding.
            None => return Err(FetchError::WorkerLost { hydrated, total }),
        }
    }
    Ok(())
}

async fn fetch_worker<S>(
    id: usize,
    store: Arc<S>,
    hashes: Arc<Vec<EntryHash>>,
    queue: Arc<Mutex<mpsc::Receiver<usize>>>,
    reports: mpsc::Sender<Report>,
    cancel: CancellationToken,
) where
    S: RemoteStore + ?Sized,
{
    loop {
        let next = tokio::select! {
            biased;
            _ = cancel.cancelled() => break,
            next = async { queue.lock().await.recv().await } => next,
        };
        let Some(index) = next else { break };

        let started = Instant::now();
        let result = tokio::select! {
            biased;
            _ = cancel.cancelled() => break,
            result = store.entry(&hashes[index]) => result,
        };
        metrics::histogram!("opr_fetch_duration_seconds", started.elapsed().as_secs_f64());

        tokio::select! {
            biased;
            _ = cancel.cancelled() => break,
            sent = reports.send((index, result)) => {
                if sent.is_err() {
                    break;
                }
            }
        }
    }
    tracing::trace!(worker = id, "fetch worker exiting");
}
