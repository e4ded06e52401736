// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Grading a height end to end.
//!
//! Directory block, then the OPR entry block, then concurrent hydration of
//! every entry, then a single sequential grading session. Hydration finishes
//! completely before the first entry reaches the grader.

use crate::config::NodeConfig;
use crate::errors::NodeError;
use crate::fetcher::BoundedFetcher;
use crate::store::RemoteStore;
use opr_kernel::{
    ActivationTable, ChainId, EntryBlock, GradeOutcome, GradedReport, Grader, GradingSession, Height, ProtocolVersion,
};
use std::sync::Arc;
use std::time::Instant;

pub struct GradingPipeline<S: ?Sized, G> {
    store: Arc<S>,
    grader: G,
    fetcher: BoundedFetcher,
    chain: ChainId,
    activations: ActivationTable,
    previous_winners: Vec<String>,
}

impl<S, G> GradingPipeline<S, G>
where
    S: RemoteStore + ?Sized + 'static,
    G: Grader + Send + Sync,
{
    pub fn new(store: Arc<S>, grader: G, cfg: &NodeConfig) -> Self {
        Self {
            store,
            grader,
            fetcher: BoundedFetcher::new(cfg.fetch_workers),
            chain: cfg.opr_chain,
            activations: cfg.activations.clone(),
            previous_winners: cfg.previous_winners.clone(),
        }
    }

    pub fn chain(&self) -> ChainId {
        self.chain
    }

    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    /// Protocol version in force at `height`.
    pub fn version_at(&self, height: Height) -> ProtocolVersion {
        self.activations.select(height)
    }

    /// Grades the OPR entry block at `height`.
    ///
    /// Returns [`GradeOutcome::UngradedNoBlock`] when the directory block
    /// lists no entry block for the configured chain.
    pub async fn grade_height(&self, height: Height) -> Result<GradeOutcome, NodeError> {
        let started = Instant::now();

        // 1. Directory block
        let dblock = self
            .store
            .directory_block(height)
            .await
            .map_err(|source| NodeError::DirectoryBlock { height, source })?;

        // 2. Entry block for the OPR chain
        let Some(key_mr) = dblock.entry_block(&self.chain) else {
            tracing::info!(height, "no OPR entry block, height left ungraded");
            return Ok(GradeOutcome::UngradedNoBlock { height });
        };
        let mut eblock = self
            .store
            .entry_block(&key_mr)
            .await
            .map_err(|source| NodeError::EntryBlock { key_mr, source })?;
        self.check_chain(&eblock)?;

        // 3. Hydrate
        self.fetcher.hydrate(self.store.clone(), &mut eblock).await?;
        tracing::debug!(
            height,
            entries = eblock.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "entry block hydrated"
        );

        // 4. Grade
        let report = self.grade_block(&eblock)?;
        Ok(GradeOutcome::Graded(report))
    }

    /// Grades an already hydrated entry block.
    pub fn grade_block(&self, eblock: &EntryBlock) -> Result<GradedReport, NodeError> {
        self.check_chain(eblock)?;

        let version = self.activations.select(eblock.height);
        let mut session = GradingSession::open(&self.grader, version, eblock.height, self.previous_winners.clone())?;
        let accepted = session.feed(&eblock.entries)?;
        let graded = session.finalize()?;
        let rejected = session.take_rejected();

        for r in &rejected {
            tracing::debug!(hash = %r.hash, "failed to add opr: {}", r.cause);
        }
        metrics::counter!("opr_entries_rejected_total", rejected.len() as u64);
        metrics::counter!("opr_heights_graded_total", 1);
        tracing::info!(
            height = eblock.height,
            %version,
            entries = eblock.len(),
            accepted,
            rejected = rejected.len(),
            winners = graded.winners.len(),
            "graded OPR block"
        );

        Ok(GradedReport::new(eblock.chain, eblock.len(), graded, rejected))
    }

    fn check_chain(&self, eblock: &EntryBlock) -> Result<(), NodeError> {
        if eblock.chain != self.chain {
            return Err(NodeError::WrongChain { expected: self.chain, found: eblock.chain });
        }
        Ok(())
    }
}
