// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use opr_cli::commands::{grade, version};
use opr_kernel::fixtures::{directory_for, opr_block};
use opr_kernel::grader::DifficultyGrader;
use opr_kernel::{ActivationTable, GradeOutcome, Height, ProtocolVersion};
use opr_node::config::NodeConfig;
use opr_node::pipeline::GradingPipeline;
use opr_node::store::MemoryStore;
use std::sync::Arc;

const HEIGHT: Height = 237_975;

async fn grade_fixture(count: usize) -> GradeOutcome {
    let cfg = NodeConfig::default();
    let eblock = opr_block(cfg.opr_chain, HEIGHT, ProtocolVersion(4), &cfg.previous_winners, count);
    let mut store = MemoryStore::new();
    store.insert_directory(directory_for(HEIGHT, &[&eblock]));
    store.insert_entry_block(eblock);
    let pipeline = GradingPipeline::new(Arc::new(store), DifficultyGrader, &cfg);
    pipeline.grade_height(HEIGHT).await.unwrap()
}

#[tokio::test]
async fn test_render_graded_block() {
    let outcome = grade_fixture(25).await;
    let top = outcome.report().unwrap().top_winner().unwrap().short_hash.clone();

    let text = grade::render(&outcome, false).unwrap();
    assert!(text.contains("25 entries, 25 valid, 0 rejected"));
    assert!(text.contains(&format!("winner: {}", top)));

    let rates = outcome.report().unwrap().winners[0].assets.clone();
    assert_eq!(rates.len(), 4);
    assert!(text.contains(&format!("winner rate: {}", grade::format_rates(&rates))));
    assert!(text.contains("winner rate: PEG=0 USD="));

    let json = grade::render(&outcome, true).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["status"], "graded");
}

#[tokio::test]
async fn test_render_no_winners() {
    let outcome = grade_fixture(0).await;
    let text = grade::render(&outcome, false).unwrap();
    assert!(text.starts_with("block not graded, no winners"));
}

#[test]
fn test_render_ungraded() {
    let text = grade::render(&GradeOutcome::UngradedNoBlock { height: 9 }, false).unwrap();
    assert_eq!(text, "ungraded: no OPR block at height 9");
}

#[test]
fn test_version_command() {
    let table = ActivationTable::mainnet();
    assert_eq!(version::render(210_329, &table), "height 210329 grades under v1");
    assert_eq!(version::render(237_975, &table), "height 237975 grades under v4");
}
