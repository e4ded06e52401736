// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use crate::fixtures::{opr_block, seed_winners};
use crate::grader::DifficultyGrader;
use crate::outcome::{GradeOutcome, GradedReport};
use crate::session::GradingSession;
use crate::types::id::ChainId;
use crate::version::ProtocolVersion;

#[test]
fn test_empty_report_differs_from_no_block() {
    let chain = ChainId::new([1; 32]);
    let mut session = GradingSession::open(&DifficultyGrader, ProtocolVersion(2), 50, vec![]).unwrap();
    let graded = session.finalize().unwrap();
    let report = GradedReport::new(chain, 0, graded, session.take_rejected());

    let graded = GradeOutcome::Graded(report);
    let ungraded = GradeOutcome::UngradedNoBlock { height: 50 };
    assert!(graded.is_graded());
    assert!(!graded.report().unwrap().has_winners());
    assert!(!ungraded.is_graded());
    assert_ne!(graded, ungraded);

    let json = serde_json::to_value(&ungraded).unwrap();
    assert_eq!(json["status"], "ungraded_no_block");
    let json = serde_json::to_value(&graded).unwrap();
    assert_eq!(json["status"], "graded");
    assert_eq!(json["winners"].as_array().unwrap().len(), 0);
}

#[test]
fn test_report_top_winner() {
    let chain = ChainId::new([1; 32]);
    let seed = seed_winners(25);
    let block = opr_block(chain, 300_000, ProtocolVersion(4), &seed, 3);

    let mut session = GradingSession::open(&DifficultyGrader, ProtocolVersion(4), 300_000, seed).unwrap();
    session.feed(&block.entries).unwrap();
    let graded = session.finalize().unwrap();
    let report = GradedReport::new(chain, block.len(), graded, session.take_rejected());

    assert_eq!(report.entries, 3);
    assert_eq!(report.valid, 3);
    let top = report.top_winner().unwrap();
    assert!(block.entries.iter().any(|e| e.hash == top.hash));
}
