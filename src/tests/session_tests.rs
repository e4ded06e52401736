// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use crate::error::{GradeError, RejectCause, Result};
use crate::fixtures::{opr_entry, raw_entry, seed_winners};
use crate::grader::{DifficultyGrader, GradedBlock, Grader, GradingBlock};
use crate::session::{EntryOutcome, GradingSession};
use crate::types::block::Height;
use crate::types::id::EntryHash;
use crate::version::ProtocolVersion;

const V4: ProtocolVersion = ProtocolVersion(4);
const HEIGHT: Height = 237_975;

/// Grader that accepts everything and remembers the order it saw entries in.
struct RecordingGrader;

struct RecordingBlock {
    version: ProtocolVersion,
    height: Height,
    seed: Vec<String>,
    seen: Vec<EntryHash>,
}

impl Grader for RecordingGrader {
    type Block = RecordingBlock;

    fn supports(&self, version: ProtocolVersion) -> bool {
        version.0 <= 2
    }

    fn new_block(&self, version: ProtocolVersion, height: Height, previous_winners: &[String]) -> Result<RecordingBlock> {
        Ok(RecordingBlock { version, height, seed: previous_winners.to_vec(), seen: Vec::new() })
    }
}

impl GradingBlock for RecordingBlock {
    fn add_opr(&mut self, hash: &EntryHash, _ext_ids: &[Vec<u8>], _content: &[u8]) -> core::result::Result<(), RejectCause> {
        self.seen.push(*hash);
        Ok(())
    }

    fn grade(self) -> GradedBlock {
        // Encode the observed order and the seed into the winner list.
        let mut winners: Vec<_> = self
            .seen
            .iter()
            .map(|h| crate::grader::Winner { hash: *h, short_hash: h.short(), difficulty: 0, assets: Vec::new() })
            .collect();
        winners.extend(self.seed.iter().map(|s| crate::grader::Winner {
            hash: EntryHash::default(),
            short_hash: s.clone(),
            difficulty: 0,
            assets: Vec::new(),
        }));
        GradedBlock { version: self.version, height: self.height, valid: self.seen.len(), winners }
    }
}

#[test]
fn test_open_rejects_unsupported_version() {
    let err = GradingSession::open(&DifficultyGrader, ProtocolVersion(7), HEIGHT, vec![]).err();
    assert_eq!(err, Some(GradeError::InvalidVersion(7)));

    let err = GradingSession::open(&RecordingGrader, ProtocolVersion(3), HEIGHT, vec![]).err();
    assert_eq!(err, Some(GradeError::InvalidVersion(3)));
}

#[test]
fn test_open_rejects_height_zero() {
    let err = GradingSession::open(&DifficultyGrader, V4, 0, vec![]).err();
    assert_eq!(err, Some(GradeError::InvalidHeight(0)));
}

#[test]
fn test_zero_valid_entries_grades_empty() {
    let mut session = GradingSession::open(&DifficultyGrader, V4, HEIGHT, seed_winners(25)).unwrap();
    let bad = raw_entry(vec![], b"{}".to_vec());
    session.add_entry_ref(&bad).unwrap();

    let graded = session.finalize().unwrap();
    assert!(graded.winners.is_empty());
    assert_eq!(graded.valid, 0);
    assert_eq!(graded.height, HEIGHT);
    assert_eq!(graded.version, V4);
}

#[test]
fn test_malformed_entry_does_not_block_later_entries() {
    let seed = seed_winners(25);
    let mut session = GradingSession::open(&DifficultyGrader, V4, HEIGHT, seed.clone()).unwrap();

    let empty = raw_entry(vec![b"n".to_vec(), vec![0; 8], vec![4]], vec![]);
    let short = raw_entry(vec![b"n".to_vec()], b"{}".to_vec());
    let good = opr_entry(V4, HEIGHT, &seed, b"nonce-1");

    match session.add_entry_ref(&empty).unwrap() {
        EntryOutcome::Rejected(r) => {
            assert_eq!(r.hash, empty.hash);
            assert_eq!(r.cause, RejectCause::EmptyContent);
        }
        EntryOutcome::Accepted => panic!("empty content accepted"),
    }
    match session.add_entry_ref(&short).unwrap() {
        EntryOutcome::Rejected(r) => assert_eq!(r.cause, RejectCause::ExtIdCount { expected: 3, found: 1 }),
        EntryOutcome::Accepted => panic!("short ext ids accepted"),
    }
    assert!(session.add_entry_ref(&good).unwrap().is_accepted());

    assert_eq!(session.accepted(), 1);
    assert_eq!(session.rejected().len(), 2);

    let graded = session.finalize().unwrap();
    assert_eq!(graded.winners.len(), 1);
    assert_eq!(graded.winners[0].hash, good.hash);
}

#[test]
fn test_finalize_twice_fails() {
    let mut session = GradingSession::open(&DifficultyGrader, V4, HEIGHT, vec![]).unwrap();
    assert!(session.finalize().is_ok());
    assert!(session.is_finalized());
    assert_eq!(session.finalize().err(), Some(GradeError::AlreadyFinalized));

    let entry = opr_entry(V4, HEIGHT, &[], b"late");
    assert_eq!(session.add_entry_ref(&entry).err(), Some(GradeError::AlreadyFinalized));
}

#[test]
fn test_feed_preserves_block_order_and_seed() {
    let seed = vec!["ffff".to_string(), "0000".to_string(), "aaaa".to_string()];
    let entries: Vec<_> = (0u8..6)
        .map(|i| raw_entry(vec![vec![i]], vec![i; 4]))
        .collect();

    let mut session = GradingSession::open(&RecordingGrader, ProtocolVersion(2), 10, seed.clone()).unwrap();
    assert_eq!(session.feed(&entries).unwrap(), 6);
    assert_eq!(session.previous_winners(), seed.as_slice());

    let graded = session.finalize().unwrap();
    let observed: Vec<_> = graded.winners[..6].iter().map(|w| w.hash).collect();
    let expected: Vec<_> = entries.iter().map(|e| e.hash).collect();
    assert_eq!(observed, expected);

    let passed_seed: Vec<_> = graded.winners[6..].iter().map(|w| w.short_hash.clone()).collect();
    assert_eq!(passed_seed, seed);
}

#[test]
fn test_take_rejected_drains() {
    let mut session = GradingSession::open(&DifficultyGrader, V4, HEIGHT, vec![]).unwrap();
    session.add_entry_ref(&raw_entry(vec![], vec![])).unwrap();
    assert_eq!(session.take_rejected().len(), 1);
    assert!(session.rejected().is_empty());
}
