// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use crate::config::{OPR_CHAIN, OPR_CHAIN_HEX};
use crate::error::IdError;
use crate::types::id::{Bytes32, ChainId, EntryHash};

#[test]
fn test_chain_id_hex_roundtrip() {
    let chain: ChainId = OPR_CHAIN_HEX.parse().unwrap();
    assert_eq!(chain.to_string(), OPR_CHAIN_HEX);
    assert_eq!(chain, ChainId::new(OPR_CHAIN));
}

#[test]
fn test_rejects_wrong_length() {
    let err = Bytes32::from_hex("abcd").unwrap_err();
    assert_eq!(err, IdError::Length { expected: 32, found: 2 });
    assert!(matches!("zz".parse::<ChainId>(), Err(IdError::Hex(_))));
}

#[test]
fn test_hex_error_keeps_cause() {
    let err = Bytes32::from_hex("zz").unwrap_err();
    assert_eq!(err, IdError::Hex(hex::FromHexError::InvalidHexCharacter { c: 'z', index: 0 }));
    assert_ne!(err, IdError::Length { expected: 32, found: 0 });
    assert_eq!(err.to_string(), "invalid hex: Invalid character 'z' at position 0");
}

#[test]
fn test_serde_as_hex_string() {
    let chain: ChainId = OPR_CHAIN_HEX.parse().unwrap();
    let json = serde_json::to_string(&chain).unwrap();
    assert_eq!(json, format!("\"{}\"", OPR_CHAIN_HEX));
    let back: ChainId = serde_json::from_str(&json).unwrap();
    assert_eq!(back, chain);
}

#[test]
fn test_short_hash() {
    let mut raw = [0u8; 32];
    raw[..8].copy_from_slice(&[0x3d, 0xd8, 0x54, 0xae, 0xb2, 0xd4, 0x9f, 0x85]);
    raw[8] = 0xff;
    assert_eq!(EntryHash::new(raw).short(), "3dd854aeb2d49f85");
}
