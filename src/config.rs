// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Protocol constants.

/// Hex chain id of the mainnet OPR chain.
pub const OPR_CHAIN_HEX: &str = "cffce0f409ebba4ed236d49d89c70e4bd1f1367d86402a3363366683265a242d";

/// Raw bytes of [`OPR_CHAIN_HEX`].
pub const OPR_CHAIN: [u8; 32] = [
    0xcf, 0xfc, 0xe0, 0xf4, 0x09, 0xeb, 0xba, 0x4e, 0xd2, 0x36, 0xd4, 0x9d, 0x89, 0xc7, 0x0e, 0x4b,
    0xd1, 0xf1, 0x36, 0x7d, 0x86, 0x40, 0x2a, 0x33, 0x63, 0x36, 0x66, 0x83, 0x26, 0x5a, 0x24, 0x2d,
];

/// Height at which grading v2 activates on mainnet.
pub const GRADING_V2_ACTIVATION: u32 = 210_330;

/// Height at which the free floating PEG price (v3) activates on mainnet.
pub const PEG_FREE_FLOATING_PRICE_ACTIVATION: u32 = 222_270;

/// Height at which the v4 OPR record update activates on mainnet.
pub const V4_OPR_UPDATE: u32 = 231_620;

/// Highest protocol version any built-in grader understands.
pub const MAX_PROTOCOL_VERSION: u8 = 4;

/// Number of winners a v1 block produces.
pub const V1_WINNER_COUNT: usize = 10;

/// Number of winners a v2+ block produces.
pub const WINNER_COUNT: usize = 25;

/// Bytes of the entry hash used as a winner's short hash.
pub const SHORT_HASH_LEN: usize = 8;

/// External ids on an OPR entry: nonce, self reported difficulty, record version.
pub const OPR_EXT_ID_COUNT: usize = 3;
