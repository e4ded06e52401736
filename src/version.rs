// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Height gated protocol versions.

use crate::config::{GRADING_V2_ACTIVATION, PEG_FREE_FLOATING_PRICE_ACTIVATION, V4_OPR_UPDATE};
use crate::error::{GradeError, Result};
use crate::types::block::Height;
use serde::{Deserialize, Serialize};
use core::fmt;

/// Ordinal of the grading rules in force at a height.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProtocolVersion(pub u8);

impl ProtocolVersion {
    /// Version in force below the first activation height.
    pub const BASELINE: ProtocolVersion = ProtocolVersion(1);
}

impl fmt::Display for ProtocolVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.0)
    }
}

/// One row of an [`ActivationTable`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Activation {
    pub height: Height,
    pub version: ProtocolVersion,
}

/// Ordered list of activation heights.
///
/// Heights are strictly ascending and each version is strictly greater than
/// the one before it, so [`ActivationTable::select`] is monotonic in height.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ActivationTable {
    rows: Vec<Activation>,
}

impl ActivationTable {
    pub fn new(rows: Vec<Activation>) -> Result<Self> {
        let mut prev: Option<&Activation> = None;
        for row in &rows {
            if row.version < ProtocolVersion::BASELINE {
                return Err(GradeError::InvalidActivationTable(format!(
                    "version {} at height {} is below the baseline",
                    row.version.0, row.height
                )));
            }
            if let Some(p) = prev {
                if row.height <= p.height {
                    return Err(GradeError::InvalidActivationTable(format!(
                        "height {} does not follow {}",
                        row.height, p.height
                    )));
                }
                if row.version <= p.version {
                    return Err(GradeError::InvalidActivationTable(format!(
                        "version {} at height {} does not follow {}",
                        row.version.0, row.height, p.version.0
                    )));
                }
            }
            prev = Some(row);
        }
        Ok(Self { rows })
    }

    /// Builds a table from `(height, version)` pairs.
    pub fn from_pairs(pairs: &[(Height, u8)]) -> Result<Self> {
        Self::new(
            pairs
                .iter()
                .map(|&(height, v)| Activation { height, version: ProtocolVersion(v) })
                .collect(),
        )
    }

    /// Mainnet activation heights.
    pub fn mainnet() -> Self {
        Self {
            rows: vec![
                Activation { height: GRADING_V2_ACTIVATION, version: ProtocolVersion(2) },
                Activation { height: PEG_FREE_FLOATING_PRICE_ACTIVATION, version: ProtocolVersion(3) },
                Activation { height: V4_OPR_UPDATE, version: ProtocolVersion(4) },
            ],
        }
    }

    /// Version of the last row whose activation height is at or below `height`.
    pub fn select(&self, height: Height) -> ProtocolVersion {
        self.rows
            .iter()
            .take_while(|row| row.height <= height)
            .last()
            .map(|row| row.version)
            .unwrap_or(ProtocolVersion::BASELINE)
    }

    pub fn rows(&self) -> &[Activation] {
        &self.rows
    }
}

impl Default for ActivationTable {
    fn default() -> Self {
        Self::mainnet()
    }
}

impl<'de> Deserialize<'de> for ActivationTable {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> core::result::Result<Self, D::Error> {
        let rows = Vec::<Activation>::deserialize(deserializer)?;
        ActivationTable::new(rows).map_err(serde::de::Error::custom)
    }
}
