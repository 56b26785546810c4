//! Warp controller contract and the discrete rate table it exposes.

use serde::{Deserialize, Serialize};

use crate::ContractError;

/// Default multiplier ladder of the host's rate-based warp
pub const DEFAULT_WARP_RATES: [f64; 8] = [
    1.0, 5.0, 10.0, 50.0, 100.0, 1_000.0, 10_000.0, 100_000.0,
];

/// Ordered table of warp multipliers
///
/// Ascending, strictly positive, index 0 is always 1x (real time).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<f64>", into = "Vec<f64>")]
pub struct WarpRateTable(Vec<f64>);

impl WarpRateTable {
    /// Build a table, rejecting empty, non-ascending or non-positive ladders
    pub fn new(rates: Vec<f64>) -> Result<Self, ContractError> {
        let Some(&first) = rates.first() else {
            return Err(ContractError::invalid_warp_table(&rates, "table is empty"));
        };
        if first != 1.0 {
            return Err(ContractError::invalid_warp_table(
                &rates,
                format!("index 0 must be 1x, got {first}"),
            ));
        }
        if let Some(bad) = rates.iter().find(|r| !r.is_finite() || **r <= 0.0) {
            return Err(ContractError::invalid_warp_table(
                &rates,
                format!("rates must be finite and > 0, got {bad}"),
            ));
        }
        if rates.windows(2).any(|w| w[1] <= w[0]) {
            return Err(ContractError::invalid_warp_table(
                &rates,
                "rates must be strictly ascending",
            ));
        }
        Ok(Self(rates))
    }

    pub fn rates(&self) -> &[f64] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Multiplier at `index`, if present
    pub fn rate(&self, index: usize) -> Option<f64> {
        self.0.get(index).copied()
    }

    /// True when the table offers nothing beyond real time
    pub fn is_degenerate(&self) -> bool {
        self.0.len() < 2
    }
}

impl Default for WarpRateTable {
    fn default() -> Self {
        Self(DEFAULT_WARP_RATES.to_vec())
    }
}

impl TryFrom<Vec<f64>> for WarpRateTable {
    type Error = ContractError;

    fn try_from(rates: Vec<f64>) -> Result<Self, Self::Error> {
        Self::new(rates)
    }
}

impl From<WarpRateTable> for Vec<f64> {
    fn from(table: WarpRateTable) -> Self {
        table.0
    }
}

/// Kind of acceleration the host is currently offering
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarpMode {
    /// Rate-based warp over the discrete table; the engine may select rates
    #[default]
    High,
    /// Physics-preserving warp; the engine leaves the rate alone
    Physics,
}

/// Warp controller trait
///
/// Owned by the host. The engine reads the table and active index and writes
/// a chosen index; calls are synchronous with no internal queuing.
pub trait WarpController {
    /// Ascending multiplier table, index 0 is 1x
    fn rates(&self) -> &[f64];

    /// Index of the active multiplier
    fn current_rate_index(&self) -> usize;

    /// Current warp mode
    fn mode(&self) -> WarpMode {
        WarpMode::High
    }

    /// Activate the multiplier at `index`
    fn set_rate_index(&mut self, index: usize);

    /// Cancel any automatic acceleration in progress
    fn cancel_auto_warp(&mut self);
}
