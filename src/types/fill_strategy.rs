//! Strategies for filling missing numeric values.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// How missing values in numeric columns are filled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FillStrategy {
    /// Replace with the column's mean over its present values.
    Mean,
    /// Replace with the column's median over its present values.
    Median,
    /// Carry the previous present value forward, then fill any leading
    /// gap from the first present value.
    #[serde(alias = "ffill", alias = "bfill")]
    ForwardThenBackward,
}

impl FillStrategy {
    pub fn name(&self) -> &'static str {
        match self {
            FillStrategy::Mean => "mean",
            FillStrategy::Median => "median",
            FillStrategy::ForwardThenBackward => "forward-then-backward",
        }
    }
}

impl fmt::Display for FillStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Returned when a strategy name is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown fill strategy '{0}'")]
pub struct UnknownFillStrategy(pub String);

impl FromStr for FillStrategy {
    type Err = UnknownFillStrategy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mean" => Ok(FillStrategy::Mean),
            "median" => Ok(FillStrategy::Median),
            "forward-then-backward" | "ffill" | "bfill" => Ok(FillStrategy::ForwardThenBackward),
            _ => Err(UnknownFillStrategy(s.to_string())),
        }
    }
}
