use crate::types::DisplaySize;
use std::str::FromStr;
use thiserror::Error;

const KIB: f64 = 1024.0;

/// Display unit for repository sizes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unit {
    B,
    Kb,
    Mb,
    Gb,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum UnitError {
    #[error("invalid unit '{0}' (expected one of B, KB, MB, GB)")]
    InvalidUnit(String),
}

impl FromStr for Unit {
    type Err = UnitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "B" => Ok(Unit::B),
            "KB" => Ok(Unit::Kb),
            "MB" => Ok(Unit::Mb),
            "GB" => Ok(Unit::Gb),
            other => Err(UnitError::InvalidUnit(other.to_string())),
        }
    }
}

impl std::fmt::Display for Unit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Unit::B => write!(f, "B"),
            Unit::Kb => write!(f, "KB"),
            Unit::Mb => write!(f, "MB"),
            Unit::Gb => write!(f, "GB"),
        }
    }
}

impl Unit {
    /// Convert a kilobyte count into this unit
    pub fn convert(self, kilobytes: u64) -> DisplaySize {
        match self {
            Unit::B => DisplaySize::Whole(kilobytes.saturating_mul(1024)),
            Unit::Kb => DisplaySize::Whole(kilobytes),
            Unit::Mb => DisplaySize::Fractional(round2(kilobytes as f64 / KIB)),
            Unit::Gb => DisplaySize::Fractional(round2(kilobytes as f64 / KIB / KIB)),
        }
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
