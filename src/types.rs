use crate::units::Unit;
use serde::{Serialize, Serializer};
use serde_json::value::RawValue;

/// Size converted into a display unit
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DisplaySize {
    /// Byte and kilobyte counts
    Whole(u64),
    /// Megabyte and gigabyte values, always shown with two decimals
    Fractional(f64),
}

impl std::fmt::Display for DisplaySize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DisplaySize::Whole(n) => write!(f, "{}", n),
            DisplaySize::Fractional(v) => write!(f, "{:.2}", v),
        }
    }
}

// Emitted verbatim so that `2.00` stays `2.00` in JSON instead of `2.0`.
impl Serialize for DisplaySize {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let raw = RawValue::from_string(self.to_string()).map_err(serde::ser::Error::custom)?;
        raw.serialize(serializer)
    }
}

/// Owner and name of a repository, parsed from its URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoPath {
    pub owner: String,
    pub name: String,
}

/// Result of querying a single repository
#[derive(Debug, Clone)]
pub struct RepositoryInfo {
    /// URL as given on the command line
    pub url: String,
    /// Size in kilobytes as reported (or summed across branches)
    pub size_kb: u64,
    pub size: DisplaySize,
    pub unit: Unit,
    pub language: Option<String>,
    pub stars: Option<u64>,
    pub forks: Option<u64>,
    pub last_commit: Option<String>,
}

/// Render an optional upstream value the way the forge's absent fields show up: `null`
pub fn or_null<T: ToString>(value: &Option<T>) -> String {
    value
        .as_ref()
        .map(ToString::to_string)
        .unwrap_or_else(|| "null".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_size_format() {
        assert_eq!(DisplaySize::Whole(2048).to_string(), "2048");
        assert_eq!(DisplaySize::Fractional(2.0).to_string(), "2.00");
        assert_eq!(DisplaySize::Fractional(0.5).to_string(), "0.50");
    }

    #[test]
    fn test_display_size_serializes_as_bare_number() {
        let json = serde_json::to_string(&DisplaySize::Fractional(2.0)).unwrap();
        assert_eq!(json, "2.00");
        let json = serde_json::to_string(&DisplaySize::Whole(7)).unwrap();
        assert_eq!(json, "7");
    }

    #[test]
    fn test_or_null() {
        assert_eq!(or_null(&Some("Rust")), "Rust");
        assert_eq!(or_null(&Some(42u64)), "42");
        assert_eq!(or_null::<u64>(&None), "null");
    }
}
