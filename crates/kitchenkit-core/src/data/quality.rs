//! Quality tiers: the three price columns of the catalog.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Price column selected globally for estimation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum QualityTier {
    /// Entry level, functional and economic
    Started,
    /// Best price/quality ratio
    #[default]
    Premium,
    /// Top performance hardware
    Deluxe,
}

impl QualityTier {
    /// Get all tiers, cheapest first
    pub fn all() -> &'static [QualityTier] {
        &[QualityTier::Started, QualityTier::Premium, QualityTier::Deluxe]
    }

    /// Key used in the catalog's `prices` object and in storage.
    pub fn key(&self) -> &'static str {
        match self {
            Self::Started => "started",
            Self::Premium => "premium",
            Self::Deluxe => "deluxe",
        }
    }

    /// One-line pitch shown next to the tier name.
    pub fn highlight(&self) -> &'static str {
        match self {
            Self::Started => "Functional and economic",
            Self::Premium => "Best price/quality ratio",
            Self::Deluxe => "Top performance",
        }
    }

    /// Maps any stored key to a tier; unknown keys price as `Started`.
    pub fn from_key_lenient(key: &str) -> Self {
        key.parse().unwrap_or(Self::Started)
    }
}

impl fmt::Display for QualityTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Started => write!(f, "Started"),
            Self::Premium => write!(f, "Premium"),
            Self::Deluxe => write!(f, "Deluxe"),
        }
    }
}

impl FromStr for QualityTier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "started" => Ok(Self::Started),
            "premium" => Ok(Self::Premium),
            "deluxe" => Ok(Self::Deluxe),
            _ => Err(format!("Unknown quality tier: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_display() {
        assert_eq!("Deluxe".parse::<QualityTier>(), Ok(QualityTier::Deluxe));
        assert_eq!(" premium ".parse::<QualityTier>(), Ok(QualityTier::Premium));
        assert!("gold".parse::<QualityTier>().is_err());
        assert_eq!(QualityTier::Started.to_string(), "Started");
        assert_eq!(QualityTier::Deluxe.key(), "deluxe");
    }

    #[test]
    fn test_lenient_key_falls_back_to_started() {
        assert_eq!(QualityTier::from_key_lenient("gold"), QualityTier::Started);
        assert_eq!(QualityTier::from_key_lenient("premium"), QualityTier::Premium);
    }

    #[test]
    fn test_serde_lowercase() {
        let json = serde_json::to_string(&QualityTier::Premium).unwrap();
        assert_eq!(json, "\"premium\"");
        let tier: QualityTier = serde_json::from_str("\"deluxe\"").unwrap();
        assert_eq!(tier, QualityTier::Deluxe);
    }
}
