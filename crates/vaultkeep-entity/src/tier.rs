//! Subscription tiers and their storage ceilings.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use vaultkeep_core::error::AppError;

/// Subscription level of an account, determining its storage ceiling.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type, Default,
)]
#[serde(rename_all = "UPPERCASE")]
#[sqlx(type_name = "text", rename_all = "UPPERCASE")]
pub enum SubscriptionTier {
    /// No recognized subscription; no storage allowance.
    #[default]
    Unknown,
    /// Regular subscription.
    Regular,
    /// Premium subscription.
    Premium,
}

impl SubscriptionTier {
    /// Byte ceiling for objects stored under this tier.
    pub fn ceiling_bytes(&self) -> u64 {
        match self {
            Self::Unknown => 0,
            Self::Regular => 10 * 1024 * 1024,
            Self::Premium => 1024 * 1024 * 1024,
        }
    }
}

impl fmt::Display for SubscriptionTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unknown => write!(f, "UNKNOWN"),
            Self::Regular => write!(f, "REGULAR"),
            Self::Premium => write!(f, "PREMIUM"),
        }
    }
}

impl FromStr for SubscriptionTier {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "UNKNOWN" => Ok(Self::Unknown),
            "REGULAR" => Ok(Self::Regular),
            "PREMIUM" => Ok(Self::Premium),
            other => Err(AppError::validation(format!(
                "unknown subscription tier: {other}"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ceilings_match_tiers() {
        assert_eq!(SubscriptionTier::Unknown.ceiling_bytes(), 0);
        assert_eq!(SubscriptionTier::Regular.ceiling_bytes(), 10 * 1024 * 1024);
        assert_eq!(SubscriptionTier::Premium.ceiling_bytes(), 1024 * 1024 * 1024);
    }

    #[test]
    fn parses_case_insensitively() {
        assert_eq!(
            "premium".parse::<SubscriptionTier>().unwrap(),
            SubscriptionTier::Premium
        );
        assert!("gold".parse::<SubscriptionTier>().is_err());
    }

    #[test]
    fn serde_uses_uppercase_names() {
        let json = serde_json::to_string(&SubscriptionTier::Regular).unwrap();
        assert_eq!(json, "\"REGULAR\"");
        let tier: SubscriptionTier = serde_json::from_str("\"UNKNOWN\"").unwrap();
        assert_eq!(tier, SubscriptionTier::Unknown);
    }
}
