//! Target platform detection for ad policy.
//!
//! Interstitials only apply on native mobile targets; the web build uses a
//! separate tag-based ad mechanism that is outside this core.

use serde::{Deserialize, Serialize};

/// Runtime platform of the embedding application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Android,
    Ios,
    Web,
}

impl Platform {
    /// Whether the native interstitial pipeline applies on this platform.
    pub fn supports_interstitials(self) -> bool {
        !matches!(self, Platform::Web)
    }
}

impl std::str::FromStr for Platform {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "android" => Ok(Platform::Android),
            "ios" => Ok(Platform::Ios),
            "web" => Ok(Platform::Web),
            other => Err(format!("unknown platform: {other}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_web_has_no_interstitials() {
        assert!(!Platform::Web.supports_interstitials());
        assert!(Platform::Android.supports_interstitials());
        assert!(Platform::Ios.supports_interstitials());
    }

    #[test]
    fn test_parse() {
        assert_eq!("Android".parse::<Platform>().unwrap(), Platform::Android);
        assert!("windows".parse::<Platform>().is_err());
    }
}
