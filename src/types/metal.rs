use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Precious metals supported by the resolver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Metal {
    Gold,
    Silver,
    Platinum,
}

impl Metal {
    /// Parse the spot-endpoint form (`gold`/`silver`/`platinum` only).
    pub fn from_spot(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "gold" => Some(Metal::Gold),
            "silver" => Some(Metal::Silver),
            "platinum" => Some(Metal::Platinum),
            _ => None,
        }
    }

    /// Parse either the plain name or the ISO 4217 metal code (XAU/XAG/XPT).
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "gold" | "xau" => Some(Metal::Gold),
            "silver" | "xag" => Some(Metal::Silver),
            "platinum" | "xpt" => Some(Metal::Platinum),
            _ => None,
        }
    }

    /// Lowercase name, used in cache keys and logs.
    pub fn name(&self) -> &'static str {
        match self {
            Metal::Gold => "gold",
            Metal::Silver => "silver",
            Metal::Platinum => "platinum",
        }
    }

    /// ISO 4217 code used by most provider URL templates.
    pub fn code(&self) -> &'static str {
        match self {
            Metal::Gold => "XAU",
            Metal::Silver => "XAG",
            Metal::Platinum => "XPT",
        }
    }

    /// Default server-side spot cache validity. Gold moves the most traffic,
    /// so it gets the longest window.
    pub fn spot_ttl(&self) -> Duration {
        match self {
            Metal::Gold => Duration::from_secs(300),
            Metal::Silver | Metal::Platinum => Duration::from_secs(120),
        }
    }
}

impl fmt::Display for Metal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
