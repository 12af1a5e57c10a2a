// oversight-core/src/domain/rating.rs

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::error::DomainError;

// Discriminants follow severity, so `Rating::Critical > Rating::OnTrack` and
// sorting a portfolio by rating puts the healthiest projects first. `Unknown`
// sorts above `Critical`.

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Rating {
    OnTrack,
    AtRisk,
    Critical,
    /// A stored value that no longer parses. Never accepted as input.
    Unknown,
}

/// Presentation attributes of a rating. Colors and icons are design-system
/// tokens, not CSS classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RatingDisplay {
    pub label: &'static str,
    pub color: &'static str,
    pub icon: &'static str,
}

impl RatingDisplay {
    pub const UNKNOWN: RatingDisplay = RatingDisplay {
        label: "Unknown",
        color: "muted",
        icon: "help-circle",
    };
}

impl Rating {
    /// The ratings a user can pick.
    pub const ALL: [Rating; 3] = [Rating::OnTrack, Rating::AtRisk, Rating::Critical];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OnTrack => "on-track",
            Self::AtRisk => "at-risk",
            Self::Critical => "critical",
            Self::Unknown => "unknown",
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Unknown)
    }

    /// Lenient read of a stored value (dataset files, legacy rows). Anything
    /// that does not parse becomes [`Rating::Unknown`] instead of failing the load.
    pub fn from_stored(raw: &str) -> Rating {
        if raw.trim().eq_ignore_ascii_case("unknown") {
            return Self::Unknown;
        }
        match raw.parse::<Rating>() {
            Ok(rating) => rating,
            Err(_) => {
                tracing::warn!(value = raw, "Unrecognized rating, rendering as unknown");
                Self::Unknown
            }
        }
    }

    /// Input-side check: `Unknown` only ever comes from storage.
    pub fn ensure_known(self) -> Result<Rating, DomainError> {
        if self.is_known() {
            Ok(self)
        } else {
            Err(DomainError::InvalidRating(self.as_str().to_string()))
        }
    }

    /// The single rating -> presentation mapping.
    pub fn display(&self) -> RatingDisplay {
        match self {
            Self::OnTrack => RatingDisplay {
                label: "On Track",
                color: "green",
                icon: "check-circle",
            },
            Self::AtRisk => RatingDisplay {
                label: "At Risk",
                color: "yellow",
                icon: "alert-triangle",
            },
            Self::Critical => RatingDisplay {
                label: "Critical",
                color: "red",
                icon: "x-circle",
            },
            Self::Unknown => RatingDisplay::UNKNOWN,
        }
    }
}

impl<'de> Deserialize<'de> for Rating {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Rating::from_stored(&raw))
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Rating {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace(['_', ' '], "-").as_str() {
            "on-track" | "green" => Ok(Self::OnTrack),
            "at-risk" | "yellow" => Ok(Self::AtRisk),
            "critical" | "red" => Ok(Self::Critical),
            _ => Err(DomainError::InvalidRating(s.to_string())),
        }
    }
}

/// People / process / technology scores of a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct DimensionRatings {
    pub people: Option<Rating>,
    pub process: Option<Rating>,
    pub technology: Option<Rating>,
}

impl DimensionRatings {
    pub fn ensure_known(&self) -> Result<(), DomainError> {
        for rating in [self.people, self.process, self.technology].into_iter().flatten() {
            rating.ensure_known()?;
        }
        Ok(())
    }
}
