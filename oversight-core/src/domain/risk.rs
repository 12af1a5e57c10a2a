// oversight-core/src/domain/risk.rs

use serde::{Deserialize, Serialize};
use std::fmt;
use validator::Validate;

use crate::domain::error::DomainError;

/// Impact or likelihood on the 1..=3 scale used by findings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct ScoreLevel(u8);

impl ScoreLevel {
    pub const LOW: ScoreLevel = ScoreLevel(1);
    pub const MEDIUM: ScoreLevel = ScoreLevel(2);
    pub const HIGH: ScoreLevel = ScoreLevel(3);

    pub fn new(value: u8) -> Result<Self, DomainError> {
        if (1..=3).contains(&value) {
            Ok(Self(value))
        } else {
            Err(DomainError::InvalidScore(value))
        }
    }

    pub fn value(&self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for ScoreLevel {
    type Error = DomainError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ScoreLevel> for u8 {
    fn from(level: ScoreLevel) -> Self {
        level.0
    }
}

impl fmt::Display for ScoreLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Calculated risk rating, always in 1..=9.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct RiskScore(u8);

impl RiskScore {
    pub fn value(&self) -> u8 {
        self.0
    }
}

impl fmt::Display for RiskScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

pub fn score(impact: ScoreLevel, likelihood: ScoreLevel) -> RiskScore {
    RiskScore(impact.value() * likelihood.value())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeverityBand {
    Low,
    Medium,
    High,
}

impl SeverityBand {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }
}

impl fmt::Display for SeverityBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Lower bounds of the `high` and `medium` bands. Scores below `medium` are low.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[validate(schema(function = "validate_band_order"))]
pub struct SeverityPolicy {
    #[serde(default = "default_high")]
    #[validate(range(min = 1, max = 9))]
    pub high: u8,
    #[serde(default = "default_medium")]
    #[validate(range(min = 1, max = 9))]
    pub medium: u8,
}

fn default_high() -> u8 {
    6
}

fn default_medium() -> u8 {
    3
}

impl Default for SeverityPolicy {
    fn default() -> Self {
        Self {
            high: default_high(),
            medium: default_medium(),
        }
    }
}

fn validate_band_order(policy: &SeverityPolicy) -> Result<(), validator::ValidationError> {
    if policy.medium > policy.high {
        let mut err = validator::ValidationError::new("band_order");
        err.message = Some("medium threshold must not exceed high threshold".into());
        return Err(err);
    }
    Ok(())
}

impl SeverityPolicy {
    pub fn band(&self, score: RiskScore) -> SeverityBand {
        match score.value() {
            s if s >= self.high => SeverityBand::High,
            s if s >= self.medium => SeverityBand::Medium,
            _ => SeverityBand::Low,
        }
    }
}
