// oversight-core/src/domain/report/finding.rs

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use validator::Validate;

use crate::domain::error::DomainError;
use crate::domain::risk::{self, RiskScore, ScoreLevel, SeverityBand, SeverityPolicy};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FindingKind {
    Risk,
    Issue,
}

impl fmt::Display for FindingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Risk => write!(f, "risk"),
            Self::Issue => write!(f, "issue"),
        }
    }
}

impl std::str::FromStr for FindingKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "risk" => Ok(Self::Risk),
            "issue" => Ok(Self::Issue),
            _ => Err(format!("Unknown finding type: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum FindingStatus {
    #[default]
    Open,
    InProgress,
    Closed,
}

impl FindingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::InProgress => "in_progress",
            Self::Closed => "closed",
        }
    }

    pub fn can_transition_to(&self, next: &FindingStatus) -> bool {
        matches!(
            (self, next),
            (Self::Open, Self::InProgress)
                | (Self::Open, Self::Closed)
                | (Self::InProgress, Self::Closed)
        )
    }
}

impl fmt::Display for FindingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for FindingStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "open" => Ok(Self::Open),
            "in_progress" => Ok(Self::InProgress),
            "closed" => Ok(Self::Closed),
            _ => Err(format!("Unknown finding status: {}", s)),
        }
    }
}

/// A risk or issue raised in a report. The calculated risk rating is not a
/// field: it is derived from impact and likelihood on every read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Finding {
    pub id: String,
    pub report_id: String,
    pub project_id: String,
    #[serde(rename = "type")]
    pub kind: FindingKind,
    pub description: String,
    pub impact: ScoreLevel,
    pub likelihood: ScoreLevel,
    #[serde(default)]
    pub status: FindingStatus,
    #[serde(default)]
    pub recommendation: String,
    pub raised_on: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub closed_on: Option<NaiveDate>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct FindingInput {
    #[serde(rename = "type")]
    pub kind: FindingKind,
    #[validate(length(min = 1, max = 2000, message = "description is required"))]
    pub description: String,
    #[validate(range(min = 1, max = 3, message = "impact must be between 1 and 3"))]
    pub impact: u8,
    #[validate(range(min = 1, max = 3, message = "likelihood must be between 1 and 3"))]
    pub likelihood: u8,
    #[validate(length(max = 2000))]
    #[serde(default)]
    pub recommendation: String,
}

impl Finding {
    pub(crate) fn from_input(
        id: String,
        report_id: &str,
        project_id: &str,
        input: FindingInput,
        raised_on: NaiveDate,
    ) -> Result<Self, DomainError> {
        input.validate()?;
        Ok(Self {
            id,
            report_id: report_id.to_string(),
            project_id: project_id.to_string(),
            kind: input.kind,
            description: input.description.trim().to_string(),
            impact: ScoreLevel::new(input.impact)?,
            likelihood: ScoreLevel::new(input.likelihood)?,
            status: FindingStatus::Open,
            recommendation: input.recommendation.trim().to_string(),
            raised_on,
            closed_on: None,
        })
    }

    pub fn risk_rating(&self) -> RiskScore {
        risk::score(self.impact, self.likelihood)
    }

    pub fn severity(&self, policy: &SeverityPolicy) -> SeverityBand {
        policy.band(self.risk_rating())
    }

    pub fn is_open(&self) -> bool {
        self.status != FindingStatus::Closed
    }

    pub fn transition(&mut self, next: FindingStatus, on: NaiveDate) -> Result<(), DomainError> {
        if !self.status.can_transition_to(&next) {
            return Err(DomainError::InvalidTransition {
                entity: "finding",
                from: self.status.to_string(),
                to: next.to_string(),
            });
        }
        self.status = next;
        if next == FindingStatus::Closed {
            self.closed_on = Some(on);
        }
        Ok(())
    }
}
