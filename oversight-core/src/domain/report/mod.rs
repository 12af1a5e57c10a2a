// oversight-core/src/domain/report/mod.rs

pub mod finding;
pub mod period;
pub mod review;
pub mod status;

pub use finding::{Finding, FindingInput, FindingKind, FindingStatus};
pub use period::ReportingPeriod;
pub use review::{ReviewAction, ReviewComment, ReviewEvent};
pub use status::ReportStatus;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::actor::Actor;
use crate::domain::error::DomainError;
use crate::domain::rating::{DimensionRatings, Rating};

/// Monthly IV&V report. Owns its findings and its review log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub id: String,
    pub project_id: String,
    pub period: ReportingPeriod,
    #[serde(default)]
    pub status: ReportStatus,
    #[serde(default)]
    pub overall_rating: Option<Rating>,
    #[serde(default)]
    pub dimensions: DimensionRatings,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub achievements: Vec<String>,
    #[serde(default)]
    pub challenges: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub submitted_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub submitted_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub approved_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub approved_by: Option<String>,
    #[serde(default)]
    pub findings: Vec<Finding>,
    #[serde(default)]
    pub review_log: Vec<ReviewEvent>,
}

/// Vendor report form. Every field is optional while drafting; completeness is
/// checked at submission.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct DraftInput {
    #[validate(length(max = 5000, message = "summary is limited to 5000 characters"))]
    pub summary: Option<String>,
    pub overall_rating: Option<Rating>,
    pub people: Option<Rating>,
    pub process: Option<Rating>,
    pub technology: Option<Rating>,
    #[validate(length(max = 20, message = "at most 20 achievements"))]
    pub achievements: Option<Vec<String>>,
    #[validate(length(max = 20, message = "at most 20 challenges"))]
    pub challenges: Option<Vec<String>>,
}

fn clean_items(items: Vec<String>) -> Vec<String> {
    items
        .into_iter()
        .map(|i| i.trim().to_string())
        .filter(|i| !i.is_empty())
        .collect()
}

impl Report {
    pub fn draft(
        id: impl Into<String>,
        project_id: impl Into<String>,
        period: ReportingPeriod,
    ) -> Self {
        Self {
            id: id.into(),
            project_id: project_id.into(),
            period,
            status: ReportStatus::Draft,
            overall_rating: None,
            dimensions: DimensionRatings::default(),
            summary: String::new(),
            achievements: Vec::new(),
            challenges: Vec::new(),
            submitted_at: None,
            submitted_by: None,
            approved_at: None,
            approved_by: None,
            findings: Vec::new(),
            review_log: Vec::new(),
        }
    }

    pub fn is_public(&self) -> bool {
        self.status.is_public()
    }

    fn ensure_editable(&self) -> Result<(), DomainError> {
        if self.status.is_editable() {
            Ok(())
        } else {
            Err(DomainError::ReportLocked {
                report_id: self.id.clone(),
                status: self.status.to_string(),
            })
        }
    }

    fn transition_to(&mut self, next: ReportStatus) -> Result<(), DomainError> {
        if !self.status.can_transition_to(&next) {
            return Err(DomainError::InvalidTransition {
                entity: "report",
                from: self.status.to_string(),
                to: next.to_string(),
            });
        }
        self.status = next;
        Ok(())
    }

    /// Applies the fields present in `input`; absent fields keep their value.
    pub fn apply_draft(&mut self, input: DraftInput) -> Result<(), DomainError> {
        self.ensure_editable()?;
        input.validate()?;
        if let Some(rating) = input.overall_rating {
            rating.ensure_known()?;
        }
        DimensionRatings {
            people: input.people,
            process: input.process,
            technology: input.technology,
        }
        .ensure_known()?;

        if let Some(summary) = input.summary {
            self.summary = summary.trim().to_string();
        }
        if input.overall_rating.is_some() {
            self.overall_rating = input.overall_rating;
        }
        if input.people.is_some() {
            self.dimensions.people = input.people;
        }
        if input.process.is_some() {
            self.dimensions.process = input.process;
        }
        if input.technology.is_some() {
            self.dimensions.technology = input.technology;
        }
        if let Some(items) = input.achievements {
            self.achievements = clean_items(items);
        }
        if let Some(items) = input.challenges {
            self.challenges = clean_items(items);
        }
        Ok(())
    }

    /// Field-level reasons the report cannot be submitted yet.
    pub fn missing_for_submission(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.summary.trim().is_empty() {
            missing.push("summary");
        }
        if !self.overall_rating.is_some_and(|r| r.is_known()) {
            missing.push("overall rating");
        }
        missing
    }

    /// Draft -> Submitted, or ChangesRequested -> Submitted after a revision.
    pub fn submit(&mut self, by: &Actor, now: DateTime<Utc>) -> Result<(), DomainError> {
        let missing = self.missing_for_submission();
        if !missing.is_empty() {
            return Err(DomainError::Validation(format!(
                "report '{}' is incomplete: {}",
                self.id,
                missing.join(", ")
            )));
        }
        let action = if self.status == ReportStatus::ChangesRequested {
            ReviewAction::Resubmitted
        } else {
            ReviewAction::Submitted
        };
        self.transition_to(ReportStatus::Submitted)?;
        self.submitted_at = Some(now);
        self.submitted_by = Some(by.user.clone());
        self.review_log.push(ReviewEvent::new(by, action, None, now));
        Ok(())
    }

    pub fn approve(
        &mut self,
        by: &Actor,
        comment: Option<ReviewComment>,
        now: DateTime<Utc>,
    ) -> Result<(), DomainError> {
        if let Some(c) = &comment {
            c.validate()?;
        }
        self.transition_to(ReportStatus::Approved)?;
        self.approved_at = Some(now);
        self.approved_by = Some(by.user.clone());
        self.review_log.push(ReviewEvent::new(
            by,
            ReviewAction::Approved,
            comment.map(|c| c.text),
            now,
        ));
        Ok(())
    }

    pub fn request_changes(
        &mut self,
        by: &Actor,
        comment: ReviewComment,
        now: DateTime<Utc>,
    ) -> Result<(), DomainError> {
        comment.validate()?;
        self.transition_to(ReportStatus::ChangesRequested)?;
        self.review_log.push(ReviewEvent::new(
            by,
            ReviewAction::ChangesRequested,
            Some(comment.text),
            now,
        ));
        Ok(())
    }

    /// Review discussion; drafts are private to the vendor and take no comments.
    pub fn add_comment(
        &mut self,
        by: &Actor,
        comment: ReviewComment,
        now: DateTime<Utc>,
    ) -> Result<(), DomainError> {
        comment.validate()?;
        if self.status == ReportStatus::Draft {
            return Err(DomainError::ReportLocked {
                report_id: self.id.clone(),
                status: self.status.to_string(),
            });
        }
        self.review_log.push(ReviewEvent::new(
            by,
            ReviewAction::Commented,
            Some(comment.text),
            now,
        ));
        Ok(())
    }

    fn next_finding_id(&self) -> String {
        let mut seq = self.findings.len() + 1;
        loop {
            let candidate = format!("{}-f{}", self.id, seq);
            if !self.findings.iter().any(|f| f.id == candidate) {
                return candidate;
            }
            seq += 1;
        }
    }

    pub fn add_finding(
        &mut self,
        input: FindingInput,
        raised_on: NaiveDate,
    ) -> Result<&Finding, DomainError> {
        self.ensure_editable()?;
        let id = self.next_finding_id();
        let finding = Finding::from_input(id, &self.id, &self.project_id, input, raised_on)?;
        self.findings.push(finding);
        let last = self.findings.len() - 1;
        Ok(&self.findings[last])
    }

    pub fn remove_finding(&mut self, finding_id: &str) -> Result<Finding, DomainError> {
        self.ensure_editable()?;
        let pos = self.position_of(finding_id)?;
        Ok(self.findings.remove(pos))
    }

    /// Finding status is tracked in every report state, published ones included.
    pub fn update_finding_status(
        &mut self,
        finding_id: &str,
        next: FindingStatus,
        on: NaiveDate,
    ) -> Result<&Finding, DomainError> {
        let pos = self.position_of(finding_id)?;
        self.findings[pos].transition(next, on)?;
        Ok(&self.findings[pos])
    }

    pub fn finding(&self, finding_id: &str) -> Option<&Finding> {
        self.findings.iter().find(|f| f.id == finding_id)
    }

    pub fn open_findings(&self) -> impl Iterator<Item = &Finding> {
        self.findings.iter().filter(|f| f.is_open())
    }

    fn position_of(&self, finding_id: &str) -> Result<usize, DomainError> {
        self.findings
            .iter()
            .position(|f| f.id == finding_id)
            .ok_or_else(|| DomainError::FindingNotFound {
                report_id: self.id.clone(),
                finding_id: finding_id.to_string(),
            })
    }
}
