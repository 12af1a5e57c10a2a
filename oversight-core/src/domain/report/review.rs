// oversight-core/src/domain/report/review.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use validator::Validate;

use crate::domain::actor::{Actor, Role};
use crate::domain::error::DomainError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewAction {
    Submitted,
    Resubmitted,
    Approved,
    ChangesRequested,
    Commented,
}

impl fmt::Display for ReviewAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Submitted => "submitted",
            Self::Resubmitted => "resubmitted",
            Self::Approved => "approved",
            Self::ChangesRequested => "changes_requested",
            Self::Commented => "commented",
        };
        write!(f, "{}", s)
    }
}

/// Append-only audit entry on a report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewEvent {
    pub at: DateTime<Utc>,
    pub actor: String,
    pub role: Role,
    pub action: ReviewAction,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

impl ReviewEvent {
    pub fn new(
        by: &Actor,
        action: ReviewAction,
        comment: Option<String>,
        at: DateTime<Utc>,
    ) -> Self {
        Self {
            at,
            actor: by.user.clone(),
            role: by.role,
            action,
            comment,
        }
    }
}

/// Reviewer text, trimmed. Deserialized comments go through the same
/// checks as [`ReviewComment::new`] plus `validate`.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(try_from = "String")]
pub struct ReviewComment {
    #[validate(length(min = 1, max = 2000, message = "comment must not be empty"))]
    pub text: String,
}

impl ReviewComment {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into().trim().to_string(),
        }
    }
}

impl TryFrom<String> for ReviewComment {
    type Error = DomainError;

    fn try_from(text: String) -> Result<Self, Self::Error> {
        let comment = Self::new(text);
        comment.validate()?;
        Ok(comment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialized_comment_is_trimmed_and_checked() -> anyhow::Result<()> {
        let comment: ReviewComment = serde_json::from_str("\"  Looks complete.  \"")?;
        assert_eq!(comment.text, "Looks complete.");

        assert!(serde_json::from_str::<ReviewComment>("\"   \"").is_err());
        let too_long = format!("\"{}\"", "x".repeat(2001));
        assert!(serde_json::from_str::<ReviewComment>(&too_long).is_err());
        Ok(())
    }
}
