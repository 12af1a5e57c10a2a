// oversight-core/src/domain/report/status.rs

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ReportStatus {
    #[default]
    Draft,
    Submitted,
    ChangesRequested,
    /// Approved reports are the published ones.
    Approved,
}

impl ReportStatus {
    pub const ALL: [ReportStatus; 4] = [
        Self::Draft,
        Self::Submitted,
        Self::ChangesRequested,
        Self::Approved,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Submitted => "submitted",
            Self::ChangesRequested => "changes_requested",
            Self::Approved => "approved",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Draft => "Draft",
            Self::Submitted => "Submitted",
            Self::ChangesRequested => "Changes Requested",
            Self::Approved => "Approved",
        }
    }

    pub fn can_transition_to(&self, next: &ReportStatus) -> bool {
        matches!(
            (self, next),
            (Self::Draft, Self::Submitted)
                | (Self::Submitted, Self::Approved)
                | (Self::Submitted, Self::ChangesRequested)
                | (Self::ChangesRequested, Self::Submitted)
        )
    }

    /// Whether summary, ratings, lists and findings may still change.
    pub fn is_editable(&self) -> bool {
        matches!(self, Self::Draft | Self::ChangesRequested)
    }

    pub fn is_public(&self) -> bool {
        matches!(self, Self::Approved)
    }
}

impl fmt::Display for ReportStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ReportStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "draft" => Ok(Self::Draft),
            "submitted" => Ok(Self::Submitted),
            "changes_requested" => Ok(Self::ChangesRequested),
            "approved" | "published" => Ok(Self::Approved),
            _ => Err(format!("Unknown report status: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allowed_transitions() {
        use ReportStatus::*;
        let allowed = [
            (Draft, Submitted),
            (Submitted, Approved),
            (Submitted, ChangesRequested),
            (ChangesRequested, Submitted),
        ];
        for from in ReportStatus::ALL {
            for to in ReportStatus::ALL {
                assert_eq!(
                    from.can_transition_to(&to),
                    allowed.contains(&(from, to)),
                    "{from} -> {to}"
                );
            }
        }
    }

    #[test]
    fn test_no_path_skips_submitted() {
        use ReportStatus::*;
        assert!(!Draft.can_transition_to(&Approved));
        assert!(!ChangesRequested.can_transition_to(&Approved));
        assert!(!ChangesRequested.can_transition_to(&Draft));
        for next in [Draft, Submitted, ChangesRequested, Approved] {
            assert!(!Approved.can_transition_to(&next));
        }
    }

    #[test]
    fn test_visibility_and_editability() {
        assert!(ReportStatus::Approved.is_public());
        assert!(!ReportStatus::Submitted.is_public());
        assert!(ReportStatus::Draft.is_editable());
        assert!(ReportStatus::ChangesRequested.is_editable());
        assert!(!ReportStatus::Submitted.is_editable());
        assert_eq!("published".parse::<ReportStatus>(), Ok(ReportStatus::Approved));
    }
}
