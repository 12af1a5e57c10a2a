// oversight-core/src/domain/project.rs

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use validator::Validate;

use crate::domain::error::DomainError;
use crate::domain::rating::Rating;
use crate::domain::variance::{self, ScheduleStatus};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ProjectStatus {
    #[default]
    Active,
    Inactive,
}

impl ProjectStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
        }
    }
}

impl fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ProjectStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "active" => Ok(Self::Active),
            "inactive" => Ok(Self::Inactive),
            _ => Err(format!("Unknown project status: {}", s)),
        }
    }
}

/// An IT project under independent oversight. Field names mirror the data
/// service schema (`projectName`, `ivvVendorName`, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub project_name: String,
    pub sponsoring_agency: String,
    pub ivv_vendor_name: String,
    pub contract_amount: u64,
    #[serde(default)]
    pub amount_paid: u64,
    pub start_date: NaiveDate,
    pub planned_end_date: NaiveDate,
    pub projected_end_date: NaiveDate,
    pub overall_project_status: Rating,
    #[serde(default)]
    pub status: ProjectStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Registration form of the admin "projects" page.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ProjectInput {
    #[validate(length(min = 1, max = 64, message = "id is required"))]
    pub id: String,
    #[validate(length(min = 1, max = 200, message = "project name is required"))]
    pub project_name: String,
    #[validate(length(min = 1, max = 200, message = "sponsoring agency is required"))]
    pub sponsoring_agency: String,
    #[validate(length(min = 1, max = 200, message = "IV&V vendor is required"))]
    pub ivv_vendor_name: String,
    #[validate(range(min = 1, message = "contract amount must be positive"))]
    pub contract_amount: u64,
    #[serde(default)]
    pub amount_paid: u64,
    pub start_date: NaiveDate,
    pub planned_end_date: NaiveDate,
    #[serde(default)]
    pub projected_end_date: Option<NaiveDate>,
    pub overall_project_status: Rating,
    #[validate(length(max = 2000))]
    #[serde(default)]
    pub description: Option<String>,
}

impl Project {
    pub fn new(input: ProjectInput) -> Result<Self, DomainError> {
        input.validate()?;
        input.overall_project_status.ensure_known()?;
        let project = Project {
            projected_end_date: input.projected_end_date.unwrap_or(input.planned_end_date),
            id: input.id,
            project_name: input.project_name,
            sponsoring_agency: input.sponsoring_agency,
            ivv_vendor_name: input.ivv_vendor_name,
            contract_amount: input.contract_amount,
            amount_paid: input.amount_paid,
            start_date: input.start_date,
            planned_end_date: input.planned_end_date,
            overall_project_status: input.overall_project_status,
            status: ProjectStatus::Active,
            description: input.description,
        };
        project.check()?;
        Ok(project)
    }

    /// Invariants that hold for any stored project, including ones read back
    /// from a dataset file rather than built through [`Project::new`].
    pub fn check(&self) -> Result<(), DomainError> {
        if self.contract_amount == 0 {
            return Err(DomainError::ZeroContractAmount);
        }
        if self.planned_end_date < self.start_date {
            return Err(DomainError::Validation(format!(
                "project '{}': planned end {} precedes start {}",
                self.id, self.planned_end_date, self.start_date
            )));
        }
        if self.is_over_budget() {
            tracing::warn!(
                project = %self.id,
                paid = self.amount_paid,
                contract = self.contract_amount,
                "Amount paid exceeds contract amount"
            );
        }
        Ok(())
    }

    pub fn is_active(&self) -> bool {
        self.status == ProjectStatus::Active
    }

    pub fn budget_used_percent(&self) -> Result<u32, DomainError> {
        variance::budget_used_percent(self.amount_paid, self.contract_amount)
    }

    pub fn is_over_budget(&self) -> bool {
        self.amount_paid > self.contract_amount
    }

    pub fn schedule_delay_days(&self) -> i64 {
        variance::schedule_delay_days(self.projected_end_date, self.planned_end_date)
    }

    pub fn schedule_status(&self) -> ScheduleStatus {
        ScheduleStatus::from_delay(self.schedule_delay_days())
    }

    pub fn set_status(&mut self, next: ProjectStatus) -> Result<(), DomainError> {
        if self.status == next {
            return Err(DomainError::InvalidTransition {
                entity: "project",
                from: self.status.to_string(),
                to: next.to_string(),
            });
        }
        self.status = next;
        Ok(())
    }
}
