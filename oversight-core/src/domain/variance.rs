// oversight-core/src/domain/variance.rs

use chrono::NaiveDate;
use serde::Serialize;
use std::fmt;

use crate::domain::error::DomainError;

/// `round(100 * paid / contract)`, half rounded up. Integer arithmetic so that
/// exact fractions such as 65.0 never drift to 64.
pub fn budget_used_percent(paid: u64, contract: u64) -> Result<u32, DomainError> {
    if contract == 0 {
        return Err(DomainError::ZeroContractAmount);
    }
    let paid = u128::from(paid);
    let contract = u128::from(contract);
    let percent = (200 * paid + contract) / (2 * contract);
    Ok(u32::try_from(percent).unwrap_or(u32::MAX))
}

/// Whole days between planned and projected end. Positive means behind schedule.
pub fn schedule_delay_days(projected_end: NaiveDate, planned_end: NaiveDate) -> i64 {
    (projected_end - planned_end).num_days()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "days", rename_all = "snake_case")]
pub enum ScheduleStatus {
    Ahead(u32),
    OnSchedule,
    Behind(u32),
}

impl ScheduleStatus {
    pub fn from_delay(days: i64) -> Self {
        let magnitude = u32::try_from(days.unsigned_abs()).unwrap_or(u32::MAX);
        match days {
            d if d > 0 => Self::Behind(magnitude),
            0 => Self::OnSchedule,
            _ => Self::Ahead(magnitude),
        }
    }

    pub fn is_behind(&self) -> bool {
        matches!(self, Self::Behind(_))
    }
}

impl fmt::Display for ScheduleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ahead(days) => write!(f, "{} days ahead", days),
            Self::OnSchedule => write!(f, "on schedule"),
            Self::Behind(days) => write!(f, "{} days behind", days),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_budget_used_percent() {
        assert_eq!(budget_used_percent(1_592_500, 2_450_000).unwrap(), 65);
        assert_eq!(budget_used_percent(0, 100).unwrap(), 0);
        assert_eq!(budget_used_percent(1, 200).unwrap(), 1); // 0.5 rounds up
        assert_eq!(budget_used_percent(1, 300).unwrap(), 0);
        assert_eq!(budget_used_percent(150, 100).unwrap(), 150);
    }

    #[test]
    fn test_budget_used_percent_guards_zero_contract() {
        assert_eq!(
            budget_used_percent(10, 0),
            Err(DomainError::ZeroContractAmount)
        );
    }

    #[test]
    fn test_budget_used_percent_large_amounts() {
        assert_eq!(budget_used_percent(u64::MAX, u64::MAX).unwrap(), 100);
    }

    #[test]
    fn test_schedule_delay_days() {
        let delay = schedule_delay_days(date(2025, 11, 11), date(2025, 9, 22));
        assert_eq!(delay, 50);
        assert_eq!(ScheduleStatus::from_delay(delay), ScheduleStatus::Behind(50));

        let early = schedule_delay_days(date(2025, 9, 20), date(2025, 9, 22));
        assert_eq!(early, -2);
        assert_eq!(ScheduleStatus::from_delay(early), ScheduleStatus::Ahead(2));
        assert_eq!(ScheduleStatus::from_delay(0), ScheduleStatus::OnSchedule);
        assert_eq!(ScheduleStatus::Behind(50).to_string(), "50 days behind");
    }
}
