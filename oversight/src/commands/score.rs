// oversight/src/commands/score.rs
//
// USE CASES: Stand-alone calculators for risk scores and variance.

use anyhow::{Result, bail};
use serde_json::json;

use oversight_core::domain::{
    ScheduleStatus, ScoreLevel, budget_used_percent, risk, schedule_delay_days,
};

use crate::cli::VarianceArgs;

use super::context::Session;
use super::output::{money, print_json};

pub fn score(session: &Session, impact: u8, likelihood: u8) -> Result<()> {
    let config = session.config()?;
    let impact = ScoreLevel::new(impact)?;
    let likelihood = ScoreLevel::new(likelihood)?;
    let score = risk::score(impact, likelihood);
    let band = config.severity.band(score);

    if session.json() {
        return print_json(&json!({
            "impact": impact.value(),
            "likelihood": likelihood.value(),
            "score": score.value(),
            "severity": band,
        }));
    }
    println!(
        "🎯 Risk score {} x {} = {} ({})",
        impact,
        likelihood,
        score,
        band.label()
    );
    Ok(())
}

pub async fn variance(session: &Session, args: VarianceArgs) -> Result<()> {
    let (money_pair, dates) = match &args.project {
        Some(id) => {
            let project = session.service()?.get_project(id).await?;
            (
                Some((project.amount_paid, project.contract_amount)),
                Some((project.planned_end_date, project.projected_end_date)),
            )
        }
        None => (
            args.paid.zip(args.contract),
            args.planned.zip(args.projected),
        ),
    };
    if money_pair.is_none() && dates.is_none() {
        bail!(
            "Nothing to compute: pass --project, or --paid/--contract and/or --planned/--projected"
        );
    }

    let budget = money_pair
        .map(|(paid, contract)| {
            budget_used_percent(paid, contract).map(|pct| (paid, contract, pct))
        })
        .transpose()?;
    let schedule = dates.map(|(planned, projected)| {
        let delay = schedule_delay_days(projected, planned);
        (planned, projected, delay, ScheduleStatus::from_delay(delay))
    });

    if session.json() {
        return print_json(&json!({
            "budgetUsedPercent": budget.map(|(_, _, pct)| pct),
            "overBudget": budget.map(|(paid, contract, _)| paid > contract),
            "scheduleDelayDays": schedule.map(|(_, _, delay, _)| delay),
            "schedule": schedule.map(|(_, _, _, status)| status),
        }));
    }

    if let Some((paid, contract, pct)) = budget {
        println!(
            "📊 Budget used: {}% ({} of {}){}",
            pct,
            money(paid),
            money(contract),
            if paid > contract { " ⚠️ over contract" } else { "" }
        );
    }
    if let Some((planned, projected, delay, status)) = schedule {
        println!(
            "📅 Schedule: planned {}, projected {}, delay {} days ({})",
            planned, projected, delay, status
        );
    }
    Ok(())
}
