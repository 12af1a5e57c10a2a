// oversight/src/commands/output.rs

use anyhow::Result;
use comfy_table::{Cell, Color, Table};
use serde::Serialize;

use oversight_core::domain::{Rating, ReportStatus, SeverityBand};

pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub fn table(header: Vec<&str>) -> Table {
    let mut table = Table::new();
    table.set_header(header);
    table
}

fn color_of(token: &str) -> Color {
    match token {
        "green" => Color::Green,
        "yellow" => Color::Yellow,
        "red" => Color::Red,
        _ => Color::Grey,
    }
}

pub fn rating_cell(rating: Rating) -> Cell {
    let display = rating.display();
    Cell::new(display.label).fg(color_of(display.color))
}

pub fn optional_rating_cell(rating: Option<Rating>) -> Cell {
    rating.map(rating_cell).unwrap_or_else(|| Cell::new("-"))
}

pub fn severity_cell(band: SeverityBand) -> Cell {
    let color = match band {
        SeverityBand::High => Color::Red,
        SeverityBand::Medium => Color::Yellow,
        SeverityBand::Low => Color::Green,
    };
    Cell::new(band.label()).fg(color)
}

pub fn status_cell(status: ReportStatus) -> Cell {
    let color = match status {
        ReportStatus::Draft => Color::Grey,
        ReportStatus::Submitted => Color::Cyan,
        ReportStatus::ChangesRequested => Color::Yellow,
        ReportStatus::Approved => Color::Green,
    };
    Cell::new(status.label()).fg(color)
}

/// `1592500` -> `$1,592,500`
pub fn money(amount: u64) -> String {
    let digits = amount.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    format!("${}", out)
}

pub fn percent(value: Option<u32>) -> String {
    value.map(|v| format!("{}%", v)).unwrap_or_else(|| "n/a".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_money_grouping() {
        assert_eq!(money(0), "$0");
        assert_eq!(money(950), "$950");
        assert_eq!(money(1_592_500), "$1,592,500");
        assert_eq!(money(2_450_000), "$2,450,000");
    }

    #[test]
    fn test_percent() {
        assert_eq!(percent(Some(65)), "65%");
        assert_eq!(percent(None), "n/a");
    }
}
