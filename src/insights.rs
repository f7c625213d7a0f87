// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Dashboard figures: the KPI strip and the insight cards.

use crate::analytics::{
    Direction, MonthOverMonth, balance, category_month_over_month, income_expense_ratio,
    month_over_month, overspending_categories, savings_rate, spending_concentration,
    top_spending_category, total_expenses, total_income,
};
use crate::display::format_currency;
use crate::models::Transaction;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

const HIGH_CONCENTRATION: Decimal = Decimal::from_parts(40, 0, 0, false, 0);
const LOW_RATIO: f64 = 1.2;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Kpis {
    pub balance: Decimal,
    pub income: Decimal,
    pub expenses: Decimal,
    pub savings_rate: Decimal,
    pub expense_trend: MonthOverMonth,
    /// Up from 20% savings, neutral from 10%, down below.
    pub savings_trend: Direction,
}

pub fn kpis(transactions: &[Transaction], today: NaiveDate) -> Kpis {
    let rate = savings_rate(transactions);
    let savings_trend = if rate >= Decimal::from(20) {
        Direction::Up
    } else if rate >= Decimal::TEN {
        Direction::Neutral
    } else {
        Direction::Down
    };
    Kpis {
        balance: balance(transactions),
        income: total_income(transactions),
        expenses: total_expenses(transactions),
        savings_rate: rate,
        expense_trend: month_over_month(transactions, today),
        savings_trend,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum InsightKind {
    Spending,
    Concentration,
    Overspending,
    Ratio,
    Positive,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
    Error,
    Success,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Insight {
    pub kind: InsightKind,
    pub title: String,
    pub description: String,
    pub value: String,
    pub severity: Severity,
}

fn trend_sentence(mom: &MonthOverMonth) -> String {
    match mom.direction {
        Direction::Up => format!("Spending ↑ {:.1}% vs last month", mom.change),
        Direction::Down => format!("Spending ↓ {:.1}% vs last month", mom.change),
        Direction::Neutral => "Spending unchanged vs last month".to_string(),
    }
}

/// Cards in display order. An empty list only when there are no transactions.
pub fn insights(transactions: &[Transaction], today: NaiveDate) -> Vec<Insight> {
    let top = top_spending_category(transactions);
    let concentration = spending_concentration(transactions);
    let overspending = overspending_categories(transactions);
    let ratio = income_expense_ratio(transactions);

    let mut out = Vec::new();

    if let Some(top) = &top {
        let mom = category_month_over_month(transactions, &top.name, today);
        out.push(Insight {
            kind: InsightKind::Spending,
            title: format!("{} is your highest expense", top.name),
            description: trend_sentence(&mom),
            value: format_currency(top.amount),
            severity: Severity::Info,
        });
    }

    if concentration > HIGH_CONCENTRATION {
        out.push(Insight {
            kind: InsightKind::Concentration,
            title: "High spending concentration".to_string(),
            description: format!("{:.1}% of expenses in one category", concentration),
            value: top
                .as_ref()
                .map(|t| t.name.clone())
                .unwrap_or_else(|| "N/A".to_string()),
            severity: Severity::Warning,
        });
    }

    if !overspending.is_empty() {
        let n = overspending.len();
        let names: Vec<&str> = overspending.iter().map(|c| c.name.as_str()).collect();
        out.push(Insight {
            kind: InsightKind::Overspending,
            title: format!(
                "Overspending in {} categor{}",
                n,
                if n > 1 { "ies" } else { "y" }
            ),
            description: names.join(", "),
            value: n.to_string(),
            severity: Severity::Error,
        });
    }

    if ratio > 0.0 && ratio < LOW_RATIO {
        out.push(Insight {
            kind: InsightKind::Ratio,
            title: "Expenses are high relative to income".to_string(),
            description: format!("Income/Expense ratio: {:.2}", ratio),
            value: format!("{:.0}%", ratio * 100.0),
            severity: Severity::Warning,
        });
    }

    if out.is_empty() && !transactions.is_empty() {
        out.push(Insight {
            kind: InsightKind::Positive,
            title: "Your finances look balanced".to_string(),
            description: "Keep tracking your expenses to maintain good financial health"
                .to_string(),
            value: "✓".to_string(),
            severity: Severity::Success,
        });
    }

    out
}
