// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::analytics::{CategoryTotal, category_expense_breakdown, recent_transactions};
use crate::budget::{BudgetProgress, BudgetStore, budget_progress};
use crate::client::TransactionStore;
use crate::commands::budgets::{PROGRESS_HEADERS, progress_rows};
use crate::date_range::{DateRange, filter_by_date_range};
use crate::display::{display_for_name, format_currency};
use crate::insights::{Insight, Kpis, insights, kpis};
use crate::models::Transaction;
use crate::utils::{maybe_print_json, now, pretty_table, range_from_args};
use anyhow::{Context, Result};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

const RECENT_LIMIT: usize = 5;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dashboard {
    pub range: String,
    pub kpis: Kpis,
    pub insights: Vec<Insight>,
    pub breakdown: Vec<CategoryTotal>,
    pub budgets: Vec<BudgetProgress>,
    pub recent: Vec<Transaction>,
}

/// Everything the dashboard shows, computed over the transactions in `range`.
/// Recent activity ignores the range and always shows the latest rows.
pub fn build(
    all: &[Transaction],
    budgets: &dyn BudgetStore,
    range: &DateRange,
    today: NaiveDate,
) -> Result<Dashboard> {
    let list = filter_by_date_range(all, Some(range.start), Some(range.end));
    Ok(Dashboard {
        range: range.to_string(),
        kpis: kpis(&list, today),
        insights: insights(&list, today),
        breakdown: category_expense_breakdown(&list),
        budgets: budget_progress(budgets, &list)?,
        recent: recent_transactions(all, RECENT_LIMIT),
    })
}

pub fn handle(
    transactions: &dyn TransactionStore,
    budgets: &dyn BudgetStore,
    m: &clap::ArgMatches,
) -> Result<()> {
    let now = now();
    let range = range_from_args(m, now)?;
    let all = transactions
        .list_transactions()
        .context("Fetch transactions")?;
    let dash = build(&all, budgets, &range, now.date())?;
    if maybe_print_json(m.get_flag("json"), m.get_flag("jsonl"), &dash)? {
        return Ok(());
    }
    print(&dash);
    Ok(())
}

fn print(dash: &Dashboard) {
    let k = &dash.kpis;
    println!("Dashboard for {}", dash.range);
    println!(
        "{}",
        pretty_table(
            &["Balance", "Income", "Expenses", "Savings Rate"],
            vec![vec![
                format_currency(k.balance),
                format_currency(k.income),
                format!(
                    "{} {} {:.1}%",
                    format_currency(k.expenses),
                    k.expense_trend.direction.arrow(),
                    k.expense_trend.change
                ),
                format!("{:.1}% {}", k.savings_rate, k.savings_trend.arrow()),
            ]],
        )
    );

    if !dash.insights.is_empty() {
        println!("Insights");
        let rows = dash
            .insights
            .iter()
            .map(|i| vec![i.title.clone(), i.description.clone(), i.value.clone()])
            .collect();
        println!("{}", pretty_table(&["", "Detail", "Value"], rows));
    }

    if !dash.breakdown.is_empty() {
        println!("Spending by category");
        let total: Decimal = dash.breakdown.iter().map(|c| c.amount).sum();
        let rows = dash
            .breakdown
            .iter()
            .map(|c| {
                let props = display_for_name(&c.name);
                let share = if total.is_zero() {
                    Decimal::ZERO
                } else {
                    c.amount / total * Decimal::ONE_HUNDRED
                };
                vec![
                    format!("{} {}", props.icon, props.name),
                    format_currency(c.amount),
                    format!("{:.1}%", share),
                ]
            })
            .collect();
        println!("{}", pretty_table(&["Category", "Spent", "Share"], rows));
    }

    if !dash.budgets.is_empty() {
        println!("Budgets");
        println!(
            "{}",
            pretty_table(&PROGRESS_HEADERS, progress_rows(&dash.budgets))
        );
    }

    if dash.recent.is_empty() {
        println!("No transactions in this range.");
    } else {
        println!("Recent transactions");
        let rows = dash
            .recent
            .iter()
            .map(|t| {
                let sign = if t.is_income() { "+" } else { "-" };
                vec![
                    t.day().to_string(),
                    t.description.clone(),
                    t.category_name().to_string(),
                    format!("{}{}", sign, format_currency(t.amount)),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Date", "Description", "Category", "Amount"], rows)
        );
    }
}
