// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::budget::{BudgetProgress, BudgetStore, budget_progress};
use crate::client::TransactionStore;
use crate::date_range::filter_by_date_range;
use crate::display::{display_for_name, format_currency};
use crate::utils::{maybe_print_json, now, parse_decimal, pretty_table, range_from_args};
use anyhow::{Context, Result};
use rust_decimal::Decimal;
use serde::Serialize;

pub fn handle(
    budgets: &mut dyn BudgetStore,
    transactions: &dyn TransactionStore,
    m: &clap::ArgMatches,
) -> Result<()> {
    match m.subcommand() {
        Some(("set", sub)) => {
            let cat = sub.get_one::<String>("category").unwrap().trim();
            let amount = parse_decimal(sub.get_one::<String>("amount").unwrap())?;
            budgets.set_budget(cat, amount)?;
            if amount > Decimal::ZERO {
                println!("Budget set for {} = {}", cat, format_currency(amount));
            } else {
                println!("Budget removed for {}", cat);
            }
        }
        Some(("rm", sub)) => {
            let cat = sub.get_one::<String>("category").unwrap().trim();
            budgets.delete_budget(cat)?;
            println!("Budget removed for {}", cat);
        }
        Some(("list", sub)) => list(budgets, sub)?,
        Some(("status", sub)) => status(budgets, transactions, sub)?,
        _ => {}
    }
    Ok(())
}

#[derive(Serialize)]
struct BudgetRow {
    category: String,
    amount: Decimal,
}

fn list(budgets: &dyn BudgetStore, sub: &clap::ArgMatches) -> Result<()> {
    let data: Vec<BudgetRow> = budgets
        .all_budgets()?
        .into_iter()
        .map(|(category, amount)| BudgetRow { category, amount })
        .collect();
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        let rows = data
            .iter()
            .map(|b| {
                let props = display_for_name(&b.category);
                vec![
                    format!("{} {}", props.icon, props.name),
                    format_currency(b.amount),
                ]
            })
            .collect();
        println!("{}", pretty_table(&["Category", "Monthly Budget"], rows));
    }
    Ok(())
}

pub fn progress_rows(progress: &[BudgetProgress]) -> Vec<Vec<String>> {
    progress
        .iter()
        .map(|p| {
            let props = display_for_name(&p.category);
            vec![
                format!("{} {}", props.icon, props.name),
                format_currency(p.budget),
                format_currency(p.spent),
                format!("{:.0}%", p.percentage),
                p.status.label().to_string(),
            ]
        })
        .collect()
}

pub const PROGRESS_HEADERS: [&str; 5] = ["Category", "Budget", "Spent", "Used", "Status"];

fn status(
    budgets: &dyn BudgetStore,
    transactions: &dyn TransactionStore,
    sub: &clap::ArgMatches,
) -> Result<()> {
    let range = range_from_args(sub, now())?;
    let all = transactions
        .list_transactions()
        .context("Fetch transactions")?;
    let in_range = filter_by_date_range(&all, Some(range.start), Some(range.end));
    let progress = budget_progress(budgets, &in_range)?;
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &progress)? {
        if progress.is_empty() {
            println!("No budgets set. Use `spendwise budget set --category <name> --amount <n>`.");
            return Ok(());
        }
        println!("Budgets for {}", range);
        println!("{}", pretty_table(&PROGRESS_HEADERS, progress_rows(&progress)));
    }
    Ok(())
}
