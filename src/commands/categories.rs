// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::analytics::{category_month_over_month, category_transactions, total_expenses, total_income};
use crate::budget::{BudgetStore, budget_status};
use crate::categories::{self, find_by_name, of_kind, transaction_counts};
use crate::client::{CategoryStore, TransactionStore};
use crate::date_range::filter_by_date_range;
use crate::display::{display_props, format_currency};
use crate::models::{Category, CategoryKind, CategoryPatch};
use crate::utils::{
    maybe_print_json, now, parse_category_kind, parse_decimal, pretty_table, range_from_args,
    today,
};
use anyhow::{Context, Result, anyhow};
use rust_decimal::Decimal;
use serde::Serialize;

/// `--budget` as given: absent leaves the budget alone, blank clears it.
fn budget_arg(sub: &clap::ArgMatches) -> Result<Option<Decimal>> {
    match sub.get_one::<String>("budget").map(|s| s.trim()) {
        None => Ok(None),
        Some("") => Ok(Some(Decimal::ZERO)),
        Some(raw) => parse_decimal(raw).map(Some),
    }
}

pub fn handle(
    store: &dyn CategoryStore,
    transactions: &dyn TransactionStore,
    budgets: &mut dyn BudgetStore,
    m: &clap::ArgMatches,
) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let name = sub.get_one::<String>("name").unwrap().trim();
            if name.is_empty() {
                return Err(anyhow!("Category name must not be empty"));
            }
            let kind = parse_category_kind(sub.get_one::<String>("type").unwrap())?;
            let budget = budget_arg(sub)?;
            let mut category = Category::new(name, kind);
            category.description = sub.get_one::<String>("description").cloned();
            category.color = sub.get_one::<String>("color").cloned();
            category.icon = sub.get_one::<String>("icon").cloned();
            let saved = store.create_category(&category)?;
            categories::save_budget(budgets, &saved, budget)?;
            println!("Added {} category '{}'", saved.kind, saved.name);
        }
        Some(("list", sub)) => list(store, transactions, budgets, sub)?,
        Some(("edit", sub)) => {
            let current = lookup(store, sub.get_one::<String>("category").unwrap())?;
            let budget = budget_arg(sub)?;
            let patch = CategoryPatch {
                name: sub
                    .get_one::<String>("name")
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty()),
                kind: sub
                    .get_one::<String>("type")
                    .map(|s| parse_category_kind(s))
                    .transpose()?,
                description: sub.get_one::<String>("description").cloned(),
                color: sub.get_one::<String>("color").cloned(),
                icon: sub.get_one::<String>("icon").cloned(),
            };
            let updated = categories::update_category(store, budgets, &current, &patch)
                .with_context(|| format!("Update category '{}'", current.name))?;
            categories::save_budget(budgets, &updated, budget)?;
            println!("Updated category '{}'", updated.name);
        }
        Some(("rm", sub)) => {
            let current = lookup(store, sub.get_one::<String>("category").unwrap())?;
            categories::delete_category(store, budgets, &current)
                .with_context(|| format!("Delete category '{}'", current.name))?;
            println!("Removed category '{}' and its budget", current.name);
        }
        Some(("show", sub)) => show(store, transactions, budgets, sub)?,
        _ => {}
    }
    Ok(())
}

fn lookup(store: &dyn CategoryStore, name: &str) -> Result<Category> {
    let all = store.list_categories().context("Fetch categories")?;
    find_by_name(&all, name)
        .cloned()
        .ok_or_else(|| anyhow!("Category '{}' not found", name))
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryRow {
    #[serde(flatten)]
    pub category: Category,
    pub transaction_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub budget: Option<Decimal>,
}

/// Categories sorted by name, optionally of one kind, with their transaction
/// counts and budgets.
pub fn list_rows(
    store: &dyn CategoryStore,
    transactions: &dyn TransactionStore,
    budgets: &dyn BudgetStore,
    kind: Option<&CategoryKind>,
) -> Result<Vec<CategoryRow>> {
    let mut data = store.list_categories().context("Fetch categories")?;
    if let Some(kind) = kind {
        data = of_kind(&data, kind);
    }
    data.sort_by_key(|c| c.name.to_lowercase());
    let counts = transaction_counts(
        &transactions
            .list_transactions()
            .context("Fetch transactions")?,
    );
    let mut rows = Vec::with_capacity(data.len());
    for category in data {
        rows.push(CategoryRow {
            transaction_count: counts.get(&category.name).copied().unwrap_or(0),
            budget: budgets.get_budget(&category.name)?,
            category,
        });
    }
    Ok(rows)
}

fn list(
    store: &dyn CategoryStore,
    transactions: &dyn TransactionStore,
    budgets: &dyn BudgetStore,
    sub: &clap::ArgMatches,
) -> Result<()> {
    let kind = sub
        .get_one::<String>("type")
        .map(|raw| parse_category_kind(raw))
        .transpose()?;
    let data = list_rows(store, transactions, budgets, kind.as_ref())?;
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|r| {
                let c = &r.category;
                let props = display_props(Some(c));
                vec![
                    format!("{} {}", props.icon, props.name),
                    c.kind.to_string(),
                    props.color.value,
                    r.transaction_count.to_string(),
                    r.budget.map(format_currency).unwrap_or_default(),
                    c.description.clone().unwrap_or_default(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["Category", "Type", "Color", "Transactions", "Budget", "Description"],
                rows,
            )
        );
    }
    Ok(())
}

/// Rows and totals follow the range; month-over-month always uses the full
/// history.
fn show(
    store: &dyn CategoryStore,
    transactions: &dyn TransactionStore,
    budgets: &dyn BudgetStore,
    sub: &clap::ArgMatches,
) -> Result<()> {
    let category = lookup(store, sub.get_one::<String>("category").unwrap())?;
    let props = display_props(Some(&category));
    let range = range_from_args(sub, now())?;
    let all = transactions.list_transactions().context("Fetch transactions")?;
    let in_range = filter_by_date_range(&all, Some(range.start), Some(range.end));
    let mut rows = category_transactions(&in_range, &category.name);
    rows.sort_by(|a, b| b.date.cmp(&a.date));
    let mom = category_month_over_month(&all, &category.name, today());

    println!("{} {} ({})", props.icon, props.name, range);
    println!(
        "Spent {}  Received {}  {} {:.1}% vs last month",
        format_currency(total_expenses(&rows)),
        format_currency(total_income(&rows)),
        mom.direction.arrow(),
        mom.change
    );
    if let Some(budget) = budgets.get_budget(&category.name)? {
        let usage = budget_status(total_expenses(&rows), budget);
        println!(
            "Budget {}  {:.0}%  {}",
            format_currency(budget),
            usage.percentage,
            usage.status.label()
        );
    }
    let table: Vec<Vec<String>> = rows
        .iter()
        .map(|t| {
            vec![
                t.day().to_string(),
                t.description.clone(),
                t.kind.to_string(),
                format_currency(t.amount),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(&["Date", "Description", "Type", "Amount"], table)
    );
    Ok(())
}
