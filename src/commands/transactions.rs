// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::analytics::{TransactionFilter, category_transactions, search};
use crate::client::TransactionStore;
use crate::date_range::filter_by_date_range;
use crate::display::{display_for_name, format_currency};
use crate::models::{Transaction, TransactionPatch};
use crate::utils::{
    maybe_print_json, now, parse_amount, parse_date_time, parse_type, pretty_table,
    range_from_args,
};
use anyhow::{Context, Result, anyhow};

pub fn handle(store: &dyn TransactionStore, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(store, sub)?,
        Some(("list", sub)) => list(store, sub)?,
        Some(("edit", sub)) => edit(store, sub)?,
        Some(("rm", sub)) => {
            let id = *sub.get_one::<i64>("id").unwrap();
            store
                .delete_transaction(id)
                .with_context(|| format!("Delete transaction {}", id))?;
            println!("Removed transaction {}", id);
        }
        Some(("clear", sub)) => {
            if !sub.get_flag("yes") {
                return Err(anyhow!(
                    "Refusing to delete all transactions without --yes"
                ));
            }
            store.delete_all_transactions()?;
            println!("Removed all transactions");
        }
        _ => {}
    }
    Ok(())
}

fn opt_trimmed(sub: &clap::ArgMatches, id: &str) -> Option<String> {
    sub.get_one::<String>(id)
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
}

fn add(store: &dyn TransactionStore, sub: &clap::ArgMatches) -> Result<()> {
    let date = parse_date_time(sub.get_one::<String>("date").unwrap())?;
    let amount = parse_amount(sub.get_one::<String>("amount").unwrap())?;
    let kind = parse_type(sub.get_one::<String>("type").unwrap())?;
    let mut tx = Transaction::new(kind, amount, date);
    tx.category = opt_trimmed(sub, "category");
    tx.description = opt_trimmed(sub, "description").unwrap_or_default();
    tx.payment_method = opt_trimmed(sub, "payment_method");
    // the server requires a category
    if tx.category.is_none() {
        tx.category = Some(tx.category_name().to_string());
    }
    if tx.payment_method.is_none() {
        tx.payment_method = Some(tx.payment_method().to_string());
    }

    let saved = store.create_transaction(&tx)?;
    println!(
        "Recorded {} {} on {} '{}' ({})",
        saved.kind,
        format_currency(saved.amount),
        saved.day(),
        saved.description,
        saved.category_name()
    );
    Ok(())
}

fn edit(store: &dyn TransactionStore, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").unwrap();
    let patch = TransactionPatch {
        description: opt_trimmed(sub, "description"),
        amount: opt_trimmed(sub, "amount")
            .map(|s| parse_amount(&s))
            .transpose()?,
        kind: opt_trimmed(sub, "type").map(|s| parse_type(&s)).transpose()?,
        category: opt_trimmed(sub, "category"),
        date: opt_trimmed(sub, "date")
            .map(|s| parse_date_time(&s))
            .transpose()?,
        payment_method: opt_trimmed(sub, "payment_method"),
    };
    if patch.is_empty() {
        println!("Nothing to change for transaction {}", id);
        return Ok(());
    }
    let saved = store
        .update_transaction(id, &patch)
        .with_context(|| format!("Update transaction {}", id))?;
    println!(
        "Updated transaction {}: {} {} on {}",
        id,
        saved.kind,
        format_currency(saved.amount),
        saved.day()
    );
    Ok(())
}

pub struct TransactionRow {
    pub id: String,
    pub date: String,
    pub description: String,
    pub category: String,
    pub r#type: String,
    pub amount: String,
    pub payment_method: String,
}

impl From<&Transaction> for TransactionRow {
    fn from(t: &Transaction) -> Self {
        let props = display_for_name(t.category_name());
        TransactionRow {
            id: t.id.map(|i| i.to_string()).unwrap_or_default(),
            date: t.day().to_string(),
            description: t.description.clone(),
            category: format!("{} {}", props.icon, props.name),
            r#type: t.kind.to_string(),
            amount: format!("{:.2}", t.amount),
            payment_method: t.payment_method().to_string(),
        }
    }
}

/// Fetch, restrict to the date range, then apply search, type and category
/// filters. Newest first.
pub fn query_rows(store: &dyn TransactionStore, sub: &clap::ArgMatches) -> Result<Vec<Transaction>> {
    let range = range_from_args(sub, now())?;
    let all = store.list_transactions().context("Fetch transactions")?;
    let in_range = filter_by_date_range(&all, Some(range.start), Some(range.end));
    let filter = TransactionFilter {
        search: sub.get_one::<String>("search").cloned().unwrap_or_default(),
        kind: opt_trimmed(sub, "type").map(|s| parse_type(&s)).transpose()?,
    };
    let mut rows = search(&in_range, &filter);
    if let Some(cat) = opt_trimmed(sub, "category") {
        rows = category_transactions(&rows, &cat);
    }
    rows.sort_by(|a, b| b.date.cmp(&a.date));
    if let Some(limit) = sub.get_one::<usize>("limit") {
        rows.truncate(*limit);
    }
    if rows.is_empty() && !all.is_empty() {
        tracing::info!(
            total = all.len(),
            "no transactions match the current filters"
        );
    }
    Ok(rows)
}

fn list(store: &dyn TransactionStore, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let data = query_rows(store, sub)?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(TransactionRow::from)
            .map(|r| {
                vec![
                    r.id,
                    r.date,
                    r.description,
                    r.category,
                    r.r#type,
                    r.amount,
                    r.payment_method,
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["ID", "Date", "Description", "Category", "Type", "Amount", "Method"],
                rows,
            )
        );
    }
    Ok(())
}
