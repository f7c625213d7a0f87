// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::client::{StatementParser, TransactionStore};
use crate::display::format_currency;
use crate::import::{ImportSummary, PreparedImport, prepare_import, save_new};
use crate::utils::{maybe_print_json, now, pretty_table};
use anyhow::{Context, Result};
use serde::Serialize;
use std::path::Path;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ImportReport<'a> {
    preview: &'a PreparedImport,
    #[serde(skip_serializing_if = "Option::is_none")]
    summary: Option<&'a ImportSummary>,
}

pub fn handle(
    parser: &dyn StatementParser,
    store: &dyn TransactionStore,
    m: &clap::ArgMatches,
) -> Result<()> {
    let path = Path::new(m.get_one::<String>("path").unwrap().trim());
    let dry_run = m.get_flag("dry_run");
    let json = m.get_flag("json") || m.get_flag("jsonl");

    let prepared = prepare_import(parser, store, path)
        .with_context(|| format!("Import {}", path.display()))?;
    if !json {
        print_preview(&prepared);
    }

    let summary = if dry_run || prepared.candidates.is_empty() {
        None
    } else {
        Some(save_new(store, &prepared.candidates, now()))
    };

    let report = ImportReport {
        preview: &prepared,
        summary: summary.as_ref(),
    };
    if maybe_print_json(m.get_flag("json"), m.get_flag("jsonl"), &report)? {
        return Ok(());
    }
    match summary {
        Some(s) => {
            println!("{}", s.message());
            for f in &s.failures {
                println!("  #{} '{}': {}", f.position, f.description, f.error);
            }
        }
        None if dry_run => println!(
            "Dry run: {} new, {} duplicates. Nothing saved.",
            prepared.new_count(),
            prepared.duplicate_count()
        ),
        None => println!("No transactions found in the statement."),
    }
    Ok(())
}

fn print_preview(prepared: &PreparedImport) {
    if let Some(msg) = &prepared.message {
        println!("{}", msg);
    }
    println!(
        "Parsed {} of {} transactions: {} new, {} duplicates",
        prepared.candidates.len(),
        prepared.total_transactions,
        prepared.new_count(),
        prepared.duplicate_count()
    );
    for e in &prepared.errors {
        println!("  parse error: {}", e);
    }
    let rows = prepared
        .candidates
        .iter()
        .map(|c| {
            let t = &c.transaction;
            vec![
                t.date.map(|d| d.date().to_string()).unwrap_or_default(),
                t.description.clone(),
                t.kind.as_ref().map(|k| k.to_string()).unwrap_or_default(),
                format_currency(t.amount),
                if c.is_duplicate { "duplicate" } else { "new" }.to_string(),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(&["Date", "Description", "Type", "Amount", "Status"], rows)
    );
}
