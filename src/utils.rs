// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::date_range::{DateRange, DateRangeState, Preset};
use crate::models::{CategoryKind, TransactionType, flexible_date};
use anyhow::{Context, Result, anyhow};
use chrono::{Local, NaiveDate, NaiveDateTime, NaiveTime};
use comfy_table::{Cell, Table, presets::UTF8_FULL};
use rust_decimal::Decimal;

pub fn now() -> NaiveDateTime {
    Local::now().naive_local()
}

pub fn today() -> NaiveDate {
    now().date()
}

pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .with_context(|| format!("Invalid date '{}', expected YYYY-MM-DD", s))
}

/// A date or date-time. Bare dates land at midnight.
pub fn parse_date_time(s: &str) -> Result<NaiveDateTime> {
    flexible_date::parse_text(s).ok_or_else(|| {
        anyhow!(
            "Invalid date '{}', expected YYYY-MM-DD or YYYY-MM-DDTHH:MM:SS",
            s
        )
    })
}

pub fn parse_decimal(s: &str) -> Result<Decimal> {
    s.trim()
        .parse::<Decimal>()
        .with_context(|| format!("Invalid decimal '{}'", s))
}

/// Amounts are magnitudes; the transaction type carries the direction.
pub fn parse_amount(s: &str) -> Result<Decimal> {
    let d = parse_decimal(s)?;
    if d.is_sign_negative() && !d.is_zero() {
        return Err(anyhow!(
            "Amount '{}' must not be negative; use --type to record an expense",
            s
        ));
    }
    Ok(d)
}

pub fn parse_type(s: &str) -> Result<TransactionType> {
    match TransactionType::from(s.trim()) {
        TransactionType::Other(raw) => Err(anyhow!(
            "Type must be 'income' or 'expense', got '{}'",
            raw
        )),
        t => Ok(t),
    }
}

pub fn pretty_table(headers: &[&str], rows: Vec<Vec<String>>) -> Table {
    let mut t = Table::new();
    t.load_preset(UTF8_FULL);
    t.set_header(headers.iter().map(|h| Cell::new(*h)));
    for r in rows {
        t.add_row(r.into_iter().map(Cell::new));
    }
    t
}

pub fn maybe_print_json<T: serde::Serialize>(
    json_flag: bool,
    jsonl_flag: bool,
    v: &T,
) -> Result<bool> {
    if json_flag {
        println!("{}", serde_json::to_string_pretty(v)?);
        return Ok(true);
    }
    if jsonl_flag {
        // If v is an array, stream each element; else stream single line
        let val = serde_json::to_value(v)?;
        if let Some(arr) = val.as_array() {
            for item in arr {
                println!("{}", serde_json::to_string(item)?);
            }
        } else {
            println!("{}", serde_json::to_string(&val)?);
        }
        return Ok(true);
    }
    Ok(false)
}

/// `--from/--to` win over `--range`; with neither, the current month.
pub fn range_from_args(sub: &clap::ArgMatches, now: NaiveDateTime) -> Result<DateRange> {
    let mut state = DateRangeState::new(now);
    let from = sub.get_one::<String>("from");
    let to = sub.get_one::<String>("to");
    if from.is_some() || to.is_some() {
        let start = match from {
            Some(s) => parse_date(s)?.and_time(NaiveTime::MIN),
            None => DateRange::all_time().start,
        };
        let end = match to {
            Some(s) => parse_date(s)?
                .and_hms_opt(23, 59, 59)
                .context("end of day out of range")?,
            None => now,
        };
        state.set_range(start, end)?;
    } else if let Some(raw) = sub.get_one::<String>("range") {
        let preset: Preset = raw.parse().map_err(|e: String| anyhow!(e))?;
        state.apply(preset, now);
    }
    Ok(state.range())
}

pub fn parse_category_kind(s: &str) -> Result<CategoryKind> {
    match CategoryKind::from(s.trim()) {
        CategoryKind::Other(raw) => Err(anyhow!(
            "Category type must be 'income' or 'expense', got '{}'",
            raw
        )),
        k => Ok(k),
    }
}
