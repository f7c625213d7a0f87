// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Pure aggregations over an in-memory transaction list.
//!
//! Nothing here performs I/O or reads the clock: functions that talk about
//! "this month" take `today` from the caller.

use crate::date_range::previous_month;
use crate::models::{Transaction, TransactionType};
use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::Serialize;
use std::collections::HashMap;

/// Share of total expenses above which a category counts as overspending.
const OVERSPEND_SHARE: Decimal = Decimal::from_parts(3, 0, 0, false, 1);

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryTotal {
    pub name: String,
    pub amount: Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
    Neutral,
}

impl Direction {
    pub fn arrow(&self) -> &'static str {
        match self {
            Direction::Up => "↑",
            Direction::Down => "↓",
            Direction::Neutral => "→",
        }
    }
}

/// Absolute percent change between two consecutive calendar months.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthOverMonth {
    pub change: Decimal,
    pub direction: Direction,
    pub current_amount: Decimal,
    pub previous_amount: Decimal,
}

pub fn total_income(transactions: &[Transaction]) -> Decimal {
    transactions
        .iter()
        .filter(|t| t.is_income())
        .map(|t| t.amount)
        .sum()
}

pub fn total_expenses(transactions: &[Transaction]) -> Decimal {
    transactions
        .iter()
        .filter(|t| t.is_expense())
        .map(|t| t.amount)
        .sum()
}

pub fn balance(transactions: &[Transaction]) -> Decimal {
    total_income(transactions) - total_expenses(transactions)
}

/// Percent of income left after expenses; 0 when there is no income.
pub fn savings_rate(transactions: &[Transaction]) -> Decimal {
    let income = total_income(transactions);
    if income.is_zero() {
        return Decimal::ZERO;
    }
    let expenses = total_expenses(transactions);
    (income - expenses) / income * Decimal::ONE_HUNDRED
}

/// Expense totals per category, largest first.
///
/// Categories with equal totals keep the order in which they first appear in
/// `transactions`.
pub fn category_expense_breakdown(transactions: &[Transaction]) -> Vec<CategoryTotal> {
    let mut totals: Vec<CategoryTotal> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();
    for t in transactions.iter().filter(|t| t.is_expense()) {
        let name = t.category_name();
        match index.get(name) {
            Some(&i) => totals[i].amount += t.amount,
            None => {
                index.insert(name, totals.len());
                totals.push(CategoryTotal {
                    name: name.to_string(),
                    amount: t.amount,
                });
            }
        }
    }
    totals.sort_by(|a, b| b.amount.cmp(&a.amount));
    totals
}

pub fn top_spending_category(transactions: &[Transaction]) -> Option<CategoryTotal> {
    category_expense_breakdown(transactions).into_iter().next()
}

/// Percent of all expenses that went to the top category.
pub fn spending_concentration(transactions: &[Transaction]) -> Decimal {
    let expenses = total_expenses(transactions);
    if expenses.is_zero() {
        return Decimal::ZERO;
    }
    match top_spending_category(transactions) {
        Some(top) => top.amount / expenses * Decimal::ONE_HUNDRED,
        None => Decimal::ZERO,
    }
}

/// Transactions in calendar `year` and `month0`, where `month0` counts from
/// zero (0 = January, 11 = December).
pub fn month_transactions(transactions: &[Transaction], year: i32, month0: u32) -> Vec<Transaction> {
    transactions
        .iter()
        .filter(|t| t.date.year() == year && t.date.month0() == month0)
        .cloned()
        .collect()
}

fn current_and_previous(
    transactions: &[Transaction],
    today: NaiveDate,
) -> (Vec<Transaction>, Vec<Transaction>) {
    let current = month_transactions(transactions, today.year(), today.month0());
    let (py, pm) = previous_month(today);
    let previous = month_transactions(transactions, py, pm - 1);
    (current, previous)
}

fn compare(current: Decimal, previous: Decimal) -> MonthOverMonth {
    // No spend last month reads as +100% whatever this month's magnitude.
    if previous.is_zero() {
        let (change, direction) = if current > Decimal::ZERO {
            (Decimal::ONE_HUNDRED, Direction::Up)
        } else {
            (Decimal::ZERO, Direction::Neutral)
        };
        return MonthOverMonth {
            change,
            direction,
            current_amount: current,
            previous_amount: previous,
        };
    }
    let change = (current - previous) / previous * Decimal::ONE_HUNDRED;
    let direction = if change > Decimal::ZERO {
        Direction::Up
    } else if change < Decimal::ZERO {
        Direction::Down
    } else {
        Direction::Neutral
    };
    MonthOverMonth {
        change: change.abs(),
        direction,
        current_amount: current,
        previous_amount: previous,
    }
}

/// Expenses in `today`'s month against the month before it.
pub fn month_over_month(transactions: &[Transaction], today: NaiveDate) -> MonthOverMonth {
    let (current, previous) = current_and_previous(transactions, today);
    compare(total_expenses(&current), total_expenses(&previous))
}

/// Like [`month_over_month`] for one category.
///
/// The category name must match exactly, including case. Budget progress and
/// category drill-down match names case-insensitively; this one does not.
pub fn category_month_over_month(
    transactions: &[Transaction],
    category: &str,
    today: NaiveDate,
) -> MonthOverMonth {
    let (current, previous) = current_and_previous(transactions, today);
    let spent = |list: &[Transaction]| -> Decimal {
        list.iter()
            .filter(|t| t.is_expense() && t.category_name() == category)
            .map(|t| t.amount)
            .sum()
    };
    compare(spent(&current), spent(&previous))
}

/// Income divided by expenses. With no expenses this is `+inf` when there is
/// income and 0 otherwise.
pub fn income_expense_ratio(transactions: &[Transaction]) -> f64 {
    let income = total_income(transactions);
    let expenses = total_expenses(transactions);
    if expenses.is_zero() {
        return if income > Decimal::ZERO {
            f64::INFINITY
        } else {
            0.0
        };
    }
    (income / expenses).to_f64().unwrap_or_default()
}

/// Categories holding more than 30% of total expenses.
pub fn overspending_categories(transactions: &[Transaction]) -> Vec<CategoryTotal> {
    let expenses = total_expenses(transactions);
    if expenses.is_zero() {
        return Vec::new();
    }
    let threshold = expenses * OVERSPEND_SHARE;
    category_expense_breakdown(transactions)
        .into_iter()
        .filter(|c| c.amount > threshold)
        .collect()
}

/// Newest first, at most `limit` rows.
pub fn recent_transactions(transactions: &[Transaction], limit: usize) -> Vec<Transaction> {
    let mut out = transactions.to_vec();
    out.sort_by(|a, b| b.date.cmp(&a.date));
    out.truncate(limit);
    out
}

/// Drill-down for one category: trimmed, case-insensitive name match.
/// Rows without a category never match.
pub fn category_transactions(transactions: &[Transaction], category: &str) -> Vec<Transaction> {
    let wanted = category.trim().to_lowercase();
    transactions
        .iter()
        .filter(|t| t.category.as_deref().unwrap_or("").trim().to_lowercase() == wanted)
        .cloned()
        .collect()
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransactionFilter {
    /// Matched case-insensitively against description and category.
    pub search: String,
    pub kind: Option<TransactionType>,
}

pub fn search(transactions: &[Transaction], filter: &TransactionFilter) -> Vec<Transaction> {
    let needle = filter.search.to_lowercase();
    transactions
        .iter()
        .filter(|t| {
            let matches_text = t.description.to_lowercase().contains(&needle)
                || t.category
                    .as_deref()
                    .is_some_and(|c| c.to_lowercase().contains(&needle));
            let matches_kind = filter.kind.as_ref().is_none_or(|k| &t.kind == k);
            matches_text && matches_kind
        })
        .cloned()
        .collect()
}
