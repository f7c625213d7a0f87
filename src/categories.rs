// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Category edits that must keep the name-keyed budgets in step.

use crate::budget::BudgetStore;
use crate::client::CategoryStore;
use crate::error::{Error, Result};
use crate::models::{Category, CategoryKind, CategoryPatch, Transaction};
use rust_decimal::Decimal;
use std::collections::HashMap;

/// Case-insensitive lookup by name.
pub fn find_by_name<'a>(categories: &'a [Category], name: &str) -> Option<&'a Category> {
    let wanted = name.trim().to_lowercase();
    categories
        .iter()
        .find(|c| c.name.trim().to_lowercase() == wanted)
}

pub fn of_kind(categories: &[Category], kind: &CategoryKind) -> Vec<Category> {
    categories
        .iter()
        .filter(|c| &c.kind == kind)
        .cloned()
        .collect()
}

fn id_of(category: &Category) -> Result<i64> {
    category
        .id
        .ok_or_else(|| Error::MissingId(format!("Category '{}'", category.name)))
}

/// Applies `patch` on the server, then carries the budget over to the new
/// name. The budget is only touched once the server accepted the rename.
pub fn update_category(
    store: &dyn CategoryStore,
    budgets: &mut dyn BudgetStore,
    current: &Category,
    patch: &CategoryPatch,
) -> Result<Category> {
    let updated = store.update_category(id_of(current)?, patch)?;
    if patch.name.is_some() && updated.name != current.name {
        budgets.rename_budget(&current.name, &updated.name)?;
        tracing::info!(from = %current.name, to = %updated.name, "budget carried over to renamed category");
    }
    Ok(updated)
}

/// Deletes on the server and drops the category's budget.
pub fn delete_category(
    store: &dyn CategoryStore,
    budgets: &mut dyn BudgetStore,
    category: &Category,
) -> Result<()> {
    store.delete_category(id_of(category)?)?;
    budgets.delete_budget(&category.name)?;
    Ok(())
}

/// Number of transactions per category, keyed by the displayed name, so rows
/// without a category count towards "Uncategorized".
pub fn transaction_counts(transactions: &[Transaction]) -> HashMap<String, usize> {
    let mut counts = HashMap::new();
    for t in transactions {
        *counts.entry(t.category_name().to_string()).or_insert(0) += 1;
    }
    counts
}

/// Budget entered alongside a category add or edit. `None` leaves the stored
/// budget alone; zero or less clears it.
pub fn save_budget(
    budgets: &mut dyn BudgetStore,
    category: &Category,
    amount: Option<Decimal>,
) -> Result<()> {
    if let Some(amount) = amount {
        budgets.set_budget(&category.name, amount)?;
    }
    Ok(())
}
