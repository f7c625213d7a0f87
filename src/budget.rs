// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Monthly budgets keyed by category name, and their status against spend.
//!
//! Budgets carry no category id. Renaming a category has to move its budget
//! with [`BudgetStore::rename_budget`], deleting one has to drop it.

use crate::analytics::category_expense_breakdown;
use crate::error::Result;
use crate::models::Transaction;
use rusqlite::{Connection, OptionalExtension, params};
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

const WARNING_PERCENT: Decimal = Decimal::from_parts(80, 0, 0, false, 0);

pub trait BudgetStore {
    /// Upsert. A zero or negative amount removes the budget instead.
    fn set_budget(&mut self, category: &str, amount: Decimal) -> Result<()>;
    fn get_budget(&self, category: &str) -> Result<Option<Decimal>>;
    /// No-op when the category has no budget.
    fn delete_budget(&mut self, category: &str) -> Result<()>;
    fn all_budgets(&self) -> Result<BTreeMap<String, Decimal>>;

    /// Moves the budget of `old` to `new`, if there is one.
    fn rename_budget(&mut self, old: &str, new: &str) -> Result<()> {
        if old == new {
            return Ok(());
        }
        if let Some(amount) = self.get_budget(old)? {
            self.set_budget(new, amount)?;
            self.delete_budget(old)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemoryBudgets {
    budgets: BTreeMap<String, Decimal>,
}

impl MemoryBudgets {
    pub fn new() -> Self {
        Self::default()
    }
}

impl BudgetStore for MemoryBudgets {
    fn set_budget(&mut self, category: &str, amount: Decimal) -> Result<()> {
        if amount <= Decimal::ZERO {
            self.budgets.remove(category);
        } else {
            self.budgets.insert(category.to_string(), amount);
        }
        Ok(())
    }

    fn get_budget(&self, category: &str) -> Result<Option<Decimal>> {
        Ok(self.budgets.get(category).copied())
    }

    fn delete_budget(&mut self, category: &str) -> Result<()> {
        self.budgets.remove(category);
        Ok(())
    }

    fn all_budgets(&self) -> Result<BTreeMap<String, Decimal>> {
        Ok(self.budgets.clone())
    }
}

/// Budgets persisted in the local `budgets` table.
pub struct SqliteBudgets<'a> {
    conn: &'a Connection,
}

impl<'a> SqliteBudgets<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        SqliteBudgets { conn }
    }
}

fn parse_stored(category: &str, raw: &str) -> Option<Decimal> {
    match raw.parse::<Decimal>() {
        Ok(d) if d > Decimal::ZERO => Some(d),
        Ok(_) => None,
        Err(err) => {
            tracing::warn!(category, raw, %err, "ignoring unreadable budget amount");
            None
        }
    }
}

impl BudgetStore for SqliteBudgets<'_> {
    fn set_budget(&mut self, category: &str, amount: Decimal) -> Result<()> {
        if amount <= Decimal::ZERO {
            return self.delete_budget(category);
        }
        self.conn.execute(
            "INSERT INTO budgets(category, amount) VALUES (?1, ?2)
             ON CONFLICT(category) DO UPDATE SET amount=excluded.amount",
            params![category, amount.to_string()],
        )?;
        Ok(())
    }

    fn get_budget(&self, category: &str) -> Result<Option<Decimal>> {
        let raw: Option<String> = self
            .conn
            .query_row(
                "SELECT amount FROM budgets WHERE category=?1",
                params![category],
                |r| r.get(0),
            )
            .optional()?;
        Ok(raw.and_then(|s| parse_stored(category, &s)))
    }

    fn delete_budget(&mut self, category: &str) -> Result<()> {
        self.conn
            .execute("DELETE FROM budgets WHERE category=?1", params![category])?;
        Ok(())
    }

    fn all_budgets(&self) -> Result<BTreeMap<String, Decimal>> {
        let mut stmt = self
            .conn
            .prepare("SELECT category, amount FROM budgets ORDER BY category")?;
        let rows = stmt.query_map([], |r| Ok((r.get::<_, String>(0)?, r.get::<_, String>(1)?)))?;
        let mut out = BTreeMap::new();
        for row in rows {
            let (category, raw) = row?;
            if let Some(amount) = parse_stored(&category, &raw) {
                out.insert(category, amount);
            }
        }
        Ok(out)
    }

    fn rename_budget(&mut self, old: &str, new: &str) -> Result<()> {
        if old == new {
            return Ok(());
        }
        let tx = self.conn.unchecked_transaction()?;
        let amount: Option<String> = tx
            .query_row(
                "SELECT amount FROM budgets WHERE category=?1",
                params![old],
                |r| r.get(0),
            )
            .optional()?;
        if let Some(amount) = amount {
            tx.execute(
                "INSERT INTO budgets(category, amount) VALUES (?1, ?2)
                 ON CONFLICT(category) DO UPDATE SET amount=excluded.amount",
                params![new, amount],
            )?;
            tx.execute("DELETE FROM budgets WHERE category=?1", params![old])?;
        }
        tx.commit()?;
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum BudgetStatus {
    OnTrack,
    Warning,
    OverBudget,
}

impl BudgetStatus {
    pub fn label(&self) -> &'static str {
        match self {
            BudgetStatus::OnTrack => "On Track",
            BudgetStatus::Warning => "Warning",
            BudgetStatus::OverBudget => "Over Budget",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BudgetUsage {
    /// Bar fill, clamped to 100.
    pub percentage: Decimal,
    pub status: BudgetStatus,
}

/// The status band comes from the unclamped ratio; only the bar is clamped.
/// A non-positive budget means there is no budget and reads as on track.
pub fn budget_status(spent: Decimal, budget: Decimal) -> BudgetUsage {
    if budget <= Decimal::ZERO {
        return BudgetUsage {
            percentage: Decimal::ZERO,
            status: BudgetStatus::OnTrack,
        };
    }
    let raw = spent / budget * Decimal::ONE_HUNDRED;
    let status = if raw < WARNING_PERCENT {
        BudgetStatus::OnTrack
    } else if raw < Decimal::ONE_HUNDRED {
        BudgetStatus::Warning
    } else {
        BudgetStatus::OverBudget
    };
    BudgetUsage {
        percentage: raw.min(Decimal::ONE_HUNDRED),
        status,
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BudgetProgress {
    pub category: String,
    pub budget: Decimal,
    pub spent: Decimal,
    pub percentage: Decimal,
    pub status: BudgetStatus,
}

/// One row per positive budget, ordered by category name. Spend is looked up
/// case-insensitively, so a "food" budget tracks "Food" expenses.
pub fn budget_progress(
    store: &dyn BudgetStore,
    transactions: &[Transaction],
) -> Result<Vec<BudgetProgress>> {
    let spent_by_name: HashMap<String, Decimal> = category_expense_breakdown(transactions)
        .into_iter()
        .map(|c| (c.name.to_lowercase(), c.amount))
        .collect();
    let mut out = Vec::new();
    for (category, budget) in store.all_budgets()? {
        if budget <= Decimal::ZERO {
            continue;
        }
        let spent = spent_by_name
            .get(&category.to_lowercase())
            .copied()
            .unwrap_or(Decimal::ZERO);
        let usage = budget_status(spent, budget);
        out.push(BudgetProgress {
            category,
            budget,
            spent,
            percentage: usage.percentage,
            status: usage.status,
        });
    }
    Ok(out)
}
