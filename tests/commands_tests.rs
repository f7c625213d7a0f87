// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use spendwise::Result;
use spendwise::budget::{BudgetStatus, BudgetStore, MemoryBudgets};
use spendwise::cli::build_cli;
use spendwise::client::TransactionStore;
use spendwise::commands::{dashboard, transactions};
use spendwise::date_range::DateRange;
use spendwise::insights::InsightKind;
use spendwise::models::{Transaction, TransactionPatch, TransactionType};
use spendwise::utils::{parse_amount, parse_type, range_from_args};
use std::cell::RefCell;
use std::str::FromStr;

fn at(s: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap()
}

fn tx(kind: TransactionType, amount: &str, date: &str, category: &str, desc: &str) -> Transaction {
    Transaction::new(kind, Decimal::from_str(amount).unwrap(), at(date))
        .with_category(category)
        .with_description(desc)
}

struct Fixed(RefCell<Vec<Transaction>>);

impl TransactionStore for Fixed {
    fn list_transactions(&self) -> Result<Vec<Transaction>> {
        Ok(self.0.borrow().clone())
    }

    fn create_transaction(&self, transaction: &Transaction) -> Result<Transaction> {
        let mut rows = self.0.borrow_mut();
        let saved = transaction.clone().with_id(rows.len() as i64 + 1);
        rows.push(saved.clone());
        Ok(saved)
    }

    fn update_transaction(&self, id: i64, patch: &TransactionPatch) -> Result<Transaction> {
        let mut rows = self.0.borrow_mut();
        let row = rows.iter_mut().find(|t| t.id == Some(id)).unwrap();
        if let Some(amount) = patch.amount {
            row.amount = amount;
        }
        Ok(row.clone())
    }

    fn delete_transaction(&self, id: i64) -> Result<()> {
        self.0.borrow_mut().retain(|t| t.id != Some(id));
        Ok(())
    }

    fn delete_all_transactions(&self) -> Result<()> {
        self.0.borrow_mut().clear();
        Ok(())
    }
}

fn sub_matches(args: &[&str]) -> clap::ArgMatches {
    let m = build_cli().try_get_matches_from(args.iter().copied()).unwrap();
    let (_, sub) = m.subcommand().unwrap();
    sub.clone()
}

#[test]
fn range_flags() {
    let now = at("2025-06-15 12:00:00");
    let m = sub_matches(&["spendwise", "dashboard"]);
    assert_eq!(range_from_args(&m, now).unwrap(), DateRange::current_month(now));

    let m = sub_matches(&["spendwise", "dashboard", "--range", "last-month"]);
    assert_eq!(range_from_args(&m, now).unwrap(), DateRange::last_month(now));

    let m = sub_matches(&[
        "spendwise", "dashboard", "--range", "all-time", "--from", "2025-01-01", "--to", "2025-01-31",
    ]);
    let r = range_from_args(&m, now).unwrap();
    assert_eq!(r.start, at("2025-01-01 00:00:00"));
    assert_eq!(r.end, at("2025-01-31 23:59:59"));

    let m = sub_matches(&["spendwise", "dashboard", "--from", "2025-02-01", "--to", "2025-01-01"]);
    assert!(range_from_args(&m, now).is_err());

    let m = sub_matches(&["spendwise", "dashboard", "--range", "someday"]);
    assert!(range_from_args(&m, now).is_err());
}

#[test]
fn cli_rejects_conflicting_output_flags() {
    let res = build_cli().try_get_matches_from(["spendwise", "budget", "list", "--json", "--jsonl"]);
    assert!(res.is_err());
    let res = build_cli().try_get_matches_from(["spendwise", "tx", "add", "--amount", "5"]);
    assert!(res.is_err());
}

#[test]
fn category_add_and_edit_accept_a_budget() {
    let m = sub_matches(&[
        "spendwise", "category", "add", "--name", "Food", "--type", "expense", "--budget", "4000",
    ]);
    let (_, add) = m.subcommand().unwrap();
    assert_eq!(add.get_one::<String>("budget").map(String::as_str), Some("4000"));

    let m = sub_matches(&["spendwise", "category", "edit", "Food", "--budget", ""]);
    let (_, edit) = m.subcommand().unwrap();
    assert_eq!(edit.get_one::<String>("budget").map(String::as_str), Some(""));
}

#[test]
fn input_parsing() {
    assert_eq!(parse_type("income").unwrap(), TransactionType::Income);
    assert!(parse_type("transfer").is_err());
    assert!(parse_amount("-10").is_err());
    assert_eq!(parse_amount("12.50").unwrap(), Decimal::new(1250, 2));
}

#[test]
fn tx_list_filters_and_sorts_newest_first() {
    let store = Fixed(RefCell::new(vec![
        tx(TransactionType::Expense, "250", "2025-03-02 20:00:00", "Food", "Zomato"),
        tx(TransactionType::Expense, "90", "2025-03-05 09:00:00", "Transport", "Metro"),
        tx(TransactionType::Income, "300", "2025-03-06 10:00:00", "Food", "Zomato refund"),
        tx(TransactionType::Expense, "400", "2025-02-20 20:00:00", "Food", "Zomato"),
    ]));
    let m = sub_matches(&[
        "spendwise", "tx", "list", "--from", "2025-03-01", "--to", "2025-03-31", "--search", "zomato",
    ]);
    let (_, list) = m.subcommand().map(|(n, s)| (n.to_string(), s.clone())).unwrap();
    let rows = transactions::query_rows(&store, &list).unwrap();
    let descs: Vec<&str> = rows.iter().map(|t| t.description.as_str()).collect();
    assert_eq!(descs, vec!["Zomato refund", "Zomato"]);

    let m = sub_matches(&[
        "spendwise", "tx", "list", "--range", "all-time", "--category", "food", "--type", "expense",
        "--limit", "1",
    ]);
    let (_, list) = m.subcommand().map(|(n, s)| (n.to_string(), s.clone())).unwrap();
    let rows = transactions::query_rows(&store, &list).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].amount, Decimal::from(250));
}

#[test]
fn tx_add_fills_defaults_and_clear_needs_confirmation() {
    let store = Fixed(RefCell::new(Vec::new()));
    let m = sub_matches(&[
        "spendwise", "tx", "add", "--date", "2025-03-02", "--amount", "120", "--type", "expense",
        "--description", "Lunch",
    ]);
    transactions::handle(&store, &m).unwrap();
    let saved = store.0.borrow()[0].clone();
    assert_eq!(saved.category.as_deref(), Some("Uncategorized"));
    assert_eq!(saved.payment_method.as_deref(), Some("UPI"));
    assert_eq!(saved.date, at("2025-03-02 00:00:00"));

    let m = sub_matches(&["spendwise", "tx", "edit", "1", "--amount", "150"]);
    transactions::handle(&store, &m).unwrap();
    assert_eq!(store.0.borrow()[0].amount, Decimal::from(150));

    let m = sub_matches(&["spendwise", "tx", "clear"]);
    assert!(transactions::handle(&store, &m).is_err());
    assert_eq!(store.0.borrow().len(), 1);

    let m = sub_matches(&["spendwise", "tx", "clear", "--yes"]);
    transactions::handle(&store, &m).unwrap();
    assert!(store.0.borrow().is_empty());
}

#[test]
fn dashboard_combines_range_kpis_and_budgets() {
    let all = vec![
        tx(TransactionType::Income, "50000", "2025-03-01 09:00:00", "Salary", "Salary"),
        tx(TransactionType::Expense, "20000", "2025-03-03 09:00:00", "Rent", "Rent"),
        tx(TransactionType::Expense, "10000", "2025-03-05 09:00:00", "Food", "Groceries"),
        tx(TransactionType::Expense, "7000", "2025-02-05 09:00:00", "Food", "Groceries"),
    ];
    let mut budgets = MemoryBudgets::new();
    budgets.set_budget("food", Decimal::from(9000)).unwrap();
    let today = NaiveDate::from_ymd_opt(2025, 3, 20).unwrap();
    let range = DateRange::current_month(today.and_hms_opt(12, 0, 0).unwrap());

    let dash = dashboard::build(&all, &budgets, &range, today).unwrap();
    assert_eq!(dash.kpis.expenses, Decimal::from(30000));
    assert_eq!(dash.kpis.savings_rate, Decimal::from(40));
    assert_eq!(dash.breakdown[0].name, "Rent");
    assert_eq!(dash.insights[0].kind, InsightKind::Spending);
    assert_eq!(dash.budgets.len(), 1);
    assert_eq!(dash.budgets[0].status, BudgetStatus::OverBudget);
    assert_eq!(dash.recent.len(), 4);
    assert_eq!(dash.recent[0].description, "Groceries");
    assert_eq!(dash.recent[0].amount, Decimal::from(10000));
}

#[test]
fn dashboard_recent_activity_ignores_the_range() {
    let all = vec![
        tx(TransactionType::Expense, "300", "2025-03-03 09:00:00", "Food", "Dinner"),
        tx(TransactionType::Expense, "120", "2025-04-01 09:00:00", "Transport", "Cab"),
    ];
    let budgets = MemoryBudgets::new();
    let today = NaiveDate::from_ymd_opt(2025, 3, 20).unwrap();
    let range = DateRange::last_month(today.and_hms_opt(12, 0, 0).unwrap());

    let dash = dashboard::build(&all, &budgets, &range, today).unwrap();
    assert_eq!(dash.kpis.expenses, Decimal::ZERO);
    assert!(dash.breakdown.is_empty());
    let descs: Vec<&str> = dash.recent.iter().map(|t| t.description.as_str()).collect();
    assert_eq!(descs, vec!["Cab", "Dinner"]);
}
