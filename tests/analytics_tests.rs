// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use spendwise::analytics::*;
use spendwise::insights::{InsightKind, Severity, insights, kpis};
use spendwise::models::{Transaction, TransactionType};
use std::str::FromStr;

fn d(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

fn day(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn tx(kind: TransactionType, amount: &str, date: &str, category: &str, desc: &str) -> Transaction {
    let at = day(date).and_hms_opt(10, 0, 0).unwrap();
    Transaction::new(kind, d(amount), at)
        .with_category(category)
        .with_description(desc)
}

fn income(amount: &str, date: &str, category: &str) -> Transaction {
    tx(TransactionType::Income, amount, date, category, "income")
}

fn expense(amount: &str, date: &str, category: &str) -> Transaction {
    tx(TransactionType::Expense, amount, date, category, "expense")
}

fn march() -> Vec<Transaction> {
    vec![
        income("50000", "2025-03-01", "Salary"),
        expense("20000", "2025-03-03", "Food"),
        expense("10000", "2025-03-05", "Rent"),
    ]
}

#[test]
fn monthly_summary_figures() {
    let list = march();
    assert_eq!(total_income(&list), d("50000"));
    assert_eq!(total_expenses(&list), d("30000"));
    assert_eq!(balance(&list), d("20000"));
    assert_eq!(savings_rate(&list), d("40"));

    let breakdown = category_expense_breakdown(&list);
    let names: Vec<&str> = breakdown.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["Food", "Rent"]);
    let sum: Decimal = breakdown.iter().map(|c| c.amount).sum();
    assert_eq!(sum, total_expenses(&list));

    assert_eq!(top_spending_category(&list).unwrap().name, "Food");
    assert!(spending_concentration(&list) > d("66.6"));
    assert!(spending_concentration(&list) < d("66.7"));
    // 30% of 30000 is 9000, so Rent at 10000 is over the line as well
    let over: Vec<String> = overspending_categories(&list)
        .into_iter()
        .map(|c| c.name)
        .collect();
    assert_eq!(over, vec!["Food", "Rent"]);
    let ratio = income_expense_ratio(&list);
    assert!((ratio - 5.0 / 3.0).abs() < 1e-9);
}

#[test]
fn balance_is_income_minus_expenses_and_ignores_other_types() {
    let mut list = march();
    list.push(tx(
        TransactionType::from("TRANSFER"),
        "999",
        "2025-03-07",
        "Moves",
        "to savings",
    ));
    assert_eq!(balance(&list), total_income(&list) - total_expenses(&list));
    assert_eq!(total_expenses(&list), d("30000"));
}

#[test]
fn empty_list_is_all_zero() {
    let list: Vec<Transaction> = Vec::new();
    assert_eq!(balance(&list), Decimal::ZERO);
    assert_eq!(savings_rate(&list), Decimal::ZERO);
    assert_eq!(spending_concentration(&list), Decimal::ZERO);
    assert!(category_expense_breakdown(&list).is_empty());
    assert!(top_spending_category(&list).is_none());
    assert_eq!(income_expense_ratio(&list), 0.0);
}

#[test]
fn ties_keep_first_seen_order_and_missing_category_is_uncategorized() {
    let list = vec![
        expense("100", "2025-03-01", "Travel"),
        expense("100", "2025-03-02", "Food"),
        Transaction::new(
            TransactionType::Expense,
            d("40"),
            day("2025-03-03").and_hms_opt(9, 0, 0).unwrap(),
        ),
    ];
    let breakdown = category_expense_breakdown(&list);
    let names: Vec<&str> = breakdown.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["Travel", "Food", "Uncategorized"]);
}

#[test]
fn ratio_is_infinite_with_income_and_no_expenses() {
    let list = vec![income("1000", "2025-03-01", "Salary")];
    assert!(income_expense_ratio(&list).is_infinite());
    assert_eq!(savings_rate(&list), d("100"));
}

#[test]
fn month_over_month_rolls_over_january() {
    let list = vec![
        expense("200", "2024-12-20", "Food"),
        expense("300", "2025-01-05", "Food"),
        income("5000", "2025-01-01", "Salary"),
    ];
    let mom = month_over_month(&list, day("2025-01-15"));
    assert_eq!(mom.direction, Direction::Up);
    assert_eq!(mom.change, d("50"));
    assert_eq!(mom.previous_amount, d("200"));
    assert_eq!(mom.current_amount, d("300"));
}

#[test]
fn month_over_month_reports_decrease_as_positive_change() {
    let list = vec![
        expense("400", "2025-02-10", "Food"),
        expense("100", "2025-03-10", "Food"),
    ];
    let mom = month_over_month(&list, day("2025-03-20"));
    assert_eq!(mom.direction, Direction::Down);
    assert_eq!(mom.change, d("75"));
}

#[test]
fn month_over_month_without_previous_spend() {
    let list = vec![expense("500", "2025-03-10", "Food")];
    let mom = month_over_month(&list, day("2025-03-20"));
    assert_eq!(mom.change, d("100"));
    assert_eq!(mom.direction, Direction::Up);

    let quiet = month_over_month(&[], day("2025-03-20"));
    assert_eq!(quiet.change, Decimal::ZERO);
    assert_eq!(quiet.direction, Direction::Neutral);
}

#[test]
fn category_month_over_month_matches_case_exactly() {
    let list = vec![
        expense("100", "2025-02-10", "Food"),
        expense("150", "2025-03-10", "Food"),
    ];
    let today = day("2025-03-20");
    let exact = category_month_over_month(&list, "Food", today);
    assert_eq!(exact.change, d("50"));
    assert_eq!(exact.direction, Direction::Up);

    let lower = category_month_over_month(&list, "food", today);
    assert_eq!(lower.current_amount, Decimal::ZERO);
    assert_eq!(lower.direction, Direction::Neutral);
}

#[test]
fn month_transactions_uses_zero_based_month() {
    let list = vec![
        expense("1", "2025-01-31", "A"),
        expense("2", "2025-02-01", "B"),
    ];
    let jan = month_transactions(&list, 2025, 0);
    assert_eq!(jan.len(), 1);
    assert_eq!(jan[0].category_name(), "A");
}

#[test]
fn drill_down_is_trimmed_and_case_insensitive() {
    let mut list = march();
    list.push(Transaction::new(
        TransactionType::Expense,
        d("5"),
        day("2025-03-09").and_hms_opt(8, 0, 0).unwrap(),
    ));
    assert_eq!(category_transactions(&list, "  FOOD ").len(), 1);
    assert_eq!(category_transactions(&list, "rent")[0].amount, d("10000"));
    assert!(category_transactions(&list, "Uncategorized").is_empty());
}

#[test]
fn recent_is_newest_first_and_bounded() {
    let list = march();
    let recent = recent_transactions(&list, 2);
    assert_eq!(recent.len(), 2);
    assert_eq!(recent[0].category_name(), "Rent");
    assert_eq!(recent[1].category_name(), "Food");
}

#[test]
fn search_matches_description_or_category_with_type_filter() {
    let list = vec![
        tx(TransactionType::Expense, "250", "2025-03-02", "Food", "Zomato order"),
        tx(TransactionType::Expense, "90", "2025-03-03", "Transport", "Metro card"),
        tx(TransactionType::Income, "300", "2025-03-04", "Refunds", "zomato refund"),
    ];
    let all_zomato = search(
        &list,
        &TransactionFilter {
            search: "ZOMATO".to_string(),
            kind: None,
        },
    );
    assert_eq!(all_zomato.len(), 2);

    let spent = search(
        &list,
        &TransactionFilter {
            search: "zomato".to_string(),
            kind: Some(TransactionType::Expense),
        },
    );
    assert_eq!(spent.len(), 1);

    let by_category = search(
        &list,
        &TransactionFilter {
            search: "transp".to_string(),
            kind: None,
        },
    );
    assert_eq!(by_category[0].description, "Metro card");
}

#[test]
fn insight_cards_for_concentrated_spending() {
    let cards = insights(&march(), day("2025-03-20"));
    let kinds: Vec<InsightKind> = cards.iter().map(|c| c.kind).collect();
    assert_eq!(
        kinds,
        vec![
            InsightKind::Spending,
            InsightKind::Concentration,
            InsightKind::Overspending
        ]
    );
    assert_eq!(cards[0].title, "Food is your highest expense");
    assert_eq!(cards[0].value, "₹20,000");
    assert_eq!(cards[1].value, "Food");
    assert_eq!(cards[2].title, "Overspending in 2 categories");
    assert_eq!(cards[2].severity, Severity::Error);
}

#[test]
fn ratio_card_when_expenses_nearly_match_income() {
    let list = vec![
        income("1000", "2025-03-01", "Salary"),
        expense("300", "2025-03-02", "Rent"),
        expense("300", "2025-03-03", "Food"),
        expense("300", "2025-03-04", "Travel"),
    ];
    let cards = insights(&list, day("2025-03-20"));
    let ratio = cards.iter().find(|c| c.kind == InsightKind::Ratio).unwrap();
    assert_eq!(ratio.value, "111%");
    assert!(cards.iter().all(|c| c.kind != InsightKind::Positive));
}

#[test]
fn positive_card_only_when_nothing_else_applies() {
    let list = vec![income("1000", "2025-03-01", "Salary")];
    let cards = insights(&list, day("2025-03-20"));
    assert_eq!(cards.len(), 1);
    assert_eq!(cards[0].kind, InsightKind::Positive);
    assert!(insights(&[], day("2025-03-20")).is_empty());
}

#[test]
fn kpi_strip() {
    let k = kpis(&march(), day("2025-03-20"));
    assert_eq!(k.balance, d("20000"));
    assert_eq!(k.savings_rate, d("40"));
    assert_eq!(k.savings_trend, Direction::Up);
    assert_eq!(k.expense_trend.direction, Direction::Up);
    assert_eq!(k.expense_trend.change, d("100"));
}
