// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use spendwise::date_range::*;
use spendwise::models::{Transaction, TransactionType};

fn at(s: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap()
}

fn tx_at(s: &str) -> Transaction {
    Transaction::new(TransactionType::Expense, Decimal::ONE, at(s))
}

#[test]
fn current_and_last_month_presets() {
    let now = at("2024-03-15 13:45:00");
    let this = DateRange::current_month(now);
    assert_eq!(this.start, at("2024-03-01 00:00:00"));
    assert_eq!(this.end, at("2024-03-31 23:59:59"));

    let last = DateRange::last_month(now);
    assert_eq!(last.start, at("2024-02-01 00:00:00"));
    assert_eq!(last.end, at("2024-02-29 23:59:59"));

    let jan = DateRange::last_month(at("2025-01-10 08:00:00"));
    assert_eq!(jan.start, at("2024-12-01 00:00:00"));
    assert_eq!(jan.end, at("2024-12-31 23:59:59"));
}

#[test]
fn trailing_and_year_presets() {
    let now = at("2025-06-30 18:00:00");
    let last30 = DateRange::trailing_days(now, 30);
    assert_eq!(last30.start, at("2025-05-31 18:00:00"));
    assert_eq!(last30.end, now);

    let year = DateRange::this_year(now);
    assert_eq!(year.start, at("2025-01-01 00:00:00"));
    assert_eq!(year.end, at("2025-12-31 23:59:59"));

    let all = DateRange::all_time();
    assert!(all.contains(at("2000-01-01 00:00:00")));
    assert!(all.contains(at("2100-12-31 23:59:59")));
}

#[test]
fn inverted_range_is_rejected_and_state_kept() {
    let now = at("2025-06-10 10:00:00");
    let mut state = DateRangeState::new(now);
    let before = state.range();
    let err = state
        .set_range(at("2025-06-10 00:00:00"), at("2025-06-01 00:00:00"))
        .unwrap_err();
    assert!(matches!(err, spendwise::Error::InvalidRange { .. }));
    assert_eq!(state.range(), before);
}

#[test]
fn presets_parse_by_name() {
    for p in Preset::ALL {
        assert_eq!(p.as_str().parse::<Preset>().unwrap(), p);
    }
    assert_eq!("THIS-YEAR".parse::<Preset>().unwrap(), Preset::ThisYear);
    assert!("fortnight".parse::<Preset>().is_err());
}

#[test]
fn state_moves_both_bounds_together() {
    let now = at("2025-06-10 10:00:00");
    let mut state = DateRangeState::new(now);
    state.apply(Preset::LastMonth, now);
    assert_eq!(state.start(), at("2025-05-01 00:00:00"));
    assert_eq!(state.end(), at("2025-05-31 23:59:59"));
    state.to_all_time();
    assert_eq!(state.range(), DateRange::all_time());
}

#[test]
fn filter_is_inclusive_and_idempotent() {
    let list = vec![
        tx_at("2025-05-31 23:59:59"),
        tx_at("2025-06-01 00:00:00"),
        tx_at("2025-06-30 23:59:59"),
        tx_at("2025-07-01 00:00:00"),
    ];
    let june = DateRange::current_month(at("2025-06-15 12:00:00"));
    let once = filter_by_date_range(&list, Some(june.start), Some(june.end));
    assert_eq!(once.len(), 2);
    let twice = filter_by_date_range(&once, Some(june.start), Some(june.end));
    assert_eq!(once, twice);
}

#[test]
fn missing_bound_returns_input_unchanged() {
    let list = vec![tx_at("1999-01-01 00:00:00"), tx_at("2025-06-01 00:00:00")];
    let start = NaiveDate::from_ymd_opt(2025, 1, 1)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap();
    assert_eq!(filter_by_date_range(&list, Some(start), None), list);
    assert_eq!(filter_by_date_range(&list, None, None), list);
}

#[test]
fn helpers_handle_month_ends() {
    let feb = NaiveDate::from_ymd_opt(2023, 2, 14).unwrap();
    assert_eq!(last_day_of_month(feb), NaiveDate::from_ymd_opt(2023, 2, 28).unwrap());
    let dec = NaiveDate::from_ymd_opt(2023, 12, 5).unwrap();
    assert_eq!(last_day_of_month(dec), NaiveDate::from_ymd_opt(2023, 12, 31).unwrap());
    assert_eq!(previous_month(NaiveDate::from_ymd_opt(2024, 1, 9).unwrap()), (2023, 12));
}
