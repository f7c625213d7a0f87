// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rust_decimal::Decimal;
use spendwise::display::*;
use spendwise::models::{Category, CategoryKind};
use std::str::FromStr;

#[test]
fn same_name_same_color_and_icon() {
    let a = category_color(Some("Groceries"), None);
    let b = category_color(Some("Groceries"), None);
    assert_eq!(a, b);
    assert_eq!(
        category_icon(Some("Groceries"), None),
        category_icon(Some("Groceries"), None)
    );
}

#[test]
fn slot_is_code_unit_sum_modulo_table() {
    // "A" = 65, slot 5 in both tables
    assert_eq!(hash("A"), 65);
    assert_eq!(category_color(Some("A"), None).name, "Pink");
    assert_eq!(category_icon(Some("A"), None), CATEGORY_ICONS[5]);
    // anagrams collide
    assert_eq!(
        category_color(Some("ab"), None),
        category_color(Some("ba"), None)
    );
}

#[test]
fn empty_name_uses_first_entries() {
    assert_eq!(category_color(None, None).value, "#3b82f6");
    assert_eq!(category_color(Some(""), None).name, "Blue");
    assert_eq!(category_icon(None, None), "💰");
}

#[test]
fn overrides_win() {
    let palette = category_color(Some("Food"), Some("#ef4444"));
    assert_eq!(palette.name, "Red");
    let custom = category_color(Some("Food"), Some("#123456"));
    assert_eq!(custom.name, "Custom");
    assert_eq!(custom.value, "#123456");
    assert_eq!(category_icon(Some("Food"), Some("🥗")), "🥗");
}

#[test]
fn display_props_use_stored_color_and_icon() {
    let mut cat = Category::new("Food", CategoryKind::Expense);
    cat.color = Some("#10b981".to_string());
    cat.icon = Some("🍜".to_string());
    let props = display_props(Some(&cat));
    assert_eq!(props.name, "Food");
    assert_eq!(props.color.name, "Green");
    assert_eq!(props.icon, "🍜");

    let none = display_props(None);
    assert_eq!(none.name, "Uncategorized");
}

#[test]
fn rupees_with_indian_grouping() {
    let f = |s: &str| format_currency(Decimal::from_str(s).unwrap());
    assert_eq!(f("0"), "₹0");
    assert_eq!(f("999"), "₹999");
    assert_eq!(f("1000"), "₹1,000");
    assert_eq!(f("100000"), "₹1,00,000");
    assert_eq!(f("1234567.5"), "₹12,34,567.5");
    assert_eq!(f("250.456"), "₹250.46");
    assert_eq!(f("-1500"), "-₹1,500");
}

#[test]
fn paise_round_half_away_from_zero() {
    let f = |s: &str| format_currency(Decimal::from_str(s).unwrap());
    assert_eq!(f("0.125"), "₹0.13");
    assert_eq!(f("2.345"), "₹2.35");
    assert_eq!(f("-0.125"), "-₹0.13");
    assert_eq!(f("0.124"), "₹0.12");
}
