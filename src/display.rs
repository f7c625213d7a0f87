// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Deterministic color and icon assignment for category names.
//!
//! Nothing is stored: the same name always hashes to the same palette slot, so
//! existing users keep the colors they are used to.

use crate::models::{Category, UNCATEGORIZED};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PaletteColor {
    pub name: &'static str,
    pub value: &'static str,
}

pub const CATEGORY_COLORS: [PaletteColor; 10] = [
    PaletteColor { name: "Blue", value: "#3b82f6" },
    PaletteColor { name: "Red", value: "#ef4444" },
    PaletteColor { name: "Green", value: "#10b981" },
    PaletteColor { name: "Yellow", value: "#f59e0b" },
    PaletteColor { name: "Purple", value: "#8b5cf6" },
    PaletteColor { name: "Pink", value: "#ec4899" },
    PaletteColor { name: "Cyan", value: "#06b6d4" },
    PaletteColor { name: "Indigo", value: "#6366f1" },
    PaletteColor { name: "Orange", value: "#f97316" },
    PaletteColor { name: "Teal", value: "#14b8a6" },
];

pub const CATEGORY_ICONS: [&str; 30] = [
    "💰", "💸", "🍔", "🚗", "🏠", "👕", "💊", "🎓", "🎮", "📱",
    "✈️", "🍕", "☕", "🎬", "🏋️", "💼", "🎁", "💳", "📚", "🎨",
    "🏥", "🎵", "🌮", "🍺", "🚌", "🏖️", "🛒", "💻", "📺", "🎯",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Color {
    pub name: String,
    pub value: String,
}

impl From<PaletteColor> for Color {
    fn from(c: PaletteColor) -> Self {
        Color {
            name: c.name.to_string(),
            value: c.value.to_string(),
        }
    }
}

/// Sum of the name's UTF-16 code units.
pub fn hash(name: &str) -> u64 {
    name.encode_utf16().map(u64::from).sum()
}

fn slot(name: &str, table_len: usize) -> usize {
    (hash(name) % table_len as u64) as usize
}

/// A palette override resolves to its palette entry; any other value is
/// reported as a custom color.
pub fn category_color(name: Option<&str>, custom: Option<&str>) -> Color {
    if let Some(value) = custom.filter(|v| !v.is_empty()) {
        return match CATEGORY_COLORS.iter().find(|c| c.value == value) {
            Some(c) => Color::from(*c),
            None => Color {
                name: "Custom".to_string(),
                value: value.to_string(),
            },
        };
    }
    match name.filter(|n| !n.is_empty()) {
        Some(n) => Color::from(CATEGORY_COLORS[slot(n, CATEGORY_COLORS.len())]),
        None => Color::from(CATEGORY_COLORS[0]),
    }
}

pub fn category_icon(name: Option<&str>, custom: Option<&str>) -> String {
    if let Some(icon) = custom.filter(|i| !i.is_empty()) {
        return icon.to_string();
    }
    match name.filter(|n| !n.is_empty()) {
        Some(n) => CATEGORY_ICONS[slot(n, CATEGORY_ICONS.len())].to_string(),
        None => CATEGORY_ICONS[0].to_string(),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayProps {
    pub name: String,
    pub color: Color,
    pub icon: String,
}

/// Presentation bundle for a category, honouring its stored color and icon.
pub fn display_props(category: Option<&Category>) -> DisplayProps {
    let name = category
        .map(|c| c.name.as_str())
        .filter(|n| !n.is_empty())
        .unwrap_or(UNCATEGORIZED);
    let color = category_color(Some(name), category.and_then(|c| c.color.as_deref()));
    let icon = category_icon(Some(name), category.and_then(|c| c.icon.as_deref()));
    DisplayProps {
        name: name.to_string(),
        color,
        icon,
    }
}

/// Rupee amount with Indian digit grouping, e.g. `₹12,34,567.5`.
pub fn format_currency(amount: Decimal) -> String {
    let rounded = amount
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
        .normalize();
    let text = rounded.abs().to_string();
    let (int_part, frac_part) = match text.split_once('.') {
        Some((i, f)) => (i.to_string(), Some(f.to_string())),
        None => (text.clone(), None),
    };
    let grouped = if int_part.len() <= 3 {
        int_part
    } else {
        let (head, tail) = int_part.split_at(int_part.len() - 3);
        let mut groups: Vec<&str> = Vec::new();
        let mut rest = head;
        while rest.len() > 2 {
            let (h, t) = rest.split_at(rest.len() - 2);
            groups.push(t);
            rest = h;
        }
        groups.push(rest);
        groups.reverse();
        format!("{},{}", groups.join(","), tail)
    };
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    match frac_part {
        Some(f) => format!("{}₹{}.{}", sign, grouped, f),
        None => format!("{}₹{}", sign, grouped),
    }
}

/// Display props for a bare name, as used for transaction rows and budgets.
pub fn display_for_name(name: &str) -> DisplayProps {
    let name = if name.is_empty() { UNCATEGORIZED } else { name };
    DisplayProps {
        name: name.to_string(),
        color: category_color(Some(name), None),
        icon: category_icon(Some(name), None),
    }
}
