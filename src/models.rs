// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

pub const UNCATEGORIZED: &str = "Uncategorized";
pub const DEFAULT_PAYMENT_METHOD: &str = "UPI";

/// Direction of cash flow. Parsed case-insensitively; anything that is not
/// income or expense is kept verbatim and ignored by the totals.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TransactionType {
    Income,
    Expense,
    Other(String),
}

impl TransactionType {
    pub fn as_str(&self) -> &str {
        match self {
            TransactionType::Income => "INCOME",
            TransactionType::Expense => "EXPENSE",
            TransactionType::Other(s) => s.as_str(),
        }
    }
}

impl From<String> for TransactionType {
    fn from(s: String) -> Self {
        match s.to_lowercase().as_str() {
            "income" => TransactionType::Income,
            "expense" => TransactionType::Expense,
            _ => TransactionType::Other(s),
        }
    }
}

impl From<&str> for TransactionType {
    fn from(s: &str) -> Self {
        TransactionType::from(s.to_string())
    }
}

impl From<TransactionType> for String {
    fn from(t: TransactionType) -> Self {
        t.as_str().to_string()
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal, // magnitude, sign comes from `kind`
    #[serde(rename = "type")]
    pub kind: TransactionType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(deserialize_with = "flexible_date::deserialize")]
    pub date: NaiveDateTime,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<String>,
}

impl Transaction {
    pub fn new(kind: TransactionType, amount: Decimal, date: NaiveDateTime) -> Self {
        Transaction {
            id: None,
            description: String::new(),
            amount,
            kind,
            category: None,
            date,
            payment_method: None,
        }
    }

    pub fn with_category(mut self, category: &str) -> Self {
        self.category = Some(category.to_string());
        self
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = description.to_string();
        self
    }

    pub fn with_id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }

    pub fn is_income(&self) -> bool {
        self.kind == TransactionType::Income
    }

    pub fn is_expense(&self) -> bool {
        self.kind == TransactionType::Expense
    }

    /// Category with missing or empty names folded into "Uncategorized".
    pub fn category_name(&self) -> &str {
        match self.category.as_deref() {
            Some(c) if !c.is_empty() => c,
            _ => UNCATEGORIZED,
        }
    }

    pub fn payment_method(&self) -> &str {
        match self.payment_method.as_deref() {
            Some(p) if !p.is_empty() => p,
            _ => DEFAULT_PAYMENT_METHOD,
        }
    }

    pub fn day(&self) -> NaiveDate {
        self.date.date()
    }
}

/// Partial update sent with `PUT /transactions/{id}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(
        with = "rust_decimal::serde::float_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub amount: Option<Decimal>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<TransactionType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDateTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<String>,
}

impl TransactionPatch {
    pub fn is_empty(&self) -> bool {
        *self == TransactionPatch::default()
    }
}

/// Category flavour. Stored values other than income or expense are kept
/// verbatim so one odd row does not break the whole list.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CategoryKind {
    Income,
    Expense,
    Other(String),
}

impl CategoryKind {
    pub fn as_str(&self) -> &str {
        match self {
            CategoryKind::Income => "income",
            CategoryKind::Expense => "expense",
            CategoryKind::Other(s) => s.as_str(),
        }
    }
}

impl From<String> for CategoryKind {
    fn from(s: String) -> Self {
        match s.trim().to_lowercase().as_str() {
            "income" => CategoryKind::Income,
            "expense" => CategoryKind::Expense,
            _ => CategoryKind::Other(s),
        }
    }
}

impl From<&str> for CategoryKind {
    fn from(s: &str) -> Self {
        CategoryKind::from(s.to_string())
    }
}

impl From<CategoryKind> for String {
    fn from(k: CategoryKind) -> Self {
        k.as_str().to_string()
    }
}

impl fmt::Display for CategoryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: CategoryKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

impl Category {
    pub fn new(name: &str, kind: CategoryKind) -> Self {
        Category {
            id: None,
            name: name.to_string(),
            kind,
            description: None,
            color: None,
            icon: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<CategoryKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

/// One row extracted from an uploaded statement, not yet saved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedTransaction {
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    #[serde(rename = "type", default)]
    pub kind: Option<TransactionType>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default, deserialize_with = "flexible_date::deserialize_lenient")]
    pub date: Option<NaiveDateTime>,
    #[serde(default)]
    pub payment_method: Option<String>,
}

/// Parser service output for a single statement upload.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ParsedStatement {
    pub total_transactions: usize,
    pub successful_parses: usize,
    pub failed_parses: usize,
    #[serde(deserialize_with = "null_as_default")]
    pub transactions: Vec<ParsedTransaction>,
    #[serde(deserialize_with = "null_as_default")]
    pub errors: Vec<String>,
    pub message: Option<String>,
}

fn null_as_default<'de, D, T>(d: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(d)?.unwrap_or_default())
}

/// Dates reach us either as ISO-8601 text or as a
/// `[year, month, day, hour, minute, second]` array with a 1-based month.
pub mod flexible_date {
    use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
    use serde::{Deserialize, Deserializer, de::Error as _};

    #[derive(Debug, Clone, PartialEq, Deserialize)]
    #[serde(untagged)]
    pub enum RawDate {
        Text(String),
        Parts(Vec<i64>),
    }

    impl RawDate {
        pub fn normalize(&self) -> Option<NaiveDateTime> {
            match self {
                RawDate::Text(s) => parse_text(s),
                RawDate::Parts(p) => from_parts(p),
            }
        }
    }

    const DATE_TIME_FORMATS: &[&str] = &[
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M",
    ];

    pub fn parse_text(s: &str) -> Option<NaiveDateTime> {
        let s = s.trim();
        for fmt in DATE_TIME_FORMATS {
            if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
                return Some(dt);
            }
        }
        if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
            return Some(dt.naive_local());
        }
        NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .ok()
            .map(|d| d.and_time(NaiveTime::MIN))
    }

    pub fn from_parts(parts: &[i64]) -> Option<NaiveDateTime> {
        if parts.len() < 3 {
            return None;
        }
        let field = |i: usize| parts.get(i).copied().unwrap_or(0);
        let year = i32::try_from(parts[0]).ok()?;
        let month = u32::try_from(parts[1]).ok()?;
        let day = u32::try_from(parts[2]).ok()?;
        NaiveDate::from_ymd_opt(year, month, day)?.and_hms_opt(
            u32::try_from(field(3)).ok()?,
            u32::try_from(field(4)).ok()?,
            u32::try_from(field(5)).ok()?,
        )
    }

    pub fn deserialize<'de, D>(d: D) -> Result<NaiveDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = RawDate::deserialize(d)?;
        raw.normalize()
            .ok_or_else(|| D::Error::custom(format!("unrecognised date {:?}", raw)))
    }

    /// Missing, null or unreadable dates become `None`; the import flow
    /// substitutes the current time for those when saving.
    pub fn deserialize_lenient<'de, D>(d: D) -> Result<Option<NaiveDateTime>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<RawDate>::deserialize(d)?;
        Ok(raw.and_then(|r| {
            let dt = r.normalize();
            if dt.is_none() {
                tracing::warn!(?r, "dropping unreadable statement date");
            }
            dt
        }))
    }
}
