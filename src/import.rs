// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Statement import: validate the file locally, let the parser service extract
//! rows, flag rows that are already stored, then save the rest one by one.

use crate::client::{StatementParser, TransactionStore};
use crate::error::{Error, Result};
use crate::models::{
    DEFAULT_PAYMENT_METHOD, ParsedTransaction, Transaction, TransactionType, UNCATEGORIZED,
};
use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::Serialize;
use std::fs::File;
use std::io::Read;
use std::path::Path;

pub const MAX_STATEMENT_BYTES: u64 = 10 * 1024 * 1024;
const PDF_SIGNATURE: &[u8] = b"%PDF-";
/// Amounts within a paisa/cent of each other are the same amount.
const AMOUNT_TOLERANCE: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

fn invalid(path: &Path, reason: impl Into<String>) -> Error {
    Error::InvalidFile {
        path: path.display().to_string(),
        reason: reason.into(),
    }
}

/// Rejects anything that is not a plausible PDF before it is uploaded.
pub fn validate_statement_file(path: &Path) -> Result<()> {
    let meta = std::fs::metadata(path).map_err(|_| invalid(path, "file does not exist"))?;
    if !meta.is_file() {
        return Err(invalid(path, "not a regular file"));
    }
    if meta.len() == 0 {
        return Err(invalid(path, "file is empty"));
    }
    if meta.len() > MAX_STATEMENT_BYTES {
        return Err(invalid(
            path,
            format!(
                "file size {} bytes exceeds maximum allowed size {} bytes",
                meta.len(),
                MAX_STATEMENT_BYTES
            ),
        ));
    }
    let is_pdf_name = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("pdf"));
    if !is_pdf_name {
        return Err(invalid(path, "please select a PDF statement"));
    }
    let mut head = Vec::with_capacity(PDF_SIGNATURE.len());
    File::open(path)?
        .take(PDF_SIGNATURE.len() as u64)
        .read_to_end(&mut head)?;
    if head != PDF_SIGNATURE {
        return Err(invalid(path, "file does not look like a PDF"));
    }
    Ok(())
}

/// Same amount (within 0.01), same calendar day, and one description
/// contains the other ignoring case.
pub fn is_likely_duplicate(existing: &Transaction, incoming: &ParsedTransaction) -> bool {
    if (existing.amount - incoming.amount).abs() > AMOUNT_TOLERANCE {
        return false;
    }
    let Some(incoming_date) = incoming.date else {
        return false;
    };
    if existing.day() != incoming_date.date() {
        return false;
    }
    let existing_desc = existing.description.to_lowercase();
    let incoming_desc = incoming.description.to_lowercase();
    let matched =
        existing_desc.contains(&incoming_desc) || incoming_desc.contains(&existing_desc);
    if !matched {
        tracing::debug!(
            existing = %existing_desc,
            incoming = %incoming_desc,
            amount = %incoming.amount,
            "amount and day match but descriptions differ"
        );
    }
    matched
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportCandidate {
    #[serde(flatten)]
    pub transaction: ParsedTransaction,
    pub is_duplicate: bool,
}

/// Annotates every incoming row; order and length are preserved.
pub fn flag_duplicates(
    incoming: Vec<ParsedTransaction>,
    existing: &[Transaction],
) -> Vec<ImportCandidate> {
    incoming
        .into_iter()
        .map(|transaction| {
            let is_duplicate = existing
                .iter()
                .any(|e| is_likely_duplicate(e, &transaction));
            if is_duplicate {
                tracing::info!(
                    description = %transaction.description,
                    amount = %transaction.amount,
                    "duplicate found"
                );
            }
            ImportCandidate {
                transaction,
                is_duplicate,
            }
        })
        .collect()
}

/// The request body for one new row. Imported rows start uncategorized.
pub fn to_transaction(parsed: &ParsedTransaction, now: NaiveDateTime) -> Transaction {
    let date = parsed.date.unwrap_or_else(|| {
        tracing::warn!(
            description = %parsed.description,
            fallback = %now,
            "statement row has no date, using current time"
        );
        now
    });
    Transaction {
        id: None,
        description: parsed.description.clone(),
        amount: parsed.amount,
        kind: parsed.kind.clone().unwrap_or(TransactionType::Expense),
        category: Some(UNCATEGORIZED.to_string()),
        date,
        payment_method: Some(
            parsed
                .payment_method
                .clone()
                .filter(|p| !p.is_empty())
                .unwrap_or_else(|| DEFAULT_PAYMENT_METHOD.to_string()),
        ),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImportFailure {
    /// 1-based position among the rows that were attempted.
    pub position: usize,
    pub description: String,
    pub error: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ImportSummary {
    pub saved: usize,
    pub attempted: usize,
    pub duplicates_skipped: usize,
    pub failures: Vec<ImportFailure>,
}

impl ImportSummary {
    pub fn is_complete(&self) -> bool {
        self.saved == self.attempted
    }

    pub fn message(&self) -> String {
        let mut msg = if self.attempted == 0 {
            "All transactions are duplicates. No new transactions to save.".to_string()
        } else if self.is_complete() {
            format!("Successfully saved all {} transactions!", self.saved)
        } else {
            format!(
                "Saved {} of {} transactions. Run with RUST_LOG=warn for details.",
                self.saved, self.attempted
            )
        };
        if self.attempted > 0 && self.duplicates_skipped > 0 {
            msg.push_str(&format!(" ({} duplicates skipped)", self.duplicates_skipped));
        }
        msg
    }
}

/// Creates every non-duplicate row, strictly one after another. A failed row
/// is logged and counted; the loop always runs to the end of the batch.
pub fn save_new(
    store: &dyn TransactionStore,
    candidates: &[ImportCandidate],
    now: NaiveDateTime,
) -> ImportSummary {
    let to_save: Vec<&ParsedTransaction> = candidates
        .iter()
        .filter(|c| !c.is_duplicate)
        .map(|c| &c.transaction)
        .collect();
    let mut summary = ImportSummary {
        attempted: to_save.len(),
        duplicates_skipped: candidates.len() - to_save.len(),
        ..ImportSummary::default()
    };
    tracing::info!(
        new = summary.attempted,
        duplicates = summary.duplicates_skipped,
        "starting import save"
    );
    for (i, parsed) in to_save.into_iter().enumerate() {
        let body = to_transaction(parsed, now);
        match store.create_transaction(&body) {
            Ok(_) => summary.saved += 1,
            Err(err) => {
                tracing::warn!(
                    position = i + 1,
                    description = %body.description,
                    %err,
                    "failed to save transaction"
                );
                summary.failures.push(ImportFailure {
                    position: i + 1,
                    description: body.description,
                    error: err.to_string(),
                });
            }
        }
    }
    summary
}

/// Existing transactions to check against. An API-level refusal reads as
/// "nothing stored yet"; transport failures still propagate.
pub fn load_existing(store: &dyn TransactionStore) -> Result<Vec<Transaction>> {
    match store.list_transactions() {
        Ok(list) => Ok(list),
        Err(Error::Api(message)) => {
            tracing::warn!(%message, "could not list stored transactions, assuming none");
            Ok(Vec::new())
        }
        Err(err) => Err(err),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PreparedImport {
    pub total_transactions: usize,
    pub errors: Vec<String>,
    pub message: Option<String>,
    pub candidates: Vec<ImportCandidate>,
}

impl PreparedImport {
    pub fn duplicate_count(&self) -> usize {
        self.candidates.iter().filter(|c| c.is_duplicate).count()
    }

    pub fn new_count(&self) -> usize {
        self.candidates.len() - self.duplicate_count()
    }
}

/// Validate, parse and flag. Nothing is written.
pub fn prepare_import(
    parser: &dyn StatementParser,
    store: &dyn TransactionStore,
    path: &Path,
) -> Result<PreparedImport> {
    validate_statement_file(path)?;
    let statement = parser.parse_statement(path)?;
    let existing = load_existing(store)?;
    tracing::info!(
        parsed = statement.transactions.len(),
        existing = existing.len(),
        "checking statement for duplicates"
    );
    Ok(PreparedImport {
        total_transactions: statement.total_transactions,
        errors: statement.errors,
        message: statement.message,
        candidates: flag_duplicates(statement.transactions, &existing),
    })
}
