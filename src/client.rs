// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! REST collaborators: the transaction store, the category store and the
//! statement parser, plus the one place where response envelopes are peeled.

use crate::config::Config;
use crate::error::{Error, Result};
use crate::models::{
    Category, CategoryPatch, ParsedStatement, Transaction, TransactionPatch,
};
use reqwest::StatusCode;
use reqwest::blocking::{Client, RequestBuilder, multipart};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::path::Path;

const UA: &str = concat!(
    "spendwise/",
    env!("CARGO_PKG_VERSION"),
    " (+https://github.com/alphavelocity/spendwise)"
);

pub trait TransactionStore {
    fn list_transactions(&self) -> Result<Vec<Transaction>>;
    fn create_transaction(&self, transaction: &Transaction) -> Result<Transaction>;
    fn update_transaction(&self, id: i64, patch: &TransactionPatch) -> Result<Transaction>;
    fn delete_transaction(&self, id: i64) -> Result<()>;
    fn delete_all_transactions(&self) -> Result<()>;
}

pub trait CategoryStore {
    fn list_categories(&self) -> Result<Vec<Category>>;
    fn create_category(&self, category: &Category) -> Result<Category>;
    fn update_category(&self, id: i64, patch: &CategoryPatch) -> Result<Category>;
    fn delete_category(&self, id: i64) -> Result<()>;
}

pub trait StatementParser {
    fn parse_statement(&self, path: &Path) -> Result<ParsedStatement>;
}

pub fn http_client() -> Result<Client> {
    let c = Client::builder()
        .timeout(std::time::Duration::from_secs(15))
        .user_agent(UA)
        .build()?;
    Ok(c)
}

/// Maps every response shape the API produces onto its payload.
///
/// Handles `{"data": {"data": [...]}}`, `{"data": [...]}`,
/// `{"success": true, "data": ..., "message": ...}` and bare values. An
/// envelope with `"success": false` becomes [`Error::Api`].
pub fn unwrap_envelope(value: Value) -> Result<Value> {
    let mut current = value;
    loop {
        match current {
            Value::Object(mut map) if map.contains_key("data") || map.contains_key("success") => {
                if map.get("success").and_then(Value::as_bool) == Some(false) {
                    let message = map
                        .get("message")
                        .and_then(Value::as_str)
                        .unwrap_or("request was not successful");
                    return Err(Error::Api(message.to_string()));
                }
                match map.remove("data") {
                    Some(inner) => current = inner,
                    None => return Ok(Value::Null),
                }
            }
            other => return Ok(other),
        }
    }
}

/// Best human-readable message for a failed response: the body's `message`
/// or `error` field, else the status reason.
pub fn error_message(body: &str, status: StatusCode) -> String {
    let from_body = serde_json::from_str::<Value>(body).ok().and_then(|v| {
        ["message", "error"]
            .iter()
            .find_map(|k| v.get(*k).and_then(Value::as_str).map(str::to_string))
    });
    from_body
        .filter(|m| !m.is_empty())
        .or_else(|| status.canonical_reason().map(str::to_string))
        .unwrap_or_else(|| status.to_string())
}

pub fn decode<T: DeserializeOwned>(value: Value) -> Result<T> {
    serde_json::from_value(value).map_err(|e| Error::Decode(e.to_string()))
}

pub fn decode_list<T: DeserializeOwned>(value: Value) -> Result<Vec<T>> {
    if value.is_null() {
        return Ok(Vec::new());
    }
    decode(value)
}

pub struct ApiClient {
    http: Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(config: &Config) -> Result<Self> {
        Ok(ApiClient {
            http: http_client()?,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            token: config.token.clone(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn authorized(&self, rb: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(t) => rb.bearer_auth(t),
            None => rb,
        }
    }

    /// Sends once, no retries. Returns the envelope-free payload.
    fn send(&self, rb: RequestBuilder) -> Result<Value> {
        let resp = self.authorized(rb).send()?;
        let status = resp.status();
        let url = resp.url().to_string();
        let body = resp.text()?;
        if status == StatusCode::UNAUTHORIZED {
            tracing::warn!(%url, "request rejected with 401, session must end");
            return Err(Error::Unauthorized);
        }
        if !status.is_success() {
            let message = error_message(&body, status);
            tracing::warn!(%url, status = status.as_u16(), %message, "request failed");
            return Err(Error::Status {
                status: status.as_u16(),
                message,
            });
        }
        tracing::debug!(%url, status = status.as_u16(), bytes = body.len(), "response received");
        if body.trim().is_empty() {
            return Ok(Value::Null);
        }
        let raw: Value = serde_json::from_str(&body).map_err(|e| Error::Decode(e.to_string()))?;
        unwrap_envelope(raw)
    }
}

impl TransactionStore for ApiClient {
    fn list_transactions(&self) -> Result<Vec<Transaction>> {
        decode_list(self.send(self.http.get(self.url("transactions")))?)
    }

    fn create_transaction(&self, transaction: &Transaction) -> Result<Transaction> {
        decode(self.send(self.http.post(self.url("transactions")).json(transaction))?)
    }

    fn update_transaction(&self, id: i64, patch: &TransactionPatch) -> Result<Transaction> {
        let url = self.url(&format!("transactions/{}", id));
        decode(self.send(self.http.put(url).json(patch))?)
    }

    fn delete_transaction(&self, id: i64) -> Result<()> {
        self.send(self.http.delete(self.url(&format!("transactions/{}", id))))?;
        Ok(())
    }

    fn delete_all_transactions(&self) -> Result<()> {
        self.send(self.http.delete(self.url("transactions")))?;
        Ok(())
    }
}

impl CategoryStore for ApiClient {
    fn list_categories(&self) -> Result<Vec<Category>> {
        decode_list(self.send(self.http.get(self.url("categories")))?)
    }

    fn create_category(&self, category: &Category) -> Result<Category> {
        decode(self.send(self.http.post(self.url("categories")).json(category))?)
    }

    fn update_category(&self, id: i64, patch: &CategoryPatch) -> Result<Category> {
        let url = self.url(&format!("categories/{}", id));
        decode(self.send(self.http.put(url).json(patch))?)
    }

    fn delete_category(&self, id: i64) -> Result<()> {
        self.send(self.http.delete(self.url(&format!("categories/{}", id))))?;
        Ok(())
    }
}

impl StatementParser for ApiClient {
    fn parse_statement(&self, path: &Path) -> Result<ParsedStatement> {
        let form = multipart::Form::new().file("file", path)?;
        let payload = self.send(self.http.post(self.url("pdf/upload")).multipart(form))?;
        decode(payload)
    }
}
