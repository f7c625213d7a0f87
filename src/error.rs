// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Library error type shared by the store clients, the budget tracker and the
//! import flow. The CLI wraps these in `anyhow` with extra context.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// The selected statement file was rejected before any upload happened.
    #[error("Invalid statement file '{path}': {reason}")]
    InvalidFile { path: String, reason: String },

    /// A date range whose start is after its end.
    #[error("Invalid date range: {start} is after {end}")]
    InvalidRange { start: String, end: String },

    #[error("Invalid amount '{0}'")]
    InvalidAmount(String),

    /// A record that was never saved has no server id to address it by.
    #[error("{0} has no id; it has not been saved yet")]
    MissingId(String),

    /// The server answered 401. Callers end the session when they see this.
    #[error("Session expired or token rejected (401 Unauthorized)")]
    Unauthorized,

    /// Non-success HTTP status, with the best message extracted from the body.
    #[error("Request failed: {message} (Status: {status})")]
    Status { status: u16, message: String },

    /// The response envelope carried `success: false`.
    #[error("API error: {0}")]
    Api(String),

    #[error("Could not decode response: {0}")]
    Decode(String),

    #[error(transparent)]
    Http(#[from] reqwest::Error),

    #[error(transparent)]
    Sqlite(#[from] rusqlite::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
