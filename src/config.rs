// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::db::{delete_setting, get_setting, set_setting};
use anyhow::Result;
use rusqlite::Connection;
use std::env;

pub const DEFAULT_API_URL: &str = "http://localhost:8080/api";
pub const ENV_API_URL: &str = "SPENDWISE_API_URL";
pub const ENV_TOKEN: &str = "SPENDWISE_TOKEN";

const KEY_API_URL: &str = "api_base_url";
const KEY_TOKEN: &str = "token";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub api_base_url: String,
    /// Bearer token sent with every store call.
    pub token: Option<String>,
}

fn non_empty(v: Option<String>) -> Option<String> {
    v.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}

impl Config {
    /// Environment first, then the settings table, then the default URL.
    pub fn resolve(
        env_url: Option<String>,
        env_token: Option<String>,
        stored_url: Option<String>,
        stored_token: Option<String>,
    ) -> Self {
        Config {
            api_base_url: non_empty(env_url)
                .or_else(|| non_empty(stored_url))
                .unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            token: non_empty(env_token).or_else(|| non_empty(stored_token)),
        }
    }

    pub fn load(conn: &Connection) -> Result<Self> {
        Ok(Config::resolve(
            env::var(ENV_API_URL).ok(),
            env::var(ENV_TOKEN).ok(),
            get_setting(conn, KEY_API_URL)?,
            get_setting(conn, KEY_TOKEN)?,
        ))
    }
}

pub fn save_session(conn: &Connection, token: &str, api_url: Option<&str>) -> Result<()> {
    set_setting(conn, KEY_TOKEN, token.trim())?;
    if let Some(url) = api_url.map(str::trim).filter(|u| !u.is_empty()) {
        set_setting(conn, KEY_API_URL, url)?;
    }
    Ok(())
}

/// Forgets the stored token. Called on logout and whenever the API answers 401.
pub fn end_session(conn: &Connection) -> Result<()> {
    delete_setting(conn, KEY_TOKEN)?;
    tracing::info!("session ended, stored token removed");
    Ok(())
}
