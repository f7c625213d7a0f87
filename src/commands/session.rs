// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::config::{Config, end_session, save_session};
use anyhow::{Result, anyhow};
use rusqlite::Connection;

pub fn login(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    let token = m.get_one::<String>("token").unwrap().trim();
    if token.is_empty() {
        return Err(anyhow!("Token must not be empty"));
    }
    save_session(conn, token, m.get_one::<String>("url").map(String::as_str))?;
    let config = Config::load(conn)?;
    println!("Logged in. API: {}", config.api_base_url);
    Ok(())
}

pub fn logout(conn: &Connection) -> Result<()> {
    end_session(conn)?;
    println!("Logged out.");
    Ok(())
}
