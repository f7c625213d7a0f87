// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use spendwise::budget::SqliteBudgets;
use spendwise::client::ApiClient;
use spendwise::config::{Config, end_session};
use spendwise::{Error, cli, commands, db, logging};

fn main() -> Result<()> {
    logging::init();
    let cli = cli::build_cli();
    let matches = cli.get_matches();

    let conn = db::open_or_init()?;

    let result = match matches.subcommand() {
        Some(("login", sub)) => commands::session::login(&conn, sub),
        Some(("logout", _)) => commands::session::logout(&conn),
        Some((name, sub)) => {
            let config = Config::load(&conn)?;
            if config.token.is_none() {
                tracing::warn!("no session token; run `spendwise login --token <token>`");
            }
            let api = ApiClient::new(&config)?;
            let mut budgets = SqliteBudgets::new(&conn);
            match name {
                "dashboard" => commands::dashboard::handle(&api, &budgets, sub),
                "tx" => commands::transactions::handle(&api, sub),
                "category" => commands::categories::handle(&api, &api, &mut budgets, sub),
                "budget" => commands::budgets::handle(&mut budgets, &api, sub),
                "import" => commands::importer::handle(&api, &api, sub),
                _ => Ok(()),
            }
        }
        None => {
            cli::build_cli().print_help()?;
            println!();
            Ok(())
        }
    };

    if let Err(err) = &result {
        if matches!(err.downcast_ref::<Error>(), Some(Error::Unauthorized)) {
            end_session(&conn)?;
            eprintln!("Session expired. Run `spendwise login --token <token>` to sign in again.");
        }
    }
    result
}
