// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, crate_version, value_parser};

fn json_args() -> [Arg; 2] {
    [
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .help("Print JSON instead of a table"),
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .conflicts_with("json")
            .help("Print one JSON object per line"),
    ]
}

fn range_args() -> [Arg; 3] {
    [
        Arg::new("range").long("range").help(
            "this-month | last-month | last-30-days | last-90-days | this-year | all-time",
        ),
        Arg::new("from")
            .long("from")
            .help("Start date YYYY-MM-DD (inclusive)"),
        Arg::new("to").long("to").help("End date YYYY-MM-DD (inclusive)"),
    ]
}

pub fn build_cli() -> Command {
    Command::new("spendwise")
        .version(crate_version!())
        .about("Personal finance dashboards, budgets, and statement imports")
        .subcommand_required(false)
        .subcommand(
            Command::new("login")
                .about("Store the API session token")
                .arg(Arg::new("token").long("token").required(true))
                .arg(Arg::new("url").long("url").help("API base URL, e.g. https://host/api")),
        )
        .subcommand(Command::new("logout").about("Forget the stored session token"))
        .subcommand(
            Command::new("dashboard")
                .about("KPIs, insights, category breakdown and budgets")
                .args(range_args())
                .args(json_args()),
        )
        .subcommand(
            Command::new("tx")
                .about("Transactions")
                .subcommand(
                    Command::new("list")
                        .args(range_args())
                        .arg(Arg::new("search").long("search").help("Match description or category"))
                        .arg(Arg::new("type").long("type").help("income | expense"))
                        .arg(Arg::new("category").long("category"))
                        .arg(
                            Arg::new("limit")
                                .long("limit")
                                .value_parser(value_parser!(usize)),
                        )
                        .args(json_args()),
                )
                .subcommand(
                    Command::new("add")
                        .arg(Arg::new("date").long("date").required(true))
                        .arg(Arg::new("amount").long("amount").required(true))
                        .arg(Arg::new("type").long("type").required(true))
                        .arg(Arg::new("category").long("category"))
                        .arg(Arg::new("description").long("description"))
                        .arg(Arg::new("payment_method").long("payment-method")),
                )
                .subcommand(
                    Command::new("edit")
                        .arg(
                            Arg::new("id")
                                .required(true)
                                .value_parser(value_parser!(i64)),
                        )
                        .arg(Arg::new("date").long("date"))
                        .arg(Arg::new("amount").long("amount"))
                        .arg(Arg::new("type").long("type"))
                        .arg(Arg::new("category").long("category"))
                        .arg(Arg::new("description").long("description"))
                        .arg(Arg::new("payment_method").long("payment-method")),
                )
                .subcommand(
                    Command::new("rm").arg(
                        Arg::new("id")
                            .required(true)
                            .value_parser(value_parser!(i64)),
                    ),
                )
                .subcommand(
                    Command::new("clear").about("Delete every transaction").arg(
                        Arg::new("yes")
                            .long("yes")
                            .action(ArgAction::SetTrue)
                            .help("Confirm deleting all transactions"),
                    ),
                ),
        )
        .subcommand(
            Command::new("category")
                .about("Categories")
                .subcommand(
                    Command::new("list")
                        .arg(Arg::new("type").long("type").help("income | expense"))
                        .args(json_args()),
                )
                .subcommand(
                    Command::new("add")
                        .arg(Arg::new("name").long("name").required(true))
                        .arg(Arg::new("type").long("type").required(true))
                        .arg(Arg::new("description").long("description"))
                        .arg(Arg::new("color").long("color"))
                        .arg(Arg::new("icon").long("icon"))
                        .arg(
                            Arg::new("budget")
                                .long("budget")
                                .help("Monthly budget; 0 or empty clears it"),
                        ),
                )
                .subcommand(
                    Command::new("edit")
                        .arg(Arg::new("category").required(true))
                        .arg(Arg::new("name").long("name"))
                        .arg(Arg::new("type").long("type"))
                        .arg(Arg::new("description").long("description"))
                        .arg(Arg::new("color").long("color"))
                        .arg(Arg::new("icon").long("icon"))
                        .arg(
                            Arg::new("budget")
                                .long("budget")
                                .help("Monthly budget; 0 or empty clears it"),
                        ),
                )
                .subcommand(Command::new("rm").arg(Arg::new("category").required(true)))
                .subcommand(
                    Command::new("show")
                        .about("Transactions and month-over-month trend of one category")
                        .arg(Arg::new("category").required(true))
                        .args(range_args()),
                ),
        )
        .subcommand(
            Command::new("budget")
                .about("Monthly category budgets")
                .subcommand(
                    Command::new("set")
                        .arg(Arg::new("category").long("category").required(true))
                        .arg(Arg::new("amount").long("amount").required(true)),
                )
                .subcommand(Command::new("list").args(json_args()))
                .subcommand(
                    Command::new("rm").arg(Arg::new("category").long("category").required(true)),
                )
                .subcommand(Command::new("status").args(range_args()).args(json_args())),
        )
        .subcommand(
            Command::new("import")
                .about("Upload a PDF statement and save the new transactions")
                .arg(Arg::new("path").long("path").required(true))
                .arg(
                    Arg::new("dry_run")
                        .long("dry-run")
                        .action(ArgAction::SetTrue)
                        .help("Show the duplicate check without saving"),
                )
                .args(json_args()),
        )
}
