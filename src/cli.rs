// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, crate_version, value_parser};

fn json_flags(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .help("Print as pretty JSON"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .conflicts_with("json")
            .help("Print one JSON object per line"),
    )
}

pub fn build_cli() -> Command {
    Command::new("txsummary")
        .version(crate_version!())
        .about("Monthly transaction summaries per customer")
        .arg(
            Arg::new("db")
                .long("db")
                .global(true)
                .help("Database file (default: $TXSUMMARY_DB or the platform data dir)"),
        )
        .arg(
            Arg::new("no_cache")
                .long("no-cache")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Bypass the in-process read cache"),
        )
        .arg(
            Arg::new("cache_ttl")
                .long("cache-ttl")
                .global(true)
                .value_parser(value_parser!(u64))
                .help("Evict cached entries after this many seconds"),
        )
        .subcommand(Command::new("init").about("Create or verify the database"))
        .subcommand(
            Command::new("import")
                .about("Bulk-load data")
                .subcommand(
                    Command::new("transactions")
                        .about("Load customerId,date,amount,description lines")
                        .arg(Arg::new("path").long("path").required(true)),
                ),
        )
        .subcommand(json_flags(
            Command::new("summary")
                .about("Balance, classification and monthly transactions of a customer")
                .arg(Arg::new("customer").required(true).allow_hyphen_values(true))
                .arg(Arg::new("month").required(true).allow_hyphen_values(true)),
        ))
        .subcommand(
            Command::new("tx")
                .about("Record and inspect transactions")
                .subcommand(
                    Command::new("add")
                        .arg(Arg::new("customer").long("customer").required(true))
                        .arg(Arg::new("date").long("date").required(true))
                        .arg(
                            Arg::new("amount")
                                .long("amount")
                                .required(true)
                                .allow_hyphen_values(true),
                        )
                        .arg(Arg::new("description").long("description").required(true)),
                )
                .subcommand(json_flags(
                    Command::new("show").arg(Arg::new("id").required(true)),
                ))
                .subcommand(json_flags(
                    Command::new("list")
                        .arg(Arg::new("customer").long("customer"))
                        .arg(
                            Arg::new("from")
                                .long("from")
                                .requires("customer")
                                .requires("to"),
                        )
                        .arg(Arg::new("to").long("to").requires("from")),
                )),
        )
}
