// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use std::process::ExitCode;

use txsummary::classification::UnclassifiedService;
use txsummary::config::AppConfig;
use txsummary::error::{ErrorBody, SummaryError};
use txsummary::sequence::SqliteSequenceCounter;
use txsummary::store::{CachedTransactionStore, SqliteTransactionStore, TransactionStore};
use txsummary::summary::SummaryEngine;
use txsummary::{cli, commands, db};

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .target(env_logger::Target::Stderr)
        .init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => match err.downcast_ref::<SummaryError>() {
            Some(e) => {
                let body = vec![ErrorBody::from(e)];
                match serde_json::to_string(&body) {
                    Ok(json) => eprintln!("{}", json),
                    Err(_) => eprintln!("{}", e),
                }
                ExitCode::from(e.status().exit_code())
            }
            None => {
                eprintln!("Error: {:#}", err);
                ExitCode::FAILURE
            }
        },
    }
}

fn run() -> Result<()> {
    let matches = cli::build_cli().get_matches();
    let cfg = AppConfig::from_matches(&matches)?;

    let counter = SqliteSequenceCounter::new(db::open_at(&cfg.db_path)?);
    let backing = SqliteTransactionStore::new(db::open_at(&cfg.db_path)?, Box::new(counter));
    let store: Box<dyn TransactionStore> = if cfg.cache.enabled {
        Box::new(CachedTransactionStore::new(backing, cfg.cache.ttl))
    } else {
        Box::new(backing)
    };
    let classifier = UnclassifiedService;

    match matches.subcommand() {
        Some(("init", _)) => {
            println!("Database initialized at {}", cfg.db_path.display());
        }
        Some(("import", sub)) => commands::importer::handle(store.as_ref(), &cfg.summary, sub)?,
        Some(("summary", sub)) => {
            let engine = SummaryEngine::new(store.as_ref(), &classifier, &cfg.summary);
            commands::summary::handle(&engine, sub)?
        }
        Some(("tx", sub)) => commands::transactions::handle(store.as_ref(), &cfg.summary, sub)?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}
