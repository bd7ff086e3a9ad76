// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::config::SummaryConfig;
use crate::models::{Transaction, TransactionView};
use crate::store::TransactionStore;
use crate::utils::{maybe_print_json, parse_datetime, parse_decimal, pretty_table, required};
use anyhow::{Result, anyhow};

pub fn handle(store: &dyn TransactionStore, cfg: &SummaryConfig, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(store, cfg, sub)?,
        Some(("show", sub)) => show(store, cfg, sub)?,
        Some(("list", sub)) => list(store, cfg, sub)?,
        _ => {}
    }
    Ok(())
}

fn add(store: &dyn TransactionStore, cfg: &SummaryConfig, sub: &clap::ArgMatches) -> Result<()> {
    let customer = required(sub, "customer")?.trim();
    let date = parse_datetime(required(sub, "date")?, &cfg.date_format)?;
    let amount = parse_decimal(required(sub, "amount")?)?;
    let description = required(sub, "description")?;

    let tx = Transaction::new(customer, date, amount, description.as_str())?;
    let saved = store.save_or_update(vec![tx])?;
    let id = saved
        .first()
        .and_then(|t| t.id.clone())
        .ok_or_else(|| anyhow!("Store returned no id for the new transaction"))?;
    println!(
        "Recorded {} on {} for customer {} (id: {})",
        amount,
        cfg.date_format.format(&date),
        customer,
        id
    );
    Ok(())
}

fn show(store: &dyn TransactionStore, cfg: &SummaryConfig, sub: &clap::ArgMatches) -> Result<()> {
    let id = required(sub, "id")?.trim();
    let tx = store
        .find_by_id(id)?
        .ok_or_else(|| anyhow!("Transaction '{}' not found", id))?;
    print_views(vec![TransactionView::from_transaction(&tx, &cfg.date_format)], sub)
}

fn list(store: &dyn TransactionStore, cfg: &SummaryConfig, sub: &clap::ArgMatches) -> Result<()> {
    let data = query_rows(store, cfg, sub)?;
    print_views(data, sub)
}

/// `--customer` with `--from/--to` runs the range query, `--customer` alone the
/// customer query, and no filter the (cached) full scan.
pub fn query_rows(
    store: &dyn TransactionStore,
    cfg: &SummaryConfig,
    sub: &clap::ArgMatches,
) -> Result<Vec<TransactionView>> {
    let customer = sub.get_one::<String>("customer").map(|s| s.trim());
    let range = match (sub.get_one::<String>("from"), sub.get_one::<String>("to")) {
        (Some(from), Some(to)) => Some((
            parse_datetime(from, &cfg.date_format)?,
            parse_datetime(to, &cfg.date_format)?,
        )),
        _ => None,
    };
    let rows = match (customer, range) {
        (Some(c), Some((start, end))) => store.find_by_customer_id_and_date(c, start, end)?,
        (Some(c), None) => store.find_by_customer_id(c)?,
        (None, _) => store.find_all()?,
    };
    Ok(rows
        .iter()
        .map(|t| TransactionView::from_transaction(t, &cfg.date_format))
        .collect())
}

fn print_views(data: Vec<TransactionView>, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .into_iter()
            .map(|t| vec![t.id, t.customer, t.date, t.amount.to_string(), t.description])
            .collect();
        println!(
            "{}",
            pretty_table(&["ID", "Customer", "Date", "Amount", "Description"], rows)
        );
    }
    Ok(())
}
