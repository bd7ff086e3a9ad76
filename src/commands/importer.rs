// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::config::{DateFormat, SummaryConfig};
use crate::models::Transaction;
use crate::store::TransactionStore;
use crate::utils::{parse_datetime, parse_decimal, required, validate_customer_id};
use anyhow::{Context, Result};
use csv::{ReaderBuilder, StringRecord};
use std::fs::File;
use std::io::Read;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportReport {
    pub imported: usize,
    pub skipped: usize,
}

pub fn handle(store: &dyn TransactionStore, cfg: &SummaryConfig, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("transactions", sub)) => {
            import_transactions(store, cfg, sub)?;
            Ok(())
        }
        _ => Ok(()),
    }
}

pub fn import_transactions(
    store: &dyn TransactionStore,
    cfg: &SummaryConfig,
    sub: &clap::ArgMatches,
) -> Result<ImportReport> {
    let path = required(sub, "path")?.trim();
    let file = File::open(path).with_context(|| format!("Open {}", path))?;
    let (transactions, skipped) = read_transactions(file, &cfg.date_format);

    let saved = store.save_or_update(transactions)?;
    let report = ImportReport {
        imported: saved.len(),
        skipped,
    };
    if skipped > 0 {
        log::warn!("skipped {} malformed line(s) in {}", skipped, path);
    }
    println!(
        "Imported {} transaction(s) from {} ({} skipped)",
        report.imported, path, report.skipped
    );
    Ok(report)
}

/// Parse `customerId,date,amount,description` lines. Quotes carry no meaning,
/// so every comma separates a field. Lines that do not have exactly four
/// fields, carry a non-integer customer, or hold an unreadable date or amount
/// are dropped and counted.
pub fn read_transactions<R: Read>(reader: R, fmt: &DateFormat) -> (Vec<Transaction>, usize) {
    let mut rdr = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .from_reader(reader);

    let mut out = Vec::new();
    let mut skipped = 0;
    for (n, result) in rdr.records().enumerate() {
        match result.map_err(anyhow::Error::from).and_then(|rec| parse_record(&rec, fmt)) {
            Ok(tx) => out.push(tx),
            Err(err) => {
                log::debug!("record {}: {:#}", n + 1, err);
                skipped += 1;
            }
        }
    }
    (out, skipped)
}

fn parse_record(rec: &StringRecord, fmt: &DateFormat) -> Result<Transaction> {
    anyhow::ensure!(rec.len() == 4, "expected 4 fields, found {}", rec.len());
    let customer = validate_customer_id(&rec[0])?;
    let date = parse_datetime(&rec[1], fmt)?;
    let amount = parse_decimal(&rec[2])?;
    Ok(Transaction::new(customer, date, amount, &rec[3])?)
}
