// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::summary::SummaryEngine;
use crate::utils::{maybe_print_json, pretty_table, required};
use anyhow::Result;

pub fn handle(engine: &SummaryEngine<'_>, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let customer = required(sub, "customer")?;
    let month = required(sub, "month")?;

    let summary = engine.compute_summary(customer, month)?;
    if maybe_print_json(json_flag, jsonl_flag, &summary)? {
        return Ok(());
    }

    let labels: Vec<String> = summary
        .classification
        .iter()
        .map(|l| l.to_string())
        .collect();
    println!(
        "{}",
        pretty_table(
            &["Customer", "Month", "Balance", "Classification"],
            vec![vec![
                summary.customer_id.clone(),
                summary.month.clone(),
                format!("{:.2}", summary.current_balance),
                labels.join(", "),
            ]],
        )
    );
    let rows: Vec<Vec<String>> = summary
        .transactions
        .iter()
        .map(|t| {
            vec![
                t.id.clone(),
                t.date.clone(),
                t.amount.to_string(),
                t.description.clone(),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(&["ID", "Date", "Amount", "Description"], rows)
    );
    Ok(())
}
