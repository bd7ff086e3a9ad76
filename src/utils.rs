// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::config::DateFormat;
use crate::error::{SummaryError, SummaryResult};
use anyhow::{Context, Result, anyhow};
use chrono::{DateTime, Days, NaiveDate, NaiveDateTime, Timelike};
use comfy_table::{presets::UTF8_FULL, Cell, Table};
use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::Decimal;

static CUSTOMER_ID: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]+$").expect("valid regex"));

const ISO_PATTERNS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

pub fn required<'a>(sub: &'a clap::ArgMatches, name: &str) -> Result<&'a String> {
    sub.get_one::<String>(name)
        .with_context(|| format!("Missing required argument '{}'", name))
}

pub fn parse_decimal(s: &str) -> Result<Decimal> {
    s.trim()
        .parse::<Decimal>()
        .with_context(|| format!("Invalid decimal '{}'", s))
}

/// Parse a timestamp in the display pattern, falling back to ISO-8601.
///
/// Timestamps are wall-clock values, so ISO input carrying a UTC offset or `Z`
/// is rejected. Fractional seconds are truncated to match the display pattern.
pub fn parse_datetime(s: &str, fmt: &DateFormat) -> Result<NaiveDateTime> {
    let s = s.trim();
    if let Ok(d) = fmt.parse(s) {
        return Ok(d);
    }
    if DateTime::parse_from_rfc3339(s).is_ok() {
        return Err(anyhow!(
            "Invalid date '{}', UTC offsets are not supported",
            s
        ));
    }
    ISO_PATTERNS
        .iter()
        .find_map(|p| NaiveDateTime::parse_from_str(s, p).ok())
        .and_then(|d| d.with_nanosecond(0))
        .ok_or_else(|| {
            anyhow!(
                "Invalid date '{}', expected {} or ISO-8601",
                s,
                fmt.pattern()
            )
        })
}

/// Customer ids are non-negative integers; the original text is kept as the key.
pub fn validate_customer_id(customer_id: &str) -> SummaryResult<&str> {
    if CUSTOMER_ID.is_match(customer_id) && customer_id.parse::<u64>().is_ok() {
        Ok(customer_id)
    } else {
        Err(SummaryError::invalid_parameter("customerId", customer_id))
    }
}

pub fn validate_month(month: &str) -> SummaryResult<u32> {
    match month.parse::<u32>() {
        Ok(m) if (1..=12).contains(&m) && month.bytes().all(|b| b.is_ascii_digit()) => Ok(m),
        _ => Err(SummaryError::invalid_parameter("month", month)),
    }
}

pub fn month_end(year: i32, month: u32) -> SummaryResult<NaiveDate> {
    let last_day = match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 => {
            if NaiveDate::from_ymd_opt(year, 2, 29).is_some() {
                29
            } else {
                28
            }
        }
        _ => return Err(SummaryError::invalid_parameter("month", &month.to_string())),
    };
    NaiveDate::from_ymd_opt(year, month, last_day)
        .ok_or_else(|| SummaryError::invalid_parameter("month", &month.to_string()))
}

/// `(first instant of the month, midnight after its last day)`.
pub fn month_bounds(year: i32, month: u32) -> SummaryResult<(NaiveDateTime, NaiveDateTime)> {
    let invalid = || SummaryError::invalid_parameter("month", &month.to_string());
    let start = NaiveDate::from_ymd_opt(year, month, 1)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .ok_or_else(invalid)?;
    let end = month_end(year, month)?
        .checked_add_days(Days::new(1))
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .ok_or_else(invalid)?;
    Ok((start, end))
}

pub fn pretty_table(headers: &[&str], rows: Vec<Vec<String>>) -> Table {
    let mut t = Table::new();
    t.load_preset(UTF8_FULL);
    t.set_header(headers.iter().map(|h| Cell::new(*h)));
    for r in rows {
        t.add_row(r.into_iter().map(Cell::new));
    }
    t
}

pub fn maybe_print_json<T: serde::Serialize>(
    json_flag: bool,
    jsonl_flag: bool,
    v: &T,
) -> Result<bool> {
    if json_flag {
        println!("{}", serde_json::to_string_pretty(v)?);
        return Ok(true);
    }
    if jsonl_flag {
        // If v is an array, stream each element; else stream single line
        let val = serde_json::to_value(v)?;
        if let Some(arr) = val.as_array() {
            for item in arr {
                println!("{}", serde_json::to_string(item)?);
            }
        } else {
            println!("{}", serde_json::to_string(&val)?);
        }
        return Ok(true);
    }
    Ok(false)
}
