// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use directories::ProjectDirs;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_REFERENCE_YEAR: i32 = 2016;
/// `d/MM/yyyy h:mm:ss a`, e.g. `1/10/2016 2:51:23 AM`.
pub const DISPLAY_DATE_PATTERN: &str = "%-d/%m/%Y %-I:%M:%S %p";
pub const DB_ENV: &str = "TXSUMMARY_DB";

const APP: (&str, &str, &str) = ("com.alphavelocity", "Txsummary", "txsummary");

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateFormat {
    pattern: String,
}

impl DateFormat {
    pub fn new(pattern: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
        }
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn format(&self, date: &NaiveDateTime) -> String {
        date.format(&self.pattern).to_string()
    }

    pub fn parse(&self, s: &str) -> Result<NaiveDateTime> {
        NaiveDateTime::parse_from_str(s.trim(), &self.pattern)
            .with_context(|| format!("Invalid date '{}', expected {}", s, self.pattern))
    }
}

impl Default for DateFormat {
    fn default() -> Self {
        Self::new(DISPLAY_DATE_PATTERN)
    }
}

/// Inputs to summary computation. Month boundaries are always taken from
/// `reference_year`; the same month of different years cannot be told apart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryConfig {
    pub reference_year: i32,
    pub date_format: DateFormat,
}

impl Default for SummaryConfig {
    fn default() -> Self {
        Self {
            reference_year: DEFAULT_REFERENCE_YEAR,
            date_format: DateFormat::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheConfig {
    pub enabled: bool,
    /// `None` keeps entries for the life of the process.
    pub ttl: Option<Duration>,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            ttl: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub db_path: PathBuf,
    pub summary: SummaryConfig,
    pub cache: CacheConfig,
}

impl AppConfig {
    /// Resolve configuration from global CLI flags, then `TXSUMMARY_DB`, then
    /// the platform data directory.
    pub fn from_matches(m: &clap::ArgMatches) -> Result<Self> {
        let db_path = match m.get_one::<String>("db") {
            Some(p) => PathBuf::from(p.trim()),
            None => match std::env::var(DB_ENV) {
                Ok(p) if !p.trim().is_empty() => PathBuf::from(p.trim()),
                _ => default_db_path()?,
            },
        };
        let cache = CacheConfig {
            enabled: !m.get_flag("no_cache"),
            ttl: m
                .get_one::<u64>("cache_ttl")
                .map(|secs| Duration::from_secs(*secs)),
        };
        Ok(Self {
            db_path,
            summary: SummaryConfig::default(),
            cache,
        })
    }
}

pub fn default_db_path() -> Result<PathBuf> {
    let proj = ProjectDirs::from(APP.0, APP.1, APP.2)
        .context("Could not determine platform-specific data dir")?;
    let data_dir = proj.data_dir();
    fs::create_dir_all(data_dir).context("Failed to create data dir")?;
    Ok(data_dir.join("txsummary.sqlite"))
}
