// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::error::{SummaryError, SummaryResult};
use crate::models::Counter;
use rusqlite::{Connection, OptionalExtension, params};
use std::sync::Mutex;

/// Hands out unique, strictly increasing identifiers per named collection.
pub trait SequenceCounter: Send + Sync {
    fn next_sequence(&self, collection_name: &str) -> SummaryResult<i64>;
}

/// Counter kept in the `counters` collection. Creation and increment are one
/// upsert statement, so concurrent callers on any number of connections are
/// serialised by the database write lock and never observe the same value.
pub struct SqliteSequenceCounter {
    conn: Mutex<Connection>,
}

impl SqliteSequenceCounter {
    pub fn new(conn: Connection) -> Self {
        Self {
            conn: Mutex::new(conn),
        }
    }

    pub fn current(&self, collection_name: &str) -> SummaryResult<Option<Counter>> {
        let conn = self.conn.lock().map_err(|_| SummaryError::Poisoned)?;
        let counter = conn
            .query_row(
                "SELECT collection_name, seq FROM counters WHERE collection_name=?1",
                params![collection_name],
                |r| {
                    Ok(Counter {
                        collection_name: r.get(0)?,
                        sequence: r.get(1)?,
                    })
                },
            )
            .optional()?;
        Ok(counter)
    }
}

impl SequenceCounter for SqliteSequenceCounter {
    fn next_sequence(&self, collection_name: &str) -> SummaryResult<i64> {
        if collection_name.trim().is_empty() {
            return Err(SummaryError::invalid_parameter(
                "collectionName",
                collection_name,
            ));
        }
        let conn = self.conn.lock().map_err(|_| SummaryError::Poisoned)?;
        let seq: Option<i64> = conn
            .query_row(
                "INSERT INTO counters(collection_name, seq) VALUES (?1, 1)
                 ON CONFLICT(collection_name) DO UPDATE SET seq = seq + 1
                 RETURNING seq",
                params![collection_name],
                |r| r.get(0),
            )
            .optional()?;
        let seq = seq.ok_or_else(|| SummaryError::Counter(collection_name.to_string()))?;
        log::trace!("{} sequence advanced to {}", collection_name, seq);
        Ok(seq)
    }
}
