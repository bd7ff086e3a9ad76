// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::error::{SummaryError, SummaryResult};
use crate::models::{COUNTERS_COLLECTION, TRANSACTIONS_COLLECTION};
use rusqlite::{Connection, params};
use std::path::Path;
use std::time::Duration;

const BUSY_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone, Copy)]
pub struct IndexDef {
    pub name: &'static str,
    pub columns: &'static [&'static str],
    pub unique: bool,
}

/// Declared shape of one collection: its table DDL plus the indexes that
/// queries and upserts rely on.
#[derive(Debug, Clone, Copy)]
pub struct CollectionSchema {
    pub name: &'static str,
    pub table: &'static str,
    pub indexes: &'static [IndexDef],
}

pub const TRANSACTIONS_SCHEMA: CollectionSchema = CollectionSchema {
    name: TRANSACTIONS_COLLECTION,
    table: r#"
    CREATE TABLE IF NOT EXISTS transactions(
        id TEXT NOT NULL,
        customer TEXT NOT NULL,
        date TEXT NOT NULL,
        amount TEXT NOT NULL,
        description TEXT NOT NULL
    );
    "#,
    indexes: &[
        IndexDef {
            name: "transaction_id_idx",
            columns: &["id"],
            unique: true,
        },
        IndexDef {
            name: "transaction_customer_idx",
            columns: &["customer"],
            unique: false,
        },
        IndexDef {
            name: "transaction_date_idx",
            columns: &["date"],
            unique: false,
        },
        IndexDef {
            name: "transaction_customer_date_idx",
            columns: &["customer", "date"],
            unique: false,
        },
    ],
};

pub const COUNTERS_SCHEMA: CollectionSchema = CollectionSchema {
    name: COUNTERS_COLLECTION,
    table: r#"
    CREATE TABLE IF NOT EXISTS counters(
        collection_name TEXT NOT NULL,
        seq INTEGER NOT NULL DEFAULT 0
    );
    "#,
    indexes: &[IndexDef {
        name: "counter_collection_name_idx",
        columns: &["collection_name"],
        unique: true,
    }],
};

pub const SCHEMAS: &[CollectionSchema] = &[TRANSACTIONS_SCHEMA, COUNTERS_SCHEMA];

pub fn open_at(path: &Path) -> SummaryResult<Connection> {
    let conn = Connection::open(path)?;
    conn.busy_timeout(BUSY_TIMEOUT)?;
    init_schema(&conn)?;
    log::debug!("opened store at {}", path.display());
    Ok(conn)
}

pub fn open_in_memory() -> SummaryResult<Connection> {
    let conn = Connection::open_in_memory()?;
    init_schema(&conn)?;
    Ok(conn)
}

pub fn init_schema(conn: &Connection) -> SummaryResult<()> {
    for schema in SCHEMAS {
        conn.execute_batch(schema.table)?;
        for idx in schema.indexes {
            let unique = if idx.unique { "UNIQUE " } else { "" };
            conn.execute_batch(&format!(
                "CREATE {}INDEX IF NOT EXISTS {} ON {}({});",
                unique,
                idx.name,
                schema.name,
                idx.columns.join(", ")
            ))?;
        }
    }
    verify_schema(conn)
}

/// Check that every declared index exists with the declared key columns and
/// uniqueness. Catches databases created by an older or foreign layout.
pub fn verify_schema(conn: &Connection) -> SummaryResult<()> {
    for schema in SCHEMAS {
        let mut stmt =
            conn.prepare("SELECT name, \"unique\" FROM pragma_index_list(?1)")?;
        let found = stmt
            .query_map(params![schema.name], |r| {
                Ok((r.get::<_, String>(0)?, r.get::<_, i64>(1)? != 0))
            })?
            .collect::<Result<Vec<_>, _>>()?;

        for idx in schema.indexes {
            let Some((_, unique)) = found.iter().find(|(name, _)| name == idx.name) else {
                return Err(SummaryError::Schema(format!(
                    "{}: missing index {}",
                    schema.name, idx.name
                )));
            };
            if *unique != idx.unique {
                return Err(SummaryError::Schema(format!(
                    "{}: index {} unique={} (expected {})",
                    schema.name, idx.name, unique, idx.unique
                )));
            }
            let mut cols_stmt =
                conn.prepare("SELECT name FROM pragma_index_info(?1) ORDER BY seqno")?;
            let cols = cols_stmt
                .query_map(params![idx.name], |r| r.get::<_, String>(0))?
                .collect::<Result<Vec<_>, _>>()?;
            if cols != idx.columns {
                return Err(SummaryError::Schema(format!(
                    "{}: index {} covers ({}), expected ({})",
                    schema.name,
                    idx.name,
                    cols.join(", "),
                    idx.columns.join(", ")
                )));
            }
        }
    }
    Ok(())
}
