// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::TransactionStore;
use crate::error::{SummaryError, SummaryResult};
use crate::models::{TRANSACTIONS_COLLECTION, Transaction};
use crate::sequence::SequenceCounter;
use chrono::NaiveDateTime;
use rusqlite::types::Type;
use rusqlite::{Connection, ErrorCode, OptionalExtension, Row, params};
use rust_decimal::Decimal;
use std::sync::{Mutex, MutexGuard};

const SELECT_COLUMNS: &str = "SELECT id, customer, date, amount, description FROM transactions";

pub struct SqliteTransactionStore {
    conn: Mutex<Connection>,
    counter: Box<dyn SequenceCounter>,
}

impl SqliteTransactionStore {
    pub fn new(conn: Connection, counter: Box<dyn SequenceCounter>) -> Self {
        Self {
            conn: Mutex::new(conn),
            counter,
        }
    }

    fn conn(&self) -> SummaryResult<MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|_| SummaryError::Poisoned)
    }

    fn query(&self, sql: &str, params: &[&dyn rusqlite::ToSql]) -> SummaryResult<Vec<Transaction>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(sql)?;
        let rows = stmt
            .query_map(params, row_to_transaction)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }
}

fn row_to_transaction(r: &Row<'_>) -> rusqlite::Result<Transaction> {
    let amount_raw: String = r.get(3)?;
    let amount = amount_raw
        .parse::<Decimal>()
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(3, Type::Text, Box::new(e)))?;
    Ok(Transaction {
        id: Some(r.get(0)?),
        customer: r.get(1)?,
        date: r.get(2)?,
        amount,
        description: r.get(4)?,
    })
}

impl TransactionStore for SqliteTransactionStore {
    fn save_or_update(&self, transactions: Vec<Transaction>) -> SummaryResult<Vec<Transaction>> {
        for tx in &transactions {
            tx.validate()?;
        }

        // Ids come from a separate counter connection, so they are allocated
        // before the write transaction below takes the database lock.
        let mut persisted = Vec::with_capacity(transactions.len());
        for mut tx in transactions {
            let fresh = tx.id.is_none();
            if fresh {
                let seq = self.counter.next_sequence(TRANSACTIONS_COLLECTION)?;
                tx.id = Some(seq.to_string());
            }
            persisted.push((fresh, tx));
        }

        let mut conn = self.conn()?;
        let db_tx = conn.transaction()?;
        {
            let mut insert = db_tx.prepare(
                "INSERT INTO transactions(id, customer, date, amount, description)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
            )?;
            let mut upsert = db_tx.prepare(
                "INSERT INTO transactions(id, customer, date, amount, description)
                 VALUES (?1, ?2, ?3, ?4, ?5)
                 ON CONFLICT(id) DO UPDATE SET
                    customer=excluded.customer,
                    date=excluded.date,
                    amount=excluded.amount,
                    description=excluded.description",
            )?;
            for (fresh, tx) in &persisted {
                let stmt = if *fresh { &mut insert } else { &mut upsert };
                stmt.execute(params![
                    tx.id,
                    tx.customer,
                    tx.date,
                    tx.amount.to_string(),
                    tx.description
                ])
                .map_err(|e| match e.sqlite_error_code() {
                    // A newly issued id that a caller already used explicitly.
                    Some(ErrorCode::ConstraintViolation) if *fresh => {
                        SummaryError::DuplicateId(tx.id.clone().unwrap_or_default())
                    }
                    _ => SummaryError::from(e),
                })?;
            }
        }
        db_tx.commit()?;
        log::debug!("saved {} transaction(s)", persisted.len());
        Ok(persisted.into_iter().map(|(_, tx)| tx).collect())
    }

    fn find_by_id(&self, id: &str) -> SummaryResult<Option<Transaction>> {
        let conn = self.conn()?;
        let tx = conn
            .query_row(
                &format!("{} WHERE id=?1", SELECT_COLUMNS),
                params![id],
                row_to_transaction,
            )
            .optional()?;
        Ok(tx)
    }

    fn find_all(&self) -> SummaryResult<Vec<Transaction>> {
        self.query(&format!("{} ORDER BY rowid", SELECT_COLUMNS), &[])
    }

    fn find_by_customer_id(&self, customer_id: &str) -> SummaryResult<Vec<Transaction>> {
        self.query(
            &format!("{} WHERE customer=?1 ORDER BY rowid", SELECT_COLUMNS),
            &[&customer_id],
        )
    }

    fn find_by_customer_id_and_date(
        &self,
        customer_id: &str,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> SummaryResult<Vec<Transaction>> {
        self.query(
            &format!(
                "{} WHERE customer=?1 AND date>=?2 AND date<?3 ORDER BY rowid",
                SELECT_COLUMNS
            ),
            &[&customer_id, &start, &end],
        )
    }
}
