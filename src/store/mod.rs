// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod cached;
pub mod sqlite;

pub use cached::{CacheStats, CachedTransactionStore, ALL_TRANSACTIONS_KEY};
pub use sqlite::SqliteTransactionStore;

use crate::error::SummaryResult;
use crate::models::Transaction;
use chrono::NaiveDateTime;

/// Persistence boundary for transactions.
pub trait TransactionStore: Send + Sync {
    /// Assign ids to records that lack one, then insert or replace each record
    /// by id. Returns the records as persisted.
    fn save_or_update(&self, transactions: Vec<Transaction>) -> SummaryResult<Vec<Transaction>>;

    fn find_by_id(&self, id: &str) -> SummaryResult<Option<Transaction>>;

    fn find_all(&self) -> SummaryResult<Vec<Transaction>>;

    /// All records of one customer, in insertion order.
    fn find_by_customer_id(&self, customer_id: &str) -> SummaryResult<Vec<Transaction>>;

    /// Records of one customer dated within `[start, end)`.
    fn find_by_customer_id_and_date(
        &self,
        customer_id: &str,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> SummaryResult<Vec<Transaction>>;
}
