// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

#![allow(dead_code)]

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use txsummary::classification::ClassificationService;
use txsummary::config::DateFormat;
use txsummary::db;
use txsummary::models::{ClassificationLabel, Transaction};
use txsummary::sequence::SqliteSequenceCounter;
use txsummary::store::{SqliteTransactionStore, TransactionStore};
use txsummary::SummaryResult;

pub fn dt(s: &str) -> NaiveDateTime {
    DateFormat::default().parse(s).unwrap()
}

pub fn dec(s: &str) -> Decimal {
    s.parse().unwrap()
}

pub fn tx(customer: &str, date: &str, amount: &str, description: &str) -> Transaction {
    Transaction::new(customer, dt(date), dec(amount), description).unwrap()
}

pub fn sqlite_store() -> SqliteTransactionStore {
    let counter = SqliteSequenceCounter::new(db::open_in_memory().unwrap());
    SqliteTransactionStore::new(db::open_in_memory().unwrap(), Box::new(counter))
}

/// In-memory store that counts every call reaching it.
#[derive(Default)]
pub struct CountingStore {
    records: Mutex<Vec<Transaction>>,
    next_id: AtomicUsize,
    pub saves: AtomicUsize,
    pub by_id: AtomicUsize,
    pub all: AtomicUsize,
    pub by_customer: AtomicUsize,
    pub by_range: AtomicUsize,
}

impl CountingStore {
    pub fn with(records: Vec<Transaction>) -> Self {
        let store = Self::default();
        store.save_or_update(records).unwrap();
        store.saves.store(0, Ordering::SeqCst);
        store
    }

    pub fn count(counter: &AtomicUsize) -> usize {
        counter.load(Ordering::SeqCst)
    }
}

impl TransactionStore for CountingStore {
    fn save_or_update(&self, transactions: Vec<Transaction>) -> SummaryResult<Vec<Transaction>> {
        self.saves.fetch_add(1, Ordering::SeqCst);
        for t in &transactions {
            t.validate()?;
        }
        let mut records = self.records.lock().unwrap();
        let mut saved = Vec::new();
        for mut t in transactions {
            if t.id.is_none() {
                let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
                t.id = Some(id.to_string());
            }
            match records.iter_mut().find(|r| r.id == t.id) {
                Some(existing) => *existing = t.clone(),
                None => records.push(t.clone()),
            }
            saved.push(t);
        }
        Ok(saved)
    }

    fn find_by_id(&self, id: &str) -> SummaryResult<Option<Transaction>> {
        self.by_id.fetch_add(1, Ordering::SeqCst);
        let records = self.records.lock().unwrap();
        Ok(records.iter().find(|r| r.id.as_deref() == Some(id)).cloned())
    }

    fn find_all(&self) -> SummaryResult<Vec<Transaction>> {
        self.all.fetch_add(1, Ordering::SeqCst);
        Ok(self.records.lock().unwrap().clone())
    }

    fn find_by_customer_id(&self, customer_id: &str) -> SummaryResult<Vec<Transaction>> {
        self.by_customer.fetch_add(1, Ordering::SeqCst);
        let records = self.records.lock().unwrap();
        Ok(records
            .iter()
            .filter(|r| r.customer == customer_id)
            .cloned()
            .collect())
    }

    fn find_by_customer_id_and_date(
        &self,
        customer_id: &str,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> SummaryResult<Vec<Transaction>> {
        self.by_range.fetch_add(1, Ordering::SeqCst);
        let records = self.records.lock().unwrap();
        Ok(records
            .iter()
            .filter(|r| r.customer == customer_id && r.date >= start && r.date < end)
            .cloned()
            .collect())
    }
}

/// Returns fixed labels and remembers how many records it was handed.
pub struct FixedClassifier {
    labels: Vec<ClassificationLabel>,
    pub calls: AtomicUsize,
    pub last_len: AtomicUsize,
}

impl FixedClassifier {
    pub fn new(labels: &[&str]) -> Self {
        Self {
            labels: labels.iter().map(|l| ClassificationLabel::new(*l)).collect(),
            calls: AtomicUsize::new(0),
            last_len: AtomicUsize::new(0),
        }
    }
}

impl ClassificationService for FixedClassifier {
    fn classify(&self, transactions: &[Transaction]) -> Vec<ClassificationLabel> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.last_len.store(transactions.len(), Ordering::SeqCst);
        self.labels.clone()
    }
}
