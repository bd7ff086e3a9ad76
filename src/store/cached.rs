// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Cache-aside decorator for a [`TransactionStore`].
//!
//! Point lookups are cached by transaction id and full scans under
//! [`ALL_TRANSACTIONS_KEY`]. Absent records are never cached. Writes go
//! straight to the inner store and do not touch cached entries, so a cached
//! record or snapshot can be served stale after an update until its TTL runs
//! out, [`CachedTransactionStore::clear`] is called, or the process restarts.
//! The cache is private to this process.

use super::TransactionStore;
use crate::error::SummaryResult;
use crate::models::Transaction;
use chrono::NaiveDateTime;
use dashmap::DashMap;
use std::borrow::Borrow;
use std::hash::Hash;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

pub const ALL_TRANSACTIONS_KEY: &str = "transactions::all";

#[derive(Debug, Clone)]
struct CacheEntry<T> {
    value: T,
    expires_at: Option<Instant>,
}

impl<T> CacheEntry<T> {
    fn new(value: T, ttl: Option<Duration>) -> Self {
        Self {
            value,
            expires_at: ttl.map(|d| Instant::now() + d),
        }
    }

    fn is_expired(&self) -> bool {
        self.expires_at.is_some_and(|exp| Instant::now() >= exp)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub entries: usize,
}

pub struct CachedTransactionStore<S> {
    inner: S,
    by_id: DashMap<String, CacheEntry<Transaction>>,
    snapshots: DashMap<String, CacheEntry<Vec<Transaction>>>,
    ttl: Option<Duration>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl<S: TransactionStore> CachedTransactionStore<S> {
    pub fn new(inner: S, ttl: Option<Duration>) -> Self {
        Self {
            inner,
            by_id: DashMap::new(),
            snapshots: DashMap::new(),
            ttl,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }

    pub fn clear(&self) {
        self.by_id.clear();
        self.snapshots.clear();
    }

    pub fn is_cached(&self, id: &str) -> bool {
        self.by_id.get(id).is_some_and(|e| !e.is_expired())
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            entries: self.by_id.len() + self.snapshots.len(),
        }
    }

    fn lookup<K, Q, T>(&self, map: &DashMap<K, CacheEntry<T>>, key: &Q) -> Option<T>
    where
        K: Eq + Hash + Borrow<Q>,
        Q: Eq + Hash + ?Sized,
        T: Clone,
    {
        let expired = match map.get(key) {
            Some(entry) if !entry.is_expired() => {
                self.hits.fetch_add(1, Ordering::Relaxed);
                return Some(entry.value.clone());
            }
            Some(_) => true,
            None => false,
        };
        if expired {
            map.remove_if(key, |_, e| e.is_expired());
        }
        self.misses.fetch_add(1, Ordering::Relaxed);
        None
    }
}

impl<S: TransactionStore> TransactionStore for CachedTransactionStore<S> {
    fn save_or_update(&self, transactions: Vec<Transaction>) -> SummaryResult<Vec<Transaction>> {
        self.inner.save_or_update(transactions)
    }

    fn find_by_id(&self, id: &str) -> SummaryResult<Option<Transaction>> {
        if let Some(tx) = self.lookup(&self.by_id, id) {
            log::debug!("cache hit for transaction {}", id);
            return Ok(Some(tx));
        }
        log::debug!("cache miss for transaction {}", id);
        let found = self.inner.find_by_id(id)?;
        if let Some(ref tx) = found {
            self.by_id
                .insert(id.to_string(), CacheEntry::new(tx.clone(), self.ttl));
        }
        Ok(found)
    }

    fn find_all(&self) -> SummaryResult<Vec<Transaction>> {
        if let Some(all) = self.lookup(&self.snapshots, ALL_TRANSACTIONS_KEY) {
            log::debug!("cache hit for {}", ALL_TRANSACTIONS_KEY);
            return Ok(all);
        }
        log::debug!("cache miss for {}", ALL_TRANSACTIONS_KEY);
        let all = self.inner.find_all()?;
        self.snapshots.insert(
            ALL_TRANSACTIONS_KEY.to_string(),
            CacheEntry::new(all.clone(), self.ttl),
        );
        Ok(all)
    }

    fn find_by_customer_id(&self, customer_id: &str) -> SummaryResult<Vec<Transaction>> {
        self.inner.find_by_customer_id(customer_id)
    }

    fn find_by_customer_id_and_date(
        &self,
        customer_id: &str,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> SummaryResult<Vec<Transaction>> {
        self.inner
            .find_by_customer_id_and_date(customer_id, start, end)
    }
}
