// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::config::DateFormat;
use crate::error::{SummaryError, SummaryResult};
use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

pub const TRANSACTIONS_COLLECTION: &str = "transactions";
pub const COUNTERS_COLLECTION: &str = "counters";

/// One financial movement. `id` is `None` until the record has been persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: Option<String>,
    pub customer: String,
    pub date: NaiveDateTime,
    pub amount: Decimal,
    pub description: String,
}

impl Transaction {
    pub fn new(
        customer: impl Into<String>,
        date: NaiveDateTime,
        amount: Decimal,
        description: impl Into<String>,
    ) -> SummaryResult<Self> {
        let tx = Self {
            id: None,
            customer: customer.into(),
            date,
            amount,
            description: description.into(),
        };
        tx.validate()?;
        Ok(tx)
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn is_persisted(&self) -> bool {
        self.id.is_some()
    }

    pub fn validate(&self) -> SummaryResult<()> {
        if self.customer.trim().is_empty() {
            return Err(SummaryError::InvalidTransaction(format!("{:?}", self)));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Counter {
    pub collection_name: String,
    pub sequence: i64,
}

/// Opaque behavioural tag produced by a classification service.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClassificationLabel(String);

impl ClassificationLabel {
    pub const UNKNOWN: &'static str = "UNKNOWN";

    pub fn new(label: impl Into<String>) -> Self {
        Self(label.into())
    }

    pub fn unknown() -> Self {
        Self::new(Self::UNKNOWN)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ClassificationLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransactionView {
    pub id: String,
    pub customer: String,
    pub date: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    pub description: String,
}

impl TransactionView {
    pub fn from_transaction(tx: &Transaction, fmt: &DateFormat) -> Self {
        Self {
            id: tx.id.clone().unwrap_or_default(),
            customer: tx.customer.clone(),
            date: fmt.format(&tx.date),
            amount: tx.amount,
            description: tx.description.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub customer_id: String,
    pub month: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub current_balance: Decimal,
    pub classification: Vec<ClassificationLabel>,
    pub transactions: Vec<TransactionView>,
}
