// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::classification::ClassificationService;
use crate::config::SummaryConfig;
use crate::error::{SummaryError, SummaryResult};
use crate::models::{Summary, Transaction, TransactionView};
use crate::store::TransactionStore;
use crate::utils::{month_bounds, validate_customer_id, validate_month};
use chrono::NaiveDateTime;
use rust_decimal::{Decimal, RoundingStrategy};

/// Builds per-customer monthly summaries. Holds no state between calls.
pub struct SummaryEngine<'a> {
    store: &'a dyn TransactionStore,
    classifier: &'a dyn ClassificationService,
    config: &'a SummaryConfig,
}

impl<'a> SummaryEngine<'a> {
    pub fn new(
        store: &'a dyn TransactionStore,
        classifier: &'a dyn ClassificationService,
        config: &'a SummaryConfig,
    ) -> Self {
        Self {
            store,
            classifier,
            config,
        }
    }

    /// The balance covers the customer's whole history; `transactions` and
    /// `classification` cover only the requested month of the reference year.
    pub fn compute_summary(&self, customer_id: &str, month: &str) -> SummaryResult<Summary> {
        let customer_id = validate_customer_id(customer_id)?;
        let month_no = validate_month(month)?;

        let all = self.store.find_by_customer_id(customer_id)?;
        let (start, end) = month_bounds(self.config.reference_year, month_no)?;
        let monthly = monthly_transactions(&all, start, end);
        log::debug!(
            "customer {}: {} transaction(s), {} in {}-{:02}",
            customer_id,
            all.len(),
            monthly.len(),
            self.config.reference_year,
            month_no
        );

        if all.is_empty() || monthly.is_empty() {
            return Err(SummaryError::NotFound(customer_id.to_string()));
        }

        let current_balance = current_balance(&all)
            .ok_or_else(|| SummaryError::BalanceOverflow(customer_id.to_string()))?;
        let classification = self.classifier.classify(&monthly);
        let transactions = monthly
            .iter()
            .map(|t| TransactionView::from_transaction(t, &self.config.date_format))
            .collect();

        Ok(Summary {
            customer_id: customer_id.to_string(),
            month: month.to_string(),
            current_balance,
            classification,
            transactions,
        })
    }
}

/// Records strictly after `start` and strictly before `end`. A record stamped
/// exactly at midnight on the first day is not part of the month.
pub fn monthly_transactions(
    transactions: &[Transaction],
    start: NaiveDateTime,
    end: NaiveDateTime,
) -> Vec<Transaction> {
    transactions
        .iter()
        .filter(|t| t.date > start && t.date < end)
        .cloned()
        .collect()
}

/// Exact sum rounded to cents toward positive infinity. `None` when the sum
/// leaves the range of `Decimal`.
pub fn current_balance(transactions: &[Transaction]) -> Option<Decimal> {
    transactions
        .iter()
        .try_fold(Decimal::ZERO, |acc, t| acc.checked_add(t.amount))
        .map(|sum| sum.round_dp_with_strategy(2, RoundingStrategy::ToPositiveInfinity))
}
