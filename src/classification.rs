// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{ClassificationLabel, Transaction};

/// Labels a set of transactions with behavioural tags. Order of the returned
/// labels is preserved in the summary.
pub trait ClassificationService: Send + Sync {
    fn classify(&self, transactions: &[Transaction]) -> Vec<ClassificationLabel>;
}

/// Fallback used when no rule set is plugged in.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnclassifiedService;

impl ClassificationService for UnclassifiedService {
    fn classify(&self, _transactions: &[Transaction]) -> Vec<ClassificationLabel> {
        vec![ClassificationLabel::unknown()]
    }
}
