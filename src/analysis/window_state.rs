use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

/// Whether a record is entering or leaving the window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Add,
    Remove,
}

/// Running aggregate for one account over the current window.
///
/// `max` is the largest amount currently inside the window, with a zero floor
/// when the window holds no records for the account. `category_totals` only
/// carries the target categories; every other category still flows into
/// `total` and `count`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AccountWindow {
    pub max: f64,
    pub total: f64,
    pub count: u32,
    pub category_totals: BTreeMap<String, f64>,
}

impl AccountWindow {
    /// All-zero aggregate with a zeroed slot for each target category.
    fn seeded(targets: &BTreeSet<String>) -> Self {
        Self {
            max: 0.0,
            total: 0.0,
            count: 0,
            category_totals: targets.iter().map(|name| (name.clone(), 0.0)).collect(),
        }
    }

    /// Folds an amount in or out of the running total and count, and of the
    /// matching category slot when `category` is a target.
    pub fn apply(&mut self, op: Operation, amount: f64, category: &str) {
        match op {
            Operation::Add => {
                self.total += amount;
                self.count += 1;
            }
            Operation::Remove => {
                self.total -= amount;
                self.count -= 1;
            }
        }
        // Only target categories have a slot; the rest are ignored here.
        if let Some(slot) = self.category_totals.get_mut(category) {
            match op {
                Operation::Add => *slot += amount,
                Operation::Remove => *slot -= amount,
            }
        }
    }

    /// Raises the running max when `amount` exceeds it.
    pub fn observe_max(&mut self, amount: f64) {
        if amount > self.max {
            self.max = amount;
        }
    }

    /// Resets the max to zero when the expiring `amount` holds it and reports
    /// whether a reset happened. The true surviving max, if any, is re-derived
    /// by the caller's rescan.
    pub fn retire_max(&mut self, amount: f64) -> bool {
        if amount == self.max {
            self.max = 0.0;
            true
        } else {
            false
        }
    }

    /// Mean amount inside the window, defined as zero when the window holds
    /// no records for the account.
    pub fn mean(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.total / f64::from(self.count)
        }
    }
}

/// Mutable per-account aggregates, keyed by account id.
///
/// Accounts materialize lazily on first touch, seeded with zeros for every
/// target category. Only the rolling engine mutates this state.
#[derive(Debug, Clone, Default, Serialize)]
pub struct WindowState {
    accounts: BTreeMap<String, AccountWindow>,
    #[serde(skip)]
    targets: BTreeSet<String>,
}

impl WindowState {
    pub fn new(targets: BTreeSet<String>) -> Self {
        Self {
            accounts: BTreeMap::new(),
            targets,
        }
    }

    /// Lazy get-or-create of one account's aggregate.
    pub fn account_mut(&mut self, account_id: &str) -> &mut AccountWindow {
        let targets = &self.targets;
        self.accounts
            .entry(account_id.to_owned())
            .or_insert_with(|| AccountWindow::seeded(targets))
    }

    pub fn account(&self, account_id: &str) -> Option<&AccountWindow> {
        self.accounts.get(account_id)
    }

    pub fn accounts(&self) -> &BTreeMap<String, AccountWindow> {
        &self.accounts
    }

    /// Fully independent deep copy of every account aggregate.
    pub fn snapshot(&self) -> BTreeMap<String, AccountWindow> {
        self.accounts.clone()
    }
}
