use std::collections::BTreeSet;

use tracing::info;

use crate::analysis::collector::RollingReport;
use crate::analysis::store::TransactionStore;
use crate::analysis::window_state::{Operation, WindowState};
use crate::errors::{AnalysisError, Result};

/// Incremental rolling time-window aggregation over a day-sorted store.
///
/// For every day `D` past the initial offset, per-account statistics cover
/// the half-open day range `[D - window_size, D)`. Between consecutive days
/// only the records leaving through the lower edge and the records entering
/// through the upper edge change membership; everything in between still
/// contributes the same amounts, so the engine keeps the previous day's
/// aggregates and touches only the records that moved. The one exception is
/// an expiring record that held an account's running maximum: the zero floor
/// it leaves behind can only be corrected by rescanning the surviving range,
/// so that day degrades to a bounded window-sized pass.
pub struct RollingAnalysis<'a> {
    store: &'a TransactionStore,
    state: WindowState,
    /// Index of the first record inside the last materialized window.
    lower_bound: usize,
    /// One past the last record aggregated into the last materialized window.
    upper_bound: usize,
}

impl<'a> RollingAnalysis<'a> {
    pub fn new<I, S>(store: &'a TransactionStore, target_categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let targets: BTreeSet<String> = target_categories.into_iter().map(Into::into).collect();
        Self {
            store,
            state: WindowState::new(targets),
            lower_bound: 0,
            upper_bound: 0,
        }
    }

    /// Drives the day cursor from `window_size + 1` through the last day in
    /// the store, capturing one snapshot of all account aggregates per day.
    ///
    /// Fails with [`AnalysisError::InvalidConfiguration`] when the store is
    /// empty, the window is narrower than 2 days, or the window exceeds the
    /// largest day present.
    pub fn run(&mut self, window_size: u32) -> Result<RollingReport> {
        let max_day = self.store.max_day().ok_or_else(|| {
            AnalysisError::InvalidConfiguration("no transactions to aggregate".into())
        })?;
        if window_size < 2 || window_size > max_day {
            return Err(AnalysisError::InvalidConfiguration(format!(
                "window size {window_size} outside valid range 2..={max_day}"
            )));
        }

        info!(
            records = self.store.len(),
            window_size, max_day, "starting rolling window aggregation"
        );

        let mut report = RollingReport::default();
        for day in (window_size + 1)..=max_day {
            self.advance_window(day - window_size, day);
            report.capture(day, &self.state);
        }
        Ok(report)
    }

    /// Slides the aggregates from the previous day's window to
    /// `[window_start, window_end)`.
    ///
    /// Records below `window_start` are subtracted out. Records the previous
    /// call already aggregated (absolute index below the old `upper_bound`)
    /// are skipped wholesale, unless one of the removals retired an account's
    /// maximum; in that case the surviving range is rescanned to re-derive
    /// the true max, while its totals and counts stay untouched because they
    /// were never invalidated. Records past the old upper bound fold in as
    /// new arrivals, and the scan stops at the first record on or beyond
    /// `window_end`.
    fn advance_window(&mut self, window_start: u32, window_end: u32) {
        let store = self.store;
        let mut new_lower_bound = None;
        let mut scan_index = 0;
        // One retired max on any account disables the skip for the whole
        // call; the rescan then covers every account.
        let mut max_changed = false;

        while self.lower_bound + scan_index < store.len() {
            let position = self.lower_bound + scan_index;
            let txn = &store[position];

            if txn.day < window_start {
                // Only records a previous window actually aggregated have
                // anything to give back; a record dated before the very
                // first window start is not one of them.
                if position < self.upper_bound {
                    let account = self.state.account_mut(&txn.account_id);
                    max_changed |= account.retire_max(txn.amount);
                    account.apply(Operation::Remove, txn.amount, &txn.category);
                }
            } else if txn.day < window_end {
                if new_lower_bound.is_none() {
                    new_lower_bound = Some(position);
                }
                if position < self.upper_bound {
                    if !max_changed {
                        // Everything up to the old upper bound still
                        // contributes the same amounts; jump straight past it.
                        scan_index = self.upper_bound - self.lower_bound;
                        continue;
                    }
                    self.state.account_mut(&txn.account_id).observe_max(txn.amount);
                } else {
                    let account = self.state.account_mut(&txn.account_id);
                    account.observe_max(txn.amount);
                    account.apply(Operation::Add, txn.amount, &txn.category);
                }
            } else {
                // First record at or past the window end. It is also the
                // first record at or past the window start when the window
                // is empty, which keeps expired records from being
                // subtracted twice on the next call.
                if new_lower_bound.is_none() {
                    new_lower_bound = Some(position);
                }
                break;
            }

            scan_index += 1;
        }

        // Upper bound first: it is an offset from the old lower bound.
        self.upper_bound = self.lower_bound + scan_index;
        // The driver never slides the window start past the last record, so
        // the lower bound always lands on the first record at or past the
        // window start; an empty store leaves it untouched.
        if let Some(lower) = new_lower_bound {
            self.lower_bound = lower;
        }
    }

    /// The `[lower_bound, upper_bound)` record range backing the last
    /// materialized window.
    pub fn bounds(&self) -> (usize, usize) {
        (self.lower_bound, self.upper_bound)
    }

    /// Aggregates as of the last materialized window.
    pub fn state(&self) -> &WindowState {
        &self.state
    }
}
