use std::collections::BTreeMap;

use serde::Serialize;

use crate::analysis::window_state::{AccountWindow, WindowState};

/// One `(day, account, aggregate)` row of a rolling report.
#[derive(Debug, Clone, Copy)]
pub struct RollingRow<'a> {
    pub day: u32,
    pub account_id: &'a str,
    pub aggregate: &'a AccountWindow,
}

/// Per-day snapshots of every account aggregate, keyed by day.
///
/// Each captured day is an independent deep copy, so later in-place mutation
/// by the engine never reaches back into an already captured day.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RollingReport {
    days: BTreeMap<u32, BTreeMap<String, AccountWindow>>,
}

impl RollingReport {
    /// Stores (or replaces) the snapshot for `day`.
    pub fn capture(&mut self, day: u32, state: &WindowState) {
        self.days.insert(day, state.snapshot());
    }

    pub fn day(&self, day: u32) -> Option<&BTreeMap<String, AccountWindow>> {
        self.days.get(&day)
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    pub fn days(&self) -> impl Iterator<Item = u32> + '_ {
        self.days.keys().copied()
    }

    /// Lazy day-ascending traversal of every `(day, account, aggregate)`
    /// triple. Borrows rather than drains, so it can be restarted.
    pub fn rows(&self) -> impl Iterator<Item = RollingRow<'_>> {
        self.days.iter().flat_map(|(day, accounts)| {
            accounts.iter().map(move |(account_id, aggregate)| RollingRow {
                day: *day,
                account_id,
                aggregate,
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::window_state::Operation;

    use std::collections::BTreeSet;

    fn state_with(amount: f64) -> WindowState {
        let targets: BTreeSet<String> = ["CC".to_string()].into_iter().collect();
        let mut state = WindowState::new(targets);
        state.account_mut("A1").apply(Operation::Add, amount, "CC");
        state
    }

    #[test]
    fn captured_days_are_isolated_from_later_mutation() {
        let mut state = state_with(10.0);
        let mut report = RollingReport::default();
        report.capture(6, &state);

        state.account_mut("A1").apply(Operation::Add, 90.0, "CC");
        report.capture(7, &state);

        assert_eq!(report.day(6).unwrap()["A1"].total, 10.0);
        assert_eq!(report.day(7).unwrap()["A1"].total, 100.0);
    }

    #[test]
    fn recapturing_without_advancement_is_idempotent() {
        let state = state_with(25.0);
        let mut report = RollingReport::default();
        report.capture(6, &state);
        let first = report.day(6).unwrap().clone();
        report.capture(6, &state);
        assert_eq!(report.day(6).unwrap(), &first);
        assert_eq!(report.len(), 1);
    }

    #[test]
    fn rows_iterate_in_day_order_and_restart() {
        let state = state_with(5.0);
        let mut report = RollingReport::default();
        report.capture(8, &state);
        report.capture(6, &state);
        report.capture(7, &state);

        let days: Vec<u32> = report.rows().map(|row| row.day).collect();
        assert_eq!(days, vec![6, 7, 8]);
        // A fresh iterator starts over from the first day.
        assert_eq!(report.rows().next().unwrap().day, 6);
    }
}
