//! Single-pass groupings with no state carried between records.

use std::collections::BTreeMap;

use crate::analysis::store::TransactionStore;

/// Total transaction amount per day across all accounts.
pub fn daily_totals(store: &TransactionStore) -> BTreeMap<u32, f64> {
    let mut totals = BTreeMap::new();
    for txn in store.iter() {
        *totals.entry(txn.day).or_insert(0.0) += txn.amount;
    }
    totals
}

/// Mean transaction amount per account per category over the whole store.
///
/// Every category observed anywhere in the store appears for every account;
/// an account with no records in a category reports a mean of zero.
pub fn category_averages(store: &TransactionStore) -> BTreeMap<String, BTreeMap<String, f64>> {
    let categories = store.unique_categories();

    let mut tallies: BTreeMap<String, BTreeMap<String, (f64, u32)>> = BTreeMap::new();
    for txn in store.iter() {
        let slot = tallies
            .entry(txn.account_id.clone())
            .or_default()
            .entry(txn.category.clone())
            .or_insert((0.0, 0));
        slot.0 += txn.amount;
        slot.1 += 1;
    }

    let mut averages = BTreeMap::new();
    for (account_id, by_category) in tallies {
        let mut row = BTreeMap::new();
        for category in &categories {
            let mean = match by_category.get(category) {
                Some((total, count)) if *count > 0 => total / f64::from(*count),
                _ => 0.0,
            };
            row.insert(category.clone(), mean);
        }
        averages.insert(account_id, row);
    }
    averages
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Transaction;

    fn sample_store() -> TransactionStore {
        TransactionStore::new(vec![
            Transaction::new("t1", "A1", 1, "CC", 10.0),
            Transaction::new("t2", "A1", 1, "AA", 30.0),
            Transaction::new("t3", "A2", 2, "CC", 8.0),
            Transaction::new("t4", "A1", 2, "CC", 20.0),
        ])
    }

    #[test]
    fn daily_totals_sum_across_accounts() {
        let totals = daily_totals(&sample_store());
        assert_eq!(totals[&1], 40.0);
        assert_eq!(totals[&2], 28.0);
        assert_eq!(totals.len(), 2);
    }

    #[test]
    fn category_averages_cover_every_observed_category() {
        let averages = category_averages(&sample_store());

        assert_eq!(averages["A1"]["CC"], 15.0);
        assert_eq!(averages["A1"]["AA"], 30.0);
        // A2 never used AA; the slot is present and zero.
        assert_eq!(averages["A2"]["AA"], 0.0);
        assert_eq!(averages["A2"]["CC"], 8.0);
    }

    #[test]
    fn empty_store_produces_empty_summaries() {
        let store = TransactionStore::new(Vec::new());
        assert!(daily_totals(&store).is_empty());
        assert!(category_averages(&store).is_empty());
    }
}
