use std::collections::BTreeSet;
use std::ops::Index;

use crate::domain::Transaction;

/// Ordered sequence of transactions, non-decreasing by day.
///
/// Sorting happens once at construction; the rolling engine relies on the day
/// ordering and only ever reads the stored records.
#[derive(Debug, Clone, Default)]
pub struct TransactionStore {
    transactions: Vec<Transaction>,
}

impl TransactionStore {
    /// Builds a store from records in any order. The sort is stable, so
    /// records sharing a day keep their ingestion order.
    pub fn new(mut transactions: Vec<Transaction>) -> Self {
        transactions.sort_by_key(|txn| txn.day);
        Self { transactions }
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Transaction> {
        self.transactions.get(index)
    }

    /// Day of the last record, or `None` for an empty store.
    pub fn max_day(&self) -> Option<u32> {
        self.transactions.last().map(|txn| txn.day)
    }

    /// Every category observed anywhere in the store.
    pub fn unique_categories(&self) -> BTreeSet<String> {
        self.transactions
            .iter()
            .map(|txn| txn.category.clone())
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Transaction> {
        self.transactions.iter()
    }
}

impl Index<usize> for TransactionStore {
    type Output = Transaction;

    fn index(&self, index: usize) -> &Transaction {
        &self.transactions[index]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn txn(id: &str, day: u32) -> Transaction {
        Transaction::new(id, "A1", day, "CC", 1.0)
    }

    #[test]
    fn construction_sorts_by_day() {
        let store = TransactionStore::new(vec![txn("t3", 7), txn("t1", 2), txn("t2", 5)]);
        let days: Vec<u32> = store.iter().map(|t| t.day).collect();
        assert_eq!(days, vec![2, 5, 7]);
        assert_eq!(store.max_day(), Some(7));
    }

    #[test]
    fn sort_is_stable_within_a_day() {
        let store = TransactionStore::new(vec![txn("first", 3), txn("second", 3), txn("t0", 1)]);
        assert_eq!(store[1].id, "first");
        assert_eq!(store[2].id, "second");
    }

    #[test]
    fn empty_store_has_no_max_day() {
        let store = TransactionStore::new(Vec::new());
        assert!(store.is_empty());
        assert_eq!(store.max_day(), None);
    }

    #[test]
    fn unique_categories_deduplicates() {
        let store = TransactionStore::new(vec![
            Transaction::new("t1", "A1", 1, "CC", 1.0),
            Transaction::new("t2", "A2", 2, "AA", 1.0),
            Transaction::new("t3", "A1", 3, "CC", 1.0),
        ]);
        let categories: Vec<String> = store.unique_categories().into_iter().collect();
        assert_eq!(categories, vec!["AA".to_string(), "CC".to_string()]);
    }
}
