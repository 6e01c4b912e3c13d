#![doc(test(attr(deny(warnings))))]

//! Txn Stats computes summary statistics over time-ordered financial
//! transaction records: totals per day, per-account category averages, and an
//! incrementally maintained rolling time-window aggregation.

pub mod analysis;
pub mod domain;
pub mod errors;
pub mod storage;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Txn Stats tracing initialized.");
    });
}

#[cfg(test)]
mod tests {
    #[test]
    fn init_does_not_panic() {
        super::init();
    }
}
