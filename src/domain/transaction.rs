use serde::{Deserialize, Serialize};

/// A single financial transaction record.
///
/// Built once at ingestion and never mutated afterwards; the analysis layer
/// only ever reads these values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: String,
    pub account_id: String,
    pub day: u32,
    pub category: String,
    pub amount: f64,
}

impl Transaction {
    pub fn new(
        id: impl Into<String>,
        account_id: impl Into<String>,
        day: u32,
        category: impl Into<String>,
        amount: f64,
    ) -> Self {
        Self {
            id: id.into(),
            account_id: account_id.into(),
            day,
            category: category.into(),
            amount,
        }
    }
}
