//! Persistence backends for record ingestion and report emission.

pub mod csv_backend;
pub mod json_backend;

pub use csv_backend::{
    load_transactions, write_category_averages, write_daily_totals, write_rolling_report,
};
pub use json_backend::{load_json, save_json};
