//! Aggregation engines operating on a day-sorted transaction store.

pub mod collector;
pub mod rolling;
pub mod store;
pub mod summaries;
pub mod window_state;

pub use collector::{RollingReport, RollingRow};
pub use rolling::RollingAnalysis;
pub use store::TransactionStore;
pub use summaries::{category_averages, daily_totals};
pub use window_state::{AccountWindow, Operation, WindowState};
