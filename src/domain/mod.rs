//! Pure domain models. No I/O, no storage. Only data types.

pub mod transaction;

pub use transaction::*;
