//! Transaction value types consumed by the fee policy and block queries

mod transaction;

pub use transaction::*;
