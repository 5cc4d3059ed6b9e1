//! Relay and wallet policy - fee tiers and dust discouragement

mod fees;

pub use fees::*;
