//! CINDER (CIN) Consensus Core Library
//!
//! The height-indexed consensus rule machinery for a merge-mined PoW chain:
//! era resolution, the dual block hash (chain identity vs. proof-of-work),
//! and the wallet/relay fee tier policy.
//!
//! CIN is the short form used in addresses, logos, and protocol identifiers.

pub mod consensus;
pub mod crypto;
pub mod policy;
pub mod validation;

/// Protocol constants - HARD-CODED, NEVER CONFIGURABLE
pub mod constants {
    /// Base units per coin (8 decimal places)
    pub const COIN: u64 = 100_000_000;

    /// Maximum representable money value (in base units)
    pub const MAX_MONEY: u64 = 64_000_000 * COIN; // 64M CIN

    /// Base relay fee rate, in base units per kilobyte
    pub const BASE_FEE_PER_KB: u64 = 200_000; // 0.002 CIN/kB

    /// Soft dust threshold used by relay policy (in base units)
    pub const DUST_LIMIT: u64 = 100_000; // 0.001 CIN

    /// Chain name (short form for addresses/logos)
    pub const CHAIN_NAME: &str = "CIN";

    /// Full chain name
    pub const CHAIN_FULL_NAME: &str = "CINDER";

    /// Check that an amount is within the representable money range
    pub fn money_range(amount: u64) -> bool {
        amount <= MAX_MONEY
    }
}

#[cfg(test)]
mod tests {
    use super::constants::*;

    #[test]
    fn test_money_range_bounds() {
        assert!(money_range(0));
        assert!(money_range(MAX_MONEY));
        assert!(!money_range(MAX_MONEY + 1));
    }
}
