//! Fee tier policy
//!
//! Wallet-facing fee selection: a closed set of priority levels mapped to
//! fixed multiples of the base relay rate, plus the dust-discouragement fee
//! that relay policy adds for under-threshold outputs. Everything here is
//! pure and total; out-of-range sums clamp to MAX_MONEY instead of failing.

use crate::constants::{money_range, BASE_FEE_PER_KB, COIN, MAX_MONEY};
use crate::validation::{Transaction, TxOutput};
use serde::{Deserialize, Serialize};

/// Wallet fee priority levels, lowest to highest
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum FeePriority {
    Minimum,
    Standard,
    Elevated,
    Priority,
    Generous,
    Maximum,
}

impl FeePriority {
    /// All levels, lowest to highest
    pub const ALL: [FeePriority; 6] = [
        FeePriority::Minimum,
        FeePriority::Standard,
        FeePriority::Elevated,
        FeePriority::Priority,
        FeePriority::Generous,
        FeePriority::Maximum,
    ];

    /// Human-readable label for wallet UI
    pub fn label(&self) -> &'static str {
        match self {
            FeePriority::Minimum => "Minimum",
            FeePriority::Standard => "Standard",
            FeePriority::Elevated => "Elevated",
            FeePriority::Priority => "Priority",
            FeePriority::Generous => "Generous",
            FeePriority::Maximum => "Maximum",
        }
    }
}

/// Fee rate in base units per kilobyte
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FeeRate {
    per_kb: u64,
}

impl FeeRate {
    /// Create a fee rate from base units per kilobyte
    pub const fn new(per_kb: u64) -> Self {
        Self { per_kb }
    }

    /// The rate in base units per kilobyte
    pub fn per_kb(&self) -> u64 {
        self.per_kb
    }

    /// Fee for a transaction of the given serialized size
    ///
    /// Rounds up to one base unit so a nonzero rate never quotes a free
    /// transaction.
    pub fn fee(&self, n_bytes: usize) -> u64 {
        let fee = self.per_kb.saturating_mul(n_bytes as u64) / 1000;
        if fee == 0 && n_bytes != 0 && self.per_kb != 0 {
            1
        } else {
            fee
        }
    }
}

/// Fee rate for a wallet priority level
///
/// Every level is a fixed integer multiple of the base relay rate except the
/// top one, which is a flat rate chosen to stay ahead of any multiplier
/// while carefully avoiding floating point maths.
pub fn fee_rate_for_priority(priority: FeePriority) -> FeeRate {
    let base = BASE_FEE_PER_KB;
    match priority {
        FeePriority::Minimum => FeeRate::new(base),
        FeePriority::Standard => FeeRate::new(base * 2),
        FeePriority::Elevated => FeeRate::new(base * 4),
        FeePriority::Priority => FeeRate::new(base * 8),
        FeePriority::Generous => FeeRate::new(base * 50),
        FeePriority::Maximum => FeeRate::new(COIN / 100 * 258), // flat 2.58 CIN/kB
    }
}

/// Dust-discouragement fee over a transaction's outputs
///
/// Adds the dust limit once for every output whose value falls strictly
/// below it. The limit itself is computed externally from a reference fee
/// rate.
pub fn dust_fee(outputs: &[TxOutput], dust_limit: u64) -> u64 {
    outputs
        .iter()
        .filter(|out| out.value < dust_limit)
        .fold(0u64, |fee, _| fee.saturating_add(dust_limit))
}

/// Minimum fee for a transaction to be relayed
///
/// Size-based fee at the relay rate plus the dust fee, clamped to the
/// maximum representable money value.
pub fn min_relay_fee(
    tx: &Transaction,
    n_bytes: usize,
    relay_rate: FeeRate,
    dust_limit: u64,
) -> u64 {
    let fee = relay_rate
        .fee(n_bytes)
        .saturating_add(dust_fee(&tx.outputs, dust_limit));

    if money_range(fee) {
        fee
    } else {
        MAX_MONEY
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn out(value: u64) -> TxOutput {
        TxOutput {
            value,
            script_pubkey: vec![],
        }
    }

    #[test]
    fn test_fee_rates_are_non_decreasing() {
        let rates: Vec<u64> = FeePriority::ALL
            .iter()
            .map(|p| fee_rate_for_priority(*p).per_kb())
            .collect();

        for pair in rates.windows(2) {
            assert!(pair[0] <= pair[1], "rates must not decrease: {:?}", rates);
        }
    }

    #[test]
    fn test_tier_multipliers() {
        let base = fee_rate_for_priority(FeePriority::Minimum).per_kb();
        assert_eq!(base, BASE_FEE_PER_KB);
        assert_eq!(fee_rate_for_priority(FeePriority::Standard).per_kb(), base * 2);
        assert_eq!(fee_rate_for_priority(FeePriority::Elevated).per_kb(), base * 4);
        assert_eq!(fee_rate_for_priority(FeePriority::Priority).per_kb(), base * 8);
        assert_eq!(fee_rate_for_priority(FeePriority::Generous).per_kb(), base * 50);
        assert_eq!(
            fee_rate_for_priority(FeePriority::Maximum).per_kb(),
            COIN / 100 * 258
        );
    }

    #[test]
    fn test_fee_rate_rounds_up_to_one_unit() {
        let rate = FeeRate::new(1);
        assert_eq!(rate.fee(1), 1); // 1 * 1 / 1000 would truncate to 0
        assert_eq!(rate.fee(0), 0);
        assert_eq!(FeeRate::new(0).fee(1000), 0);
    }

    #[test]
    fn test_fee_scales_with_size() {
        let rate = FeeRate::new(BASE_FEE_PER_KB);
        assert_eq!(rate.fee(1000), BASE_FEE_PER_KB);
        assert_eq!(rate.fee(250), BASE_FEE_PER_KB / 4);
    }

    #[test]
    fn test_dust_fee_counts_strictly_below_limit() {
        let dust_limit = 100_000;
        let outputs = vec![out(0), out(dust_limit - 1), out(dust_limit), out(dust_limit + 1)];

        assert_eq!(dust_fee(&outputs, dust_limit), 2 * dust_limit);
    }

    #[test]
    fn test_dust_fee_empty_outputs() {
        assert_eq!(dust_fee(&[], 100_000), 0);
    }

    #[test]
    fn test_min_relay_fee_combines_size_and_dust() {
        let dust_limit = 100_000;
        let tx = Transaction::new(vec![], vec![out(1), out(dust_limit * 2)]);
        let rate = FeeRate::new(BASE_FEE_PER_KB);

        let fee = min_relay_fee(&tx, 1000, rate, dust_limit);
        assert_eq!(fee, BASE_FEE_PER_KB + dust_limit);
    }

    #[test]
    fn test_min_relay_fee_clamps_to_max_money() {
        let tx = Transaction::new(vec![], vec![out(0)]);
        let rate = FeeRate::new(u64::MAX);

        assert_eq!(min_relay_fee(&tx, 1_000_000, rate, 0), MAX_MONEY);
    }

    #[test]
    fn test_labels_cover_all_levels() {
        for p in FeePriority::ALL {
            assert!(!p.label().is_empty());
        }
    }
}
