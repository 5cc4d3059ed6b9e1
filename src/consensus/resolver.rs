//! Height-based consensus rule resolution
//!
//! A `RuleBook` freezes the per-network rule variants into a sequence sorted
//! by activation height. `resolve` answers "which rule set governs height h"
//! by returning the variant with the greatest effective height not exceeding
//! h - the newest rule set that has already activated.

use crate::consensus::params::{ConsensusParams, NEVER};
use thiserror::Error;

/// Fatal misconfiguration detected while freezing a rule book
///
/// These are startup-time configuration defects, reported distinctly from
/// runtime validation failures.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RuleBookError {
    #[error("no schedulable rule variants (all activation heights are sentinels)")]
    Empty,
    #[error("no base variant effective at height 0 (earliest activation is {0})")]
    NoBaseVariant(u32),
    #[error("duplicate activation height {0}")]
    DuplicateActivationHeight(u32),
}

/// Immutable, height-ordered set of consensus rule variants
#[derive(Debug, Clone)]
pub struct RuleBook {
    /// Variants sorted by strictly increasing effective_height
    eras: Vec<ConsensusParams>,
}

impl RuleBook {
    /// Freeze a set of rule variants into a resolvable book
    ///
    /// Variants with the NEVER sentinel height are unscheduled and dropped;
    /// the rest must contain a base variant effective at height 0 and carry
    /// no duplicate activation heights. Violations are fatal configuration
    /// defects.
    pub fn new(variants: Vec<ConsensusParams>) -> Result<Self, RuleBookError> {
        let mut eras: Vec<ConsensusParams> = variants
            .into_iter()
            .filter(|v| v.effective_height != NEVER)
            .collect();

        if eras.is_empty() {
            return Err(RuleBookError::Empty);
        }

        eras.sort_by_key(|v| v.effective_height);

        if eras[0].effective_height != 0 {
            return Err(RuleBookError::NoBaseVariant(eras[0].effective_height));
        }
        for pair in eras.windows(2) {
            if pair[0].effective_height == pair[1].effective_height {
                return Err(RuleBookError::DuplicateActivationHeight(pair[0].effective_height));
            }
        }

        log::debug!(
            "rule book frozen with {} eras at heights {:?}",
            eras.len(),
            eras.iter().map(|e| e.effective_height).collect::<Vec<_>>()
        );

        Ok(Self { eras })
    }

    /// Resolve the rule variant governing validation at `height`
    ///
    /// Total over all heights: a height before any scheduled fork resolves
    /// to the base variant, a height past the last fork to the newest one.
    pub fn resolve(&self, height: u32) -> &ConsensusParams {
        // Index of the first era activating above `height`; the one before
        // it is the newest era already active. The base era at height 0
        // guarantees the index is at least 1.
        let idx = self.eras.partition_point(|e| e.effective_height <= height);
        &self.eras[idx - 1]
    }

    /// The variants in activation order
    pub fn eras(&self) -> &[ConsensusParams] {
        &self.eras
    }

    /// The base variant (effective at height 0)
    pub fn base(&self) -> &ConsensusParams {
        &self.eras[0]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consensus::params::{Deployment, MAX_DEPLOYMENTS};

    fn variant(effective_height: u32) -> ConsensusParams {
        ConsensusParams {
            effective_height,
            pow_target_timespan: 24 * 60 * 60,
            pow_target_spacing: 60,
            allow_min_difficulty_blocks: false,
            no_retargeting: false,
            tempered_retarget: false,
            simplified_rewards: false,
            subsidy_halving_interval: 100_000,
            bip34_height: 0,
            bip65_height: 0,
            bip66_height: 0,
            csv_height: 0,
            segwit_height: 0,
            rule_change_activation_threshold: 9576,
            miner_confirmation_window: 10_080,
            deployments: [Deployment::never(28); MAX_DEPLOYMENTS],
            aux_pow_chain_id: 0x2020,
            strict_chain_id: true,
            aux_pow_start_height: 0,
        }
    }

    fn book(heights: &[u32]) -> RuleBook {
        RuleBook::new(heights.iter().map(|&h| variant(h)).collect()).unwrap()
    }

    #[test]
    fn test_resolve_boundaries() {
        let book = book(&[0, 100, 250]);

        assert_eq!(book.resolve(0).effective_height, 0);
        assert_eq!(book.resolve(99).effective_height, 0);
        assert_eq!(book.resolve(100).effective_height, 100);
        assert_eq!(book.resolve(249).effective_height, 100);
        assert_eq!(book.resolve(250).effective_height, 250);
        assert_eq!(book.resolve(10_000_000).effective_height, 250);

        assert!(std::ptr::eq(book.base(), book.resolve(0)));
    }

    #[test]
    fn test_resolve_is_stable_within_an_era() {
        let book = book(&[0, 100, 250]);
        // Same era => same variant object
        assert!(std::ptr::eq(book.resolve(100), book.resolve(249)));
        assert!(std::ptr::eq(book.resolve(0), book.resolve(99)));
    }

    #[test]
    fn test_unsorted_input_is_accepted() {
        let book = RuleBook::new(vec![variant(250), variant(0), variant(100)]).unwrap();
        assert_eq!(book.resolve(120).effective_height, 100);
    }

    #[test]
    fn test_never_variants_are_dropped() {
        let book = RuleBook::new(vec![variant(0), variant(NEVER)]).unwrap();
        assert_eq!(book.eras().len(), 1);
        assert_eq!(book.resolve(u32::MAX - 1).effective_height, 0);
    }

    #[test]
    fn test_empty_book_rejected() {
        assert_eq!(RuleBook::new(vec![]).unwrap_err(), RuleBookError::Empty);
        assert_eq!(
            RuleBook::new(vec![variant(NEVER)]).unwrap_err(),
            RuleBookError::Empty
        );
    }

    #[test]
    fn test_missing_base_variant_rejected() {
        assert_eq!(
            RuleBook::new(vec![variant(10)]).unwrap_err(),
            RuleBookError::NoBaseVariant(10)
        );
    }

    #[test]
    fn test_duplicate_heights_rejected() {
        assert_eq!(
            RuleBook::new(vec![variant(0), variant(100), variant(100)]).unwrap_err(),
            RuleBookError::DuplicateActivationHeight(100)
        );
    }
}
