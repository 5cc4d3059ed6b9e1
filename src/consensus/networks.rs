//! Network profiles
//!
//! Hand-authored rule-variant tables for each supported chain. A profile is
//! assembled, optionally re-wired by deployment overrides, then frozen into
//! an immutable `NetworkParams` before any validation work starts. After the
//! freeze nothing here is mutable; pass the profile by reference to every
//! validation call site.

use crate::consensus::overrides::{DeploymentOverride, OverrideError};
use crate::consensus::params::{ConsensusParams, Deployment, DeploymentId, MAX_DEPLOYMENTS, NEVER};
use crate::consensus::resolver::{RuleBook, RuleBookError};
use thiserror::Error;

/// Supported chains
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Network {
    Main,
    Test,
    Regtest,
}

impl Network {
    /// Network name as used on the command line and in data directories
    pub fn name(&self) -> &'static str {
        match self {
            Network::Main => "main",
            Network::Test => "test",
            Network::Regtest => "regtest",
        }
    }

    /// Look a network up by name
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "main" => Some(Network::Main),
            "test" => Some(Network::Test),
            "regtest" => Some(Network::Regtest),
            _ => None,
        }
    }
}

/// Startup failure while assembling a network profile
#[derive(Debug, Error, PartialEq, Eq)]
pub enum NetworkConfigError {
    #[error(transparent)]
    Override(#[from] OverrideError),
    #[error(transparent)]
    Rules(#[from] RuleBookError),
}

/// A frozen network profile: the chain identifier plus its rule book
#[derive(Debug, Clone)]
pub struct NetworkParams {
    pub network: Network,
    pub rules: RuleBook,
}

impl NetworkParams {
    /// Assemble and freeze the profile for a network
    pub fn new(network: Network) -> Result<Self, RuleBookError> {
        Ok(Self {
            network,
            rules: RuleBook::new(variants_for(network))?,
        })
    }

    /// Assemble a profile, applying deployment overrides before the freeze
    ///
    /// Overrides re-wire the named deployment on every rule variant, the
    /// same thresholds in every era. Any malformed override aborts startup.
    pub fn with_overrides(
        network: Network,
        overrides: &[String],
    ) -> Result<Self, NetworkConfigError> {
        let mut variants = variants_for(network);
        for s in overrides {
            let parsed = DeploymentOverride::parse(s)?;
            for v in &mut variants {
                parsed.apply(v);
            }
        }
        Ok(Self {
            network,
            rules: RuleBook::new(variants)?,
        })
    }

    /// Resolve the rule variant governing validation at `height`
    pub fn resolve(&self, height: u32) -> &ConsensusParams {
        self.rules.resolve(height)
    }
}

/// Height at which merge mining opens on mainnet
const MAIN_AUX_POW_HEIGHT: u32 = 173_000;

/// Height at which the tempered retarget takes over on mainnet
const MAIN_TEMPERED_HEIGHT: u32 = 145_000;

fn main_variants() -> Vec<ConsensusParams> {
    let base = ConsensusParams {
        effective_height: 0,
        pow_target_timespan: 24 * 60 * 60, // 1 day
        pow_target_spacing: 60,            // 1 minute
        allow_min_difficulty_blocks: false,
        no_retargeting: false,
        tempered_retarget: false,
        simplified_rewards: false,
        subsidy_halving_interval: 100_000,
        bip34_height: 8_460,
        bip65_height: 8_460,
        bip66_height: 8_460,
        csv_height: 700_000,
        segwit_height: 700_000,
        rule_change_activation_threshold: 9_576, // 95% of 10,080
        miner_confirmation_window: 10_080,       // one week of 1-minute blocks
        deployments: main_deployments(),
        aux_pow_chain_id: 0x2020,
        strict_chain_id: true,
        aux_pow_start_height: MAIN_AUX_POW_HEIGHT,
    };

    // Per-block tempered retarget, simplified reward schedule
    let mut tempered = base.clone();
    tempered.effective_height = MAIN_TEMPERED_HEIGHT;
    tempered.tempered_retarget = true;
    tempered.simplified_rewards = true;
    tempered.pow_target_timespan = 60; // retarget every block

    // Min-difficulty recovery is not scheduled on mainnet
    let mut min_difficulty = tempered.clone();
    min_difficulty.effective_height = NEVER;
    min_difficulty.allow_min_difficulty_blocks = true;

    let mut aux_pow = tempered.clone();
    aux_pow.effective_height = MAIN_AUX_POW_HEIGHT;

    vec![base, tempered, min_difficulty, aux_pow]
}

fn main_deployments() -> [Deployment; MAX_DEPLOYMENTS] {
    let mut d = [Deployment::never(28); MAX_DEPLOYMENTS];
    d[DeploymentId::Taproot.index()] = Deployment::at_heights(2, 800_000, 1_000_000);
    d[DeploymentId::ExtBlock.index()] = Deployment::at_heights(4, 900_000, 1_100_000);
    d
}

fn test_variants() -> Vec<ConsensusParams> {
    let base = ConsensusParams {
        effective_height: 0,
        pow_target_timespan: 24 * 60 * 60,
        pow_target_spacing: 60,
        allow_min_difficulty_blocks: true,
        no_retargeting: false,
        tempered_retarget: false,
        simplified_rewards: false,
        subsidy_halving_interval: 100_000,
        bip34_height: 76,
        bip65_height: 76,
        bip66_height: 76,
        csv_height: 6_048,
        segwit_height: 6_048,
        rule_change_activation_threshold: 1_080, // 75% of 1,440
        miner_confirmation_window: 1_440,        // one day of 1-minute blocks
        deployments: test_deployments(),
        aux_pow_chain_id: 0x2020,
        strict_chain_id: false,
        aux_pow_start_height: 17_300,
    };

    // The tempered formula recovers from hash-rate drops on its own, so the
    // blanket min-difficulty allowance ends here...
    let mut tempered = base.clone();
    tempered.effective_height = 2_108;
    tempered.tempered_retarget = true;
    tempered.simplified_rewards = true;
    tempered.pow_target_timespan = 60;
    tempered.allow_min_difficulty_blocks = false;

    // ...and is restored later once abandoned testnet difficulty spikes
    // proved it necessary after all.
    let mut min_difficulty = tempered.clone();
    min_difficulty.effective_height = 15_750;
    min_difficulty.allow_min_difficulty_blocks = true;

    let mut aux_pow = min_difficulty.clone();
    aux_pow.effective_height = 17_300;

    vec![base, tempered, min_difficulty, aux_pow]
}

fn test_deployments() -> [Deployment; MAX_DEPLOYMENTS] {
    let mut d = [Deployment::never(28); MAX_DEPLOYMENTS];
    d[DeploymentId::Taproot.index()] = Deployment::at_heights(2, 24_000, 48_000);
    d[DeploymentId::ExtBlock.index()] = Deployment::at_heights(4, 36_000, 60_000);
    d
}

fn regtest_variants() -> Vec<ConsensusParams> {
    let mut deployments = [Deployment::never(28); MAX_DEPLOYMENTS];
    deployments[DeploymentId::TestDummy.index()] = Deployment {
        bit: 28,
        start_time: 0,
        timeout: Deployment::NO_TIMEOUT,
        start_height: 0,
        timeout_height: Deployment::NO_TIMEOUT,
    };
    deployments[DeploymentId::Taproot.index()] = Deployment {
        bit: 2,
        start_time: Deployment::ALWAYS_ACTIVE,
        timeout: Deployment::NO_TIMEOUT,
        start_height: 0,
        timeout_height: Deployment::NO_TIMEOUT,
    };
    deployments[DeploymentId::ExtBlock.index()] = Deployment {
        bit: 4,
        start_time: 0,
        timeout: Deployment::NO_TIMEOUT,
        start_height: 0,
        timeout_height: Deployment::NO_TIMEOUT,
    };

    vec![ConsensusParams {
        effective_height: 0,
        pow_target_timespan: 24 * 60 * 60,
        pow_target_spacing: 60,
        allow_min_difficulty_blocks: true,
        no_retargeting: true,
        tempered_retarget: false,
        simplified_rewards: true,
        subsidy_halving_interval: 150,
        bip34_height: 500,
        bip65_height: 1_351,
        bip66_height: 1_251,
        csv_height: 432,
        segwit_height: 0,
        rule_change_activation_threshold: 108, // 75% of 144
        miner_confirmation_window: 144,
        deployments,
        aux_pow_chain_id: 0x2020,
        strict_chain_id: false,
        aux_pow_start_height: 0,
    }]
}

fn variants_for(network: Network) -> Vec<ConsensusParams> {
    match network {
        Network::Main => main_variants(),
        Network::Test => test_variants(),
        Network::Regtest => regtest_variants(),
    }
}
