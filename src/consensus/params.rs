//! Consensus rule variants
//!
//! A `ConsensusParams` bundle holds every constant validation needs for one
//! era of the chain, tagged with the height at which the era begins. Bundles
//! are hand-authored per network at startup, frozen into a `RuleBook`, and
//! never mutated afterwards.

use serde::{Deserialize, Serialize};

/// Sentinel activation height meaning "not yet activated"
pub const NEVER: u32 = u32::MAX;

/// Version-bit deployments known to this chain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeploymentId {
    /// Dummy deployment used by tests and overrides
    TestDummy,
    /// Schnorr/Taproot script upgrade
    Taproot,
    /// Extension-block commitment (hog-ex) upgrade
    ExtBlock,
}

/// Number of deployment slots carried per rule variant
pub const MAX_DEPLOYMENTS: usize = 3;

impl DeploymentId {
    /// All deployments, in slot order
    pub const ALL: [DeploymentId; MAX_DEPLOYMENTS] =
        [DeploymentId::TestDummy, DeploymentId::Taproot, DeploymentId::ExtBlock];

    /// Wire/CLI name of the deployment
    pub fn name(&self) -> &'static str {
        match self {
            DeploymentId::TestDummy => "testdummy",
            DeploymentId::Taproot => "taproot",
            DeploymentId::ExtBlock => "extblock",
        }
    }

    /// Look a deployment up by its wire/CLI name
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|d| d.name() == name)
    }

    /// Slot index in the per-variant deployment array
    pub fn index(&self) -> usize {
        match self {
            DeploymentId::TestDummy => 0,
            DeploymentId::Taproot => 1,
            DeploymentId::ExtBlock => 2,
        }
    }
}

/// One version-bit deployment's activation thresholds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deployment {
    /// Bit position in the block version signalling this deployment
    pub bit: u8,
    /// Earliest start time (Unix seconds), or a sentinel below
    pub start_time: i64,
    /// Timeout time (Unix seconds), or NO_TIMEOUT
    pub timeout: i64,
    /// Earliest start height; 0 when unused
    pub start_height: i64,
    /// Timeout height, or NO_TIMEOUT
    pub timeout_height: i64,
}

impl Deployment {
    /// Deployment never activates
    pub const NEVER_ACTIVE: i64 = -2;
    /// Deployment is active from genesis
    pub const ALWAYS_ACTIVE: i64 = -1;
    /// Deployment never times out
    pub const NO_TIMEOUT: i64 = i64::MAX;

    /// A deployment that is not scheduled
    pub const fn never(bit: u8) -> Self {
        Self {
            bit,
            start_time: Self::NEVER_ACTIVE,
            timeout: Self::NO_TIMEOUT,
            start_height: 0,
            timeout_height: Self::NO_TIMEOUT,
        }
    }

    /// A deployment scheduled over a height window
    pub const fn at_heights(bit: u8, start_height: i64, timeout_height: i64) -> Self {
        Self {
            bit,
            start_time: Self::ALWAYS_ACTIVE,
            timeout: Self::NO_TIMEOUT,
            start_height,
            timeout_height,
        }
    }
}

/// An immutable bundle of consensus constants, effective from a given height
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsensusParams {
    /// Height at which this variant becomes active (NEVER = not scheduled)
    pub effective_height: u32,

    // Difficulty retargeting
    /// Retarget window in seconds
    pub pow_target_timespan: u64,
    /// Target block spacing in seconds
    pub pow_target_spacing: u64,
    /// Allow min-difficulty blocks after a spacing gap (test networks)
    pub allow_min_difficulty_blocks: bool,
    /// Skip retargeting entirely (regression testing)
    pub no_retargeting: bool,
    /// Use the per-block tempered retarget formula instead of the
    /// interval-based one
    pub tempered_retarget: bool,

    // Reward schedule
    /// Use the simplified (deterministic) reward schedule
    pub simplified_rewards: bool,
    /// Blocks between subsidy halvings
    pub subsidy_halving_interval: u32,

    // Fixed-height soft forks
    /// Height from which coinbase must commit the block height (BIP34)
    pub bip34_height: u32,
    /// Height from which OP_CHECKLOCKTIMEVERIFY is enforced (BIP65)
    pub bip65_height: u32,
    /// Height from which strict DER signatures are enforced (BIP66)
    pub bip66_height: u32,
    /// Height from which CSV (BIP68/112/113) is enforced
    pub csv_height: u32,
    /// Height from which segregated witness rules apply
    pub segwit_height: u32,

    // Version-bit deployments
    /// Signalling threshold within a confirmation window
    pub rule_change_activation_threshold: u32,
    /// Miner confirmation window in blocks
    pub miner_confirmation_window: u32,
    /// Per-deployment activation thresholds, indexed by DeploymentId
    pub deployments: [Deployment; MAX_DEPLOYMENTS],

    // Merge mining
    /// Chain id expected in merge-mined parent headers
    pub aux_pow_chain_id: u32,
    /// Reject parent blocks carrying a foreign chain id
    pub strict_chain_id: bool,
    /// Height from which merge-mined blocks are accepted
    pub aux_pow_start_height: u32,
}

impl ConsensusParams {
    /// Number of blocks in a difficulty retarget interval
    pub fn retarget_interval(&self) -> u64 {
        self.pow_target_timespan / self.pow_target_spacing
    }

    /// Whether merge-mined blocks are accepted at the given height
    pub fn aux_pow_active(&self, height: u32) -> bool {
        height >= self.aux_pow_start_height
    }

    /// Access a deployment slot
    pub fn deployment(&self, id: DeploymentId) -> &Deployment {
        &self.deployments[id.index()]
    }

    /// Mutable access to a deployment slot; used only while a network
    /// profile is still being assembled
    pub(crate) fn deployment_mut(&mut self, id: DeploymentId) -> &mut Deployment {
        &mut self.deployments[id.index()]
    }
}
