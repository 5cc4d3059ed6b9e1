//! Merge-mining proof payload
//!
//! An AuxPow ties a CIN block to work performed on a parent chain: the
//! parent's coinbase commits to this block, and the branches prove the
//! coinbase's place in the parent block. This core only carries the payload;
//! cryptographic verification of the linkage belongs to the merge-mining
//! verifier, which receives the child's pow_hash together with this object.

use crate::consensus::BlockHeader;
use crate::crypto::Hash;
use crate::validation::Transaction;
use serde::{Deserialize, Serialize};

/// Merge-mining (aux proof-of-work) payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuxPow {
    /// Parent chain coinbase transaction carrying the commitment
    pub coinbase_tx: Transaction,
    /// Merkle branch linking the coinbase into the parent block
    pub coinbase_branch: Vec<Hash>,
    /// Position of the coinbase in the parent merkle tree
    pub coinbase_index: u32,
    /// Merkle branch linking this chain into the aux chain tree
    pub chain_branch: Vec<Hash>,
    /// Position of this chain in the aux chain tree
    pub chain_index: u32,
    /// Parent chain block header the work was performed on
    pub parent_header: BlockHeader,
}

impl AuxPow {
    /// Create a new merge-mining payload
    pub fn new(
        coinbase_tx: Transaction,
        coinbase_branch: Vec<Hash>,
        coinbase_index: u32,
        chain_branch: Vec<Hash>,
        chain_index: u32,
        parent_header: BlockHeader,
    ) -> Self {
        Self {
            coinbase_tx,
            coinbase_branch,
            coinbase_index,
            chain_branch,
            chain_index,
            parent_header,
        }
    }

    /// Proof-of-work hash of the parent header
    ///
    /// The difficulty check for a merge-mined block runs against the
    /// parent's work, not the child's.
    pub fn parent_pow_hash(&self) -> Hash {
        self.parent_header.pow_hash()
    }

    /// Chain id encoded in the parent header version, for strict-chain-id
    /// networks
    pub fn parent_chain_id(&self) -> u32 {
        self.parent_header.version >> 16
    }
}
