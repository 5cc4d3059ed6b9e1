//! Block structure for the CIN chain
//!
//! The block hash is the hash of the 80-byte header only. A merge-mining
//! proof is extra data riding alongside the header, not part of the block's
//! identity: block N+1's prev_hash must equal the identity hash of block N's
//! 80-byte header whether or not a proof is attached, otherwise the hash
//! chain breaks and sync fails.

use crate::consensus::AuxPow;
use crate::crypto::{pow_digest, sha256d, Hash};
use crate::validation::Transaction;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Serialized size of the canonical header
pub const HEADER_SIZE: usize = 80;

/// Block header - exactly the six canonical fields
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct BlockHeader {
    /// Protocol version
    pub version: u32,
    /// Identity hash of the previous block
    pub prev_hash: Hash,
    /// Merkle root of all transactions
    pub merkle_root: Hash,
    /// Block timestamp (seconds since Unix epoch)
    pub time: u32,
    /// Difficulty target (compact representation)
    pub bits: u32,
    /// Nonce used for PoW
    pub nonce: u32,
}

impl BlockHeader {
    /// Create a new block header
    pub fn new(
        version: u32,
        prev_hash: Hash,
        merkle_root: Hash,
        time: u32,
        bits: u32,
        nonce: u32,
    ) -> Self {
        Self {
            version,
            prev_hash,
            merkle_root,
            time,
            bits,
            nonce,
        }
    }

    /// Serialize the canonical 80-byte header
    pub fn to_bytes(&self) -> [u8; HEADER_SIZE] {
        let mut bytes = [0u8; HEADER_SIZE];
        bytes[0..4].copy_from_slice(&self.version.to_le_bytes());
        bytes[4..36].copy_from_slice(&self.prev_hash.0);
        bytes[36..68].copy_from_slice(&self.merkle_root.0);
        bytes[68..72].copy_from_slice(&self.time.to_le_bytes());
        bytes[72..76].copy_from_slice(&self.bits.to_le_bytes());
        bytes[76..80].copy_from_slice(&self.nonce.to_le_bytes());
        bytes
    }

    /// Chain identity hash: what downstream blocks reference as prev_hash
    pub fn identity_hash(&self) -> Hash {
        sha256d(&self.to_bytes())
    }

    /// Proof-of-work hash: compared against the target encoded in `bits`
    pub fn pow_hash(&self) -> Hash {
        pow_digest(&self.to_bytes())
    }
}

/// A complete block: header, transactions, and an optional merge-mining proof
///
/// The proof is carried outside the header so the type system keeps it out
/// of both hashes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Block {
    /// Block header
    pub header: BlockHeader,
    /// Merge-mining proof, if this block was merge-mined
    pub aux_pow: Option<AuxPow>,
    /// List of transactions in this block
    pub transactions: Vec<Transaction>,
}

impl Block {
    /// Create a new block without a merge-mining proof
    pub fn new(header: BlockHeader, transactions: Vec<Transaction>) -> Self {
        Self {
            header,
            aux_pow: None,
            transactions,
        }
    }

    /// Attach a merge-mining proof. Identity and PoW hashes are unaffected.
    pub fn with_aux_pow(mut self, aux_pow: AuxPow) -> Self {
        self.aux_pow = Some(aux_pow);
        self
    }

    /// Get the block identity hash
    pub fn hash(&self) -> Hash {
        self.header.identity_hash()
    }

    /// Get the previous block reference
    pub fn prev_hash(&self) -> &Hash {
        &self.header.prev_hash
    }

    /// Check if this is the genesis block
    pub fn is_genesis(&self) -> bool {
        self.header.prev_hash == Hash::zero()
    }

    /// Return the final extension-block commitment transaction, if present
    ///
    /// Present only when the block has at least two transactions and the
    /// last one is flagged as the commitment and carries at least one
    /// output. Pure classification, not validation.
    pub fn hog_ex(&self) -> Option<&Transaction> {
        match self.transactions.last() {
            Some(last) if self.transactions.len() >= 2 && last.hog_ex && !last.outputs.is_empty() => {
                Some(last)
            }
            _ => None,
        }
    }
}

impl fmt::Display for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Block(hash={}, ver=0x{:08x}, prev={}, merkle={}, time={}, bits={:08x}, nonce={}, ntx={}, auxpow={})",
            self.hash(),
            self.header.version,
            self.header.prev_hash,
            self.header.merkle_root,
            self.header.time,
            self.header.bits,
            self.header.nonce,
            self.transactions.len(),
            self.aux_pow.is_some(),
        )
    }
}
