//! Transaction structure
//!
//! Minimal UTXO-style transactions. Script execution and signature checking
//! are the responsibility of an external validation engine; this core only
//! needs output values for fee/dust policy and the extension-block
//! commitment marker for block classification.

use crate::crypto::{sha256d, Hash};
use serde::{Deserialize, Serialize};

/// A transaction input referencing a previous output
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxInput {
    /// Hash of the transaction containing the output
    pub prev_tx_hash: Hash,
    /// Index of the output in that transaction
    pub output_index: u32,
}

/// A transaction output
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxOutput {
    /// Amount in base units
    pub value: u64,
    /// Locking script
    pub script_pubkey: Vec<u8>,
}

/// A complete transaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// Transaction version
    pub version: u32,
    /// Transaction inputs
    pub inputs: Vec<TxInput>,
    /// Transaction outputs
    pub outputs: Vec<TxOutput>,
    /// Lock time (block height or timestamp)
    pub lock_time: u32,
    /// Marks the designated final extension-block commitment transaction
    pub hog_ex: bool,
}

impl Transaction {
    /// Create a new transaction
    pub fn new(inputs: Vec<TxInput>, outputs: Vec<TxOutput>) -> Self {
        Self {
            version: 1,
            inputs,
            outputs,
            lock_time: 0,
            hog_ex: false,
        }
    }

    /// Create a coinbase transaction (mining reward)
    pub fn coinbase(reward: u64, script_pubkey: Vec<u8>) -> Self {
        Self {
            version: 1,
            inputs: vec![TxInput {
                prev_tx_hash: Hash::zero(),
                output_index: 0xFFFFFFFF,
            }],
            outputs: vec![TxOutput {
                value: reward,
                script_pubkey,
            }],
            lock_time: 0,
            hog_ex: false,
        }
    }

    /// Check if this is a coinbase transaction
    pub fn is_coinbase(&self) -> bool {
        self.inputs.len() == 1
            && self.inputs[0].prev_tx_hash == Hash::zero()
            && self.inputs[0].output_index == 0xFFFFFFFF
    }

    /// Calculate transaction hash
    pub fn hash(&self) -> Hash {
        sha256d(&self.to_bytes())
    }

    /// Calculate total output value
    pub fn total_output_value(&self) -> u64 {
        self.outputs.iter().map(|o| o.value).sum()
    }

    fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(&self.version.to_le_bytes());
        bytes.extend_from_slice(&(self.inputs.len() as u32).to_le_bytes());
        for input in &self.inputs {
            bytes.extend_from_slice(&input.prev_tx_hash.0);
            bytes.extend_from_slice(&input.output_index.to_le_bytes());
        }
        bytes.extend_from_slice(&(self.outputs.len() as u32).to_le_bytes());
        for output in &self.outputs {
            bytes.extend_from_slice(&output.value.to_le_bytes());
            bytes.extend_from_slice(&(output.script_pubkey.len() as u32).to_le_bytes());
            bytes.extend_from_slice(&output.script_pubkey);
        }
        bytes.extend_from_slice(&self.lock_time.to_le_bytes());
        bytes.push(self.hog_ex as u8);
        bytes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coinbase_detection() {
        let coinbase = Transaction::coinbase(5000, vec![]);
        assert!(coinbase.is_coinbase());

        let regular = Transaction::new(vec![], vec![]);
        assert!(!regular.is_coinbase());
    }

    #[test]
    fn test_transaction_hash_deterministic() {
        let tx = Transaction::coinbase(5000, vec![0x51]);
        assert_eq!(tx.hash(), tx.hash());
    }

    #[test]
    fn test_hog_ex_flag_changes_hash() {
        let tx = Transaction::new(vec![], vec![]);
        let mut flagged = tx.clone();
        flagged.hog_ex = true;
        assert_ne!(tx.hash(), flagged.hash());
    }

    #[test]
    fn test_output_value_calculation() {
        let tx = Transaction::new(
            vec![],
            vec![
                TxOutput { value: 100, script_pubkey: vec![] },
                TxOutput { value: 200, script_pubkey: vec![] },
            ],
        );
        assert_eq!(tx.total_output_value(), 300);
    }
}
