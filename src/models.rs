// src/models.rs

use crate::errors::{ChainwatchError, ChainwatchResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One block of the ledger. Immutable once observed.
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub index: u64,
    /// Opaque, shown exactly as the ledger sent it.
    pub timestamp: Value,
    /// Every key that is not one of the structural fields, in the order received.
    pub payload: Vec<(String, Value)>,
    pub previous_hash: String,
    pub hash: String,
}

impl Block {
    /// Builds a block from one JSON object of the `chain` array.
    ///
    /// `index`, `hash` and `previous_hash` (or `previousHash`) are required. A missing
    /// `timestamp` is kept as `null`.
    pub fn from_json(fields: Map<String, Value>) -> ChainwatchResult<Self> {
        let mut index = None;
        let mut timestamp = Value::Null;
        let mut previous_hash = None;
        let mut hash = None;
        let mut payload = Vec::new();

        for (key, value) in fields {
            match key.as_str() {
                "index" => {
                    index = Some(value.as_u64().ok_or_else(|| {
                        ChainwatchError::malformed(format!(
                            "index is not a non-negative integer: {value}"
                        ))
                    })?);
                }
                "timestamp" => timestamp = value,
                "previous_hash" | "previousHash" => {
                    previous_hash = Some(expect_string(&key, value)?)
                }
                "hash" => hash = Some(expect_string(&key, value)?),
                _ => payload.push((key, value)),
            }
        }

        let index = index.ok_or_else(|| ChainwatchError::malformed("block without index"))?;
        Ok(Block {
            index,
            timestamp,
            payload,
            previous_hash: previous_hash.ok_or_else(|| {
                ChainwatchError::malformed(format!("block #{index} without previous_hash"))
            })?,
            hash: hash
                .ok_or_else(|| ChainwatchError::malformed(format!("block #{index} without hash")))?,
        })
    }

    pub fn is_genesis(&self) -> bool {
        self.index == 0
    }
}

fn expect_string(key: &str, value: Value) -> ChainwatchResult<String> {
    match value {
        Value::String(s) => Ok(s),
        other => Err(ChainwatchError::malformed(format!(
            "{key} is not a string: {other}"
        ))),
    }
}

#[derive(Debug, Deserialize)]
struct RawSnapshot {
    length: usize,
    chain: Vec<Map<String, Value>>,
}

/// The full chain as returned by one poll.
#[derive(Debug, Clone, PartialEq)]
pub struct ChainSnapshot {
    /// What the ledger claims the length is.
    /// Not trusted until [`is_consistent`](Self::is_consistent).
    pub length: usize,
    pub chain: Vec<Block>,
}

impl ChainSnapshot {
    pub fn from_slice(body: &[u8]) -> ChainwatchResult<Self> {
        let raw: RawSnapshot = serde_json::from_slice(body)?;
        let chain = raw
            .chain
            .into_iter()
            .map(Block::from_json)
            .collect::<ChainwatchResult<Vec<_>>>()?;
        Ok(ChainSnapshot {
            length: raw.length,
            chain,
        })
    }

    pub fn from_blocks(chain: Vec<Block>) -> Self {
        ChainSnapshot {
            length: chain.len(),
            chain,
        }
    }

    pub fn len(&self) -> usize {
        self.chain.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chain.is_empty()
    }

    /// `chain` holds exactly `length` blocks and block `i` carries index `i`.
    pub fn is_consistent(&self) -> bool {
        self.chain.len() == self.length
            && self
                .chain
                .iter()
                .enumerate()
                .all(|(i, block)| block.index == i as u64)
    }
}

/// Diagnostic record of a single poll.
#[derive(Debug, Clone, Serialize)]
pub struct PollLog {
    pub timestamp: DateTime<Utc>,
    pub endpoint: String,
    pub summary: String,
    pub response_status: Option<u16>,
    pub response_time_ms: u128,
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;
    use serde_json::json;

    /// A chain linked the way the ledger links it: block `i` points at the hash of `i - 1`.
    pub fn chain(len: usize) -> Vec<Block> {
        (0..len as u64).map(block).collect()
    }

    pub fn block(index: u64) -> Block {
        let (voter, candidate) = if index == 0 {
            ("GENESIS".to_string(), "System Initialization".to_string())
        } else {
            (format!("voter-{index:04}"), format!("c{}", index % 3 + 1))
        };
        Block {
            index,
            timestamp: json!(1_718_000_000.5 + index as f64),
            payload: vec![
                ("voter_id".to_string(), json!(voter)),
                ("candidate".to_string(), json!(candidate)),
            ],
            previous_hash: if index == 0 {
                "0".to_string()
            } else {
                hash_of(index - 1)
            },
            hash: hash_of(index),
        }
    }

    pub fn hash_of(index: u64) -> String {
        format!("{:064x}", index.wrapping_mul(0x9e37_79b9_7f4a_7c15) ^ 0xabcdef)
    }
}
