use crate::constants::{GENESIS_PREVIOUS_HASH, HASH_SIZE};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

pub type Digest = [u8; HASH_SIZE];

/// A single record of the chain.
///
/// `data` and `timestamp` are fixed at construction. `nonce` and `hash` are
/// only written by the miner, and `previous_hash` only when a chain links the
/// block to its tail, so from outside this crate a block is read-only.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    #[serde(with = "hex_bytes")]
    pub(crate) data: Vec<u8>,
    pub(crate) nonce: u64,
    #[serde(with = "hex_bytes")]
    pub(crate) previous_hash: Vec<u8>,
    /// Nanoseconds since the Unix epoch.
    pub(crate) timestamp: u64,
    #[serde(with = "hex_digest", default)]
    pub(crate) hash: Option<Digest>,
}

impl Block {
    /// An unmined block stamped with the current time.
    pub fn new(data: impl Into<Vec<u8>>) -> Self {
        Self::with_timestamp(data, now_nanos())
    }

    pub fn with_timestamp(data: impl Into<Vec<u8>>, timestamp: u64) -> Self {
        Self {
            data: data.into(),
            nonce: 0,
            previous_hash: GENESIS_PREVIOUS_HASH.to_vec(),
            timestamp,
            hash: None,
        }
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn nonce(&self) -> u64 {
        self.nonce
    }

    pub fn previous_hash(&self) -> &[u8] {
        &self.previous_hash
    }

    pub fn timestamp(&self) -> u64 {
        self.timestamp
    }

    /// The stored hash, `None` until the block has been mined.
    pub fn hash(&self) -> Option<&Digest> {
        self.hash.as_ref()
    }

    pub fn is_mined(&self) -> bool {
        self.hash.is_some()
    }
}

impl fmt::Display for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hash = self.hash.map(hex::encode).unwrap_or_default();
        write!(
            f,
            "{}:\n{}\n {} {}",
            hash,
            hex::encode(&self.previous_hash),
            self.nonce,
            self.timestamp
        )
    }
}

fn now_nanos() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| u64::try_from(elapsed.as_nanos()).unwrap_or(u64::MAX))
        .unwrap_or_default()
}

mod hex_bytes {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&hex::encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let encoded = String::deserialize(deserializer)?;
        hex::decode(encoded).map_err(serde::de::Error::custom)
    }
}

mod hex_digest {
    use super::Digest;
    use crate::constants::HASH_SIZE;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(digest: &Option<Digest>, serializer: S) -> Result<S::Ok, S::Error> {
        match digest {
            Some(digest) => serializer.serialize_some(&hex::encode(digest)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<Digest>, D::Error> {
        let Some(encoded) = Option::<String>::deserialize(deserializer)? else {
            return Ok(None);
        };
        let mut digest = [0u8; HASH_SIZE];
        hex::decode_to_slice(encoded, &mut digest).map_err(serde::de::Error::custom)?;
        Ok(Some(digest))
    }
}
