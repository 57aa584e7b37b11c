//! Recent blockhash (or durable nonce value) carried by a message.

use crate::error::WasmSolanaError;
use crate::pubkey::decode_base58_32;
use std::fmt;
use std::str::FromStr;

pub const HASH_BYTES: usize = 32;

#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Hash([u8; HASH_BYTES]);

impl Hash {
    pub const fn new_from_array(bytes: [u8; HASH_BYTES]) -> Self {
        Hash(bytes)
    }

    pub fn from_base58(text: &str) -> Result<Hash, WasmSolanaError> {
        Ok(Hash(decode_base58_32(text)?))
    }

    pub fn to_bytes(&self) -> [u8; HASH_BYTES] {
        self.0
    }

    pub fn as_bytes(&self) -> &[u8; HASH_BYTES] {
        &self.0
    }
}

impl From<[u8; HASH_BYTES]> for Hash {
    fn from(bytes: [u8; HASH_BYTES]) -> Self {
        Hash(bytes)
    }
}

impl FromStr for Hash {
    type Err = WasmSolanaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Hash::from_base58(s)
    }
}

impl fmt::Display for Hash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&bs58::encode(self.0).into_string())
    }
}

impl fmt::Debug for Hash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Hash({})", self)
    }
}
