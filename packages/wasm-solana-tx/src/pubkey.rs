//! Solana public key (address) implementation.
//!
//! A `Pubkey` is an immutable 32-byte identity. Equality and hashing are
//! structural, so a `Pubkey` can be used directly as a deduplication key
//! during message compilation.

use crate::error::WasmSolanaError;
use ed25519_dalek::VerifyingKey;
use std::fmt;
use std::str::FromStr;

/// Number of bytes in a public key.
pub const PUBKEY_BYTES: usize = 32;

/// Longest base58 text that can encode 32 bytes.
const MAX_BASE58_LEN: usize = 44;

#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Pubkey([u8; PUBKEY_BYTES]);

impl Pubkey {
    /// The all-zero identity (also the System Program address).
    pub const DEFAULT: Pubkey = Pubkey([0u8; PUBKEY_BYTES]);

    pub const fn new_from_array(bytes: [u8; PUBKEY_BYTES]) -> Self {
        Pubkey(bytes)
    }

    /// Create a Pubkey from a base58 string.
    pub fn from_base58(address: &str) -> Result<Pubkey, WasmSolanaError> {
        Ok(Pubkey(decode_base58_32(address)?))
    }

    /// Create a Pubkey from a byte slice with length validation.
    pub fn from_bytes_checked(bytes: &[u8]) -> Result<Pubkey, WasmSolanaError> {
        let array: [u8; PUBKEY_BYTES] =
            bytes
                .try_into()
                .map_err(|_| WasmSolanaError::InvalidLength {
                    expected: PUBKEY_BYTES,
                    actual: bytes.len(),
                })?;
        Ok(Pubkey(array))
    }

    pub fn to_base58(&self) -> String {
        bs58::encode(self.0).into_string()
    }

    pub fn to_bytes(&self) -> [u8; PUBKEY_BYTES] {
        self.0
    }

    pub fn as_bytes(&self) -> &[u8; PUBKEY_BYTES] {
        &self.0
    }

    /// Check whether the bytes decompress to a point on the Ed25519 curve.
    pub fn is_on_curve(&self) -> bool {
        VerifyingKey::from_bytes(&self.0).is_ok()
    }
}

/// Decode base58 text that must carry exactly 32 bytes.
pub(crate) fn decode_base58_32(text: &str) -> Result<[u8; 32], WasmSolanaError> {
    if text.len() > MAX_BASE58_LEN {
        return Err(WasmSolanaError::InvalidEncoding(format!(
            "string too long for a 32-byte value: {} characters",
            text.len()
        )));
    }
    let bytes = bs58::decode(text)
        .into_vec()
        .map_err(|e| WasmSolanaError::InvalidEncoding(e.to_string()))?;
    bytes
        .as_slice()
        .try_into()
        .map_err(|_| WasmSolanaError::InvalidLength {
            expected: 32,
            actual: bytes.len(),
        })
}

impl From<[u8; PUBKEY_BYTES]> for Pubkey {
    fn from(bytes: [u8; PUBKEY_BYTES]) -> Self {
        Pubkey(bytes)
    }
}

impl AsRef<[u8]> for Pubkey {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl FromStr for Pubkey {
    type Err = WasmSolanaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Pubkey::from_base58(s)
    }
}

impl fmt::Display for Pubkey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_base58())
    }
}

impl fmt::Debug for Pubkey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Pubkey({})", self.to_base58())
    }
}
