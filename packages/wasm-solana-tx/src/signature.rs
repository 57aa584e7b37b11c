//! Detached Ed25519 signatures and signature slots.

use crate::error::WasmSolanaError;
use crate::pubkey::Pubkey;
use ed25519_dalek::{Verifier, VerifyingKey};
use std::fmt;

pub const SIGNATURE_BYTES: usize = 64;

/// A 64-byte Ed25519 signature. The all-zero value is the wire placeholder
/// for a slot that has not been signed yet.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Signature([u8; SIGNATURE_BYTES]);

impl Default for Signature {
    fn default() -> Self {
        Signature([0u8; SIGNATURE_BYTES])
    }
}

impl Signature {
    pub const fn new_from_array(bytes: [u8; SIGNATURE_BYTES]) -> Self {
        Signature(bytes)
    }

    pub fn to_bytes(&self) -> [u8; SIGNATURE_BYTES] {
        self.0
    }

    pub fn as_bytes(&self) -> &[u8; SIGNATURE_BYTES] {
        &self.0
    }

    /// Check this signature over `message` against `pubkey`.
    ///
    /// Returns `false` for keys that are not valid curve points.
    pub fn verify(&self, pubkey: &Pubkey, message: &[u8]) -> bool {
        let Ok(verifying_key) = VerifyingKey::from_bytes(pubkey.as_bytes()) else {
            return false;
        };
        let signature = ed25519_dalek::Signature::from_bytes(&self.0);
        verifying_key.verify(message, &signature).is_ok()
    }
}

impl TryFrom<&[u8]> for Signature {
    type Error = WasmSolanaError;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        let array: [u8; SIGNATURE_BYTES] = bytes
            .try_into()
            .map_err(|_| WasmSolanaError::InvalidSignatureLength(bytes.len()))?;
        Ok(Signature(array))
    }
}

impl From<[u8; SIGNATURE_BYTES]> for Signature {
    fn from(bytes: [u8; SIGNATURE_BYTES]) -> Self {
        Signature(bytes)
    }
}

impl AsRef<[u8]> for Signature {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&bs58::encode(self.0).into_string())
    }
}

impl fmt::Debug for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Signature({})", self)
    }
}

/// One signature slot of a transaction: the signer and, once signed, its
/// signature.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SignaturePubkeyPair {
    pub pubkey: Pubkey,
    pub signature: Option<Signature>,
}

impl SignaturePubkeyPair {
    pub fn unsigned(pubkey: Pubkey) -> Self {
        SignaturePubkeyPair {
            pubkey,
            signature: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keypair::Keypair;

    #[test]
    fn test_length_validation() {
        assert!(Signature::try_from(&[7u8; 64][..]).is_ok());
        assert_eq!(
            Signature::try_from(&[0u8; 63][..]).unwrap_err(),
            WasmSolanaError::InvalidSignatureLength(63)
        );
        assert_eq!(
            Signature::try_from(&[0u8; 65][..]).unwrap_err(),
            WasmSolanaError::InvalidSignatureLength(65)
        );
    }

    #[test]
    fn test_verify() {
        let keypair = Keypair::from_secret_key_bytes(&[3u8; 32]).unwrap();
        let signature = keypair.sign_message(b"payload");

        assert!(signature.verify(&keypair.pubkey(), b"payload"));
        assert!(!signature.verify(&keypair.pubkey(), b"other payload"));
        assert!(!Signature::default().verify(&keypair.pubkey(), b"payload"));
    }
}
