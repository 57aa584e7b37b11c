//! Ed25519 keypair implementation for Solana.
//!
//! Wraps `ed25519_dalek::SigningKey`. The 64-byte Solana secret key format is
//! the 32-byte seed followed by the 32-byte public key.

use crate::error::WasmSolanaError;
use crate::pubkey::Pubkey;
use crate::signature::Signature;
use ed25519_dalek::{Signer, SigningKey};

#[derive(Debug, Clone)]
pub struct Keypair {
    signing_key: SigningKey,
}

impl Keypair {
    /// Generate a new random keypair.
    pub fn generate() -> Result<Keypair, WasmSolanaError> {
        let mut seed = [0u8; 32];
        getrandom::getrandom(&mut seed).map_err(|e| WasmSolanaError::Entropy(e.to_string()))?;
        Ok(Keypair {
            signing_key: SigningKey::from_bytes(&seed),
        })
    }

    /// Create a keypair from a 32-byte secret key (Ed25519 seed).
    pub fn from_secret_key_bytes(secret_key: &[u8]) -> Result<Keypair, WasmSolanaError> {
        let bytes: [u8; 32] = secret_key.try_into().map_err(|_| {
            WasmSolanaError::InvalidKeypair(format!(
                "Secret key must be 32 bytes, got {}",
                secret_key.len()
            ))
        })?;
        Ok(Keypair {
            signing_key: SigningKey::from_bytes(&bytes),
        })
    }

    /// Create a keypair from a 64-byte Solana secret key (secret + public concatenated).
    ///
    /// The trailing 32 bytes must be the public key derived from the seed.
    pub fn from_solana_secret_key(secret_key: &[u8]) -> Result<Keypair, WasmSolanaError> {
        let bytes: [u8; 64] = secret_key.try_into().map_err(|_| {
            WasmSolanaError::InvalidKeypair(format!(
                "Solana secret key must be 64 bytes, got {}",
                secret_key.len()
            ))
        })?;
        let signing_key = SigningKey::from_keypair_bytes(&bytes)
            .map_err(|e| WasmSolanaError::InvalidKeypair(e.to_string()))?;
        Ok(Keypair { signing_key })
    }

    pub fn pubkey(&self) -> Pubkey {
        Pubkey::from(self.signing_key.verifying_key().to_bytes())
    }

    /// Get the public key bytes (32 bytes).
    pub fn public_key_bytes(&self) -> [u8; 32] {
        self.signing_key.verifying_key().to_bytes()
    }

    /// Get the secret key bytes (32 bytes, the seed only).
    pub fn secret_key_bytes(&self) -> [u8; 32] {
        self.signing_key.to_bytes()
    }

    /// Get the 64-byte Solana secret key (seed followed by public key).
    pub fn to_solana_secret_key(&self) -> [u8; 64] {
        self.signing_key.to_keypair_bytes()
    }

    /// Get the Solana address (base58-encoded public key).
    pub fn address(&self) -> String {
        self.pubkey().to_base58()
    }

    /// Produce a detached signature over `message`.
    pub fn sign_message(&self, message: &[u8]) -> Signature {
        Signature::from(self.signing_key.sign(message).to_bytes())
    }
}
