//! WASM bindings for Ed25519 signing keys.

use crate::error::WasmSolanaError;
use crate::keypair::Keypair;
use crate::wasm::pubkey::WasmPubkey;
use wasm_bindgen::prelude::*;

/// A signing keypair. The secret never leaves WASM memory unless one of
/// the explicit export methods is called.
#[wasm_bindgen]
#[derive(Debug, Clone)]
pub struct WasmKeypair {
    inner: Keypair,
}

#[wasm_bindgen]
impl WasmKeypair {
    /// Generate a keypair from the host's secure random source.
    #[wasm_bindgen]
    pub fn generate() -> Result<WasmKeypair, WasmSolanaError> {
        Keypair::generate().map(WasmKeypair::from)
    }

    /// Restore from a 32-byte Ed25519 seed.
    #[wasm_bindgen]
    pub fn from_seed(seed: &[u8]) -> Result<WasmKeypair, WasmSolanaError> {
        Keypair::from_secret_key_bytes(seed).map(WasmKeypair::from)
    }

    /// Restore from the 64-byte `seed || pubkey` format used by Solana CLI
    /// key files. The embedded pubkey must match the seed.
    #[wasm_bindgen]
    pub fn from_solana_secret_key(secret_key: &[u8]) -> Result<WasmKeypair, WasmSolanaError> {
        Keypair::from_solana_secret_key(secret_key).map(WasmKeypair::from)
    }

    #[wasm_bindgen(getter)]
    pub fn pubkey(&self) -> WasmPubkey {
        self.inner.pubkey().into()
    }

    #[wasm_bindgen(getter)]
    pub fn address(&self) -> String {
        self.inner.address()
    }

    /// Export the 32-byte seed.
    #[wasm_bindgen]
    pub fn export_seed(&self) -> js_sys::Uint8Array {
        js_sys::Uint8Array::from(&self.inner.secret_key_bytes()[..])
    }

    /// Export the 64-byte `seed || pubkey` secret key.
    #[wasm_bindgen]
    pub fn export_solana_secret_key(&self) -> js_sys::Uint8Array {
        js_sys::Uint8Array::from(&self.inner.to_solana_secret_key()[..])
    }

    /// Detached signature over arbitrary bytes, e.g. a transaction's
    /// signable payload.
    #[wasm_bindgen]
    pub fn sign(&self, message: &[u8]) -> js_sys::Uint8Array {
        js_sys::Uint8Array::from(self.inner.sign_message(message).as_ref())
    }
}

impl WasmKeypair {
    pub fn inner(&self) -> &Keypair {
        &self.inner
    }
}

impl From<Keypair> for WasmKeypair {
    fn from(inner: Keypair) -> Self {
        WasmKeypair { inner }
    }
}
