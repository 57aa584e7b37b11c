//! WASM bindings for addresses and block references.

use crate::error::WasmSolanaError;
use crate::hash::Hash;
use crate::pubkey::Pubkey;
use wasm_bindgen::prelude::*;

/// A 32-byte Solana address.
#[wasm_bindgen]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WasmPubkey(Pubkey);

#[wasm_bindgen]
impl WasmPubkey {
    /// Parse a base58 address.
    #[wasm_bindgen]
    pub fn from_base58(address: &str) -> Result<WasmPubkey, WasmSolanaError> {
        address.parse().map(WasmPubkey)
    }

    /// Wrap exactly 32 raw bytes.
    #[wasm_bindgen]
    pub fn from_bytes(bytes: &[u8]) -> Result<WasmPubkey, WasmSolanaError> {
        Pubkey::from_bytes_checked(bytes).map(WasmPubkey)
    }

    /// The all-zero address, shared by the System Program.
    #[wasm_bindgen]
    pub fn default_pubkey() -> WasmPubkey {
        WasmPubkey(Pubkey::DEFAULT)
    }

    #[wasm_bindgen]
    pub fn to_base58(&self) -> String {
        self.0.to_base58()
    }

    #[wasm_bindgen]
    pub fn to_bytes(&self) -> js_sys::Uint8Array {
        js_sys::Uint8Array::from(self.0.as_ref())
    }

    #[wasm_bindgen]
    pub fn equals(&self, other: &WasmPubkey) -> bool {
        self == other
    }

    /// Whether the address is a valid Ed25519 point, i.e. can have a
    /// private key.
    #[wasm_bindgen]
    pub fn is_on_curve(&self) -> bool {
        self.0.is_on_curve()
    }
}

impl From<Pubkey> for WasmPubkey {
    fn from(pubkey: Pubkey) -> Self {
        WasmPubkey(pubkey)
    }
}

impl From<WasmPubkey> for Pubkey {
    fn from(pubkey: WasmPubkey) -> Self {
        pubkey.0
    }
}

/// A recent blockhash or durable nonce value.
#[wasm_bindgen]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WasmHash(Hash);

#[wasm_bindgen]
impl WasmHash {
    /// Parse base58 text; it must decode to exactly 32 bytes.
    #[wasm_bindgen]
    pub fn from_base58(text: &str) -> Result<WasmHash, WasmSolanaError> {
        Hash::from_base58(text).map(WasmHash)
    }

    #[wasm_bindgen]
    pub fn to_base58(&self) -> String {
        self.0.to_string()
    }

    #[wasm_bindgen]
    pub fn to_bytes(&self) -> js_sys::Uint8Array {
        js_sys::Uint8Array::from(&self.0.as_bytes()[..])
    }
}
