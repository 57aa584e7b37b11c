//! WASM bindings for Solana transaction parsing, signing and serialization.
//!
//! Wraps the crate's [`Transaction`] for JavaScript.

use crate::config::SerializeConfig;
use crate::error::WasmSolanaError;
use crate::instruction::Instruction;
use crate::transaction::Transaction;
use crate::wasm::keypair::WasmKeypair;
use crate::wasm::pubkey::WasmPubkey;
use wasm_bindgen::prelude::*;

/// WASM wrapper for Solana transactions.
///
/// Operations that need the compiled message recompile it, so signature
/// slots follow the current instructions and fee payer.
#[wasm_bindgen]
pub struct WasmTransaction {
    inner: Transaction,
}

#[wasm_bindgen]
impl WasmTransaction {
    /// Deserialize a transaction from a base64-encoded string.
    ///
    /// This is the format used by `@solana/web3.js` `Transaction.serialize()`.
    #[wasm_bindgen]
    pub fn from_base64(base64_str: &str) -> Result<WasmTransaction, WasmSolanaError> {
        Transaction::from_base64(base64_str).map(|inner| WasmTransaction { inner })
    }

    /// Deserialize a transaction from raw bytes.
    #[wasm_bindgen]
    pub fn from_bytes(bytes: &[u8]) -> Result<WasmTransaction, WasmSolanaError> {
        Transaction::from_bytes(bytes).map(|inner| WasmTransaction { inner })
    }

    /// Get the fee payer.
    ///
    /// Returns `null` if no fee payer is set.
    #[wasm_bindgen(getter)]
    pub fn fee_payer(&self) -> Option<WasmPubkey> {
        self.inner.fee_payer.map(WasmPubkey::from)
    }

    #[wasm_bindgen(setter)]
    pub fn set_fee_payer(&mut self, fee_payer: &WasmPubkey) {
        self.inner.fee_payer = Some((*fee_payer).into());
    }

    /// Get the recent blockhash as a base58 string.
    #[wasm_bindgen(getter)]
    pub fn recent_blockhash(&self) -> String {
        self.inner.recent_blockhash.clone()
    }

    /// Get the number of instructions in the transaction.
    #[wasm_bindgen(getter)]
    pub fn num_instructions(&self) -> usize {
        self.inner.instructions.len()
    }

    /// Get the number of signature slots in the transaction.
    #[wasm_bindgen(getter)]
    pub fn num_signatures(&self) -> usize {
        self.inner.signatures.len()
    }

    /// Get the signable message payload (what gets signed).
    #[wasm_bindgen]
    pub fn signable_payload(&mut self) -> Result<js_sys::Uint8Array, WasmSolanaError> {
        let bytes = self.inner.serialize_message()?;
        Ok(js_sys::Uint8Array::from(&bytes[..]))
    }

    /// Get all account keys of the compiled message, in table order.
    #[wasm_bindgen]
    pub fn account_keys(&self) -> Result<Vec<WasmPubkey>, WasmSolanaError> {
        let message = self.inner.compile_message()?;
        Ok(message.account_keys.into_iter().map(WasmPubkey::from).collect())
    }

    /// Get the signers whose slots appear on the wire, in slot order.
    #[wasm_bindgen]
    pub fn signer_keys(&self) -> Result<Vec<WasmPubkey>, WasmSolanaError> {
        let message = self.inner.compile_message()?;
        Ok(message
            .signer_keys()
            .iter()
            .copied()
            .map(WasmPubkey::from)
            .collect())
    }

    /// Get a signature at the given index as a base58 string.
    ///
    /// Returns `null` if the index is out of bounds or the slot is unsigned.
    #[wasm_bindgen]
    pub fn signature_at(&self, index: usize) -> Option<String> {
        self.inner
            .signatures
            .get(index)
            .and_then(|slot| slot.signature)
            .map(|signature| signature.to_string())
    }

    /// Get a signature at the given index as bytes.
    ///
    /// Returns `null` if the index is out of bounds or the slot is unsigned.
    #[wasm_bindgen]
    pub fn signature_bytes_at(&self, index: usize) -> Option<js_sys::Uint8Array> {
        self.inner
            .signatures
            .get(index)
            .and_then(|slot| slot.signature)
            .map(|signature| js_sys::Uint8Array::from(signature.as_ref()))
    }

    /// Get all instructions as an array.
    ///
    /// Each instruction is a JS object with:
    /// - `programId`: base58 string of the program account
    /// - `accounts`: array of { pubkey, isSigner, isWritable }
    /// - `data`: Uint8Array of instruction data
    #[wasm_bindgen]
    pub fn instructions(&self) -> Result<js_sys::Array, JsValue> {
        let arr = js_sys::Array::new();
        for instruction in &self.inner.instructions {
            let obj: JsValue = instruction_to_js(instruction)?.into();
            arr.push(&obj);
        }
        Ok(arr)
    }

    /// Attach an externally produced 64-byte signature for `pubkey`.
    #[wasm_bindgen]
    pub fn add_signature(
        &mut self,
        pubkey: &WasmPubkey,
        signature: &[u8],
    ) -> Result<(), WasmSolanaError> {
        self.inner.add_signature(&(*pubkey).into(), signature)
    }

    /// Sign with a keypair, adding a signature slot for it if needed.
    #[wasm_bindgen]
    pub fn sign(&mut self, keypair: &WasmKeypair) -> Result<(), WasmSolanaError> {
        self.inner.sign(&[keypair.inner()])
    }

    /// Sign with a keypair that is already a required signer.
    #[wasm_bindgen]
    pub fn partial_sign(&mut self, keypair: &WasmKeypair) -> Result<(), WasmSolanaError> {
        self.inner.partial_sign(&[keypair.inner()])
    }

    /// Verify all attached signatures against the current message.
    #[wasm_bindgen]
    pub fn verify_signatures(
        &mut self,
        require_all_signatures: bool,
    ) -> Result<bool, WasmSolanaError> {
        self.inner.verify_signatures(require_all_signatures)
    }

    /// Serialize the transaction to bytes.
    ///
    /// @param config - Optional `{ requireAllSignatures, verifySignatures, packetDataSize }`
    #[wasm_bindgen]
    pub fn serialize(&mut self, config: JsValue) -> Result<js_sys::Uint8Array, JsValue> {
        let config = parse_config(config)?;
        let bytes = self.inner.serialize(&config)?;
        Ok(js_sys::Uint8Array::from(&bytes[..]))
    }

    /// Serialize the transaction to base64.
    #[wasm_bindgen]
    pub fn to_base64(&mut self, config: JsValue) -> Result<String, JsValue> {
        let config = parse_config(config)?;
        Ok(self.inner.to_base64(&config)?)
    }
}

impl WasmTransaction {
    pub fn from_inner(inner: Transaction) -> Self {
        WasmTransaction { inner }
    }
}

fn parse_config(config: JsValue) -> Result<SerializeConfig, JsValue> {
    if config.is_undefined() || config.is_null() {
        return Ok(SerializeConfig::default());
    }
    serde_wasm_bindgen::from_value(config)
        .map_err(|e| JsValue::from_str(&format!("Failed to parse serialize config: {}", e)))
}

fn instruction_to_js(instruction: &Instruction) -> Result<js_sys::Object, JsValue> {
    let obj = js_sys::Object::new();

    let program_id = instruction
        .program_id
        .map(|key| JsValue::from_str(&key.to_base58()))
        .unwrap_or(JsValue::NULL);
    js_sys::Reflect::set(&obj, &"programId".into(), &program_id)?;

    let accounts = js_sys::Array::new();
    for meta in &instruction.accounts {
        let account_obj = js_sys::Object::new();
        js_sys::Reflect::set(&account_obj, &"pubkey".into(), &meta.pubkey.to_base58().into())?;
        js_sys::Reflect::set(&account_obj, &"isSigner".into(), &meta.is_signer.into())?;
        js_sys::Reflect::set(&account_obj, &"isWritable".into(), &meta.is_writable.into())?;
        accounts.push(&account_obj);
    }
    js_sys::Reflect::set(&obj, &"accounts".into(), &accounts)?;

    let data = js_sys::Uint8Array::from(&instruction.data[..]);
    js_sys::Reflect::set(&obj, &"data".into(), &data)?;

    Ok(obj)
}
