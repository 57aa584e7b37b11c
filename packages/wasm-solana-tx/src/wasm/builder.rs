//! WASM binding for transaction building.
//!
//! Exposes transaction building functions:
//! - `buildTransaction` - Creates unsigned transaction bytes from an intent
//! - `buildTransactionObject` - Same, but returns a `WasmTransaction` for signing

use crate::builder;
use crate::wasm::transaction::WasmTransaction;
use wasm_bindgen::prelude::*;

/// Namespace for transaction building operations.
#[wasm_bindgen]
pub struct BuilderNamespace;

#[wasm_bindgen]
impl BuilderNamespace {
    /// Build a Solana transaction from an intent structure.
    ///
    /// Takes a TransactionIntent JSON object and returns serialized transaction bytes.
    ///
    /// # Intent Structure
    ///
    /// ```json
    /// {
    ///   "feePayer": "DgT9qyYwYKBRDyDw3EfR12LHQCQjtNrKu2qMsXHuosmB",
    ///   "nonce": {
    ///     "type": "blockhash",
    ///     "value": "GWaQEymC3Z9SHM2gkh8u12xL1zJPMHPCSVR3pSDpEXE4"
    ///   },
    ///   "instructions": [
    ///     { "type": "transfer", "from": "...", "to": "...", "lamports": "1000000" },
    ///     { "type": "memo", "message": "BitGo tx" }
    ///   ]
    /// }
    /// ```
    ///
    /// # Instruction Types
    ///
    /// - `transfer`: SOL transfer (from, to, lamports)
    /// - `createAccount`: Create new account (from, newAccount, lamports, space, owner)
    /// - `nonceAdvance`: Advance durable nonce (nonce, authority)
    /// - `nonceInitialize`: Initialize nonce account (nonce, authority)
    /// - `memo`: Add memo (message, optional signers)
    /// - `custom`: Any program (programId, accounts, base58 data)
    ///
    /// # Returns
    ///
    /// Serialized unsigned transaction bytes (Uint8Array).
    /// The transaction will have empty signature placeholders that can be
    /// filled in later by signing.
    ///
    /// @param intent - The transaction intent as a JSON object
    /// @returns Serialized transaction bytes
    #[wasm_bindgen]
    pub fn build_transaction(intent: JsValue) -> Result<Vec<u8>, JsValue> {
        let intent = parse_intent(intent)?;
        Ok(builder::build_transaction(intent)?)
    }

    /// Build a transaction from an intent structure without serializing it.
    ///
    /// @param intent - The transaction intent as a JSON object
    /// @returns A transaction ready for signing
    #[wasm_bindgen]
    pub fn build_transaction_object(intent: JsValue) -> Result<WasmTransaction, JsValue> {
        let intent = parse_intent(intent)?;
        Ok(WasmTransaction::from_inner(builder::transaction_from_intent(intent)?))
    }
}

fn parse_intent(intent: JsValue) -> Result<builder::TransactionIntent, JsValue> {
    serde_wasm_bindgen::from_value(intent)
        .map_err(|e| JsValue::from_str(&format!("Failed to parse transaction intent: {}", e)))
}
