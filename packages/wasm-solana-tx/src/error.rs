use crate::pubkey::Pubkey;
use thiserror::Error;
use wasm_bindgen::prelude::*;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WasmSolanaError {
    /// Raw bytes had the wrong size for the target type.
    #[error("Invalid length: expected {expected} bytes, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    /// Text could not be decoded as base58.
    #[error("Invalid base58 encoding: {0}")]
    InvalidEncoding(String),

    #[error("Transaction recentBlockhash required")]
    MissingBlockhash,

    #[error("No instructions provided")]
    NoInstructions,

    #[error("Transaction fee payer required")]
    MissingFeePayer,

    #[error("Transaction instruction index {index} has undefined program id")]
    MissingProgramId { index: usize },

    /// A signature slot or signer key is not referenced by the transaction.
    #[error("unknown signer: {0}")]
    UnknownSigner(Pubkey),

    #[error("No signers")]
    NoSigners,

    /// Compiled instruction referenced a key missing from the account table.
    /// Only reachable through a compiler bug.
    #[error("Unresolved account index for {0}")]
    UnresolvedIndex(Pubkey),

    /// The account table does not fit the one-byte index format.
    #[error("Account index overflowed during compilation: {0} accounts")]
    AccountIndexOverflow(usize),

    #[error("Invalid signature length: expected 64 bytes, got {0}")]
    InvalidSignatureLength(usize),

    #[error("Signature verification failed")]
    SignatureVerificationFailed,

    #[error("Transaction too large: {size} > {max}")]
    TransactionTooLarge { size: usize, max: usize },

    #[error("Malformed message: {0}")]
    MalformedMessage(String),

    #[error("Invalid keypair: {0}")]
    InvalidKeypair(String),

    #[error("Entropy source unavailable: {0}")]
    Entropy(String),

    #[error("Invalid transaction intent: {0}")]
    InvalidIntent(String),
}

impl WasmSolanaError {
    pub(crate) fn malformed(reason: &str) -> WasmSolanaError {
        WasmSolanaError::MalformedMessage(reason.to_string())
    }
}

// Required for wasm_bindgen to convert errors to JavaScript exceptions
// Uses js_sys::Error to create a proper JavaScript Error with stack trace
impl From<WasmSolanaError> for JsValue {
    fn from(err: WasmSolanaError) -> Self {
        js_sys::Error::new(&err.to_string()).into()
    }
}
