//! Program ID and size constants exported via WASM.
//!
//! These constants allow JavaScript code to reference well-known Solana program IDs
//! without needing to import @solana/web3.js.

use wasm_bindgen::prelude::*;

use crate::config::PACKET_DATA_SIZE;
use crate::system::{MEMO_PROGRAM_ID, SYSTEM_PROGRAM_ID, SYSVAR_RECENT_BLOCKHASHES};

/// System Program ID
#[wasm_bindgen]
pub fn system_program_id() -> String {
    SYSTEM_PROGRAM_ID.to_base58()
}

/// Memo Program ID
#[wasm_bindgen]
pub fn memo_program_id() -> String {
    MEMO_PROGRAM_ID.to_base58()
}

/// RecentBlockhashes sysvar, referenced by nonce instructions
#[wasm_bindgen]
pub fn sysvar_recent_blockhashes() -> String {
    SYSVAR_RECENT_BLOCKHASHES.to_base58()
}

/// Default maximum serialized transaction size in bytes
#[wasm_bindgen]
pub fn packet_data_size() -> usize {
    PACKET_DATA_SIZE
}
