//! wasm-solana-tx: legacy Solana transaction compilation, signing and
//! serialization, with WASM bindings.

pub mod builder;
pub mod compiler;
pub mod config;
mod error;
pub mod hash;
pub mod instruction;
pub mod keypair;
pub mod message;
pub mod pubkey;
pub mod shortvec;
pub mod signature;
pub mod system;
pub mod transaction;
pub mod wasm;

// Re-export core types at crate root
pub use config::SerializeConfig;
pub use error::WasmSolanaError;
pub use hash::Hash;
pub use instruction::{AccountMeta, Instruction};
pub use keypair::Keypair;
pub use pubkey::Pubkey;
pub use signature::Signature;
pub use transaction::Transaction;
