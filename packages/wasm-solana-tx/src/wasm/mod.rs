mod builder;
mod constants;
pub(crate) mod keypair;
pub(crate) mod pubkey;
pub(crate) mod transaction;

pub use builder::BuilderNamespace;
pub use keypair::WasmKeypair;
pub use pubkey::{WasmHash, WasmPubkey};
pub use transaction::WasmTransaction;

// Re-export constants functions
pub use constants::*;
