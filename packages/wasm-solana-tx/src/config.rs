//! Serialization options.
//!
//! Deserialized from JavaScript via serde, so every field is optional and
//! named in camelCase:
//!
//! ```json
//! { "requireAllSignatures": false, "verifySignatures": true, "packetDataSize": 1232 }
//! ```

use serde::Deserialize;

/// Maximum transaction size accepted by mainnet validators: the IPv6 minimum
/// MTU (1280) minus IPv6 (40) and UDP (8) headers.
pub const PACKET_DATA_SIZE: usize = 1280 - 40 - 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SerializeConfig {
    /// Fail verification when any slot is still unsigned.
    pub require_all_signatures: bool,
    /// Verify every attached signature before rendering.
    pub verify_signatures: bool,
    /// Largest serialized transaction, in bytes.
    pub packet_data_size: usize,
}

impl Default for SerializeConfig {
    fn default() -> Self {
        SerializeConfig {
            require_all_signatures: true,
            verify_signatures: true,
            packet_data_size: PACKET_DATA_SIZE,
        }
    }
}

impl SerializeConfig {
    /// Render without checking signatures, e.g. for an unsigned transaction
    /// handed to an offline signer.
    pub fn unchecked() -> Self {
        SerializeConfig {
            require_all_signatures: false,
            verify_signatures: false,
            ..SerializeConfig::default()
        }
    }
}
