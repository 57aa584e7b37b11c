//! Compact-length ("short vec") integer codec.
//!
//! # Wire Format
//!
//! Seven bits of magnitude per byte, least significant group first. The
//! high bit of every byte except the last is set to signal continuation:
//!
//! - `0`   -> `[0x00]`
//! - `127` -> `[0x7f]`
//! - `128` -> `[0x80, 0x01]`
//! - `300` -> `[0xac, 0x02]`
//!
//! Every variable-length array in a transaction is prefixed with this
//! encoding of its element count.

use crate::error::WasmSolanaError;

/// Encode `len` into a fresh buffer.
pub fn encode_length(len: usize) -> Vec<u8> {
    let mut out = Vec::with_capacity(3);
    append_length(&mut out, len);
    out
}

/// Append the encoding of `len` to `out`.
pub fn append_length(out: &mut Vec<u8>, len: usize) {
    let mut rem = len;
    loop {
        let elem = (rem & 0x7f) as u8;
        rem >>= 7;
        if rem == 0 {
            out.push(elem);
            break;
        }
        out.push(elem | 0x80);
    }
}

/// Decode a length from the front of `bytes`.
///
/// Returns the value and the number of bytes consumed.
pub fn decode_length(bytes: &[u8]) -> Result<(usize, usize), WasmSolanaError> {
    let mut len: u64 = 0;
    let mut shift: u32 = 0;
    for (i, &byte) in bytes.iter().enumerate() {
        let group = u64::from(byte & 0x7f);
        if shift >= u64::BITS || (group << shift) >> shift != group {
            return Err(WasmSolanaError::malformed("compact length overflows"));
        }
        len |= group << shift;
        if byte & 0x80 == 0 {
            let len = usize::try_from(len)
                .map_err(|_| WasmSolanaError::malformed("compact length overflows"))?;
            return Ok((len, i + 1));
        }
        shift += 7;
    }
    Err(WasmSolanaError::malformed("truncated compact length"))
}
