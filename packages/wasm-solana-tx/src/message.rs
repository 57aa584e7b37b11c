//! Compiled message model.
//!
//! # Wire Format
//!
//! - Header: three raw bytes (required signatures, read-only signed,
//!   read-only unsigned)
//! - Account keys: compact length + N x 32 bytes
//! - Recent blockhash: 32 bytes
//! - Instructions: compact length, then per instruction
//!   - program id index (1 byte)
//!   - compact length + account index bytes
//!   - compact length + data bytes

use crate::error::WasmSolanaError;
use crate::hash::{Hash, HASH_BYTES};
use crate::pubkey::{Pubkey, PUBKEY_BYTES};
use crate::shortvec::{append_length, decode_length};

/// Describes the layout of `Message::account_keys`.
///
/// ```text
/// [writable signers | readonly signers | writable non-signers | readonly non-signers]
///  <-- num_required_signatures ------->
///                     <- ro signed ---->                       <-- ro unsigned ----->
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MessageHeader {
    pub num_required_signatures: u8,
    pub num_readonly_signed_accounts: u8,
    pub num_readonly_unsigned_accounts: u8,
}

/// An instruction whose program and accounts are indices into
/// `Message::account_keys`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompiledInstruction {
    pub program_id_index: u8,
    pub accounts: Vec<u8>,
    pub data: Vec<u8>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Message {
    pub header: MessageHeader,
    pub account_keys: Vec<Pubkey>,
    pub recent_blockhash: Hash,
    pub instructions: Vec<CompiledInstruction>,
}

impl Message {
    /// Serialize to the bytes signers sign.
    pub fn serialize(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(
            3 + 3 + self.account_keys.len() * PUBKEY_BYTES + HASH_BYTES + 64,
        );
        out.push(self.header.num_required_signatures);
        out.push(self.header.num_readonly_signed_accounts);
        out.push(self.header.num_readonly_unsigned_accounts);

        append_length(&mut out, self.account_keys.len());
        for key in &self.account_keys {
            out.extend_from_slice(key.as_bytes());
        }

        out.extend_from_slice(self.recent_blockhash.as_bytes());

        append_length(&mut out, self.instructions.len());
        for instruction in &self.instructions {
            out.push(instruction.program_id_index);
            append_length(&mut out, instruction.accounts.len());
            out.extend_from_slice(&instruction.accounts);
            append_length(&mut out, instruction.data.len());
            out.extend_from_slice(&instruction.data);
        }
        out
    }

    /// Decode a message, rejecting truncated input and trailing bytes.
    pub fn deserialize(bytes: &[u8]) -> Result<Message, WasmSolanaError> {
        let mut reader = ByteReader::new(bytes);
        let message = Message::read_from(&mut reader)?;
        reader.finish()?;
        Ok(message)
    }

    pub(crate) fn read_from(reader: &mut ByteReader<'_>) -> Result<Message, WasmSolanaError> {
        let header = MessageHeader {
            num_required_signatures: reader.read_u8()?,
            num_readonly_signed_accounts: reader.read_u8()?,
            num_readonly_unsigned_accounts: reader.read_u8()?,
        };

        let num_keys = reader.read_length()?;
        let mut account_keys = Vec::with_capacity(num_keys.min(reader.remaining() / PUBKEY_BYTES));
        for _ in 0..num_keys {
            account_keys.push(Pubkey::from(reader.read_array::<PUBKEY_BYTES>()?));
        }

        let recent_blockhash = Hash::from(reader.read_array::<HASH_BYTES>()?);

        let num_instructions = reader.read_length()?;
        let mut instructions = Vec::with_capacity(num_instructions.min(reader.remaining()));
        for _ in 0..num_instructions {
            let program_id_index = reader.read_u8()?;
            let num_accounts = reader.read_length()?;
            let accounts = reader.read_bytes(num_accounts)?.to_vec();
            let data_len = reader.read_length()?;
            let data = reader.read_bytes(data_len)?.to_vec();
            instructions.push(CompiledInstruction {
                program_id_index,
                accounts,
                data,
            });
        }

        Ok(Message {
            header,
            account_keys,
            recent_blockhash,
            instructions,
        })
    }

    /// The accounts that must sign, in signature-slot order.
    pub fn signer_keys(&self) -> &[Pubkey] {
        let end = usize::from(self.header.num_required_signatures).min(self.account_keys.len());
        &self.account_keys[..end]
    }

    pub fn fee_payer(&self) -> Option<&Pubkey> {
        self.signer_keys().first()
    }

    pub fn is_signer(&self, index: usize) -> bool {
        index < usize::from(self.header.num_required_signatures)
    }

    pub fn is_writable(&self, index: usize) -> bool {
        let num_signed = usize::from(self.header.num_required_signatures);
        let num_readonly_signed = usize::from(self.header.num_readonly_signed_accounts);
        let num_readonly_unsigned = usize::from(self.header.num_readonly_unsigned_accounts);
        if index < num_signed {
            index < num_signed.saturating_sub(num_readonly_signed)
        } else {
            index
                < self
                    .account_keys
                    .len()
                    .saturating_sub(num_readonly_unsigned)
        }
    }
}

/// Cursor over wire bytes. Every read failure is a `MalformedMessage`.
pub(crate) struct ByteReader<'a> {
    bytes: &'a [u8],
}

impl<'a> ByteReader<'a> {
    pub(crate) fn new(bytes: &'a [u8]) -> Self {
        ByteReader { bytes }
    }

    pub(crate) fn remaining(&self) -> usize {
        self.bytes.len()
    }

    pub(crate) fn read_u8(&mut self) -> Result<u8, WasmSolanaError> {
        let (&first, rest) = self
            .bytes
            .split_first()
            .ok_or_else(|| WasmSolanaError::malformed("unexpected end of input"))?;
        self.bytes = rest;
        Ok(first)
    }

    pub(crate) fn read_length(&mut self) -> Result<usize, WasmSolanaError> {
        let (len, consumed) = decode_length(self.bytes)?;
        self.bytes = &self.bytes[consumed..];
        Ok(len)
    }

    pub(crate) fn read_bytes(&mut self, len: usize) -> Result<&'a [u8], WasmSolanaError> {
        if self.bytes.len() < len {
            return Err(WasmSolanaError::MalformedMessage(format!(
                "expected {} bytes, {} remaining",
                len,
                self.bytes.len()
            )));
        }
        let (head, rest) = self.bytes.split_at(len);
        self.bytes = rest;
        Ok(head)
    }

    pub(crate) fn read_array<const N: usize>(&mut self) -> Result<[u8; N], WasmSolanaError> {
        let mut array = [0u8; N];
        array.copy_from_slice(self.read_bytes(N)?);
        Ok(array)
    }

    pub(crate) fn finish(self) -> Result<(), WasmSolanaError> {
        if self.bytes.is_empty() {
            Ok(())
        } else {
            Err(WasmSolanaError::MalformedMessage(format!(
                "{} trailing bytes",
                self.bytes.len()
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_message() -> Message {
        Message {
            header: MessageHeader {
                num_required_signatures: 1,
                num_readonly_signed_accounts: 0,
                num_readonly_unsigned_accounts: 1,
            },
            account_keys: vec![
                Pubkey::from([1u8; 32]),
                Pubkey::from([2u8; 32]),
                Pubkey::DEFAULT,
            ],
            recent_blockhash: Hash::from([9u8; 32]),
            instructions: vec![CompiledInstruction {
                program_id_index: 2,
                accounts: vec![0, 1],
                data: vec![2, 0, 0, 0, 0x40, 0x42, 0x0f, 0, 0, 0, 0, 0],
            }],
        }
    }

    #[test]
    fn test_serialize_layout() {
        let bytes = sample_message().serialize();

        assert_eq!(&bytes[..3], &[1, 0, 1]);
        assert_eq!(bytes[3], 3);
        assert_eq!(&bytes[4..36], &[1u8; 32]);
        assert_eq!(&bytes[36..68], &[2u8; 32]);
        assert_eq!(&bytes[68..100], &[0u8; 32]);
        assert_eq!(&bytes[100..132], &[9u8; 32]);
        // one instruction: program index 2, two accounts, 12 data bytes
        assert_eq!(hex::encode(&bytes[132..]), "01020200010c0200000040420f0000000000");
        assert_eq!(bytes.len(), 132 + 18);
    }

    #[test]
    fn test_deserialize_inverse() {
        let message = sample_message();
        assert_eq!(Message::deserialize(&message.serialize()).unwrap(), message);
    }

    #[test]
    fn test_deserialize_rejects_truncation() {
        let bytes = sample_message().serialize();
        for cut in [0, 2, 3, 40, 100, 131, 134, bytes.len() - 1] {
            let result = Message::deserialize(&bytes[..cut]);
            assert!(
                matches!(result, Err(WasmSolanaError::MalformedMessage(_))),
                "cut at {} should fail",
                cut
            );
        }
    }

    #[test]
    fn test_deserialize_rejects_trailing_bytes() {
        let mut bytes = sample_message().serialize();
        bytes.push(0);
        assert!(matches!(
            Message::deserialize(&bytes),
            Err(WasmSolanaError::MalformedMessage(_))
        ));
    }

    #[test]
    fn test_account_flags_from_header() {
        let message = Message {
            header: MessageHeader {
                num_required_signatures: 3,
                num_readonly_signed_accounts: 1,
                num_readonly_unsigned_accounts: 2,
            },
            account_keys: (1..=6).map(|i| Pubkey::from([i; 32])).collect(),
            ..Message::default()
        };

        let flags: Vec<(bool, bool)> = (0..6)
            .map(|i| (message.is_signer(i), message.is_writable(i)))
            .collect();
        assert_eq!(
            flags,
            vec![
                (true, true),
                (true, true),
                (true, false),
                (false, true),
                (false, false),
                (false, false),
            ]
        );
        assert_eq!(message.signer_keys().len(), 3);
        assert_eq!(message.fee_payer(), Some(&Pubkey::from([1u8; 32])));
    }
}
