//! Uncompiled instruction types.
//!
//! These are what callers build. Compilation turns them into
//! [`CompiledInstruction`](crate::message::CompiledInstruction)s that
//! reference accounts by index.

use crate::pubkey::Pubkey;

/// An account referenced by an instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccountMeta {
    pub pubkey: Pubkey,
    /// True if the instruction requires a signature from `pubkey`.
    pub is_signer: bool,
    /// True if `pubkey` may be loaded as a read-write account.
    pub is_writable: bool,
}

impl AccountMeta {
    /// A writable account.
    pub fn new(pubkey: Pubkey, is_signer: bool) -> Self {
        AccountMeta {
            pubkey,
            is_signer,
            is_writable: true,
        }
    }

    /// A read-only account.
    pub fn new_readonly(pubkey: Pubkey, is_signer: bool) -> Self {
        AccountMeta {
            pubkey,
            is_signer,
            is_writable: false,
        }
    }
}

/// A program invocation: the program to run, the accounts it touches, and
/// its opaque input bytes.
///
/// `program_id` is optional so an incomplete instruction can be assembled
/// field by field; compilation rejects it with `MissingProgramId`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Instruction {
    pub program_id: Option<Pubkey>,
    pub accounts: Vec<AccountMeta>,
    pub data: Vec<u8>,
}

impl Instruction {
    pub fn new(program_id: Pubkey, accounts: Vec<AccountMeta>, data: Vec<u8>) -> Self {
        Instruction {
            program_id: Some(program_id),
            accounts,
            data,
        }
    }
}
