//! System Program and Memo Program instruction constructors.
//!
//! # Wire Format
//!
//! System instructions start with a 4-byte little-endian discriminator
//! followed by little-endian fields:
//! - 0: CreateAccount { lamports: u64, space: u64, owner: Pubkey }
//! - 2: Transfer { lamports: u64 }
//! - 4: AdvanceNonceAccount
//! - 6: InitializeNonceAccount { authority: Pubkey }
//!
//! Memo instructions carry the UTF-8 memo text verbatim.

use crate::instruction::{AccountMeta, Instruction};
use crate::pubkey::Pubkey;

/// System Program ID ("11111111111111111111111111111111")
pub const SYSTEM_PROGRAM_ID: Pubkey = Pubkey::DEFAULT;

/// Memo Program ID ("MemoSq4gqABAXKb96qnH8TysNcWxMyWCqXgDLGmfcHr")
pub const MEMO_PROGRAM_ID: Pubkey = Pubkey::new_from_array([
    5, 74, 83, 90, 153, 41, 33, 6, 77, 36, 232, 113, 96, 218, 56, 124, 124, 53, 181, 221, 188,
    146, 187, 129, 228, 31, 168, 64, 65, 5, 68, 141,
]);

/// RecentBlockhashes sysvar ("SysvarRecentB1ockHashes11111111111111111111")
pub const SYSVAR_RECENT_BLOCKHASHES: Pubkey = Pubkey::new_from_array([
    6, 167, 213, 23, 25, 44, 86, 142, 224, 138, 132, 95, 115, 210, 151, 136, 207, 3, 92, 49, 69,
    178, 26, 179, 68, 216, 6, 46, 169, 64, 0, 0,
]);

/// Rent sysvar ("SysvarRent111111111111111111111111111111111")
pub const SYSVAR_RENT: Pubkey = Pubkey::new_from_array([
    6, 167, 213, 23, 25, 44, 92, 81, 33, 140, 201, 76, 61, 74, 241, 127, 88, 218, 238, 8, 155,
    161, 253, 68, 227, 219, 217, 138, 0, 0, 0, 0,
]);

const CREATE_ACCOUNT: u32 = 0;
const TRANSFER: u32 = 2;
const ADVANCE_NONCE_ACCOUNT: u32 = 4;
const INITIALIZE_NONCE_ACCOUNT: u32 = 6;

fn system_data(discriminator: u32, capacity: usize) -> Vec<u8> {
    let mut data = Vec::with_capacity(4 + capacity);
    data.extend_from_slice(&discriminator.to_le_bytes());
    data
}

/// Transfer lamports from a signing account to another account.
pub fn transfer(from: &Pubkey, to: &Pubkey, lamports: u64) -> Instruction {
    let mut data = system_data(TRANSFER, 8);
    data.extend_from_slice(&lamports.to_le_bytes());
    Instruction::new(
        SYSTEM_PROGRAM_ID,
        vec![AccountMeta::new(*from, true), AccountMeta::new(*to, false)],
        data,
    )
}

/// Create a new account funded by `from`. Both accounts must sign.
pub fn create_account(
    from: &Pubkey,
    new_account: &Pubkey,
    lamports: u64,
    space: u64,
    owner: &Pubkey,
) -> Instruction {
    let mut data = system_data(CREATE_ACCOUNT, 8 + 8 + 32);
    data.extend_from_slice(&lamports.to_le_bytes());
    data.extend_from_slice(&space.to_le_bytes());
    data.extend_from_slice(owner.as_bytes());
    Instruction::new(
        SYSTEM_PROGRAM_ID,
        vec![
            AccountMeta::new(*from, true),
            AccountMeta::new(*new_account, true),
        ],
        data,
    )
}

/// Advance a durable nonce account. Must be the first instruction of a
/// transaction that uses the nonce value as its blockhash.
pub fn advance_nonce_account(nonce: &Pubkey, authority: &Pubkey) -> Instruction {
    Instruction::new(
        SYSTEM_PROGRAM_ID,
        vec![
            AccountMeta::new(*nonce, false),
            AccountMeta::new_readonly(SYSVAR_RECENT_BLOCKHASHES, false),
            AccountMeta::new_readonly(*authority, true),
        ],
        system_data(ADVANCE_NONCE_ACCOUNT, 0),
    )
}

pub fn initialize_nonce_account(nonce: &Pubkey, authority: &Pubkey) -> Instruction {
    let mut data = system_data(INITIALIZE_NONCE_ACCOUNT, 32);
    data.extend_from_slice(authority.as_bytes());
    Instruction::new(
        SYSTEM_PROGRAM_ID,
        vec![
            AccountMeta::new(*nonce, false),
            AccountMeta::new_readonly(SYSVAR_RECENT_BLOCKHASHES, false),
            AccountMeta::new_readonly(SYSVAR_RENT, false),
        ],
        data,
    )
}

/// Attach a UTF-8 memo, optionally requiring signatures from `signers`.
pub fn memo(message: &str, signers: &[Pubkey]) -> Instruction {
    Instruction::new(
        MEMO_PROGRAM_ID,
        signers
            .iter()
            .map(|signer| AccountMeta::new_readonly(*signer, true))
            .collect(),
        message.as_bytes().to_vec(),
    )
}
