//! Message compilation.
//!
//! Turns a list of uncompiled instructions into the canonical account table
//! and index-based instructions. The ordering rules are order-sensitive and
//! must reproduce what the network and other client libraries produce
//! byte for byte:
//!
//! 1. Flatten every instruction's accounts (instruction order, then key
//!    order), followed by one read-only non-signer entry per distinct
//!    program id (first appearance order).
//! 2. Stable sort: signers before non-signers, then writable before
//!    read-only within each group.
//! 3. Deduplicate by pubkey keeping the first position; writable flags are
//!    OR-ed into the kept entry.
//! 4. Move (or insert) the fee payer to the front as a writable signer.
//! 5. Promote every declared signer to signer; a declared signer that is not
//!    referenced anywhere is an error.
//! 6. Stable sort again on the same key. Merging and promotion can make an
//!    entry writable or signed after it was placed, and the header only
//!    describes tables where each signed/unsigned group lists writable
//!    accounts first.

use crate::error::WasmSolanaError;
use crate::hash::Hash;
use crate::instruction::{AccountMeta, Instruction};
use crate::message::{CompiledInstruction, Message, MessageHeader};
use crate::pubkey::Pubkey;
use std::collections::hash_map::Entry;
use std::collections::HashMap;

/// Largest account table addressable by one-byte indices.
const MAX_ACCOUNT_KEYS: usize = u8::MAX as usize + 1;

/// Build the final ordered account table with merged signer/writable flags.
///
/// `declared_signers` are the pubkeys of the transaction's signature slots.
pub fn compile_account_metas(
    instructions: &[Instruction],
    fee_payer: &Pubkey,
    declared_signers: &[Pubkey],
) -> Result<Vec<AccountMeta>, WasmSolanaError> {
    let program_ids = collect_program_ids(instructions)?;

    let mut metas: Vec<AccountMeta> = instructions
        .iter()
        .flat_map(|instruction| instruction.accounts.iter().copied())
        .chain(
            program_ids
                .iter()
                .map(|program_id| AccountMeta::new_readonly(*program_id, false)),
        )
        .collect();

    // sort_by_key is stable; false sorts first
    metas.sort_by_key(|meta| (!meta.is_signer, !meta.is_writable));

    let mut unique: Vec<AccountMeta> = Vec::with_capacity(metas.len());
    let mut positions: HashMap<Pubkey, usize> = HashMap::with_capacity(metas.len());
    for meta in metas {
        match positions.entry(meta.pubkey) {
            Entry::Occupied(entry) => {
                unique[*entry.get()].is_writable |= meta.is_writable;
            }
            Entry::Vacant(entry) => {
                entry.insert(unique.len());
                unique.push(meta);
            }
        }
    }

    match unique.iter().position(|meta| meta.pubkey == *fee_payer) {
        Some(index) => {
            let mut payer = unique.remove(index);
            payer.is_signer = true;
            payer.is_writable = true;
            unique.insert(0, payer);
        }
        None => unique.insert(0, AccountMeta::new(*fee_payer, true)),
    }

    for signer in declared_signers {
        let meta = unique
            .iter_mut()
            .find(|meta| meta.pubkey == *signer)
            .ok_or(WasmSolanaError::UnknownSigner(*signer))?;
        meta.is_signer = true;
    }

    unique.sort_by_key(|meta| (!meta.is_signer, !meta.is_writable));
    Ok(unique)
}

/// Compile instructions into a [`Message`].
pub fn compile_message(
    instructions: &[Instruction],
    fee_payer: &Pubkey,
    declared_signers: &[Pubkey],
    recent_blockhash: Hash,
) -> Result<Message, WasmSolanaError> {
    let metas = compile_account_metas(instructions, fee_payer, declared_signers)?;
    if metas.len() > MAX_ACCOUNT_KEYS {
        return Err(WasmSolanaError::AccountIndexOverflow(metas.len()));
    }

    let header = compile_header(&metas)?;
    let account_keys: Vec<Pubkey> = metas.iter().map(|meta| meta.pubkey).collect();

    let positions: HashMap<Pubkey, u8> = account_keys
        .iter()
        .enumerate()
        .map(|(index, key)| {
            u8::try_from(index)
                .map(|index| (*key, index))
                .map_err(|_| WasmSolanaError::AccountIndexOverflow(account_keys.len()))
        })
        .collect::<Result<_, _>>()?;
    let index_of = |key: &Pubkey| -> Result<u8, WasmSolanaError> {
        positions
            .get(key)
            .copied()
            .ok_or(WasmSolanaError::UnresolvedIndex(*key))
    };

    let compiled = instructions
        .iter()
        .enumerate()
        .map(|(index, instruction)| {
            let program_id = instruction
                .program_id
                .ok_or(WasmSolanaError::MissingProgramId { index })?;
            Ok(CompiledInstruction {
                program_id_index: index_of(&program_id)?,
                accounts: instruction
                    .accounts
                    .iter()
                    .map(|meta| index_of(&meta.pubkey))
                    .collect::<Result<_, _>>()?,
                data: instruction.data.clone(),
            })
        })
        .collect::<Result<Vec<_>, WasmSolanaError>>()?;

    tracing::debug!(
        accounts = account_keys.len(),
        instructions = compiled.len(),
        num_required_signatures = header.num_required_signatures,
        num_readonly_signed = header.num_readonly_signed_accounts,
        num_readonly_unsigned = header.num_readonly_unsigned_accounts,
        "compiled message"
    );

    Ok(Message {
        header,
        account_keys,
        recent_blockhash,
        instructions: compiled,
    })
}

fn collect_program_ids(instructions: &[Instruction]) -> Result<Vec<Pubkey>, WasmSolanaError> {
    let mut program_ids: Vec<Pubkey> = Vec::new();
    for (index, instruction) in instructions.iter().enumerate() {
        let program_id = instruction
            .program_id
            .ok_or(WasmSolanaError::MissingProgramId { index })?;
        if !program_ids.contains(&program_id) {
            program_ids.push(program_id);
        }
    }
    Ok(program_ids)
}

fn compile_header(metas: &[AccountMeta]) -> Result<MessageHeader, WasmSolanaError> {
    let try_into_u8 = |num: usize| -> Result<u8, WasmSolanaError> {
        u8::try_from(num).map_err(|_| WasmSolanaError::AccountIndexOverflow(metas.len()))
    };

    let (signed, unsigned): (Vec<&AccountMeta>, Vec<&AccountMeta>) =
        metas.iter().partition(|meta| meta.is_signer);
    let readonly = |group: &[&AccountMeta]| group.iter().filter(|meta| !meta.is_writable).count();

    Ok(MessageHeader {
        num_required_signatures: try_into_u8(signed.len())?,
        num_readonly_signed_accounts: try_into_u8(readonly(&signed))?,
        num_readonly_unsigned_accounts: try_into_u8(readonly(&unsigned))?,
    })
}
