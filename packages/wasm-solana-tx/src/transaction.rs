//! Solana transaction construction, signing and wire serialization.
//!
//! # Wire Format
//!
//! Solana transactions use a compact binary format:
//! - Signatures: compact length + N x 64 bytes, one per required signer in
//!   account-table order (unsigned slots are 64 zero bytes)
//! - Message: see [`crate::message`]
//!
//! A [`Transaction`] is the mutable builder form. Every operation that needs
//! the message recompiles it, so instructions and the fee payer can be
//! changed freely until signing. Signatures survive a recompilation only if
//! the signer order is unchanged.

use crate::compiler;
use crate::config::SerializeConfig;
use crate::error::WasmSolanaError;
use crate::hash::Hash;
use crate::instruction::{AccountMeta, Instruction};
use crate::keypair::Keypair;
use crate::message::{ByteReader, Message};
use crate::pubkey::Pubkey;
use crate::shortvec::append_length;
use crate::signature::{Signature, SignaturePubkeyPair, SIGNATURE_BYTES};
use base64::prelude::*;
use std::borrow::Cow;

/// Durable nonce in place of a recent blockhash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NonceInformation {
    /// Nonce value stored in the nonce account (becomes the blockhash).
    pub nonce: String,
    /// Instruction advancing the nonce; always compiled first.
    pub nonce_instruction: Instruction,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Transaction {
    /// Signature slots, in the order of the compiled signer prefix once
    /// compiled.
    pub signatures: Vec<SignaturePubkeyPair>,
    /// Explicit fee payer. Falls back to the first signature slot.
    pub fee_payer: Option<Pubkey>,
    pub instructions: Vec<Instruction>,
    /// Base58 recent blockhash. Empty means not set.
    pub recent_blockhash: String,
    pub nonce_info: Option<NonceInformation>,
}

impl Transaction {
    pub fn new(fee_payer: Pubkey, recent_blockhash: impl Into<String>) -> Self {
        Transaction {
            fee_payer: Some(fee_payer),
            recent_blockhash: recent_blockhash.into(),
            ..Transaction::default()
        }
    }

    pub fn add(&mut self, instruction: Instruction) -> &mut Self {
        self.instructions.push(instruction);
        self
    }

    pub fn add_instructions(
        &mut self,
        instructions: impl IntoIterator<Item = Instruction>,
    ) -> &mut Self {
        self.instructions.extend(instructions);
        self
    }

    /// Compile the message without touching the signature slots.
    pub fn compile_message(&self) -> Result<Message, WasmSolanaError> {
        let (instructions, recent_blockhash): (Cow<'_, [Instruction]>, &str) =
            match &self.nonce_info {
                Some(nonce_info)
                    if self.instructions.first() != Some(&nonce_info.nonce_instruction) =>
                {
                    let mut spliced = Vec::with_capacity(self.instructions.len() + 1);
                    spliced.push(nonce_info.nonce_instruction.clone());
                    spliced.extend(self.instructions.iter().cloned());
                    (Cow::Owned(spliced), nonce_info.nonce.as_str())
                }
                _ => (
                    Cow::Borrowed(self.instructions.as_slice()),
                    self.recent_blockhash.as_str(),
                ),
            };

        if recent_blockhash.is_empty() {
            return Err(WasmSolanaError::MissingBlockhash);
        }
        if instructions.is_empty() {
            return Err(WasmSolanaError::NoInstructions);
        }
        let fee_payer = self
            .fee_payer
            .or_else(|| self.signatures.first().map(|slot| slot.pubkey))
            .ok_or(WasmSolanaError::MissingFeePayer)?;
        let recent_blockhash = Hash::from_base58(recent_blockhash)?;

        let declared_signers: Vec<Pubkey> =
            self.signatures.iter().map(|slot| slot.pubkey).collect();
        compiler::compile_message(&instructions, &fee_payer, &declared_signers, recent_blockhash)
    }

    /// Compile the message and reconcile the signature slots with its signer
    /// prefix.
    ///
    /// Slots are kept as-is when they already match the signer prefix
    /// position for position. Otherwise they are replaced by empty slots in
    /// the new signer order, discarding every attached signature.
    pub fn compile(&mut self) -> Result<Message, WasmSolanaError> {
        let message = self.compile_message()?;
        self.reconcile_slots(&message);
        Ok(message)
    }

    fn reconcile_slots(&mut self, message: &Message) {
        let signer_keys = message.signer_keys();

        let in_order = self.signatures.len() == signer_keys.len()
            && self
                .signatures
                .iter()
                .zip(signer_keys)
                .all(|(slot, key)| slot.pubkey == *key);
        if !in_order {
            let discarded = self
                .signatures
                .iter()
                .filter(|slot| slot.signature.is_some())
                .count();
            tracing::debug!(
                signers = signer_keys.len(),
                discarded,
                "signer order changed, resetting signature slots"
            );
            self.signatures = signer_keys
                .iter()
                .map(|key| SignaturePubkeyPair::unsigned(*key))
                .collect();
        }
    }

    /// The bytes covered by signatures.
    pub fn serialize_message(&mut self) -> Result<Vec<u8>, WasmSolanaError> {
        Ok(self.compile()?.serialize())
    }

    /// Replace the signature slots with empty slots for `signers`
    /// (deduplicated, first occurrence wins).
    pub fn set_signers(&mut self, signers: &[Pubkey]) -> Result<(), WasmSolanaError> {
        if signers.is_empty() {
            return Err(WasmSolanaError::NoSigners);
        }
        let mut slots: Vec<SignaturePubkeyPair> = Vec::with_capacity(signers.len());
        for signer in signers {
            if !slots.iter().any(|slot| slot.pubkey == *signer) {
                slots.push(SignaturePubkeyPair::unsigned(*signer));
            }
        }
        self.signatures = slots;
        Ok(())
    }

    /// Sign with every given keypair, declaring a slot for each one that has
    /// none yet. Without an explicit fee payer the first declared slot pays.
    pub fn sign(&mut self, signers: &[&Keypair]) -> Result<(), WasmSolanaError> {
        let signers = unique_signers(signers)?;
        let declared = self.signatures.len();
        for signer in &signers {
            let pubkey = signer.pubkey();
            if !self.signatures.iter().any(|slot| slot.pubkey == pubkey) {
                self.signatures.push(SignaturePubkeyPair::unsigned(pubkey));
            }
        }
        let result = self.sign_unique(&signers);
        if result.is_err() {
            self.signatures.truncate(declared);
        }
        result
    }

    /// Sign with keypairs that already correspond to a required signer,
    /// keeping signatures attached earlier.
    pub fn partial_sign(&mut self, signers: &[&Keypair]) -> Result<(), WasmSolanaError> {
        let signers = unique_signers(signers)?;
        self.sign_unique(&signers)
    }

    fn sign_unique(&mut self, signers: &[&Keypair]) -> Result<(), WasmSolanaError> {
        let message = self.compile_message()?;
        let payload = message.serialize();

        let signed = signers
            .iter()
            .map(|signer| {
                let index = signer_position(&message, &signer.pubkey())?;
                Ok((index, signer.sign_message(&payload)))
            })
            .collect::<Result<Vec<_>, WasmSolanaError>>()?;
        self.reconcile_slots(&message);
        for (index, signature) in signed {
            self.signatures[index].signature = Some(signature);
        }

        tracing::debug!(signers = signers.len(), "signed transaction");
        Ok(())
    }

    /// Attach an externally produced signature for `pubkey`.
    pub fn add_signature(
        &mut self,
        pubkey: &Pubkey,
        signature: &[u8],
    ) -> Result<(), WasmSolanaError> {
        let signature = Signature::try_from(signature)?;
        let message = self.compile_message()?;
        let index = signer_position(&message, pubkey)?;
        self.reconcile_slots(&message);
        self.signatures[index].signature = Some(signature);
        Ok(())
    }

    /// The fee payer's signature, if attached.
    pub fn signature(&self) -> Option<&Signature> {
        self.signatures
            .first()
            .and_then(|slot| slot.signature.as_ref())
    }

    /// Verify every attached signature against the current message.
    ///
    /// Unsigned slots fail the check only when `require_all_signatures` is set.
    pub fn verify_signatures(
        &mut self,
        require_all_signatures: bool,
    ) -> Result<bool, WasmSolanaError> {
        let payload = self.serialize_message()?;
        Ok(self.verify_payload(&payload, require_all_signatures))
    }

    fn verify_payload(&self, payload: &[u8], require_all_signatures: bool) -> bool {
        self.signatures.iter().all(|slot| match &slot.signature {
            None => !require_all_signatures,
            Some(signature) => signature.verify(&slot.pubkey, payload),
        })
    }

    /// Serialize to wire format.
    pub fn serialize(&mut self, config: &SerializeConfig) -> Result<Vec<u8>, WasmSolanaError> {
        let payload = self.serialize_message()?;
        if config.verify_signatures
            && !self.verify_payload(&payload, config.require_all_signatures)
        {
            return Err(WasmSolanaError::SignatureVerificationFailed);
        }

        let mut wire =
            Vec::with_capacity(3 + self.signatures.len() * SIGNATURE_BYTES + payload.len());
        append_length(&mut wire, self.signatures.len());
        for slot in &self.signatures {
            let signature = slot.signature.unwrap_or_default();
            wire.extend_from_slice(signature.as_bytes());
        }
        wire.extend_from_slice(&payload);

        if wire.len() > config.packet_data_size {
            return Err(WasmSolanaError::TransactionTooLarge {
                size: wire.len(),
                max: config.packet_data_size,
            });
        }
        tracing::debug!(
            size = wire.len(),
            signatures = self.signatures.len(),
            "serialized transaction"
        );
        Ok(wire)
    }

    /// Serialize to wire format and encode as base64.
    pub fn to_base64(&mut self, config: &SerializeConfig) -> Result<String, WasmSolanaError> {
        Ok(BASE64_STANDARD.encode(self.serialize(config)?))
    }

    /// Parse a transaction from raw bytes (wire format).
    pub fn from_bytes(bytes: &[u8]) -> Result<Transaction, WasmSolanaError> {
        let mut reader = ByteReader::new(bytes);
        let num_signatures = reader.read_length()?;
        let mut signatures =
            Vec::with_capacity(num_signatures.min(reader.remaining() / SIGNATURE_BYTES));
        for _ in 0..num_signatures {
            signatures.push(Signature::from(reader.read_array::<SIGNATURE_BYTES>()?));
        }
        let message = Message::read_from(&mut reader)?;
        reader.finish()?;
        Transaction::populate(message, signatures)
    }

    /// Parse a transaction from a base64 string.
    pub fn from_base64(base64_str: &str) -> Result<Transaction, WasmSolanaError> {
        let bytes = BASE64_STANDARD
            .decode(base64_str)
            .map_err(|e| WasmSolanaError::InvalidEncoding(e.to_string()))?;
        Transaction::from_bytes(&bytes)
    }

    /// Rebuild an uncompiled transaction from a compiled message and its
    /// signatures. All-zero signatures are treated as absent.
    pub fn populate(
        message: Message,
        signatures: Vec<Signature>,
    ) -> Result<Transaction, WasmSolanaError> {
        let mut transaction = Transaction {
            recent_blockhash: message.recent_blockhash.to_string(),
            ..Transaction::default()
        };
        if message.header.num_required_signatures > 0 {
            transaction.fee_payer = message.account_keys.first().copied();
        }

        for (index, signature) in signatures.into_iter().enumerate() {
            let pubkey = *message.account_keys.get(index).ok_or_else(|| {
                WasmSolanaError::malformed("more signatures than account keys")
            })?;
            transaction.signatures.push(SignaturePubkeyPair {
                pubkey,
                signature: (signature != Signature::default()).then_some(signature),
            });
        }

        let key_at = |index: u8| -> Result<Pubkey, WasmSolanaError> {
            message
                .account_keys
                .get(usize::from(index))
                .copied()
                .ok_or_else(|| {
                    WasmSolanaError::MalformedMessage(format!(
                        "account index {} out of range",
                        index
                    ))
                })
        };
        for compiled in &message.instructions {
            let accounts = compiled
                .accounts
                .iter()
                .map(|&index| {
                    let pubkey = key_at(index)?;
                    let position = usize::from(index);
                    Ok(AccountMeta {
                        pubkey,
                        is_signer: transaction
                            .signatures
                            .iter()
                            .any(|slot| slot.pubkey == pubkey)
                            || message.is_signer(position),
                        is_writable: message.is_writable(position),
                    })
                })
                .collect::<Result<Vec<_>, WasmSolanaError>>()?;
            let program_id = key_at(compiled.program_id_index)?;
            transaction.instructions.push(Instruction::new(
                program_id,
                accounts,
                compiled.data.clone(),
            ));
        }
        Ok(transaction)
    }
}

/// Position of `pubkey` in the signer prefix, which is also its slot index
/// once the slots are reconciled with `message`.
fn signer_position(message: &Message, pubkey: &Pubkey) -> Result<usize, WasmSolanaError> {
    message
        .signer_keys()
        .iter()
        .position(|key| key == pubkey)
        .ok_or(WasmSolanaError::UnknownSigner(*pubkey))
}

fn unique_signers<'a>(signers: &[&'a Keypair]) -> Result<Vec<&'a Keypair>, WasmSolanaError> {
    if signers.is_empty() {
        return Err(WasmSolanaError::NoSigners);
    }
    let mut unique: Vec<&Keypair> = Vec::with_capacity(signers.len());
    for signer in signers {
        if !unique.iter().any(|seen| seen.pubkey() == signer.pubkey()) {
            unique.push(*signer);
        }
    }
    Ok(unique)
}
