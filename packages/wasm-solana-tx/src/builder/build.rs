//! Transaction building implementation.
//!
//! Intents are translated into [`Instruction`]s and compiled by
//! [`Transaction`]. A durable nonce becomes [`NonceInformation`], so the
//! advance-nonce instruction is placed first at compile time.

use crate::config::SerializeConfig;
use crate::error::WasmSolanaError;
use crate::instruction::{AccountMeta, Instruction};
use crate::pubkey::Pubkey;
use crate::system;
use crate::transaction::{NonceInformation, Transaction};

use super::types::{InstructionIntent, Nonce, TransactionIntent};

/// Build a transaction from an intent structure.
///
/// Returns the serialized unsigned transaction (wire format).
pub fn build_transaction(intent: TransactionIntent) -> Result<Vec<u8>, WasmSolanaError> {
    let mut tx = transaction_from_intent(intent)?;
    tx.serialize(&SerializeConfig::unchecked())
}

/// Build a transaction from intent JSON text.
pub fn build_transaction_json(json: &str) -> Result<Vec<u8>, WasmSolanaError> {
    let intent: TransactionIntent = serde_json::from_str(json)
        .map_err(|e| WasmSolanaError::InvalidIntent(format!("Failed to parse intent: {}", e)))?;
    build_transaction(intent)
}

/// Translate an intent into an uncompiled transaction.
pub fn transaction_from_intent(intent: TransactionIntent) -> Result<Transaction, WasmSolanaError> {
    let fee_payer = parse_pubkey("feePayer", &intent.fee_payer)?;

    let mut tx = Transaction {
        fee_payer: Some(fee_payer),
        ..Transaction::default()
    };
    match intent.nonce {
        Nonce::Blockhash { value } => tx.recent_blockhash = value,
        Nonce::Durable {
            address,
            authority,
            value,
        } => {
            let nonce = parse_pubkey("nonce.address", &address)?;
            let authority = parse_pubkey("nonce.authority", &authority)?;
            tx.nonce_info = Some(NonceInformation {
                nonce: value,
                nonce_instruction: system::advance_nonce_account(&nonce, &authority),
            });
        }
    }

    for ix in intent.instructions {
        tx.add(build_instruction(ix)?);
    }
    tracing::debug!(
        instructions = tx.instructions.len(),
        durable = tx.nonce_info.is_some(),
        "built transaction from intent"
    );
    Ok(tx)
}

/// Build a single instruction from the InstructionIntent enum.
fn build_instruction(ix: InstructionIntent) -> Result<Instruction, WasmSolanaError> {
    match ix {
        InstructionIntent::Transfer { from, to, lamports } => Ok(system::transfer(
            &parse_pubkey("transfer.from", &from)?,
            &parse_pubkey("transfer.to", &to)?,
            parse_lamports("transfer.lamports", &lamports)?,
        )),

        InstructionIntent::CreateAccount {
            from,
            new_account,
            lamports,
            space,
            owner,
        } => Ok(system::create_account(
            &parse_pubkey("createAccount.from", &from)?,
            &parse_pubkey("createAccount.newAccount", &new_account)?,
            parse_lamports("createAccount.lamports", &lamports)?,
            space,
            &parse_pubkey("createAccount.owner", &owner)?,
        )),

        InstructionIntent::NonceAdvance { nonce, authority } => Ok(system::advance_nonce_account(
            &parse_pubkey("nonceAdvance.nonce", &nonce)?,
            &parse_pubkey("nonceAdvance.authority", &authority)?,
        )),

        InstructionIntent::NonceInitialize { nonce, authority } => {
            Ok(system::initialize_nonce_account(
                &parse_pubkey("nonceInitialize.nonce", &nonce)?,
                &parse_pubkey("nonceInitialize.authority", &authority)?,
            ))
        }

        InstructionIntent::Memo { message, signers } => {
            let signers = signers
                .iter()
                .map(|signer| parse_pubkey("memo.signers", signer))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(system::memo(&message, &signers))
        }

        InstructionIntent::Custom {
            program_id,
            accounts,
            data,
        } => {
            let program_id = parse_pubkey("custom.programId", &program_id)?;
            let accounts = accounts
                .iter()
                .map(|account| {
                    Ok(AccountMeta {
                        pubkey: parse_pubkey("custom.accounts.pubkey", &account.pubkey)?,
                        is_signer: account.is_signer,
                        is_writable: account.is_writable,
                    })
                })
                .collect::<Result<Vec<_>, WasmSolanaError>>()?;
            let data = bs58::decode(&data).into_vec().map_err(|_| {
                WasmSolanaError::InvalidIntent(format!("Invalid custom.data: {}", data))
            })?;
            Ok(Instruction::new(program_id, accounts, data))
        }
    }
}

fn parse_pubkey(field: &str, value: &str) -> Result<Pubkey, WasmSolanaError> {
    Pubkey::from_base58(value)
        .map_err(|_| WasmSolanaError::InvalidIntent(format!("Invalid {}: {}", field, value)))
}

fn parse_lamports(field: &str, value: &str) -> Result<u64, WasmSolanaError> {
    value
        .parse()
        .map_err(|_| WasmSolanaError::InvalidIntent(format!("Invalid {}: {}", field, value)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::AccountIntent;

    const FEE_PAYER: &str = "DgT9qyYwYKBRDyDw3EfR12LHQCQjtNrKu2qMsXHuosmB";
    const RECIPIENT: &str = "FKjSjCqByQRwSzZoMXA7bKnDbJe41YgJTHFFzBeC42bH";
    const BLOCKHASH: &str = "GWaQEymC3Z9SHM2gkh8u12xL1zJPMHPCSVR3pSDpEXE4";

    fn blockhash_intent(instructions: Vec<InstructionIntent>) -> TransactionIntent {
        TransactionIntent {
            fee_payer: FEE_PAYER.to_string(),
            nonce: Nonce::Blockhash {
                value: BLOCKHASH.to_string(),
            },
            instructions,
        }
    }

    fn transfer_intent() -> InstructionIntent {
        InstructionIntent::Transfer {
            from: FEE_PAYER.to_string(),
            to: RECIPIENT.to_string(),
            lamports: "1000000".to_string(),
        }
    }

    #[test]
    fn test_build_simple_transfer() {
        let tx_bytes = build_transaction(blockhash_intent(vec![transfer_intent()])).unwrap();

        let tx = Transaction::from_bytes(&tx_bytes).unwrap();
        assert_eq!(tx.instructions.len(), 1);
        assert_eq!(tx.fee_payer.unwrap().to_base58(), FEE_PAYER);
        assert_eq!(tx.recent_blockhash, BLOCKHASH);
        // one empty signature slot
        assert_eq!(tx_bytes[0], 1);
        assert!(tx.signatures[0].signature.is_none());
    }

    #[test]
    fn test_build_with_memo() {
        let tx_bytes = build_transaction(blockhash_intent(vec![
            transfer_intent(),
            InstructionIntent::Memo {
                message: "BitGo transfer".to_string(),
                signers: vec![],
            },
        ]))
        .unwrap();

        let tx = Transaction::from_bytes(&tx_bytes).unwrap();
        assert_eq!(tx.instructions.len(), 2);
        assert_eq!(tx.instructions[1].program_id, Some(system::MEMO_PROGRAM_ID));
        assert_eq!(tx.instructions[1].data, b"BitGo transfer".to_vec());
    }

    #[test]
    fn test_build_durable_nonce() {
        let nonce_account = "GZNrMEdrt6pKGpPbyEHn8SPCSGSAhEgWVjDXDhkvWnNd";
        let intent = TransactionIntent {
            fee_payer: FEE_PAYER.to_string(),
            nonce: Nonce::Durable {
                address: nonce_account.to_string(),
                authority: FEE_PAYER.to_string(),
                value: RECIPIENT.to_string(),
            },
            instructions: vec![transfer_intent()],
        };

        let tx = Transaction::from_bytes(&build_transaction(intent).unwrap()).unwrap();

        assert_eq!(tx.recent_blockhash, RECIPIENT);
        assert_eq!(tx.instructions.len(), 2);
        assert_eq!(tx.instructions[0].data, vec![4, 0, 0, 0]);
        assert_eq!(tx.instructions[0].accounts[0].pubkey.to_base58(), nonce_account);
    }

    #[test]
    fn test_build_custom_instruction() {
        let program = "Stake11111111111111111111111111111111111111";
        let tx_bytes = build_transaction(blockhash_intent(vec![InstructionIntent::Custom {
            program_id: program.to_string(),
            accounts: vec![AccountIntent {
                pubkey: RECIPIENT.to_string(),
                is_signer: false,
                is_writable: true,
            }],
            data: bs58::encode([1u8, 2, 3]).into_string(),
        }]))
        .unwrap();

        let tx = Transaction::from_bytes(&tx_bytes).unwrap();
        let ix = &tx.instructions[0];
        assert_eq!(ix.program_id.unwrap().to_base58(), program);
        assert_eq!(ix.data, vec![1, 2, 3]);
        assert!(ix.accounts[0].is_writable);
        assert!(!ix.accounts[0].is_signer);
    }

    #[test]
    fn test_invalid_pubkey() {
        let intent = TransactionIntent {
            fee_payer: "invalid".to_string(),
            ..blockhash_intent(vec![transfer_intent()])
        };
        assert!(matches!(
            build_transaction(intent),
            Err(WasmSolanaError::InvalidIntent(_))
        ));
    }

    #[test]
    fn test_invalid_lamports() {
        let intent = blockhash_intent(vec![InstructionIntent::Transfer {
            from: FEE_PAYER.to_string(),
            to: RECIPIENT.to_string(),
            lamports: "-1".to_string(),
        }]);
        assert_eq!(
            build_transaction(intent).unwrap_err(),
            WasmSolanaError::InvalidIntent("Invalid transfer.lamports: -1".to_string())
        );
    }

    #[test]
    fn test_empty_instructions() {
        assert_eq!(
            build_transaction(blockhash_intent(vec![])).unwrap_err(),
            WasmSolanaError::NoInstructions
        );
    }

    #[test]
    fn test_build_from_json() {
        let json = format!(
            r#"{{ "feePayer": "{}", "nonce": {{ "type": "blockhash", "value": "{}" }},
                 "instructions": [{{ "type": "transfer", "from": "{}", "to": "{}", "lamports": "5" }}] }}"#,
            FEE_PAYER, BLOCKHASH, FEE_PAYER, RECIPIENT
        );
        let from_json = build_transaction_json(&json).unwrap();
        let direct = build_transaction(blockhash_intent(vec![InstructionIntent::Transfer {
            from: FEE_PAYER.to_string(),
            to: RECIPIENT.to_string(),
            lamports: "5".to_string(),
        }]))
        .unwrap();
        assert_eq!(from_json, direct);

        assert!(matches!(
            build_transaction_json("{"),
            Err(WasmSolanaError::InvalidIntent(_))
        ));
    }
}
