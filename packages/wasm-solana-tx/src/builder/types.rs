//! Types for transaction building.
//!
//! These types are designed to be serialized from JavaScript via serde.
//! They use string representations for public keys and amounts to ensure
//! compatibility with JavaScript's number limitations.

use serde::Deserialize;

/// Nonce source for transaction - either a recent blockhash or durable nonce account.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Nonce {
    /// Use a recent blockhash (standard transactions)
    Blockhash { value: String },
    /// Use a durable nonce account (offline signing)
    Durable {
        address: String,
        authority: String,
        /// Nonce value stored in the account (this becomes the blockhash)
        value: String,
    },
}

/// Intent to build a transaction.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionIntent {
    /// The fee payer's public key (base58)
    pub fee_payer: String,
    /// Nonce source
    pub nonce: Nonce,
    /// List of instructions to include
    pub instructions: Vec<InstructionIntent>,
}

/// An account reference of a custom instruction.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountIntent {
    pub pubkey: String,
    #[serde(default)]
    pub is_signer: bool,
    #[serde(default)]
    pub is_writable: bool,
}

/// An instruction to include in the transaction, selected by its `type` field.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum InstructionIntent {
    /// Transfer SOL from one account to another
    Transfer {
        from: String,
        to: String,
        /// Amount in lamports (as string for BigInt compatibility)
        lamports: String,
    },

    /// Create a new account
    #[serde(rename_all = "camelCase")]
    CreateAccount {
        from: String,
        new_account: String,
        /// Lamports to transfer to new account (as string)
        lamports: String,
        /// Space to allocate in bytes
        space: u64,
        /// Program owner of the new account
        owner: String,
    },

    /// Advance a nonce account
    NonceAdvance { nonce: String, authority: String },

    /// Initialize a nonce account
    NonceInitialize { nonce: String, authority: String },

    /// Add a memo to the transaction
    Memo {
        message: String,
        #[serde(default)]
        signers: Vec<String>,
    },

    /// Arbitrary program invocation
    #[serde(rename_all = "camelCase")]
    Custom {
        program_id: String,
        #[serde(default)]
        accounts: Vec<AccountIntent>,
        /// Instruction data, base58 encoded
        #[serde(default)]
        data: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_intent() {
        let intent: TransactionIntent = serde_json::from_str(
            r#"{
                "feePayer": "DgT9qyYwYKBRDyDw3EfR12LHQCQjtNrKu2qMsXHuosmB",
                "nonce": { "type": "blockhash", "value": "GWaQEymC3Z9SHM2gkh8u12xL1zJPMHPCSVR3pSDpEXE4" },
                "instructions": [
                    { "type": "transfer", "from": "a", "to": "b", "lamports": "10" },
                    { "type": "createAccount", "from": "a", "newAccount": "c", "lamports": "1", "space": 8, "owner": "d" },
                    { "type": "memo", "message": "hi" },
                    { "type": "custom", "programId": "p", "accounts": [{ "pubkey": "a", "isWritable": true }] }
                ]
            }"#,
        )
        .unwrap();

        assert!(matches!(intent.nonce, Nonce::Blockhash { .. }));
        assert_eq!(intent.instructions.len(), 4);
        match &intent.instructions[1] {
            InstructionIntent::CreateAccount { new_account, space, .. } => {
                assert_eq!(new_account, "c");
                assert_eq!(*space, 8);
            }
            other => panic!("unexpected instruction {:?}", other),
        }
        match &intent.instructions[3] {
            InstructionIntent::Custom { accounts, data, .. } => {
                assert!(!accounts[0].is_signer);
                assert!(accounts[0].is_writable);
                assert!(data.is_empty());
            }
            other => panic!("unexpected instruction {:?}", other),
        }
    }

    #[test]
    fn test_unknown_instruction_type_rejected() {
        let result: Result<InstructionIntent, _> =
            serde_json::from_str(r#"{ "type": "stakeDelegate", "stake": "a" }"#);
        assert!(result.is_err());
    }
}
