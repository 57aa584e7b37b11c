//! End-to-end compile, sign and serialize scenarios.

use proptest::prelude::*;
use rstest::rstest;
use wasm_solana_tx::message::MessageHeader;
use wasm_solana_tx::{
    system, AccountMeta, Instruction, Keypair, Pubkey, SerializeConfig, Transaction,
    WasmSolanaError,
};

const BLOCKHASH: &str = "GWaQEymC3Z9SHM2gkh8u12xL1zJPMHPCSVR3pSDpEXE4";

fn keypair(seed: u8) -> Keypair {
    Keypair::from_secret_key_bytes(&[seed; 32]).unwrap()
}

#[test]
fn transfer_signed_by_fee_payer() {
    let a = keypair(1);
    let b = Pubkey::from([2; 32]);
    let mut tx = Transaction::new(a.pubkey(), BLOCKHASH);
    tx.add(system::transfer(&a.pubkey(), &b, 42));

    tx.sign(&[&a]).unwrap();
    let message = tx.compile().unwrap();
    let wire = tx.serialize(&SerializeConfig::default()).unwrap();

    assert_eq!(
        message.header,
        MessageHeader {
            num_required_signatures: 1,
            num_readonly_signed_accounts: 0,
            num_readonly_unsigned_accounts: 1,
        }
    );
    assert_eq!(
        message.account_keys,
        vec![a.pubkey(), b, system::SYSTEM_PROGRAM_ID]
    );
    assert_eq!(wire[0], 1);
    assert_ne!(&wire[1..65], &[0u8; 64][..]);
    assert_eq!(&wire[65..], &message.serialize()[..]);
    assert!(tx.verify_signatures(true).unwrap());
}

#[test]
fn missing_blockhash_fails() {
    let a = keypair(1);
    let mut tx = Transaction {
        fee_payer: Some(a.pubkey()),
        ..Transaction::default()
    };
    tx.add(system::transfer(&a.pubkey(), &Pubkey::from([2; 32]), 42));

    assert_eq!(tx.compile().unwrap_err(), WasmSolanaError::MissingBlockhash);
    assert_eq!(tx.sign(&[&a]).unwrap_err(), WasmSolanaError::MissingBlockhash);
}

#[test]
fn missing_program_id_fails() {
    let a = keypair(1);
    let mut tx = Transaction::new(a.pubkey(), BLOCKHASH);
    tx.add(system::transfer(&a.pubkey(), &Pubkey::from([2; 32]), 42));
    tx.add(Instruction::default());

    assert_eq!(
        tx.compile().unwrap_err(),
        WasmSolanaError::MissingProgramId { index: 1 }
    );
}

#[test]
fn shared_account_is_writable_once() {
    let a = keypair(1);
    let shared = Pubkey::from([5; 32]);
    let program = Pubkey::from([9; 32]);
    let mut tx = Transaction::new(a.pubkey(), BLOCKHASH);
    tx.add(Instruction::new(
        program,
        vec![AccountMeta::new_readonly(shared, false)],
        vec![],
    ));
    tx.add(Instruction::new(
        program,
        vec![AccountMeta::new(shared, false)],
        vec![],
    ));

    let message = tx.compile_message().unwrap();

    let position = message
        .account_keys
        .iter()
        .position(|key| *key == shared)
        .unwrap();
    assert_eq!(
        message.account_keys.iter().filter(|key| **key == shared).count(),
        1
    );
    assert!(message.is_writable(position));
}

#[test]
fn unknown_declared_signer_fails() {
    let a = keypair(1);
    let stranger = Pubkey::from([7; 32]);
    let mut tx = Transaction::new(a.pubkey(), BLOCKHASH);
    tx.add(system::transfer(&a.pubkey(), &Pubkey::from([2; 32]), 42));
    tx.set_signers(&[a.pubkey(), stranger]).unwrap();

    assert_eq!(
        tx.compile_message().unwrap_err(),
        WasmSolanaError::UnknownSigner(stranger)
    );
}

#[test]
fn instruction_change_that_reorders_signers_discards_signatures() {
    let a = keypair(1);
    let b = keypair(2);
    let c = keypair(3);
    let mut tx = Transaction::new(a.pubkey(), BLOCKHASH);
    tx.add(system::memo("first", &[b.pubkey()]));
    tx.sign(&[&a, &b]).unwrap();
    tx.compile().unwrap();
    assert!(tx.signatures.iter().all(|slot| slot.signature.is_some()));

    // c becomes a writable signer ahead of the read-only signer b
    tx.instructions
        .insert(0, system::transfer(&c.pubkey(), &Pubkey::from([4; 32]), 1));
    let message = tx.compile().unwrap();

    assert_eq!(message.signer_keys(), &[a.pubkey(), c.pubkey(), b.pubkey()]);
    assert!(tx.signatures.iter().all(|slot| slot.signature.is_none()));
}

#[test]
fn multisig_wire_roundtrip() {
    let payer = keypair(1);
    let new_account = keypair(2);
    let mut tx = Transaction::new(payer.pubkey(), BLOCKHASH);
    tx.add(system::create_account(
        &payer.pubkey(),
        &new_account.pubkey(),
        2_039_280,
        165,
        &Pubkey::from([6; 32]),
    ));
    tx.add(system::memo("multisig", &[]));
    tx.partial_sign(&[&new_account]).unwrap();
    tx.partial_sign(&[&payer]).unwrap();

    let encoded = tx.to_base64(&SerializeConfig::default()).unwrap();
    let mut parsed = Transaction::from_base64(&encoded).unwrap();

    assert_eq!(parsed.signatures, tx.signatures);
    assert_eq!(parsed.to_base64(&SerializeConfig::default()).unwrap(), encoded);
}

#[rstest]
#[case::default_ceiling(SerializeConfig::default().packet_data_size, true)]
#[case::tiny_ceiling(100, false)]
fn packet_ceiling_is_injected(#[case] packet_data_size: usize, #[case] fits: bool) {
    let a = keypair(1);
    let mut tx = Transaction::new(a.pubkey(), BLOCKHASH);
    tx.add(system::memo(&"x".repeat(200), &[]));
    tx.sign(&[&a]).unwrap();

    let config = SerializeConfig {
        packet_data_size,
        ..SerializeConfig::default()
    };
    let result = tx.serialize(&config);

    if fits {
        assert!(result.is_ok());
    } else {
        assert!(matches!(
            result,
            Err(WasmSolanaError::TransactionTooLarge { max: 100, .. })
        ));
    }
}

fn account_meta() -> impl Strategy<Value = AccountMeta> {
    (0u8..6, any::<bool>(), any::<bool>()).prop_map(|(seed, is_signer, is_writable)| {
        AccountMeta {
            pubkey: Pubkey::from([seed; 32]),
            is_signer,
            is_writable,
        }
    })
}

proptest! {
    #[test]
    fn compiled_table_invariants(
        accounts in prop::collection::vec(prop::collection::vec(account_meta(), 0..5), 1..4),
    ) {
        let fee_payer = Pubkey::from([200; 32]);
        let program = Pubkey::from([100; 32]);
        let mut tx = Transaction::new(fee_payer, BLOCKHASH);
        for metas in &accounts {
            tx.add(Instruction::new(program, metas.clone(), vec![1]));
        }

        let first = tx.compile_message().unwrap();
        let second = tx.compile_message().unwrap();
        prop_assert_eq!(first.serialize(), second.serialize());

        prop_assert_eq!(first.account_keys[0], fee_payer);
        prop_assert!(first.is_signer(0));
        prop_assert!(first.is_writable(0));

        let mut keys = first.account_keys.clone();
        keys.sort();
        keys.dedup();
        prop_assert_eq!(keys.len(), first.account_keys.len());

        for meta in accounts.iter().flatten() {
            let index = first.account_keys.iter().position(|key| *key == meta.pubkey).unwrap();
            if meta.is_signer {
                prop_assert!(first.is_signer(index));
            }
            if meta.is_writable {
                prop_assert!(first.is_writable(index));
            }
        }
    }
}
