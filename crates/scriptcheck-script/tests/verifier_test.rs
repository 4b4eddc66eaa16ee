use scriptcheck_primitives::ec::{KeyPair, PublicKey, Signature};
use scriptcheck_primitives::hash::hash160;
use scriptcheck_script::opcodes::*;
use scriptcheck_script::template::{multisig, p2pkh, UnlockingScriptTemplate};
use scriptcheck_script::{
    verify, verify_scripts, Address, LockingScript, MultisigLock, Network, P2pkhLock, RejectReason,
    Script, ScriptError, ScriptFlags, UnlockingScript, VerificationResult, Verifier,
};

const MESSAGE: &[u8] = b"sighash of input 0";

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn rejected(reason: RejectReason) -> VerificationResult {
    VerificationResult::Rejected(reason)
}

struct TwoOfThree {
    a: KeyPair,
    b: KeyPair,
    c: KeyPair,
    locking: LockingScript,
}

impl TwoOfThree {
    fn new() -> Self {
        let (a, b, c) = (KeyPair::generate(), KeyPair::generate(), KeyPair::generate());
        let locking = multisig::lock(
            2,
            vec![
                a.public_key().clone(),
                b.public_key().clone(),
                c.public_key().clone(),
            ],
        )
        .unwrap();
        TwoOfThree { a, b, c, locking }
    }

    fn sigs(&self, signers: &[&KeyPair]) -> UnlockingScript {
        UnlockingScript::multisig(signers.iter().map(|k| k.sign(MESSAGE).unwrap()).collect())
    }
}

// -- P2PKH --

#[test]
fn test_p2pkh_sign_then_verify() {
    init_tracing();
    let messages: [&[u8]; 4] = [b"", b"a", MESSAGE, &[0xff; 1000]];
    for message in messages {
        let kp = KeyPair::generate();
        let locking = p2pkh::lock(kp.public_key());
        let unlocking = p2pkh::unlock(&kp).sign(message).unwrap();
        assert_eq!(verify(&locking, &unlocking, message), VerificationResult::Accepted);
    }
}

#[test]
fn test_p2pkh_any_bit_flip_is_invalid_signature() {
    init_tracing();
    let kp = KeyPair::generate();
    let locking = p2pkh::lock(kp.public_key());
    let signature = kp.sign(MESSAGE).unwrap();
    let public_key = kp.public_key().to_bytes();

    for byte in 0..signature.len() {
        for bit in 0..8 {
            let mut flipped = signature.clone();
            flipped[byte] ^= 1 << bit;
            let unlocking = UnlockingScript::p2pkh(flipped, public_key.clone());
            assert_eq!(
                verify(&locking, &unlocking, MESSAGE),
                rejected(RejectReason::InvalidSignature),
                "byte {} bit {}",
                byte,
                bit
            );
        }
    }
}

#[test]
fn test_p2pkh_hash_mismatch_wins_over_signature() {
    let owner = KeyPair::generate();
    let thief = KeyPair::generate();
    let locking = p2pkh::lock(owner.public_key());

    // Valid signature, wrong key.
    let unlocking = p2pkh::unlock(&thief).sign(MESSAGE).unwrap();
    assert_eq!(
        verify(&locking, &unlocking, MESSAGE),
        rejected(RejectReason::PubKeyHashMismatch)
    );

    // Garbage signature, wrong key.
    let unlocking = UnlockingScript::p2pkh(vec![0x00], thief.public_key().to_bytes());
    assert_eq!(
        verify(&locking, &unlocking, MESSAGE),
        rejected(RejectReason::PubKeyHashMismatch)
    );

    // The owner's key in its other encoding hashes differently.
    let unlocking = UnlockingScript::p2pkh(
        owner.sign(MESSAGE).unwrap(),
        owner.public_key().to_uncompressed().to_vec(),
    );
    assert_eq!(
        verify(&locking, &unlocking, MESSAGE),
        rejected(RejectReason::PubKeyHashMismatch)
    );
}

#[test]
fn test_p2pkh_from_address() {
    let kp = KeyPair::generate();
    let address = Address::from_public_key(kp.public_key(), Network::Testnet);
    let parsed = Address::from_string(&address.to_string()).unwrap();
    let locking = LockingScript::p2pkh_from_address(&parsed);
    let unlocking = p2pkh::unlock(&kp).sign(MESSAGE).unwrap();
    assert!(verify(&locking, &unlocking, MESSAGE).is_accepted());
}

// -- Multisig --

#[test]
fn test_two_of_three_in_key_order() {
    init_tracing();
    let t = TwoOfThree::new();
    for signers in [[&t.a, &t.b], [&t.a, &t.c], [&t.b, &t.c]] {
        assert_eq!(
            verify(&t.locking, &t.sigs(&signers), MESSAGE),
            VerificationResult::Accepted
        );
    }
    assert!(verify(&t.locking, &t.sigs(&[&t.a, &t.b, &t.c]), MESSAGE).is_accepted());
}

#[test]
fn test_two_of_three_out_of_order() {
    init_tracing();
    let t = TwoOfThree::new();
    for signers in [[&t.b, &t.a], [&t.c, &t.a], [&t.c, &t.b]] {
        let result = verify(&t.locking, &t.sigs(&signers), MESSAGE);
        assert_eq!(result, rejected(RejectReason::InvalidSignature));
    }
}

#[test]
fn test_two_of_three_single_signature() {
    let t = TwoOfThree::new();
    assert_eq!(
        verify(&t.locking, &t.sigs(&[&t.a]), MESSAGE),
        rejected(RejectReason::InsufficientSignatures)
    );
    assert_eq!(
        verify(&t.locking, &UnlockingScript::multisig(vec![]), MESSAGE),
        rejected(RejectReason::InsufficientSignatures)
    );
}

#[test]
fn test_two_of_three_too_many_signatures() {
    let t = TwoOfThree::new();
    assert_eq!(
        verify(&t.locking, &t.sigs(&[&t.a, &t.b, &t.c, &t.c]), MESSAGE),
        rejected(RejectReason::SignatureCountInvalid)
    );
}

#[test]
fn test_multisig_signature_over_other_message() {
    let t = TwoOfThree::new();
    let unlocking = UnlockingScript::multisig(vec![
        t.a.sign(MESSAGE).unwrap(),
        t.b.sign(b"different message").unwrap(),
    ]);
    assert_eq!(
        verify(&t.locking, &unlocking, MESSAGE),
        rejected(RejectReason::InvalidSignature)
    );
}

#[test]
fn test_multisig_template_any_signer_order() {
    let keys: Vec<KeyPair> = (0..5).map(|_| KeyPair::generate()).collect();
    let lock = MultisigLock::new(3, keys.iter().map(|k| k.public_key().clone()).collect()).unwrap();
    let signers = vec![keys[4].clone(), keys[0].clone(), keys[2].clone()];
    let unlocking = multisig::unlock(&lock, &signers).sign(MESSAGE).unwrap();
    assert!(verify(&LockingScript::Multisig(lock), &unlocking, MESSAGE).is_accepted());
}

#[test]
fn test_multisig_construction_bounds() {
    let pubs: Vec<PublicKey> = (0..3).map(|_| KeyPair::generate().public_key().clone()).collect();
    for required in [0, 4] {
        let err = LockingScript::multisig(required, pubs.clone()).unwrap_err();
        assert!(matches!(err, ScriptError::MalformedInput(_)));
        assert_eq!(err.reason(), RejectReason::MalformedInput);
    }
    assert!(matches!(
        LockingScript::multisig(1, vec![]),
        Err(ScriptError::MalformedInput(_))
    ));
}

// -- Dispatch and determinism --

#[test]
fn test_template_mismatch_is_malformed() {
    let kp = KeyPair::generate();
    let t = TwoOfThree::new();
    let p2pkh_unlock = p2pkh::unlock(&kp).sign(MESSAGE).unwrap();
    assert_eq!(
        verify(&t.locking, &p2pkh_unlock, MESSAGE),
        rejected(RejectReason::MalformedInput)
    );
    assert_eq!(
        verify(&p2pkh::lock(kp.public_key()), &t.sigs(&[&t.a, &t.b]), MESSAGE),
        rejected(RejectReason::MalformedInput)
    );
}

#[test]
fn test_verification_is_idempotent() {
    let kp = KeyPair::generate();
    let locking = p2pkh::lock(kp.public_key());
    let good = p2pkh::unlock(&kp).sign(MESSAGE).unwrap();
    assert_eq!(verify(&locking, &good, MESSAGE), verify(&locking, &good, MESSAGE));
    assert_eq!(verify(&locking, &good, b"x"), verify(&locking, &good, b"x"));

    let t = TwoOfThree::new();
    for signers in [vec![&t.a, &t.b], vec![&t.b, &t.a], vec![&t.a]] {
        let unlocking = t.sigs(&signers);
        assert_eq!(
            verify(&t.locking, &unlocking, MESSAGE),
            verify(&t.locking, &unlocking, MESSAGE)
        );
    }
}

#[test]
fn test_concurrent_verification() {
    let t = TwoOfThree::new();
    let unlocking = t.sigs(&[&t.a, &t.c]);
    let verifier = Verifier::default();
    let (locking, unlocking) = (&t.locking, &unlocking);
    std::thread::scope(|s| {
        let handles: Vec<_> = (0..4)
            .map(|_| s.spawn(move || verifier.verify(locking, unlocking, MESSAGE)))
            .collect();
        for h in handles {
            assert_eq!(h.join().unwrap(), VerificationResult::Accepted);
        }
    });
}

// -- Raw scripts and flags --

#[test]
fn test_verify_scripts_round_trip() {
    init_tracing();
    let kp = KeyPair::generate();
    let locking = p2pkh::lock(kp.public_key()).to_script().unwrap();
    let unlocking = p2pkh::unlock(&kp).sign(MESSAGE).unwrap().to_script().unwrap();
    assert!(locking.is_p2pkh());
    assert_eq!(verify_scripts(&locking, &unlocking, MESSAGE), VerificationResult::Accepted);

    let t = TwoOfThree::new();
    let locking = t.locking.to_script().unwrap();
    assert!(locking.is_multisig_out());
    let unlocking = t.sigs(&[&t.b, &t.c]).to_script().unwrap();
    assert_eq!(verify_scripts(&locking, &unlocking, MESSAGE), VerificationResult::Accepted);

    let reversed = t.sigs(&[&t.c, &t.b]).to_script().unwrap();
    assert_eq!(
        verify_scripts(&locking, &reversed, MESSAGE),
        rejected(RejectReason::InvalidSignature)
    );
}

#[test]
fn test_verify_scripts_unparseable_input() {
    let kp = KeyPair::generate();
    let unlocking = p2pkh::unlock(&kp).sign(MESSAGE).unwrap().to_script().unwrap();

    // Not a supported locking template.
    let locking = Script::from_asm("OP_DUP OP_CHECKSIG").unwrap();
    assert_eq!(
        verify_scripts(&locking, &unlocking, MESSAGE),
        rejected(RejectReason::MalformedInput)
    );

    // Truncated push in the unlocking script.
    let locking = p2pkh::lock(kp.public_key()).to_script().unwrap();
    let truncated = Script::from_hex("4730").unwrap();
    assert_eq!(
        verify_scripts(&locking, &truncated, MESSAGE),
        rejected(RejectReason::MalformedInput)
    );

    // Opcode in the unlocking script.
    let mut bytes = unlocking.to_bytes().to_vec();
    bytes.push(OP_DUP);
    assert_eq!(
        verify_scripts(&locking, &Script::from(bytes), MESSAGE),
        rejected(RejectReason::MalformedInput)
    );
}

#[test]
fn test_non_minimal_push_depends_on_flag() {
    let kp = KeyPair::generate();
    let locking = p2pkh::lock(kp.public_key()).to_script().unwrap();
    let signature = kp.sign(MESSAGE).unwrap();
    let public_key = kp.public_key().to_bytes();

    let mut bytes = vec![OP_PUSHDATA1, signature.len() as u8];
    bytes.extend_from_slice(&signature);
    bytes.push(public_key.len() as u8);
    bytes.extend_from_slice(&public_key);
    let unlocking = Script::from(bytes);

    assert_eq!(
        verify_scripts(&locking, &unlocking, MESSAGE),
        rejected(RejectReason::MalformedInput)
    );
    let lax = Verifier::with_flags(ScriptFlags::STRICT_MULTI_SIG | ScriptFlags::VERIFY_LOW_S);
    assert!(lax.verify_scripts(&locking, &unlocking, MESSAGE).is_accepted());
}

#[test]
fn test_multisig_dummy_depends_on_flag() {
    let t = TwoOfThree::new();
    let locking = t.locking.to_script().unwrap();
    let standard = t.sigs(&[&t.a, &t.b]).to_script().unwrap();

    // Swap the empty dummy for a minimal one-byte push.
    let mut bytes = vec![OP_DATA_1, 0x42];
    bytes.extend_from_slice(&standard.to_bytes()[1..]);
    let unlocking = Script::from(bytes);

    assert_eq!(
        verify_scripts(&locking, &unlocking, MESSAGE),
        rejected(RejectReason::MalformedInput)
    );
    let lax = Verifier::with_flags(ScriptFlags::VERIFY_LOW_S | ScriptFlags::VERIFY_MINIMAL_DATA);
    assert!(lax.verify_scripts(&locking, &unlocking, MESSAGE).is_accepted());
}

#[test]
fn test_high_s_depends_on_flag() {
    let kp = KeyPair::generate();
    let locking = p2pkh::lock(kp.public_key());
    let low = Signature::from_der(&kp.sign(MESSAGE).unwrap()).unwrap();
    let unlocking = UnlockingScript::p2pkh(low.negate_s().to_der(), kp.public_key().to_bytes());

    assert_eq!(
        verify(&locking, &unlocking, MESSAGE),
        rejected(RejectReason::InvalidSignature)
    );
    assert!(Verifier::with_flags(ScriptFlags::NONE)
        .verify(&locking, &unlocking, MESSAGE)
        .is_accepted());
}

#[test]
fn test_rejection_propagates_with_question_mark() {
    fn check(locking: &LockingScript, unlocking: &UnlockingScript) -> Result<(), RejectReason> {
        verify(locking, unlocking, MESSAGE).into_result()?;
        Ok(())
    }

    let t = TwoOfThree::new();
    assert_eq!(check(&t.locking, &t.sigs(&[&t.a, &t.b])), Ok(()));
    assert_eq!(
        check(&t.locking, &t.sigs(&[&t.a])),
        Err(RejectReason::InsufficientSignatures)
    );
}

#[test]
fn test_p2pkh_compact_key_prefix_is_invalid_signature() {
    let kp = KeyPair::generate();
    let mut public_key = kp.public_key().to_bytes();
    public_key[0] = 0x05;
    let locking = LockingScript::P2PKH(P2pkhLock::new(hash160(&public_key)));
    let unlocking = UnlockingScript::p2pkh(kp.sign(MESSAGE).unwrap(), public_key);
    assert_eq!(
        verify(&locking, &unlocking, MESSAGE),
        rejected(RejectReason::InvalidSignature)
    );
}

#[test]
fn test_single_zero_byte_signature_is_minimal() {
    let kp = KeyPair::generate();
    let locking = p2pkh::lock(kp.public_key()).to_script().unwrap();
    let public_key = kp.public_key().to_bytes();

    let mut bytes = vec![OP_DATA_1, 0x00, public_key.len() as u8];
    bytes.extend_from_slice(&public_key);
    assert_eq!(
        verify_scripts(&locking, &Script::from(bytes), MESSAGE),
        rejected(RejectReason::InvalidSignature)
    );
}
