//! Pay-to-Public-Key-Hash (P2PKH) script template.
//!
//! Creates standard P2PKH locking scripts (`OP_DUP OP_HASH160 <hash>
//! OP_EQUALVERIFY OP_CHECKSIG`) and unlocking scripts (`<sig> <pubkey>`).

use scriptcheck_primitives::ec::{KeyPair, PublicKey};

use crate::template::UnlockingScriptTemplate;
use crate::{LockingScript, ScriptError, UnlockingScript};

/// Create a P2PKH locking script for a public key.
///
/// The hash is taken over the key's own encoding, so a key pair switched
/// to uncompressed form locks to a different hash.
pub fn lock(public_key: &PublicKey) -> LockingScript {
    LockingScript::p2pkh(public_key)
}

/// Create a P2PKH unlocker for the given key pair.
pub fn unlock(key_pair: &KeyPair) -> P2PKH<'_> {
    P2PKH { key_pair }
}

/// P2PKH signing template borrowing the signer's key pair.
pub struct P2PKH<'a> {
    key_pair: &'a KeyPair,
}

impl UnlockingScriptTemplate for P2PKH<'_> {
    /// Sign `hash256(message)` and pair the signature with the public key.
    fn sign(&self, message: &[u8]) -> Result<UnlockingScript, ScriptError> {
        let signature = self.key_pair.sign(message)?;
        Ok(UnlockingScript::p2pkh(
            signature,
            self.key_pair.public_key().to_bytes(),
        ))
    }

    /// 1 (push len) + 72 (DER sig) + 1 (push len) + 33 or 65 (pubkey).
    fn estimate_length(&self) -> usize {
        2 + 72 + self.key_pair.public_key().to_bytes().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::verifier::{verify, VerificationResult};

    #[test]
    fn test_lock_unlock_verify() {
        let kp = KeyPair::generate();
        let locking = lock(kp.public_key());
        let unlocking = unlock(&kp).sign(b"spend").unwrap();
        assert_eq!(verify(&locking, &unlocking, b"spend"), VerificationResult::Accepted);
    }

    #[test]
    fn test_estimate_is_upper_bound() {
        for kp in [
            KeyPair::generate(),
            KeyPair::generate().with_uncompressed_public_key(),
        ] {
            let template = unlock(&kp);
            let script = template.sign(b"x").unwrap().to_script().unwrap();
            assert!(script.len() <= template.estimate_length());
        }
    }
}
