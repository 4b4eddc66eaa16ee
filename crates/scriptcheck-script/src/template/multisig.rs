//! Bare multisig script template.
//!
//! Creates `OP_m <key_1> ... <key_n> OP_n OP_CHECKMULTISIG` locking scripts
//! and `OP_0 <sig_1> ... <sig_m>` unlocking scripts with the signatures in
//! key order.

use scriptcheck_primitives::ec::{KeyPair, PublicKey};

use crate::template::UnlockingScriptTemplate;
use crate::{LockingScript, MultisigLock, ScriptError, UnlockingScript};

/// Create an m-of-n locking script.
///
/// # Returns
/// `ScriptError::MalformedInput` unless `1 <= required <= keys.len() <= 20`.
pub fn lock(required: usize, public_keys: Vec<PublicKey>) -> Result<LockingScript, ScriptError> {
    LockingScript::multisig(required, public_keys)
}

/// Create a multisig unlocker for a lock and a set of signers.
///
/// Signers may be given in any order. [`UnlockingScriptTemplate::sign`]
/// places each signature at its key's position in the lock.
pub fn unlock<'a>(locking: &'a MultisigLock, signers: &'a [KeyPair]) -> Multisig<'a> {
    Multisig { locking, signers }
}

/// Multisig signing template.
pub struct Multisig<'a> {
    locking: &'a MultisigLock,
    signers: &'a [KeyPair],
}

impl Multisig<'_> {
    /// Key slot for each signer, in lock order.
    ///
    /// Each slot is claimed once, so a key listed twice in the lock can be
    /// satisfied by two signers holding it.
    fn slots(&self) -> Result<Vec<(usize, &KeyPair)>, ScriptError> {
        let keys = self.locking.public_keys();
        let mut used = vec![false; keys.len()];
        let mut slots = Vec::with_capacity(self.signers.len());

        for signer in self.signers {
            let slot = (0..keys.len())
                .find(|&i| !used[i] && &keys[i] == signer.public_key())
                .ok_or_else(|| {
                    ScriptError::SigningError(format!(
                        "signer key {} has no free slot in the locking script",
                        signer.public_key()
                    ))
                })?;
            used[slot] = true;
            slots.push((slot, signer));
        }

        slots.sort_by_key(|(slot, _)| *slot);
        Ok(slots)
    }
}

impl UnlockingScriptTemplate for Multisig<'_> {
    /// Sign with every signer and order the signatures by key position.
    fn sign(&self, message: &[u8]) -> Result<UnlockingScript, ScriptError> {
        if self.signers.len() < self.locking.required() {
            return Err(ScriptError::SigningError(format!(
                "{} signers given, {} required",
                self.signers.len(),
                self.locking.required()
            )));
        }

        let signatures = self
            .slots()?
            .into_iter()
            .map(|(_, signer)| signer.sign(message))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(UnlockingScript::multisig(signatures))
    }

    /// 1 (OP_0) + 73 per signature (push len + DER sig).
    fn estimate_length(&self) -> usize {
        1 + 73 * self.signers.len()
    }
}
