//! Bare multisig path.
//!
//! Signatures are matched against keys with a cursor that only moves
//! forward, so signatures must come in key order and each key slot is
//! consumed at most once. This is `OP_CHECKMULTISIG`'s rule, and it keeps
//! the work at O(n + k) signature checks.

use scriptcheck_primitives::hash::hash256;
use tracing::trace;

use super::config::Config;
use super::encoding::parse_signature;
use super::flags::ScriptFlags;
use super::{rejected, RejectReason, VerificationResult};
use crate::locking::MultisigLock;
use crate::unlocking::MultisigUnlock;

pub(super) fn verify(
    cfg: &Config,
    flags: ScriptFlags,
    locking: &MultisigLock,
    unlocking: &MultisigUnlock,
    message: &[u8],
) -> VerificationResult {
    let keys = locking.public_keys();
    let sigs = &unlocking.signatures;
    let required = locking.required();

    if keys.len() > cfg.max_pub_keys_per_multisig {
        return rejected("multisig", RejectReason::MalformedInput);
    }
    if sigs.len() > keys.len() {
        return rejected("multisig", RejectReason::SignatureCountInvalid);
    }
    if sigs.len() < required {
        return rejected("multisig", RejectReason::InsufficientSignatures);
    }

    let digest = hash256(message);
    let mut key_idx = 0;

    for (sig_idx, sig_bytes) in sigs.iter().enumerate() {
        // An unparseable signature cannot match any key.
        let signature = match parse_signature(flags, sig_bytes) {
            Some(sig) => sig,
            None => return rejected("multisig", RejectReason::InvalidSignature),
        };

        let mut found = false;
        while key_idx < keys.len() {
            // Every remaining signature needs a key of its own.
            if sigs.len() - sig_idx > keys.len() - key_idx {
                break;
            }
            let ok = keys[key_idx].verify(&digest, &signature);
            trace!(sig_idx, key_idx, ok, "multisig step");
            key_idx += 1;
            if ok {
                found = true;
                break;
            }
        }

        if !found {
            return rejected("multisig", RejectReason::InvalidSignature);
        }
    }

    // Every signature matched, and there are at least `required` of them.
    VerificationResult::Accepted
}
