//! P2PKH path: hash check, then one signature check.

use scriptcheck_primitives::hash::{hash160, hash256};
use subtle::ConstantTimeEq;
use tracing::trace;

use super::encoding::{parse_public_key, parse_signature};
use super::flags::ScriptFlags;
use super::{rejected, RejectReason, VerificationResult};
use crate::locking::P2pkhLock;
use crate::unlocking::P2pkhUnlock;

pub(super) fn verify(
    flags: ScriptFlags,
    locking: &P2pkhLock,
    unlocking: &P2pkhUnlock,
    message: &[u8],
) -> VerificationResult {
    // The hash is compared over the pushed bytes, before they are parsed.
    let derived = hash160(&unlocking.public_key);
    if !bool::from(derived[..].ct_eq(&locking.pub_key_hash()[..])) {
        return rejected("p2pkh", RejectReason::PubKeyHashMismatch);
    }

    let public_key = match parse_public_key(&unlocking.public_key) {
        Some(key) => key,
        None => return rejected("p2pkh", RejectReason::InvalidSignature),
    };
    let signature = match parse_signature(flags, &unlocking.signature) {
        Some(sig) => sig,
        None => return rejected("p2pkh", RejectReason::InvalidSignature),
    };

    let digest = hash256(message);
    if !public_key.verify(&digest, &signature) {
        return rejected("p2pkh", RejectReason::InvalidSignature);
    }
    trace!(public_key = %public_key, "p2pkh accepted");
    VerificationResult::Accepted
}
