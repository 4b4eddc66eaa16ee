//! Encoding checks applied before any signature math.

use scriptcheck_primitives::ec::{PublicKey, Signature};

use super::flags::ScriptFlags;
use crate::Script;

/// Parse DER signature bytes, applying the low-S rule from `flags`.
///
/// With `VERIFY_LOW_S` cleared a high-S signature is normalized, since the
/// underlying ECDSA check only accepts the low form.
pub(super) fn parse_signature(flags: ScriptFlags, bytes: &[u8]) -> Option<Signature> {
    let sig = Signature::from_der(bytes).ok()?;
    if sig.is_low_s() {
        Some(sig)
    } else if flags.has_flag(ScriptFlags::VERIFY_LOW_S) {
        None
    } else {
        Some(sig.normalize_s())
    }
}

pub(super) fn parse_public_key(bytes: &[u8]) -> Option<PublicKey> {
    PublicKey::from_bytes(bytes).ok()
}

/// Every push in the script uses its shortest form.
pub(super) fn has_minimal_pushes(script: &Script) -> bool {
    match script.chunks() {
        Ok(chunks) => chunks.iter().all(|c| c.is_minimal_push()),
        Err(_) => false,
    }
}

/// The first element of a multisig unlocking script is an empty push.
pub(super) fn has_null_dummy(script: &Script) -> bool {
    match script.chunks() {
        Ok(chunks) => matches!(chunks.first().and_then(|c| c.push_data()), Some(d) if d.is_empty()),
        Err(_) => false,
    }
}
