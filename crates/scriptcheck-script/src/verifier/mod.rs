//! P2PKH and bare multisig script verification.
//!
//! A verification never fails with an error. Every outcome, including
//! structurally broken input, comes back as a [`VerificationResult`] so a
//! caller can tell "this spend is invalid" apart from a fault of its own.
//!
//! The verifier is stateless. [`Verifier`] only carries limits and flags, is
//! `Copy`, and can be shared freely across threads.

pub mod config;
mod encoding;
pub mod flags;
mod multisig;
mod p2pkh;

use std::fmt;

use tracing::debug;

use crate::locking::{LockingScript, MultisigLock, P2pkhLock};
use crate::unlocking::{MultisigUnlock, P2pkhUnlock, UnlockingScript};
use crate::Script;

pub use config::Config;
pub use flags::ScriptFlags;

/// Why a spend was rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RejectReason {
    /// The public key does not hash to the locking script's hash.
    PubKeyHashMismatch,
    /// A signature did not verify against the key it was checked with.
    InvalidSignature,
    /// More signatures than the locking script has keys.
    SignatureCountInvalid,
    /// Fewer correctly ordered matches than the threshold.
    InsufficientSignatures,
    /// The scripts could not be parsed or do not belong together.
    MalformedInput,
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RejectReason::PubKeyHashMismatch => "public key hash mismatch",
            RejectReason::InvalidSignature => "invalid signature",
            RejectReason::SignatureCountInvalid => "signature count invalid",
            RejectReason::InsufficientSignatures => "insufficient signatures",
            RejectReason::MalformedInput => "malformed input",
        };
        f.write_str(s)
    }
}

impl std::error::Error for RejectReason {}

/// Verdict of a single verification.
#[must_use]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum VerificationResult {
    Accepted,
    Rejected(RejectReason),
}

impl VerificationResult {
    pub fn is_accepted(&self) -> bool {
        matches!(self, VerificationResult::Accepted)
    }

    /// The rejection reason, if any.
    pub fn reason(&self) -> Option<RejectReason> {
        match self {
            VerificationResult::Accepted => None,
            VerificationResult::Rejected(reason) => Some(*reason),
        }
    }

    /// Convert into a `Result` so a rejection can be propagated with `?`.
    pub fn into_result(self) -> Result<(), RejectReason> {
        match self {
            VerificationResult::Accepted => Ok(()),
            VerificationResult::Rejected(reason) => Err(reason),
        }
    }
}

impl fmt::Display for VerificationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VerificationResult::Accepted => f.write_str("accepted"),
            VerificationResult::Rejected(reason) => write!(f, "rejected: {}", reason),
        }
    }
}

/// Log and build a rejection.
pub(crate) fn rejected(path: &'static str, reason: RejectReason) -> VerificationResult {
    debug!(path, %reason, "script rejected");
    VerificationResult::Rejected(reason)
}

/// Script verifier configured with limits and encoding flags.
///
/// `Verifier::default()` uses [`Config::default`] and
/// [`ScriptFlags::STANDARD`]. The free functions in this module use it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Verifier {
    cfg: Config,
    flags: ScriptFlags,
}

impl Verifier {
    pub fn new(cfg: Config, flags: ScriptFlags) -> Self {
        Verifier { cfg, flags }
    }

    /// Default limits with the given flags.
    pub fn with_flags(flags: ScriptFlags) -> Self {
        Self::new(Config::default(), flags)
    }

    pub fn config(&self) -> &Config {
        &self.cfg
    }

    pub fn flags(&self) -> ScriptFlags {
        self.flags
    }

    /// Verify a typed unlocking script against a typed locking script.
    ///
    /// # Arguments
    /// * `locking` - The spending condition.
    /// * `unlocking` - Signatures (and for P2PKH, the public key).
    /// * `message` - The exact bytes that were signed. They are digested with
    ///   `hash256` before signature checks.
    ///
    /// # Returns
    /// `Rejected(MalformedInput)` if the two scripts are of different
    /// templates, otherwise the verdict of the matching path.
    pub fn verify(
        &self,
        locking: &LockingScript,
        unlocking: &UnlockingScript,
        message: &[u8],
    ) -> VerificationResult {
        match (locking, unlocking) {
            (LockingScript::P2PKH(lock), UnlockingScript::P2PKH(unlock)) => {
                self.verify_p2pkh(lock, unlock, message)
            }
            (LockingScript::Multisig(lock), UnlockingScript::Multisig(unlock)) => {
                self.verify_multisig(lock, unlock, message)
            }
            _ => rejected("dispatch", RejectReason::MalformedInput),
        }
    }

    pub fn verify_p2pkh(
        &self,
        locking: &P2pkhLock,
        unlocking: &P2pkhUnlock,
        message: &[u8],
    ) -> VerificationResult {
        p2pkh::verify(self.flags, locking, unlocking, message)
    }

    pub fn verify_multisig(
        &self,
        locking: &MultisigLock,
        unlocking: &MultisigUnlock,
        message: &[u8],
    ) -> VerificationResult {
        multisig::verify(&self.cfg, self.flags, locking, unlocking, message)
    }

    /// Verify raw script bytes, as found in a transaction's output and input.
    ///
    /// The locking script must be a standard P2PKH or bare multisig script and
    /// the unlocking script must be push-only. Anything that fails to parse,
    /// or breaks the encoding rules selected by the flags, is
    /// `Rejected(MalformedInput)` before any signature is checked.
    pub fn verify_scripts(
        &self,
        locking: &Script,
        unlocking: &Script,
        message: &[u8],
    ) -> VerificationResult {
        let lock = match LockingScript::from_script(locking) {
            Ok(lock) => lock,
            Err(e) => {
                debug!(error = %e, "locking script did not parse");
                return rejected("scripts", e.reason());
            }
        };
        let unlock = match UnlockingScript::from_script(unlocking, &lock) {
            Ok(unlock) => unlock,
            Err(e) => {
                debug!(error = %e, "unlocking script did not parse");
                return rejected("scripts", e.reason());
            }
        };

        if self.flags.has_flag(ScriptFlags::VERIFY_MINIMAL_DATA)
            && !(encoding::has_minimal_pushes(locking) && encoding::has_minimal_pushes(unlocking))
        {
            return rejected("scripts", RejectReason::MalformedInput);
        }
        if self.flags.has_flag(ScriptFlags::STRICT_MULTI_SIG)
            && matches!(lock, LockingScript::Multisig(_))
            && !encoding::has_null_dummy(unlocking)
        {
            return rejected("scripts", RejectReason::MalformedInput);
        }

        self.verify(&lock, &unlock, message)
    }
}

/// Verify with [`Verifier::default`]. See [`Verifier::verify`].
pub fn verify(
    locking: &LockingScript,
    unlocking: &UnlockingScript,
    message: &[u8],
) -> VerificationResult {
    Verifier::default().verify(locking, unlocking, message)
}

/// Verify a P2PKH spend with [`Verifier::default`].
pub fn verify_p2pkh(
    locking: &P2pkhLock,
    unlocking: &P2pkhUnlock,
    message: &[u8],
) -> VerificationResult {
    Verifier::default().verify_p2pkh(locking, unlocking, message)
}

/// Verify a bare multisig spend with [`Verifier::default`].
pub fn verify_multisig(
    locking: &MultisigLock,
    unlocking: &MultisigUnlock,
    message: &[u8],
) -> VerificationResult {
    Verifier::default().verify_multisig(locking, unlocking, message)
}

/// Verify raw script bytes with [`Verifier::default`].
pub fn verify_scripts(locking: &Script, unlocking: &Script, message: &[u8]) -> VerificationResult {
    Verifier::default().verify_scripts(locking, unlocking, message)
}
