#![deny(missing_docs)]

//! P2PKH and bare multisig script verification.
//!
//! Re-exports the workspace crates for single-crate usage, plus the types
//! most callers need at the top level.

pub use scriptcheck_primitives as primitives;
pub use scriptcheck_script as script;

pub use scriptcheck_primitives::ec::{KeyPair, PublicKey};
pub use scriptcheck_script::{
    verify, verify_scripts, LockingScript, RejectReason, ScriptError, UnlockingScript,
    VerificationResult, Verifier,
};
