//! P2PKH and bare multisig script verification.
//!
//! Provides the locking/unlocking script data model, its byte encoding,
//! P2PKH addresses, signing templates, and the verifier that turns a
//! locking script, an unlocking script and a signed message into a
//! [`VerificationResult`].

pub mod address;
pub mod chunk;
pub mod locking;
pub mod opcodes;
pub mod script;
pub mod template;
pub mod unlocking;
pub mod verifier;

mod error;
pub use address::{Address, Network};
pub use chunk::ScriptChunk;
pub use error::ScriptError;
pub use locking::{LockingScript, MultisigLock, P2pkhLock};
pub use script::Script;
pub use unlocking::{MultisigUnlock, P2pkhUnlock, UnlockingScript};
pub use verifier::{
    verify, verify_multisig, verify_p2pkh, verify_scripts, Config, RejectReason, ScriptFlags,
    VerificationResult, Verifier,
};
