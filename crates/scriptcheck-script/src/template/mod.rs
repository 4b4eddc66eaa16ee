//! Script templates for the signing side.
//!
//! Provides the `UnlockingScriptTemplate` trait with P2PKH and bare multisig
//! implementations. The verifier never uses these. They exist so the
//! signing collaborator (and the tests) build unlocking scripts in exactly
//! the form the verifier expects.

pub mod multisig;
pub mod p2pkh;

use crate::{ScriptError, UnlockingScript};

/// Trait for templates that produce unlocking scripts.
pub trait UnlockingScriptTemplate {
    /// Produce an unlocking script over the given message.
    ///
    /// # Arguments
    /// * `message` - The signature-hash bytes supplied by the transaction builder.
    ///
    /// # Returns
    /// `Ok(UnlockingScript)`, or an error if a key cannot sign.
    fn sign(&self, message: &[u8]) -> Result<UnlockingScript, ScriptError>;

    /// Estimate the serialized byte length of the unlocking script.
    ///
    /// Used for fee calculation before the actual signature is computed.
    fn estimate_length(&self) -> usize;
}
