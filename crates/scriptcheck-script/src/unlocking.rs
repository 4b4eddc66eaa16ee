//! Unlocking scripts: the data supplied to satisfy a locking script.
//!
//! Signatures and keys are kept as the raw bytes that were pushed. They are
//! only parsed during verification, where a bad encoding is a verdict rather
//! than an error.

use crate::chunk::encode_push_datas;
use crate::locking::LockingScript;
use crate::opcodes::OP_0;
use crate::{Script, ScriptError};

/// `<signature> <public_key>`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct P2pkhUnlock {
    /// DER-encoded signature.
    pub signature: Vec<u8>,
    /// SEC1-encoded public key, compressed or uncompressed.
    pub public_key: Vec<u8>,
}

impl P2pkhUnlock {
    pub fn new(signature: Vec<u8>, public_key: Vec<u8>) -> Self {
        P2pkhUnlock {
            signature,
            public_key,
        }
    }

    pub fn to_script(&self) -> Result<Script, ScriptError> {
        let bytes = encode_push_datas(&[self.signature.as_slice(), self.public_key.as_slice()])?;
        Ok(Script::from(bytes))
    }
}

/// `OP_0 <signature_1> ... <signature_k>`.
///
/// Signatures must appear in the same order as the keys they satisfy.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MultisigUnlock {
    pub signatures: Vec<Vec<u8>>,
}

impl MultisigUnlock {
    pub fn new(signatures: Vec<Vec<u8>>) -> Self {
        MultisigUnlock { signatures }
    }

    /// Serialize with the leading empty dummy element `OP_CHECKMULTISIG`
    /// consumes.
    pub fn to_script(&self) -> Result<Script, ScriptError> {
        let pushes: Vec<&[u8]> = self.signatures.iter().map(Vec::as_slice).collect();
        let mut bytes = vec![OP_0];
        bytes.extend_from_slice(&encode_push_datas(&pushes)?);
        Ok(Script::from(bytes))
    }
}

/// Data satisfying a [`LockingScript`], tagged by template.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum UnlockingScript {
    P2PKH(P2pkhUnlock),
    Multisig(MultisigUnlock),
}

impl UnlockingScript {
    pub fn p2pkh(signature: Vec<u8>, public_key: Vec<u8>) -> Self {
        UnlockingScript::P2PKH(P2pkhUnlock::new(signature, public_key))
    }

    pub fn multisig(signatures: Vec<Vec<u8>>) -> Self {
        UnlockingScript::Multisig(MultisigUnlock::new(signatures))
    }

    pub fn to_script(&self) -> Result<Script, ScriptError> {
        match self {
            UnlockingScript::P2PKH(unlock) => unlock.to_script(),
            UnlockingScript::Multisig(unlock) => unlock.to_script(),
        }
    }

    /// Parse script bytes as the unlocking half for `locking`.
    ///
    /// The script must be push-only. For multisig the first push is the
    /// dummy element and is dropped here. Its contents are checked by the
    /// verifier according to its flags.
    pub fn from_script(script: &Script, locking: &LockingScript) -> Result<Self, ScriptError> {
        let chunks = script.chunks()?;
        let mut pushes = Vec::with_capacity(chunks.len());
        for chunk in &chunks {
            let data = chunk.push_data().ok_or_else(|| {
                ScriptError::MalformedInput(format!(
                    "unlocking script is not push-only: {}",
                    chunk.to_asm_string()
                ))
            })?;
            pushes.push(data.to_vec());
        }

        match locking {
            LockingScript::P2PKH(_) => {
                let mut pushes = pushes.into_iter();
                match (pushes.next(), pushes.next(), pushes.next()) {
                    (Some(signature), Some(public_key), None) => {
                        Ok(UnlockingScript::p2pkh(signature, public_key))
                    }
                    _ => Err(ScriptError::MalformedInput(format!(
                        "p2pkh unlocking script needs 2 pushes, got {}",
                        chunks.len()
                    ))),
                }
            }
            LockingScript::Multisig(_) => {
                if pushes.is_empty() {
                    return Err(ScriptError::MalformedInput(
                        "multisig unlocking script is missing the dummy element".to_string(),
                    ));
                }
                Ok(UnlockingScript::multisig(pushes.split_off(1)))
            }
        }
    }
}
