//! Locking scripts: the spending conditions the verifier checks against.
//!
//! Two templates are supported, P2PKH and bare k-of-n multisig. Both are
//! validated when constructed and expose only read accessors afterwards.

use scriptcheck_primitives::ec::PublicKey;
use scriptcheck_primitives::hash::HASH160_LEN;

use crate::address::Address;
use crate::chunk::{encode_count, encode_push_datas};
use crate::opcodes::*;
use crate::verifier::config::MAX_PUB_KEYS_PER_MULTISIG;
use crate::{Script, ScriptError};

/// `OP_DUP OP_HASH160 <pub_key_hash> OP_EQUALVERIFY OP_CHECKSIG`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct P2pkhLock {
    pub_key_hash: [u8; HASH160_LEN],
}

impl P2pkhLock {
    pub fn new(pub_key_hash: [u8; HASH160_LEN]) -> Self {
        P2pkhLock { pub_key_hash }
    }

    /// Lock to the hash of a key's own encoding.
    pub fn from_public_key(public_key: &PublicKey) -> Self {
        Self::new(public_key.hash160())
    }

    /// Build from a hash given as a slice, which must be exactly 20 bytes.
    pub fn from_slice(hash: &[u8]) -> Result<Self, ScriptError> {
        let pub_key_hash: [u8; HASH160_LEN] = hash.try_into().map_err(|_| {
            ScriptError::MalformedInput(format!(
                "pubkey hash must be {} bytes, got {}",
                HASH160_LEN,
                hash.len()
            ))
        })?;
        Ok(Self::new(pub_key_hash))
    }

    pub fn pub_key_hash(&self) -> &[u8; HASH160_LEN] {
        &self.pub_key_hash
    }

    pub fn to_script(&self) -> Script {
        let mut bytes = Vec::with_capacity(25);
        bytes.push(OP_DUP);
        bytes.push(OP_HASH160);
        bytes.push(OP_DATA_20);
        bytes.extend_from_slice(&self.pub_key_hash);
        bytes.push(OP_EQUALVERIFY);
        bytes.push(OP_CHECKSIG);
        Script::from(bytes)
    }
}

/// `OP_m <key_1> ... <key_n> OP_n OP_CHECKMULTISIG`.
///
/// Always satisfies `1 <= required <= public_keys.len() <= 20`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MultisigLock {
    required: usize,
    public_keys: Vec<PublicKey>,
}

impl MultisigLock {
    /// Build an m-of-n lock.
    ///
    /// Duplicate keys are allowed. Each occurrence is a separate slot that
    /// a signature can consume once.
    ///
    /// # Returns
    /// `ScriptError::MalformedInput` if the key list is empty or longer than
    /// 20 keys, or if `required` is outside `[1, n]`.
    pub fn new(required: usize, public_keys: Vec<PublicKey>) -> Result<Self, ScriptError> {
        let n = public_keys.len();
        if n == 0 {
            return Err(ScriptError::MalformedInput(
                "multisig key list is empty".to_string(),
            ));
        }
        if n > MAX_PUB_KEYS_PER_MULTISIG {
            return Err(ScriptError::MalformedInput(format!(
                "multisig has {} keys, at most {} allowed",
                n, MAX_PUB_KEYS_PER_MULTISIG
            )));
        }
        if required == 0 || required > n {
            return Err(ScriptError::MalformedInput(format!(
                "required signatures {} not in [1, {}]",
                required, n
            )));
        }
        Ok(MultisigLock {
            required,
            public_keys,
        })
    }

    /// Build from raw SEC1 key encodings.
    pub fn from_key_bytes(required: usize, keys: &[&[u8]]) -> Result<Self, ScriptError> {
        let public_keys = keys
            .iter()
            .map(|k| PublicKey::from_bytes(k))
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(required, public_keys)
    }

    pub fn required(&self) -> usize {
        self.required
    }

    pub fn public_keys(&self) -> &[PublicKey] {
        &self.public_keys
    }

    pub fn to_script(&self) -> Result<Script, ScriptError> {
        let keys: Vec<Vec<u8>> = self.public_keys.iter().map(PublicKey::to_bytes).collect();
        let pushes: Vec<&[u8]> = keys.iter().map(Vec::as_slice).collect();

        // Both counts are at most MAX_PUB_KEYS_PER_MULTISIG, so they fit a byte.
        let mut bytes = Vec::new();
        encode_count(&mut bytes, self.required as u8);
        bytes.extend_from_slice(&encode_push_datas(&pushes)?);
        encode_count(&mut bytes, self.public_keys.len() as u8);
        bytes.push(OP_CHECKMULTISIG);
        Ok(Script::from(bytes))
    }
}

/// A spending condition, tagged by template.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LockingScript {
    P2PKH(P2pkhLock),
    Multisig(MultisigLock),
}

impl LockingScript {
    /// P2PKH lock for a public key.
    pub fn p2pkh(public_key: &PublicKey) -> Self {
        LockingScript::P2PKH(P2pkhLock::from_public_key(public_key))
    }

    /// P2PKH lock for the hash inside a Base58Check address.
    pub fn p2pkh_from_address(address: &Address) -> Self {
        LockingScript::P2PKH(P2pkhLock::new(address.public_key_hash))
    }

    /// m-of-n multisig lock. See [`MultisigLock::new`].
    pub fn multisig(required: usize, public_keys: Vec<PublicKey>) -> Result<Self, ScriptError> {
        MultisigLock::new(required, public_keys).map(LockingScript::Multisig)
    }

    /// Serialize to standard script bytes.
    pub fn to_script(&self) -> Result<Script, ScriptError> {
        match self {
            LockingScript::P2PKH(lock) => Ok(lock.to_script()),
            LockingScript::Multisig(lock) => lock.to_script(),
        }
    }

    /// Recognize and parse standard script bytes.
    ///
    /// # Returns
    /// The typed lock, `ScriptError::UnsupportedScript` for any other script
    /// shape, or `ScriptError::MalformedInput` when the shape matches but the
    /// counts or keys are invalid.
    pub fn from_script(script: &Script) -> Result<Self, ScriptError> {
        if script.is_p2pkh() {
            return P2pkhLock::from_slice(&script.to_bytes()[3..23]).map(LockingScript::P2PKH);
        }

        let chunks = script.chunks()?;
        let (first, last) = match (chunks.first(), chunks.last()) {
            (Some(first), Some(last)) if chunks.len() >= 4 => (first, last),
            _ => {
                return Err(ScriptError::UnsupportedScript(script.to_asm()));
            }
        };
        if last.op != OP_CHECKMULTISIG {
            return Err(ScriptError::UnsupportedScript(script.to_asm()));
        }
        let key_chunks = &chunks[1..chunks.len() - 2];
        let required = first
            .as_count()
            .ok_or_else(|| ScriptError::MalformedInput("bad required count".to_string()))?;
        let n = chunks[chunks.len() - 2]
            .as_count()
            .ok_or_else(|| ScriptError::MalformedInput("bad key count".to_string()))?;
        if n != key_chunks.len() {
            return Err(ScriptError::MalformedInput(format!(
                "key count {} does not match {} pushed keys",
                n,
                key_chunks.len()
            )));
        }

        let mut public_keys = Vec::with_capacity(n);
        for chunk in key_chunks {
            let data = chunk
                .data
                .as_deref()
                .ok_or_else(|| ScriptError::MalformedInput(chunk.to_asm_string()))?;
            public_keys.push(PublicKey::from_bytes(data)?);
        }
        LockingScript::multisig(required, public_keys)
    }
}
