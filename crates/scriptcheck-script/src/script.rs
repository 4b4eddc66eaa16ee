//! Raw script bytes.
//!
//! `Script` is the serialized form that locking and unlocking scripts take
//! on the wire (what a node reports as `scriptPubKey` and `scriptSig`). The
//! typed [`crate::LockingScript`] and [`crate::UnlockingScript`] convert to
//! and from it.

use std::fmt;

use crate::chunk::{decode_script, push_data_prefix, ScriptChunk};
use crate::opcodes::*;
use crate::ScriptError;

/// A script, represented as a byte vector newtype.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Script(Vec<u8>);

impl Script {
    /// Create a new empty script.
    pub fn new() -> Self {
        Script(Vec::new())
    }

    /// Create a script from a hex-encoded string.
    pub fn from_hex(hex_str: &str) -> Result<Self, ScriptError> {
        Ok(Script(hex::decode(hex_str)?))
    }

    /// Create a script from raw bytes.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Script(bytes.to_vec())
    }

    /// Create a script from a space-separated ASM string.
    ///
    /// Known opcode names are emitted directly and anything else is treated
    /// as hex push data.
    pub fn from_asm(asm: &str) -> Result<Self, ScriptError> {
        let mut script = Script::new();
        for section in asm.split_whitespace() {
            match string_to_opcode(section) {
                Some(op) => script.append_opcodes(&[op])?,
                None => {
                    let data = hex::decode(section).map_err(|_| ScriptError::InvalidOpcodeData)?;
                    script.append_push_data(&data)?;
                }
            }
        }
        Ok(script)
    }

    pub fn to_hex(&self) -> String {
        hex::encode(&self.0)
    }

    /// Render the script as space-separated ASM.
    ///
    /// Scripts with a truncated push render as `[error]`.
    pub fn to_asm(&self) -> String {
        match self.chunks() {
            Ok(chunks) => chunks
                .iter()
                .map(ScriptChunk::to_asm_string)
                .collect::<Vec<_>>()
                .join(" "),
            Err(_) => "[error]".to_string(),
        }
    }

    pub fn to_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Check for the P2PKH pattern:
    /// `OP_DUP OP_HASH160 <20 bytes> OP_EQUALVERIFY OP_CHECKSIG`.
    pub fn is_p2pkh(&self) -> bool {
        let b = &self.0;
        b.len() == 25
            && b[0] == OP_DUP
            && b[1] == OP_HASH160
            && b[2] == OP_DATA_20
            && b[23] == OP_EQUALVERIFY
            && b[24] == OP_CHECKSIG
    }

    /// Check for the bare multisig pattern:
    /// `OP_m <pubkey1> ... <pubkeyn> OP_n OP_CHECKMULTISIG`.
    ///
    /// This is a shape check only. Counts and key validity are checked when
    /// the script is parsed into a [`crate::LockingScript`].
    pub fn is_multisig_out(&self) -> bool {
        let parts = match self.chunks() {
            Ok(p) => p,
            Err(_) => return false,
        };
        if parts.len() < 4 {
            return false;
        }
        let keys = &parts[1..parts.len() - 2];
        parts[0].as_count().is_some()
            && keys
                .iter()
                .all(|chunk| matches!(&chunk.data, Some(d) if !d.is_empty()))
            && parts[parts.len() - 2].as_count().is_some()
            && parts[parts.len() - 1].op == OP_CHECKMULTISIG
    }

    /// Parse the script into decoded chunks.
    pub fn chunks(&self) -> Result<Vec<ScriptChunk>, ScriptError> {
        decode_script(&self.0)
    }

    /// Append data with the minimal push prefix.
    pub fn append_push_data(&mut self, data: &[u8]) -> Result<(), ScriptError> {
        let prefix = push_data_prefix(data.len())?;
        self.0.extend_from_slice(&prefix);
        self.0.extend_from_slice(data);
        Ok(())
    }

    /// Append raw opcodes.
    ///
    /// Push opcodes are rejected, since they need a payload. Use
    /// `append_push_data` for those.
    pub fn append_opcodes(&mut self, opcodes: &[u8]) -> Result<(), ScriptError> {
        if let Some(&op) = opcodes
            .iter()
            .find(|&&op| (OP_DATA_1..=OP_PUSHDATA4).contains(&op))
        {
            return Err(ScriptError::InvalidOpcodeType(opcode_to_string(op)));
        }
        self.0.extend_from_slice(opcodes);
        Ok(())
    }
}

impl Default for Script {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Vec<u8>> for Script {
    fn from(bytes: Vec<u8>) -> Self {
        Script(bytes)
    }
}

impl fmt::Display for Script {
    /// Display the script as a lowercase hex string.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl fmt::Debug for Script {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Script({})", self.to_asm())
    }
}
