//! Script chunk parsing and encoding.
//!
//! A script chunk is either an opcode or a data push with its associated bytes.
//! This module decodes raw script bytes into chunks and encodes push data
//! with the correct OP_PUSHDATA prefix.

use crate::opcodes::*;
use crate::ScriptError;

/// A single parsed element of a script.
///
/// For direct pushes (1-75 bytes) `op` is the length byte itself.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScriptChunk {
    pub op: u8,
    pub data: Option<Vec<u8>>,
}

impl ScriptChunk {
    /// Render the chunk for ASM output: hex for pushes, a name otherwise.
    pub fn to_asm_string(&self) -> String {
        match &self.data {
            Some(data) => hex::encode(data),
            None => opcode_to_string(self.op),
        }
    }

    /// Whether this chunk pushes data (including the empty push `OP_0`).
    pub fn is_push(&self) -> bool {
        self.data.is_some() || self.op == OP_0
    }

    /// The pushed bytes, treating `OP_0` as an empty push.
    pub fn push_data(&self) -> Option<&[u8]> {
        match &self.data {
            Some(d) => Some(d.as_slice()),
            None if self.op == OP_0 => Some(&[]),
            None => None,
        }
    }

    /// Read a key or signature count.
    ///
    /// Counts up to 16 use `OP_0`..`OP_16`; larger ones are a one-byte push.
    /// Any other form (including a non-minimal push of a small value) is
    /// not a count.
    pub fn as_count(&self) -> Option<usize> {
        if let Some(n) = small_int_value(self.op) {
            return Some(n as usize);
        }
        match self.data.as_deref() {
            Some(&[n]) if n > 16 && n < 0x80 => Some(n as usize),
            _ => None,
        }
    }

    /// Whether a push chunk uses the shortest encoding for its payload.
    ///
    /// Non-push chunks are trivially minimal.
    pub fn is_minimal_push(&self) -> bool {
        let data = match &self.data {
            Some(d) => d,
            None => return true,
        };
        match data.len() {
            0 => false,
            1 if (1..=16).contains(&data[0]) || data[0] == 0x81 => false,
            n if n <= OP_DATA_75 as usize => self.op as usize == n,
            n if n <= 0xFF => self.op == OP_PUSHDATA1,
            n if n <= 0xFFFF => self.op == OP_PUSHDATA2,
            _ => self.op == OP_PUSHDATA4,
        }
    }
}

/// Append a count in the form [`ScriptChunk::as_count`] reads back.
pub(crate) fn encode_count(out: &mut Vec<u8>, n: u8) {
    match small_int_op(n) {
        Some(op) => out.push(op),
        None => out.extend_from_slice(&[OP_DATA_1, n]),
    }
}

/// Decode raw script bytes into a vector of `ScriptChunk` values.
///
/// Handles OP_DATA_1..OP_DATA_75 (direct push) and OP_PUSHDATA1/2/4
/// (extended push). Any other byte becomes a bare opcode chunk.
///
/// # Returns
/// The parsed chunks, or `ScriptError::DataTooSmall` if a push is truncated.
pub fn decode_script(bytes: &[u8]) -> Result<Vec<ScriptChunk>, ScriptError> {
    let mut chunks = Vec::new();
    let mut pos = 0;

    while pos < bytes.len() {
        let op = bytes[pos];
        let (header_len, length) = match op {
            OP_DATA_1..=OP_DATA_75 => (1, op as usize),
            OP_PUSHDATA1 => {
                let b = bytes.get(pos + 1..pos + 2).ok_or(ScriptError::DataTooSmall)?;
                (2, b[0] as usize)
            }
            OP_PUSHDATA2 => {
                let b = bytes.get(pos + 1..pos + 3).ok_or(ScriptError::DataTooSmall)?;
                (3, u16::from_le_bytes([b[0], b[1]]) as usize)
            }
            OP_PUSHDATA4 => {
                let b = bytes.get(pos + 1..pos + 5).ok_or(ScriptError::DataTooSmall)?;
                (5, u32::from_le_bytes([b[0], b[1], b[2], b[3]]) as usize)
            }
            _ => {
                chunks.push(ScriptChunk { op, data: None });
                pos += 1;
                continue;
            }
        };

        let start = pos + header_len;
        let end = start.checked_add(length).ok_or(ScriptError::DataTooSmall)?;
        let data = bytes.get(start..end).ok_or(ScriptError::DataTooSmall)?;
        chunks.push(ScriptChunk {
            op,
            data: Some(data.to_vec()),
        });
        pos = end;
    }

    Ok(chunks)
}

/// Compute the minimal OP_PUSHDATA prefix for a payload of `data_len` bytes.
pub fn push_data_prefix(data_len: usize) -> Result<Vec<u8>, ScriptError> {
    if data_len == 0 {
        Ok(vec![OP_0])
    } else if data_len <= OP_DATA_75 as usize {
        Ok(vec![data_len as u8])
    } else if data_len <= 0xFF {
        Ok(vec![OP_PUSHDATA1, data_len as u8])
    } else if data_len <= 0xFFFF {
        let mut buf = vec![OP_PUSHDATA2];
        buf.extend_from_slice(&(data_len as u16).to_le_bytes());
        Ok(buf)
    } else if data_len <= 0xFFFF_FFFF {
        let mut buf = vec![OP_PUSHDATA4];
        buf.extend_from_slice(&(data_len as u32).to_le_bytes());
        Ok(buf)
    } else {
        Err(ScriptError::DataTooBig)
    }
}

/// Encode several payloads back to back, each with its own push prefix.
pub fn encode_push_datas(parts: &[&[u8]]) -> Result<Vec<u8>, ScriptError> {
    let mut result = Vec::new();
    for (i, part) in parts.iter().enumerate() {
        let prefix = push_data_prefix(part.len()).map_err(|_| ScriptError::PartTooBig(i))?;
        result.extend_from_slice(&prefix);
        result.extend_from_slice(part);
    }
    Ok(result)
}
