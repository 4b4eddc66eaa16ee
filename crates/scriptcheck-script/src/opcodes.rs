//! Opcode constants for the standard P2PKH and bare multisig templates.
//!
//! Only the opcodes those two templates (and their push encodings) use are
//! named here. Every other byte is shown as `OP_UNKNOWN<n>` in ASM output.

pub const OP_0: u8 = 0x00;
pub const OP_FALSE: u8 = 0x00;
pub const OP_DATA_1: u8 = 0x01;
pub const OP_DATA_20: u8 = 0x14;
pub const OP_DATA_75: u8 = 0x4b;
pub const OP_PUSHDATA1: u8 = 0x4c;
pub const OP_PUSHDATA2: u8 = 0x4d;
pub const OP_PUSHDATA4: u8 = 0x4e;
pub const OP_1NEGATE: u8 = 0x4f;
pub const OP_1: u8 = 0x51;
pub const OP_TRUE: u8 = 0x51;
pub const OP_16: u8 = 0x60;
pub const OP_DUP: u8 = 0x76;
pub const OP_EQUAL: u8 = 0x87;
pub const OP_EQUALVERIFY: u8 = 0x88;
pub const OP_HASH160: u8 = 0xa9;
pub const OP_CHECKSIG: u8 = 0xac;
pub const OP_CHECKMULTISIG: u8 = 0xae;

/// Whether `op` is one of `OP_0`, `OP_1` .. `OP_16`.
pub fn is_small_int_op(op: u8) -> bool {
    op == OP_0 || (OP_1..=OP_16).contains(&op)
}

/// Decode a small-integer opcode to its value (`OP_0` → 0, `OP_16` → 16).
pub fn small_int_value(op: u8) -> Option<u8> {
    match op {
        OP_0 => Some(0),
        OP_1..=OP_16 => Some(op - (OP_1 - 1)),
        _ => None,
    }
}

/// Encode a value in `0..=16` as its small-integer opcode.
pub fn small_int_op(n: u8) -> Option<u8> {
    match n {
        0 => Some(OP_0),
        1..=16 => Some(OP_1 - 1 + n),
        _ => None,
    }
}

/// Canonical ASM name of an opcode.
pub fn opcode_to_string(op: u8) -> String {
    match op {
        OP_0 => "OP_0".to_string(),
        OP_PUSHDATA1 => "OP_PUSHDATA1".to_string(),
        OP_PUSHDATA2 => "OP_PUSHDATA2".to_string(),
        OP_PUSHDATA4 => "OP_PUSHDATA4".to_string(),
        OP_1NEGATE => "OP_1NEGATE".to_string(),
        OP_1..=OP_16 => format!("OP_{}", op - (OP_1 - 1)),
        OP_DUP => "OP_DUP".to_string(),
        OP_EQUAL => "OP_EQUAL".to_string(),
        OP_EQUALVERIFY => "OP_EQUALVERIFY".to_string(),
        OP_HASH160 => "OP_HASH160".to_string(),
        OP_CHECKSIG => "OP_CHECKSIG".to_string(),
        OP_CHECKMULTISIG => "OP_CHECKMULTISIG".to_string(),
        OP_DATA_1..=OP_DATA_75 => format!("OP_DATA_{}", op),
        _ => format!("OP_UNKNOWN{}", op),
    }
}

/// Parse an ASM opcode name back to its byte.
pub fn string_to_opcode(name: &str) -> Option<u8> {
    match name {
        "OP_0" | "OP_FALSE" => Some(OP_0),
        "OP_1NEGATE" => Some(OP_1NEGATE),
        "OP_TRUE" => Some(OP_TRUE),
        "OP_DUP" => Some(OP_DUP),
        "OP_EQUAL" => Some(OP_EQUAL),
        "OP_EQUALVERIFY" => Some(OP_EQUALVERIFY),
        "OP_HASH160" => Some(OP_HASH160),
        "OP_CHECKSIG" => Some(OP_CHECKSIG),
        "OP_CHECKMULTISIG" => Some(OP_CHECKMULTISIG),
        _ => name
            .strip_prefix("OP_")
            .and_then(|n| n.parse::<u8>().ok())
            .filter(|n| (1..=16).contains(n))
            .and_then(small_int_op),
    }
}
