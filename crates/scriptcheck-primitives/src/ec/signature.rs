//! ECDSA signature with strict DER serialization and RFC6979 deterministic nonces.
//!
//! Parsing follows the BIP-0066 strict DER rules, so one `(r, s)` pair has
//! exactly one accepted byte encoding. Signing always emits low-S values
//! per BIP-0062.

use k256::ecdsa::signature::hazmat::{PrehashSigner, PrehashVerifier};
use k256::ecdsa;

use crate::ec::private_key::PrivateKey;
use crate::ec::public_key::PublicKey;
use crate::PrimitivesError;

/// Smallest possible strict DER signature (two one-byte integers).
pub const MIN_DER_LEN: usize = 8;

/// Largest possible strict DER signature (two padded 33-byte integers).
pub const MAX_DER_LEN: usize = 72;

/// The secp256k1 curve order N.
/// N = FFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFEBAAEDCE6AF48A03BBFD25E8CD0364141
const CURVE_ORDER: [u8; 32] = [
    0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF,
    0xFE, 0xBA, 0xAE, 0xDC, 0xE6, 0xAF, 0x48, 0xA0, 0x3B, 0xBF, 0xD2, 0x5E, 0x8C, 0xD0, 0x36,
    0x41, 0x41,
];

/// Half of the secp256k1 curve order (N/2), used for low-S normalization.
const HALF_ORDER: [u8; 32] = [
    0x7F, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF,
    0xFF, 0x5D, 0x57, 0x6E, 0x73, 0x57, 0xA4, 0x50, 0x1D, 0xDF, 0xE9, 0x2F, 0x46, 0x68, 0x1B,
    0x20, 0xA0,
];

/// An ECDSA signature with R and S components (32 bytes each, big-endian).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Signature {
    r: [u8; 32],
    s: [u8; 32],
}

impl Signature {
    /// Create a signature from raw R and S values.
    pub fn new(r: [u8; 32], s: [u8; 32]) -> Self {
        Signature { r, s }
    }

    pub fn r(&self) -> &[u8; 32] {
        &self.r
    }

    pub fn s(&self) -> &[u8; 32] {
        &self.s
    }

    /// Whether S lies in the lower half of the curve order.
    pub fn is_low_s(&self) -> bool {
        !is_greater_than(&self.s, &HALF_ORDER)
    }

    /// Return the low-S form of this signature.
    ///
    /// `(r, s)` and `(r, N - s)` are both valid for the same key and digest;
    /// this picks the one with `s <= N/2`.
    pub fn normalize_s(&self) -> Signature {
        if self.is_low_s() {
            self.clone()
        } else {
            self.negate_s()
        }
    }

    /// Return `(r, N - s)`, the other valid signature for the same key and
    /// digest.
    pub fn negate_s(&self) -> Signature {
        Signature {
            r: self.r,
            s: subtract_from_order(&self.s),
        }
    }

    /// Parse a strict DER-encoded ECDSA signature.
    ///
    /// Expected format: `0x30 <len> 0x02 <r_len> <r> 0x02 <s_len> <s>` with
    /// no trailing bytes, minimal non-negative integers, and `0 < r, s < N`.
    ///
    /// # Arguments
    /// * `bytes` - DER-encoded signature bytes.
    ///
    /// # Returns
    /// `Ok(Signature)` on success, or an error naming the first rule broken.
    pub fn from_der(bytes: &[u8]) -> Result<Self, PrimitivesError> {
        let len = bytes.len();
        if len < MIN_DER_LEN {
            return Err(malformed(format!("too short: {} < {}", len, MIN_DER_LEN)));
        }
        if len > MAX_DER_LEN {
            return Err(malformed(format!("too long: {} > {}", len, MAX_DER_LEN)));
        }
        if bytes[0] != 0x30 {
            return Err(malformed(format!("wrong sequence type: {:#x}", bytes[0])));
        }
        if bytes[1] as usize != len - 2 {
            return Err(malformed(format!(
                "bad length: {} != {}",
                bytes[1],
                len - 2
            )));
        }

        let r_len = bytes[3] as usize;
        let s_type_offset = 4 + r_len;
        let s_len_offset = s_type_offset + 1;
        if s_len_offset >= len {
            return Err(malformed("S marker or length missing".to_string()));
        }
        let s_offset = s_len_offset + 1;
        let s_len = bytes[s_len_offset] as usize;
        if s_offset + s_len != len {
            return Err(malformed("invalid S length".to_string()));
        }

        if bytes[2] != 0x02 {
            return Err(malformed(format!("R integer marker: {:#x}", bytes[2])));
        }
        let r_bytes = &bytes[4..4 + r_len];
        check_der_integer(r_bytes, "R")?;

        if bytes[s_type_offset] != 0x02 {
            return Err(malformed(format!(
                "S integer marker: {:#x}",
                bytes[s_type_offset]
            )));
        }
        let s_bytes = &bytes[s_offset..];
        check_der_integer(s_bytes, "S")?;

        let r = to_32_bytes(r_bytes)?;
        let s = to_32_bytes(s_bytes)?;

        if is_zero(&r) || is_zero(&s) {
            return Err(PrimitivesError::InvalidSignature(
                "signature R or S is zero".to_string(),
            ));
        }
        if !is_less_than(&r, &CURVE_ORDER) || !is_less_than(&s, &CURVE_ORDER) {
            return Err(PrimitivesError::InvalidSignature(
                "signature R or S is >= curve.N".to_string(),
            ));
        }

        Ok(Signature { r, s })
    }

    /// Serialize the signature in strict DER format.
    ///
    /// `s` is written as stored. Call [`Signature::normalize_s`] first for
    /// the canonical low-S encoding (signatures from [`Signature::sign`]
    /// already are).
    pub fn to_der(&self) -> Vec<u8> {
        let rb = canonicalize_int(&self.r);
        let sb = canonicalize_int(&self.s);

        let total_len = 6 + rb.len() + sb.len();
        let mut out = Vec::with_capacity(total_len);
        out.push(0x30);
        out.push((total_len - 2) as u8);
        out.push(0x02);
        out.push(rb.len() as u8);
        out.extend_from_slice(&rb);
        out.push(0x02);
        out.push(sb.len() as u8);
        out.extend_from_slice(&sb);
        out
    }

    /// Sign a 32-byte digest using RFC6979 deterministic nonces.
    ///
    /// Produces a low-S normalized signature per BIP-0062.
    pub fn sign(digest: &[u8; 32], priv_key: &PrivateKey) -> Result<Self, PrimitivesError> {
        let k256_sig: ecdsa::Signature = priv_key
            .signing_key()
            .sign_prehash(digest)
            .map_err(|e| PrimitivesError::InvalidSignature(e.to_string()))?;

        let (r_bytes, s_bytes) = k256_sig.split_bytes();
        let sig = Signature {
            r: r_bytes.into(),
            s: s_bytes.into(),
        };
        Ok(sig.normalize_s())
    }

    /// Verify this signature against a 32-byte digest and public key.
    ///
    /// # Returns
    /// `true` if the signature is valid, `false` otherwise.
    pub fn verify(&self, digest: &[u8; 32], pub_key: &PublicKey) -> bool {
        let k256_sig = match ecdsa::Signature::from_scalars(
            k256::FieldBytes::from(self.r),
            k256::FieldBytes::from(self.s),
        ) {
            Ok(sig) => sig,
            Err(_) => return false,
        };

        pub_key
            .verifying_key()
            .verify_prehash(digest, &k256_sig)
            .is_ok()
    }
}

fn malformed(detail: String) -> PrimitivesError {
    PrimitivesError::InvalidSignature(format!("malformed signature: {}", detail))
}

/// Enforce minimal, non-negative DER integer encoding.
fn check_der_integer(int: &[u8], name: &str) -> Result<(), PrimitivesError> {
    if int.is_empty() {
        return Err(malformed(format!("{} length is zero", name)));
    }
    if int[0] & 0x80 != 0 {
        return Err(malformed(format!("{} is negative", name)));
    }
    if int.len() > 1 && int[0] == 0x00 && int[1] & 0x80 == 0 {
        return Err(malformed(format!("{} value has too much padding", name)));
    }
    Ok(())
}

/// Canonicalize an integer for DER encoding.
///
/// Strips leading zeros and adds a 0x00 byte if the high bit is set.
fn canonicalize_int(val: &[u8; 32]) -> Vec<u8> {
    let mut start = 0;
    while start < 31 && val[start] == 0 {
        start += 1;
    }
    let trimmed = &val[start..];

    if trimmed[0] & 0x80 != 0 {
        let mut out = Vec::with_capacity(trimmed.len() + 1);
        out.push(0x00);
        out.extend_from_slice(trimmed);
        out
    } else {
        trimmed.to_vec()
    }
}

/// Left-pad a big-endian integer to 32 bytes.
fn to_32_bytes(bytes: &[u8]) -> Result<[u8; 32], PrimitivesError> {
    let mut trimmed = bytes;
    while trimmed.len() > 1 && trimmed[0] == 0 {
        trimmed = &trimmed[1..];
    }
    if trimmed.len() > 32 {
        return Err(PrimitivesError::InvalidSignature(
            "integer value too large for 32 bytes".to_string(),
        ));
    }
    let mut out = [0u8; 32];
    out[32 - trimmed.len()..].copy_from_slice(trimmed);
    Ok(out)
}

fn is_zero(val: &[u8; 32]) -> bool {
    val.iter().all(|&b| b == 0)
}

/// Big-endian a < b.
fn is_less_than(a: &[u8; 32], b: &[u8; 32]) -> bool {
    a < b
}

/// Big-endian a > b.
fn is_greater_than(a: &[u8; 32], b: &[u8; 32]) -> bool {
    a > b
}

/// Compute N - val where N is the secp256k1 curve order.
fn subtract_from_order(val: &[u8; 32]) -> [u8; 32] {
    let mut result = [0u8; 32];
    let mut borrow: i32 = 0;
    for i in (0..32).rev() {
        let diff = CURVE_ORDER[i] as i32 - val[i] as i32 - borrow;
        if diff < 0 {
            result[i] = (diff + 256) as u8;
            borrow = 1;
        } else {
            result[i] = diff as u8;
            borrow = 0;
        }
    }
    result
}
