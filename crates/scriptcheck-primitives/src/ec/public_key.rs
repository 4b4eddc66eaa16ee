//! secp256k1 public key.
//!
//! A `PublicKey` is a validated curve point that also remembers the SEC1 form
//! it was parsed from. P2PKH hashes and script pushes are computed over exact
//! bytes, so the compressed and uncompressed forms of one point are
//! different keys as far as a locking script is concerned.

use k256::ecdsa::VerifyingKey;
use k256::elliptic_curve::sec1::ToEncodedPoint;
use std::fmt;

use crate::ec::signature::Signature;
use crate::hash::hash160;
use crate::PrimitivesError;

/// Length of a compressed public key in bytes (prefix + 32 byte x-coordinate).
pub const COMPRESSED_LEN: usize = 33;

/// Length of an uncompressed public key in bytes (prefix + 32 byte x + 32 byte y).
pub const UNCOMPRESSED_LEN: usize = 65;

/// A secp256k1 public key used for signature verification.
#[derive(Clone, Debug)]
pub struct PublicKey {
    inner: VerifyingKey,
    compressed: bool,
}

impl PublicKey {
    /// Parse a SEC1-encoded public key.
    ///
    /// Accepts compressed (33-byte, `0x02`/`0x03` prefix) and uncompressed
    /// (65-byte, `0x04` prefix) encodings. The encoding is kept and
    /// reproduced by [`PublicKey::to_bytes`].
    ///
    /// # Arguments
    /// * `bytes` - SEC1-encoded public key bytes.
    ///
    /// # Returns
    /// `Ok(PublicKey)` on success, or an error if the prefix does not match
    /// the length or the bytes are not a point on the curve.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, PrimitivesError> {
        let compressed = match (bytes.len(), bytes.first()) {
            (0, _) => {
                return Err(PrimitivesError::InvalidPublicKey(
                    "pubkey bytes are empty".to_string(),
                ))
            }
            (COMPRESSED_LEN, Some(0x02 | 0x03)) => true,
            (UNCOMPRESSED_LEN, Some(0x04)) => false,
            (COMPRESSED_LEN | UNCOMPRESSED_LEN, Some(prefix)) => {
                return Err(PrimitivesError::InvalidPublicKey(format!(
                    "unsupported pubkey prefix {:#04x} for length {}",
                    prefix,
                    bytes.len()
                )))
            }
            (n, _) => {
                return Err(PrimitivesError::InvalidPublicKey(format!(
                    "unsupported pubkey length {}",
                    n
                )))
            }
        };
        let inner = VerifyingKey::from_sec1_bytes(bytes)
            .map_err(|e| PrimitivesError::InvalidPublicKey(e.to_string()))?;
        Ok(PublicKey { inner, compressed })
    }

    /// Parse a hex-encoded SEC1 public key.
    pub fn from_hex(hex_str: &str) -> Result<Self, PrimitivesError> {
        let bytes = hex::decode(hex_str)?;
        Self::from_bytes(&bytes)
    }

    /// Whether this key was parsed from (or derived in) compressed form.
    pub fn is_compressed(&self) -> bool {
        self.compressed
    }

    /// Serialize the key in the SEC1 form it was created with.
    pub fn to_bytes(&self) -> Vec<u8> {
        self.inner
            .to_encoded_point(self.compressed)
            .as_bytes()
            .to_vec()
    }

    /// Serialize the public key in compressed SEC1 format (33 bytes).
    pub fn to_compressed(&self) -> [u8; COMPRESSED_LEN] {
        let point = self.inner.to_encoded_point(true);
        let mut out = [0u8; COMPRESSED_LEN];
        out.copy_from_slice(point.as_bytes());
        out
    }

    /// Serialize the public key in uncompressed SEC1 format (65 bytes).
    pub fn to_uncompressed(&self) -> [u8; UNCOMPRESSED_LEN] {
        let point = self.inner.to_encoded_point(false);
        let mut out = [0u8; UNCOMPRESSED_LEN];
        out.copy_from_slice(point.as_bytes());
        out
    }

    /// Return a copy of this key that serializes uncompressed.
    pub fn uncompressed(&self) -> PublicKey {
        PublicKey {
            inner: self.inner,
            compressed: false,
        }
    }

    /// Hex encoding of [`PublicKey::to_bytes`].
    pub fn to_hex(&self) -> String {
        hex::encode(self.to_bytes())
    }

    /// Compute the Hash160 of the key's own encoding.
    ///
    /// This is the value a P2PKH locking script for this key commits to.
    pub fn hash160(&self) -> [u8; 20] {
        hash160(&self.to_bytes())
    }

    /// Verify an ECDSA signature over a 32-byte digest.
    ///
    /// # Returns
    /// `true` if the signature is valid for this digest and key.
    pub fn verify(&self, digest: &[u8; 32], sig: &Signature) -> bool {
        sig.verify(digest, self)
    }

    pub(crate) fn from_k256_verifying_key(vk: &VerifyingKey) -> Self {
        PublicKey {
            inner: *vk,
            compressed: true,
        }
    }

    pub(crate) fn verifying_key(&self) -> &VerifyingKey {
        &self.inner
    }
}

impl PartialEq for PublicKey {
    fn eq(&self, other: &Self) -> bool {
        self.to_bytes() == other.to_bytes()
    }
}

impl Eq for PublicKey {}

impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}
