//! Digest functions shared by the signer and the script verifier.
//!
//! `hash256` is the digest that ECDSA signs, and `hash160` is the P2PKH
//! public key hash. The remaining functions are the building blocks the
//! two are made of, plus `sha256d` for Base58Check checksums.

use ripemd::Ripemd160;
use sha2::{Digest, Sha256};

/// Length of a `hash256` digest in bytes.
pub const HASH256_LEN: usize = 32;

/// Length of a `hash160` digest in bytes.
pub const HASH160_LEN: usize = 20;

/// Compute the SHA-256 hash of the input data.
pub fn sha256(data: &[u8]) -> [u8; 32] {
    Sha256::digest(data).into()
}

/// Compute the signature-hash digest of a message.
///
/// This is a single SHA-256 pass. Signing and verification both route the
/// opaque message through this function, so a caller that signs with
/// [`crate::ec::KeyPair::sign`] and a verifier that checks the result always
/// agree on the digest.
///
/// # Arguments
/// * `message` - The exact bytes that were (or will be) signed.
///
/// # Returns
/// A 32-byte digest.
pub fn hash256(message: &[u8]) -> [u8; HASH256_LEN] {
    sha256(message)
}

/// Compute double SHA-256: SHA-256(SHA-256(data)).
///
/// Used for Base58Check address checksums.
pub fn sha256d(data: &[u8]) -> [u8; 32] {
    sha256(&sha256(data))
}

/// Compute the RIPEMD-160 hash of the input data.
pub fn ripemd160(data: &[u8]) -> [u8; 20] {
    Ripemd160::digest(data).into()
}

/// Compute Hash160: RIPEMD-160(SHA-256(data)).
///
/// This is the 20-byte value a P2PKH locking script commits to. It is
/// computed over the exact public key bytes supplied, so the compressed
/// and uncompressed encodings of one point hash differently.
///
/// # Arguments
/// * `public_key` - SEC1-encoded public key bytes.
///
/// # Returns
/// A 20-byte digest.
pub fn hash160(public_key: &[u8]) -> [u8; HASH160_LEN] {
    ripemd160(&sha256(public_key))
}
