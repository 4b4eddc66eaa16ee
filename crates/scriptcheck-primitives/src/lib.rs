//! Cryptographic primitives for script verification.
//!
//! This crate provides the leaf building blocks of the verifier:
//! - Digest functions (`hash256` for signature hashing, `hash160` for
//!   P2PKH public key hashes, and the SHA-256/RIPEMD-160 pieces behind them)
//! - secp256k1 private keys, public keys, key pairs, and DER-encoded
//!   ECDSA signatures

pub mod hash;
pub mod ec;

mod error;
pub use error::PrimitivesError;
