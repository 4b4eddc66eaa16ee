//! Signer-side key pair.

use crate::ec::private_key::PrivateKey;
use crate::ec::public_key::PublicKey;
use crate::hash::hash256;
use crate::PrimitivesError;

/// A private scalar together with its public point.
///
/// The public half is what gets placed in locking and unlocking scripts.
/// The private half only ever produces signatures.
#[derive(Clone, Debug)]
pub struct KeyPair {
    private_key: PrivateKey,
    public_key: PublicKey,
}

impl KeyPair {
    /// Generate a fresh random key pair with a compressed public key.
    pub fn generate() -> Self {
        Self::from_private_key(PrivateKey::new())
    }

    /// Build a key pair around an existing private key.
    pub fn from_private_key(private_key: PrivateKey) -> Self {
        let public_key = private_key.pub_key();
        KeyPair {
            private_key,
            public_key,
        }
    }

    /// Build a key pair from a hex-encoded private scalar.
    pub fn from_hex(hex_str: &str) -> Result<Self, PrimitivesError> {
        PrivateKey::from_hex(hex_str).map(Self::from_private_key)
    }

    /// Switch the public half to its uncompressed encoding.
    ///
    /// Scripts built from the result push (and hash) the 65-byte form.
    pub fn with_uncompressed_public_key(mut self) -> Self {
        self.public_key = self.public_key.uncompressed();
        self
    }

    pub fn private_key(&self) -> &PrivateKey {
        &self.private_key
    }

    pub fn public_key(&self) -> &PublicKey {
        &self.public_key
    }

    /// Sign an opaque message and return the strict DER signature bytes.
    ///
    /// The message is digested with [`hash256`] before signing, the same
    /// way the verifier digests it before checking.
    ///
    /// # Arguments
    /// * `message` - The signature-hash bytes supplied by the transaction builder.
    ///
    /// # Returns
    /// DER-encoded, low-S signature bytes.
    pub fn sign(&self, message: &[u8]) -> Result<Vec<u8>, PrimitivesError> {
        let digest = hash256(message);
        Ok(self.private_key.sign(&digest)?.to_der())
    }
}
