//! P2PKH address handling.
//!
//! An address is the Base58Check form of the 20-byte public key hash a
//! P2PKH locking script commits to, prefixed with a network version byte.

use std::fmt;

use scriptcheck_primitives::ec::PublicKey;
use scriptcheck_primitives::hash::sha256d;

use crate::ScriptError;

/// Mainnet P2PKH address version byte.
const MAINNET_P2PKH: u8 = 0x00;
/// Testnet/signet/regtest P2PKH address version byte.
const TESTNET_P2PKH: u8 = 0x6f;

/// Network selector for the address version byte.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Network {
    /// Mainnet (prefix 0x00, addresses start with '1').
    Mainnet,
    /// Testnet, signet, and regtest (prefix 0x6f, addresses start with 'm' or 'n').
    Testnet,
}

impl Network {
    fn version_byte(self) -> u8 {
        match self {
            Network::Mainnet => MAINNET_P2PKH,
            Network::Testnet => TESTNET_P2PKH,
        }
    }
}

/// A P2PKH address.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Address {
    /// The Base58Check address string.
    pub address_string: String,
    /// The 20-byte RIPEMD-160(SHA-256(pubkey)) hash.
    pub public_key_hash: [u8; 20],
    pub network: Network,
}

impl Address {
    /// Parse a Base58Check-encoded P2PKH address string.
    ///
    /// Validates length and checksum, and detects the network from the
    /// version byte.
    pub fn from_string(addr: &str) -> Result<Self, ScriptError> {
        let decoded = bs58::decode(addr)
            .into_vec()
            .map_err(|_| ScriptError::InvalidAddress(format!("bad char for '{}'", addr)))?;

        if decoded.len() != 25 {
            return Err(ScriptError::InvalidAddress(format!(
                "invalid length {} for '{}'",
                decoded.len(),
                addr
            )));
        }

        let checksum = sha256d(&decoded[..21]);
        if decoded[21..25] != checksum[..4] {
            return Err(ScriptError::EncodingChecksumFailed);
        }

        let network = match decoded[0] {
            MAINNET_P2PKH => Network::Mainnet,
            TESTNET_P2PKH => Network::Testnet,
            v => {
                return Err(ScriptError::InvalidAddress(format!(
                    "unsupported version byte {:#04x} for '{}'",
                    v, addr
                )))
            }
        };

        let mut public_key_hash = [0u8; 20];
        public_key_hash.copy_from_slice(&decoded[1..21]);

        Ok(Address {
            address_string: addr.to_string(),
            public_key_hash,
            network,
        })
    }

    /// Create an address from a 20-byte public key hash.
    pub fn from_public_key_hash(hash: &[u8; 20], network: Network) -> Self {
        let mut payload = Vec::with_capacity(25);
        payload.push(network.version_byte());
        payload.extend_from_slice(hash);
        let checksum = sha256d(&payload);
        payload.extend_from_slice(&checksum[..4]);

        Address {
            address_string: bs58::encode(&payload).into_string(),
            public_key_hash: *hash,
            network,
        }
    }

    /// Create an address for a public key, hashing its own encoding.
    pub fn from_public_key(public_key: &PublicKey, network: Network) -> Self {
        Self::from_public_key_hash(&public_key.hash160(), network)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.address_string)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const G_COMPRESSED: &str =
        "0279be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798";
    const G_UNCOMPRESSED: &str = "0479be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798\
                                  483ada7726a3c4655da4fbfc0e1108a8fd17b448a68554199c47d08ffb10d4b8";

    #[test]
    fn test_generator_addresses() {
        let c = PublicKey::from_hex(G_COMPRESSED).unwrap();
        let u = PublicKey::from_hex(G_UNCOMPRESSED).unwrap();
        assert_eq!(
            Address::from_public_key(&c, Network::Mainnet).to_string(),
            "1BgGZ9tcN4rm9KBzDn7KprQz87SZ26SAMH"
        );
        assert_eq!(
            Address::from_public_key(&c, Network::Testnet).to_string(),
            "mrCDrCybB6J1vRfbwM5hemdJz73FwDBC8r"
        );
        assert_eq!(
            Address::from_public_key(&u, Network::Mainnet).to_string(),
            "1EHNa6Q4Jz2uvNExL497mE43ikXhwF6kZm"
        );
    }

    #[test]
    fn test_from_string() {
        let addr = Address::from_string("mrCDrCybB6J1vRfbwM5hemdJz73FwDBC8r").unwrap();
        assert_eq!(addr.network, Network::Testnet);
        assert_eq!(
            hex::encode(addr.public_key_hash),
            "751e76e8199196d454941c45d1b3a323f1433bd6"
        );
    }

    #[test]
    fn test_from_string_rejects_bad_input() {
        // Last character changed: checksum no longer matches.
        assert!(matches!(
            Address::from_string("1BgGZ9tcN4rm9KBzDn7KprQz87SZ26SAMJ"),
            Err(ScriptError::EncodingChecksumFailed)
        ));
        assert!(Address::from_string("0OIl").is_err());
        assert!(Address::from_string("1111").is_err());
    }
}
