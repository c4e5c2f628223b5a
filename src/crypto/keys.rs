//! # Key Management
//!
//! Private keys, the public keys derived from them, and the shared keys two
//! parties agree on.
//!
//! ## Key Types
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          KEY TYPES                                      │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │  KeyPair                                                        │   │
//! │  │  ───────                                                         │   │
//! │  │                                                                  │   │
//! │  │  ┌───────────────┐   extract    ┌───────────────┐               │   │
//! │  │  │  PrivateKey   │ ───────────► │  PublicKey    │               │   │
//! │  │  │  32 bytes     │  SHA3-512    │  32 bytes     │               │   │
//! │  │  │  zeroized     │  clamp, d·B  │  packed point │               │   │
//! │  │  └───────────────┘              └───────────────┘               │   │
//! │  │                                                                  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │  SharedKey                                                      │   │
//! │  │  ─────────                                                       │   │
//! │  │                                                                  │   │
//! │  │  Alice: H256(pack(a·B_pub) ⊕ salt)                              │   │
//! │  │  Bob:   H256(pack(b·A_pub) ⊕ salt)      same 32 bytes           │   │
//! │  │                                                                  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use zeroize::{Zeroize, ZeroizeOnDrop};

use super::curve;
use super::hasher::{HashAlgorithm, Hasher};
use super::{random_bytes, KEY_SIZE};
use crate::error::{Error, Result};

// ============================================================================
// PRIVATE KEY
// ============================================================================

/// A 32-byte private key
///
/// ## Security
///
/// - Bytes are zeroized when the key is dropped
/// - `Debug` never prints the key material
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct PrivateKey([u8; KEY_SIZE]);

impl PrivateKey {
    /// Wrap raw key bytes
    pub fn from_bytes(bytes: [u8; KEY_SIZE]) -> Self {
        Self(bytes)
    }

    /// Parse from a 64-character hex string
    pub fn from_hex(hex_str: &str) -> Result<Self> {
        decode_key_hex(hex_str, "private key").map(Self)
    }

    /// Fresh key from the operating system's RNG
    pub fn generate() -> Self {
        Self(random_bytes())
    }

    /// Get the raw key bytes
    ///
    /// ## Security Warning
    ///
    /// Only use this for secure storage. Never log or transmit these bytes.
    pub fn as_bytes(&self) -> &[u8; KEY_SIZE] {
        &self.0
    }

    /// Lowercase hex of the key bytes, for wallet export
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PrivateKey(..)")
    }
}

// ============================================================================
// PUBLIC KEY
// ============================================================================

/// A packed curve point, safe to share
///
/// Serializes as a lowercase hex string.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PublicKey(#[serde(with = "hex_bytes")] [u8; KEY_SIZE]);

impl PublicKey {
    /// Derive the public key for `private_key`
    ///
    /// Pure: the same private key always yields the same public key.
    pub fn extract(private_key: &PrivateKey) -> Result<Self> {
        let mut hasher = Hasher::new(HashAlgorithm::Sha3_512);
        curve::extract_public_key(private_key.as_bytes(), &mut hasher).map(Self)
    }

    /// Wrap raw point bytes
    ///
    /// The encoding is not checked here; operations that need a valid point
    /// reject bad encodings themselves.
    pub fn from_bytes(bytes: [u8; KEY_SIZE]) -> Self {
        Self(bytes)
    }

    /// Parse from a 64-character hex string
    pub fn from_hex(hex_str: &str) -> Result<Self> {
        decode_key_hex(hex_str, "public key").map(Self)
    }

    /// Get the raw bytes
    pub fn as_bytes(&self) -> &[u8; KEY_SIZE] {
        &self.0
    }

    /// Lowercase hex encoding
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PublicKey({})", self.to_hex())
    }
}

impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for PublicKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_hex(s)
    }
}

impl AsRef<[u8]> for PublicKey {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

// ============================================================================
// KEY PAIR
// ============================================================================

/// A private key together with its derived public key
///
/// Immutable once built. The private half is zeroized on drop.
#[derive(Clone)]
pub struct KeyPair {
    private_key: PrivateKey,
    public_key: PublicKey,
}

impl KeyPair {
    /// Build from a 64-character hex private key
    ///
    /// Fails with [`Error::InvalidKeySize`] when the decoded key is not
    /// 32 bytes.
    pub fn from_private_key_hex(hex_str: &str) -> Result<Self> {
        Self::from_private_key(PrivateKey::from_hex(hex_str)?)
    }

    /// Build from an already parsed private key
    pub fn from_private_key(private_key: PrivateKey) -> Result<Self> {
        let public_key = PublicKey::extract(&private_key)?;
        tracing::debug!(public_key = %public_key, "Derived key pair");
        Ok(Self {
            private_key,
            public_key,
        })
    }

    /// Generate a new random key pair
    ///
    /// Uses the operating system's secure random number generator.
    pub fn generate() -> Result<Self> {
        Self::from_private_key(PrivateKey::generate())
    }

    /// The private half
    pub fn private_key(&self) -> &PrivateKey {
        &self.private_key
    }

    /// The public half
    pub fn public_key(&self) -> &PublicKey {
        &self.public_key
    }
}

impl fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyPair")
            .field("public_key", &self.public_key)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// SHARED KEY
// ============================================================================

/// A salted 32-byte secret shared by two key pairs
///
/// Equality runs in constant time.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct SharedKey([u8; KEY_SIZE]);

impl SharedKey {
    pub(crate) fn from_bytes(bytes: [u8; KEY_SIZE]) -> Self {
        Self(bytes)
    }

    /// Get the raw key bytes
    pub fn as_bytes(&self) -> &[u8; KEY_SIZE] {
        &self.0
    }

    /// Lowercase hex encoding
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl PartialEq for SharedKey {
    fn eq(&self, other: &Self) -> bool {
        curve::ct_eq(&self.0, &other.0)
    }
}

impl Eq for SharedKey {}

impl fmt::Debug for SharedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SharedKey(..)")
    }
}

// ============================================================================
// HELPERS
// ============================================================================

/// Decode a 32-byte key from hex, naming `what` when it is missing
fn decode_key_hex(hex_str: &str, what: &'static str) -> Result<[u8; KEY_SIZE]> {
    if hex_str.is_empty() {
        return Err(Error::MissingArgument(what));
    }
    let bytes = hex::decode(hex_str)?;
    let len = bytes.len();
    bytes.try_into().map_err(|_| Error::InvalidKeySize(len))
}

/// Serde helper for serializing byte arrays as hex
pub(crate) mod hex_bytes {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S, const N: usize>(bytes: &[u8; N], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&hex::encode(bytes))
    }

    pub fn deserialize<'de, D, const N: usize>(deserializer: D) -> Result<[u8; N], D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        let bytes = hex::decode(&s).map_err(serde::de::Error::custom)?;
        bytes
            .try_into()
            .map_err(|_| serde::de::Error::custom("Invalid length"))
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const PRIVATE_HEX: &str = "041e2ce90c31cd65620ed16ab7a5a485e5b335d7e61c75cd9b3a2fed3e091728";
    const PUBLIC_HEX: &str = "9a49366406aca952b88badf5f1e9be6ce4968141035a60be503273ea65456b24";

    #[test]
    fn test_keypair_from_hex() {
        let kp = KeyPair::from_private_key_hex(PRIVATE_HEX).unwrap();
        assert_eq!(kp.public_key().to_hex(), PUBLIC_HEX);
        assert_eq!(kp.private_key().to_hex(), PRIVATE_HEX);
    }

    #[test]
    fn test_uppercase_hex_accepted() {
        let kp = KeyPair::from_private_key_hex(&PRIVATE_HEX.to_uppercase()).unwrap();
        assert_eq!(kp.public_key().to_hex(), PUBLIC_HEX);
    }

    #[test]
    fn test_extract_is_deterministic() {
        let sk = PrivateKey::generate();
        assert_eq!(
            PublicKey::extract(&sk).unwrap(),
            PublicKey::extract(&sk).unwrap()
        );
    }

    #[test]
    fn test_keypair_generation() {
        let kp1 = KeyPair::generate().unwrap();
        let kp2 = KeyPair::generate().unwrap();
        assert_ne!(kp1.public_key(), kp2.public_key());
    }

    #[test]
    fn test_wrong_key_size() {
        let err = KeyPair::from_private_key_hex("abcd").unwrap_err();
        assert!(matches!(err, Error::InvalidKeySize(2)));

        let long = format!("{}00", PRIVATE_HEX);
        let err = KeyPair::from_private_key_hex(&long).unwrap_err();
        assert!(matches!(err, Error::InvalidKeySize(33)));
    }

    #[test]
    fn test_empty_and_garbage_hex() {
        assert!(matches!(
            PrivateKey::from_hex(""),
            Err(Error::MissingArgument(_))
        ));
        assert!(matches!(
            PublicKey::from_hex("xyz0"),
            Err(Error::InvalidHex(_))
        ));
    }

    #[test]
    fn test_debug_hides_secrets() {
        let kp = KeyPair::from_private_key_hex(PRIVATE_HEX).unwrap();
        let printed = format!("{:?}", kp);
        assert!(!printed.contains(PRIVATE_HEX));
        assert!(printed.contains(PUBLIC_HEX));
        assert_eq!(format!("{:?}", kp.private_key()), "PrivateKey(..)");
    }

    #[test]
    fn test_public_key_serialization() {
        let public = PublicKey::from_hex(PUBLIC_HEX).unwrap();

        let json = serde_json::to_string(&public).unwrap();
        assert_eq!(json, format!("\"{}\"", PUBLIC_HEX));

        let restored: PublicKey = serde_json::from_str(&json).unwrap();
        assert_eq!(public, restored);
    }

    #[test]
    fn test_public_key_from_str() {
        let public: PublicKey = PUBLIC_HEX.parse().unwrap();
        assert_eq!(public.to_string(), PUBLIC_HEX);
    }

    #[test]
    fn test_shared_key_equality() {
        let a = SharedKey::from_bytes([7u8; KEY_SIZE]);
        let mut last_differs = [7u8; KEY_SIZE];
        last_differs[KEY_SIZE - 1] = 8;

        assert_eq!(a, SharedKey::from_bytes([7u8; KEY_SIZE]));
        assert_ne!(a, SharedKey::from_bytes(last_differs));
        assert_ne!(a, SharedKey::from_bytes([0u8; KEY_SIZE]));
    }
}
