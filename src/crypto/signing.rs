//! # Digital Signatures Module
//!
//! Signing, verification and shared-key derivation over [`KeyPair`]s. This is
//! the only module that drives the curve engine's key operations; it always
//! injects a SHA3-512 [`Hasher`].
//!
//! ## Signature Flow
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         SIGNING FLOW                                    │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │                                                                         │
//! │  sign(keypair, data)                                                   │
//! │  ┌─────────────────────────────────────────────────────────────┐       │
//! │  │  1. d = clamp(SHA3-512(sk))                                │       │
//! │  │  2. r = SHA3-512(d_hi ‖ data) mod L,  R = r·B              │       │
//! │  │  3. h = SHA3-512(R ‖ pk ‖ data) mod L                      │       │
//! │  │  4. S = r + h·d mod L, checked canonical                   │       │
//! │  └─────────────────────────────────────────────────────────────┘       │
//! │                                                                         │
//! │  Output: 64 bytes  R ‖ S  (deterministic)                              │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//!
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       VERIFICATION FLOW                                 │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │                                                                         │
//! │  verify(public_key, data, signature) -> bool                           │
//! │                                                                         │
//! │  ✗ S not reduced mod L          ✗ all-zero public key                  │
//! │  ✗ public key not on the curve  ✗ h·(-A) + S·B ≠ R                     │
//! │  ✓ otherwise                                                           │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::curve;
use super::hasher::{HashAlgorithm, Hasher};
use super::keys::{hex_bytes, KeyPair, PublicKey, SharedKey};
use super::{SALT_SIZE, SIGNATURE_SIZE};
use crate::error::{Error, Result};

/// A 64-byte `R ‖ S` signature
#[derive(Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signature(#[serde(with = "hex_bytes")] [u8; SIGNATURE_SIZE]);

impl Signature {
    /// Create from raw bytes
    pub fn from_bytes(bytes: [u8; SIGNATURE_SIZE]) -> Self {
        Self(bytes)
    }

    /// Create from a slice (must be exactly 64 bytes)
    pub fn from_slice(slice: &[u8]) -> Result<Self> {
        let bytes: [u8; SIGNATURE_SIZE] =
            slice.try_into().map_err(|_| Error::InvalidLength {
                expected: SIGNATURE_SIZE,
                actual: slice.len(),
            })?;
        Ok(Self(bytes))
    }

    /// Get the raw bytes
    pub fn as_bytes(&self) -> &[u8; SIGNATURE_SIZE] {
        &self.0
    }

    /// Encode as hex string
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Decode from a 128-character hex string
    pub fn from_hex(hex_str: &str) -> Result<Self> {
        if hex_str.is_empty() {
            return Err(Error::MissingArgument("signature"));
        }
        Self::from_slice(&hex::decode(hex_str)?)
    }
}

impl fmt::Debug for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Signature({})", self.to_hex())
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for Signature {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_hex(s)
    }
}

impl AsRef<[u8]> for Signature {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

fn curve_hasher() -> Hasher {
    Hasher::new(HashAlgorithm::Sha3_512)
}

/// Sign `data` with the key pair's private key
///
/// ## Parameters
///
/// - `keypair`: The signing key pair
/// - `data`: The bytes to sign
///
/// ## Returns
///
/// A deterministic 64-byte signature. [`Error::NonCanonicalSignature`] means
/// the arithmetic produced an unreduced `S` and the signature was withheld.
pub fn sign(keypair: &KeyPair, data: &[u8]) -> Result<Signature> {
    let bytes = curve::sign(
        data,
        keypair.public_key().as_bytes(),
        keypair.private_key().as_bytes(),
        &mut curve_hasher(),
    )?;
    tracing::trace!(len = data.len(), "Signed message");
    Ok(Signature(bytes))
}

/// Verify `signature` over `data`
///
/// ## Returns
///
/// `true` only if the signature is valid for this public key. Malformed
/// signatures and keys give `false`, never an error.
pub fn verify(public_key: &PublicKey, data: &[u8], signature: &Signature) -> bool {
    let valid = curve::verify(
        public_key.as_bytes(),
        data,
        signature.as_bytes(),
        &mut curve_hasher(),
    );
    if !valid {
        tracing::debug!(public_key = %public_key, "Signature verification failed");
    }
    valid
}

/// Derive the salted key shared between `keypair` and `other`
///
/// ## Parameters
///
/// - `keypair`: Our key pair
/// - `other`: The other party's public key
/// - `salt`: Exactly 32 bytes, mixed in before the final hash
///
/// ## Returns
///
/// The same [`SharedKey`] the other party derives from their private key
/// and our public key.
pub fn derive_shared_key(keypair: &KeyPair, other: &PublicKey, salt: &[u8]) -> Result<SharedKey> {
    let salt: &[u8; SALT_SIZE] = salt
        .try_into()
        .map_err(|_| Error::InvalidSaltSize(salt.len()))?;

    let bytes = curve::derive_shared_key(
        salt,
        keypair.private_key().as_bytes(),
        other.as_bytes(),
        &mut curve_hasher(),
    )?;
    tracing::trace!(other = %other, "Derived shared key");
    Ok(SharedKey::from_bytes(bytes))
}

// ============================================================================
// TESTS
// ============================================================================
