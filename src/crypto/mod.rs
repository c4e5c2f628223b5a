//! # Cryptography Module
//!
//! All cryptographic operations of the wallet core.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      CRYPTOGRAPHIC ARCHITECTURE                         │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                   SIGNATURE SCHEME                              │   │
//! │  ├─────────────────────────────────────────────────────────────────┤   │
//! │  │                                                                 │   │
//! │  │  Ed25519 over edwards25519, hashed with SHA3-512               │   │
//! │  │  • Private key: 32 bytes                                       │   │
//! │  │  • Public key: 32 bytes (packed point)                         │   │
//! │  │  • Signature: 64 bytes (R ‖ S), S checked canonical            │   │
//! │  │                                                                 │   │
//! │  │  hasher ──► curve ──► keys / signing                           │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                   SECRETS AT REST                               │   │
//! │  ├─────────────────────────────────────────────────────────────────┤   │
//! │  │                                                                 │   │
//! │  │  kdf         iterated SHA3-256, PBKDF2-HMAC-SHA256             │   │
//! │  │  encryption  AES-256-CBC, PKCS#7                               │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                   PEER-TO-PEER MESSAGES                         │   │
//! │  ├─────────────────────────────────────────────────────────────────┤   │
//! │  │                                                                 │   │
//! │  │  message     salted shared key + AES-256-CBC                   │   │
//! │  │              hex(salt[32]) ‖ hex(iv[16]) ‖ hex(ciphertext)     │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Security Considerations
//!
//! 1. **Key Zeroization**: Private and shared keys are zeroized when dropped
//! 2. **Constant-Time Ladder**: Scalar multiplication never branches on key bits
//! 3. **Secure Random**: `rand::rngs::OsRng` for keys, salts and IVs
//! 4. **No MAC**: CBC payloads are not authenticated; see [`encryption`]

pub mod curve;
pub mod encryption;
pub mod hasher;
mod kdf;
mod keys;
pub mod message;
mod signing;

use rand::rngs::OsRng;
use rand::RngCore;

pub use encryption::{
    decode_private_key, decrypt_with_key, encode_private_key, encrypt_with_key,
    encrypt_with_key_and_iv, EncryptedPrivateKey, EncryptedSecret, PasswordCipher,
};
pub use hasher::{hash, hash_into, sha3_256, sha3_512, HashAlgorithm, Hasher};
pub use kdf::{
    derive_pass_sha, derive_pbkdf2_key, derive_pbkdf2_key_with, reveal_private_key,
    reveal_private_key_with, PasswordAlgorithm, Pbkdf2Prf, RevealedKey, StoredAccount,
    BRAIN_WALLET_ROUNDS, PBKDF2_ROUNDS, PBKDF2_SALT_SIZE, WRAP_KEY_ROUNDS,
};
pub use keys::{KeyPair, PrivateKey, PublicKey, SharedKey};
pub use signing::{derive_shared_key, sign, verify, Signature};

/// Size of private, public and shared keys in bytes
pub const KEY_SIZE: usize = 32;

/// Size of a signature in bytes
pub const SIGNATURE_SIZE: usize = 64;

/// Size of the shared-key salt in bytes
pub const SALT_SIZE: usize = 32;

/// Size of an AES-CBC IV in bytes
pub const IV_SIZE: usize = 16;

/// Fill an array from the operating system's RNG
pub(crate) fn random_bytes<const N: usize>() -> [u8; N] {
    let mut bytes = [0u8; N];
    OsRng.fill_bytes(&mut bytes);
    bytes
}
