//! # Key Derivation Functions
//!
//! Password-derived keys for wallet secrets.
//!
//! ## Derivation Paths
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    PASSWORD-DERIVED KEYS                                │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │                                                                         │
//! │  derive_pass_sha(password, n)                                          │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │  k1 = SHA3-256(utf8(password))                                  │   │
//! │  │  ki = SHA3-256(k(i-1))          for i = 2..n                    │   │
//! │  │                                                                 │   │
//! │  │  n = 6000  → brain-wallet private key  ("pass:6k")              │   │
//! │  │  n = 20    → AES-256 wrap key for a stored private key         │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                                                         │
//! │  derive_pbkdf2_key(password, salt, rounds)                             │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │  PBKDF2-HMAC-SHA1, 16-byte random salt, 1024 rounds, 32 bytes   │   │
//! │  │  → key for the password-blob cipher                             │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Wallet Algorithms
//!
//! | Identifier   | Account fields     | Private key comes from          |
//! |--------------|--------------------|---------------------------------|
//! | `pass:6k`    | none               | `derive_pass_sha(password, 6000)` |
//! | `pass:6k`    | `encrypted`, `iv`  | unwrap with the 20-round key    |
//! | `pass:bip32` | `encrypted`, `iv`  | unwrap with the 20-round key    |
//! | `pass:enc`   | `encrypted`, `iv`  | unwrap with the 20-round key    |
//! | `trezor`     | n/a                | hardware device                 |

use std::fmt;
use std::str::FromStr;

use hmac::Hmac;
use serde::{Deserialize, Serialize};
use sha1::Sha1;
use sha2::Sha256;
use zeroize::Zeroize;

use super::encryption::{unwrap_private_key, EncryptedPrivateKey};
use super::hasher::{HashAlgorithm, Hasher};
use super::keys::PrivateKey;
use super::KEY_SIZE;
use crate::config::CryptoConfig;
use crate::error::{Error, Result};

/// Rounds turning a passphrase into a brain-wallet private key
pub const BRAIN_WALLET_ROUNDS: u32 = 6000;

/// Rounds turning a password into the AES key wrapping a stored private key
pub const WRAP_KEY_ROUNDS: u32 = 20;

/// PBKDF2 iterations for the password-blob cipher
pub const PBKDF2_ROUNDS: u32 = 1024;

/// PBKDF2 salt length in bytes
pub const PBKDF2_SALT_SIZE: usize = 16;

/// Iterated SHA3-256 over a password
///
/// The first round hashes the UTF-8 password, every later round hashes the
/// previous 32-byte digest.
///
/// ## Errors
///
/// [`Error::MissingArgument`] for an empty password or zero rounds.
pub fn derive_pass_sha(password: &str, count: u32) -> Result<[u8; KEY_SIZE]> {
    if password.is_empty() {
        return Err(Error::MissingArgument("password"));
    }
    if count == 0 {
        return Err(Error::MissingArgument("count"));
    }

    let mut hasher = Hasher::new(HashAlgorithm::Sha3_256);
    let mut digest = [0u8; KEY_SIZE];

    hasher.update(password.as_bytes());
    hasher.finalize_into(&mut digest)?;
    for _ in 1..count {
        hasher.update(&digest);
        hasher.finalize_into(&mut digest)?;
    }

    tracing::trace!(rounds = count, "Derived iterated SHA3 key");
    Ok(digest)
}

/// HMAC hash driving PBKDF2
///
/// Stored password blobs were written with HMAC-SHA1, the legacy default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Pbkdf2Prf {
    /// HMAC-SHA1
    #[default]
    Sha1,
    /// HMAC-SHA256
    Sha256,
}

/// PBKDF2-HMAC-SHA1 with a 32-byte output
///
/// Reads and writes the legacy password blobs.
pub fn derive_pbkdf2_key(password: &str, salt: &[u8], rounds: u32) -> Result<[u8; KEY_SIZE]> {
    derive_pbkdf2_key_with(Pbkdf2Prf::Sha1, password, salt, rounds)
}

/// PBKDF2 with a chosen PRF and a 32-byte output
pub fn derive_pbkdf2_key_with(
    prf: Pbkdf2Prf,
    password: &str,
    salt: &[u8],
    rounds: u32,
) -> Result<[u8; KEY_SIZE]> {
    if password.is_empty() {
        return Err(Error::MissingArgument("password"));
    }
    if salt.is_empty() {
        return Err(Error::MissingArgument("salt"));
    }

    let mut key = [0u8; KEY_SIZE];
    let derived = match prf {
        Pbkdf2Prf::Sha1 => {
            pbkdf2::pbkdf2::<Hmac<Sha1>>(password.as_bytes(), salt, rounds, &mut key)
        }
        Pbkdf2Prf::Sha256 => {
            pbkdf2::pbkdf2::<Hmac<Sha256>>(password.as_bytes(), salt, rounds, &mut key)
        }
    };
    derived.map_err(|e| Error::KeyDerivationFailed(format!("PBKDF2 failed: {}", e)))?;
    Ok(key)
}

// ============================================================================
// WALLET ALGORITHMS
// ============================================================================

/// How a wallet account's private key is protected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PasswordAlgorithm {
    /// `pass:6k` brain wallet, or a legacy account wrapped with a password
    Brain6k,
    /// `pass:bip32` key derived from a seed, stored wrapped
    Bip32,
    /// `pass:enc` imported key, stored wrapped
    Encrypted,
    /// `trezor` hardware wallet; no key material on this device
    Trezor,
}

impl PasswordAlgorithm {
    /// The wire identifier
    pub fn as_str(&self) -> &'static str {
        match self {
            PasswordAlgorithm::Brain6k => "pass:6k",
            PasswordAlgorithm::Bip32 => "pass:bip32",
            PasswordAlgorithm::Encrypted => "pass:enc",
            PasswordAlgorithm::Trezor => "trezor",
        }
    }

    /// Parse an identifier, `None` when unknown
    pub fn parse_opt(s: &str) -> Option<Self> {
        match s {
            "pass:6k" => Some(PasswordAlgorithm::Brain6k),
            "pass:bip32" => Some(PasswordAlgorithm::Bip32),
            "pass:enc" => Some(PasswordAlgorithm::Encrypted),
            "trezor" => Some(PasswordAlgorithm::Trezor),
            _ => None,
        }
    }
}

impl fmt::Display for PasswordAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PasswordAlgorithm {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse_opt(s)
            .ok_or_else(|| Error::UnsupportedDataType(format!("unknown wallet algorithm: {}", s)))
    }
}

/// The key fields of a stored wallet account
///
/// Brain wallets carry neither field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoredAccount {
    /// Hex ciphertext of the wrapped private key
    pub encrypted: Option<String>,
    /// Hex IV used to wrap it
    pub iv: Option<String>,
}

impl StoredAccount {
    fn fields(&self) -> (Option<&str>, Option<&str>) {
        fn present(s: &Option<String>) -> Option<&str> {
            s.as_deref().filter(|s| !s.is_empty())
        }
        (present(&self.encrypted), present(&self.iv))
    }
}

/// Outcome of [`reveal_private_key`]
#[derive(Debug)]
pub enum RevealedKey {
    /// The private key, recovered locally
    Local(PrivateKey),
    /// Signing happens on a hardware device
    HardwareDelegated,
}

/// Recover an account's private key with the default work factors
///
/// See [`reveal_private_key_with`].
pub fn reveal_private_key(
    password: &str,
    account: &StoredAccount,
    algorithm: &str,
) -> Result<Option<RevealedKey>> {
    reveal_private_key_with(&CryptoConfig::default(), password, account, algorithm)
}

/// Recover an account's private key
///
/// ## Returns
///
/// - `Ok(Some(HardwareDelegated))` for `trezor`, without touching the password
/// - `Ok(Some(Local(key)))` for a brain wallet or an unwrapped stored key
/// - `Ok(None)` for an unknown algorithm, or a `pass:6k` account carrying
///   only one of `encrypted`/`iv`
///
/// ## Errors
///
/// [`Error::MissingArgument`] for an empty password on a local path, or a
/// `pass:bip32`/`pass:enc` account without both fields.
pub fn reveal_private_key_with(
    config: &CryptoConfig,
    password: &str,
    account: &StoredAccount,
    algorithm: &str,
) -> Result<Option<RevealedKey>> {
    let Some(algorithm) = PasswordAlgorithm::parse_opt(algorithm) else {
        tracing::debug!(algorithm, "Unknown wallet algorithm");
        return Ok(None);
    };

    if algorithm == PasswordAlgorithm::Trezor {
        return Ok(Some(RevealedKey::HardwareDelegated));
    }
    if password.is_empty() {
        return Err(Error::MissingArgument("password"));
    }

    let (encrypted, iv) = account.fields();
    let key = match (algorithm, encrypted, iv) {
        (PasswordAlgorithm::Brain6k, None, None) => {
            tracing::debug!("Deriving brain wallet key");
            PrivateKey::from_bytes(derive_pass_sha(password, config.brain_wallet_rounds)?)
        }
        (PasswordAlgorithm::Brain6k, _, None) | (PasswordAlgorithm::Brain6k, None, _) => {
            tracing::debug!("Brain wallet account has a partial key record");
            return Ok(None);
        }
        (_, Some(encrypted), Some(iv)) => {
            let record = EncryptedPrivateKey {
                encrypted: encrypted.to_owned(),
                iv: iv.to_owned(),
            };
            let mut wrap_key = derive_pass_sha(password, config.wrap_key_rounds)?;
            let key = unwrap_private_key(&record, &wrap_key);
            wrap_key.zeroize();
            key?
        }
        (_, None, _) => return Err(Error::MissingArgument("encrypted")),
        (_, _, None) => return Err(Error::MissingArgument("iv")),
    };

    Ok(Some(RevealedKey::Local(key)))
}

// ============================================================================
// TESTS
// ============================================================================
