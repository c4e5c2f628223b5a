//! # Encryption Module
//!
//! AES-256-CBC encryption of stored wallet secrets and of peer-to-peer
//! message payloads.
//!
//! ## Formats
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       ENCRYPTED SECRET FORMATS                          │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │                                                                         │
//! │  Raw key            EncryptedSecret { ciphertext, iv[16], key[32] }    │
//! │                                                                         │
//! │  Wallet account     EncryptedPrivateKey { encrypted: hex, iv: hex }    │
//! │                     key = derive_pass_sha(password, 20)                │
//! │                                                                         │
//! │  Password blob      hex(salt[16]) ‖ hex(iv[16]) ‖ base64(ciphertext)   │
//! │                     key = PBKDF2-HMAC-SHA1(password, salt, 1024)       │
//! │                     ├──── 32 ────┤├──── 32 ────┤├──── rest ────┤       │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## No Integrity Protection
//!
//! CBC carries no MAC. A corrupted ciphertext or a wrong password decrypts to
//! garbage instead of failing: padding is stripped leniently (the last byte
//! gives the pad length, clamped to the buffer). Callers that need to detect
//! a wrong password must check the result themselves, e.g. by comparing the
//! derived public key against a stored address.

use std::fmt;

use aes::Aes256;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use cbc::cipher::block_padding::{NoPadding, Pkcs7};
use cbc::cipher::{BlockDecryptMut, BlockEncryptMut, KeyIvInit};
use serde::{Deserialize, Serialize};
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

use super::kdf::{
    derive_pass_sha, derive_pbkdf2_key_with, Pbkdf2Prf, PBKDF2_SALT_SIZE, WRAP_KEY_ROUNDS,
};
use super::keys::PrivateKey;
use super::{random_bytes, IV_SIZE, KEY_SIZE};
use crate::config::CryptoConfig;
use crate::error::{Error, Result};

type Aes256CbcEnc = cbc::Encryptor<Aes256>;
type Aes256CbcDec = cbc::Decryptor<Aes256>;

const BLOCK_SIZE: usize = 16;

// ============================================================================
// CBC PRIMITIVES
// ============================================================================

/// AES-256-CBC with PKCS#7 padding
pub(crate) fn cbc_encrypt(key: &[u8; KEY_SIZE], iv: &[u8; IV_SIZE], data: &[u8]) -> Result<Vec<u8>> {
    let cipher = Aes256CbcEnc::new_from_slices(key, iv)
        .map_err(|e| Error::EncryptionFailed(format!("Invalid key or IV: {}", e)))?;
    Ok(cipher.encrypt_padded_vec_mut::<Pkcs7>(data))
}

/// AES-256-CBC decryption with lenient padding removal
///
/// Fails only when the ciphertext is not a whole number of blocks.
pub(crate) fn cbc_decrypt(key: &[u8; KEY_SIZE], iv: &[u8; IV_SIZE], data: &[u8]) -> Result<Vec<u8>> {
    if data.len() % BLOCK_SIZE != 0 {
        return Err(Error::DecryptionFailed(format!(
            "ciphertext length {} is not a multiple of {}",
            data.len(),
            BLOCK_SIZE
        )));
    }

    let cipher = Aes256CbcDec::new_from_slices(key, iv)
        .map_err(|e| Error::DecryptionFailed(format!("Invalid key or IV: {}", e)))?;
    let mut plaintext = cipher
        .decrypt_padded_vec_mut::<NoPadding>(data)
        .map_err(|e| Error::DecryptionFailed(e.to_string()))?;

    if let Some(&pad) = plaintext.last() {
        let keep = plaintext.len().saturating_sub(pad as usize);
        plaintext.truncate(keep);
    }
    Ok(plaintext)
}

fn decode_hex_field<const N: usize>(hex_str: &str, what: &'static str) -> Result<[u8; N]> {
    if hex_str.is_empty() {
        return Err(Error::MissingArgument(what));
    }
    let bytes = hex::decode(hex_str)?;
    let actual = bytes.len();
    bytes
        .try_into()
        .map_err(|_| Error::InvalidLength { expected: N, actual })
}

// ============================================================================
// RAW-KEY ENCRYPTION
// ============================================================================

/// Ciphertext together with the IV and key that produced it
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct EncryptedSecret {
    /// AES-256-CBC ciphertext, PKCS#7 padded
    pub ciphertext: Vec<u8>,
    /// 16-byte IV
    pub iv: [u8; IV_SIZE],
    /// 32-byte AES key
    pub key: [u8; KEY_SIZE],
}

impl fmt::Debug for EncryptedSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EncryptedSecret")
            .field("ciphertext", &hex::encode(&self.ciphertext))
            .field("iv", &hex::encode(self.iv))
            .finish_non_exhaustive()
    }
}

/// Encrypt `data` under `key` with a random IV
pub fn encrypt_with_key(data: &[u8], key: &[u8; KEY_SIZE]) -> Result<EncryptedSecret> {
    encrypt_with_key_and_iv(data, key, &random_bytes())
}

/// Encrypt `data` under `key` with a caller-chosen IV
///
/// ## Security Note
///
/// Never reuse an IV with the same key.
pub fn encrypt_with_key_and_iv(
    data: &[u8],
    key: &[u8; KEY_SIZE],
    iv: &[u8; IV_SIZE],
) -> Result<EncryptedSecret> {
    if data.is_empty() {
        return Err(Error::MissingArgument("data"));
    }
    Ok(EncryptedSecret {
        ciphertext: cbc_encrypt(key, iv, data)?,
        iv: *iv,
        key: *key,
    })
}

/// Decrypt an [`EncryptedSecret`] with the key it carries
pub fn decrypt_with_key(secret: &EncryptedSecret) -> Result<Vec<u8>> {
    if secret.ciphertext.is_empty() {
        return Err(Error::MissingArgument("ciphertext"));
    }
    cbc_decrypt(&secret.key, &secret.iv, &secret.ciphertext)
}

// ============================================================================
// WALLET PRIVATE-KEY WRAPPING
// ============================================================================

/// A private key wrapped for storage in a wallet account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncryptedPrivateKey {
    /// Hex ciphertext
    pub encrypted: String,
    /// Hex IV
    pub iv: String,
}

/// Wrap `private_key` under a key derived from `password`
pub fn encode_private_key(private_key: &PrivateKey, password: &str) -> Result<EncryptedPrivateKey> {
    let wrap_key = Zeroizing::new(derive_pass_sha(password, WRAP_KEY_ROUNDS)?);
    wrap_private_key(private_key, &wrap_key)
}

/// Recover a private key wrapped by [`encode_private_key`]
///
/// A wrong password usually surfaces as [`Error::InvalidKeySize`], since the
/// garbage plaintext rarely unpads to exactly 32 bytes. When it does, a
/// wrong key comes back.
pub fn decode_private_key(record: &EncryptedPrivateKey, password: &str) -> Result<PrivateKey> {
    let wrap_key = Zeroizing::new(derive_pass_sha(password, WRAP_KEY_ROUNDS)?);
    unwrap_private_key(record, &wrap_key)
}

pub(crate) fn wrap_private_key(
    private_key: &PrivateKey,
    wrap_key: &[u8; KEY_SIZE],
) -> Result<EncryptedPrivateKey> {
    let iv: [u8; IV_SIZE] = random_bytes();
    let ciphertext = cbc_encrypt(wrap_key, &iv, private_key.as_bytes())?;
    Ok(EncryptedPrivateKey {
        encrypted: hex::encode(ciphertext),
        iv: hex::encode(iv),
    })
}

pub(crate) fn unwrap_private_key(
    record: &EncryptedPrivateKey,
    wrap_key: &[u8; KEY_SIZE],
) -> Result<PrivateKey> {
    if record.encrypted.is_empty() {
        return Err(Error::MissingArgument("encrypted"));
    }
    let iv: [u8; IV_SIZE] = decode_hex_field(&record.iv, "iv")?;
    let ciphertext = hex::decode(&record.encrypted)?;

    let plaintext = Zeroizing::new(cbc_decrypt(wrap_key, &iv, &ciphertext)?);
    let bytes: [u8; KEY_SIZE] = plaintext
        .as_slice()
        .try_into()
        .map_err(|_| Error::InvalidKeySize(plaintext.len()))?;
    Ok(PrivateKey::from_bytes(bytes))
}

// ============================================================================
// PASSWORD BLOBS
// ============================================================================

const SALT_HEX_LEN: usize = PBKDF2_SALT_SIZE * 2;
const IV_HEX_LEN: usize = IV_SIZE * 2;

/// Password-based encryption into a single string blob
///
/// ```text
/// encrypt(data, password)
///   salt = random 16 bytes, iv = random 16 bytes
///   key  = PBKDF2-HMAC-<prf>(password, salt, rounds)
///   →    hex(salt) ‖ hex(iv) ‖ base64(AES-256-CBC(key, iv, data))
/// ```
///
/// The default PRF is SHA1, which is what existing blobs were written with.
#[derive(Debug, Clone)]
pub struct PasswordCipher {
    rounds: u32,
    prf: Pbkdf2Prf,
}

impl Default for PasswordCipher {
    fn default() -> Self {
        Self::new(&CryptoConfig::default())
    }
}

impl PasswordCipher {
    /// Cipher using the configured PBKDF2 rounds and PRF
    pub fn new(config: &CryptoConfig) -> Self {
        Self {
            rounds: config.pbkdf2_rounds,
            prf: config.pbkdf2_prf,
        }
    }

    /// PBKDF2 iterations this cipher uses
    pub fn rounds(&self) -> u32 {
        self.rounds
    }

    /// PBKDF2 PRF this cipher uses
    pub fn prf(&self) -> Pbkdf2Prf {
        self.prf
    }

    fn derive_key(&self, password: &str, salt: &[u8]) -> Result<Zeroizing<[u8; KEY_SIZE]>> {
        derive_pbkdf2_key_with(self.prf, password, salt, self.rounds).map(Zeroizing::new)
    }

    /// Encrypt `data` with a random salt and IV
    pub fn encrypt(&self, data: &[u8], password: &str) -> Result<String> {
        self.encrypt_with(data, password, &random_bytes(), &random_bytes())
    }

    /// Encrypt with a caller-chosen salt and IV
    pub fn encrypt_with(
        &self,
        data: &[u8],
        password: &str,
        salt: &[u8; PBKDF2_SALT_SIZE],
        iv: &[u8; IV_SIZE],
    ) -> Result<String> {
        if data.is_empty() {
            return Err(Error::MissingArgument("data"));
        }
        let key = self.derive_key(password, salt)?;
        let ciphertext = cbc_encrypt(&key, iv, data)?;

        let mut blob = String::with_capacity(SALT_HEX_LEN + IV_HEX_LEN + ciphertext.len() * 2);
        blob.push_str(&hex::encode(salt));
        blob.push_str(&hex::encode(iv));
        blob.push_str(&STANDARD.encode(ciphertext));
        Ok(blob)
    }

    /// Decrypt a blob produced by [`encrypt`](Self::encrypt)
    ///
    /// A wrong password yields garbage, not an error.
    pub fn decrypt(&self, blob: &str, password: &str) -> Result<Vec<u8>> {
        if blob.is_empty() {
            return Err(Error::MissingArgument("blob"));
        }
        if password.is_empty() {
            return Err(Error::MissingArgument("password"));
        }
        if !blob.is_ascii() || blob.len() <= SALT_HEX_LEN + IV_HEX_LEN {
            return Err(Error::InvalidPayload(format!(
                "password blob must be ASCII and longer than {} characters",
                SALT_HEX_LEN + IV_HEX_LEN
            )));
        }

        let (salt_hex, rest) = blob.split_at(SALT_HEX_LEN);
        let (iv_hex, ciphertext_b64) = rest.split_at(IV_HEX_LEN);

        let salt: [u8; PBKDF2_SALT_SIZE] = decode_hex_field(salt_hex, "salt")
            .map_err(|e| Error::InvalidPayload(format!("salt: {}", e)))?;
        let iv: [u8; IV_SIZE] = decode_hex_field(iv_hex, "iv")
            .map_err(|e| Error::InvalidPayload(format!("iv: {}", e)))?;
        let ciphertext = STANDARD
            .decode(ciphertext_b64)
            .map_err(|e| Error::InvalidPayload(format!("ciphertext: {}", e)))?;

        let key = self.derive_key(password, &salt)?;
        cbc_decrypt(&key, &iv, &ciphertext)
    }

    /// Encrypt a UTF-8 string
    pub fn encrypt_str(&self, data: &str, password: &str) -> Result<String> {
        self.encrypt(data.as_bytes(), password)
    }

    /// Decrypt into a UTF-8 string
    ///
    /// A wrong password usually fails here with
    /// [`Error::DecryptionFailed`] because the garbage is not UTF-8.
    pub fn decrypt_to_string(&self, blob: &str, password: &str) -> Result<String> {
        let bytes = self.decrypt(blob, password)?;
        String::from_utf8(bytes)
            .map_err(|_| Error::DecryptionFailed("plaintext is not valid UTF-8".into()))
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const PRIVATE_HEX: &str = "041e2ce90c31cd65620ed16ab7a5a485e5b335d7e61c75cd9b3a2fed3e091728";

    fn counting_iv() -> [u8; IV_SIZE] {
        core::array::from_fn(|i| i as u8)
    }

    fn fast_cipher() -> PasswordCipher {
        PasswordCipher::new(&CryptoConfig {
            pbkdf2_rounds: 8,
            ..CryptoConfig::default()
        })
    }

    #[test]
    fn test_raw_key_roundtrip() {
        let key = [9u8; 32];
        let secret = encrypt_with_key(b"Hello, World!", &key).unwrap();
        assert_eq!(secret.ciphertext.len(), 16);
        assert_eq!(decrypt_with_key(&secret).unwrap(), b"Hello, World!");
    }

    #[test]
    fn test_block_aligned_input_gets_full_pad_block() {
        let secret = encrypt_with_key(&[1u8; 32], &[9u8; 32]).unwrap();
        assert_eq!(secret.ciphertext.len(), 48);
        assert_eq!(decrypt_with_key(&secret).unwrap(), vec![1u8; 32]);
    }

    #[test]
    fn test_random_iv_per_call() {
        let key = [9u8; 32];
        let a = encrypt_with_key(b"same", &key).unwrap();
        let b = encrypt_with_key(b"same", &key).unwrap();
        assert_ne!(a.iv, b.iv);
        assert_ne!(a.ciphertext, b.ciphertext);
    }

    #[test]
    fn test_empty_data_rejected() {
        assert!(matches!(
            encrypt_with_key(b"", &[0u8; 32]),
            Err(Error::MissingArgument("data"))
        ));
    }

    #[test]
    fn test_misaligned_ciphertext_rejected() {
        let mut secret = encrypt_with_key(b"data", &[1u8; 32]).unwrap();
        secret.ciphertext.pop();
        assert!(matches!(
            decrypt_with_key(&secret),
            Err(Error::DecryptionFailed(_))
        ));
    }

    #[test]
    fn test_wrong_key_gives_garbage_not_error() {
        let mut secret = encrypt_with_key(b"attack at dawn", &[1u8; 32]).unwrap();
        secret.key = [2u8; 32];
        let out = decrypt_with_key(&secret).unwrap();
        assert_ne!(out, b"attack at dawn");
    }

    #[test]
    fn test_wrap_vector() {
        let wrap_key = derive_pass_sha("password", WRAP_KEY_ROUNDS).unwrap();
        let private_key = PrivateKey::from_hex(PRIVATE_HEX).unwrap();
        let wrapped = cbc_encrypt(&wrap_key, &counting_iv(), private_key.as_bytes()).unwrap();
        assert_eq!(
            hex::encode(wrapped),
            "ac9b62628f5d901d71035578d5114667cfd631e6c8a45d9ea2f476667f8fda36\
             69be2fcc78e53748dd3c3a63fd40f955"
        );
    }

    #[test]
    fn test_private_key_wrap_roundtrip() {
        let private_key = PrivateKey::from_hex(PRIVATE_HEX).unwrap();
        let record = encode_private_key(&private_key, "password").unwrap();
        assert_eq!(record.encrypted.len(), 96);
        assert_eq!(record.iv.len(), 32);

        let restored = decode_private_key(&record, "password").unwrap();
        assert_eq!(restored.as_bytes(), private_key.as_bytes());
    }

    #[test]
    fn test_private_key_record_json() {
        let record = EncryptedPrivateKey {
            encrypted: "ab".into(),
            iv: "cd".into(),
        };
        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(json, r#"{"encrypted":"ab","iv":"cd"}"#);
    }

    #[test]
    fn test_unwrap_bad_iv() {
        let record = EncryptedPrivateKey {
            encrypted: "00".repeat(48),
            iv: "0011".into(),
        };
        assert!(matches!(
            unwrap_private_key(&record, &[0u8; 32]),
            Err(Error::InvalidLength { expected: 16, actual: 2 })
        ));
    }

    #[test]
    fn test_password_blob_vector() {
        let blob = PasswordCipher::default()
            .encrypt_with(b"wallet secret", "password", &[0u8; 16], &counting_iv())
            .unwrap();
        assert_eq!(
            blob,
            "00000000000000000000000000000000\
             000102030405060708090a0b0c0d0e0f\
             o2ebFMm9ArhVngFBv0YmiA=="
        );
        assert_eq!(
            PasswordCipher::default().decrypt(&blob, "password").unwrap(),
            b"wallet secret"
        );
    }

    #[test]
    fn test_password_blob_sha256_prf() {
        let cipher = PasswordCipher::new(&CryptoConfig {
            pbkdf2_prf: Pbkdf2Prf::Sha256,
            ..CryptoConfig::default()
        });
        let blob = cipher
            .encrypt_with(b"wallet secret", "password", &[0u8; 16], &counting_iv())
            .unwrap();
        assert!(blob.ends_with("muEoxq1jRyDXp2B+bPntYQ=="));

        // a SHA1 cipher derives a different key from the same blob
        let sha1 = PasswordCipher::default().decrypt(&blob, "password").unwrap();
        assert_ne!(sha1, b"wallet secret");
    }

    #[test]
    fn test_password_roundtrip() {
        let cipher = fast_cipher();
        let blob = cipher.encrypt_str("seed words", "hunter2").unwrap();
        assert_eq!(cipher.decrypt_to_string(&blob, "hunter2").unwrap(), "seed words");
    }

    #[test]
    fn test_wrong_password_does_not_roundtrip() {
        let cipher = fast_cipher();
        let blob = cipher.encrypt(b"seed words", "hunter2").unwrap();
        let out = cipher.decrypt(&blob, "hunter3").unwrap();
        assert_ne!(out, b"seed words");
    }

    #[test]
    fn test_blob_too_short() {
        let cipher = fast_cipher();
        assert!(matches!(
            cipher.decrypt(&"0".repeat(64), "pw"),
            Err(Error::InvalidPayload(_))
        ));
        assert!(matches!(
            cipher.decrypt("", "pw"),
            Err(Error::MissingArgument("blob"))
        ));
    }

    #[test]
    fn test_blob_bad_segments() {
        let cipher = fast_cipher();
        let bad_salt = format!("{}{}AAAA", "zz".repeat(16), "00".repeat(16));
        assert!(matches!(
            cipher.decrypt(&bad_salt, "pw"),
            Err(Error::InvalidPayload(_))
        ));

        let bad_b64 = format!("{}{}!!!!", "00".repeat(16), "00".repeat(16));
        assert!(matches!(
            cipher.decrypt(&bad_b64, "pw"),
            Err(Error::InvalidPayload(_))
        ));
    }
}
