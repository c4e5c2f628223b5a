//! # Message Codec
//!
//! Encrypted peer-to-peer messages between two key pairs.
//!
//! ```text
//! encode(sender, recipient, "hi")
//!   salt = random 32 bytes, iv = random 16 bytes
//!   key  = derive_shared_key(sender, recipient, salt)
//!   →    hex(salt) ‖ hex(iv) ‖ hex(AES-256-CBC(key, iv, utf8("hi")))
//!        ├── 64 ──┤├── 32 ──┤├──────────── rest ────────────┤
//! ```
//!
//! The recipient decodes with their own key pair and the sender's public
//! key, landing on the same shared key.

use zeroize::Zeroizing;

use super::encryption::{cbc_decrypt, cbc_encrypt};
use super::keys::{KeyPair, PublicKey};
use super::signing::derive_shared_key;
use super::{random_bytes, IV_SIZE, SALT_SIZE};
use crate::error::{Error, Result};

const HEADER_SIZE: usize = SALT_SIZE + IV_SIZE;

/// Encrypt `plaintext` for `recipient` with a random salt and IV
pub fn encode(sender: &KeyPair, recipient: &PublicKey, plaintext: &str) -> Result<String> {
    encode_with(
        sender,
        recipient,
        plaintext,
        &random_bytes(),
        &random_bytes(),
    )
}

/// Encrypt with a caller-chosen salt and IV
pub fn encode_with(
    sender: &KeyPair,
    recipient: &PublicKey,
    plaintext: &str,
    salt: &[u8; SALT_SIZE],
    iv: &[u8; IV_SIZE],
) -> Result<String> {
    if plaintext.is_empty() {
        return Err(Error::MissingArgument("message"));
    }

    let shared = derive_shared_key(sender, recipient, salt)?;
    let ciphertext = cbc_encrypt(shared.as_bytes(), iv, plaintext.as_bytes())?;

    let mut payload = Vec::with_capacity(HEADER_SIZE + ciphertext.len());
    payload.extend_from_slice(salt);
    payload.extend_from_slice(iv);
    payload.extend_from_slice(&ciphertext);

    tracing::debug!(recipient = %recipient, len = ciphertext.len(), "Encoded message");
    Ok(hex::encode(payload))
}

/// Decrypt a payload from `sender`, returning the plaintext as hex
pub fn decode(recipient: &KeyPair, sender: &PublicKey, payload: &str) -> Result<String> {
    let plaintext = decrypt_payload(recipient, sender, payload)?;
    Ok(hex::encode(&plaintext[..]))
}

/// Decrypt a payload from `sender` into a UTF-8 string
///
/// Fails with [`Error::DecryptionFailed`] when the plaintext is not UTF-8,
/// which is what a wrong key pair usually produces.
pub fn decode_to_string(recipient: &KeyPair, sender: &PublicKey, payload: &str) -> Result<String> {
    let plaintext = decrypt_payload(recipient, sender, payload)?;
    String::from_utf8(plaintext.to_vec())
        .map_err(|_| Error::DecryptionFailed("message is not valid UTF-8".into()))
}

fn decrypt_payload(
    recipient: &KeyPair,
    sender: &PublicKey,
    payload: &str,
) -> Result<Zeroizing<Vec<u8>>> {
    if payload.is_empty() {
        return Err(Error::MissingArgument("payload"));
    }

    let bytes = hex::decode(payload)
        .map_err(|e| Error::InvalidPayload(format!("payload is not hex: {}", e)))?;
    if bytes.len() < HEADER_SIZE {
        return Err(Error::InvalidPayload(format!(
            "payload is {} bytes, need at least {}",
            bytes.len(),
            HEADER_SIZE
        )));
    }

    let (salt, rest) = bytes.split_at(SALT_SIZE);
    let (iv, ciphertext) = rest.split_at(IV_SIZE);
    let iv: &[u8; IV_SIZE] = iv
        .try_into()
        .map_err(|_| Error::InvalidPayload("truncated IV".into()))?;

    let shared = derive_shared_key(recipient, sender, salt)?;
    let plaintext = cbc_decrypt(shared.as_bytes(), iv, ciphertext)?;

    tracing::debug!(sender = %sender, len = ciphertext.len(), "Decoded message");
    Ok(Zeroizing::new(plaintext))
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALICE_HEX: &str = "041e2ce90c31cd65620ed16ab7a5a485e5b335d7e61c75cd9b3a2fed3e091728";
    const BOB_HEX: &str = "2a91e1d5c110a8d0105aad4683f962c2a56663a3cad46666b16d243174673d90";

    fn alice() -> KeyPair {
        KeyPair::from_private_key_hex(ALICE_HEX).unwrap()
    }

    fn bob() -> KeyPair {
        KeyPair::from_private_key_hex(BOB_HEX).unwrap()
    }

    #[test]
    fn test_known_payload() {
        let salt: [u8; 32] = core::array::from_fn(|i| i as u8);
        let payload =
            encode_with(&alice(), bob().public_key(), "hello catapult", &salt, &[0u8; 16])
                .unwrap();
        assert_eq!(
            payload,
            "000102030405060708090a0b0c0d0e0f101112131415161718191a1b1c1d1e1f\
             00000000000000000000000000000000\
             d030653b246ef4efc13fd3f8a5d66ffc"
        );
    }

    #[test]
    fn test_roundtrip_returns_hex() {
        let payload = encode(&alice(), bob().public_key(), "hi bob").unwrap();
        let decoded = decode(&bob(), alice().public_key(), &payload).unwrap();
        assert_eq!(decoded, hex::encode("hi bob"));
    }

    #[test]
    fn test_roundtrip_to_string() {
        let payload = encode(&bob(), alice().public_key(), "gm").unwrap();
        assert_eq!(
            decode_to_string(&alice(), bob().public_key(), &payload).unwrap(),
            "gm"
        );
    }

    #[test]
    fn test_payload_layout() {
        let payload = encode(&alice(), bob().public_key(), "0123456789abcdef").unwrap();
        // 32 salt + 16 iv + 32 ciphertext (a full pad block)
        assert_eq!(payload.len(), (32 + 16 + 32) * 2);
    }

    #[test]
    fn test_missing_arguments() {
        assert!(matches!(
            encode(&alice(), bob().public_key(), ""),
            Err(Error::MissingArgument("message"))
        ));
        assert!(matches!(
            decode(&bob(), alice().public_key(), ""),
            Err(Error::MissingArgument("payload"))
        ));
    }

    #[test]
    fn test_short_or_garbled_payload() {
        let short = "00".repeat(47);
        assert!(matches!(
            decode(&bob(), alice().public_key(), &short),
            Err(Error::InvalidPayload(_))
        ));
        assert!(matches!(
            decode(&bob(), alice().public_key(), "not hex at all"),
            Err(Error::InvalidPayload(_))
        ));
    }
}
