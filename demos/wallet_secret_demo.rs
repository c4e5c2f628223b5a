//! # Wallet Secret Demo
//!
//! Protects a private key the three ways a wallet stores secrets: a brain
//! wallet passphrase, a password-wrapped account record, and a password blob.
//!
//! ## Run
//!
//! ```bash
//! cargo run --example wallet_secret_demo
//! ```

use catapult_crypto::crypto::{
    encode_private_key, reveal_private_key, KeyPair, PasswordCipher, RevealedKey, StoredAccount,
};

fn main() {
    println!("=== Catapult Crypto: Wallet Secret Demo ===\n");

    // Step 1: Brain wallet
    println!("Step 1: Brain wallet (6000 rounds of SHA3-256)...");

    let revealed = reveal_private_key("correct horse battery staple", &StoredAccount::default(), "pass:6k")
        .expect("reveal failed");
    if let Some(RevealedKey::Local(key)) = revealed {
        let keypair = KeyPair::from_private_key(key).expect("bad key");
        println!("  Public key: {}", keypair.public_key());
    }
    println!();

    // Step 2: Wrapped account key
    println!("Step 2: Wrapping a random key under a wallet password...");

    let keypair = KeyPair::generate().expect("Failed to generate keypair");
    let record = encode_private_key(keypair.private_key(), "wallet password").expect("wrap failed");
    let account_json = serde_json::to_string_pretty(&record).expect("serialize failed");

    println!("  Stored account record:\n{}", account_json);

    let account: StoredAccount = serde_json::from_str(&account_json).expect("parse failed");
    match reveal_private_key("wallet password", &account, "pass:enc").expect("reveal failed") {
        Some(RevealedKey::Local(key)) => {
            let restored = KeyPair::from_private_key(key).expect("bad key");
            println!("  Restored public key matches: {}", restored.public_key() == keypair.public_key());
        }
        _ => println!("  [FAILED] No key revealed"),
    }

    let hardware = reveal_private_key("", &account, "trezor").expect("reveal failed");
    println!("  Trezor account: {:?}", hardware);
    println!();

    // Step 3: Password blob
    println!("Step 3: PBKDF2 password blob...");

    let cipher = PasswordCipher::default();
    let blob = cipher
        .encrypt_str("abandon ability able about above", "blob password")
        .expect("encrypt failed");
    println!("  Blob: {}", blob);

    let plain = cipher
        .decrypt_to_string(&blob, "blob password")
        .expect("decrypt failed");
    println!("  Decrypted: \"{}\"", plain);
    println!();

    println!("=== Demo Complete ===");
}
