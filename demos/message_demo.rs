//! # Encrypted Message Demo
//!
//! Alice encrypts a message for Bob with a salted shared key; Bob decodes it.
//!
//! ## Run
//!
//! ```bash
//! cargo run --example message_demo
//! ```

use catapult_crypto::crypto::{derive_shared_key, message, KeyPair};

fn main() {
    println!("=== Catapult Crypto: Encrypted Message Demo ===\n");

    // Step 1: Two parties
    println!("Step 1: Generating keypairs for Alice and Bob...");

    let alice = KeyPair::generate().expect("Failed to generate Alice");
    let bob = KeyPair::generate().expect("Failed to generate Bob");

    println!("  Alice: {}", alice.public_key());
    println!("  Bob:   {}", bob.public_key());
    println!();

    // Step 2: Shared key agreement
    println!("Step 2: Both sides derive the same salted key...");

    let salt = [0x11u8; 32];
    let alice_view = derive_shared_key(&alice, bob.public_key(), &salt).expect("derive failed");
    let bob_view = derive_shared_key(&bob, alice.public_key(), &salt).expect("derive failed");

    println!("  Alice's key: {}", alice_view.to_hex());
    println!("  Bob's key:   {}", bob_view.to_hex());
    println!("  Match: {}", alice_view == bob_view);
    println!();

    // Step 3: Encode
    println!("Step 3: Alice encodes a message...");

    let payload =
        message::encode(&alice, bob.public_key(), "Lunch at noon?").expect("encode failed");

    println!("  Payload: {}", payload);
    println!("    salt:       {}", &payload[..64]);
    println!("    iv:         {}", &payload[64..96]);
    println!("    ciphertext: {}", &payload[96..]);
    println!();

    // Step 4: Decode
    println!("Step 4: Bob decodes it...");

    let text = message::decode_to_string(&bob, alice.public_key(), &payload).expect("decode failed");
    println!("  Plaintext: \"{}\"", text);
    println!();

    println!("=== Demo Complete ===");
}
