//! # Digital Signature Demo
//!
//! Signs and verifies a message with the SHA3-512 flavoured Ed25519 scheme.
//!
//! ## Run
//!
//! ```bash
//! cargo run --example signing_demo
//! ```

use catapult_crypto::crypto::{sign, verify, KeyPair, Signature};

fn main() {
    println!("=== Catapult Crypto: Digital Signature Demo ===\n");

    // Step 1: Load a keypair
    println!("Step 1: Loading keypair from a hex private key...");

    let keypair = KeyPair::from_private_key_hex(
        "041e2ce90c31cd65620ed16ab7a5a485e5b335d7e61c75cd9b3a2fed3e091728",
    )
    .expect("Failed to create keypair");

    println!("  Public key (hex): {}", keypair.public_key());
    println!();

    // Step 2: Explain the scheme
    println!("Step 2: Understanding the signature scheme");
    println!();
    println!("  ┌─────────────────────────────────────────────────────────────┐");
    println!("  │                   SIGNATURE FLOW                            │");
    println!("  ├─────────────────────────────────────────────────────────────┤");
    println!("  │                                                             │");
    println!("  │    d = clamp(SHA3-512(private key))                        │");
    println!("  │    r = SHA3-512(d_hi ‖ m) mod L         R = r·B            │");
    println!("  │    h = SHA3-512(R ‖ A ‖ m) mod L                           │");
    println!("  │    S = r + h·d mod L                                       │");
    println!("  │                                                             │");
    println!("  │    Signature = R ‖ S  (64 bytes, S must be < L)            │");
    println!("  │                                                             │");
    println!("  └─────────────────────────────────────────────────────────────┘");
    println!();

    // Step 3: Sign a message
    println!("Step 3: Signing a message...");

    let message = b"Transfer 100 units to TBTN3Y...";
    println!("  Message: \"{}\"", String::from_utf8_lossy(message));

    let signature = sign(&keypair, message).expect("Failed to sign");

    println!("  Signature (hex): {}", signature);
    println!("  Signature length: {} bytes", signature.as_bytes().len());
    println!();

    // Step 4: Verify the signature
    println!("Step 4: Verifying the signature...");

    if verify(keypair.public_key(), message, &signature) {
        println!("  [OK] Signature is valid!");
    } else {
        println!("  [FAILED] Signature verification failed!");
    }
    println!();

    // Step 5: Demonstrate forgery detection
    println!("Step 5: Tampering with the message...");

    let tampered = b"Transfer 900 units to TBTN3Y...";
    if verify(keypair.public_key(), tampered, &signature) {
        println!("  [FAILED] Tampered message was accepted!");
    } else {
        println!("  [OK] Tampered message rejected");
    }

    let mut bytes = *signature.as_bytes();
    bytes[63] |= 0xf0;
    let unreduced = Signature::from_bytes(bytes);
    if verify(keypair.public_key(), message, &unreduced) {
        println!("  [FAILED] Non-canonical signature was accepted!");
    } else {
        println!("  [OK] Non-canonical signature rejected");
    }
    println!();

    println!("=== Demo Complete ===");
}
