//! # Catapult Crypto
//!
//! The cryptographic signing core of a catapult wallet: key pairs, signatures,
//! salted shared keys, and password protection for stored secrets.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       CATAPULT CRYPTO MODULES                           │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │                                                                         │
//! │  ┌─────────────┐  ┌─────────────┐  ┌─────────────┐  ┌──────────────┐   │
//! │  │   Hasher    │  │    Curve    │  │  KeyPair    │  │   Message    │   │
//! │  │             │  │             │  │             │  │              │   │
//! │  │ - SHA3-256  │─►│ - ed25519   │─►│ - extract   │─►│ - encode     │   │
//! │  │ - SHA3-512  │  │ - mod L     │  │ - sign      │  │ - decode     │   │
//! │  │             │  │ - ladder    │  │ - verify    │  │              │   │
//! │  └─────────────┘  └─────────────┘  │ - shared    │  └──────▲───────┘   │
//! │                                     └─────────────┘         │           │
//! │  ┌─────────────┐  ┌─────────────┐                           │           │
//! │  │    KDF      │─►│ Encryption  │───────────────────────────┘           │
//! │  │             │  │             │                                       │
//! │  │ - pass-sha  │  │ - AES-CBC   │      offload: async wrappers for      │
//! │  │ - PBKDF2    │  │ - blobs     │      the slow derivations             │
//! │  │ - reveal    │  │ - wrapping  │                                       │
//! │  └─────────────┘  └─────────────┘                                       │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Hierarchy
//!
//! - [`error`] - Error types for the entire library
//! - [`crypto`] - Hashing, curve arithmetic, keys, signatures, ciphers
//! - [`config`] - Work factors for password-derived keys
//! - [`offload`] - Async wrappers running slow derivations off the executor
//!
//! ## Example
//!
//! ```ignore
//! use catapult_crypto::crypto::{sign, verify, KeyPair};
//!
//! let keypair = KeyPair::from_private_key_hex(
//!     "041e2ce90c31cd65620ed16ab7a5a485e5b335d7e61c75cd9b3a2fed3e091728",
//! )?;
//! let signature = sign(&keypair, b"transfer")?;
//! assert!(verify(keypair.public_key(), b"transfer", &signature));
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![cfg_attr(docsrs, feature(doc_cfg))]

// ============================================================================
// MODULE DECLARATIONS
// ============================================================================

pub mod config;
pub mod crypto;
pub mod error;
pub mod offload;

// ============================================================================
// RE-EXPORTS
// ============================================================================

pub use config::CryptoConfig;
pub use crypto::{KeyPair, PrivateKey, PublicKey, SharedKey, Signature};
pub use error::{Error, Result};
