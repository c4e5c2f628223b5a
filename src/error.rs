//! # Error Handling
//!
//! Error types for the signing core.
//!
//! ## Error Hierarchy
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                           ERROR HIERARCHY                               │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │                                                                         │
//! │  Error (top-level)                                                     │
//! │  │                                                                      │
//! │  ├── Argument Errors (100-199)                                         │
//! │  │   ├── MissingArgument       - Required input absent or empty        │
//! │  │   └── InvalidConfig         - Configuration value out of range      │
//! │  │                                                                      │
//! │  ├── Key Errors (200-299)                                              │
//! │  │   ├── InvalidKeySize        - Key is not 32 bytes                   │
//! │  │   ├── InvalidSaltSize       - Shared-key salt is not 32 bytes       │
//! │  │   ├── InvalidKey            - Public key is not a curve point       │
//! │  │   ├── InvalidHex            - Malformed hex string                  │
//! │  │   └── InvalidLength         - Fixed-size buffer mismatch            │
//! │  │                                                                      │
//! │  ├── Signature / Hash Errors (300-399)                                 │
//! │  │   ├── NonCanonicalSignature - Signing produced an unreduced S       │
//! │  │   └── UnsupportedDataType   - Hasher fed undecodable input          │
//! │  │                                                                      │
//! │  ├── Cipher Errors (400-499)                                           │
//! │  │   ├── EncryptionFailed      - Cipher setup failed                   │
//! │  │   ├── DecryptionFailed      - Ciphertext not block aligned          │
//! │  │   ├── InvalidPayload        - Blob too short or undecodable         │
//! │  │   └── KeyDerivationFailed   - PBKDF2 failed                         │
//! │  │                                                                      │
//! │  └── Internal (900-999)                                                │
//! │      └── Internal              - Background task failed                │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Signature verification never produces an error: `verify` returns `false`
//! because it runs on untrusted input.

use thiserror::Error;

/// Result type alias for signing core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the signing core
#[derive(Error, Debug)]
pub enum Error {
    // ========================================================================
    // Argument Errors (100-199)
    // ========================================================================

    /// A required argument was absent or empty
    #[error("Missing argument: {0}")]
    MissingArgument(&'static str),

    /// Configuration rejected by validation
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // ========================================================================
    // Key Errors (200-299)
    // ========================================================================

    /// Decoded key is not exactly 32 bytes
    #[error("Invalid key size: expected 32 bytes, got {0}")]
    InvalidKeySize(usize),

    /// Salt for shared-key derivation is not exactly 32 bytes
    #[error("Invalid salt size: expected 32 bytes, got {0}")]
    InvalidSaltSize(usize),

    /// Public key does not decode to a curve point
    #[error("Invalid key: {0}")]
    InvalidKey(String),

    /// Malformed hex input
    #[error("Invalid hex: {0}")]
    InvalidHex(String),

    /// A fixed-size buffer had the wrong length
    #[error("Invalid length: expected {expected} bytes, got {actual}")]
    InvalidLength {
        /// Required length
        expected: usize,
        /// Supplied length
        actual: usize,
    },

    // ========================================================================
    // Signature / Hash Errors (300-399)
    // ========================================================================

    /// Signing produced a scalar that is not reduced modulo the group order.
    ///
    /// Only reachable through an arithmetic bug; treat as fatal.
    #[error("Generated signature is not canonical")]
    NonCanonicalSignature,

    /// Hasher input could not be interpreted as bytes
    #[error("Unsupported data type: {0}")]
    UnsupportedDataType(String),

    // ========================================================================
    // Cipher Errors (400-499)
    // ========================================================================

    /// Encryption failed
    #[error("Encryption failed: {0}")]
    EncryptionFailed(String),

    /// Decryption failed
    #[error("Decryption failed: {0}")]
    DecryptionFailed(String),

    /// Encrypted blob is malformed
    #[error("Invalid payload: {0}")]
    InvalidPayload(String),

    /// Key derivation failed
    #[error("Failed to derive key: {0}")]
    KeyDerivationFailed(String),

    // ========================================================================
    // Internal Errors (900-999)
    // ========================================================================

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Get the numeric error code
    ///
    /// Codes are organized by category:
    /// - 100-199: Arguments
    /// - 200-299: Keys
    /// - 300-399: Signatures and hashing
    /// - 400-499: Ciphers
    /// - 900-999: Internal
    pub fn code(&self) -> i32 {
        match self {
            Error::MissingArgument(_) => 100,
            Error::InvalidConfig(_) => 101,

            Error::InvalidKeySize(_) => 200,
            Error::InvalidSaltSize(_) => 201,
            Error::InvalidKey(_) => 202,
            Error::InvalidHex(_) => 203,
            Error::InvalidLength { .. } => 204,

            Error::NonCanonicalSignature => 300,
            Error::UnsupportedDataType(_) => 301,

            Error::EncryptionFailed(_) => 400,
            Error::DecryptionFailed(_) => 401,
            Error::InvalidPayload(_) => 402,
            Error::KeyDerivationFailed(_) => 403,

            Error::Internal(_) => 900,
        }
    }

    /// Check if this error indicates a programming error rather than bad input
    pub fn is_fatal(&self) -> bool {
        matches!(self, Error::NonCanonicalSignature | Error::Internal(_))
    }
}

// ============================================================================
// ERROR CONVERSIONS
// ============================================================================

impl From<hex::FromHexError> for Error {
    fn from(err: hex::FromHexError) -> Self {
        Error::InvalidHex(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::InvalidPayload(err.to_string())
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(Error::MissingArgument("password").code(), 100);
        assert_eq!(Error::InvalidConfig("rounds".into()).code(), 101);
        assert_eq!(Error::InvalidKeySize(31).code(), 200);
        assert_eq!(Error::InvalidSaltSize(16).code(), 201);
        assert_eq!(Error::NonCanonicalSignature.code(), 300);
        assert_eq!(Error::DecryptionFailed("test".into()).code(), 401);
        assert_eq!(Error::Internal("test".into()).code(), 900);
    }

    #[test]
    fn test_fatal_errors() {
        assert!(Error::NonCanonicalSignature.is_fatal());
        assert!(!Error::InvalidKeySize(0).is_fatal());
        assert!(!Error::MissingArgument("salt").is_fatal());
    }

    #[test]
    fn test_hex_error_conversion() {
        let err: Error = hex::decode("zz").unwrap_err().into();
        assert_eq!(err.code(), 203);
    }

    #[test]
    fn test_messages_carry_sizes() {
        let msg = Error::InvalidKeySize(31).to_string();
        assert!(msg.contains("31"));

        let msg = Error::InvalidLength { expected: 64, actual: 10 }.to_string();
        assert!(msg.contains("64") && msg.contains("10"));
    }
}
