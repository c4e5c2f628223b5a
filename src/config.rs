//! # Configuration
//!
//! Tunable work factors for the password-based derivations.
//!
//! The defaults are the protocol values. Changing the brain-wallet or
//! wrap-key rounds makes existing wallets unreadable; only change them for
//! new, self-contained deployments.

use serde::{Deserialize, Serialize};

use crate::crypto::{Pbkdf2Prf, BRAIN_WALLET_ROUNDS, PBKDF2_ROUNDS, WRAP_KEY_ROUNDS};
use crate::error::{Error, Result};

/// Work factors for password-derived keys
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CryptoConfig {
    /// PBKDF2 iterations for [`PasswordCipher`](crate::crypto::PasswordCipher)
    pub pbkdf2_rounds: u32,
    /// HMAC hash behind PBKDF2; SHA1 reads existing blobs
    pub pbkdf2_prf: Pbkdf2Prf,
    /// Iterated SHA3-256 rounds turning a passphrase into a brain-wallet key
    pub brain_wallet_rounds: u32,
    /// Iterated SHA3-256 rounds turning a password into an AES wrap key
    pub wrap_key_rounds: u32,
}

impl Default for CryptoConfig {
    fn default() -> Self {
        Self {
            pbkdf2_rounds: PBKDF2_ROUNDS,
            pbkdf2_prf: Pbkdf2Prf::Sha1,
            brain_wallet_rounds: BRAIN_WALLET_ROUNDS,
            wrap_key_rounds: WRAP_KEY_ROUNDS,
        }
    }
}

impl CryptoConfig {
    /// Parse from JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject work factors that would disable a derivation
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("pbkdf2_rounds", self.pbkdf2_rounds),
            ("brain_wallet_rounds", self.brain_wallet_rounds),
            ("wrap_key_rounds", self.wrap_key_rounds),
        ] {
            if value == 0 {
                return Err(Error::InvalidConfig(format!("{} must be non-zero", name)));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_protocol_values() {
        let config = CryptoConfig::default();
        assert_eq!(config.pbkdf2_rounds, 1024);
        assert_eq!(config.pbkdf2_prf, Pbkdf2Prf::Sha1);
        assert_eq!(config.brain_wallet_rounds, 6000);
        assert_eq!(config.wrap_key_rounds, 20);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_json_fills_defaults() {
        let config = CryptoConfig::from_json(r#"{"pbkdf2_rounds": 2048}"#).unwrap();
        assert_eq!(config.pbkdf2_rounds, 2048);
        assert_eq!(config.wrap_key_rounds, 20);
        assert_eq!(config.pbkdf2_prf, Pbkdf2Prf::Sha1);
    }

    #[test]
    fn test_from_json_prf() {
        let config = CryptoConfig::from_json(r#"{"pbkdf2_prf": "sha256"}"#).unwrap();
        assert_eq!(config.pbkdf2_prf, Pbkdf2Prf::Sha256);
        assert!(CryptoConfig::from_json(r#"{"pbkdf2_prf": "md5"}"#).is_err());
    }

    #[test]
    fn test_zero_rounds_rejected() {
        let err = CryptoConfig::from_json(r#"{"wrap_key_rounds": 0}"#).unwrap_err();
        assert!(matches!(err, Error::InvalidConfig(ref m) if m.contains("wrap_key_rounds")));
    }

    #[test]
    fn test_malformed_json() {
        let err = CryptoConfig::from_json("{not json").unwrap_err();
        assert_eq!(err.code(), 402);
    }
}
