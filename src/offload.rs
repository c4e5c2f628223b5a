//! # Blocking Offload
//!
//! Async wrappers that move the deliberately slow password derivations onto
//! tokio's blocking pool, so an async caller does not stall its executor.
//!
//! ```text
//! async caller ──► spawn_blocking(derive) ──► await ──► Result<T>
//!                        │
//!                        └── JoinError ──► Error::Internal
//! ```
//!
//! Every function must be awaited inside a tokio runtime.

use zeroize::Zeroizing;

use crate::config::CryptoConfig;
use crate::crypto::{self, PasswordCipher, PrivateKey, RevealedKey, StoredAccount};
use crate::error::{Error, Result};

async fn run_blocking<F, T>(task: &'static str, f: F) -> Result<T>
where
    F: FnOnce() -> Result<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f).await.map_err(|e| {
        tracing::error!(task, error = %e, "Blocking task failed");
        Error::Internal(format!("{} task failed: {}", task, e))
    })?
}

/// [`crypto::derive_pass_sha`] on the blocking pool
pub async fn derive_pass_sha(password: String, count: u32) -> Result<[u8; 32]> {
    let password = Zeroizing::new(password);
    run_blocking("derive_pass_sha", move || {
        crypto::derive_pass_sha(&password, count)
    })
    .await
}

/// [`PasswordCipher::encrypt`] on the blocking pool
pub async fn encrypt_with_password(
    cipher: PasswordCipher,
    data: Vec<u8>,
    password: String,
) -> Result<String> {
    let data = Zeroizing::new(data);
    let password = Zeroizing::new(password);
    run_blocking("encrypt_with_password", move || {
        cipher.encrypt(&data, &password)
    })
    .await
}

/// [`PasswordCipher::decrypt`] on the blocking pool
pub async fn decrypt_with_password(
    cipher: PasswordCipher,
    blob: String,
    password: String,
) -> Result<Vec<u8>> {
    let password = Zeroizing::new(password);
    run_blocking("decrypt_with_password", move || {
        cipher.decrypt(&blob, &password)
    })
    .await
}

/// [`crypto::encode_private_key`] on the blocking pool
pub async fn encode_private_key(
    private_key: PrivateKey,
    password: String,
) -> Result<crypto::EncryptedPrivateKey> {
    let password = Zeroizing::new(password);
    run_blocking("encode_private_key", move || {
        crypto::encode_private_key(&private_key, &password)
    })
    .await
}

/// [`crypto::reveal_private_key_with`] on the blocking pool
pub async fn reveal_private_key(
    config: CryptoConfig,
    password: String,
    account: StoredAccount,
    algorithm: String,
) -> Result<Option<RevealedKey>> {
    let password = Zeroizing::new(password);
    run_blocking("reveal_private_key", move || {
        crypto::reveal_private_key_with(&config, &password, &account, &algorithm)
    })
    .await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_derive_matches_sync() {
        let async_key = derive_pass_sha("password".into(), 20).await.unwrap();
        assert_eq!(async_key, crypto::derive_pass_sha("password", 20).unwrap());
    }

    #[tokio::test]
    async fn test_errors_pass_through() {
        let err = derive_pass_sha(String::new(), 20).await.unwrap_err();
        assert!(matches!(err, Error::MissingArgument("password")));
    }

    #[tokio::test]
    async fn test_panicking_task_is_internal() {
        let err = run_blocking::<_, ()>("boom", || panic!("boom"))
            .await
            .unwrap_err();
        assert_eq!(err.code(), 900);
        assert!(err.is_fatal());
    }
}
