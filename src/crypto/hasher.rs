//! # SHA3 Hasher
//!
//! SHA3-256 and SHA3-512 (FIPS 202, not Keccak) behind a single incremental
//! interface. The curve engine drives the 512-bit variant; the password and
//! shared-key paths use the 256-bit one.
//!
//! ```text
//! Hasher::new(Sha3_512)
//!     │
//!     ├── update(bytes)        ← any number of times
//!     ├── update_hex("ab01")   ← hex decoded first
//!     │
//!     └── finalize_into(dest)  ← 64 bytes, state is reset afterwards
//! ```

use sha3::{Digest, Sha3_256, Sha3_512};

use crate::error::{Error, Result};

/// Which SHA3 width a [`Hasher`] produces
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HashAlgorithm {
    /// SHA3-256, 32-byte digest
    Sha3_256,
    /// SHA3-512, 64-byte digest
    Sha3_512,
}

impl HashAlgorithm {
    /// Digest length in bytes
    pub const fn output_len(self) -> usize {
        match self {
            HashAlgorithm::Sha3_256 => 32,
            HashAlgorithm::Sha3_512 => 64,
        }
    }

    /// Pick the variant producing `len` bytes, if any
    pub fn from_output_len(len: usize) -> Option<Self> {
        match len {
            32 => Some(HashAlgorithm::Sha3_256),
            64 => Some(HashAlgorithm::Sha3_512),
            _ => None,
        }
    }
}

#[derive(Clone)]
enum State {
    Sha3_256(Sha3_256),
    Sha3_512(Sha3_512),
}

/// Incremental SHA3 hasher
///
/// Holds buffered state between [`update`](Self::update) calls. Finalizing
/// resets the state, so one hasher can be reused for several digests.
#[derive(Clone)]
pub struct Hasher {
    algorithm: HashAlgorithm,
    state: State,
}

impl Hasher {
    /// Create a hasher for the given width
    pub fn new(algorithm: HashAlgorithm) -> Self {
        let state = match algorithm {
            HashAlgorithm::Sha3_256 => State::Sha3_256(Sha3_256::new()),
            HashAlgorithm::Sha3_512 => State::Sha3_512(Sha3_512::new()),
        };
        Self { algorithm, state }
    }

    /// The width this hasher produces
    pub fn algorithm(&self) -> HashAlgorithm {
        self.algorithm
    }

    /// Discard any buffered input
    pub fn reset(&mut self) {
        match &mut self.state {
            State::Sha3_256(h) => Digest::reset(h),
            State::Sha3_512(h) => Digest::reset(h),
        }
    }

    /// Feed raw bytes
    pub fn update(&mut self, data: &[u8]) {
        match &mut self.state {
            State::Sha3_256(h) => Digest::update(h, data),
            State::Sha3_512(h) => Digest::update(h, data),
        }
    }

    /// Feed a hex string, decoded to bytes first
    ///
    /// Input that is not valid hex is rejected with
    /// [`Error::UnsupportedDataType`] and leaves the state untouched.
    pub fn update_hex(&mut self, data: &str) -> Result<()> {
        let bytes = hex::decode(data)
            .map_err(|e| Error::UnsupportedDataType(format!("expected hex string: {}", e)))?;
        self.update(&bytes);
        Ok(())
    }

    /// Write the digest into `dest` and reset
    ///
    /// `dest` must be exactly [`HashAlgorithm::output_len`] bytes.
    pub fn finalize_into(&mut self, dest: &mut [u8]) -> Result<()> {
        let expected = self.algorithm.output_len();
        if dest.len() != expected {
            return Err(Error::InvalidLength {
                expected,
                actual: dest.len(),
            });
        }

        match &mut self.state {
            State::Sha3_256(h) => dest.copy_from_slice(&h.finalize_reset()),
            State::Sha3_512(h) => dest.copy_from_slice(&h.finalize_reset()),
        }
        Ok(())
    }

    /// Return the digest and reset
    pub fn finalize(&mut self) -> Vec<u8> {
        match &mut self.state {
            State::Sha3_256(h) => h.finalize_reset().to_vec(),
            State::Sha3_512(h) => h.finalize_reset().to_vec(),
        }
    }

    /// Fixed-width finalize for the 512-bit variant used by the curve engine
    pub(crate) fn finalize_64(&mut self) -> Result<[u8; 64]> {
        let mut out = [0u8; 64];
        self.finalize_into(&mut out)?;
        Ok(out)
    }
}

impl std::fmt::Debug for Hasher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Hasher")
            .field("algorithm", &self.algorithm)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// ONE-SHOT HELPERS
// ============================================================================

/// Hash `data` in one call
pub fn hash(algorithm: HashAlgorithm, data: &[u8]) -> Vec<u8> {
    let mut hasher = Hasher::new(algorithm);
    hasher.update(data);
    hasher.finalize()
}

/// Hash `data` into `dest`, picking the width from `dest.len()`
pub fn hash_into(dest: &mut [u8], data: &[u8]) -> Result<()> {
    let algorithm = HashAlgorithm::from_output_len(dest.len()).ok_or_else(|| {
        Error::UnsupportedDataType(format!("no SHA3 variant with {} byte output", dest.len()))
    })?;
    let mut hasher = Hasher::new(algorithm);
    hasher.update(data);
    hasher.finalize_into(dest)
}

/// SHA3-256 of arbitrary data
pub fn sha3_256(data: &[u8]) -> [u8; 32] {
    let mut out = [0u8; 32];
    out.copy_from_slice(&Sha3_256::digest(data));
    out
}

/// SHA3-512 of arbitrary data
pub fn sha3_512(data: &[u8]) -> [u8; 64] {
    let mut out = [0u8; 64];
    out.copy_from_slice(&Sha3_512::digest(data));
    out
}

// ============================================================================
// TESTS
// ============================================================================
