//! Random byte sources for nonce generation
//!
//! The envelope draws every nonce from a [`RandomSource`]. The default
//! implementation reads the operating system CSPRNG and reports a failure
//! instead of falling back to a weaker generator.

use aes_gcm::aead::rand_core::RngCore;
use aes_gcm::aead::OsRng;

use crate::error::{KeyringError, KeyringResult};

/// Default number of bytes returned by [`RandomSource::next_bytes`]
pub const DEFAULT_RANDOM_LENGTH: usize = 32;

/// A supplier of unpredictable bytes
///
/// Implementations must be safe to call repeatedly from several threads
/// without coordination: no shared counter and no reused output buffer.
pub trait RandomSource: Send + Sync {
    /// Fill `buf` with random bytes
    fn fill_bytes(&self, buf: &mut [u8]) -> KeyringResult<()>;

    /// Return `length` fresh random bytes
    fn next_bytes(&self, length: usize) -> KeyringResult<Vec<u8>> {
        let mut bytes = vec![0u8; length];
        self.fill_bytes(&mut bytes)?;
        Ok(bytes)
    }

    /// Return [`DEFAULT_RANDOM_LENGTH`] fresh random bytes
    fn default_bytes(&self) -> KeyringResult<Vec<u8>> {
        self.next_bytes(DEFAULT_RANDOM_LENGTH)
    }
}

/// Operating system CSPRNG
#[derive(Debug, Clone, Copy, Default)]
pub struct OsRandom;

impl RandomSource for OsRandom {
    fn fill_bytes(&self, buf: &mut [u8]) -> KeyringResult<()> {
        OsRng
            .try_fill_bytes(buf)
            .map_err(|e| KeyringError::RandomSource(format!("OS random generator failed: {}", e)))
    }
}

impl<R: RandomSource + ?Sized> RandomSource for &R {
    fn fill_bytes(&self, buf: &mut [u8]) -> KeyringResult<()> {
        (**self).fill_bytes(buf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_length() {
        let bytes = OsRandom.default_bytes().unwrap();
        assert_eq!(bytes.len(), DEFAULT_RANDOM_LENGTH);
    }

    #[test]
    fn test_requested_length() {
        assert_eq!(OsRandom.next_bytes(12).unwrap().len(), 12);
        assert!(OsRandom.next_bytes(0).unwrap().is_empty());
    }

    #[test]
    fn test_successive_calls_differ() {
        let a = OsRandom.next_bytes(32).unwrap();
        let b = OsRandom.next_bytes(32).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_reference_forwards() {
        let source = OsRandom;
        let by_ref = &source;
        assert_eq!(by_ref.next_bytes(16).unwrap().len(), 16);
    }
}
